pub mod picker;
pub mod rapier_picker;
pub mod util;

pub use picker::{PickResult, Picker};
pub use rapier_picker::RapierPicker;
