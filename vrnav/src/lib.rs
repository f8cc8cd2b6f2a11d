pub mod error;
pub mod input_context;
pub mod physics;
pub mod teleport;
pub mod time;

pub use error::{NavigationError, NavigationResult};
pub use input_context::{ButtonEdge, ButtonEdgeDetector, ControllerSensor, ControllerState};
pub use physics::{PickResult, Picker, RapierPicker};
pub use teleport::{
    JumpingNavigation, NavigationInputs, NavigationInputsBuilder, NavigationPhase, TeleportConfig,
    TransitionMode,
};
pub use time::Time;
