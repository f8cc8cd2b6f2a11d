pub mod logging;
pub mod scene;

pub use scene::{Node, ObjectId, Scene, TransformSlot};
