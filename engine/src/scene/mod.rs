pub mod scene;
pub use scene::Scene;

pub mod scene_node;
pub use scene_node::{Geometry, Node, ObjectId};

pub mod lines_mesh;
pub use lines_mesh::LinesMesh;

pub mod transform_slot;
pub use transform_slot::TransformSlot;

pub mod renderable;
pub use renderable::{RenderItem, Renderable};
