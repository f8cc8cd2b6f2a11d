mod config;
mod inputs;
mod jumping_navigation;
mod ray_feedback;
mod transition;

pub use config::{TeleportConfig, TransitionMode};
pub use inputs::{NavigationInputs, NavigationInputsBuilder};
pub use jumping_navigation::{JumpingNavigation, NavigationPhase};
pub use ray_feedback::{RayFeedback, controller_ray};
pub use transition::{Transition, TransitionJob, TransitionSample, compute_destination};
