use cgmath::{Vector3, vec3};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{NavigationError, NavigationResult};

/// How a confirmed destination is applied to the navigation output.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransitionMode {
    #[default]
    Instant,
    Animated,
}

impl FromStr for TransitionMode {
    type Err = NavigationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "instant" => Ok(TransitionMode::Instant),
            "animated" => Ok(TransitionMode::Animated),
            other => Err(NavigationError::UnknownTransitionMode(other.to_owned())),
        }
    }
}

impl fmt::Display for TransitionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransitionMode::Instant => write!(f, "instant"),
            TransitionMode::Animated => write!(f, "animated"),
        }
    }
}

/// Configuration for the jumping navigation technique
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TeleportConfig {
    /// Whether the host should enable the technique once its inputs are set.
    pub enabled: bool,
    pub transition_mode: TransitionMode,
    /// Length of the pick ray, in scene units.
    pub ray_max_distance: f32,
    /// Travel speed of animated transitions, in scene units per second.
    pub animation_speed: f32,
    /// Controller button that starts and confirms a jump.
    pub button_index: usize,
    pub ray_line_width: f32,
    pub ray_color: Vector3<f32>,
    pub marker_color: Vector3<f32>,
    pub marker_radius: f32,
}

impl Default for TeleportConfig {
    fn default() -> Self {
        TeleportConfig {
            enabled: true,
            transition_mode: TransitionMode::Instant,
            ray_max_distance: 2000.0,
            animation_speed: 20.0,
            button_index: 4,
            ray_line_width: 5.0,
            ray_color: vec3(1.0, 0.0, 0.0),
            marker_color: vec3(1.0, 0.0, 0.0),
            marker_radius: 0.1,
        }
    }
}

impl TeleportConfig {
    pub fn validate(&self) -> NavigationResult<()> {
        positive("ray_max_distance", self.ray_max_distance)?;
        positive("animation_speed", self.animation_speed)?;
        positive("ray_line_width", self.ray_line_width)?;
        positive("marker_radius", self.marker_radius)?;
        Ok(())
    }
}

fn positive(field: &'static str, value: f32) -> NavigationResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(NavigationError::InvalidConfig {
            field,
            reason: format!("expected a finite value > 0, got {}", value),
        })
    }
}
