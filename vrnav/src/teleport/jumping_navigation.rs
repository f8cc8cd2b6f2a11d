use cgmath::Matrix4;
use engine::{Node, ObjectId, TransformSlot, nav_log};
use std::collections::HashSet;

use super::ray_feedback::{RayFeedback, controller_ray};
use super::transition::{Transition, compute_destination};
use super::{NavigationInputs, TeleportConfig, TransitionMode};
use crate::error::{NavigationError, NavigationResult};
use crate::input_context::{ButtonEdge, ButtonEdgeDetector};
use crate::time::Time;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavigationPhase {
    /// Disabled; button input is ignored.
    Idle,
    /// Enabled and waiting for the trigger.
    Ready,
    /// Trigger held, ray and marker visible.
    Aiming,
}

/// Inputs plus the resources built for them.
struct Binding {
    inputs: NavigationInputs,
    feedback: RayFeedback,
    button: ButtonEdgeDetector,
}

impl Binding {
    /// Feedback primitives plus whatever the scene currently marks unpickable.
    fn excluded_objects(&self) -> HashSet<ObjectId> {
        let mut exclude = self.feedback.excluded_objects();
        exclude.extend(self.inputs.scene.unpickable_objects());
        exclude
    }
}

/// Point-and-jump navigation driven by a tracked controller.
///
/// Per frame the host calls [`JumpingNavigation::update`], which handles any
/// button edge first and then runs [`JumpingNavigation::evaluate`]. While
/// enabled the navigation node reads its transform from
/// [`JumpingNavigation::output`].
pub struct JumpingNavigation {
    config: TeleportConfig,
    transition_mode: TransitionMode,
    active: bool,
    aiming: bool,
    output: TransformSlot,
    binding: Option<Binding>,
    transition: Option<Transition>,
    has_target: bool,
}

impl JumpingNavigation {
    pub fn new(config: TeleportConfig) -> NavigationResult<Self> {
        config.validate()?;
        Ok(Self {
            transition_mode: config.transition_mode,
            config,
            active: false,
            aiming: false,
            output: TransformSlot::default(),
            binding: None,
            transition: None,
            has_target: false,
        })
    }

    /// Bind the scene, nodes and button source, and build the ray and marker.
    /// Rebinding removes the primitives built for the previous inputs, drops
    /// any move in flight and, while enabled, takes over the new navigation node.
    pub fn set_inputs(&mut self, inputs: NavigationInputs) {
        if let Some(previous) = self.binding.take() {
            previous.feedback.detach();
            if !previous.inputs.navigation_node.ptr_eq(&inputs.navigation_node) {
                previous.inputs.navigation_node.disconnect();
            }
        }
        if self.transition.take().is_some() {
            nav_log!(DEBUG, "transition dropped by rebinding");
        }

        let feedback = RayFeedback::build(&self.config, &inputs.controller_node, inputs.scene.root());

        let mut button = ButtonEdgeDetector::new(self.config.button_index);
        // Whatever is held right now is not a fresh press.
        button.update(inputs.controller_sensor.button(self.config.button_index));

        nav_log!(
            DEBUG,
            "inputs bound: navigation '{}', head '{}', controller '{}', button {}",
            inputs.navigation_node.name(),
            inputs.head_node.name(),
            inputs.controller_node.name(),
            self.config.button_index
        );

        if self.active {
            self.take_over(&inputs.navigation_node);
        }

        self.binding = Some(Binding {
            inputs,
            feedback,
            button,
        });
        self.aiming = false;
        self.has_target = false;
    }

    /// Capture the node's current transform into the output and bind it there.
    fn take_over(&self, navigation_node: &Node) {
        self.output.set(navigation_node.transform());
        navigation_node.disconnect();
        navigation_node.connect_from(&self.output);
    }

    /// Enabling takes over the navigation node: its current transform becomes
    /// the output value and the node is rebound to the output slot.
    /// Disabling leaves that binding in place.
    pub fn enable(&mut self, enabled: bool) -> NavigationResult<()> {
        if enabled {
            let binding = self.binding.as_ref().ok_or(NavigationError::NotConfigured)?;
            self.take_over(&binding.inputs.navigation_node);
        }

        if self.aiming {
            self.stop_aiming();
        }
        self.active = enabled;
        nav_log!(DEBUG, "jumping navigation {}", if enabled { "enabled" } else { "disabled" });
        Ok(())
    }

    /// Switch transition mode. Any move in flight is dropped where it is.
    pub fn set_transition_mode(&mut self, mode: TransitionMode) {
        self.transition_mode = mode;
        if self.transition.take().is_some() {
            nav_log!(DEBUG, "transition cancelled by mode change");
        }
    }

    /// String form used by operator configuration. Unknown values are ignored.
    pub fn set_transition_mode_str(&mut self, mode: &str) {
        match mode.parse::<TransitionMode>() {
            Ok(mode) => self.set_transition_mode(mode),
            Err(err) => nav_log!(WARN, "{}; keeping {}", err, self.transition_mode),
        }
    }

    pub fn transition_mode(&self) -> TransitionMode {
        self.transition_mode
    }

    pub fn phase(&self) -> NavigationPhase {
        match (self.active, self.aiming) {
            (false, _) => NavigationPhase::Idle,
            (true, false) => NavigationPhase::Ready,
            (true, true) => NavigationPhase::Aiming,
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn is_aiming(&self) -> bool {
        self.aiming
    }

    pub fn is_transitioning(&self) -> bool {
        self.transition.is_some()
    }

    pub fn transition(&self) -> Option<&Transition> {
        self.transition.as_ref()
    }

    /// The slot the navigation node is bound to while this technique owns it.
    pub fn output(&self) -> &TransformSlot {
        &self.output
    }

    pub fn config(&self) -> &TeleportConfig {
        &self.config
    }

    pub fn feedback_visible(&self) -> bool {
        self.binding
            .as_ref()
            .is_some_and(|binding| binding.feedback.is_visible())
    }

    pub fn ray_length(&self) -> Option<f32> {
        self.binding.as_ref().map(|binding| binding.feedback.ray_length())
    }

    pub fn marker_position(&self) -> Option<cgmath::Vector3<f32>> {
        self.binding
            .as_ref()
            .map(|binding| binding.feedback.marker_world_position())
    }

    /// One frame: poll the bound button, handle its edge, then evaluate.
    pub fn update(&mut self, time: &Time) -> NavigationResult<()> {
        let edge = {
            let binding = self.binding.as_mut().ok_or(NavigationError::NotConfigured)?;
            let sensor = binding.inputs.controller_sensor.clone();
            binding.button.poll(sensor.as_ref())
        };

        if let Some(edge) = edge {
            self.handle_button_edge(edge, time)?;
        }
        self.evaluate(time)
    }

    /// Event-style entry point for hosts that deliver button changes themselves.
    /// Repeated values are ignored.
    pub fn on_button_changed(&mut self, pressed: bool, time: &Time) -> NavigationResult<()> {
        let edge = self
            .binding
            .as_mut()
            .ok_or(NavigationError::NotConfigured)?
            .button
            .update(pressed);

        match edge {
            Some(edge) => self.handle_button_edge(edge, time),
            None => Ok(()),
        }
    }

    fn handle_button_edge(&mut self, edge: ButtonEdge, time: &Time) -> NavigationResult<()> {
        if !self.active {
            return Ok(());
        }

        match (edge, self.aiming) {
            (ButtonEdge::Pressed, false) => {
                self.aiming = true;
                if let Some(binding) = &self.binding {
                    binding.feedback.set_visible(true);
                }
                nav_log!(DEBUG, "aiming");
            }
            (ButtonEdge::Released, true) => {
                self.jump(time)?;
                self.stop_aiming();
            }
            _ => {}
        }
        Ok(())
    }

    fn stop_aiming(&mut self) {
        self.aiming = false;
        if let Some(binding) = &self.binding {
            binding.feedback.set_visible(false);
        }
    }

    /// Move the navigation node so the viewpoint ends up above the marker.
    fn jump(&mut self, time: &Time) -> NavigationResult<()> {
        let binding = self.binding.as_ref().ok_or(NavigationError::NotConfigured)?;

        if !self.has_target {
            nav_log!(DEBUG, "release without a target, staying put");
            return Ok(());
        }

        let navigation = binding.inputs.navigation_node.transform();
        let head_world = binding.inputs.head_node.world_position();
        let head_offset = head_world - binding.inputs.navigation_node.world_position();
        let marker = binding.feedback.marker_world_position();
        let destination = compute_destination(navigation, marker, head_offset);

        if self.transition.take().is_some() {
            nav_log!(DEBUG, "replacing transition in flight");
        }

        match self.transition_mode {
            TransitionMode::Instant => self.write_output(destination),
            TransitionMode::Animated => {
                let transition = Transition::new(
                    destination,
                    head_world,
                    head_offset,
                    time.total,
                    self.config.animation_speed,
                );
                if transition.job().is_degenerate() {
                    self.write_output(destination);
                } else {
                    nav_log!(
                        DEBUG,
                        "animating {:?} -> {:?} over {:.3}s",
                        transition.job().start_pos,
                        transition.job().target_pos,
                        transition.job().travel_time()
                    );
                    self.transition = Some(transition);
                }
            }
        }
        Ok(())
    }

    fn write_output(&self, transform: Matrix4<f32>) {
        nav_log!(DEBUG, "navigation moved to {:?}", transform.w.truncate());
        self.output.set(transform);
    }

    /// Recompute the ray and marker, then advance any transition in flight.
    /// Runs every frame whether or not the technique is active.
    pub fn evaluate(&mut self, time: &Time) -> NavigationResult<()> {
        let binding = self.binding.as_ref().ok_or(NavigationError::NotConfigured)?;
        let max_distance = self.config.ray_max_distance;

        let controller_world = binding.inputs.controller_node.world_transform();
        let hits = match controller_ray(&controller_world) {
            Some((origin, direction)) => {
                let exclude = binding.excluded_objects();
                binding.inputs.picker.pick(origin, direction, max_distance, &exclude)
            }
            None => Vec::new(),
        };

        let nearest = hits.first();
        binding.feedback.update(nearest, max_distance);
        self.has_target = nearest.is_some();

        if let Some(transition) = &self.transition {
            let (transform, finished) = transition.advance(time.total);
            self.output.set(transform);
            if finished {
                nav_log!(DEBUG, "transition finished at {:?}", transform.w.truncate());
                self.transition = None;
            }
        }
        Ok(())
    }
}
