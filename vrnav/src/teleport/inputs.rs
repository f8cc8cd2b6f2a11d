use engine::{Node, Scene};
use std::rc::Rc;

use crate::error::{NavigationError, NavigationResult};
use crate::input_context::ControllerSensor;
use crate::physics::Picker;

/// Everything the technique reads or writes each frame.
#[derive(Clone)]
pub struct NavigationInputs {
    pub scene: Scene,
    pub picker: Rc<dyn Picker>,
    pub navigation_node: Node,
    pub head_node: Node,
    pub controller_node: Node,
    pub controller_sensor: Rc<dyn ControllerSensor>,
}

impl NavigationInputs {
    pub fn builder() -> NavigationInputsBuilder {
        NavigationInputsBuilder::default()
    }
}

/// Collects inputs and refuses to build while any of them is missing.
#[derive(Default)]
pub struct NavigationInputsBuilder {
    scene: Option<Scene>,
    picker: Option<Rc<dyn Picker>>,
    navigation_node: Option<Node>,
    head_node: Option<Node>,
    controller_node: Option<Node>,
    controller_sensor: Option<Rc<dyn ControllerSensor>>,
}

impl NavigationInputsBuilder {
    pub fn scene(mut self, scene: Scene) -> Self {
        self.scene = Some(scene);
        self
    }

    pub fn picker(mut self, picker: Rc<dyn Picker>) -> Self {
        self.picker = Some(picker);
        self
    }

    pub fn navigation_node(mut self, node: Node) -> Self {
        self.navigation_node = Some(node);
        self
    }

    pub fn head_node(mut self, node: Node) -> Self {
        self.head_node = Some(node);
        self
    }

    pub fn controller_node(mut self, node: Node) -> Self {
        self.controller_node = Some(node);
        self
    }

    pub fn controller_sensor(mut self, sensor: Rc<dyn ControllerSensor>) -> Self {
        self.controller_sensor = Some(sensor);
        self
    }

    pub fn build(self) -> NavigationResult<NavigationInputs> {
        Ok(NavigationInputs {
            scene: require(self.scene, "scene")?,
            picker: require(self.picker, "picker")?,
            navigation_node: require(self.navigation_node, "navigation_node")?,
            head_node: require(self.head_node, "head_node")?,
            controller_node: require(self.controller_node, "controller_node")?,
            controller_sensor: require(self.controller_sensor, "controller_sensor")?,
        })
    }
}

fn require<T>(value: Option<T>, input: &'static str) -> NavigationResult<T> {
    value.ok_or(NavigationError::MissingInput { input })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input_context::ControllerState;
    use crate::physics::RapierPicker;
    use std::cell::RefCell;

    #[test]
    fn test_missing_input_is_reported_by_name() {
        let result = NavigationInputs::builder()
            .scene(Scene::new("scene"))
            .picker(Rc::new(RapierPicker::new()))
            .navigation_node(Node::new("navigation"))
            .controller_node(Node::new("controller"))
            .controller_sensor(Rc::new(RefCell::new(ControllerState::new())))
            .build();

        assert_eq!(
            result.err(),
            Some(NavigationError::MissingInput { input: "head_node" })
        );
    }

    #[test]
    fn test_complete_inputs_build() {
        let result = NavigationInputs::builder()
            .scene(Scene::new("scene"))
            .picker(Rc::new(RapierPicker::new()))
            .navigation_node(Node::new("navigation"))
            .head_node(Node::new("head"))
            .controller_node(Node::new("controller"))
            .controller_sensor(Rc::new(ControllerState::new()))
            .build();

        assert!(result.is_ok());
    }
}
