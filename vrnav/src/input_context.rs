use std::cell::RefCell;

use engine::input_log;

/// Digital buttons of a tracked controller, updated by the tracking system.
pub trait ControllerSensor {
    fn button(&self, index: usize) -> bool;
}

impl<T: ControllerSensor> ControllerSensor for RefCell<T> {
    fn button(&self, index: usize) -> bool {
        self.borrow().button(index)
    }
}

/// Plain button state, for hosts that push values in and for tests.
#[derive(Clone, Debug, Default)]
pub struct ControllerState {
    buttons: Vec<bool>,
}

impl ControllerState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_button(&mut self, index: usize, pressed: bool) {
        if index >= self.buttons.len() {
            self.buttons.resize(index + 1, false);
        }
        self.buttons[index] = pressed;
    }
}

impl ControllerSensor for ControllerState {
    fn button(&self, index: usize) -> bool {
        self.buttons.get(index).copied().unwrap_or(false)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ButtonEdge {
    Pressed,
    Released,
}

/// Turns a sampled button value into press/release edges.
#[derive(Clone, Debug)]
pub struct ButtonEdgeDetector {
    button_index: usize,
    was_pressed: bool,
}

impl ButtonEdgeDetector {
    pub fn new(button_index: usize) -> Self {
        Self {
            button_index,
            was_pressed: false,
        }
    }

    pub fn button_index(&self) -> usize {
        self.button_index
    }

    pub fn is_pressed(&self) -> bool {
        self.was_pressed
    }

    /// Sample the bound button on `sensor`.
    pub fn poll(&mut self, sensor: &dyn ControllerSensor) -> Option<ButtonEdge> {
        self.update(sensor.button(self.button_index))
    }

    /// Feed the current value. Yields an edge exactly once per change.
    pub fn update(&mut self, pressed: bool) -> Option<ButtonEdge> {
        let edge = match (self.was_pressed, pressed) {
            (false, true) => Some(ButtonEdge::Pressed),
            (true, false) => Some(ButtonEdge::Released),
            _ => None,
        };
        self.was_pressed = pressed;

        if let Some(edge) = edge {
            input_log!(DEBUG, "button {} {:?}", self.button_index, edge);
        }
        edge
    }
}
