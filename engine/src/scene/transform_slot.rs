use cgmath::{Matrix4, SquareMatrix};
use std::cell::Cell;
use std::rc::Rc;

/// A shared, writable transform value.
///
/// A producer owns a slot and writes into it; any number of nodes can be
/// connected to the slot with [`crate::Node::connect_from`] and will read the
/// latest value whenever their transform is queried.
#[derive(Clone, Debug)]
pub struct TransformSlot {
    value: Rc<Cell<Matrix4<f32>>>,
}

impl TransformSlot {
    pub fn new(initial: Matrix4<f32>) -> Self {
        Self {
            value: Rc::new(Cell::new(initial)),
        }
    }

    pub fn get(&self) -> Matrix4<f32> {
        self.value.get()
    }

    pub fn set(&self, transform: Matrix4<f32>) {
        self.value.set(transform);
    }

    /// True when both handles refer to the same slot.
    pub fn ptr_eq(&self, other: &TransformSlot) -> bool {
        Rc::ptr_eq(&self.value, &other.value)
    }
}

impl Default for TransformSlot {
    fn default() -> Self {
        Self::new(Matrix4::identity())
    }
}
