use cgmath::{Matrix4, SquareMatrix, Vector3};
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use std::sync::atomic::{AtomicU64, Ordering};

use super::{LinesMesh, TransformSlot};
use crate::scene_log;

static NEXT_OBJECT_ID: AtomicU64 = AtomicU64::new(1);

/// Opaque identity of a scene node, used by pick results and exclusion sets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(pub u64);

impl ObjectId {
    pub fn next() -> Self {
        ObjectId(NEXT_OBJECT_ID.fetch_add(1, Ordering::Relaxed))
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Geometry {
    Lines(LinesMesh),
    Sphere { radius: f32, color: Vector3<f32> },
}

pub struct SceneNode {
    id: ObjectId,
    name: String,
    transform: Matrix4<f32>,
    transform_source: Option<TransformSlot>,
    parent: Weak<RefCell<SceneNode>>,
    children: Vec<Node>,
    geometry: Option<Geometry>,
    visible: bool,
    pickable: bool,
}

/// Shared handle to a node in the scene graph.
#[derive(Clone)]
pub struct Node(Rc<RefCell<SceneNode>>);

impl Node {
    pub fn new(name: &str) -> Node {
        Node(Rc::new(RefCell::new(SceneNode {
            id: ObjectId::next(),
            name: name.to_owned(),
            transform: Matrix4::identity(),
            transform_source: None,
            parent: Weak::new(),
            children: Vec::new(),
            geometry: None,
            visible: true,
            pickable: true,
        })))
    }

    pub fn with_geometry(name: &str, geometry: Geometry) -> Node {
        let node = Node::new(name);
        node.0.borrow_mut().geometry = Some(geometry);
        node
    }

    pub fn with_transform(name: &str, transform: Matrix4<f32>) -> Node {
        let node = Node::new(name);
        node.set_transform(transform);
        node
    }

    pub fn id(&self) -> ObjectId {
        self.0.borrow().id
    }

    pub fn name(&self) -> String {
        self.0.borrow().name.clone()
    }

    pub fn ptr_eq(&self, other: &Node) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    /// Attach `child` under this node, detaching it from its previous parent.
    pub fn add_child(&self, child: &Node) {
        child.detach();
        child.0.borrow_mut().parent = Rc::downgrade(&self.0);
        self.0.borrow_mut().children.push(child.clone());
    }

    pub fn remove_child(&self, child: &Node) -> bool {
        let removed = {
            let mut node = self.0.borrow_mut();
            let before = node.children.len();
            node.children.retain(|c| !c.ptr_eq(child));
            before != node.children.len()
        };
        if removed {
            child.0.borrow_mut().parent = Weak::new();
        }
        removed
    }

    /// Remove this node from its parent, if any.
    pub fn detach(&self) {
        if let Some(parent) = self.parent() {
            parent.remove_child(self);
        }
    }

    pub fn parent(&self) -> Option<Node> {
        self.0.borrow().parent.upgrade().map(Node)
    }

    pub fn children(&self) -> Vec<Node> {
        self.0.borrow().children.clone()
    }

    /// Local transform. While connected to a slot, the slot's value wins.
    pub fn transform(&self) -> Matrix4<f32> {
        let node = self.0.borrow();
        match &node.transform_source {
            Some(slot) => slot.get(),
            None => node.transform,
        }
    }

    pub fn set_transform(&self, transform: Matrix4<f32>) {
        let mut node = self.0.borrow_mut();
        if node.transform_source.is_some() {
            scene_log!(
                DEBUG,
                "write to '{}' is shadowed by its connected transform slot",
                node.name
            );
        }
        node.transform = transform;
    }

    /// Drive this node's transform from `slot` until [`Node::disconnect`] is called.
    pub fn connect_from(&self, slot: &TransformSlot) {
        self.0.borrow_mut().transform_source = Some(slot.clone());
    }

    /// Drop the slot binding. The node keeps the slot's last value.
    pub fn disconnect(&self) {
        let mut node = self.0.borrow_mut();
        if let Some(slot) = node.transform_source.take() {
            node.transform = slot.get();
        }
    }

    pub fn is_connected_to(&self, slot: &TransformSlot) -> bool {
        self.0
            .borrow()
            .transform_source
            .as_ref()
            .is_some_and(|source| source.ptr_eq(slot))
    }

    pub fn world_transform(&self) -> Matrix4<f32> {
        let local = self.transform();
        match self.parent() {
            Some(parent) => parent.world_transform() * local,
            None => local,
        }
    }

    pub fn world_position(&self) -> Vector3<f32> {
        self.world_transform().w.truncate()
    }

    pub fn is_visible(&self) -> bool {
        self.0.borrow().visible
    }

    pub fn set_visible(&self, visible: bool) {
        self.0.borrow_mut().visible = visible;
    }

    pub fn is_pickable(&self) -> bool {
        self.0.borrow().pickable
    }

    pub fn set_pickable(&self, pickable: bool) {
        self.0.borrow_mut().pickable = pickable;
    }

    pub fn geometry(&self) -> Option<Geometry> {
        self.0.borrow().geometry.clone()
    }

    /// Run `f` against the node's line strip. Returns `None` for other geometry.
    pub fn with_lines_mut<R>(&self, f: impl FnOnce(&mut LinesMesh) -> R) -> Option<R> {
        match self.0.borrow_mut().geometry.as_mut() {
            Some(Geometry::Lines(lines)) => Some(f(lines)),
            _ => None,
        }
    }

    /// Depth-first walk over this node and all descendants.
    pub fn visit(&self, f: &mut dyn FnMut(&Node)) {
        f(self);
        for child in self.children() {
            child.visit(f);
        }
    }
}

impl std::fmt::Debug for Node {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let node = self.0.borrow();
        f.debug_struct("Node")
            .field("id", &node.id)
            .field("name", &node.name)
            .field("visible", &node.visible)
            .field("pickable", &node.pickable)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::vec3;

    #[test]
    fn test_world_transform_composes_parents() {
        let root = Node::new("root");
        let navigation = Node::with_transform("navigation", Matrix4::from_translation(vec3(10.0, 0.0, 5.0)));
        let head = Node::with_transform("head", Matrix4::from_translation(vec3(0.0, 1.7, 0.0)));
        root.add_child(&navigation);
        navigation.add_child(&head);

        assert_eq!(head.world_position(), vec3(10.0, 1.7, 5.0));
        assert!(head.parent().is_some_and(|p| p.ptr_eq(&navigation)));
    }

    #[test]
    fn test_add_child_reparents() {
        let a = Node::new("a");
        let b = Node::new("b");
        let child = Node::new("child");

        a.add_child(&child);
        b.add_child(&child);

        assert!(a.children().is_empty());
        assert_eq!(b.children().len(), 1);
    }

    #[test]
    fn test_connected_slot_overrides_local_transform() {
        let node = Node::new("navigation");
        let slot = TransformSlot::new(Matrix4::from_translation(vec3(1.0, 0.0, 0.0)));

        node.connect_from(&slot);
        node.set_transform(Matrix4::from_translation(vec3(9.0, 9.0, 9.0)));
        assert_eq!(node.world_position(), vec3(1.0, 0.0, 0.0));

        slot.set(Matrix4::from_translation(vec3(2.0, 0.0, 0.0)));
        assert_eq!(node.world_position(), vec3(2.0, 0.0, 0.0));
        assert!(node.is_connected_to(&slot));

        node.disconnect();
        slot.set(Matrix4::from_translation(vec3(3.0, 0.0, 0.0)));
        assert_eq!(node.world_position(), vec3(2.0, 0.0, 0.0));
        assert!(!node.is_connected_to(&slot));
    }

    #[test]
    fn test_with_lines_mut_only_touches_line_geometry() {
        let line = Node::with_geometry("ray", Geometry::Lines(LinesMesh::new(vec3(1.0, 0.0, 0.0), 5.0)));
        let sphere = Node::with_geometry(
            "marker",
            Geometry::Sphere {
                radius: 0.1,
                color: vec3(1.0, 0.0, 0.0),
            },
        );

        let updated = line.with_lines_mut(|lines| {
            lines.set_vertices([vec3(0.0, 0.0, 0.0), vec3(0.0, 0.0, -2.0)]);
            lines.length()
        });

        assert_eq!(updated, Some(2.0));
        assert_eq!(sphere.with_lines_mut(|lines| lines.length()), None);
    }

    #[test]
    fn test_object_ids_are_unique() {
        assert_ne!(Node::new("a").id(), Node::new("b").id());
    }
}
