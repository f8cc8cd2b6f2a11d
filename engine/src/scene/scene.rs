use std::collections::HashSet;

use super::{Node, ObjectId};

/// A named scene graph with a single root node.
#[derive(Clone, Debug)]
pub struct Scene {
    name: String,
    root: Node,
}

impl Scene {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_owned(),
            root: Node::new("root"),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    /// Find the first node with `name`, depth-first from the root.
    pub fn find(&self, name: &str) -> Option<Node> {
        let mut found = None;
        self.root.visit(&mut |node| {
            if found.is_none() && node.name() == name {
                found = Some(node.clone());
            }
        });
        found
    }

    /// Ids of every node flagged as not pickable.
    pub fn unpickable_objects(&self) -> HashSet<ObjectId> {
        let mut ids = HashSet::new();
        self.root.visit(&mut |node| {
            if !node.is_pickable() {
                ids.insert(node.id());
            }
        });
        ids
    }
}
