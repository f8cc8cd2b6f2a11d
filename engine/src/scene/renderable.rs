use cgmath::Matrix4;

use super::{Geometry, Node, ObjectId, Scene};

/// A piece of geometry that would be drawn this frame, with its world transform.
#[derive(Clone, Debug)]
pub struct RenderItem {
    pub object: ObjectId,
    pub name: String,
    pub world_transform: Matrix4<f32>,
    pub geometry: Geometry,
}

/// Anything that can be flattened into a list of visible render items.
pub trait Renderable {
    fn render_items(&self) -> Vec<RenderItem>;
}

impl Renderable for Node {
    /// Hidden nodes hide their whole subtree.
    fn render_items(&self) -> Vec<RenderItem> {
        if !self.is_visible() {
            return Vec::new();
        }

        let mut items = Vec::new();
        let geometry = self.geometry().filter(|geometry| match geometry {
            Geometry::Lines(lines) => lines.is_drawable(),
            Geometry::Sphere { .. } => true,
        });
        if let Some(geometry) = geometry {
            items.push(RenderItem {
                object: self.id(),
                name: self.name(),
                world_transform: self.world_transform(),
                geometry,
            });
        }
        for child in self.children() {
            items.extend(child.render_items());
        }
        items
    }
}

impl Renderable for Scene {
    fn render_items(&self) -> Vec<RenderItem> {
        self.root().render_items()
    }
}
