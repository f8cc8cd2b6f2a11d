use cgmath::{InnerSpace, Vector3};

/// CPU-side line strip. Vertices are in the local space of the owning node.
#[derive(Clone, Debug, PartialEq)]
pub struct LinesMesh {
    vertices: Vec<Vector3<f32>>,
    pub color: Vector3<f32>,
    pub line_width: f32,
}

impl LinesMesh {
    pub fn new(color: Vector3<f32>, line_width: f32) -> Self {
        Self {
            vertices: Vec::new(),
            color,
            line_width,
        }
    }

    /// Replace the whole vertex list.
    pub fn set_vertices<I>(&mut self, vertices: I)
    where
        I: IntoIterator<Item = Vector3<f32>>,
    {
        self.vertices.clear();
        self.vertices.extend(vertices);
    }

    pub fn vertices(&self) -> &[Vector3<f32>] {
        &self.vertices
    }

    /// A strip needs at least two vertices to produce a segment.
    pub fn is_drawable(&self) -> bool {
        self.vertices.len() >= 2
    }

    /// Summed length of all segments.
    pub fn length(&self) -> f32 {
        self.vertices
            .windows(2)
            .map(|pair| (pair[1] - pair[0]).magnitude())
            .sum()
    }
}
