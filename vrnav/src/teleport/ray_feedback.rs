use cgmath::{EuclideanSpace, InnerSpace, Matrix4, Point3, Transform, Vector3, vec3};
use engine::scene::{Geometry, LinesMesh};
use engine::{Node, ObjectId};
use std::collections::HashSet;

use super::TeleportConfig;
use crate::physics::PickResult;

/// World-space ray leaving a controller along its local -Z axis.
///
/// The direction is the image of the local point (0, 0, -1) minus the image of
/// the origin, so scaled or sheared controller transforms still point the
/// right way. Returns `None` when the transform collapses the forward axis.
pub fn controller_ray(controller_world: &Matrix4<f32>) -> Option<(Vector3<f32>, Vector3<f32>)> {
    let origin = controller_world.transform_point(Point3::origin());
    let ahead = controller_world.transform_point(Point3::new(0.0, 0.0, -1.0));
    let direction = ahead - origin;

    if direction.magnitude2() <= 0.0 {
        return None;
    }
    Some((origin.to_vec(), direction.normalize()))
}

/// The pick ray line and intersection marker shown while aiming.
pub struct RayFeedback {
    ray_line: Node,
    marker_position: Node,
    marker: Node,
}

impl RayFeedback {
    /// Create the ray under `controller_node` and the marker under `scene_root`.
    /// Both start hidden and are never pickable.
    pub fn build(config: &TeleportConfig, controller_node: &Node, scene_root: &Node) -> Self {
        let ray_line = Node::with_geometry(
            "ray_line",
            Geometry::Lines(LinesMesh::new(config.ray_color, config.ray_line_width)),
        );
        controller_node.add_child(&ray_line);

        let marker_position = Node::new("intersection_position");
        scene_root.add_child(&marker_position);

        let marker = Node::with_geometry(
            "intersection_sphere",
            Geometry::Sphere {
                radius: config.marker_radius,
                color: config.marker_color,
            },
        );
        marker_position.add_child(&marker);

        for node in [&ray_line, &marker_position, &marker] {
            node.set_pickable(false);
        }

        let feedback = Self {
            ray_line,
            marker_position,
            marker,
        };
        feedback.set_visible(false);
        feedback.update(None, config.ray_max_distance);
        feedback
    }

    /// Redraw the ray to the nearest hit, or at full length when nothing was hit.
    /// The marker only moves on a hit.
    pub fn update(&self, nearest: Option<&PickResult>, max_distance: f32) {
        let length = match nearest {
            Some(hit) => {
                self.marker_position
                    .set_transform(Matrix4::from_translation(hit.world_position));
                hit.distance
            }
            None => max_distance,
        };

        self.ray_line.with_lines_mut(|lines| {
            lines.set_vertices([vec3(0.0, 0.0, 0.0), vec3(0.0, 0.0, -length)]);
        });
    }

    pub fn set_visible(&self, visible: bool) {
        self.ray_line.set_visible(visible);
        self.marker.set_visible(visible);
    }

    pub fn is_visible(&self) -> bool {
        self.ray_line.is_visible() && self.marker.is_visible()
    }

    pub fn marker_world_position(&self) -> Vector3<f32> {
        self.marker_position.world_position()
    }

    /// Local length of the ray line.
    pub fn ray_length(&self) -> f32 {
        self.ray_line.with_lines_mut(|lines| lines.length()).unwrap_or(0.0)
    }

    /// Objects that must never be reported by the picker.
    pub fn excluded_objects(&self) -> HashSet<ObjectId> {
        HashSet::from([
            self.ray_line.id(),
            self.marker_position.id(),
            self.marker.id(),
        ])
    }

    /// Remove both primitives from the scene graph.
    pub fn detach(&self) {
        self.ray_line.detach();
        self.marker_position.detach();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::{Deg, Quaternion, Rotation3};

    fn assert_vec_near(actual: Vector3<f32>, expected: Vector3<f32>) {
        assert!(
            (actual - expected).magnitude() < 1e-5,
            "{:?} != {:?}",
            actual,
            expected
        );
    }

    #[test]
    fn test_direction_ignores_position() {
        let rotation = Matrix4::from(Quaternion::from_angle_y(Deg(30.0)));
        let at_origin = controller_ray(&rotation).map(|(_, d)| d);
        let moved = controller_ray(&(Matrix4::from_translation(vec3(4.0, 1.0, -9.0)) * rotation));

        let (origin, direction) = moved.expect("ray");
        assert_vec_near(origin, vec3(4.0, 1.0, -9.0));
        assert_vec_near(direction, at_origin.expect("ray"));
    }

    #[test]
    fn test_direction_is_normalized_forward() {
        let rotation = Quaternion::from_angle_x(Deg(-45.0));
        let world = Matrix4::from_translation(vec3(0.0, 1.5, 0.0))
            * Matrix4::from(rotation)
            * Matrix4::from_nonuniform_scale(0.5, 2.0, 3.0);

        let (_, direction) = controller_ray(&world).expect("ray");

        assert!((direction.magnitude() - 1.0).abs() < 1e-5);
        let expected = Matrix4::from(rotation).transform_vector(vec3(0.0, 0.0, -1.0));
        assert_vec_near(direction, expected);
    }

    #[test]
    fn test_tiny_scale_still_casts() {
        let tiny = Matrix4::from_translation(vec3(0.0, 1.0, 0.0)) * Matrix4::from_scale(1e-4);

        let (origin, direction) = controller_ray(&tiny).expect("ray");

        assert_vec_near(origin, vec3(0.0, 1.0, 0.0));
        assert_vec_near(direction, vec3(0.0, 0.0, -1.0));
    }

    #[test]
    fn test_degenerate_transform_has_no_ray() {
        let flat = Matrix4::from_nonuniform_scale(1.0, 1.0, 0.0);
        assert!(controller_ray(&flat).is_none());
    }

    #[test]
    fn test_update_draws_to_nearest_hit_or_full_length() {
        let config = TeleportConfig::default();
        let controller = Node::new("controller");
        let root = Node::new("root");
        let feedback = RayFeedback::build(&config, &controller, &root);

        assert!((feedback.ray_length() - 2000.0).abs() < 1e-3);

        let hit = PickResult {
            world_position: vec3(3.0, 0.0, -4.0),
            distance: 5.0,
            object: ObjectId(42),
        };
        feedback.update(Some(&hit), config.ray_max_distance);
        assert!((feedback.ray_length() - 5.0).abs() < 1e-5);
        assert_eq!(feedback.marker_world_position(), vec3(3.0, 0.0, -4.0));

        feedback.update(None, config.ray_max_distance);
        assert!((feedback.ray_length() - 2000.0).abs() < 1e-3);
        assert_eq!(feedback.marker_world_position(), vec3(3.0, 0.0, -4.0));
    }

    #[test]
    fn test_primitives_start_hidden_and_unpickable() {
        let config = TeleportConfig::default();
        let controller = Node::new("controller");
        let root = Node::new("root");
        let feedback = RayFeedback::build(&config, &controller, &root);

        assert!(!feedback.is_visible());
        assert_eq!(feedback.excluded_objects().len(), 3);
        assert!(controller.children().iter().all(|child| !child.is_pickable()));

        feedback.detach();
        assert!(controller.children().is_empty());
        assert!(root.children().is_empty());
    }
}
