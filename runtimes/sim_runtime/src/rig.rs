use cgmath::{Deg, Matrix4, Quaternion, Rotation3, vec3};
use engine::{Node, Scene};

/// Tracked viewer: navigation node, a fixed avatar offset carrying the head,
/// and a hand controller. Only the navigation node is moved by navigation.
pub struct ViewerRig {
    pub navigation: Node,
    pub avatar: Node,
    pub head: Node,
    pub controller: Node,
}

impl ViewerRig {
    pub fn new(scene: &Scene, head_height: f32) -> ViewerRig {
        let navigation = Node::new("navigation_node");
        let avatar = Node::new("avatar");
        let head = Node::with_transform("head", Matrix4::from_translation(vec3(0.0, head_height, 0.0)));
        let controller = Node::new("controller");

        scene.root().add_child(&navigation);
        navigation.add_child(&avatar);
        avatar.add_child(&head);
        navigation.add_child(&controller);

        for node in [&navigation, &avatar, &head, &controller] {
            node.set_pickable(false);
        }

        let rig = ViewerRig {
            navigation,
            avatar,
            head,
            controller,
        };
        rig.aim(head_height, 0.0, 0.0);
        rig
    }

    /// Hold the controller at chest height, a little right of and in front of the head.
    pub fn aim(&self, head_height: f32, yaw_degrees: f32, pitch_degrees: f32) {
        let orientation = Quaternion::from_angle_y(Deg(yaw_degrees)) * Quaternion::from_angle_x(Deg(pitch_degrees));
        let position = vec3(0.2, head_height - 0.4, -0.3);
        self.controller
            .set_transform(Matrix4::from_translation(position) * Matrix4::from(orientation));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_head_follows_navigation() {
        let scene = Scene::new("sim");
        let rig = ViewerRig::new(&scene, 1.7);

        rig.navigation
            .set_transform(Matrix4::from_translation(vec3(3.0, 0.0, -2.0)));

        assert_eq!(rig.head.world_position(), vec3(3.0, 1.7, -2.0));
        assert!(rig.avatar.children()[0].ptr_eq(&rig.head));
        assert!(scene.unpickable_objects().contains(&rig.controller.id()));
    }
}
