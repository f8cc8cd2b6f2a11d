use cgmath::{InnerSpace, Vector3};
use engine::{ObjectId, pick_log};
use rapier3d::prelude::*;
use std::collections::HashSet;

use super::picker::{PickResult, Picker, sort_by_distance};
use super::util::{vec_to_npoint, vec_to_nvec};

/// Picker backed by a rapier collider set.
///
/// Each collider carries the [`ObjectId`] of the scene node it stands for in
/// its user data, so hits map back to scene objects.
pub struct RapierPicker {
    bodies: RigidBodySet,
    colliders: ColliderSet,
    query_pipeline: QueryPipeline,
}

impl RapierPicker {
    pub fn new() -> Self {
        Self {
            bodies: RigidBodySet::new(),
            colliders: ColliderSet::new(),
            query_pipeline: QueryPipeline::new(),
        }
    }

    pub fn add_collider(&mut self, object: ObjectId, collider: Collider) -> ColliderHandle {
        let mut collider = collider;
        collider.user_data = object.0 as u128;
        let handle = self.colliders.insert(collider);
        self.query_pipeline.update(&self.colliders);
        handle
    }

    /// Axis aligned box centered at `center`.
    pub fn add_box(
        &mut self,
        object: ObjectId,
        center: Vector3<f32>,
        half_extents: Vector3<f32>,
    ) -> ColliderHandle {
        let collider = ColliderBuilder::cuboid(half_extents.x, half_extents.y, half_extents.z)
            .translation(vec_to_nvec(center))
            .build();
        self.add_collider(object, collider)
    }

    pub fn add_ball(&mut self, object: ObjectId, center: Vector3<f32>, radius: f32) -> ColliderHandle {
        let collider = ColliderBuilder::ball(radius)
            .translation(vec_to_nvec(center))
            .build();
        self.add_collider(object, collider)
    }

    pub fn collider_count(&self) -> usize {
        self.colliders.len()
    }
}

impl Default for RapierPicker {
    fn default() -> Self {
        Self::new()
    }
}

impl Picker for RapierPicker {
    fn pick(
        &self,
        origin: Vector3<f32>,
        direction: Vector3<f32>,
        max_distance: f32,
        exclude: &HashSet<ObjectId>,
    ) -> Vec<PickResult> {
        let direction = direction.normalize();
        let ray = Ray::new(vec_to_npoint(origin), vec_to_nvec(direction));

        let mut hits = Vec::new();
        self.query_pipeline.intersections_with_ray(
            &self.bodies,
            &self.colliders,
            &ray,
            max_distance,
            true,
            QueryFilter::default(),
            |handle, intersection| {
                let object = self
                    .colliders
                    .get(handle)
                    .map(|collider| ObjectId(collider.user_data as u64));
                if let Some(object) = object.filter(|object| !exclude.contains(object)) {
                    let distance = intersection.time_of_impact;
                    hits.push(PickResult {
                        world_position: origin + direction * distance,
                        distance,
                        object,
                    });
                }
                true
            },
        );

        sort_by_distance(&mut hits);
        pick_log!(TRACE, "ray from {:?} hit {} object(s)", origin, hits.len());
        hits
    }
}
