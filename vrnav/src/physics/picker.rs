use cgmath::Vector3;
use engine::ObjectId;
use ordered_float::OrderedFloat;
use std::collections::HashSet;

/// One ray/geometry intersection.
#[derive(Clone, Debug, PartialEq)]
pub struct PickResult {
    pub world_position: Vector3<f32>,
    pub distance: f32,
    pub object: ObjectId,
}

/// Ray/scene intersection queries.
///
/// Implementations return every hit within `max_distance`, nearest first, and
/// never report an object contained in `exclude`. `direction` is expected to be
/// normalized so that distances are in world units.
pub trait Picker {
    fn pick(
        &self,
        origin: Vector3<f32>,
        direction: Vector3<f32>,
        max_distance: f32,
        exclude: &HashSet<ObjectId>,
    ) -> Vec<PickResult>;
}


pub fn sort_by_distance(results: &mut [PickResult]) {
    results.sort_by_key(|result| OrderedFloat(result.distance));
}
