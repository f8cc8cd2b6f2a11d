use cgmath::{InnerSpace, Matrix4, Vector2, Vector3, vec2};
use std::time::Duration;

/// Moves shorter than this complete immediately.
const MIN_TRAVEL_DISTANCE: f32 = 1e-4;

/// Ground-plane (X/Z) part of a world position.
pub fn ground(position: Vector3<f32>) -> Vector2<f32> {
    vec2(position.x, position.z)
}

/// Copy of `transform` with its X and Z translation replaced. Y and rotation are kept.
pub fn with_ground_position(transform: Matrix4<f32>, position: Vector2<f32>) -> Matrix4<f32> {
    let mut result = transform;
    result.w.x = position.x;
    result.w.z = position.y;
    result
}

/// Navigation transform that puts the viewpoint above `marker`.
///
/// `head_offset` is the head position relative to the navigation node, in
/// world space. Only the ground-plane components of the result differ from
/// `navigation`.
pub fn compute_destination(
    navigation: Matrix4<f32>,
    marker: Vector3<f32>,
    head_offset: Vector3<f32>,
) -> Matrix4<f32> {
    with_ground_position(navigation, ground(marker) - ground(head_offset))
}

/// Constant-velocity move along the ground plane.
#[derive(Clone, Debug, PartialEq)]
pub struct TransitionJob {
    pub start_pos: Vector2<f32>,
    pub target_pos: Vector2<f32>,
    pub start_time: Duration,
    pub speed: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TransitionSample {
    pub position: Vector2<f32>,
    pub finished: bool,
}

impl TransitionJob {
    pub fn new(start_pos: Vector2<f32>, target_pos: Vector2<f32>, start_time: Duration, speed: f32) -> Self {
        Self {
            start_pos,
            target_pos,
            start_time,
            speed,
        }
    }

    pub fn distance(&self) -> f32 {
        (self.target_pos - self.start_pos).magnitude()
    }

    /// Seconds needed to cover the distance at `speed`.
    pub fn travel_time(&self) -> f32 {
        self.distance() / self.speed
    }

    /// True when there is nothing to animate.
    pub fn is_degenerate(&self) -> bool {
        self.distance() <= MIN_TRAVEL_DISTANCE
    }

    /// Position at `now`. The job is finished once the elapsed time exceeds the travel time.
    pub fn sample(&self, now: Duration) -> TransitionSample {
        if self.is_degenerate() {
            return TransitionSample {
                position: self.target_pos,
                finished: true,
            };
        }

        let elapsed = now.saturating_sub(self.start_time).as_secs_f32();
        let travel_time = self.travel_time();
        let fraction = (elapsed / travel_time).min(1.0);

        TransitionSample {
            position: self.start_pos + (self.target_pos - self.start_pos) * fraction,
            finished: elapsed > travel_time,
        }
    }
}

/// An animated move of the navigation node.
///
/// The job interpolates the head's ground position from where it is now to
/// where it will be once the destination is reached; the navigation node
/// follows at the fixed head offset captured when the move started.
#[derive(Clone, Debug, PartialEq)]
pub struct Transition {
    job: TransitionJob,
    head_offset: Vector2<f32>,
    destination: Matrix4<f32>,
}

impl Transition {
    pub fn new(
        destination: Matrix4<f32>,
        head_world: Vector3<f32>,
        head_offset: Vector3<f32>,
        now: Duration,
        speed: f32,
    ) -> Self {
        let head_offset = ground(head_offset);
        let target = vec2(destination.w.x, destination.w.z) + head_offset;
        Self {
            job: TransitionJob::new(ground(head_world), target, now, speed),
            head_offset,
            destination,
        }
    }

    pub fn job(&self) -> &TransitionJob {
        &self.job
    }

    /// Navigation transform at `now` and whether the move is complete.
    pub fn advance(&self, now: Duration) -> (Matrix4<f32>, bool) {
        let sample = self.job.sample(now);
        if sample.finished {
            return (self.destination, true);
        }
        (
            with_ground_position(self.destination, sample.position - self.head_offset),
            false,
        )
    }
}
