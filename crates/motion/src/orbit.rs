use crate::{Motion, sanitize_elapsed};
use glam::Vec3;
use reefscape_common::{SceneRng, Transform, sample_range};
use serde::{Deserialize, Serialize};
use std::f32::consts::{FRAC_PI_2, TAU};

/// Tail pivot in fish-local space.
pub const TAIL_OFFSET: Vec3 = Vec3::new(-1.2, 0.0, 0.0);

/// Circular swim path around a school center.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrbitParams {
    pub radius: f32,
    pub speed: f32,
    pub phase: f32,
    pub y_offset: f32,
    pub bob_amplitude: f32,
    pub wobble: f32,
    pub scale: f32,
}

/// Body and tail transforms of one fish at one instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FishPose {
    /// Relative to the school center.
    pub body: Transform,
    /// Relative to the body.
    pub tail: Transform,
}

impl OrbitParams {
    /// Draw one fish's orbit. Phase and wobble in `[0, 2PI)`, radius in
    /// `[2, 4)`, speed in `[0.3, 0.6)`, height in `[-1, 1)`, scale in
    /// `[0.15, 0.25)`.
    pub fn sample(rng: &mut SceneRng, bob_amplitude: f32) -> Self {
        let phase = sample_range(rng, 0.0, TAU);
        let radius = sample_range(rng, 2.0, 4.0);
        let speed = sample_range(rng, 0.3, 0.6);
        let y_offset = sample_range(rng, -1.0, 1.0);
        let scale = sample_range(rng, 0.15, 0.25);
        let wobble = sample_range(rng, 0.0, TAU);
        Self {
            radius,
            speed,
            phase,
            y_offset,
            bob_amplitude,
            wobble,
            scale,
        }
    }

    /// Orbit angle at `elapsed`.
    pub fn angle(&self, elapsed: f32) -> f32 {
        sanitize_elapsed(elapsed) * self.speed + self.phase
    }

    pub fn pose(&self, elapsed: f32) -> FishPose {
        let t = self.angle(elapsed);
        let (sin_t, cos_t) = t.sin_cos();
        let position = Vec3::new(
            cos_t * self.radius,
            self.y_offset + (2.0 * t + self.wobble).sin() * self.bob_amplitude,
            sin_t * self.radius,
        );
        // Face along the direction of travel.
        let heading = (-sin_t).atan2(-cos_t) + FRAC_PI_2;
        let roll = (8.0 * t).sin() * 0.08;
        let body = Transform::from_euler(
            position,
            Vec3::new(0.0, heading, roll),
            Vec3::splat(self.scale),
        );
        let tail = Transform::from_euler(
            TAIL_OFFSET,
            Vec3::new(0.0, (10.0 * t).sin() * 0.4, 0.0),
            Vec3::ONE,
        );
        FishPose { body, tail }
    }
}

impl Motion for OrbitParams {
    fn evaluate(&self, elapsed: f32) -> Transform {
        self.pose(elapsed).body
    }
}
