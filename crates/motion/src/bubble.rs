use crate::{Motion, sanitize_elapsed};
use glam::Vec3;
use reefscape_common::{SceneRng, Transform, sample_range};
use serde::{Deserialize, Serialize};

pub const DEFAULT_BUBBLE_PERIOD: f32 = 25.0;
pub const DEFAULT_VERTICAL_OFFSET: f32 = 2.0;

/// Rising bubble that wraps back to the floor after `period` units of climb.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BubbleParams {
    pub origin_x: f32,
    pub origin_z: f32,
    pub speed: f32,
    pub offset: f32,
    pub scale: f32,
    pub wobble_speed: f32,
    pub wobble_amount: f32,
    pub index: u32,
    pub period: f32,
    pub vertical_offset: f32,
}

impl BubbleParams {
    /// Draw one bubble spread over a `spread` x `spread` square on XZ.
    pub fn sample(
        rng: &mut SceneRng,
        index: u32,
        spread: f32,
        period: f32,
        vertical_offset: f32,
    ) -> Self {
        let half = spread * 0.5;
        let origin_x = sample_range(rng, -half, half);
        let origin_z = sample_range(rng, -half, half);
        let speed = sample_range(rng, 0.5, 1.5);
        let offset = sample_range(rng, 0.0, 20.0);
        let scale = sample_range(rng, 0.05, 0.2);
        let wobble_speed = sample_range(rng, 1.0, 3.0);
        let wobble_amount = sample_range(rng, 0.5, 1.5);
        Self {
            origin_x,
            origin_z,
            speed,
            offset,
            scale,
            wobble_speed,
            wobble_amount,
            index,
            period,
            vertical_offset,
        }
    }

    /// The period actually used: the configured one when finite and positive.
    pub fn effective_period(&self) -> f32 {
        if self.period.is_finite() && self.period > 0.0 {
            self.period
        } else {
            DEFAULT_BUBBLE_PERIOD
        }
    }

    /// Height above `-vertical_offset`, always in `[0, period)`.
    pub fn cycle(&self, elapsed: f32) -> f32 {
        let period = self.effective_period();
        let climb = sanitize_elapsed(elapsed) * self.speed + self.offset;
        if !climb.is_finite() {
            return 0.0;
        }
        let wrapped = climb.rem_euclid(period);
        // rem_euclid of a tiny negative value can round up to `period`.
        if wrapped < period { wrapped } else { 0.0 }
    }
}

impl Motion for BubbleParams {
    fn evaluate(&self, elapsed: f32) -> Transform {
        let t = sanitize_elapsed(elapsed);
        let i = self.index as f32;
        let vertical_offset = if self.vertical_offset.is_finite() {
            self.vertical_offset
        } else {
            DEFAULT_VERTICAL_OFFSET
        };
        let position = Vec3::new(
            self.origin_x + (t * self.wobble_speed + i).sin() * self.wobble_amount,
            self.cycle(t) - vertical_offset,
            self.origin_z + (t * self.wobble_speed * 0.7 + i).cos() * self.wobble_amount * 0.5,
        );
        let scale = self.scale * (1.0 + (3.0 * t + i).sin() * 0.1);
        Transform::from_translation(position).with_scale(scale)
    }
}
