use crate::sway::Oscillator;
use crate::{Motion, sanitize_elapsed};
use glam::Vec3;
use reefscape_common::{SceneRng, Transform, sample_range};
use serde::{Deserialize, Serialize};

/// Position wandering around a fixed origin, with an optional scale pulse.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DriftParams {
    pub origin: Vec3,
    pub x: Oscillator,
    pub y: Oscillator,
    pub z: Oscillator,
    pub scale: f32,
    pub scale_pulse: Oscillator,
}

impl DriftParams {
    /// One floating dust mote. `index` staggers the twinkle.
    pub fn dust(rng: &mut SceneRng, index: u32, spread: f32, height: f32) -> Self {
        let half = spread * 0.5;
        let origin = Vec3::new(
            sample_range(rng, -half, half),
            sample_range(rng, 0.0, height),
            sample_range(rng, -half, half),
        );
        let speed = sample_range(rng, 0.2, 0.5);
        let phase = sample_range(rng, 0.0, std::f32::consts::TAU);
        Self {
            origin,
            x: Oscillator::sin(2.0, speed, phase),
            y: Oscillator::sin(1.0, speed * 0.5, phase),
            z: Oscillator::cos(2.0, speed * 0.7, phase),
            scale: 0.02,
            scale_pulse: Oscillator::sin(0.01, 2.0, index as f32),
        }
    }

    /// Slow horizontal wander of a fog volume.
    pub fn fog(origin: Vec3, x: Oscillator, z: Oscillator) -> Self {
        Self {
            origin,
            x,
            y: Oscillator::ZERO,
            z,
            scale: 1.0,
            scale_pulse: Oscillator::ZERO,
        }
    }
}

impl Motion for DriftParams {
    fn evaluate(&self, elapsed: f32) -> Transform {
        let t = sanitize_elapsed(elapsed);
        let offset = Vec3::new(self.x.value(t), self.y.value(t), self.z.value(t));
        let scale = self.scale + self.scale_pulse.value(t);
        Transform::from_translation(self.origin + offset).with_scale(scale)
    }
}
