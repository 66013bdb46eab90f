use crate::{Motion, sanitize_elapsed};
use reefscape_common::Transform;
use serde::{Deserialize, Serialize};

/// Gentle vertical float around a resting transform.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BobParams {
    pub base: Transform,
    pub amplitude: f32,
    pub frequency: f32,
}

impl BobParams {
    /// Treasure chest resting on the sand.
    pub fn chest(base: Transform) -> Self {
        Self {
            base,
            amplitude: 0.05,
            frequency: 0.8,
        }
    }
}

impl Motion for BobParams {
    fn evaluate(&self, elapsed: f32) -> Transform {
        let t = sanitize_elapsed(elapsed);
        let mut out = self.base;
        out.position.y += (self.frequency * t).sin() * self.amplitude;
        out
    }
}

/// `base + sin(frequency * elapsed) * amplitude`, for glow and emissive levels.
pub fn pulse(base: f32, amplitude: f32, frequency: f32, elapsed: f32) -> f32 {
    let value = base + (frequency * sanitize_elapsed(elapsed)).sin() * amplitude;
    if value.is_finite() { value } else { base }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn chest_bob_formula() {
        let rest = Transform::from_translation(Vec3::new(-6.0, 0.3, 0.0));
        let bob = BobParams::chest(rest);
        for i in 0..100 {
            let t = i as f32 * 0.25;
            let p = bob.evaluate(t).position;
            assert!((p.y - (0.3 + (0.8 * t).sin() * 0.05)).abs() < 1e-6);
            assert_eq!((p.x, p.z), (-6.0, 0.0));
        }
    }

    #[test]
    fn pulse_bounds() {
        for i in 0..200 {
            let v = pulse(0.3, 0.15, 2.0, i as f32 * 0.1);
            assert!((0.15 - 1e-6..=0.45 + 1e-6).contains(&v));
        }
        assert_eq!(pulse(0.3, 0.1, 2.0, f32::NAN), 0.3);
    }
}
