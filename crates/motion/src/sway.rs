use crate::{Motion, sanitize_elapsed};
use glam::Vec3;
use reefscape_common::Transform;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Wave {
    #[default]
    Sin,
    Cos,
}

impl Wave {
    fn at(self, x: f32) -> f32 {
        match self {
            Self::Sin => x.sin(),
            Self::Cos => x.cos(),
        }
    }
}

/// `wave(t * frequency + phase) * amplitude`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Oscillator {
    pub amplitude: f32,
    pub frequency: f32,
    pub phase: f32,
    #[serde(default)]
    pub wave: Wave,
}

impl Oscillator {
    /// Always zero.
    pub const ZERO: Self = Self {
        amplitude: 0.0,
        frequency: 0.0,
        phase: 0.0,
        wave: Wave::Sin,
    };

    pub fn sin(amplitude: f32, frequency: f32, phase: f32) -> Self {
        Self {
            amplitude,
            frequency,
            phase,
            wave: Wave::Sin,
        }
    }

    pub fn cos(amplitude: f32, frequency: f32, phase: f32) -> Self {
        Self {
            amplitude,
            frequency,
            phase,
            wave: Wave::Cos,
        }
    }

    pub fn value(&self, t: f32) -> f32 {
        let v = self.wave.at(t * self.frequency + self.phase) * self.amplitude;
        if v.is_finite() { v } else { 0.0 }
    }

    /// Largest magnitude `value` can reach.
    pub fn bound(&self) -> f32 {
        self.amplitude.abs()
    }
}

/// Rotation that oscillates around a fixed base orientation.
///
/// Position and scale come from `base` unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SwayParams {
    pub base: Transform,
    pub x: Oscillator,
    pub y: Oscillator,
    pub z: Oscillator,
}

impl SwayParams {
    pub fn new(base: Transform) -> Self {
        Self {
            base,
            x: Oscillator::ZERO,
            y: Oscillator::ZERO,
            z: Oscillator::ZERO,
        }
    }

    /// Free-standing seaweed strand.
    pub fn seaweed(base: Transform, phase: f32) -> Self {
        Self {
            x: Oscillator::cos(0.1, 0.7, phase),
            z: Oscillator::sin(0.15, 1.0, phase),
            ..Self::new(base)
        }
    }

    pub fn fan_coral(base: Transform, phase: f32) -> Self {
        Self {
            z: Oscillator::sin(0.05, 0.5, phase),
            ..Self::new(base)
        }
    }

    /// Slow list of the wrecked hull on top of its resting tilt.
    pub fn ship_hull(base: Transform) -> Self {
        Self {
            x: Oscillator::cos(0.01, 0.15, 0.0),
            z: Oscillator::sin(0.02, 0.2, 0.0),
            ..Self::new(base)
        }
    }

    pub fn anemone_tentacle(base: Transform, phase: f32) -> Self {
        Self {
            x: Oscillator::sin(0.2, 2.0, phase),
            z: Oscillator::cos(0.15, 1.5, phase),
            ..Self::new(base)
        }
    }

    /// Seaweed growing from the wreck; phase is the strand index.
    pub fn ship_seaweed(base: Transform, index: u32) -> Self {
        Self {
            z: Oscillator::sin(0.2, 1.0, index as f32),
            ..Self::new(base)
        }
    }

    /// Euler offset (XYZ, radians) added to the base rotation at `t`.
    pub fn offset(&self, t: f32) -> Vec3 {
        Vec3::new(self.x.value(t), self.y.value(t), self.z.value(t))
    }
}

impl Motion for SwayParams {
    fn evaluate(&self, elapsed: f32) -> Transform {
        let t = sanitize_elapsed(elapsed);
        self.base.with_euler(self.base.euler() + self.offset(t))
    }
}
