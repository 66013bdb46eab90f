use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_DAMPING_FACTOR: f32 = 0.1;

#[derive(Debug, Error, PartialEq)]
pub enum DampingError {
    #[error("damping factor must be in (0, 1], got {0}")]
    FactorOutOfRange(f32),
}

/// A value that eases toward a target by a fixed fraction of the remaining
/// distance each step.
///
/// With `factor` in (0, 1] the value approaches the target monotonically and
/// never overshoots.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Damped {
    current: f32,
    target: f32,
    factor: f32,
}

impl Damped {
    pub fn new(initial: f32, factor: f32) -> Result<Self, DampingError> {
        if !(factor.is_finite() && factor > 0.0 && factor <= 1.0) {
            return Err(DampingError::FactorOutOfRange(factor));
        }
        Ok(Self {
            current: initial,
            target: initial,
            factor,
        })
    }

    pub fn current(&self) -> f32 {
        self.current
    }

    pub fn target(&self) -> f32 {
        self.target
    }

    pub fn factor(&self) -> f32 {
        self.factor
    }

    pub fn set_target(&mut self, target: f32) {
        if target.is_finite() {
            self.target = target;
        } else {
            tracing::warn!(target, "ignoring non-finite damping target");
        }
    }

    /// Advance one frame and return the new value.
    pub fn step(&mut self) -> f32 {
        self.current += (self.target - self.current) * self.factor;
        self.current
    }

    pub fn is_settled(&self, epsilon: f32) -> bool {
        (self.target - self.current).abs() <= epsilon
    }
}

impl Default for Damped {
    fn default() -> Self {
        Self {
            current: 0.0,
            target: 0.0,
            factor: DEFAULT_DAMPING_FACTOR,
        }
    }
}
