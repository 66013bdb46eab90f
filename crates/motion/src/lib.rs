//! Per-Frame Motion Evaluator.
//!
//! Every motion family is plain data implementing [`Motion`]: a pure function
//! of elapsed seconds to a local [`Transform`]. Parameters are fixed at
//! construction; only the derived transform changes from frame to frame.
//!
//! # Invariants
//! - Evaluation is deterministic and always returns finite values.
//! - Non-finite elapsed time is treated as 0.
//! - Angles are radians.

mod bob;
mod bubble;
mod damping;
mod drift;
mod orbit;
mod sway;

pub use bob::{BobParams, pulse};
pub use bubble::{BubbleParams, DEFAULT_BUBBLE_PERIOD, DEFAULT_VERTICAL_OFFSET};
pub use damping::{DEFAULT_DAMPING_FACTOR, Damped, DampingError};
pub use drift::DriftParams;
pub use orbit::{FishPose, OrbitParams, TAIL_OFFSET};
pub use sway::{Oscillator, SwayParams, Wave};

use reefscape_common::Transform;
use serde::{Deserialize, Serialize};

/// Something that can be placed at a point in time.
pub trait Motion {
    fn evaluate(&self, elapsed: f32) -> Transform;
}

/// Elapsed time safe to feed into trig: non-finite input becomes 0.
pub fn sanitize_elapsed(elapsed: f32) -> f32 {
    if elapsed.is_finite() { elapsed } else { 0.0 }
}

/// The motion attached to one scene entity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "family", rename_all = "snake_case")]
pub enum MotionParams {
    /// Does not move.
    Static(Transform),
    Orbit(OrbitParams),
    Bubble(BubbleParams),
    Sway(SwayParams),
    Drift(DriftParams),
    Bob(BobParams),
}

impl MotionParams {
    pub fn family(&self) -> &'static str {
        match self {
            Self::Static(_) => "static",
            Self::Orbit(_) => "orbit",
            Self::Bubble(_) => "bubble",
            Self::Sway(_) => "sway",
            Self::Drift(_) => "drift",
            Self::Bob(_) => "bob",
        }
    }
}

impl Motion for MotionParams {
    fn evaluate(&self, elapsed: f32) -> Transform {
        let out = match self {
            Self::Static(t) => *t,
            Self::Orbit(p) => p.evaluate(elapsed),
            Self::Bubble(p) => p.evaluate(elapsed),
            Self::Sway(p) => p.evaluate(elapsed),
            Self::Drift(p) => p.evaluate(elapsed),
            Self::Bob(p) => p.evaluate(elapsed),
        };
        if out.is_finite() {
            out
        } else {
            tracing::warn!(family = self.family(), elapsed, "non-finite motion output");
            Transform::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;
    use reefscape_common::{RngStream, stream_rng};

    fn all_families(seed: u64) -> Vec<MotionParams> {
        let mut rng = stream_rng(seed, RngStream::Fish);
        let base = Transform::from_translation(Vec3::new(1.0, 0.0, 2.0));
        vec![
            MotionParams::Static(base),
            MotionParams::Orbit(OrbitParams::sample(&mut rng, 0.3)),
            MotionParams::Bubble(BubbleParams::sample(&mut rng, 3, 40.0, 25.0, 2.0)),
            MotionParams::Sway(SwayParams::seaweed(base, 0.7)),
            MotionParams::Drift(DriftParams::dust(&mut rng, 1, 50.0, 20.0)),
            MotionParams::Bob(BobParams::chest(base)),
        ]
    }

    #[test]
    fn every_family_is_deterministic_and_finite() {
        let a = all_families(42);
        let b = all_families(42);
        for (pa, pb) in a.iter().zip(&b) {
            for step in 0..100 {
                let t = step as f32 * 0.5 - 5.0;
                let ta = pa.evaluate(t);
                assert_eq!(ta, pb.evaluate(t), "{}", pa.family());
                assert!(ta.is_finite(), "{}", pa.family());
            }
            assert!(pa.evaluate(f32::NAN).is_finite());
            assert!(pa.evaluate(f32::MAX).is_finite());
        }
    }

    #[test]
    fn static_never_moves() {
        let t = Transform::from_translation(Vec3::new(4.0, 5.0, 6.0));
        let m = MotionParams::Static(t);
        assert_eq!(m.evaluate(0.0), t);
        assert_eq!(m.evaluate(99.0), t);
    }

    #[test]
    fn sanitize_elapsed_maps_non_finite_to_zero() {
        assert_eq!(sanitize_elapsed(f32::NAN), 0.0);
        assert_eq!(sanitize_elapsed(f32::INFINITY), 0.0);
        assert_eq!(sanitize_elapsed(-3.5), -3.5);
    }
}
