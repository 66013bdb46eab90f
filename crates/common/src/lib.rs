//! Shared types for the reefscape workspace.
//!
//! # Invariants
//! - Transforms carry radians; Euler helpers use XYZ order.
//! - Every construction-time random draw comes from a seeded `SceneRng`.

mod rng;
mod types;

pub use rng::{
    RngStream, SceneRng, derive_indexed_seed, derive_seed, sample_range, seeded_rng, splitmix64,
    stream_rng,
};
pub use types::{EntityId, Transform};
