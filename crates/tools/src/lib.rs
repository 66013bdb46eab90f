//! Developer Tooling: aquarium inspector and mesh statistics.
//!
//! # Invariants
//! - Tools only read scene state.

mod inspector;
mod mesh_stats;

pub use inspector::{ActorInfo, AquariumSummary, SceneInspector};
pub use mesh_stats::MeshStats;
