//! Aquarium scene kernel: entity records, transform tree, chest interaction,
//! event log.
//!
//! # Invariants
//! - The scene is built once from a [`SceneConfig`] and a seed; the same pair
//!   always yields the same entities, ids and meshes.
//! - All state mutations flow through [`Aquarium::advance`] and
//!   [`Aquarium::handle`], and each one appends to the event log.
//! - A chest opens at most once; the open count only grows.
//! - World transforms are recomputed parents first after every advance.

pub mod aquarium;
pub mod builder;
pub mod chest;
pub mod config;
pub mod graph;
pub mod layout;

pub use aquarium::{Actor, ActorKind, Aquarium, Drive, Glow, SceneEvent};
pub use builder::{SceneBuilder, SceneError};
pub use chest::{Chest, ChestOpened, ChestState, LID_OPEN_ANGLE};
pub use config::{
    ConfigError, DustConfig, FloorConfig, FogConfig, LightRayConfig, MAX_FLOOR_SUBDIVISIONS,
    MAX_INSTANCES, MAX_TREASURE_ITEMS, MotionConfig, Placement, ScatterConfig, SceneConfig,
    SchoolConfig, ShipConfig, TreasureConfig,
};
pub use graph::{GraphError, SceneGraph};
pub use layout::{PartLayout, TreasureItem, TreasureKind};
