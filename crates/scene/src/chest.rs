//! Chest Interaction State Machine.
//!
//! `Closed -> Open` on the first click, never back. Opening sets the lid
//! target and reveals treasure generated from the chest's own seed.

use crate::config::TreasureConfig;
use crate::layout::{self, LID_HINGE, TreasureItem};
use glam::Vec3;
use reefscape_common::{Transform, seeded_rng};
use reefscape_motion::{Damped, DampingError, pulse};
use serde::{Deserialize, Serialize};
use std::f32::consts::FRAC_PI_2;

/// Lid angle about X once fully open.
pub const LID_OPEN_ANGLE: f32 = -FRAC_PI_2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ChestState {
    #[default]
    Closed,
    Open,
}

/// Returned by the one click that opens a chest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChestOpened {
    pub items: usize,
}

#[derive(Debug, Clone)]
pub struct Chest {
    seed: u64,
    state: ChestState,
    hovered: bool,
    lid: Damped,
    treasure_counts: TreasureConfig,
    treasure: Option<Vec<TreasureItem>>,
}

impl Chest {
    pub fn new(
        seed: u64,
        lid_damping: f32,
        treasure_counts: TreasureConfig,
    ) -> Result<Self, DampingError> {
        Ok(Self {
            seed,
            state: ChestState::Closed,
            hovered: false,
            lid: Damped::new(0.0, lid_damping)?,
            treasure_counts,
            treasure: None,
        })
    }

    pub fn state(&self) -> ChestState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        self.state == ChestState::Open
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Open on the first click. Later clicks do nothing and return `None`.
    pub fn click(&mut self) -> Option<ChestOpened> {
        if self.is_open() {
            return None;
        }
        self.state = ChestState::Open;
        self.lid.set_target(LID_OPEN_ANGLE);
        let treasure = layout::treasure(&mut seeded_rng(self.seed), &self.treasure_counts);
        let items = treasure.len();
        self.treasure = Some(treasure);
        Some(ChestOpened { items })
    }

    /// Contents, generated on open.
    pub fn treasure(&self) -> Option<&[TreasureItem]> {
        self.treasure.as_deref()
    }

    pub fn hovered(&self) -> bool {
        self.hovered
    }

    /// Returns whether the flag changed.
    pub fn set_hovered(&mut self, hovered: bool) -> bool {
        let changed = self.hovered != hovered;
        self.hovered = hovered;
        changed
    }

    /// Ease the lid one frame toward its target.
    pub fn step(&mut self) -> f32 {
        self.lid.step()
    }

    pub fn lid_angle(&self) -> f32 {
        self.lid.current()
    }

    /// Lid hinge transform relative to the chest.
    pub fn lid_transform(&self) -> Transform {
        Transform::from_euler(LID_HINGE, Vec3::new(self.lid.current(), 0.0, 0.0), Vec3::ONE)
    }

    /// Glow intensity, boosted while hovered.
    pub fn glow(&self, elapsed: f32) -> f32 {
        let boost = if self.hovered { 0.3 } else { 0.0 };
        pulse(0.3, 0.15, 2.0, elapsed) + boost
    }
}
