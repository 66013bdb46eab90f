use reefscape_common::EntityId;
use serde::{Deserialize, Serialize};

/// A high-level action produced from raw pointer input.
///
/// The scene consumes actions, never raw pointer events, so any host that
/// can hit-test a pointer drives the same chest logic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    /// The pointer was clicked over an entity.
    Click(EntityId),
    /// The pointer moved onto an entity.
    HoverEnter(EntityId),
    /// The pointer moved off an entity.
    HoverLeave(EntityId),
    /// Nothing to do.
    Noop,
}

impl Action {
    /// The entity this action targets, if any.
    pub fn target(&self) -> Option<EntityId> {
        match self {
            Self::Click(id) | Self::HoverEnter(id) | Self::HoverLeave(id) => Some(*id),
            Self::Noop => None,
        }
    }
}
