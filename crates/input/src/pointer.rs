use crate::action::Action;
use reefscape_common::EntityId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PointerKind {
    Click,
    Move,
}

/// A pointer event after the host has hit-tested it against the scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointerEvent {
    pub kind: PointerKind,
    /// Topmost entity under the pointer.
    pub hit: Option<EntityId>,
}

impl PointerEvent {
    pub fn click(hit: Option<EntityId>) -> Self {
        Self {
            kind: PointerKind::Click,
            hit,
        }
    }

    pub fn moved(hit: Option<EntityId>) -> Self {
        Self {
            kind: PointerKind::Move,
            hit,
        }
    }
}

/// Turns pointer events into actions.
///
/// Tracks the entity currently under the pointer so consecutive moves become
/// enter/leave pairs.
#[derive(Debug, Clone, Default)]
pub struct PointerMapper {
    hovered: Option<EntityId>,
}

impl PointerMapper {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn hovered(&self) -> Option<EntityId> {
        self.hovered
    }

    /// Map one event. A move that changes target yields the leave first and
    /// then the enter.
    pub fn map(&mut self, event: PointerEvent) -> Vec<Action> {
        match event.kind {
            PointerKind::Click => match event.hit {
                Some(id) => vec![Action::Click(id)],
                None => vec![Action::Noop],
            },
            PointerKind::Move => {
                if event.hit == self.hovered {
                    return vec![Action::Noop];
                }
                let mut actions = Vec::with_capacity(2);
                if let Some(previous) = self.hovered {
                    actions.push(Action::HoverLeave(previous));
                }
                if let Some(current) = event.hit {
                    actions.push(Action::HoverEnter(current));
                }
                tracing::trace!(from = ?self.hovered, to = ?event.hit, "hover changed");
                self.hovered = event.hit;
                actions
            }
        }
    }
}
