//! Pointer input mapped to aquarium actions.
//!
//! # Invariants
//! - The scene only ever sees [`Action`]s, never raw pointer events.
//! - Hover enter/leave always come in matching pairs per entity.

pub mod action;
pub mod pointer;

pub use action::Action;
pub use pointer::{PointerEvent, PointerKind, PointerMapper};
