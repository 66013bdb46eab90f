//! Rendering Adapter: the boundary between the aquarium and a host renderer.
//!
//! # Invariants
//! - Renderers and hosts never mutate scene truth; they read the aquarium.
//! - Meshes are registered once, before the first frame; transforms are
//!   written every frame.
//!
//! The [`DebugTextRenderer`] and [`RecordingHost`] stand in for a GPU host.
//! The traits are stable; a real host implements [`RenderHost`] without
//! changing the scene.

mod host;
mod hud;
mod renderer;

pub use host::{FrameStats, HostError, RecordingHost, RenderHost, sync_frame, sync_meshes};
pub use hud::{INSTRUCTION_SECONDS, TOAST_SECONDS, Toast, TreasureCounter};
pub use renderer::{DebugTextRenderer, RenderView, Renderer};
