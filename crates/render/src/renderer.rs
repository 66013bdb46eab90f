use glam::Vec3;
use reefscape_scene::{ActorKind, Aquarium, ChestState};
use std::collections::BTreeMap;
use std::fmt::Write;

/// Camera/view configuration for rendering.
#[derive(Debug, Clone, Copy)]
pub struct RenderView {
    /// Camera position in world space.
    pub eye: Vec3,
    /// Point the camera is looking at.
    pub target: Vec3,
    /// Field of view in degrees.
    pub fov_degrees: f32,
}

impl Default for RenderView {
    fn default() -> Self {
        Self {
            eye: Vec3::new(0.0, 5.0, 15.0),
            target: Vec3::ZERO,
            fov_degrees: 60.0,
        }
    }
}

/// Renderer-agnostic interface. All renderers implement this trait.
///
/// The renderer reads scene state and a view configuration, then produces
/// output. It never mutates the aquarium.
pub trait Renderer {
    /// The output type produced by this renderer.
    type Output;

    /// Render one frame from the given scene state and view.
    fn render(&self, aquarium: &Aquarium, view: &RenderView) -> Self::Output;
}

/// Debug text renderer.
///
/// Produces a human-readable summary of the scene: per-kind counts, every
/// chest, and with `verbose` every actor's world position.
#[derive(Debug, Default)]
pub struct DebugTextRenderer {
    verbose: bool,
}

impl DebugTextRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn verbose() -> Self {
        Self { verbose: true }
    }
}

impl Renderer for DebugTextRenderer {
    type Output = String;

    fn render(&self, aquarium: &Aquarium, view: &RenderView) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "=== Aquarium (frame={}, t={:.2}s, seed={}) ===",
            aquarium.frame(),
            aquarium.elapsed(),
            aquarium.seed()
        );
        let _ = writeln!(
            out,
            "Actors: {}  Meshes: {}  Chests opened: {}/{}",
            aquarium.actor_count(),
            aquarium.meshes().len(),
            aquarium.opened_count(),
            aquarium.chest_count()
        );
        let _ = writeln!(
            out,
            "Camera: eye=({:.1}, {:.1}, {:.1}) target=({:.1}, {:.1}, {:.1}) fov={:.0}",
            view.eye.x,
            view.eye.y,
            view.eye.z,
            view.target.x,
            view.target.y,
            view.target.z,
            view.fov_degrees
        );

        let mut kinds: BTreeMap<ActorKind, usize> = BTreeMap::new();
        for actor in aquarium.actors().values() {
            *kinds.entry(actor.kind).or_default() += 1;
        }
        for (kind, count) in &kinds {
            let _ = writeln!(out, "  {kind:<16} {count}");
        }

        for (id, chest) in aquarium.chests() {
            let p = aquarium.world_transform(*id).unwrap_or_default().position;
            let state = match chest.state() {
                ChestState::Closed => "closed",
                ChestState::Open => "open",
            };
            let _ = writeln!(
                out,
                "  chest [{}] {state} lid={:.2} pos=({:.2}, {:.2}, {:.2})",
                id.short(),
                chest.lid_angle(),
                p.x,
                p.y,
                p.z
            );
        }

        if self.verbose {
            for (id, actor) in aquarium.actors() {
                let p = aquarium.world_transform(*id).unwrap_or_default().position;
                let _ = writeln!(
                    out,
                    "  [{}] {} ({}) pos=({:.2}, {:.2}, {:.2})",
                    id.short(),
                    actor.kind,
                    actor.drive.name(),
                    p.x,
                    p.y,
                    p.z
                );
            }
        }

        out
    }
}
