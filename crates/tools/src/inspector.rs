use reefscape_common::EntityId;
use reefscape_scene::{ActorKind, Aquarium};

/// Aquarium inspector for developer tooling.
///
/// Read-only queries against the scene for debugging and the CLI.
pub struct SceneInspector;

impl SceneInspector {
    /// Produce a summary of the scene state.
    pub fn summary(aquarium: &Aquarium) -> AquariumSummary {
        AquariumSummary {
            frame: aquarium.frame(),
            elapsed: aquarium.elapsed(),
            seed: aquarium.seed(),
            actor_count: aquarium.actor_count(),
            mesh_count: aquarium.meshes().len(),
            chests_opened: aquarium.opened_count(),
            chest_count: aquarium.chest_count(),
            pending_events: aquarium.events().len(),
        }
    }

    /// Detailed view of one actor, with its world transform.
    pub fn inspect_actor(aquarium: &Aquarium, id: EntityId) -> Option<ActorInfo> {
        let actor = aquarium.actor(id)?;
        let world = aquarium.world_transform(id)?;
        let p = world.position;
        let r = world.rotation;
        let s = world.scale;
        Some(ActorInfo {
            id,
            kind: actor.kind,
            drive: actor.drive.name(),
            parent: actor.parent,
            children: aquarium.graph().children(id).len(),
            position: [p.x, p.y, p.z],
            rotation: [r.x, r.y, r.z, r.w],
            scale: [s.x, s.y, s.z],
        })
    }

    /// Ids of actors of `kind`, or of every actor when `kind` is `None`.
    pub fn list_actors(aquarium: &Aquarium, kind: Option<ActorKind>) -> Vec<EntityId> {
        aquarium
            .actors()
            .iter()
            .filter(|(_, a)| kind.is_none_or(|k| a.kind == k))
            .map(|(id, _)| *id)
            .collect()
    }
}

/// Summary of scene state for the inspector.
#[derive(Debug, Clone)]
pub struct AquariumSummary {
    pub frame: u64,
    pub elapsed: f32,
    pub seed: u64,
    pub actor_count: usize,
    pub mesh_count: usize,
    pub chests_opened: usize,
    pub chest_count: usize,
    pub pending_events: usize,
}

impl std::fmt::Display for AquariumSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Aquarium: frame={} t={:.2}s seed={} actors={} meshes={} chests={}/{} \
             pending_events={}",
            self.frame,
            self.elapsed,
            self.seed,
            self.actor_count,
            self.mesh_count,
            self.chests_opened,
            self.chest_count,
            self.pending_events
        )
    }
}

/// Detailed info about a single actor.
#[derive(Debug, Clone)]
pub struct ActorInfo {
    pub id: EntityId,
    pub kind: ActorKind,
    pub drive: &'static str,
    pub parent: Option<EntityId>,
    pub children: usize,
    pub position: [f32; 3],
    pub rotation: [f32; 4],
    pub scale: [f32; 3],
}

impl std::fmt::Display for ActorInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} [{}] drive={} children={} pos=({:.2}, {:.2}, {:.2}) scale=({:.2}, {:.2}, {:.2})",
            self.kind,
            self.id.short(),
            self.drive,
            self.children,
            self.position[0],
            self.position[1],
            self.position[2],
            self.scale[0],
            self.scale[1],
            self.scale[2],
        )
    }
}
