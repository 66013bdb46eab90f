use reefscape_common::{EntityId, Transform};
use reefscape_mesh::{MeshData, MeshHandle};
use reefscape_scene::Aquarium;
use std::collections::BTreeMap;

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum HostError {
    #[error("mesh {0:?} is already registered")]
    DuplicateMesh(MeshHandle),
    #[error("mesh {0:?} has non-finite vertex data")]
    InvalidMesh(MeshHandle),
}

/// What a rendering host must provide to display the aquarium.
///
/// The host owns its display nodes. It receives immutable geometry once and
/// a world transform per entity per frame; it never writes back.
pub trait RenderHost {
    /// Upload generated geometry under `handle`.
    fn register_mesh(&mut self, handle: MeshHandle, mesh: &MeshData) -> Result<(), HostError>;

    /// Place entity `id`, drawn with `mesh` if it has one. The first write for
    /// an id creates its node.
    fn write_transform(&mut self, id: EntityId, mesh: Option<MeshHandle>, transform: &Transform);

    /// Emissive level for entities that glow.
    fn write_glow(&mut self, _id: EntityId, _level: f32) {}

    /// Called after every entity of a frame has been written.
    fn end_frame(&mut self) {}
}

/// Counts from one [`sync_frame`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub transforms: usize,
    pub glows: usize,
}

/// Register every mesh in the aquarium's table. Call once before the first
/// frame.
pub fn sync_meshes(aquarium: &Aquarium, host: &mut dyn RenderHost) -> Result<usize, HostError> {
    for (handle, mesh) in aquarium.meshes() {
        host.register_mesh(*handle, mesh)?;
    }
    tracing::debug!(meshes = aquarium.meshes().len(), "meshes registered with host");
    Ok(aquarium.meshes().len())
}

/// Write every entity's world transform, plus glow levels, to the host.
pub fn sync_frame(aquarium: &Aquarium, host: &mut dyn RenderHost) -> FrameStats {
    let mut stats = FrameStats::default();
    for (id, actor) in aquarium.actors() {
        let Some(world) = aquarium.world_transform(*id) else {
            continue;
        };
        host.write_transform(*id, actor.mesh, &world);
        stats.transforms += 1;
        if let Some(level) = aquarium.glow(*id) {
            host.write_glow(*id, level);
            stats.glows += 1;
        }
    }
    host.end_frame();
    stats
}

/// A host that keeps the last value written for everything, for tests and
/// headless runs.
#[derive(Debug, Default)]
pub struct RecordingHost {
    meshes: BTreeMap<MeshHandle, MeshData>,
    nodes: BTreeMap<EntityId, (Option<MeshHandle>, Transform)>,
    glows: BTreeMap<EntityId, f32>,
    frames: u64,
}

impl RecordingHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mesh_count(&self) -> usize {
        self.meshes.len()
    }

    pub fn mesh(&self, handle: MeshHandle) -> Option<&MeshData> {
        self.meshes.get(&handle)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn transform(&self, id: EntityId) -> Option<Transform> {
        self.nodes.get(&id).map(|(_, t)| *t)
    }

    pub fn node_mesh(&self, id: EntityId) -> Option<MeshHandle> {
        self.nodes.get(&id).and_then(|(m, _)| *m)
    }

    pub fn glow(&self, id: EntityId) -> Option<f32> {
        self.glows.get(&id).copied()
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Total vertices uploaded.
    pub fn vertex_count(&self) -> usize {
        self.meshes.values().map(MeshData::vertex_count).sum()
    }
}

impl RenderHost for RecordingHost {
    fn register_mesh(&mut self, handle: MeshHandle, mesh: &MeshData) -> Result<(), HostError> {
        if self.meshes.contains_key(&handle) {
            return Err(HostError::DuplicateMesh(handle));
        }
        if !mesh.is_finite() {
            return Err(HostError::InvalidMesh(handle));
        }
        self.meshes.insert(handle, mesh.clone());
        Ok(())
    }

    fn write_transform(&mut self, id: EntityId, mesh: Option<MeshHandle>, transform: &Transform) {
        self.nodes.insert(id, (mesh, *transform));
    }

    fn write_glow(&mut self, id: EntityId, level: f32) {
        self.glows.insert(id, level);
    }

    fn end_frame(&mut self) {
        self.frames += 1;
    }
}
