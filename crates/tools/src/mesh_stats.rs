use glam::Vec3;
use reefscape_mesh::MeshData;

/// Size and extent of one generated mesh.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeshStats {
    pub vertices: usize,
    pub triangles: usize,
    /// Bytes the host uploads for the vertex buffer.
    pub vertex_bytes: usize,
    pub min: Vec3,
    pub max: Vec3,
}

impl MeshStats {
    pub fn of(mesh: &MeshData) -> Self {
        let (min, max) = mesh.bounds().unwrap_or((Vec3::ZERO, Vec3::ZERO));
        Self {
            vertices: mesh.vertex_count(),
            triangles: mesh.triangle_count(),
            vertex_bytes: mesh.vertex_bytes().len(),
            min,
            max,
        }
    }

    pub fn extent(&self) -> Vec3 {
        self.max - self.min
    }
}

impl std::fmt::Display for MeshStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let e = self.extent();
        write!(
            f,
            "verts={} tris={} bytes={} extent=({:.2}, {:.2}, {:.2})",
            self.vertices, self.triangles, self.vertex_bytes, e.x, e.y, e.z
        )
    }
}
