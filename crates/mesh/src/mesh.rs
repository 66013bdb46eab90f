use bytemuck::{Pod, Zeroable};
use glam::Vec3;
use serde::{Deserialize, Serialize};

/// A handle the host uses to refer to a registered mesh.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MeshHandle(pub u64);

/// Interleaved vertex layout handed to the host for upload.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct GpuVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

/// Generated triangle mesh.
///
/// Positions and normals are parallel arrays; `indices` holds triangles as
/// consecutive index triples with counter-clockwise outward winding.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshData {
    pub positions: Vec<Vec3>,
    pub normals: Vec<Vec3>,
    pub indices: Vec<u32>,
}

impl MeshData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a vertex and return its index.
    pub fn add_vertex(&mut self, position: Vec3, normal: Vec3) -> u32 {
        let index = self.positions.len() as u32;
        self.positions.push(position);
        self.normals.push(normal);
        index
    }

    pub fn add_triangle(&mut self, i0: u32, i1: u32, i2: u32) {
        self.indices.extend_from_slice(&[i0, i1, i2]);
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Recompute smooth normals from the current positions.
    ///
    /// Each vertex normal is the area-weighted sum of adjacent face normals.
    /// Vertices touched only by degenerate faces get +Y.
    pub fn recompute_normals(&mut self) {
        let mut accum = vec![Vec3::ZERO; self.positions.len()];
        for tri in self.indices.chunks_exact(3) {
            let [a, b, c] = [tri[0] as usize, tri[1] as usize, tri[2] as usize];
            let (Some(pa), Some(pb), Some(pc)) = (
                self.positions.get(a),
                self.positions.get(b),
                self.positions.get(c),
            ) else {
                continue;
            };
            // Unnormalized cross product: length is twice the triangle area.
            let face = (*pb - *pa).cross(*pc - *pa);
            if !face.is_finite() {
                continue;
            }
            accum[a] += face;
            accum[b] += face;
            accum[c] += face;
        }
        self.normals = accum
            .into_iter()
            .map(|n| {
                let n = n.normalize_or_zero();
                if n == Vec3::ZERO { Vec3::Y } else { n }
            })
            .collect();
    }

    /// Axis-aligned bounds `(min, max)`, or `None` for an empty mesh.
    pub fn bounds(&self) -> Option<(Vec3, Vec3)> {
        let first = *self.positions.first()?;
        Some(
            self.positions
                .iter()
                .fold((first, first), |(lo, hi), p| (lo.min(*p), hi.max(*p))),
        )
    }

    pub fn is_finite(&self) -> bool {
        self.positions.iter().all(|p| p.is_finite()) && self.normals.iter().all(|n| n.is_finite())
    }

    /// Pack into the interleaved layout the host uploads.
    pub fn to_vertices(&self) -> Vec<GpuVertex> {
        self.positions
            .iter()
            .zip(&self.normals)
            .map(|(p, n)| GpuVertex {
                position: p.to_array(),
                normal: n.to_array(),
            })
            .collect()
    }

    /// Raw bytes of `to_vertices()`.
    pub fn vertex_bytes(&self) -> Vec<u8> {
        bytemuck::cast_slice(&self.to_vertices()).to_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quad() -> MeshData {
        let mut mesh = MeshData::new();
        let a = mesh.add_vertex(Vec3::new(0.0, 0.0, 0.0), Vec3::ZERO);
        let b = mesh.add_vertex(Vec3::new(0.0, 0.0, 1.0), Vec3::ZERO);
        let c = mesh.add_vertex(Vec3::new(1.0, 0.0, 0.0), Vec3::ZERO);
        let d = mesh.add_vertex(Vec3::new(1.0, 0.0, 1.0), Vec3::ZERO);
        mesh.add_triangle(a, b, c);
        mesh.add_triangle(c, b, d);
        mesh
    }

    #[test]
    fn recompute_normals_flat_quad_points_up() {
        let mut mesh = quad();
        mesh.recompute_normals();
        for n in &mesh.normals {
            assert!((*n - Vec3::Y).length() < 1e-6);
        }
    }

    #[test]
    fn unreferenced_vertex_gets_up_normal() {
        let mut mesh = quad();
        mesh.add_vertex(Vec3::new(5.0, 5.0, 5.0), Vec3::ZERO);
        mesh.recompute_normals();
        assert_eq!(mesh.normals[4], Vec3::Y);
        assert_eq!(mesh.normals.len(), mesh.positions.len());
    }

    #[test]
    fn bounds_of_quad() {
        let (lo, hi) = quad().bounds().unwrap();
        assert_eq!(lo, Vec3::ZERO);
        assert_eq!(hi, Vec3::new(1.0, 0.0, 1.0));
        assert!(MeshData::new().bounds().is_none());
    }

    #[test]
    fn vertex_bytes_match_layout() {
        let mesh = quad();
        assert_eq!(mesh.to_vertices().len(), 4);
        assert_eq!(mesh.vertex_bytes().len(), 4 * std::mem::size_of::<GpuVertex>());
        assert_eq!(std::mem::size_of::<GpuVertex>(), 24);
    }

    #[test]
    fn counts() {
        let mesh = quad();
        assert_eq!(mesh.vertex_count(), 4);
        assert_eq!(mesh.triangle_count(), 2);
    }
}
