//! Procedural Shape Generator: base primitives, seeded perturbation, normals.
//!
//! # Invariants
//! - Output vertex count equals the base shape's vertex count.
//! - The same base shape, perturbation and seed always give the same mesh.
//! - Output positions and normals are finite.

mod mesh;
mod perturb;
mod primitives;

pub use mesh::{GpuVertex, MeshData, MeshHandle};
pub use perturb::{
    AxisJitter, BrainBulge, Identity, NoiseDisplace, Perturbation, PerturbationKind,
    TerrainUndulation,
};
pub use primitives::{
    BaseShape, generate_capsule, generate_cuboid, generate_cylinder, generate_disc,
    generate_dodecahedron, generate_plane, generate_sphere, generate_torus,
};

use reefscape_common::{derive_indexed_seed, seeded_rng};

/// Build `base`, displace it with `perturbation` seeded by `seed`, and
/// recompute normals.
pub fn generate(base: &BaseShape, perturbation: &dyn Perturbation, seed: u64) -> MeshData {
    let _span = tracing::debug_span!(
        "generate",
        shape = base.name(),
        perturbation = perturbation.name()
    )
    .entered();

    let mut mesh = base.build();
    let vertex_count = mesh.vertex_count();
    let mut rng = seeded_rng(seed);
    perturbation.apply(&mut mesh, &mut rng);
    mesh.recompute_normals();
    debug_assert_eq!(mesh.vertex_count(), vertex_count);

    tracing::debug!(
        vertices = mesh.vertex_count(),
        triangles = mesh.triangle_count(),
        "mesh generated"
    );
    mesh
}

/// Generate `count` independently seeded variants of the same shape.
pub fn generate_many(
    base: &BaseShape,
    perturbation: &dyn Perturbation,
    count: usize,
    seed: u64,
) -> Vec<MeshData> {
    (0..count as u64)
        .map(|i| generate(base, perturbation, derive_indexed_seed(seed, i)))
        .collect()
}
