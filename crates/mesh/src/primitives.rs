//! Base primitives for procedural shapes.
//!
//! Round shapes are built by sweeping a profile of `(height, radius)` rings
//! around the Y axis. Rings are ordered top to bottom so one winding rule
//! gives outward-facing triangles for every swept shape.

use crate::mesh::MeshData;
use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::f32::consts::{FRAC_PI_2, PI, TAU};
use tracing::warn;

/// A parametric base shape that perturbations operate on.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum BaseShape {
    Sphere {
        radius: f32,
        segments: u32,
        rings: u32,
    },
    /// Plane on XZ with +Y up, centered at the origin.
    Plane {
        size_x: f32,
        size_z: f32,
        subdivisions_x: u32,
        subdivisions_z: u32,
    },
    /// Cylinder of `height` capped by two hemispheres.
    Capsule {
        radius: f32,
        height: f32,
        segments: u32,
        rings: u32,
    },
    Dodecahedron {
        radius: f32,
    },
    Cylinder {
        radius_top: f32,
        radius_bottom: f32,
        height: f32,
        segments: u32,
    },
    /// Axis-aligned box centered at the origin.
    Cuboid {
        size: Vec3,
    },
    /// Flat disc on XZ facing +Y.
    Disc {
        radius: f32,
        segments: u32,
    },
    /// Ring around the Y axis.
    Torus {
        radius: f32,
        tube: f32,
        ring_segments: u32,
        tube_segments: u32,
    },
}

impl BaseShape {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Sphere { .. } => "sphere",
            Self::Plane { .. } => "plane",
            Self::Capsule { .. } => "capsule",
            Self::Dodecahedron { .. } => "dodecahedron",
            Self::Cylinder { .. } => "cylinder",
            Self::Cuboid { .. } => "cuboid",
            Self::Disc { .. } => "disc",
            Self::Torus { .. } => "torus",
        }
    }

    /// Build the unperturbed mesh.
    pub fn build(&self) -> MeshData {
        match *self {
            Self::Sphere {
                radius,
                segments,
                rings,
            } => generate_sphere(radius, segments, rings),
            Self::Plane {
                size_x,
                size_z,
                subdivisions_x,
                subdivisions_z,
            } => generate_plane(size_x, size_z, subdivisions_x, subdivisions_z),
            Self::Capsule {
                radius,
                height,
                segments,
                rings,
            } => generate_capsule(radius, height, segments, rings),
            Self::Dodecahedron { radius } => generate_dodecahedron(radius),
            Self::Cylinder {
                radius_top,
                radius_bottom,
                height,
                segments,
            } => generate_cylinder(radius_top, radius_bottom, height, segments),
            Self::Cuboid { size } => generate_cuboid(size),
            Self::Disc { radius, segments } => generate_disc(radius, segments),
            Self::Torus {
                radius,
                tube,
                ring_segments,
                tube_segments,
            } => generate_torus(radius, tube, ring_segments, tube_segments),
        }
    }
}

fn positive_or_clamp(value: f32, what: &str) -> f32 {
    if value > 0.0 && value.is_finite() {
        value
    } else {
        warn!("{what} must be > 0.0, clamping to 0.001");
        0.001
    }
}

fn non_negative_or_clamp(value: f32, what: &str) -> f32 {
    if value >= 0.0 && value.is_finite() {
        value
    } else {
        warn!("{what} must be >= 0.0, clamping to 0.0");
        0.0
    }
}

/// Sweep `(y, ring_radius)` profile rings around Y, `segments` vertices each.
fn lathe(profile: &[(f32, f32)], segments: u32) -> MeshData {
    let mut mesh = MeshData::new();
    for &(y, ring_radius) in profile {
        for seg in 0..segments {
            let theta = seg as f32 / segments as f32 * TAU;
            let position = Vec3::new(ring_radius * theta.cos(), y, ring_radius * theta.sin());
            mesh.add_vertex(position, Vec3::Y);
        }
    }

    for ring in 0..profile.len().saturating_sub(1) as u32 {
        for seg in 0..segments {
            let next_seg = (seg + 1) % segments;
            let i0 = ring * segments + seg;
            let i1 = ring * segments + next_seg;
            let i2 = (ring + 1) * segments + seg;
            let i3 = (ring + 1) * segments + next_seg;
            mesh.add_triangle(i0, i1, i3);
            mesh.add_triangle(i0, i3, i2);
        }
    }

    mesh.recompute_normals();
    mesh
}

pub fn generate_sphere(radius: f32, segments: u32, rings: u32) -> MeshData {
    let radius = positive_or_clamp(radius, "sphere radius");
    let segments = segments.clamp(3, 256);
    let rings = rings.clamp(2, 256);

    let profile: Vec<(f32, f32)> = (0..=rings)
        .map(|ring| {
            let phi = ring as f32 / rings as f32 * PI;
            (radius * phi.cos(), radius * phi.sin())
        })
        .collect();
    lathe(&profile, segments)
}

pub fn generate_capsule(radius: f32, height: f32, segments: u32, rings: u32) -> MeshData {
    let radius = positive_or_clamp(radius, "capsule radius");
    let height = non_negative_or_clamp(height, "capsule height");
    let segments = segments.clamp(3, 256);
    let rings = rings.clamp(1, 128);
    let half = height * 0.5;

    let mut profile = Vec::with_capacity(2 * (rings as usize + 1));
    for ring in 0..=rings {
        let phi = ring as f32 / rings as f32 * FRAC_PI_2;
        profile.push((half + radius * phi.cos(), radius * phi.sin()));
    }
    for ring in 0..=rings {
        let phi = FRAC_PI_2 + ring as f32 / rings as f32 * FRAC_PI_2;
        profile.push((-half + radius * phi.cos(), radius * phi.sin()));
    }
    lathe(&profile, segments)
}

/// Cylinder or cone with flat caps. Rim rings are duplicated so caps keep
/// hard edges after normal recomputation.
pub fn generate_cylinder(
    radius_top: f32,
    radius_bottom: f32,
    height: f32,
    segments: u32,
) -> MeshData {
    let radius_top = non_negative_or_clamp(radius_top, "cylinder radius_top");
    let radius_bottom = non_negative_or_clamp(radius_bottom, "cylinder radius_bottom");
    let height = positive_or_clamp(height, "cylinder height");
    let segments = segments.clamp(3, 256);
    let half = height * 0.5;

    let profile = [
        (half, 0.0),
        (half, radius_top),
        (half, radius_top),
        (-half, radius_bottom),
        (-half, radius_bottom),
        (-half, 0.0),
    ];
    lathe(&profile, segments)
}

pub fn generate_plane(
    size_x: f32,
    size_z: f32,
    subdivisions_x: u32,
    subdivisions_z: u32,
) -> MeshData {
    let size_x = positive_or_clamp(size_x, "plane size_x");
    let size_z = positive_or_clamp(size_z, "plane size_z");
    let subdivisions_x = subdivisions_x.clamp(1, 1024);
    let subdivisions_z = subdivisions_z.clamp(1, 1024);

    let mut mesh = MeshData::new();
    for z in 0..=subdivisions_z {
        for x in 0..=subdivisions_x {
            let u = x as f32 / subdivisions_x as f32;
            let v = z as f32 / subdivisions_z as f32;
            let position = Vec3::new(-size_x * 0.5 + u * size_x, 0.0, -size_z * 0.5 + v * size_z);
            mesh.add_vertex(position, Vec3::Y);
        }
    }

    for z in 0..subdivisions_z {
        for x in 0..subdivisions_x {
            let i0 = z * (subdivisions_x + 1) + x;
            let i1 = i0 + 1;
            let i2 = (z + 1) * (subdivisions_x + 1) + x;
            let i3 = i2 + 1;
            mesh.add_triangle(i0, i2, i1);
            mesh.add_triangle(i1, i2, i3);
        }
    }

    mesh
}

/// Box with four vertices per face so edges stay hard.
pub fn generate_cuboid(size: Vec3) -> MeshData {
    let half = Vec3::new(
        positive_or_clamp(size.x, "cuboid size.x"),
        positive_or_clamp(size.y, "cuboid size.y"),
        positive_or_clamp(size.z, "cuboid size.z"),
    ) * 0.5;

    // (normal, u, v) with u x v == normal.
    let faces = [
        (Vec3::X, Vec3::Y, Vec3::Z),
        (Vec3::NEG_X, Vec3::Z, Vec3::Y),
        (Vec3::Y, Vec3::Z, Vec3::X),
        (Vec3::NEG_Y, Vec3::X, Vec3::Z),
        (Vec3::Z, Vec3::X, Vec3::Y),
        (Vec3::NEG_Z, Vec3::Y, Vec3::X),
    ];

    let mut mesh = MeshData::new();
    for (normal, u, v) in faces {
        let corners = [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)];
        let [a, b, c, d] = corners.map(|(su, sv)| {
            mesh.add_vertex((normal + u * su + v * sv) * half, normal)
        });
        mesh.add_triangle(a, b, c);
        mesh.add_triangle(a, c, d);
    }
    mesh
}

/// Triangle fan around a center vertex.
pub fn generate_disc(radius: f32, segments: u32) -> MeshData {
    let radius = positive_or_clamp(radius, "disc radius");
    let segments = segments.clamp(3, 256);

    let mut mesh = MeshData::new();
    let center = mesh.add_vertex(Vec3::ZERO, Vec3::Y);
    for seg in 0..segments {
        let theta = seg as f32 / segments as f32 * TAU;
        mesh.add_vertex(
            Vec3::new(radius * theta.cos(), 0.0, radius * theta.sin()),
            Vec3::Y,
        );
    }
    for seg in 0..segments {
        let current = center + 1 + seg;
        let next = center + 1 + (seg + 1) % segments;
        mesh.add_triangle(center, next, current);
    }
    mesh
}

/// Torus with `ring_segments` around the Y axis and `tube_segments`
/// around the tube.
pub fn generate_torus(
    radius: f32,
    tube: f32,
    ring_segments: u32,
    tube_segments: u32,
) -> MeshData {
    let radius = positive_or_clamp(radius, "torus radius");
    let tube = positive_or_clamp(tube, "torus tube");
    let ring_segments = ring_segments.clamp(3, 256);
    let tube_segments = tube_segments.clamp(3, 256);

    let mut mesh = MeshData::new();
    for i in 0..ring_segments {
        let theta = i as f32 / ring_segments as f32 * TAU;
        let spoke = Vec3::new(theta.cos(), 0.0, theta.sin());
        for j in 0..tube_segments {
            let phi = j as f32 / tube_segments as f32 * TAU;
            let normal = spoke * phi.cos() + Vec3::Y * phi.sin();
            mesh.add_vertex(spoke * radius + normal * tube, normal);
        }
    }

    for i in 0..ring_segments {
        let next_i = (i + 1) % ring_segments;
        for j in 0..tube_segments {
            let next_j = (j + 1) % tube_segments;
            let a = i * tube_segments + j;
            let b = next_i * tube_segments + j;
            let c = next_i * tube_segments + next_j;
            let d = i * tube_segments + next_j;
            mesh.add_triangle(a, c, b);
            mesh.add_triangle(a, d, c);
        }
    }
    mesh
}

/// Regular dodecahedron with 20 shared vertices and 36 triangles.
///
/// Faces are found as the five vertices furthest along each of the twelve
/// face directions (the vertices of the dual icosahedron).
pub fn generate_dodecahedron(radius: f32) -> MeshData {
    let radius = positive_or_clamp(radius, "dodecahedron radius");
    let phi = (1.0 + 5.0_f32.sqrt()) * 0.5;
    let inv = 1.0 / phi;

    let mut corners = Vec::with_capacity(20);
    for sx in [-1.0, 1.0] {
        for sy in [-1.0, 1.0] {
            for sz in [-1.0, 1.0] {
                corners.push(Vec3::new(sx, sy, sz));
            }
        }
    }
    for a in [-1.0, 1.0] {
        for b in [-1.0, 1.0] {
            corners.push(Vec3::new(0.0, a * inv, b * phi));
            corners.push(Vec3::new(a * inv, b * phi, 0.0));
            corners.push(Vec3::new(a * phi, 0.0, b * inv));
        }
    }

    let mut mesh = MeshData::new();
    for corner in &corners {
        let unit = corner.normalize();
        mesh.add_vertex(unit * radius, unit);
    }

    let mut face_dirs = Vec::with_capacity(12);
    for a in [-1.0, 1.0] {
        for b in [-1.0, 1.0] {
            face_dirs.push(Vec3::new(0.0, a * phi, b).normalize());
            face_dirs.push(Vec3::new(a * phi, b, 0.0).normalize());
            face_dirs.push(Vec3::new(a, 0.0, b * phi).normalize());
        }
    }

    for dir in face_dirs {
        let mut ranked: Vec<(usize, f32)> = mesh
            .positions
            .iter()
            .enumerate()
            .map(|(i, p)| (i, p.dot(dir)))
            .collect();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
        let face: Vec<usize> = ranked.iter().take(5).map(|(i, _)| *i).collect();

        // Order the pentagon counter-clockwise around its outward direction.
        let center = face.iter().map(|&i| mesh.positions[i]).sum::<Vec3>() / 5.0;
        let reference = (mesh.positions[face[0]] - center).normalize();
        let tangent = dir.cross(reference);
        let mut ordered: Vec<(usize, f32)> = face
            .iter()
            .map(|&i| {
                let offset = mesh.positions[i] - center;
                (i, offset.dot(tangent).atan2(offset.dot(reference)))
            })
            .collect();
        ordered.sort_by(|a, b| a.1.total_cmp(&b.1));

        let fan = ordered[0].0 as u32;
        for pair in ordered[1..].windows(2) {
            mesh.add_triangle(fan, pair[0].0 as u32, pair[1].0 as u32);
        }
    }

    mesh.recompute_normals();
    mesh
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_outward(mesh: &MeshData, center: Vec3) {
        for tri in mesh.indices.chunks_exact(3) {
            let [a, b, c] = [
                mesh.positions[tri[0] as usize],
                mesh.positions[tri[1] as usize],
                mesh.positions[tri[2] as usize],
            ];
            let face = (b - a).cross(c - a);
            if face.length() < 1e-8 {
                continue;
            }
            let centroid = (a + b + c) / 3.0;
            assert!(face.dot(centroid - center) > 0.0, "inward face at {centroid:?}");
        }
    }

    #[test]
    fn sphere_vertex_count_and_radius() {
        let mesh = generate_sphere(0.8, 32, 32);
        assert_eq!(mesh.vertex_count(), 33 * 32);
        for p in &mesh.positions {
            assert!((p.length() - 0.8).abs() < 1e-5);
        }
        assert_outward(&mesh, Vec3::ZERO);
    }

    #[test]
    fn sphere_normals_point_outward() {
        let mesh = generate_sphere(1.0, 16, 12);
        for (p, n) in mesh.positions.iter().zip(&mesh.normals) {
            // Poles collapse to a point, so only check the body.
            if p.y.abs() < 0.99 {
                assert!(n.dot(p.normalize()) > 0.9);
            }
        }
    }

    #[test]
    fn plane_vertex_count_and_up_normals() {
        let mut mesh = generate_plane(80.0, 80.0, 64, 64);
        assert_eq!(mesh.vertex_count(), 65 * 65);
        assert_eq!(mesh.triangle_count(), 64 * 64 * 2);
        mesh.recompute_normals();
        assert!(mesh.normals.iter().all(|n| (*n - Vec3::Y).length() < 1e-6));
        let (lo, hi) = mesh.bounds().unwrap();
        assert_eq!(lo, Vec3::new(-40.0, 0.0, -40.0));
        assert_eq!(hi, Vec3::new(40.0, 0.0, 40.0));
    }

    #[test]
    fn capsule_spans_height_plus_caps() {
        let mesh = generate_capsule(0.05, 2.0, 8, 4);
        let (lo, hi) = mesh.bounds().unwrap();
        assert!((hi.y - 1.05).abs() < 1e-5);
        assert!((lo.y + 1.05).abs() < 1e-5);
        assert_eq!(mesh.vertex_count(), 2 * 5 * 8);
        assert_outward(&mesh, Vec3::ZERO);
    }

    #[test]
    fn cylinder_caps_have_axis_normals() {
        let mesh = generate_cylinder(0.4, 0.4, 1.2, 16);
        // First ring is the top center, last ring the bottom center.
        assert!((mesh.normals[0] - Vec3::Y).length() < 1e-5);
        let last = mesh.normals.len() - 1;
        assert!((mesh.normals[last] + Vec3::Y).length() < 1e-5);
        assert_outward(&mesh, Vec3::ZERO);
    }

    #[test]
    fn dodecahedron_topology() {
        let mesh = generate_dodecahedron(1.0);
        assert_eq!(mesh.vertex_count(), 20);
        assert_eq!(mesh.triangle_count(), 36);
        for p in &mesh.positions {
            assert!((p.length() - 1.0).abs() < 1e-5);
        }
        assert_outward(&mesh, Vec3::ZERO);
    }

    #[test]
    fn cuboid_has_hard_faces() {
        let mesh = generate_cuboid(Vec3::new(1.2, 0.6, 0.8));
        assert_eq!(mesh.vertex_count(), 24);
        assert_eq!(mesh.triangle_count(), 12);
        let (lo, hi) = mesh.bounds().unwrap();
        assert!((hi - lo - Vec3::new(1.2, 0.6, 0.8)).length() < 1e-6);
        assert_outward(&mesh, Vec3::ZERO);
    }

    #[test]
    fn disc_faces_up() {
        let mut mesh = generate_disc(1.5, 16);
        assert_eq!(mesh.vertex_count(), 17);
        assert_eq!(mesh.triangle_count(), 16);
        mesh.recompute_normals();
        assert!(mesh.normals.iter().all(|n| (*n - Vec3::Y).length() < 1e-5));
        let (lo, hi) = mesh.bounds().unwrap();
        assert!((hi.x - 1.5).abs() < 1e-5 && (lo.x + 1.5).abs() < 1e-5);
    }

    #[test]
    fn torus_faces_away_from_its_tube() {
        let mesh = generate_torus(0.4, 0.05, 16, 8);
        assert_eq!(mesh.vertex_count(), 16 * 8);
        assert_eq!(mesh.triangle_count(), 16 * 8 * 2);
        for tri in mesh.indices.chunks_exact(3) {
            let [a, b, c] = [0, 1, 2].map(|k| mesh.positions[tri[k] as usize]);
            let centroid = (a + b + c) / 3.0;
            let ring = Vec3::new(centroid.x, 0.0, centroid.z).normalize() * 0.4;
            assert!((b - a).cross(c - a).dot(centroid - ring) > 0.0);
        }
        let (lo, hi) = mesh.bounds().unwrap();
        assert!((hi.x - 0.45).abs() < 1e-5);
        assert!((hi.y - lo.y - 0.1).abs() < 1e-3);
    }

    #[test]
    fn degenerate_sizes_are_clamped() {
        let mesh = generate_sphere(-1.0, 1, 1);
        assert!(mesh.is_finite());
        assert_eq!(mesh.vertex_count(), 3 * 3);
        let plane = generate_plane(f32::NAN, 0.0, 0, 0);
        assert_eq!(plane.vertex_count(), 4);
        assert!(plane.is_finite());
    }

    #[test]
    fn base_shape_builds_named_shape() {
        let shape = BaseShape::Dodecahedron { radius: 2.0 };
        assert_eq!(shape.name(), "dodecahedron");
        assert_eq!(shape.build().vertex_count(), 20);
    }
}
