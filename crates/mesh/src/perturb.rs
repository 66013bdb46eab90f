//! Vertex perturbations that turn clean primitives into coral, terrain and rock.
//!
//! A perturbation only moves positions. It never adds or removes vertices;
//! normals are recomputed by the generator afterwards.

use crate::mesh::MeshData;
use glam::Vec3;
use noise::{NoiseFn, Perlin};
use rand::Rng;
use reefscape_common::{SceneRng, sample_range};
use serde::{Deserialize, Serialize};

/// Displacement applied to every vertex of a base mesh.
pub trait Perturbation {
    /// Short name for logs and inspector output.
    fn name(&self) -> &'static str;

    /// New position for one vertex. `normal` is the base shape's normal.
    fn displace(&self, position: Vec3, normal: Vec3, rng: &mut SceneRng) -> Vec3;

    /// Displace every vertex in place. Non-finite results keep the original
    /// position.
    fn apply(&self, mesh: &mut MeshData, rng: &mut SceneRng) {
        for (position, normal) in mesh.positions.iter_mut().zip(&mesh.normals) {
            let displaced = self.displace(*position, *normal, rng);
            if displaced.is_finite() {
                *position = displaced;
            }
        }
    }
}

/// Leaves the base shape untouched.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Identity;

impl Perturbation for Identity {
    fn name(&self) -> &'static str {
        "identity"
    }

    fn displace(&self, position: Vec3, _normal: Vec3, _rng: &mut SceneRng) -> Vec3 {
        position
    }
}

/// Brain-coral folds on a sphere.
///
/// Each vertex is pushed to `radius + sin(x*frequency)*cos(z*frequency)*amplitude`
/// along its own direction, then Y is squashed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BrainBulge {
    pub radius: f32,
    pub frequency: f32,
    pub amplitude: f32,
    pub squash: f32,
}

impl Default for BrainBulge {
    fn default() -> Self {
        Self {
            radius: 0.8,
            frequency: 8.0,
            amplitude: 0.08,
            squash: 0.7,
        }
    }
}

impl Perturbation for BrainBulge {
    fn name(&self) -> &'static str {
        "brain_bulge"
    }

    fn displace(&self, position: Vec3, _normal: Vec3, _rng: &mut SceneRng) -> Vec3 {
        let length = position.length();
        if length <= f32::EPSILON {
            return position;
        }
        let fold = (position.x * self.frequency).sin()
            * (position.z * self.frequency).cos()
            * self.amplitude;
        let scale = (self.radius + fold) / length;
        Vec3::new(
            position.x * scale,
            position.y * scale * self.squash,
            position.z * scale,
        )
    }
}

/// Rolling sea-floor height field for a plane on XZ.
///
/// Height is two sine layers plus uniform jitter in `[0, jitter)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TerrainUndulation {
    pub broad_frequency: f32,
    pub broad_amplitude: f32,
    pub ripple_frequency_x: f32,
    pub ripple_frequency_z: f32,
    pub ripple_amplitude: f32,
    pub jitter: f32,
}

impl Default for TerrainUndulation {
    fn default() -> Self {
        Self {
            broad_frequency: 0.1,
            broad_amplitude: 0.8,
            ripple_frequency_x: 0.3,
            // Ripples run from -X/+Z toward +X/-Z.
            ripple_frequency_z: -0.2,
            ripple_amplitude: 0.3,
            jitter: 0.15,
        }
    }
}

impl TerrainUndulation {
    /// Height without the random jitter term.
    pub fn height(&self, x: f32, z: f32) -> f32 {
        (x * self.broad_frequency).sin() * (z * self.broad_frequency).cos() * self.broad_amplitude
            + (x * self.ripple_frequency_x + z * self.ripple_frequency_z).sin()
                * self.ripple_amplitude
    }
}

impl Perturbation for TerrainUndulation {
    fn name(&self) -> &'static str {
        "terrain_undulation"
    }

    fn displace(&self, position: Vec3, _normal: Vec3, rng: &mut SceneRng) -> Vec3 {
        let jitter = sample_range(rng, 0.0, self.jitter);
        Vec3::new(
            position.x,
            self.height(position.x, position.z) + jitter,
            position.z,
        )
    }
}

/// Independent per-axis scale jitter, used to knock rocks out of shape.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisJitter {
    pub min: Vec3,
    pub max: Vec3,
}

impl Default for AxisJitter {
    fn default() -> Self {
        Self {
            min: Vec3::new(0.8, 0.6, 0.8),
            max: Vec3::new(1.2, 1.0, 1.2),
        }
    }
}

impl Perturbation for AxisJitter {
    fn name(&self) -> &'static str {
        "axis_jitter"
    }

    fn displace(&self, position: Vec3, _normal: Vec3, rng: &mut SceneRng) -> Vec3 {
        let factor = Vec3::new(
            sample_range(rng, self.min.x, self.max.x),
            sample_range(rng, self.min.y, self.max.y),
            sample_range(rng, self.min.z, self.max.z),
        );
        position * factor
    }
}

/// Fractal Perlin displacement along the base normal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NoiseDisplace {
    pub amplitude: f32,
    pub scale: f32,
    pub octaves: u32,
    pub persistence: f32,
}

impl Default for NoiseDisplace {
    fn default() -> Self {
        Self {
            amplitude: 0.05,
            scale: 1.5,
            octaves: 3,
            persistence: 0.6,
        }
    }
}

impl NoiseDisplace {
    fn sample_fbm(&self, noise: &Perlin, p: Vec3) -> f32 {
        let mut total = 0.0;
        let mut amplitude = 1.0;
        let mut frequency = self.scale as f64;
        let mut max_value = 0.0;

        for _ in 0..self.octaves.clamp(1, 8) {
            total += noise.get([
                p.x as f64 * frequency,
                p.y as f64 * frequency,
                p.z as f64 * frequency,
            ]) * amplitude;
            max_value += amplitude;
            amplitude *= self.persistence as f64;
            frequency *= 2.0;
        }

        ((total / max_value) as f32).clamp(-1.0, 1.0)
    }
}

impl Perturbation for NoiseDisplace {
    fn name(&self) -> &'static str {
        "noise_displace"
    }

    fn displace(&self, position: Vec3, normal: Vec3, rng: &mut SceneRng) -> Vec3 {
        // Single-vertex use builds a fresh field; `apply` shares one.
        let perlin = Perlin::new(rng.random());
        position + normal * self.sample_fbm(&perlin, position) * self.amplitude
    }

    fn apply(&self, mesh: &mut MeshData, rng: &mut SceneRng) {
        let perlin = Perlin::new(rng.random());
        for (position, normal) in mesh.positions.iter_mut().zip(&mesh.normals) {
            let offset = self.sample_fbm(&perlin, *position) * self.amplitude;
            let displaced = *position + *normal * offset;
            if displaced.is_finite() {
                *position = displaced;
            }
        }
    }
}

/// Serializable choice of perturbation, used by configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PerturbationKind {
    Identity,
    BrainBulge(BrainBulge),
    TerrainUndulation(TerrainUndulation),
    AxisJitter(AxisJitter),
    NoiseDisplace(NoiseDisplace),
}

impl PerturbationKind {
    pub fn as_perturbation(&self) -> &dyn Perturbation {
        match self {
            Self::Identity => &Identity,
            Self::BrainBulge(p) => p,
            Self::TerrainUndulation(p) => p,
            Self::AxisJitter(p) => p,
            Self::NoiseDisplace(p) => p,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitives::{generate_dodecahedron, generate_plane, generate_sphere};
    use reefscape_common::seeded_rng;

    #[test]
    fn brain_bulge_stays_near_radius() {
        let bulge = BrainBulge::default();
        let mut rng = seeded_rng(1);
        let mut mesh = generate_sphere(0.8, 32, 32);
        bulge.apply(&mut mesh, &mut rng);
        for p in &mesh.positions {
            let unsquashed = Vec3::new(p.x, p.y / bulge.squash, p.z);
            let r = unsquashed.length();
            assert!(r >= 0.8 - 0.08 - 1e-4 && r <= 0.8 + 0.08 + 1e-4, "r={r}");
        }
    }

    #[test]
    fn brain_bulge_leaves_origin_alone() {
        let mut rng = seeded_rng(1);
        assert_eq!(
            BrainBulge::default().displace(Vec3::ZERO, Vec3::Y, &mut rng),
            Vec3::ZERO
        );
    }

    #[test]
    fn terrain_height_bounded() {
        let terrain = TerrainUndulation::default();
        let mut rng = seeded_rng(3);
        let mut mesh = generate_plane(80.0, 80.0, 32, 32);
        terrain.apply(&mut mesh, &mut rng);
        let bound = terrain.broad_amplitude + terrain.ripple_amplitude + terrain.jitter;
        for p in &mesh.positions {
            assert!(p.y.abs() <= bound + 1e-5);
        }
    }

    #[test]
    fn terrain_keeps_xz() {
        let terrain = TerrainUndulation::default();
        let mut rng = seeded_rng(3);
        let p = terrain.displace(Vec3::new(4.0, 0.0, -7.0), Vec3::Y, &mut rng);
        assert_eq!((p.x, p.z), (4.0, -7.0));
    }

    #[test]
    fn terrain_ripple_runs_against_z() {
        let terrain = TerrainUndulation::default();
        // On x = 0 only the ripple term is left: sin(-0.2 z) * 0.3.
        assert!((terrain.height(0.0, 5.0) - (-1.0f32).sin() * 0.3).abs() < 1e-6);
        assert!(terrain.height(0.0, 5.0) < 0.0);
        assert!(terrain.height(0.0, -5.0) > 0.0);
    }

    #[test]
    fn axis_jitter_within_range() {
        let jitter = AxisJitter::default();
        let mut rng = seeded_rng(5);
        let base = generate_dodecahedron(1.0);
        let mut mesh = base.clone();
        jitter.apply(&mut mesh, &mut rng);
        for (before, after) in base.positions.iter().zip(&mesh.positions) {
            for axis in 0..3 {
                if before[axis].abs() > 1e-6 {
                    let f = after[axis] / before[axis];
                    assert!(f >= jitter.min[axis] - 1e-6 && f < jitter.max[axis] + 1e-6);
                }
            }
        }
    }

    #[test]
    fn noise_displace_bounded_by_amplitude() {
        let noise = NoiseDisplace::default();
        let mut rng = seeded_rng(11);
        let base = generate_sphere(1.0, 16, 12);
        let mut mesh = base.clone();
        noise.apply(&mut mesh, &mut rng);
        for (before, after) in base.positions.iter().zip(&mesh.positions) {
            assert!((*after - *before).length() <= noise.amplitude + 1e-5);
        }
    }

    #[test]
    fn identity_is_noop() {
        let mut rng = seeded_rng(0);
        let base = generate_sphere(1.0, 8, 6);
        let mut mesh = base.clone();
        Identity.apply(&mut mesh, &mut rng);
        assert_eq!(mesh.positions, base.positions);
    }

    #[test]
    fn kind_dispatches_by_name() {
        let kind = PerturbationKind::AxisJitter(AxisJitter::default());
        assert_eq!(kind.as_perturbation().name(), "axis_jitter");
        assert_eq!(PerturbationKind::Identity.as_perturbation().name(), "identity");
    }
}
