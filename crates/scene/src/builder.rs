use crate::aquarium::{ActorKind, Aquarium, Drive, Glow};
use crate::chest::Chest;
use crate::config::{ConfigError, Placement, SceneConfig};
use crate::graph::GraphError;
use crate::layout::{self, PartLayout, TreasureKind};
use glam::Vec3;
use reefscape_common::{
    EntityId, RngStream, SceneRng, Transform, derive_indexed_seed, derive_seed, sample_range,
    stream_rng,
};
use reefscape_mesh::{
    AxisJitter, BaseShape, BrainBulge, Identity, MeshHandle, Perturbation, TerrainUndulation,
    generate,
};
use reefscape_motion::{
    BobParams, BubbleParams, DampingError, DriftParams, MotionParams, OrbitParams, SwayParams,
};
use std::collections::BTreeMap;
use std::f32::consts::TAU;

#[derive(Debug, thiserror::Error)]
pub enum SceneError {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    #[error("scene graph error: {0}")]
    Graph(#[from] GraphError),
    #[error("chest error: {0}")]
    Chest(#[from] DampingError),
}

/// Builds an [`Aquarium`] from a configuration and a seed.
///
/// Every subsystem draws from its own RNG stream, so the same seed always
/// yields the same entities, ids and meshes.
#[derive(Debug, Clone)]
pub struct SceneBuilder {
    config: SceneConfig,
    seed: u64,
}

/// Aquarium under construction plus a cache of unperturbed meshes.
struct Workshop {
    aquarium: Aquarium,
    shared: BTreeMap<String, MeshHandle>,
}

impl Workshop {
    /// One mesh per distinct unperturbed shape.
    fn shared_mesh(&mut self, shape: &BaseShape) -> MeshHandle {
        let key = format!("{shape:?}");
        if let Some(handle) = self.shared.get(&key) {
            return *handle;
        }
        let handle = self.aquarium.add_mesh(generate(shape, &Identity, 0));
        self.shared.insert(key, handle);
        handle
    }

    fn unique_mesh(
        &mut self,
        shape: &BaseShape,
        perturbation: &dyn Perturbation,
        seed: u64,
    ) -> MeshHandle {
        self.aquarium.add_mesh(generate(shape, perturbation, seed))
    }

    fn group(
        &mut self,
        kind: ActorKind,
        parent: Option<EntityId>,
        local: Transform,
    ) -> Result<EntityId, GraphError> {
        self.aquarium.spawn(kind, parent, Drive::fixed(local), None)
    }

    fn part(
        &mut self,
        kind: ActorKind,
        parent: EntityId,
        part: &PartLayout,
    ) -> Result<EntityId, GraphError> {
        let mesh = self.shared_mesh(&part.shape);
        self.aquarium
            .spawn(kind, Some(parent), Drive::fixed(part.local), Some(mesh))
    }
}

fn centered(rng: &mut SceneRng, extent: f32) -> f32 {
    sample_range(rng, -extent * 0.5, extent * 0.5)
}

fn placed(p: &Placement) -> Transform {
    Transform::from_euler(
        p.position,
        Vec3::new(0.0, p.rotation_y, 0.0),
        Vec3::splat(p.scale),
    )
}

impl SceneBuilder {
    pub fn new(config: SceneConfig, seed: u64) -> Self {
        Self { config, seed }
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn build(&self) -> Result<Aquarium, SceneError> {
        let _span = tracing::info_span!("build", seed = self.seed).entered();
        self.config.validate()?;

        let mut shop = Workshop {
            aquarium: Aquarium::new(self.seed),
            shared: BTreeMap::new(),
        };
        self.floor(&mut shop)?;
        self.sand(&mut shop)?;
        self.rocks(&mut shop)?;
        self.seaweed(&mut shop)?;
        self.reefs(&mut shop)?;
        self.schools(&mut shop)?;
        self.ship(&mut shop)?;
        self.chests(&mut shop)?;
        self.bubbles(&mut shop)?;
        self.dust(&mut shop)?;
        self.fog(&mut shop)?;
        self.light_rays(&mut shop)?;

        let aquarium = shop.aquarium;
        tracing::info!(
            actors = aquarium.actor_count(),
            meshes = aquarium.meshes().len(),
            chests = aquarium.chest_count(),
            "aquarium built"
        );
        Ok(aquarium)
    }

    fn stream_seed(&self, stream: RngStream) -> u64 {
        derive_seed(self.seed, stream)
    }

    fn floor(&self, shop: &mut Workshop) -> Result<(), SceneError> {
        let floor = &self.config.floor;
        let plane = BaseShape::Plane {
            size_x: floor.size,
            size_z: floor.size,
            subdivisions_x: floor.subdivisions,
            subdivisions_z: floor.subdivisions,
        };
        let mesh = shop.unique_mesh(
            &plane,
            &TerrainUndulation::default(),
            self.stream_seed(RngStream::Floor),
        );
        shop.aquarium.spawn(
            ActorKind::Floor,
            None,
            Drive::fixed(Transform::default()),
            Some(mesh),
        )?;
        Ok(())
    }

    fn sand(&self, shop: &mut Workshop) -> Result<(), SceneError> {
        let sand = &self.config.sand;
        let mut rng = stream_rng(self.seed, RngStream::Sand);
        let mesh = shop.shared_mesh(&layout::SAND_PATCH);
        for _ in 0..sand.count {
            let local = layout::sand_patch(&mut rng, sand.spread);
            shop.aquarium
                .spawn(ActorKind::SandPatch, None, Drive::fixed(local), Some(mesh))?;
        }
        Ok(())
    }

    fn rocks(&self, shop: &mut Workshop) -> Result<(), SceneError> {
        let rocks = &self.config.rocks;
        let stream_seed = self.stream_seed(RngStream::Rocks);
        let mut rng = stream_rng(self.seed, RngStream::Rocks);
        let shape = BaseShape::Dodecahedron { radius: 1.0 };
        for i in 0..rocks.count {
            let position = Vec3::new(
                centered(&mut rng, rocks.spread),
                0.0,
                centered(&mut rng, rocks.spread),
            );
            let scale = sample_range(&mut rng, 0.3, 1.1);
            let tumble = Vec3::new(
                sample_range(&mut rng, 0.0, 1.0),
                sample_range(&mut rng, 0.0, 1.0),
                sample_range(&mut rng, 0.0, 1.0),
            );
            let mesh = shop.unique_mesh(
                &shape,
                &AxisJitter::default(),
                derive_indexed_seed(stream_seed, i as u64),
            );
            let local = Transform::from_euler(position, tumble, Vec3::splat(scale));
            shop.aquarium
                .spawn(ActorKind::Rock, None, Drive::fixed(local), Some(mesh))?;
        }
        Ok(())
    }

    fn seaweed(&self, shop: &mut Workshop) -> Result<(), SceneError> {
        let seaweed = &self.config.seaweed;
        let mut rng = stream_rng(self.seed, RngStream::Seaweed);
        for _ in 0..seaweed.count {
            let position = Vec3::new(
                centered(&mut rng, seaweed.spread),
                0.0,
                centered(&mut rng, seaweed.spread),
            );
            let height = sample_range(&mut rng, 1.5, 3.5);
            let phase = sample_range(&mut rng, 0.0, TAU);
            let sway = SwayParams::seaweed(Transform::from_translation(position), phase);
            let clump = shop.aquarium.spawn(
                ActorKind::Seaweed,
                None,
                Drive::Motion(MotionParams::Sway(sway)),
                None,
            )?;
            for strand in layout::seaweed_strands(&mut rng, height) {
                shop.part(ActorKind::SeaweedStrand, clump, &strand)?;
            }
        }
        Ok(())
    }

    fn reefs(&self, shop: &mut Workshop) -> Result<(), SceneError> {
        let stream_seed = self.stream_seed(RngStream::Reefs);
        let mut rng = stream_rng(self.seed, RngStream::Reefs);
        let brain = BaseShape::Sphere {
            radius: 0.8,
            segments: 32,
            rings: 32,
        };
        for (i, placement) in self.config.reefs.iter().enumerate() {
            let reef = shop.group(ActorKind::Reef, None, placed(placement))?;

            let mesh = shop.unique_mesh(
                &brain,
                &BrainBulge::default(),
                derive_indexed_seed(stream_seed, i as u64),
            );
            let coral = shop.aquarium.spawn(
                ActorKind::BrainCoral,
                Some(reef),
                Drive::fixed(Transform::from_translation(layout::BRAIN_CORAL_OFFSET)),
                Some(mesh),
            )?;
            shop.aquarium.set_glow(
                coral,
                Glow {
                    base: 0.3,
                    amplitude: 0.1,
                    frequency: 2.0,
                },
            );

            for (position, yaw, scale) in layout::FAN_CORALS {
                let base =
                    Transform::from_euler(position, Vec3::new(0.0, yaw, 0.0), Vec3::splat(scale));
                let sway = SwayParams::fan_coral(base, sample_range(&mut rng, 0.0, TAU));
                let fan = shop.aquarium.spawn(
                    ActorKind::FanCoral,
                    Some(reef),
                    Drive::Motion(MotionParams::Sway(sway)),
                    None,
                )?;
                for part in layout::fan_coral() {
                    shop.part(ActorKind::CoralPart, fan, &part)?;
                }
            }

            for position in layout::TUBE_CORALS {
                let tubes = shop.group(
                    ActorKind::TubeCoral,
                    Some(reef),
                    Transform::from_translation(position),
                )?;
                for part in layout::tube_coral(&mut rng) {
                    shop.part(ActorKind::CoralPart, tubes, &part)?;
                }
            }

            for (position, scale) in layout::BRANCH_CORALS {
                let local = Transform::from_translation(position).with_scale(scale);
                let branches = shop.group(ActorKind::BranchCoral, Some(reef), local)?;
                for part in layout::branch_coral(&mut rng) {
                    shop.part(ActorKind::CoralPart, branches, &part)?;
                }
            }

            for position in layout::ANEMONES {
                let anemone = shop.group(
                    ActorKind::Anemone,
                    Some(reef),
                    Transform::from_translation(position),
                )?;
                shop.part(ActorKind::CoralPart, anemone, &layout::anemone_base())?;
                for tentacle in layout::anemone_tentacles(&mut rng) {
                    let mesh = shop.shared_mesh(&tentacle.shape);
                    let sway = SwayParams::anemone_tentacle(tentacle.local, tentacle.phase);
                    shop.aquarium.spawn(
                        ActorKind::Tentacle,
                        Some(anemone),
                        Drive::Motion(MotionParams::Sway(sway)),
                        Some(mesh),
                    )?;
                }
            }
        }
        Ok(())
    }

    fn schools(&self, shop: &mut Workshop) -> Result<(), SceneError> {
        let mut rng = stream_rng(self.seed, RngStream::Fish);
        let body = shop.shared_mesh(&BaseShape::Sphere {
            radius: 0.6,
            segments: 16,
            rings: 12,
        });
        let tail = shop.shared_mesh(&BaseShape::Cylinder {
            radius_top: 0.0,
            radius_bottom: 0.4,
            height: 0.6,
            segments: 6,
        });
        let bob_amplitude = self.config.motion.fish_bob_amplitude;
        for school in &self.config.schools {
            let group = shop.group(
                ActorKind::School,
                None,
                Transform::from_translation(school.center),
            )?;
            for _ in 0..school.count {
                let orbit = OrbitParams::sample(&mut rng, bob_amplitude);
                let fish = shop.aquarium.spawn(
                    ActorKind::Fish,
                    Some(group),
                    Drive::Motion(MotionParams::Orbit(orbit)),
                    Some(body),
                )?;
                shop.aquarium.spawn(
                    ActorKind::FishTail,
                    Some(fish),
                    Drive::FishTail(orbit),
                    Some(tail),
                )?;
            }
        }
        Ok(())
    }

    fn ship(&self, shop: &mut Workshop) -> Result<(), SceneError> {
        let config = &self.config.ship;
        let mut rng = stream_rng(self.seed, RngStream::Ship);
        let rest = Transform::from_euler(config.position, config.rotation, Vec3::ONE);
        let ship = shop.aquarium.spawn(
            ActorKind::Ship,
            None,
            Drive::Motion(MotionParams::Sway(SwayParams::ship_hull(rest))),
            None,
        )?;
        let fittings = layout::ship_hull()
            .into_iter()
            .chain(layout::ship_superstructure())
            .chain(layout::ship_rails())
            .chain(layout::ship_anchor())
            .chain(layout::ship_wheel())
            .chain([layout::ship_cannon()]);
        for part in fittings {
            shop.part(ActorKind::ShipPart, ship, &part)?;
        }
        for (i, strand) in layout::ship_seaweed(&mut rng, config.seaweed_count)
            .into_iter()
            .enumerate()
        {
            let mesh = shop.shared_mesh(&strand.shape);
            let sway = SwayParams::ship_seaweed(strand.local, i as u32);
            shop.aquarium.spawn(
                ActorKind::ShipSeaweed,
                Some(ship),
                Drive::Motion(MotionParams::Sway(sway)),
                Some(mesh),
            )?;
        }
        for barnacle in layout::barnacles(&mut rng, config.barnacle_count) {
            shop.part(ActorKind::Barnacle, ship, &barnacle)?;
        }
        for coin in layout::spilled_coins(&mut rng, config.spilled_coins) {
            shop.part(ActorKind::ShipPart, ship, &coin)?;
        }
        Ok(())
    }

    fn chests(&self, shop: &mut Workshop) -> Result<(), SceneError> {
        let stream_seed = self.stream_seed(RngStream::Chests);
        let motion = &self.config.motion;
        for kind in TreasureKind::ALL {
            let handle = shop.shared_mesh(&kind.shape());
            shop.aquarium.set_treasure_mesh(kind, handle);
        }
        for (i, placement) in self.config.chests.iter().enumerate() {
            let rest = placed(placement);
            let id = shop.aquarium.spawn(
                ActorKind::Chest,
                None,
                Drive::Motion(MotionParams::Bob(BobParams::chest(rest))),
                None,
            )?;
            let chest = Chest::new(
                derive_indexed_seed(stream_seed, i as u64),
                motion.lid_damping,
                self.config.treasure,
            )?;
            shop.aquarium.add_chest(id, chest);
            shop.part(ActorKind::ChestPart, id, &layout::chest_body())?;
            for trim in layout::chest_trim() {
                shop.part(ActorKind::ChestPart, id, &trim)?;
            }
            shop.part(ActorKind::ChestGlow, id, &layout::chest_lock())?;
            shop.part(ActorKind::ChestGlow, id, &layout::chest_glow_disc())?;
            let lid = shop
                .aquarium
                .spawn(ActorKind::ChestLid, Some(id), Drive::ChestLid(id), None)?;
            shop.part(ActorKind::ChestPart, lid, &layout::chest_lid())?;
            for band in layout::lid_trim() {
                shop.part(ActorKind::ChestPart, lid, &band)?;
            }
        }
        Ok(())
    }

    fn bubbles(&self, shop: &mut Workshop) -> Result<(), SceneError> {
        let bubbles = &self.config.bubbles;
        let motion = &self.config.motion;
        let mut rng = stream_rng(self.seed, RngStream::Bubbles);
        let mesh = shop.shared_mesh(&BaseShape::Sphere {
            radius: 1.0,
            segments: 16,
            rings: 16,
        });
        for i in 0..bubbles.count {
            let params = BubbleParams::sample(
                &mut rng,
                i,
                bubbles.spread,
                motion.bubble_period,
                motion.bubble_vertical_offset,
            );
            shop.aquarium.spawn(
                ActorKind::Bubble,
                None,
                Drive::Motion(MotionParams::Bubble(params)),
                Some(mesh),
            )?;
        }
        Ok(())
    }

    fn dust(&self, shop: &mut Workshop) -> Result<(), SceneError> {
        let dust = &self.config.dust;
        let mut rng = stream_rng(self.seed, RngStream::Dust);
        let mesh = shop.shared_mesh(&BaseShape::Sphere {
            radius: 1.0,
            segments: 8,
            rings: 8,
        });
        for i in 0..dust.count {
            let params = DriftParams::dust(&mut rng, i, dust.spread, dust.height);
            shop.aquarium.spawn(
                ActorKind::Dust,
                None,
                Drive::Motion(MotionParams::Drift(params)),
                Some(mesh),
            )?;
        }
        Ok(())
    }

    fn light_rays(&self, shop: &mut Workshop) -> Result<(), SceneError> {
        let rays = &self.config.light_rays;
        let mesh = shop.shared_mesh(&layout::LIGHT_RAY);
        for i in 0..rays.count {
            let local = layout::light_ray(rays, i);
            shop.aquarium
                .spawn(ActorKind::LightRay, None, Drive::fixed(local), Some(mesh))?;
        }
        Ok(())
    }

    fn fog(&self, shop: &mut Workshop) -> Result<(), SceneError> {
        for volume in &self.config.fog {
            let mesh = shop.shared_mesh(&BaseShape::Sphere {
                radius: volume.radius,
                segments: 16,
                rings: 16,
            });
            let params = DriftParams::fog(volume.origin, volume.x, volume.z);
            shop.aquarium.spawn(
                ActorKind::Fog,
                None,
                Drive::Motion(MotionParams::Drift(params)),
                Some(mesh),
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aquarium::SceneEvent;
    use reefscape_input::Action;

    fn count(aquarium: &Aquarium, kind: ActorKind) -> usize {
        aquarium
            .actors()
            .values()
            .filter(|a| a.kind == kind)
            .count()
    }

    fn stock(seed: u64) -> Aquarium {
        SceneBuilder::new(SceneConfig::default(), seed)
            .build()
            .unwrap()
    }

    #[test]
    fn stock_scene_population() {
        let aq = stock(7);
        assert_eq!(count(&aq, ActorKind::Floor), 1);
        assert_eq!(count(&aq, ActorKind::Rock), 15);
        assert_eq!(count(&aq, ActorKind::Seaweed), 25);
        assert_eq!(count(&aq, ActorKind::SeaweedStrand), 75);
        assert_eq!(count(&aq, ActorKind::Reef), 4);
        assert_eq!(count(&aq, ActorKind::BrainCoral), 4);
        assert_eq!(count(&aq, ActorKind::Tentacle), 4 * 2 * 12);
        assert_eq!(count(&aq, ActorKind::Fish), 23);
        assert_eq!(count(&aq, ActorKind::FishTail), 23);
        assert_eq!(count(&aq, ActorKind::ShipSeaweed), 5);
        assert_eq!(count(&aq, ActorKind::Barnacle), 12);
        // Hull 4, superstructure 7, rails 12, anchor 3, wheel 9, cannon 1, coins 8.
        assert_eq!(count(&aq, ActorKind::ShipPart), 44);
        assert_eq!(count(&aq, ActorKind::Chest), 3);
        assert_eq!(count(&aq, ActorKind::ChestLid), 3);
        // Body and eleven trim pieces, plus lid slab and three bands.
        assert_eq!(count(&aq, ActorKind::ChestPart), 3 * 16);
        assert_eq!(count(&aq, ActorKind::ChestGlow), 3 * 2);
        assert_eq!(count(&aq, ActorKind::SandPatch), 20);
        assert_eq!(count(&aq, ActorKind::LightRay), 5);
        assert_eq!(count(&aq, ActorKind::Bubble), 60);
        assert_eq!(count(&aq, ActorKind::Dust), 40);
        assert_eq!(count(&aq, ActorKind::Fog), 3);
        assert_eq!(count(&aq, ActorKind::Treasure), 0);
        assert_eq!(aq.chest_count(), 3);
    }

    #[test]
    fn same_seed_same_scene() {
        let mut a = stock(99);
        let mut b = stock(99);
        assert_eq!(
            a.actors().keys().collect::<Vec<_>>(),
            b.actors().keys().collect::<Vec<_>>()
        );
        assert_eq!(a.meshes(), b.meshes());
        for frame in 0..20 {
            let t = frame as f32 / 30.0;
            a.advance(t);
            b.advance(t);
        }
        assert_eq!(a.state_hash(), b.state_hash());
    }

    #[test]
    fn different_seeds_differ() {
        let a = stock(1);
        let b = stock(2);
        assert_ne!(a.state_hash(), b.state_hash());
    }

    #[test]
    fn rocks_get_their_own_meshes() {
        let aq = stock(3);
        let rock_meshes: Vec<_> = aq
            .actors()
            .values()
            .filter(|a| a.kind == ActorKind::Rock)
            .filter_map(|a| a.mesh)
            .collect();
        assert_eq!(rock_meshes.len(), 15);
        let first = aq.mesh(rock_meshes[0]).unwrap();
        let second = aq.mesh(rock_meshes[1]).unwrap();
        assert_eq!(first.vertex_count(), 20);
        assert_ne!(first.positions, second.positions);
    }

    #[test]
    fn fish_stay_on_their_orbit_around_the_school() {
        let mut aq = stock(5);
        aq.advance(12.0);
        for (id, actor) in aq.actors() {
            if actor.kind != ActorKind::Fish {
                continue;
            }
            let Drive::Motion(MotionParams::Orbit(orbit)) = actor.drive else {
                panic!("fish should orbit");
            };
            let school = actor.parent.unwrap();
            let center = aq.world_transform(school).unwrap().position;
            let p = aq.world_transform(*id).unwrap().position - center;
            let r = (p.x * p.x + p.z * p.z).sqrt();
            assert!((r - orbit.radius).abs() < 1e-3);
        }
    }

    #[test]
    fn bubbles_stay_in_band() {
        let mut aq = stock(11);
        for frame in 0..200 {
            aq.advance(frame as f32 * 0.7);
            for (id, actor) in aq.actors() {
                if actor.kind == ActorKind::Bubble {
                    let y = aq.world_transform(*id).unwrap().position.y;
                    assert!((-2.0..23.0).contains(&y));
                }
            }
        }
    }

    #[test]
    fn three_chests_counter_reaches_three_and_stays() {
        let mut aq = stock(21);
        aq.drain_events();
        let chests: Vec<EntityId> = aq.chests().keys().copied().collect();
        for chest in &chests {
            assert!(aq.handle(&Action::Click(*chest)));
        }
        assert!(!aq.handle(&Action::Click(chests[0])));

        let opened: Vec<usize> = aq
            .drain_events()
            .into_iter()
            .filter_map(|e| match e {
                SceneEvent::ChestOpened { opened, total, .. } => {
                    assert_eq!(total, 3);
                    Some(opened)
                }
                _ => None,
            })
            .collect();
        assert_eq!(opened, vec![1, 2, 3]);
        assert_eq!(aq.opened_count(), 3);
        assert_eq!(count(&aq, ActorKind::Treasure), 3 * 36);
    }

    #[test]
    fn treasure_has_meshes() {
        let mut aq = stock(4);
        let chest = *aq.chests().keys().next().unwrap();
        aq.handle(&Action::Click(chest));
        assert!(
            aq.actors()
                .values()
                .filter(|a| a.kind == ActorKind::Treasure)
                .all(|a| a.mesh.is_some())
        );
    }

    #[test]
    fn every_world_transform_is_finite() {
        let mut aq = stock(8);
        for frame in [0.0, 0.5, 100.0, -3.0, f32::NAN] {
            aq.advance(frame);
            for id in aq.actors().keys() {
                assert!(aq.world_transform(*id).unwrap().is_finite());
            }
        }
    }

    #[test]
    fn chest_glow_parts_carry_hover() {
        let mut aq = stock(6);
        aq.advance(2.0);
        let chest = *aq.chests().keys().next().unwrap();
        let glows: Vec<EntityId> = aq
            .graph()
            .children(chest)
            .iter()
            .copied()
            .filter(|id| aq.actor(*id).is_some_and(|a| a.kind == ActorKind::ChestGlow))
            .collect();
        assert_eq!(glows.len(), 2);
        assert_eq!(aq.glow(chest), None);
        let idle = aq.glow(glows[0]).unwrap();
        assert!(aq.handle(&Action::HoverEnter(chest)));
        for id in &glows {
            assert!((aq.glow(*id).unwrap() - idle - 0.3).abs() < 1e-6);
        }
    }

    #[test]
    fn oversized_treasure_config_is_rejected() {
        let mut config = SceneConfig::default();
        config.treasure.coins = u32::MAX;
        config.treasure.gems = 1;
        let err = SceneBuilder::new(config, 0).build().unwrap_err();
        assert!(matches!(err, SceneError::Config(ConfigError::Invalid(_))));
    }

    #[test]
    fn invalid_config_is_rejected() {
        let mut config = SceneConfig::default();
        config.motion.lid_damping = 2.0;
        let err = SceneBuilder::new(config, 0).build().unwrap_err();
        assert!(matches!(err, SceneError::Config(ConfigError::Invalid(_))));
    }

    #[test]
    fn empty_config_builds_empty_scene() {
        let config = SceneConfig {
            rocks: crate::config::ScatterConfig {
                count: 0,
                spread: 0.0,
            },
            seaweed: crate::config::ScatterConfig {
                count: 0,
                spread: 0.0,
            },
            reefs: Vec::new(),
            schools: Vec::new(),
            chests: Vec::new(),
            bubbles: crate::config::ScatterConfig {
                count: 0,
                spread: 0.0,
            },
            fog: Vec::new(),
            sand: crate::config::ScatterConfig {
                count: 0,
                spread: 0.0,
            },
            ..SceneConfig::default()
        };
        let mut aq = SceneBuilder::new(config, 0).build().unwrap();
        aq.advance(1.0);
        assert_eq!(aq.chest_count(), 0);
        assert_eq!(count(&aq, ActorKind::Bubble), 0);
        assert_eq!(aq.opened_count(), 0);
    }
}
