use crate::chest::Chest;
use crate::graph::{GraphError, SceneGraph};
use crate::layout::TreasureKind;
use reefscape_common::{EntityId, Transform};
use reefscape_input::Action;
use reefscape_mesh::{MeshData, MeshHandle};
use reefscape_motion::{Motion, MotionParams, OrbitParams, pulse, sanitize_elapsed};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// An event record produced by every observable change to the aquarium.
///
/// Consumers (the treasure counter, the CLI, tests) read or drain the log
/// instead of polling scene state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SceneEvent {
    /// A chest was opened. `opened` counts every open chest including this one.
    ChestOpened {
        chest: EntityId,
        opened: usize,
        total: usize,
    },
    /// The pointer moved onto or off a chest.
    HoverChanged { chest: EntityId, hovered: bool },
    /// The scene was advanced to `elapsed` seconds.
    Advanced { frame: u64, elapsed: f32 },
    /// A generated mesh was added to the mesh table.
    MeshRegistered { handle: MeshHandle, vertices: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ActorKind {
    Floor,
    Rock,
    Seaweed,
    SeaweedStrand,
    Reef,
    BrainCoral,
    FanCoral,
    TubeCoral,
    BranchCoral,
    CoralPart,
    Anemone,
    Tentacle,
    School,
    Fish,
    FishTail,
    Ship,
    ShipPart,
    ShipSeaweed,
    Barnacle,
    Chest,
    ChestPart,
    ChestLid,
    /// Chest part lit by the chest's glow.
    ChestGlow,
    Treasure,
    SandPatch,
    LightRay,
    Bubble,
    Dust,
    Fog,
}

impl ActorKind {
    pub fn name(self) -> &'static str {
        match self {
            Self::Floor => "floor",
            Self::Rock => "rock",
            Self::Seaweed => "seaweed",
            Self::SeaweedStrand => "seaweed_strand",
            Self::Reef => "reef",
            Self::BrainCoral => "brain_coral",
            Self::FanCoral => "fan_coral",
            Self::TubeCoral => "tube_coral",
            Self::BranchCoral => "branch_coral",
            Self::CoralPart => "coral_part",
            Self::Anemone => "anemone",
            Self::Tentacle => "tentacle",
            Self::School => "school",
            Self::Fish => "fish",
            Self::FishTail => "fish_tail",
            Self::Ship => "ship",
            Self::ShipPart => "ship_part",
            Self::ShipSeaweed => "ship_seaweed",
            Self::Barnacle => "barnacle",
            Self::Chest => "chest",
            Self::ChestPart => "chest_part",
            Self::ChestLid => "chest_lid",
            Self::ChestGlow => "chest_glow",
            Self::Treasure => "treasure",
            Self::SandPatch => "sand_patch",
            Self::LightRay => "light_ray",
            Self::Bubble => "bubble",
            Self::Dust => "dust",
            Self::Fog => "fog",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.name() == name)
    }

    pub const ALL: [ActorKind; 29] = [
        Self::Floor,
        Self::Rock,
        Self::Seaweed,
        Self::SeaweedStrand,
        Self::Reef,
        Self::BrainCoral,
        Self::FanCoral,
        Self::TubeCoral,
        Self::BranchCoral,
        Self::CoralPart,
        Self::Anemone,
        Self::Tentacle,
        Self::School,
        Self::Fish,
        Self::FishTail,
        Self::Ship,
        Self::ShipPart,
        Self::ShipSeaweed,
        Self::Barnacle,
        Self::Chest,
        Self::ChestPart,
        Self::ChestLid,
        Self::ChestGlow,
        Self::Treasure,
        Self::SandPatch,
        Self::LightRay,
        Self::Bubble,
        Self::Dust,
        Self::Fog,
    ];
}

impl fmt::Display for ActorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

/// What produces an actor's local transform each frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Drive {
    Motion(MotionParams),
    /// Tail of the fish swimming this orbit.
    FishTail(OrbitParams),
    /// Lid hinge of the given chest.
    ChestLid(EntityId),
}

impl Drive {
    pub fn fixed(local: Transform) -> Self {
        Self::Motion(MotionParams::Static(local))
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Motion(m) => m.family(),
            Self::FishTail(_) => "fish_tail",
            Self::ChestLid(_) => "chest_lid",
        }
    }
}

/// A pulsing emissive level: `base + sin(frequency * t) * amplitude`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Glow {
    pub base: f32,
    pub amplitude: f32,
    pub frequency: f32,
}

/// Per-entity record stored in the aquarium.
#[derive(Debug, Clone)]
pub struct Actor {
    pub kind: ActorKind,
    pub drive: Drive,
    pub parent: Option<EntityId>,
    pub mesh: Option<MeshHandle>,
    pub glow: Option<Glow>,
}

/// The authoritative scene state.
///
/// Entities are records in a `BTreeMap` for deterministic iteration; their
/// transforms live in an explicit [`SceneGraph`]. Given the same seed and the
/// same sequence of `advance`/`handle` calls, two aquariums produce identical
/// state hashes.
#[derive(Debug, Clone, Default)]
pub struct Aquarium {
    seed: u64,
    elapsed: f32,
    frame: u64,
    next_index: u64,
    actors: BTreeMap<EntityId, Actor>,
    graph: SceneGraph,
    chests: BTreeMap<EntityId, Chest>,
    meshes: BTreeMap<MeshHandle, MeshData>,
    treasure_meshes: BTreeMap<TreasureKind, MeshHandle>,
    /// Append-only event log.
    event_log: Vec<SceneEvent>,
}

impl Aquarium {
    /// Empty aquarium. Entity ids are derived from `seed`.
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            ..Default::default()
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Seconds passed to the last `advance`.
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Number of `advance` calls so far.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn actor_count(&self) -> usize {
        self.actors.len()
    }

    pub fn actors(&self) -> &BTreeMap<EntityId, Actor> {
        &self.actors
    }

    pub fn actor(&self, id: EntityId) -> Option<&Actor> {
        self.actors.get(&id)
    }

    pub fn chests(&self) -> &BTreeMap<EntityId, Chest> {
        &self.chests
    }

    pub fn chest(&self, id: EntityId) -> Option<&Chest> {
        self.chests.get(&id)
    }

    pub fn meshes(&self) -> &BTreeMap<MeshHandle, MeshData> {
        &self.meshes
    }

    pub fn mesh(&self, handle: MeshHandle) -> Option<&MeshData> {
        self.meshes.get(&handle)
    }

    pub fn graph(&self) -> &SceneGraph {
        &self.graph
    }

    pub fn events(&self) -> &[SceneEvent] {
        &self.event_log
    }

    pub fn drain_events(&mut self) -> Vec<SceneEvent> {
        std::mem::take(&mut self.event_log)
    }

    pub fn opened_count(&self) -> usize {
        self.chests.values().filter(|c| c.is_open()).count()
    }

    pub fn chest_count(&self) -> usize {
        self.chests.len()
    }

    /// Add a generated mesh to the mesh table.
    pub fn add_mesh(&mut self, mesh: MeshData) -> MeshHandle {
        let handle = MeshHandle(self.meshes.len() as u64);
        self.event_log.push(SceneEvent::MeshRegistered {
            handle,
            vertices: mesh.vertex_count(),
        });
        self.meshes.insert(handle, mesh);
        handle
    }

    /// Mesh used for treasure items of `kind` when a chest opens.
    pub fn set_treasure_mesh(&mut self, kind: TreasureKind, handle: MeshHandle) {
        self.treasure_meshes.insert(kind, handle);
    }

    /// Add an entity. Its local transform is the drive evaluated at the
    /// current elapsed time.
    pub fn spawn(
        &mut self,
        kind: ActorKind,
        parent: Option<EntityId>,
        drive: Drive,
        mesh: Option<MeshHandle>,
    ) -> Result<EntityId, GraphError> {
        let id = EntityId::from_parts(self.seed, self.next_index);
        let local = evaluate_drive(&drive, self.elapsed, &self.chests);
        self.graph.insert(id, parent, local)?;
        self.next_index += 1;
        self.actors.insert(
            id,
            Actor {
                kind,
                drive,
                parent,
                mesh,
                glow: None,
            },
        );
        Ok(id)
    }

    pub fn set_glow(&mut self, id: EntityId, glow: Glow) -> bool {
        match self.actors.get_mut(&id) {
            Some(actor) => {
                actor.glow = Some(glow);
                true
            }
            None => false,
        }
    }

    /// Register `id` (already spawned) as a chest.
    pub fn add_chest(&mut self, id: EntityId, chest: Chest) {
        self.chests.insert(id, chest);
    }

    /// Advance the scene to `elapsed` seconds since start.
    ///
    /// Every actor is evaluated independently, every chest lid eases one
    /// step, then world transforms are recomputed parents first.
    pub fn advance(&mut self, elapsed: f32) {
        let _span = tracing::info_span!("advance", frame = self.frame + 1).entered();
        if !elapsed.is_finite() {
            tracing::warn!(elapsed, "non-finite elapsed time, using 0");
        }
        let t = sanitize_elapsed(elapsed);
        self.elapsed = t;
        self.frame += 1;

        for chest in self.chests.values_mut() {
            chest.step();
        }
        for (id, actor) in &self.actors {
            let local = evaluate_drive(&actor.drive, t, &self.chests);
            self.graph.set_local(*id, local);
        }
        self.graph.propagate();

        self.event_log.push(SceneEvent::Advanced {
            frame: self.frame,
            elapsed: t,
        });
    }

    /// The chest `id` belongs to: itself, or the nearest chest ancestor.
    pub fn owning_chest(&self, id: EntityId) -> Option<EntityId> {
        let mut current = Some(id);
        while let Some(node) = current {
            if self.chests.contains_key(&node) {
                return Some(node);
            }
            current = self.graph.parent(node);
        }
        None
    }

    /// Apply an input action. Returns whether scene state changed.
    ///
    /// Clicks on anything but a chest (or a part of one) are ignored, as
    /// are clicks on chests that are already open.
    pub fn handle(&mut self, action: &Action) -> bool {
        match *action {
            Action::Click(id) => self.open_chest(id),
            Action::HoverEnter(id) => self.set_hover(id, true),
            Action::HoverLeave(id) => self.set_hover(id, false),
            Action::Noop => false,
        }
    }

    /// Apply the actions of one pointer event.
    ///
    /// A leave immediately followed by an enter on the same chest (the
    /// pointer crossing from one part to another) is dropped, so the chest
    /// stays hovered without a pair of hover events.
    pub fn handle_all(&mut self, actions: &[Action]) -> bool {
        let mut changed = false;
        let mut rest = actions;
        while let Some((action, tail)) = rest.split_first() {
            if let (Action::HoverLeave(from), Some(Action::HoverEnter(to))) = (action, tail.first())
            {
                let chest = self.owning_chest(*from);
                if chest.is_some() && chest == self.owning_chest(*to) {
                    rest = &tail[1..];
                    continue;
                }
            }
            changed |= self.handle(action);
            rest = tail;
        }
        changed
    }

    fn open_chest(&mut self, target: EntityId) -> bool {
        let Some(chest_id) = self.owning_chest(target) else {
            return false;
        };
        let Some(chest) = self.chests.get_mut(&chest_id) else {
            return false;
        };
        let Some(opened) = chest.click() else {
            tracing::debug!(chest = %chest_id.short(), "chest already open");
            return false;
        };
        let items = chest.treasure().map(<[_]>::to_vec).unwrap_or_default();

        for item in &items {
            let mesh = self.treasure_meshes.get(&item.kind).copied();
            let spawned = self.spawn(
                ActorKind::Treasure,
                Some(chest_id),
                Drive::fixed(item.local),
                mesh,
            );
            if let Err(err) = spawned {
                tracing::warn!(%err, "could not place treasure");
            }
        }
        self.graph.propagate();

        let opened_count = self.opened_count();
        let total = self.chest_count();
        tracing::info!(
            chest = %chest_id.short(),
            items = opened.items,
            opened = opened_count,
            total,
            "chest opened"
        );
        self.event_log.push(SceneEvent::ChestOpened {
            chest: chest_id,
            opened: opened_count,
            total,
        });
        true
    }

    fn set_hover(&mut self, target: EntityId, hovered: bool) -> bool {
        let Some(chest_id) = self.owning_chest(target) else {
            return false;
        };
        let changed = self
            .chests
            .get_mut(&chest_id)
            .is_some_and(|c| c.set_hovered(hovered));
        if changed {
            self.event_log.push(SceneEvent::HoverChanged {
                chest: chest_id,
                hovered,
            });
        }
        changed
    }

    pub fn world_transform(&self, id: EntityId) -> Option<Transform> {
        self.graph.world(id)
    }

    pub fn local_transform(&self, id: EntityId) -> Option<Transform> {
        self.graph.local(id)
    }

    /// Emissive level at the current time, for actors that glow.
    ///
    /// [`ActorKind::ChestGlow`] parts follow their chest, hover boost
    /// included.
    pub fn glow(&self, id: EntityId) -> Option<f32> {
        let actor = self.actors.get(&id)?;
        if actor.kind == ActorKind::ChestGlow {
            let chest = self.chests.get(&self.owning_chest(id)?)?;
            return Some(chest.glow(self.elapsed));
        }
        let glow = actor.glow?;
        Some(pulse(glow.base, glow.amplitude, glow.frequency, self.elapsed))
    }

    /// Compute a deterministic hash of the scene state for comparison.
    /// Uses canonical (BTreeMap) iteration order.
    pub fn state_hash(&self) -> u64 {
        let mut h: u64 = 0xcbf2_9ce4_8422_2325; // FNV offset basis
        let mix = |h: &mut u64, bytes: &[u8]| {
            for &b in bytes {
                *h ^= b as u64;
                *h = h.wrapping_mul(0x0100_0000_01b3);
            }
        };
        mix(&mut h, &self.seed.to_le_bytes());
        mix(&mut h, &self.frame.to_le_bytes());
        mix(&mut h, &self.elapsed.to_le_bytes());
        for (id, t) in self.graph.world_transforms() {
            mix(&mut h, id.0.as_bytes());
            for v in t.position.to_array() {
                mix(&mut h, &v.to_le_bytes());
            }
            for v in t.rotation.to_array() {
                mix(&mut h, &v.to_le_bytes());
            }
            for v in t.scale.to_array() {
                mix(&mut h, &v.to_le_bytes());
            }
        }
        for (id, chest) in &self.chests {
            mix(&mut h, id.0.as_bytes());
            mix(&mut h, &[chest.is_open() as u8, chest.hovered() as u8]);
            mix(&mut h, &chest.lid_angle().to_le_bytes());
        }
        h
    }
}

fn evaluate_drive(drive: &Drive, elapsed: f32, chests: &BTreeMap<EntityId, Chest>) -> Transform {
    match drive {
        Drive::Motion(motion) => motion.evaluate(elapsed),
        Drive::FishTail(orbit) => orbit.pose(elapsed).tail,
        Drive::ChestLid(chest) => chests
            .get(chest)
            .map(Chest::lid_transform)
            .unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TreasureConfig;
    use glam::Vec3;
    use reefscape_input::{PointerEvent, PointerMapper};
    use reefscape_motion::{BobParams, DEFAULT_DAMPING_FACTOR};

    fn counts() -> TreasureConfig {
        TreasureConfig {
            coins: 2,
            gems: 1,
            pearls: 1,
            sparkles: 1,
        }
    }

    fn with_chest(seed: u64) -> (Aquarium, EntityId, EntityId) {
        let mut aq = Aquarium::new(seed);
        let base = Transform::from_translation(Vec3::new(-6.0, 0.3, 0.0));
        let chest = aq
            .spawn(
                ActorKind::Chest,
                None,
                Drive::Motion(MotionParams::Bob(BobParams::chest(base))),
                None,
            )
            .unwrap();
        aq.add_chest(
            chest,
            Chest::new(seed, DEFAULT_DAMPING_FACTOR, counts()).unwrap(),
        );
        let lid = aq
            .spawn(ActorKind::ChestLid, Some(chest), Drive::ChestLid(chest), None)
            .unwrap();
        (aq, chest, lid)
    }

    #[test]
    fn starts_empty() {
        let aq = Aquarium::new(0);
        assert_eq!(aq.actor_count(), 0);
        assert_eq!(aq.frame(), 0);
        assert_eq!(aq.opened_count(), 0);
    }

    #[test]
    fn spawn_under_unknown_parent_fails() {
        let mut aq = Aquarium::new(0);
        let err = aq.spawn(
            ActorKind::Rock,
            Some(EntityId::new()),
            Drive::fixed(Transform::default()),
            None,
        );
        assert!(matches!(err, Err(GraphError::UnknownParent(_))));
        assert_eq!(aq.actor_count(), 0);
    }

    #[test]
    fn click_on_lid_opens_owning_chest() {
        let (mut aq, chest, lid) = with_chest(1);
        assert!(aq.handle(&Action::Click(lid)));
        assert!(aq.chest(chest).unwrap().is_open());
        assert_eq!(aq.opened_count(), 1);
        // Treasure items were spawned under the chest.
        assert_eq!(aq.graph().children(chest).len(), 1 + 5);
    }

    #[test]
    fn second_click_is_noop() {
        let (mut aq, chest, _) = with_chest(1);
        assert!(aq.handle(&Action::Click(chest)));
        let actors = aq.actor_count();
        let events = aq.events().len();
        assert!(!aq.handle(&Action::Click(chest)));
        assert_eq!(aq.actor_count(), actors);
        assert_eq!(aq.events().len(), events);
    }

    #[test]
    fn click_on_non_chest_ignored() {
        let (mut aq, _, _) = with_chest(1);
        let rock = aq
            .spawn(ActorKind::Rock, None, Drive::fixed(Transform::default()), None)
            .unwrap();
        assert!(!aq.handle(&Action::Click(rock)));
        assert!(!aq.handle(&Action::Click(EntityId::new())));
        assert!(!aq.handle(&Action::Noop));
        assert_eq!(aq.opened_count(), 0);
    }

    #[test]
    fn lid_follows_chest_after_advance() {
        let (mut aq, chest, lid) = with_chest(1);
        aq.handle(&Action::Click(chest));
        for frame in 1..=60 {
            aq.advance(frame as f32 / 60.0);
        }
        let angle = aq.chest(chest).unwrap().lid_angle();
        assert!(angle < -1.5, "angle={angle}");
        let world = aq.world_transform(lid).unwrap();
        let parent = aq.world_transform(chest).unwrap();
        let expected = parent.mul_transform(&aq.local_transform(lid).unwrap());
        assert!((world.position - expected.position).length() < 1e-5);
    }

    #[test]
    fn hover_events_only_on_change() {
        let (mut aq, chest, lid) = with_chest(1);
        aq.drain_events();
        assert!(aq.handle(&Action::HoverEnter(lid)));
        assert!(!aq.handle(&Action::HoverEnter(chest)));
        assert!(aq.handle(&Action::HoverLeave(chest)));
        assert_eq!(
            aq.drain_events(),
            vec![
                SceneEvent::HoverChanged {
                    chest,
                    hovered: true
                },
                SceneEvent::HoverChanged {
                    chest,
                    hovered: false
                },
            ]
        );
    }

    #[test]
    fn chest_glow_parts_follow_hover() {
        let (mut aq, chest, lid) = with_chest(1);
        let lock = aq
            .spawn(ActorKind::ChestGlow, Some(chest), Drive::fixed(Transform::default()), None)
            .unwrap();
        aq.advance(1.0);
        assert_eq!(aq.glow(chest), None);
        assert_eq!(aq.glow(lid), None);
        let idle = aq.glow(lock).unwrap();
        assert!((idle - pulse(0.3, 0.15, 2.0, 1.0)).abs() < 1e-6);
        aq.handle(&Action::HoverEnter(lid));
        assert!((aq.glow(lock).unwrap() - idle - 0.3).abs() < 1e-6);
    }

    #[test]
    fn crossing_parts_of_one_chest_keeps_hover_quiet() {
        let (mut aq, chest, lid) = with_chest(1);
        let body = aq
            .spawn(ActorKind::ChestPart, Some(chest), Drive::fixed(Transform::default()), None)
            .unwrap();
        let mut pointer = PointerMapper::new();
        assert!(aq.handle_all(&pointer.map(PointerEvent::moved(Some(lid)))));
        aq.drain_events();

        let crossing = pointer.map(PointerEvent::moved(Some(body)));
        assert_eq!(crossing, vec![Action::HoverLeave(lid), Action::HoverEnter(body)]);
        assert!(!aq.handle_all(&crossing));
        assert!(aq.events().is_empty());
        assert!(aq.chest(chest).unwrap().hovered());

        assert!(aq.handle_all(&pointer.map(PointerEvent::moved(None))));
        assert_eq!(
            aq.drain_events(),
            vec![SceneEvent::HoverChanged {
                chest,
                hovered: false
            }]
        );
    }

    #[test]
    fn moving_between_chests_leaves_then_enters() {
        let (mut aq, first, _) = with_chest(1);
        let second = aq
            .spawn(ActorKind::Chest, None, Drive::fixed(Transform::default()), None)
            .unwrap();
        aq.add_chest(
            second,
            Chest::new(2, DEFAULT_DAMPING_FACTOR, counts()).unwrap(),
        );
        aq.handle(&Action::HoverEnter(first));
        aq.drain_events();
        assert!(aq.handle_all(&[Action::HoverLeave(first), Action::HoverEnter(second)]));
        assert_eq!(aq.drain_events().len(), 2);
        assert!(!aq.chest(first).unwrap().hovered());
        assert!(aq.chest(second).unwrap().hovered());
    }

    #[test]
    fn advance_logs_and_sanitizes() {
        let (mut aq, _, _) = with_chest(1);
        aq.drain_events();
        aq.advance(f32::NAN);
        assert_eq!(aq.elapsed(), 0.0);
        assert_eq!(
            aq.events(),
            &[SceneEvent::Advanced {
                frame: 1,
                elapsed: 0.0
            }]
        );
    }

    #[test]
    fn state_hash_deterministic() {
        let (mut a, ca, _) = with_chest(42);
        let (mut b, cb, _) = with_chest(42);
        assert_eq!(ca, cb);
        for frame in 0..30 {
            let t = frame as f32 * 0.1;
            a.advance(t);
            b.advance(t);
        }
        a.handle(&Action::Click(ca));
        b.handle(&Action::Click(cb));
        a.advance(3.1);
        b.advance(3.1);
        assert_eq!(a.state_hash(), b.state_hash());

        let (c, _, _) = with_chest(43);
        assert_ne!(a.state_hash(), c.state_hash());
    }

    #[test]
    fn mesh_registration_is_logged() {
        let mut aq = Aquarium::new(0);
        let handle = aq.add_mesh(reefscape_mesh::generate_sphere(1.0, 8, 6));
        assert_eq!(handle, MeshHandle(0));
        assert!(matches!(
            aq.events(),
            [SceneEvent::MeshRegistered { vertices: 56, .. }]
        ));
        assert!(aq.mesh(handle).is_some());
    }

    #[test]
    fn actor_kind_names_round_trip() {
        for kind in ActorKind::ALL {
            assert_eq!(ActorKind::from_name(kind.name()), Some(kind));
        }
        assert_eq!(ActorKind::from_name("kraken"), None);
    }
}
