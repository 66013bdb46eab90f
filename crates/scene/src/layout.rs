//! Fixed part layouts for composite props and scene dressing. Random offsets
//! come from the caller's seeded stream.

use crate::config::{LightRayConfig, MAX_TREASURE_ITEMS, TreasureConfig};
use glam::Vec3;
use reefscape_common::{SceneRng, Transform, sample_range};
use reefscape_mesh::BaseShape;
use std::f32::consts::{FRAC_PI_2, FRAC_PI_4, PI, TAU};

/// One child mesh of a composite prop, relative to the prop's origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PartLayout {
    pub local: Transform,
    pub shape: BaseShape,
    /// Sway phase for parts that move on their own.
    pub phase: f32,
}

impl PartLayout {
    fn fixed(local: Transform, shape: BaseShape) -> Self {
        Self {
            local,
            shape,
            phase: 0.0,
        }
    }
}

fn capsule(radius: f32, height: f32) -> BaseShape {
    BaseShape::Capsule {
        radius,
        height,
        segments: 8,
        rings: 4,
    }
}

fn centered(rng: &mut SceneRng, extent: f32) -> f32 {
    sample_range(rng, -extent * 0.5, extent * 0.5)
}

/// Three overlapping strands of one seaweed clump of the given height.
pub fn seaweed_strands(rng: &mut SceneRng, height: f32) -> Vec<PartLayout> {
    (0..3)
        .map(|i| {
            let i = i as f32;
            let position = Vec3::new(
                centered(rng, 0.3),
                height * 0.5 * (0.8 + i * 0.1),
                centered(rng, 0.3),
            );
            PartLayout::fixed(
                Transform::from_translation(position),
                capsule(0.05, height * (1.0 - i * 0.2)),
            )
        })
        .collect()
}

pub const BRAIN_CORAL_OFFSET: Vec3 = Vec3::new(0.0, 0.5, 0.0);

/// Fan coral placements within a reef: (position, yaw, scale).
pub const FAN_CORALS: [(Vec3, f32, f32); 2] = [
    (Vec3::new(1.5, 0.0, 0.5), 0.5, 1.0),
    (Vec3::new(-1.0, 0.0, -0.5), -0.3, 0.8),
];
pub const TUBE_CORALS: [Vec3; 2] = [Vec3::new(0.5, 0.0, -1.0), Vec3::new(-0.5, 0.0, 1.0)];
/// Branch coral placements within a reef: (position, scale).
pub const BRANCH_CORALS: [(Vec3, f32); 2] = [
    (Vec3::new(-1.5, 0.0, 0.0), 1.0),
    (Vec3::new(1.0, 0.0, -1.5), 0.7),
];
pub const ANEMONES: [Vec3; 2] = [Vec3::new(0.3, 0.2, 0.8), Vec3::new(-0.8, 0.1, 0.3)];

/// Stem plus eight stacked blades that narrow toward the top.
pub fn fan_coral() -> Vec<PartLayout> {
    let mut parts = Vec::with_capacity(9);
    for i in 0..8 {
        let i = i as f32;
        let local = Transform::from_euler(
            Vec3::new(0.0, 0.8 + i * 0.15, 0.0),
            // Stand the XZ plane upright, then fan out around Z.
            Vec3::new(FRAC_PI_2, 0.0, (i - 3.5) * 0.08),
            Vec3::ONE,
        );
        let blade = BaseShape::Plane {
            size_x: 0.3 - i * 0.02,
            size_z: 0.2,
            subdivisions_x: 1,
            subdivisions_z: 1,
        };
        parts.push(PartLayout::fixed(local, blade));
    }
    parts.push(PartLayout::fixed(
        Transform::from_translation(Vec3::new(0.0, 0.3, 0.0)),
        BaseShape::Cylinder {
            radius_top: 0.05,
            radius_bottom: 0.08,
            height: 0.6,
            segments: 8,
        },
    ));
    parts
}

/// Five upright tubes of random height, slightly wider at the base.
pub fn tube_coral(rng: &mut SceneRng) -> Vec<PartLayout> {
    (0..5)
        .map(|_| {
            let x = centered(rng, 0.4);
            let z = centered(rng, 0.4);
            let height = sample_range(rng, 0.5, 1.3);
            let radius = sample_range(rng, 0.08, 0.14);
            PartLayout::fixed(
                Transform::from_translation(Vec3::new(x, height * 0.5, z)),
                BaseShape::Cylinder {
                    radius_top: radius,
                    radius_bottom: radius * 1.2,
                    height,
                    segments: 12,
                },
            )
        })
        .collect()
}

/// Trunk, four primary branches around it and six shorter secondaries.
pub fn branch_coral(rng: &mut SceneRng) -> Vec<PartLayout> {
    let mut parts = Vec::with_capacity(11);
    parts.push(PartLayout::fixed(
        Transform::from_translation(Vec3::new(0.0, 0.4, 0.0)),
        capsule(0.04, 0.8),
    ));

    for i in 0..4 {
        let angle = i as f32 / 4.0 * TAU + sample_range(rng, 0.0, 0.3);
        let y = sample_range(rng, 0.6, 0.8);
        let tilt = Vec3::new(
            sample_range(rng, -0.15, 0.15),
            angle,
            sample_range(rng, 0.3, 0.5),
        );
        let height = sample_range(rng, 0.4, 0.7);
        let position = Vec3::new(angle.cos() * 0.15, y, angle.sin() * 0.15);
        parts.push(PartLayout::fixed(
            Transform::from_euler(position, tilt, Vec3::ONE),
            capsule(0.04, height),
        ));
    }

    for _ in 0..6 {
        let angle = sample_range(rng, 0.0, TAU);
        let y = sample_range(rng, 0.8, 1.1);
        let tilt = Vec3::new(
            sample_range(rng, -0.2, 0.2),
            angle,
            sample_range(rng, 0.4, 0.7),
        );
        let height = sample_range(rng, 0.2, 0.4);
        let position = Vec3::new(angle.cos() * 0.25, y, angle.sin() * 0.25);
        parts.push(PartLayout::fixed(
            Transform::from_euler(position, tilt, Vec3::ONE),
            capsule(0.04, height),
        ));
    }
    parts
}

/// Anemone base disc.
pub fn anemone_base() -> PartLayout {
    PartLayout::fixed(
        Transform::from_translation(Vec3::new(0.0, 0.08, 0.0)),
        BaseShape::Cylinder {
            radius_top: 0.15,
            radius_bottom: 0.2,
            height: 0.15,
            segments: 12,
        },
    )
}

/// Twelve tentacles in a ring, each with its own sway phase.
pub fn anemone_tentacles(rng: &mut SceneRng) -> Vec<PartLayout> {
    (0..12)
        .map(|i| {
            let angle = i as f32 / 12.0 * TAU;
            let position = Vec3::new(angle.cos() * 0.1, 0.25, angle.sin() * 0.1);
            PartLayout {
                local: Transform::from_euler(position, Vec3::new(0.3, angle, 0.0), Vec3::ONE),
                shape: capsule(0.02, 0.2),
                phase: sample_range(rng, 0.0, TAU),
            }
        })
        .collect()
}

/// Hull, mast and yard of the wreck, relative to the ship origin.
pub fn ship_hull() -> Vec<PartLayout> {
    vec![
        PartLayout::fixed(
            Transform::from_translation(Vec3::new(0.0, 1.0, 0.0)),
            BaseShape::Cuboid {
                size: Vec3::new(3.0, 2.0, 8.0),
            },
        ),
        PartLayout::fixed(
            Transform::from_translation(Vec3::new(0.0, 2.0, -4.0)),
            BaseShape::Cuboid {
                size: Vec3::new(3.2, 3.0, 1.0),
            },
        ),
        PartLayout::fixed(
            Transform::from_translation(Vec3::new(0.0, 4.0, 0.0)),
            BaseShape::Cylinder {
                radius_top: 0.15,
                radius_bottom: 0.2,
                height: 5.0,
                segments: 8,
            },
        ),
        PartLayout::fixed(
            Transform::from_euler(
                Vec3::new(0.0, 5.0, 0.0),
                Vec3::new(0.0, 0.0, FRAC_PI_2),
                Vec3::ONE,
            ),
            BaseShape::Cylinder {
                radius_top: 0.08,
                radius_bottom: 0.1,
                height: 3.0,
                segments: 8,
            },
        ),
    ]
}

fn cuboid(x: f32, y: f32, z: f32) -> BaseShape {
    BaseShape::Cuboid {
        size: Vec3::new(x, y, z),
    }
}

fn rod(radius: f32, height: f32, segments: u32) -> BaseShape {
    BaseShape::Cylinder {
        radius_top: radius,
        radius_bottom: radius,
        height,
        segments,
    }
}

fn at(x: f32, y: f32, z: f32) -> Transform {
    Transform::from_translation(Vec3::new(x, y, z))
}

fn turned(position: Vec3, euler: Vec3) -> Transform {
    Transform::from_euler(position, euler, Vec3::ONE)
}

/// Re-root parts laid out in a sub-assembly frame into the prop frame.
fn grouped(frame: Transform, parts: Vec<PartLayout>) -> Vec<PartLayout> {
    parts
        .into_iter()
        .map(|part| PartLayout {
            local: frame.mul_transform(&part.local),
            ..part
        })
        .collect()
}

/// Bow, cabin, windows, fallen foremast and the torn sail.
pub fn ship_superstructure() -> Vec<PartLayout> {
    vec![
        PartLayout::fixed(
            turned(Vec3::new(0.0, 1.2, 4.5), Vec3::new(FRAC_PI_4, 0.0, 0.0)),
            cuboid(2.0, 0.5, 2.0),
        ),
        PartLayout::fixed(at(0.0, 3.0, -3.0), cuboid(2.5, 1.5, 2.0)),
        PartLayout::fixed(
            Transform::from_euler(
                Vec3::new(0.0, 4.0, -3.0),
                Vec3::new(0.0, 0.0, FRAC_PI_4),
                Vec3::new(1.0, 0.3, 1.0),
            ),
            cuboid(2.0, 2.0, 2.5),
        ),
        PartLayout::fixed(at(-0.8, 2.8, -3.5), cuboid(0.4, 0.4, 0.1)),
        PartLayout::fixed(at(0.8, 2.8, -3.5), cuboid(0.4, 0.4, 0.1)),
        PartLayout::fixed(
            turned(Vec3::new(1.0, 2.5, 2.0), Vec3::new(0.5, 0.2, 0.8)),
            BaseShape::Cylinder {
                radius_top: 0.1,
                radius_bottom: 0.15,
                height: 4.0,
                segments: 8,
            },
        ),
        PartLayout::fixed(
            // Stand the XZ plane upright.
            turned(Vec3::new(0.0, 4.5, 0.5), Vec3::new(0.3 + FRAC_PI_2, 0.0, 0.1)),
            BaseShape::Plane {
                size_x: 2.0,
                size_z: 2.0,
                subdivisions_x: 1,
                subdivisions_z: 1,
            },
        ),
    ]
}

/// Six rail posts down each side of the deck.
pub fn ship_rails() -> Vec<PartLayout> {
    [1.4, -1.4]
        .into_iter()
        .flat_map(|x| {
            (0..6).map(move |i| {
                PartLayout::fixed(at(x, 2.2, -2.0 + i as f32 * 1.2), rod(0.05, 0.8, 6))
            })
        })
        .collect()
}

/// Ring, shank and one fluke, hanging off the bow.
pub fn ship_anchor() -> Vec<PartLayout> {
    let frame = turned(Vec3::new(1.6, 0.5, 3.0), Vec3::new(0.2, 0.5, 0.3));
    grouped(
        frame,
        vec![
            PartLayout::fixed(
                turned(Vec3::ZERO, Vec3::new(FRAC_PI_2, 0.0, 0.0)),
                BaseShape::Torus {
                    radius: 0.3,
                    tube: 0.05,
                    ring_segments: 16,
                    tube_segments: 8,
                },
            ),
            PartLayout::fixed(at(0.0, -0.5, 0.0), rod(0.04, 0.8, 8)),
            PartLayout::fixed(
                turned(Vec3::new(0.0, -0.9, 0.0), Vec3::new(0.0, 0.0, 0.5)),
                rod(0.03, 0.4, 8),
            ),
        ],
    )
}

/// Broken wheel lying on the deck: rim and eight spokes.
pub fn ship_wheel() -> Vec<PartLayout> {
    let frame = turned(Vec3::new(0.0, 2.3, -1.5), Vec3::new(FRAC_PI_2 - 0.3, 0.0, 0.2));
    let mut parts = vec![PartLayout::fixed(
        turned(Vec3::ZERO, Vec3::new(FRAC_PI_2, 0.0, 0.0)),
        BaseShape::Torus {
            radius: 0.4,
            tube: 0.04,
            ring_segments: 24,
            tube_segments: 8,
        },
    )];
    for i in 0..8 {
        let angle = i as f32 / 8.0 * TAU;
        parts.push(PartLayout::fixed(
            turned(Vec3::ZERO, Vec3::new(0.0, 0.0, angle)),
            cuboid(0.03, 0.5, 0.03),
        ));
    }
    grouped(frame, parts)
}

/// Cannon barrel pointing over the starboard rail.
pub fn ship_cannon() -> PartLayout {
    PartLayout::fixed(
        turned(Vec3::new(1.5, 1.5, 0.0), Vec3::new(0.0, FRAC_PI_2, 0.0)),
        BaseShape::Cylinder {
            radius_top: 0.15,
            radius_bottom: 0.2,
            height: 1.0,
            segments: 12,
        },
    )
}

/// Coins spilling out of a hole in the port side.
pub fn spilled_coins(rng: &mut SceneRng, count: u32) -> Vec<PartLayout> {
    let coins = (0..count)
        .map(|_| {
            let position = Vec3::new(
                sample_range(rng, -0.7, -0.2),
                sample_range(rng, 0.0, 0.3),
                sample_range(rng, 0.0, 0.5),
            );
            let euler = Vec3::new(
                sample_range(rng, 0.0, 1.0),
                sample_range(rng, 0.0, 1.0),
                sample_range(rng, 0.0, 1.0),
            );
            PartLayout::fixed(turned(position, euler), rod(0.08, 0.03, 12))
        })
        .collect();
    grouped(at(-1.2, 0.8, 1.0), coins)
}

/// Barnacles stuck to either side of the hull.
pub fn barnacles(rng: &mut SceneRng, count: u32) -> Vec<PartLayout> {
    (0..count)
        .map(|_| {
            let side = centered(rng, 3.0);
            let y = sample_range(rng, 0.5, 2.0);
            let z = centered(rng, 7.0);
            let radius = sample_range(rng, 0.1, 0.25);
            let x = if side > 0.0 { 1.5 } else { -1.5 };
            PartLayout::fixed(
                Transform::from_translation(Vec3::new(x, y, z)),
                BaseShape::Sphere {
                    radius,
                    segments: 8,
                    rings: 8,
                },
            )
        })
        .collect()
}

/// Seaweed strands growing from the deck.
pub fn ship_seaweed(rng: &mut SceneRng, count: u32) -> Vec<PartLayout> {
    (0..count)
        .map(|_| {
            let position = Vec3::new(
                centered(rng, 2.5),
                sample_range(rng, 2.5, 3.5),
                centered(rng, 6.0),
            );
            let height = sample_range(rng, 0.8, 1.3);
            PartLayout::fixed(Transform::from_translation(position), capsule(0.03, height))
        })
        .collect()
}

/// Chest body and the lid, which hinges at [`LID_HINGE`].
pub fn chest_body() -> PartLayout {
    PartLayout::fixed(
        Transform::from_translation(Vec3::new(0.0, 0.3, 0.0)),
        BaseShape::Cuboid {
            size: Vec3::new(1.2, 0.6, 0.8),
        },
    )
}

/// Metal bands around the body and a block on each of its eight corners.
pub fn chest_trim() -> Vec<PartLayout> {
    let mut parts: Vec<PartLayout> = [-0.35, 0.0, 0.35]
        .into_iter()
        .map(|z| PartLayout::fixed(at(0.0, 0.3, z), cuboid(1.25, 0.08, 0.06)))
        .collect();
    for y in [0.1, 0.5] {
        for z in [0.35, -0.35] {
            for x in [-0.55, 0.55] {
                parts.push(PartLayout::fixed(at(x, y, z), cuboid(0.15, 0.15, 0.15)));
            }
        }
    }
    parts
}

/// Lock plate on the front of the body. Glows with the chest.
pub fn chest_lock() -> PartLayout {
    PartLayout::fixed(at(0.0, 0.4, 0.42), cuboid(0.2, 0.25, 0.08))
}

/// Pool of light on the floor under the chest. Glows with the chest.
pub fn chest_glow_disc() -> PartLayout {
    PartLayout::fixed(
        at(0.0, -0.1, 0.0),
        BaseShape::Disc {
            radius: 1.0,
            segments: 32,
        },
    )
}

pub const LID_HINGE: Vec3 = Vec3::new(0.0, 0.6, -0.35);

/// Lid slab relative to the hinge.
pub fn chest_lid() -> PartLayout {
    PartLayout::fixed(
        Transform::from_translation(Vec3::new(0.0, 0.2, 0.35)),
        BaseShape::Cuboid {
            size: Vec3::new(1.2, 0.15, 0.8),
        },
    )
}

/// Bands across the lid, relative to the hinge.
pub fn lid_trim() -> Vec<PartLayout> {
    [-0.35, 0.0, 0.35]
        .into_iter()
        .map(|z| PartLayout::fixed(at(0.0, 0.28, z + 0.35), cuboid(1.25, 0.08, 0.06)))
        .collect()
}

/// Flat sand patch of random size and heading, just above the floor.
pub fn sand_patch(rng: &mut SceneRng, spread: f32) -> Transform {
    let position = Vec3::new(centered(rng, spread), 0.05, centered(rng, spread));
    let radius = sample_range(rng, 1.0, 3.0);
    let heading = sample_range(rng, 0.0, PI);
    Transform::from_euler(position, Vec3::new(0.0, heading, 0.0), Vec3::splat(radius))
}

/// Unit disc the sand patches are scaled from.
pub const SAND_PATCH: BaseShape = BaseShape::Disc {
    radius: 1.0,
    segments: 16,
};

/// Cone of light from the surface, narrow end up.
pub const LIGHT_RAY: BaseShape = BaseShape::Cylinder {
    radius_top: 0.5,
    radius_bottom: 2.0,
    height: 25.0,
    segments: 8,
};

/// Placement of the `index`-th light shaft, leaning a little more each time.
pub fn light_ray(config: &LightRayConfig, index: u32) -> Transform {
    let offset = Vec3::new(
        index as f32 * config.spacing,
        0.0,
        (index % 2) as f32 * config.stagger,
    );
    turned(
        config.origin + offset,
        Vec3::new(0.0, 0.0, 0.1 + index as f32 * 0.05),
    )
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TreasureKind {
    Coin,
    Gem,
    Pearl,
    Sparkle,
}

impl TreasureKind {
    pub const ALL: [TreasureKind; 4] = [Self::Coin, Self::Gem, Self::Pearl, Self::Sparkle];

    pub fn shape(self) -> BaseShape {
        match self {
            Self::Coin => BaseShape::Cylinder {
                radius_top: 0.06,
                radius_bottom: 0.06,
                height: 0.02,
                segments: 12,
            },
            // Four segments and two rings make an octahedron.
            Self::Gem => BaseShape::Sphere {
                radius: 0.08,
                segments: 4,
                rings: 2,
            },
            Self::Pearl => BaseShape::Sphere {
                radius: 0.03,
                segments: 12,
                rings: 12,
            },
            Self::Sparkle => BaseShape::Sphere {
                radius: 0.015,
                segments: 8,
                rings: 8,
            },
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Coin => "coin",
            Self::Gem => "gem",
            Self::Pearl => "pearl",
            Self::Sparkle => "sparkle",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TreasureItem {
    pub kind: TreasureKind,
    /// Relative to the chest origin.
    pub local: Transform,
}

const TREASURE_OFFSET: Vec3 = Vec3::new(0.0, 0.35, 0.0);
const GEM_SPOTS: [Vec3; 3] = [
    Vec3::new(0.0, 0.15, 0.0),
    Vec3::new(-0.2, 0.1, 0.1),
    Vec3::new(0.15, 0.12, -0.1),
];
const NECKLACE_OFFSET: Vec3 = Vec3::new(0.25, 0.05, 0.15);

/// Coins piled at random, gems on fixed spots, a pearl necklace in a line
/// and sparkles floating above.
///
/// Yields at most [`MAX_TREASURE_ITEMS`]; kinds later in that order are cut
/// first.
pub fn treasure(rng: &mut SceneRng, counts: &TreasureConfig) -> Vec<TreasureItem> {
    let mut budget = MAX_TREASURE_ITEMS;
    let mut take = |wanted: u32| {
        let granted = wanted.min(budget);
        budget -= granted;
        granted
    };
    let counts = TreasureConfig {
        coins: take(counts.coins),
        gems: take(counts.gems),
        pearls: take(counts.pearls),
        sparkles: take(counts.sparkles),
    };
    let mut items = Vec::with_capacity(counts.total() as usize);
    let mut push = |kind, position: Vec3, euler: Vec3| {
        items.push(TreasureItem {
            kind,
            local: Transform::from_euler(TREASURE_OFFSET + position, euler, Vec3::ONE),
        });
    };

    for _ in 0..counts.coins {
        let position = Vec3::new(
            centered(rng, 0.8),
            sample_range(rng, 0.0, 0.2),
            centered(rng, 0.5),
        );
        let euler = Vec3::new(
            sample_range(rng, 0.0, PI),
            sample_range(rng, 0.0, PI),
            sample_range(rng, 0.0, PI),
        );
        push(TreasureKind::Coin, position, euler);
    }
    for i in 0..counts.gems as usize {
        // Extra gems stack on the fixed spots.
        let lift = Vec3::new(0.0, 0.05 * (i / GEM_SPOTS.len()) as f32, 0.0);
        push(TreasureKind::Gem, GEM_SPOTS[i % GEM_SPOTS.len()] + lift, Vec3::ZERO);
    }
    let middle = counts.pearls.saturating_sub(1) as f32 * 0.5;
    for i in 0..counts.pearls {
        let position = NECKLACE_OFFSET + Vec3::new((i as f32 - middle) * 0.06, 0.0, 0.0);
        push(TreasureKind::Pearl, position, Vec3::ZERO);
    }
    for _ in 0..counts.sparkles {
        let position = Vec3::new(
            centered(rng, 0.6),
            sample_range(rng, 0.2, 0.5),
            centered(rng, 0.4),
        );
        push(TreasureKind::Sparkle, position, Vec3::ZERO);
    }
    items
}

#[cfg(test)]
mod tests {
    use super::*;
    use reefscape_common::seeded_rng;

    fn stock_treasure() -> TreasureConfig {
        TreasureConfig {
            coins: 20,
            gems: 3,
            pearls: 5,
            sparkles: 8,
        }
    }

    #[test]
    fn composite_part_counts() {
        let mut rng = seeded_rng(1);
        assert_eq!(branch_coral(&mut rng).len(), 11);
        assert_eq!(tube_coral(&mut rng).len(), 5);
        assert_eq!(anemone_tentacles(&mut rng).len(), 12);
        assert_eq!(seaweed_strands(&mut rng, 2.0).len(), 3);
        assert_eq!(fan_coral().len(), 9);
        assert_eq!(barnacles(&mut rng, 12).len(), 12);
        assert_eq!(ship_seaweed(&mut rng, 5).len(), 5);
        assert_eq!(spilled_coins(&mut rng, 8).len(), 8);
        assert_eq!(ship_superstructure().len(), 7);
        assert_eq!(ship_rails().len(), 12);
        assert_eq!(ship_anchor().len(), 3);
        assert_eq!(ship_wheel().len(), 9);
        assert_eq!(chest_trim().len(), 11);
        assert_eq!(lid_trim().len(), 3);
    }

    #[test]
    fn chest_corners_sit_on_the_body_edges() {
        let corners: Vec<Vec3> = chest_trim()[3..].iter().map(|p| p.local.position).collect();
        assert_eq!(corners.len(), 8);
        for c in &corners {
            assert_eq!(c.x.abs(), 0.55);
            assert_eq!(c.z.abs(), 0.35);
        }
        assert!(corners.iter().any(|c| c.y == 0.1) && corners.iter().any(|c| c.y == 0.5));
    }

    #[test]
    fn chest_glow_parts() {
        assert!(matches!(
            chest_glow_disc().shape,
            BaseShape::Disc { radius, .. } if radius == 1.0
        ));
        assert!(chest_glow_disc().local.position.y < 0.0);
        // Lock sits just proud of the front face (body depth 0.8).
        assert!(chest_lock().local.position.z > 0.4);
    }

    #[test]
    fn wheel_parts_share_its_hub() {
        let wheel = ship_wheel();
        for part in &wheel {
            assert!((part.local.position - Vec3::new(0.0, 2.3, -1.5)).length() < 1e-6);
        }
        assert!(matches!(
            wheel[0].shape,
            BaseShape::Torus { radius, .. } if radius == 0.4
        ));
    }

    #[test]
    fn anchor_shank_hangs_below_the_ring() {
        let anchor = ship_anchor();
        assert!(anchor[1].local.position.y < anchor[0].local.position.y);
        assert!(anchor[2].local.position.y < anchor[1].local.position.y);
    }

    #[test]
    fn sand_patches_lie_flat() {
        let mut rng = seeded_rng(2);
        for _ in 0..50 {
            let t = sand_patch(&mut rng, 40.0);
            assert_eq!(t.position.y, 0.05);
            assert!(t.position.x.abs() <= 20.0 && t.position.z.abs() <= 20.0);
            assert!((1.0..3.0).contains(&t.scale.x));
            // Heading only, so the disc keeps facing up.
            assert!((t.rotation * Vec3::Y - Vec3::Y).length() < 1e-5);
        }
    }

    #[test]
    fn light_rays_alternate_and_lean() {
        let config = LightRayConfig {
            count: 5,
            origin: Vec3::new(-15.0, 12.0, -5.0),
            spacing: 8.0,
            stagger: 10.0,
        };
        let first = light_ray(&config, 0);
        let second = light_ray(&config, 1);
        assert_eq!(first.position, Vec3::new(-15.0, 12.0, -5.0));
        assert_eq!(second.position, Vec3::new(-7.0, 12.0, 5.0));
        assert_eq!(light_ray(&config, 2).position.z, -5.0);
        let lean = |t: Transform| (t.rotation * Vec3::Y).angle_between(Vec3::Y);
        assert!(lean(second) > lean(first));
    }

    #[test]
    fn treasure_contents() {
        let items = treasure(&mut seeded_rng(3), &stock_treasure());
        let count = |kind| items.iter().filter(|i| i.kind == kind).count();
        assert_eq!(count(TreasureKind::Coin), 20);
        assert_eq!(count(TreasureKind::Gem), 3);
        assert_eq!(count(TreasureKind::Pearl), 5);
        assert_eq!(count(TreasureKind::Sparkle), 8);
    }

    #[test]
    fn pearl_necklace_is_centered() {
        let items = treasure(&mut seeded_rng(3), &stock_treasure());
        let xs: Vec<f32> = items
            .iter()
            .filter(|i| i.kind == TreasureKind::Pearl)
            .map(|i| i.local.position.x)
            .collect();
        assert!((xs[2] - (TREASURE_OFFSET.x + NECKLACE_OFFSET.x)).abs() < 1e-6);
        assert!((xs[1] - xs[0] - 0.06).abs() < 1e-6);
    }

    #[test]
    fn treasure_is_seeded() {
        let a = treasure(&mut seeded_rng(8), &stock_treasure());
        let b = treasure(&mut seeded_rng(8), &stock_treasure());
        let c = treasure(&mut seeded_rng(9), &stock_treasure());
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn oversized_treasure_is_capped() {
        let counts = TreasureConfig {
            coins: u32::MAX,
            gems: 1,
            pearls: 0,
            sparkles: 0,
        };
        let items = treasure(&mut seeded_rng(3), &counts);
        assert_eq!(items.len(), MAX_TREASURE_ITEMS as usize);
        assert!(items.iter().all(|i| i.kind == TreasureKind::Coin));
    }

    #[test]
    fn tubes_stand_on_the_floor() {
        for part in tube_coral(&mut seeded_rng(4)) {
            let BaseShape::Cylinder { height, .. } = part.shape else {
                panic!("tube should be a cylinder");
            };
            assert!((part.local.position.y - height * 0.5).abs() < 1e-6);
            assert!((0.5..1.3).contains(&height));
        }
    }

    #[test]
    fn barnacles_hug_the_hull() {
        for part in barnacles(&mut seeded_rng(6), 50) {
            assert_eq!(part.local.position.x.abs(), 1.5);
        }
    }
}
