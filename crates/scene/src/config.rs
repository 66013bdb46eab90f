use glam::Vec3;
use reefscape_motion::{
    DEFAULT_BUBBLE_PERIOD, DEFAULT_DAMPING_FACTOR, DEFAULT_VERTICAL_OFFSET, Oscillator,
};
use serde::{Deserialize, Serialize};
use std::f32::consts::{FRAC_PI_2, FRAC_PI_3, FRAC_PI_4};
use std::path::{Path, PathBuf};

/// Errors from loading or validating a [`SceneConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unsupported config format: {0:?} (expected .yaml, .yml or .json)")]
    UnsupportedFormat(PathBuf),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Most treasure items one chest may hold.
pub const MAX_TREASURE_ITEMS: u32 = 4096;
/// Most instances any one scattered population may spawn.
pub const MAX_INSTANCES: u32 = 65_536;
/// Most floor subdivisions per axis.
pub const MAX_FLOOR_SUBDIVISIONS: u32 = 1024;

/// Where and how large a placed object is. Rotation is about +Y only.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    pub position: Vec3,
    #[serde(default = "one")]
    pub scale: f32,
    #[serde(default)]
    pub rotation_y: f32,
}

fn one() -> f32 {
    1.0
}

impl Placement {
    pub fn at(position: Vec3) -> Self {
        Self {
            position,
            scale: 1.0,
            rotation_y: 0.0,
        }
    }

    pub fn scaled(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    pub fn rotated(mut self, rotation_y: f32) -> Self {
        self.rotation_y = rotation_y;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FloorConfig {
    pub size: f32,
    pub subdivisions: u32,
}

/// Items scattered uniformly over a `spread` x `spread` square.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScatterConfig {
    pub count: u32,
    pub spread: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SchoolConfig {
    pub center: Vec3,
    pub count: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShipConfig {
    pub position: Vec3,
    /// Resting tilt, XYZ Euler radians.
    pub rotation: Vec3,
    pub seaweed_count: u32,
    pub barnacle_count: u32,
    /// Coins spilled on the deck beside the wreck.
    pub spilled_coins: u32,
}

/// A row of light shafts from the surface. Shaft `i` hangs at
/// `origin + (i * spacing, 0, (i % 2) * stagger)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LightRayConfig {
    pub count: u32,
    pub origin: Vec3,
    pub spacing: f32,
    pub stagger: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DustConfig {
    pub count: u32,
    pub spread: f32,
    pub height: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FogConfig {
    pub origin: Vec3,
    pub radius: f32,
    pub x: Oscillator,
    pub z: Oscillator,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TreasureConfig {
    pub coins: u32,
    pub gems: u32,
    pub pearls: u32,
    pub sparkles: u32,
}

impl TreasureConfig {
    /// Items in one chest, saturating at `u32::MAX`.
    pub fn total(&self) -> u32 {
        self.coins
            .saturating_add(self.gems)
            .saturating_add(self.pearls)
            .saturating_add(self.sparkles)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MotionConfig {
    pub bubble_period: f32,
    pub bubble_vertical_offset: f32,
    pub lid_damping: f32,
    pub fish_bob_amplitude: f32,
}

/// Everything that shapes the aquarium. `Default` reproduces the stock scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub floor: FloorConfig,
    /// Flat sand patches on the floor.
    pub sand: ScatterConfig,
    pub rocks: ScatterConfig,
    pub seaweed: ScatterConfig,
    pub reefs: Vec<Placement>,
    pub schools: Vec<SchoolConfig>,
    pub ship: ShipConfig,
    pub chests: Vec<Placement>,
    pub bubbles: ScatterConfig,
    pub dust: DustConfig,
    pub fog: Vec<FogConfig>,
    pub light_rays: LightRayConfig,
    pub treasure: TreasureConfig,
    pub motion: MotionConfig,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            floor: FloorConfig {
                size: 80.0,
                subdivisions: 64,
            },
            sand: ScatterConfig {
                count: 20,
                spread: 40.0,
            },
            rocks: ScatterConfig {
                count: 15,
                spread: 30.0,
            },
            seaweed: ScatterConfig {
                count: 25,
                spread: 35.0,
            },
            reefs: vec![
                Placement::at(Vec3::new(-8.0, 0.0, -5.0)).scaled(1.2),
                Placement::at(Vec3::new(6.0, 0.0, -8.0))
                    .scaled(0.9)
                    .rotated(FRAC_PI_3),
                Placement::at(Vec3::new(-3.0, 0.0, 3.0))
                    .scaled(0.7)
                    .rotated(-FRAC_PI_4),
                Placement::at(Vec3::new(10.0, 0.0, 2.0))
                    .scaled(1.1)
                    .rotated(FRAC_PI_2),
            ],
            schools: vec![
                SchoolConfig {
                    center: Vec3::new(0.0, 4.0, 0.0),
                    count: 8,
                },
                SchoolConfig {
                    center: Vec3::new(-5.0, 6.0, -3.0),
                    count: 6,
                },
                SchoolConfig {
                    center: Vec3::new(7.0, 3.0, -5.0),
                    count: 5,
                },
                SchoolConfig {
                    center: Vec3::new(3.0, 8.0, 3.0),
                    count: 4,
                },
            ],
            ship: ShipConfig {
                position: Vec3::new(0.0, 0.5, -12.0),
                rotation: Vec3::new(0.1, 0.3, 0.15),
                seaweed_count: 5,
                barnacle_count: 12,
                spilled_coins: 8,
            },
            chests: vec![
                Placement::at(Vec3::new(-6.0, 0.3, 0.0)),
                Placement::at(Vec3::new(4.0, 0.3, -3.0)),
                Placement::at(Vec3::new(1.0, 1.5, -10.0)).scaled(0.8),
            ],
            bubbles: ScatterConfig {
                count: 60,
                spread: 40.0,
            },
            dust: DustConfig {
                count: 40,
                spread: 50.0,
                height: 20.0,
            },
            fog: vec![
                FogConfig {
                    origin: Vec3::new(0.0, 8.0, 0.0),
                    radius: 15.0,
                    x: Oscillator::sin(5.0, 0.1, 0.0),
                    z: Oscillator::cos(3.0, 0.08, 0.0),
                },
                FogConfig {
                    origin: Vec3::new(-10.0, 5.0, -10.0),
                    radius: 12.0,
                    x: Oscillator::cos(4.0, 0.07, 0.0),
                    z: Oscillator::sin(5.0, 0.12, 0.0),
                },
                FogConfig {
                    origin: Vec3::new(8.0, 10.0, 5.0),
                    radius: 10.0,
                    x: Oscillator::sin(6.0, 0.05, 2.0),
                    z: Oscillator::cos(4.0, 0.09, 1.0),
                },
            ],
            light_rays: LightRayConfig {
                count: 5,
                origin: Vec3::new(-15.0, 12.0, -5.0),
                spacing: 8.0,
                stagger: 10.0,
            },
            treasure: TreasureConfig {
                coins: 20,
                gems: 3,
                pearls: 5,
                sparkles: 8,
            },
            motion: MotionConfig {
                bubble_period: DEFAULT_BUBBLE_PERIOD,
                bubble_vertical_offset: DEFAULT_VERTICAL_OFFSET,
                lid_damping: DEFAULT_DAMPING_FACTOR,
                fish_bob_amplitude: 0.3,
            },
        }
    }
}

impl SceneConfig {
    /// Load from a `.yaml`/`.yml` or `.json` file and validate.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        let config: Self = match extension.as_deref() {
            Some("yaml" | "yml") => serde_yaml::from_str(&text)?,
            Some("json") => serde_json::from_str(&text)?,
            _ => return Err(ConfigError::UnsupportedFormat(path.to_path_buf())),
        };
        config.validate()?;
        tracing::debug!(path = %path.display(), "scene config loaded");
        Ok(config)
    }

    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Reject configurations the scene cannot be built from.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let motion = &self.motion;
        if !(motion.bubble_period.is_finite() && motion.bubble_period > 0.0) {
            return invalid(format!(
                "motion.bubble_period must be positive, got {}",
                motion.bubble_period
            ));
        }
        if !(motion.lid_damping.is_finite()
            && motion.lid_damping > 0.0
            && motion.lid_damping <= 1.0)
        {
            return invalid(format!(
                "motion.lid_damping must be in (0, 1], got {}",
                motion.lid_damping
            ));
        }
        if !(self.floor.size.is_finite() && self.floor.size > 0.0) {
            return invalid(format!("floor.size must be positive, got {}", self.floor.size));
        }
        if self.floor.subdivisions > MAX_FLOOR_SUBDIVISIONS {
            return invalid(format!(
                "floor.subdivisions must be at most {MAX_FLOOR_SUBDIVISIONS}, got {}",
                self.floor.subdivisions
            ));
        }
        let treasure = self.treasure.total();
        if treasure > MAX_TREASURE_ITEMS {
            return invalid(format!(
                "treasure: at most {MAX_TREASURE_ITEMS} items per chest, got {treasure}"
            ));
        }
        let counts = [
            ("rocks.count", self.rocks.count),
            ("seaweed.count", self.seaweed.count),
            ("bubbles.count", self.bubbles.count),
            ("dust.count", self.dust.count),
            ("sand.count", self.sand.count),
            ("light_rays.count", self.light_rays.count),
            ("ship.seaweed_count", self.ship.seaweed_count),
            ("ship.barnacle_count", self.ship.barnacle_count),
            ("ship.spilled_coins", self.ship.spilled_coins),
        ]
        .into_iter()
        .chain(self.schools.iter().map(|s| ("schools.count", s.count)));
        for (name, count) in counts {
            if count > MAX_INSTANCES {
                return invalid(format!("{name} must be at most {MAX_INSTANCES}, got {count}"));
            }
        }

        let finite = [
            ("motion.bubble_vertical_offset", motion.bubble_vertical_offset),
            ("motion.fish_bob_amplitude", motion.fish_bob_amplitude),
        ];
        for (name, value) in finite {
            if !value.is_finite() {
                return invalid(format!("{name} must be finite, got {value}"));
            }
        }
        let extents = [
            ("rocks.spread", self.rocks.spread),
            ("seaweed.spread", self.seaweed.spread),
            ("bubbles.spread", self.bubbles.spread),
            ("dust.spread", self.dust.spread),
            ("dust.height", self.dust.height),
            ("sand.spread", self.sand.spread),
            ("light_rays.spacing", self.light_rays.spacing),
            ("light_rays.stagger", self.light_rays.stagger),
        ];
        for (name, value) in extents {
            if !(value.is_finite() && value >= 0.0) {
                return invalid(format!("{name} must be finite and non-negative, got {value}"));
            }
        }

        let placements = self
            .reefs
            .iter()
            .map(|p| ("reefs", p))
            .chain(self.chests.iter().map(|p| ("chests", p)));
        for (name, p) in placements {
            if !(p.position.is_finite() && p.rotation_y.is_finite()) {
                return invalid(format!("{name}: non-finite placement {p:?}"));
            }
            if !(p.scale.is_finite() && p.scale > 0.0) {
                return invalid(format!("{name}: scale must be positive, got {}", p.scale));
            }
        }
        if self.schools.iter().any(|s| !s.center.is_finite()) {
            return invalid("schools: non-finite center".into());
        }
        if !(self.ship.position.is_finite() && self.ship.rotation.is_finite()) {
            return invalid("ship: non-finite placement".into());
        }
        if !self.light_rays.origin.is_finite() {
            return invalid("light_rays: non-finite origin".into());
        }
        for fog in &self.fog {
            let oscillators = [fog.x, fog.z];
            let finite = oscillators
                .iter()
                .all(|o| o.amplitude.is_finite() && o.frequency.is_finite() && o.phase.is_finite());
            let sized = fog.radius.is_finite() && fog.radius > 0.0;
            if !(fog.origin.is_finite() && finite && sized) {
                return invalid(format!("fog: non-finite volume {fog:?}"));
            }
        }
        Ok(())
    }
}

fn invalid(message: String) -> Result<(), ConfigError> {
    Err(ConfigError::Invalid(message))
}
