use rand::{Rng, SeedableRng};

/// Seeded generator used for every construction-time random draw.
pub type SceneRng = rand_pcg::Pcg32;

/// Independent random streams, one per scene subsystem.
///
/// Drawing each subsystem from its own stream means adding a rock does not
/// reshuffle every fish that is built after it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RngStream {
    Floor,
    Rocks,
    Seaweed,
    Reefs,
    Fish,
    Ship,
    Chests,
    Bubbles,
    Dust,
    Fog,
    Treasure,
    Sand,
}

impl RngStream {
    fn tag(self) -> u64 {
        match self {
            Self::Floor => 1,
            Self::Rocks => 2,
            Self::Seaweed => 3,
            Self::Reefs => 4,
            Self::Fish => 5,
            Self::Ship => 6,
            Self::Chests => 7,
            Self::Bubbles => 8,
            Self::Dust => 9,
            Self::Fog => 10,
            Self::Treasure => 11,
            Self::Sand => 12,
        }
    }
}

pub fn seeded_rng(seed: u64) -> SceneRng {
    SceneRng::seed_from_u64(seed)
}

/// Seed for a named stream under a scene seed.
pub fn derive_seed(seed: u64, stream: RngStream) -> u64 {
    derive_indexed_seed(seed, stream.tag())
}

/// Seed for the `index`-th item under a parent seed (one per mesh, chest, ...).
pub fn derive_indexed_seed(seed: u64, index: u64) -> u64 {
    splitmix64(seed ^ splitmix64(index))
}

pub fn stream_rng(seed: u64, stream: RngStream) -> SceneRng {
    seeded_rng(derive_seed(seed, stream))
}

/// Uniform draw from `[min, max)`; returns `min` when the range is empty.
pub fn sample_range(rng: &mut SceneRng, min: f32, max: f32) -> f32 {
    if max > min {
        rng.random_range(min..max)
    } else {
        min
    }
}

/// Splitmix64 ... a fast, high-quality deterministic PRNG step function.
pub fn splitmix64(mut state: u64) -> u64 {
    state = state.wrapping_add(0x9e37_79b9_7f4a_7c15);
    let mut z = state;
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    z ^ (z >> 31)
}
