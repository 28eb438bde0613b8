//! Explicit, seedable randomness for the stochastic algorithms

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

/// Stream tags keep independent consumers from sharing draws
pub(crate) mod streams {
    pub const BETWEENNESS: u64 = 1;
    pub const LOUVAIN: u64 = 2;
    pub const DIFFUSION: u64 = 3;
}

/// Seed holder that hands out deterministic generators.
///
/// Every generator is derived from the seed and a key path, so the same key
/// always yields the same sequence no matter which thread asks for it or in
/// which order the keys are requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RandomSource {
    seed: u64,
}

impl RandomSource {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Generator addressed by `keys`
    pub fn stream(&self, keys: &[u64]) -> StdRng {
        let mut state = splitmix64(self.seed);
        for &key in keys {
            state = splitmix64(state ^ splitmix64(key.wrapping_add(0x632b_e59b_d9b4_e019)));
        }
        StdRng::seed_from_u64(state)
    }
}

impl Default for RandomSource {
    fn default() -> Self {
        Self::new(42)
    }
}

fn splitmix64(mut z: u64) -> u64 {
    z = z.wrapping_add(0x9e37_79b9_7f4a_7c15);
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    z ^ (z >> 31)
}
