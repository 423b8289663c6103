//! Deterministic random number generation.
//!
//! Array generation and search-target sampling draw from PCG so that a run
//! started from the same seed produces the same bars and the same target.

use rand::prelude::*;
use rand_pcg::Pcg64;

/// Deterministic, reproducible random number generator.
#[derive(Debug, Clone)]
pub struct VizRng {
    /// Seed the generator was created from.
    seed: u64,
    /// Internal PCG state.
    rng: Pcg64,
}

impl VizRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg64::seed_from_u64(seed),
        }
    }

    /// Create an RNG from operating-system entropy.
    ///
    /// The chosen seed is still recorded so the run can be reproduced.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self::new(rand::random())
    }

    /// Get the seed.
    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.seed
    }

    /// Generate a uniformly random value in `[min, max]`.
    ///
    /// Bounds are swapped if given in the wrong order.
    pub fn gen_value(&mut self, min: u32, max: u32) -> u32 {
        let (lo, hi) = if min <= max { (min, max) } else { (max, min) };
        self.rng.gen_range(lo..=hi)
    }

    /// Generate `n` values in `[min, max]`.
    #[must_use]
    pub fn gen_values(&mut self, n: usize, min: u32, max: u32) -> Vec<u32> {
        (0..n).map(|_| self.gen_value(min, max)).collect()
    }

    /// Pick a uniformly random index below `len`, or `None` for an empty range.
    pub fn gen_index(&mut self, len: usize) -> Option<usize> {
        (len > 0).then(|| self.rng.gen_range(0..len))
    }
}
