use core::fmt::{self, Debug};

use rand::{rngs::StdRng, Rng, RngCore, SeedableRng};

use crate::error::ConfigError;

/// Picks the height of every new tower.
///
/// Heights follow a geometric distribution truncated at `max_level`: starting at one, the
/// height grows by one for as long as a coin biased with `p` comes up heads. The expected
/// height is `1 / (1 - p)`, which keeps searches at `O(log n)` expected steps.
///
/// The random source is owned by the generator, so tests can hand in a seeded one and get
/// the same towers on every run.
pub struct LevelGenerator<R = StdRng> {
    max_level: usize,
    p: f64,
    rng: R,
}

impl LevelGenerator<StdRng> {
    /// A generator with the default `MAX_LEVEL` and `P`, seeded deterministically.
    pub fn seeded(seed: u64) -> Self {
        LevelGenerator {
            max_level: super::MAX_LEVEL,
            p: super::P,
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for LevelGenerator<StdRng> {
    fn default() -> Self {
        LevelGenerator {
            max_level: super::MAX_LEVEL,
            p: super::P,
            rng: StdRng::from_entropy(),
        }
    }
}

impl<R> LevelGenerator<R>
where
    R: RngCore,
{
    /// Creates a generator producing heights in `[1, max_level]`.
    ///
    /// `max_level` must lie in `1..=MAX_LEVEL` and `p` strictly between zero and one.
    pub fn new(max_level: usize, p: f64, rng: R) -> Result<Self, ConfigError> {
        if max_level == 0 || max_level > super::MAX_LEVEL {
            return Err(ConfigError::MaxLevel(max_level));
        }

        // NaN fails both comparisons
        if !(p > 0.0 && p < 1.0) {
            return Err(ConfigError::Probability(p));
        }

        Ok(LevelGenerator { max_level, p, rng })
    }

    pub fn next_level(&mut self) -> usize {
        let mut level = 1;

        while level < self.max_level && self.rng.gen_bool(self.p) {
            level += 1;
        }

        level
    }

    pub fn max_level(&self) -> usize {
        self.max_level
    }

    pub fn p(&self) -> f64 {
        self.p
    }
}

impl<R> Debug for LevelGenerator<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LevelGenerator")
            .field("max_level", &self.max_level)
            .field("p", &self.p)
            .finish_non_exhaustive()
    }
}
