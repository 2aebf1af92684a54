//! Injectable randomness.
//!
//! Randomness enters the system in exactly two places: the market
//! appreciation roll applied to a player's value on settlement, and the
//! dates of birth in a generated default squad. Both draw from a
//! [`RandomSource`] so tests can pin the outcome and assert exact numbers.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of uniform integer draws over a closed range.
pub trait RandomSource: Send {
    /// Draw uniformly from `min..=max`. Both bounds inclusive.
    fn roll_inclusive(&mut self, min: u32, max: u32) -> u32;
}

/// Production randomness backed by [`StdRng`].
#[derive(Debug)]
pub struct StdRandom {
    rng: StdRng,
}

impl StdRandom {
    /// Seed from the operating system's entropy source.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Deterministic stream from a fixed seed. Useful for reproducible
    /// simulations; tests wanting exact values should prefer
    /// [`FixedRandom`].
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl RandomSource for StdRandom {
    fn roll_inclusive(&mut self, min: u32, max: u32) -> u32 {
        self.rng.gen_range(min..=max)
    }
}

/// Always returns the same value, clamped into the requested range.
#[derive(Debug, Clone, Copy)]
pub struct FixedRandom {
    value: u32,
}

impl FixedRandom {
    #[must_use]
    pub fn always(value: u32) -> Self {
        Self { value }
    }
}

impl RandomSource for FixedRandom {
    fn roll_inclusive(&mut self, min: u32, max: u32) -> u32 {
        self.value.clamp(min, max)
    }
}
