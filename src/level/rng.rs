//! Seeded random source for level generation
//!
//! PCG32 keeps a 64-bit linear congruential state and permutes its output,
//! so a seed fully determines the sequence. One instance is threaded through
//! the whole generator; nothing reads an ambient random source except seed
//! selection when no seed was supplied.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

/// PCG stream used for cosmetic draws (colors), kept apart from geometry
const COSMETIC_STREAM: u64 = 0xc0_10_85;

#[derive(Debug, Clone)]
pub struct LevelRng {
    rng: Pcg32,
}

impl LevelRng {
    /// Geometry stream for `seed`
    pub fn new(seed: u32) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed as u64),
        }
    }

    /// Independent stream for cosmetic variance. Drawing from it never shifts
    /// the geometry stream, and it is still reproducible from the seed.
    pub fn cosmetic(seed: u32) -> Self {
        Self {
            rng: Pcg32::new(seed as u64, COSMETIC_STREAM),
        }
    }

    /// Pick a fresh seed from the OS-seeded thread RNG
    pub fn fresh_seed() -> u32 {
        rand::random::<u32>()
    }

    /// Uniform in [0, 1)
    #[inline]
    pub fn next_f32(&mut self) -> f32 {
        self.rng.random::<f32>()
    }

    /// Uniform in [min, max); returns `min` for an empty range
    pub fn range(&mut self, min: f32, max: f32) -> f32 {
        if max <= min {
            return min;
        }
        self.rng.random_range(min..max)
    }

    /// Uniform integer in [min, max]
    pub fn int_inclusive(&mut self, min: u32, max: u32) -> u32 {
        if max <= min {
            return min;
        }
        self.rng.random_range(min..=max)
    }

    /// True with probability `p`
    #[inline]
    pub fn chance(&mut self, p: f32) -> bool {
        self.next_f32() < p
    }

    /// +1.0 or -1.0 with equal odds
    pub fn sign(&mut self) -> f32 {
        if self.chance(0.5) { 1.0 } else { -1.0 }
    }
}
