//! Deterministic pseudo-random stream backing every generation decision.
//! Two instances built from the same seed produce bit-identical draw
//! sequences indefinitely; every reproducibility guarantee rests on that.

use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::{Rng, SeedableRng};

/// Seeded random source with the derived operations world generation needs.
///
/// Each derived operation consumes exactly one raw draw per decision, so
/// draw order stays unambiguous across implementations of the callers.
#[derive(Clone, Debug)]
pub struct SeededRandom {
    rng: ChaCha8Rng,
}

impl SeededRandom {
    pub fn new(seed: u32) -> Self {
        Self { rng: ChaCha8Rng::seed_from_u64(u64::from(seed)) }
    }

    /// Next float in `[0, 1)`.
    pub fn next_f64(&mut self) -> f64 {
        // 53 high bits of the raw draw, the standard double conversion.
        (self.rng.next_u64() >> 11) as f64 * (1.0 / (1u64 << 53) as f64)
    }

    /// Float in `[min, max)`.
    pub fn range_f64(&mut self, min: f64, max: f64) -> f64 {
        min + self.next_f64() * (max - min)
    }

    /// Integer in `[min, max]`, both ends inclusive.
    pub fn int_inclusive(&mut self, min: i64, max: i64) -> i64 {
        debug_assert!(min <= max);
        min + (self.next_f64() * ((max - min + 1) as f64)) as i64
    }

    /// Uniformly selected element. Panics on an empty slice, which no
    /// generation path produces.
    pub fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[(self.next_f64() * items.len() as f64) as usize]
    }

    /// Boolean that is true with the given probability.
    pub fn chance(&mut self, probability: f64) -> bool {
        self.next_f64() < probability
    }

    /// In-place Fisher-Yates permutation driven by this stream.
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        for i in (1..items.len()).rev() {
            let j = (self.next_f64() * (i + 1) as f64) as usize;
            items.swap(i, j);
        }
    }
}
