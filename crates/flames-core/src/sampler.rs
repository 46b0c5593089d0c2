//! Shuffling and sampling without replacement.
//!
//! Both functions copy their input and never touch the caller's slice.
//! Randomness is injected so tests can pin a seed; the [`Sampler`] wrapper
//! owns a PCG generator seeded from a `u64` or from entropy.

use rand::prelude::*;
use rand_pcg::Mcg128Xsl64;

/// Return a uniformly shuffled copy of `items` (Fisher-Yates).
pub fn shuffle<T: Clone, R: Rng + ?Sized>(items: &[T], rng: &mut R) -> Vec<T> {
    let mut out = items.to_vec();
    for i in (1..out.len()).rev() {
        let j = rng.gen_range(0..=i);
        out.swap(i, j);
    }
    out
}

/// Draw `min(n, items.len())` distinct elements in random order.
///
/// `n == 0` yields an empty vector; `n >= len` yields a full shuffle.
pub fn sample_without_replacement<T: Clone, R: Rng + ?Sized>(
    items: &[T],
    n: usize,
    rng: &mut R,
) -> Vec<T> {
    if n == 0 {
        return Vec::new();
    }
    let mut out = shuffle(items, rng);
    out.truncate(n.min(items.len()));
    out
}

/// Process-wide random source for quiz building.
#[derive(Debug, Clone)]
pub struct Sampler {
    rng: Mcg128Xsl64,
}

impl Sampler {
    /// Seeded when `seed` is given, otherwise drawn from OS entropy.
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => Mcg128Xsl64::seed_from_u64(seed),
            None => Mcg128Xsl64::from_entropy(),
        };
        Self { rng }
    }

    pub fn shuffle<T: Clone>(&mut self, items: &[T]) -> Vec<T> {
        shuffle(items, &mut self.rng)
    }

    pub fn sample<T: Clone>(&mut self, items: &[T], n: usize) -> Vec<T> {
        sample_without_replacement(items, n, &mut self.rng)
    }

    /// Inclusive integer in `[min, max]`, used for FX jitter.
    pub fn between(&mut self, min: i32, max: i32) -> i32 {
        self.rng.gen_range(min..=max)
    }
}

impl Default for Sampler {
    fn default() -> Self {
        Self::new(None)
    }
}
