//! Seeded random source shared by the payload generators.
//!
//! Generators draw through the [`RandomSource`] trait so tests can script
//! the draws. The server owns exactly one [`SharedRng`], seeded once at
//! startup; every request locks it for the duration of one payload so
//! concurrent requests never interleave draws.

use std::sync::{Arc, Mutex, PoisonError};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Default seed, kept stable so demo payloads look the same across runs.
pub const DEFAULT_SEED: u64 = 42;

/// Source of uniform draws for the generators.
pub trait RandomSource {
    /// Uniform real in `[0, 1)`.
    fn next_f64(&mut self) -> f64;

    /// Uniform integer in `[0, n)`. `n` must be greater than zero.
    fn next_below(&mut self, n: u32) -> u32;
}

/// Deterministic random source wrapping [`StdRng`].
#[derive(Debug, Clone)]
pub struct SeededRng {
    rng: StdRng,
}

impl SeededRng {
    /// Create with a fixed seed for determinism.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for SeededRng {
    fn default() -> Self {
        Self::new(DEFAULT_SEED)
    }
}

impl RandomSource for SeededRng {
    fn next_f64(&mut self) -> f64 {
        self.rng.random::<f64>()
    }

    fn next_below(&mut self, n: u32) -> u32 {
        self.rng.random_range(0..n)
    }
}

/// Process-wide handle to one [`SeededRng`], cheap to clone into handlers.
#[derive(Debug, Clone)]
pub struct SharedRng {
    inner: Arc<Mutex<SeededRng>>,
}

impl SharedRng {
    /// Create a shared source seeded with `seed`.
    pub fn new(seed: u64) -> Self {
        Self {
            inner: Arc::new(Mutex::new(SeededRng::new(seed))),
        }
    }

    /// Run `f` with exclusive access to the source. A poisoned lock is
    /// recovered.
    pub fn with<R>(&self, f: impl FnOnce(&mut SeededRng) -> R) -> R {
        let mut guard = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut *guard)
    }
}

impl Default for SharedRng {
    fn default() -> Self {
        Self::new(DEFAULT_SEED)
    }
}
