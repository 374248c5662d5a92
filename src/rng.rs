//! # RandomNumberGenerator
//!
//! The `RandomNumberGenerator` struct wraps the `rand` crate's `StdRng` and exposes the
//! handful of draws the operators and drivers need.
//!
//! ## Example
//!
//! ```rust
//! use genswarm::rng::RandomNumberGenerator;
//!
//! let mut rng = RandomNumberGenerator::from_seed(7);
//! let u = rng.next_unit();
//! assert!((0.0..1.0).contains(&u));
//!
//! let idx = rng.next_index(10);
//! assert!(idx < 10);
//! ```
//!
//! ## Per-task randomness
//!
//! Tasks running on the worker pool never share a generator. A driver draws one seed per
//! task with [`RandomNumberGenerator::next_seed`] before submitting the batch and each
//! task builds its own generator from that seed, so a run is reproducible from the
//! driver's seed regardless of how tasks are scheduled.

use rand::{rngs::StdRng, Rng, SeedableRng};

/// A wrapper around the `rand` crate's `StdRng`.
#[derive(Clone, Debug)]
pub struct RandomNumberGenerator {
    pub rng: StdRng,
}

impl RandomNumberGenerator {
    /// Creates a new `RandomNumberGenerator` instance seeded from the system entropy.
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Creates a new `RandomNumberGenerator` instance with a specific seed.
    ///
    /// This is useful for reproducible tests and benchmarks.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Draws a value uniformly from `[0, 1)`.
    pub fn next_unit(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }

    /// Draws an index uniformly from `[0, upper)`. Returns 0 when `upper` is 0.
    pub fn next_index(&mut self, upper: usize) -> usize {
        if upper == 0 {
            return 0;
        }
        self.rng.gen_range(0..upper)
    }

    /// Draws a value uniformly from `[-bound, bound]`.
    pub fn next_symmetric(&mut self, bound: f64) -> f64 {
        bound - self.next_unit() * bound * 2.0
    }

    /// Draws a seed for a task-local generator.
    pub fn next_seed(&mut self) -> u64 {
        self.rng.gen::<u64>()
    }
}

impl Default for RandomNumberGenerator {
    fn default() -> Self {
        Self::new()
    }
}
