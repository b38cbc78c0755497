//! Deterministic per-query RNG.
//!
//! The search itself is fully deterministic; randomness is only used to pick
//! departure times for lookup benchmarks and randomized tests.  Each query
//! gets its own `SmallRng` seeded by:
//!
//!   seed = global_seed XOR (query_index * MIXING_CONSTANT)
//!
//! The mixing constant is the 64-bit fractional part of the golden ratio,
//! which spreads consecutive query indices uniformly across the seed space,
//! so a batch of queries run in parallel samples exactly what the same
//! queries sample when run one by one.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::{SafeInterval, Time};

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

/// Per-query deterministic RNG.
pub struct QueryRng(SmallRng);

impl QueryRng {
    /// Seed deterministically from a global seed and the query's position in
    /// its batch.
    pub fn new(global_seed: u64, query_index: u64) -> Self {
        let seed = global_seed ^ query_index.wrapping_mul(MIXING_CONSTANT);
        QueryRng(SmallRng::seed_from_u64(seed))
    }

    /// A time drawn uniformly from a finite, non-empty window.
    ///
    /// Returns `None` if the window is empty or not finite on both ends.
    pub fn time_in(&mut self, window: SafeInterval) -> Option<Time> {
        if window.is_empty() || !window.begin.is_finite() || !window.end.is_finite() {
            return None;
        }
        Some(self.0.gen_range(window.begin..window.end))
    }
}
