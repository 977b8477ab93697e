//! Cumulative-weight random sampler.
//!
//! One reusable implementation backs both weighted draws in the engine:
//! the alarm-occurrence decision (5 / 95) and the alarm channel+direction
//! selection. The random source is injected, so tests can pin the drawn
//! integer and assert exact branch selection via [`WeightedTable::pick`].

use crate::error::SimulationError;
use rand::Rng;

/// Immutable weighted candidate table.
#[derive(Debug, Clone)]
pub struct WeightedTable<T> {
    entries: Vec<(T, u32)>,
    total: u32,
}

impl<T> WeightedTable<T> {
    /// Build a table from `(candidate, weight)` pairs.
    ///
    /// Individual zero weights are allowed (those candidates are simply
    /// never drawn), but the table as a whole must carry weight.
    ///
    /// # Errors
    /// `EmptyCandidateTable` when the list is empty or all weights are 0.
    pub fn new(entries: Vec<(T, u32)>) -> Result<Self, SimulationError> {
        let total: u32 = entries.iter().map(|(_, w)| w).sum();
        if entries.is_empty() || total == 0 {
            return Err(SimulationError::EmptyCandidateTable);
        }
        Ok(Self { entries, total })
    }

    /// Sum of all weights.
    #[must_use]
    pub const fn total_weight(&self) -> u32 {
        self.total
    }

    /// Cumulative walk for a pre-drawn `r` in `[0, total_weight)`:
    /// the first candidate whose cumulative weight exceeds `r` wins.
    #[must_use]
    pub fn pick(&self, r: u32) -> &T {
        debug_assert!(r < self.total, "r={r} out of range [0, {})", self.total);
        let mut cumulative = 0u32;
        for (candidate, weight) in &self.entries {
            cumulative += weight;
            if r < cumulative {
                return candidate;
            }
        }
        // Unreachable for r < total; entries are non-empty by construction.
        &self.entries[self.entries.len() - 1].0
    }

    /// Draw uniformly in `[0, total_weight)` and walk.
    pub fn draw<R: Rng + ?Sized>(&self, rng: &mut R) -> &T {
        self.pick(rng.gen_range(0..self.total))
    }
}
