//! Counters gathered while searching.

use serde::{Deserialize, Serialize};

/// What one search (or one root-parallel batch) did.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchStats {
    pub iterations: u32,
    pub nodes_expanded: u32,
    pub simulations: u32,
    /// Tree actions the engine refused on a re-sampled state.
    pub stale_actions: u32,
    pub max_depth: u16,
    /// Wall time in microseconds.
    pub time_us: u64,
}

impl SearchStats {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Fold another worker's counters into these. Workers run side by side,
    /// so time is the slowest worker's, not the sum.
    pub fn merge(&mut self, other: &SearchStats) {
        self.iterations += other.iterations;
        self.nodes_expanded += other.nodes_expanded;
        self.simulations += other.simulations;
        self.stale_actions += other.stale_actions;
        self.max_depth = self.max_depth.max(other.max_depth);
        self.time_us = self.time_us.max(other.time_us);
    }

    #[must_use]
    pub fn iterations_per_second(&self) -> f64 {
        match self.time_us {
            0 => 0.0,
            us => f64::from(self.iterations) * 1e6 / us as f64,
        }
    }

    /// Share of iterations that hit an action the engine refused.
    #[must_use]
    pub fn stale_ratio(&self) -> f64 {
        match self.iterations {
            0 => 0.0,
            n => f64::from(self.stale_actions) / f64::from(n),
        }
    }
}
