//! Per-validator participation counters.

use serde::{Deserialize, Serialize};

/// Miss/abstain/success tallies accumulated over the current slash window.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VotePenaltyCounter {
    pub miss_count: u64,
    pub abstain_count: u64,
    pub success_count: u64,
}

impl VotePenaltyCounter {
    pub fn new(miss_count: u64, abstain_count: u64, success_count: u64) -> Self {
        Self {
            miss_count,
            abstain_count,
            success_count,
        }
    }

    /// Periods in which the validator did not produce a valid vote.
    pub fn invalid_count(&self) -> u64 {
        self.miss_count.saturating_add(self.abstain_count)
    }
}
