//! Oracle module parameters, all tunable by governance.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::decimal::Dec;
use crate::denom::DenomEntry;
use crate::error::OracleError;

/// Blocks per week at a 6 second block time.
pub const BLOCKS_PER_WEEK: u64 = 100_800;

/// Parameters read once per voting period and passed explicitly into the
/// tally algorithms.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OracleParams {
    /// Length of a voting period in blocks.
    pub vote_period: u64,

    /// Fraction of total claim power a ballot needs before its denom is
    /// eligible for a rate update.
    pub vote_threshold: Dec,

    /// Width of the band around the weighted median that counts as an
    /// accurate vote. Voters within `median ± median * reward_band / 2` win.
    pub reward_band: Dec,

    /// Fraction of stake a validator below `min_valid_per_window` should lose.
    /// Reported only; the slashing module executes it.
    pub slash_fraction: Dec,

    /// Length of the slash window in blocks.
    pub slash_window: u64,

    /// Minimum fraction of valid votes per slash window.
    pub min_valid_per_window: Dec,

    /// Seconds of price snapshot history to retain.
    pub lookback_duration: u64,

    /// Denoms the oracle produces rates for.
    pub whitelist: Vec<DenomEntry>,
}

impl OracleParams {
    /// Number of voting periods in a slash window.
    pub fn vote_periods_per_window(&self) -> u64 {
        if self.vote_period == 0 {
            return 0;
        }
        self.slash_window / self.vote_period
    }

    /// Reject malformed parameters before any tally runs.
    pub fn validate(&self) -> Result<(), OracleError> {
        if self.vote_period == 0 {
            return Err(OracleError::Configuration(
                "vote_period must be positive".into(),
            ));
        }

        let min_threshold = Dec::with_prec(33, 2);
        if self.vote_threshold <= min_threshold || self.vote_threshold > Dec::ONE {
            return Err(OracleError::Configuration(format!(
                "vote_threshold must be in (0.33, 1]: {}",
                self.vote_threshold
            )));
        }

        for (name, value) in [
            ("reward_band", self.reward_band),
            ("slash_fraction", self.slash_fraction),
            ("min_valid_per_window", self.min_valid_per_window),
        ] {
            if value.is_negative() || value > Dec::ONE {
                return Err(OracleError::Configuration(format!(
                    "{name} must be in [0, 1]: {value}"
                )));
            }
        }

        if self.slash_window < self.vote_period || self.slash_window % self.vote_period != 0 {
            return Err(OracleError::Configuration(format!(
                "slash_window {} must be a positive multiple of vote_period {}",
                self.slash_window, self.vote_period
            )));
        }

        if self.lookback_duration == 0 {
            return Err(OracleError::Configuration(
                "lookback_duration must be positive".into(),
            ));
        }

        let mut seen = BTreeSet::new();
        for entry in &self.whitelist {
            if entry.name.is_empty() {
                return Err(OracleError::Configuration(
                    "whitelist contains an empty denom".into(),
                ));
            }
            if !seen.insert(entry.name.as_str()) {
                return Err(OracleError::Configuration(format!(
                    "whitelist contains {} twice",
                    entry.name
                )));
            }
        }

        Ok(())
    }
}

impl Default for OracleParams {
    fn default() -> Self {
        Self {
            vote_period: 2,
            vote_threshold: Dec::with_prec(5, 1),     // 50%
            reward_band: Dec::with_prec(2, 2),        // 2%
            slash_fraction: Dec::with_prec(1, 4),     // 0.01%
            slash_window: BLOCKS_PER_WEEK,
            min_valid_per_window: Dec::with_prec(5, 2), // 5%
            lookback_duration: 3600,
            whitelist: vec![
                DenomEntry::new("ubtc"),
                DenomEntry::new("ueth"),
                DenomEntry::new("ukii"),
            ],
        }
    }
}
