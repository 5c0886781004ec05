//! Top-level error type shared across crates.

use thiserror::Error;

/// Common error type for the oracle.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum OracleError {
    /// A rate, snapshot, target or vote was never set or has been deleted.
    /// Callers treat this as "no value yet", not as a failure.
    #[error("{kind} not found: {key}")]
    NotFound { kind: &'static str, key: String },

    /// Reported, never raised: the vote is counted at zero power.
    #[error("invalid vote from {voter} for {denom}: rate must be positive")]
    InvalidVote { voter: String, denom: String },

    /// Reported, never raised: the denom keeps its previous rate.
    #[error("ballot for {denom} is below the vote threshold")]
    BelowThreshold { denom: String },

    #[error("no price snapshots within the last {lookback_secs}s")]
    InsufficientHistory { lookback_secs: u64 },

    #[error("invalid TWAP lookback {requested}s: must be between 1 and {max}s")]
    InvalidLookback { requested: u64, max: u64 },

    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("tally error: {0}")]
    Tally(String),

    #[error("storage error: {0}")]
    Storage(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

impl OracleError {
    pub fn not_found(kind: &'static str, key: impl ToString) -> Self {
        Self::NotFound {
            kind,
            key: key.to_string(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
