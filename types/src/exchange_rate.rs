//! Submitted votes and agreed exchange rates.

use serde::{Deserialize, Serialize};

use crate::decimal::Dec;
use crate::denom::Denom;
use crate::validator::ValidatorId;

/// A single `(denom, rate)` observation inside a validator's submission.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExchangeRateTuple {
    pub denom: Denom,
    pub exchange_rate: Dec,
}

impl ExchangeRateTuple {
    pub fn new(denom: impl Into<Denom>, exchange_rate: Dec) -> Self {
        Self {
            denom: denom.into(),
            exchange_rate,
        }
    }
}

/// One validator's full submission for a voting period.
///
/// Rates are stored as submitted. A non-positive rate is not rejected here; it
/// is downgraded to a zero-power vote when ballots are organized.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregateVote {
    pub voter: ValidatorId,
    pub exchange_rate_tuples: Vec<ExchangeRateTuple>,
}

impl AggregateVote {
    pub fn new(voter: ValidatorId, exchange_rate_tuples: Vec<ExchangeRateTuple>) -> Self {
        Self {
            voter,
            exchange_rate_tuples,
        }
    }
}

/// The agreed rate for a denom, with the block that produced it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OracleExchangeRate {
    pub exchange_rate: Dec,
    pub last_update_height: u64,
    pub last_update_timestamp_millis: u64,
}

impl OracleExchangeRate {
    pub fn new(exchange_rate: Dec, last_update_height: u64, last_update_timestamp_millis: u64) -> Self {
        Self {
            exchange_rate,
            last_update_height,
            last_update_timestamp_millis,
        }
    }
}
