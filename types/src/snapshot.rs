//! Price snapshot history records and TWAP results.

use serde::{Deserialize, Serialize};

use crate::decimal::Dec;
use crate::denom::Denom;
use crate::exchange_rate::OracleExchangeRate;

/// A denom's agreed rate captured at snapshot time.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceSnapshotItem {
    pub denom: Denom,
    pub oracle_exchange_rate: OracleExchangeRate,
}

impl PriceSnapshotItem {
    pub fn new(denom: impl Into<Denom>, oracle_exchange_rate: OracleExchangeRate) -> Self {
        Self {
            denom: denom.into(),
            oracle_exchange_rate,
        }
    }
}

/// Every agreed rate at one point in time. Keyed in the store by
/// `snapshot_timestamp` (Unix seconds).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceSnapshot {
    pub snapshot_timestamp: u64,
    pub price_snapshot_items: Vec<PriceSnapshotItem>,
}

impl PriceSnapshot {
    pub fn new(snapshot_timestamp: u64, price_snapshot_items: Vec<PriceSnapshotItem>) -> Self {
        Self {
            snapshot_timestamp,
            price_snapshot_items,
        }
    }
}

/// Time-weighted average price of one denom over an effective lookback.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OracleTwap {
    pub denom: Denom,
    pub twap: Dec,
    /// Seconds of history that actually contributed to `twap`.
    pub lookback_seconds: u64,
}
