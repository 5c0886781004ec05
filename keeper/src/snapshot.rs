//! Price snapshot history and time-weighted average prices.

use oracle_store::{BankKeeper, KvStore, PriceSnapshotStore, StakingKeeper, VoteTargetStore};
use oracle_types::{BlockHeader, Dec, Denom, OracleError, OracleTwap, PriceSnapshot};
use std::collections::{BTreeMap, BTreeSet};

use crate::event::OracleEvent;
use crate::keeper::OracleKeeper;

/// Running sums for one denom while walking history backwards.
struct TwapAccumulator {
    weighted_sum: Dec,
    duration: u64,
    latest: Dec,
}

impl<S: KvStore, K: StakingKeeper, B: BankKeeper> OracleKeeper<S, K, B> {
    pub fn set_price_snapshot(&self, snapshot: &PriceSnapshot) -> Result<(), OracleError> {
        self.store.set_price_snapshot(snapshot)?;
        Ok(())
    }

    pub fn price_snapshot(&self, timestamp: u64) -> Result<PriceSnapshot, OracleError> {
        self.store
            .get_price_snapshot(timestamp)?
            .ok_or_else(|| OracleError::not_found("price snapshot", timestamp))
    }

    pub fn delete_price_snapshot(&self, timestamp: u64) -> Result<(), OracleError> {
        self.store.delete_price_snapshot(timestamp)?;
        Ok(())
    }

    /// Oldest first. Each call reads the store afresh.
    pub fn iterate_price_snapshots(
        &self,
    ) -> Result<impl Iterator<Item = PriceSnapshot>, OracleError> {
        Ok(self.store.iter_price_snapshots()?.into_iter())
    }

    /// Newest first. Each call reads the store afresh.
    pub fn iterate_price_snapshots_reverse(
        &self,
    ) -> Result<impl Iterator<Item = PriceSnapshot>, OracleError> {
        Ok(self.store.iter_price_snapshots_rev()?.into_iter())
    }

    /// The full retained history, oldest first.
    pub fn price_snapshot_history(&self) -> Result<Vec<PriceSnapshot>, OracleError> {
        Ok(self.store.iter_price_snapshots()?)
    }

    /// Store `snapshot` and prune history older than `lookback_duration`
    /// before the newest stored snapshot. Returns the number pruned.
    pub fn add_price_snapshot(&self, snapshot: &PriceSnapshot) -> Result<usize, OracleError> {
        let params = self.params()?;
        self.store.set_price_snapshot(snapshot)?;

        let history = self.store.iter_price_snapshots()?;
        let newest = history
            .last()
            .map(|s| s.snapshot_timestamp)
            .unwrap_or(snapshot.snapshot_timestamp);
        let cutoff = newest.saturating_sub(params.lookback_duration);

        let mut pruned = 0;
        for old in history.iter().take_while(|s| s.snapshot_timestamp < cutoff) {
            self.store.delete_price_snapshot(old.snapshot_timestamp)?;
            pruned += 1;
        }

        tracing::debug!(
            timestamp = snapshot.snapshot_timestamp,
            items = snapshot.price_snapshot_items.len(),
            pruned,
            "price snapshot added"
        );
        self.emit(OracleEvent::PriceSnapshotAdded {
            timestamp: snapshot.snapshot_timestamp,
            items: snapshot.price_snapshot_items.len(),
        });
        Ok(pruned)
    }

    /// Time-weighted average price of every vote target over the last
    /// `lookback_seconds`, measured back from the current block time.
    ///
    /// Each snapshot's rate holds from its timestamp until the next newer
    /// snapshot (or now). The oldest interval is clipped to the lookback
    /// horizon. A denom seen only at the current instant reports its latest
    /// rate with a zero lookback.
    pub fn calculate_twaps(
        &self,
        header: &BlockHeader,
        lookback_seconds: u64,
    ) -> Result<Vec<OracleTwap>, OracleError> {
        let params = self.params()?;
        if lookback_seconds == 0 || lookback_seconds > params.lookback_duration {
            return Err(OracleError::InvalidLookback {
                requested: lookback_seconds,
                max: params.lookback_duration,
            });
        }

        let targets: BTreeSet<Denom> = self.store.iter_vote_targets()?.into_iter().collect();
        let now = header.time.as_secs();
        let horizon = now.saturating_sub(lookback_seconds);

        let mut accumulators: BTreeMap<Denom, TwapAccumulator> = BTreeMap::new();
        for (i, snapshot) in self.store.iter_price_snapshots_rev()?.into_iter().enumerate() {
            let clipped = snapshot.snapshot_timestamp < horizon;
            if clipped && i == 0 {
                // Nothing recorded inside the window.
                break;
            }
            let timestamp = snapshot.snapshot_timestamp.max(horizon);
            let traversed = now.saturating_sub(timestamp);

            for item in snapshot.price_snapshot_items {
                if !targets.contains(&item.denom) {
                    continue;
                }
                let rate = item.oracle_exchange_rate.exchange_rate;
                let denom = item.denom;
                let acc = accumulators
                    .entry(denom.clone())
                    .or_insert_with(|| TwapAccumulator {
                        weighted_sum: Dec::ZERO,
                        duration: 0,
                        latest: rate,
                    });
                let interval = traversed.saturating_sub(acc.duration);
                acc.weighted_sum = rate
                    .checked_mul(Dec::from_u64(interval))
                    .and_then(|weighted| acc.weighted_sum.checked_add(weighted))
                    .ok_or_else(|| OracleError::Tally(format!("twap overflow for {denom}")))?;
                acc.duration = traversed;
            }

            if clipped {
                break;
            }
        }

        if accumulators.is_empty() {
            return Err(OracleError::InsufficientHistory {
                lookback_secs: lookback_seconds,
            });
        }

        accumulators
            .into_iter()
            .map(|(denom, acc)| -> Result<OracleTwap, OracleError> {
                let twap = if acc.duration == 0 {
                    acc.latest
                } else {
                    acc.weighted_sum
                        .checked_quo(Dec::from_u64(acc.duration))
                        .ok_or_else(|| OracleError::Tally(format!("twap overflow for {denom}")))?
                };
                Ok(OracleTwap {
                    denom,
                    twap,
                    lookback_seconds: acc.duration,
                })
            })
            .collect()
    }
}
