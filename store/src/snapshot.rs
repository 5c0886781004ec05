//! Price snapshot history, keyed by Unix seconds.

use oracle_types::PriceSnapshot;

use crate::codec::{decode, encode};
use crate::keys::{price_snapshot_key, PRICE_SNAPSHOT_PREFIX};
use crate::{KvStore, StoreError};

pub trait PriceSnapshotStore {
    fn get_price_snapshot(&self, timestamp: u64) -> Result<Option<PriceSnapshot>, StoreError>;

    /// Store `snapshot` under its own timestamp. A second snapshot with the
    /// same timestamp overwrites the first.
    fn set_price_snapshot(&self, snapshot: &PriceSnapshot) -> Result<(), StoreError>;

    fn delete_price_snapshot(&self, timestamp: u64) -> Result<(), StoreError>;

    /// Oldest first.
    fn iter_price_snapshots(&self) -> Result<Vec<PriceSnapshot>, StoreError>;

    /// Newest first.
    fn iter_price_snapshots_rev(&self) -> Result<Vec<PriceSnapshot>, StoreError>;
}

impl<T: KvStore + ?Sized> PriceSnapshotStore for T {
    fn get_price_snapshot(&self, timestamp: u64) -> Result<Option<PriceSnapshot>, StoreError> {
        self.get(&price_snapshot_key(timestamp))?
            .map(|bytes| decode(&bytes))
            .transpose()
    }

    fn set_price_snapshot(&self, snapshot: &PriceSnapshot) -> Result<(), StoreError> {
        self.set(
            &price_snapshot_key(snapshot.snapshot_timestamp),
            &encode(snapshot)?,
        )
    }

    fn delete_price_snapshot(&self, timestamp: u64) -> Result<(), StoreError> {
        self.delete(&price_snapshot_key(timestamp))
    }

    fn iter_price_snapshots(&self) -> Result<Vec<PriceSnapshot>, StoreError> {
        self.iter_prefix(&[PRICE_SNAPSHOT_PREFIX])?
            .into_iter()
            .map(|(_, value)| decode(&value))
            .collect()
    }

    fn iter_price_snapshots_rev(&self) -> Result<Vec<PriceSnapshot>, StoreError> {
        self.iter_prefix_rev(&[PRICE_SNAPSHOT_PREFIX])?
            .into_iter()
            .map(|(_, value)| decode(&value))
            .collect()
    }
}
