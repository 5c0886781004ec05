//! The replicated key-value store the oracle persists into.
//!
//! The store itself belongs to the host chain; the oracle only sees this
//! interface. Iteration returns owned pairs in key byte order so callers can
//! mutate the store while walking a result.

use crate::StoreError;

/// A key/value pair as returned by prefix iteration.
pub type KvPair = (Vec<u8>, Vec<u8>);

pub trait KvStore {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, StoreError>;

    fn set(&self, key: &[u8], value: &[u8]) -> Result<(), StoreError>;

    /// Deleting a missing key is not an error.
    fn delete(&self, key: &[u8]) -> Result<(), StoreError>;

    /// All pairs whose key starts with `prefix`, ascending by key.
    fn iter_prefix(&self, prefix: &[u8]) -> Result<Vec<KvPair>, StoreError>;

    /// All pairs whose key starts with `prefix`, descending by key.
    fn iter_prefix_rev(&self, prefix: &[u8]) -> Result<Vec<KvPair>, StoreError> {
        let mut pairs = self.iter_prefix(prefix)?;
        pairs.reverse();
        Ok(pairs)
    }

    fn has(&self, key: &[u8]) -> Result<bool, StoreError> {
        Ok(self.get(key)?.is_some())
    }
}

impl<T: KvStore + ?Sized> KvStore for &T {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, StoreError> {
        (**self).get(key)
    }

    fn set(&self, key: &[u8], value: &[u8]) -> Result<(), StoreError> {
        (**self).set(key, value)
    }

    fn delete(&self, key: &[u8]) -> Result<(), StoreError> {
        (**self).delete(key)
    }

    fn iter_prefix(&self, prefix: &[u8]) -> Result<Vec<KvPair>, StoreError> {
        (**self).iter_prefix(prefix)
    }

    fn iter_prefix_rev(&self, prefix: &[u8]) -> Result<Vec<KvPair>, StoreError> {
        (**self).iter_prefix_rev(prefix)
    }
}
