//! Nullable bank module: a denom metadata registry.

use oracle_store::{BankKeeper, StoreError};
use oracle_types::{Denom, DenomMetadata};
use std::collections::BTreeMap;
use std::sync::Mutex;

use crate::lock;

#[derive(Default)]
pub struct NullBank {
    metadata: Mutex<BTreeMap<Denom, DenomMetadata>>,
}

impl NullBank {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn metadata_count(&self) -> usize {
        lock(&self.metadata).len()
    }
}

impl BankKeeper for NullBank {
    fn denom_metadata(&self, denom: &Denom) -> Result<Option<DenomMetadata>, StoreError> {
        Ok(lock(&self.metadata).get(denom).cloned())
    }

    fn set_denom_metadata(&self, metadata: &DenomMetadata) -> Result<(), StoreError> {
        lock(&self.metadata).insert(Denom::new(metadata.base.clone()), metadata.clone());
        Ok(())
    }
}
