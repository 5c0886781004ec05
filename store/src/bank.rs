//! Denom metadata registry owned by the bank module.

use oracle_types::{Denom, DenomMetadata};

use crate::StoreError;

pub trait BankKeeper {
    fn denom_metadata(&self, denom: &Denom) -> Result<Option<DenomMetadata>, StoreError>;

    fn set_denom_metadata(&self, metadata: &DenomMetadata) -> Result<(), StoreError>;
}
