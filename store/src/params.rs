use oracle_types::OracleParams;

use crate::codec::{decode, encode};
use crate::keys::PARAMS_KEY;
use crate::{KvStore, StoreError};

/// Module parameters, stored as a single record.
pub trait ParamStore {
    /// `None` until genesis has written a parameter set.
    fn get_params(&self) -> Result<Option<OracleParams>, StoreError>;

    fn set_params(&self, params: &OracleParams) -> Result<(), StoreError>;
}

impl<T: KvStore + ?Sized> ParamStore for T {
    fn get_params(&self) -> Result<Option<OracleParams>, StoreError> {
        self.get(PARAMS_KEY)?.map(|bytes| decode(&bytes)).transpose()
    }

    fn set_params(&self, params: &OracleParams) -> Result<(), StoreError> {
        self.set(PARAMS_KEY, &encode(params)?)
    }
}
