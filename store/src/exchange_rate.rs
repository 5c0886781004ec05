//! Agreed exchange rate storage.

use oracle_types::{Denom, OracleExchangeRate};

use crate::codec::{decode, encode};
use crate::keys::{denom_from_key, exchange_rate_key, EXCHANGE_RATE_PREFIX};
use crate::{KvStore, StoreError};

/// Persisted base exchange rates, one per denom.
pub trait ExchangeRateStore {
    fn get_base_exchange_rate(&self, denom: &Denom)
        -> Result<Option<OracleExchangeRate>, StoreError>;

    fn set_base_exchange_rate(
        &self,
        denom: &Denom,
        rate: &OracleExchangeRate,
    ) -> Result<(), StoreError>;

    fn delete_base_exchange_rate(&self, denom: &Denom) -> Result<(), StoreError>;

    /// Every stored rate in ascending denom order.
    fn iter_base_exchange_rates(&self) -> Result<Vec<(Denom, OracleExchangeRate)>, StoreError>;
}

impl<T: KvStore + ?Sized> ExchangeRateStore for T {
    fn get_base_exchange_rate(
        &self,
        denom: &Denom,
    ) -> Result<Option<OracleExchangeRate>, StoreError> {
        self.get(&exchange_rate_key(denom))?
            .map(|bytes| decode(&bytes))
            .transpose()
    }

    fn set_base_exchange_rate(
        &self,
        denom: &Denom,
        rate: &OracleExchangeRate,
    ) -> Result<(), StoreError> {
        self.set(&exchange_rate_key(denom), &encode(rate)?)
    }

    fn delete_base_exchange_rate(&self, denom: &Denom) -> Result<(), StoreError> {
        self.delete(&exchange_rate_key(denom))
    }

    fn iter_base_exchange_rates(&self) -> Result<Vec<(Denom, OracleExchangeRate)>, StoreError> {
        self.iter_prefix(&[EXCHANGE_RATE_PREFIX])?
            .into_iter()
            .map(|(key, value)| Ok((denom_from_key(&key)?, decode(&value)?)))
            .collect()
    }
}
