//! Vote penalty counters, one per validator for the current slash window.

use oracle_types::{ValidatorId, VotePenaltyCounter};

use crate::codec::{decode, encode};
use crate::keys::{validator_from_key, vote_penalty_counter_key, VOTE_PENALTY_COUNTER_PREFIX};
use crate::{KvStore, StoreError};

pub trait VotePenaltyStore {
    fn get_vote_penalty_counter(
        &self,
        validator: &ValidatorId,
    ) -> Result<Option<VotePenaltyCounter>, StoreError>;

    fn set_vote_penalty_counter(
        &self,
        validator: &ValidatorId,
        counter: &VotePenaltyCounter,
    ) -> Result<(), StoreError>;

    fn delete_vote_penalty_counter(&self, validator: &ValidatorId) -> Result<(), StoreError>;

    /// Every counter in ascending validator order.
    fn iter_vote_penalty_counters(
        &self,
    ) -> Result<Vec<(ValidatorId, VotePenaltyCounter)>, StoreError>;
}

impl<T: KvStore + ?Sized> VotePenaltyStore for T {
    fn get_vote_penalty_counter(
        &self,
        validator: &ValidatorId,
    ) -> Result<Option<VotePenaltyCounter>, StoreError> {
        self.get(&vote_penalty_counter_key(validator))?
            .map(|bytes| decode(&bytes))
            .transpose()
    }

    fn set_vote_penalty_counter(
        &self,
        validator: &ValidatorId,
        counter: &VotePenaltyCounter,
    ) -> Result<(), StoreError> {
        self.set(&vote_penalty_counter_key(validator), &encode(counter)?)
    }

    fn delete_vote_penalty_counter(&self, validator: &ValidatorId) -> Result<(), StoreError> {
        self.delete(&vote_penalty_counter_key(validator))
    }

    fn iter_vote_penalty_counters(
        &self,
    ) -> Result<Vec<(ValidatorId, VotePenaltyCounter)>, StoreError> {
        self.iter_prefix(&[VOTE_PENALTY_COUNTER_PREFIX])?
            .into_iter()
            .map(|(key, value)| Ok((validator_from_key(&key)?, decode(&value)?)))
            .collect()
    }
}
