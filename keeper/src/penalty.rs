//! Vote penalty counters for the current slash window.

use oracle_store::{BankKeeper, KvStore, StakingKeeper, VotePenaltyStore};
use oracle_types::{OracleError, ValidatorId, VotePenaltyCounter};

use crate::keeper::OracleKeeper;

impl<S: KvStore, K: StakingKeeper, B: BankKeeper> OracleKeeper<S, K, B> {
    /// The validator's counters; all zero if it has none yet.
    pub fn get_vote_penalty_counter(
        &self,
        validator: &ValidatorId,
    ) -> Result<VotePenaltyCounter, OracleError> {
        Ok(self
            .store
            .get_vote_penalty_counter(validator)?
            .unwrap_or_default())
    }

    pub fn set_vote_penalty_counter(
        &self,
        validator: &ValidatorId,
        counter: &VotePenaltyCounter,
    ) -> Result<(), OracleError> {
        self.store.set_vote_penalty_counter(validator, counter)?;
        Ok(())
    }

    pub fn delete_vote_penalty_counter(&self, validator: &ValidatorId) -> Result<(), OracleError> {
        self.store.delete_vote_penalty_counter(validator)?;
        Ok(())
    }

    /// Every recorded counter in validator order.
    pub fn vote_penalty_counters(
        &self,
    ) -> Result<Vec<(ValidatorId, VotePenaltyCounter)>, OracleError> {
        Ok(self.store.iter_vote_penalty_counters()?)
    }

    fn update_counter(
        &self,
        validator: &ValidatorId,
        update: impl FnOnce(&mut VotePenaltyCounter),
    ) -> Result<(), OracleError> {
        let mut counter = self.get_vote_penalty_counter(validator)?;
        update(&mut counter);
        self.set_vote_penalty_counter(validator, &counter)
    }

    pub fn increment_miss_count(&self, validator: &ValidatorId) -> Result<(), OracleError> {
        self.update_counter(validator, |c| c.miss_count += 1)
    }

    pub fn increment_abstain_count(&self, validator: &ValidatorId) -> Result<(), OracleError> {
        self.update_counter(validator, |c| c.abstain_count += 1)
    }

    pub fn increment_success_count(&self, validator: &ValidatorId) -> Result<(), OracleError> {
        self.update_counter(validator, |c| c.success_count += 1)
    }

    pub fn miss_count(&self, validator: &ValidatorId) -> Result<u64, OracleError> {
        Ok(self.get_vote_penalty_counter(validator)?.miss_count)
    }

    pub fn abstain_count(&self, validator: &ValidatorId) -> Result<u64, OracleError> {
        Ok(self.get_vote_penalty_counter(validator)?.abstain_count)
    }

    pub fn success_count(&self, validator: &ValidatorId) -> Result<u64, OracleError> {
        Ok(self.get_vote_penalty_counter(validator)?.success_count)
    }
}
