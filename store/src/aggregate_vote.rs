//! Aggregate vote storage: one pending submission per validator.

use oracle_types::{AggregateVote, ValidatorId};

use crate::codec::{decode, encode};
use crate::keys::{aggregate_vote_key, AGGREGATE_VOTE_PREFIX};
use crate::{KvStore, StoreError};

pub trait AggregateVoteStore {
    fn get_aggregate_vote(&self, voter: &ValidatorId)
        -> Result<Option<AggregateVote>, StoreError>;

    /// Store `vote` under its voter, replacing any earlier submission.
    fn set_aggregate_vote(&self, vote: &AggregateVote) -> Result<(), StoreError>;

    fn delete_aggregate_vote(&self, voter: &ValidatorId) -> Result<(), StoreError>;

    /// Every pending vote in ascending voter order.
    fn iter_aggregate_votes(&self) -> Result<Vec<AggregateVote>, StoreError>;
}

impl<T: KvStore + ?Sized> AggregateVoteStore for T {
    fn get_aggregate_vote(
        &self,
        voter: &ValidatorId,
    ) -> Result<Option<AggregateVote>, StoreError> {
        self.get(&aggregate_vote_key(voter))?
            .map(|bytes| decode(&bytes))
            .transpose()
    }

    fn set_aggregate_vote(&self, vote: &AggregateVote) -> Result<(), StoreError> {
        self.set(&aggregate_vote_key(&vote.voter), &encode(vote)?)
    }

    fn delete_aggregate_vote(&self, voter: &ValidatorId) -> Result<(), StoreError> {
        self.delete(&aggregate_vote_key(voter))
    }

    fn iter_aggregate_votes(&self) -> Result<Vec<AggregateVote>, StoreError> {
        self.iter_prefix(&[AGGREGATE_VOTE_PREFIX])?
            .into_iter()
            .map(|(_, value)| decode(&value))
            .collect()
    }
}
