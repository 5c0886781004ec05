//! Pending aggregate votes and ballot organisation.

use oracle_consensus::{organize_ballot_by_denom, Ballot, ClaimMap};
use oracle_store::{AggregateVoteStore, BankKeeper, KvStore, StakingKeeper};
use oracle_types::{AggregateVote, Denom, OracleError, ValidatorId};
use std::collections::BTreeMap;

use crate::keeper::OracleKeeper;

impl<S: KvStore, K: StakingKeeper, B: BankKeeper> OracleKeeper<S, K, B> {
    /// Record `vote` as its voter's submission for the current period.
    pub fn set_aggregate_exchange_rate_vote(&self, vote: &AggregateVote) -> Result<(), OracleError> {
        self.store.set_aggregate_vote(vote)?;
        Ok(())
    }

    pub fn get_aggregate_exchange_rate_vote(
        &self,
        voter: &ValidatorId,
    ) -> Result<AggregateVote, OracleError> {
        self.store
            .get_aggregate_vote(voter)?
            .ok_or_else(|| OracleError::not_found("aggregate vote", voter))
    }

    pub fn delete_aggregate_exchange_rate_vote(&self, voter: &ValidatorId) -> Result<(), OracleError> {
        self.store.delete_aggregate_vote(voter)?;
        Ok(())
    }

    /// Every pending submission in voter order.
    pub fn aggregate_exchange_rate_votes(&self) -> Result<Vec<AggregateVote>, OracleError> {
        Ok(self.store.iter_aggregate_votes()?)
    }

    /// Read every pending submission into per-denom ballots.
    pub fn organize_ballot_by_denom(
        &self,
        claims: &ClaimMap,
    ) -> Result<BTreeMap<Denom, Ballot>, OracleError> {
        let votes = self.store.iter_aggregate_votes()?;
        Ok(organize_ballot_by_denom(&votes, claims))
    }

    /// Delete every pending submission. Must run after the period's ballots
    /// have been organized.
    pub fn clear_ballots(&self) -> Result<usize, OracleError> {
        let votes = self.store.iter_aggregate_votes()?;
        for vote in &votes {
            self.store.delete_aggregate_vote(&vote.voter)?;
        }
        Ok(votes.len())
    }
}
