//! Grouping of aggregate votes into per-denom ballots.

use oracle_types::AggregateVote;
use oracle_types::Denom;
use std::collections::BTreeMap;

use crate::ballot::{Ballot, VoteForTally};
use crate::claim::ClaimMap;

/// One sorted ballot per denom that received at least one vote.
///
/// Votes from validators without a claim are dropped. A vote with a
/// non-positive rate is kept at zero power.
pub fn organize_ballot_by_denom<'a>(
    votes: impl IntoIterator<Item = &'a AggregateVote>,
    claims: &ClaimMap,
) -> BTreeMap<Denom, Ballot> {
    let mut ballots: BTreeMap<Denom, Ballot> = BTreeMap::new();
    for vote in votes {
        let Some(claim) = claims.get(&vote.voter) else {
            tracing::debug!(voter = %vote.voter, "dropping vote from validator without a claim");
            continue;
        };
        for tuple in &vote.exchange_rate_tuples {
            ballots
                .entry(tuple.denom.clone())
                .or_default()
                .push(VoteForTally::new(
                    tuple.denom.clone(),
                    tuple.exchange_rate,
                    vote.voter.clone(),
                    claim.power,
                ));
        }
    }
    for ballot in ballots.values_mut() {
        ballot.sort();
    }
    ballots
}
