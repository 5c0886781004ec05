//! Ballots: the sorted votes for one denom in one period.

use oracle_types::{Dec, Denom, ValidatorId};
use std::collections::BTreeMap;

use crate::TallyError;

/// A single validator's vote for one denom, weighted by its claim.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VoteForTally {
    pub denom: Denom,
    pub exchange_rate: Dec,
    pub voter: ValidatorId,
    /// Zero whenever `exchange_rate` is not strictly positive.
    pub power: u64,
}

impl VoteForTally {
    pub fn new(denom: Denom, exchange_rate: Dec, voter: ValidatorId, power: u64) -> Self {
        let power = if exchange_rate.is_positive() { power } else { 0 };
        Self {
            denom,
            exchange_rate,
            voter,
            power,
        }
    }
}

/// The votes for one denom, ordered by `(exchange_rate, voter)` once sorted.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Ballot {
    votes: Vec<VoteForTally>,
}

impl Ballot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a ballot and sort it.
    pub fn from_votes(votes: Vec<VoteForTally>) -> Self {
        let mut ballot = Self { votes };
        ballot.sort();
        ballot
    }

    pub fn push(&mut self, vote: VoteForTally) {
        self.votes.push(vote);
    }

    /// Ascending by rate, ties by voter.
    pub fn sort(&mut self) {
        self.votes.sort_by(|a, b| {
            a.exchange_rate
                .cmp(&b.exchange_rate)
                .then_with(|| a.voter.cmp(&b.voter))
        });
    }

    pub fn votes(&self) -> &[VoteForTally] {
        &self.votes
    }

    pub fn iter(&self) -> impl Iterator<Item = &VoteForTally> {
        self.votes.iter()
    }

    pub fn len(&self) -> usize {
        self.votes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.votes.is_empty()
    }

    /// Total power behind this ballot.
    pub fn power(&self) -> u64 {
        self.votes
            .iter()
            .fold(0u64, |acc, v| acc.saturating_add(v.power))
    }

    /// Each voter's submitted rate.
    pub fn to_map(&self) -> BTreeMap<ValidatorId, Dec> {
        self.votes
            .iter()
            .map(|v| (v.voter.clone(), v.exchange_rate))
            .collect()
    }

    /// Re-express this ballot against a reference denom.
    ///
    /// Each vote becomes `reference_rate / rate`, using the same voter's rate
    /// for the reference denom. Votes from voters with no reference rate are
    /// dropped. A non-positive rate on either side yields a zero-power vote
    /// at rate zero. The result is sorted.
    pub fn to_cross_rate_with_sort(&self, reference: &BTreeMap<ValidatorId, Dec>) -> Ballot {
        let votes = self
            .votes
            .iter()
            .filter_map(|vote| {
                let reference_rate = reference.get(&vote.voter)?;
                let cross = if reference_rate.is_positive() && vote.exchange_rate.is_positive() {
                    reference_rate.checked_quo(vote.exchange_rate)
                } else {
                    None
                };
                let mut converted = vote.clone();
                match cross {
                    Some(rate) => converted.exchange_rate = rate,
                    None => {
                        converted.exchange_rate = Dec::ZERO;
                        converted.power = 0;
                    }
                }
                Some(converted)
            })
            .collect();
        Ballot::from_votes(votes)
    }

    /// Stake-weighted median of a sorted ballot.
    ///
    /// Returns the rate of the first vote at which cumulative power reaches
    /// `ceil(total / 2)`. When the total is even and that vote lands exactly
    /// on the half, the result is the midpoint between it and the next vote
    /// carrying power. Zero total power yields zero.
    pub fn weighted_median(&self) -> Dec {
        let total = self.power();
        if total == 0 {
            return Dec::ZERO;
        }
        let target = total.div_ceil(2);
        let mut cumulative = 0u64;
        for (i, vote) in self.votes.iter().enumerate() {
            cumulative = cumulative.saturating_add(vote.power);
            if cumulative < target {
                continue;
            }
            if total % 2 == 0 && cumulative == total / 2 {
                let next = self.votes[i + 1..].iter().find(|v| v.power > 0);
                if let Some(next) = next {
                    return vote.exchange_rate.midpoint(next.exchange_rate);
                }
            }
            return vote.exchange_rate;
        }
        Dec::ZERO
    }

    /// [`Ballot::weighted_median`] for a ballot that must not be empty.
    pub fn weighted_median_with_assertion(&self, denom: &Denom) -> Result<Dec, TallyError> {
        if self.is_empty() {
            return Err(TallyError::EmptyBallot {
                denom: denom.to_string(),
            });
        }
        Ok(self.weighted_median())
    }
}
