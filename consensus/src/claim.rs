//! Voting claims: which validators may vote this period, and with what power.
//!
//! Claims are rebuilt from the staking module at every tally and never
//! persisted. The tally records each validator's result on its claim, which
//! the penalty bookkeeping then reads back.

use oracle_types::{ValidatorId, ValidatorInfo};
use std::collections::BTreeMap;

/// One validator's eligibility and results for the current period.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Claim {
    /// Consensus power at the start of the tally.
    pub power: u64,
    /// Sum of power over the ballots this validator won.
    pub weight: u64,
    /// Number of ballots in which this validator voted inside the reward band.
    pub win_count: u64,
    /// Whether the validator appeared in any tallied ballot.
    pub did_vote: bool,
    /// Height of the block that built this claim.
    pub since_block: u64,
    pub voter: ValidatorId,
}

impl Claim {
    pub fn new(power: u64, since_block: u64, voter: ValidatorId) -> Self {
        Self {
            power,
            weight: 0,
            win_count: 0,
            did_vote: false,
            since_block,
            voter,
        }
    }
}

/// Claims keyed by validator, iterated in validator order.
#[derive(Clone, Debug, Default)]
pub struct ClaimMap {
    claims: BTreeMap<ValidatorId, Claim>,
}

impl ClaimMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build claims from `validators` (ordered by descending power).
    ///
    /// Only the first `max_validators` entries are considered. Entries that
    /// are not bonded are skipped, not given zero power.
    pub fn from_validators(
        validators: &[ValidatorInfo],
        max_validators: u32,
        power_reduction: u128,
        since_block: u64,
    ) -> Self {
        let mut map = Self::new();
        for validator in validators.iter().take(max_validators as usize) {
            if !validator.is_bonded() {
                continue;
            }
            map.insert(Claim::new(
                validator.consensus_power(power_reduction),
                since_block,
                validator.operator.clone(),
            ));
        }
        map
    }

    /// Insert a claim, replacing any existing claim for the same voter.
    pub fn insert(&mut self, claim: Claim) {
        self.claims.insert(claim.voter.clone(), claim);
    }

    pub fn get(&self, voter: &ValidatorId) -> Option<&Claim> {
        self.claims.get(voter)
    }

    pub fn get_mut(&mut self, voter: &ValidatorId) -> Option<&mut Claim> {
        self.claims.get_mut(voter)
    }

    pub fn contains(&self, voter: &ValidatorId) -> bool {
        self.claims.contains_key(voter)
    }

    /// Sum of every claim's power.
    pub fn total_power(&self) -> u64 {
        self.claims
            .values()
            .fold(0u64, |acc, c| acc.saturating_add(c.power))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Claim> {
        self.claims.values()
    }

    pub fn len(&self) -> usize {
        self.claims.len()
    }

    pub fn is_empty(&self) -> bool {
        self.claims.is_empty()
    }
}
