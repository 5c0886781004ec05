//! Reference denom selection.
//!
//! Every other denom is priced through the reference denom, so it must be the
//! denom with the broadest participation. Ballots that do not reach the vote
//! threshold are set aside: they are still tallied for penalty bookkeeping but
//! never produce a rate.

use oracle_types::{Dec, Denom};
use std::collections::{BTreeMap, BTreeSet};

use crate::ballot::Ballot;

/// The outcome of partitioning a period's ballots.
#[derive(Clone, Debug, Default)]
pub struct ReferenceSelection {
    /// `None` when no ballot qualified; no rate moves this period.
    pub reference: Option<Denom>,
    /// Ballots that reached the threshold, including the reference ballot.
    pub qualified: BTreeMap<Denom, Ballot>,
    /// Ballots of vote targets that missed the threshold.
    pub below_threshold: BTreeMap<Denom, Ballot>,
}

impl ReferenceSelection {
    pub fn reference_ballot(&self) -> Option<(&Denom, &Ballot)> {
        let denom = self.reference.as_ref()?;
        self.qualified.get_key_value(denom)
    }
}

/// Whether `ballot_power` reaches `threshold` of `total_power`.
///
/// A ballot with no power never passes, even against an empty validator set.
pub fn ballot_is_passing(ballot_power: u64, total_power: u64, threshold: Dec) -> bool {
    if ballot_power == 0 {
        return false;
    }
    // A requirement too large to represent cannot be met.
    threshold
        .checked_mul(Dec::from_u64(total_power))
        .is_some_and(|required| Dec::from_u64(ballot_power) >= required)
}

/// Partition `ballots` and pick the reference denom.
///
/// Ballots for denoms outside `vote_targets` are discarded. Among qualifying
/// ballots the one with the most power wins; ties go to the smallest denom.
pub fn pick_reference_denom(
    ballots: BTreeMap<Denom, Ballot>,
    vote_targets: &BTreeSet<Denom>,
    total_power: u64,
    vote_threshold: Dec,
) -> ReferenceSelection {
    let mut selection = ReferenceSelection::default();
    let mut largest_power = 0u64;

    for (denom, ballot) in ballots {
        if !vote_targets.contains(&denom) {
            tracing::debug!(%denom, "ignoring ballot for denom that is not a vote target");
            continue;
        }

        let power = ballot.power();
        if !ballot_is_passing(power, total_power, vote_threshold) {
            tracing::debug!(%denom, power, total_power, "ballot below vote threshold");
            selection.below_threshold.insert(denom, ballot);
            continue;
        }

        // Denoms arrive in ascending order, so a strict comparison keeps the
        // smallest name on ties.
        if power > largest_power || selection.reference.is_none() {
            largest_power = power;
            selection.reference = Some(denom.clone());
        }
        selection.qualified.insert(denom, ballot);
    }

    selection
}
