//! Classification of each claim into a penalty outcome after the tally.

use crate::claim::Claim;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VoteOutcome {
    /// Won every ballot it was expected to vote in.
    Success,
    /// Voted, but not accurately for every target.
    Abstain,
    /// Submitted nothing that reached a ballot.
    Miss,
}

/// `total_targets` is the number of vote targets at the start of the period.
pub fn classify(claim: &Claim, total_targets: u64) -> VoteOutcome {
    if claim.win_count == total_targets {
        VoteOutcome::Success
    } else if !claim.did_vote {
        VoteOutcome::Miss
    } else {
        VoteOutcome::Abstain
    }
}
