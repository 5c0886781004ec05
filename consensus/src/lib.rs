//! Consensus: turning validator price votes into one agreed rate per denom.
//!
//! Every function here is pure: inputs come from the keeper, results go back
//! to it, and nothing touches the store. All arithmetic is fixed point, so
//! every validator computes bit-identical results.
//!
//! ## Module overview
//!
//! - [`claim`]: Validators eligible to vote this period and their power.
//! - [`ballot`]: Sorted per-denom ballots, weighted median, cross rates.
//! - [`organize`]: Grouping aggregate votes into ballots.
//! - [`reference`]: Vote threshold and reference denom selection.
//! - [`tally`]: Median plus reward band classification.
//! - [`penalty`]: Success / abstain / miss outcome per validator.
//! - [`error`]: Tally error types.

pub mod ballot;
pub mod claim;
pub mod error;
pub mod organize;
pub mod penalty;
pub mod reference;
pub mod tally;

pub use ballot::{Ballot, VoteForTally};
pub use claim::{Claim, ClaimMap};
pub use error::TallyError;
pub use organize::organize_ballot_by_denom;
pub use penalty::{classify, VoteOutcome};
pub use reference::{ballot_is_passing, pick_reference_denom, ReferenceSelection};
pub use tally::{reward_bounds, reward_spread, tally};
