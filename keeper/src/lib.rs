//! Price oracle keeper.
//!
//! Once per voting period validators submit aggregate price votes; on the
//! last block of the period [`OracleKeeper::run_voting_period`] turns them
//! into one agreed exchange rate per whitelisted denom:
//!
//! 1. Build claims from the bonded validator set.
//! 2. Organize pending votes into per-denom ballots.
//! 3. Pick the reference denom among ballots that reach the vote threshold.
//! 4. Tally the reference ballot, then every other qualifying ballot as a
//!    cross rate against it, and store the results.
//! 5. Tally below-threshold ballots for penalty bookkeeping only.
//! 6. Update penalty counters, clear votes, reconcile vote targets with the
//!    whitelist and record a price snapshot.
//!
//! On the last block of a slash window the counters are settled and reset.

pub mod ballot;
pub mod config;
pub mod event;
pub mod exchange_rate;
pub mod keeper;
pub mod penalty;
pub mod snapshot;
pub mod vote_target;
pub mod voting_period;

pub use config::OracleConfig;
pub use event::{EventBus, OracleEvent};
pub use keeper::OracleKeeper;
pub use voting_period::VotingPeriodOutcome;
