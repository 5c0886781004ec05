//! Storage layout and external collaborators for the price oracle.
//!
//! The oracle owns a key range inside the host chain's replicated key-value
//! store. [`KvStore`] is the only thing a backend implements; every typed
//! store below is a blanket implementation over it, so any backend gets the
//! whole oracle layout for free. The staking and bank modules are reached
//! through [`StakingKeeper`] and [`BankKeeper`].

pub mod aggregate_vote;
pub mod bank;
pub mod codec;
pub mod error;
pub mod exchange_rate;
pub mod keys;
pub mod kv;
pub mod params;
pub mod penalty;
pub mod snapshot;
pub mod staking;
pub mod vote_target;

pub use aggregate_vote::AggregateVoteStore;
pub use bank::BankKeeper;
pub use error::StoreError;
pub use exchange_rate::ExchangeRateStore;
pub use kv::{KvPair, KvStore};
pub use params::ParamStore;
pub use penalty::VotePenaltyStore;
pub use snapshot::PriceSnapshotStore;
pub use staking::StakingKeeper;
pub use vote_target::VoteTargetStore;
