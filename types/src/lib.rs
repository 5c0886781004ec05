//! Fundamental types for the price oracle.
//!
//! This crate defines the types shared across every other crate in the workspace:
//! the fixed-point decimal, validator and denom identifiers, block time, the
//! persisted oracle records, module parameters, and the error taxonomy.

pub mod decimal;
pub mod denom;
pub mod error;
pub mod exchange_rate;
pub mod params;
pub mod penalty;
pub mod snapshot;
pub mod time;
pub mod validator;

pub use decimal::{Dec, PRECISION};
pub use denom::{Denom, DenomEntry, DenomMetadata, DenomUnit};
pub use error::OracleError;
pub use exchange_rate::{AggregateVote, ExchangeRateTuple, OracleExchangeRate};
pub use params::OracleParams;
pub use penalty::VotePenaltyCounter;
pub use snapshot::{OracleTwap, PriceSnapshot, PriceSnapshotItem};
pub use time::{BlockHeader, Timestamp};
pub use validator::{BondStatus, ValidatorId, ValidatorInfo};
