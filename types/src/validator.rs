//! Validator identity and the staking-side view of a validator.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Operator address of a validator.
///
/// Opaque to the oracle: it is only compared, ordered, and used as a map and
/// store key. Ordering is lexical on the address string and is what breaks
/// ties between equal votes.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ValidatorId(String);

impl ValidatorId {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl fmt::Display for ValidatorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ValidatorId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Bonding status reported by the staking module.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BondStatus {
    Bonded,
    Unbonding,
    Unbonded,
}

/// What the oracle needs to know about a validator from the staking module.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidatorInfo {
    pub operator: ValidatorId,
    /// Bonded stake in base token units.
    pub tokens: u128,
    pub status: BondStatus,
    pub jailed: bool,
}

impl ValidatorInfo {
    pub fn new(operator: ValidatorId, tokens: u128, status: BondStatus) -> Self {
        Self {
            operator,
            tokens,
            status,
            jailed: false,
        }
    }

    pub fn is_bonded(&self) -> bool {
        self.status == BondStatus::Bonded
    }

    /// Stake expressed as consensus power: `tokens / power_reduction`.
    ///
    /// A zero reduction factor yields zero power rather than a panic.
    pub fn consensus_power(&self, power_reduction: u128) -> u64 {
        if power_reduction == 0 {
            return 0;
        }
        u64::try_from(self.tokens / power_reduction).unwrap_or(u64::MAX)
    }
}
