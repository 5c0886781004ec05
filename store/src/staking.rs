//! Read access to the host chain's staking state.

use oracle_types::{ValidatorId, ValidatorInfo};

use crate::StoreError;

/// The staking module as seen by the oracle.
pub trait StakingKeeper {
    /// Validators ordered by descending bonded tokens.
    fn validators_by_power(&self) -> Result<Vec<ValidatorInfo>, StoreError>;

    fn validator(&self, operator: &ValidatorId) -> Result<Option<ValidatorInfo>, StoreError>;

    /// Tokens per unit of consensus power.
    fn power_reduction(&self) -> u128;

    /// Size of the active validator set.
    fn max_validators(&self) -> u32;

    fn total_bonded_tokens(&self) -> Result<u128, StoreError>;
}
