//! Nullable staking module.

use oracle_store::{StakingKeeper, StoreError};
use oracle_types::{BondStatus, ValidatorId, ValidatorInfo};
use std::sync::Mutex;

use crate::lock;

/// Tokens per unit of consensus power, matching the usual 10^6 micro-unit.
pub const DEFAULT_POWER_REDUCTION: u128 = 1_000_000;

/// An in-memory validator set.
pub struct NullStaking {
    validators: Mutex<Vec<ValidatorInfo>>,
    power_reduction: u128,
    max_validators: u32,
}

impl NullStaking {
    pub fn new() -> Self {
        Self {
            validators: Mutex::new(Vec::new()),
            power_reduction: DEFAULT_POWER_REDUCTION,
            max_validators: 100,
        }
    }

    pub fn with_max_validators(mut self, max_validators: u32) -> Self {
        self.max_validators = max_validators;
        self
    }

    /// Add or replace a validator.
    pub fn put_validator(&self, info: ValidatorInfo) {
        let mut validators = lock(&self.validators);
        validators.retain(|v| v.operator != info.operator);
        validators.push(info);
    }

    /// Add a bonded, unjailed validator with `power` units of consensus power.
    pub fn add_bonded(&self, operator: &str, power: u64) -> ValidatorId {
        let id = ValidatorId::new(operator);
        self.put_validator(ValidatorInfo::new(
            id.clone(),
            u128::from(power) * self.power_reduction,
            BondStatus::Bonded,
        ));
        id
    }

    pub fn set_status(&self, operator: &ValidatorId, status: BondStatus) {
        if let Some(v) = lock(&self.validators).iter_mut().find(|v| &v.operator == operator) {
            v.status = status;
        }
    }

    pub fn jail(&self, operator: &ValidatorId) {
        if let Some(v) = lock(&self.validators).iter_mut().find(|v| &v.operator == operator) {
            v.jailed = true;
        }
    }
}

impl Default for NullStaking {
    fn default() -> Self {
        Self::new()
    }
}

impl StakingKeeper for NullStaking {
    fn validators_by_power(&self) -> Result<Vec<ValidatorInfo>, StoreError> {
        let mut validators = lock(&self.validators).clone();
        validators.sort_by(|a, b| b.tokens.cmp(&a.tokens).then_with(|| a.operator.cmp(&b.operator)));
        Ok(validators)
    }

    fn validator(&self, operator: &ValidatorId) -> Result<Option<ValidatorInfo>, StoreError> {
        Ok(lock(&self.validators)
            .iter()
            .find(|v| &v.operator == operator)
            .cloned())
    }

    fn power_reduction(&self) -> u128 {
        self.power_reduction
    }

    fn max_validators(&self) -> u32 {
        self.max_validators
    }

    fn total_bonded_tokens(&self) -> Result<u128, StoreError> {
        Ok(lock(&self.validators)
            .iter()
            .filter(|v| v.is_bonded())
            .map(|v| v.tokens)
            .sum())
    }
}
