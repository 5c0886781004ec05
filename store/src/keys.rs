//! Store key layout.
//!
//! Every record lives under a one-byte prefix. Denom and validator keys append
//! the raw UTF-8 bytes, so iteration is lexical; snapshot keys append the
//! big-endian timestamp, so iteration is chronological.

use oracle_types::{Denom, ValidatorId};

use crate::StoreError;

pub const EXCHANGE_RATE_PREFIX: u8 = 0x01;
pub const VOTE_PENALTY_COUNTER_PREFIX: u8 = 0x03;
pub const AGGREGATE_VOTE_PREFIX: u8 = 0x05;
pub const VOTE_TARGET_PREFIX: u8 = 0x06;
pub const PRICE_SNAPSHOT_PREFIX: u8 = 0x08;
pub const PARAMS_KEY: &[u8] = &[0x10];

fn prefixed(prefix: u8, suffix: &[u8]) -> Vec<u8> {
    let mut key = Vec::with_capacity(1 + suffix.len());
    key.push(prefix);
    key.extend_from_slice(suffix);
    key
}

pub fn exchange_rate_key(denom: &Denom) -> Vec<u8> {
    prefixed(EXCHANGE_RATE_PREFIX, denom.as_bytes())
}

pub fn vote_penalty_counter_key(validator: &ValidatorId) -> Vec<u8> {
    prefixed(VOTE_PENALTY_COUNTER_PREFIX, validator.as_bytes())
}

pub fn aggregate_vote_key(validator: &ValidatorId) -> Vec<u8> {
    prefixed(AGGREGATE_VOTE_PREFIX, validator.as_bytes())
}

pub fn vote_target_key(denom: &Denom) -> Vec<u8> {
    prefixed(VOTE_TARGET_PREFIX, denom.as_bytes())
}

pub fn price_snapshot_key(timestamp: u64) -> Vec<u8> {
    prefixed(PRICE_SNAPSHOT_PREFIX, &timestamp.to_be_bytes())
}

fn suffix_str(key: &[u8]) -> Result<&str, StoreError> {
    let suffix = key
        .get(1..)
        .ok_or_else(|| StoreError::Serialization("empty store key".into()))?;
    std::str::from_utf8(suffix).map_err(|e| StoreError::Serialization(e.to_string()))
}

/// Recover the denom from an exchange-rate or vote-target key.
pub fn denom_from_key(key: &[u8]) -> Result<Denom, StoreError> {
    suffix_str(key).map(Denom::new)
}

/// Recover the validator from a penalty-counter or aggregate-vote key.
pub fn validator_from_key(key: &[u8]) -> Result<ValidatorId, StoreError> {
    suffix_str(key).map(ValidatorId::new)
}

pub fn timestamp_from_key(key: &[u8]) -> Result<u64, StoreError> {
    let bytes: [u8; 8] = key
        .get(1..)
        .and_then(|s| s.try_into().ok())
        .ok_or_else(|| StoreError::Serialization("invalid snapshot key length".into()))?;
    Ok(u64::from_be_bytes(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_keys_sort_numerically() {
        let mut keys = vec![
            price_snapshot_key(300),
            price_snapshot_key(2),
            price_snapshot_key(1 << 40),
            price_snapshot_key(10),
        ];
        keys.sort();
        let decoded: Vec<u64> = keys.iter().map(|k| timestamp_from_key(k).unwrap()).collect();
        assert_eq!(decoded, vec![2, 10, 300, 1 << 40]);
    }

    #[test]
    fn denom_keys_roundtrip_and_sort_lexically() {
        let mut keys = vec![
            exchange_rate_key(&"ueth".into()),
            exchange_rate_key(&"uatom".into()),
            exchange_rate_key(&"ubtc".into()),
        ];
        keys.sort();
        let decoded: Vec<String> = keys
            .iter()
            .map(|k| denom_from_key(k).unwrap().to_string())
            .collect();
        assert_eq!(decoded, vec!["uatom", "ubtc", "ueth"]);
    }

    #[test]
    fn validator_key_roundtrip() {
        let val = ValidatorId::new("kiivaloper1abc");
        let key = vote_penalty_counter_key(&val);
        assert_eq!(key[0], VOTE_PENALTY_COUNTER_PREFIX);
        assert_eq!(validator_from_key(&key).unwrap(), val);
    }

    #[test]
    fn bad_snapshot_key_is_rejected() {
        assert!(timestamp_from_key(&[PRICE_SNAPSHOT_PREFIX, 1, 2]).is_err());
    }
}
