//! The set of denoms currently being voted on.

use oracle_types::Denom;

use crate::codec::{decode, encode};
use crate::keys::{vote_target_key, VOTE_TARGET_PREFIX};
use crate::{KvStore, StoreError};

pub trait VoteTargetStore {
    fn is_vote_target(&self, denom: &Denom) -> Result<bool, StoreError>;

    fn set_vote_target(&self, denom: &Denom) -> Result<(), StoreError>;

    fn delete_vote_target(&self, denom: &Denom) -> Result<(), StoreError>;

    /// Every vote target in ascending denom order.
    fn iter_vote_targets(&self) -> Result<Vec<Denom>, StoreError>;
}

impl<T: KvStore + ?Sized> VoteTargetStore for T {
    fn is_vote_target(&self, denom: &Denom) -> Result<bool, StoreError> {
        self.has(&vote_target_key(denom))
    }

    fn set_vote_target(&self, denom: &Denom) -> Result<(), StoreError> {
        self.set(&vote_target_key(denom), &encode(denom)?)
    }

    fn delete_vote_target(&self, denom: &Denom) -> Result<(), StoreError> {
        self.delete(&vote_target_key(denom))
    }

    fn iter_vote_targets(&self) -> Result<Vec<Denom>, StoreError> {
        self.iter_prefix(&[VOTE_TARGET_PREFIX])?
            .into_iter()
            .map(|(_, value)| decode(&value))
            .collect()
    }
}
