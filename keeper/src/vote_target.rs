//! Vote targets and their reconciliation with the whitelist.

use oracle_store::{BankKeeper, ExchangeRateStore, KvStore, StakingKeeper, VoteTargetStore};
use oracle_types::{Denom, DenomEntry, DenomMetadata, OracleError};
use std::collections::BTreeSet;

use crate::event::OracleEvent;
use crate::keeper::OracleKeeper;

impl<S: KvStore, K: StakingKeeper, B: BankKeeper> OracleKeeper<S, K, B> {
    pub fn set_vote_target(&self, denom: &Denom) -> Result<(), OracleError> {
        self.store.set_vote_target(denom)?;
        Ok(())
    }

    /// `NotFound` if `denom` is not being voted on.
    pub fn vote_target(&self, denom: &Denom) -> Result<DenomEntry, OracleError> {
        if self.store.is_vote_target(denom)? {
            Ok(DenomEntry::new(denom.clone()))
        } else {
            Err(OracleError::not_found("vote target", denom))
        }
    }

    pub fn is_vote_target(&self, denom: &Denom) -> Result<bool, OracleError> {
        Ok(self.store.is_vote_target(denom)?)
    }

    /// Current vote targets in denom order.
    pub fn vote_targets(&self) -> Result<Vec<Denom>, OracleError> {
        Ok(self.store.iter_vote_targets()?)
    }

    pub fn clear_vote_targets(&self) -> Result<(), OracleError> {
        for denom in self.store.iter_vote_targets()? {
            self.store.delete_vote_target(&denom)?;
        }
        Ok(())
    }

    /// Bring the vote targets in line with `whitelist`.
    ///
    /// `current_targets` is the target set the caller last observed. Nothing
    /// happens when it already matches the whitelist. Otherwise denoms that
    /// left the whitelist lose their target and their stored rate, new denoms
    /// become targets, and every whitelisted denom without bank metadata gets
    /// the default micro-denom metadata. Returns whether anything changed.
    pub fn apply_whitelist(
        &self,
        whitelist: &[DenomEntry],
        current_targets: &BTreeSet<Denom>,
    ) -> Result<bool, OracleError> {
        let wanted: BTreeSet<Denom> = whitelist.iter().map(|e| e.name.clone()).collect();
        if &wanted == current_targets {
            return Ok(false);
        }

        let stored: BTreeSet<Denom> = self.store.iter_vote_targets()?.into_iter().collect();

        let removed: Vec<Denom> = stored
            .union(current_targets)
            .filter(|d| !wanted.contains(*d))
            .cloned()
            .collect();
        for denom in &removed {
            self.store.delete_vote_target(denom)?;
            self.store.delete_base_exchange_rate(denom)?;
        }

        let mut added = Vec::new();
        for denom in &wanted {
            if !stored.contains(denom) {
                self.store.set_vote_target(denom)?;
                added.push(denom.clone());
            }
            if self.bank.denom_metadata(denom)?.is_none() {
                self.bank
                    .set_denom_metadata(&DenomMetadata::for_micro_denom(denom))?;
                tracing::debug!(%denom, "registered denom metadata");
            }
        }

        tracing::info!(added = added.len(), removed = removed.len(), "vote targets updated");
        self.emit(OracleEvent::VoteTargetsUpdated { added, removed });
        Ok(true)
    }
}
