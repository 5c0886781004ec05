//! The oracle keeper: owns the module store and its collaborators.

use oracle_store::{BankKeeper, KvStore, ParamStore, StakingKeeper};
use oracle_types::{OracleError, OracleParams};

use crate::event::{EventBus, OracleEvent};

/// Entry point for every oracle operation.
///
/// The keeper is generic over the host chain's key-value store and the
/// staking and bank modules. It holds no state of its own besides the event
/// bus; everything else lives in the store, so two keepers over the same
/// store observe the same oracle.
pub struct OracleKeeper<S, K, B> {
    pub(crate) store: S,
    pub(crate) staking: K,
    pub(crate) bank: B,
    pub(crate) events: EventBus,
}

impl<S: KvStore, K: StakingKeeper, B: BankKeeper> OracleKeeper<S, K, B> {
    pub fn new(store: S, staking: K, bank: B) -> Self {
        Self {
            store,
            staking,
            bank,
            events: EventBus::new(),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn staking(&self) -> &K {
        &self.staking
    }

    pub fn bank(&self) -> &B {
        &self.bank
    }

    pub fn subscribe(&mut self, listener: Box<dyn Fn(&OracleEvent) + Send + Sync>) {
        self.events.subscribe(listener);
    }

    /// Subscribe to one event type, e.g. `"oracle_slash"`.
    pub fn subscribe_to(
        &mut self,
        event_type: &'static str,
        listener: Box<dyn Fn(&OracleEvent) + Send + Sync>,
    ) {
        self.events.subscribe_to(event_type, listener);
    }

    pub(crate) fn emit(&self, event: OracleEvent) {
        tracing::trace!(event_type = event.event_type(), "emitting oracle event");
        self.events.emit(&event);
    }

    /// Current module parameters. Fails with `NotFound` before genesis.
    pub fn params(&self) -> Result<OracleParams, OracleError> {
        self.store
            .get_params()?
            .ok_or_else(|| OracleError::not_found("params", "oracle"))
    }

    /// Validate and persist `params`.
    pub fn set_params(&self, params: &OracleParams) -> Result<(), OracleError> {
        params.validate()?;
        self.store.set_params(params)?;
        tracing::info!(
            vote_period = params.vote_period,
            slash_window = params.slash_window,
            whitelist = params.whitelist.len(),
            "oracle params updated"
        );
        Ok(())
    }
}
