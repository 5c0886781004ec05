//! Events emitted while the oracle processes a block.

use oracle_types::{Dec, Denom, ValidatorId};

/// Oracle events that observers can subscribe to via the [`EventBus`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OracleEvent {
    /// A tally produced a new agreed rate.
    ExchangeRateUpdate { denom: Denom, exchange_rate: Dec },
    /// A price snapshot was recorded.
    PriceSnapshotAdded { timestamp: u64, items: usize },
    /// The vote target set was reconciled with the whitelist.
    VoteTargetsUpdated {
        added: Vec<Denom>,
        removed: Vec<Denom>,
    },
    /// A validator fell below the minimum valid vote rate for a slash window.
    /// Executing the slash is up to the subscriber.
    ValidatorUnderperformed {
        validator: ValidatorId,
        valid_vote_rate: Dec,
        slash_fraction: Dec,
    },
}

impl OracleEvent {
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::ExchangeRateUpdate { .. } => "exchange_rate_update",
            Self::PriceSnapshotAdded { .. } => "price_snapshot_added",
            Self::VoteTargetsUpdated { .. } => "vote_targets_update",
            Self::ValidatorUnderperformed { .. } => "oracle_slash",
        }
    }

    /// Key/value attributes in emission order.
    pub fn attributes(&self) -> Vec<(&'static str, String)> {
        fn join(denoms: &[Denom]) -> String {
            denoms
                .iter()
                .map(Denom::as_str)
                .collect::<Vec<_>>()
                .join(",")
        }

        match self {
            Self::ExchangeRateUpdate {
                denom,
                exchange_rate,
            } => vec![
                ("denom", denom.to_string()),
                ("exchange_rate", exchange_rate.to_string()),
            ],
            Self::PriceSnapshotAdded { timestamp, items } => vec![
                ("snapshot_timestamp", timestamp.to_string()),
                ("items", items.to_string()),
            ],
            Self::VoteTargetsUpdated { added, removed } => {
                vec![("added", join(added)), ("removed", join(removed))]
            }
            Self::ValidatorUnderperformed {
                validator,
                valid_vote_rate,
                slash_fraction,
            } => vec![
                ("validator", validator.to_string()),
                ("valid_vote_rate", valid_vote_rate.to_string()),
                ("slash_fraction", slash_fraction.to_string()),
            ],
        }
    }
}

type Listener = Box<dyn Fn(&OracleEvent) + Send + Sync>;

/// Synchronous fan-out of oracle events.
///
/// Listeners run inline inside block execution, in subscription order, so
/// they must be fast and deterministic. A listener registered with
/// [`EventBus::subscribe_to`] only sees events of one [`OracleEvent::event_type`].
#[derive(Default)]
pub struct EventBus {
    listeners: Vec<(Option<&'static str>, Listener)>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Receive every event.
    pub fn subscribe(&mut self, listener: Listener) {
        self.listeners.push((None, listener));
    }

    /// Receive only events whose `event_type()` is `event_type`.
    pub fn subscribe_to(&mut self, event_type: &'static str, listener: Listener) {
        self.listeners.push((Some(event_type), listener));
    }

    pub fn emit(&self, event: &OracleEvent) {
        let event_type = event.event_type();
        self.listeners
            .iter()
            .filter(|(filter, _)| filter.map_or(true, |wanted| wanted == event_type))
            .for_each(|(_, listener)| listener(event));
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}
