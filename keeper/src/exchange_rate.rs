//! Agreed exchange rates.

use oracle_store::{BankKeeper, ExchangeRateStore, KvStore, StakingKeeper, VoteTargetStore};
use oracle_types::{BlockHeader, Dec, Denom, OracleError, OracleExchangeRate};

use crate::event::OracleEvent;
use crate::keeper::OracleKeeper;

impl<S: KvStore, K: StakingKeeper, B: BankKeeper> OracleKeeper<S, K, B> {
    /// The agreed rate for `denom`. `NotFound` means no price yet.
    pub fn get_base_exchange_rate(&self, denom: &Denom) -> Result<OracleExchangeRate, OracleError> {
        self.store
            .get_base_exchange_rate(denom)?
            .ok_or_else(|| OracleError::not_found("exchange rate", denom))
    }

    /// Overwrite the rate for `denom`, stamped with the current block.
    pub fn set_base_exchange_rate(
        &self,
        header: &BlockHeader,
        denom: &Denom,
        exchange_rate: Dec,
    ) -> Result<(), OracleError> {
        let record =
            OracleExchangeRate::new(exchange_rate, header.height, header.time.as_millis());
        self.store.set_base_exchange_rate(denom, &record)?;
        Ok(())
    }

    /// [`Self::set_base_exchange_rate`] plus an [`OracleEvent::ExchangeRateUpdate`].
    pub fn set_base_exchange_rate_with_event(
        &self,
        header: &BlockHeader,
        denom: &Denom,
        exchange_rate: Dec,
    ) -> Result<(), OracleError> {
        self.set_base_exchange_rate(header, denom, exchange_rate)?;
        tracing::info!(%denom, %exchange_rate, height = header.height, "exchange rate updated");
        self.emit(OracleEvent::ExchangeRateUpdate {
            denom: denom.clone(),
            exchange_rate,
        });
        Ok(())
    }

    pub fn delete_base_exchange_rate(&self, denom: &Denom) -> Result<(), OracleError> {
        self.store.delete_base_exchange_rate(denom)?;
        Ok(())
    }

    /// Every stored rate in denom order. Each call reads the store afresh.
    pub fn iterate_base_exchange_rates(
        &self,
    ) -> Result<impl Iterator<Item = (Denom, OracleExchangeRate)>, OracleError> {
        Ok(self.store.iter_base_exchange_rates()?.into_iter())
    }

    pub fn base_exchange_rates(&self) -> Result<Vec<(Denom, OracleExchangeRate)>, OracleError> {
        Ok(self.store.iter_base_exchange_rates()?)
    }

    /// Denoms that currently have an agreed rate.
    pub fn actives(&self) -> Result<Vec<Denom>, OracleError> {
        Ok(self.iterate_base_exchange_rates()?.map(|(d, _)| d).collect())
    }

    /// Delete every rate whose denom is no longer a vote target.
    pub fn remove_excess_feeds(&self) -> Result<Vec<Denom>, OracleError> {
        let mut removed = Vec::new();
        for (denom, _) in self.iterate_base_exchange_rates()? {
            if !self.store.is_vote_target(&denom)? {
                self.store.delete_base_exchange_rate(&denom)?;
                removed.push(denom);
            }
        }
        if !removed.is_empty() {
            tracing::debug!(count = removed.len(), "removed exchange rates of non-targets");
        }
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use crate::event::OracleEvent;
    use crate::test_support::{header, keeper};
    use oracle_types::{Dec, Denom};
    use std::sync::{Arc, Mutex};

    #[test]
    fn set_and_get_rate() {
        let k = keeper();
        let h = header(7, 42);
        k.set_base_exchange_rate(&h, &"ueth".into(), Dec::from_int(3000))
            .unwrap();
        let rate = k.get_base_exchange_rate(&"ueth".into()).unwrap();
        assert_eq!(rate.exchange_rate, Dec::from_int(3000));
        assert_eq!(rate.last_update_height, 7);
        assert_eq!(rate.last_update_timestamp_millis, 42_000);
    }

    #[test]
    fn unknown_rate_is_not_found() {
        let k = keeper();
        let err = k.get_base_exchange_rate(&"uxyz".into()).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn deleted_rate_is_not_found() {
        let k = keeper();
        k.set_base_exchange_rate(&header(1, 1), &"ueth".into(), Dec::ONE)
            .unwrap();
        k.delete_base_exchange_rate(&"ueth".into()).unwrap();
        assert!(k.get_base_exchange_rate(&"ueth".into()).is_err());
    }

    #[test]
    fn with_event_emits_update() {
        let mut k = keeper();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        k.subscribe(Box::new(move |e| sink.lock().unwrap().push(e.clone())));

        k.set_base_exchange_rate_with_event(&header(1, 1), &"ueth".into(), Dec::from_int(5))
            .unwrap();

        assert_eq!(
            *seen.lock().unwrap(),
            vec![OracleEvent::ExchangeRateUpdate {
                denom: "ueth".into(),
                exchange_rate: Dec::from_int(5),
            }]
        );
    }

    #[test]
    fn actives_are_lexical() {
        let k = keeper();
        for d in ["ueth", "uatom", "ubtc"] {
            k.set_base_exchange_rate(&header(1, 1), &d.into(), Dec::ONE)
                .unwrap();
        }
        assert_eq!(
            k.actives().unwrap(),
            vec![Denom::new("uatom"), Denom::new("ubtc"), Denom::new("ueth")]
        );
        // Restartable: a second pass sees the same sequence.
        assert_eq!(k.iterate_base_exchange_rates().unwrap().count(), 3);
    }

    #[test]
    fn remove_excess_feeds_keeps_targets() {
        let k = keeper();
        k.clear_vote_targets().unwrap();
        k.set_vote_target(&"uatom".into()).unwrap();
        k.set_vote_target(&"ueth".into()).unwrap();
        for (d, r) in [("uatom", 1), ("ueth", 2), ("ukii", 3)] {
            k.set_base_exchange_rate(&header(1, 1), &d.into(), Dec::from_int(r))
                .unwrap();
        }

        let removed = k.remove_excess_feeds().unwrap();

        assert_eq!(removed, vec![Denom::new("ukii")]);
        assert_eq!(
            k.actives().unwrap(),
            vec![Denom::new("uatom"), Denom::new("ueth")]
        );
    }
}
