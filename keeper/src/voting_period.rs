//! The per-block driver: tallies at the end of each voting period and
//! settles penalty counters at the end of each slash window.

use oracle_consensus::{classify, pick_reference_denom, tally, ClaimMap, TallyError, VoteOutcome};
use oracle_store::{BankKeeper, KvStore, StakingKeeper, VotePenaltyStore, VoteTargetStore};
use oracle_types::{
    BlockHeader, Dec, Denom, OracleError, OracleParams, PriceSnapshot, PriceSnapshotItem,
    ValidatorId,
};
use oracle_utils::{is_period_last_block, window_progress};
use std::collections::{BTreeMap, BTreeSet};

use crate::event::OracleEvent;
use crate::keeper::OracleKeeper;

/// What one voting period produced.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct VotingPeriodOutcome {
    /// `None` when no ballot reached the vote threshold.
    pub reference_denom: Option<Denom>,
    /// Final rates written this period.
    pub updated_rates: BTreeMap<Denom, Dec>,
    /// Vote targets with a ballot that produced no rate, with the reason:
    /// [`OracleError::BelowThreshold`] or a failed tally.
    pub skipped: BTreeMap<Denom, OracleError>,
    /// Votes with a non-positive rate, counted at zero power.
    pub invalid_votes: Vec<OracleError>,
    pub snapshot_taken: bool,
    /// Set when this block also closed a slash window.
    pub window_closed: bool,
    /// Validators reported for falling below the minimum valid vote rate.
    pub underperformers: Vec<ValidatorId>,
}

/// `reference_rate / cross_rate`; a zero cross rate yields zero.
fn cross_to_final(reference_rate: Dec, cross_rate: Dec) -> Result<Dec, TallyError> {
    if cross_rate.is_zero() {
        return Ok(Dec::ZERO);
    }
    reference_rate.checked_quo(cross_rate).ok_or_else(|| {
        TallyError::Arithmetic(format!("{reference_rate} / {cross_rate} overflows"))
    })
}

impl VotingPeriodOutcome {
    /// Denoms whose ballots missed the vote threshold.
    pub fn below_threshold(&self) -> Vec<Denom> {
        self.skipped
            .iter()
            .filter(|(_, reason)| matches!(reason, OracleError::BelowThreshold { .. }))
            .map(|(denom, _)| denom.clone())
            .collect()
    }
}

impl<S: KvStore, K: StakingKeeper, B: BankKeeper> OracleKeeper<S, K, B> {
    /// Run the oracle for the block described by `header`.
    ///
    /// Returns `None` on every block that does not close a voting period.
    pub fn run_voting_period(
        &self,
        header: &BlockHeader,
    ) -> Result<Option<VotingPeriodOutcome>, OracleError> {
        let params = self.params()?;
        if !is_period_last_block(header.height, params.vote_period) {
            return Ok(None);
        }

        let mut outcome = self.tally_period(header, &params)?;

        if is_period_last_block(header.height, params.slash_window) {
            outcome.window_closed = true;
            outcome.underperformers = self.slash_and_reset_counters(&params)?;
        }

        Ok(Some(outcome))
    }

    /// Claims for every bonded validator in the active set.
    pub fn build_claims(&self, height: u64) -> Result<ClaimMap, OracleError> {
        let validators = self.staking.validators_by_power()?;
        Ok(ClaimMap::from_validators(
            &validators,
            self.staking.max_validators(),
            self.staking.power_reduction(),
            height,
        ))
    }

    /// Total bonded stake expressed as consensus power.
    pub fn total_bonded_power(&self) -> Result<u64, OracleError> {
        let reduction = self.staking.power_reduction();
        if reduction == 0 {
            return Ok(0);
        }
        let tokens = self.staking.total_bonded_tokens()?;
        Ok(u64::try_from(tokens / reduction).unwrap_or(u64::MAX))
    }

    /// Voting periods elapsed in the current slash window.
    pub fn slash_window_progress(&self, height: u64) -> Result<u64, OracleError> {
        let params = self.params()?;
        Ok(window_progress(height, params.slash_window, params.vote_period))
    }

    fn tally_period(
        &self,
        header: &BlockHeader,
        params: &OracleParams,
    ) -> Result<VotingPeriodOutcome, OracleError> {
        let mut claims = self.build_claims(header.height)?;
        let vote_targets: BTreeSet<Denom> = self.store.iter_vote_targets()?.into_iter().collect();
        let total_targets = vote_targets.len() as u64;

        let ballots = self.organize_ballot_by_denom(&claims)?;
        let invalid_votes: Vec<OracleError> = ballots
            .values()
            .flat_map(|ballot| ballot.iter())
            .filter(|vote| !vote.exchange_rate.is_positive())
            .map(|vote| OracleError::InvalidVote {
                voter: vote.voter.to_string(),
                denom: vote.denom.to_string(),
            })
            .collect();
        for invalid in &invalid_votes {
            tracing::debug!(%invalid, "counting vote at zero power");
        }

        let selection = pick_reference_denom(
            ballots,
            &vote_targets,
            claims.total_power(),
            params.vote_threshold,
        );

        let mut outcome = VotingPeriodOutcome {
            reference_denom: selection.reference.clone(),
            skipped: selection
                .below_threshold
                .keys()
                .map(|denom| {
                    let reason = OracleError::BelowThreshold {
                        denom: denom.to_string(),
                    };
                    (denom.clone(), reason)
                })
                .collect(),
            invalid_votes,
            ..VotingPeriodOutcome::default()
        };

        if let Some((reference_denom, reference_ballot)) = selection.reference_ballot() {
            let reference_rate = reference_ballot.weighted_median_with_assertion(reference_denom)?;
            let reference_votes = reference_ballot.to_map();

            for (denom, ballot) in &selection.qualified {
                let is_reference = denom == reference_denom;
                let final_rate = if is_reference {
                    tally(ballot, params.reward_band, &mut claims)
                } else {
                    let cross = ballot.to_cross_rate_with_sort(&reference_votes);
                    tally(&cross, params.reward_band, &mut claims)
                        .and_then(|rate| cross_to_final(reference_rate, rate))
                };

                let final_rate = match final_rate {
                    Ok(rate) if rate.is_positive() => rate,
                    Ok(_) => {
                        tracing::warn!(%denom, "tally produced no rate; skipping");
                        outcome.skipped.insert(
                            denom.clone(),
                            OracleError::Tally(format!("no positive rate for {denom}")),
                        );
                        continue;
                    }
                    Err(e) => {
                        tracing::warn!(%denom, error = %e, "tally failed; skipping");
                        outcome.skipped.insert(denom.clone(), e.into());
                        continue;
                    }
                };

                tracing::debug!(%denom, %final_rate, is_reference, "denom tallied");
                self.set_base_exchange_rate_with_event(header, denom, final_rate)?;
                outcome.updated_rates.insert(denom.clone(), final_rate);
            }
        } else {
            tracing::info!(height = header.height, "no ballot reached the vote threshold");
        }

        // Below-threshold ballots only feed penalty bookkeeping.
        for (denom, ballot) in &selection.below_threshold {
            if let Err(e) = tally(ballot, params.reward_band, &mut claims) {
                tracing::warn!(%denom, error = %e, "below-threshold tally failed");
            }
        }

        for claim in claims.iter() {
            match classify(claim, total_targets) {
                VoteOutcome::Success => self.increment_success_count(&claim.voter)?,
                VoteOutcome::Abstain => self.increment_abstain_count(&claim.voter)?,
                VoteOutcome::Miss => self.increment_miss_count(&claim.voter)?,
            }
        }

        self.clear_ballots()?;
        self.apply_whitelist(&params.whitelist, &vote_targets)?;

        if !outcome.updated_rates.is_empty() {
            let items = self
                .base_exchange_rates()?
                .into_iter()
                .map(|(denom, rate)| PriceSnapshotItem::new(denom, rate))
                .collect();
            self.add_price_snapshot(&PriceSnapshot::new(header.time.as_secs(), items))?;
            outcome.snapshot_taken = true;
        }

        let bonded_power = self.total_bonded_power()?;
        tracing::info!(
            height = header.height,
            reference = ?outcome.reference_denom,
            updated = outcome.updated_rates.len(),
            skipped = outcome.skipped.len(),
            invalid_votes = outcome.invalid_votes.len(),
            claims = claims.len(),
            bonded_power,
            "voting period tallied"
        );
        Ok(outcome)
    }

    /// Report validators whose valid vote rate over the closing window fell
    /// below `min_valid_per_window`, then reset every counter.
    ///
    /// Only bonded, unjailed validators are reported. Returns them in
    /// validator order.
    pub fn slash_and_reset_counters(
        &self,
        params: &OracleParams,
    ) -> Result<Vec<ValidatorId>, OracleError> {
        let periods = params.vote_periods_per_window();
        let mut reported = Vec::new();

        for (validator, counter) in self.store.iter_vote_penalty_counters()? {
            let valid = periods.saturating_sub(counter.invalid_count());
            let valid_vote_rate = Dec::from_u64(valid)
                .checked_quo(Dec::from_u64(periods))
                .unwrap_or(Dec::ZERO);

            if valid_vote_rate < params.min_valid_per_window {
                let eligible = self
                    .staking
                    .validator(&validator)?
                    .is_some_and(|info| info.is_bonded() && !info.jailed);
                if eligible {
                    tracing::warn!(
                        %validator,
                        %valid_vote_rate,
                        miss = counter.miss_count,
                        abstain = counter.abstain_count,
                        "validator below minimum valid vote rate"
                    );
                    self.emit(OracleEvent::ValidatorUnderperformed {
                        validator: validator.clone(),
                        valid_vote_rate,
                        slash_fraction: params.slash_fraction,
                    });
                    reported.push(validator.clone());
                }
            }

            self.store.delete_vote_penalty_counter(&validator)?;
        }

        Ok(reported)
    }
}
