use std::sync::{Arc, Mutex};

use oracle_keeper::{OracleEvent, OracleKeeper};
use oracle_nullables::{NullBank, NullClock, NullKvStore, NullStaking};
use oracle_store::BankKeeper;
use oracle_types::{
    AggregateVote, BondStatus, Dec, Denom, DenomEntry, ExchangeRateTuple, OracleError,
    OracleParams, ValidatorId, VotePenaltyCounter,
};

type Keeper = OracleKeeper<NullKvStore, NullStaking, NullBank>;

/// A keeper whose params whitelist `whitelist` (also installed as the
/// genesis vote targets) and whose staking module has `validators` bonded.
/// The clock starts on height 1, the last block of the first period.
fn setup(whitelist: &[&str], validators: &[(&str, u64)]) -> (Keeper, NullClock) {
    let keeper = OracleKeeper::new(NullKvStore::new(), NullStaking::new(), NullBank::new());
    let params = OracleParams {
        whitelist: whitelist.iter().map(|d| DenomEntry::new(*d)).collect(),
        ..OracleParams::default()
    };
    keeper.set_params(&params).unwrap();
    for entry in &params.whitelist {
        keeper.set_vote_target(&entry.name).unwrap();
    }
    for (name, power) in validators {
        keeper.staking().add_bonded(name, *power);
    }
    (keeper, NullClock::new(1, 1_000, 6))
}

fn vote(keeper: &Keeper, voter: &str, rates: &[(&str, &str)]) {
    let tuples = rates
        .iter()
        .map(|(denom, rate)| ExchangeRateTuple::new(*denom, rate.parse().unwrap()))
        .collect();
    keeper
        .set_aggregate_exchange_rate_vote(&AggregateVote::new(voter.into(), tuples))
        .unwrap();
}

fn dec(s: &str) -> Dec {
    s.parse().unwrap()
}

fn counter(keeper: &Keeper, voter: &str) -> VotePenaltyCounter {
    keeper
        .get_vote_penalty_counter(&ValidatorId::new(voter))
        .unwrap()
}

#[test]
fn three_equal_voters_agree_on_middle_rate() {
    let (k, clock) = setup(&["ueth"], &[("val-a", 10), ("val-b", 10), ("val-c", 10)]);
    vote(&k, "val-a", &[("ueth", "1")]);
    vote(&k, "val-b", &[("ueth", "2")]);
    vote(&k, "val-c", &[("ueth", "3")]);

    let outcome = k.run_voting_period(&clock.header()).unwrap().unwrap();

    assert_eq!(outcome.reference_denom, Some(Denom::new("ueth")));
    let rate = k.get_base_exchange_rate(&"ueth".into()).unwrap();
    assert_eq!(rate.exchange_rate, dec("2"));
    assert_eq!(rate.last_update_height, 1);
    assert_eq!(rate.last_update_timestamp_millis, 1_000_000);

    // Only the median voter sits inside a 2% band.
    assert_eq!(counter(&k, "val-b"), VotePenaltyCounter::new(0, 0, 1));
    assert_eq!(counter(&k, "val-a"), VotePenaltyCounter::new(0, 1, 0));
    assert_eq!(counter(&k, "val-c"), VotePenaltyCounter::new(0, 1, 0));

    // Votes are consumed by the period.
    assert!(k.aggregate_exchange_rate_votes().unwrap().is_empty());
}

#[test]
fn even_power_split_takes_midpoint() {
    let (k, clock) = setup(&["ueth"], &[("val-a", 10), ("val-b", 10)]);
    vote(&k, "val-a", &[("ueth", "1")]);
    vote(&k, "val-b", &[("ueth", "2")]);

    k.run_voting_period(&clock.header()).unwrap();

    assert_eq!(
        k.get_base_exchange_rate(&"ueth".into()).unwrap().exchange_rate,
        dec("1.5")
    );
}

#[test]
fn whitelisted_denom_without_votes_has_no_rate() {
    let (k, clock) = setup(&["ueth", "uy"], &[("val-a", 10), ("val-b", 10), ("val-c", 10)]);
    for voter in ["val-a", "val-b", "val-c"] {
        vote(&k, voter, &[("ueth", "5")]);
    }

    let outcome = k.run_voting_period(&clock.header()).unwrap().unwrap();

    assert_eq!(outcome.reference_denom, Some(Denom::new("ueth")));
    assert!(!outcome.updated_rates.contains_key(&Denom::new("uy")));
    assert!(k.get_base_exchange_rate(&"uy".into()).unwrap_err().is_not_found());
    // Winning one of two targets is not a success.
    assert_eq!(counter(&k, "val-a"), VotePenaltyCounter::new(0, 1, 0));
}

#[test]
fn non_reference_denom_is_priced_through_cross_rate() {
    let (k, clock) = setup(&["ubtc", "ueth"], &[("val-a", 10), ("val-b", 10), ("val-c", 10)]);
    vote(&k, "val-a", &[("ueth", "2"), ("ubtc", "4")]);
    vote(&k, "val-b", &[("ueth", "2"), ("ubtc", "4")]);
    vote(&k, "val-c", &[("ueth", "2")]);

    let outcome = k.run_voting_period(&clock.header()).unwrap().unwrap();

    assert_eq!(outcome.reference_denom, Some(Denom::new("ueth")));
    assert_eq!(outcome.updated_rates[&Denom::new("ueth")], dec("2"));
    assert_eq!(outcome.updated_rates[&Denom::new("ubtc")], dec("4"));

    assert_eq!(counter(&k, "val-a"), VotePenaltyCounter::new(0, 0, 1));
    assert_eq!(counter(&k, "val-b"), VotePenaltyCounter::new(0, 0, 1));
    assert_eq!(counter(&k, "val-c"), VotePenaltyCounter::new(0, 1, 0));
}

#[test]
fn below_threshold_denom_is_not_updated_but_still_counts() {
    let (k, clock) = setup(&["ubtc", "ueth"], &[("val-a", 10), ("val-b", 10), ("val-c", 10)]);
    vote(&k, "val-a", &[("ueth", "2"), ("ubtc", "9")]);
    vote(&k, "val-b", &[("ueth", "2")]);
    vote(&k, "val-c", &[("ueth", "2")]);

    let outcome = k.run_voting_period(&clock.header()).unwrap().unwrap();

    assert_eq!(outcome.below_threshold(), vec![Denom::new("ubtc")]);
    assert_eq!(
        outcome.skipped[&Denom::new("ubtc")],
        OracleError::BelowThreshold {
            denom: "ubtc".into()
        }
    );
    assert!(k.get_base_exchange_rate(&"ubtc".into()).is_err());
    // val-a wins its own below-threshold ballot, so it covered both targets.
    assert_eq!(counter(&k, "val-a"), VotePenaltyCounter::new(0, 0, 1));
    assert_eq!(counter(&k, "val-b"), VotePenaltyCounter::new(0, 1, 0));
}

#[test]
fn silent_validator_misses_and_invalid_rate_abstains() {
    let (k, clock) = setup(
        &["ueth"],
        &[("val-a", 10), ("val-b", 10), ("val-c", 10), ("val-d", 10)],
    );
    vote(&k, "val-a", &[("ueth", "3")]);
    vote(&k, "val-b", &[("ueth", "3")]);
    vote(&k, "val-c", &[("ueth", "-1")]);

    k.run_voting_period(&clock.header()).unwrap();

    assert_eq!(
        k.get_base_exchange_rate(&"ueth".into()).unwrap().exchange_rate,
        dec("3")
    );
    assert_eq!(counter(&k, "val-c"), VotePenaltyCounter::new(0, 1, 0));
    assert_eq!(counter(&k, "val-d"), VotePenaltyCounter::new(1, 0, 0));
}

#[test]
fn unrepresentable_vote_below_threshold_does_not_stop_the_period() {
    let (k, clock) = setup(&["ubtc", "ueth"], &[("val-a", 10), ("val-b", 10), ("val-c", 10)]);
    let huge = Dec::MAX.to_string();
    vote(&k, "val-a", &[("ueth", "2"), ("ubtc", &huge)]);
    vote(&k, "val-b", &[("ueth", "2")]);
    vote(&k, "val-c", &[("ueth", "2")]);

    let outcome = k.run_voting_period(&clock.header()).unwrap().unwrap();

    assert_eq!(outcome.updated_rates[&Denom::new("ueth")], dec("2"));
    assert_eq!(outcome.below_threshold(), vec![Denom::new("ubtc")]);
    assert!(k.get_base_exchange_rate(&"ubtc".into()).is_err());
    // The overflowing ballot still counts as participation.
    assert_eq!(counter(&k, "val-a"), VotePenaltyCounter::new(0, 1, 0));
}

#[test]
fn unrepresentable_reference_band_skips_only_the_reference() {
    let (k, clock) = setup(&["ubtc", "ueth"], &[("val-a", 10), ("val-b", 10), ("val-c", 10)]);
    let huge = Dec::MAX.to_string();
    for voter in ["val-a", "val-b", "val-c"] {
        vote(&k, voter, &[("ubtc", &huge), ("ueth", "2")]);
    }

    let outcome = k.run_voting_period(&clock.header()).unwrap().unwrap();

    // Equal power: the smaller denom anchors the period.
    assert_eq!(outcome.reference_denom, Some(Denom::new("ubtc")));
    assert!(matches!(
        outcome.skipped.get(&Denom::new("ubtc")),
        Some(OracleError::Tally(_))
    ));
    assert!(k.get_base_exchange_rate(&"ubtc".into()).is_err());
    assert_eq!(
        k.get_base_exchange_rate(&"ueth".into()).unwrap().exchange_rate,
        dec("2")
    );
}

#[test]
fn denom_without_usable_cross_rate_is_skipped_alone() {
    let (k, clock) = setup(
        &["uatom", "ubtc", "uusd"],
        &[("val-a", 10), ("val-b", 10), ("val-c", 10), ("val-d", 10)],
    );
    vote(&k, "val-a", &[("uatom", "2"), ("ubtc", "4")]);
    vote(&k, "val-b", &[("uatom", "2"), ("ubtc", "4")]);
    // Their uusd ballot qualifies, but none of them priced the reference.
    vote(&k, "val-c", &[("uatom", "0"), ("uusd", "5")]);
    vote(&k, "val-d", &[("uatom", "0"), ("uusd", "5")]);

    let outcome = k.run_voting_period(&clock.header()).unwrap().unwrap();

    assert_eq!(outcome.reference_denom, Some(Denom::new("uatom")));
    assert_eq!(outcome.updated_rates.len(), 2);
    assert_eq!(outcome.updated_rates[&Denom::new("uatom")], dec("2"));
    assert_eq!(outcome.updated_rates[&Denom::new("ubtc")], dec("4"));
    assert_eq!(outcome.skipped.len(), 1);
    assert!(matches!(
        outcome.skipped.get(&Denom::new("uusd")),
        Some(OracleError::Tally(_))
    ));
    assert!(k.get_base_exchange_rate(&"uusd".into()).unwrap_err().is_not_found());
    assert_eq!(
        outcome.invalid_votes,
        vec![
            OracleError::InvalidVote {
                voter: "val-c".into(),
                denom: "uatom".into()
            },
            OracleError::InvalidVote {
                voter: "val-d".into(),
                denom: "uatom".into()
            },
        ]
    );
    assert!(outcome.snapshot_taken);
}

#[test]
fn votes_from_validators_without_claims_are_ignored() {
    let (k, clock) = setup(&["ueth"], &[("val-a", 10), ("val-b", 10)]);
    k.staking()
        .set_status(&ValidatorId::new("val-b"), BondStatus::Unbonding);
    vote(&k, "val-a", &[("ueth", "4")]);
    vote(&k, "val-b", &[("ueth", "400")]);
    vote(&k, "val-ghost", &[("ueth", "4000")]);

    k.run_voting_period(&clock.header()).unwrap();

    assert_eq!(
        k.get_base_exchange_rate(&"ueth".into()).unwrap().exchange_rate,
        dec("4")
    );
    assert!(k.vote_penalty_counters().unwrap().len() == 1);
    assert!(k.aggregate_exchange_rate_votes().unwrap().is_empty());
}

#[test]
fn no_votes_means_no_rates_and_no_snapshot() {
    let (k, clock) = setup(&["ueth"], &[("val-a", 10)]);

    let outcome = k.run_voting_period(&clock.header()).unwrap().unwrap();

    assert_eq!(outcome.reference_denom, None);
    assert!(outcome.updated_rates.is_empty());
    assert!(!outcome.snapshot_taken);
    assert!(k.price_snapshot_history().unwrap().is_empty());
    assert_eq!(counter(&k, "val-a"), VotePenaltyCounter::new(1, 0, 0));
}

#[test]
fn tally_only_runs_on_last_block_of_period() {
    let (k, clock) = setup(&["ueth"], &[("val-a", 10)]);
    clock.advance_block();
    vote(&k, "val-a", &[("ueth", "7")]);

    assert_eq!(k.run_voting_period(&clock.header()).unwrap(), None);
    assert!(k.get_base_exchange_rate(&"ueth".into()).is_err());

    let header = clock.advance_block();
    assert!(k.run_voting_period(&header).unwrap().is_some());
    assert_eq!(
        k.get_base_exchange_rate(&"ueth".into()).unwrap().exchange_rate,
        dec("7")
    );
}

#[test]
fn rate_update_events_are_emitted_in_denom_order() {
    let (mut k, clock) = setup(&["ubtc", "ueth"], &[("val-a", 10)]);
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    k.subscribe(Box::new(move |event| {
        if let OracleEvent::ExchangeRateUpdate { denom, .. } = event {
            sink.lock().unwrap().push(denom.to_string());
        }
    }));
    vote(&k, "val-a", &[("ueth", "2"), ("ubtc", "8")]);

    k.run_voting_period(&clock.header()).unwrap();

    assert_eq!(*seen.lock().unwrap(), vec!["ubtc", "ueth"]);
}

#[test]
fn snapshots_accumulate_and_feed_twap() {
    let (k, clock) = setup(&["ueth"], &[("val-a", 10)]);

    // Periods close at heights 1, 3 and 5; blocks are 6s apart.
    let mut header = clock.header();
    for rate in ["10", "20", "30"] {
        vote(&k, "val-a", &[("ueth", rate)]);
        let outcome = k.run_voting_period(&header).unwrap().unwrap();
        assert!(outcome.snapshot_taken);
        header = clock.advance_blocks(2);
    }

    let history = k.price_snapshot_history().unwrap();
    let stamps: Vec<u64> = history.iter().map(|s| s.snapshot_timestamp).collect();
    assert_eq!(stamps, vec![1_000, 1_012, 1_024]);

    // At t=1036 over 36s: 10 for 12s, 20 for 12s, 30 for 12s.
    let twaps = k.calculate_twaps(&header, 36).unwrap();
    assert_eq!(twaps.len(), 1);
    assert_eq!(twaps[0].twap, dec("20"));
    assert_eq!(twaps[0].lookback_seconds, 36);
}

#[test]
fn slash_window_reports_and_resets() {
    let (mut k, clock) = setup(&["ueth"], &[("val-a", 10), ("val-b", 10)]);
    let params = OracleParams {
        slash_window: 4,
        min_valid_per_window: dec("0.5"),
        ..k.params().unwrap()
    };
    k.set_params(&params).unwrap();

    let reported = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&reported);
    k.subscribe_to(
        "oracle_slash",
        Box::new(move |event| {
            if let OracleEvent::ValidatorUnderperformed { validator, .. } = event {
                sink.lock().unwrap().push(validator.clone());
            }
        }),
    );

    // Height 1 closes a period; height 3 closes the period and the window.
    vote(&k, "val-a", &[("ueth", "1")]);
    let first = k.run_voting_period(&clock.header()).unwrap().unwrap();
    assert!(!first.window_closed);
    assert_eq!(counter(&k, "val-b"), VotePenaltyCounter::new(1, 0, 0));

    vote(&k, "val-a", &[("ueth", "1")]);
    let header = clock.advance_blocks(2);
    let second = k.run_voting_period(&header).unwrap().unwrap();

    assert!(second.window_closed);
    assert_eq!(second.underperformers, vec![ValidatorId::new("val-b")]);
    assert_eq!(*reported.lock().unwrap(), vec![ValidatorId::new("val-b")]);
    assert!(k.vote_penalty_counters().unwrap().is_empty());
    assert_eq!(k.slash_window_progress(header.height).unwrap(), 1);
}

#[test]
fn whitelist_change_takes_effect_at_period_end() {
    let (k, clock) = setup(&["ueth"], &[("val-a", 10)]);
    k.set_base_exchange_rate(&clock.header(), &"ueth".into(), dec("1"))
        .unwrap();
    let params = OracleParams {
        whitelist: vec![DenomEntry::new("uatom")],
        ..k.params().unwrap()
    };
    k.set_params(&params).unwrap();

    k.run_voting_period(&clock.header()).unwrap();

    assert_eq!(k.vote_targets().unwrap(), vec![Denom::new("uatom")]);
    assert!(k.get_base_exchange_rate(&"ueth".into()).is_err());
    let meta = k.bank().denom_metadata(&"uatom".into()).unwrap().unwrap();
    assert_eq!(meta.display, "atom");
}

#[test]
fn store_failure_surfaces_as_storage_error() {
    let (k, clock) = setup(&["ueth"], &[("val-a", 10)]);
    vote(&k, "val-a", &[("ueth", "3")]);
    k.store().set_fail_writes(true);

    let err = k.run_voting_period(&clock.header()).unwrap_err();

    assert!(matches!(err, OracleError::Storage(_)));
}
