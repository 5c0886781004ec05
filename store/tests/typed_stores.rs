use oracle_nullables::NullKvStore;
use oracle_store::keys::{EXCHANGE_RATE_PREFIX, VOTE_TARGET_PREFIX};
use oracle_store::{
    AggregateVoteStore, ExchangeRateStore, ParamStore, PriceSnapshotStore, VotePenaltyStore,
    VoteTargetStore,
};
use oracle_types::{
    AggregateVote, Dec, Denom, ExchangeRateTuple, OracleExchangeRate, OracleParams,
    PriceSnapshot, PriceSnapshotItem, ValidatorId, VotePenaltyCounter,
};

fn rate(r: i64, height: u64) -> OracleExchangeRate {
    OracleExchangeRate::new(Dec::from_int(r), height, height * 6_000)
}

#[test]
fn exchange_rates_roundtrip_and_iterate_by_denom() {
    let kv = NullKvStore::new();
    assert_eq!(kv.get_base_exchange_rate(&"ueth".into()).unwrap(), None);

    kv.set_base_exchange_rate(&"ueth".into(), &rate(3000, 5)).unwrap();
    kv.set_base_exchange_rate(&"ubtc".into(), &rate(60000, 5)).unwrap();
    kv.set_base_exchange_rate(&"uatom".into(), &rate(10, 4)).unwrap();

    assert_eq!(
        kv.get_base_exchange_rate(&"ueth".into()).unwrap(),
        Some(rate(3000, 5))
    );
    let denoms: Vec<Denom> = kv
        .iter_base_exchange_rates()
        .unwrap()
        .into_iter()
        .map(|(d, _)| d)
        .collect();
    assert_eq!(denoms, vec!["uatom".into(), "ubtc".into(), "ueth".into()]);

    kv.delete_base_exchange_rate(&"ubtc".into()).unwrap();
    assert_eq!(kv.count_prefix(&[EXCHANGE_RATE_PREFIX]), 2);
}

#[test]
fn aggregate_vote_overwrites_per_voter() {
    let kv = NullKvStore::new();
    let voter = ValidatorId::new("val-a");
    let first = AggregateVote::new(
        voter.clone(),
        vec![ExchangeRateTuple::new("ueth", Dec::from_int(1))],
    );
    let second = AggregateVote::new(
        voter.clone(),
        vec![ExchangeRateTuple::new("ueth", Dec::from_int(2))],
    );
    kv.set_aggregate_vote(&first).unwrap();
    kv.set_aggregate_vote(&second).unwrap();

    assert_eq!(kv.iter_aggregate_votes().unwrap(), vec![second.clone()]);
    assert_eq!(kv.get_aggregate_vote(&voter).unwrap(), Some(second));

    kv.delete_aggregate_vote(&voter).unwrap();
    assert!(kv.iter_aggregate_votes().unwrap().is_empty());
}

#[test]
fn vote_targets_membership() {
    let kv = NullKvStore::new();
    kv.set_vote_target(&"ueth".into()).unwrap();
    kv.set_vote_target(&"ubtc".into()).unwrap();
    kv.set_vote_target(&"ueth".into()).unwrap();

    assert!(kv.is_vote_target(&"ueth".into()).unwrap());
    assert!(!kv.is_vote_target(&"uatom".into()).unwrap());
    assert_eq!(
        kv.iter_vote_targets().unwrap(),
        vec![Denom::new("ubtc"), Denom::new("ueth")]
    );

    kv.delete_vote_target(&"ueth".into()).unwrap();
    assert_eq!(kv.count_prefix(&[VOTE_TARGET_PREFIX]), 1);
}

#[test]
fn snapshots_iterate_chronologically_both_ways() {
    let kv = NullKvStore::new();
    for ts in [300u64, 5, 70_000, 256] {
        let snapshot = PriceSnapshot::new(
            ts,
            vec![PriceSnapshotItem::new("ueth", rate(ts as i64, 1))],
        );
        kv.set_price_snapshot(&snapshot).unwrap();
    }

    let forward: Vec<u64> = kv
        .iter_price_snapshots()
        .unwrap()
        .iter()
        .map(|s| s.snapshot_timestamp)
        .collect();
    assert_eq!(forward, vec![5, 256, 300, 70_000]);

    let backward: Vec<u64> = kv
        .iter_price_snapshots_rev()
        .unwrap()
        .iter()
        .map(|s| s.snapshot_timestamp)
        .collect();
    assert_eq!(backward, vec![70_000, 300, 256, 5]);

    kv.delete_price_snapshot(256).unwrap();
    assert!(kv.get_price_snapshot(256).unwrap().is_none());
    assert!(kv.get_price_snapshot(300).unwrap().is_some());
}

#[test]
fn penalty_counters_roundtrip() {
    let kv = NullKvStore::new();
    let a = ValidatorId::new("val-a");
    let b = ValidatorId::new("val-b");
    kv.set_vote_penalty_counter(&b, &VotePenaltyCounter::new(1, 0, 3))
        .unwrap();
    kv.set_vote_penalty_counter(&a, &VotePenaltyCounter::new(0, 2, 2))
        .unwrap();

    let all = kv.iter_vote_penalty_counters().unwrap();
    assert_eq!(all[0], (a.clone(), VotePenaltyCounter::new(0, 2, 2)));
    assert_eq!(all[1], (b, VotePenaltyCounter::new(1, 0, 3)));

    kv.delete_vote_penalty_counter(&a).unwrap();
    assert_eq!(kv.get_vote_penalty_counter(&a).unwrap(), None);
}

#[test]
fn params_absent_until_set() {
    let kv = NullKvStore::new();
    assert!(kv.get_params().unwrap().is_none());

    let params = OracleParams {
        vote_period: 5,
        ..OracleParams::default()
    };
    kv.set_params(&params).unwrap();
    assert_eq!(kv.get_params().unwrap(), Some(params));
}

#[test]
fn corrupt_record_is_a_serialization_error() {
    use oracle_store::{keys, KvStore, StoreError};

    let kv = NullKvStore::new();
    kv.set(&keys::exchange_rate_key(&"ueth".into()), &[0xff])
        .unwrap();
    assert!(matches!(
        kv.get_base_exchange_rate(&"ueth".into()),
        Err(StoreError::Serialization(_))
    ));
}
