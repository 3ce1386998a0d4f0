//! Re-synchronization tests
//!
//! A SIM that has seen higher SQNs than the network rejects the challenge
//! with AUTS; the engine recovers and the next vector is accepted.

use integration_tests::test_fixtures::{TS1_K, TS1_OP, TS1_RAND};
use integration_tests::{
    comp128_subscriber, gsm_milenage_subscriber, init_test_logging, milenage_subscriber,
    xor_subscriber, SimReject, TestResult, TestSubscriber,
};
use nextgauc_auc::{generate_vector_with_resync, global, sqn, Auc, AuthError};
use nextgauc_common::{AuthAlgo, AuthType};
use nextgauc_crypto::Milenage;
use proptest::prelude::*;

/// Drive one out-of-sync challenge through AUTS recovery
fn recover(sub: &mut TestSubscriber) -> TestResult<u64> {
    let auc = Auc::with_builtin();

    let stale = auc.generate_vector(&mut sub.record, Some(&TS1_RAND))?;
    let auts = match sub.sim.authenticate(&stale.rand, &stale.autn) {
        Err(SimReject::SyncFailure { auts }) => auts,
        other => return Err(format!("expected sync failure, got {other:?}").into()),
    };

    let fresh = auc.generate_vector_with_resync(&mut sub.record, &auts, &stale.rand, None)?;
    let answer = sub
        .sim
        .authenticate(&fresh.rand, &fresh.autn)
        .map_err(|e| format!("vector after resync rejected: {e:?}"))?;
    assert_eq!(answer.res, fresh.res());
    Ok(answer.sqn)
}

#[test]
fn test_milenage_resync_round_trip() -> TestResult {
    init_test_logging();
    let mut sub = milenage_subscriber(0, 0);
    sub.sim = sub.sim.with_accepted_sqn(0x1000);

    let accepted = recover(&mut sub)?;

    let umts = sub.record.umts_data().ok_or("not a UMTS record")?;
    assert_eq!(umts.sqn_ms, Some(0x1000));
    assert_eq!(umts.sqn, 0x1020);
    assert_eq!(accepted, 0x1020);
    Ok(())
}

#[test]
fn test_xor_resync_round_trip() -> TestResult {
    init_test_logging();
    let mut sub = xor_subscriber(0x20);
    sub.sim = sub.sim.with_accepted_sqn(0x400);

    let accepted = recover(&mut sub)?;
    assert_eq!(accepted, 0x420);
    assert_eq!(sub.record.umts_data().and_then(|u| u.sqn_ms), Some(0x400));
    Ok(())
}

#[test]
fn test_known_auts() -> TestResult {
    let mut sub = milenage_subscriber(0x20, 0);
    let auts = hex::decode("451e8beca51b8c4c47363e2f240e")?;

    generate_vector_with_resync(global(), &mut sub.record, &auts, &TS1_RAND, None)?;
    let umts = sub.record.umts_data().ok_or("not a UMTS record")?;
    assert_eq!(umts.sqn_ms, Some(0x120));
    assert_eq!(umts.sqn, 0x140);
    Ok(())
}

#[test]
fn test_corrupted_auts_leaves_record_unchanged() {
    init_test_logging();
    let auc = Auc::with_builtin();
    let mut sub = milenage_subscriber(0x40, 0);
    let mut auts =
        Milenage::new_with_op(&TS1_K, &TS1_OP).build_auts(&TS1_RAND, &sqn::to_bytes(0x200));
    auts[13] ^= 0x80;
    let before = sub.record.clone();

    let result = auc.generate_vector_with_resync(&mut sub.record, &auts, &TS1_RAND, None);
    assert_eq!(result, Err(AuthError::ResyncAuthenticationFailed));
    assert_eq!(sub.record, before);
}

#[test]
fn test_auts_length_checked_first() {
    let auc = Auc::with_builtin();
    let mut sub = comp128_subscriber(AuthAlgo::Comp128v1);

    let err = auc
        .generate_vector_with_resync(&mut sub.record, &[0; 13], &TS1_RAND, None)
        .unwrap_err();
    assert!(matches!(err, AuthError::InvalidArgument(_)));
}

#[test]
fn test_gsm_only_algorithm_not_applicable() {
    let auc = Auc::with_builtin();
    for algo in [AuthAlgo::Comp128v1, AuthAlgo::Comp128v2, AuthAlgo::Comp128v3] {
        let mut sub = comp128_subscriber(algo);
        assert_eq!(
            auc.generate_vector_with_resync(&mut sub.record, &[0; 14], &TS1_RAND, None),
            Err(AuthError::NotApplicable(algo))
        );
    }
}

#[test]
fn test_gsm_record_cannot_resync() {
    let auc = Auc::with_builtin();
    let mut sub = gsm_milenage_subscriber();
    assert_eq!(
        auc.generate_vector_with_resync(&mut sub.record, &[0; 14], &TS1_RAND, None),
        Err(AuthError::UnsupportedForAuthType {
            algo: AuthAlgo::Milenage,
            auth_type: AuthType::Gsm
        })
    );
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Any SQN_MS a SIM reports is recovered exactly and the engine moves past it
    #[test]
    fn prop_resync_recovers_sqn_ms(seq in 1u64..(1 << 40), sim_ind in 0u32..32, ind in 0u32..32) {
        let sqn_ms = sqn::compose(seq, sim_ind, 5);
        let mut sub = milenage_subscriber(0, ind);
        sub.sim = sub.sim.with_accepted_sqn(sqn_ms);
        let auts = sub.sim.auts(&TS1_RAND).unwrap();

        let vec = Auc::with_builtin()
            .generate_vector_with_resync(&mut sub.record, &auts, &TS1_RAND, None)
            .unwrap();
        let umts = sub.record.umts_data().unwrap();
        prop_assert_eq!(umts.sqn_ms, Some(sqn_ms));
        prop_assert!(umts.sqn > sqn_ms);
        prop_assert_eq!(sqn::ind(umts.sqn, 5), ind);
        prop_assert!(sub.sim.authenticate(&vec.rand, &vec.autn).is_ok());
    }
}
