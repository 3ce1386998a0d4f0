//! Vector generation tests
//!
//! Vectors produced by the engine are checked against a simulated SIM
//! holding the same keys.

use integration_tests::test_fixtures::TS1_RAND;
use integration_tests::{
    comp128_subscriber, gsm_milenage_subscriber, h, init_test_logging, milenage_subscriber,
    rand_sequence, xor_subscriber, TestResult,
};
use nextgauc_auc::{
    gsm_kc_and_sres_from_umts, umts_ck_from_gsm, umts_ik_from_gsm, Auc, AuthError,
    DispatchOptions, OperatorKey, Registry, SubscriberAuthData, UmtsAuthData,
};
use nextgauc_common::{AuthAlgo, AuthType, AuthTypes};

/// Test set 1 through the whole engine
#[test]
fn test_milenage_test_set_1() -> TestResult {
    init_test_logging();
    let auc = Auc::with_builtin();
    let mut sub = milenage_subscriber(0, 0);

    let vec = auc.generate_vector(&mut sub.record, Some(&TS1_RAND))?;

    assert_eq!(hex::encode(vec.res()), "a54211d5e3ba50bf");
    assert_eq!(hex::encode(vec.ck), "b40ba9a3c58b2a05bbf0d987b21bf8cb");
    assert_eq!(hex::encode(vec.ik), "f769bcd751044604127672711c6d3441");
    assert_eq!(vec.auth_types, AuthTypes::GSM | AuthTypes::UMTS);
    assert_eq!(sub.sqn(), Some(32));
    Ok(())
}

/// All-zero MILENAGE subscriber built with the record defaults
#[test]
fn test_all_zero_subscriber_defaults() -> TestResult {
    let umts = UmtsAuthData::new([0; 16], OperatorKey::Op([0; 16]));
    let mut record = SubscriberAuthData::umts(AuthAlgo::Milenage, umts);

    let vec = Auc::with_builtin().generate_vector(&mut record, Some(&[0; 16]))?;
    assert_eq!(hex::encode(vec.autn), "7d3d6804db550000e2d2a6581f4ae850");
    assert_eq!(hex::encode(vec.res()), "8a5e8ded813e1b86");
    assert_eq!(record.umts_data().map(|u| u.sqn), Some(1));
    Ok(())
}

/// Consecutive MILENAGE vectors are all accepted by the SIM
#[test]
fn test_milenage_vectors_accepted_by_sim() -> TestResult {
    init_test_logging();
    let auc = Auc::with_builtin();
    let mut sub = milenage_subscriber(0, 3);

    for (i, rand) in rand_sequence(10).iter().enumerate() {
        let vec = auc.generate_vector(&mut sub.record, Some(rand))?;
        let answer = sub
            .sim
            .authenticate(&vec.rand, &vec.autn)
            .map_err(|e| format!("vector {i} rejected: {e:?}"))?;

        assert_eq!(answer.res, vec.res());
        assert_eq!(answer.ck, vec.ck);
        assert_eq!(answer.ik, vec.ik);
        assert_eq!(answer.sqn, 32 * (i as u64 + 1) + 3);
        assert_eq!(Some(answer.sqn), sub.sqn());
    }
    Ok(())
}

/// Keys derived for GSM interworking agree with c2/c3 of the UMTS keys
#[test]
fn test_milenage_gsm_outputs_match_conversion() -> TestResult {
    let auc = Auc::with_builtin();
    let mut sub = milenage_subscriber(0, 0);

    let vec = auc.generate_vector(&mut sub.record, Some(&TS1_RAND))?;
    let (kc, sres) = gsm_kc_and_sres_from_umts(&vec.ck, &vec.ik, vec.res());
    assert_eq!(vec.kc, kc);
    assert_eq!(vec.sres, sres);
    assert_eq!(sub.sim.run_gsm(&TS1_RAND), (vec.sres, vec.kc));
    Ok(())
}

#[test]
fn test_gsm_milenage_triplet() -> TestResult {
    let auc = Auc::with_builtin();
    let mut sub = gsm_milenage_subscriber();

    let vec = auc.generate_vector(&mut sub.record, Some(&TS1_RAND))?;
    assert_eq!(hex::encode(vec.sres), "46f8416a");
    assert_eq!(hex::encode(vec.kc), "eae4be823af9a08b");
    assert_eq!(vec.auth_types, AuthTypes::GSM);
    assert_eq!(vec.res_len, 0);
    Ok(())
}

#[test]
fn test_xor_vectors_accepted_by_sim() -> TestResult {
    init_test_logging();
    let auc = Auc::with_builtin();
    let mut sub = xor_subscriber(0);

    for rand in rand_sequence(4) {
        let vec = auc.generate_vector(&mut sub.record, Some(&rand))?;
        assert_eq!(vec.res().len(), 16);
        let answer = sub
            .sim
            .authenticate(&vec.rand, &vec.autn)
            .map_err(|e| format!("rejected: {e:?}"))?;
        assert_eq!(answer.res, vec.res());
        assert_eq!(sub.sim.run_gsm(&rand), (vec.sres, vec.kc));
    }
    assert_eq!(sub.sqn(), Some(4 * 32));
    Ok(())
}

#[test]
fn test_xor_known_vector() -> TestResult {
    let auc = Auc::with_builtin();
    let mut sub = xor_subscriber(0x01);

    let vec = auc.generate_vector(&mut sub.record, Some(&TS1_RAND))?;
    assert_eq!(hex::encode(vec.res()), "650e605627ae1c028bd5ec634c7f1989");
    assert_eq!(hex::encode(vec.autn), "5627ae1c02ab8000650e6056278e9c02");
    Ok(())
}

#[test]
fn test_comp128_triplets() -> TestResult {
    let auc = Auc::with_builtin();
    let rand: [u8; 16] = h("101112131415161718191a1b1c1d1e1f");
    let expected = [
        (AuthAlgo::Comp128v1, "3738f882", "39cda2dbba4a7c00"),
        (AuthAlgo::Comp128v2, "6f676f06", "6d8afa70723ff000"),
        (AuthAlgo::Comp128v3, "6f676f06", "6d8afa70723ff378"),
    ];

    for (algo, sres, kc) in expected {
        let mut sub = comp128_subscriber(algo);
        let vec = auc.generate_vector(&mut sub.record, Some(&rand))?;
        assert_eq!(hex::encode(vec.sres), sres, "{algo} SRES");
        assert_eq!(hex::encode(vec.kc), kc, "{algo} Kc");
        assert_eq!(vec.auth_types, AuthTypes::GSM, "{algo}");
        assert_eq!(sub.sim.run_gsm(&rand), (vec.sres, vec.kc), "{algo}");
    }
    Ok(())
}

#[test]
fn test_comp128_deterministic() -> TestResult {
    let auc = Auc::with_builtin();
    let mut sub = comp128_subscriber(AuthAlgo::Comp128v3);
    let a = auc.generate_vector(&mut sub.record, Some(&TS1_RAND))?;
    let b = auc.generate_vector(&mut sub.record, Some(&TS1_RAND))?;
    assert_eq!(a, b);
    Ok(())
}

#[test]
fn test_umts_keys_from_gsm() -> TestResult {
    let auc = Auc::new(
        Registry::with_builtin(),
        DispatchOptions {
            gsm_compat: true,
            umts_keys_from_gsm: true,
        },
    );
    let mut sub = comp128_subscriber(AuthAlgo::Comp128v1);

    let vec = auc.generate_vector(&mut sub.record, Some(&TS1_RAND))?;
    assert_eq!(vec.ck, umts_ck_from_gsm(&vec.kc));
    assert_eq!(vec.ik, umts_ik_from_gsm(&vec.kc));
    assert!(!vec.auth_types.contains(AuthType::Umts));
    Ok(())
}

#[test]
fn test_random_challenge_when_none_given() -> TestResult {
    let auc = Auc::with_builtin();
    let mut sub = milenage_subscriber(0, 0);

    let a = auc.generate_vector(&mut sub.record, None)?;
    let b = auc.generate_vector(&mut sub.record, None)?;
    assert_ne!(a.rand, b.rand);
    assert!(sub.sim.authenticate(&a.rand, &a.autn).is_ok());
    assert!(sub.sim.authenticate(&b.rand, &b.autn).is_ok());
    Ok(())
}

#[test]
fn test_comp128_rejects_umts_record() {
    let auc = Auc::with_builtin();
    let mut record = milenage_subscriber(0, 0).record;
    record.algo = AuthAlgo::Comp128v2;
    let before = record.clone();

    let err = auc.generate_vector(&mut record, Some(&TS1_RAND)).unwrap_err();
    assert_eq!(
        err,
        AuthError::UnsupportedForAuthType {
            algo: AuthAlgo::Comp128v2,
            auth_type: AuthType::Umts
        }
    );
    assert_eq!(record, before);
}

#[test]
fn test_record_without_secret_rejected() {
    let auc = Auc::with_builtin();
    let mut record = SubscriberAuthData {
        algo: AuthAlgo::Milenage,
        ..SubscriberAuthData::default()
    };
    assert_eq!(
        auc.generate_vector(&mut record, None),
        Err(AuthError::InvalidAuthType)
    );
}

#[test]
fn test_exhausted_sequence_leaves_record_unchanged() {
    let auc = Auc::with_builtin();
    let mut sub = milenage_subscriber(nextgauc_auc::sqn::SQN_MAX, 0);
    let before = sub.record.clone();

    let err = auc.generate_vector(&mut sub.record, Some(&TS1_RAND)).unwrap_err();
    assert!(matches!(err, AuthError::SequenceExhausted { .. }));
    assert_eq!(sub.record, before);
}
