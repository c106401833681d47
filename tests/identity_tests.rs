//! Integration tests for subscriber identity generation

use std::collections::{BTreeMap, HashSet};
use telco_synth::subscriber::{is_luhn_valid, IdentityFactory, SubscriberPool};
use telco_synth::types::*;
use telco_synth::SynthesisError;

/// Hand-checks `^\+216(3[0-5]|5[0-5])\d{6}$`
fn matches_tunisian_pattern(msisdn: &str) -> bool {
    let Some(rest) = msisdn.strip_prefix("+216") else {
        return false;
    };
    let bytes = rest.as_bytes();
    bytes.len() == 8
        && bytes.iter().all(u8::is_ascii_digit)
        && (bytes[0] == b'3' || bytes[0] == b'5')
        && (b'0'..=b'5').contains(&bytes[1])
}

#[test]
fn test_home_msisdn_follows_ndc_ranges() {
    let plan = MsisdnPlan::national(0, "+216", NdcSpec::Ranges(vec![[30, 35], [50, 55]]));
    let mut factory = IdentityFactory::with_seed(31);

    let mut ndcs = HashSet::new();
    for _ in 0..2000 {
        let msisdn = factory.generate_msisdn(SubscriberType::Home, &plan).unwrap();
        assert!(matches_tunisian_pattern(&msisdn), "unexpected MSISDN {}", msisdn);
        assert_ne!(msisdn.as_bytes()[6], b'0', "subscriber number has a leading zero");
        ndcs.insert(msisdn[4..6].to_string());
    }

    // Both ranges get used
    assert!(ndcs.iter().any(|ndc| ndc.starts_with('3')));
    assert!(ndcs.iter().any(|ndc| ndc.starts_with('5')));
}

#[test]
fn test_international_msisdn_uses_configured_prefixes() {
    let plan = MsisdnPlan::international(0, &["+33", "+39"], 9);
    let mut factory = IdentityFactory::with_seed(32);

    for _ in 0..200 {
        let msisdn = factory.generate_msisdn(SubscriberType::International, &plan).unwrap();
        assert!(msisdn.starts_with("+33") || msisdn.starts_with("+39"));
        assert_eq!(msisdn.len(), 3 + 9);
    }
}

#[test]
fn test_generated_identities_are_well_formed() {
    let config = IdentityConfig::default();
    let subscribers = IdentityFactory::with_seed(33).generate_subscribers(&config).unwrap();

    assert_eq!(subscribers.len(), config.total_subscribers());

    for subscriber in &subscribers {
        assert!(is_luhn_valid(&subscriber.imei), "IMEI {} fails Luhn", subscriber.imei);
        assert_eq!(subscriber.imei.len(), 15);

        assert_eq!(subscriber.imsi.len(), 15);
        assert!(subscriber.imsi.chars().all(|c| c.is_ascii_digit()));

        assert_eq!(subscriber.sim_id.len(), 20);
        assert!(subscriber.sim_id.starts_with("89"));

        let digits = subscriber.msisdn_digits().len();
        assert!((6..=15).contains(&digits));
    }

    let ids: HashSet<_> = subscribers.iter().map(|s| s.id).collect();
    assert_eq!(ids.len(), subscribers.len());
}

#[test]
fn test_home_subscribers_use_home_plmn() {
    let config = IdentityConfig::default();
    let subscribers = IdentityFactory::with_seed(34).generate_subscribers(&config).unwrap();

    for subscriber in subscribers.iter().filter(|s| s.subscriber_type == SubscriberType::Home) {
        assert!(subscriber.imsi.starts_with("605002"), "IMSI {}", subscriber.imsi);
    }
}

#[test]
fn test_account_mix_is_plausible() {
    let mut config = IdentityConfig::default();
    if let Some(plan) = config.subscribers.get_mut(&SubscriberType::Home) {
        plan.count = 5000;
    }
    let subscribers = IdentityFactory::with_seed(35).generate_subscribers(&config).unwrap();

    let prepaid = subscribers
        .iter()
        .filter(|s| s.account_type == AccountType::Prepaid)
        .count() as f64
        / subscribers.len() as f64;
    let active = subscribers
        .iter()
        .filter(|s| s.account_status == AccountStatus::Active)
        .count() as f64
        / subscribers.len() as f64;

    assert!((prepaid - 0.8).abs() < 0.03, "prepaid share {}", prepaid);
    assert!((active - 0.9).abs() < 0.03, "active share {}", active);
}

#[test]
fn test_missing_country_code_names_parameter() {
    let mut plan = MsisdnPlan::national(10, "+216", NdcSpec::Single(20));
    plan.country_code = None;
    let config = IdentityConfig {
        home_plmn: None,
        subscribers: BTreeMap::from([(SubscriberType::National, plan)]),
    };

    match IdentityFactory::with_seed(36).generate_subscribers(&config) {
        Err(SynthesisError::ConfigurationError(ConfigValidationError::MissingParameter {
            subscriber_type,
            parameter,
        })) => {
            assert_eq!(subscriber_type, SubscriberType::National);
            assert_eq!(parameter, "country_code");
        }
        other => panic!("Expected MissingParameter error, got {:?}", other),
    }
}

#[test]
fn test_empty_prefix_list_rejected() {
    let plan = MsisdnPlan::international(10, &[], 9);
    let config = IdentityConfig {
        home_plmn: None,
        subscribers: BTreeMap::from([(SubscriberType::International, plan)]),
    };

    let error = IdentityFactory::with_seed(37).generate_subscribers(&config).unwrap_err();
    assert!(!error.is_recoverable());
    assert_eq!(error.category(), "Configuration");
}

#[test]
fn test_pool_samples_only_requested_type() {
    let subscribers = IdentityFactory::with_seed(38)
        .generate_subscribers(&IdentityConfig::default())
        .unwrap();
    let pool = SubscriberPool::new(subscribers).unwrap();
    let mut rng = <rand::rngs::StdRng as rand::SeedableRng>::seed_from_u64(1);

    for _ in 0..100 {
        let subscriber = pool.get_random_by_type(SubscriberType::National, &mut rng).unwrap();
        assert_eq!(subscriber.subscriber_type, SubscriberType::National);
    }
}
