// Integration tests test your crate's public API. They only have access to items
// in your crate that are marked pub. See the Cargo Targets page of the Cargo Book
// for more information.
//
//   https://doc.rust-lang.org/cargo/reference/cargo-targets.html#integration-tests
//

use telco_synth::*;

#[test]
fn test_core_id_types() {
    let subscriber_id = SubscriberId::new();
    let record_key = RecordKey::new("BEA");

    // Test that IDs are unique
    assert_ne!(subscriber_id, SubscriberId::new());
    assert_ne!(record_key, RecordKey::new("BEA"));

    // Test string formatting
    assert!(subscriber_id.to_string().starts_with("SUB_"));
    assert!(record_key.as_str().starts_with("BEA"));
}

#[test]
fn test_enum_types() {
    for network_type in NetworkType::ALL {
        assert!(!network_type.to_string().is_empty());
        assert_eq!(network_type.as_str().parse::<NetworkType>(), Ok(network_type));
    }

    let element_types = [
        ElementType::Msc,
        ElementType::Rnc,
        ElementType::NodeB,
        ElementType::Mme,
        ElementType::ENodeB,
        ElementType::GNodeB,
    ];
    for element_type in &element_types {
        assert!(!element_type.to_string().is_empty());
    }
    assert!(ElementType::ENodeB.is_radio_access());
    assert!(!ElementType::Pgw.is_radio_access());

    assert_eq!("csv".parse::<OutputFormat>(), Ok(OutputFormat::Csv));
    assert!("xml".parse::<OutputFormat>().is_err());
}

#[test]
fn test_default_configuration() {
    let config = SynthesisConfig::default();
    assert!(config.validate().is_ok());
    assert_eq!(config.identity.total_subscribers(), 170);
    assert_eq!(config.bearers.count, 20);
    assert_eq!(config.cdr.window_minutes, 15);
}

#[test]
fn test_end_to_end_run() {
    let config = SynthesisConfig { seed: Some(7), ..Default::default() };
    let mut orchestrator = SynthesisOrchestrator::new(config).unwrap();

    let records = orchestrator.run().unwrap();
    assert_eq!(records.len(), 1000);

    let statistics = orchestrator.get_statistics();
    assert_eq!(statistics.total_cdrs, 1000);
    assert_eq!(statistics.total_regions(), 18);
    assert!(records.iter().all(|record| record.called_subscriber_id != record.calling_subscriber_id));
}
