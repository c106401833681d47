//! Integration tests for region partitioning and topology placement

use std::collections::{BTreeMap, HashMap};
use telco_synth::geography::GeographicPartitioner;
use telco_synth::topology::{AreaCode, TopologyGenerator};
use telco_synth::types::*;

fn tunisia_gsm_only() -> GeoConfig {
    let mut config = GeoConfig::default();
    config.grids = BTreeMap::from([(
        NetworkType::Gsm,
        GridSpec::new(3, 1, &["Nord", "Centre", "Sud"]),
    )]);
    config
}

/// Three latitude bands over Tunisia split at 2.433 degree steps
#[test]
fn test_tunisia_three_band_partition() {
    let regions = GeographicPartitioner::new().partition(&tunisia_gsm_only()).unwrap();

    assert_eq!(regions.len(), 3);

    let nord = &regions[0];
    assert_eq!(nord.name, "Nord");
    assert_eq!(nord.id, 2000);
    assert_eq!(nord.lat_min, 30.24);
    assert_eq!(nord.lat_max, 32.67);
    assert_eq!(nord.lon_min, 7.52);
    assert_eq!(nord.lon_max, 11.6);

    let sud = &regions[2];
    assert_eq!(sud.name, "Sud");
    assert_eq!(sud.id, 2002);
    assert_eq!(sud.lat_min, 35.11);
    assert_eq!(sud.lat_max, 37.54);
}

#[test]
fn test_region_count_and_contiguity_for_every_grid() {
    let config = GeoConfig::default();
    let regions = GeographicPartitioner::new().partition(&config).unwrap();

    for (network_type, grid) in &config.grids {
        let grid_regions: Vec<_> =
            regions.iter().filter(|r| r.network_type == *network_type).collect();
        assert_eq!(grid_regions.len(), grid.rows * grid.cols);

        for row in 0..grid.rows {
            for col in 0..grid.cols {
                let cell = grid_regions[row * grid.cols + col];
                assert_eq!(cell.id, network_type.region_id_base() + (row * grid.cols + col) as u32);

                if col + 1 < grid.cols {
                    let right = grid_regions[row * grid.cols + col + 1];
                    assert!((cell.lon_max - right.lon_min).abs() <= 0.01);
                }
                if row + 1 < grid.rows {
                    let below = grid_regions[(row + 1) * grid.cols + col];
                    assert!((cell.lat_max - below.lat_min).abs() <= 0.01);
                }
            }
        }
    }
}

#[test]
fn test_region_name_mismatch_produces_no_regions() {
    let mut config = tunisia_gsm_only();
    config.grids.insert(NetworkType::Umts, GridSpec::new(2, 2, &["A", "B", "C"]));

    match GeographicPartitioner::new().partition(&config) {
        Err(telco_synth::SynthesisError::ConfigurationError(
            ConfigValidationError::RegionNameMismatch { network_type, expected, actual },
        )) => {
            assert_eq!(network_type, NetworkType::Umts);
            assert_eq!(expected, 4);
            assert_eq!(actual, 3);
        }
        other => panic!("Expected RegionNameMismatch error, got {:?}", other),
    }
}

#[test]
fn test_elements_in_same_region_share_area_code() {
    let regions = GeographicPartitioner::new().partition(&GeoConfig::default()).unwrap();
    let elements = TopologyGenerator::with_seed(21)
        .generate_topology(&TopologyConfig::default(), &regions)
        .unwrap();

    let mut area_by_region: HashMap<(u32, bool), u32> = HashMap::new();
    for element in elements.iter().filter(|e| e.is_radio_access()) {
        let (is_location_area, code) = match element.area_code() {
            Some(AreaCode::LocationArea { lac, .. }) => (true, lac),
            Some(AreaCode::TrackingArea { tac }) => (false, tac),
            None => unreachable!("radio-access elements carry an area code"),
        };

        assert_eq!(code, element.location_id);
        assert_eq!(is_location_area, element.network_type.uses_location_area());

        let previous = area_by_region.entry((element.location_id, is_location_area)).or_insert(code);
        assert_eq!(*previous, code);
    }
}

#[test]
fn test_core_elements_have_no_area_code() {
    let regions = GeographicPartitioner::new().partition(&GeoConfig::default()).unwrap();
    let elements = TopologyGenerator::with_seed(22)
        .generate_topology(&TopologyConfig::default(), &regions)
        .unwrap();

    for element in &elements {
        assert_eq!(element.is_radio_access(), element.element_type.is_radio_access());
        if !element.is_radio_access() {
            assert!(element.lac().is_none());
            assert!(element.tac().is_none());
            assert!(element.cell_id().is_none());
        }
        assert!(regions.iter().any(|r| r.id == element.location_id
            && r.network_type == element.network_type));
    }

    assert_eq!(elements.len(), 121);
}
