//! Topology generation
//!
//! Places configured numbers of network elements into the regions of their
//! generation. Elements of each type are spread over the regions round-robin
//! and radio-access elements take the id of their region as area code.

use crate::geography::Region;
use crate::simulation::SynthesisResult;
use crate::topology::catalog;
use crate::topology::{AreaCode, ElementRole, FunctionInfo, NetworkElement};
use crate::types::{ElementStatus, ElementType, NetworkType, TopologyConfig};
use rand::{prelude::*, rngs::StdRng, RngCore, SeedableRng};
use std::fmt;
use std::net::Ipv4Addr;
use tracing::{debug, instrument, warn};

/// Probability that a generated element is active
const ACTIVE_PROBABILITY: f64 = 0.9;

/// Generator for network elements
pub struct TopologyGenerator {
    rng: Box<dyn RngCore>,
}

impl fmt::Debug for TopologyGenerator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TopologyGenerator").finish_non_exhaustive()
    }
}

impl Default for TopologyGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl TopologyGenerator {
    /// Create a new topology generator
    pub fn new() -> Self {
        Self { rng: Box::new(thread_rng()) }
    }

    /// Create a new topology generator with a specific seed
    pub fn with_seed(seed: u64) -> Self {
        Self { rng: Box::new(StdRng::seed_from_u64(seed)) }
    }

    /// Generate every configured element for the given regions
    ///
    /// Element ids start at 1 on every call and increase across network
    /// types in 2G, 3G, 4G, 5G order.
    #[instrument(skip(self, config, regions), fields(region_count = regions.len()))]
    pub fn generate_topology(
        &mut self,
        config: &TopologyConfig,
        regions: &[Region],
    ) -> SynthesisResult<Vec<NetworkElement>> {
        let mut elements = Vec::new();
        let mut next_id = 1u32;

        for network_type in NetworkType::ALL {
            let counts = match config.element_counts.get(&network_type) {
                Some(counts) if !counts.is_empty() => counts,
                _ => {
                    debug!(%network_type, "No element counts configured");
                    continue;
                }
            };

            for element_type in counts.keys() {
                if !catalog::is_in_taxonomy(network_type, *element_type) {
                    warn!(
                        %network_type,
                        %element_type,
                        "Element type is not part of this generation, skipping"
                    );
                }
            }

            let network_regions: Vec<&Region> =
                regions.iter().filter(|r| r.network_type == network_type).collect();
            if network_regions.is_empty() {
                warn!(%network_type, "No regions to place elements in");
                continue;
            }

            for &element_type in catalog::taxonomy(network_type) {
                let count = counts.get(&element_type).copied().unwrap_or(0);
                for i in 0..count {
                    let region = network_regions[i % network_regions.len()];
                    elements.push(self.generate_element(next_id, network_type, element_type, region));
                    next_id += 1;
                }
            }
        }

        crate::sim_event!(info, "Topology generated", count = elements.len());
        Ok(elements)
    }

    /// Generate a single element placed in the given region
    pub fn generate_element(
        &mut self,
        id: u32,
        network_type: NetworkType,
        element_type: ElementType,
        region: &Region,
    ) -> NetworkElement {
        let ip_address = self.generate_ip_address();
        let status = if self.rng.gen::<f64>() < ACTIVE_PROBABILITY {
            ElementStatus::Active
        } else {
            ElementStatus::Inactive
        };

        let role = if element_type.is_radio_access() {
            let area_code = if network_type.uses_location_area() {
                AreaCode::LocationArea { cell_id: self.rng.gen_range(1..=u16::MAX), lac: region.id }
            } else {
                AreaCode::TrackingArea { tac: region.id }
            };
            ElementRole::RadioAccess { area_code }
        } else {
            ElementRole::Core
        };

        let description = catalog::function_description(network_type, element_type)
            .unwrap_or("Unspecified function.");

        NetworkElement {
            id,
            name: format!("{}_{}_{:04}", network_type, element_type, id),
            network_type,
            element_type,
            ip_address,
            status,
            function: FunctionInfo {
                name: format!("{} Function", element_type),
                description: description.to_string(),
            },
            location_id: region.id,
            role,
        }
    }

    /// Random address in 192.168.0.0/16, avoiding .0 and .255 hosts
    fn generate_ip_address(&mut self) -> Ipv4Addr {
        let third = self.rng.gen_range(0..=255u8);
        let fourth = self.rng.gen_range(1..=254u8);
        Ipv4Addr::new(192, 168, third, fourth)
    }
}
