//! Bearer catalog generation

use crate::bearer::{Bearer, Qos};
use crate::simulation::SynthesisResult;
use crate::types::{BearerConfig, BearerType};
use rand::{prelude::*, rngs::StdRng, RngCore, SeedableRng};
use std::collections::HashSet;
use std::fmt;
use tracing::instrument;

/// Range of generated guaranteed bit rates in kbps
const DEFAULT_GBR_RANGE: (u32, u32) = (64, 1024);

/// Generator for a catalog of uniquely numbered bearers
pub struct BearerCatalog {
    rng: Box<dyn RngCore>,
}

impl fmt::Debug for BearerCatalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BearerCatalog").finish_non_exhaustive()
    }
}

impl Default for BearerCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl BearerCatalog {
    /// Create a new bearer catalog generator
    pub fn new() -> Self {
        Self { rng: Box::new(thread_rng()) }
    }

    /// Create a new bearer catalog generator with a specific seed
    pub fn with_seed(seed: u64) -> Self {
        Self { rng: Box::new(StdRng::seed_from_u64(seed)) }
    }

    /// Generate the configured number of bearers with distinct ids
    #[instrument(skip(self, config), fields(count = config.count))]
    pub fn generate_bearers(&mut self, config: &BearerConfig) -> SynthesisResult<Vec<Bearer>> {
        config.validate()?;

        let fixed_qos = match config.qos {
            Some(qos) => Some(Qos::new(qos.gbr, qos.mbr)?),
            None => None,
        };

        let mut used_ids = HashSet::with_capacity(config.count);
        let mut bearers = Vec::with_capacity(config.count);

        while bearers.len() < config.count {
            let id = self.rng.gen_range(100_000..=999_999u32);
            if !used_ids.insert(id) {
                continue;
            }

            let bearer_type = if self.rng.gen::<f64>() < config.dedicated_probability {
                BearerType::Dedicated
            } else {
                BearerType::Default
            };
            let qos = match fixed_qos {
                Some(qos) => qos,
                None => self.generate_qos(),
            };

            bearers.push(Bearer::new(id, bearer_type, qos));
        }

        crate::sim_event!(info, "Bearers generated", count = bearers.len());
        Ok(bearers)
    }

    /// gbr uniform in 64..=1024, mbr uniform in gbr..=4*gbr
    fn generate_qos(&mut self) -> Qos {
        let (low, high) = DEFAULT_GBR_RANGE;
        let gbr = self.rng.gen_range(low..=high);
        let mbr = self.rng.gen_range(gbr..=gbr * 4);
        Qos { gbr, mbr }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::SynthesisError;
    use crate::types::{ConfigValidationError, QosConfig};

    #[test]
    fn test_generated_bearers_have_unique_ids() {
        let config = BearerConfig { count: 5000, ..BearerConfig::default() };
        let bearers = BearerCatalog::with_seed(1).generate_bearers(&config).unwrap();

        assert_eq!(bearers.len(), 5000);
        let ids: HashSet<u32> = bearers.iter().map(|b| b.id).collect();
        assert_eq!(ids.len(), 5000);
        assert!(bearers.iter().all(|b| (100_000..=999_999).contains(&b.id)));
    }

    #[test]
    fn test_default_qos_ranges() {
        let config = BearerConfig { count: 500, ..BearerConfig::default() };
        let bearers = BearerCatalog::with_seed(2).generate_bearers(&config).unwrap();

        for bearer in &bearers {
            assert!((64..=1024).contains(&bearer.qos.gbr));
            assert!(bearer.qos.mbr >= bearer.qos.gbr);
            assert!(bearer.qos.mbr <= bearer.qos.gbr * 4);
        }
    }

    #[test]
    fn test_fixed_qos_is_used() {
        let config = BearerConfig {
            count: 10,
            dedicated_probability: 1.0,
            qos: Some(QosConfig { gbr: 128, mbr: 256 }),
        };
        let bearers = BearerCatalog::with_seed(3).generate_bearers(&config).unwrap();

        assert!(bearers.iter().all(|b| b.qos == Qos { gbr: 128, mbr: 256 }));
        assert!(bearers.iter().all(|b| b.bearer_type == BearerType::Dedicated));
    }

    #[test]
    fn test_invalid_qos_rejected() {
        let config = BearerConfig {
            count: 10,
            dedicated_probability: 0.5,
            qos: Some(QosConfig { gbr: 128, mbr: 0 }),
        };

        match BearerCatalog::with_seed(4).generate_bearers(&config) {
            Err(SynthesisError::ConfigurationError(ConfigValidationError::InvalidQos {
                field,
                ..
            })) => assert_eq!(field, "mbr"),
            other => panic!("Expected InvalidQos error, got {:?}", other),
        }
    }

    #[test]
    fn test_zero_count_yields_empty_catalog() {
        let config = BearerConfig { count: 0, ..BearerConfig::default() };
        let bearers = BearerCatalog::with_seed(5).generate_bearers(&config).unwrap();
        assert!(bearers.is_empty());
    }
}
