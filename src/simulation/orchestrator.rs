//! Main synthesis orchestrator
//!
//! This module contains the SynthesisOrchestrator, which owns the random
//! sources, the reference-data pools, the call sequence and the statistics,
//! and drives the pipeline from regions to CDRs.

use crate::bearer::{Bearer, BearerCatalog};
use crate::cdr::{CallDetailRecord, CallSequence, CdrSynthesizer};
use crate::geography::{GeographicPartitioner, Region};
use crate::output::write_snapshot;
use crate::repository::InMemoryRepository;
use crate::simulation::{SynthesisResult, SynthesisStatistics};
use crate::subscriber::{IdentityFactory, Subscriber, SubscriberPool};
use crate::topology::{NetworkElement, TopologyGenerator};
use crate::types::{BearerConfig, GeoConfig, IdentityConfig, SynthesisConfig, TopologyConfig};
use chrono::{DateTime, Utc};
use rand::{rngs::StdRng, SeedableRng};
use std::io::Write;
use std::time::Instant;
use tracing::{debug, info, instrument};

/// Coordinates every generation stage and keeps the resulting pools
///
/// Each stage replaces its pool only when it succeeds, so a rejected
/// configuration leaves earlier results untouched.
#[derive(Debug)]
pub struct SynthesisOrchestrator {
    config: SynthesisConfig,
    partitioner: GeographicPartitioner,
    topology_generator: TopologyGenerator,
    identity_factory: IdentityFactory,
    bearer_catalog: BearerCatalog,
    /// Random source for record keys and CDR draws
    rng: StdRng,
    regions: InMemoryRepository<Region>,
    elements: InMemoryRepository<NetworkElement>,
    subscribers: SubscriberPool,
    bearers: InMemoryRepository<Bearer>,
    sequence: CallSequence,
    statistics: SynthesisStatistics,
}

impl SynthesisOrchestrator {
    /// Create an orchestrator with empty pools
    #[instrument(skip(config), fields(seed = ?config.seed))]
    pub fn new(config: SynthesisConfig) -> SynthesisResult<Self> {
        config.validate()?;

        // One independent stream per stage
        let (topology_generator, identity_factory, bearer_catalog, rng) = match config.seed {
            Some(seed) => {
                info!("Using deterministic seed: {}", seed);
                (
                    TopologyGenerator::with_seed(seed.wrapping_add(1)),
                    IdentityFactory::with_seed(seed.wrapping_add(2)),
                    BearerCatalog::with_seed(seed.wrapping_add(3)),
                    StdRng::seed_from_u64(seed),
                )
            }
            None => {
                debug!("Using entropy-based random seed");
                (
                    TopologyGenerator::new(),
                    IdentityFactory::new(),
                    BearerCatalog::new(),
                    StdRng::from_entropy(),
                )
            }
        };

        let sequence =
            CallSequence::from_time(config.cdr.reference_time.unwrap_or_else(Utc::now));

        Ok(Self {
            config,
            partitioner: GeographicPartitioner::new(),
            topology_generator,
            identity_factory,
            bearer_catalog,
            rng,
            regions: InMemoryRepository::new(),
            elements: InMemoryRepository::new(),
            subscribers: SubscriberPool::default(),
            bearers: InMemoryRepository::new(),
            sequence,
            statistics: SynthesisStatistics::new(),
        })
    }

    /// Partition the configured country into regions and keep them
    pub fn generate_regions(&mut self, geo_config: &GeoConfig) -> SynthesisResult<Vec<Region>> {
        let regions = self.partitioner.partition(geo_config)?;
        self.regions = InMemoryRepository::from_entities(regions.iter().cloned(), &mut self.rng)?;
        self.statistics.record_regions(&regions);

        Ok(regions)
    }

    /// Place network elements into the given regions and keep them
    pub fn generate_topology(
        &mut self,
        topology_config: &TopologyConfig,
        regions: &[Region],
    ) -> SynthesisResult<Vec<NetworkElement>> {
        let elements = self.topology_generator.generate_topology(topology_config, regions)?;
        self.elements = InMemoryRepository::from_entities(elements.iter().cloned(), &mut self.rng)?;
        self.statistics.record_elements(&elements);

        Ok(elements)
    }

    /// Generate subscribers and rebuild the subscriber pool
    pub fn generate_subscribers(
        &mut self,
        identity_config: &IdentityConfig,
    ) -> SynthesisResult<Vec<Subscriber>> {
        let subscribers = self.identity_factory.generate_subscribers(identity_config)?;
        self.subscribers = SubscriberPool::new(subscribers.iter().cloned())?;
        self.statistics.record_subscribers(&subscribers);

        crate::sim_event!(info, "Subscriber pool built", count = subscribers.len());
        Ok(subscribers)
    }

    /// Generate the bearer catalog and keep it
    pub fn generate_bearers(&mut self, bearer_config: &BearerConfig) -> SynthesisResult<Vec<Bearer>> {
        let bearers = self.bearer_catalog.generate_bearers(bearer_config)?;
        self.bearers = InMemoryRepository::from_entities(bearers.iter().cloned(), &mut self.rng)?;
        self.statistics.record_bearers(&bearers);
        Ok(bearers)
    }

    /// Synthesize CDRs from the current pools
    ///
    /// Records end within `window_minutes` before the configured reference
    /// time, or before now when none is pinned.
    #[instrument(skip(self))]
    pub fn generate_cdrs(
        &mut self,
        count: usize,
        window_minutes: u32,
    ) -> SynthesisResult<Vec<CallDetailRecord>> {
        let _span = crate::perf_span!("cdr_generation", count = count).entered();
        let started = Instant::now();
        let reference_time = self.reference_time();

        let synthesizer = CdrSynthesizer::new(
            self.elements.entries().map(|(_, element)| element),
            &self.subscribers,
            self.bearers.entries().map(|(_, bearer)| bearer),
            &self.sequence,
            reference_time,
        );
        let records = synthesizer.generate_cdrs(&mut self.rng, count, window_minutes)?;

        self.statistics.record_cdrs(&records);
        self.statistics.add_generation_duration(started.elapsed());

        crate::sim_event!(
            info,
            "CDR batch generated",
            count = records.len(),
            reference_time = reference_time.timestamp(),
        );
        Ok(records)
    }

    /// Build every pool from the configuration
    #[instrument(skip(self))]
    pub fn initialize(&mut self) -> SynthesisResult<()> {
        let started = Instant::now();
        let config = self.config.clone();

        let regions = self.generate_regions(&config.geography)?;
        self.generate_topology(&config.topology, &regions)?;
        self.generate_subscribers(&config.identity)?;
        self.generate_bearers(&config.bearers)?;

        self.statistics.add_generation_duration(started.elapsed());
        info!(
            "Reference data ready: {} regions, {} elements, {} subscribers, {} bearers",
            self.statistics.total_regions(),
            self.statistics.total_elements(),
            self.statistics.total_subscribers(),
            self.statistics.total_bearers()
        );
        Ok(())
    }

    /// Build every pool, then synthesize the configured CDR batch
    pub fn run(&mut self) -> SynthesisResult<Vec<CallDetailRecord>> {
        self.initialize()?;
        let (count, window_minutes) = (self.config.cdr.count, self.config.cdr.window_minutes);
        self.generate_cdrs(count, window_minutes)
    }

    /// Write every pool as `{collection, key, record}` lines
    pub fn write_reference_snapshot<W: Write>(&self, mut writer: W) -> SynthesisResult<usize> {
        let mut written = write_snapshot(&mut writer, &self.regions)?;
        written += write_snapshot(&mut writer, &self.elements)?;
        written += write_snapshot(&mut writer, self.subscribers.repository())?;
        written += write_snapshot(&mut writer, &self.bearers)?;

        debug!(count = written, "Reference snapshot written");
        Ok(written)
    }

    /// Instant CDRs are generated relative to
    pub fn reference_time(&self) -> DateTime<Utc> {
        self.config.cdr.reference_time.unwrap_or_else(Utc::now)
    }

    /// Configuration the orchestrator was built with
    pub fn config(&self) -> &SynthesisConfig {
        &self.config
    }

    /// Stored regions
    pub fn regions(&self) -> &InMemoryRepository<Region> {
        &self.regions
    }

    /// Stored network elements
    pub fn elements(&self) -> &InMemoryRepository<NetworkElement> {
        &self.elements
    }

    /// Current subscriber pool
    pub fn subscribers(&self) -> &SubscriberPool {
        &self.subscribers
    }

    /// Stored bearers
    pub fn bearers(&self) -> &InMemoryRepository<Bearer> {
        &self.bearers
    }

    /// Shared call id sequence
    pub fn call_sequence(&self) -> &CallSequence {
        &self.sequence
    }

    /// Run statistics so far
    pub fn get_statistics(&self) -> &SynthesisStatistics {
        &self.statistics
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::Repository;
    use crate::simulation::SynthesisError;
    use crate::types::{ConfigValidationError, NetworkType, SubscriberType};
    use chrono::TimeZone;

    fn seeded_config(seed: u64) -> SynthesisConfig {
        let mut config = SynthesisConfig { seed: Some(seed), ..Default::default() };
        config.cdr.count = 200;
        config.cdr.reference_time = Some(Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap());
        config
    }

    #[test]
    fn test_orchestrator_creation() {
        let orchestrator = SynthesisOrchestrator::new(seeded_config(1)).unwrap();

        assert!(orchestrator.regions().is_empty());
        assert!(orchestrator.subscribers().is_empty());
        assert_eq!(orchestrator.call_sequence().peek(), 1_714_564_800);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = seeded_config(1);
        config.cdr.window_minutes = 0;

        match SynthesisOrchestrator::new(config) {
            Err(SynthesisError::ConfigurationError(ConfigValidationError::InvalidWindow(0))) => {}
            other => panic!("Expected InvalidWindow error, got {:?}", other),
        }
    }

    #[test]
    fn test_run_builds_pools_and_cdrs() {
        let mut orchestrator = SynthesisOrchestrator::new(seeded_config(2)).unwrap();
        let records = orchestrator.run().unwrap();

        assert_eq!(records.len(), 200);
        assert_eq!(orchestrator.regions().len(), 18);
        assert_eq!(orchestrator.elements().len(), 121);
        assert_eq!(orchestrator.subscribers().len(), 170);
        assert_eq!(orchestrator.bearers().len(), 20);

        let stats = orchestrator.get_statistics();
        assert_eq!(stats.total_cdrs, 200);
        assert_eq!(stats.regions_by_network_type[&NetworkType::Lte], 6);
    }

    #[test]
    fn test_failed_stage_keeps_previous_pool() {
        let mut orchestrator = SynthesisOrchestrator::new(seeded_config(3)).unwrap();
        orchestrator.initialize().unwrap();

        let mut broken = IdentityConfig::default();
        if let Some(plan) = broken.subscribers.get_mut(&SubscriberType::Home) {
            plan.country_code = None;
        }

        assert!(orchestrator.generate_subscribers(&broken).is_err());
        assert_eq!(orchestrator.subscribers().count_by_type(SubscriberType::Home), 100);
        assert!(orchestrator.generate_cdrs(10, 15).is_ok());
    }

    #[test]
    fn test_seeded_runs_are_identical() {
        let first = SynthesisOrchestrator::new(seeded_config(4)).unwrap().run().unwrap();
        let second = SynthesisOrchestrator::new(seeded_config(4)).unwrap().run().unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_reference_snapshot() {
        let mut orchestrator = SynthesisOrchestrator::new(seeded_config(5)).unwrap();
        orchestrator.initialize().unwrap();

        let mut buffer = Vec::new();
        let written = orchestrator.write_reference_snapshot(&mut buffer).unwrap();
        assert_eq!(written, 18 + 121 + 170 + 20);

        let text = String::from_utf8(buffer).unwrap();
        let collections: std::collections::BTreeSet<String> = text
            .lines()
            .map(|line| {
                let value: serde_json::Value = serde_json::from_str(line).unwrap();
                value["collection"].as_str().unwrap().to_string()
            })
            .collect();
        assert_eq!(
            collections.into_iter().collect::<Vec<_>>(),
            vec!["bearers", "customers", "locations", "network_elements"]
        );
    }
}
