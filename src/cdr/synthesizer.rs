//! CDR synthesis
//!
//! The synthesizer borrows the topology, the subscriber pool and the bearer
//! catalog read-only. Every draw goes through a caller-supplied random source
//! and call ids come from a shared atomic sequence, so one synthesizer can be
//! used from several threads at once.

use crate::bearer::Bearer;
use crate::cdr::{CallDetailRecord, CallSequence, NetworkContext};
use crate::simulation::{SynthesisError, SynthesisResult};
use crate::subscriber::{Subscriber, SubscriberPool};
use crate::topology::{AreaCode, NetworkElement};
use crate::types::{
    CallDirection, CallType, ConfigValidationError, ElementType, NetworkType, SubscriberType,
};
use chrono::{DateTime, Duration, Utc};
use rand::prelude::*;
use std::collections::HashMap;
use std::fmt;
use std::net::Ipv4Addr;
use tracing::{debug, instrument};

/// Maximum number of destination draws before giving up on a self-call
pub const MAX_DESTINATION_DRAWS: usize = 10;

/// Longest synthesized call in seconds
const MAX_CALL_DURATION_SECONDS: u32 = 3600;

/// 3G radio-access element with its location area
#[derive(Debug, Clone, Copy)]
struct UmtsCell<'a> {
    element: &'a NetworkElement,
    lac: u32,
    cell_id: u16,
}

/// 4G radio-access element with its tracking area
#[derive(Debug, Clone, Copy)]
struct LteCell<'a> {
    element: &'a NetworkElement,
    tac: u32,
}

/// Access path picked for one record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AccessPath {
    Umts,
    Lte,
}

/// Generates internally consistent CDRs from borrowed reference data
pub struct CdrSynthesizer<'a> {
    pool: &'a SubscriberPool,
    umts_cells: Vec<UmtsCell<'a>>,
    lte_cells: Vec<LteCell<'a>>,
    core: HashMap<(NetworkType, ElementType), Vec<&'a NetworkElement>>,
    bearers: Vec<&'a Bearer>,
    sequence: &'a CallSequence,
    reference_time: DateTime<Utc>,
}

impl fmt::Debug for CdrSynthesizer<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CdrSynthesizer")
            .field("subscribers", &self.pool.len())
            .field("umts_cells", &self.umts_cells.len())
            .field("lte_cells", &self.lte_cells.len())
            .field("bearers", &self.bearers.len())
            .field("reference_time", &self.reference_time)
            .finish_non_exhaustive()
    }
}

impl<'a> CdrSynthesizer<'a> {
    /// Index the topology and borrow the pools for synthesis
    pub fn new(
        elements: impl IntoIterator<Item = &'a NetworkElement>,
        pool: &'a SubscriberPool,
        bearers: impl IntoIterator<Item = &'a Bearer>,
        sequence: &'a CallSequence,
        reference_time: DateTime<Utc>,
    ) -> Self {
        let mut umts_cells = Vec::new();
        let mut lte_cells = Vec::new();
        let mut core: HashMap<(NetworkType, ElementType), Vec<&'a NetworkElement>> =
            HashMap::new();

        for element in elements {
            match (element.network_type, element.area_code()) {
                (NetworkType::Umts, Some(AreaCode::LocationArea { lac, cell_id })) => {
                    umts_cells.push(UmtsCell { element, lac, cell_id });
                }
                (NetworkType::Lte, Some(AreaCode::TrackingArea { tac })) => {
                    lte_cells.push(LteCell { element, tac });
                }
                _ => {}
            }
            core.entry((element.network_type, element.element_type))
                .or_default()
                .push(element);
        }

        Self {
            pool,
            umts_cells,
            lte_cells,
            core,
            bearers: bearers.into_iter().collect(),
            sequence,
            reference_time,
        }
    }

    /// Instant the records are generated relative to
    pub fn reference_time(&self) -> DateTime<Utc> {
        self.reference_time
    }

    /// Generate a batch of CDRs; the first failing record aborts the batch
    #[instrument(skip(self, rng))]
    pub fn generate_cdrs<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        count: usize,
        window_minutes: u32,
    ) -> SynthesisResult<Vec<CallDetailRecord>> {
        Self::check_window(window_minutes)?;

        let mut records = Vec::with_capacity(count);
        for _ in 0..count {
            records.push(self.generate_cdr(rng, window_minutes)?);
        }

        debug!(count = records.len(), "CDR batch synthesized");
        Ok(records)
    }

    /// Generate one CDR
    pub fn generate_cdr<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        window_minutes: u32,
    ) -> SynthesisResult<CallDetailRecord> {
        Self::check_window(window_minutes)?;

        let call_id = self.sequence.next_id();

        let offset = rng.gen_range(60..=i64::from(window_minutes) * 60);
        let end_time = self.reference_time - Duration::seconds(offset);
        let duration_seconds = rng.gen_range(0..=MAX_CALL_DURATION_SECONDS);
        let start_time = end_time - Duration::seconds(i64::from(duration_seconds));

        let calling = self
            .pool
            .get_random_by_type(SubscriberType::Home, rng)
            .ok_or_else(|| SynthesisError::empty_pool("home subscribers"))?;

        let destination_type = Self::draw_destination_type(rng);
        let called = self.draw_destination(rng, calling, destination_type)?;
        let call_type = Self::draw_call_type(rng);
        let network = self.draw_network_context(rng)?;

        Ok(CallDetailRecord {
            call_id,
            call_type,
            direction: CallDirection::Outgoing,
            destination_type,
            start_time,
            end_time,
            duration_seconds,
            calling_subscriber_id: calling.id,
            called_subscriber_id: called.id,
            msisdn: calling.msisdn.clone(),
            called_msisdn: called.msisdn.clone(),
            imsi: calling.imsi.clone(),
            imei: calling.imei.clone(),
            network,
        })
    }

    fn check_window(window_minutes: u32) -> Result<(), ConfigValidationError> {
        if window_minutes == 0 {
            return Err(ConfigValidationError::InvalidWindow(window_minutes));
        }
        Ok(())
    }

    /// home 0.70, national 0.29, international 0.01
    fn draw_destination_type<R: Rng + ?Sized>(rng: &mut R) -> SubscriberType {
        let rand_val: f64 = rng.gen();
        match rand_val {
            x if x < 0.70 => SubscriberType::Home,
            x if x < 0.99 => SubscriberType::National,
            _ => SubscriberType::International,
        }
    }

    /// voice 0.70, SMS 0.25, data 0.05
    fn draw_call_type<R: Rng + ?Sized>(rng: &mut R) -> CallType {
        let rand_val: f64 = rng.gen();
        match rand_val {
            x if x < 0.70 => CallType::Voice,
            x if x < 0.95 => CallType::Sms,
            _ => CallType::Data,
        }
    }

    fn draw_destination<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        calling: &Subscriber,
        destination_type: SubscriberType,
    ) -> SynthesisResult<&'a Subscriber> {
        for _ in 0..MAX_DESTINATION_DRAWS {
            let called = self
                .pool
                .get_random_by_type(destination_type, rng)
                .ok_or_else(|| {
                    SynthesisError::empty_pool(format!("{} subscribers", destination_type))
                })?;
            if called.id != calling.id {
                return Ok(called);
            }
        }

        Err(SynthesisError::insufficient_diversity(destination_type, MAX_DESTINATION_DRAWS))
    }

    fn draw_network_context<R: Rng + ?Sized>(&self, rng: &mut R) -> SynthesisResult<NetworkContext> {
        let preferred = if rng.gen_bool(0.5) { AccessPath::Umts } else { AccessPath::Lte };

        let path = match preferred {
            AccessPath::Umts if !self.umts_cells.is_empty() => AccessPath::Umts,
            AccessPath::Lte if !self.lte_cells.is_empty() => AccessPath::Lte,
            _ if !self.umts_cells.is_empty() => AccessPath::Umts,
            _ if !self.lte_cells.is_empty() => AccessPath::Lte,
            _ => return Err(SynthesisError::empty_pool("3G and 4G radio-access elements")),
        };

        match path {
            AccessPath::Umts => self.umts_context(rng),
            AccessPath::Lte => self.lte_context(rng),
        }
    }

    fn umts_context<R: Rng + ?Sized>(&self, rng: &mut R) -> SynthesisResult<NetworkContext> {
        let cell = self
            .umts_cells
            .choose(rng)
            .ok_or_else(|| SynthesisError::empty_pool("3G radio-access elements"))?;

        Ok(NetworkContext::Umts {
            element_id: cell.element.id,
            region_id: cell.element.location_id,
            rnc: self.pick_core(rng, NetworkType::Umts, ElementType::Rnc).map(|e| e.id),
            lac: cell.lac,
            cell_id: cell.cell_id,
            msc_address: self.core_address(rng, NetworkType::Umts, ElementType::Msc),
            sgsn_address: self.core_address(rng, NetworkType::Umts, ElementType::Sgsn),
            ggsn_address: self.core_address(rng, NetworkType::Umts, ElementType::Ggsn),
        })
    }

    fn lte_context<R: Rng + ?Sized>(&self, rng: &mut R) -> SynthesisResult<NetworkContext> {
        let cell = self
            .lte_cells
            .choose(rng)
            .ok_or_else(|| SynthesisError::empty_pool("4G radio-access elements"))?;
        let bearer = self
            .bearers
            .choose(rng)
            .ok_or_else(|| SynthesisError::empty_pool("bearers"))?;

        Ok(NetworkContext::Lte {
            element_id: cell.element.id,
            region_id: cell.element.location_id,
            tac: cell.tac,
            sgw_address: self.core_address(rng, NetworkType::Lte, ElementType::Sgw),
            pgw_address: self.core_address(rng, NetworkType::Lte, ElementType::Pgw),
            mme_address: self.core_address(rng, NetworkType::Lte, ElementType::Mme),
            bearer_id: bearer.id,
            bearer: bearer.descriptor(),
        })
    }

    fn pick_core<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        network_type: NetworkType,
        element_type: ElementType,
    ) -> Option<&'a NetworkElement> {
        self.core
            .get(&(network_type, element_type))
            .and_then(|elements| elements.choose(rng))
            .copied()
    }

    fn core_address<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        network_type: NetworkType,
        element_type: ElementType,
    ) -> Option<Ipv4Addr> {
        self.pick_core(rng, network_type, element_type).map(|e| e.ip_address)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bearer::BearerCatalog;
    use crate::geography::GeographicPartitioner;
    use crate::subscriber::IdentityFactory;
    use crate::topology::TopologyGenerator;
    use crate::types::{BearerConfig, GeoConfig, IdentityConfig, MsisdnPlan, NdcSpec, TopologyConfig};
    use chrono::TimeZone;
    use rand::rngs::StdRng;
    use std::collections::BTreeMap;

    struct Fixture {
        elements: Vec<NetworkElement>,
        pool: SubscriberPool,
        bearers: Vec<Bearer>,
        sequence: CallSequence,
        reference_time: DateTime<Utc>,
    }

    impl Fixture {
        fn new(identity: &IdentityConfig) -> Self {
            let regions = GeographicPartitioner::new().partition(&GeoConfig::default()).unwrap();
            let elements = TopologyGenerator::with_seed(1)
                .generate_topology(&TopologyConfig::default(), &regions)
                .unwrap();
            let subscribers = IdentityFactory::with_seed(2).generate_subscribers(identity).unwrap();
            let bearers = BearerCatalog::with_seed(3)
                .generate_bearers(&BearerConfig::default())
                .unwrap();
            let reference_time = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();

            Self {
                elements,
                pool: SubscriberPool::new(subscribers).unwrap(),
                bearers,
                sequence: CallSequence::from_time(reference_time),
                reference_time,
            }
        }

        fn synthesizer(&self) -> CdrSynthesizer<'_> {
            CdrSynthesizer::new(
                &self.elements,
                &self.pool,
                &self.bearers,
                &self.sequence,
                self.reference_time,
            )
        }
    }

    #[test]
    fn test_records_respect_time_window() {
        let fixture = Fixture::new(&IdentityConfig::default());
        let synthesizer = fixture.synthesizer();
        let mut rng = StdRng::seed_from_u64(7);

        let records = synthesizer.generate_cdrs(&mut rng, 500, 15).unwrap();
        assert_eq!(records.len(), 500);

        for record in &records {
            let age = fixture.reference_time - record.end_time;
            assert!(age >= Duration::seconds(60));
            assert!(age <= Duration::minutes(15));
            assert!(record.duration_seconds <= 3600);
            assert_eq!(
                record.end_time - record.start_time,
                Duration::seconds(i64::from(record.duration_seconds))
            );
        }
    }

    #[test]
    fn test_records_are_consistent() {
        let fixture = Fixture::new(&IdentityConfig::default());
        let synthesizer = fixture.synthesizer();
        let mut rng = StdRng::seed_from_u64(8);

        for record in synthesizer.generate_cdrs(&mut rng, 500, 15).unwrap() {
            assert_ne!(record.calling_subscriber_id, record.called_subscriber_id);
            assert_eq!(record.direction, CallDirection::Outgoing);

            let caller = fixture
                .pool
                .get_all_by_type(SubscriberType::Home)
                .into_iter()
                .find(|s| s.id == record.calling_subscriber_id)
                .unwrap();
            assert_eq!(caller.msisdn, record.msisdn);
            assert_eq!(caller.imsi, record.imsi);

            match &record.network {
                NetworkContext::Umts { lac, region_id, .. } => assert_eq!(lac, region_id),
                NetworkContext::Lte { tac, region_id, bearer_id, bearer, .. } => {
                    assert_eq!(tac, region_id);
                    let catalog_bearer =
                        fixture.bearers.iter().find(|b| b.id == *bearer_id).unwrap();
                    assert_eq!(&catalog_bearer.descriptor(), bearer);
                }
            }
        }
    }

    #[test]
    fn test_call_ids_strictly_increase() {
        let fixture = Fixture::new(&IdentityConfig::default());
        let synthesizer = fixture.synthesizer();
        let mut rng = StdRng::seed_from_u64(9);

        let records = synthesizer.generate_cdrs(&mut rng, 100, 15).unwrap();
        assert_eq!(records[0].call_id, 1_714_564_800);
        assert!(records.windows(2).all(|pair| pair[0].call_id < pair[1].call_id));
    }

    #[test]
    fn test_zero_window_rejected() {
        let fixture = Fixture::new(&IdentityConfig::default());
        let mut rng = StdRng::seed_from_u64(10);

        match fixture.synthesizer().generate_cdrs(&mut rng, 1, 0) {
            Err(SynthesisError::ConfigurationError(ConfigValidationError::InvalidWindow(0))) => {}
            other => panic!("Expected InvalidWindow error, got {:?}", other),
        }
    }

    #[test]
    fn test_single_home_subscriber_exhausts_draws() {
        let mut identity = IdentityConfig::default();
        identity.subscribers = BTreeMap::from([(
            SubscriberType::Home,
            MsisdnPlan::national(1, "+216", NdcSpec::Single(20)),
        )]);
        let fixture = Fixture::new(&identity);
        let synthesizer = fixture.synthesizer();
        let mut rng = StdRng::seed_from_u64(11);

        // Only home destinations can collide with the caller; other pools are empty
        let mut saw_diversity_error = false;
        for _ in 0..50 {
            match synthesizer.generate_cdr(&mut rng, 15) {
                Err(SynthesisError::InsufficientPoolDiversity { subscriber_type, attempts }) => {
                    assert_eq!(subscriber_type, SubscriberType::Home);
                    assert_eq!(attempts, MAX_DESTINATION_DRAWS);
                    saw_diversity_error = true;
                }
                Err(SynthesisError::EmptyPool(_)) => {}
                other => panic!("Expected a pool error, got {:?}", other),
            }
        }
        assert!(saw_diversity_error);
    }

    #[test]
    fn test_missing_lte_falls_back_to_umts() {
        let fixture = Fixture::new(&IdentityConfig::default());
        let umts_only: Vec<NetworkElement> = fixture
            .elements
            .iter()
            .filter(|e| e.network_type != NetworkType::Lte)
            .cloned()
            .collect();
        let synthesizer = CdrSynthesizer::new(
            &umts_only,
            &fixture.pool,
            &fixture.bearers,
            &fixture.sequence,
            fixture.reference_time,
        );
        let mut rng = StdRng::seed_from_u64(12);

        for record in synthesizer.generate_cdrs(&mut rng, 100, 15).unwrap() {
            assert_eq!(record.network.network_type(), NetworkType::Umts);
        }
    }

    #[test]
    fn test_lte_without_bearers_is_empty_pool() {
        let fixture = Fixture::new(&IdentityConfig::default());
        let lte_only: Vec<NetworkElement> = fixture
            .elements
            .iter()
            .filter(|e| e.network_type == NetworkType::Lte)
            .cloned()
            .collect();
        let no_bearers: Vec<Bearer> = Vec::new();
        let synthesizer = CdrSynthesizer::new(
            &lte_only,
            &fixture.pool,
            &no_bearers,
            &fixture.sequence,
            fixture.reference_time,
        );
        let mut rng = StdRng::seed_from_u64(13);

        match synthesizer.generate_cdr(&mut rng, 15) {
            Err(SynthesisError::EmptyPool(pool)) => assert_eq!(pool, "bearers"),
            other => panic!("Expected EmptyPool error, got {:?}", other),
        }
    }

    #[test]
    fn test_no_radio_access_is_empty_pool() {
        let fixture = Fixture::new(&IdentityConfig::default());
        let no_elements: Vec<NetworkElement> = Vec::new();
        let synthesizer = CdrSynthesizer::new(
            &no_elements,
            &fixture.pool,
            &fixture.bearers,
            &fixture.sequence,
            fixture.reference_time,
        );
        let mut rng = StdRng::seed_from_u64(14);

        assert!(matches!(
            synthesizer.generate_cdr(&mut rng, 15),
            Err(SynthesisError::EmptyPool(_))
        ));
    }
}
