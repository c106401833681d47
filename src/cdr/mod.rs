//! Call detail record synthesis
//!
//! This module contains the CDR model, the shared call id sequence and the
//! synthesizer that ties subscribers, topology and bearers together.
//!
//! # Usage Example
//!
//! ```rust
//! use telco_synth::bearer::BearerCatalog;
//! use telco_synth::cdr::*;
//! use telco_synth::geography::GeographicPartitioner;
//! use telco_synth::subscriber::{IdentityFactory, SubscriberPool};
//! use telco_synth::topology::TopologyGenerator;
//! use telco_synth::types::*;
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! let regions = GeographicPartitioner::new().partition(&GeoConfig::default()).unwrap();
//! let elements = TopologyGenerator::with_seed(1)
//!     .generate_topology(&TopologyConfig::default(), &regions)
//!     .unwrap();
//! let subscribers = IdentityFactory::with_seed(2)
//!     .generate_subscribers(&IdentityConfig::default())
//!     .unwrap();
//! let pool = SubscriberPool::new(subscribers).unwrap();
//! let bearers = BearerCatalog::with_seed(3).generate_bearers(&BearerConfig::default()).unwrap();
//!
//! let reference_time = chrono::Utc::now();
//! let sequence = CallSequence::from_time(reference_time);
//! let synthesizer = CdrSynthesizer::new(&elements, &pool, &bearers, &sequence, reference_time);
//!
//! let mut rng = StdRng::seed_from_u64(4);
//! let records = synthesizer.generate_cdrs(&mut rng, 10, 15).unwrap();
//! assert!(records.iter().all(|r| r.calling_subscriber_id != r.called_subscriber_id));
//! ```

pub mod record;
pub mod sequence;
pub mod synthesizer;

pub use record::*;
pub use sequence::*;
pub use synthesizer::*;
