//! Telco Synth
//!
//! Synthesizes a fake but internally consistent mobile network and the call
//! detail records (CDRs) it would produce, for testing mediation, billing and
//! analytics pipelines without real subscriber data.
//!
//! # Overview
//!
//! The pipeline runs one way, leaves first:
//!
//! - **Geography**: a country bounding box is split into a grid of named
//!   regions per access-network generation (2G/3G/4G/5G)
//! - **Topology**: core and radio-access elements are placed into those
//!   regions, radio nodes taking their area code from the region id
//! - **Subscribers**: home, national and international subscribers with valid
//!   MSISDN, IMSI, IMEI and SIM identifiers
//! - **Bearers**: QoS-tagged EPS bearers used in packet-switched context
//! - **CDRs**: weighted random calls tying the pools above together
//!
//! ## Quick Start
//!
//! ```rust
//! use telco_synth::*;
//!
//! let mut config = SynthesisConfig {
//!     seed: Some(7),
//!     ..Default::default()
//! };
//! config.cdr.count = 50;
//!
//! let mut orchestrator = SynthesisOrchestrator::new(config)?;
//! let records = orchestrator.run()?;
//!
//! println!("Generated {} CDRs", records.len());
//! println!("{}", orchestrator.get_statistics());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Module Organization
//!
//! - [`types`]: Core types, identifiers, and configuration
//! - [`repository`]: Entity trait and in-memory keyed storage
//! - [`geography`]: Regions and the grid partitioner
//! - [`topology`]: Network elements and the topology generator
//! - [`subscriber`]: Subscriber identities and the subscriber pool
//! - [`bearer`]: Bearers and the bearer catalog
//! - [`cdr`]: Call detail records and the CDR synthesizer
//! - [`output`]: JSON lines, CSV and reference snapshot writers
//! - [`simulation`]: Orchestration, statistics, logging and errors
#![warn(missing_docs, missing_debug_implementations, unreachable_pub)]

// Module declarations
pub mod bearer;
pub mod cdr;
pub mod geography;
pub mod output;
pub mod repository;
pub mod simulation;
pub mod subscriber;
pub mod topology;

pub mod types;

// Core types and identifiers
pub use types::{
    CallType,
    ConfigValidationError,
    ElementType,
    NetworkType,
    OutputFormat,
    // Identifiers
    RecordKey,
    SubscriberId,
    SubscriberType,
    // Configuration
    SynthesisConfig,
};

// Reference data
pub use bearer::{Bearer, BearerCatalog, Qos};
pub use geography::{GeographicPartitioner, Region};
pub use repository::{Entity, InMemoryRepository, Repository, RepositoryError};
pub use subscriber::{IdentityFactory, Subscriber, SubscriberPool};
pub use topology::{NetworkElement, TopologyGenerator};

// CDR synthesis
pub use cdr::{CallDetailRecord, CallSequence, CdrSynthesizer, NetworkContext};

// Orchestration
pub use simulation::{
    LoggingConfig, SynthesisError, SynthesisOrchestrator, SynthesisResult, SynthesisStatistics,
};
