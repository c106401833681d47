//! Network topology synthesis
//!
//! This module contains the network element model, the fixed per-generation
//! element taxonomy and the generator that places elements into regions.
//!
//! # Usage Example
//!
//! ```rust
//! use telco_synth::geography::GeographicPartitioner;
//! use telco_synth::topology::*;
//! use telco_synth::types::*;
//!
//! let regions = GeographicPartitioner::new().partition(&GeoConfig::default()).unwrap();
//! let mut generator = TopologyGenerator::with_seed(42);
//! let elements = generator.generate_topology(&TopologyConfig::default(), &regions).unwrap();
//!
//! let bts = elements.iter().find(|e| e.element_type == ElementType::Bts).unwrap();
//! assert_eq!(bts.lac(), Some(bts.location_id));
//! ```

pub mod catalog;
pub mod element;
pub mod generator;

pub use element::*;
pub use generator::*;
