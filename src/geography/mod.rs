//! Geographic partitioning
//!
//! This module splits a country's bounding box into named regions, one grid
//! per access-network generation.
//!
//! # Usage Example
//!
//! ```rust
//! use telco_synth::geography::*;
//! use telco_synth::types::*;
//!
//! let regions = GeographicPartitioner::new().partition(&GeoConfig::default()).unwrap();
//! let nord = &regions[0];
//! assert_eq!(nord.network_type, NetworkType::Gsm);
//! assert!(nord.contains_point(31.0, 9.0));
//! ```

pub mod partitioner;
pub mod region;

pub use partitioner::*;
pub use region::*;
