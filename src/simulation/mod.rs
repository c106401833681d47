//! Synthesis orchestration and control
//!
//! This module contains the synthesis orchestrator, statistics collection,
//! logging setup and error handling.
//!
//! # Overview
//!
//! - **SynthesisOrchestrator**: Owns the pools and drives every generation stage
//! - **SynthesisStatistics**: Collects counts of everything a run produced
//! - **LoggingConfig**: Configures `tracing` output for the binary and tests
//! - **SynthesisError**: Error type shared by every stage
//!
//! # Usage Example
//!
//! ```rust
//! use telco_synth::simulation::*;
//! use telco_synth::types::*;
//!
//! let mut config = SynthesisConfig {
//!     seed: Some(42),
//!     ..Default::default()
//! };
//! config.cdr.count = 100;
//!
//! let mut orchestrator = SynthesisOrchestrator::new(config).unwrap();
//! let records = orchestrator.run().unwrap();
//!
//! assert_eq!(records.len(), 100);
//! assert_eq!(orchestrator.get_statistics().total_cdrs, 100);
//! ```

pub mod error;
pub mod logging;
pub mod orchestrator;
pub mod statistics;

// Re-export all public types for convenience
pub use error::*;
pub use logging::*;
pub use orchestrator::*;
pub use statistics::*;
