//! Core types and identifiers for the telecom data synthesizer
//!
//! This module contains fundamental types, identifiers, and configuration structures
//! used throughout the synthesis pipeline.
//!
//! # Overview
//!
//! - **Identifiers**: subscriber ids and opaque repository record keys
//! - **Enums**: network generations, element types, subscriber and call categories
//! - **Configuration**: synthesis configuration with validation and CLI support
//!
//! # Usage Example
//!
//! ```rust
//! use telco_synth::types::*;
//!
//! let subscriber_id = SubscriberId::new();
//! let network_type: NetworkType = "4G".parse().unwrap();
//! assert_eq!(network_type, NetworkType::Lte);
//!
//! let config = SynthesisConfig {
//!     seed: Some(42),
//!     ..Default::default()
//! };
//! assert!(config.validate().is_ok());
//! ```

pub mod config;
pub mod enums;
pub mod identifiers;

// Re-export all public types for convenience
pub use config::*;
pub use enums::*;
pub use identifiers::*;
