//! EPS bearers
//!
//! This module contains the bearer model and the catalog generator that
//! produces QoS-tagged bearers for packet-switched CDR context.

#[allow(clippy::module_inception)]
pub mod bearer;
pub mod catalog;

pub use bearer::*;
pub use catalog::*;
