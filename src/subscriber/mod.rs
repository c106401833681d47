//! Subscriber identities and pools
//!
//! This module generates synthetic subscribers with valid MSISDN, IMSI, IMEI
//! and SIM identifiers and pools them by subscriber type.
//!
//! # Usage Example
//!
//! ```rust
//! use telco_synth::subscriber::*;
//! use telco_synth::types::*;
//!
//! let mut factory = IdentityFactory::with_seed(42);
//! let subscribers = factory.generate_subscribers(&IdentityConfig::default()).unwrap();
//! assert!(subscribers.iter().all(|s| is_luhn_valid(&s.imei)));
//!
//! let pool = SubscriberPool::new(subscribers).unwrap();
//! assert_eq!(pool.count_by_type(SubscriberType::Home), 100);
//! ```

pub mod identity;
pub mod pool;
#[allow(clippy::module_inception)]
pub mod subscriber;

pub use identity::*;
pub use pool::*;
pub use subscriber::*;
