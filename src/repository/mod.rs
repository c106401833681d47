//! Entity storage abstraction
//!
//! This module defines the [`Entity`] trait implemented by every generated
//! record type and the generic [`Repository`] capability used to store and
//! look up reference data by opaque key or by type.
//!
//! # Usage Example
//!
//! ```rust
//! use telco_synth::repository::*;
//! use telco_synth::types::*;
//! use telco_synth::bearer::{Bearer, Qos};
//!
//! let mut repository = InMemoryRepository::new();
//! let bearer = Bearer::new(123456, BearerType::Default, Qos::new(64, 128).unwrap());
//!
//! repository.add(RecordKey::from("BEA123456"), bearer.clone()).unwrap();
//! assert!(repository.add(RecordKey::from("BEA123456"), bearer).is_err());
//! assert_eq!(repository.get_all_by_type(BearerType::Default).len(), 1);
//! ```

pub mod memory;

pub use memory::*;

use crate::types::{NetworkType, RecordKey};
use rand::Rng;
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::hash::Hash;
use thiserror::Error;

/// Flat field map produced from an entity; nested fields are joined with `_`
pub type FlatMap = BTreeMap<String, Value>;

/// Errors raised by repository operations
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RepositoryError {
    /// An entity is already stored under this key
    #[error("Record with key '{0}' already exists")]
    AlreadyExists(String),
}

/// A generated record that can be stored and sampled by type
pub trait Entity: Serialize + Clone {
    /// Classification used for typed lookups and sampling
    type Kind: Copy + Eq + Hash + fmt::Debug + fmt::Display;

    /// Collection name used in reference snapshots
    const COLLECTION: &'static str;

    /// Prefix of generated record keys
    const KEY_PREFIX: &'static str;

    /// The entity's classification
    fn kind(&self) -> Self::Kind;

    /// Generate a fresh record key for this entity kind
    fn generate_key<R: Rng + ?Sized>(rng: &mut R) -> RecordKey {
        RecordKey::from_rng(Self::KEY_PREFIX, rng)
    }

    /// Serialize into a flat field map
    fn to_flat_map(&self) -> Result<FlatMap, serde_json::Error> {
        Ok(flatten_value(serde_json::to_value(self)?))
    }
}

/// Entities that belong to one access-network generation
pub trait NetworkScoped {
    /// Generation the entity belongs to
    fn network_type(&self) -> NetworkType;
}

/// Storage capability generic over the entity type
pub trait Repository<T: Entity> {
    /// Store an entity under a key; fails if the key is taken
    fn add(&mut self, key: RecordKey, entity: T) -> Result<(), RepositoryError>;

    /// All entities in insertion order
    fn get_all(&self) -> Vec<&T>;

    /// Entity stored under the key
    fn get_by_key(&self, key: &RecordKey) -> Option<&T>;

    /// Uniformly sampled entity of the given kind
    fn get_random_by_type<R: Rng + ?Sized>(&self, kind: T::Kind, rng: &mut R) -> Option<&T>;

    /// All entities of the given kind in insertion order
    fn get_all_by_type(&self, kind: T::Kind) -> Vec<&T>;

    /// All entities of the given generation in insertion order
    fn get_all_by_network_type(&self, network_type: NetworkType) -> Vec<&T>
    where
        T: NetworkScoped,
    {
        self.get_all()
            .into_iter()
            .filter(|entity| entity.network_type() == network_type)
            .collect()
    }

    /// Number of stored entities
    fn len(&self) -> usize;

    /// Whether nothing is stored
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Flatten a JSON value into a single-level map
///
/// Object keys are joined with `_`. Arrays and scalars are kept as values.
pub fn flatten_value(value: Value) -> FlatMap {
    let mut flat = FlatMap::new();
    match value {
        Value::Object(map) => {
            for (key, value) in map {
                flatten_into(&mut flat, key, value);
            }
        }
        other => {
            flat.insert("value".to_string(), other);
        }
    }
    flat
}

fn flatten_into(flat: &mut FlatMap, prefix: String, value: Value) {
    match value {
        Value::Object(map) => {
            for (key, value) in map {
                flatten_into(flat, format!("{}_{}", prefix, key), value);
            }
        }
        other => {
            flat.insert(prefix, other);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_flatten_nested_objects() {
        let value = json!({
            "id": 7,
            "qos": {"gbr": 64, "mbr": 128},
            "role": {"area_code": {"kind": "TrackingArea", "tac": 4001}}
        });

        let flat = flatten_value(value);

        assert_eq!(flat["id"], json!(7));
        assert_eq!(flat["qos_gbr"], json!(64));
        assert_eq!(flat["qos_mbr"], json!(128));
        assert_eq!(flat["role_area_code_tac"], json!(4001));
        assert!(!flat.contains_key("qos"));
    }

    #[test]
    fn test_flatten_scalar() {
        let flat = flatten_value(json!(5));
        assert_eq!(flat["value"], json!(5));
    }

    #[test]
    fn test_repository_error_display() {
        let error = RepositoryError::AlreadyExists("SUB_1".to_string());
        assert_eq!(error.to_string(), "Record with key 'SUB_1' already exists");
    }
}
