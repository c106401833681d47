//! Unique identifier types for the telecom data synthesizer
//!
//! This module contains the UUID-based subscriber identifier and the opaque
//! record keys used when reference data is stored in a repository.

use rand::Rng;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use uuid::{Builder, Uuid};

/// Unique identifier for a subscriber
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriberId(pub Uuid);

impl SubscriberId {
    /// Create a new random subscriber ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create a subscriber ID from the given random source
    ///
    /// Seeded sources yield the same IDs run after run.
    pub fn from_rng<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self(Builder::from_random_bytes(rng.gen()).into_uuid())
    }
}

impl Default for SubscriberId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SubscriberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SUB_{}", self.0.simple())
    }
}

impl Serialize for SubscriberId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&format!("SUB_{}", self.0.simple()))
    }
}

impl<'de> Deserialize<'de> for SubscriberId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        let uuid_str = s.strip_prefix("SUB_").unwrap_or(&s);
        let uuid = Uuid::parse_str(uuid_str).map_err(serde::de::Error::custom)?;
        Ok(SubscriberId(uuid))
    }
}

/// Opaque string key under which an entity is stored in a repository
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordKey(String);

impl RecordKey {
    /// Create a new random key with the given prefix
    pub fn new(prefix: &str) -> Self {
        Self(format!("{}{}", prefix, Uuid::new_v4().simple()))
    }

    /// Create a key with the given prefix from the given random source
    pub fn from_rng<R: Rng + ?Sized>(prefix: &str, rng: &mut R) -> Self {
        let uuid = Builder::from_random_bytes(rng.gen()).into_uuid();
        Self(format!("{}{}", prefix, uuid.simple()))
    }

    /// Borrow the key as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for RecordKey {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for RecordKey {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl fmt::Display for RecordKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
