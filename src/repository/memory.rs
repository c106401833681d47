//! In-memory repository
//!
//! Stores entities in insertion order with hash indices by key and by kind,
//! so keyed lookups and typed random sampling are O(1).

use super::{Entity, Repository, RepositoryError};
use crate::types::RecordKey;
use rand::Rng;
use std::collections::HashMap;

/// Repository that keeps every entity in memory
#[derive(Debug, Clone)]
pub struct InMemoryRepository<T: Entity> {
    entries: Vec<(RecordKey, T)>,
    key_index: HashMap<RecordKey, usize>,
    kind_index: HashMap<T::Kind, Vec<usize>>,
}

impl<T: Entity> Default for InMemoryRepository<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            key_index: HashMap::new(),
            kind_index: HashMap::new(),
        }
    }
}

impl<T: Entity> InMemoryRepository<T> {
    /// Create an empty repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a repository from entities, generating a key for each
    pub fn from_entities<R, I>(entities: I, rng: &mut R) -> Result<Self, RepositoryError>
    where
        R: Rng + ?Sized,
        I: IntoIterator<Item = T>,
    {
        let mut repository = Self::new();
        for entity in entities {
            repository.add(T::generate_key(rng), entity)?;
        }
        Ok(repository)
    }

    /// All key/entity pairs in insertion order
    pub fn entries(&self) -> impl Iterator<Item = (&RecordKey, &T)> {
        self.entries.iter().map(|(key, entity)| (key, entity))
    }

    /// Number of entities of the given kind
    pub fn count_by_type(&self, kind: T::Kind) -> usize {
        self.kind_index.get(&kind).map_or(0, Vec::len)
    }
}

impl<T: Entity> Repository<T> for InMemoryRepository<T> {
    fn add(&mut self, key: RecordKey, entity: T) -> Result<(), RepositoryError> {
        if self.key_index.contains_key(&key) {
            return Err(RepositoryError::AlreadyExists(key.to_string()));
        }

        let idx = self.entries.len();
        self.kind_index.entry(entity.kind()).or_default().push(idx);
        self.key_index.insert(key.clone(), idx);
        self.entries.push((key, entity));
        Ok(())
    }

    fn get_all(&self) -> Vec<&T> {
        self.entries.iter().map(|(_, entity)| entity).collect()
    }

    fn get_by_key(&self, key: &RecordKey) -> Option<&T> {
        self.key_index.get(key).map(|&idx| &self.entries[idx].1)
    }

    fn get_random_by_type<R: Rng + ?Sized>(&self, kind: T::Kind, rng: &mut R) -> Option<&T> {
        let indices = self.kind_index.get(&kind)?;
        if indices.is_empty() {
            return None;
        }
        let idx = indices[rng.gen_range(0..indices.len())];
        Some(&self.entries[idx].1)
    }

    fn get_all_by_type(&self, kind: T::Kind) -> Vec<&T> {
        self.kind_index
            .get(&kind)
            .map(|indices| indices.iter().map(|&idx| &self.entries[idx].1).collect())
            .unwrap_or_default()
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}
