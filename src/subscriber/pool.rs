//! Subscriber pool
//!
//! An immutable set of subscribers partitioned by subscriber type, built once
//! per request and sampled by the CDR synthesizer.

use crate::repository::{InMemoryRepository, Repository, RepositoryError};
use crate::subscriber::Subscriber;
use crate::types::{RecordKey, SubscriberType};
use rand::Rng;

/// Read-only pool of subscribers with typed random sampling
#[derive(Debug, Clone, Default)]
pub struct SubscriberPool {
    repository: InMemoryRepository<Subscriber>,
}

impl SubscriberPool {
    /// Build a pool keyed by subscriber id
    pub fn new(subscribers: impl IntoIterator<Item = Subscriber>) -> Result<Self, RepositoryError> {
        let mut repository = InMemoryRepository::new();
        for subscriber in subscribers {
            repository.add(RecordKey::from(subscriber.id.to_string()), subscriber)?;
        }
        Ok(Self { repository })
    }

    /// Uniformly sampled subscriber of the given type
    pub fn get_random_by_type<R: Rng + ?Sized>(
        &self,
        subscriber_type: SubscriberType,
        rng: &mut R,
    ) -> Option<&Subscriber> {
        self.repository.get_random_by_type(subscriber_type, rng)
    }

    /// All subscribers of the given type
    pub fn get_all_by_type(&self, subscriber_type: SubscriberType) -> Vec<&Subscriber> {
        self.repository.get_all_by_type(subscriber_type)
    }

    /// Number of subscribers of the given type
    pub fn count_by_type(&self, subscriber_type: SubscriberType) -> usize {
        self.repository.count_by_type(subscriber_type)
    }

    /// Total number of subscribers
    pub fn len(&self) -> usize {
        self.repository.len()
    }

    /// Whether the pool has no subscribers
    pub fn is_empty(&self) -> bool {
        self.repository.is_empty()
    }

    /// Underlying keyed storage
    pub fn repository(&self) -> &InMemoryRepository<Subscriber> {
        &self.repository
    }
}
