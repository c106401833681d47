//! Error types and handling
//!
//! This module contains the error type shared by every generation stage.

use crate::repository::RepositoryError;
use crate::types::{ConfigError, ConfigValidationError, SubscriberType};
use thiserror::Error;

/// Errors that can occur during synthesis
#[derive(Debug, Error)]
pub enum SynthesisError {
    /// Configuration validation failed
    #[error("Configuration validation failed: {0}")]
    ConfigurationError(#[from] ConfigValidationError),

    /// Configuration could not be loaded
    #[error("Configuration loading failed: {0}")]
    ConfigLoadError(#[from] ConfigError),

    /// A pool the synthesizer draws from has nothing in it
    #[error("Cannot draw from empty pool: {0}")]
    EmptyPool(String),

    /// Every destination draw returned the calling subscriber
    #[error("No distinct {subscriber_type} subscriber found after {attempts} draws")]
    InsufficientPoolDiversity {
        /// Pool the destination was drawn from
        subscriber_type: SubscriberType,
        /// Number of draws made
        attempts: usize,
    },

    /// Repository operation failed
    #[error("Repository error: {0}")]
    RepositoryError(#[from] RepositoryError),

    /// I/O error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// CSV output error
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
}

impl SynthesisError {
    /// Create an empty pool error
    pub fn empty_pool(pool: impl Into<String>) -> Self {
        Self::EmptyPool(pool.into())
    }

    /// Create an insufficient pool diversity error
    pub fn insufficient_diversity(subscriber_type: SubscriberType, attempts: usize) -> Self {
        Self::InsufficientPoolDiversity { subscriber_type, attempts }
    }

    /// Check if this is a recoverable error
    ///
    /// Recoverable errors leave every previously built pool intact, so the
    /// caller may adjust its request and try again.
    pub fn is_recoverable(&self) -> bool {
        match self {
            SynthesisError::ConfigurationError(_) => false,
            SynthesisError::ConfigLoadError(_) => false,
            SynthesisError::EmptyPool(_) => true,
            SynthesisError::InsufficientPoolDiversity { .. } => true,
            SynthesisError::RepositoryError(_) => true,
            SynthesisError::IoError(_) => true,
            SynthesisError::SerializationError(_) => true,
            SynthesisError::CsvError(_) => true,
        }
    }

    /// Get the error category
    pub fn category(&self) -> &'static str {
        match self {
            SynthesisError::ConfigurationError(_) => "Configuration",
            SynthesisError::ConfigLoadError(_) => "Configuration",
            SynthesisError::EmptyPool(_) => "Pool",
            SynthesisError::InsufficientPoolDiversity { .. } => "Pool",
            SynthesisError::RepositoryError(_) => "Repository",
            SynthesisError::IoError(_) => "IO",
            SynthesisError::SerializationError(_) => "Serialization",
            SynthesisError::CsvError(_) => "Serialization",
        }
    }
}

/// Result type for synthesis operations
pub type SynthesisResult<T> = Result<T, SynthesisError>;
