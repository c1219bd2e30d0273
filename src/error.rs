//! Error handling for transit network processing.
//!
//! Provides error types with enough context (file path, dataset, feature
//! index) to locate a failure in the raw input or on the output side.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TransitError {
    #[error("Input file unavailable: {path}")]
    InputUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Not a GeoJSON feature collection: {path} - {reason}")]
    InvalidCollection { path: PathBuf, reason: String },

    #[error("Malformed {dataset} feature at index {index}: {reason}")]
    MalformedInput {
        dataset: String,
        index: usize,
        reason: String,
    },

    #[error("Failed to write output file: {path}")]
    OutputWriteFailure {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

impl TransitError {
    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a malformed feature error
    pub fn malformed(dataset: impl Into<String>, index: usize, reason: impl Into<String>) -> Self {
        Self::MalformedInput {
            dataset: dataset.into(),
            index,
            reason: reason.into(),
        }
    }

    /// True for errors describing the shape of the raw input
    pub fn is_malformed_input(&self) -> bool {
        matches!(
            self,
            TransitError::MalformedInput { .. } | TransitError::InvalidCollection { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, TransitError>;
