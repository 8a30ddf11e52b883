//! Error types and utilities for Brandcast

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for Brandcast operations
pub type Result<T> = std::result::Result<T, BrandcastError>;

type BoxedSource = Box<dyn std::error::Error + Send + Sync>;

/// Main error type for Brandcast operations
#[derive(Error, Debug)]
pub enum BrandcastError {
    /// Configuration related errors
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        #[source]
        source: Option<BoxedSource>,
    },

    /// I/O related errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A per-brand artifact (model weights or daily table) is absent
    #[error("Missing artifact for brand '{brand}': {}", path.display())]
    MissingArtifact { brand: String, path: PathBuf },

    /// The global event log could not be found
    #[error("Missing dataset: {}", path.display())]
    MissingDataset { path: PathBuf },

    /// Malformed CSV tables and unparseable values
    #[error("Dataset error: {message}")]
    Dataset {
        message: String,
        #[source]
        source: Option<BoxedSource>,
    },

    /// Model loading, shape mismatches, and forward-pass failures
    #[error("Inference failure: {message}")]
    Inference {
        message: String,
        #[source]
        source: Option<BoxedSource>,
    },

    /// No events were recorded for the requested brand
    #[error("No data available for brand '{brand}'")]
    NoData { brand: String },

    /// Graph generation and plotting errors
    #[error("Graph error: {message}")]
    Graph {
        message: String,
        #[source]
        source: Option<BoxedSource>,
    },

    /// Validation errors for user input or data
    #[error("Validation error: {message}")]
    Validation {
        message: String,
        field: Option<String>,
    },

    /// Generic error with custom message
    #[error("{message}")]
    Generic {
        message: String,
        #[source]
        source: Option<BoxedSource>,
    },
}

impl BrandcastError {
    /// Create a new generic error with a custom message
    pub fn new(msg: impl Into<String>) -> Self {
        Self::Generic {
            message: msg.into(),
            source: None,
        }
    }

    /// Create a new generic error with a custom message and source
    pub fn with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Generic {
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
            source: None,
        }
    }

    /// Create a new configuration error with source
    pub fn config_with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Config {
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }

    pub fn missing_artifact(brand: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self::MissingArtifact {
            brand: brand.into(),
            path: path.into(),
        }
    }

    pub fn missing_dataset(path: impl Into<PathBuf>) -> Self {
        Self::MissingDataset { path: path.into() }
    }

    /// Create a new dataset error
    pub fn dataset(msg: impl Into<String>) -> Self {
        Self::Dataset {
            message: msg.into(),
            source: None,
        }
    }

    /// Create a new dataset error with source
    pub fn dataset_with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Dataset {
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a new inference error
    pub fn inference(msg: impl Into<String>) -> Self {
        Self::Inference {
            message: msg.into(),
            source: None,
        }
    }

    /// Create a new inference error with source
    pub fn inference_with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Inference {
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }

    pub fn no_data(brand: impl Into<String>) -> Self {
        Self::NoData {
            brand: brand.into(),
        }
    }

    /// Create a new graph error
    pub fn graph(msg: impl Into<String>) -> Self {
        Self::Graph {
            message: msg.into(),
            source: None,
        }
    }

    /// Create a new graph error with source
    pub fn graph_with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Graph {
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a new validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation {
            message: msg.into(),
            field: None,
        }
    }

    /// Create a new validation error with field name
    pub fn validation_field(msg: impl Into<String>, field: impl Into<String>) -> Self {
        Self::Validation {
            message: msg.into(),
            field: Some(field.into()),
        }
    }

    /// Whether this error is a "nothing to show" outcome rather than a fault.
    pub fn is_absence(&self) -> bool {
        matches!(
            self,
            Self::MissingArtifact { .. } | Self::MissingDataset { .. } | Self::NoData { .. }
        )
    }
}

// Error conversion implementations for external types

/// Convert from csv::Error to BrandcastError
impl From<csv::Error> for BrandcastError {
    fn from(err: csv::Error) -> Self {
        match err.position() {
            Some(pos) => {
                Self::dataset_with_source(format!("CSV error at line {}", pos.line()), err)
            }
            None => Self::dataset_with_source("CSV error", err),
        }
    }
}

/// Convert from serde_yaml::Error to BrandcastError
impl From<serde_yaml::Error> for BrandcastError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::config_with_source("YAML parsing error", err)
    }
}

#[cfg(feature = "plotters")]
/// Convert from plotters drawing errors to BrandcastError
impl<T> From<plotters::drawing::DrawingAreaErrorKind<T>> for BrandcastError
where
    T: std::error::Error + Send + Sync + 'static,
{
    fn from(err: plotters::drawing::DrawingAreaErrorKind<T>) -> Self {
        Self::graph_with_source("Graph rendering failed", err)
    }
}
