//! Data source error types.

use std::path::PathBuf;

use crate::network::GraphError;

/// Errors that can occur when loading the network description.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Source returned an error status
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Local file could not be read
    #[error("failed to read {}: {message}", .path.display())]
    Io { path: PathBuf, message: String },

    /// Failed to parse the description JSON
    #[error("JSON parse error: {message}")]
    Json { message: String },

    /// Cache operation failed
    #[error("cache error: {message}")]
    Cache { message: String },

    /// Description decoded but failed validation
    #[error("invalid network data: {0}")]
    Graph(#[from] GraphError),
}

/// Error returned when a data source URI cannot be understood.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid data source {input:?}: {reason}")]
pub struct InvalidDataSource {
    pub(crate) input: String,
    pub(crate) reason: &'static str,
}
