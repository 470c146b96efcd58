//! Error types for exo-browse

use thiserror::Error;

/// Client-side errors
#[derive(Debug, Error)]
pub enum ClientError {
    /// Network communication error
    #[error("Network error: {0}")]
    Network(String),

    /// exo-api returned an error response
    #[error("API error {0}: {1}")]
    Api(u16, String),

    /// Failed to parse a response body
    #[error("Parse error: {0}")]
    Parse(String),

    /// Invalid client configuration (e.g. malformed base URL)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Shared-library error (validation, configuration)
    #[error(transparent)]
    Common(#[from] exo_common::Error),
}

/// Convenience Result type using ClientError
pub type Result<T> = std::result::Result<T, ClientError>;
