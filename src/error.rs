//! Error types for remote record access.
//!
//! Every failure a [`RecordStore`](crate::client::RecordStore) call can
//! produce maps onto one [`RecordError`] variant. The view controller turns
//! these into user-facing notifications; nothing above it sees them.

use thiserror::Error;

/// Errors that can occur while talking to the records API.
#[derive(Debug, Error)]
pub enum RecordError {
    /// Entity name is not present in the schema registry.
    #[error("Unknown entity '{name}'")]
    UnknownEntity { name: String },

    /// Server answered an id-addressed request with 404.
    #[error("{entity} record '{id}' not found")]
    NotFound { entity: String, id: String },

    /// Server answered with a non-success status.
    #[error("Request to {url} failed with status {status}")]
    Transport { status: u16, url: String },

    /// No HTTP response was received (refused, reset, timed out).
    #[error("Connection to {url} failed: {source}")]
    Connection {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Response body is not the JSON shape the call expects.
    #[error("Malformed response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    /// Base URL cannot address a collection (e.g. `mailto:`).
    #[error("Invalid API URL '{url}': {message}")]
    InvalidUrl { url: String, message: String },
}

impl RecordError {
    /// HTTP status carried by the error, if the server produced one.
    pub fn status(&self) -> Option<u16> {
        match self {
            RecordError::Transport { status, .. } => Some(*status),
            RecordError::NotFound { .. } => Some(404),
            _ => None,
        }
    }

    /// Short machine-readable kind, used as a structured log field.
    pub fn kind(&self) -> &'static str {
        match self {
            RecordError::UnknownEntity { .. } => "unknown_entity",
            RecordError::NotFound { .. } => "not_found",
            RecordError::Transport { .. } => "transport",
            RecordError::Connection { .. } => "connection",
            RecordError::Decode { .. } => "decode",
            RecordError::InvalidUrl { .. } => "invalid_url",
        }
    }
}
