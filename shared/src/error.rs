//! Error types for the shared crate
//!
//! Data errors raised while decoding server-rendered page data.

use thiserror::Error;

/// Malformed or missing page data
#[derive(Debug, Error)]
pub enum DataError {
    /// A photo payload could not be decoded
    #[error("Invalid photo payload: {0}")]
    PhotoPayload(#[source] serde_json::Error),

    /// A catalog document could not be decoded
    #[error("Invalid catalog: {0}")]
    Catalog(#[source] serde_json::Error),
}

/// Result type for data decoding
pub type DataResult<T> = Result<T, DataError>;
