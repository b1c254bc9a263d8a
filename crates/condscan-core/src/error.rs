//! Error types for Condscan core.

use thiserror::Error;

/// Result type for Condscan operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while reading or writing unit payloads.
#[derive(Debug, Error)]
pub enum Error {
    /// JSON payload could not be decoded into the expected shape.
    #[error("JSON error in {context}: {source}")]
    Json {
        /// Where the payload came from (file name, "stdin", request body).
        context: String,
        /// The underlying JSON error.
        #[source]
        source: serde_json::Error,
    },
}

impl Error {
    /// Wrap a JSON error with the payload's origin.
    pub fn json(context: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Json {
            context: context.into(),
            source,
        }
    }
}
