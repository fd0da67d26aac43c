//! Error types for page-seo-audit.
//!
//! Extraction itself never fails: malformed page content is reported inline
//! in the `PageReport`. Errors are reserved for building a `Page` and for
//! decoding host messages.

/// Error type for page construction and message decoding.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The page location is not an absolute URL.
    #[error("Invalid page location '{location}': {reason}")]
    InvalidLocation {
        /// The rejected location string.
        location: String,
        /// Why it was rejected.
        reason: String,
    },

    /// A host message could not be decoded.
    #[error("Invalid host message: {0}")]
    InvalidMessage(#[from] serde_json::Error),
}

/// Result type alias for page-seo-audit operations.
pub type Result<T> = std::result::Result<T, Error>;
