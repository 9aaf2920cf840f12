//! Error types for the historical data pipeline.

use thiserror::Error;

/// Top-level pipeline error.
#[derive(Error, Debug)]
pub enum FeedError {
    #[error("Configuration error: {0}")]
    Config(String),

    /// Handshake failure: timeout, refusal, or any transport exception,
    /// all normalized into one kind carrying the original cause text.
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Precondition failure raised before any network or rate-limiter
    /// side effect.
    #[error("Not connected to the session")]
    NotConnected,

    /// Error surfaced by the underlying transport during a fetch call,
    /// propagated unwrapped. This layer does not retry.
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("Invalid time range: {0}")]
    InvalidRange(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Catalog sink errors.
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Overlapping write rejected: batch starts at {batch_start} but {path} ends at {last_written}")]
    Overlap {
        path: String,
        last_written: i64,
        batch_start: i64,
    },

    #[error("Encode error: {0}")]
    Encode(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for pipeline operations.
pub type FeedResult<T> = Result<T, FeedError>;
