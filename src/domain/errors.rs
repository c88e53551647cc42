//! Domain Errors
//!
//! Failures a geocoding query can report, and failures a lookup backend can
//! hit while it is being opened.

use std::net::Ipv4Addr;

/// Errors surfaced by a geocoding provider.
///
/// None of these are retried: each propagates straight to the caller.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GeocodeError {
    /// The lookup capability is missing; raised only at construction.
    #[error("lookup backend unavailable: {0}")]
    DependencyUnavailable(String),
    /// The query is not something this provider can resolve.
    #[error("unsupported input: {0}")]
    UnsupportedInput(String),
    /// The query was valid but the database holds no record for it.
    #[error("no result: {0}")]
    NoResult(String),
    /// The operation itself is not offered by this provider.
    #[error("unsupported operation: {0}")]
    UnsupportedOperation(String),
}

/// Errors raised while opening or probing a lookup backend.
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("maxmind database error: {0}")]
    MaxMind(String),
    #[error("invalid json document: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid range {start}-{end}: {reason}")]
    InvalidRange {
        start: Ipv4Addr,
        end: Ipv4Addr,
        reason: &'static str,
    },
    #[error("unsupported database: {0}")]
    UnsupportedDatabase(String),
}
