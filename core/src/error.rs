//! Error types for the contacts core.
//!
//! # Design
//! The three failure classes of a fetch (transport, decode, missing data)
//! each get a variant so the host can log them distinctly, even though the
//! list model treats them all the same way: log, abort, keep prior state.
//! Non-200 statuses keep the raw status and body for debugging.

use thiserror::Error;

/// Errors produced while fetching and decoding the contacts document.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The host could not complete the request (bad URL, no network, ...).
    #[error("transport failed: {0}")]
    Transport(String),

    /// The server answered with something other than 200.
    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    /// The body is not JSON or does not have the expected shape.
    #[error("deserialization failed: {0}")]
    Deserialization(String),

    /// The document decoded but carries no `result` array.
    #[error("response has no result")]
    MissingResult,
}

/// Rejected page navigation input.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PageError {
    #[error("Invalid page value")]
    InvalidPage,
}
