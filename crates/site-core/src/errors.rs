//! Cross-cutting error types for the site builder.
//!
//! Draft store operations report misuse through [`crate::outcome::Outcome`]
//! rather than errors. `CoreError` covers the failures that are not part of
//! that silent contract: malformed input and (de)serialization.

use thiserror::Error;

/// Errors that can be raised by any site crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A field path could not be parsed.
    #[error("Invalid field path '{path}': {reason}")]
    InvalidPath { path: String, reason: String },

    /// A field path runs through a value that cannot hold children.
    #[error("Cannot write '{path}': segment '{segment}' is not an object or an in-bounds array index")]
    PathConflict { path: String, segment: String },

    /// Data failed validation (missing title, bad shape, etc).
    #[error("Validation error: {0}")]
    Validation(String),

    /// Conversion between typed records and JSON documents failed.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
