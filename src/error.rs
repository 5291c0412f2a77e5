//! Error types for field extraction.
//!
//! This module provides the [`MarcError`] type and the [`Result`] convenience type.
//! Extraction itself never fails: missing fields, missing links and unparseable dates
//! all degrade to empty output. Errors are reserved for malformed input shapes handed
//! in by the caller.

use thiserror::Error;

/// Error type for all marcspec operations.
#[derive(Error, Debug)]
pub enum MarcError {
    /// A field occurrence or record has an impossible shape, e.g. a field that
    /// carries both a direct control value and subfields.
    #[error("Validation error: {0}")]
    Validation(String),

    /// A spec string could not be read as text.
    #[error("Invalid field spec: {0}")]
    InvalidSpec(String),

    /// Error indicating an invalid field structure.
    #[error("Invalid field: {0}")]
    InvalidField(String),

    /// Error decoding the JSON field-list representation.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience type alias for [`std::result::Result`] with [`MarcError`].
pub type Result<T> = std::result::Result<T, MarcError>;
