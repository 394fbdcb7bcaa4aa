//! # Error Handling
//!
//! This module defines the centralized error type for `config-matrix`. It uses
//! the `thiserror` library to describe every way a matrix can be rejected,
//! with enough context (axis, option, dotted field path) to point the author
//! at the offending entry.
//!
//! All of these errors are construction-time contract violations: they are
//! raised while loading axes or while expanding them, always before any
//! output is written. There is no recovery path; the caller aborts.
//!
//! - Matrix file parsing errors.
//! - Malformed or reserved fragment fields.
//! - Duplicate or unknown option names within an axis.
//! - Kind disagreements between merged fields.
//! - Configuration name collisions.
//! - I/O, YAML, JSON, regex and glob errors from the underlying crates.

use thiserror::Error;

use crate::fragment::ValueKind;

/// Main error type for config-matrix operations
#[derive(Error, Debug)]
pub enum Error {
    /// The matrix file could not be understood.
    ///
    /// Includes an optional hint about how to fix it.
    #[error("Matrix parsing error: {message}{}", hint.as_ref().map(|h| format!("\n  hint: {}", h)).unwrap_or_default())]
    MatrixParse {
        message: String,
        /// Optional hint for how to fix the matrix file
        hint: Option<String>,
    },

    /// A fragment field holds something other than a string, a list of
    /// strings or a nested mapping.
    #[error("Malformed field '{path}': {message}")]
    MalformedField { path: String, message: String },

    /// A fragment uses a field name the generator owns.
    #[error("Reserved field '{field}' in {path}")]
    ReservedField { path: String, field: String },

    /// The same option name appears twice in one axis.
    #[error("Duplicate option '{option}' in axis '{axis}'")]
    DuplicateOption { axis: String, option: String },

    /// A disabled-option entry names an option the axis does not have.
    #[error("Unknown option '{option}' in axis '{axis}'")]
    UnknownOption { axis: String, option: String },

    /// Base and overlay disagree on the kind of a shared field.
    #[error("Cannot merge field '{field}': base is a {base}, overlay is a {overlay}")]
    KindMismatch {
        field: String,
        base: ValueKind,
        overlay: ValueKind,
    },

    /// Merging an option onto its parent configuration failed.
    #[error("Failed to build configuration '{configuration}': {source}")]
    Expansion {
        configuration: String,
        #[source]
        source: Box<Error>,
    },

    /// Two different option paths produced the same configuration name.
    #[error("Duplicate configuration name '{name}'")]
    DuplicateConfiguration { name: String },

    /// An I/O error, wrapped from `std::io::Error`.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A YAML error, wrapped from `serde_yaml::Error`.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// A JSON error, wrapped from `serde_json::Error`.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A regular expression error, wrapped from `regex::Error`.
    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),

    /// A glob pattern error, wrapped from `glob::PatternError`.
    #[error("Glob pattern error: {0}")]
    Glob(#[from] glob::PatternError),

    /// An error occurred during serialization.
    #[error("Serialization error: {message}")]
    Serialization { message: String },
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
