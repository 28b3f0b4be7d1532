//! # Error Types
//!
//! Structured error types for bolt_core. Every failure in the core is
//! returned to the caller as-is; nothing here retries or recovers.
//!
//! Variants fall into three kinds (see [`ErrorKind`]):
//!
//! - **Lookup**: a thread designation is missing from the reference table
//! - **Format**: a strength class is not of the form `<int>.<int>`
//! - **Io**: the reference table or a source page could not be read or parsed
//!
//! ## Example
//!
//! ```rust
//! use bolt_core::errors::{BoltError, ErrorKind};
//! use bolt_core::materials::decode_strength_class;
//!
//! let err = decode_strength_class("abc.9").unwrap_err();
//! assert_eq!(err.kind(), ErrorKind::Format);
//! assert!(matches!(err, BoltError::InvalidStrengthClass { .. }));
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for bolt_core operations
pub type BoltResult<T> = Result<T, BoltError>;

/// Coarse classification of a [`BoltError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorKind {
    Lookup,
    Format,
    Io,
}

/// Structured error type for table and calculation operations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum BoltError {
    /// Thread designation not present in the reference table
    #[error("Thread not found: '{designation}' is not in the reference table")]
    ThreadNotFound { designation: String },

    /// Strength class does not decode as `<int>.<int>`
    #[error("Invalid strength class '{value}': {reason}")]
    InvalidStrengthClass { value: String, reason: String },

    /// Reference table could not be opened, read or written
    #[error("File error: {operation} on '{path}' - {reason}")]
    FileError {
        operation: String,
        path: String,
        reason: String,
    },

    /// Source page could not be fetched
    #[error("Fetch error: '{url}' - {reason}")]
    FetchError { url: String, reason: String },

    /// Table content is malformed (missing table, wrong columns, bad number)
    #[error("Table parse error in {source_name}: {reason}")]
    TableParse { source_name: String, reason: String },
}

impl BoltError {
    /// Create a ThreadNotFound error
    pub fn thread_not_found(designation: impl Into<String>) -> Self {
        BoltError::ThreadNotFound {
            designation: designation.into(),
        }
    }

    /// Create an InvalidStrengthClass error
    pub fn invalid_strength_class(value: impl Into<String>, reason: impl Into<String>) -> Self {
        BoltError::InvalidStrengthClass {
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a FileError
    pub fn file_error(operation: impl Into<String>, path: impl Into<String>, reason: impl Into<String>) -> Self {
        BoltError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a FetchError
    pub fn fetch_error(url: impl Into<String>, reason: impl Into<String>) -> Self {
        BoltError::FetchError {
            url: url.into(),
            reason: reason.into(),
        }
    }

    /// Create a TableParse error
    pub fn table_parse(source_name: impl Into<String>, reason: impl Into<String>) -> Self {
        BoltError::TableParse {
            source_name: source_name.into(),
            reason: reason.into(),
        }
    }

    /// Which of the three failure kinds this error belongs to
    pub fn kind(&self) -> ErrorKind {
        match self {
            BoltError::ThreadNotFound { .. } => ErrorKind::Lookup,
            BoltError::InvalidStrengthClass { .. } => ErrorKind::Format,
            BoltError::FileError { .. }
            | BoltError::FetchError { .. }
            | BoltError::TableParse { .. } => ErrorKind::Io,
        }
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            BoltError::ThreadNotFound { .. } => "THREAD_NOT_FOUND",
            BoltError::InvalidStrengthClass { .. } => "INVALID_STRENGTH_CLASS",
            BoltError::FileError { .. } => "FILE_ERROR",
            BoltError::FetchError { .. } => "FETCH_ERROR",
            BoltError::TableParse { .. } => "TABLE_PARSE_ERROR",
        }
    }
}
