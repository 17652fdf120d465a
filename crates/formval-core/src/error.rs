//! # Error Types — Structured Error Hierarchy
//!
//! Defines the top-level error type for formval. All errors use
//! `thiserror` for derive-based `Display` and `Error` implementations.
//!
//! ## Design
//!
//! - A value failing a rule is never an error. It is recorded as a message
//!   in the record's `errors` bucket.
//! - Errors are reserved for caller misuse (writing a field the schema does
//!   not declare) and for configuration problems (a schema descriptor that
//!   cannot be loaded).

use thiserror::Error;

/// Top-level error type for formval.
///
/// Crate-specific errors (`SchemaLoadError`, `RecordError`) convert into
/// this type so front ends can handle a single error enum.
#[derive(Error, Debug)]
pub enum FormvalError {
    /// A write targeted a field the schema does not declare.
    #[error("unknown field '{0}': not declared in schema")]
    UnknownField(String),

    /// A schema descriptor could not be read or parsed.
    #[error("schema load error: {0}")]
    SchemaLoad(String),
}
