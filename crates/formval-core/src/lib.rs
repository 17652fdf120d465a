//! # formval-core — Foundational Types for formval
//!
//! This crate is the leaf of the formval workspace. It defines the value
//! model every rule and record operates on, and the top-level error type
//! the other crates convert into.
//!
//! ## Key Design Principles
//!
//! 1. **One dynamic value type.** Form input arrives as text, but schemas
//!    and initial values may carry numbers, booleans, or nothing at all.
//!    [`FieldValue`] models all of them, including an explicit
//!    [`FieldValue::Undefined`] for a field that was never supplied.
//!
//! 2. **Loose numeric coercion lives here.** [`FieldValue::to_number`] is the
//!    single definition of "can this be read as a number". Rules never parse
//!    numbers on their own.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `formval-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod error;
pub mod value;

// Re-export primary types for ergonomic imports.
pub use error::FormvalError;
pub use value::{parse_number, FieldValue};
