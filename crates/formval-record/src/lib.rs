//! # formval-record — Validated Records
//!
//! A [`ValidatedRecord`] wraps a schema and two buckets. Every field write
//! is validated on the spot and lands in exactly one of them:
//!
//! - `data`: the last value that passed validation for each field.
//! - `errors`: the latest failure message for each field.
//!
//! A field never appears in both. Callers push raw input on every change
//! and read the buckets back; there is no separate "validate now" step and
//! invalid input is never an `Err`.
//!
//! ```
//! use formval_record::ValidatedRecord;
//! use formval_rules::{v, Schema};
//!
//! let schema = Schema::builder()
//!     .field("name", v::string().required())
//!     .build();
//!
//! let mut record = ValidatedRecord::new(schema);
//! assert_eq!(record.error("name"), Some("required field"));
//!
//! record.write("name", "Ann").unwrap();
//! assert_eq!(record.error("name"), None);
//! assert!(record.is_valid());
//! ```
//!
//! ## Crate Policy
//!
//! - Depends on `formval-core` and `formval-rules` only.
//! - Writes to undeclared fields are the only error, and they leave the
//!   record untouched.
//! - A record has one writer at a time (`write` takes `&mut self`). Share
//!   the schema, not the record.

pub mod record;
pub mod session;

pub use record::{FieldStatus, RecordError, RecordSnapshot, Slot, ValidatedRecord};
pub use session::FormSession;
