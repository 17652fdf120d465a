//! # Validated Record
//!
//! Intercepts field writes, validates them against the schema, and keeps the
//! `data` and `errors` buckets consistent.
//!
//! ## Write Path
//!
//! ```text
//! write(field, value)
//!     │
//!     ├── field not in schema ──▶ Err(UnknownField)      (no mutation)
//!     │
//!     └── chain.validate(value)
//!             ├── Ok  ──▶ errors.remove(field); data[field] = value
//!             └── Err ──▶ data.remove(field);   errors[field] = message
//! ```
//!
//! Both validation outcomes return `Ok(())`. The write succeeded in the
//! sense that the record now reflects the value; whether the value was
//! acceptable is read from the buckets. Only a write the schema cannot
//! place is an `Err`.
//!
//! Construction runs every schema field through the same path, using the
//! supplied initial value or `Undefined`.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, trace};

use formval_core::{FieldValue, FormvalError};
use formval_rules::{RuleChain, Schema};

/// Pseudo-field naming the whole `data` bucket in [`ValidatedRecord::read`].
pub const DATA_BUCKET: &str = "data";
/// Pseudo-field naming the whole `errors` bucket in [`ValidatedRecord::read`].
pub const ERRORS_BUCKET: &str = "errors";

/// Error writing to a record.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RecordError {
    /// The schema does not declare the field.
    #[error("unknown field '{field}': not declared in schema")]
    UnknownField {
        /// The rejected field name.
        field: String,
    },
}

impl From<RecordError> for FormvalError {
    fn from(err: RecordError) -> Self {
        match err {
            RecordError::UnknownField { field } => FormvalError::UnknownField(field),
        }
    }
}

/// What [`ValidatedRecord::read`] found under a key.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Slot<'a> {
    /// The entire `data` bucket.
    Data(&'a BTreeMap<String, FieldValue>),
    /// The entire `errors` bucket.
    Errors(&'a BTreeMap<String, String>),
    /// One field's last valid value.
    Value(&'a FieldValue),
}

/// The state of one field, as a renderer sees it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldStatus<'a> {
    /// The field holds a valid value. Any displayed error should be cleared.
    Valid(&'a FieldValue),
    /// The field's latest value failed with this message.
    Invalid(&'a str),
    /// The schema does not declare the field.
    Unknown,
}

/// A serializable copy of both buckets.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecordSnapshot {
    /// Field name to last valid value.
    pub data: BTreeMap<String, FieldValue>,
    /// Field name to latest failure message.
    pub errors: BTreeMap<String, String>,
}

/// A record whose field writes are validated against a schema.
#[derive(Debug, Clone)]
pub struct ValidatedRecord {
    schema: Arc<Schema>,
    data: BTreeMap<String, FieldValue>,
    errors: BTreeMap<String, String>,
}

impl ValidatedRecord {
    /// Create a record with no initial values. Every schema field is
    /// validated as `Undefined`, so required fields start in `errors`.
    pub fn new(schema: impl Into<Arc<Schema>>) -> Self {
        Self::with_values(schema, std::iter::empty::<(String, FieldValue)>())
    }

    /// Create a record from initial values.
    ///
    /// Schema fields decide what is written: each one gets its initial
    /// value, or `Undefined` when none is supplied. Initial values for
    /// fields the schema does not declare are ignored.
    pub fn with_values<I, K, V>(schema: impl Into<Arc<Schema>>, initial: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<FieldValue>,
    {
        let schema = schema.into();
        let mut initial: HashMap<String, FieldValue> = initial
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();

        let mut record = Self {
            schema: Arc::clone(&schema),
            data: BTreeMap::new(),
            errors: BTreeMap::new(),
        };
        for (field, chain) in schema.fields() {
            let value = initial.remove(field).unwrap_or_default();
            record.commit(field, chain, value);
        }
        record
    }

    /// Write a field.
    ///
    /// Returns `Err(UnknownField)` without touching the record when the
    /// schema does not declare `field`. Otherwise validates the value and
    /// returns `Ok(())` whether it passed or not; a failure is recorded in
    /// `errors`.
    pub fn write(&mut self, field: &str, value: impl Into<FieldValue>) -> Result<(), RecordError> {
        let schema = Arc::clone(&self.schema);
        let Some(chain) = schema.get(field) else {
            debug!(field, "rejected write to undeclared field");
            return Err(RecordError::UnknownField {
                field: field.to_owned(),
            });
        };
        self.commit(field, chain, value.into());
        Ok(())
    }

    fn commit(&mut self, field: &str, chain: &RuleChain, value: FieldValue) {
        match chain.validate(&value) {
            Ok(()) => {
                trace!(field, value_type = value.type_name(), "field accepted");
                self.errors.remove(field);
                self.data.insert(field.to_owned(), value);
            }
            Err(message) => {
                debug!(field, reason = message, "field rejected");
                self.data.remove(field);
                self.errors.insert(field.to_owned(), message.to_owned());
            }
        }
    }

    /// Read a key.
    ///
    /// `"data"` and `"errors"` return the whole bucket. Any other key
    /// returns that field's last valid value, or `None` when the field is
    /// currently invalid or not declared.
    pub fn read(&self, key: &str) -> Option<Slot<'_>> {
        match key {
            DATA_BUCKET => Some(Slot::Data(&self.data)),
            ERRORS_BUCKET => Some(Slot::Errors(&self.errors)),
            field => self.data.get(field).map(Slot::Value),
        }
    }

    /// The `data` bucket.
    pub fn data(&self) -> &BTreeMap<String, FieldValue> {
        &self.data
    }

    /// The `errors` bucket.
    pub fn errors(&self) -> &BTreeMap<String, String> {
        &self.errors
    }

    /// The last valid value of `field`.
    pub fn value(&self, field: &str) -> Option<&FieldValue> {
        self.data.get(field)
    }

    /// The current failure message of `field`.
    pub fn error(&self, field: &str) -> Option<&str> {
        self.errors.get(field).map(String::as_str)
    }

    /// Where `field` currently stands.
    pub fn status(&self, field: &str) -> FieldStatus<'_> {
        if let Some(value) = self.data.get(field) {
            FieldStatus::Valid(value)
        } else if let Some(message) = self.errors.get(field) {
            FieldStatus::Invalid(message)
        } else {
            FieldStatus::Unknown
        }
    }

    /// The schema this record validates against.
    pub fn schema(&self) -> &Arc<Schema> {
        &self.schema
    }

    /// Whether no field currently fails. Every declared field is written at
    /// construction, so this also means every field holds a valid value.
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Copy both buckets.
    pub fn snapshot(&self) -> RecordSnapshot {
        RecordSnapshot {
            data: self.data.clone(),
            errors: self.errors.clone(),
        }
    }

    /// Consume the record and return its valid values.
    pub fn into_data(self) -> BTreeMap<String, FieldValue> {
        self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use formval_rules::{v, NUMBER_MESSAGE, REQUIRED_MESSAGE};

    fn user_schema() -> Arc<Schema> {
        Arc::new(
            Schema::builder()
                .field("name", v::string().required())
                .field("age", v::number().required())
                .build(),
        )
    }

    #[test]
    fn test_new_validates_every_field_as_undefined() {
        let record = ValidatedRecord::new(user_schema());
        assert!(record.data().is_empty());
        assert_eq!(record.error("name"), Some(REQUIRED_MESSAGE));
        assert_eq!(record.error("age"), Some(REQUIRED_MESSAGE));
    }

    #[test]
    fn test_initial_values_use_write_path() {
        let record = ValidatedRecord::with_values(user_schema(), [("name", ""), ("age", "30")]);
        assert_eq!(record.error("name"), Some(REQUIRED_MESSAGE));
        assert_eq!(record.value("age"), Some(&FieldValue::from("30")));
        assert_eq!(record.error("age"), None);
    }

    #[test]
    fn test_initial_values_outside_schema_ignored() {
        let record = ValidatedRecord::with_values(
            user_schema(),
            [("name", "Ann"), ("age", "30"), ("email", "ann@example.com")],
        );
        assert!(record.is_valid());
        assert_eq!(record.data().len(), 2);
        assert!(record.value("email").is_none());
    }

    #[test]
    fn test_write_valid_clears_error() {
        let mut record = ValidatedRecord::new(user_schema());
        record.write("name", "").unwrap();
        assert_eq!(record.error("name"), Some(REQUIRED_MESSAGE));

        record.write("name", "Ann").unwrap();
        assert_eq!(record.error("name"), None);
        assert_eq!(record.value("name"), Some(&FieldValue::from("Ann")));
    }

    #[test]
    fn test_write_invalid_evicts_data() {
        let mut record = ValidatedRecord::with_values(user_schema(), [("age", "30")]);
        assert!(record.value("age").is_some());

        record.write("age", "thirty").unwrap();
        assert!(record.value("age").is_none());
        assert_eq!(record.error("age"), Some(NUMBER_MESSAGE));
    }

    #[test]
    fn test_write_unknown_field_is_rejected() {
        let mut record = ValidatedRecord::with_values(user_schema(), [("name", "Ann")]);
        let before = record.snapshot();

        let err = record.write("email", "ann@example.com").unwrap_err();
        assert_eq!(
            err,
            RecordError::UnknownField {
                field: "email".into()
            }
        );
        assert_eq!(record.snapshot(), before);
    }

    #[test]
    fn test_validation_failure_is_not_an_error() {
        let mut record = ValidatedRecord::new(user_schema());
        assert_eq!(record.write("age", "abc"), Ok(()));
    }

    #[test]
    fn test_read_pseudo_fields() {
        let record = ValidatedRecord::with_values(user_schema(), [("name", "Ann")]);

        match record.read("data") {
            Some(Slot::Data(data)) => assert_eq!(data.len(), 1),
            other => panic!("Expected data bucket, got: {other:?}"),
        }
        match record.read("errors") {
            Some(Slot::Errors(errors)) => {
                assert_eq!(errors.get("age").map(String::as_str), Some(REQUIRED_MESSAGE));
            }
            other => panic!("Expected errors bucket, got: {other:?}"),
        }
        assert_eq!(
            record.read("name"),
            Some(Slot::Value(&FieldValue::from("Ann")))
        );
        assert_eq!(record.read("age"), None);
        assert_eq!(record.read("email"), None);
    }

    #[test]
    fn test_field_status() {
        let record = ValidatedRecord::with_values(user_schema(), [("name", "Ann")]);
        assert_eq!(
            record.status("name"),
            FieldStatus::Valid(&FieldValue::from("Ann"))
        );
        assert_eq!(record.status("age"), FieldStatus::Invalid(REQUIRED_MESSAGE));
        assert_eq!(record.status("email"), FieldStatus::Unknown);
    }

    #[test]
    fn test_rewriting_same_value_is_idempotent() {
        let mut record = ValidatedRecord::new(user_schema());
        record.write("age", "42").unwrap();
        let first = record.snapshot();
        record.write("age", "42").unwrap();
        assert_eq!(record.snapshot(), first);
    }

    #[test]
    fn test_snapshot_serializes_buckets() {
        let record = ValidatedRecord::with_values(user_schema(), [("name", ""), ("age", "30")]);
        let json = serde_json::to_value(record.snapshot()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "data": { "age": "30" },
                "errors": { "name": "required field" }
            })
        );
    }

    #[test]
    fn test_into_data() {
        let record = ValidatedRecord::with_values(user_schema(), [("name", "Ann"), ("age", "5")]);
        let data = record.into_data();
        assert_eq!(data["name"], FieldValue::from("Ann"));
        assert_eq!(data["age"], FieldValue::from("5"));
    }

    #[test]
    fn test_record_error_converts_to_formval_error() {
        let err: FormvalError = RecordError::UnknownField {
            field: "email".into(),
        }
        .into();
        assert!(matches!(err, FormvalError::UnknownField(ref f) if f == "email"));
    }

    #[test]
    fn test_schema_shared_between_records() {
        let schema = user_schema();
        let a = ValidatedRecord::new(Arc::clone(&schema));
        let b = ValidatedRecord::with_values(Arc::clone(&schema), [("name", "Ann")]);
        assert!(Arc::ptr_eq(a.schema(), b.schema()));
        assert_eq!(Arc::strong_count(&schema), 3);
    }
}
