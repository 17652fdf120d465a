//! # Form Session
//!
//! The glue between an input surface and validated records: one schema,
//! one current record. Submitting a form replaces the record with a fresh
//! one built from the submitted values; each subsequent keystroke-level
//! change is forwarded as a single write to that record.

use std::path::Path;
use std::sync::Arc;

use formval_core::{FieldValue, FormvalError};
use formval_rules::Schema;

use crate::record::{FieldStatus, RecordError, ValidatedRecord};

/// A schema paired with the record currently being edited. The schema is
/// the one the record holds; `submit` reuses it for the replacement.
#[derive(Debug, Clone)]
pub struct FormSession {
    record: ValidatedRecord,
}

impl FormSession {
    /// Start a session with an empty record.
    pub fn new(schema: impl Into<Arc<Schema>>) -> Self {
        Self {
            record: ValidatedRecord::new(schema),
        }
    }

    /// Start a session from a schema descriptor file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, FormvalError> {
        let schema = Schema::from_path(path)?;
        Ok(Self::new(schema))
    }

    /// Replace the current record with one built from `values`.
    pub fn submit<I, K, V>(&mut self, values: I) -> &ValidatedRecord
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<FieldValue>,
    {
        self.record = ValidatedRecord::with_values(Arc::clone(self.record.schema()), values);
        tracing::debug!(
            valid = self.record.is_valid(),
            errors = self.record.errors().len(),
            "form submitted"
        );
        &self.record
    }

    /// Forward one field change to the current record.
    pub fn input(&mut self, field: &str, value: impl Into<FieldValue>) -> Result<(), RecordError> {
        self.record.write(field, value)
    }

    /// The record currently being edited.
    pub fn record(&self) -> &ValidatedRecord {
        &self.record
    }

    /// The session's schema.
    pub fn schema(&self) -> &Arc<Schema> {
        self.record.schema()
    }

    /// Every declared field with its current status, sorted by name.
    ///
    /// Renderers show the message of `Invalid` fields and clear whatever
    /// they displayed for `Valid` ones.
    pub fn statuses(&self) -> impl Iterator<Item = (&str, FieldStatus<'_>)> {
        self.record
            .schema()
            .field_names()
            .map(move |field| (field, self.record.status(field)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use formval_rules::{v, NUMBER_MESSAGE, REQUIRED_MESSAGE};

    fn session() -> FormSession {
        FormSession::new(
            Schema::builder()
                .field("name", v::string().required())
                .field("age", v::number().required())
                .build(),
        )
    }

    #[test]
    fn test_new_session_starts_with_empty_record() {
        let session = session();
        assert_eq!(session.record().errors().len(), 2);
        assert!(session.record().data().is_empty());
    }

    #[test]
    fn test_submit_replaces_record() {
        let mut session = session();
        session.input("name", "Ann").unwrap();
        assert_eq!(session.record().error("name"), None);

        let record = session.submit([("age", "30")]);
        assert_eq!(record.error("name"), Some(REQUIRED_MESSAGE));
        assert_eq!(record.value("age"), Some(&FieldValue::from("30")));
    }

    #[test]
    fn test_input_forwards_to_current_record() {
        let mut session = session();
        session.submit([("name", "Ann"), ("age", "30")]);
        session.input("age", "thirty").unwrap();
        assert_eq!(session.record().error("age"), Some(NUMBER_MESSAGE));

        let err = session.input("email", "x").unwrap_err();
        assert!(matches!(err, RecordError::UnknownField { .. }));
    }

    #[test]
    fn test_statuses_cover_every_field() {
        let mut session = session();
        session.submit([("name", "Ann")]);
        let statuses: Vec<_> = session.statuses().collect();
        assert_eq!(
            statuses,
            vec![
                ("age", FieldStatus::Invalid(REQUIRED_MESSAGE)),
                ("name", FieldStatus::Valid(&FieldValue::from("Ann"))),
            ]
        );
    }

    #[test]
    fn test_submit_keeps_the_same_schema() {
        let mut session = session();
        let before = Arc::clone(session.schema());
        session.submit([("name", "Ann")]);
        assert!(Arc::ptr_eq(&before, session.schema()));
        assert!(Arc::ptr_eq(session.schema(), session.record().schema()));
    }

    #[test]
    fn test_from_missing_path() {
        let err = FormSession::from_path("/nonexistent/form.schema.yaml").unwrap_err();
        assert!(matches!(err, FormvalError::SchemaLoad(_)));
    }
}
