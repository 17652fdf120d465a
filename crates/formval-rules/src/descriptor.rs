//! # Schema Descriptors
//!
//! Loads schemas from declarative YAML or JSON documents, so a front end can
//! ship its field rules as configuration instead of code.
//!
//! ## Format
//!
//! ```yaml
//! fields:
//!   name: [string, required]
//!   age: [required, number]
//! ```
//!
//! Each field lists rule names. `required` is evaluated first wherever it
//! appears in the list. Unknown rule names and unknown top-level keys are
//! rejected at load time, never at validation time.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use formval_core::FormvalError;

use crate::chain::{RuleChain, RuleKind};
use crate::schema::Schema;

/// Error loading a schema descriptor.
#[derive(Error, Debug)]
pub enum SchemaLoadError {
    /// The descriptor file could not be read.
    #[error("cannot read schema descriptor '{path}': {source}")]
    Read {
        /// Path to the descriptor.
        path: String,
        /// Underlying IO failure.
        source: std::io::Error,
    },

    /// The descriptor is not valid YAML/JSON or does not match the format.
    #[error("invalid schema descriptor '{origin}': {reason}")]
    Parse {
        /// Path of the descriptor, or `<inline>` for in-memory text.
        origin: String,
        /// Parser message, including unknown rule names.
        reason: String,
    },
}

impl From<SchemaLoadError> for FormvalError {
    fn from(err: SchemaLoadError) -> Self {
        FormvalError::SchemaLoad(err.to_string())
    }
}

/// A rule name accepted in descriptors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleName {
    /// Presence check, evaluated first.
    Required,
    /// String type check.
    String,
    /// Loose numeric check.
    Number,
}

/// The serialized form of a schema.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SchemaDescriptor {
    /// Field name to rule names.
    pub fields: BTreeMap<String, Vec<RuleName>>,
}

impl SchemaDescriptor {
    /// Build the schema this descriptor declares.
    pub fn to_schema(&self) -> Schema {
        self.fields
            .iter()
            .map(|(name, rules)| {
                let chain = rules
                    .iter()
                    .fold(RuleChain::new(), |chain, rule| match rule {
                        RuleName::Required => chain.required(),
                        RuleName::String => chain.string(),
                        RuleName::Number => chain.number(),
                    });
                (name.clone(), chain)
            })
            .collect()
    }

    /// Describe an existing schema. Custom rules have no descriptor form
    /// and are left out.
    pub fn from_schema(schema: &Schema) -> Self {
        let fields = schema
            .fields()
            .map(|(name, chain)| {
                let rules = chain
                    .kinds()
                    .into_iter()
                    .filter_map(|kind| match kind {
                        RuleKind::Required => Some(RuleName::Required),
                        RuleKind::String => Some(RuleName::String),
                        RuleKind::Number => Some(RuleName::Number),
                        RuleKind::Custom => None,
                    })
                    .collect();
                (name.to_owned(), rules)
            })
            .collect();
        Self { fields }
    }
}

impl Schema {
    /// Parse a YAML schema descriptor.
    pub fn from_yaml_str(text: &str) -> Result<Self, SchemaLoadError> {
        parse_yaml(text, "<inline>").map(|d| d.to_schema())
    }

    /// Parse a JSON schema descriptor.
    pub fn from_json_str(text: &str) -> Result<Self, SchemaLoadError> {
        parse_json(text, "<inline>").map(|d| d.to_schema())
    }

    /// Load a schema descriptor from a file.
    ///
    /// The format is chosen from the extension: `.yaml`/`.yml` for YAML,
    /// anything else for JSON.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, SchemaLoadError> {
        let path = path.as_ref();
        let origin = path.display().to_string();
        let content = std::fs::read_to_string(path).map_err(|source| SchemaLoadError::Read {
            path: origin.clone(),
            source,
        })?;

        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");

        let descriptor = match ext {
            "yaml" | "yml" => parse_yaml(&content, &origin)?,
            _ => parse_json(&content, &origin)?,
        };

        tracing::debug!(
            path = %origin,
            fields = descriptor.fields.len(),
            "loaded schema descriptor"
        );
        Ok(descriptor.to_schema())
    }
}

fn parse_yaml(text: &str, origin: &str) -> Result<SchemaDescriptor, SchemaLoadError> {
    serde_yaml::from_str(text).map_err(|e| SchemaLoadError::Parse {
        origin: origin.to_string(),
        reason: format!("invalid YAML: {e}"),
    })
}

fn parse_json(text: &str, origin: &str) -> Result<SchemaDescriptor, SchemaLoadError> {
    serde_json::from_str(text).map_err(|e| SchemaLoadError::Parse {
        origin: origin.to_string(),
        reason: format!("invalid JSON: {e}"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chain::{NUMBER_MESSAGE, REQUIRED_MESSAGE};
    use crate::v;

    const USER_YAML: &str = r#"
fields:
  name: [string, required]
  age: [required, number]
"#;

    #[test]
    fn test_yaml_descriptor() {
        let schema = Schema::from_yaml_str(USER_YAML).unwrap();
        assert_eq!(schema.len(), 2);
        let name = schema.get("name").unwrap();
        assert_eq!(name.kinds(), vec![RuleKind::Required, RuleKind::String]);
        assert_eq!(name.validate(&"".into()), Err(REQUIRED_MESSAGE));
        let age = schema.get("age").unwrap();
        assert_eq!(age.validate(&"x".into()), Err(NUMBER_MESSAGE));
    }

    #[test]
    fn test_json_descriptor() {
        let schema =
            Schema::from_json_str(r#"{"fields": {"age": ["number"], "nick": []}}"#).unwrap();
        assert_eq!(schema.len(), 2);
        assert!(schema.get("nick").is_some_and(RuleChain::is_empty));
        assert!(!schema.get("age").is_some_and(RuleChain::is_required));
    }

    #[test]
    fn test_unknown_rule_rejected() {
        let err = Schema::from_yaml_str("fields:\n  email: [string, email]\n").unwrap_err();
        match &err {
            SchemaLoadError::Parse { origin, reason } => {
                assert_eq!(origin, "<inline>");
                assert!(reason.contains("email"), "reason: {reason}");
            }
            other => panic!("Expected Parse, got: {other}"),
        }
    }

    #[test]
    fn test_unknown_top_level_key_rejected() {
        let err = Schema::from_json_str(r#"{"fields": {}, "version": 2}"#).unwrap_err();
        assert!(matches!(err, SchemaLoadError::Parse { .. }));
    }

    #[test]
    fn test_missing_file() {
        let err = Schema::from_path("/nonexistent/formval/user.schema.yaml").unwrap_err();
        assert!(matches!(err, SchemaLoadError::Read { .. }));
        assert!(err.to_string().contains("user.schema.yaml"));
    }

    #[test]
    fn test_from_schema_describes_chain_order() {
        let schema = Schema::builder()
            .field("name", v::string().required().custom("short", |_| true))
            .build();
        let descriptor = SchemaDescriptor::from_schema(&schema);
        assert_eq!(
            descriptor.fields["name"],
            vec![RuleName::Required, RuleName::String]
        );
    }

    #[test]
    fn test_load_error_converts_to_formval_error() {
        let err: FormvalError = Schema::from_json_str("not json").unwrap_err().into();
        assert!(matches!(err, FormvalError::SchemaLoad(_)));
    }
}
