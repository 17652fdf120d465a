//! # Schemas
//!
//! A schema maps each field name to the rule chain that guards it. It is
//! the only configuration a validated record needs.
//!
//! Schemas are immutable once built. Records hold them behind an `Arc`, so
//! one schema serves every record created from it.

use std::collections::BTreeMap;

use formval_core::FieldValue;

use crate::chain::RuleChain;

/// An immutable map from field name to rule chain.
///
/// Field names iterate in sorted order.
#[derive(Debug, Clone, Default)]
pub struct Schema {
    fields: BTreeMap<String, RuleChain>,
}

impl Schema {
    /// Start building a schema.
    pub fn builder() -> SchemaBuilder {
        SchemaBuilder::default()
    }

    /// The chain declared for `name`.
    pub fn get(&self, name: &str) -> Option<&RuleChain> {
        self.fields.get(name)
    }

    /// Whether `name` is declared.
    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// Declared field names, sorted.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Declared fields with their chains, sorted by name.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &RuleChain)> {
        self.fields.iter().map(|(name, chain)| (name.as_str(), chain))
    }

    /// Number of declared fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether no fields are declared.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Validate `value` against the chain for `name`.
    ///
    /// Returns `None` when the schema does not declare `name`.
    pub fn validate_field(&self, name: &str, value: &FieldValue) -> Option<Result<(), &str>> {
        self.get(name).map(|chain| chain.validate(value))
    }
}

impl<K: Into<String>> FromIterator<(K, RuleChain)> for Schema {
    fn from_iter<I: IntoIterator<Item = (K, RuleChain)>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Schema::builder(), |builder, (name, chain)| {
                builder.field(name, chain)
            })
            .build()
    }
}

/// Builder for [`Schema`].
#[derive(Debug, Default)]
pub struct SchemaBuilder {
    fields: BTreeMap<String, RuleChain>,
}

impl SchemaBuilder {
    /// Declare a field. Declaring the same name again replaces its chain.
    pub fn field(mut self, name: impl Into<String>, chain: RuleChain) -> Self {
        self.fields.insert(name.into(), chain);
        self
    }

    /// Freeze the declared fields into a schema.
    pub fn build(self) -> Schema {
        Schema {
            fields: self.fields,
        }
    }
}
