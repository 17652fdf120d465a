//! # formval-rules — Rule Chains & Schemas
//!
//! Declarative validation rules for single field values, and the schema
//! that maps field names to them.
//!
//! ## Rule Chains (`chain`)
//!
//! A [`RuleChain`] is an ordered list of single-value checks built with a
//! fluent chain. Validation runs the rules in order and stops at the first
//! failure. A `required` rule always runs first, no matter where in the
//! chain it was requested:
//!
//! ```
//! use formval_rules::v;
//!
//! let name = v::string().required();
//! assert_eq!(name.validate(&"".into()), Err("required field"));
//! assert_eq!(name.validate(&"Ann".into()), Ok(()));
//! ```
//!
//! ## Schemas (`schema`, `descriptor`)
//!
//! A [`Schema`] is an immutable map from field name to chain. It is built
//! once, either in code or from a YAML/JSON descriptor, and shared
//! read-only by every record validated against it.
//!
//! ## Crate Policy
//!
//! - Depends only on `formval-core` internally.
//! - Rule evaluation is pure: no I/O, no allocation on the failure path.
//! - Building a chain never fails; loading a descriptor is the only
//!   fallible operation in this crate.

pub mod chain;
pub mod descriptor;
pub mod schema;

pub use chain::{
    Predicate, Rule, RuleChain, RuleKind, NUMBER_MESSAGE, REQUIRED_MESSAGE, STRING_MESSAGE,
};
pub use descriptor::{RuleName, SchemaDescriptor, SchemaLoadError};
pub use schema::{Schema, SchemaBuilder};

/// Factory for rule chains primed with a starting rule.
///
/// ```
/// use formval_rules::v;
///
/// let age = v::number().required();
/// assert!(age.is_required());
/// ```
pub mod v {
    use crate::chain::RuleChain;

    /// A chain that starts with the string type rule.
    pub fn string() -> RuleChain {
        RuleChain::new().string()
    }

    /// A chain that starts with the numeric rule.
    pub fn number() -> RuleChain {
        RuleChain::new().number()
    }

    /// A chain that only requires presence.
    pub fn required() -> RuleChain {
        RuleChain::new().required()
    }
}
