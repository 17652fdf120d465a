//! # Rule Chains
//!
//! A rule chain is the ordered list of checks that decides whether a single
//! field value is acceptable.
//!
//! ## Evaluation Order
//!
//! ```text
//! [required]? ──▶ rule 1 ──▶ rule 2 ──▶ ... ──▶ Ok(())
//!      │             │          │
//!      ▼             ▼          ▼
//!   Err(msg)      Err(msg)   Err(msg)      (first failure wins)
//! ```
//!
//! `required` occupies a reserved slot ahead of every other rule. Asking for
//! it after a type rule still evaluates it first, so a missing value reports
//! "required field" and never an additional type error. Requesting it twice
//! is the same as requesting it once.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use formval_core::FieldValue;

/// Failure message of the `required` rule.
pub const REQUIRED_MESSAGE: &str = "required field";
/// Failure message of the `string` rule.
pub const STRING_MESSAGE: &str = "must be a string";
/// Failure message of the `number` rule.
pub const NUMBER_MESSAGE: &str = "must be a number";

/// Caller-supplied single-value check used by [`Rule::Custom`].
pub type Predicate = Arc<dyn Fn(&FieldValue) -> bool + Send + Sync>;

static REQUIRED_RULE: Rule = Rule::Required;

/// The kind of a rule, without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleKind {
    /// Presence check.
    Required,
    /// String type check.
    String,
    /// Loose numeric check.
    Number,
    /// Caller-supplied predicate.
    Custom,
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Required => "required",
            Self::String => "string",
            Self::Number => "number",
            Self::Custom => "custom",
        };
        f.write_str(name)
    }
}

/// A single validation rule.
#[derive(Clone)]
pub enum Rule {
    /// Passes unless the value is undefined, null, or the empty string.
    Required,
    /// Passes iff the value is a string.
    String,
    /// Passes iff the value coerces to a number other than NaN.
    /// Numeric strings pass.
    Number,
    /// Passes iff `predicate` returns true.
    Custom {
        /// Message reported when the predicate rejects a value.
        message: String,
        /// The check itself.
        predicate: Predicate,
    },
}

impl Rule {
    /// The kind of this rule.
    pub fn kind(&self) -> RuleKind {
        match self {
            Self::Required => RuleKind::Required,
            Self::String => RuleKind::String,
            Self::Number => RuleKind::Number,
            Self::Custom { .. } => RuleKind::Custom,
        }
    }

    /// The message this rule reports on failure.
    pub fn message(&self) -> &str {
        match self {
            Self::Required => REQUIRED_MESSAGE,
            Self::String => STRING_MESSAGE,
            Self::Number => NUMBER_MESSAGE,
            Self::Custom { message, .. } => message,
        }
    }

    /// Check one value against this rule.
    pub fn check(&self, value: &FieldValue) -> Result<(), &str> {
        let passed = match self {
            Self::Required => !value.is_missing(),
            Self::String => value.is_string(),
            Self::Number => !value.to_number().is_nan(),
            Self::Custom { predicate, .. } => predicate(value),
        };
        if passed {
            Ok(())
        } else {
            Err(self.message())
        }
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Custom { message, .. } => f
                .debug_struct("Custom")
                .field("message", message)
                .finish_non_exhaustive(),
            other => write!(f, "{:?}", other.kind()),
        }
    }
}

/// An ordered chain of rules for one field.
#[derive(Debug, Clone, Default)]
pub struct RuleChain {
    required: bool,
    rules: Vec<Rule>,
}

impl RuleChain {
    /// An empty chain. Accepts every value until rules are added.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append the string type rule.
    pub fn string(mut self) -> Self {
        self.rules.push(Rule::String);
        self
    }

    /// Append the loose numeric rule.
    pub fn number(mut self) -> Self {
        self.rules.push(Rule::Number);
        self
    }

    /// Require presence. Evaluated before every other rule regardless of
    /// where in the chain it is requested.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Append a caller-supplied check that reports `message` on failure.
    pub fn custom<F>(mut self, message: impl Into<String>, predicate: F) -> Self
    where
        F: Fn(&FieldValue) -> bool + Send + Sync + 'static,
    {
        self.rules.push(Rule::Custom {
            message: message.into(),
            predicate: Arc::new(predicate),
        });
        self
    }

    /// Whether the chain requires presence.
    pub fn is_required(&self) -> bool {
        self.required
    }

    /// The rules in evaluation order, `required` first when present.
    pub fn rules(&self) -> impl Iterator<Item = &Rule> {
        let required = self.required.then_some(&REQUIRED_RULE);
        required.into_iter().chain(self.rules.iter())
    }

    /// The rule kinds in evaluation order.
    pub fn kinds(&self) -> Vec<RuleKind> {
        self.rules().map(Rule::kind).collect()
    }

    /// Number of rules in the chain, counting `required` once.
    pub fn len(&self) -> usize {
        self.rules.len() + usize::from(self.required)
    }

    /// Whether the chain has no rules.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Validate a value. Returns the message of the first failing rule,
    /// or `Ok(())` when every rule passes.
    pub fn validate(&self, value: &FieldValue) -> Result<(), &str> {
        self.rules().try_for_each(|rule| rule.check(value))
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::v;
    use proptest::prelude::*;

    proptest! {
        /// Any integer text passes the numeric rule.
        #[test]
        fn integer_text_is_a_number(n in any::<i64>()) {
            let chain = v::number();
            prop_assert_eq!(chain.validate(&n.to_string().into()), Ok(()));
        }

        /// A non-empty string never fails `string().required()`.
        #[test]
        fn non_empty_strings_pass(s in ".+") {
            let chain = v::string().required();
            prop_assert_eq!(chain.validate(&s.into()), Ok(()));
        }
    }
}
