//! # Describe Subcommand
//!
//! Prints each field of a schema descriptor with its rules in evaluation
//! order, so `required` shows up first wherever the descriptor lists it.

use std::path::PathBuf;

use clap::Args;

use formval_rules::{RuleKind, Schema};

/// Arguments for the describe subcommand.
#[derive(Args, Debug)]
pub struct DescribeArgs {
    /// Schema descriptor (YAML or JSON).
    #[arg(long)]
    pub schema: PathBuf,

    /// Emit the normalized descriptor as JSON instead of text.
    #[arg(long)]
    pub json: bool,
}

/// One schema field and its rules in evaluation order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescription {
    /// Field name.
    pub name: String,
    /// Rule kinds in the order they run.
    pub rules: Vec<RuleKind>,
}

impl std::fmt::Display for FieldDescription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let rules: Vec<String> = self.rules.iter().map(ToString::to_string).collect();
        if rules.is_empty() {
            write!(f, "{}: (accepts any value)", self.name)
        } else {
            write!(f, "{}: {}", self.name, rules.join(" -> "))
        }
    }
}

/// Load the schema and describe its fields, sorted by name.
pub fn run(args: &DescribeArgs) -> anyhow::Result<(Schema, Vec<FieldDescription>)> {
    let schema = Schema::from_path(&args.schema)?;
    let fields = schema
        .fields()
        .map(|(name, chain)| FieldDescription {
            name: name.to_string(),
            rules: chain.kinds(),
        })
        .collect();
    Ok((schema, fields))
}
