//! # Check Subcommand
//!
//! Builds a record from a schema descriptor and initial values, replays
//! field writes in order, and reports the resulting snapshots.
//!
//! ```text
//! formval check --schema schemas/user.schema.yaml \
//!     --set name= --set age=30 --write age=thirty --write name=Ann --trace
//! ```

use std::path::PathBuf;

use anyhow::Context;
use clap::Args;

use formval_record::{FormSession, RecordSnapshot};

/// Arguments for the check subcommand.
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Schema descriptor (YAML or JSON).
    #[arg(long)]
    pub schema: PathBuf,

    /// Initial value for a field. Repeatable.
    #[arg(long = "set", value_name = "FIELD=VALUE", value_parser = crate::parse_assignment)]
    pub initial: Vec<(String, String)>,

    /// Field write applied after construction, in order. Repeatable.
    #[arg(long = "write", value_name = "FIELD=VALUE", value_parser = crate::parse_assignment)]
    pub writes: Vec<(String, String)>,

    /// Print a snapshot after every write, not only the final one.
    #[arg(long)]
    pub trace: bool,

    /// Exit with an error when a write targets an undeclared field or the
    /// final record has field errors.
    #[arg(long)]
    pub strict: bool,
}

/// One replayed write and the record state right after it.
#[derive(Debug, Clone)]
pub struct WriteStep {
    /// Field written.
    pub field: String,
    /// Raw value written.
    pub value: String,
    /// Snapshot after the write.
    pub snapshot: RecordSnapshot,
}

/// Outcome of a check run.
#[derive(Debug, Clone)]
pub struct CheckReport {
    /// Snapshot right after construction.
    pub initial: RecordSnapshot,
    /// Per-write snapshots, only collected with `--trace`.
    pub steps: Vec<WriteStep>,
    /// Snapshot after the last write.
    pub snapshot: RecordSnapshot,
    /// Fields whose writes were rejected because the schema does not
    /// declare them.
    pub rejected: Vec<String>,
}

impl CheckReport {
    /// Whether the final record has no field errors.
    pub fn is_valid(&self) -> bool {
        self.snapshot.errors.is_empty()
    }

    /// Whether every write targeted a declared field.
    pub fn all_writes_accepted(&self) -> bool {
        self.rejected.is_empty()
    }

    /// The final output: both buckets plus the fields whose writes the
    /// schema rejected.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "data": self.snapshot.data,
            "errors": self.snapshot.errors,
            "rejected": self.rejected,
        })
    }

    /// One line per `--trace` step, starting with the state after
    /// construction.
    pub fn trace_lines(&self) -> Vec<serde_json::Value> {
        let initial = serde_json::json!({ "write": null, "snapshot": self.initial });
        std::iter::once(initial)
            .chain(self.steps.iter().map(|step| {
                serde_json::json!({
                    "write": { "field": step.field, "value": step.value },
                    "snapshot": step.snapshot,
                })
            }))
            .collect()
    }
}

/// Run the check subcommand.
pub fn run(args: &CheckArgs) -> anyhow::Result<CheckReport> {
    let mut session = FormSession::from_path(&args.schema)
        .with_context(|| format!("failed to load schema {}", args.schema.display()))?;

    let record = session.submit(
        args.initial
            .iter()
            .map(|(field, value)| (field.as_str(), value.as_str())),
    );
    let initial = record.snapshot();

    let mut steps = Vec::new();
    let mut rejected = Vec::new();
    for (field, value) in &args.writes {
        if let Err(e) = session.input(field, value.as_str()) {
            tracing::warn!(field = %field, "write skipped: {e}");
            rejected.push(field.clone());
            continue;
        }
        if args.trace {
            steps.push(WriteStep {
                field: field.clone(),
                value: value.clone(),
                snapshot: session.record().snapshot(),
            });
        }
    }

    Ok(CheckReport {
        initial,
        steps,
        snapshot: session.record().snapshot(),
        rejected,
    })
}
