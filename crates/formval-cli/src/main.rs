//! # formval CLI Entry Point
//!
//! Assembles subcommands and dispatches to handler modules.

use clap::Parser;
use formval_rules::SchemaDescriptor;
use tracing_subscriber::EnvFilter;

/// formval: schema-driven validation of form records.
///
/// Loads a schema descriptor, feeds field values through a validated
/// record, and prints the resulting data/errors snapshots.
#[derive(Parser, Debug)]
#[command(name = "formval", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Build a record, replay field writes, print snapshots.
    Check(formval_cli::check::CheckArgs),
    /// Print schema fields and their rule order.
    Describe(formval_cli::describe::DescribeArgs),
}

fn main() -> anyhow::Result<()> {
    // Warnings are visible unless RUST_LOG says otherwise.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Check(args) => {
            let report = formval_cli::check::run(&args)?;
            if args.trace {
                for line in report.trace_lines() {
                    println!("{line}");
                }
            }
            println!("{}", serde_json::to_string_pretty(&report.to_json())?);

            if args.strict && !report.all_writes_accepted() {
                anyhow::bail!(
                    "write(s) to undeclared field(s): {}",
                    report.rejected.join(", ")
                );
            }
            if args.strict && !report.is_valid() {
                anyhow::bail!(
                    "{} field(s) failed validation: {}",
                    report.snapshot.errors.len(),
                    report
                        .snapshot
                        .errors
                        .keys()
                        .cloned()
                        .collect::<Vec<_>>()
                        .join(", ")
                );
            }
        }
        Commands::Describe(args) => {
            let (schema, fields) = formval_cli::describe::run(&args)?;
            if args.json {
                let descriptor = SchemaDescriptor::from_schema(&schema);
                println!("{}", serde_json::to_string_pretty(&descriptor)?);
            } else {
                for field in fields {
                    println!("{field}");
                }
            }
        }
    }

    Ok(())
}
