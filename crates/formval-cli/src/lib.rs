//! # formval-cli — formval Command-Line Interface
//!
//! Drives a validated record from the terminal the way a form drives it
//! from a page: load a schema, submit initial values, then feed field
//! changes one at a time and read back the `data`/`errors` snapshot.
//!
//! ## Subcommands
//!
//! - `check`: build a record, replay writes, print snapshots
//! - `describe`: print each schema field and its rule evaluation order
//!
//! ## Crate Policy
//!
//! - Argument parsing is separated from the handlers.
//! - Handlers delegate to `formval-rules` and `formval-record` and return
//!   plain data; only `main` prints.

pub mod check;
pub mod describe;

/// Parse a `field=value` assignment. The value is kept verbatim as text,
/// including an empty value (`name=`).
pub fn parse_assignment(s: &str) -> Result<(String, String), String> {
    let (field, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected FIELD=VALUE, got '{s}'"))?;
    if field.is_empty() {
        return Err(format!("missing field name in '{s}'"));
    }
    Ok((field.to_string(), value.to_string()))
}
