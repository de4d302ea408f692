//! Subcommand implementations.

use anyhow::Result;
use serde_json::Value;

pub mod form_details;
pub mod init;
pub mod list_forms;
pub mod stateless;

/// Print a response in the requested `--format`.
///
/// Unknown format values fall back to pretty-printed JSON.
fn print_response(data: &Value, format: &str, render: fn(&Value) -> String) -> Result<()> {
    match format {
        "text" => print!("{}", render(data)),
        _ => println!("{}", serde_json::to_string_pretty(data)?),
    }
    Ok(())
}
