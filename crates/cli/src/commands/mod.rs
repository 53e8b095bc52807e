//! CLI command implementations.

pub mod auth;
pub mod draft;
pub mod passes;
pub mod steps;

use serde::Serialize;

/// Pretty-print a value to stdout so output can be piped to other tools.
///
/// # Errors
///
/// Returns an error if the value cannot be serialized.
#[allow(clippy::print_stdout)]
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), serde_json::Error> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
