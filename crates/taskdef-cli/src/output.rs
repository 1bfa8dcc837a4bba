//! Result output for CLI commands.
//!
//! Stdout carries only the command result, newline-terminated.

use std::io::Write;

/// Writes `text` and a trailing newline to `writer`.
///
/// # Errors
///
/// Returns an error if the writer fails.
pub fn write_result(mut writer: impl Write, text: &str) -> std::io::Result<()> {
    writeln!(writer, "{text}")?;
    writer.flush()
}

/// Writes `text` to stdout.
///
/// # Errors
///
/// Returns an error if stdout cannot be written.
pub fn emit(text: &str) -> anyhow::Result<()> {
    write_result(std::io::stdout().lock(), text)?;
    Ok(())
}
