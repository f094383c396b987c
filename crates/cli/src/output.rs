//! CLI output formatting utilities.
//!
//! Colored status messages on the terminal and JSON output for scripting.

use anyhow::Context;
use owo_colors::{OwoColorize, Stream};

pub mod symbols {
  pub const SUCCESS: &str = "✓";
  pub const INFO: &str = "•";
}

pub fn print_success(message: &str) {
  println!(
    "{} {}",
    symbols::SUCCESS.if_supports_color(Stream::Stdout, |s| s.green()),
    message
  );
}

pub fn print_error(message: &str) {
  eprintln!(
    "{} {}",
    "error:".if_supports_color(Stream::Stderr, |s| s.red()),
    message
  );
}

pub fn print_stat(label: &str, value: &str) {
  println!(
    "  {}: {}",
    label.if_supports_color(Stream::Stdout, |s| s.dimmed()),
    value
  );
}

pub fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
  let json = serde_json::to_string_pretty(value).context("Failed to serialize to JSON")?;
  println!("{}", json);
  Ok(())
}

/// Render variables as `NAME=VALUE` lines.
pub fn format_env_lines<'a>(vars: impl IntoIterator<Item = (&'a String, &'a String)>) -> String {
  vars.into_iter().map(|(name, value)| format!("{name}={value}\n")).collect()
}
