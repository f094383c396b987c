//! Implementation of the `smith env` command.
//!
//! Builds a [`BuildEnvironment`] from a TOML options file, applies the
//! `--set` writes in order and prints the resulting variables. Options the
//! file leaves unset fall back to the host platform and the default output
//! directory.

use std::path::Path;

use anyhow::{Context, Result, bail};
use tracing::debug;

use blacksmith_lib::config::load_build_options;
use blacksmith_lib::env::EnvMap;
use blacksmith_lib::platform::paths::default_output_dir;
use blacksmith_lib::platform::{arch, os};
use blacksmith_lib::{BuildEnvironment, BuildEnvironmentOptions, EnvOperation, EnvValue, PlatformSpec};

use crate::output::{format_env_lines, print_json};

pub fn cmd_env(config: &Path, set: &[String], extra: &[String], json: bool) -> Result<()> {
  let options = load_build_options(config)?.or_defaults(host_defaults());
  let mut environment = BuildEnvironment::new(options)
    .with_context(|| format!("Failed to set up build environment from {}", config.display()))?;

  for arg in set {
    let (name, value, op) = parse_set(arg)?;
    debug!(variable = %name, operation = %op, "applying --set");
    environment
      .add_env_variable(&name, value, op)
      .with_context(|| format!("Failed to set {name}"))?;
  }

  let mut overlay = EnvMap::new();
  for arg in extra {
    let (name, value) = parse_assignment(arg)?;
    overlay.insert(name, EnvValue::Scalar(value));
  }

  let vars = environment
    .get_env_variables(&overlay)
    .context("Invalid --extra variable")?;
  if json {
    print_json(&vars)?;
  } else {
    print!("{}", format_env_lines(&vars));
  }

  Ok(())
}

fn host_defaults() -> BuildEnvironmentOptions {
  let mut defaults = BuildEnvironmentOptions::default();
  if let Some(os) = os::current() {
    let spec = match arch::current() {
      Some(arch) => PlatformSpec::new(os).with_arch(arch),
      None => PlatformSpec::new(os),
    };
    defaults = defaults.with_platform(spec);
  }
  if let Some(dir) = default_output_dir() {
    defaults = defaults.with_output_dir(dir);
  }
  defaults
}

/// Split `NAME=VALUE` at the first `=`.
fn parse_assignment(arg: &str) -> Result<(String, String)> {
  match arg.split_once('=') {
    Some((name, value)) if !name.is_empty() => Ok((name.to_string(), value.to_string())),
    _ => bail!("expected NAME=VALUE, got {arg:?}"),
  }
}

/// Parse `NAME=VALUE[@OP]`. A trailing `@word` that is not an operation stays part of the value.
fn parse_set(arg: &str) -> Result<(String, String, EnvOperation)> {
  let (name, value) = parse_assignment(arg)?;
  if let Some((head, suffix)) = value.rsplit_once('@')
    && let Ok(op) = suffix.parse::<EnvOperation>()
  {
    return Ok((name, head.to_string(), op));
  }
  Ok((name, value, EnvOperation::Auto))
}
