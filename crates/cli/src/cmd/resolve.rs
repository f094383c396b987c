//! Implementation of the `smith resolve` command.

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use serde::Serialize;

use blacksmith_lib::config::{load_component, load_registry};
use blacksmith_lib::recipe::TracingLogger;
use blacksmith_lib::{ComponentResolver, Requirements};

use crate::output::print_json;

#[derive(Debug, Serialize)]
struct Resolved<'a> {
  recipe: &'a str,
  id: &'a str,
  version: &'a str,
}

pub fn cmd_resolve(component: &Path, recipes: &Path, id: Option<String>, version: Option<String>) -> Result<()> {
  let data = load_component(component)?;
  let registry = load_registry(recipes)?;
  let resolver = ComponentResolver::with_logger(registry, Arc::new(TracingLogger));

  let requirements = Requirements { id, version };
  let resolved = resolver
    .get_component(&data, Some(&requirements))
    .with_context(|| format!("Failed to resolve {} {}", data.id, data.version))?;

  print_json(&Resolved {
    recipe: resolved.recipe(),
    id: resolved.id(),
    version: resolved.version(),
  })
}
