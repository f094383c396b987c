//! Loading build options, recipe registries and component descriptors from disk.
//!
//! # File formats
//!
//! Build options (TOML), mirroring [`BuildEnvironmentOptions`]:
//!
//! ```toml
//! platform = { os = "linux", arch = "x86_64" }
//! output_dir = "/var/lib/blacksmith/output"
//! max_parallel_jobs = 4
//!
//! [env_policy]
//! GOFLAGS = "flag_list"
//! ```
//!
//! Recipe registry (TOML), one array of variants per recipe collection:
//!
//! ```toml
//! [[recipes.zlib]]
//! name = "zlib-legacy"
//! range = "<1.2.5"
//!
//! [[recipes.zlib]]
//! name = "zlib-modern"
//! range = ">=1.2.5 <2"
//! ```
//!
//! Component descriptors are JSON objects deserialized into [`ComponentData`].

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::environment::BuildEnvironmentOptions;
use crate::recipe::{ComponentData, RecipeRegistry, RecipeVariant};
use crate::version::VersionError;

#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("failed to read {}: {source}", path.display())]
  Io {
    path: PathBuf,
    #[source]
    source: io::Error,
  },

  #[error("failed to parse {}: {source}", path.display())]
  Toml {
    path: PathBuf,
    #[source]
    source: toml::de::Error,
  },

  #[error("failed to parse {}: {source}", path.display())]
  Json {
    path: PathBuf,
    #[source]
    source: serde_json::Error,
  },

  #[error("invalid range for recipe '{recipe_path}' in {}: {source}", path.display())]
  InvalidRange {
    path: PathBuf,
    recipe_path: String,
    #[source]
    source: VersionError,
  },
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RegistryFile {
  #[serde(default)]
  recipes: BTreeMap<String, Vec<VariantEntry>>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct VariantEntry {
  name: String,
  range: String,
}

fn read(path: &Path) -> Result<String, ConfigError> {
  debug!(path = %path.display(), "reading configuration");
  fs::read_to_string(path).map_err(|source| ConfigError::Io {
    path: path.to_path_buf(),
    source,
  })
}

fn parse_toml<T: for<'de> Deserialize<'de>>(path: &Path, content: &str) -> Result<T, ConfigError> {
  toml::from_str(content).map_err(|source| ConfigError::Toml {
    path: path.to_path_buf(),
    source,
  })
}

/// Load [`BuildEnvironmentOptions`] from a TOML file.
pub fn load_build_options(path: &Path) -> Result<BuildEnvironmentOptions, ConfigError> {
  let content = read(path)?;
  parse_toml(path, &content)
}

/// Load a [`ComponentData`] descriptor from a JSON file.
pub fn load_component(path: &Path) -> Result<ComponentData, ConfigError> {
  let content = read(path)?;
  serde_json::from_str(&content).map_err(|source| ConfigError::Json {
    path: path.to_path_buf(),
    source,
  })
}

/// Load a recipe registry from a TOML file.
///
/// Every entry becomes a [`RecipeVariant::basic`] variant, registered in file
/// order within its collection.
pub fn load_registry(path: &Path) -> Result<RecipeRegistry, ConfigError> {
  let content = read(path)?;
  let file: RegistryFile = parse_toml(path, &content)?;

  let mut registry = RecipeRegistry::new();
  for (recipe_path, entries) in file.recipes {
    for entry in entries {
      let variant = RecipeVariant::basic(&entry.name, &entry.range).map_err(|source| ConfigError::InvalidRange {
        path: path.to_path_buf(),
        recipe_path: recipe_path.clone(),
        source,
      })?;
      registry.register(recipe_path.as_str(), variant);
    }
    debug!(recipe_path = %recipe_path, variants = registry.variants(&recipe_path).len(), "loaded recipe collection");
  }
  Ok(registry)
}
