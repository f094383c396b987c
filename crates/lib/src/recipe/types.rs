use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::version::{VersionError, VersionRange};

/// Errors that can occur while resolving a component.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ResolveError {
  /// The component's version does not satisfy the requirement.
  #[error("component version {version} does not satisfy {requirement}")]
  VersionMismatch { version: String, requirement: String },

  /// No recipe variant covers the requirement.
  #[error("no recipe found in '{recipe_path}' for {requirement}")]
  RecipeNotFound { recipe_path: String, requirement: String },

  /// More than one recipe variant covers the requirement.
  #[error("ambiguous recipe in '{recipe_path}' for {requirement}: {}", candidates.join(", "))]
  AmbiguousRecipe {
    recipe_path: String,
    requirement: String,
    candidates: Vec<String>,
  },

  /// A version or range could not be parsed.
  #[error(transparent)]
  Version(#[from] VersionError),
}

/// Where a component's source tarball comes from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub tarball: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub sha256: Option<String>,
}

/// Raw component description as provided by the orchestrator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentData {
  pub id: String,
  pub version: String,
  #[serde(default)]
  pub source: Source,
  #[serde(default)]
  pub metadata: Value,
  #[serde(default)]
  pub patches: Vec<String>,
  #[serde(default)]
  pub extra_files: Vec<String>,
  /// Key of the recipe collection to search. Defaults to the component id.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub recipe_logic_path: Option<String>,
}

impl ComponentData {
  pub fn new(id: impl Into<String>, version: impl Into<String>) -> Self {
    Self {
      id: id.into(),
      version: version.into(),
      source: Source::default(),
      metadata: Value::Null,
      patches: Vec::new(),
      extra_files: Vec::new(),
      recipe_logic_path: None,
    }
  }

  pub fn with_recipe_logic_path(mut self, path: impl Into<String>) -> Self {
    self.recipe_logic_path = Some(path.into());
    self
  }

  pub fn recipe_logic_path(&self) -> &str {
    self.recipe_logic_path.as_deref().unwrap_or(&self.id)
  }
}

/// Caller-supplied requirements; unset fields default from the component.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Requirements {
  #[serde(default)]
  pub id: Option<String>,
  #[serde(default)]
  pub version: Option<String>,
}

impl Requirements {
  pub fn version(range: impl Into<String>) -> Self {
    Self {
      id: None,
      version: Some(range.into()),
    }
  }
}

/// Fully resolved requirement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Requirement {
  pub id: String,
  pub version: VersionRange,
}

impl fmt::Display for Requirement {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}@{}", self.id, self.version)
  }
}

/// Everything a recipe variant is constructed from.
#[derive(Debug, Clone, PartialEq)]
pub struct ComponentInit {
  pub id: String,
  pub version: String,
  pub source: Source,
  pub metadata: Value,
  pub patches: Vec<String>,
  pub extra_files: Vec<String>,
}

impl From<&ComponentData> for ComponentInit {
  fn from(data: &ComponentData) -> Self {
    Self {
      id: data.id.clone(),
      version: data.version.clone(),
      source: data.source.clone(),
      metadata: data.metadata.clone(),
      patches: data.patches.clone(),
      extra_files: data.extra_files.clone(),
    }
  }
}

/// An instantiated, version-bound build unit.
///
/// Concrete recipes implement this; validating sources, patches and extra
/// files is their job.
pub trait Component: fmt::Debug + Send + Sync {
  /// Name of the recipe variant that produced this component.
  fn recipe(&self) -> &str;
  fn id(&self) -> &str;
  fn version(&self) -> &str;
  fn source(&self) -> &Source;
  fn metadata(&self) -> &Value;
  fn patches(&self) -> &[String];
  fn extra_files(&self) -> &[String];
}

/// Component backed only by its descriptor data.
///
/// Used for recipe collections declared in configuration, where a variant
/// carries a name but no custom logic.
#[derive(Debug, Clone, PartialEq)]
pub struct BasicComponent {
  recipe: String,
  init: ComponentInit,
}

impl BasicComponent {
  pub fn new(recipe: impl Into<String>, init: ComponentInit) -> Self {
    Self {
      recipe: recipe.into(),
      init,
    }
  }
}

impl Component for BasicComponent {
  fn recipe(&self) -> &str {
    &self.recipe
  }

  fn id(&self) -> &str {
    &self.init.id
  }

  fn version(&self) -> &str {
    &self.init.version
  }

  fn source(&self) -> &Source {
    &self.init.source
  }

  fn metadata(&self) -> &Value {
    &self.init.metadata
  }

  fn patches(&self) -> &[String] {
    &self.init.patches
  }

  fn extra_files(&self) -> &[String] {
    &self.init.extra_files
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn component_data_deserializes_camel_case() {
    let data: ComponentData = serde_json::from_str(
      r#"{
        "id": "zlib",
        "version": "1.2.11",
        "source": {"tarball": "zlib-1.2.11.tar.gz", "sha256": "abc123"},
        "metadata": {"licenses": ["Zlib"]},
        "patches": ["fix-build.patch"],
        "extraFiles": ["zlib.pc"],
        "recipeLogicPath": "libraries/zlib"
      }"#,
    )
    .unwrap();

    assert_eq!(data.id, "zlib");
    assert_eq!(data.source.sha256.as_deref(), Some("abc123"));
    assert_eq!(data.extra_files, vec!["zlib.pc".to_string()]);
    assert_eq!(data.recipe_logic_path(), "libraries/zlib");
    assert_eq!(data.metadata["licenses"][0], "Zlib");
  }

  #[test]
  fn recipe_logic_path_defaults_to_id() {
    let data: ComponentData = serde_json::from_str(r#"{"id": "zlib", "version": "1.2.11"}"#).unwrap();
    assert_eq!(data.recipe_logic_path(), "zlib");
    assert!(data.patches.is_empty());
    assert_eq!(data.metadata, Value::Null);
  }

  #[test]
  fn errors_carry_context() {
    let err = ResolveError::VersionMismatch {
      version: "2.0.0".to_string(),
      requirement: "~1.2".to_string(),
    };
    assert_eq!(err.to_string(), "component version 2.0.0 does not satisfy ~1.2");

    let err = ResolveError::AmbiguousRecipe {
      recipe_path: "zlib".to_string(),
      requirement: "zlib@=1.2.11".to_string(),
      candidates: vec!["a".to_string(), "b".to_string()],
    };
    assert!(err.to_string().ends_with("a, b"));
  }
}
