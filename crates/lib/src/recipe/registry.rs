//! Recipe variant registry and selection.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use semver::Version;

use super::logger::{Logger, NoopLogger};
use super::types::{BasicComponent, Component, ComponentInit, Requirement, ResolveError};
use crate::version::{VersionError, VersionRange};

/// Builds a component from its descriptor data.
pub type RecipeConstructor = Arc<dyn Fn(ComponentInit) -> Box<dyn Component> + Send + Sync>;

/// One recipe implementation and the versions it applies to.
#[derive(Clone)]
pub struct RecipeVariant {
  name: String,
  range: VersionRange,
  constructor: RecipeConstructor,
}

impl RecipeVariant {
  pub fn new<F>(name: impl Into<String>, range: &str, constructor: F) -> Result<Self, VersionError>
  where
    F: Fn(ComponentInit) -> Box<dyn Component> + Send + Sync + 'static,
  {
    Ok(Self {
      name: name.into(),
      range: VersionRange::parse(range)?,
      constructor: Arc::new(constructor),
    })
  }

  /// A variant that instantiates a [`BasicComponent`] tagged with `name`.
  pub fn basic(name: impl Into<String>, range: &str) -> Result<Self, VersionError> {
    let name = name.into();
    let recipe = name.clone();
    Self::new(name, range, move |init| -> Box<dyn Component> {
      Box::new(BasicComponent::new(recipe.clone(), init))
    })
  }

  pub fn name(&self) -> &str {
    &self.name
  }

  pub fn range(&self) -> &VersionRange {
    &self.range
  }

  pub fn instantiate(&self, init: ComponentInit) -> Box<dyn Component> {
    (self.constructor)(init)
  }
}

impl fmt::Debug for RecipeVariant {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("RecipeVariant")
      .field("name", &self.name)
      .field("range", &self.range.as_str())
      .finish_non_exhaustive()
  }
}

/// Recipe variants grouped by component type (the recipe logic path).
#[derive(Debug, Clone, Default)]
pub struct RecipeRegistry {
  collections: BTreeMap<String, Vec<RecipeVariant>>,
}

impl RecipeRegistry {
  pub fn new() -> Self {
    Self::default()
  }

  /// Add a variant to the collection for `recipe_path`, after the existing ones.
  pub fn register(&mut self, recipe_path: impl Into<String>, variant: RecipeVariant) {
    self.collections.entry(recipe_path.into()).or_default().push(variant);
  }

  pub fn with(mut self, recipe_path: impl Into<String>, variant: RecipeVariant) -> Self {
    self.register(recipe_path, variant);
    self
  }

  pub fn variants(&self, recipe_path: &str) -> &[RecipeVariant] {
    self.collections.get(recipe_path).map(Vec::as_slice).unwrap_or_default()
  }

  pub fn recipe_paths(&self) -> impl Iterator<Item = &str> {
    self.collections.keys().map(String::as_str)
  }

  pub fn is_empty(&self) -> bool {
    self.collections.is_empty()
  }
}

/// Picks the single variant whose range covers a component version.
#[derive(Debug, Clone)]
pub struct RecipeSelector {
  registry: RecipeRegistry,
  logger: Arc<dyn Logger>,
}

impl RecipeSelector {
  pub fn new(registry: RecipeRegistry) -> Self {
    Self::with_logger(registry, Arc::new(NoopLogger))
  }

  pub fn with_logger(registry: RecipeRegistry, logger: Arc<dyn Logger>) -> Self {
    Self { registry, logger }
  }

  pub fn registry(&self) -> &RecipeRegistry {
    &self.registry
  }

  /// Select the variant of `recipe_path` whose range covers `version`.
  ///
  /// `version` is the component's concrete version; `requirement` must admit it.
  ///
  /// # Errors
  ///
  /// - [`ResolveError::RecipeNotFound`] if the collection is unknown, the
  ///   requirement does not admit `version`, or no variant range covers it
  /// - [`ResolveError::AmbiguousRecipe`] if more than one variant covers it
  pub fn select(
    &self,
    recipe_path: &str,
    requirement: &Requirement,
    version: &Version,
  ) -> Result<&RecipeVariant, ResolveError> {
    let not_found = || {
      self
        .logger
        .error(&format!("no recipe in '{recipe_path}' covers {version} for {requirement}"));
      ResolveError::RecipeNotFound {
        recipe_path: recipe_path.to_string(),
        requirement: requirement.to_string(),
      }
    };

    if !requirement.version.matches(version) {
      return Err(not_found());
    }

    let matching: Vec<&RecipeVariant> = self
      .registry
      .variants(recipe_path)
      .iter()
      .filter(|variant| variant.range.matches(version))
      .collect();

    match matching.as_slice() {
      [] => Err(not_found()),
      [variant] => {
        self.logger.debug(&format!(
          "selected recipe '{}' ({}) for {version}",
          variant.name, variant.range
        ));
        Ok(*variant)
      }
      several => {
        let candidates: Vec<String> = several.iter().map(|v| v.name.clone()).collect();
        self.logger.error(&format!(
          "recipes {} in '{recipe_path}' all cover {version}",
          candidates.join(", ")
        ));
        Err(ResolveError::AmbiguousRecipe {
          recipe_path: recipe_path.to_string(),
          requirement: requirement.to_string(),
          candidates,
        })
      }
    }
  }
}
