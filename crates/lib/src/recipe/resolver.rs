//! Component resolution.
//!
//! Resolution runs in four steps:
//! 1. Default the requirement from the component (id, and version with its
//!    pre-release stripped, as an exact pin)
//! 2. Check the component's version (pre-release stripped) against it
//! 3. Select the recipe variant covering that version in the component's
//!    recipe logic path
//! 4. Instantiate the variant with the descriptor data

use std::sync::Arc;

use super::logger::{Logger, NoopLogger};
use super::registry::{RecipeRegistry, RecipeSelector};
use super::types::{Component, ComponentData, ComponentInit, Requirement, Requirements, ResolveError};
use crate::version::{VersionRange, parse_semantic_version};

/// Turns component descriptors into instantiated components.
///
/// Holds no mutable state, so one resolver can serve concurrent callers.
#[derive(Debug, Clone)]
pub struct ComponentResolver {
  selector: RecipeSelector,
  logger: Arc<dyn Logger>,
}

impl ComponentResolver {
  pub fn new(registry: RecipeRegistry) -> Self {
    Self::with_logger(registry, Arc::new(NoopLogger))
  }

  pub fn with_logger(registry: RecipeRegistry, logger: Arc<dyn Logger>) -> Self {
    Self {
      selector: RecipeSelector::with_logger(registry, logger.clone()),
      logger,
    }
  }

  pub fn selector(&self) -> &RecipeSelector {
    &self.selector
  }

  /// Fill unset requirement fields from the component descriptor.
  pub fn requirement_for(
    &self,
    data: &ComponentData,
    requirements: Option<&Requirements>,
  ) -> Result<Requirement, ResolveError> {
    let requirements = requirements.cloned().unwrap_or_default();
    let version = match requirements.version {
      Some(range) => VersionRange::parse(&range)?,
      None => VersionRange::exact(&parse_semantic_version(&data.version, true)?),
    };
    Ok(Requirement {
      id: requirements.id.unwrap_or_else(|| data.id.clone()),
      version,
    })
  }

  /// Resolve `data` against `requirements` and instantiate its recipe.
  ///
  /// # Errors
  ///
  /// - [`ResolveError::Version`] if the component version or the requirement cannot be parsed
  /// - [`ResolveError::VersionMismatch`] if the component version does not satisfy the requirement
  /// - [`ResolveError::RecipeNotFound`] / [`ResolveError::AmbiguousRecipe`] from recipe selection
  pub fn get_component(
    &self,
    data: &ComponentData,
    requirements: Option<&Requirements>,
  ) -> Result<Box<dyn Component>, ResolveError> {
    let requirement = self.requirement_for(data, requirements)?;

    let version = parse_semantic_version(&data.version, true)?;
    if version.to_string() != data.version {
      self
        .logger
        .debug(&format!("checking {} {} as {version}", data.id, data.version));
    }
    if !requirement.version.matches(&version) {
      self.logger.warn(&format!(
        "{} {} does not satisfy {}",
        data.id, data.version, requirement.version
      ));
      return Err(ResolveError::VersionMismatch {
        version: data.version.clone(),
        requirement: requirement.version.to_string(),
      });
    }

    let variant = self.selector.select(data.recipe_logic_path(), &requirement, &version)?;
    let component = variant.instantiate(ComponentInit::from(data));

    self.logger.info(&format!(
      "resolved {} {} with recipe '{}'",
      component.id(),
      component.version(),
      variant.name()
    ));
    Ok(component)
  }
}
