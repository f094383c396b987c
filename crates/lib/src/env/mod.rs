//! Environment variable accumulation.
//!
//! [`EnvVars`] collects the variables a build runs with. Every write names an
//! [`EnvOperation`] that decides how the new value combines with the current
//! one, and an [`EnvPolicy`] decides which variables are lists (search paths,
//! compiler flags) and how their fragments are joined for the target platform.
//!
//! There is no reset: drop the accumulator and create a fresh one for the same
//! platform instead.

mod policy;
mod types;

pub use policy::{EnvPolicy, VarKind};
pub use types::{EnvError, EnvMap, EnvOperation, EnvValue};

use std::collections::{BTreeMap, HashSet};
use std::process::Command;

use tracing::debug;

use crate::platform::Platform;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Placement {
  Before,
  After,
}

/// Accumulated environment variables for one platform.
#[derive(Debug, Clone)]
pub struct EnvVars {
  platform: Platform,
  policy: EnvPolicy,
  vars: EnvMap,
}

impl EnvVars {
  /// Create an empty accumulator using the default list policy.
  pub fn new(platform: Platform) -> Self {
    Self::with_policy(platform, EnvPolicy::default())
  }

  pub fn with_policy(platform: Platform, policy: EnvPolicy) -> Self {
    Self {
      platform,
      policy,
      vars: BTreeMap::new(),
    }
  }

  pub fn platform(&self) -> &Platform {
    &self.platform
  }

  pub fn policy(&self) -> &EnvPolicy {
    &self.policy
  }

  /// Add a variable, combining it with any existing value according to `op`.
  ///
  /// # Errors
  ///
  /// Returns [`EnvError::InvalidArgument`] if `name` is empty or contains `=` or a NUL byte.
  pub fn add_variable(&mut self, name: &str, value: impl Into<EnvValue>, op: EnvOperation) -> Result<(), EnvError> {
    validate_name(name)?;
    let value = value.into();
    let kind = self.policy.kind_of(name);
    let existing = self.vars.get(name);

    let combined = match op {
      EnvOperation::Replace => self.normalize(value, kind),
      EnvOperation::Auto if existing.is_some() && !kind.is_list() => self.normalize(value, kind),
      // Flags are positional (`-arch x86_64 -arch arm64`), so only search paths drop repeats.
      EnvOperation::Auto | EnvOperation::Merge if kind == VarKind::PathList => self.merge(existing, value, kind),
      EnvOperation::Auto | EnvOperation::Merge | EnvOperation::Append => {
        self.concat(existing, value, kind, Placement::After)
      }
      EnvOperation::Prepend => self.concat(existing, value, kind, Placement::Before),
    };

    debug!(variable = name, operation = %op, "setting environment variable");
    self.vars.insert(name.to_string(), combined);
    Ok(())
  }

  /// Add every variable in `vars`, in iteration order, with the same operation.
  ///
  /// Stops at the first invalid name; writes before it stay applied.
  pub fn add_variables<I, K, V>(&mut self, vars: I, op: EnvOperation) -> Result<(), EnvError>
  where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: Into<EnvValue>,
  {
    for (name, value) in vars {
      self.add_variable(name.as_ref(), value, op)?;
    }
    Ok(())
  }

  pub fn get(&self, name: &str) -> Option<&EnvValue> {
    self.vars.get(name)
  }

  pub fn len(&self) -> usize {
    self.vars.len()
  }

  pub fn is_empty(&self) -> bool {
    self.vars.is_empty()
  }

  /// Accumulated variables with `extra` overlaid (extra values always win), unstringified.
  ///
  /// # Errors
  ///
  /// Returns [`EnvError::InvalidArgument`] if an overlay name would be rejected by [`EnvVars::add_variable`].
  pub fn get_raw_variables(&self, extra: &EnvMap) -> Result<EnvMap, EnvError> {
    extra.keys().try_for_each(|name| validate_name(name))?;
    let mut vars = self.vars.clone();
    vars.extend(extra.iter().map(|(name, value)| (name.clone(), value.clone())));
    Ok(vars)
  }

  /// Accumulated variables with `extra` overlaid, flattened to strings for process injection.
  pub fn get_variables(&self, extra: &EnvMap) -> Result<BTreeMap<String, String>, EnvError> {
    Ok(self.stringified(self.get_raw_variables(extra)?))
  }

  /// Render a value the way it is injected into a process environment.
  pub fn stringify(&self, name: &str, value: &EnvValue) -> String {
    match value {
      EnvValue::Scalar(value) => value.clone(),
      EnvValue::List(items) => items.join(self.separator(self.policy.kind_of(name))),
    }
  }

  /// Set every accumulated variable on `command`.
  pub fn apply_to(&self, command: &mut Command) {
    command.envs(self.stringified(self.vars.clone()));
  }

  fn stringified(&self, vars: EnvMap) -> BTreeMap<String, String> {
    vars
      .into_iter()
      .map(|(name, value)| {
        let rendered = self.stringify(&name, &value);
        (name, rendered)
      })
      .collect()
  }

  fn separator(&self, kind: VarKind) -> &'static str {
    match kind {
      VarKind::FlagList => " ",
      VarKind::PathList | VarKind::Scalar => self.platform.path_separator(),
    }
  }

  fn fragments(&self, value: &EnvValue, kind: VarKind) -> Vec<String> {
    let items: Vec<String> = match (value, kind) {
      (EnvValue::List(items), _) => items.clone(),
      (EnvValue::Scalar(value), VarKind::PathList) => value
        .split(self.platform.path_separator())
        .map(str::to_string)
        .collect(),
      (EnvValue::Scalar(value), VarKind::FlagList) => value.split_whitespace().map(str::to_string).collect(),
      (EnvValue::Scalar(value), VarKind::Scalar) => vec![value.clone()],
    };
    items.into_iter().filter(|item| !item.is_empty()).collect()
  }

  fn normalize(&self, value: EnvValue, kind: VarKind) -> EnvValue {
    if kind.is_list() {
      EnvValue::List(self.fragments(&value, kind))
    } else {
      value
    }
  }

  fn concat(&self, existing: Option<&EnvValue>, value: EnvValue, kind: VarKind, placement: Placement) -> EnvValue {
    let Some(existing) = existing else {
      return self.normalize(value, kind);
    };

    if let (VarKind::Scalar, EnvValue::Scalar(current), EnvValue::Scalar(new)) = (kind, existing, &value) {
      return EnvValue::Scalar(match placement {
        Placement::After => format!("{current}{new}"),
        Placement::Before => format!("{new}{current}"),
      });
    }

    let current = self.fragments(existing, kind);
    let new = self.fragments(&value, kind);
    let combined = match placement {
      Placement::After => current.into_iter().chain(new).collect(),
      Placement::Before => new.into_iter().chain(current).collect(),
    };
    EnvValue::List(combined)
  }

  fn merge(&self, existing: Option<&EnvValue>, value: EnvValue, kind: VarKind) -> EnvValue {
    let current = existing.map(|v| self.fragments(v, kind)).unwrap_or_default();
    let mut seen = HashSet::new();
    let merged = current
      .into_iter()
      .chain(self.fragments(&value, kind))
      .filter(|fragment| seen.insert(fragment.clone()))
      .collect();
    EnvValue::List(merged)
  }
}

fn validate_name(name: &str) -> Result<(), EnvError> {
  let reason = if name.is_empty() {
    "name is empty"
  } else if name.contains('=') {
    "name contains '='"
  } else if name.contains('\0') {
    "name contains a NUL byte"
  } else {
    return Ok(());
  };
  Err(EnvError::InvalidArgument {
    name: name.to_string(),
    reason,
  })
}
