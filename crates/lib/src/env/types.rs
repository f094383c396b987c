use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised by environment variable operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EnvError {
  /// The variable name cannot be injected into a process environment.
  #[error("invalid environment variable name {name:?}: {reason}")]
  InvalidArgument { name: String, reason: &'static str },

  /// An operation name did not match any known combination operation.
  #[error("unknown environment operation {0:?} (expected auto, merge, append, prepend or replace)")]
  UnknownOperation(String),
}

/// How a new value is combined with an existing value of the same variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnvOperation {
  /// `Merge` for unset or list-like variables, `Replace` otherwise.
  #[default]
  Auto,
  /// De-duplicating combination for list-like variables, `Append` otherwise.
  Merge,
  Append,
  Prepend,
  Replace,
}

impl EnvOperation {
  pub fn as_str(&self) -> &'static str {
    match self {
      EnvOperation::Auto => "auto",
      EnvOperation::Merge => "merge",
      EnvOperation::Append => "append",
      EnvOperation::Prepend => "prepend",
      EnvOperation::Replace => "replace",
    }
  }
}

impl fmt::Display for EnvOperation {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl FromStr for EnvOperation {
  type Err = EnvError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "auto" => Ok(EnvOperation::Auto),
      "merge" => Ok(EnvOperation::Merge),
      "append" => Ok(EnvOperation::Append),
      "prepend" => Ok(EnvOperation::Prepend),
      "replace" => Ok(EnvOperation::Replace),
      other => Err(EnvError::UnknownOperation(other.to_string())),
    }
  }
}

/// Value of an environment variable: a plain string or an ordered list of fragments.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EnvValue {
  Scalar(String),
  List(Vec<String>),
}

impl EnvValue {
  pub fn is_list(&self) -> bool {
    matches!(self, EnvValue::List(_))
  }
}

impl From<&str> for EnvValue {
  fn from(value: &str) -> Self {
    EnvValue::Scalar(value.to_string())
  }
}

impl From<String> for EnvValue {
  fn from(value: String) -> Self {
    EnvValue::Scalar(value)
  }
}

impl From<&String> for EnvValue {
  fn from(value: &String) -> Self {
    EnvValue::Scalar(value.clone())
  }
}

impl From<&Path> for EnvValue {
  fn from(value: &Path) -> Self {
    EnvValue::Scalar(value.to_string_lossy().into_owned())
  }
}

impl From<PathBuf> for EnvValue {
  fn from(value: PathBuf) -> Self {
    EnvValue::from(value.as_path())
  }
}

impl From<Vec<String>> for EnvValue {
  fn from(value: Vec<String>) -> Self {
    EnvValue::List(value)
  }
}

impl From<Vec<&str>> for EnvValue {
  fn from(value: Vec<&str>) -> Self {
    EnvValue::List(value.into_iter().map(str::to_string).collect())
  }
}

/// Unstringified variables, keyed by name.
pub type EnvMap = BTreeMap<String, EnvValue>;
