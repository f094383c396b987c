//! Target platform descriptors.
//!
//! A [`Platform`] identifies the system a build is produced for. It is always
//! built from a structured descriptor (`{ os, arch }`); a bare string is
//! rejected because it is ambiguous between an OS name and a full descriptor.

pub mod arch;
pub mod os;
pub mod paths;

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while building a [`Platform`] from configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PlatformError {
  #[error("platform must be provided as a structured descriptor, not a string: {0:?}")]
  BareString(String),

  #[error("a platform to build for is required")]
  Missing,

  #[error("platform descriptor has an empty os")]
  EmptyOs,
}

/// Structured platform descriptor as it appears in configuration.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlatformSpec {
  pub os: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub arch: Option<String>,
}

impl PlatformSpec {
  pub fn new(os: impl Into<String>) -> Self {
    Self {
      os: os.into(),
      arch: None,
    }
  }

  pub fn with_arch(mut self, arch: impl Into<String>) -> Self {
    self.arch = Some(arch.into());
    self
  }
}

/// Raw `platform` value read from configuration.
///
/// Both forms deserialize so that a bare string can be reported as a
/// configuration error instead of a parse failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PlatformInput {
  Descriptor(PlatformSpec),
  Bare(String),
}

impl From<PlatformSpec> for PlatformInput {
  fn from(spec: PlatformSpec) -> Self {
    PlatformInput::Descriptor(spec)
  }
}

/// Immutable build target.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "PlatformInput", into = "PlatformSpec")]
pub struct Platform {
  os: String,
  arch: Option<String>,
  is_unix: bool,
}

impl Platform {
  /// Create a platform from a structured descriptor.
  pub fn new(spec: PlatformSpec) -> Result<Self, PlatformError> {
    if spec.os.trim().is_empty() {
      return Err(PlatformError::EmptyOs);
    }
    let is_unix = !os::is_windows_family(&spec.os);
    Ok(Self {
      os: spec.os,
      arch: spec.arch,
      is_unix,
    })
  }

  /// Validate a configured platform value.
  pub fn from_input(input: Option<&PlatformInput>) -> Result<Self, PlatformError> {
    match input {
      Some(PlatformInput::Descriptor(spec)) => Self::new(spec.clone()),
      Some(PlatformInput::Bare(name)) => Err(PlatformError::BareString(name.clone())),
      None => Err(PlatformError::Missing),
    }
  }

  /// Detect the current platform at runtime
  ///
  /// Returns `None` if the OS is not supported
  pub fn current() -> Option<Self> {
    let spec = PlatformSpec {
      os: os::current()?.to_string(),
      arch: arch::current().map(str::to_string),
    };
    Self::new(spec).ok()
  }

  pub fn os(&self) -> &str {
    &self.os
  }

  pub fn arch(&self) -> Option<&str> {
    self.arch.as_deref()
  }

  /// True unless the OS belongs to the Windows family.
  pub fn is_unix(&self) -> bool {
    self.is_unix
  }

  /// Separator between entries of path-list variables such as `PATH`.
  pub fn path_separator(&self) -> &'static str {
    if self.is_unix { ":" } else { ";" }
  }

  /// Returns the platform triple string (e.g., "aarch64-darwin"), or just the OS without an arch.
  pub fn triple(&self) -> String {
    match &self.arch {
      Some(arch) => format!("{}-{}", arch, self.os),
      None => self.os.clone(),
    }
  }
}

impl TryFrom<PlatformInput> for Platform {
  type Error = PlatformError;

  fn try_from(input: PlatformInput) -> Result<Self, Self::Error> {
    Self::from_input(Some(&input))
  }
}

impl From<Platform> for PlatformSpec {
  fn from(platform: Platform) -> Self {
    PlatformSpec {
      os: platform.os,
      arch: platform.arch,
    }
  }
}

impl fmt::Display for Platform {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.triple())
  }
}
