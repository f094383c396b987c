use std::collections::BTreeMap;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::env::{EnvError, VarKind};
use crate::platform::{Platform, PlatformError, PlatformInput};

/// Errors that can occur while setting up a build environment.
#[derive(Debug, Error)]
pub enum BuildEnvError {
  /// The platform is missing or malformed.
  #[error("invalid platform configuration: {0}")]
  Platform(#[from] PlatformError),

  /// Any other invalid option.
  #[error("invalid build configuration: {0}")]
  Configuration(String),

  /// A configured directory could not be created.
  #[error("failed to create directory {}: {source}", path.display())]
  Filesystem {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  /// An environment variable write was rejected.
  #[error(transparent)]
  Env(#[from] EnvError),
}

impl BuildEnvError {
  /// True for errors caused by a missing or malformed configuration.
  pub fn is_configuration(&self) -> bool {
    matches!(self, BuildEnvError::Platform(_) | BuildEnvError::Configuration(_))
  }
}

/// How many build jobs may run at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ParallelJobs {
  #[default]
  Unbounded,
  Limited(NonZeroUsize),
}

/// Options for [`super::BuildEnvironment::new`].
///
/// Every field is optional; unset fields are filled from a defaults value with
/// [`BuildEnvironmentOptions::or_defaults`]. Empty paths count as unset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BuildEnvironmentOptions {
  pub platform: Option<PlatformInput>,
  pub output_dir: Option<PathBuf>,
  pub prefix_dir: Option<PathBuf>,
  pub sandbox_dir: Option<PathBuf>,
  pub artifacts_dir: Option<PathBuf>,
  pub logs_dir: Option<PathBuf>,
  /// `0` is rejected; leave unset for no limit.
  pub max_parallel_jobs: Option<usize>,
  /// Overrides for the default list policy, by variable name.
  pub env_policy: BTreeMap<String, VarKind>,
}

impl BuildEnvironmentOptions {
  pub fn with_platform(mut self, platform: impl Into<PlatformInput>) -> Self {
    self.platform = Some(platform.into());
    self
  }

  pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
    self.output_dir = Some(dir.into());
    self
  }

  pub fn with_prefix_dir(mut self, dir: impl Into<PathBuf>) -> Self {
    self.prefix_dir = Some(dir.into());
    self
  }

  pub fn with_sandbox_dir(mut self, dir: impl Into<PathBuf>) -> Self {
    self.sandbox_dir = Some(dir.into());
    self
  }

  pub fn with_artifacts_dir(mut self, dir: impl Into<PathBuf>) -> Self {
    self.artifacts_dir = Some(dir.into());
    self
  }

  pub fn with_logs_dir(mut self, dir: impl Into<PathBuf>) -> Self {
    self.logs_dir = Some(dir.into());
    self
  }

  pub fn with_max_parallel_jobs(mut self, jobs: usize) -> Self {
    self.max_parallel_jobs = Some(jobs);
    self
  }

  /// Fill every unset field from `defaults`, field by field.
  ///
  /// Used by callers that supply their own fallbacks, such as host defaults.
  /// Policy overrides are combined, with entries in `self` winning.
  pub fn or_defaults(self, defaults: BuildEnvironmentOptions) -> Self {
    let options = self.without_empty_paths();
    let defaults = defaults.without_empty_paths();
    let mut env_policy = defaults.env_policy;
    env_policy.extend(options.env_policy);
    Self {
      platform: options.platform.or(defaults.platform),
      output_dir: options.output_dir.or(defaults.output_dir),
      prefix_dir: options.prefix_dir.or(defaults.prefix_dir),
      sandbox_dir: options.sandbox_dir.or(defaults.sandbox_dir),
      artifacts_dir: options.artifacts_dir.or(defaults.artifacts_dir),
      logs_dir: options.logs_dir.or(defaults.logs_dir),
      max_parallel_jobs: options.max_parallel_jobs.or(defaults.max_parallel_jobs),
      env_policy,
    }
  }

  /// Turn empty directory paths into unset ones.
  pub(crate) fn without_empty_paths(self) -> Self {
    Self {
      output_dir: non_empty(self.output_dir),
      prefix_dir: non_empty(self.prefix_dir),
      sandbox_dir: non_empty(self.sandbox_dir),
      artifacts_dir: non_empty(self.artifacts_dir),
      logs_dir: non_empty(self.logs_dir),
      ..self
    }
  }
}

fn non_empty(path: Option<PathBuf>) -> Option<PathBuf> {
  path.filter(|p| !p.as_os_str().is_empty())
}

/// What a build produces artifacts for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
  pub platform: Platform,
  pub is_unix: bool,
}

/// Resolved directory layout of a build environment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildDirs {
  pub output_dir: Option<PathBuf>,
  pub prefix_dir: Option<PathBuf>,
  pub sandbox_dir: Option<PathBuf>,
  pub artifacts_dir: Option<PathBuf>,
  pub logs_dir: Option<PathBuf>,
}

impl BuildDirs {
  /// Configured directories in creation order.
  pub fn iter(&self) -> impl Iterator<Item = &Path> {
    [
      &self.output_dir,
      &self.prefix_dir,
      &self.sandbox_dir,
      &self.artifacts_dir,
      &self.logs_dir,
    ]
    .into_iter()
    .filter_map(|dir| dir.as_deref())
  }
}
