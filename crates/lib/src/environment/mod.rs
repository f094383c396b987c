//! Build environments.
//!
//! A [`BuildEnvironment`] is the context one build session runs in: the
//! directory layout, the target platform and the accumulated environment
//! variables. Construction validates the platform first, then creates every
//! configured directory, so a rejected configuration leaves nothing on disk.
//!
//! # Layout
//!
//! ```text
//! <output_dir>/
//! └── logs/        # default logs_dir when none is configured
//! <prefix_dir>/    # install prefix
//! <sandbox_dir>/   # build directory
//! <artifacts_dir>/ # packaged results
//! ```

mod types;

pub use types::*;

use std::collections::BTreeMap;
use std::num::NonZeroUsize;
use std::path::Path;

use tracing::{debug, info};

use crate::consts::LOGS_DIR_NAME;
use crate::env::{EnvMap, EnvOperation, EnvPolicy, EnvValue, EnvVars};
use crate::platform::Platform;

/// Directory layout, target platform and environment variables of one build session.
#[derive(Debug, Clone)]
pub struct BuildEnvironment {
  dirs: BuildDirs,
  max_parallel_jobs: ParallelJobs,
  target: Target,
  policy: EnvPolicy,
  env: EnvVars,
}

impl BuildEnvironment {
  /// Create a build environment, creating every configured directory.
  ///
  /// # Errors
  ///
  /// Returns [`BuildEnvError::Platform`] if the platform is missing or not a
  /// structured descriptor, [`BuildEnvError::Configuration`] for other invalid
  /// options, and [`BuildEnvError::Filesystem`] if a directory cannot be created.
  pub fn new(options: BuildEnvironmentOptions) -> Result<Self, BuildEnvError> {
    let options = options.without_empty_paths();

    let platform = Platform::from_input(options.platform.as_ref())?;
    let max_parallel_jobs = match options.max_parallel_jobs {
      None => ParallelJobs::Unbounded,
      Some(jobs) => NonZeroUsize::new(jobs)
        .map(ParallelJobs::Limited)
        .ok_or_else(|| BuildEnvError::Configuration("max_parallel_jobs must be positive".to_string()))?,
    };

    let logs_dir = options
      .logs_dir
      .or_else(|| options.output_dir.as_ref().map(|out| out.join(LOGS_DIR_NAME)));
    let dirs = BuildDirs {
      output_dir: options.output_dir,
      prefix_dir: options.prefix_dir,
      sandbox_dir: options.sandbox_dir,
      artifacts_dir: options.artifacts_dir,
      logs_dir,
    };

    for dir in dirs.iter() {
      create_dir(dir)?;
    }

    let mut policy = EnvPolicy::default();
    policy.extend(options.env_policy);

    info!(platform = %platform, "build environment ready");

    let env = EnvVars::with_policy(platform.clone(), policy.clone());
    let is_unix = platform.is_unix();
    Ok(Self {
      dirs,
      max_parallel_jobs,
      target: Target { platform, is_unix },
      policy,
      env,
    })
  }

  pub fn output_dir(&self) -> Option<&Path> {
    self.dirs.output_dir.as_deref()
  }

  pub fn prefix_dir(&self) -> Option<&Path> {
    self.dirs.prefix_dir.as_deref()
  }

  pub fn sandbox_dir(&self) -> Option<&Path> {
    self.dirs.sandbox_dir.as_deref()
  }

  pub fn artifacts_dir(&self) -> Option<&Path> {
    self.dirs.artifacts_dir.as_deref()
  }

  pub fn logs_dir(&self) -> Option<&Path> {
    self.dirs.logs_dir.as_deref()
  }

  pub fn dirs(&self) -> &BuildDirs {
    &self.dirs
  }

  pub fn max_parallel_jobs(&self) -> ParallelJobs {
    self.max_parallel_jobs
  }

  pub fn platform(&self) -> &Platform {
    &self.target.platform
  }

  pub fn target(&self) -> &Target {
    &self.target
  }

  /// Add an environment variable or combine it with the existing value.
  pub fn add_env_variable(
    &mut self,
    name: &str,
    value: impl Into<EnvValue>,
    op: EnvOperation,
  ) -> Result<(), BuildEnvError> {
    Ok(self.env.add_variable(name, value, op)?)
  }

  /// Add several environment variables in iteration order.
  pub fn add_env_variables<I, K, V>(&mut self, vars: I, op: EnvOperation) -> Result<(), BuildEnvError>
  where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: Into<EnvValue>,
  {
    Ok(self.env.add_variables(vars, op)?)
  }

  /// Current environment variables with `extra` overlaid, as strings.
  ///
  /// Overlay names are checked the same way as written names.
  pub fn get_env_variables(&self, extra: &EnvMap) -> Result<BTreeMap<String, String>, BuildEnvError> {
    Ok(self.env.get_variables(extra)?)
  }

  /// Current environment variables with `extra` overlaid, unstringified.
  pub fn get_raw_env_variables(&self, extra: &EnvMap) -> Result<EnvMap, BuildEnvError> {
    Ok(self.env.get_raw_variables(extra)?)
  }

  pub fn env(&self) -> &EnvVars {
    &self.env
  }

  /// Discard every accumulated variable and start again from an empty environment.
  pub fn reset_env_variables(&mut self) {
    debug!(platform = %self.target.platform, "resetting environment variables");
    self.env = EnvVars::with_policy(self.target.platform.clone(), self.policy.clone());
  }
}

fn create_dir(path: &Path) -> Result<(), BuildEnvError> {
  debug!(path = %path.display(), "creating directory");
  std::fs::create_dir_all(path).map_err(|source| BuildEnvError::Filesystem {
    path: path.to_path_buf(),
    source,
  })
}
