//! Shared test helpers for CLI integration tests.

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use tempfile::TempDir;

/// Recipe registry used by the resolve tests.
pub const ZLIB_RECIPES: &str = r#"
[[recipes.zlib]]
name = "zlib-legacy"
range = "<1.2.5"

[[recipes.zlib]]
name = "zlib-modern"
range = ">=1.2.5 <2"

[[recipes.zlib]]
name = "zlib-ng"
range = "^2.0.0"
"#;

/// Isolated test environment.
///
/// Each test gets its own temporary directory; the data directory is pointed
/// into it so nothing is created outside.
pub struct TestEnv {
  pub temp: TempDir,
}

impl TestEnv {
  pub fn new() -> Self {
    Self {
      temp: TempDir::new().unwrap(),
    }
  }

  pub fn path(&self) -> &Path {
    self.temp.path()
  }

  /// Write a file relative to the temp directory and return its path.
  pub fn write_file(&self, relative_path: &str, content: &str) -> PathBuf {
    let path = self.temp.path().join(relative_path);
    if let Some(parent) = path.parent() {
      std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(&path, content).unwrap();
    path
  }

  /// Write a build options file whose output directory lives in the temp directory.
  pub fn build_config(&self, os: &str, extra: &str) -> PathBuf {
    let output = self.path().join("out");
    let content = format!(
      "platform = {{ os = \"{os}\" }}\noutput_dir = {:?}\n{extra}",
      output.display().to_string()
    );
    self.write_file("build.toml", &content)
  }

  /// Get a Command for the smith binary with isolated data directories.
  pub fn smith_cmd(&self) -> Command {
    let mut cmd = cargo_bin_cmd!("smith");
    cmd
      .env("XDG_DATA_HOME", self.path().join("data"))
      .env("LOCALAPPDATA", self.path().join("data"))
      .env_remove("RUST_LOG");
    cmd
  }
}
