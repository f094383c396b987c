use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// How the fragments of a variable are joined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VarKind {
  /// A single opaque value.
  #[default]
  Scalar,
  /// Directories joined with the platform path separator (`PATH`, `LD_LIBRARY_PATH`, ...).
  PathList,
  /// Compiler or linker flags joined with a space (`CFLAGS`, `LDFLAGS`, ...).
  FlagList,
}

impl VarKind {
  pub fn is_list(self) -> bool {
    !matches!(self, VarKind::Scalar)
  }
}

const DEFAULT_PATH_LISTS: &[&str] = &[
  "PATH",
  "LD_LIBRARY_PATH",
  "DYLD_LIBRARY_PATH",
  "LIBRARY_PATH",
  "PKG_CONFIG_PATH",
  "CPATH",
  "C_INCLUDE_PATH",
  "CPLUS_INCLUDE_PATH",
  "ACLOCAL_PATH",
  "MANPATH",
  "PERL5LIB",
  "PYTHONPATH",
];

const DEFAULT_FLAG_LISTS: &[&str] = &["CFLAGS", "CXXFLAGS", "CPPFLAGS", "LDFLAGS"];

/// Table deciding which variable names are list-like.
///
/// Names missing from the table are scalars. [`EnvPolicy::default`] knows the
/// usual search-path and compiler-flag variables; callers can add or override
/// entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvPolicy {
  kinds: BTreeMap<String, VarKind>,
}

impl EnvPolicy {
  /// A policy with no list-like variables.
  pub fn empty() -> Self {
    Self { kinds: BTreeMap::new() }
  }

  pub fn with(mut self, name: impl Into<String>, kind: VarKind) -> Self {
    self.set(name, kind);
    self
  }

  pub fn set(&mut self, name: impl Into<String>, kind: VarKind) {
    self.kinds.insert(name.into(), kind);
  }

  /// Apply every override in `overrides` on top of this policy.
  pub fn extend<I, K>(&mut self, overrides: I)
  where
    I: IntoIterator<Item = (K, VarKind)>,
    K: Into<String>,
  {
    for (name, kind) in overrides {
      self.set(name, kind);
    }
  }

  pub fn kind_of(&self, name: &str) -> VarKind {
    self.kinds.get(name).copied().unwrap_or_default()
  }
}

impl Default for EnvPolicy {
  fn default() -> Self {
    let mut policy = Self::empty();
    policy.extend(DEFAULT_PATH_LISTS.iter().map(|name| (*name, VarKind::PathList)));
    policy.extend(DEFAULT_FLAG_LISTS.iter().map(|name| (*name, VarKind::FlagList)));
    policy
  }
}
