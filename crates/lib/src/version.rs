//! Semantic version helpers.
//!
//! Component versions in the wild are not always strict semver (`1.2`,
//! `v2.0.1`, `1.0.2k`), so [`parse_semantic_version`] normalizes them before
//! handing them to the `semver` crate.
//!
//! [`VersionRange`] accepts range expressions with npm-style semantics:
//! - a full bare version is an exact pin (`1.2.11` means `=1.2.11`)
//! - a partial bare version is a wildcard (`1.2` means `1.2.*`)
//! - comparators may be separated by spaces or commas (`>=1.2 <2`)
//! - hyphen ranges are inclusive (`1.2 - 2.3` means `>=1.2.0 <2.4.0`)
//! - alternatives are separated by `||`

use std::fmt;
use std::str::FromStr;

use semver::{BuildMetadata, Comparator, Op, Prerelease, Version, VersionReq};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum VersionError {
  #[error("invalid version {input:?}: {reason}")]
  InvalidVersion { input: String, reason: String },

  #[error("invalid version range {input:?}: {reason}")]
  InvalidRange { input: String, reason: String },
}

/// Parse a possibly non-strict version string into a semantic version.
///
/// Missing minor/patch components default to zero, a leading `v` is ignored,
/// and letters glued to the last numeric component (`1.0.2k`) become a
/// pre-release. With `omit_pre_release` the pre-release and build metadata
/// are dropped (`1.2.0-beta.1` becomes `1.2.0`).
pub fn parse_semantic_version(input: &str, omit_pre_release: bool) -> Result<Version, VersionError> {
  let invalid = |reason: &str| VersionError::InvalidVersion {
    input: input.to_string(),
    reason: reason.to_string(),
  };

  let trimmed = input.trim();
  let trimmed = trimmed
    .strip_prefix(['v', 'V'])
    .or_else(|| trimmed.strip_prefix('='))
    .unwrap_or(trimmed);
  if trimmed.is_empty() {
    return Err(invalid("empty version"));
  }

  let (rest, build) = match trimmed.split_once('+') {
    Some((rest, build)) => (rest, Some(build)),
    None => (trimmed, None),
  };
  let (core, pre) = match rest.split_once('-') {
    Some((core, pre)) => (core, Some(pre.to_string())),
    None => (rest, None),
  };

  let mut numbers = Vec::with_capacity(3);
  let mut pre_parts: Vec<String> = Vec::new();
  let mut extra = Vec::new();
  for part in core.split('.') {
    if numbers.len() == 3 {
      extra.push(part);
      continue;
    }
    let digits_end = part.find(|c: char| !c.is_ascii_digit()).unwrap_or(part.len());
    if digits_end == 0 {
      return Err(invalid("expected a numeric component"));
    }
    let number = part[..digits_end]
      .parse::<u64>()
      .map_err(|e| invalid(&e.to_string()))?;
    numbers.push(number);
    if digits_end < part.len() {
      pre_parts.push(part[digits_end..].to_string());
      break;
    }
  }
  pre_parts.extend(pre);

  let mut version = Version::new(
    numbers[0],
    numbers.get(1).copied().unwrap_or(0),
    numbers.get(2).copied().unwrap_or(0),
  );
  if omit_pre_release {
    return Ok(version);
  }

  if !pre_parts.is_empty() {
    version.pre = Prerelease::new(&pre_parts.join(".")).map_err(|e| invalid(&e.to_string()))?;
  }
  let build: Vec<&str> = extra.into_iter().chain(build).collect();
  if !build.is_empty() {
    version.build = BuildMetadata::new(&build.join(".")).map_err(|e| invalid(&e.to_string()))?;
  }
  Ok(version)
}

/// A version range: one or more alternative comparator sets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionRange {
  raw: String,
  alternatives: Vec<VersionReq>,
}

impl VersionRange {
  pub fn parse(input: &str) -> Result<Self, VersionError> {
    let alternatives = input
      .split("||")
      .map(|set| parse_comparator_set(input, set))
      .collect::<Result<Vec<_>, _>>()?;
    Ok(Self {
      raw: input.trim().to_string(),
      alternatives,
    })
  }

  /// Range that only matches `version` (ignoring build metadata).
  pub fn exact(version: &Version) -> Self {
    let comparator = Comparator {
      op: Op::Exact,
      major: version.major,
      minor: Some(version.minor),
      patch: Some(version.patch),
      pre: version.pre.clone(),
    };
    Self {
      raw: format!("={}", strip_build(version)),
      alternatives: vec![VersionReq {
        comparators: vec![comparator],
      }],
    }
  }

  pub fn as_str(&self) -> &str {
    &self.raw
  }

  pub fn matches(&self, version: &Version) -> bool {
    self.alternatives.iter().any(|req| req.matches(version))
  }
}

impl FromStr for VersionRange {
  type Err = VersionError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    Self::parse(s)
  }
}

impl fmt::Display for VersionRange {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.raw)
  }
}

fn strip_build(version: &Version) -> Version {
  let mut version = version.clone();
  version.build = BuildMetadata::EMPTY;
  version
}

fn parse_comparator_set(input: &str, set: &str) -> Result<VersionReq, VersionError> {
  let invalid = |reason: String| VersionError::InvalidRange {
    input: input.to_string(),
    reason,
  };

  // Operators may be written apart from their version (">= 1.2"), so glue
  // operator-only tokens to the token that follows.
  let mut comparators: Vec<String> = Vec::new();
  let mut pending_op = String::new();
  let mut tokens = set.split([' ', ',', '\t']).filter(|t| !t.is_empty()).peekable();
  while let Some(token) = tokens.next() {
    if tokens.peek() == Some(&"-") {
      tokens.next();
      let Some(upper) = tokens.next() else {
        return Err(invalid(format!("hyphen range from {token:?} has no upper bound")));
      };
      if !pending_op.is_empty() {
        return Err(invalid(format!("operator {pending_op:?} before hyphen range")));
      }
      comparators.extend(hyphen_bound(">=", token));
      comparators.extend(hyphen_bound("<=", upper));
      continue;
    }
    if token.chars().all(|c| "<>=~^".contains(c)) {
      pending_op.push_str(token);
      continue;
    }
    let token = format!("{}{}", std::mem::take(&mut pending_op), token);
    comparators.push(normalize_comparator(&token));
  }
  if !pending_op.is_empty() {
    return Err(invalid(format!("dangling operator {pending_op:?}")));
  }
  if comparators.is_empty() {
    return Ok(VersionReq::STAR);
  }

  VersionReq::parse(&comparators.join(", ")).map_err(|e| invalid(e.to_string()))
}

/// One end of `A - B`. Wildcard components are dropped, so `1.x` bounds like
/// `1`; a fully wildcard end adds no bound. The semver crate already reads a
/// partial `<=2.3` as `<2.4.0`.
fn hyphen_bound(op: &str, version: &str) -> Option<String> {
  let version = version.strip_prefix(['v', 'V']).unwrap_or(version);
  let parts: Vec<&str> = version
    .split('.')
    .take_while(|p| !matches!(*p, "x" | "X" | "*"))
    .collect();
  (!parts.is_empty()).then(|| format!("{op}{}", parts.join(".")))
}

/// Rewrite operator-less comparators to the semver crate's syntax.
fn normalize_comparator(token: &str) -> String {
  let op_len = token.find(|c: char| !"<>=~^".contains(c)).unwrap_or(token.len());
  let (op, version) = token.split_at(op_len);
  let version = version.strip_prefix(['v', 'V']).unwrap_or(version);

  let (core, suffix) = match version.find(['-', '+']) {
    Some(idx) => version.split_at(idx),
    None => (version, ""),
  };
  let mut parts: Vec<&str> = core
    .split('.')
    .map(|p| if p == "x" || p == "X" { "*" } else { p })
    .collect();

  if op.is_empty() {
    if parts.iter().all(|p| *p == "*") {
      return "*".to_string();
    }
    if parts.len() == 3 && !parts.contains(&"*") {
      return format!("={core}{suffix}");
    }
    if parts.len() < 3 && !parts.contains(&"*") {
      parts.push("*");
    }
  }

  format!("{}{}{}", op, parts.join("."), suffix)
}
