use std::sync::LazyLock;

use regex::Regex;

/// Matches operating system identifiers of the Windows family.
static WINDOWS_FAMILY: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"(?i)windows|mingw|cygwin|^win(32|64)?$").expect("windows family pattern is valid"));

/// Returns true if `os` names a Windows-family operating system (case-insensitive).
pub fn is_windows_family(os: &str) -> bool {
  WINDOWS_FAMILY.is_match(os)
}

/// Returns the identifier of the current operating system
///
/// Returns `None` if the OS is not supported
pub fn current() -> Option<&'static str> {
  match std::env::consts::OS {
    "linux" => Some("linux"),
    "macos" => Some("darwin"),
    "windows" => Some("windows"),
    "freebsd" => Some("freebsd"),
    _ => None,
  }
}
