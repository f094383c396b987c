/// Returns the identifier of the current CPU architecture
///
/// Returns `None` if the architecture is not supported
pub fn current() -> Option<&'static str> {
  match std::env::consts::ARCH {
    "x86_64" => Some("x86_64"),
    "aarch64" => Some("aarch64"),
    "x86" => Some("x86"),
    "arm" => Some("arm"),
    _ => None,
  }
}
