use anyhow::Result;

use blacksmith_lib::Platform;
use blacksmith_lib::platform::paths::default_output_dir;

use crate::output::{print_stat, print_success};

pub fn cmd_info() -> Result<()> {
  print_success(&format!("smith v{}", env!("CARGO_PKG_VERSION")));
  match Platform::current() {
    Some(platform) => {
      print_stat("Platform", &platform.triple());
      print_stat("Unix", &platform.is_unix().to_string());
      print_stat("Path separator", platform.path_separator());
    }
    None => print_stat("Platform", "Could not detect platform."),
  }
  match default_output_dir() {
    Some(dir) => print_stat("Output dir", &dir.display().to_string()),
    None => print_stat("Output dir", "unknown"),
  }
  Ok(())
}
