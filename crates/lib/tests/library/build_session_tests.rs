//! End-to-end build session: options file, environment setup, variable
//! accumulation and injection into a child process command.

use std::process::Command;

use blacksmith_lib::config::load_build_options;
use blacksmith_lib::env::EnvMap;
use blacksmith_lib::environment::BuildEnvError;
use blacksmith_lib::{BuildEnvironment, BuildEnvironmentOptions, EnvOperation, EnvValue, PlatformSpec};
use tempfile::TempDir;

#[test]
fn session_from_options_file() {
  let temp = TempDir::new().unwrap();
  let out = temp.path().join("out");
  let config = temp.path().join("build.toml");
  std::fs::write(
    &config,
    format!(
      "platform = {{ os = \"linux\", arch = \"x86_64\" }}\noutput_dir = {:?}\nprefix_dir = {:?}\n",
      out.display().to_string(),
      temp.path().join("prefix").display().to_string(),
    ),
  )
  .unwrap();

  let mut environment = BuildEnvironment::new(load_build_options(&config).unwrap()).unwrap();
  assert_eq!(environment.target().platform.triple(), "x86_64-linux");
  assert!(environment.target().is_unix);
  assert_eq!(environment.logs_dir(), Some(out.join("logs").as_path()));

  let prefix_bin = temp.path().join("prefix").join("bin");
  environment
    .add_env_variables(
      [
        ("PATH", EnvValue::from("/usr/bin:/bin")),
        ("PATH", EnvValue::from(prefix_bin.as_path())),
        ("CFLAGS", EnvValue::from(vec!["-O2", "-pipe"])),
      ],
      EnvOperation::Auto,
    )
    .unwrap();
  environment
    .add_env_variable("PATH", "/opt/ccache/bin", EnvOperation::Prepend)
    .unwrap();

  let vars = environment.get_env_variables(&EnvMap::new()).unwrap();
  assert_eq!(vars["PATH"], format!("/opt/ccache/bin:/usr/bin:/bin:{}", prefix_bin.display()));
  assert_eq!(vars["CFLAGS"], "-O2 -pipe");

  let mut command = Command::new("true");
  command.env_clear();
  environment.env().apply_to(&mut command);
  let injected: Vec<_> = command
    .get_envs()
    .map(|(name, value)| (name.to_string_lossy().into_owned(), value.map(|v| v.to_string_lossy().into_owned())))
    .collect();
  assert!(injected.contains(&("CFLAGS".to_string(), Some("-O2 -pipe".to_string()))));

  environment.reset_env_variables();
  assert!(environment.get_env_variables(&EnvMap::new()).unwrap().is_empty());
}

#[test]
fn rejected_configuration_leaves_nothing_on_disk() {
  let temp = TempDir::new().unwrap();
  let out = temp.path().join("out");

  let err = BuildEnvironment::new(BuildEnvironmentOptions::default().with_output_dir(&out)).unwrap_err();
  assert!(matches!(err, BuildEnvError::Platform(_)));
  assert!(err.is_configuration());
  assert!(!out.exists());
}

#[test]
fn sessions_do_not_share_variables() {
  let temp = TempDir::new().unwrap();
  let options = BuildEnvironmentOptions::default()
    .with_platform(PlatformSpec::new("windows"))
    .with_output_dir(temp.path().join("out"));

  let mut first = BuildEnvironment::new(options.clone()).unwrap();
  let second = BuildEnvironment::new(options).unwrap();
  first.add_env_variable("PATH", r"C:\tools", EnvOperation::Auto).unwrap();
  first.add_env_variable("PATH", r"C:\bin", EnvOperation::Append).unwrap();

  assert_eq!(first.get_env_variables(&EnvMap::new()).unwrap()["PATH"], r"C:\tools;C:\bin");
  assert!(second.get_env_variables(&EnvMap::new()).unwrap().is_empty());
}
