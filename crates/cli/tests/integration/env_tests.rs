//! Env command integration tests.

use predicates::prelude::*;

use super::common::TestEnv;

#[test]
fn env_prints_accumulated_variables() {
  let env = TestEnv::new();
  let config = env.build_config("linux", "");

  env
    .smith_cmd()
    .args(["env", "--config"])
    .arg(&config)
    .args(["--set", "PATH=/usr/bin", "--set", "PATH=/opt/bin@prepend", "--set", "CC=clang"])
    .assert()
    .success()
    .stdout("CC=clang\nPATH=/opt/bin:/usr/bin\n");
}

#[test]
fn env_creates_output_and_logs_dirs() {
  let env = TestEnv::new();
  let config = env.build_config("linux", "");

  env.smith_cmd().args(["env", "--config"]).arg(&config).assert().success();

  assert!(env.path().join("out").is_dir());
  assert!(env.path().join("out").join("logs").is_dir());
}

#[test]
fn env_uses_windows_separator() {
  let env = TestEnv::new();
  let config = env.build_config("windows", "");

  env
    .smith_cmd()
    .args(["env", "--config"])
    .arg(&config)
    .args(["--set", r"PATH=C:\tools", "--set", r"PATH=C:\bin@append"])
    .assert()
    .success()
    .stdout(predicate::str::contains(r"PATH=C:\tools;C:\bin"));
}

#[test]
fn env_flag_merge_keeps_repeated_flags() {
  let env = TestEnv::new();
  let config = env.build_config("linux", "");

  env
    .smith_cmd()
    .args(["env", "--config"])
    .arg(&config)
    .args(["--set", "LDFLAGS=-arch x86_64", "--set", "LDFLAGS=-arch arm64@merge"])
    .assert()
    .success()
    .stdout("LDFLAGS=-arch x86_64 -arch arm64\n");
}

#[test]
fn env_path_merge_drops_repeated_entries() {
  let env = TestEnv::new();
  let config = env.build_config("linux", "");

  env
    .smith_cmd()
    .args(["env", "--config"])
    .arg(&config)
    .args(["--set", "PATH=/usr/bin:/bin", "--set", "PATH=/bin:/opt/bin@merge"])
    .assert()
    .success()
    .stdout("PATH=/usr/bin:/bin:/opt/bin\n");
}

#[test]
fn env_policy_overrides_apply() {
  let env = TestEnv::new();
  let config = env.build_config("linux", "[env_policy]\nGOFLAGS = \"flag_list\"\n");

  env
    .smith_cmd()
    .args(["env", "--config"])
    .arg(&config)
    .args(["--set", "GOFLAGS=-mod=vendor", "--set", "GOFLAGS=-trimpath"])
    .assert()
    .success()
    .stdout("GOFLAGS=-mod=vendor -trimpath\n");
}

#[test]
fn env_extra_overlays_output() {
  let env = TestEnv::new();
  let config = env.build_config("linux", "");

  env
    .smith_cmd()
    .args(["env", "--config"])
    .arg(&config)
    .args(["--set", "CC=gcc", "--extra", "CC=clang", "--extra", "MAKEFLAGS=-j4"])
    .assert()
    .success()
    .stdout("CC=clang\nMAKEFLAGS=-j4\n");
}

#[test]
fn env_json_output() {
  let env = TestEnv::new();
  let config = env.build_config("linux", "");

  let output = env
    .smith_cmd()
    .args(["env", "--json", "--config"])
    .arg(&config)
    .args(["--set", "PKG_CONFIG_PATH=/opt/lib/pkgconfig"])
    .output()
    .unwrap();

  assert!(output.status.success());
  let parsed: serde_json::Value = serde_json::from_slice(&output.stdout).expect("valid JSON");
  assert_eq!(parsed["PKG_CONFIG_PATH"], "/opt/lib/pkgconfig");
}

#[test]
fn bare_string_platform_is_rejected() {
  let env = TestEnv::new();
  let output = env.path().join("out");
  let config = env.write_file(
    "build.toml",
    &format!("platform = \"linux\"\noutput_dir = {:?}\n", output.display().to_string()),
  );

  env
    .smith_cmd()
    .args(["env", "--config"])
    .arg(&config)
    .assert()
    .failure()
    .code(1)
    .stderr(predicate::str::contains("error:"))
    .stderr(predicate::str::contains("structured descriptor"));

  assert!(!output.exists());
}

#[test]
fn zero_parallel_jobs_is_rejected() {
  let env = TestEnv::new();
  let config = env.build_config("linux", "max_parallel_jobs = 0\n");

  env
    .smith_cmd()
    .args(["env", "--config"])
    .arg(&config)
    .assert()
    .failure()
    .stderr(predicate::str::contains("max_parallel_jobs"));
}

#[test]
fn invalid_variable_name_is_rejected() {
  let env = TestEnv::new();
  let config = env.build_config("linux", "");

  env
    .smith_cmd()
    .args(["env", "--config"])
    .arg(&config)
    .args(["--set", "=oops"])
    .assert()
    .failure()
    .stderr(predicate::str::contains("NAME=VALUE"));
}

#[test]
fn missing_config_fails() {
  let env = TestEnv::new();

  env
    .smith_cmd()
    .args(["env", "--config"])
    .arg(env.path().join("missing.toml"))
    .assert()
    .failure()
    .stderr(predicate::str::contains("failed to read"));
}
