//! Resolve command integration tests.

use predicates::prelude::*;

use super::common::{TestEnv, ZLIB_RECIPES};

fn resolve_json(env: &TestEnv, component: &str, args: &[&str]) -> serde_json::Value {
  let component = env.write_file("zlib.json", component);
  let recipes = env.write_file("recipes.toml", ZLIB_RECIPES);

  let output = env
    .smith_cmd()
    .arg("resolve")
    .arg(&component)
    .arg("--recipes")
    .arg(&recipes)
    .args(args)
    .output()
    .unwrap();

  assert!(
    output.status.success(),
    "resolve failed: {}",
    String::from_utf8_lossy(&output.stderr)
  );
  serde_json::from_slice(&output.stdout).expect("valid JSON")
}

#[test]
fn resolves_by_declared_version() {
  let env = TestEnv::new();
  let parsed = resolve_json(&env, r#"{"id": "zlib", "version": "1.2.11"}"#, &[]);

  assert_eq!(parsed["recipe"], "zlib-modern");
  assert_eq!(parsed["id"], "zlib");
  assert_eq!(parsed["version"], "1.2.11");
}

#[test]
fn pre_release_versions_resolve() {
  let env = TestEnv::new();
  let parsed = resolve_json(&env, r#"{"id": "zlib", "version": "2.1.0-rc1"}"#, &[]);

  assert_eq!(parsed["recipe"], "zlib-ng");
  assert_eq!(parsed["version"], "2.1.0-rc1");
}

#[test]
fn explicit_range_is_checked() {
  let env = TestEnv::new();
  let parsed = resolve_json(
    &env,
    r#"{"id": "zlib", "version": "1.2.3"}"#,
    &["--version", "~1.2"],
  );

  assert_eq!(parsed["recipe"], "zlib-legacy");
}

#[test]
fn version_mismatch_fails() {
  let env = TestEnv::new();
  let component = env.write_file("zlib.json", r#"{"id": "zlib", "version": "2.0.0"}"#);
  let recipes = env.write_file("recipes.toml", ZLIB_RECIPES);

  env
    .smith_cmd()
    .arg("resolve")
    .arg(&component)
    .arg("--recipes")
    .arg(&recipes)
    .args(["--version", "~1.2"])
    .assert()
    .failure()
    .code(1)
    .stderr(predicate::str::contains("error:"))
    .stderr(predicate::str::contains("does not satisfy ~1.2"));
}

#[test]
fn unknown_recipe_collection_fails() {
  let env = TestEnv::new();
  let component = env.write_file("openssl.json", r#"{"id": "openssl", "version": "3.0.0"}"#);
  let recipes = env.write_file("recipes.toml", ZLIB_RECIPES);

  env
    .smith_cmd()
    .arg("resolve")
    .arg(&component)
    .arg("--recipes")
    .arg(&recipes)
    .assert()
    .failure()
    .stderr(predicate::str::contains("no recipe found in 'openssl'"));
}

#[test]
fn recipe_logic_path_redirects_lookup() {
  let env = TestEnv::new();
  let parsed = resolve_json(
    &env,
    r#"{"id": "libz", "version": "1.2.4", "recipeLogicPath": "zlib"}"#,
    &[],
  );

  assert_eq!(parsed["recipe"], "zlib-legacy");
  assert_eq!(parsed["id"], "libz");
}

#[test]
fn invalid_registry_range_fails() {
  let env = TestEnv::new();
  let component = env.write_file("zlib.json", r#"{"id": "zlib", "version": "1.2.11"}"#);
  let recipes = env.write_file("recipes.toml", "[[recipes.zlib]]\nname = \"broken\"\nrange = \"~banana\"\n");

  env
    .smith_cmd()
    .arg("resolve")
    .arg(&component)
    .arg("--recipes")
    .arg(&recipes)
    .assert()
    .failure()
    .stderr(predicate::str::contains("invalid range for recipe 'zlib'"));
}
