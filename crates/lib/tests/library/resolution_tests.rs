//! Component resolution against a registry loaded from disk.

use blacksmith_lib::config::{load_component, load_registry};
use blacksmith_lib::recipe::ResolveError;
use blacksmith_lib::{ComponentResolver, Requirements};
use tempfile::TempDir;

const RECIPES: &str = r#"
[[recipes.openssl]]
name = "openssl-1.1"
range = ">=1.1.0 <1.2.0"

[[recipes.openssl]]
name = "openssl-3"
range = "^3.0.0"
"#;

fn resolver(temp: &TempDir) -> ComponentResolver {
  let path = temp.path().join("recipes.toml");
  std::fs::write(&path, RECIPES).unwrap();
  ComponentResolver::new(load_registry(&path).unwrap())
}

#[test]
fn descriptor_from_disk_resolves() {
  let temp = TempDir::new().unwrap();
  let path = temp.path().join("openssl.json");
  std::fs::write(
    &path,
    r#"{
      "id": "openssl",
      "version": "1.1.1k",
      "source": {"tarball": "openssl-1.1.1k.tar.gz"},
      "patches": ["no-docs.patch"]
    }"#,
  )
  .unwrap();

  let data = load_component(&path).unwrap();
  let component = resolver(&temp).get_component(&data, None).unwrap();

  assert_eq!(component.recipe(), "openssl-1.1");
  assert_eq!(component.version(), "1.1.1k");
  assert_eq!(component.source().tarball.as_deref(), Some("openssl-1.1.1k.tar.gz"));
  assert_eq!(component.patches(), ["no-docs.patch".to_string()]);
}

#[test]
fn requirement_outside_every_variant_is_not_found() {
  let temp = TempDir::new().unwrap();
  let resolver = resolver(&temp);
  let data = blacksmith_lib::ComponentData::new("openssl", "1.0.2");

  let err = resolver
    .get_component(&data, Some(&Requirements::version(">=1.0.0")))
    .unwrap_err();
  assert!(matches!(err, ResolveError::RecipeNotFound { .. }));
}
