use proconf_core::manifest::Manifest;
use proconf_core::unit::UnitKind;
use std::path::PathBuf;

fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .parent()
        .unwrap()
        .join("tests/fixtures")
}

#[test]
fn test_parse_distribution_fixture() {
    let path = fixtures_dir().join("distribution.toml");
    let manifest = Manifest::from_path(&path).unwrap();
    assert_eq!(manifest.units.len(), 9);
    assert_eq!(manifest.units[""].kind, UnitKind::Group);
    assert_eq!(manifest.units[""].subdirs, vec!["third", "libs", "app"]);
    assert_eq!(manifest.units["third/Geometry"].kind, UnitKind::ThirdParty);
    assert_eq!(
        manifest.units["app"].depends,
        vec!["libs/Gui/Windows", "third/Geometry"]
    );
}

#[test]
fn test_kind_aliases() {
    let manifest = Manifest::parse_toml(
        r#"
[units.a]
kind = "app"

[units.b]
kind = "lib"

[units.c]
kind = "third"

[units.d]
kind = "subdirs"
"#,
    )
    .unwrap();
    assert_eq!(manifest.units["a"].kind, UnitKind::Application);
    assert_eq!(manifest.units["b"].kind, UnitKind::Library);
    assert_eq!(manifest.units["c"].kind, UnitKind::ThirdParty);
    assert_eq!(manifest.units["d"].kind, UnitKind::Group);
}

#[test]
fn test_optional_lists_default_to_empty() {
    let manifest = Manifest::parse_toml("[units.core]\nkind = \"library\"\n").unwrap();
    let core = &manifest.units["core"];
    assert!(core.depends.is_empty());
    assert!(core.external.is_empty());
    assert!(core.subdirs.is_empty());
}

#[test]
fn test_unknown_field_is_rejected() {
    let path = fixtures_dir().join("unknown-field.toml");
    let err = Manifest::from_path(&path).unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("Manifest error"), "got: {msg}");
    assert!(msg.contains("dependencies"), "got: {msg}");
}

#[test]
fn test_missing_kind_is_rejected() {
    let err = Manifest::parse_toml("[units.core]\ndepends = []\n").unwrap_err();
    assert!(err.to_string().contains("kind"), "got: {err}");
}

#[test]
fn test_missing_file_is_a_manifest_error() {
    let err = Manifest::from_path(&fixtures_dir().join("does-not-exist.toml")).unwrap_err();
    assert!(err.to_string().contains("Failed to read"), "got: {err}");
}

#[test]
fn test_into_registry_sorts_by_id() {
    let manifest = Manifest::parse_toml(
        r#"
[units.zeta]
kind = "library"

[units.alpha]
kind = "library"
depends = ["zeta"]
"#,
    )
    .unwrap();
    let registry = manifest.into_registry();
    let ids: Vec<&str> = registry.iter().map(|(_, u)| u.id.as_str()).collect();
    assert_eq!(ids, vec!["alpha", "zeta"]);
    assert_eq!(registry.unit("alpha").unwrap().depends, vec!["zeta"]);
}
