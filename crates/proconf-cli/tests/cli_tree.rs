use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

#[allow(deprecated)]
fn proconf_cmd() -> Command {
    Command::cargo_bin("proconf").unwrap()
}

const UNITS: &str = r#"
[units.""]
kind = "group"
subdirs = ["libs", "app"]

[units.libs]
kind = "group"
subdirs = ["Core", "Gui"]

[units."libs/Core"]
kind = "library"

[units."libs/Gui"]
kind = "library"
depends = ["libs/Core"]

[units.app]
kind = "application"
depends = ["libs/Gui"]
"#;

#[test]
fn test_tree_shows_hierarchy() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("Units.toml"), UNITS).unwrap();

    proconf_cmd()
        .current_dir(tmp.path())
        .args(["tree"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("<root> (group)\n"))
        .stdout(predicate::str::contains("│   └── Gui (library) after Core"))
        .stdout(predicate::str::contains("└── app (application) after libs"));
}

#[test]
fn test_tree_reports_group_cycle() {
    let tmp = TempDir::new().unwrap();
    fs::write(
        tmp.path().join("Units.toml"),
        r#"
[units.R]
kind = "group"
subdirs = ["G1", "G2"]

[units."R/G1"]
kind = "group"
subdirs = ["X", "W"]

[units."R/G2"]
kind = "group"
subdirs = ["Y", "Z"]

[units."R/G1/X"]
kind = "library"
depends = ["R/G2/Y"]

[units."R/G1/W"]
kind = "library"

[units."R/G2/Y"]
kind = "library"

[units."R/G2/Z"]
kind = "library"
depends = ["R/G1/W"]
"#,
    )
    .unwrap();

    proconf_cmd()
        .current_dir(tmp.path())
        .args(["tree"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("subdirs of group 'R'"));
}
