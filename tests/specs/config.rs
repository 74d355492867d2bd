//! Behavioral specs for configuration discovery and validation.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use crate::prelude::*;

/// > Unknown keys are warnings (forward compatibility)
#[test]
fn unknown_config_key_warns() {
    let temp = Project::dump();
    temp.config("unknown_key = true\n");

    report()
        .pwd(temp.path())
        .runs()
        .stderr_has("unrecognized field `unknown_key`");
}

/// > Unknown nested keys are warnings
#[test]
fn unknown_nested_config_key_warns() {
    let temp = Project::dump();
    temp.config("[serve]\nport = 9000\n");

    report()
        .pwd(temp.path())
        .runs()
        .stderr_has("unrecognized field `serve.port`");
}

/// > Valid config produces no warnings
#[test]
fn valid_config_no_warnings() {
    report()
        .on("dump")
        .runs()
        .stderr_lacks("warning");
}

/// > Config is discovered from a parent directory
#[test]
fn config_discovered_from_subdirectory() {
    let temp = Project::empty();
    std::fs::create_dir(temp.path().join(".git")).unwrap();
    temp.config(&format!(
        "[artifacts]\nroot = {:?}\n",
        fixture("dump").to_str().unwrap()
    ));
    temp.file("nested/deeper/.keep", "");

    report()
        .pwd(temp.path().join("nested/deeper"))
        .runs()
        .stdout_has("e2e (results_dump_e2e.yaml)");
}

/// > -C <FILE> specifies the config file
#[test]
fn explicit_config_flag() {
    let config = fixture("configured").join("sonoview.toml");
    let temp = Project::empty();

    report()
        .pwd(temp.path())
        .args(["-C", config.to_str().unwrap()])
        .runs()
        .stdout_has("e2e (plugins/e2e.yaml)");
}

/// > SONOVIEW_CONFIG sets the config file location
#[test]
fn env_config_sets_path() {
    let config = fixture("configured").join("sonoview.toml");
    let temp = Project::empty();

    sonoview_cmd()
        .arg("report")
        .current_dir(temp.path())
        .env("SONOVIEW_CONFIG", config.to_str().unwrap())
        .assert()
        .success()
        .stdout(predicates::str::contains("Cluster (cluster.yaml)"));
}

/// > A missing explicit config file is a config error
#[test]
fn missing_explicit_config_exits_2() {
    let temp = Project::empty();
    report()
        .pwd(temp.path())
        .args(["-C", "nope.toml"])
        .exits(2)
        .stderr_has("config file not found");
}

/// > A config path that cannot be read is a config error
#[test]
fn unreadable_explicit_config_exits_2() {
    let temp = Project::empty();
    report()
        .pwd(temp.path())
        .args(["-C", temp.path().to_str().unwrap()])
        .exits(2)
        .stderr_has("failed to read config");
}
