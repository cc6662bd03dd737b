use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::process::Command;
use tempfile::tempdir;

#[test]
fn doctor_fails_when_config_missing() {
    let tmp = tempdir().unwrap();
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("gwiki"));
    cmd.env("XDG_CONFIG_HOME", tmp.path()); // empty dir → no config
    cmd.arg("doctor");
    cmd.assert()
        .failure()
        .stdout(predicate::str::contains("FAIL gwiki doctor"))
        .stdout(predicate::str::contains("looked for:"));
}

#[test]
fn doctor_rejects_unknown_default_format() {
    let tmp = tempdir().unwrap();
    let cfg = tmp.path().join("config.toml");
    fs::write(
        &cfg,
        r#"
version = 1
[profiles.default]
content_dir = "/tmp/wiki"
default_format = "xml"
"#,
    )
    .unwrap();

    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("gwiki"));
    cmd.args(["--config", cfg.to_str().unwrap(), "doctor"]);
    cmd.assert()
        .failure()
        .stdout(predicate::str::contains("FAIL gwiki doctor"))
        .stdout(predicate::str::contains("xml"));
}

#[test]
fn commands_exit_when_config_missing() {
    let tmp = tempdir().unwrap();
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("gwiki"));
    cmd.env("XDG_CONFIG_HOME", tmp.path());
    cmd.args(["view", "index"]);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Error loading config"));
}
