//! Integration tests for CLI functionality

use predicates::prelude::*;
use std::process::Command;
use tempfile::TempDir;

/// Get path to compiled binary
fn dwcctl_bin() -> &'static std::path::Path {
    assert_cmd::cargo::cargo_bin!("dwcctl")
}

/// Command with an isolated settings location
fn dwcctl(dir: &TempDir) -> assert_cmd::Command {
    let mut cmd = assert_cmd::Command::new(dwcctl_bin());
    cmd.env_remove("DWCCTL_CONFIG")
        .env("HOME", dir.path())
        .arg("--config")
        .arg(dir.path().join("settings.json"));
    cmd
}

/// Test that help flag works
#[test]
fn test_help_flag() {
    let output = Command::new(dwcctl_bin()).arg("--help").output().unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Provision workspaces, members, connections and shares"));
    assert!(stdout.contains("spaces"));
    assert!(stdout.contains("script"));
}

/// Test that version flag works
#[test]
fn test_version_flag() {
    let output = Command::new(dwcctl_bin()).arg("--version").output().unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("dwcctl"));
}

/// Test invalid output format argument
#[test]
fn test_invalid_output_format() {
    let output = Command::new(dwcctl_bin())
        .args(["-o", "invalid", "spaces", "list"])
        .output()
        .unwrap();

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("invalid"));
}

#[test]
fn test_missing_subcommand_fails() {
    let output = Command::new(dwcctl_bin()).output().unwrap();
    assert!(!output.status.success());
}

#[test]
fn test_config_writes_settings_without_plain_password() {
    let dir = TempDir::new().unwrap();

    dwcctl(&dir)
        .args([
            "config",
            "--url",
            "https://acme.eu10.hcs.cloud.sap/",
            "--user",
            "ADMIN",
            "--password",
            "s3cret-value",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Saved settings"));

    let written = std::fs::read_to_string(dir.path().join("settings.json")).unwrap();
    assert!(written.contains("https://acme.eu10.hcs.cloud.sap"));
    assert!(written.contains("ADMIN"));
    assert!(!written.contains("s3cret-value"));
}

#[test]
fn test_config_show_masks_password() {
    let dir = TempDir::new().unwrap();

    dwcctl(&dir)
        .args(["config", "--user", "ADMIN", "--password", "s3cret-value"])
        .assert()
        .success();

    dwcctl(&dir)
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("ADMIN"))
        .stdout(predicate::str::contains("****"))
        .stdout(predicate::str::contains("s3cret-value").not());
}

#[test]
fn test_missing_settings_fails() {
    let dir = TempDir::new().unwrap();

    dwcctl(&dir)
        .args(["spaces", "list"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn test_incomplete_settings_fails() {
    let dir = TempDir::new().unwrap();

    dwcctl(&dir)
        .args(["config", "--user", "ADMIN"])
        .assert()
        .success();

    dwcctl(&dir)
        .args(["users", "list"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Missing 'url' setting"));
}

#[test]
fn test_missing_script_fails_before_login() {
    let dir = TempDir::new().unwrap();

    dwcctl(&dir)
        .args(["script", "no-such-script.txt"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("cannot read script"));
}
