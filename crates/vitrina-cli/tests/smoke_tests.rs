//! Smoke tests for the vitrina CLI

#![allow(deprecated)] // Command::cargo_bin
#![allow(clippy::expect_used, clippy::unwrap_used)]

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

const ENV_OVERRIDES: [&str; 6] = [
    "VITRINA_BASE_URL",
    "VITRINA_API_URL",
    "VITRINA_MAX_PAGES",
    "VITRINA_HEADLESS",
    "VITRINA_CHROMIUM_PATH",
    "VITRINA_CONFIG",
];

/// The binary with a clean environment and no colors
fn vitrina() -> Command {
    let mut cmd = Command::cargo_bin("vitrina").expect("vitrina binary should exist");
    for key in ENV_OVERRIDES {
        cmd.env_remove(key);
    }
    cmd.env_remove("RUST_LOG").arg("--color").arg("never");
    cmd
}

// ============================================================================
// Basic CLI Tests
// ============================================================================

#[test]
fn test_version_flag() {
    vitrina()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("0.4.0"));
}

#[test]
fn test_help_flag() {
    vitrina()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("api"))
        .stdout(predicate::str::contains("config"))
        .stdout(predicate::str::contains("--log-format"));
}

#[test]
fn test_no_args_fails() {
    vitrina().assert().failure();
}

#[test]
fn test_api_subcommand_help() {
    vitrina()
        .args(["api", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--base-url"));
}

// ============================================================================
// Config Tests
// ============================================================================

#[test]
fn test_config_show_prints_yaml() {
    vitrina()
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("practicesoftwaretesting.com"))
        .stdout(predicate::str::contains("restful-booker.herokuapp.com"));
}

#[test]
fn test_config_show_applies_env_overrides() {
    vitrina()
        .env("VITRINA_MAX_PAGES", "3")
        .args(["--json", "config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"max_pages\": 3"));
}

#[test]
fn test_config_show_rejects_bad_env_value() {
    vitrina()
        .env("VITRINA_MAX_PAGES", "lots")
        .args(["config", "show"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("VITRINA_MAX_PAGES"));
}

#[test]
fn test_config_init_then_load() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("suite.yaml");

    vitrina()
        .args(["config", "init"])
        .arg(&path)
        .assert()
        .success();
    assert!(fs::read_to_string(&path).unwrap().contains("pagination:"));

    vitrina()
        .arg("--config")
        .arg(&path)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("max_response_ms: 1500"));

    vitrina()
        .args(["config", "init"])
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("--force"));
}

#[test]
fn test_missing_config_file() {
    vitrina()
        .args(["--config", "/nonexistent/vitrina.yaml", "config", "show"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("config file not found"));
}

// ============================================================================
// API Runner Tests
// ============================================================================

#[test]
fn test_api_unreachable_host_fails_health() {
    vitrina()
        .args(["api", "--base-url", "http://127.0.0.1:9"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("FAIL health"))
        .stderr(predicate::str::contains("1 of 1 scenarios failed"));
}

#[test]
fn test_api_json_output() {
    let output = vitrina()
        .args(["--json", "api", "--base-url", "http://127.0.0.1:9"])
        .assert()
        .failure()
        .get_output()
        .stdout
        .clone();
    let json: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(json["results"][0]["name"], "health");
    assert_eq!(json["results"][0]["passed"], false);
}
