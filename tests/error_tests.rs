//! Error scenario integration tests

use std::path::Path;
use std::process::{Command, Output};

use tempfile::TempDir;

fn clipctl(home: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_clipctl"))
        .env("HOME", home)
        .env("XDG_CONFIG_HOME", home.join(".config"))
        .env("APPDATA", home.join("AppData"))
        .env_remove("CLIPCTL_BACKEND")
        .env_remove("CLIPCTL_RENDERER")
        .args(args)
        .output()
        .expect("Failed to execute command")
}

fn assert_fails_with(output: &Output, needle: &str) {
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains(needle),
        "Expected '{}' in stderr, got: {}",
        needle,
        stderr
    );
}

#[test]
fn config_get_unknown_key() {
    let home = TempDir::new().unwrap();
    let output = clipctl(home.path(), &["config", "get", "api_key"]);
    assert_fails_with(&output, "Unknown key");
}

#[test]
fn config_set_invalid_backend() {
    let home = TempDir::new().unwrap();
    let output = clipctl(home.path(), &["config", "set", "backend", "x11"]);
    assert_fails_with(&output, "Valid options");
}

#[test]
fn config_set_invalid_duration() {
    let home = TempDir::new().unwrap();
    let output = clipctl(home.path(), &["config", "set", "recent.duration", "--", "-2h"]);
    assert_fails_with(&output, "Invalid duration");
}

#[test]
fn config_set_zero_limit() {
    let home = TempDir::new().unwrap();
    let output = clipctl(home.path(), &["config", "set", "recent.limit", "0"]);
    assert_fails_with(&output, "positive integer");
}

#[test]
fn config_set_invalid_bool() {
    let home = TempDir::new().unwrap();
    let output = clipctl(home.path(), &["config", "set", "verbose", "maybe"]);
    assert_fails_with(&output, "'true' or 'false'");
}

#[test]
fn config_init_twice() {
    let home = TempDir::new().unwrap();
    let first = clipctl(home.path(), &["config", "init"]);
    assert!(first.status.success());

    let second = clipctl(home.path(), &["config", "init"]);
    assert_fails_with(&second, "already exists");
}

#[test]
fn recent_zero_limit_is_usage_error() {
    let home = TempDir::new().unwrap();
    let dir = home.path().to_string_lossy().to_string();
    let output = clipctl(home.path(), &["recent", "--print", "--dir", &dir, "--limit", "0"]);
    assert_eq!(output.status.code(), Some(2));
}
