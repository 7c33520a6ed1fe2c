//! CLI integration tests

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// The binary with its config directory pointed at `home`
fn clipctl_bin(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("clipctl").expect("binary should build");
    cmd.env("HOME", home)
        .env("XDG_CONFIG_HOME", home.join(".config"))
        .env("APPDATA", home.join("AppData"))
        .env_remove("CLIPCTL_BACKEND")
        .env_remove("CLIPCTL_RENDERER")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn help_output() {
    let home = TempDir::new().unwrap();
    clipctl_bin(home.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("clipboard"))
        .stdout(predicate::str::contains("copy"))
        .stdout(predicate::str::contains("copy-file"))
        .stdout(predicate::str::contains("paste"))
        .stdout(predicate::str::contains("files"))
        .stdout(predicate::str::contains("recent"))
        .stdout(predicate::str::contains("--backend"));
}

#[test]
fn version_output() {
    let home = TempDir::new().unwrap();
    clipctl_bin(home.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("clipctl"))
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn copy_file_help_mentions_markdown() {
    let home = TempDir::new().unwrap();
    clipctl_bin(home.path())
        .args(["cf", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--markdown"));
}

#[test]
fn config_path_command() {
    let home = TempDir::new().unwrap();
    clipctl_bin(home.path())
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("clipctl"))
        .stdout(predicate::str::contains("config.toml"));
}

#[test]
fn config_help() {
    let home = TempDir::new().unwrap();
    clipctl_bin(home.path())
        .args(["config", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("init"))
        .stdout(predicate::str::contains("set"))
        .stdout(predicate::str::contains("get"))
        .stdout(predicate::str::contains("list"))
        .stdout(predicate::str::contains("path"));
}

#[test]
fn config_set_then_get() {
    let home = TempDir::new().unwrap();
    clipctl_bin(home.path())
        .args(["config", "set", "recent.dirs", "/a,/b"])
        .assert()
        .success();

    clipctl_bin(home.path())
        .args(["config", "get", "recent.dirs"])
        .assert()
        .success()
        .stdout("/a,/b\n");

    clipctl_bin(home.path())
        .args(["config", "get", "renderer"])
        .assert()
        .success()
        .stdout("(not set)\n");
}

#[test]
fn config_init_then_list() {
    let home = TempDir::new().unwrap();
    clipctl_bin(home.path())
        .args(["config", "init"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Config file created"));

    clipctl_bin(home.path())
        .args(["config", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("auto"))
        .stdout(predicate::str::contains("builtin"))
        .stdout(predicate::str::contains("5m"));
}

#[test]
fn recent_invalid_duration_is_usage_error() {
    let home = TempDir::new().unwrap();
    clipctl_bin(home.path())
        .args(["recent", "soon", "--print", "--dir"])
        .arg(home.path())
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Invalid duration"));
}

#[test]
fn recent_negative_minutes_is_usage_error() {
    let home = TempDir::new().unwrap();
    clipctl_bin(home.path())
        .args(["recent", "--print", "--", "-5"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Invalid duration"));
}

/// Write `content` to the config file the binary will read
fn write_config(home: &Path, content: &str) {
    let output = clipctl_bin(home).args(["config", "path"]).output().unwrap();
    let path = String::from_utf8(output.stdout).unwrap();
    let path = Path::new(path.trim());
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

#[test]
fn recent_negative_duration_in_config_is_usage_error() {
    let home = TempDir::new().unwrap();
    write_config(home.path(), "[recent]\nduration = \"-5\"\n");

    clipctl_bin(home.path())
        .args(["recent", "--print", "--dir"])
        .arg(home.path())
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Invalid duration"))
        .stderr(predicate::str::contains("-5"));
}

#[test]
fn unreadable_config_is_reported() {
    let home = TempDir::new().unwrap();
    write_config(home.path(), "backend = [");

    clipctl_bin(home.path())
        .args(["config", "path"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Ignoring config file"));
}

#[test]
fn recent_print_lists_new_visible_files() {
    let home = TempDir::new().unwrap();
    let drop = home.path().join("drop");
    fs::create_dir(&drop).unwrap();
    fs::write(drop.join("report.pdf"), b"%PDF-1.4").unwrap();
    fs::write(drop.join(".hidden"), b"x").unwrap();
    fs::create_dir(drop.join("subdir")).unwrap();

    clipctl_bin(home.path())
        .args(["recent", "10", "--print", "--dir"])
        .arg(&drop)
        .assert()
        .success()
        .stdout(predicate::str::contains("report.pdf"))
        .stdout(predicate::str::contains(".hidden").not())
        .stdout(predicate::str::contains("subdir").not());
}

#[test]
fn recent_empty_directory_fails() {
    let home = TempDir::new().unwrap();
    let empty = home.path().join("empty");
    fs::create_dir(&empty).unwrap();

    clipctl_bin(home.path())
        .args(["recent", "--print", "--dir"])
        .arg(&empty)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("No files modified"));
}

#[test]
fn invalid_backend_is_usage_error() {
    let home = TempDir::new().unwrap();
    clipctl_bin(home.path())
        .args(["--backend", "x11", "paste"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Invalid backend"));
}

#[test]
fn invalid_renderer_from_env_is_usage_error() {
    let home = TempDir::new().unwrap();
    clipctl_bin(home.path())
        .env("CLIPCTL_RENDERER", "word")
        .args(["copy", "-m", "# hi"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Invalid renderer"));
}

#[test]
fn copy_file_missing_path_fails() {
    let home = TempDir::new().unwrap();
    clipctl_bin(home.path())
        .args(["--backend", "native", "copy-file"])
        .arg(home.path().join("missing.txt"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("File not found"));
}

#[test]
fn unknown_subcommand_is_usage_error() {
    let home = TempDir::new().unwrap();
    clipctl_bin(home.path()).arg("yank").assert().code(2);
}
