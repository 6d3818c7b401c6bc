//! CLI argument and setup error tests - no network I/O.
//!
//! These tests verify that bad invocations fail before any cassette or live
//! adapter is consulted.

use assert_cmd::Command;
use predicates::prelude::*;

fn cmd() -> Command {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("realpix");
    cmd.env("REALPIX_CONFIG", "/nonexistent/realpix/config.toml")
        .env_remove("REALPIX_REPLAY")
        .env_remove("REALPIX_REC")
        .env_remove("STABILITY_API_KEY")
        .current_dir(std::env::temp_dir());
    cmd
}

#[test]
fn missing_prompt_exits_with_error() {
    cmd().assert().failure().stderr(predicate::str::contains("Provide a prompt string"));
}

#[test]
fn missing_api_key_exits_with_error() {
    cmd()
        .arg("a cat")
        .assert()
        .failure()
        .stderr(predicate::str::contains("No API key for Stability"))
        .stderr(predicate::str::contains("STABILITY_API_KEY"));
}

#[test]
fn invalid_config_exits_with_error() {
    let dir = std::env::temp_dir().join("realpix_cli_bad_config");
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("config.toml");
    std::fs::write(&path, "[api\nengine = ").unwrap();

    cmd()
        .env("REALPIX_CONFIG", path.to_str().unwrap())
        .arg("a cat")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse config"));

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn download_and_no_download_conflict() {
    cmd()
        .args(["--download", "0", "--no-download", "a cat"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot be used with"));
}

#[test]
fn help_lists_modes() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--interactive"))
        .stdout(predicate::str::contains("--no-download"));
}
