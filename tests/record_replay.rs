//! Cassette replay integration tests - zero network I/O.
//!
//! All tests set `REALPIX_REPLAY` to a cassette file path so that the binary
//! never contacts a live API endpoint.

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;

fn cmd(cassette: &str) -> Command {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("realpix");
    cmd.env("REALPIX_REPLAY", fixtures_dir().join(cassette).to_str().unwrap())
        .env("REALPIX_CONFIG", "/nonexistent/realpix/config.toml")
        .env_remove("REALPIX_REC")
        .env_remove("STABILITY_API_KEY")
        .current_dir(std::env::temp_dir());
    cmd
}

/// Absolute path to the `test_fixtures` directory.
fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("test_fixtures")
}

/// A fresh, empty download directory.
fn out_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(name);
    let _ = std::fs::remove_dir_all(&dir);
    dir
}

fn saved_files(dir: &Path) -> Vec<String> {
    let Ok(entries) = std::fs::read_dir(dir) else { return Vec::new() };
    let mut names: Vec<String> =
        entries.flatten().map(|e| e.file_name().to_string_lossy().into_owned()).collect();
    names.sort();
    names
}

#[test]
fn happy_path_downloads_every_tile() {
    let out = out_dir("realpix_replay_happy");

    cmd("stability_cat.cassette.yaml")
        .args(["--output-dir", out.to_str().unwrap(), "a cat"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[0] AI Generated 1"))
        .stdout(predicate::str::contains("[1] AI Generated 2"))
        .stderr(predicate::str::contains("Saved:"));

    assert_eq!(saved_files(&out), ["generated-image-0.png", "generated-image-1.png"]);
    let data = std::fs::read(out.join("generated-image-0.png")).unwrap();
    assert_eq!(&data[..8], &[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A]);

    let _ = std::fs::remove_dir_all(&out);
}

#[test]
fn download_flag_selects_tiles() {
    let out = out_dir("realpix_replay_select");

    cmd("stability_cat.cassette.yaml")
        .args(["-o", out.to_str().unwrap(), "-d", "1", "a cat"])
        .assert()
        .success();

    assert_eq!(saved_files(&out), ["generated-image-1.png"]);

    let _ = std::fs::remove_dir_all(&out);
}

#[test]
fn no_download_only_renders() {
    let out = out_dir("realpix_replay_no_download");

    cmd("stability_cat.cassette.yaml")
        .args(["-o", out.to_str().unwrap(), "--no-download", "a cat"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[Download]"))
        .stderr(predicate::str::contains("Saved:").not());

    assert!(saved_files(&out).is_empty());
}

#[test]
fn out_of_range_download_fails() {
    let out = out_dir("realpix_replay_out_of_range");

    cmd("stability_cat.cassette.yaml")
        .args(["-o", out.to_str().unwrap(), "-d", "5", "a cat"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to download image. Please try again."));

    assert!(saved_files(&out).is_empty());
}

#[test]
fn malformed_response_alerts_and_saves_nothing() {
    let out = out_dir("realpix_replay_malformed");

    cmd("stability_malformed.cassette.yaml")
        .args(["-o", out.to_str().unwrap(), "a cat"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("[Download]").not())
        .stderr(predicate::str::contains("Failed to generate images. Please try again."));

    assert!(saved_files(&out).is_empty());
}

#[test]
fn unauthorized_response_alerts() {
    cmd("stability_unauthorized.cassette.yaml")
        .args(["--no-download", "a cat"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to generate images. Please try again."));
}

#[test]
fn blank_prompt_is_silent_noop() {
    let out = out_dir("realpix_replay_blank");

    cmd("stability_cat.cassette.yaml")
        .args(["-o", out.to_str().unwrap(), "   "])
        .assert()
        .success()
        .stdout(predicate::str::contains("[ Generate ]"))
        .stdout(predicate::str::contains("[Download]").not())
        .stderr(predicate::str::contains("Failed").not());

    assert!(saved_files(&out).is_empty());
}

#[test]
fn interactive_generates_from_stdin() {
    let out = out_dir("realpix_replay_interactive");

    cmd("stability_cat.cassette.yaml")
        .args(["--interactive", "-o", out.to_str().unwrap()])
        .write_stdin("/d 0\na cat\n/generate\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("> a cat"))
        .stdout(predicate::str::contains("[1] AI Generated 2"))
        .stderr(predicate::str::contains("Failed to download image. Please try again."));

    assert!(saved_files(&out).is_empty());
}
