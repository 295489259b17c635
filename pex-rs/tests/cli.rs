//! CLI integration tests for pex-rs

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn pex() -> Command {
    Command::cargo_bin("pex-rs").unwrap()
}

fn write_template(dir: &TempDir, preset: &str) -> std::path::PathBuf {
    let path = dir.path().join(format!("{preset}.pex"));
    pex()
        .args(["template", "--preset", preset])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote"));
    path
}

#[test]
fn test_help_lists_commands() {
    pex()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("info"))
        .stdout(predicate::str::contains("simulate"))
        .stdout(predicate::str::contains("template"));
}

#[test]
fn test_template_then_info() {
    let dir = TempDir::new().unwrap();
    let path = write_template(&dir, "galaxy");
    assert!(fs::metadata(&path).unwrap().len() > 0);

    pex()
        .arg("info")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("star.png"))
        .stdout(predicate::str::contains("Radial"))
        .stdout(predicate::str::contains("300"));
}

#[test]
fn test_template_refuses_to_overwrite() {
    let dir = TempDir::new().unwrap();
    let path = write_template(&dir, "fire");

    pex()
        .args(["template", "--preset", "fire"])
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("--force"));

    pex()
        .args(["template", "--preset", "galaxy", "--force"])
        .arg(&path)
        .assert()
        .success();
}

#[test]
fn test_template_unknown_preset() {
    let dir = TempDir::new().unwrap();
    pex()
        .args(["template", "--preset", "smoke"])
        .arg(dir.path().join("smoke.pex"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("fire, galaxy"));
}

#[test]
fn test_simulate_reports_summary() {
    let dir = TempDir::new().unwrap();
    let path = write_template(&dir, "fire");

    pex()
        .arg("simulate")
        .arg(&path)
        .args(["--frames", "30", "--seed", "7", "--every", "10"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Summary"))
        .stdout(predicate::str::contains("Peak live"))
        .stdout(predicate::str::contains("fire.png"));
}

#[test]
fn test_simulate_is_reproducible_with_seed() {
    let dir = TempDir::new().unwrap();
    let path = write_template(&dir, "galaxy");

    let run = || {
        pex()
            .arg("simulate")
            .arg(&path)
            .args(["--frames", "20", "--seed", "42"])
            .output()
            .unwrap()
            .stdout
    };
    assert_eq!(run(), run());
}

#[test]
fn test_simulate_rejects_bad_frame_time() {
    let dir = TempDir::new().unwrap();
    let path = write_template(&dir, "fire");

    pex()
        .arg("simulate")
        .arg(&path)
        .args(["--dt", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Frame time"));
}

#[test]
fn test_info_truncated_file() {
    let dir = TempDir::new().unwrap();
    let path = write_template(&dir, "fire");
    let data = fs::read(&path).unwrap();
    fs::write(&path, &data[..50]).unwrap();

    pex()
        .arg("info")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse descriptor"));
}

#[test]
fn test_info_missing_file() {
    pex()
        .args(["info", "does-not-exist.pex"])
        .assert()
        .failure();
}

#[test]
fn test_completions() {
    pex()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("pex-rs"));
}

#[test]
fn test_verbose_flag_enables_debug_logging() {
    let dir = TempDir::new().unwrap();
    let path = write_template(&dir, "fire");

    pex()
        .args(["-vv", "info"])
        .arg(&path)
        .env_remove("RUST_LOG")
        .assert()
        .success()
        .stderr(predicate::str::contains("Descriptor version"));
}

#[test]
fn test_default_logging_is_quiet() {
    let dir = TempDir::new().unwrap();
    let path = write_template(&dir, "fire");

    pex()
        .arg("info")
        .arg(&path)
        .env_remove("RUST_LOG")
        .assert()
        .success()
        .stderr(predicate::str::contains("Descriptor version").not());
}

#[test]
fn test_quiet_overrides_rust_log() {
    let dir = TempDir::new().unwrap();
    let path = write_template(&dir, "fire");

    pex()
        .args(["-q", "info"])
        .arg(&path)
        .env("RUST_LOG", "debug")
        .assert()
        .success()
        .stderr(predicate::str::contains("Descriptor version").not());
}
