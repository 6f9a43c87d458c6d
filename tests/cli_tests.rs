//! End-to-end tests for the timerbell CLI.
//!
//! These run the real binary. Audio and notification subsystems are usually
//! absent in test environments; the commands must still exit successfully,
//! because every degraded mode is silent by design.

use std::fs::File;

use assert_cmd::Command;
use predicates::prelude::*;

// ============================================================================
// Test Helpers
// ============================================================================

fn create_sounds_dir(names: &[&str]) -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    for name in names {
        File::create(dir.path().join(name)).unwrap();
    }
    dir
}

fn timerbell() -> Command {
    Command::cargo_bin("timerbell").unwrap()
}

// ============================================================================
// list
// ============================================================================

#[test]
fn test_list_prints_sorted_clips() {
    let dir = create_sounds_dir(&["beep.wav", "alarm.wav", "default.wav"]);

    timerbell()
        .args(["list", "--sounds-dir"])
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::eq("alarm.wav\nbeep.wav\ndefault.wav\n"));
}

#[test]
fn test_list_missing_directory_prints_default() {
    timerbell()
        .args(["list", "--sounds-dir", "/nonexistent/sounds/dir"])
        .assert()
        .success()
        .stdout(predicate::eq("default.wav\n"));
}

// ============================================================================
// ring
// ============================================================================

#[test]
fn test_ring_no_sound_exits_cleanly() {
    let dir = create_sounds_dir(&["default.wav"]);

    timerbell()
        .args(["ring", "--no-sound", "--sounds-dir"])
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("アラームを終了しました"));
}

#[test]
fn test_ring_without_any_clip_degrades_to_silence() {
    let dir = create_sounds_dir(&[]);

    // No clip resolves, so no session starts and the command returns at
    // once instead of erroring.
    timerbell()
        .args(["ring", "--duration", "1", "--sounds-dir"])
        .arg(dir.path())
        .assert()
        .success();
}

#[test]
fn test_ring_rejects_out_of_range_duration() {
    timerbell()
        .args(["ring", "--duration", "0"])
        .assert()
        .failure();

    timerbell()
        .args(["ring", "--duration", "31"])
        .assert()
        .failure();
}

// ============================================================================
// completions / help
// ============================================================================

#[test]
fn test_completions_bash() {
    timerbell()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("timerbell"));
}

#[test]
fn test_no_arguments_shows_help() {
    timerbell()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}
