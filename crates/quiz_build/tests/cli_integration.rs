//! Integration tests for the quiz-build binary.

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;

fn tree() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    std::fs::create_dir_all(dir.path().join("guide/_build")).unwrap();
    std::fs::write(dir.path().join("guide/a-quiz-source.md"), "- [x] yes\n- no\n").unwrap();
    std::fs::write(dir.path().join("guide/_build/b-quiz-source.md"), "- no\n").unwrap();
    std::fs::write(dir.path().join("guide/page.md"), "# Page\n").unwrap();
    dir
}

#[test]
fn builds_quiz_outputs() {
    let dir = tree();
    let mut cmd = Command::from(cargo_bin_cmd!("quiz-build"));
    cmd.arg(dir.path());

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("a-quiz.md"))
        .stdout(predicate::str::contains("1 written, 0 failed"));

    let out = std::fs::read_to_string(dir.path().join("guide/a-quiz.md")).unwrap();
    assert!(out.contains("quiz-option-correct"));
    assert!(!dir.path().join("guide/_build/b-quiz.md").exists());
}

#[test]
fn html_flag_and_dry_run() {
    let dir = tree();
    let mut cmd = Command::from(cargo_bin_cmd!("quiz-build"));
    cmd.arg(dir.path()).arg("--html").arg("--dry-run");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("page.html"))
        .stdout(predicate::str::contains("2 to write, 0 failed"));
    assert!(!dir.path().join("guide/page.html").exists());
}

#[test]
fn custom_skip_prefix() {
    let dir = tree();
    let mut cmd = Command::from(cargo_bin_cmd!("quiz-build"));
    cmd.arg(dir.path()).args(["--skip-prefix", "guide"]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("0 written, 0 failed"));
}

#[test]
fn missing_root_fails() {
    let dir = tempfile::tempdir().unwrap();
    let mut cmd = Command::from(cargo_bin_cmd!("quiz-build"));
    cmd.arg(dir.path().join("nope"));

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("failed to scan"));
}
