//! End-to-end CLI tests for the ghb binary.
//!
//! These run the compiled binary and only cover paths that need no
//! network, no terminal, and no git state: help output and the
//! fail-fast configuration check.

use assert_cmd::Command;
use predicates::prelude::*;

fn ghb() -> Command {
    let mut cmd = Command::cargo_bin("ghb").unwrap_or_else(|e| panic!("binary missing: {e}"));
    cmd.env_remove("GITHUB_TOKEN").env_remove("GITHUB_EMAIL");
    cmd
}

#[test]
fn test_should_print_help_with_subcommands() {
    ghb()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("setup"))
        .stdout(predicate::str::contains("clone"));
}

#[test]
fn test_should_print_version() {
    ghb()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("ghb"));
}

#[test]
fn test_should_exit_4_when_credentials_missing() {
    let dir = tempfile::tempdir().unwrap_or_else(|e| panic!("tempdir: {e}"));

    ghb()
        .arg("setup")
        .arg("widget")
        .current_dir(dir.path())
        .assert()
        .code(4)
        .stderr(predicate::str::contains("configuration error"));
}

#[test]
fn test_should_exit_4_for_default_command_without_credentials() {
    let dir = tempfile::tempdir().unwrap_or_else(|e| panic!("tempdir: {e}"));

    ghb()
        .current_dir(dir.path())
        .assert()
        .code(4);
}
