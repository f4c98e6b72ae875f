//! Integration tests for CLI argument handling
//!
//! These run the binary without a helm installation, so they only cover
//! the surface that fails (or prints help) before any helm invocation.

use std::process::Command;

/// Helper to run the reckoner binary
fn reckoner(args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_reckoner"))
        .args(args)
        .output()
        .expect("Failed to execute reckoner")
}

#[test]
fn test_help_lists_export() {
    let output = reckoner(&["--help"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("export"));
}

#[test]
fn test_export_help_documents_flags() {
    let output = reckoner(&["export", "--help"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("--ignore-repo"));
    assert!(stdout.contains("--helm-arg"));
    assert!(stdout.contains("--timeout"));
}

#[test]
fn test_export_requires_namespace() {
    let output = reckoner(&["export"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("NAMESPACE") || stderr.contains("namespace"));
}

#[test]
fn test_unknown_subcommand_fails() {
    let output = reckoner(&["import"]);
    assert!(!output.status.success());
}
