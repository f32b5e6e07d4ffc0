//! Integration tests for config warning behavior.
//!
//! These tests verify that the CLI warns when config files have errors.

use std::fs;
use std::process::Command;

/// Note: `whoami` is used because it loads config before reading the session.
fn run_whoami_with_config(contents: &str) -> String {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
    let config_dir = temp_dir.path().join(".hostel");
    fs::create_dir_all(&config_dir).expect("Failed to create .hostel dir");
    fs::write(config_dir.join("config.toml"), contents).expect("Failed to write config");

    // Fails because nobody is signed in; the config warning comes first.
    let output = Command::new(env!("CARGO_BIN_EXE_hostel"))
        .current_dir(temp_dir.path())
        .env("HOME", temp_dir.path())
        .env_remove("RUST_LOG")
        .arg("whoami")
        .output()
        .expect("Failed to execute hostel");

    String::from_utf8_lossy(&output.stderr).to_string()
}

#[test]
fn test_config_warning_on_invalid_toml() {
    let stderr = run_whoami_with_config("invalid toml [[[");

    assert!(
        stderr.contains("Warning: Could not load config"),
        "Expected warning in stderr, got: {}",
        stderr
    );
    assert!(
        stderr.contains("Tip: Check"),
        "Expected tip about config files in stderr, got: {}",
        stderr
    );
}

#[test]
fn test_no_warning_on_valid_config() {
    let stderr = run_whoami_with_config(
        r#"
[refresh]
interval_secs = 15
initial_section = "rooms"
"#,
    );

    assert!(
        !stderr.contains("Warning: Could not load config"),
        "Unexpected config warning in stderr: {}",
        stderr
    );
}
