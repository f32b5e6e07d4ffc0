//! Integration tests for CLI output behavior
//!
//! The default behavior is quiet (no info logs). Use -v/--verbose to enable logs.
//! Every run gets its own HOME so no real session or config is picked up.

use std::path::Path;
use std::process::{Command, Output};

fn run_hostel(home: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_hostel"))
        .current_dir(home)
        .env("HOME", home)
        .env_remove("RUST_LOG")
        .args(args)
        .output()
        .expect("Failed to execute hostel")
}

#[test]
fn test_help_succeeds() {
    let home = tempfile::tempdir().expect("Failed to create temp dir");
    let output = run_hostel(home.path(), &["--help"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("watch"), "help should list 'watch': {}", stdout);
}

#[test]
fn test_completions_generate_script() {
    let home = tempfile::tempdir().expect("Failed to create temp dir");
    let output = run_hostel(home.path(), &["completions", "bash"]);

    assert!(
        output.status.success(),
        "completions failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert!(!output.stdout.is_empty());
}

/// Without a stored session `whoami` fails and says so on stderr.
#[test]
fn test_whoami_without_session_fails() {
    let home = tempfile::tempdir().expect("Failed to create temp dir");
    let output = run_hostel(home.path(), &["whoami"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Not signed in"),
        "Expected sign-in hint in stderr, got: {}",
        stderr
    );
}

/// Quiet mode keeps stdout free of JSON logs and suppresses info events.
#[test]
fn test_quiet_mode_has_no_info_logs() {
    let home = tempfile::tempdir().expect("Failed to create temp dir");
    let output = run_hostel(home.path(), &["whoami"]);

    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(
        !stdout.contains(r#""event":"#),
        "stdout should not contain JSON logs, got: {}",
        stdout
    );
    assert!(
        !stderr.contains(r#""level":"INFO""#),
        "Quiet mode should not emit INFO logs, got: {}",
        stderr
    );
}

/// Verbose mode emits structured lifecycle events on stderr.
#[test]
fn test_verbose_mode_emits_json_logs() {
    let home = tempfile::tempdir().expect("Failed to create temp dir");
    let output = run_hostel(home.path(), &["-v", "whoami"]);

    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(
        stderr.contains("core.app.startup_completed"),
        "Verbose mode should log startup, got: {}",
        stderr
    );
    assert!(
        !stdout.contains(r#""event":"#),
        "Logs must stay off stdout, got: {}",
        stdout
    );
}

#[test]
fn test_show_rejects_unknown_section() {
    let home = tempfile::tempdir().expect("Failed to create temp dir");
    let output = run_hostel(home.path(), &["show", "bookings"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("bookings"), "got: {}", stderr);
}

/// Bad enum input is refused before the session gate or any request.
#[test]
fn test_pay_rejects_unknown_method() {
    let home = tempfile::tempdir().expect("Failed to create temp dir");
    let output = run_hostel(home.path(), &["pay", "1", "--method", "BITCOIN"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        !stderr.contains("Not signed in"),
        "Method should be checked before the session, got: {}",
        stderr
    );
}

#[test]
fn test_food_rejects_malformed_date() {
    let home = tempfile::tempdir().expect("Failed to create temp dir");
    let output = run_hostel(home.path(), &["food", "--date", "01/06/2024"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Invalid date"), "got: {}", stderr);
}

/// Without a terminal the password comes from stdin and is never echoed back.
#[test]
fn test_login_reads_piped_password() {
    use std::io::Write;
    use std::process::Stdio;

    let home = tempfile::tempdir().expect("Failed to create temp dir");
    let mut child = Command::new(env!("CARGO_BIN_EXE_hostel"))
        .current_dir(home.path())
        .env("HOME", home.path())
        .env_remove("RUST_LOG")
        .args(["--base-url", "http://127.0.0.1:9/api", "login", "warden"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to spawn hostel");
    child
        .stdin
        .take()
        .expect("stdin is piped")
        .write_all(b"s3cret\n")
        .expect("Failed to write password");
    let output = child.wait_with_output().expect("Failed to wait for hostel");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Login failed"), "got: {}", stderr);
    assert!(!stderr.contains("s3cret"));
    assert!(!String::from_utf8_lossy(&output.stdout).contains("s3cret"));
}
