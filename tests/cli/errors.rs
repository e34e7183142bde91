//! Tests for error handling and CLI flags.

use crate::support::*;

#[test]
fn test_help() {
    let t = Test::new();

    let output = t.cmd().arg("--help").output().unwrap();
    assert_success(&output);
    assert_stdout_contains(&output, "Usage");
}

#[test]
fn test_unknown_command_fails() {
    let t = Test::new();

    let output = t.cmd().arg("unknown-command").output().unwrap();
    assert_failure(&output);
}

#[test]
fn test_version_flag() {
    let t = Test::new();

    let output = t.cmd().arg("--version").output().unwrap();
    assert_success(&output);
    assert_stdout_contains(&output, env!("CARGO_PKG_VERSION"));
}

#[test]
fn test_error_format_and_exit_code() {
    let t = Test::new();

    let output = t
        .cmd()
        .args(["export", "nobody", "--private"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    assert_stderr_contains(&output, "✗");
    assert_stderr_contains(&output, "sealcast keygen");
}

#[test]
fn test_invalid_config_reports_hint() {
    let t = Test::new();
    t.write(".sealcast.toml", "[cipher]\nparallel_threshold = 0\n");

    let output = t.recipients_list();
    assert_failure(&output);
    assert_stderr_contains(&output, "parallel_threshold");
    assert_stderr_contains(&output, ".sealcast.toml");
}

#[test]
fn test_unparseable_config() {
    let t = Test::new();
    t.write(".sealcast.toml", "this is = = not toml");

    assert_failure(&t.recipients_list());
}

#[test]
fn test_completions() {
    let t = Test::new();

    for shell in ["bash", "zsh", "fish", "powershell"] {
        let output = t.cmd().args(["completions", shell]).output().unwrap();
        assert_success(&output);
        assert_stdout_contains(&output, "sealcast");
    }
}
