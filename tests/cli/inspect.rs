//! Tests for `sealcast inspect`.

use crate::support::*;

#[test]
fn test_inspect_lists_recipients() {
    let t = Test::with_identities(&["alice", "bob"]);
    let envelope = envelope_of(&t.encrypt("alice", &["--to", "bob"], MESSAGE));

    let output = t.inspect(&envelope);
    assert_success(&output);
    assert_stdout_contains(&output, "2 recipients");
    assert_stdout_contains(&output, "alice");
    assert_stdout_contains(&output, "bob");
    assert_stdout_contains(&output, &format!("{} bytes", MESSAGE.len()));
    assert_stdout_excludes(&output, MESSAGE);
}

#[test]
fn test_inspect_needs_no_keys() {
    let t = Test::with_identities(&["alice"]);
    let envelope = envelope_of(&t.encrypt("alice", &[], MESSAGE));

    let stranger = Test::new();
    let output = stranger.inspect(&envelope);
    assert_success(&output);
    assert_stdout_contains(&output, "alice");
}

#[test]
fn test_inspect_rejects_malformed() {
    let t = Test::new();

    let output = t.inspect("{\"iv\":1}");
    assert_failure(&output);
    assert_stderr_contains(&output, "malformed envelope");
}

#[test]
fn test_inspect_rejects_key_file_input() {
    let t = Test::with_identities(&["alice"]);
    let public = stdout(&t.export("alice"));

    let output = t.inspect(&public);
    assert_failure(&output);
    assert_stderr_contains(&output, "not an envelope");
    assert!(output.stdout.is_empty());
}
