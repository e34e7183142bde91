//! Tests for `sealcast encrypt`.

use crate::support::*;

#[test]
fn test_encrypt_prints_envelope() {
    let t = Test::with_identities(&["alice"]);

    let output = t.encrypt("alice", &[], MESSAGE);
    let envelope = envelope_of(&output);

    let value: serde_json::Value = serde_json::from_str(&envelope).expect("valid JSON");
    assert!(value["iv"].is_string());
    assert!(value["content"].is_string());
    assert!(value["keys"]["alice"].is_string());
    assert!(!envelope.contains(MESSAGE));
}

#[test]
fn test_encrypt_includes_key_file_recipient() {
    let t = Test::with_identities(&["alice", "bob"]);
    let bob_key = t.export_to_file("bob");

    let arg = format!("bob={}", bob_key.display());
    let envelope = envelope_of(&t.encrypt("alice", &["--to", &arg], MESSAGE));

    let value: serde_json::Value = serde_json::from_str(&envelope).unwrap();
    let keys = value["keys"].as_object().unwrap();
    assert_eq!(keys.len(), 2);
    assert!(keys.contains_key("alice"));
    assert!(keys.contains_key("bob"));
}

#[test]
fn test_encrypt_no_self() {
    let t = Test::with_identities(&["alice", "bob"]);

    let envelope = envelope_of(&t.encrypt("alice", &["--to", "bob", "--no-self"], MESSAGE));

    let value: serde_json::Value = serde_json::from_str(&envelope).unwrap();
    let keys = value["keys"].as_object().unwrap();
    assert_eq!(keys.len(), 1);
    assert!(keys.contains_key("bob"));
}

#[test]
fn test_encrypt_resolves_address_book() {
    let t = Test::with_identities(&["alice", "bob"]);
    let bob_key = t.export_to_file("bob");
    assert_success(&t.recipients_add("robert", &bob_key));

    let envelope = envelope_of(&t.encrypt("alice", &["--to", "robert"], MESSAGE));

    let output = t.inspect(&envelope);
    assert_success(&output);
    assert_stdout_contains(&output, "robert");
}

#[test]
fn test_encrypt_reads_input_file() {
    let t = Test::with_identities(&["alice"]);
    let input = t.write("message.txt", MESSAGE);

    let output = t
        .cmd()
        .args(["encrypt", "--as", "alice", "--input"])
        .arg(&input)
        .output()
        .unwrap();
    let envelope = envelope_of(&output);

    let output = t.decrypt("alice", &envelope);
    assert_success(&output);
    assert_stdout_contains(&output, MESSAGE);
}

#[test]
fn test_encrypt_reads_stdin() {
    let t = Test::with_identities(&["alice"]);

    let output = t
        .cmd()
        .args(["encrypt", "--as", "alice"])
        .write_stdin(MESSAGE)
        .output()
        .unwrap();
    let envelope = envelope_of(&output);

    assert_stdout_contains(&t.decrypt("alice", &envelope), MESSAGE);
}

#[test]
fn test_encrypt_best_effort_skips_bad_key() {
    let t = Test::with_identities(&["alice"]);
    let bad = t.write("mallory.jwk", INVALID_PUBLIC_KEY);

    let arg = format!("mallory={}", bad.display());
    let output = t.encrypt("alice", &["--to", &arg], MESSAGE);
    let envelope = envelope_of(&output);
    assert_stderr_contains(&output, "excluded");

    let value: serde_json::Value = serde_json::from_str(&envelope).unwrap();
    assert!(value["keys"].get("mallory").is_none());
    assert!(value["keys"].get("alice").is_some());
}

#[test]
fn test_encrypt_sender_named_twice_is_not_excluded() {
    let t = Test::with_identities(&["alice"]);

    let output = t.encrypt("alice", &["--to", "alice"], MESSAGE);
    let envelope = envelope_of(&output);
    assert!(
        !stderr(&output).contains("excluded"),
        "unexpected warning: {}",
        stderr(&output)
    );

    let value: serde_json::Value = serde_json::from_str(&envelope).unwrap();
    assert_eq!(value["keys"].as_object().unwrap().len(), 1);
    assert_stdout_contains(&t.decrypt("alice", &envelope), MESSAGE);
}

#[test]
fn test_encrypt_strict_fails_on_bad_key() {
    let t = Test::with_identities(&["alice"]);
    let bad = t.write("mallory.jwk", EC_JWK);

    let arg = format!("mallory={}", bad.display());
    let output = t.encrypt("alice", &["--strict", "--to", &arg], MESSAGE);
    assert_failure(&output);
    assert_stderr_contains(&output, "mallory");
    assert!(output.stdout.is_empty());
}

#[test]
fn test_encrypt_strict_from_config() {
    let t = Test::with_identities(&["alice"]);
    t.write(".sealcast.toml", "[cipher]\npolicy = \"strict\"\n");
    let bad = t.write("mallory.jwk", INVALID_PUBLIC_KEY);

    let arg = format!("mallory={}", bad.display());
    assert_failure(&t.encrypt("alice", &["--to", &arg], MESSAGE));
}

#[test]
fn test_encrypt_unknown_recipient_fails() {
    let t = Test::with_identities(&["alice"]);

    let output = t.encrypt("alice", &["--to", "nobody"], MESSAGE);
    assert_failure(&output);
    assert_stderr_contains(&output, "nobody");
}

#[test]
fn test_encrypt_explicit_sender_without_key_fails() {
    let t = Test::new();

    let output = t.encrypt("ghost", &[], MESSAGE);
    assert_failure(&output);
    assert_stderr_contains(&output, "ghost");
}

#[test]
fn test_encrypt_without_recipients_warns() {
    let t = Test::new();

    let output = t.encrypt("ghost", &["--no-self"], MESSAGE);
    let envelope = envelope_of(&output);
    assert_stderr_contains(&output, "no recipients");

    let value: serde_json::Value = serde_json::from_str(&envelope).unwrap();
    assert!(value["keys"].as_object().unwrap().is_empty());
}
