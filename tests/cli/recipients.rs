//! Tests for `sealcast recipients add/list/rm`.

use crate::support::*;

#[test]
fn test_recipients_list_empty() {
    let t = Test::new();

    let output = t.recipients_list();
    assert_success(&output);
    assert_stdout_contains(&output, "no recipients");
}

#[test]
fn test_recipients_add_and_list() {
    let t = Test::with_identities(&["bob"]);
    let key = t.export_to_file("bob");

    let output = t.recipients_add("bob", &key);
    assert_success(&output);
    assert_stdout_contains(&output, "added bob");

    let output = t.recipients_list();
    assert_success(&output);
    assert_stdout_contains(&output, "bob");

    let config = std::fs::read_to_string(t.path(".sealcast.toml")).unwrap();
    assert!(config.contains("[recipients]"));
}

#[test]
fn test_recipients_list_json() {
    let t = Test::with_identities(&["bob"]);
    let key = t.export_to_file("bob");
    assert_success(&t.recipients_add("bob", &key));

    let output = t.recipients_list_json();
    assert_success(&output);

    let parsed: serde_json::Value = serde_json::from_str(&stdout(&output)).expect("valid JSON");
    assert_eq!(parsed["count"], 1);
    assert_eq!(parsed["recipients"][0]["identity"], "bob");
    assert_eq!(parsed["recipients"][0]["bits"], 2048);
    assert!(parsed["recipients"][0]["thumbprint"].is_string());
}

#[test]
fn test_recipients_add_pem_key() {
    let t = Test::with_identities(&["bob"]);
    let output = t
        .cmd()
        .args(["export", "bob", "--format", "pem"])
        .output()
        .unwrap();
    assert_success(&output);
    let key = t.write("bob.pem", &stdout(&output));

    assert_success(&t.recipients_add("bob", &key));
}

#[test]
fn test_recipients_add_invalid_key() {
    let t = Test::new();
    let key = t.write("bad.jwk", INVALID_PUBLIC_KEY);

    let output = t.recipients_add("bob", &key);
    assert_failure(&output);
    assert!(!t.path(".sealcast.toml").exists());
}

#[test]
fn test_recipients_add_rejects_private_key() {
    let t = Test::with_identities(&["bob"]);
    let output = t
        .cmd()
        .args(["export", "bob", "--private"])
        .output()
        .unwrap();
    let key = t.write("bob-private.jwk", &stdout(&output));

    assert_failure(&t.recipients_add("bob", &key));
}

#[test]
fn test_recipients_rm() {
    let t = Test::with_identities(&["bob"]);
    let key = t.export_to_file("bob");
    assert_success(&t.recipients_add("bob", &key));

    let output = t.recipients_rm("bob");
    assert_success(&output);
    assert_stdout_contains(&output, "removed bob");

    let output = t.recipients_list();
    assert_stdout_excludes(&output, "bob");
}

#[test]
fn test_recipients_rm_unknown() {
    let t = Test::new();

    let output = t.recipients_rm("nobody");
    assert_failure(&output);
    assert_stderr_contains(&output, "nobody");
}
