//! Test fixtures and constants.

/// A message used across encrypt/decrypt tests.
pub const MESSAGE: &str = "the eagle lands at noon";

/// An invalid public key for negative tests.
pub const INVALID_PUBLIC_KEY: &str = "not-a-valid-key";

/// A JWK that parses but is not an RSA key.
pub const EC_JWK: &str = r#"{"kty":"EC","crv":"P-256","x":"f83OJ3D2xF1Bg8vub9tLe1gHMzV76e8Tus9uPHvRVEU","y":"x_FEzRu9m36HLN_tue659LNpXW6pCyStikYjKIWI5a0"}"#;

/// Structurally broken envelopes.
pub const MALFORMED_ENVELOPES: &[&str] = &[
    "not json at all",
    r#"{"content":"AAAA","keys":{}}"#,
    r#"{"iv":"AQID","content":"AAAA","keys":{}}"#,
    r#"{"iv":"BwcHBwcHBwcHBwcH","content":"%%%","keys":{}}"#,
];
