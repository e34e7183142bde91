//! Error types.
//!
//! Each concern owns its own error enum; [`Error`] wraps them so every
//! operation can return the crate-wide [`Result`].

use thiserror::Error;

/// Top-level error type.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Key(#[from] KeyError),

    #[error(transparent)]
    Envelope(#[from] EnvelopeError),

    #[error(transparent)]
    Cipher(#[from] CipherError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Whether this is one of the decrypt-time failures.
    ///
    /// Callers presenting errors to end users should collapse all of these
    /// into a single "cannot decrypt" state.
    pub fn is_decrypt_failure(&self) -> bool {
        matches!(
            self,
            Error::Cipher(
                CipherError::NoKeyForRecipient
                    | CipherError::KeyUnwrapFailed
                    | CipherError::ContentAuthenticationFailed
            )
        )
    }
}

/// Key generation, import and export errors.
#[derive(Error, Debug)]
pub enum KeyError {
    #[error("key generation failed: {0}")]
    GenerationFailed(String),

    #[error("key import failed: {0}")]
    Import(String),

    #[error("key export failed: {0}")]
    ExportFailed(String),
}

/// Envelope framing errors.
#[derive(Error, Debug)]
pub enum EnvelopeError {
    #[error("malformed envelope: {0}")]
    Malformed(String),
}

/// Hybrid cipher errors.
///
/// The three decrypt-time failures render identically.
#[derive(Error, Debug)]
pub enum CipherError {
    #[error("failed to wrap session key for '{recipient}': {reason}")]
    RecipientWrapFailed { recipient: String, reason: String },

    #[error("cannot decrypt envelope")]
    NoKeyForRecipient,

    #[error("cannot decrypt envelope")]
    KeyUnwrapFailed,

    #[error("cannot decrypt envelope")]
    ContentAuthenticationFailed,

    #[error("decrypted payload is not valid UTF-8")]
    PayloadNotText,

    #[error("encryption failed: {0}")]
    EncryptionFailed(String),
}

/// Key storage errors.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("no private key found for '{0}'")]
    NoPrivateKey(String),

    #[error("no public key found for '{0}'")]
    NoPublicKey(String),

    #[error("a key pair already exists for '{0}'")]
    AlreadyExists(String),

    #[error("invalid identity '{identity}': {reason}")]
    InvalidIdentity { identity: String, reason: String },

    #[error("failed to read key: {0}")]
    ReadFailed(#[source] std::io::Error),

    #[error("failed to write key: {0}")]
    WriteFailed(#[source] std::io::Error),

    #[error("invalid key file: {0}")]
    InvalidFormat(String),

    #[error("insecure permissions on {path}: expected {expected}, found {actual}")]
    InsecurePermissions {
        path: String,
        expected: String,
        actual: String,
    },
}

/// Configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("invalid config value for '{field}': {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

/// Crate-wide result type.
pub type Result<T> = std::result::Result<T, Error>;
