//! Hybrid multi-recipient encryption.
//!
//! Each envelope gets a fresh AES-256-GCM session key and nonce. The payload
//! is encrypted once; the raw session key is then RSA-OAEP (SHA-256) wrapped
//! separately for every recipient. Any recipient can unwrap their own entry
//! and decrypt the content; nobody can use another recipient's key.
//!
//! ## Wrap policy
//!
//! - **best-effort** (default): a recipient whose key cannot be imported or
//!   used is left out of the envelope with a warning.
//! - **strict**: the first such recipient fails the whole call.
//!
//! ## Parallelism
//!
//! RSA wrapping dominates encryption cost for large recipient lists. Once the
//! list reaches `parallel_threshold`, wrapping is spread over scoped worker
//! threads. The resulting envelope does not depend on whether it ran in
//! parallel.

use std::collections::BTreeMap;
use std::fmt;
use std::num::NonZeroUsize;
use std::str::FromStr;
use std::thread;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::core::config::Config;
use crate::core::constants::DEFAULT_PARALLEL_THRESHOLD;
use crate::core::envelope::Envelope;
use crate::core::keys::PrivateKey;
use crate::core::recipient::Recipient;
use crate::core::store::KeyStore;
use crate::core::types::SealedEnvelope;
use crate::error::{CipherError, Error, Result};

mod session;
mod wrap;

use session::{generate_iv, SessionKey};

/// What to do when the session key cannot be wrapped for a recipient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WrapPolicy {
    /// Exclude the recipient and carry on.
    #[default]
    BestEffort,
    /// Fail the whole encryption.
    Strict,
}

impl WrapPolicy {
    pub fn name(&self) -> &'static str {
        match self {
            Self::BestEffort => "best-effort",
            Self::Strict => "strict",
        }
    }
}

impl fmt::Display for WrapPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for WrapPolicy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "best-effort" => Ok(Self::BestEffort),
            "strict" => Ok(Self::Strict),
            other => Err(format!(
                "unknown wrap policy '{}'. Expected: best-effort, strict",
                other
            )),
        }
    }
}

/// Multi-recipient envelope cipher.
///
/// Stateless apart from its settings; share one instance across threads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HybridCipher {
    policy: WrapPolicy,
    parallel_threshold: usize,
}

impl Default for HybridCipher {
    fn default() -> Self {
        Self {
            policy: WrapPolicy::default(),
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        }
    }
}

impl HybridCipher {
    /// Best-effort cipher with the default parallel threshold.
    pub fn new() -> Self {
        Self::default()
    }

    /// Cipher that fails on any recipient wrap error.
    pub fn strict() -> Self {
        Self::default().with_policy(WrapPolicy::Strict)
    }

    /// Cipher with settings from the `[cipher]` config section.
    pub fn from_config(config: &Config) -> Self {
        debug!(
            policy = %config.cipher.policy,
            parallel_threshold = config.cipher.parallel_threshold,
            "creating cipher from config"
        );
        Self::default()
            .with_policy(config.cipher.policy)
            .with_parallel_threshold(config.cipher.parallel_threshold)
    }

    pub fn with_policy(mut self, policy: WrapPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Recipient count at which wrapping moves to worker threads.
    ///
    /// Values below 1 are treated as 1.
    pub fn with_parallel_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = threshold.max(1);
        self
    }

    pub fn policy(&self) -> WrapPolicy {
        self.policy
    }

    pub fn parallel_threshold(&self) -> usize {
        self.parallel_threshold
    }

    /// Encrypt a text payload for a set of recipients.
    ///
    /// # Errors
    ///
    /// Returns `CipherError::RecipientWrapFailed` under the strict policy when
    /// any recipient's key cannot be used, and `KeyError::GenerationFailed`
    /// if the OS random source fails.
    pub fn encrypt(&self, plaintext: &str, recipients: &[Recipient]) -> Result<Envelope> {
        self.encrypt_bytes(plaintext.as_bytes(), recipients)
    }

    /// Encrypt an arbitrary byte payload for a set of recipients.
    pub fn encrypt_bytes(&self, plaintext: &[u8], recipients: &[Recipient]) -> Result<Envelope> {
        debug!(
            recipients = recipients.len(),
            policy = %self.policy,
            "encrypting"
        );

        let session = SessionKey::generate()?;
        let iv = generate_iv()?;
        let content = session.seal(&iv, plaintext)?;

        let mut keys = BTreeMap::new();
        for (recipient, wrapped) in recipients.iter().zip(self.wrap_all(&session, recipients)) {
            match wrapped {
                Ok(bytes) => {
                    // later duplicates overwrite earlier ones
                    keys.insert(recipient.id().to_string(), bytes);
                }
                Err(e) => match self.policy {
                    WrapPolicy::Strict => {
                        return Err(CipherError::RecipientWrapFailed {
                            recipient: recipient.id().to_string(),
                            reason: e.to_string(),
                        }
                        .into());
                    }
                    WrapPolicy::BestEffort => {
                        warn!(recipient = %recipient.id(), error = %e, "recipient excluded");
                    }
                },
            }
        }

        trace!(
            content_len = content.len(),
            wrapped = keys.len(),
            "encrypted"
        );
        Ok(Envelope::new(iv, content, keys))
    }

    /// Encrypt and serialize to the envelope text form.
    pub fn seal(&self, plaintext: &str, recipients: &[Recipient]) -> Result<SealedEnvelope> {
        self.encrypt(plaintext, recipients)?.seal()
    }

    /// Decrypt an envelope as one recipient.
    ///
    /// # Errors
    ///
    /// - `CipherError::NoKeyForRecipient` if the envelope has no entry for
    ///   `identity`
    /// - `CipherError::KeyUnwrapFailed` if the entry cannot be unwrapped with
    ///   `key`
    /// - `CipherError::ContentAuthenticationFailed` if the content or nonce
    ///   was tampered with
    /// - `CipherError::PayloadNotText` if the verified payload is not UTF-8
    pub fn decrypt(&self, envelope: &Envelope, identity: &str, key: &PrivateKey) -> Result<String> {
        let bytes = self.decrypt_bytes(envelope, identity, key)?;
        String::from_utf8(bytes).map_err(|_| CipherError::PayloadNotText.into())
    }

    /// Decrypt an envelope to raw bytes.
    pub fn decrypt_bytes(
        &self,
        envelope: &Envelope,
        identity: &str,
        key: &PrivateKey,
    ) -> Result<Vec<u8>> {
        debug!(identity = %identity, "decrypting");

        let wrapped = envelope
            .wrapped_key(identity)
            .ok_or(CipherError::NoKeyForRecipient)?;
        let session = wrap::unwrap(key, wrapped)?;
        let plaintext = session.open(envelope.iv(), envelope.content())?;

        trace!(plaintext_len = plaintext.len(), "decrypted");
        Ok(plaintext)
    }

    /// Parse envelope text and decrypt it as one recipient.
    pub fn open(&self, sealed: &str, identity: &str, key: &PrivateKey) -> Result<String> {
        let envelope = Envelope::parse(sealed)?;
        self.decrypt(&envelope, identity, key)
    }

    /// Decrypt using the private key held for `identity` in a key store.
    ///
    /// The store is only consulted when the envelope is addressed to
    /// `identity`.
    pub fn decrypt_with_store(
        &self,
        envelope: &Envelope,
        identity: &str,
        store: &dyn KeyStore,
    ) -> Result<String> {
        if envelope.wrapped_key(identity).is_none() {
            return Err(CipherError::NoKeyForRecipient.into());
        }
        let key = store.load_private_key(identity)?;
        self.decrypt(envelope, identity, &key)
    }

    /// Wrap the session key for every recipient, preserving input order.
    fn wrap_all(&self, session: &SessionKey, recipients: &[Recipient]) -> Vec<Result<Vec<u8>>> {
        if recipients.len() < self.parallel_threshold {
            return recipients.iter().map(|r| wrap_for(r, session)).collect();
        }

        let workers = thread::available_parallelism()
            .map(NonZeroUsize::get)
            .unwrap_or(1)
            .min(recipients.len());
        let chunk_size = (recipients.len() + workers - 1) / workers;
        debug!(
            recipients = recipients.len(),
            workers, "wrapping session key in parallel"
        );

        thread::scope(|scope| {
            let handles: Vec<_> = recipients
                .chunks(chunk_size)
                .map(|chunk| {
                    let handle = scope.spawn(move || {
                        chunk
                            .iter()
                            .map(|r| wrap_for(r, session))
                            .collect::<Vec<_>>()
                    });
                    (chunk.len(), handle)
                })
                .collect();

            handles
                .into_iter()
                .flat_map(|(len, handle)| {
                    handle.join().unwrap_or_else(|_| {
                        (0..len)
                            .map(|_| Err(worker_panicked()))
                            .collect::<Vec<_>>()
                    })
                })
                .collect()
        })
    }
}

fn wrap_for(recipient: &Recipient, session: &SessionKey) -> Result<Vec<u8>> {
    let public = recipient.public_key()?;
    wrap::wrap(&public, session)
}

fn worker_panicked() -> Error {
    CipherError::EncryptionFailed("key wrapping worker panicked".to_string()).into()
}
