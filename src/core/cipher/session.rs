//! Single-use AES-256-GCM session keys.

use aes_gcm::aead::{Aead, KeyInit};
use aes_gcm::{Aes256Gcm, Nonce};
use rand::rngs::OsRng;
use rand::RngCore;
use tracing::trace;
use zeroize::Zeroizing;

use crate::core::constants::{NONCE_LEN, SESSION_KEY_LEN};
use crate::error::{CipherError, KeyError, Result};

/// Ephemeral symmetric key for exactly one envelope.
///
/// Wiped from memory on drop.
pub(crate) struct SessionKey(Zeroizing<[u8; SESSION_KEY_LEN]>);

impl std::fmt::Debug for SessionKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SessionKey(..)")
    }
}

impl SessionKey {
    /// Fresh random key from the OS random source.
    pub fn generate() -> Result<Self> {
        let mut key = Zeroizing::new([0u8; SESSION_KEY_LEN]);
        OsRng
            .try_fill_bytes(&mut key[..])
            .map_err(|e| KeyError::GenerationFailed(format!("session key: {}", e)))?;
        Ok(Self(key))
    }

    /// Rebuild a key from unwrapped raw bytes.
    ///
    /// Bytes of the wrong length mean the wrapped entry did not hold one of
    /// our session keys, which is reported as an unwrap failure.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let mut key = Zeroizing::new([0u8; SESSION_KEY_LEN]);
        if bytes.len() != SESSION_KEY_LEN {
            return Err(CipherError::KeyUnwrapFailed.into());
        }
        key.copy_from_slice(bytes);
        Ok(Self(key))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0[..]
    }

    fn cipher(&self) -> Result<Aes256Gcm> {
        Aes256Gcm::new_from_slice(self.as_bytes())
            .map_err(|e| CipherError::EncryptionFailed(e.to_string()).into())
    }

    /// Encrypt and authenticate; returns ciphertext with the tag appended.
    pub fn seal(&self, iv: &[u8; NONCE_LEN], plaintext: &[u8]) -> Result<Vec<u8>> {
        trace!(plaintext_len = plaintext.len(), "sealing content");
        self.cipher()?
            .encrypt(Nonce::from_slice(iv), plaintext)
            .map_err(|e| CipherError::EncryptionFailed(e.to_string()).into())
    }

    /// Verify and decrypt content produced by [`SessionKey::seal`].
    pub fn open(&self, iv: &[u8; NONCE_LEN], content: &[u8]) -> Result<Vec<u8>> {
        trace!(content_len = content.len(), "opening content");
        self.cipher()?
            .decrypt(Nonce::from_slice(iv), content)
            .map_err(|_| CipherError::ContentAuthenticationFailed.into())
    }
}

/// Fresh random 96-bit nonce.
pub(crate) fn generate_iv() -> Result<[u8; NONCE_LEN]> {
    let mut iv = [0u8; NONCE_LEN];
    OsRng
        .try_fill_bytes(&mut iv)
        .map_err(|e| KeyError::GenerationFailed(format!("nonce: {}", e)))?;
    Ok(iv)
}
