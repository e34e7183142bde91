//! RSA-OAEP (SHA-256) wrapping of session keys.

use rand::rngs::OsRng;
use rsa::Oaep;
use sha2::Sha256;
use zeroize::Zeroizing;

use super::session::SessionKey;
use crate::core::keys::{PrivateKey, PublicKey};
use crate::error::{CipherError, Result};

/// Encrypt the raw session key under a recipient's public key.
pub(crate) fn wrap(public: &PublicKey, session: &SessionKey) -> Result<Vec<u8>> {
    public
        .as_rsa()
        .encrypt(&mut OsRng, Oaep::new::<Sha256>(), session.as_bytes())
        .map_err(|e| CipherError::EncryptionFailed(format!("key wrap: {}", e)).into())
}

/// Recover the raw session key with the recipient's private key.
///
/// The RSA operation is blinded with fresh randomness on every call.
///
/// Every failure (wrong key, corrupted entry, bad length) collapses into
/// `CipherError::KeyUnwrapFailed`.
pub(crate) fn unwrap(private: &PrivateKey, wrapped: &[u8]) -> Result<SessionKey> {
    let raw = private
        .as_rsa()
        .decrypt_blinded(&mut OsRng, Oaep::new::<Sha256>(), wrapped)
        .map(Zeroizing::new)
        .map_err(|_| CipherError::KeyUnwrapFailed)?;
    SessionKey::from_bytes(&raw)
}
