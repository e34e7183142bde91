//! Envelope recipients.
//!
//! A recipient pairs an identity id with that identity's public key. The key
//! is usually carried in portable text form and imported only when the
//! session key is wrapped, so one bad key can be excluded without rejecting
//! the whole recipient list.

use crate::core::keys::PublicKey;
use crate::core::types::{IdentityId, PortableKey};
use crate::error::Result;

#[derive(Debug, Clone)]
enum RecipientKey {
    Portable(PortableKey),
    Imported(PublicKey),
}

/// An identity that an envelope is encrypted for.
#[derive(Debug, Clone)]
pub struct Recipient {
    id: IdentityId,
    key: RecipientKey,
}

impl Recipient {
    /// Recipient from a portable public key (JWK or PEM).
    ///
    /// The key text is not parsed here; a malformed key surfaces when
    /// encrypting, where it is handled by the cipher's wrap policy.
    pub fn new(id: impl Into<IdentityId>, public_key: impl Into<PortableKey>) -> Self {
        Self {
            id: id.into(),
            key: RecipientKey::Portable(public_key.into()),
        }
    }

    /// Recipient from an already imported public key.
    pub fn from_key(id: impl Into<IdentityId>, public_key: PublicKey) -> Self {
        Self {
            id: id.into(),
            key: RecipientKey::Imported(public_key),
        }
    }

    /// Recipient whose portable key is validated up front.
    ///
    /// # Errors
    ///
    /// Returns `KeyError::Import` if the text is not a valid public key.
    pub fn parse(id: impl Into<IdentityId>, public_key: &str) -> Result<Self> {
        Ok(Self::from_key(id, PublicKey::import(public_key)?))
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// The recipient's public key, importing it if needed.
    pub fn public_key(&self) -> Result<PublicKey> {
        match &self.key {
            RecipientKey::Portable(text) => PublicKey::import(text),
            RecipientKey::Imported(key) => Ok(key.clone()),
        }
    }
}
