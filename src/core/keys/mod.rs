//! Key manager.
//!
//! Generates RSA-OAEP (SHA-256) key pairs and converts either half to and
//! from a portable text form. Two formats are supported:
//!
//! - **JWK** (default): JSON Web Key, `alg = "RSA-OAEP-256"`, interoperable
//!   with WebCrypto `exportKey("jwk", ...)`.
//! - **PEM**: SPKI for public keys, PKCS#8 for private keys. PKCS#1 PEM is
//!   accepted on import.
//!
//! Import auto-detects the format from the text.

mod jwk;
mod pem;

use std::fmt;
use std::str::FromStr;

use rand::rngs::OsRng;
use rsa::traits::PublicKeyParts;
use rsa::{RsaPrivateKey, RsaPublicKey};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::debug;

use crate::core::codec;
use crate::core::constants::{MAX_RSA_KEY_BITS, MIN_RSA_KEY_BITS, RSA_KEY_BITS};
use crate::core::types::PortableKey;
use crate::error::{KeyError, Result};

/// Which half of a key pair an operation refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyHalf {
    Public,
    Private,
}

/// Portable text format for exported keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyFormat {
    #[default]
    Jwk,
    Pem,
}

impl KeyFormat {
    /// Guess the format of a portable key from its text.
    pub fn detect(text: &str) -> Option<Self> {
        let text = text.trim_start();
        if text.starts_with('{') {
            Some(Self::Jwk)
        } else if text.starts_with("-----BEGIN") {
            Some(Self::Pem)
        } else {
            None
        }
    }

    /// Format name for display/config.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Jwk => "jwk",
            Self::Pem => "pem",
        }
    }
}

impl FromStr for KeyFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "jwk" => Ok(Self::Jwk),
            "pem" => Ok(Self::Pem),
            other => Err(format!("unknown key format: {}. Supported: jwk, pem", other)),
        }
    }
}

/// Public half of a key pair. Freely shareable.
#[derive(Clone, PartialEq, Eq)]
pub struct PublicKey(RsaPublicKey);

impl PublicKey {
    /// Parse a portable public key (JWK or PEM).
    ///
    /// # Errors
    ///
    /// Returns `KeyError::Import` if the text is malformed, carries private
    /// material, or the algorithm parameters are unexpected.
    pub fn import(text: &str) -> Result<Self> {
        let inner = match KeyFormat::detect(text) {
            Some(KeyFormat::Jwk) => jwk::public_from_json(text)?,
            Some(KeyFormat::Pem) => pem::public_from_pem(text)?,
            None => return Err(unrecognized_format()),
        };
        check_modulus(&inner)?;
        Ok(Self(inner))
    }

    /// Serialize to portable text.
    pub fn export(&self, format: KeyFormat) -> Result<PortableKey> {
        match format {
            KeyFormat::Jwk => jwk::public_to_json(&self.0),
            KeyFormat::Pem => pem::public_to_pem(&self.0),
        }
    }

    /// Modulus size in bits.
    pub fn bits(&self) -> usize {
        self.0.size() * 8
    }

    /// RFC 7638 JWK thumbprint (SHA-256, base64url).
    pub fn thumbprint(&self) -> String {
        let canonical = format!(
            r#"{{"e":"{}","kty":"RSA","n":"{}"}}"#,
            codec::encode_url(&self.0.e().to_bytes_be()),
            codec::encode_url(&self.0.n().to_bytes_be()),
        );
        codec::encode_url(&Sha256::digest(canonical.as_bytes()))
    }

    pub(crate) fn as_rsa(&self) -> &RsaPublicKey {
        &self.0
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PublicKey")
            .field("bits", &self.bits())
            .field("thumbprint", &self.thumbprint())
            .finish()
    }
}

/// Private half of a key pair. Never leaves the owning identity.
///
/// The underlying key material is zeroized on drop.
#[derive(Clone)]
pub struct PrivateKey(RsaPrivateKey);

impl PrivateKey {
    /// Parse a portable private key (JWK or PEM).
    ///
    /// # Errors
    ///
    /// Returns `KeyError::Import` if the text is malformed, lacks private
    /// members, or describes an inconsistent key.
    pub fn import(text: &str) -> Result<Self> {
        let inner = match KeyFormat::detect(text) {
            Some(KeyFormat::Jwk) => jwk::private_from_json(text)?,
            Some(KeyFormat::Pem) => pem::private_from_pem(text)?,
            None => return Err(unrecognized_format()),
        };
        check_modulus(&inner)?;
        Ok(Self(inner))
    }

    /// Serialize to portable text.
    pub fn export(&self, format: KeyFormat) -> Result<PortableKey> {
        match format {
            KeyFormat::Jwk => jwk::private_to_json(&self.0),
            KeyFormat::Pem => pem::private_to_pem(&self.0),
        }
    }

    /// Derive the matching public key.
    pub fn public_key(&self) -> PublicKey {
        PublicKey(self.0.to_public_key())
    }

    pub(crate) fn as_rsa(&self) -> &RsaPrivateKey {
        &self.0
    }
}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrivateKey")
            .field("public", &self.public_key())
            .finish_non_exhaustive()
    }
}

/// An asymmetric key pair bound to one identity.
#[derive(Clone)]
pub struct KeyPair {
    public: PublicKey,
    private: PrivateKey,
}

impl KeyPair {
    /// Generate a fresh RSA-2048 key pair from the OS random source.
    ///
    /// # Errors
    ///
    /// Returns `KeyError::GenerationFailed` if the random source or the
    /// prime search fails.
    pub fn generate() -> Result<Self> {
        debug!(bits = RSA_KEY_BITS, "generating key pair");
        let private = RsaPrivateKey::new(&mut OsRng, RSA_KEY_BITS)
            .map_err(|e| KeyError::GenerationFailed(e.to_string()))?;
        Ok(Self::from_private(PrivateKey(private)))
    }

    /// Rebuild a pair from its private half.
    pub fn from_private(private: PrivateKey) -> Self {
        Self {
            public: private.public_key(),
            private,
        }
    }

    pub fn public(&self) -> &PublicKey {
        &self.public
    }

    pub fn private(&self) -> &PrivateKey {
        &self.private
    }

    /// Serialize either half to portable text.
    pub fn export(&self, half: KeyHalf, format: KeyFormat) -> Result<PortableKey> {
        match half {
            KeyHalf::Public => self.public.export(format),
            KeyHalf::Private => self.private.export(format),
        }
    }
}

impl fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyPair")
            .field("public", &self.public)
            .finish_non_exhaustive()
    }
}

/// A usable key handle of either half, as returned by [`import_key`].
#[derive(Debug, Clone)]
pub enum Key {
    Public(PublicKey),
    Private(PrivateKey),
}

impl Key {
    /// Which half this handle holds.
    pub fn half(&self) -> KeyHalf {
        match self {
            Self::Public(_) => KeyHalf::Public,
            Self::Private(_) => KeyHalf::Private,
        }
    }

    /// The public key, derived from the private half when needed.
    pub fn public_key(&self) -> PublicKey {
        match self {
            Self::Public(key) => key.clone(),
            Self::Private(key) => key.public_key(),
        }
    }

    /// The private key, if this handle holds one.
    pub fn into_private(self) -> Option<PrivateKey> {
        match self {
            Self::Private(key) => Some(key),
            Self::Public(_) => None,
        }
    }
}

/// Generate a fresh key pair.
///
/// This is a convenience wrapper around `KeyPair::generate`.
pub fn generate_keypair() -> Result<KeyPair> {
    KeyPair::generate()
}

/// Serialize one half of a key pair to portable text.
pub fn export_key(pair: &KeyPair, half: KeyHalf, format: KeyFormat) -> Result<PortableKey> {
    pair.export(half, format)
}

/// Parse portable text back into a key handle of the requested half.
///
/// # Errors
///
/// Returns `KeyError::Import` if the text is malformed or does not hold the
/// requested half.
pub fn import_key(text: &str, half: KeyHalf) -> Result<Key> {
    match half {
        KeyHalf::Public => PublicKey::import(text).map(Key::Public),
        KeyHalf::Private => PrivateKey::import(text).map(Key::Private),
    }
}

fn unrecognized_format() -> crate::error::Error {
    KeyError::Import("unrecognized key format: expected a JWK object or a PEM block".into()).into()
}

fn check_modulus(key: &impl PublicKeyParts) -> Result<()> {
    let bits = key.size() * 8;
    if !(MIN_RSA_KEY_BITS..=MAX_RSA_KEY_BITS).contains(&bits) {
        return Err(KeyError::Import(format!(
            "unsupported RSA modulus size: {} bits (expected {}-{})",
            bits, MIN_RSA_KEY_BITS, MAX_RSA_KEY_BITS
        ))
        .into());
    }
    Ok(())
}
