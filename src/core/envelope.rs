//! Envelope structure and its text form.
//!
//! An envelope is the self-contained result of one encryption: the nonce,
//! the authenticated ciphertext, and the session key wrapped once per
//! recipient. On the wire it is a JSON object:
//!
//! ```text
//! {"iv":"<b64>","content":"<b64>","keys":{"<identity>":"<b64>",...}}
//! ```
//!
//! `content` is the AES-256-GCM ciphertext with the 16-byte tag appended.
//! All binary fields use standard padded base64.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::codec;
use crate::core::constants::NONCE_LEN;
use crate::core::types::SealedEnvelope;
use crate::error::{EnvelopeError, Result};

/// Wire form of an envelope.
#[derive(Serialize, Deserialize)]
struct WireEnvelope {
    iv: String,
    content: String,
    keys: BTreeMap<String, String>,
}

/// The transmissible result of one encryption operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Envelope {
    iv: [u8; NONCE_LEN],
    content: Vec<u8>,
    keys: BTreeMap<String, Vec<u8>>,
}

impl Envelope {
    pub fn new(
        iv: [u8; NONCE_LEN],
        content: Vec<u8>,
        keys: BTreeMap<String, Vec<u8>>,
    ) -> Self {
        Self { iv, content, keys }
    }

    pub fn iv(&self) -> &[u8; NONCE_LEN] {
        &self.iv
    }

    /// Ciphertext followed by the authentication tag.
    pub fn content(&self) -> &[u8] {
        &self.content
    }

    /// Wrapped session key for one recipient.
    pub fn wrapped_key(&self, identity: &str) -> Option<&[u8]> {
        self.keys.get(identity).map(Vec::as_slice)
    }

    /// Recipient identities, in sorted order.
    pub fn recipients(&self) -> impl Iterator<Item = &str> {
        self.keys.keys().map(String::as_str)
    }

    pub fn recipient_count(&self) -> usize {
        self.keys.len()
    }

    /// Drop one recipient's entry. Other recipients are unaffected.
    pub fn remove_recipient(&mut self, identity: &str) -> bool {
        self.keys.remove(identity).is_some()
    }

    /// Serialize the envelope to its JSON text form.
    pub fn seal(&self) -> Result<SealedEnvelope> {
        let wire = WireEnvelope {
            iv: codec::encode(&self.iv),
            content: codec::encode(&self.content),
            keys: self
                .keys
                .iter()
                .map(|(id, wrapped)| (id.clone(), codec::encode(wrapped)))
                .collect(),
        };
        let text = serde_json::to_string(&wire)?;
        trace!(len = text.len(), recipients = self.keys.len(), "envelope sealed");
        Ok(text)
    }

    /// Parse an envelope from its JSON text form.
    ///
    /// Performs structural checks only; no cryptographic operation runs.
    ///
    /// # Errors
    ///
    /// Returns `EnvelopeError::Malformed` on invalid JSON, missing fields,
    /// invalid base64, or an IV of the wrong length.
    pub fn parse(text: &str) -> Result<Self> {
        let wire: WireEnvelope =
            serde_json::from_str(text).map_err(|e| malformed(e.to_string()))?;

        let iv_bytes = codec::decode(&wire.iv).map_err(|e| malformed(format!("iv: {}", e)))?;
        let iv: [u8; NONCE_LEN] = iv_bytes.as_slice().try_into().map_err(|_| {
            malformed(format!(
                "iv must be {} bytes, got {}",
                NONCE_LEN,
                iv_bytes.len()
            ))
        })?;

        let content =
            codec::decode(&wire.content).map_err(|e| malformed(format!("content: {}", e)))?;

        let mut keys = BTreeMap::new();
        for (id, wrapped) in wire.keys {
            let bytes = codec::decode(&wrapped)
                .map_err(|e| malformed(format!("key for '{}': {}", id, e)))?;
            keys.insert(id, bytes);
        }

        trace!(recipients = keys.len(), content_len = content.len(), "envelope parsed");
        Ok(Self { iv, content, keys })
    }

    /// Check if a string looks like an envelope (vs arbitrary text).
    pub fn is_envelope(text: &str) -> bool {
        let text = text.trim_start();
        text.starts_with('{')
            && text.contains("\"iv\"")
            && text.contains("\"content\"")
            && text.contains("\"keys\"")
    }
}

fn malformed(reason: String) -> crate::error::Error {
    EnvelopeError::Malformed(reason).into()
}
