//! In-memory key storage.
//!
//! Useful for tests and for embedding callers that manage persistence
//! themselves.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use parking_lot::RwLock;
use tracing::debug;

use super::KeyStore;
use crate::core::keys::{KeyPair, PrivateKey, PublicKey};
use crate::core::validation::validate_identity;
use crate::error::{Result, StoreError};

/// Key pairs held in process memory.
#[derive(Default)]
pub struct MemoryStore {
    pairs: RwLock<HashMap<String, KeyPair>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of identities held.
    pub fn len(&self) -> usize {
        self.pairs.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.read().is_empty()
    }
}

impl KeyStore for MemoryStore {
    fn insert(&self, identity: &str, pair: KeyPair) -> Result<()> {
        validate_identity(identity)?;

        match self.pairs.write().entry(identity.to_string()) {
            Entry::Occupied(_) => Err(StoreError::AlreadyExists(identity.to_string()).into()),
            Entry::Vacant(slot) => {
                slot.insert(pair);
                debug!(identity = %identity, "key pair stored in memory");
                Ok(())
            }
        }
    }

    fn load_private_key(&self, identity: &str) -> Result<PrivateKey> {
        self.pairs
            .read()
            .get(identity)
            .map(|pair| pair.private().clone())
            .ok_or_else(|| StoreError::NoPrivateKey(identity.to_string()).into())
    }

    fn load_public_key(&self, identity: &str) -> Result<PublicKey> {
        self.pairs
            .read()
            .get(identity)
            .map(|pair| pair.public().clone())
            .ok_or_else(|| StoreError::NoPublicKey(identity.to_string()).into())
    }

    fn has_key(&self, identity: &str) -> bool {
        self.pairs.read().contains_key(identity)
    }
}

impl std::fmt::Debug for MemoryStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryStore")
            .field("identities", &self.len())
            .finish()
    }
}
