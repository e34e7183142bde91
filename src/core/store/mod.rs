//! Key storage.
//!
//! Each party keeps its own private keys in a [`KeyStore`], addressed by
//! identity id. The store is injected wherever private keys are needed, so
//! the cipher can run against the in-memory store in tests and the
//! filesystem store in the CLI.
//!
//! ## Adding a New Storage Backend
//!
//! 1. Implement `insert`, `load_private_key`, `load_public_key` and `has_key`
//! 2. Add the implementation in a new file (e.g., `keychain.rs`)
//! 3. Re-export from this module
//!
//! ## Example
//!
//! ```ignore
//! struct Keychain { /* ... */ }
//!
//! impl KeyStore for Keychain {
//!     fn insert(&self, identity: &str, pair: KeyPair) -> Result<()> {
//!         // Refuse if the identity already has a pair, then persist
//!     }
//!     fn load_private_key(&self, identity: &str) -> Result<PrivateKey> {
//!         // Load from the keychain
//!     }
//!     fn load_public_key(&self, identity: &str) -> Result<PublicKey> {
//!         // Load from the keychain
//!     }
//!     fn has_key(&self, identity: &str) -> bool {
//!         // Check the keychain
//!     }
//! }
//! ```

use tracing::debug;

use crate::core::keys::{KeyPair, PrivateKey, PublicKey};
use crate::error::Result;

mod fs;
mod memory;

pub use fs::Filesystem;
pub use memory::MemoryStore;

/// Private key store for the identities owned by one party.
///
/// Creation is at-most-once per identity; keys are immutable afterwards, so
/// concurrent reads never need coordination.
pub trait KeyStore: Send + Sync {
    /// Store a key pair for an identity.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::AlreadyExists` if the identity already has a
    /// pair. Exactly one of several concurrent inserts succeeds.
    fn insert(&self, identity: &str, pair: KeyPair) -> Result<()>;

    /// Load the private key for an identity held by this store.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NoPrivateKey` if the identity has no pair here.
    fn load_private_key(&self, identity: &str) -> Result<PrivateKey>;

    /// Load the public key for an identity held by this store.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NoPublicKey` if the identity has no pair here.
    fn load_public_key(&self, identity: &str) -> Result<PublicKey>;

    /// Check if a key pair exists for an identity.
    fn has_key(&self, identity: &str) -> bool;

    /// Generate a fresh key pair for an identity and store it.
    ///
    /// Returns the public key.
    ///
    /// # Errors
    ///
    /// Returns `KeyError::GenerationFailed` if generation fails and
    /// `StoreError::AlreadyExists` if the identity already has a pair.
    fn generate_keypair(&self, identity: &str) -> Result<PublicKey> {
        debug!(identity = %identity, "generating key pair for identity");
        let pair = KeyPair::generate()?;
        let public = pair.public().clone();
        self.insert(identity, pair)?;
        Ok(public)
    }
}
