//! Sealcast - multi-recipient envelope encryption.
//!
//! A payload is encrypted once under a fresh AES-256-GCM session key, and the
//! session key is wrapped with RSA-OAEP (SHA-256) for every recipient. The
//! resulting envelope can be handed to untrusted transport; each recipient
//! opens it with their own private key.
//!
//! # Architecture
//!
//! ```text
//! src/
//! ├── cli/              # Command-line interface
//! │   ├── keygen        # Create a key pair for an identity
//! │   ├── export        # Print a key in portable form
//! │   ├── encrypt       # Seal a message for recipients
//! │   ├── decrypt       # Open an envelope
//! │   ├── inspect       # List envelope recipients
//! │   ├── recipients    # Address book management
//! │   └── completions   # Shell completions
//! └── core/             # Core library components
//!     ├── config        # .sealcast.toml management
//!     ├── keys/         # RSA key pairs
//!     │   ├── jwk       # JSON Web Key import/export
//!     │   └── pem       # SPKI / PKCS#8 import/export
//!     ├── cipher/       # Hybrid cipher
//!     │   ├── session   # AES-256-GCM session keys
//!     │   └── wrap      # RSA-OAEP key wrapping
//!     ├── envelope      # Envelope structure and JSON form
//!     ├── recipient     # Identity + public key pairs
//!     └── store/        # Private key storage
//!         ├── memory    # In-process store
//!         └── fs        # Filesystem store
//! ```
//!
//! # Example
//!
//! ```no_run
//! use sealcast::{HybridCipher, KeyFormat, KeyPair, Recipient};
//!
//! # fn main() -> sealcast::error::Result<()> {
//! let alice = KeyPair::generate()?;
//! let bob = KeyPair::generate()?;
//!
//! let cipher = HybridCipher::new();
//! let sealed = cipher.seal(
//!     "meet at noon",
//!     &[
//!         Recipient::from_key("alice", alice.public().clone()),
//!         Recipient::new("bob", bob.public().export(KeyFormat::Jwk)?),
//!     ],
//! )?;
//!
//! assert_eq!(cipher.open(&sealed, "bob", bob.private())?, "meet at noon");
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod core;
pub mod error;

pub use crate::core::cipher::{HybridCipher, WrapPolicy};
pub use crate::core::config::Config;
pub use crate::core::envelope::Envelope;
pub use crate::core::keys::{
    export_key, generate_keypair, import_key, Key, KeyFormat, KeyHalf, KeyPair, PrivateKey,
    PublicKey,
};
pub use crate::core::recipient::Recipient;
pub use crate::core::store::{Filesystem, KeyStore, MemoryStore};
