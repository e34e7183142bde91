//! Type aliases for domain concepts.
//!
//! Provides semantic type aliases to make function signatures more descriptive.

/// An identity id (user id, member name, device id).
///
/// Addresses a recipient inside an envelope and a key pair inside a store.
pub type IdentityId = String;

/// A textual, loss-less key serialization (JWK JSON or PEM).
pub type PortableKey = String;

/// A serialized envelope (JSON text).
pub type SealedEnvelope = String;
