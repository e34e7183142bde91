//! Constants used throughout sealcast.
//!
//! Centralizes magic strings and algorithm parameters.

/// Configuration file name (.sealcast.toml).
pub const CONFIG_FILE: &str = ".sealcast.toml";

/// Key storage directory relative to HOME (~/.sealcast/keys).
pub const KEY_DIR: &str = ".sealcast/keys";

/// Environment variable overriding the key storage directory.
pub const KEY_DIR_ENV: &str = "SEALCAST_KEY_DIR";

/// Private key file name inside an identity directory.
pub const PRIVATE_KEY_FILE: &str = "private.jwk";

/// Public key file name inside an identity directory.
pub const PUBLIC_KEY_FILE: &str = "public.jwk";

/// RSA modulus size for generated key pairs.
pub const RSA_KEY_BITS: usize = 2048;

/// Smallest RSA modulus accepted on import.
pub const MIN_RSA_KEY_BITS: usize = 2048;

/// Largest RSA modulus accepted on import.
pub const MAX_RSA_KEY_BITS: usize = 4096;

/// JWK `alg` value for RSA-OAEP with SHA-256.
pub const JWK_ALG: &str = "RSA-OAEP-256";

/// AES-256 session key length in bytes.
pub const SESSION_KEY_LEN: usize = 32;

/// AES-GCM nonce length in bytes (96 bits).
pub const NONCE_LEN: usize = 12;

/// AES-GCM authentication tag length in bytes.
pub const TAG_LEN: usize = 16;

/// Recipient count at which session-key wrapping moves to worker threads.
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 8;

/// Longest identity id accepted by the key stores.
pub const MAX_IDENTITY_LEN: usize = 128;
