//! Decrypt command - open an envelope with a locally stored key.

use std::path::Path;

use tracing::info;

use crate::cli::{output, read_envelope, resolve_identity};
use crate::core::cipher::HybridCipher;
use crate::core::config::Config;
use crate::error::Result;

/// Decrypt an envelope and print the message.
pub fn execute(identity: Option<String>, input: Option<&Path>) -> Result<()> {
    let config = Config::load_or_default()?;
    let store = config.key_store()?;
    let identity = resolve_identity(identity);

    let envelope = read_envelope(input)?;

    info!(identity = %identity, "decrypting envelope");
    let message =
        HybridCipher::from_config(&config).decrypt_with_store(&envelope, &identity, &store)?;

    output::data(&message);
    Ok(())
}
