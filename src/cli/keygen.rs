//! Keygen command - create a key pair for an identity.

use tracing::info;

use crate::cli::output;
use crate::core::config::Config;
use crate::core::keys::KeyFormat;
use crate::core::store::KeyStore;
use crate::core::validation::validate_identity;
use crate::error::{Result, StoreError};

/// Generate and store a key pair.
pub fn execute(identity: &str) -> Result<()> {
    validate_identity(identity)?;

    let config = Config::load_or_default()?;
    let store = config.key_store()?;

    // fail before spending time on RSA generation
    if store.has_key(identity) {
        return Err(StoreError::AlreadyExists(identity.to_string()).into());
    }

    info!(
        identity = %identity,
        store = %store.root().display(),
        "generating key pair"
    );
    let public = store.generate_keypair(identity)?;

    output::success(&format!("generated key pair for {}", identity));
    output::kv("thumbprint:", public.thumbprint());
    output::kv(
        "stored in: ",
        output::path(store.identity_dir(identity)?.display()),
    );
    output::blank();
    output::data(&public.export(KeyFormat::Jwk)?);
    Ok(())
}
