//! Export command - print a stored key in portable form.

use tracing::debug;

use crate::cli::output;
use crate::core::config::Config;
use crate::core::keys::KeyFormat;
use crate::core::store::KeyStore;
use crate::error::Result;

/// Print the public (or private) key of a stored identity.
pub fn execute(identity: &str, private: bool, format: Option<KeyFormat>) -> Result<()> {
    let config = Config::load_or_default()?;
    let format = format.unwrap_or(config.keys.format);
    let store = config.key_store()?;
    debug!(identity = %identity, format = format.name(), private, "exporting key");

    let text = if private {
        store.load_private_key(identity)?.export(format)?
    } else {
        store.load_public_key(identity)?.export(format)?
    };

    output::data(text.trim_end());
    Ok(())
}
