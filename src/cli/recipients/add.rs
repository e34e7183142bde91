//! Recipients add command.

use std::path::Path;

use tracing::info;

use crate::cli::output;
use crate::core::config::Config;
use crate::error::{Result, StoreError};

/// Add a recipient from a public key file.
pub fn execute(identity: &str, key_file: &Path) -> Result<()> {
    info!(identity = %identity, "adding recipient");
    let text = std::fs::read_to_string(key_file).map_err(StoreError::ReadFailed)?;

    let mut config = Config::load_or_default()?;
    let replaced = config.recipient(identity).is_some();
    let key = config.add_recipient(identity, &text)?;
    config.save()?;

    let verb = if replaced { "updated" } else { "added" };
    output::success(&format!("{} {}", verb, identity));
    output::kv("thumbprint:", key.thumbprint());
    Ok(())
}
