//! Recipients rm command.

use crate::cli::output;
use crate::core::config::Config;
use crate::error::{Result, StoreError};

/// Remove a recipient from the address book.
pub fn execute(identity: &str) -> Result<()> {
    let mut config = Config::load_or_default()?;
    if !config.remove_recipient(identity) {
        return Err(StoreError::NoPublicKey(identity.to_string()).into());
    }
    config.save()?;
    output::success(&format!("removed {}", identity));
    Ok(())
}
