//! Recipients list command.

use crate::cli::output;
use crate::core::config::Config;
use crate::core::keys::PublicKey;
use crate::error::Result;

/// List address book entries.
pub fn execute(json: bool) -> Result<()> {
    let config = Config::load_or_default()?;

    // validated on load, so every entry imports
    let entries = config
        .recipients
        .iter()
        .map(|(identity, text)| -> Result<(&str, PublicKey)> {
            Ok((identity.as_str(), PublicKey::import(text)?))
        })
        .collect::<Result<Vec<_>>>()?;

    if json {
        let recipients: Vec<_> = entries
            .iter()
            .map(|(identity, key)| {
                serde_json::json!({
                    "identity": identity,
                    "thumbprint": key.thumbprint(),
                    "bits": key.bits(),
                })
            })
            .collect();

        let result = serde_json::json!({
            "recipients": recipients,
            "count": entries.len(),
        });
        output::data(&serde_json::to_string_pretty(&result)?);
    } else if entries.is_empty() {
        output::dimmed("no recipients");
    } else {
        output::header(&format!("{} recipients", output::count(entries.len())));
        output::rule();
        for (identity, key) in &entries {
            output::kv(identity, key.thumbprint());
        }
    }

    Ok(())
}
