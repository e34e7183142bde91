//! Inspect command - show envelope metadata without decrypting.

use std::path::Path;

use crate::cli::{output, read_envelope};
use crate::core::constants::TAG_LEN;
use crate::error::Result;

/// List the recipients of an envelope.
pub fn execute(input: Option<&Path>) -> Result<()> {
    let envelope = read_envelope(input)?;

    output::header(&format!(
        "{} recipients",
        output::count(envelope.recipient_count())
    ));
    output::rule();
    if envelope.recipient_count() == 0 {
        output::dimmed("no recipients");
    }
    for identity in envelope.recipients() {
        output::list_item(identity);
    }
    output::blank();
    output::kv(
        "payload:",
        format!(
            "{} bytes",
            envelope.content().len().saturating_sub(TAG_LEN)
        ),
    );
    Ok(())
}
