//! Encrypt command - seal a message for a set of recipients.

use std::collections::BTreeSet;
use std::path::PathBuf;

use tracing::{debug, info};

use crate::cli::{output, read_input, resolve_identity, RecipientArg};
use crate::core::cipher::{HybridCipher, WrapPolicy};
use crate::core::config::Config;
use crate::core::recipient::Recipient;
use crate::core::store::{Filesystem, KeyStore};
use crate::error::{Result, StoreError};

/// Parsed `encrypt` arguments.
pub struct Options {
    pub to: Vec<RecipientArg>,
    pub sender: Option<String>,
    pub include_self: bool,
    pub strict: bool,
    pub input: Option<PathBuf>,
    pub message: Option<String>,
}

/// Encrypt a message and print the envelope.
pub fn execute(opts: Options) -> Result<()> {
    let config = Config::load_or_default()?;
    let store = config.key_store()?;

    let mut cipher = HybridCipher::from_config(&config);
    if opts.strict {
        cipher = cipher.with_policy(WrapPolicy::Strict);
    }

    let explicit_sender = opts.sender.is_some();
    let sender = resolve_identity(opts.sender);

    let mut recipients = Vec::with_capacity(opts.to.len() + 1);
    if opts.include_self {
        if store.has_key(&sender) {
            recipients.push(Recipient::from_key(
                sender.clone(),
                store.load_public_key(&sender)?,
            ));
        } else if explicit_sender {
            return Err(StoreError::NoPrivateKey(sender).into());
        } else {
            debug!(sender = %sender, "sender has no local key, not added");
        }
    }
    for arg in &opts.to {
        recipients.push(resolve_recipient(arg, &config, &store)?);
    }

    if recipients.is_empty() {
        output::warn("envelope has no recipients; nobody will be able to decrypt it");
    }

    let message = match opts.message {
        Some(message) => message,
        None => read_input(opts.input.as_deref())?,
    };

    // repeated identities share one envelope entry
    let distinct = recipients
        .iter()
        .map(Recipient::id)
        .collect::<BTreeSet<_>>()
        .len();

    info!(
        recipients = distinct,
        policy = %cipher.policy(),
        "encrypting message"
    );
    let envelope = cipher.encrypt(&message, &recipients)?;
    if envelope.recipient_count() < distinct {
        output::warn(&format!(
            "{} of {} recipients excluded",
            distinct - envelope.recipient_count(),
            distinct
        ));
    }

    output::data(&envelope.seal()?);
    Ok(())
}

/// Turn a `--to` argument into a recipient.
///
/// `id=file` reads the key file. A bare `id` is looked up in the address
/// book first, then among the locally stored key pairs.
fn resolve_recipient(arg: &RecipientArg, config: &Config, store: &Filesystem) -> Result<Recipient> {
    if let Some(file) = &arg.key_file {
        debug!(identity = %arg.identity, path = %file.display(), "reading recipient key file");
        let text = std::fs::read_to_string(file).map_err(StoreError::ReadFailed)?;
        return Ok(Recipient::new(arg.identity.clone(), text));
    }

    if let Some(text) = config.recipient(&arg.identity) {
        return Ok(Recipient::new(arg.identity.clone(), text));
    }

    let key = store.load_public_key(&arg.identity)?;
    Ok(Recipient::from_key(arg.identity.clone(), key))
}
