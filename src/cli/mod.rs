//! Command-line interface.

pub mod completions;
pub mod decrypt;
pub mod encrypt;
pub mod export;
pub mod inspect;
pub mod keygen;
pub mod output;
pub mod recipients;

use std::io::Read;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use clap::{Parser, Subcommand, ValueEnum};
use tracing::debug;

use crate::core::envelope::Envelope;
use crate::core::keys::KeyFormat;
use crate::error::{EnvelopeError, Result};

/// Sealcast - multi-recipient envelope encryption.
#[derive(Parser)]
#[command(
    name = "sealcast",
    about = "Encrypt a message once, for many recipients",
    version
)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Top-level commands.
#[derive(Subcommand)]
pub enum Command {
    /// Generate a key pair for an identity
    Keygen {
        /// Identity id (e.g., alice@example.com)
        identity: String,
    },

    /// Print a stored key in portable form
    Export {
        /// Identity id
        identity: String,
        /// Export the private key instead of the public key
        #[arg(long)]
        private: bool,
        /// Output format (defaults to [keys] format in .sealcast.toml)
        #[arg(long, value_enum)]
        format: Option<FormatArg>,
    },

    /// Encrypt a message for one or more recipients
    Encrypt {
        /// Recipient, as `id` (address book or local key) or `id=key-file`
        #[arg(long = "to", value_name = "ID[=FILE]")]
        to: Vec<RecipientArg>,
        /// Sender identity (defaults to the login name)
        #[arg(long = "as", value_name = "IDENTITY")]
        sender: Option<String>,
        /// Do not add the sender as a recipient
        #[arg(long)]
        no_self: bool,
        /// Fail if any recipient key cannot be used
        #[arg(long)]
        strict: bool,
        /// Read the message from a file
        #[arg(short, long, conflicts_with = "message")]
        input: Option<PathBuf>,
        /// Message text (reads stdin if omitted)
        message: Option<String>,
    },

    /// Decrypt an envelope
    Decrypt {
        /// Identity to decrypt as (defaults to the login name)
        #[arg(long = "as", value_name = "IDENTITY")]
        identity: Option<String>,
        /// Read the envelope from a file (reads stdin if omitted)
        #[arg(short, long)]
        input: Option<PathBuf>,
    },

    /// Show who an envelope is addressed to
    Inspect {
        /// Read the envelope from a file (reads stdin if omitted)
        #[arg(short, long)]
        input: Option<PathBuf>,
    },

    /// Manage the recipient address book
    Recipients {
        #[command(subcommand)]
        action: RecipientsAction,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Address book subcommands.
#[derive(Subcommand)]
pub enum RecipientsAction {
    /// Add or replace a recipient's public key
    Add {
        /// Identity id
        identity: String,
        /// File holding the public key (JWK or PEM)
        key_file: PathBuf,
    },
    /// List recipients
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Remove a recipient
    Rm {
        /// Identity id
        identity: String,
    },
}

/// Key export format.
#[derive(Clone, Copy, ValueEnum)]
pub enum FormatArg {
    Jwk,
    Pem,
}

impl From<FormatArg> for KeyFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Jwk => KeyFormat::Jwk,
            FormatArg::Pem => KeyFormat::Pem,
        }
    }
}

/// A `--to` value: an identity, optionally with a key file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipientArg {
    pub identity: String,
    pub key_file: Option<PathBuf>,
}

impl FromStr for RecipientArg {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let (identity, key_file) = match s.split_once('=') {
            Some((id, file)) if file.is_empty() => {
                return Err(format!("missing key file after '{}='", id))
            }
            Some((id, file)) => (id, Some(PathBuf::from(file))),
            None => (s, None),
        };
        if identity.is_empty() {
            return Err("recipient identity cannot be empty".to_string());
        }
        Ok(Self {
            identity: identity.to_string(),
            key_file,
        })
    }
}

/// Execute a command.
///
/// # Errors
///
/// Returns error if the command execution fails.
pub fn execute(command: Command) -> Result<()> {
    match command {
        Command::Keygen { identity } => keygen::execute(&identity),
        Command::Export {
            identity,
            private,
            format,
        } => export::execute(&identity, private, format.map(KeyFormat::from)),
        Command::Encrypt {
            to,
            sender,
            no_self,
            strict,
            input,
            message,
        } => encrypt::execute(encrypt::Options {
            to,
            sender,
            include_self: !no_self,
            strict,
            input,
            message,
        }),
        Command::Decrypt { identity, input } => decrypt::execute(identity, input.as_deref()),
        Command::Inspect { input } => inspect::execute(input.as_deref()),
        Command::Recipients { action } => match action {
            RecipientsAction::Add { identity, key_file } => {
                recipients::add(&identity, &key_file)
            }
            RecipientsAction::List { json } => recipients::list(json),
            RecipientsAction::Rm { identity } => recipients::rm(&identity),
        },
        Command::Completions { shell } => completions::execute(shell),
    }
}

/// Read command input from a file, or stdin when no file is given.
pub(crate) fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => {
            debug!(path = %path.display(), "reading input file");
            Ok(std::fs::read_to_string(path)?)
        }
        None => {
            debug!("reading stdin");
            let mut text = String::new();
            std::io::stdin().read_to_string(&mut text)?;
            Ok(text)
        }
    }
}

/// Read an envelope from a file or stdin.
///
/// Input that does not even look like an envelope is rejected before
/// JSON parsing.
pub(crate) fn read_envelope(path: Option<&Path>) -> Result<Envelope> {
    let text = read_input(path)?;
    if !Envelope::is_envelope(&text) {
        return Err(EnvelopeError::Malformed("input is not an envelope".to_string()).into());
    }
    Envelope::parse(text.trim())
}

/// Identity to act as: explicit `--as`, else the login name.
pub(crate) fn resolve_identity(explicit: Option<String>) -> String {
    explicit.unwrap_or_else(whoami::username)
}
