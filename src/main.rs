//! Sealcast - multi-recipient envelope encryption.

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use sealcast::cli::output;
use sealcast::cli::{execute, Cli};
use sealcast::error::{ConfigError, Error, StoreError};

fn main() {
    let cli = Cli::parse();

    // Initialize tracing subscriber with env-filter support
    let filter = EnvFilter::try_from_env("SEALCAST_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("sealcast=debug")
        } else {
            EnvFilter::new("sealcast=warn")
        }
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .without_time()
                .with_writer(std::io::stderr),
        )
        .init();

    if let Err(e) = execute(cli.command) {
        let suggestion = match &e {
            e if e.is_decrypt_failure() => {
                Some("the envelope is not addressed to this identity, or it was modified")
            }
            Error::Store(StoreError::NoPrivateKey(_)) => Some("run: sealcast keygen <identity>"),
            Error::Store(StoreError::NoPublicKey(_)) => {
                Some("run: sealcast recipients add <identity> <key-file>")
            }
            Error::Config(ConfigError::Parse(_) | ConfigError::InvalidValue { .. }) => {
                Some("check .sealcast.toml")
            }
            _ => None,
        };

        output::error(&e.to_string());
        if let Some(hint) = suggestion {
            output::hint(hint);
        }
        std::process::exit(1);
    }
}
