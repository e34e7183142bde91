//! Configuration file management.
//!
//! Handles reading, writing, and validating `.sealcast.toml` configuration
//! files. The file is optional; every section falls back to defaults.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::core::cipher::WrapPolicy;
use crate::core::constants::{self, DEFAULT_PARALLEL_THRESHOLD};
use crate::core::keys::{KeyFormat, PublicKey};
use crate::core::store::Filesystem;
use crate::core::types::{IdentityId, PortableKey};
use crate::core::validation::validate_identity;
use crate::error::{ConfigError, Result};

/// Project configuration stored in `.sealcast.toml`
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Config {
    /// Metadata about the configuration file
    #[serde(default)]
    pub sealcast: Meta,
    /// Hybrid cipher settings
    #[serde(default)]
    pub cipher: CipherConfig,
    /// Key export and storage settings
    #[serde(default)]
    pub keys: KeysConfig,
    /// Address book: identity id to portable public key.
    #[serde(default)]
    pub recipients: BTreeMap<IdentityId, PortableKey>,
}

/// Metadata section of the configuration
#[derive(Debug, Serialize, Deserialize)]
pub struct Meta {
    /// Configuration version
    pub version: String,
}

impl Default for Meta {
    fn default() -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// `[cipher]` section.
#[derive(Debug, Serialize, Deserialize)]
pub struct CipherConfig {
    /// What to do with recipients whose key cannot be used
    #[serde(default)]
    pub policy: WrapPolicy,
    /// Recipient count at which wrapping runs on worker threads
    #[serde(default = "default_parallel_threshold")]
    pub parallel_threshold: usize,
}

impl Default for CipherConfig {
    fn default() -> Self {
        Self {
            policy: WrapPolicy::default(),
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        }
    }
}

fn default_parallel_threshold() -> usize {
    DEFAULT_PARALLEL_THRESHOLD
}

/// `[keys]` section.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct KeysConfig {
    /// Default export format
    #[serde(default)]
    pub format: KeyFormat,
    /// Key directory; `~/.sealcast/keys` when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dir: Option<PathBuf>,
}

impl Config {
    /// Create a new configuration with defaults and the current version
    pub fn new() -> Self {
        Self::default()
    }

    /// Path to the configuration file in the current directory
    pub fn config_path() -> PathBuf {
        PathBuf::from(constants::CONFIG_FILE)
    }

    /// Check if a configuration file exists in the current directory
    pub fn exists() -> bool {
        Self::config_path().exists()
    }

    /// Load `.sealcast.toml` from the current directory, or defaults if absent.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Parse` if the TOML is malformed, or
    /// `ConfigError::InvalidValue` if validation fails.
    pub fn load_or_default() -> Result<Self> {
        let path = Self::config_path();
        if !path.exists() {
            debug!("no config file, using defaults");
            return Ok(Self::default());
        }
        Self::load_from(&path)
    }

    /// Load and validate a configuration file.
    pub fn load_from(path: &Path) -> Result<Self> {
        debug!(path = %path.display(), "loading config");

        let contents = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        let config: Self = toml::from_str(&contents).map_err(ConfigError::Parse)?;

        debug!(
            recipients = config.recipients.len(),
            policy = %config.cipher.policy,
            "config loaded"
        );

        config.validate()?;
        Ok(config)
    }

    /// Save configuration to `.sealcast.toml` in the current directory
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    /// Save configuration to a specific path.
    ///
    /// # Errors
    ///
    /// Returns error if serialization or file write fails.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        debug!(path = %path.display(), "saving config");

        let contents = toml::to_string_pretty(self).map_err(ConfigError::Serialize)?;
        std::fs::write(path, contents)?;

        Ok(())
    }

    /// Key store for this configuration.
    ///
    /// `$SEALCAST_KEY_DIR` wins over `[keys] dir`, which wins over the
    /// default `~/.sealcast/keys`.
    pub fn key_store(&self) -> Result<Filesystem> {
        if std::env::var_os(constants::KEY_DIR_ENV).is_none() {
            if let Some(dir) = &self.keys.dir {
                return Ok(Filesystem::new(dir));
            }
        }
        Filesystem::from_env()
    }

    /// Public key text for an address-book entry.
    pub fn recipient(&self, identity: &str) -> Option<&str> {
        self.recipients.get(identity).map(String::as_str)
    }

    /// Add or replace an address-book entry.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::InvalidIdentity` for a bad id, or
    /// `KeyError::Import` if the key is not a usable public key.
    pub fn add_recipient(&mut self, identity: &str, public_key: &str) -> Result<PublicKey> {
        validate_identity(identity)?;
        let key = PublicKey::import(public_key)?;
        self.recipients
            .insert(identity.to_string(), public_key.trim().to_string());
        debug!(identity = %identity, "recipient added");
        Ok(key)
    }

    /// Remove an address-book entry. Returns false if it was not present.
    pub fn remove_recipient(&mut self, identity: &str) -> bool {
        self.recipients.remove(identity).is_some()
    }

    /// Validate the configuration structure and contents
    ///
    /// Checks:
    /// - Version field is non-empty and semver-like
    /// - Parallel threshold is at least 1
    /// - Every address-book entry imports as a public key
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` on validation failure.
    pub fn validate(&self) -> Result<()> {
        debug!("validating config");

        let version = &self.sealcast.version;
        if version.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "version",
                reason: "cannot be empty".to_string(),
            }
            .into());
        }

        let version_parts: Vec<&str> = version.split('.').collect();
        if version_parts.len() < 2 || version_parts.iter().any(|p| p.is_empty()) {
            return Err(ConfigError::InvalidValue {
                field: "version",
                reason: format!("not a valid semver: {}", version),
            }
            .into());
        }

        if self.cipher.parallel_threshold == 0 {
            return Err(ConfigError::InvalidValue {
                field: "parallel_threshold",
                reason: "must be at least 1".to_string(),
            }
            .into());
        }

        for (identity, key) in &self.recipients {
            if let Err(e) = validate_identity(identity) {
                return Err(ConfigError::InvalidValue {
                    field: "recipients",
                    reason: e.to_string(),
                }
                .into());
            }
            if let Err(e) = PublicKey::import(key) {
                return Err(ConfigError::InvalidValue {
                    field: "recipients",
                    reason: format!("invalid public key for '{}': {}", identity, e),
                }
                .into());
            }
        }

        Ok(())
    }
}
