//! Filesystem-based key storage implementation.
//!
//! Stores each identity's key pair as JWK files under
//! `<root>/<identity>/` (default root: `~/.sealcast/keys`).

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use super::KeyStore;
use crate::core::constants::{KEY_DIR, KEY_DIR_ENV, PRIVATE_KEY_FILE, PUBLIC_KEY_FILE};
use crate::core::keys::{KeyFormat, KeyPair, PrivateKey, PublicKey};
use crate::core::validation::validate_identity;
use crate::error::{Result, StoreError};

/// Filesystem-based key storage.
///
/// Private keys are written with mode 0600 and created with `create_new`,
/// so of several processes racing to create the same identity exactly one
/// succeeds.
#[derive(Debug, Clone)]
pub struct Filesystem {
    root: PathBuf,
}

impl Filesystem {
    /// Store rooted at an explicit directory.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Store rooted at `$SEALCAST_KEY_DIR`, or `~/.sealcast/keys`.
    pub fn from_env() -> Result<Self> {
        if let Some(dir) = std::env::var_os(KEY_DIR_ENV) {
            return Ok(Self::new(dir));
        }
        Ok(Self::new(Self::default_root()?))
    }

    /// Default key directory (`~/.sealcast/keys`).
    pub fn default_root() -> Result<PathBuf> {
        let home = dirs::home_dir().ok_or_else(|| {
            StoreError::WriteFailed(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "unable to determine home directory",
            ))
        })?;
        Ok(home.join(KEY_DIR))
    }

    /// Directory holding all identities.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory for a specific identity's keys.
    pub fn identity_dir(&self, identity: &str) -> Result<PathBuf> {
        validate_identity(identity)?;
        Ok(self.root.join(identity))
    }

    fn write_private(path: &Path, contents: &str) -> std::io::Result<()> {
        Self::create_private(path, |file| {
            file.write_all(contents.as_bytes())?;
            file.write_all(b"\n")?;
            file.sync_all()
        })
    }

    /// Create `path` exclusively (mode 0600) and fill it.
    ///
    /// A file that fails to fill is removed again so the identity can be
    /// created later.
    fn create_private<F>(path: &Path, fill: F) -> std::io::Result<()>
    where
        F: FnOnce(&mut fs::File) -> std::io::Result<()>,
    {
        let mut options = fs::OpenOptions::new();
        options.write(true).create_new(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o600);
        }

        let mut file = options.open(path)?;
        if let Err(e) = fill(&mut file) {
            drop(file);
            if let Err(cleanup) = fs::remove_file(path) {
                warn!(path = %path.display(), error = %cleanup, "failed to remove partial key file");
            }
            return Err(e);
        }
        Ok(())
    }

    fn read_key_file(path: &Path) -> Result<String> {
        fs::read_to_string(path).map_err(|e| StoreError::ReadFailed(e).into())
    }
}

impl KeyStore for Filesystem {
    fn insert(&self, identity: &str, pair: KeyPair) -> Result<()> {
        let dir = self.identity_dir(identity)?;
        debug!(path = %dir.display(), "storing key pair");

        fs::create_dir_all(&dir).map_err(StoreError::WriteFailed)?;

        let private = pair.private().export(KeyFormat::Jwk)?;
        let private_path = dir.join(PRIVATE_KEY_FILE);
        Self::write_private(&private_path, &private).map_err(|e| {
            if e.kind() == std::io::ErrorKind::AlreadyExists {
                StoreError::AlreadyExists(identity.to_string())
            } else {
                StoreError::WriteFailed(e)
            }
        })?;

        let public = pair.public().export(KeyFormat::Jwk)?;
        let public_path = dir.join(PUBLIC_KEY_FILE);
        fs::write(&public_path, format!("{}\n", public)).map_err(StoreError::WriteFailed)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&public_path, fs::Permissions::from_mode(0o644))
                .map_err(StoreError::WriteFailed)?;
        }

        debug!(path = %private_path.display(), "key pair saved");
        Ok(())
    }

    fn load_private_key(&self, identity: &str) -> Result<PrivateKey> {
        let key_path = self.identity_dir(identity)?.join(PRIVATE_KEY_FILE);
        debug!(path = %key_path.display(), "loading private key");

        if !key_path.exists() {
            return Err(StoreError::NoPrivateKey(identity.to_string()).into());
        }

        #[cfg(unix)]
        {
            if let Err(e) = crate::core::validation::validate_file_permissions(&key_path, 0o600) {
                warn!(error = %e, "insecure key file permissions");
            }
        }

        let contents = Self::read_key_file(&key_path)?;
        PrivateKey::import(&contents).map_err(|e| StoreError::InvalidFormat(e.to_string()).into())
    }

    fn load_public_key(&self, identity: &str) -> Result<PublicKey> {
        let dir = self.identity_dir(identity)?;
        let public_path = dir.join(PUBLIC_KEY_FILE);

        if public_path.exists() {
            let contents = Self::read_key_file(&public_path)?;
            return PublicKey::import(&contents)
                .map_err(|e| StoreError::InvalidFormat(e.to_string()).into());
        }

        // The public file is written after the private one; derive it if a
        // concurrent insert has not finished yet.
        if dir.join(PRIVATE_KEY_FILE).exists() {
            return self.load_private_key(identity).map(|key| key.public_key());
        }

        Err(StoreError::NoPublicKey(identity.to_string()).into())
    }

    fn has_key(&self, identity: &str) -> bool {
        self.identity_dir(identity)
            .map(|dir| dir.join(PRIVATE_KEY_FILE).exists())
            .unwrap_or(false)
    }
}
