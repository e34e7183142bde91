//! Command helper methods for Test.

use super::Test;
use assert_cmd::Command;
use std::path::PathBuf;
use std::process::Output;

impl Test {
    /// Create a sealcast command with correct environment variables.
    ///
    /// Returns a Command configured with:
    /// - HOME set to the temporary home directory
    /// - Current directory set to the test working directory
    /// - No inherited key directory or log filter overrides
    pub fn cmd(&self) -> Command {
        #[allow(deprecated)]
        let mut cmd = Command::cargo_bin("sealcast").expect("failed to find sealcast binary");
        cmd.env("HOME", self.home.path());
        // Windows uses USERPROFILE instead of HOME for home directory
        cmd.env("USERPROFILE", self.home.path());
        cmd.env("NO_COLOR", "1");
        cmd.env_remove("SEALCAST_KEY_DIR");
        cmd.env_remove("SEALCAST_LOG");
        cmd.current_dir(self.dir.path());
        cmd
    }

    /// Shortcut for `sealcast keygen`.
    pub fn keygen(&self, identity: &str) -> Output {
        self.cmd()
            .args(["keygen", identity])
            .output()
            .expect("failed to run sealcast keygen")
    }

    /// Shortcut for `sealcast export`.
    pub fn export(&self, identity: &str) -> Output {
        self.cmd()
            .args(["export", identity])
            .output()
            .expect("failed to run sealcast export")
    }

    /// Export an identity's public key into `<identity>.jwk` and return the path.
    pub fn export_to_file(&self, identity: &str) -> PathBuf {
        let output = self.export(identity);
        assert!(
            output.status.success(),
            "Failed to export {}: {}",
            identity,
            String::from_utf8_lossy(&output.stderr)
        );
        self.write(
            &format!("{}.jwk", identity),
            &String::from_utf8_lossy(&output.stdout),
        )
    }

    /// Shortcut for `sealcast encrypt --as <sender> [args...] <message>`.
    pub fn encrypt(&self, sender: &str, args: &[&str], message: &str) -> Output {
        self.cmd()
            .args(["encrypt", "--as", sender])
            .args(args)
            .arg(message)
            .output()
            .expect("failed to run sealcast encrypt")
    }

    /// Shortcut for `sealcast decrypt --as <identity>` with the envelope on stdin.
    pub fn decrypt(&self, identity: &str, envelope: &str) -> Output {
        self.cmd()
            .args(["decrypt", "--as", identity])
            .write_stdin(envelope)
            .output()
            .expect("failed to run sealcast decrypt")
    }

    /// Shortcut for `sealcast inspect` with the envelope on stdin.
    pub fn inspect(&self, envelope: &str) -> Output {
        self.cmd()
            .arg("inspect")
            .write_stdin(envelope)
            .output()
            .expect("failed to run sealcast inspect")
    }

    /// Shortcut for `sealcast recipients add`.
    pub fn recipients_add(&self, identity: &str, key_file: &std::path::Path) -> Output {
        self.cmd()
            .args(["recipients", "add", identity])
            .arg(key_file)
            .output()
            .expect("failed to run sealcast recipients add")
    }

    /// Shortcut for `sealcast recipients list`.
    pub fn recipients_list(&self) -> Output {
        self.cmd()
            .args(["recipients", "list"])
            .output()
            .expect("failed to run sealcast recipients list")
    }

    /// Shortcut for `sealcast recipients list --json`.
    pub fn recipients_list_json(&self) -> Output {
        self.cmd()
            .args(["recipients", "list", "--json"])
            .output()
            .expect("failed to run sealcast recipients list --json")
    }

    /// Shortcut for `sealcast recipients rm`.
    pub fn recipients_rm(&self, identity: &str) -> Output {
        self.cmd()
            .args(["recipients", "rm", identity])
            .output()
            .expect("failed to run sealcast recipients rm")
    }
}
