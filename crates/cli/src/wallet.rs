//! Wallet: the node's key pair and its file on disk.

use anyhow::{bail, Context, Result};
use proofchain_core::Keypair;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Serialize, Deserialize)]
struct KeyFile {
    public_key: String,
    private_key: String,
}

/// Holds at most one key pair; empty until keys are created or loaded.
#[derive(Debug, Default)]
pub struct Wallet {
    keypair: Option<Keypair>,
}

impl Wallet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the current keys with a freshly generated pair.
    pub fn create_keys(&mut self) {
        self.keypair = Some(Keypair::generate());
    }

    /// Load keys from `path`, replacing the current ones.
    pub fn load_keys(&mut self, path: &Path) -> Result<()> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read key file: {}", path.display()))?;
        let file: KeyFile = serde_json::from_str(&contents).context("Malformed key file")?;

        let keypair =
            Keypair::from_private_key_hex(&file.private_key).context("Invalid private key")?;
        if keypair.public_key_hex() != file.public_key {
            bail!("Public key in {} does not match its private key", path.display());
        }

        self.keypair = Some(keypair);
        Ok(())
    }

    /// Write the current keys to `path`.
    pub fn save_keys(&self, path: &Path) -> Result<()> {
        let keypair = self.keypair.as_ref().context("No keys to save")?;
        let file = KeyFile {
            public_key: keypair.public_key_hex(),
            private_key: keypair.private_key_hex(),
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, serde_json::to_string_pretty(&file)?)
            .with_context(|| format!("Failed to write key file: {}", path.display()))?;
        Ok(())
    }

    /// Participant identity, if keys are present.
    pub fn public_key(&self) -> Option<String> {
        self.keypair.as_ref().map(Keypair::public_key_hex)
    }

    pub fn sign_transaction(&self, sender: &str, recipient: &str, amount: f64) -> Result<String> {
        let keypair = self.keypair.as_ref().context("No wallet keys loaded")?;
        Ok(keypair.sign_transaction(sender, recipient, amount))
    }
}
