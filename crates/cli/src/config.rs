//! Node configuration loaded from a TOML file.

use anyhow::{Context, Result};
use proofchain_chain::{BlockchainConfig, MINING_REWARD};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Configuration file looked up when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "proofchain.toml";

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct NodeConfig {
    pub storage: StorageConfig,
    pub wallet: WalletConfig,
    pub mining: MiningConfig,
    pub log: LogConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Ledger state file.
    pub path: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct WalletConfig {
    /// Key pair file used by the wallet commands.
    pub key_file: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct MiningConfig {
    pub reward: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// `tracing` filter directive, used when `RUST_LOG` is unset.
    pub filter: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("blockchain.txt"),
        }
    }
}

impl Default for WalletConfig {
    fn default() -> Self {
        Self {
            key_file: PathBuf::from("wallet.json"),
        }
    }
}

impl Default for MiningConfig {
    fn default() -> Self {
        Self {
            reward: MINING_REWARD,
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: "warn".to_string(),
        }
    }
}

impl NodeConfig {
    /// Load configuration.
    ///
    /// An explicit path must exist; without one, [`DEFAULT_CONFIG_FILE`] is
    /// read if present and defaults are used otherwise.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(p) => p,
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => Path::new(DEFAULT_CONFIG_FILE),
            None => return Ok(Self::default()),
        };

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::parse(&contents).with_context(|| format!("Invalid config file: {}", path.display()))
    }

    pub fn parse(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Apply command-line overrides.
    pub fn with_overrides(mut self, data_file: Option<PathBuf>, key_file: Option<PathBuf>) -> Self {
        if let Some(path) = data_file {
            self.storage.path = path;
        }
        if let Some(path) = key_file {
            self.wallet.key_file = path;
        }
        self
    }

    pub fn blockchain_config(&self) -> BlockchainConfig {
        BlockchainConfig {
            mining_reward: self.mining.reward,
        }
    }
}
