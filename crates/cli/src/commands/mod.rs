//! CLI commands module.

use crate::config::NodeConfig;
use crate::wallet::Wallet;
use anyhow::{Context, Result};
use clap::Subcommand;
use proofchain_chain::Blockchain;
use proofchain_core::Ed25519Verifier;
use proofchain_storage::FileStore;

pub mod account;
pub mod block;
pub mod tx;

#[derive(Subcommand)]
pub enum Commands {
    /// Wallet keys and balances
    Account(account::AccountArgs),
    /// Transaction operations
    Tx(tx::TxArgs),
    /// Block operations
    Block(block::BlockArgs),
}

pub fn run(cmd: Commands, config: &NodeConfig) -> Result<()> {
    match cmd {
        Commands::Account(args) => account::run(args, config),
        Commands::Tx(args) => tx::run(args, config),
        Commands::Block(args) => block::run(args, config),
    }
}

/// Open the ledger stored at the configured path.
pub fn open_blockchain(config: &NodeConfig, hosting_node: Option<String>) -> Blockchain {
    Blockchain::with_config(
        hosting_node,
        Box::new(FileStore::new(&config.storage.path)),
        config.blockchain_config(),
        Box::new(Ed25519Verifier),
    )
}

/// Load the wallet from the configured key file.
pub fn load_wallet(config: &NodeConfig) -> Result<Wallet> {
    let mut wallet = Wallet::new();
    wallet.load_keys(&config.wallet.key_file).with_context(|| {
        "No usable wallet. Use 'proofchain account new' to create one."
    })?;
    Ok(wallet)
}
