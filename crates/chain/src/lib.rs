//! Ledger engine for proofchain.
//!
//! This crate brings together all components to run a single-node ledger:
//! - **Consensus**: proof-of-work search and chain validation
//! - **Mempool**: pool of admitted, not yet mined transactions
//! - **Storage**: whole-state snapshots after every change
//!
//! # Example
//!
//! ```rust,no_run
//! use proofchain_chain::Blockchain;
//! use proofchain_core::Keypair;
//! use proofchain_storage::FileStore;
//!
//! let keypair = Keypair::generate();
//! let store = FileStore::new("./blockchain.txt");
//! let mut blockchain = Blockchain::new(Some(keypair.public_key_hex()), Box::new(store));
//!
//! // Earn a reward, then spend part of it
//! blockchain.mine_block().unwrap();
//! let tx = keypair.signed_transfer("recipient", 2.5);
//! blockchain
//!     .add_transaction(&tx.recipient, &tx.sender, &tx.signature, tx.amount)
//!     .unwrap();
//! blockchain.mine_block().unwrap();
//! assert!(blockchain.verify_chain());
//! ```

pub mod blockchain;
pub mod mempool;

// Re-export commonly used types
pub use blockchain::{
    Blockchain, BlockchainConfig, BlockchainStats, LedgerError, Result, MINING_REWARD,
};
pub use mempool::{Mempool, MempoolStats};
