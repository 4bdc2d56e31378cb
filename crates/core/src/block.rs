//! Block structure and the genesis block.

use crate::hash::{hash_block, Hash};
use crate::transaction::Transaction;
use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Proof recorded in the genesis block.
pub const GENESIS_PROOF: u64 = 100;

/// A block of transactions linked to its predecessor by hash.
///
/// Field order matches the persisted layout:
/// `{index, previous_hash, transactions, proof, timestamp}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    /// Position in the chain (0 for genesis).
    pub index: u64,
    /// Hex hash of the previous block, empty for genesis.
    pub previous_hash: String,
    /// Ordered transactions; a mined block ends with its reward.
    pub transactions: Vec<Transaction>,
    /// Proof-of-work solution against the predecessor.
    pub proof: u64,
    /// Unix timestamp in seconds.
    pub timestamp: f64,
}

impl Block {
    /// Create a block stamped with the current time.
    pub fn new(
        index: u64,
        previous_hash: impl Into<String>,
        transactions: Vec<Transaction>,
        proof: u64,
    ) -> Self {
        Self {
            index,
            previous_hash: previous_hash.into(),
            transactions,
            proof,
            timestamp: Self::current_timestamp(),
        }
    }

    /// Create the fixed genesis block.
    pub fn genesis() -> Self {
        Self {
            index: 0,
            previous_hash: String::new(),
            transactions: Vec::new(),
            proof: GENESIS_PROOF,
            timestamp: 0.0,
        }
    }

    /// Get the current Unix timestamp with sub-second precision.
    pub fn current_timestamp() -> f64 {
        Utc::now().timestamp_micros() as f64 / 1_000_000.0
    }

    /// Get the block hash.
    pub fn hash(&self) -> Hash {
        hash_block(self)
    }

    /// Check if this is the genesis block.
    pub fn is_genesis(&self) -> bool {
        self.index == 0 && self.previous_hash.is_empty()
    }

    /// Get the number of transactions in this block.
    pub fn tx_count(&self) -> usize {
        self.transactions.len()
    }

    /// Transactions that took part in the proof-of-work search.
    ///
    /// The trailing transaction is the mining reward, which did not exist
    /// yet when the proof was found.
    pub fn proof_transactions(&self) -> &[Transaction] {
        self.transactions
            .split_last()
            .map(|(_, rest)| rest)
            .unwrap_or(&[])
    }
}
