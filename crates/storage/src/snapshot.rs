//! Line-delimited encoding of the ledger state.
//!
//! ```text
//! [ {index, previous_hash, transactions: [...], proof, timestamp}, ... ]\n
//! [ {sender, recipient, signature, amount}, ... ]
//! ```

use crate::store::{Result, StorageError};
use proofchain_core::{Block, Transaction};
use serde::{Deserialize, Serialize};

/// Everything the ledger needs to resume: the chain and the pending pool.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LedgerSnapshot {
    pub chain: Vec<Block>,
    pub open_transactions: Vec<Transaction>,
}

impl LedgerSnapshot {
    pub fn new(chain: Vec<Block>, open_transactions: Vec<Transaction>) -> Self {
        Self {
            chain,
            open_transactions,
        }
    }

    /// Encode as two JSON lines: the chain, then the pending pool.
    pub fn encode(&self) -> Result<String> {
        let chain = serde_json::to_string(&self.chain)?;
        let pool = serde_json::to_string(&self.open_transactions)?;
        Ok(format!("{chain}\n{pool}"))
    }

    /// Decode the two-line form. Both records must be present.
    pub fn decode(text: &str) -> Result<Self> {
        let mut lines = text.lines();
        let chain_line = lines
            .next()
            .ok_or_else(|| StorageError::Corrupt("missing chain record".into()))?;
        let pool_line = lines
            .next()
            .ok_or_else(|| StorageError::Corrupt("missing pending transactions record".into()))?;

        Ok(Self {
            chain: serde_json::from_str(chain_line)?,
            open_transactions: serde_json::from_str(pool_line)?,
        })
    }
}
