//! SHA-256 hashing utilities for the ledger.

use crate::block::Block;
use serde::{Deserialize, Serialize};
use serde_json::json;
use sha2::{Digest, Sha256};
use std::fmt;

/// A 256-bit SHA-256 digest with hex `Display` and short `Debug` output.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Hash(pub [u8; 32]);

impl Hash {
    /// Convert to a lowercase hex string (64 characters, no prefix).
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Debug for Hash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Hash({})", &self.to_hex()[..8])
    }
}

impl fmt::Display for Hash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Hash arbitrary data using SHA-256.
pub fn hash(data: &[u8]) -> Hash {
    Hash(Sha256::digest(data).into())
}

/// Hash multiple pieces of data by concatenating them.
pub fn hash_concat(parts: &[&[u8]]) -> Hash {
    let mut hasher = Sha256::new();
    for part in parts {
        hasher.update(part);
    }
    Hash(hasher.finalize().into())
}

/// Hash a block over its canonical serialization.
///
/// Every field takes part, keys are emitted in sorted order, and each
/// transaction is reduced to its `sender`/`recipient`/`amount` form, so two
/// blocks that differ only in transaction signatures hash identically.
pub fn hash_block(block: &Block) -> Hash {
    let transactions: Vec<_> = block
        .transactions
        .iter()
        .map(|tx| {
            json!({
                "amount": tx.amount,
                "recipient": tx.recipient,
                "sender": tx.sender,
            })
        })
        .collect();

    let canonical = json!({
        "index": block.index,
        "previous_hash": block.previous_hash,
        "proof": block.proof,
        "timestamp": block.timestamp,
        "transactions": transactions,
    });

    hash(canonical.to_string().as_bytes())
}
