//! Core ledger primitives for proofchain.
//!
//! This crate provides the fundamental types used throughout the ledger:
//! - Hashing (SHA-256 digests, canonical block hashes)
//! - Transactions and their canonical form
//! - Blocks and the genesis block
//! - Ed25519 transaction signing and verification

pub mod block;
pub mod crypto;
pub mod hash;
pub mod transaction;

// Re-export commonly used types at the crate root
pub use block::{Block, GENESIS_PROOF};
pub use crypto::{CryptoError, Ed25519Verifier, Keypair, SignatureVerifier};
pub use hash::{hash, hash_block, hash_concat, Hash};
pub use transaction::{CanonicalTransaction, Transaction, MINING_SENDER};
