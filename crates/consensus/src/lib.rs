//! Proof of Work consensus and validation rules for proofchain.
//!
//! This crate provides:
//! - The proof-of-work predicate and the sequential proof search
//! - Transaction validation (funds and signature checks)
//! - Chain validation (hash links and proofs)
//!
//! # Example
//!
//! ```rust
//! use proofchain_consensus::{ProofOfWork, Verification};
//! use proofchain_core::{hash_block, Block, Transaction};
//!
//! let genesis = Block::genesis();
//! let last_hash = hash_block(&genesis).to_hex();
//!
//! let mut txs = vec![Transaction::new("alice", "bob", "", 1.0)];
//! let proof = ProofOfWork::find_proof(&txs, &last_hash);
//! txs.push(Transaction::reward("miner", 10.0));
//!
//! let chain = vec![genesis, Block::new(1, last_hash, txs, proof)];
//! assert!(Verification::verify_chain(&chain));
//! ```

pub mod pow;
pub mod validator;

// Re-export commonly used types
pub use pow::{ProofOfWork, PROOF_PREFIX};
pub use validator::{BalanceSource, ValidationError, Verification};
