//! Proof of Work admission rule.
//!
//! A proof is any integer that, hashed together with the pending
//! transactions and the previous block's hash, yields a digest whose hex
//! form starts with [`PROOF_PREFIX`]. The difficulty is fixed.

use proofchain_core::{hash_concat, CanonicalTransaction, Hash, Transaction};
use tracing::trace;

/// Required prefix of the hex digest for a proof to be valid.
pub const PROOF_PREFIX: &str = "00";

/// Proof of Work search and verification.
pub struct ProofOfWork;

impl ProofOfWork {
    /// Digest of `transactions ‖ last_hash ‖ proof`.
    ///
    /// Transactions contribute their canonical forms, in order, as one JSON
    /// array; the proof contributes its decimal representation.
    pub fn guess_hash(transactions: &[Transaction], last_hash: &str, proof: u64) -> Hash {
        let canonical: Vec<CanonicalTransaction<'_>> =
            transactions.iter().map(Transaction::canonical).collect();
        let encoded = serde_json::to_vec(&canonical).expect("serialization should not fail");

        hash_concat(&[
            &encoded,
            last_hash.as_bytes(),
            proof.to_string().as_bytes(),
        ])
    }

    /// Check whether `proof` solves the challenge for these inputs.
    pub fn valid_proof(transactions: &[Transaction], last_hash: &str, proof: u64) -> bool {
        let guess = Self::guess_hash(transactions, last_hash, proof).to_hex();
        trace!(proof, %guess, "trying proof");
        guess.starts_with(PROOF_PREFIX)
    }

    /// Find the smallest valid proof, trying 0, 1, 2, ... without bound.
    pub fn find_proof(transactions: &[Transaction], last_hash: &str) -> u64 {
        (0..=u64::MAX)
            .find(|&proof| Self::valid_proof(transactions, last_hash, proof))
            .unwrap_or(u64::MAX)
    }

    /// Find the smallest valid proof among the first `max_attempts` candidates.
    pub fn find_proof_bounded(
        transactions: &[Transaction],
        last_hash: &str,
        max_attempts: u64,
    ) -> Option<u64> {
        (0..max_attempts).find(|&proof| Self::valid_proof(transactions, last_hash, proof))
    }
}
