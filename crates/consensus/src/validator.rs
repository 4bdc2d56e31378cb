//! Transaction and chain validation rules.
//!
//! Every check here is pure: the balance lookup and the signature check are
//! supplied by the caller, so the same rules can be evaluated against any
//! chain state.

use crate::pow::ProofOfWork;
use proofchain_core::{hash_block, Block, SignatureVerifier, Transaction};
use thiserror::Error;
use tracing::warn;

/// Errors that can occur during validation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("transaction signature verification failed")]
    InvalidSignature,

    #[error("insufficient balance (required {required}, available {available})")]
    InsufficientFunds { required: f64, available: f64 },

    #[error("block {index} previous_hash does not match its predecessor")]
    InvalidPreviousHash { index: u64 },

    #[error("block {index} proof of work is invalid")]
    InvalidProof { index: u64 },
}

pub type Result<T> = std::result::Result<T, ValidationError>;

/// Source of participant balances for funds checks.
pub trait BalanceSource {
    fn balance_of(&self, participant: &str) -> f64;
}

impl<F> BalanceSource for F
where
    F: Fn(&str) -> f64,
{
    fn balance_of(&self, participant: &str) -> f64 {
        self(participant)
    }
}

/// Validation rules for transactions and chains.
pub struct Verification;

impl Verification {
    /// Validate a single transaction.
    ///
    /// With `check_funds`, the sender's balance must cover the amount and
    /// the signature must verify; otherwise only the signature is checked.
    pub fn validate_transaction(
        tx: &Transaction,
        balances: &dyn BalanceSource,
        verifier: &dyn SignatureVerifier,
        check_funds: bool,
    ) -> Result<()> {
        if check_funds {
            let available = balances.balance_of(&tx.sender);
            if available < tx.amount {
                return Err(ValidationError::InsufficientFunds {
                    required: tx.amount,
                    available,
                });
            }
        }

        if !verifier.verify_transaction(tx) {
            return Err(ValidationError::InvalidSignature);
        }

        Ok(())
    }

    /// Boolean form of [`Verification::validate_transaction`].
    pub fn verify_transaction(
        tx: &Transaction,
        balances: &dyn BalanceSource,
        verifier: &dyn SignatureVerifier,
        check_funds: bool,
    ) -> bool {
        Self::validate_transaction(tx, balances, verifier, check_funds).is_ok()
    }

    /// Validate the hash links and proofs of a whole chain.
    ///
    /// The genesis block is taken as given. Stops at the first bad block.
    pub fn validate_chain(chain: &[Block]) -> Result<()> {
        for (prev, block) in chain.iter().zip(chain.iter().skip(1)) {
            if block.previous_hash != hash_block(prev).to_hex() {
                warn!(index = block.index, "previous hash mismatch");
                return Err(ValidationError::InvalidPreviousHash { index: block.index });
            }

            if !ProofOfWork::valid_proof(
                block.proof_transactions(),
                &block.previous_hash,
                block.proof,
            ) {
                warn!(index = block.index, "proof of work is invalid");
                return Err(ValidationError::InvalidProof { index: block.index });
            }
        }

        Ok(())
    }

    /// Boolean form of [`Verification::validate_chain`].
    pub fn verify_chain(chain: &[Block]) -> bool {
        Self::validate_chain(chain).is_ok()
    }

    /// Check the signatures of every pending transaction.
    pub fn verify_open_transactions(
        transactions: &[Transaction],
        balances: &dyn BalanceSource,
        verifier: &dyn SignatureVerifier,
    ) -> bool {
        transactions
            .iter()
            .all(|tx| Self::verify_transaction(tx, balances, verifier, false))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proofchain_core::{Ed25519Verifier, Keypair};

    struct AcceptAll;

    impl SignatureVerifier for AcceptAll {
        fn verify_transaction(&self, _tx: &Transaction) -> bool {
            true
        }
    }

    fn flat(amount: f64) -> impl Fn(&str) -> f64 {
        move |_| amount
    }

    /// Mine `count` blocks on top of genesis, one payment plus reward each.
    fn build_chain(count: u64) -> Vec<Block> {
        let mut chain = vec![Block::genesis()];
        for i in 1..=count {
            let last_hash = hash_block(&chain[chain.len() - 1]).to_hex();
            let mut txs = vec![Transaction::new("alice", "bob", "sig", i as f64)];
            let proof = ProofOfWork::find_proof(&txs, &last_hash);
            txs.push(Transaction::reward("miner", 10.0));
            chain.push(Block::new(i, last_hash, txs, proof));
        }
        chain
    }

    #[test]
    fn test_valid_transaction_with_funds() {
        let kp = Keypair::generate();
        let tx = kp.signed_transfer("bob", 5.0);

        assert!(Verification::verify_transaction(&tx, &flat(5.0), &Ed25519Verifier, true));
    }

    #[test]
    fn test_insufficient_funds_rejected() {
        let kp = Keypair::generate();
        let tx = kp.signed_transfer("bob", 5.0);

        let err = Verification::validate_transaction(&tx, &flat(4.0), &Ed25519Verifier, true)
            .unwrap_err();
        assert_eq!(
            err,
            ValidationError::InsufficientFunds {
                required: 5.0,
                available: 4.0
            }
        );
    }

    #[test]
    fn test_funds_skipped_without_check() {
        let kp = Keypair::generate();
        let tx = kp.signed_transfer("bob", 5.0);

        assert!(Verification::verify_transaction(&tx, &flat(0.0), &Ed25519Verifier, false));
    }

    #[test]
    fn test_invalid_signature_rejected() {
        let kp = Keypair::generate();
        let mut tx = kp.signed_transfer("bob", 5.0);
        tx.recipient = "mallory".to_string();

        assert_eq!(
            Verification::validate_transaction(&tx, &flat(100.0), &Ed25519Verifier, true),
            Err(ValidationError::InvalidSignature)
        );
        assert!(!Verification::verify_transaction(&tx, &flat(100.0), &Ed25519Verifier, false));
    }

    #[test]
    fn test_balance_is_looked_up_for_sender() {
        let tx = Transaction::new("alice", "bob", "", 3.0);
        let balances = |who: &str| if who == "alice" { 3.0 } else { 0.0 };

        assert!(Verification::verify_transaction(&tx, &balances, &AcceptAll, true));

        let tx = Transaction::new("carol", "bob", "", 3.0);
        assert!(!Verification::verify_transaction(&tx, &balances, &AcceptAll, true));
    }

    #[test]
    fn test_verify_open_transactions() {
        let kp = Keypair::generate();
        let good = vec![kp.signed_transfer("bob", 1.0), kp.signed_transfer("carol", 2.0)];
        assert!(Verification::verify_open_transactions(&good, &flat(0.0), &Ed25519Verifier));

        let mut bad = good.clone();
        bad[1].amount = 20.0;
        assert!(!Verification::verify_open_transactions(&bad, &flat(0.0), &Ed25519Verifier));

        assert!(Verification::verify_open_transactions(&[], &flat(0.0), &Ed25519Verifier));
    }

    #[test]
    fn test_genesis_only_chain_is_valid() {
        assert!(Verification::verify_chain(&[Block::genesis()]));
        assert!(Verification::verify_chain(&[]));
    }

    #[test]
    fn test_mined_chain_is_valid() {
        assert!(Verification::verify_chain(&build_chain(3)));
    }

    #[test]
    fn test_broken_link_detected() {
        let mut chain = build_chain(2);
        chain[2].previous_hash = "ff".repeat(32);

        assert_eq!(
            Verification::validate_chain(&chain),
            Err(ValidationError::InvalidPreviousHash { index: 2 })
        );
    }

    #[test]
    fn test_tampered_history_detected() {
        let mut chain = build_chain(3);
        chain[1].transactions[0].amount = 1000.0;
        assert!(!Verification::verify_chain(&chain));

        // The reward sits outside the proof, so only the next block's link catches it.
        let mut chain = build_chain(3);
        chain[1].transactions[1].amount = 1000.0;
        assert_eq!(
            Verification::validate_chain(&chain),
            Err(ValidationError::InvalidPreviousHash { index: 2 })
        );
    }

    #[test]
    fn test_tampered_tip_detected_by_proof() {
        let mut chain = build_chain(2);
        let proof = chain[2].proof;
        let last_hash = chain[2].previous_hash.clone();
        // Pick an amount under which the recorded proof no longer solves the challenge.
        let amount = (100..)
            .map(f64::from)
            .find(|&a| {
                let tx = Transaction::new("alice", "bob", "sig", a);
                !ProofOfWork::valid_proof(&[tx], &last_hash, proof)
            })
            .unwrap();
        chain[2].transactions[0].amount = amount;

        assert_eq!(
            Verification::validate_chain(&chain),
            Err(ValidationError::InvalidProof { index: 2 })
        );
    }

    #[test]
    fn test_reward_excluded_from_proof() {
        let mut chain = build_chain(1);
        let reward = chain[1].transactions.last_mut().unwrap();
        reward.amount = 10_000.0;

        // The reward is outside the proof input, and this is the tip, so no
        // later block pins its hash.
        assert!(Verification::verify_chain(&chain));
    }
}
