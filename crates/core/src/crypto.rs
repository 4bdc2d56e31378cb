//! Ed25519 signing and verification of transactions.
//!
//! A participant's identity is the hex encoding of their public key, so a
//! transaction can be checked using nothing but its own `sender` field.

use crate::transaction::Transaction;
use ed25519_dalek::{Signature, Signer, SigningKey, Verifier, VerifyingKey};
use rand::rngs::OsRng;
use std::fmt;
use thiserror::Error;

/// Errors that can occur during cryptographic operations.
#[derive(Debug, Error)]
pub enum CryptoError {
    #[error("invalid signature")]
    InvalidSignature,
    #[error("invalid public key")]
    InvalidPublicKey,
    #[error("invalid private key")]
    InvalidPrivateKey,
    #[error("signature verification failed")]
    VerificationFailed,
}

/// Capability to decide whether a transaction's signature is valid.
pub trait SignatureVerifier: Send + Sync {
    fn verify_transaction(&self, tx: &Transaction) -> bool;
}

/// Verifies Ed25519 signatures against the public key named by the sender.
#[derive(Debug, Clone, Copy, Default)]
pub struct Ed25519Verifier;

impl Ed25519Verifier {
    /// Verify, reporting why a signature was refused.
    pub fn check(tx: &Transaction) -> Result<(), CryptoError> {
        let public_key = parse_public_key(&tx.sender)?;
        let signature = parse_signature(&tx.signature)?;
        let payload = Transaction::signing_payload(&tx.sender, &tx.recipient, tx.amount);

        public_key
            .verify(&payload, &signature)
            .map_err(|_| CryptoError::VerificationFailed)
    }
}

impl SignatureVerifier for Ed25519Verifier {
    fn verify_transaction(&self, tx: &Transaction) -> bool {
        Self::check(tx).is_ok()
    }
}

fn parse_public_key(s: &str) -> Result<VerifyingKey, CryptoError> {
    let bytes: [u8; 32] = hex::decode(s)
        .ok()
        .and_then(|b| b.try_into().ok())
        .ok_or(CryptoError::InvalidPublicKey)?;
    VerifyingKey::from_bytes(&bytes).map_err(|_| CryptoError::InvalidPublicKey)
}

fn parse_signature(s: &str) -> Result<Signature, CryptoError> {
    let bytes: [u8; 64] = hex::decode(s)
        .ok()
        .and_then(|b| b.try_into().ok())
        .ok_or(CryptoError::InvalidSignature)?;
    Ok(Signature::from_bytes(&bytes))
}

/// A keypair for signing transactions.
pub struct Keypair {
    signing_key: SigningKey,
}

impl Keypair {
    /// Generate a new random keypair.
    pub fn generate() -> Self {
        Self {
            signing_key: SigningKey::generate(&mut OsRng),
        }
    }

    /// Create a keypair from a private key (32 bytes).
    pub fn from_private_key(bytes: &[u8; 32]) -> Self {
        Self {
            signing_key: SigningKey::from_bytes(bytes),
        }
    }

    /// Create a keypair from a hex-encoded private key.
    pub fn from_private_key_hex(s: &str) -> Result<Self, CryptoError> {
        let bytes: [u8; 32] = hex::decode(s)
            .ok()
            .and_then(|b| b.try_into().ok())
            .ok_or(CryptoError::InvalidPrivateKey)?;
        Ok(Self::from_private_key(&bytes))
    }

    /// Get the private key bytes.
    pub fn private_key(&self) -> [u8; 32] {
        self.signing_key.to_bytes()
    }

    /// Get the private key as hex.
    pub fn private_key_hex(&self) -> String {
        hex::encode(self.private_key())
    }

    /// The participant identity: hex of the public key.
    pub fn public_key_hex(&self) -> String {
        hex::encode(self.signing_key.verifying_key().as_bytes())
    }

    /// Sign the canonical form of a transfer, returning a hex signature.
    pub fn sign_transaction(&self, sender: &str, recipient: &str, amount: f64) -> String {
        let payload = Transaction::signing_payload(sender, recipient, amount);
        hex::encode(self.signing_key.sign(&payload).to_bytes())
    }

    /// Build a transaction from this keypair to `recipient`, signed.
    pub fn signed_transfer(&self, recipient: &str, amount: f64) -> Transaction {
        let sender = self.public_key_hex();
        let signature = self.sign_transaction(&sender, recipient, amount);
        Transaction::new(sender, recipient, signature, amount)
    }
}

impl fmt::Debug for Keypair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Keypair")
            .field("public_key", &self.public_key_hex())
            .finish()
    }
}
