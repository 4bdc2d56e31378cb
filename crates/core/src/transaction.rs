//! Transaction types and their canonical form.

use serde::{Deserialize, Serialize};

/// Sender used for system-generated mining rewards.
pub const MINING_SENDER: &str = "MINING";

/// A transfer of value between two participants.
///
/// Field order matches the persisted layout:
/// `{sender, recipient, signature, amount}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Identity of the paying participant.
    pub sender: String,
    /// Identity of the receiving participant.
    pub recipient: String,
    /// Hex signature over the canonical form (empty for rewards).
    pub signature: String,
    /// Amount transferred.
    pub amount: f64,
}

/// The economic content of a transaction, used for signing and hashing.
///
/// The signature is deliberately absent: it authenticates this form, it is
/// not part of it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CanonicalTransaction<'a> {
    pub sender: &'a str,
    pub recipient: &'a str,
    pub amount: f64,
}

impl CanonicalTransaction<'_> {
    /// Compact JSON encoding, fields in `sender`, `recipient`, `amount` order.
    pub fn to_bytes(&self) -> Vec<u8> {
        serde_json::to_vec(self).expect("serialization should not fail")
    }
}

impl Transaction {
    /// Create a transaction from its four fields.
    pub fn new(
        sender: impl Into<String>,
        recipient: impl Into<String>,
        signature: impl Into<String>,
        amount: f64,
    ) -> Self {
        Self {
            sender: sender.into(),
            recipient: recipient.into(),
            signature: signature.into(),
            amount,
        }
    }

    /// Create the unsigned reward transaction credited to a miner.
    pub fn reward(recipient: impl Into<String>, amount: f64) -> Self {
        Self::new(MINING_SENDER, recipient, String::new(), amount)
    }

    /// Check if this is a system-generated mining reward.
    pub fn is_reward(&self) -> bool {
        self.sender == MINING_SENDER
    }

    /// Borrow the canonical `sender`/`recipient`/`amount` form.
    pub fn canonical(&self) -> CanonicalTransaction<'_> {
        CanonicalTransaction {
            sender: &self.sender,
            recipient: &self.recipient,
            amount: self.amount,
        }
    }

    /// The bytes a wallet signs for the given economic content.
    pub fn signing_payload(sender: &str, recipient: &str, amount: f64) -> Vec<u8> {
        CanonicalTransaction {
            sender,
            recipient,
            amount,
        }
        .to_bytes()
    }
}
