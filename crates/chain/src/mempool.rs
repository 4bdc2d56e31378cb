//! Pending transaction pool.
//!
//! The mempool stores admitted transactions, in arrival order, until they
//! are mined into a block.

use proofchain_core::Transaction;

/// Transaction mempool.
#[derive(Debug, Clone, Default)]
pub struct Mempool {
    transactions: Vec<Transaction>,
}

impl Mempool {
    /// Create an empty mempool.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mempool holding previously persisted transactions.
    pub fn from_transactions(transactions: Vec<Transaction>) -> Self {
        Self { transactions }
    }

    /// Get the number of transactions in the mempool.
    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    /// Check if the mempool is empty.
    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    /// Append an admitted transaction.
    pub fn add(&mut self, tx: Transaction) {
        self.transactions.push(tx);
    }

    /// Read-only view of pending transactions, in arrival order.
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// Clear all transactions from the mempool.
    pub fn clear(&mut self) {
        self.transactions.clear();
    }

    /// Get mempool statistics.
    pub fn stats(&self) -> MempoolStats {
        MempoolStats {
            total_transactions: self.len(),
            total_value: self.transactions.iter().map(|tx| tx.amount).sum(),
        }
    }
}

/// Mempool statistics.
#[derive(Debug, Clone, PartialEq)]
pub struct MempoolStats {
    /// Total number of transactions.
    pub total_transactions: usize,
    /// Sum of pending amounts.
    pub total_value: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mempool_preserves_order() {
        let mut mempool = Mempool::new();
        let a = Transaction::new("alice", "bob", "", 1.0);
        let b = Transaction::new("bob", "carol", "", 2.0);

        mempool.add(a.clone());
        mempool.add(b.clone());

        assert_eq!(mempool.len(), 2);
        assert_eq!(mempool.transactions(), &[a, b][..]);
    }

    #[test]
    fn test_mempool_accepts_identical_transactions() {
        let mut mempool = Mempool::new();
        let tx = Transaction::new("alice", "bob", "sig", 1.0);

        mempool.add(tx.clone());
        mempool.add(tx);

        assert_eq!(mempool.len(), 2);
    }

    #[test]
    fn test_clear() {
        let mut mempool = Mempool::from_transactions(vec![Transaction::new("a", "b", "", 1.0)]);
        mempool.clear();

        assert!(mempool.is_empty());
    }

    #[test]
    fn test_stats() {
        let mempool = Mempool::from_transactions(vec![
            Transaction::new("alice", "bob", "", 1.5),
            Transaction::new("alice", "carol", "", 2.0),
            Transaction::new("bob", "carol", "", 0.5),
        ]);

        let stats = mempool.stats();
        assert_eq!(stats.total_transactions, 3);
        assert_eq!(stats.total_value, 4.0);
    }
}
