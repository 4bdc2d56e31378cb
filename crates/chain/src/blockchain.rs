//! Main ledger orchestration.
//!
//! This module brings together all components: proof of work, validation,
//! the mempool and snapshot storage.

use crate::mempool::Mempool;
use proofchain_consensus::{BalanceSource, ProofOfWork, ValidationError, Verification};
use proofchain_core::{Block, Ed25519Verifier, Hash, SignatureVerifier, Transaction};
use proofchain_storage::{LedgerSnapshot, StateStore};
use thiserror::Error;
use tracing::{debug, error, info, warn};

/// Amount credited to the miner of each block.
pub const MINING_REWARD: f64 = 10.0;

/// Errors that can occur during ledger operations.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("no hosting node configured")]
    NoHostingNode,

    #[error("invalid transaction amount: {0}")]
    InvalidAmount(f64),

    #[error("transaction rejected: {0}")]
    Rejected(#[from] ValidationError),

    #[error("mining aborted: pending transaction with signature {signature:?} failed verification")]
    MiningAborted { signature: String },
}

pub type Result<T> = std::result::Result<T, LedgerError>;

/// Ledger configuration.
#[derive(Debug, Clone)]
pub struct BlockchainConfig {
    /// Amount credited to the miner of each block.
    pub mining_reward: f64,
}

impl Default for BlockchainConfig {
    fn default() -> Self {
        Self {
            mining_reward: MINING_REWARD,
        }
    }
}

/// The ledger engine: owns the chain and the pending pool.
///
/// The chain and the pool are only ever handed out as shared slices; all
/// mutation goes through [`Blockchain::add_transaction`] and
/// [`Blockchain::mine_block`].
pub struct Blockchain {
    /// Blocks, genesis first.
    chain: Vec<Block>,
    /// Admitted transactions waiting to be mined.
    mempool: Mempool,
    /// Participant this instance mines and transacts for.
    hosting_node: Option<String>,
    /// Snapshot destination.
    store: Box<dyn StateStore>,
    /// Signature checks for admission and mining.
    verifier: Box<dyn SignatureVerifier>,
    /// Configuration.
    config: BlockchainConfig,
}

impl Blockchain {
    /// Create a ledger with the default configuration and Ed25519 signatures.
    pub fn new(hosting_node: Option<String>, store: Box<dyn StateStore>) -> Self {
        Self::with_config(
            hosting_node,
            store,
            BlockchainConfig::default(),
            Box::new(Ed25519Verifier),
        )
    }

    /// Create a ledger, restoring any state previously saved in `store`.
    ///
    /// A missing or unreadable snapshot leaves a genesis-only chain.
    pub fn with_config(
        hosting_node: Option<String>,
        store: Box<dyn StateStore>,
        config: BlockchainConfig,
        verifier: Box<dyn SignatureVerifier>,
    ) -> Self {
        let mut blockchain = Self {
            chain: vec![Block::genesis()],
            mempool: Mempool::new(),
            hosting_node,
            store,
            verifier,
            config,
        };
        blockchain.load();
        blockchain
    }

    fn load(&mut self) {
        match self.store.load() {
            Ok(Some(snapshot)) if snapshot.chain.is_empty() => {
                warn!("stored chain is empty, starting from genesis");
            }
            Ok(Some(snapshot)) => {
                info!(
                    blocks = snapshot.chain.len(),
                    pending = snapshot.open_transactions.len(),
                    "restored ledger state"
                );
                self.chain = snapshot.chain;
                self.mempool = Mempool::from_transactions(snapshot.open_transactions);
            }
            Ok(None) => debug!("no stored ledger state, starting from genesis"),
            Err(e) => warn!(error = %e, "failed to load ledger state, starting from genesis"),
        }
    }

    /// Snapshot of the current chain and pending pool.
    pub fn snapshot(&self) -> LedgerSnapshot {
        LedgerSnapshot::new(self.chain.clone(), self.mempool.transactions().to_vec())
    }

    /// Persist the current state. Failures are logged, never returned.
    pub fn save(&self) {
        if let Err(e) = self.store.save(&self.snapshot()) {
            error!(error = %e, "saving ledger state failed");
        }
    }

    /// Read-only view of the chain.
    pub fn chain(&self) -> &[Block] {
        &self.chain
    }

    /// Read-only view of the pending pool.
    pub fn open_transactions(&self) -> &[Transaction] {
        self.mempool.transactions()
    }

    /// Get the latest block.
    pub fn last_block(&self) -> Option<&Block> {
        self.chain.last()
    }

    /// Participant this instance mines for.
    pub fn hosting_node(&self) -> Option<&str> {
        self.hosting_node.as_deref()
    }

    /// Replace the hosting participant, e.g. after a key rotation.
    pub fn set_hosting_node(&mut self, hosting_node: Option<String>) {
        self.hosting_node = hosting_node;
    }

    /// Balance of `participant`, replayed from the full history.
    ///
    /// Confirmed receipts count; sends count whether confirmed or still
    /// pending, so the pool cannot be used to spend the same funds twice.
    pub fn balance_of(&self, participant: &str) -> f64 {
        let confirmed = self.chain.iter().flat_map(|block| &block.transactions);

        let received: f64 = confirmed
            .clone()
            .filter(|tx| tx.recipient == participant)
            .map(|tx| tx.amount)
            .sum();

        let sent: f64 = confirmed
            .chain(self.mempool.transactions())
            .filter(|tx| tx.sender == participant)
            .map(|tx| tx.amount)
            .sum();

        received - sent
    }

    /// Balance of the hosting participant, if one is configured.
    pub fn balance(&self) -> Option<f64> {
        self.hosting_node().map(|node| self.balance_of(node))
    }

    /// Validate a new transaction and admit it to the pending pool.
    pub fn add_transaction(
        &mut self,
        recipient: &str,
        sender: &str,
        signature: &str,
        amount: f64,
    ) -> Result<()> {
        if self.hosting_node.is_none() {
            return Err(LedgerError::NoHostingNode);
        }
        if !amount.is_finite() || amount < 0.0 {
            return Err(LedgerError::InvalidAmount(amount));
        }

        let tx = Transaction::new(sender, recipient, signature, amount);
        if let Err(e) = Verification::validate_transaction(&tx, &*self, &*self.verifier, true) {
            debug!(%sender, %recipient, amount, error = %e, "transaction rejected");
            return Err(e.into());
        }

        debug!(%sender, %recipient, amount, "transaction admitted");
        self.mempool.add(tx);
        self.save();
        Ok(())
    }

    /// Find the proof for the pending pool on top of the current tip.
    pub fn proof_of_work(&self) -> u64 {
        let last_hash = self.last_hash();
        ProofOfWork::find_proof(self.mempool.transactions(), &last_hash)
    }

    fn last_hash(&self) -> String {
        self.last_block()
            .map(|block| block.hash().to_hex())
            .unwrap_or_default()
    }

    /// Mine the pending pool into a new block and reward the hosting node.
    ///
    /// All-or-nothing: if any pending signature no longer verifies, nothing
    /// is mined and the pool is left as it was.
    pub fn mine_block(&mut self) -> Result<Block> {
        let hosting_node = self.hosting_node.clone().ok_or(LedgerError::NoHostingNode)?;

        let proof = self.proof_of_work();

        if let Some(bad) = self
            .mempool
            .transactions()
            .iter()
            .find(|tx| !self.verifier.verify_transaction(tx))
        {
            warn!(sender = %bad.sender, "pending transaction failed verification, mining aborted");
            return Err(LedgerError::MiningAborted {
                signature: bad.signature.clone(),
            });
        }

        let last_hash = self.last_hash();
        let mut transactions = self.mempool.transactions().to_vec();
        transactions.push(Transaction::reward(hosting_node, self.config.mining_reward));

        let block = Block::new(self.chain.len() as u64, last_hash, transactions, proof);
        info!(
            index = block.index,
            proof,
            transactions = block.tx_count(),
            "mined block"
        );

        self.chain.push(block.clone());
        self.mempool.clear();
        self.save();
        Ok(block)
    }

    /// Check this ledger's own chain.
    pub fn verify_chain(&self) -> bool {
        Verification::verify_chain(&self.chain)
    }

    /// Check the signatures of every pending transaction.
    pub fn verify_open_transactions(&self) -> bool {
        Verification::verify_open_transactions(
            self.mempool.transactions(),
            self,
            &*self.verifier,
        )
    }

    /// Get ledger statistics.
    pub fn stats(&self) -> BlockchainStats {
        let mempool_stats = self.mempool.stats();

        BlockchainStats {
            height: self.chain.len().saturating_sub(1) as u64,
            latest_block_hash: self.last_block().map(Block::hash).unwrap_or_default(),
            pending_transactions: mempool_stats.total_transactions,
            pending_value: mempool_stats.total_value,
        }
    }
}

impl BalanceSource for Blockchain {
    fn balance_of(&self, participant: &str) -> f64 {
        Blockchain::balance_of(self, participant)
    }
}

/// Ledger statistics.
#[derive(Debug, Clone)]
pub struct BlockchainStats {
    /// Index of the latest block.
    pub height: u64,
    /// Hash of the latest block.
    pub latest_block_hash: Hash,
    /// Number of pending transactions.
    pub pending_transactions: usize,
    /// Sum of pending amounts.
    pub pending_value: f64,
}
