//! Persistent storage layer for proofchain.
//!
//! The ledger is persisted as a whole-state snapshot after every change:
//! - [`LedgerSnapshot`]: the chain plus the pending pool, encoded as two
//!   JSON lines
//! - [`StateStore`]: where snapshots live; [`FileStore`] on disk,
//!   [`MemoryStore`] for tests
//!
//! # Example
//!
//! ```rust,no_run
//! use proofchain_core::Block;
//! use proofchain_storage::{FileStore, LedgerSnapshot, StateStore};
//!
//! let store = FileStore::new("./blockchain.txt");
//! store.save(&LedgerSnapshot::new(vec![Block::genesis()], vec![])).unwrap();
//! let restored = store.load().unwrap();
//! ```

pub mod snapshot;
pub mod store;

// Re-export commonly used types
pub use snapshot::LedgerSnapshot;
pub use store::{FileStore, MemoryStore, Result, StateStore, StorageError};
