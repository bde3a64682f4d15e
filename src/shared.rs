//! A [`RadixTree`] behind a reader-writer lock.
//!
//! The tree itself has no internal synchronization. This wrapper serializes
//! inserts against each other and against traversals, so a single tree can
//! be fed from several threads.

use parking_lot::RwLock;
use tracing::debug;

use crate::{Config, RadixTree};

/// Thread-safe handle around a [`RadixTree`].
pub struct SharedRadixTree {
    inner: RwLock<RadixTree>,
}

impl SharedRadixTree {
    /// Create a new empty tree with default configuration.
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    /// Create a new empty tree with the given configuration.
    pub fn with_config(config: Config) -> Self {
        Self {
            inner: RwLock::new(RadixTree::with_config(config)),
        }
    }

    /// Insert a value, holding the write lock for the duration.
    pub fn insert(&self, value: impl AsRef<[u8]>) {
        self.inner.write().insert(value);
    }

    /// Walk the tree under the read lock.
    ///
    /// Inserts from other threads block until `visitor` has seen every edge.
    pub fn walk<F>(&self, visitor: F)
    where
        F: FnMut(&[u8], u64),
    {
        self.inner.read().walk(visitor);
    }

    /// Copy every `(prefix, count)` pair out under the read lock.
    ///
    /// The lock is released before returning, so the result can be consumed
    /// while other threads keep inserting.
    pub fn snapshot(&self) -> Vec<(Vec<u8>, u64)> {
        let inner = self.inner.read();
        let pairs: Vec<_> = inner.iter().collect();
        debug!(edges = pairs.len(), "snapshotted shared radix tree");
        pairs
    }

    /// Whether no value has produced an edge yet.
    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    /// Unwrap the underlying tree.
    pub fn into_inner(self) -> RadixTree {
        self.inner.into_inner()
    }
}

impl Default for SharedRadixTree {
    fn default() -> Self {
        Self::new()
    }
}

impl From<RadixTree> for SharedRadixTree {
    fn from(tree: RadixTree) -> Self {
        Self {
            inner: RwLock::new(tree),
        }
    }
}
