//! Navigation Cache
//!
//! Holds the most recently built navigation tree. Snapshots are immutable and
//! shared by `Arc`; a rebuild builds the new tree outside the lock and only
//! swaps the pointer under it, so readers never wait on a directory scan.
//! Concurrent rebuilds are not merged: the last one to commit wins.

use crate::tree::NavNode;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use std::sync::Arc;

/// An immutable navigation tree with its build time
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationSnapshot {
    pub navigation: Vec<NavNode>,
    pub last_updated: DateTime<Utc>,
    /// Number of commits up to and including this one; 0 for the empty initial state
    pub generation: u64,
}

impl NavigationSnapshot {
    fn empty() -> Self {
        Self {
            navigation: Vec::new(),
            last_updated: Utc::now(),
            generation: 0,
        }
    }

    /// `last_updated` as fractional seconds since the Unix epoch
    pub fn last_updated_epoch(&self) -> f64 {
        self.last_updated.timestamp_millis() as f64 / 1000.0
    }
}

struct CacheState {
    current: Arc<NavigationSnapshot>,
    commits: u64,
}

/// Shared navigation cache
pub struct NavigationCache {
    state: Mutex<CacheState>,
}

impl Default for NavigationCache {
    fn default() -> Self {
        Self::new()
    }
}

impl NavigationCache {
    /// Create a cache holding an empty tree
    pub fn new() -> Self {
        Self {
            state: Mutex::new(CacheState {
                current: Arc::new(NavigationSnapshot::empty()),
                commits: 0,
            }),
        }
    }

    /// Current snapshot
    pub fn get(&self) -> Arc<NavigationSnapshot> {
        Arc::clone(&self.state.lock().current)
    }

    /// Swap in an already built tree
    pub fn replace(&self, navigation: Vec<NavNode>) -> Arc<NavigationSnapshot> {
        let mut state = self.state.lock();
        state.commits += 1;
        let snapshot = Arc::new(NavigationSnapshot {
            navigation,
            last_updated: Utc::now(),
            generation: state.commits,
        });
        state.current = Arc::clone(&snapshot);
        snapshot
    }

    /// Run `build` without holding the lock, then swap its result in.
    ///
    /// On error the previous snapshot is left untouched.
    pub fn rebuild<F, E>(&self, build: F) -> Result<Arc<NavigationSnapshot>, E>
    where
        F: FnOnce() -> Result<Vec<NavNode>, E>,
    {
        let navigation = build()?;
        Ok(self.replace(navigation))
    }
}
