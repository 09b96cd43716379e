// Copyright 2025 the Shoji Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Persisted open-state store: the trait seam plus an in-memory implementation.

use alloc::string::String;
use hashbrown::HashSet;

/// External persistence for drawer open/closed state, addressed by drawer key.
///
/// The store records only the open set; absence of a key means closed, and
/// [`OpenStore::set_closed`] removes the entry rather than writing a closed
/// marker. Re-rendering a tree re-associates drawers to stored state by key,
/// never by object identity.
///
/// All writes happen synchronously on the UI thread in response to discrete
/// user actions, so implementations need no interior locking.
pub trait OpenStore {
    /// Returns `true` if `key` is recorded as open.
    fn is_open(&self, key: &str) -> bool;

    /// Records `key` as open.
    fn set_open(&mut self, key: &str);

    /// Removes `key` from the open set.
    fn set_closed(&mut self, key: &str);
}

/// In-memory [`OpenStore`] backed by a set of open keys.
///
/// Suitable as the reference implementation, for tests, and for hosts that
/// handle persistence elsewhere (for example by serializing the open set into
/// session storage on their own schedule).
///
/// ```rust
/// use shoji_drawer_tree::{MemoryStore, OpenStore};
///
/// let mut store = MemoryStore::new();
/// store.set_open("nav.widgets");
/// assert!(store.is_open("nav.widgets"));
///
/// store.set_closed("nav.widgets");
/// assert!(!store.is_open("nav.widgets"));
/// ```
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    open: HashSet<String>,
}

impl MemoryStore {
    /// Creates an empty store: every key reads as closed.
    #[must_use]
    pub fn new() -> Self {
        Self {
            open: HashSet::new(),
        }
    }

    /// Number of keys currently recorded as open.
    #[must_use]
    pub fn open_count(&self) -> usize {
        self.open.len()
    }
}

impl OpenStore for MemoryStore {
    fn is_open(&self, key: &str) -> bool {
        self.open.contains(key)
    }

    fn set_open(&mut self, key: &str) {
        if !self.open.contains(key) {
            self.open.insert(String::from(key));
        }
    }

    fn set_closed(&mut self, key: &str) {
        self.open.remove(key);
    }
}
