// Copyright 2026 the Glyphbox Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Snapshot caches for rendered content.
//!
//! A [`SnapshotCache`] maps a key to an immutable, shared slice of item
//! descriptors. Reads hand out `Rc` clones, so a cache hit costs one
//! reference-count bump and callers can check reuse with [`Rc::ptr_eq`].
//!
//! Entries only ever describe *complete* content: the batch renderer inserts
//! a category snapshot after its final batch, and the popup controller
//! inserts a variant list after building it in full. Nothing expires on its
//! own; [`RenderCaches::clear_all`] is the only eviction.

use alloc::collections::BTreeMap;
use alloc::rc::Rc;
use alloc::string::String;

use crate::item::{EmojiItem, VariantItem};
use crate::taxonomy::CategoryId;

/// Maps keys to immutable snapshots of rendered items.
#[derive(Clone, Debug)]
pub struct SnapshotCache<K, T> {
    entries: BTreeMap<K, Rc<[T]>>,
}

impl<K, T> Default for SnapshotCache<K, T> {
    fn default() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }
}

impl<K: Ord, T> SnapshotCache<K, T> {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the snapshot stored for `key`.
    #[must_use]
    pub fn get<Q>(&self, key: &Q) -> Option<Rc<[T]>>
    where
        K: core::borrow::Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.entries.get(key).cloned()
    }

    /// Returns `true` if a snapshot exists for `key`.
    #[must_use]
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: core::borrow::Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.entries.contains_key(key)
    }

    /// Stores `snapshot` for `key`, replacing any previous entry.
    pub fn insert(&mut self, key: K, snapshot: Rc<[T]>) {
        self.entries.insert(key, snapshot);
    }

    /// Number of cached snapshots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing is cached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drops every snapshot.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

/// Category content snapshots, keyed by category.
pub type CategoryCache = SnapshotCache<CategoryId, EmojiItem>;

/// Variant popup snapshots, keyed by base emoji symbol.
pub type VariantCache = SnapshotCache<String, VariantItem>;

/// The two independent render caches.
///
/// The batch renderer is the only writer of [`categories`](Self::categories);
/// the variant popup is the only writer of [`variants`](Self::variants).
#[derive(Clone, Debug, Default)]
pub struct RenderCaches {
    /// Completed category renders.
    pub categories: CategoryCache,
    /// Completed variant popup lists.
    pub variants: VariantCache,
}

impl RenderCaches {
    /// Creates empty caches.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears both caches (low-memory signal).
    ///
    /// Returns how many category and variant entries were dropped.
    pub fn clear_all(&mut self) -> (usize, usize) {
        let dropped = (self.categories.len(), self.variants.len());
        self.categories.clear();
        self.variants.clear();
        dropped
    }
}
