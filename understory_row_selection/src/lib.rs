// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Row Selection: select-all aware selection state.
//!
//! Virtualized tables only ever materialize a handful of rows, yet a header
//! checkbox lets users select *every* row, including rows that have never been
//! seen. Enumerating all keys up front defeats the point of virtualization, so
//! this crate models selection as one of two modes:
//!
//! - [`SelectionMode::All`]: every key is selected. Membership is defined by
//!   override rather than enumeration.
//! - [`SelectionMode::Explicit`]: exactly the keys in a hashed set are selected.
//!
//! A key is selected iff the mode is `All` or the key is in the explicit set.
//! [`RowSelection::reconcile`] is the single place where a cached per-row flag
//! is brought back in line with that rule; callers run it whenever they revisit
//! a row, which is how "select all" reaches rows materialized later.
//!
//! [`RowSelection`] also carries a revision counter that only moves when the
//! semantic contents change.
//!
//! ## Minimal example
//!
//! ```rust
//! use understory_row_selection::{RowSelection, SelectionSnapshot};
//!
//! let mut selection = RowSelection::<u32>::new();
//! selection.insert(5);
//! assert!(selection.contains(&5_u32));
//!
//! // Header checkbox: everything is selected, even keys never inserted.
//! selection.select_all();
//! assert!(selection.contains(&1_000_000_u32));
//! assert!(matches!(selection.snapshot(), SelectionSnapshot::All));
//!
//! // A cached flag is reconciled against the mode when its row is revisited.
//! let mut cached_flag = false;
//! assert!(selection.reconcile(&42_u32, &mut cached_flag));
//! assert!(cached_flag);
//!
//! // Deselecting one row out of "all" needs an explicit seed: here, the keys
//! // the caller has materialized so far.
//! selection.demote_all([1, 2, 3]);
//! selection.remove(&2_u32);
//! assert!(selection.contains(&1_u32));
//! assert!(!selection.contains(&2_u32));
//! assert!(!selection.contains(&1_000_000_u32));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

use core::hash::Hash;

use hashbrown::{Equivalent, HashSet};

/// The two selection representations.
#[derive(Clone, Debug)]
pub enum SelectionMode<K> {
    /// Every key is selected.
    All,
    /// Exactly these keys are selected.
    Explicit(HashSet<K>),
}

impl<K: Hash + Eq> PartialEq for SelectionMode<K> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::All, Self::All) => true,
            (Self::Explicit(a), Self::Explicit(b)) => a == b,
            _ => false,
        }
    }
}

impl<K: Hash + Eq> Eq for SelectionMode<K> {}

impl<K> Default for SelectionMode<K> {
    fn default() -> Self {
        Self::Explicit(HashSet::new())
    }
}

/// Borrowed, O(1) view of a [`RowSelection`].
#[derive(Debug)]
pub enum SelectionSnapshot<'a, K> {
    /// Every key is selected.
    All,
    /// Exactly these keys are selected.
    Explicit(&'a HashSet<K>),
}

impl<K> Clone for SelectionSnapshot<'_, K> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K> Copy for SelectionSnapshot<'_, K> {}

impl<K: Hash + Eq> SelectionSnapshot<'_, K> {
    /// Returns `true` for the select-all mode.
    #[must_use]
    pub fn is_all(&self) -> bool {
        matches!(self, Self::All)
    }

    /// Returns `true` if `key` is selected.
    #[must_use]
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        Q: Hash + Equivalent<K> + ?Sized,
    {
        match self {
            Self::All => true,
            Self::Explicit(keys) => keys.contains(key),
        }
    }
}

/// Selection state for keyed rows, with a select-all mode.
///
/// Keys only need `Hash + Eq`. The default value is an empty explicit
/// selection.
#[derive(Clone, Debug)]
pub struct RowSelection<K> {
    mode: SelectionMode<K>,
    revision: u64,
}

impl<K> Default for RowSelection<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> RowSelection<K> {
    /// Creates an empty explicit selection.
    #[must_use]
    pub fn new() -> Self {
        Self {
            mode: SelectionMode::default(),
            revision: 0,
        }
    }

    /// Returns the current mode.
    #[must_use]
    pub fn mode(&self) -> &SelectionMode<K> {
        &self.mode
    }

    /// Returns `true` in select-all mode.
    #[must_use]
    pub fn is_all(&self) -> bool {
        matches!(self.mode, SelectionMode::All)
    }

    /// Returns `true` if nothing is selected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match &self.mode {
            SelectionMode::All => false,
            SelectionMode::Explicit(keys) => keys.is_empty(),
        }
    }

    /// Returns the explicit key set, or `None` in select-all mode.
    #[must_use]
    pub fn explicit_keys(&self) -> Option<&HashSet<K>> {
        match &self.mode {
            SelectionMode::All => None,
            SelectionMode::Explicit(keys) => Some(keys),
        }
    }

    /// Returns a borrowed snapshot of the selection.
    #[must_use]
    pub fn snapshot(&self) -> SelectionSnapshot<'_, K> {
        match &self.mode {
            SelectionMode::All => SelectionSnapshot::All,
            SelectionMode::Explicit(keys) => SelectionSnapshot::Explicit(keys),
        }
    }

    /// Returns the revision counter.
    ///
    /// The counter is bumped only when a mutation changes which keys are
    /// selected; no-op calls leave it unchanged.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Switches to select-all mode.
    pub fn select_all(&mut self) {
        if self.is_all() {
            return;
        }
        self.mode = SelectionMode::All;
        self.bump_revision();
    }

    /// Switches to an empty explicit selection.
    pub fn clear(&mut self) {
        if self.is_empty() {
            return;
        }
        self.mode = SelectionMode::Explicit(HashSet::new());
        self.bump_revision();
    }

    fn bump_revision(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }
}

impl<K: Hash + Eq> RowSelection<K> {
    /// Returns `true` if `key` is selected.
    #[must_use]
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        Q: Hash + Equivalent<K> + ?Sized,
    {
        self.snapshot().contains(key)
    }

    /// Brings a cached selection flag in line with the current mode.
    ///
    /// Sets `flag` to `self.contains(key)` and returns `true` if it changed.
    pub fn reconcile<Q>(&self, key: &Q, flag: &mut bool) -> bool
    where
        Q: Hash + Equivalent<K> + ?Sized,
    {
        let selected = self.contains(key);
        if *flag == selected {
            return false;
        }
        *flag = selected;
        true
    }

    /// Replaces the selection with an explicit set. Duplicates collapse.
    pub fn replace_with<I>(&mut self, keys: I)
    where
        I: IntoIterator<Item = K>,
    {
        let keys: HashSet<K> = keys.into_iter().collect();
        if let SelectionMode::Explicit(current) = &self.mode
            && *current == keys
        {
            return;
        }
        self.mode = SelectionMode::Explicit(keys);
        self.bump_revision();
    }

    /// Leaves select-all mode, keeping `seed` as the explicit selection.
    ///
    /// This is a no-op in explicit mode. Hosts call it before removing a
    /// single key out of "all", seeding with whatever keys they consider
    /// still selected (for example every row materialized so far).
    pub fn demote_all<I>(&mut self, seed: I)
    where
        I: IntoIterator<Item = K>,
    {
        if !self.is_all() {
            return;
        }
        self.mode = SelectionMode::Explicit(seed.into_iter().collect());
        self.bump_revision();
    }

    /// Adds `key` to the selection. Returns `true` if it was not selected.
    ///
    /// In select-all mode every key is already selected, so this is a no-op.
    pub fn insert(&mut self, key: K) -> bool {
        let SelectionMode::Explicit(keys) = &mut self.mode else {
            return false;
        };
        if !keys.insert(key) {
            return false;
        }
        self.bump_revision();
        true
    }

    /// Removes `key` from an explicit selection. Returns `true` if it was selected.
    ///
    /// Select-all mode cannot express a missing key; call
    /// [`RowSelection::demote_all`] first. In select-all mode this returns
    /// `false` and leaves the selection unchanged.
    pub fn remove<Q>(&mut self, key: &Q) -> bool
    where
        Q: Hash + Equivalent<K> + ?Sized,
    {
        let SelectionMode::Explicit(keys) = &mut self.mode else {
            return false;
        };
        if !keys.remove(key) {
            return false;
        }
        self.bump_revision();
        true
    }

    /// Inserts or removes `key` depending on `selected`.
    pub fn set(&mut self, key: K, selected: bool) -> bool {
        if selected {
            self.insert(key)
        } else {
            self.remove(&key)
        }
    }
}
