// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use hashbrown::HashMap;

use crate::{RowKey, ViewRow};

/// Memoized view rows, keyed by row key.
///
/// Owned exclusively by [`VirtualTable`](crate::VirtualTable); entries live
/// until the dataset is replaced or the key field changes.
#[derive(Debug, Default)]
pub(crate) struct RowCache {
    rows: HashMap<RowKey, ViewRow>,
}

impl RowCache {
    pub(crate) fn len(&self) -> usize {
        self.rows.len()
    }

    pub(crate) fn contains(&self, key: &str) -> bool {
        self.rows.contains_key(key)
    }

    pub(crate) fn get(&self, key: &str) -> Option<&ViewRow> {
        self.rows.get(key)
    }

    pub(crate) fn get_mut(&mut self, key: &str) -> Option<&mut ViewRow> {
        self.rows.get_mut(key)
    }

    pub(crate) fn insert(&mut self, row: ViewRow) {
        self.rows.insert(row.key.clone(), row);
    }

    pub(crate) fn keys(&self) -> impl Iterator<Item = &RowKey> {
        self.rows.keys()
    }

    pub(crate) fn values(&self) -> impl Iterator<Item = &ViewRow> {
        self.rows.values()
    }

    pub(crate) fn values_mut(&mut self) -> impl Iterator<Item = &mut ViewRow> {
        self.rows.values_mut()
    }

    pub(crate) fn clear(&mut self) {
        self.rows.clear();
    }
}
