// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The virtual table controller.

use std::sync::{Arc, LazyLock};

use hashbrown::HashSet;
use log::{debug, trace};
use understory_row_selection::{RowSelection, SelectionSnapshot};
use understory_row_window::{RowWindow, ScrollHysteresis, Viewport};

use crate::cache::RowCache;
use crate::column::normalize_columns;
use crate::{
    Column, ColumnDefinition, FrameSlot, FrameToken, RowKey, SourceRow, TableConfig, TableError,
    ViewRow, derive_row_key,
};

// Reported while row selection is disabled.
static NO_SELECTION: LazyLock<HashSet<RowKey>> = LazyLock::new(HashSet::new);

/// Updates coalesced into one frame by [`VirtualTable::run_frame`].
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct FrameRequest {
    /// Latest requested scroll offset.
    pub scroll_offset: Option<f64>,
    /// Latest requested (already validated) viewport height.
    pub viewport_height: Option<f64>,
}

/// Virtualized table state: dataset, columns, view-row cache, and selection.
///
/// All mutation goes through `&mut self`; the table is meant to live on a
/// single UI thread. Every setter that affects the visible output recomputes
/// it synchronously, so [`VirtualTable::visible_rows`] is always current.
#[derive(Debug)]
pub struct VirtualTable {
    viewport: Viewport,
    hysteresis: ScrollHysteresis,
    row_selection: bool,
    key_field: Option<String>,
    columns: Vec<Arc<Column>>,
    column_revision: u64,
    rows: Vec<SourceRow>,
    scroll_offset: f64,
    window: RowWindow,
    cache: RowCache,
    selection: RowSelection<RowKey>,
    visible: Vec<RowKey>,
    frames: FrameSlot<FrameRequest>,
}

impl VirtualTable {
    /// Creates an empty table.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::InvalidConfiguration`] if the row height is not
    /// positive or the viewport height is negative.
    pub fn new(config: TableConfig) -> Result<Self, TableError> {
        let viewport = Viewport::new(config.row_height, config.viewport_height, config.overscan)?;
        Ok(Self {
            viewport,
            hysteresis: ScrollHysteresis::new(config.hysteresis_rows),
            row_selection: config.row_selection,
            key_field: config.key_field,
            columns: Vec::new(),
            column_revision: 0,
            rows: Vec::new(),
            scroll_offset: 0.0,
            window: viewport.window(0.0, 0),
            cache: RowCache::default(),
            selection: RowSelection::new(),
            visible: Vec::new(),
            frames: FrameSlot::new(),
        })
    }

    // --- Inputs ---

    /// Replaces the columns.
    ///
    /// Cached view rows are kept. Each one re-flattens its cells against the
    /// new columns the next time it is revisited, starting with the rows in
    /// the current window.
    pub fn set_columns<I>(&mut self, columns: I)
    where
        I: IntoIterator<Item = ColumnDefinition>,
    {
        self.columns = normalize_columns(columns);
        self.column_revision = self.column_revision.wrapping_add(1);
        self.recompute_visible();
    }

    /// Replaces the dataset wholesale.
    ///
    /// Clears the view-row cache and the selection, scrolls back to the top,
    /// drops any pending frame request, and recomputes.
    pub fn set_dataset(&mut self, rows: Vec<SourceRow>) {
        debug!(
            "dataset replaced: {} rows (dropping {} cached)",
            rows.len(),
            self.cache.len()
        );
        self.rows = rows;
        self.cache.clear();
        self.selection.clear();
        self.scroll_offset = 0.0;
        self.frames.cancel();
        self.recompute_visible();
    }

    /// Sets the field used to derive row keys.
    ///
    /// Cached rows are indexed by their old keys, so a change clears the
    /// cache. Selected keys are kept as they are.
    pub fn set_key_field(&mut self, key_field: Option<String>) {
        if self.key_field == key_field {
            return;
        }
        self.key_field = key_field;
        self.cache.clear();
        self.recompute_visible();
    }

    /// Sets the row height in pixels.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::InvalidConfiguration`] for zero, negative, or
    /// non-finite heights; the table is left unchanged.
    pub fn set_row_height(&mut self, row_height: f64) -> Result<(), TableError> {
        self.viewport.set_row_height(row_height)?;
        self.recompute_visible();
        Ok(())
    }

    /// Sets the viewport height in pixels.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::InvalidConfiguration`] for negative or
    /// non-finite heights; the table is left unchanged.
    pub fn set_viewport_height(&mut self, viewport_height: f64) -> Result<(), TableError> {
        self.viewport.set_viewport_height(viewport_height)?;
        self.recompute_visible();
        Ok(())
    }

    /// Sets the overscan padding in rows.
    pub fn set_overscan(&mut self, overscan: usize) {
        self.viewport.set_overscan(overscan);
        self.recompute_visible();
    }

    /// Sets the scroll hysteresis band in rows.
    pub fn set_hysteresis_rows(&mut self, rows: usize) {
        self.hysteresis = ScrollHysteresis::new(rows);
    }

    /// Enables or disables row selection.
    ///
    /// While disabled every row reports unselected, toggles are ignored, and
    /// [`VirtualTable::selection`] is empty. The underlying selection is kept
    /// and reappears when selection is enabled again.
    pub fn set_row_selection(&mut self, enabled: bool) {
        if self.row_selection == enabled {
            return;
        }
        self.row_selection = enabled;
        self.recompute_visible();
    }

    /// Replaces the selection with exactly `keys`.
    ///
    /// Leaves select-all mode. Every cached row is reconciled immediately.
    pub fn set_selected_keys<I, K>(&mut self, keys: I)
    where
        I: IntoIterator<Item = K>,
        K: Into<RowKey>,
    {
        self.selection.replace_with(keys.into_iter().map(Into::into));
        let enabled = self.row_selection;
        for row in self.cache.values_mut() {
            reconcile(&self.selection, enabled, row);
        }
        self.recompute_visible();
    }

    // --- Scrolling ---

    /// Applies a scroll offset.
    ///
    /// Returns `false` without recomputing when the offset is within the
    /// hysteresis band of the last applied offset and the current window
    /// still covers every row in view. Negative and non-finite offsets are
    /// treated as `0`.
    pub fn set_scroll_offset(&mut self, scroll_offset: f64) -> bool {
        if !self.apply_scroll(scroll_offset) {
            return false;
        }
        self.recompute_visible();
        true
    }

    /// Stores `scroll_offset` unless the move can be skipped.
    fn apply_scroll(&mut self, scroll_offset: f64) -> bool {
        let scroll_offset = clamp_offset(scroll_offset);
        let in_view = self.viewport.visible_rows(scroll_offset, self.rows.len());
        if self.window.covers(in_view)
            && self.hysteresis.should_skip(
                self.scroll_offset,
                scroll_offset,
                self.viewport.row_height(),
            )
        {
            trace!(
                "scroll to {scroll_offset} within hysteresis of {}",
                self.scroll_offset
            );
            return false;
        }
        self.scroll_offset = scroll_offset;
        true
    }

    /// Records a scroll offset for the next frame.
    ///
    /// Supersedes the pending request's scroll offset and token; a pending
    /// viewport height is carried over.
    pub fn request_scroll(&mut self, scroll_offset: f64) -> FrameToken {
        self.frames.request_with(|pending| FrameRequest {
            scroll_offset: Some(scroll_offset),
            ..pending.unwrap_or_default()
        })
    }

    /// Records a viewport height for the next frame.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::InvalidConfiguration`] for negative or
    /// non-finite heights; nothing is recorded.
    pub fn request_viewport_height(
        &mut self,
        viewport_height: f64,
    ) -> Result<FrameToken, TableError> {
        // Validate now so `run_frame` cannot fail.
        let mut probe = self.viewport;
        probe.set_viewport_height(viewport_height)?;
        Ok(self.frames.request_with(|pending| FrameRequest {
            viewport_height: Some(probe.viewport_height()),
            ..pending.unwrap_or_default()
        }))
    }

    /// Applies the pending frame request if `token` is still current.
    ///
    /// Recomputes at most once. Returns `true` if it did; stale tokens and
    /// scrolls inside the hysteresis band return `false`.
    pub fn run_frame(&mut self, token: FrameToken) -> bool {
        let Some(request) = self.frames.take(token) else {
            trace!("stale frame {token:?} ignored");
            return false;
        };

        let mut dirty = false;
        if let Some(height) = request.viewport_height
            && height != self.viewport.viewport_height()
            && self.viewport.set_viewport_height(height).is_ok()
        {
            dirty = true;
        }
        if let Some(offset) = request.scroll_offset
            && self.apply_scroll(offset)
        {
            dirty = true;
        }
        if dirty {
            self.recompute_visible();
        }
        dirty
    }

    /// Drops the pending frame request, returning its token.
    ///
    /// Hosts call this on teardown so a late callback has nothing to apply.
    pub fn cancel_pending_frames(&mut self) -> Option<FrameToken> {
        self.frames.cancel()
    }

    /// Token of the pending frame request, if any.
    #[must_use]
    pub fn pending_frame(&self) -> Option<FrameToken> {
        self.frames.pending()
    }

    // --- Materialization ---

    /// Recomputes the visible window and its view rows.
    ///
    /// Rows already in the cache are reused with their selection flag
    /// reconciled (and cells rebuilt if the columns changed); other rows are
    /// materialized and cached. Calling this twice without changes in between
    /// produces the same output.
    pub fn recompute_visible(&mut self) {
        self.window = self.viewport.window(self.scroll_offset, self.rows.len());

        let mut visible = std::mem::take(&mut self.visible);
        visible.clear();
        let mut misses = 0_usize;

        for position in self.window.range() {
            let source = &self.rows[position];
            let key = derive_row_key(source, self.key_field.as_deref(), position);

            if let Some(row) = self.cache.get_mut(key.as_str()) {
                reconcile(&self.selection, self.row_selection, row);
                if row.column_revision != self.column_revision {
                    row.flatten(&self.columns, self.column_revision);
                }
            } else {
                let selected = self.row_selection && self.selection.contains(key.as_str());
                self.cache.insert(ViewRow::materialize(
                    key.clone(),
                    source,
                    position + 1,
                    selected,
                    &self.columns,
                    self.column_revision,
                ));
                misses += 1;
            }
            visible.push(key);
        }

        trace!(
            "window {:?}: {} rows, {} materialized, {} cached",
            self.window.range(),
            visible.len(),
            misses,
            self.cache.len()
        );
        self.visible = visible;
    }

    /// Drops every cached view row and recomputes the window.
    ///
    /// Selection is kept.
    pub fn clear_cache(&mut self) {
        self.cache.clear();
        self.recompute_visible();
    }

    // --- Selection ---

    /// Selects or deselects one materialized row.
    ///
    /// Returns `false` and does nothing if the row has never been visible
    /// (it is not cached) or row selection is disabled.
    ///
    /// In select-all mode the selection first becomes explicit, seeded with
    /// every cached row, so deselecting one row keeps the other rows the
    /// user has seen selected.
    pub fn toggle_row(&mut self, key: &str, selected: bool) -> bool {
        if !self.row_selection {
            return false;
        }
        if !self.cache.contains(key) {
            debug!("toggle of unmaterialized row {key:?} ignored");
            return false;
        }

        if self.selection.is_all() {
            debug!("select-all demoted to {} explicit keys", self.cache.len());
            self.selection.demote_all(self.cache.keys().cloned());
        }
        if selected {
            self.selection.insert(RowKey::from(key));
        } else {
            self.selection.remove(key);
        }
        if let Some(row) = self.cache.get_mut(key) {
            row.is_selected = selected;
        }
        true
    }

    /// Header checkbox: selects or deselects every row.
    ///
    /// Visible rows are updated now; other cached rows are reconciled when
    /// they next scroll into view, and never-seen rows are materialized with
    /// the right flag.
    pub fn toggle_all_visible(&mut self, selected: bool) {
        if !self.row_selection {
            return;
        }
        if selected {
            self.selection.select_all();
        } else {
            self.selection.clear();
        }
        debug!("select-all set to {selected}");
        for key in &self.visible {
            if let Some(row) = self.cache.get_mut(key.as_str()) {
                row.is_selected = selected;
            }
        }
    }

    /// Current selection. O(1).
    ///
    /// Reports an empty explicit selection while row selection is disabled.
    #[must_use]
    pub fn selection(&self) -> SelectionSnapshot<'_, RowKey> {
        if self.row_selection {
            self.selection.snapshot()
        } else {
            SelectionSnapshot::Explicit(&*NO_SELECTION)
        }
    }

    /// The underlying selection state, including its revision counter.
    #[must_use]
    pub fn selection_state(&self) -> &RowSelection<RowKey> {
        &self.selection
    }

    /// Returns `true` if the row with `key` is selected.
    #[must_use]
    pub fn is_selected(&self, key: &str) -> bool {
        self.row_selection && self.selection.contains(key)
    }

    /// Cached rows that are selected, in display order.
    ///
    /// Looks up the explicit keys in the cache rather than scanning the
    /// dataset. In select-all mode this is every cached row. Selected keys
    /// whose rows were never materialized are not included. The returned
    /// rows are reconciled first, so each reports `is_selected() == true`.
    pub fn selected_rows(&mut self) -> Vec<&ViewRow> {
        if !self.row_selection {
            return Vec::new();
        }
        let mut rows: Vec<&ViewRow> = match self.selection.explicit_keys() {
            None => {
                for row in self.cache.values_mut() {
                    row.is_selected = true;
                }
                self.cache.values().collect()
            }
            Some(keys) => {
                for key in keys {
                    if let Some(row) = self.cache.get_mut(key.as_str()) {
                        row.is_selected = true;
                    }
                }
                keys.iter()
                    .filter_map(|key| self.cache.get(key.as_str()))
                    .collect()
            }
        };
        rows.sort_by_key(|row| row.index);
        rows
    }

    // --- Outputs ---

    /// The visible window's view rows, in display order.
    pub fn visible_rows(&self) -> impl Iterator<Item = &ViewRow> {
        self.visible
            .iter()
            .filter_map(|key| self.cache.get(key.as_str()))
    }

    /// Keys of the visible window, in display order.
    #[must_use]
    pub fn visible_keys(&self) -> &[RowKey] {
        &self.visible
    }

    /// A cached view row, with its selection flag reconciled first.
    pub fn view_row(&mut self, key: &str) -> Option<&ViewRow> {
        let row = self.cache.get_mut(key)?;
        reconcile(&self.selection, self.row_selection, row);
        Some(&*row)
    }

    /// The current window geometry.
    #[must_use]
    pub fn window(&self) -> RowWindow {
        self.window
    }

    /// The last applied scroll offset.
    #[must_use]
    pub fn scroll_offset(&self) -> f64 {
        self.scroll_offset
    }

    /// Height of the scrollable content, never below the viewport.
    #[must_use]
    pub fn content_height(&self) -> f64 {
        self.window.content_height
    }

    /// The validated viewport configuration.
    #[must_use]
    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// The field used to derive row keys.
    #[must_use]
    pub fn key_field(&self) -> Option<&str> {
        self.key_field.as_deref()
    }

    /// Normalized columns.
    #[must_use]
    pub fn columns(&self) -> &[Arc<Column>] {
        &self.columns
    }

    /// The dataset.
    #[must_use]
    pub fn rows(&self) -> &[SourceRow] {
        &self.rows
    }

    /// Number of rows in the dataset.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns `true` if the dataset is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of cached view rows.
    #[must_use]
    pub fn cache_len(&self) -> usize {
        self.cache.len()
    }
}

/// Brings a cached row's flag in line with the selection.
fn reconcile(selection: &RowSelection<RowKey>, enabled: bool, row: &mut ViewRow) -> bool {
    if enabled {
        selection.reconcile(row.key.as_str(), &mut row.is_selected)
    } else {
        std::mem::replace(&mut row.is_selected, false)
    }
}

fn clamp_offset(scroll_offset: f64) -> f64 {
    if scroll_offset.is_finite() && scroll_offset > 0.0 {
        scroll_offset
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::VirtualTable;
    use crate::{ColumnDefinition, SourceRow, TableConfig};

    fn rows(n: usize) -> Vec<SourceRow> {
        (0..n)
            .map(|i| json!({ "id": format!("key{i}"), "n": i }).as_object().cloned().unwrap())
            .collect()
    }

    #[test]
    fn disabled_selection_masks_state_without_losing_it() {
        let mut table = VirtualTable::new(TableConfig::default()).unwrap();
        table.set_dataset(rows(20));
        table.set_selected_keys(["key1"]);
        assert!(table.is_selected("key1"));

        table.set_row_selection(false);
        assert!(!table.is_selected("key1"));
        assert!(!table.toggle_row("key2", true));
        assert!(table.visible_rows().all(|row| !row.is_selected()));
        assert!(table.selected_rows().is_empty());
        assert!(!table.selection().contains("key1"));

        table.set_row_selection(true);
        assert!(table.view_row("key1").unwrap().is_selected());
    }

    #[test]
    fn column_changes_reflatten_cached_rows_lazily() {
        let mut table = VirtualTable::new(TableConfig::default()).unwrap();
        table.set_columns([ColumnDefinition::new("id", "Id")]);
        table.set_dataset(rows(200));
        assert!(table.set_scroll_offset(4_000.0));
        let cached = table.cache_len();

        table.set_columns([ColumnDefinition::new("n", "N"), ColumnDefinition::new("id", "Id")]);
        assert_eq!(table.cache_len(), cached);
        for row in table.visible_rows() {
            assert_eq!(row.cells().len(), 2, "visible row {} not re-flattened", row.key());
        }

        // Row 0 is cached but offscreen; it picks up the new columns on revisit.
        assert!(table.set_scroll_offset(0.0));
        let first = table.visible_rows().next().unwrap();
        assert_eq!(first.cells()[0].value(), &json!(0));
    }
}
