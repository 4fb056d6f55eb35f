// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Visible row window computation.

use core::ops::Range;

use crate::{ConfigError, Viewport};

/// The slice of rows to materialize for one scroll position.
///
/// `start..start + count` is always a valid sub-range of `0..total_rows` for
/// the row count the window was computed against.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct RowWindow {
    /// Index of the first materialized row.
    pub start: usize,
    /// Number of materialized rows.
    pub count: usize,
    /// Vertical translation of the materialized slice, `start * row_height`.
    pub pixel_offset: f64,
    /// Height of the whole scrollable region.
    ///
    /// Never smaller than the viewport, so small tables still fill it.
    pub content_height: f64,
}

impl RowWindow {
    /// Index one past the last materialized row.
    #[must_use]
    pub fn end(&self) -> usize {
        self.start + self.count
    }

    /// Returns the materialized indices as a range.
    #[must_use]
    pub fn range(&self) -> Range<usize> {
        self.start..self.end()
    }

    /// Returns `true` if no rows are materialized.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Returns `true` if `index` falls inside the window.
    #[must_use]
    pub fn contains(&self, index: usize) -> bool {
        self.range().contains(&index)
    }

    /// Returns `true` if every index in `rows` falls inside the window.
    ///
    /// An empty range is always covered.
    #[must_use]
    pub fn covers(&self, rows: Range<usize>) -> bool {
        rows.is_empty() || (self.start <= rows.start && rows.end <= self.end())
    }
}

/// Computes the row window for a scroll offset, validating the configuration.
///
/// This is the one-shot form of [`Viewport::window`]. Hosts that keep their
/// configuration around should hold a [`Viewport`] instead, which validates
/// once on construction.
///
/// - `start = max(0, floor(scroll_offset / row_height) - overscan)`, clamped to
///   `total_rows`.
/// - `count = min(total_rows - start, ceil(viewport_height / row_height) + 4 * overscan)`.
/// - Negative or non-finite scroll offsets are treated as `0`.
///
/// # Errors
///
/// Returns [`ConfigError`] if `row_height <= 0` or `viewport_height < 0`, or
/// either is not finite.
pub fn compute_row_window(
    scroll_offset: f64,
    row_height: f64,
    viewport_height: f64,
    overscan: usize,
    total_rows: usize,
) -> Result<RowWindow, ConfigError> {
    let viewport = Viewport::new(row_height, viewport_height, overscan)?;
    Ok(viewport.window(scroll_offset, total_rows))
}

pub(crate) fn window_for(
    scroll_offset: f64,
    row_height: f64,
    viewport_height: f64,
    overscan: usize,
    total_rows: usize,
) -> RowWindow {
    let scroll_offset = sanitize_offset(scroll_offset);

    let first_visible = floor_to_usize(scroll_offset / row_height);
    let start = first_visible.saturating_sub(overscan).min(total_rows);

    let budget = ceil_to_usize(viewport_height / row_height)
        .saturating_add(overscan.saturating_mul(4));
    let count = (total_rows - start).min(budget);

    let full_height = total_rows as f64 * row_height;
    RowWindow {
        start,
        count,
        pixel_offset: start as f64 * row_height,
        content_height: if full_height > viewport_height {
            full_height
        } else {
            viewport_height
        },
    }
}

/// Rows intersecting `[scroll_offset, scroll_offset + viewport_height)`,
/// clamped to `total_rows`.
pub(crate) fn visible_rows_for(
    scroll_offset: f64,
    row_height: f64,
    viewport_height: f64,
    total_rows: usize,
) -> Range<usize> {
    let scroll_offset = sanitize_offset(scroll_offset);
    let first = floor_to_usize(scroll_offset / row_height).min(total_rows);
    let end = ceil_to_usize((scroll_offset + viewport_height) / row_height).min(total_rows);
    first..end.max(first)
}

fn sanitize_offset(scroll_offset: f64) -> f64 {
    if scroll_offset.is_finite() && scroll_offset > 0.0 {
        scroll_offset
    } else {
        0.0
    }
}

/// Floors a finite, non-negative value. Saturates on overflow.
fn floor_to_usize(value: f64) -> usize {
    #[expect(
        clippy::cast_possible_truncation,
        reason = "Input is finite and non-negative; truncation toward zero is the floor"
    )]
    {
        value as usize
    }
}

/// Ceils a finite, non-negative value. Saturates on overflow.
fn ceil_to_usize(value: f64) -> usize {
    let floor = floor_to_usize(value);
    if (floor as f64) < value {
        floor.saturating_add(1)
    } else {
        floor
    }
}
