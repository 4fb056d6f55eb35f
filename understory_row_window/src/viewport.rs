// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::ops::Range;

use crate::error::{check_row_height, check_viewport_height};
use crate::window::{visible_rows_for, window_for};
use crate::{ConfigError, RowWindow};

/// Validated viewport configuration for a fixed-row-height table.
///
/// A `Viewport` always has a positive, finite row height and a non-negative,
/// finite viewport height, so [`Viewport::window`] is infallible.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Viewport {
    row_height: f64,
    viewport_height: f64,
    overscan: usize,
}

impl Viewport {
    /// Creates a viewport.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `row_height <= 0` or `viewport_height < 0`,
    /// or either is not finite.
    pub fn new(row_height: f64, viewport_height: f64, overscan: usize) -> Result<Self, ConfigError> {
        Ok(Self {
            row_height: check_row_height(row_height)?,
            viewport_height: check_viewport_height(viewport_height)?,
            overscan,
        })
    }

    /// Row height in pixels.
    #[must_use]
    pub fn row_height(&self) -> f64 {
        self.row_height
    }

    /// Viewport height in pixels.
    #[must_use]
    pub fn viewport_height(&self) -> f64 {
        self.viewport_height
    }

    /// Overscan padding in rows.
    #[must_use]
    pub fn overscan(&self) -> usize {
        self.overscan
    }

    /// Sets the row height. On error the viewport is left unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidRowHeight`] for zero, negative, or
    /// non-finite heights.
    pub fn set_row_height(&mut self, row_height: f64) -> Result<(), ConfigError> {
        self.row_height = check_row_height(row_height)?;
        Ok(())
    }

    /// Sets the viewport height. On error the viewport is left unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidViewportHeight`] for negative or
    /// non-finite heights.
    pub fn set_viewport_height(&mut self, viewport_height: f64) -> Result<(), ConfigError> {
        self.viewport_height = check_viewport_height(viewport_height)?;
        Ok(())
    }

    /// Sets the overscan padding in rows.
    pub fn set_overscan(&mut self, overscan: usize) {
        self.overscan = overscan;
    }

    /// Computes the row window for `scroll_offset` over `total_rows` rows.
    #[must_use]
    pub fn window(&self, scroll_offset: f64, total_rows: usize) -> RowWindow {
        window_for(
            scroll_offset,
            self.row_height,
            self.viewport_height,
            self.overscan,
            total_rows,
        )
    }

    /// Rows intersecting the viewport at `scroll_offset`, without overscan.
    ///
    /// A partly visible row at either edge is included. Hosts check this
    /// against the current [`RowWindow`] with [`RowWindow::covers`] before
    /// skipping a recompute.
    #[must_use]
    pub fn visible_rows(&self, scroll_offset: f64, total_rows: usize) -> Range<usize> {
        visible_rows_for(
            scroll_offset,
            self.row_height,
            self.viewport_height,
            total_rows,
        )
    }

    /// Height of the full content for `total_rows` rows, never below the viewport.
    #[must_use]
    pub fn content_height(&self, total_rows: usize) -> f64 {
        self.window(0.0, total_rows).content_height
    }
}

#[cfg(test)]
mod tests {
    use super::Viewport;
    use crate::ConfigError;

    #[test]
    fn failed_setters_leave_state_untouched() {
        let mut viewport = Viewport::new(40.0, 400.0, 10).unwrap();
        assert_eq!(
            viewport.set_row_height(-3.0),
            Err(ConfigError::InvalidRowHeight(-3.0))
        );
        assert!(viewport.set_viewport_height(f64::NAN).is_err());
        assert_eq!(viewport.row_height(), 40.0);
        assert_eq!(viewport.viewport_height(), 400.0);
    }

    #[test]
    fn zero_viewport_still_renders_overscan() {
        let viewport = Viewport::new(20.0, 0.0, 2).unwrap();
        let window = viewport.window(0.0, 100);
        assert_eq!(window.count, 8);
        assert_eq!(viewport.content_height(100), 2_000.0);
    }

    #[test]
    fn small_overscan_window_does_not_cover_a_short_scroll() {
        let viewport = Viewport::new(40.0, 400.0, 0).unwrap();
        let window = viewport.window(0.0, 1_000);
        assert!(!window.covers(viewport.visible_rows(320.0, 1_000)));

        let padded = Viewport::new(40.0, 400.0, 10).unwrap();
        let window = padded.window(0.0, 1_000);
        assert!(window.covers(padded.visible_rows(320.0, 1_000)));
    }
}
