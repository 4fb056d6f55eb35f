// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// Skips recompute passes for small scroll movements.
///
/// With overscan rendering several rows past either edge, a scroll of only a
/// few rows still lands inside the already-materialized slice. Hosts compare
/// each new offset against the last *applied* offset, so slow drags still
/// accumulate into a recompute once they cross the threshold.
///
/// The band alone does not know about overscan. Callers should only skip when
/// the current window also covers the rows now in view (see
/// [`RowWindow::covers`](crate::RowWindow::covers)).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ScrollHysteresis {
    /// Movement, in rows, below which a scroll is ignored.
    pub rows: usize,
}

impl Default for ScrollHysteresis {
    fn default() -> Self {
        Self { rows: 9 }
    }
}

impl ScrollHysteresis {
    /// A hysteresis band of `rows` rows. `0` disables skipping except for
    /// identical offsets.
    #[must_use]
    pub const fn new(rows: usize) -> Self {
        Self { rows }
    }

    /// Returns `true` if moving from `previous` to `next` should not trigger
    /// a recompute.
    #[must_use]
    pub fn should_skip(&self, previous: f64, next: f64, row_height: f64) -> bool {
        if previous == next {
            return true;
        }
        let delta = if previous > next {
            previous - next
        } else {
            next - previous
        };
        delta < self.rows as f64 * row_height
    }
}
