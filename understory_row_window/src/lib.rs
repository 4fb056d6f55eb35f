// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Row Window: fixed-height row windowing for virtualized tables.
//!
//! This crate answers one question for a table whose rows all share the same
//! pixel height: given a scroll offset, which contiguous slice of rows should
//! be materialized, and where should that slice be drawn?
//!
//! The core concepts are:
//!
//! - [`compute_row_window`]: a pure function from scroll offset, row height,
//!   viewport height, overscan padding, and row count to a [`RowWindow`].
//! - [`Viewport`]: the validated configuration half of those inputs. Once a
//!   `Viewport` exists, [`Viewport::window`] cannot fail.
//! - [`RowWindow`]: the resulting `[start, end)` slice plus the pixel offset
//!   to translate it by and the total scrollable content height.
//! - [`ScrollHysteresis`]: a small predicate for skipping recompute passes
//!   when a scroll moved less than a few rows.
//!
//! Overscan is asymmetric. The window starts `overscan` rows above the first
//! visible row but extends `4 * overscan` rows past the viewport, so forward
//! scrolling re-triggers a recompute less often than backward scrolling.
//!
//! ## Minimal example
//!
//! ```rust
//! use understory_row_window::{Viewport, compute_row_window};
//!
//! // 40px rows, a 400px viewport, 10 rows of overscan.
//! let viewport = Viewport::new(40.0, 400.0, 10).unwrap();
//!
//! let window = viewport.window(0.0, 100_000);
//! assert_eq!(window.start, 0);
//! assert_eq!(window.count, 50);
//!
//! // Scrolled down by 100 rows: the window begins 10 rows above.
//! let window = viewport.window(4_000.0, 100_000);
//! assert_eq!(window.start, 90);
//! assert_eq!(window.pixel_offset, 3_600.0);
//!
//! // The free function validates on every call instead.
//! assert!(compute_row_window(0.0, 0.0, 400.0, 10, 100).is_err());
//! ```
//!
//! All heights and offsets are logical pixels and are expected to be finite.
//! This crate is `no_std`.

#![no_std]

mod error;
mod hysteresis;
mod viewport;
mod window;

pub use error::ConfigError;
pub use hysteresis::ScrollHysteresis;
pub use viewport::Viewport;
pub use window::{RowWindow, compute_row_window};
