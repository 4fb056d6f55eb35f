// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Virtual Table: row materialization and selection for virtualized tables.
//!
//! A virtualized table renders only the rows intersecting its viewport. This
//! crate is the renderer-agnostic engine behind such a table:
//!
//! - It maps the scroll offset to a row window using
//!   [`understory_row_window`], with asymmetric overscan and a small scroll
//!   hysteresis band.
//! - It lazily turns each source row in that window into a [`ViewRow`]: a copy
//!   of the row's fields plus its [`RowKey`], 1-based display index, selection
//!   flag, and one resolved [`Cell`] per column. View rows are cached by key for
//!   the lifetime of the dataset, so scrolling back over seen rows is cheap.
//! - It keeps per-row and select-all selection consistent through
//!   [`understory_row_selection`]. Select-all is a mode, not an enumeration:
//!   rows first materialized after "select all" come out selected, and cached
//!   rows are reconciled each time they are revisited.
//!
//! Host frameworks are responsible for:
//!
//! - Feeding scroll offsets and viewport heights, either directly or through
//!   the frame-coalescing [`VirtualTable::request_scroll`] / [`VirtualTable::run_frame`]
//!   pair, scheduling the frame callback themselves.
//! - Rendering [`VirtualTable::visible_rows`] translated by
//!   [`RowWindow::pixel_offset`] inside a region of [`RowWindow::content_height`].
//! - Routing checkbox events to [`VirtualTable::toggle_row`] and
//!   [`VirtualTable::toggle_all_visible`].
//!
//! ## Minimal example
//!
//! ```rust
//! use serde_json::json;
//! use understory_virtual_table::{ColumnDefinition, SourceRow, TableConfig, VirtualTable};
//!
//! let rows: Vec<SourceRow> = (0..1_000)
//!     .map(|i| {
//!         let value = json!({ "id": format!("key{i}"), "name": format!("Task {i}") });
//!         value.as_object().cloned().unwrap()
//!     })
//!     .collect();
//!
//! let mut table = VirtualTable::new(TableConfig::default()).unwrap();
//! table.set_columns([ColumnDefinition::new("name", "Task Name")]);
//! table.set_dataset(rows);
//!
//! // 400px viewport / 40px rows + 4 * 10 rows of overscan.
//! assert_eq!(table.visible_rows().count(), 50);
//!
//! // Header checkbox, then scroll: new rows arrive already selected.
//! table.toggle_all_visible(true);
//! table.set_scroll_offset(8_000.0);
//! assert!(table.visible_rows().all(|row| row.is_selected()));
//!
//! // A single toggle leaves select-all mode.
//! assert!(table.toggle_row("key200", false));
//! assert!(!table.selection().is_all());
//! assert!(!table.is_selected("key200"));
//! ```
//!
//! [`RowWindow::pixel_offset`]: understory_row_window::RowWindow::pixel_offset
//! [`RowWindow::content_height`]: understory_row_window::RowWindow::content_height

mod cache;
mod column;
mod config;
mod error;
mod frame;
mod row;
mod table;

pub use column::{Column, ColumnDefinition, ColumnType, TypeAttribute};
pub use config::TableConfig;
pub use error::TableError;
pub use frame::{FrameSlot, FrameToken};
pub use row::{Cell, RowKey, SourceRow, ViewRow, derive_row_key};
pub use table::{FrameRequest, VirtualTable};

pub use understory_row_selection::SelectionSnapshot;
pub use understory_row_window::RowWindow;
