// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use serde::{Deserialize, Serialize};

/// Initial configuration for a [`VirtualTable`](crate::VirtualTable).
///
/// Every field can be changed later through the matching setter on the table.
/// Deserializes from camelCase JSON; missing fields take their defaults:
///
/// ```rust
/// use understory_virtual_table::TableConfig;
///
/// let config: TableConfig =
///     serde_json::from_str(r#"{ "rowHeight": 32, "keyField": "recordId" }"#).unwrap();
/// assert_eq!(config.row_height, 32.0);
/// assert_eq!(config.overscan, 10);
/// assert_eq!(config.key_field.as_deref(), Some("recordId"));
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TableConfig {
    /// Pixel height of every row. Must be positive.
    pub row_height: f64,
    /// Pixel height of the scroll viewport. Must be non-negative.
    pub viewport_height: f64,
    /// Rows materialized above the viewport; four times as many are
    /// materialized below it.
    pub overscan: usize,
    /// Scroll movements shorter than this many rows do not recompute.
    pub hysteresis_rows: usize,
    /// Whether rows can be selected at all.
    pub row_selection: bool,
    /// Row field used as the row key, before the `id` fallback.
    pub key_field: Option<String>,
}

impl TableConfig {
    /// Default row height in pixels.
    pub const DEFAULT_ROW_HEIGHT: f64 = 40.0;
    /// Default viewport height in pixels.
    pub const DEFAULT_VIEWPORT_HEIGHT: f64 = 400.0;
    /// Default overscan in rows.
    pub const DEFAULT_OVERSCAN: usize = 10;
    /// Default hysteresis band in rows.
    pub const DEFAULT_HYSTERESIS_ROWS: usize = 9;
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            row_height: Self::DEFAULT_ROW_HEIGHT,
            viewport_height: Self::DEFAULT_VIEWPORT_HEIGHT,
            overscan: Self::DEFAULT_OVERSCAN,
            hysteresis_rows: Self::DEFAULT_HYSTERESIS_ROWS,
            row_selection: true,
            key_field: None,
        }
    }
}
