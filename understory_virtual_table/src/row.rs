// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Row keys and materialized view rows.

use std::borrow::Borrow;
use std::fmt;
use std::sync::Arc;

use log::trace;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::Column;

/// A source row: field name to JSON value. Owned by the host.
pub type SourceRow = Map<String, Value>;

/// Field consulted when the configured key field is absent.
const ID_FIELD: &str = "id";

/// Stable identity of a row, used for caching and selection.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RowKey(String);

impl RowKey {
    /// Returns the key as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for RowKey {
    fn from(key: &str) -> Self {
        Self(key.to_owned())
    }
}

impl From<String> for RowKey {
    fn from(key: String) -> Self {
        Self(key)
    }
}

impl Borrow<str> for RowKey {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RowKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Derives the key for the row at `position` in the dataset.
///
/// Tries `row[key_field]`, then `row["id"]`, then the position itself. Null,
/// missing, and empty-string values fall through to the next candidate;
/// other scalars are stringified, with integral floats written without a
/// fraction (`1.0` keys as `"1"`).
///
/// The positional fallback is only stable while the dataset keeps its order.
///
/// ```rust
/// use serde_json::json;
/// use understory_virtual_table::derive_row_key;
///
/// let row = json!({ "recordId": 17, "id": "a" }).as_object().cloned().unwrap();
/// assert_eq!(derive_row_key(&row, Some("recordId"), 0).as_str(), "17");
/// assert_eq!(derive_row_key(&row, Some("missing"), 0).as_str(), "a");
///
/// let anonymous = json!({ "name": "x" }).as_object().cloned().unwrap();
/// assert_eq!(derive_row_key(&anonymous, None, 42).as_str(), "42");
/// ```
#[must_use]
pub fn derive_row_key(row: &SourceRow, key_field: Option<&str>, position: usize) -> RowKey {
    key_field
        .and_then(|field| key_from_value(row.get(field)))
        .or_else(|| key_from_value(row.get(ID_FIELD)))
        .unwrap_or_else(|| {
            trace!("row {position} has no key field or id, keyed by position");
            RowKey(position.to_string())
        })
}

fn key_from_value(value: Option<&Value>) -> Option<RowKey> {
    match value? {
        Value::Null => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(RowKey(s.clone())),
        Value::Number(n) if n.is_f64() => n.as_f64().map(|f| RowKey(f.to_string())),
        other => Some(RowKey(other.to_string())),
    }
}

/// One column of a materialized row.
#[derive(Clone, Debug, PartialEq)]
pub struct Cell {
    key: String,
    column: Arc<Column>,
    value: Value,
    type_attributes: Map<String, Value>,
}

impl Cell {
    fn resolve(row_key: &RowKey, column: &Arc<Column>, fields: &SourceRow) -> Self {
        let type_attributes = column
            .type_attributes()
            .iter()
            .map(|(name, attribute)| (name.clone(), attribute.resolve(fields)))
            .collect();
        Self {
            key: format!("{row_key}-{}", column.key()),
            column: Arc::clone(column),
            value: column.value_in(fields),
            type_attributes,
        }
    }

    /// Unique cell key, `"{row key}-{column key}"`.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The column this cell belongs to.
    #[must_use]
    pub fn column(&self) -> &Column {
        &self.column
    }

    /// The row's value for the column, `null` when absent.
    #[must_use]
    pub fn value(&self) -> &Value {
        &self.value
    }

    /// Type attributes with field references substituted from the row.
    #[must_use]
    pub fn type_attributes(&self) -> &Map<String, Value> {
        &self.type_attributes
    }
}

/// The cached render model of one source row.
///
/// View rows are created the first time their key enters the visible window
/// and then reused until the dataset is replaced. Only the selection flag is
/// refreshed on reuse, plus the cells when the columns changed in between.
#[derive(Clone, Debug, PartialEq)]
pub struct ViewRow {
    pub(crate) key: RowKey,
    pub(crate) index: usize,
    pub(crate) fields: SourceRow,
    pub(crate) is_selected: bool,
    pub(crate) cells: Vec<Cell>,
    pub(crate) column_revision: u64,
    processed: bool,
}

impl ViewRow {
    pub(crate) fn materialize(
        key: RowKey,
        source: &SourceRow,
        index: usize,
        is_selected: bool,
        columns: &[Arc<Column>],
        column_revision: u64,
    ) -> Self {
        let mut row = Self {
            key,
            index,
            fields: source.clone(),
            is_selected,
            cells: Vec::new(),
            column_revision,
            processed: false,
        };
        row.flatten(columns, column_revision);
        row
    }

    /// Rebuilds the cells against `columns`.
    pub(crate) fn flatten(&mut self, columns: &[Arc<Column>], column_revision: u64) {
        self.cells = columns
            .iter()
            .map(|column| Cell::resolve(&self.key, column, &self.fields))
            .collect();
        self.column_revision = column_revision;
        self.processed = true;
    }

    /// The row key.
    #[must_use]
    pub fn key(&self) -> &RowKey {
        &self.key
    }

    /// 1-based display position.
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Copy of the source row's fields.
    #[must_use]
    pub fn fields(&self) -> &SourceRow {
        &self.fields
    }

    /// A single source field.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// Whether the row is selected.
    #[must_use]
    pub fn is_selected(&self) -> bool {
        self.is_selected
    }

    /// One cell per column, in column order.
    #[must_use]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// `true` once the cells have been flattened.
    #[must_use]
    pub fn is_processed(&self) -> bool {
        self.processed
    }
}
