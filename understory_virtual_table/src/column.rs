// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Column definitions and their normalized form.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::SourceRow;

/// How a column's values should be presented.
///
/// The engine never formats values; the type is carried through to each
/// [`Cell`](crate::Cell) for the host's cell renderer. Unrecognized names are
/// kept verbatim in [`ColumnType::Other`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ColumnType {
    /// Plain text. The default when no type is declared.
    #[default]
    Text,
    /// A number.
    Number,
    /// A monetary amount.
    Currency,
    /// A percentage.
    Percent,
    /// A date or timestamp.
    Date,
    /// A checkbox-style boolean.
    Boolean,
    /// A hyperlink.
    Url,
    /// An email address.
    Email,
    /// A phone number.
    Phone,
    /// Any other host-defined type.
    Other(String),
}

impl ColumnType {
    /// Returns the type name as declared by hosts.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Text => "text",
            Self::Number => "number",
            Self::Currency => "currency",
            Self::Percent => "percent",
            Self::Date => "date",
            Self::Boolean => "boolean",
            Self::Url => "url",
            Self::Email => "email",
            Self::Phone => "phone",
            Self::Other(name) => name,
        }
    }
}

impl From<&str> for ColumnType {
    fn from(name: &str) -> Self {
        match name {
            "" | "text" => Self::Text,
            "number" => Self::Number,
            "currency" => Self::Currency,
            "percent" => Self::Percent,
            "date" => Self::Date,
            "boolean" => Self::Boolean,
            "url" => Self::Url,
            "email" => Self::Email,
            "phone" => Self::Phone,
            other => Self::Other(other.to_owned()),
        }
    }
}

impl From<String> for ColumnType {
    fn from(name: String) -> Self {
        Self::from(name.as_str())
    }
}

impl From<ColumnType> for String {
    fn from(column_type: ColumnType) -> Self {
        match column_type {
            ColumnType::Other(name) => name,
            known => known.as_str().to_owned(),
        }
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A type attribute value: a literal, or a reference to another field of the row.
///
/// In JSON a reference is written `{ "fieldName": "name" }`; anything else is
/// a literal.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TypeAttribute {
    /// Substituted with the row's value for `field_name` when the row is
    /// materialized.
    Field {
        /// The referenced row field.
        #[serde(rename = "fieldName")]
        field_name: String,
    },
    /// Passed through unchanged.
    Literal(Value),
}

impl TypeAttribute {
    /// A reference to `field_name`.
    #[must_use]
    pub fn field(field_name: impl Into<String>) -> Self {
        Self::Field {
            field_name: field_name.into(),
        }
    }

    /// A literal value.
    #[must_use]
    pub fn literal(value: impl Into<Value>) -> Self {
        Self::Literal(value.into())
    }

    /// Resolves against a row. Missing fields resolve to `null`.
    #[must_use]
    pub fn resolve(&self, fields: &SourceRow) -> Value {
        match self {
            Self::Field { field_name } => fields.get(field_name).cloned().unwrap_or(Value::Null),
            Self::Literal(value) => value.clone(),
        }
    }
}

/// A column as supplied by the host.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ColumnDefinition {
    /// Row field displayed in this column.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field_name: Option<String>,
    /// Header label.
    pub label: String,
    /// Declared presentation type; `text` when absent.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub column_type: Option<ColumnType>,
    /// Renderer attributes, possibly referencing other row fields.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub type_attributes: BTreeMap<String, TypeAttribute>,
}

impl ColumnDefinition {
    /// A text column showing `field_name` under `label`.
    #[must_use]
    pub fn new(field_name: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            field_name: Some(field_name.into()),
            label: label.into(),
            ..Self::default()
        }
    }

    /// Sets the declared type.
    #[must_use]
    pub fn with_type(mut self, column_type: impl Into<ColumnType>) -> Self {
        self.column_type = Some(column_type.into());
        self
    }

    /// Adds a type attribute.
    #[must_use]
    pub fn with_attribute(mut self, name: impl Into<String>, attribute: TypeAttribute) -> Self {
        self.type_attributes.insert(name.into(), attribute);
        self
    }
}

/// A normalized column.
///
/// Its key is the field name, or the label for columns without one, and its
/// type is always present.
#[derive(Clone, Debug, PartialEq)]
pub struct Column {
    key: String,
    field_name: Option<String>,
    label: String,
    column_type: ColumnType,
    type_attributes: BTreeMap<String, TypeAttribute>,
}

impl Column {
    /// Normalizes a host definition.
    #[must_use]
    pub fn from_definition(definition: ColumnDefinition) -> Self {
        let ColumnDefinition {
            field_name,
            label,
            column_type,
            type_attributes,
        } = definition;
        let key = match &field_name {
            Some(field) if !field.is_empty() => field.clone(),
            _ => label.clone(),
        };
        Self {
            key,
            field_name,
            label,
            column_type: column_type.unwrap_or_default(),
            type_attributes,
        }
    }

    /// Stable column key.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Row field displayed in this column, if any.
    #[must_use]
    pub fn field_name(&self) -> Option<&str> {
        self.field_name.as_deref()
    }

    /// Header label.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Presentation type.
    #[must_use]
    pub fn column_type(&self) -> &ColumnType {
        &self.column_type
    }

    /// Unresolved type attributes.
    #[must_use]
    pub fn type_attributes(&self) -> &BTreeMap<String, TypeAttribute> {
        &self.type_attributes
    }

    /// The value this column shows for a row; `null` when absent.
    #[must_use]
    pub fn value_in(&self, fields: &SourceRow) -> Value {
        self.field_name
            .as_deref()
            .and_then(|field| fields.get(field))
            .cloned()
            .unwrap_or(Value::Null)
    }
}

pub(crate) fn normalize_columns<I>(definitions: I) -> Vec<Arc<Column>>
where
    I: IntoIterator<Item = ColumnDefinition>,
{
    definitions
        .into_iter()
        .map(|definition| Arc::new(Column::from_definition(definition)))
        .collect()
}
