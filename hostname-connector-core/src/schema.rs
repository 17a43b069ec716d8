//! Table and column definitions
//!
//! Declarative description of what a table exposes to the query engine. Row
//! values are resolved from these definitions in [`crate::row`].

use serde::Serialize;

/// Column value type as seen by the query engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ColumnType {
    String,
    Timestamp,
    Json,
    Bool,
}

/// Where a column takes its value from in the serialized row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Transform {
    /// The row field named like the column.
    FromColumnName,
    /// A dotted path into the row, e.g. `ssl.certificate_authority`.
    FromField(&'static str),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Column {
    pub name: &'static str,
    pub column_type: ColumnType,
    pub description: &'static str,
    pub transform: Transform,
}

impl Column {
    pub const fn new(
        name: &'static str,
        column_type: ColumnType,
        description: &'static str,
    ) -> Self {
        Self {
            name,
            column_type,
            description,
            transform: Transform::FromColumnName,
        }
    }

    #[must_use]
    pub const fn from_field(mut self, path: &'static str) -> Self {
        self.transform = Transform::FromField(path);
        self
    }

    /// Field path the value is read from.
    pub fn source_path(&self) -> &'static str {
        match self.transform {
            Transform::FromColumnName => self.name,
            Transform::FromField(path) => path,
        }
    }
}

/// Columns that must all carry an equality qualifier for a get.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum KeyColumnSet {
    AllColumns(&'static [&'static str]),
}

impl KeyColumnSet {
    pub fn columns(&self) -> &'static [&'static str] {
        match self {
            Self::AllColumns(columns) => columns,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableDefinition {
    pub name: &'static str,
    pub description: &'static str,
    pub get_key_columns: KeyColumnSet,
    pub columns: Vec<Column>,
}

impl TableDefinition {
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn column_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.columns.iter().map(|c| c.name)
    }
}
