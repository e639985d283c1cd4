//! Table statement nodes

use serde::{Deserialize, Serialize};
use crate::{Column, Index, Span};

/// `CREATE [TEMPORARY] TABLE [IF NOT EXISTS] name ( ... ) [options]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    pub name: String,
    pub temporary: bool,
    pub if_not_exists: bool,
    /// Columns in declaration order; names are not checked for uniqueness
    pub columns: Vec<Column>,
    pub indexes: Vec<Index>,
    /// Table options in declaration order
    pub options: Vec<TableOption>,
    pub span: Span,
}

impl Table {
    pub fn new(name: impl Into<String>, span: Span) -> Self {
        Self {
            name: name.into(),
            temporary: false,
            if_not_exists: false,
            columns: Vec::new(),
            indexes: Vec::new(),
            options: Vec::new(),
            span,
        }
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Value of the first option recorded under `key`
    pub fn option(&self, key: &str) -> Option<&str> {
        self.options
            .iter()
            .find(|o| o.key == key)
            .map(|o| o.value.as_str())
    }

    pub fn primary_key(&self) -> Option<&Index> {
        self.indexes.iter().find(|i| i.is_primary_key())
    }
}

/// A `KEY [=] value` pair after the column list, e.g. `ENGINE=InnoDB`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableOption {
    pub key: String,
    pub value: String,
}

impl TableOption {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}
