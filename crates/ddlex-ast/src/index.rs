//! Index, constraint and foreign-key reference nodes

use serde::{Deserialize, Serialize};
use crate::Span;

/// An index or constraint declared inside `CREATE TABLE ( ... )`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Index {
    pub kind: IndexKind,
    /// Constraint symbol: `CONSTRAINT fk_user FOREIGN KEY ...`
    pub symbol: Option<String>,
    pub name: Option<String>,
    pub index_type: IndexType,
    /// Indexed column names, never empty once parsed
    pub columns: Vec<String>,
    pub reference: Option<Reference>,
    pub span: Span,
}

impl Index {
    pub fn new(kind: IndexKind, span: Span) -> Self {
        Self {
            kind,
            symbol: None,
            name: None,
            index_type: IndexType::None,
            columns: Vec::new(),
            reference: None,
            span,
        }
    }

    pub fn is_primary_key(&self) -> bool {
        self.kind == IndexKind::PrimaryKey
    }

    pub fn is_foreign_key(&self) -> bool {
        self.kind == IndexKind::ForeignKey
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IndexKind {
    PrimaryKey,
    Unique,
    Normal,
    FullText,
    Spatial,
    ForeignKey,
}

/// `USING BTREE | HASH`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum IndexType {
    #[default]
    None,
    BTree,
    Hash,
}

/// Target of a foreign key: `REFERENCES table (cols) ...`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reference {
    pub table_name: String,
    pub columns: Vec<String>,
    pub match_kind: Option<ReferenceMatch>,
    pub on_delete: Option<ReferenceOption>,
    pub on_update: Option<ReferenceOption>,
}

impl Reference {
    pub fn new(table_name: impl Into<String>) -> Self {
        Self {
            table_name: table_name.into(),
            columns: Vec::new(),
            match_kind: None,
            on_delete: None,
            on_update: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReferenceMatch {
    Full,
    Partial,
    Simple,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReferenceOption {
    Restrict,
    Cascade,
    SetNull,
    NoAction,
}

impl ReferenceOption {
    pub fn sql(&self) -> &'static str {
        match self {
            ReferenceOption::Restrict => "RESTRICT",
            ReferenceOption::Cascade => "CASCADE",
            ReferenceOption::SetNull => "SET NULL",
            ReferenceOption::NoAction => "NO ACTION",
        }
    }
}
