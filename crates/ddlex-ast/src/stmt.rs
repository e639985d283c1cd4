//! Top-level statements

use serde::{Deserialize, Serialize};
use crate::{Span, Table};

/// A top-level statement node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Statement {
    Database(Database),
    Table(Table),
}

/// `CREATE DATABASE [IF NOT EXISTS] name`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Database {
    pub name: String,
    pub if_not_exists: bool,
    pub span: Span,
}

impl Database {
    pub fn new(name: impl Into<String>, span: Span) -> Self {
        Self {
            name: name.into(),
            if_not_exists: false,
            span,
        }
    }
}

/// Parse result: statements in source order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Statements {
    pub statements: Vec<Statement>,
}

impl Statements {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, stmt: Statement) {
        self.statements.push(stmt);
    }

    pub fn len(&self) -> usize {
        self.statements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Statement> {
        self.statements.iter()
    }

    pub fn tables(&self) -> impl Iterator<Item = &Table> {
        self.statements.iter().filter_map(|s| match s {
            Statement::Table(t) => Some(t),
            Statement::Database(_) => None,
        })
    }

    pub fn table(&self, name: &str) -> Option<&Table> {
        self.tables().find(|t| t.name == name)
    }
}

impl Extend<Statement> for Statements {
    fn extend<I: IntoIterator<Item = Statement>>(&mut self, iter: I) {
        self.statements.extend(iter);
    }
}

impl IntoIterator for Statements {
    type Item = Statement;
    type IntoIter = std::vec::IntoIter<Statement>;

    fn into_iter(self) -> Self::IntoIter {
        self.statements.into_iter()
    }
}

impl<'a> IntoIterator for &'a Statements {
    type Item = &'a Statement;
    type IntoIter = std::slice::Iter<'a, Statement>;

    fn into_iter(self) -> Self::IntoIter {
        self.statements.iter()
    }
}
