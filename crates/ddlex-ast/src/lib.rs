//! ddlex AST - Statement model for parsed MySQL DDL
//!
//! This crate defines the node types produced by the parser (databases,
//! tables, columns, indexes, foreign-key references), source spans, and a
//! printer that turns the tree back into canonical DDL text.

mod span;
mod column;
mod index;
mod table;
mod stmt;
mod printer;

pub use span::*;
pub use column::*;
pub use index::*;
pub use table::*;
pub use stmt::*;
pub use printer::*;
