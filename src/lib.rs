//! ddlex - MySQL DDL parser
//!
//! This is the root workspace crate that provides integration tests.
//! The actual implementation is in the workspace member crates.

pub use ddlex_ast as ast;
pub use ddlex_lexer as lexer;
pub use ddlex_parser as parser;

pub use ddlex_parser::{parse, parse_named, parse_with, ParseError, ParseOptions};
