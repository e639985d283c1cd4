//! ddlex Parser - Recursive descent parser for MySQL DDL
//!
//! Turns `CREATE DATABASE` / `CREATE TABLE` statements into the
//! `ddlex_ast` model. `DROP`, `SET` and `USE` statements are skipped, and
//! `CREATE DATABASE` is validated but not part of the output. The first
//! syntax error aborts the parse.

mod buffer;
mod column;
mod config;
mod error;
mod parser;
mod table_options;

pub use buffer::{CancelToken, TokenBuffer, LOOKAHEAD_DEPTH};
pub use config::ParseOptions;
pub use error::*;
pub use parser::Parser;

use ddlex_ast::Statements;

/// Parse a source string into its statements
pub fn parse(source: &str) -> Result<Statements, ParseError> {
    parse_with(source, &ParseOptions::default())
}

/// Parse a source string, naming it in any error
pub fn parse_named(name: &str, source: &str) -> Result<Statements, ParseError> {
    parse_with(source, &ParseOptions::new().source_name(name))
}

/// Parse a source string with a name and cancellation hook from `options`
pub fn parse_with(source: &str, options: &ParseOptions) -> Result<Statements, ParseError> {
    let mut parser = match &options.cancel {
        Some(cancel) => Parser::with_cancel(source, cancel.clone()),
        None => Parser::new(source),
    };

    let result = parser.parse_statements();
    match (&options.source_name, result) {
        (Some(name), Err(err)) => Err(err.with_source_name(name.clone())),
        (_, result) => result,
    }
}
