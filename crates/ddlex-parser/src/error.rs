//! Parser error types

use ddlex_ast::{floor_char_boundary, Span};
use ddlex_lexer::Token;
use thiserror::Error;

/// Bytes of context shown on each side of the offending token
const NEAR_CONTEXT: usize = 24;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseErrorKind {
    #[error("expected {expected}, found {found}")]
    UnexpectedToken { expected: String, found: String },

    #[error("{0} is not supported")]
    Unsupported(&'static str),

    #[error("cannot apply {0} here")]
    CannotApply(&'static str),

    #[error("previous column or index definition not terminated")]
    UnterminatedDefinition,

    #[error("ON {0} may not appear again in the same REFERENCES clause")]
    DuplicateReferenceAction(&'static str),

    #[error("parse cancelled before end of input")]
    Cancelled,
}

/// A fatal, position-annotated parse error
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}line {line}, column {column}: {kind}\n    near \"{near}\"", source_prefix(.source_name))]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub span: Span,
    /// 1-based
    pub line: usize,
    /// 1-based, in characters
    pub column: usize,
    /// Source text surrounding the offending token
    pub near: String,
    pub source_name: Option<String>,
}

fn source_prefix(name: &Option<String>) -> String {
    match name {
        Some(name) => format!("{}: ", name),
        None => String::new(),
    }
}

impl ParseError {
    pub(crate) fn at(kind: ParseErrorKind, token: &Token<'_>, source: &str) -> Self {
        let span = token.span;
        let location = span.location(source);
        Self {
            kind,
            span,
            line: location.line,
            column: location.column,
            near: near_text(source, span),
            source_name: None,
        }
    }

    pub(crate) fn unexpected(expected: impl Into<String>, token: &Token<'_>, source: &str) -> Self {
        Self::at(
            ParseErrorKind::UnexpectedToken {
                expected: expected.into(),
                found: token.describe(),
            },
            token,
            source,
        )
    }

    pub fn span(&self) -> Span {
        self.span
    }

    pub fn with_source_name(mut self, name: impl Into<String>) -> Self {
        self.source_name = Some(name.into());
        self
    }
}

/// The offending token plus a little context on either side, limited to
/// its own line.
fn near_text(source: &str, span: Span) -> String {
    let start = floor_char_boundary(source, span.start);
    let end = floor_char_boundary(source, span.end.max(span.start));

    let line_start = source[..start].rfind('\n').map(|i| i + 1).unwrap_or(0);
    let line_end = source[end..].find('\n').map(|i| end + i).unwrap_or(source.len());

    let from = floor_char_boundary(source, start.saturating_sub(NEAR_CONTEXT).max(line_start));
    let to = floor_char_boundary(source, (end + NEAR_CONTEXT).min(line_end));
    source[from..to.max(from)].trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ddlex_lexer::TokenKind;

    fn token_at<'a>(source: &'a str, needle: &str) -> Token<'a> {
        let start = source.find(needle).unwrap();
        Token {
            kind: TokenKind::Ident,
            span: Span::new(start, start + needle.len()),
            text: &source[start..start + needle.len()],
        }
    }

    #[test]
    fn test_display_with_source_name() {
        let source = "CREATE TABLE t (\n  a WHATEVER\n);";
        let err = ParseError::unexpected("column type", &token_at(source, "WHATEVER"), source)
            .with_source_name("schema.sql");
        assert_eq!(err.line, 2);
        assert_eq!(err.column, 5);
        assert_eq!(
            err.to_string(),
            "schema.sql: line 2, column 5: expected column type, found identifier \"WHATEVER\"\n    near \"a WHATEVER\""
        );
    }

    #[test]
    fn test_display_without_source_name() {
        let source = "DROP x";
        let err = ParseError::at(ParseErrorKind::Unsupported("CHECK"), &token_at(source, "x"), source);
        assert!(err.to_string().starts_with("line 1, column 6: CHECK is not supported"));
    }

    #[test]
    fn test_near_text_is_bounded() {
        let source = format!("{}target{}", "x".repeat(100), "y".repeat(100));
        let err = ParseError::unexpected("something", &token_at(&source, "target"), &source);
        assert_eq!(err.near.len(), NEAR_CONTEXT * 2 + "target".len());
        assert!(err.near.contains("target"));
    }

    #[test]
    fn test_near_text_at_end_of_input() {
        let source = "CREATE TABLE t (a INT";
        let eof = Token::eof(source.len());
        let err = ParseError::unexpected("')'", &eof, source);
        assert_eq!(err.near, "CREATE TABLE t (a INT");
        assert_eq!(err.column, source.len() + 1);
    }
}
