//! ddlex Lexer - Tokenization of MySQL DDL using logos
//!
//! Whitespace and comments are emitted as tokens rather than skipped, so the
//! parser decides where trivia is allowed. Keywords match case-insensitively.

mod token;

pub use token::*;

use std::borrow::Cow;

use ddlex_ast::Span;
use logos::Logos;

/// Lazily tokenize `source`.
///
/// The iterator yields exactly one [`TokenKind::Eof`] token after the last
/// real token and then ends.
pub fn lex(source: &str) -> Lexer<'_> {
    Lexer::new(source)
}

/// Tokenize a source string into a vector of tokens, `Eof` included
pub fn tokenize(source: &str) -> Vec<Token<'_>> {
    lex(source).collect()
}

/// Pull-based token source over a source string
pub struct Lexer<'src> {
    inner: logos::Lexer<'src, TokenKind>,
    source: &'src str,
    finished: bool,
}

impl<'src> Lexer<'src> {
    pub fn new(source: &'src str) -> Self {
        Self {
            inner: TokenKind::lexer(source),
            source,
            finished: false,
        }
    }

    pub fn source(&self) -> &'src str {
        self.source
    }
}

impl<'src> Iterator for Lexer<'src> {
    type Item = Token<'src>;

    fn next(&mut self) -> Option<Token<'src>> {
        if self.finished {
            return None;
        }

        match self.inner.next() {
            Some(result) => {
                let range = self.inner.span();
                let kind = result.unwrap_or(TokenKind::Error);
                Some(Token {
                    kind,
                    span: Span::new(range.start, range.end),
                    text: self.inner.slice(),
                })
            }
            None => {
                self.finished = true;
                Some(Token::eof(self.source.len()))
            }
        }
    }
}

/// A token with its span and raw source text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'src> {
    pub kind: TokenKind,
    pub span: Span,
    pub text: &'src str,
}

impl<'src> Token<'src> {
    /// End-of-input marker positioned at byte `offset`
    pub fn eof(offset: usize) -> Self {
        Token {
            kind: TokenKind::Eof,
            span: Span::new(offset, offset),
            text: "",
        }
    }

    /// The token's value: quotes stripped and escapes resolved for quoted
    /// kinds, the raw text otherwise.
    pub fn value(&self) -> Cow<'src, str> {
        match self.kind {
            TokenKind::BacktickIdent => unquote(self.text, '`', false),
            TokenKind::SingleQuoteIdent => unquote(self.text, '\'', true),
            TokenKind::DoubleQuoteIdent => unquote(self.text, '"', true),
            _ => Cow::Borrowed(self.text),
        }
    }

    /// Human-readable description for error messages, e.g. `identifier "foo"`
    pub fn describe(&self) -> String {
        match self.kind {
            TokenKind::Eof | TokenKind::Space => self.kind.describe().to_string(),
            kind if kind.is_keyword() => kind.describe().to_string(),
            TokenKind::LParen
            | TokenKind::RParen
            | TokenKind::Comma
            | TokenKind::Semicolon
            | TokenKind::Equal => self.kind.describe().to_string(),
            kind => format!("{} {:?}", kind.describe(), self.text),
        }
    }
}

fn unquote(text: &str, quote: char, backslash_escapes: bool) -> Cow<'_, str> {
    let inner = text
        .strip_prefix(quote)
        .and_then(|t| t.strip_suffix(quote))
        .unwrap_or(text);

    if !inner.contains(quote) && !(backslash_escapes && inner.contains('\\')) {
        return Cow::Borrowed(inner);
    }

    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars().peekable();
    while let Some(c) = chars.next() {
        if c == quote && chars.peek() == Some(&quote) {
            chars.next();
            out.push(quote);
        } else if c == '\\' && backslash_escapes {
            match chars.next() {
                Some('n') => out.push('\n'),
                Some('t') => out.push('\t'),
                Some('r') => out.push('\r'),
                Some('0') => out.push('\0'),
                Some('b') => out.push('\u{8}'),
                Some('Z') => out.push('\u{1a}'),
                // LIKE wildcards keep their backslash
                Some(w @ ('%' | '_')) => {
                    out.push('\\');
                    out.push(w);
                }
                Some(other) => out.push(other),
                None => out.push('\\'),
            }
        } else {
            out.push(c);
        }
    }
    Cow::Owned(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        tokenize(source)
            .into_iter()
            .filter(|t| !t.kind.is_trivia())
            .map(|t| t.kind)
            .collect()
    }

    #[test]
    fn test_basic_tokens() {
        let tokens = tokenize("CREATE TABLE foo (");
        assert_eq!(tokens[0].kind, TokenKind::Create);
        assert_eq!(tokens[1].kind, TokenKind::Space);
        assert_eq!(tokens[2].kind, TokenKind::Table);
        assert_eq!(tokens[4].kind, TokenKind::Ident);
        assert_eq!(tokens[4].text, "foo");
        assert_eq!(tokens[6].kind, TokenKind::LParen);
        assert_eq!(tokens[7].kind, TokenKind::Eof);
        assert_eq!(tokens.len(), 8);
    }

    #[test]
    fn test_printer_keyword_list_matches_lexer() {
        for word in ddlex_ast::KEYWORDS {
            let tokens = tokenize(word);
            assert_eq!(tokens.len(), 2, "{}", word);
            assert!(tokens[0].kind.is_keyword(), "{} lexes as {:?}", word, tokens[0].kind);
            assert_eq!(tokens[0].kind.keyword(), Some(*word));
        }
    }

    #[test]
    fn test_keywords_ignore_case() {
        assert_eq!(
            kinds("create Table NOT null auto_increment"),
            vec![
                TokenKind::Create,
                TokenKind::Table,
                TokenKind::Not,
                TokenKind::Null,
                TokenKind::AutoIncrement,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_keyword_prefix_is_identifier() {
        assert_eq!(kinds("integer intx"), vec![TokenKind::Integer, TokenKind::Ident, TokenKind::Eof]);
    }

    #[test]
    fn test_quoted_values() {
        let tokens: Vec<_> = tokenize("`a``b` 'it''s' \"x\\ny\"")
            .into_iter()
            .filter(|t| !t.kind.is_trivia())
            .collect();
        assert_eq!(tokens[0].kind, TokenKind::BacktickIdent);
        assert_eq!(tokens[0].value(), "a`b");
        assert_eq!(tokens[1].kind, TokenKind::SingleQuoteIdent);
        assert_eq!(tokens[1].value(), "it's");
        assert_eq!(tokens[2].kind, TokenKind::DoubleQuoteIdent);
        assert_eq!(tokens[2].value(), "x\ny");
    }

    #[test]
    fn test_comments_are_tokens() {
        let tokens = tokenize("# one\n-- two\n/* three\n*/x");
        let comments: Vec<_> = tokens
            .iter()
            .filter(|t| t.kind == TokenKind::CommentIdent)
            .map(|t| t.text)
            .collect();
        assert_eq!(comments, vec!["# one", "-- two", "/* three\n*/"]);
        assert_eq!(tokens[tokens.len() - 2].kind, TokenKind::Ident);
    }

    #[test]
    fn test_numbers() {
        let tokens: Vec<_> = tokenize("10 -1 3.25")
            .into_iter()
            .filter(|t| t.kind == TokenKind::Number)
            .map(|t| t.text)
            .collect();
        assert_eq!(tokens, vec!["10", "-1", "3.25"]);
    }

    #[test]
    fn test_invalid_input_is_error_token() {
        assert_eq!(kinds("@"), vec![TokenKind::Error, TokenKind::Eof]);
    }

    #[test]
    fn test_lexer_ends_after_single_eof() {
        let mut lexer = lex("");
        assert_eq!(lexer.next().map(|t| t.kind), Some(TokenKind::Eof));
        assert_eq!(lexer.next(), None);
    }

    #[test]
    fn test_spans() {
        let tokens = tokenize("a  b");
        assert_eq!(tokens[2].span, Span::new(3, 4));
        assert_eq!(tokens[3].span, Span::new(4, 4));
    }

    #[test]
    fn test_describe() {
        let tokens = tokenize("foo CREATE (");
        assert_eq!(tokens[0].describe(), "identifier \"foo\"");
        assert_eq!(tokens[2].describe(), "CREATE");
        assert_eq!(tokens[4].describe(), "'('");
        assert_eq!(tokens[5].describe(), "end of input");
    }
}
