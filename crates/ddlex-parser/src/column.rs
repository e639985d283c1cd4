//! Column type and attribute grammar
//!
//! Column attributes must appear in MySQL's canonical order. Every
//! attribute keyword carries a [`Rank`]; a column type allows a subset of
//! ranks on top of [`UNIVERSAL`], and the ranks seen while scanning must
//! never decrease. Equal ranks may repeat, so `UNIQUE KEY PRIMARY KEY`
//! is accepted.

use ddlex_ast::{Column, ColumnType, Length, NullState};
use ddlex_lexer::{Token, TokenKind};

use crate::parser::Parser;
use crate::{ParseError, ParseErrorKind};

/// Position of a column attribute in the canonical attribute order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) enum Rank {
    /// `(N)`
    Size,
    /// `(M,D)`, scale required
    DecimalSize,
    /// `(M[,D])`
    DecimalOptionalSize,
    Unsigned,
    ZeroFill,
    Binary,
    Null,
    Default,
    AutoIncrement,
    Key,
    Comment,
}

/// Ranks every column type accepts
pub(crate) const UNIVERSAL: &[Rank] = &[
    Rank::Null,
    Rank::Default,
    Rank::AutoIncrement,
    Rank::Key,
    Rank::Comment,
];

const BIT: &[Rank] = &[Rank::Size];
const INTEGER: &[Rank] = &[Rank::Size, Rank::Unsigned, Rank::ZeroFill];
const FLOATING: &[Rank] = &[Rank::DecimalSize, Rank::Unsigned, Rank::ZeroFill];
const FIXED_POINT: &[Rank] = &[Rank::DecimalOptionalSize, Rank::Unsigned, Rank::ZeroFill];
const TEMPORAL: &[Rank] = &[Rank::Size];
const CHARACTER: &[Rank] = &[Rank::Size, Rank::Binary];
const BINARY: &[Rank] = &[Rank::Size];
const TEXT: &[Rank] = &[Rank::Binary];
const NONE: &[Rank] = &[];

/// Map a type keyword to its column type and type-specific ranks.
pub(crate) fn column_type(kind: TokenKind) -> Option<(ColumnType, &'static [Rank])> {
    let entry = match kind {
        TokenKind::Bit => (ColumnType::Bit, BIT),
        TokenKind::TinyInt => (ColumnType::TinyInt, INTEGER),
        TokenKind::SmallInt => (ColumnType::SmallInt, INTEGER),
        TokenKind::MediumInt => (ColumnType::MediumInt, INTEGER),
        TokenKind::Int => (ColumnType::Int, INTEGER),
        TokenKind::Integer => (ColumnType::Integer, INTEGER),
        TokenKind::BigInt => (ColumnType::BigInt, INTEGER),
        TokenKind::Real => (ColumnType::Real, FLOATING),
        TokenKind::Double => (ColumnType::Double, FLOATING),
        TokenKind::Float => (ColumnType::Float, FLOATING),
        TokenKind::Decimal => (ColumnType::Decimal, FIXED_POINT),
        TokenKind::Numeric => (ColumnType::Numeric, FIXED_POINT),
        TokenKind::Date => (ColumnType::Date, NONE),
        TokenKind::Time => (ColumnType::Time, TEMPORAL),
        TokenKind::Timestamp => (ColumnType::Timestamp, TEMPORAL),
        TokenKind::DateTime => (ColumnType::DateTime, TEMPORAL),
        TokenKind::Year => (ColumnType::Year, NONE),
        TokenKind::Char => (ColumnType::Char, CHARACTER),
        TokenKind::VarChar => (ColumnType::VarChar, CHARACTER),
        TokenKind::Binary => (ColumnType::Binary, BINARY),
        TokenKind::VarBinary => (ColumnType::VarBinary, BINARY),
        TokenKind::TinyBlob => (ColumnType::TinyBlob, NONE),
        TokenKind::Blob => (ColumnType::Blob, NONE),
        TokenKind::MediumBlob => (ColumnType::MediumBlob, NONE),
        TokenKind::LongBlob => (ColumnType::LongBlob, NONE),
        TokenKind::TinyText => (ColumnType::TinyText, TEXT),
        TokenKind::Text => (ColumnType::Text, TEXT),
        TokenKind::MediumText => (ColumnType::MediumText, TEXT),
        TokenKind::LongText => (ColumnType::LongText, TEXT),
        _ => return None,
    };
    Some(entry)
}

/// Tracks the attribute ranks a column has accepted so far.
pub(crate) struct RankGuard {
    allowed: &'static [Rank],
    current: Option<Rank>,
}

impl RankGuard {
    pub(crate) fn new(allowed: &'static [Rank]) -> Self {
        Self { allowed, current: None }
    }

    pub(crate) fn permits(&self, rank: Rank) -> bool {
        let allowed = self.allowed.contains(&rank) || UNIVERSAL.contains(&rank);
        allowed && self.current.map_or(true, |current| current <= rank)
    }

    /// Accept `rank` if it is allowed and in order.
    pub(crate) fn accept(&mut self, rank: Rank) -> bool {
        if self.permits(rank) {
            self.current = Some(rank);
            true
        } else {
            false
        }
    }
}

impl<'src> Parser<'src> {
    /// column := name type attribute*
    ///
    /// `name` has already been consumed.
    pub(crate) fn parse_column(&mut self, name: Token<'src>) -> Result<Column, ParseError> {
        self.skip_whitespace();
        let token = self.tokens.next();
        let Some((ty, allowed)) = column_type(token.kind) else {
            return Err(self.unexpected("column type", &token));
        };

        let mut column = Column::new(name.value(), ty, name.span);
        self.parse_column_attributes(&mut column, RankGuard::new(allowed))?;
        column.span = self.span_from(name.span);
        Ok(column)
    }

    fn parse_column_attributes(&mut self, column: &mut Column, mut guard: RankGuard) -> Result<(), ParseError> {
        loop {
            self.skip_whitespace();
            let token = self.tokens.next();
            match token.kind {
                TokenKind::LParen => {
                    column.length = Some(self.parse_length(&mut guard, &token)?);
                }
                TokenKind::Unsigned => {
                    self.apply(&mut guard, Rank::Unsigned, "UNSIGNED", &token)?;
                    column.unsigned = true;
                }
                TokenKind::ZeroFill => {
                    self.apply(&mut guard, Rank::ZeroFill, "ZEROFILL", &token)?;
                    column.zero_fill = true;
                }
                TokenKind::Binary => {
                    self.apply(&mut guard, Rank::Binary, "BINARY", &token)?;
                    column.binary = true;
                }
                TokenKind::Not => {
                    self.apply(&mut guard, Rank::Null, "NOT NULL", &token)?;
                    self.expect(TokenKind::Null)?;
                    column.null_state = NullState::NotNull;
                }
                TokenKind::Null => {
                    self.apply(&mut guard, Rank::Null, "NULL", &token)?;
                    column.null_state = NullState::Null;
                }
                TokenKind::Default => {
                    self.apply(&mut guard, Rank::Default, "DEFAULT", &token)?;
                    self.skip_whitespace();
                    let value = self.tokens.next();
                    match value.kind {
                        TokenKind::Ident
                        | TokenKind::SingleQuoteIdent
                        | TokenKind::DoubleQuoteIdent
                        | TokenKind::Number
                        | TokenKind::CurrentTimestamp
                        | TokenKind::Null => {
                            column.default = Some(value.value().into_owned());
                        }
                        _ => return Err(self.unexpected("default value", &value)),
                    }
                }
                TokenKind::AutoIncrement => {
                    self.apply(&mut guard, Rank::AutoIncrement, "AUTO_INCREMENT", &token)?;
                    column.auto_increment = true;
                }
                TokenKind::Unique => {
                    self.apply(&mut guard, Rank::Key, "UNIQUE KEY", &token)?;
                    self.skip_optional(TokenKind::Key);
                    column.is_unique = true;
                }
                TokenKind::Key => {
                    self.apply(&mut guard, Rank::Key, "KEY", &token)?;
                    column.is_key = true;
                }
                TokenKind::Primary => {
                    self.apply(&mut guard, Rank::Key, "PRIMARY KEY", &token)?;
                    self.skip_optional(TokenKind::Key);
                    column.is_primary = true;
                }
                TokenKind::Comment => {
                    self.apply(&mut guard, Rank::Comment, "COMMENT", &token)?;
                    let comment = self.expect(TokenKind::SingleQuoteIdent)?;
                    column.comment = Some(comment.value().into_owned());
                }
                TokenKind::Comma | TokenKind::RParen | TokenKind::Eof => {
                    self.tokens.rewind();
                    return Ok(());
                }
                _ => return Err(self.unexpected("column attribute, ',' or ')'", &token)),
            }
        }
    }

    fn apply(
        &self,
        guard: &mut RankGuard,
        rank: Rank,
        name: &'static str,
        token: &Token<'_>,
    ) -> Result<(), ParseError> {
        if guard.accept(rank) {
            Ok(())
        } else {
            Err(self.error(ParseErrorKind::CannotApply(name), token))
        }
    }

    fn skip_optional(&mut self, kind: TokenKind) {
        self.skip_whitespace();
        if self.tokens.peek().kind == kind {
            self.tokens.advance();
        }
    }

    /// Parse a parenthesized size after `(`, picking the form the column
    /// type allows.
    fn parse_length(&mut self, guard: &mut RankGuard, open: &Token<'_>) -> Result<Length, ParseError> {
        if guard.accept(Rank::Size) {
            let value = self.expect(TokenKind::Number)?;
            self.expect(TokenKind::RParen)?;
            Ok(Length::new(value.text))
        } else if guard.accept(Rank::DecimalSize) {
            let parts = self.match_sequence(&[
                TokenKind::Number,
                TokenKind::Comma,
                TokenKind::Number,
                TokenKind::RParen,
            ])?;
            Ok(Length::with_decimal(parts[0].text, parts[2].text))
        } else if guard.accept(Rank::DecimalOptionalSize) {
            let value = self.expect(TokenKind::Number)?;
            self.skip_whitespace();
            let token = self.tokens.next();
            match token.kind {
                TokenKind::RParen => Ok(Length::new(value.text)),
                TokenKind::Comma => {
                    let scale = self.expect(TokenKind::Number)?;
                    self.expect(TokenKind::RParen)?;
                    Ok(Length::with_decimal(value.text, scale.text))
                }
                _ => Err(self.unexpected("',' or ')'", &token)),
            }
        } else {
            Err(self.error(ParseErrorKind::CannotApply("a size or precision"), open))
        }
    }
}
