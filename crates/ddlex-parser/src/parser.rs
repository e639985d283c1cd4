//! Recursive descent parser implementation
//!
//! Statement-level grammar, the `CREATE TABLE` definition list and the
//! index / constraint / foreign-key sub-grammars. Column specs live in
//! `column.rs`, table options in `table_options.rs`.

use ddlex_ast::*;
use ddlex_lexer::{Lexer, Token, TokenKind};
use tracing::{debug, trace};

use crate::buffer::{CancelToken, TokenBuffer};
use crate::{ParseError, ParseErrorKind};

pub struct Parser<'src> {
    pub(crate) source: &'src str,
    pub(crate) tokens: TokenBuffer<'src, Lexer<'src>>,
}

/// What a `CREATE` statement contributes to the result
pub(crate) enum CreateOutcome {
    /// Appended to the statement list
    Emit(Statement),
    /// Parsed and validated, but not part of the output
    Ignore(Statement),
}

/// The column or index definition currently under construction
enum Pending {
    Column(Column),
    Index(Index),
}

impl Pending {
    fn append_to(self, table: &mut Table) {
        match self {
            Pending::Column(column) => {
                trace!(table = %table.name, column = %column.name, "column definition");
                table.columns.push(column);
            }
            Pending::Index(index) => {
                trace!(table = %table.name, kind = ?index.kind, "index definition");
                table.indexes.push(index);
            }
        }
    }
}

/// `A`, `A or B`, `A, B or C`
pub(crate) fn one_of(kinds: &[TokenKind]) -> String {
    let names: Vec<&str> = kinds.iter().map(|k| k.describe()).collect();
    match names.split_last() {
        None => String::new(),
        Some((last, [])) => last.to_string(),
        Some((last, rest)) => format!("{} or {}", rest.join(", "), last),
    }
}

impl<'src> Parser<'src> {
    pub fn new(source: &'src str) -> Self {
        Self {
            source,
            tokens: TokenBuffer::new(Lexer::new(source)),
        }
    }

    pub fn with_cancel(source: &'src str, cancel: CancelToken) -> Self {
        Self {
            source,
            tokens: TokenBuffer::new(Lexer::new(source)).with_cancel(cancel),
        }
    }

    // === Primitive matchers ===

    /// Skip whitespace and comments; the next `peek`/`next` yields a
    /// significant token.
    pub(crate) fn skip_whitespace(&mut self) {
        while self.tokens.peek().kind.is_trivia() {
            self.tokens.advance();
        }
    }

    pub(crate) fn unexpected(&self, expected: impl Into<String>, token: &Token<'_>) -> ParseError {
        ParseError::unexpected(expected, token, self.source)
    }

    pub(crate) fn error(&self, kind: ParseErrorKind, token: &Token<'_>) -> ParseError {
        ParseError::at(kind, token, self.source)
    }

    /// Consume the next significant token, which must be `kind`.
    pub(crate) fn expect(&mut self, kind: TokenKind) -> Result<Token<'src>, ParseError> {
        self.skip_whitespace();
        let token = self.tokens.next();
        if token.kind == kind {
            Ok(token)
        } else {
            Err(self.unexpected(kind.describe(), &token))
        }
    }

    /// Consume a bare or back-quoted identifier.
    pub(crate) fn expect_ident(&mut self, what: &str) -> Result<Token<'src>, ParseError> {
        self.skip_whitespace();
        let token = self.tokens.next();
        if token.kind.is_ident() {
            Ok(token)
        } else {
            Err(self.unexpected(what, &token))
        }
    }

    /// Consume tokens matching `kinds` in order, failing at the first
    /// mismatch.
    pub(crate) fn match_sequence(&mut self, kinds: &[TokenKind]) -> Result<Vec<Token<'src>>, ParseError> {
        let mut matched = Vec::with_capacity(kinds.len());
        for &kind in kinds {
            self.skip_whitespace();
            let token = self.tokens.next();
            if token.kind != kind {
                let expected = kinds.iter().map(|k| k.describe()).collect::<Vec<_>>().join(" ");
                return Err(self.unexpected(format!("{} (in `{}`)", kind.describe(), expected), &token));
            }
            matched.push(token);
        }
        Ok(matched)
    }

    /// Consume a statement terminator (`;` or end of input) if one is next.
    pub(crate) fn at_statement_end(&mut self) -> bool {
        self.skip_whitespace();
        match self.tokens.peek().kind {
            TokenKind::Eof | TokenKind::Semicolon => {
                self.tokens.advance();
                true
            }
            _ => false,
        }
    }

    pub(crate) fn expect_statement_end(&mut self) -> Result<(), ParseError> {
        if self.at_statement_end() {
            Ok(())
        } else {
            let token = self.tokens.peek();
            Err(self.unexpected("';' or end of input", &token))
        }
    }

    /// Span from `start` to the most recently consumed token, trailing
    /// whitespace excluded.
    pub(crate) fn span_from(&self, start: Span) -> Span {
        let span = match self.tokens.previous() {
            Some(prev) => start.merge(prev.span),
            None => start,
        };
        let text = self.source.get(span.start..span.end).unwrap_or_default();
        Span::new(span.start, span.start + text.trim_end().len())
    }

    // === Statements ===

    pub fn parse_statements(&mut self) -> Result<Statements, ParseError> {
        let mut statements = Statements::new();

        loop {
            self.skip_whitespace();
            let token = self.tokens.peek();
            match token.kind {
                TokenKind::Create => match self.parse_create().map_err(|e| self.cancelled_or(e))? {
                    CreateOutcome::Emit(stmt) => statements.push(stmt),
                    CreateOutcome::Ignore(stmt) => {
                        debug!(?stmt, "statement parsed but not emitted");
                    }
                },
                TokenKind::Drop | TokenKind::Set | TokenKind::Use => self.skip_statement(),
                TokenKind::Eof if self.tokens.was_cancelled() => {
                    return Err(self.error(ParseErrorKind::Cancelled, &token));
                }
                TokenKind::Eof => {
                    self.tokens.advance();
                    break;
                }
                _ => {
                    return Err(self.unexpected("CREATE, DROP, SET, USE or end of input", &token));
                }
            }
        }

        Ok(statements)
    }

    /// A statement cut off by cancellation fails as cancelled, not as
    /// truncated input.
    fn cancelled_or(&self, err: ParseError) -> ParseError {
        if self.tokens.was_cancelled() {
            ParseError { kind: ParseErrorKind::Cancelled, ..err }
        } else {
            err
        }
    }

    /// Discard everything up to and including the statement terminator.
    fn skip_statement(&mut self) {
        let keyword = self.tokens.next();
        let mut skipped = 0usize;
        while !self.at_statement_end() {
            self.tokens.advance();
            skipped += 1;
        }
        debug!(keyword = keyword.kind.describe(), skipped, "skipped statement");
    }

    fn parse_create(&mut self) -> Result<CreateOutcome, ParseError> {
        let create = self.expect(TokenKind::Create)?;
        self.skip_whitespace();

        let token = self.tokens.peek();
        match token.kind {
            TokenKind::Database => {
                let database = self.parse_create_database(create.span)?;
                Ok(CreateOutcome::Ignore(Statement::Database(database)))
            }
            TokenKind::Table => {
                let table = self.parse_create_table(create.span, false)?;
                Ok(CreateOutcome::Emit(Statement::Table(table)))
            }
            TokenKind::Temporary => {
                self.tokens.advance();
                let table = self.parse_create_table(create.span, true)?;
                Ok(CreateOutcome::Emit(Statement::Table(table)))
            }
            _ => Err(self.unexpected("DATABASE or TABLE", &token)),
        }
    }

    /// create_database := DATABASE [IF NOT EXISTS] name terminator
    fn parse_create_database(&mut self, start: Span) -> Result<Database, ParseError> {
        self.expect(TokenKind::Database)?;

        let if_not_exists = self.parse_if_not_exists()?;
        let name = self.expect_ident("database name")?;

        let mut database = Database::new(name.value(), self.span_from(start));
        database.if_not_exists = if_not_exists;

        self.expect_statement_end()?;
        Ok(database)
    }

    fn parse_if_not_exists(&mut self) -> Result<bool, ParseError> {
        self.skip_whitespace();
        if self.tokens.peek().kind != TokenKind::If {
            return Ok(false);
        }
        self.tokens.advance();
        self.match_sequence(&[TokenKind::Not, TokenKind::Exists])?;
        Ok(true)
    }

    /// create_table := TABLE [TEMPORARY] [IF NOT EXISTS] name [IF NOT EXISTS]
    ///                 ( definitions ) table_options terminator
    fn parse_create_table(&mut self, start: Span, temporary: bool) -> Result<Table, ParseError> {
        self.expect(TokenKind::Table)?;

        self.skip_whitespace();
        let mut temporary = temporary;
        if self.tokens.peek().kind == TokenKind::Temporary {
            self.tokens.advance();
            temporary = true;
        }

        let mut if_not_exists = self.parse_if_not_exists()?;
        let name = self.expect_ident("table name")?;
        if_not_exists |= self.parse_if_not_exists()?;

        let mut table = Table::new(name.value(), start);
        table.temporary = temporary;
        table.if_not_exists = if_not_exists;

        self.expect(TokenKind::LParen)?;
        let close = self.parse_definitions(&mut table)?;
        let end = self.parse_table_options(&mut table)?.unwrap_or(close);
        table.span = start.merge(end);

        self.expect_statement_end()?;
        debug!(
            table = %table.name,
            columns = table.columns.len(),
            indexes = table.indexes.len(),
            options = table.options.len(),
            "parsed table"
        );
        Ok(table)
    }

    // === Definition list ===

    /// Parse everything after `CREATE TABLE name (` up to and including the
    /// closing `)`, returning the span of that `)`.
    fn parse_definitions(&mut self, table: &mut Table) -> Result<Span, ParseError> {
        let mut pending: Option<Pending> = None;

        loop {
            self.skip_whitespace();
            let token = self.tokens.next();

            let definition = match token.kind {
                TokenKind::RParen => {
                    match pending.take() {
                        Some(def) => def.append_to(table),
                        None => return Err(self.unexpected("column or index definition", &token)),
                    }
                    return Ok(token.span);
                }
                TokenKind::Comma => {
                    match pending.take() {
                        Some(def) => def.append_to(table),
                        None => return Err(self.unexpected("column or index definition", &token)),
                    }
                    continue;
                }
                TokenKind::Check => {
                    return Err(self.error(ParseErrorKind::Unsupported("CHECK"), &token));
                }
                _ if pending.is_some() && self.starts_definition(token.kind) => {
                    return Err(self.error(ParseErrorKind::UnterminatedDefinition, &token));
                }
                TokenKind::Constraint => Pending::Index(self.parse_constraint(token.span)?),
                TokenKind::Primary => Pending::Index(self.parse_primary_key(token.span)?),
                TokenKind::Unique => Pending::Index(self.parse_unique_key(token.span)?),
                TokenKind::Key | TokenKind::Index => Pending::Index(self.parse_key(token.span)?),
                TokenKind::FullText => {
                    Pending::Index(self.parse_fulltext_key(IndexKind::FullText, token.span)?)
                }
                TokenKind::Spatial => {
                    Pending::Index(self.parse_fulltext_key(IndexKind::Spatial, token.span)?)
                }
                TokenKind::Foreign => Pending::Index(self.parse_foreign_key(token.span)?),
                TokenKind::Ident | TokenKind::BacktickIdent => {
                    Pending::Column(self.parse_column(token)?)
                }
                _ if pending.is_some() => return Err(self.unexpected("',' or ')'", &token)),
                _ => return Err(self.unexpected("column or index definition", &token)),
            };
            pending = Some(definition);
        }
    }

    fn starts_definition(&self, kind: TokenKind) -> bool {
        matches!(
            kind,
            TokenKind::Constraint
                | TokenKind::Primary
                | TokenKind::Unique
                | TokenKind::Key
                | TokenKind::Index
                | TokenKind::FullText
                | TokenKind::Spatial
                | TokenKind::Foreign
                | TokenKind::Ident
                | TokenKind::BacktickIdent
        )
    }

    // === Indexes and constraints ===

    /// CONSTRAINT [symbol] (PRIMARY KEY ... | UNIQUE ... | FOREIGN KEY ...)
    fn parse_constraint(&mut self, start: Span) -> Result<Index, ParseError> {
        self.skip_whitespace();
        let mut symbol = None;
        let token = self.tokens.peek();
        if token.kind.is_ident() {
            symbol = Some(token.value().into_owned());
            self.tokens.advance();
            self.skip_whitespace();
        }

        let token = self.tokens.next();
        let mut index = match token.kind {
            TokenKind::Primary => self.parse_primary_key(start)?,
            TokenKind::Unique => self.parse_unique_key(start)?,
            TokenKind::Foreign => self.parse_foreign_key(start)?,
            TokenKind::Check => {
                return Err(self.error(ParseErrorKind::Unsupported("CHECK"), &token));
            }
            _ => return Err(self.unexpected("PRIMARY, UNIQUE or FOREIGN", &token)),
        };
        index.symbol = symbol;
        Ok(index)
    }

    /// PRIMARY KEY [USING type] (cols)
    fn parse_primary_key(&mut self, start: Span) -> Result<Index, ParseError> {
        let mut index = Index::new(IndexKind::PrimaryKey, start);
        self.expect(TokenKind::Key)?;
        index.index_type = self.parse_index_type()?;
        index.columns = self.parse_column_names()?;
        index.span = self.span_from(start);
        Ok(index)
    }

    /// UNIQUE [KEY|INDEX] [name] [USING type] (cols)
    fn parse_unique_key(&mut self, start: Span) -> Result<Index, ParseError> {
        let mut index = Index::new(IndexKind::Unique, start);
        self.skip_index_keyword();
        index.name = self.parse_index_name();
        index.index_type = self.parse_index_type()?;
        index.columns = self.parse_column_names()?;
        index.span = self.span_from(start);
        Ok(index)
    }

    /// (KEY|INDEX) [name] [USING type] (cols)
    fn parse_key(&mut self, start: Span) -> Result<Index, ParseError> {
        let mut index = Index::new(IndexKind::Normal, start);
        index.name = self.parse_index_name();
        index.index_type = self.parse_index_type()?;
        index.columns = self.parse_column_names()?;
        index.span = self.span_from(start);
        Ok(index)
    }

    /// (FULLTEXT|SPATIAL) [KEY|INDEX] [name] (cols)
    fn parse_fulltext_key(&mut self, kind: IndexKind, start: Span) -> Result<Index, ParseError> {
        let mut index = Index::new(kind, start);
        self.skip_index_keyword();
        index.name = self.parse_index_name();
        index.columns = self.parse_column_names()?;
        index.span = self.span_from(start);
        Ok(index)
    }

    /// FOREIGN KEY [name] (cols) [REFERENCES ...]
    fn parse_foreign_key(&mut self, start: Span) -> Result<Index, ParseError> {
        let mut index = Index::new(IndexKind::ForeignKey, start);
        self.expect(TokenKind::Key)?;
        index.name = self.parse_index_name();
        index.columns = self.parse_column_names()?;

        self.skip_whitespace();
        if self.tokens.peek().kind == TokenKind::References {
            index.reference = Some(self.parse_reference()?);
        }
        index.span = self.span_from(start);
        Ok(index)
    }

    fn skip_index_keyword(&mut self) {
        self.skip_whitespace();
        if matches!(self.tokens.peek().kind, TokenKind::Key | TokenKind::Index) {
            self.tokens.advance();
        }
    }

    fn parse_index_name(&mut self) -> Option<String> {
        self.skip_whitespace();
        let token = self.tokens.peek();
        if token.kind.is_ident() {
            self.tokens.advance();
            Some(token.value().into_owned())
        } else {
            None
        }
    }

    /// [USING BTREE|HASH]
    fn parse_index_type(&mut self) -> Result<IndexType, ParseError> {
        self.skip_whitespace();
        if self.tokens.peek().kind != TokenKind::Using {
            return Ok(IndexType::None);
        }
        self.tokens.advance();

        self.skip_whitespace();
        let token = self.tokens.next();
        match token.kind {
            TokenKind::BTree => Ok(IndexType::BTree),
            TokenKind::Hash => Ok(IndexType::Hash),
            _ => Err(self.unexpected("BTREE or HASH", &token)),
        }
    }

    /// ( name [, name]* )
    fn parse_column_names(&mut self) -> Result<Vec<String>, ParseError> {
        self.expect(TokenKind::LParen)?;

        let mut columns = Vec::new();
        loop {
            let name = self.expect_ident("column name")?;
            columns.push(name.value().into_owned());

            self.skip_whitespace();
            let token = self.tokens.next();
            match token.kind {
                TokenKind::Comma => continue,
                TokenKind::RParen => break,
                _ => return Err(self.unexpected("',' or ')'", &token)),
            }
        }
        Ok(columns)
    }

    // === Foreign-key references ===

    /// REFERENCES table (cols) [MATCH FULL|PARTIAL|SIMPLE]
    ///     [ON DELETE action] [ON UPDATE action]
    fn parse_reference(&mut self) -> Result<Reference, ParseError> {
        self.expect(TokenKind::References)?;
        let table = self.expect_ident("referenced table name")?;

        let mut reference = Reference::new(table.value());
        reference.columns = self.parse_column_names()?;

        self.skip_whitespace();
        if self.tokens.peek().kind == TokenKind::Match {
            self.tokens.advance();
            self.skip_whitespace();
            let token = self.tokens.next();
            reference.match_kind = Some(match token.kind {
                TokenKind::Full => ReferenceMatch::Full,
                TokenKind::Partial => ReferenceMatch::Partial,
                TokenKind::Simple => ReferenceMatch::Simple,
                _ => return Err(self.unexpected("FULL, PARTIAL or SIMPLE", &token)),
            });
        }

        // ON DELETE may be followed by ON UPDATE, never the reverse
        loop {
            self.skip_whitespace();
            let on = self.tokens.peek();
            if on.kind != TokenKind::On {
                break;
            }
            self.tokens.advance();

            self.skip_whitespace();
            let token = self.tokens.next();
            match token.kind {
                TokenKind::Delete if reference.on_delete.is_some() => {
                    return Err(self.error(ParseErrorKind::DuplicateReferenceAction("DELETE"), &token));
                }
                TokenKind::Delete => {
                    reference.on_delete = Some(self.parse_reference_option()?);
                }
                TokenKind::Update => {
                    reference.on_update = Some(self.parse_reference_option()?);
                    break;
                }
                _ => return Err(self.unexpected("DELETE or UPDATE", &token)),
            }
        }

        self.skip_whitespace();
        let token = self.tokens.peek();
        if token.kind == TokenKind::On {
            return Err(self.unexpected("',' or ')' after ON UPDATE", &token));
        }

        Ok(reference)
    }

    fn parse_reference_option(&mut self) -> Result<ReferenceOption, ParseError> {
        self.skip_whitespace();
        let token = self.tokens.next();
        match token.kind {
            TokenKind::Restrict => Ok(ReferenceOption::Restrict),
            TokenKind::Cascade => Ok(ReferenceOption::Cascade),
            TokenKind::Set => {
                self.expect(TokenKind::Null)?;
                Ok(ReferenceOption::SetNull)
            }
            TokenKind::No => {
                self.expect(TokenKind::Action)?;
                Ok(ReferenceOption::NoAction)
            }
            _ => Err(self.unexpected("RESTRICT, CASCADE, SET NULL or NO ACTION", &token)),
        }
    }
}
