//! Table options following the definition list
//!
//! `ENGINE = InnoDB DEFAULT CHARSET = utf8 ...`. The `=` is optional and
//! options may be separated by whitespace only. Each option admits a fixed
//! set of value token kinds.

use ddlex_ast::{Span, Table, TableOption};
use ddlex_lexer::TokenKind;
use tracing::trace;

use crate::parser::{one_of, Parser};
use crate::{ParseError, ParseErrorKind};

const NAME: &[TokenKind] = &[TokenKind::Ident, TokenKind::BacktickIdent];
const NUMBER: &[TokenKind] = &[TokenKind::Number];
const STRING: &[TokenKind] = &[TokenKind::SingleQuoteIdent, TokenKind::DoubleQuoteIdent];
const NUMBER_OR_DEFAULT: &[TokenKind] = &[TokenKind::Number, TokenKind::Default];
const INSERT_METHOD: &[TokenKind] = &[TokenKind::Ident, TokenKind::No];
const PACK_KEYS: &[TokenKind] = &[TokenKind::Number, TokenKind::Ident, TokenKind::Default];
const ROW_FORMAT: &[TokenKind] = &[
    TokenKind::Default,
    TokenKind::Dynamic,
    TokenKind::Fixed,
    TokenKind::Compressed,
    TokenKind::Redundant,
    TokenKind::Compact,
];

impl<'src> Parser<'src> {
    /// Parse table options up to the statement terminator, which is left
    /// unconsumed. Returns the span of the last option value, if any.
    pub(crate) fn parse_table_options(&mut self, table: &mut Table) -> Result<Option<Span>, ParseError> {
        let mut last = None;

        loop {
            self.skip_whitespace();
            let token = self.tokens.next();

            let (key, accepts): (&'static str, &[TokenKind]) = match token.kind {
                TokenKind::Engine => ("ENGINE", NAME),
                TokenKind::AutoIncrement => ("AUTO_INCREMENT", NUMBER),
                TokenKind::AvgRowLength => ("AVG_ROW_LENGTH", NUMBER),
                TokenKind::Default => {
                    self.skip_whitespace();
                    let next = self.tokens.next();
                    match next.kind {
                        TokenKind::Character => {
                            self.expect(TokenKind::Set)?;
                            ("DEFAULT CHARACTER SET", NAME)
                        }
                        TokenKind::Charset => ("DEFAULT CHARACTER SET", NAME),
                        TokenKind::Collate => ("DEFAULT COLLATE", NAME),
                        _ => return Err(self.unexpected("CHARACTER SET, CHARSET or COLLATE", &next)),
                    }
                }
                TokenKind::Character => {
                    self.expect(TokenKind::Set)?;
                    ("DEFAULT CHARACTER SET", NAME)
                }
                TokenKind::Charset => ("DEFAULT CHARACTER SET", NAME),
                TokenKind::Collate => ("DEFAULT COLLATE", NAME),
                TokenKind::Checksum => ("CHECKSUM", NUMBER),
                TokenKind::Comment => ("COMMENT", STRING),
                TokenKind::Connection => ("CONNECTION", STRING),
                TokenKind::Data => {
                    self.expect(TokenKind::Directory)?;
                    ("DATA DIRECTORY", STRING)
                }
                TokenKind::Index => {
                    self.expect(TokenKind::Directory)?;
                    ("INDEX DIRECTORY", STRING)
                }
                TokenKind::DelayKeyWrite => ("DELAY_KEY_WRITE", NUMBER),
                TokenKind::InsertMethod => ("INSERT_METHOD", INSERT_METHOD),
                TokenKind::KeyBlockSize => ("KEY_BLOCK_SIZE", NUMBER),
                TokenKind::MaxRows => ("MAX_ROWS", NUMBER),
                TokenKind::MinRows => ("MIN_ROWS", NUMBER),
                TokenKind::PackKeys => ("PACK_KEYS", PACK_KEYS),
                TokenKind::Password => ("PASSWORD", STRING),
                TokenKind::RowFormat => ("ROW_FORMAT", ROW_FORMAT),
                TokenKind::StatsAutoRecalc => ("STATS_AUTO_RECALC", NUMBER_OR_DEFAULT),
                TokenKind::StatsPersistent => ("STATS_PERSISTENT", NUMBER_OR_DEFAULT),
                TokenKind::StatsSamplePages => ("STATS_SAMPLE_PAGES", NUMBER),
                TokenKind::Tablespace => {
                    return Err(self.error(ParseErrorKind::Unsupported("TABLESPACE"), &token));
                }
                TokenKind::Union => {
                    return Err(self.error(ParseErrorKind::Unsupported("UNION"), &token));
                }
                TokenKind::Eof | TokenKind::Semicolon => {
                    self.tokens.rewind();
                    return Ok(last);
                }
                _ => return Err(self.unexpected("table option, ';' or end of input", &token)),
            };

            self.skip_whitespace();
            if self.tokens.peek().kind == TokenKind::Equal {
                self.tokens.advance();
                self.skip_whitespace();
            }

            let value = self.tokens.next();
            if !accepts.contains(&value.kind) {
                return Err(self.unexpected(format!("{} value ({})", key, one_of(accepts)), &value));
            }

            trace!(table = %table.name, key, value = %value.value(), "table option");
            table.options.push(TableOption::new(key, value.value()));
            last = Some(value.span);
        }
    }
}
