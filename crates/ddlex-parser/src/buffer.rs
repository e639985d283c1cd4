//! Token lookahead buffer
//!
//! Wraps a token source with `peek`/`advance`/`next`/`rewind`. The buffer
//! remembers the [`LOOKAHEAD_DEPTH`] most recently fetched tokens, so the
//! grammar can un-consume a token it has already read without touching the
//! source again. Rewinding further back than that is a caller bug and panics.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use ddlex_lexer::{Token, TokenKind};

/// Number of recently fetched tokens the buffer can rewind over
pub const LOOKAHEAD_DEPTH: usize = 3;

/// Shared flag asking an in-flight parse to stop.
///
/// Once cancelled, the buffer reports end of input from then on.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

pub struct TokenBuffer<'src, S> {
    source: S,
    /// Fetch history, newest first
    slots: [Token<'src>; LOOKAHEAD_DEPTH],
    /// Valid entries in `slots`
    fetched: usize,
    /// Entries in `slots` fetched but not consumed; the current token is
    /// `slots[pending - 1]`
    pending: usize,
    /// Byte offset used for synthetic end-of-input tokens
    end: usize,
    exhausted: bool,
    cancel: Option<CancelToken>,
    /// End of input was reported because of cancellation
    cut_short: bool,
}

impl<'src, S> TokenBuffer<'src, S>
where
    S: Iterator<Item = Token<'src>>,
{
    pub fn new(source: S) -> Self {
        Self {
            source,
            slots: [Token::eof(0); LOOKAHEAD_DEPTH],
            fetched: 0,
            pending: 0,
            end: 0,
            exhausted: false,
            cancel: None,
            cut_short: false,
        }
    }

    pub fn with_cancel(mut self, cancel: CancelToken) -> Self {
        self.cancel = Some(cancel);
        self
    }

    /// The current token, fetching one from the source if nothing is
    /// pending.
    pub fn peek(&mut self) -> Token<'src> {
        if self.pending == 0 {
            let token = self.fetch();
            self.slots.rotate_right(1);
            self.slots[0] = token;
            self.fetched = (self.fetched + 1).min(LOOKAHEAD_DEPTH);
            self.pending = 1;
        }
        self.slots[self.pending - 1]
    }

    /// Consume the current token.
    pub fn advance(&mut self) {
        self.next();
    }

    /// Consume and return the current token.
    pub fn next(&mut self) -> Token<'src> {
        let token = self.peek();
        self.pending -= 1;
        token
    }

    /// Un-consume the most recently consumed token.
    ///
    /// # Panics
    ///
    /// When every token still held in the history is already pending, i.e.
    /// the caller rewinds more than [`LOOKAHEAD_DEPTH`] tokens or more
    /// tokens than it has consumed.
    pub fn rewind(&mut self) {
        assert!(
            self.pending < self.fetched,
            "rewind past the lookahead history ({} pending of {} buffered, depth {})",
            self.pending,
            self.fetched,
            LOOKAHEAD_DEPTH,
        );
        self.pending += 1;
    }

    /// The most recently consumed token still held in the history.
    pub fn previous(&self) -> Option<Token<'src>> {
        (self.pending < self.fetched).then(|| self.slots[self.pending])
    }

    /// Whether a synthetic end of input was handed out because the cancel
    /// token fired before the source ran out.
    pub fn was_cancelled(&self) -> bool {
        self.cut_short
    }

    fn fetch(&mut self) -> Token<'src> {
        if self.exhausted {
            return Token::eof(self.end);
        }
        if self.cancel.as_ref().is_some_and(|c| c.is_cancelled()) {
            self.cut_short = true;
            return Token::eof(self.end);
        }
        match self.source.next() {
            Some(token) => {
                self.end = self.end.max(token.span.end);
                self.exhausted = token.kind == TokenKind::Eof;
                token
            }
            None => {
                self.exhausted = true;
                Token::eof(self.end)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ddlex_lexer::{lex, TokenKind};

    fn buffer(source: &str) -> TokenBuffer<'_, ddlex_lexer::Lexer<'_>> {
        TokenBuffer::new(lex(source))
    }

    #[test]
    fn test_peek_does_not_consume() {
        let mut buf = buffer("a b");
        assert_eq!(buf.peek().text, "a");
        assert_eq!(buf.peek().text, "a");
        assert_eq!(buf.next().text, "a");
        assert_eq!(buf.peek().kind, TokenKind::Space);
    }

    #[test]
    fn test_rewind_reexposes_token() {
        let mut buf = buffer("a,b");
        assert_eq!(buf.next().text, "a");
        assert_eq!(buf.next().kind, TokenKind::Comma);
        buf.rewind();
        assert_eq!(buf.peek().kind, TokenKind::Comma);
        assert_eq!(buf.previous().map(|t| t.text), Some("a"));
        assert_eq!(buf.next().kind, TokenKind::Comma);
        assert_eq!(buf.next().text, "b");
    }

    #[test]
    fn test_rewind_full_depth() {
        let mut buf = buffer("a,b,c");
        for _ in 0..4 {
            buf.advance();
        }
        buf.rewind();
        buf.rewind();
        buf.rewind();
        assert_eq!(buf.next().kind, TokenKind::Comma);
        assert_eq!(buf.next().text, "b");
        assert_eq!(buf.next().kind, TokenKind::Comma);
        assert_eq!(buf.next().text, "c");
    }

    #[test]
    #[should_panic(expected = "rewind past the lookahead history")]
    fn test_rewind_beyond_depth_panics() {
        let mut buf = buffer("a,b,c");
        for _ in 0..5 {
            buf.advance();
        }
        for _ in 0..=LOOKAHEAD_DEPTH {
            buf.rewind();
        }
    }

    #[test]
    #[should_panic(expected = "rewind past the lookahead history")]
    fn test_rewind_without_consuming_panics() {
        let mut buf = buffer("a");
        buf.peek();
        buf.rewind();
    }

    #[test]
    fn test_exhaustion_yields_eof_forever() {
        let mut buf = buffer("x");
        assert_eq!(buf.next().text, "x");
        for _ in 0..5 {
            let token = buf.next();
            assert_eq!(token.kind, TokenKind::Eof);
            assert_eq!(token.span.start, 1);
        }
    }

    #[test]
    fn test_cancel_yields_eof() {
        let cancel = CancelToken::new();
        let mut buf = buffer("a b c").with_cancel(cancel.clone());
        assert_eq!(buf.next().text, "a");
        cancel.cancel();
        assert_eq!(buf.next().kind, TokenKind::Eof);
        assert_eq!(buf.next().kind, TokenKind::Eof);
    }

    #[test]
    fn test_was_cancelled() {
        let cancel = CancelToken::new();
        let mut buf = buffer("a b").with_cancel(cancel.clone());
        assert_eq!(buf.next().text, "a");
        assert!(!buf.was_cancelled());
        cancel.cancel();
        assert_eq!(buf.next().kind, TokenKind::Eof);
        assert!(buf.was_cancelled());
    }

    #[test]
    fn test_cancel_after_end_of_input_is_not_reported() {
        let cancel = CancelToken::new();
        let mut buf = buffer("a").with_cancel(cancel.clone());
        assert_eq!(buf.next().text, "a");
        assert_eq!(buf.next().kind, TokenKind::Eof);
        cancel.cancel();
        assert_eq!(buf.next().kind, TokenKind::Eof);
        assert!(!buf.was_cancelled());
    }

    #[test]
    fn test_cancel_keeps_pending_token() {
        let cancel = CancelToken::new();
        let mut buf = buffer("a b").with_cancel(cancel.clone());
        buf.peek();
        cancel.cancel();
        assert_eq!(buf.next().text, "a");
        assert_eq!(buf.peek().kind, TokenKind::Eof);
    }
}
