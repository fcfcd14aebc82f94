use log::trace;

use crate::{token, Context, LexmapErrorKind, Result, Scanner, Span, Token};

/// The context of a scan, either created by the scan itself or borrowed from the caller.
enum ContextSlot<'a> {
    Owned(Context),
    Borrowed(&'a mut Context),
}

impl ContextSlot<'_> {
    #[inline]
    fn get(&mut self) -> &mut Context {
        match self {
            ContextSlot::Owned(context) => context,
            ContextSlot::Borrowed(context) => context,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// Nothing emitted yet.
    Start,
    /// Between `(start)` and `(end)`.
    Scanning,
    /// An empty match left the cursor in place. The character at the cursor is emitted as
    /// `(unmatched)` on the next pull.
    Recover,
    /// `(end)` or an error was emitted.
    Done,
}

/// A lazy iterator over the tokens of a source.
///
/// The iterator yields `(start)` first, then the tokens found by the scanner's patterns and
/// `(unmatched)` tokens for characters no pattern recognizes, and finally `(end)`.
/// Tokens are computed on demand; dropping the iterator early is free.
///
/// Errors raised by matchers and ordering violations are yielded once, after which the
/// iterator is exhausted.
///
/// * `'a` represents the lifetime of the scanner, the source and a borrowed context.
///
/// This iterator is created with [Scanner::iter_tokens] or [Scanner::iter_tokens_with].
pub struct Tokens<'a> {
    scanner: &'a Scanner,
    source: &'a str,
    context: ContextSlot<'a>,
    // The end of the last emitted token. Positions never move before it.
    cursor: usize,
    state: State,
}

impl<'a> Tokens<'a> {
    pub(crate) fn new(
        scanner: &'a Scanner,
        source: &'a str,
        context: Option<&'a mut Context>,
    ) -> Self {
        Self {
            scanner,
            source,
            context: match context {
                Some(context) => ContextSlot::Borrowed(context),
                None => ContextSlot::Owned(Context::new()),
            },
            cursor: 0,
            state: State::Start,
        }
    }

    /// The byte offset from which the next token is searched.
    #[inline]
    pub fn offset(&self) -> usize {
        self.cursor
    }

    /// The source being scanned.
    #[inline]
    pub fn source(&self) -> &'a str {
        self.source
    }

    /// The context of the scan.
    pub fn context(&mut self) -> &mut Context {
        self.context.get()
    }

    /// Returns the next token.
    ///
    /// This is the single step of the scanning loop:
    /// - patterns are tried in registration order at the cursor and the first match is emitted,
    /// - a non-empty match moves the cursor to its end,
    /// - an empty match is emitted too, but if it did not move the cursor the character at the
    ///   cursor is emitted as `(unmatched)` next, so every step makes progress,
    /// - if no pattern matches, one character is emitted as `(unmatched)`.
    pub fn next_token(&mut self) -> Option<Result<Token<'a>>> {
        match self.state {
            State::Start => {
                self.state = State::Scanning;
                trace!("Start of scan over {} bytes", self.source.len());
                Some(Ok(Token::start()))
            }
            State::Scanning => {
                if self.cursor >= self.source.len() {
                    self.state = State::Done;
                    trace!("End of scan at {}", self.cursor);
                    return Some(Ok(Token::end(self.cursor)));
                }
                match self.find_match() {
                    Ok(Some(token)) => Some(Ok(token)),
                    Ok(None) => Some(Ok(self.unmatched())),
                    Err(e) => {
                        self.state = State::Done;
                        Some(Err(e))
                    }
                }
            }
            State::Recover => {
                self.state = State::Scanning;
                Some(Ok(self.unmatched()))
            }
            State::Done => None,
        }
    }

    /// Tries all patterns in order at the cursor.
    fn find_match(&mut self) -> Result<Option<Token<'a>>> {
        let scanner = self.scanner;
        let source = self.source;
        let guard = self.cursor;
        for entry in &scanner.patterns {
            let context = self.context.get();
            let Some(span) = entry.matcher.find_at(source, guard, context)? else {
                continue;
            };
            self.check_span(&entry.token_type, span)?;
            let token_type = if span.is_empty() && scanner.mark_empty_matches {
                token::EMPTY
            } else {
                entry.token_type.as_str()
            };
            let token = Token::new(token_type, &source[span.range()], span.start);
            trace!("{}", token);
            self.cursor = span.end;
            if span.is_empty() && self.cursor == guard {
                // No further pattern is tried here. The position is recovered as unmatched.
                self.state = State::Recover;
            }
            scanner.notify(&token, self.context.get());
            return Ok(Some(token));
        }
        Ok(None)
    }

    /// Emits the character at the cursor as `(unmatched)` and moves past it.
    fn unmatched(&mut self) -> Token<'a> {
        let start = self.cursor;
        let len = self.source[start..]
            .chars()
            .next()
            .map_or(0, char::len_utf8);
        let token = Token::new(token::UNMATCHED, &self.source[start..start + len], start);
        trace!("{}", token);
        self.cursor = start + len;
        self.scanner.notify(&token, self.context.get());
        token
    }

    fn check_span(&self, token_type: &str, span: Span) -> Result<()> {
        if span.start < self.cursor {
            return Err(LexmapErrorKind::OrderingViolation {
                token_type: token_type.to_string(),
                offset: span.start,
                cursor: self.cursor,
            }
            .into());
        }
        if !span.is_valid_in(self.source) {
            return Err(LexmapErrorKind::InvalidSpan {
                token_type: token_type.to_string(),
                start: span.start,
                end: span.end,
                len: self.source.len(),
            }
            .into());
        }
        Ok(())
    }
}

impl<'a> Iterator for Tokens<'a> {
    type Item = Result<Token<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_token()
    }
}

impl std::iter::FusedIterator for Tokens<'_> {}

impl std::fmt::Debug for Tokens<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tokens")
            .field("cursor", &self.cursor)
            .field("state", &self.state)
            .finish()
    }
}
