use std::fmt::Debug;

use log::debug;

use crate::{
    token, Context, FnMatcher, LexmapErrorKind, Matcher, RegexMatcher, Result, Span, Token, Tokens,
};

/// The hook the scanner calls after every token it emits, except `(start)` and `(end)`.
pub type OnMatch = dyn Fn(&Token<'_>, &mut Context) + Send + Sync;

/// A registered pattern: a token type and the matcher recognizing it.
pub(crate) struct PatternEntry {
    pub(crate) token_type: String,
    pub(crate) matcher: Box<dyn Matcher>,
}

/// A Scanner.
/// It consists of an ordered list of patterns that are tried one after another at the current
/// position of the source.
///
/// The first pattern that matches wins, regardless of the length of its match. Later patterns
/// are not tried at that position. Thus the registration order is the priority of the patterns.
///
/// Characters no pattern recognizes are reported as `(unmatched)` tokens of one character each.
/// Scanning never stops because of unrecognized input.
#[derive(Default)]
pub struct Scanner {
    pub(crate) patterns: Vec<PatternEntry>,
    pub(crate) on_match: Option<Box<OnMatch>>,
    pub(crate) mark_empty_matches: bool,
}

impl Scanner {
    /// Creates a scanner without patterns.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a pattern to the list of patterns.
    ///
    /// The token type must not be empty and must not be one of the reserved types the scanner
    /// emits on its own. Several patterns may share a token type.
    pub fn add<M>(&mut self, token_type: &str, matcher: M) -> Result<&mut Self>
    where
        M: Matcher + 'static,
    {
        if token_type.is_empty() || token::is_reserved(token_type) {
            return Err(LexmapErrorKind::InvalidTokenType(token_type.to_string()).into());
        }
        debug!(
            "Adding pattern #{} for token type '{}'",
            self.patterns.len(),
            token_type
        );
        self.patterns.push(PatternEntry {
            token_type: token_type.to_string(),
            matcher: Box::new(matcher),
        });
        Ok(self)
    }

    /// Appends a regex pattern whose whole match is the lexeme.
    pub fn add_regex(&mut self, token_type: &str, pattern: &str) -> Result<&mut Self> {
        self.add(token_type, RegexMatcher::new(pattern)?)
    }

    /// Appends a regex pattern whose capture group `group` is the lexeme.
    pub fn add_regex_group(
        &mut self,
        token_type: &str,
        pattern: &str,
        group: usize,
    ) -> Result<&mut Self> {
        self.add(token_type, RegexMatcher::with_group(pattern, group)?)
    }

    /// Appends a procedural pattern.
    ///
    /// The closure receives the source, the current offset and the context of the scan and
    /// returns the span of the lexeme or `None`.
    pub fn add_fn<F>(&mut self, token_type: &str, f: F) -> Result<&mut Self>
    where
        F: Fn(&str, usize, &mut Context) -> Result<Option<Span>> + Send + Sync + 'static,
    {
        self.add(token_type, FnMatcher::new(f))
    }

    /// Installs the hook that is called after every emitted token except `(start)` and `(end)`.
    ///
    /// The hook runs before the token is handed to the consumer of the stream. Together with the
    /// context it allows matchers to depend on the tokens seen so far.
    pub fn set_on_match<F>(&mut self, f: F) -> &mut Self
    where
        F: Fn(&Token<'_>, &mut Context) + Send + Sync + 'static,
    {
        self.on_match = Some(Box::new(f));
        self
    }

    /// Removes the hook installed with [Self::set_on_match].
    pub fn clear_on_match(&mut self) -> &mut Self {
        self.on_match = None;
        self
    }

    /// If enabled, zero-length matches are emitted with token type `(empty)` instead of the type
    /// of the pattern that produced them.
    pub fn set_mark_empty_matches(&mut self, mark: bool) -> &mut Self {
        self.mark_empty_matches = mark;
        self
    }

    /// The number of registered patterns.
    #[inline]
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// Check if no pattern is registered.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// The token types of the registered patterns in priority order.
    pub fn token_types(&self) -> impl Iterator<Item = &str> {
        self.patterns.iter().map(|p| p.token_type.as_str())
    }

    /// Returns a lazy iterator over the tokens of `source`.
    ///
    /// The scan uses a fresh [Context].
    pub fn iter_tokens<'a>(&'a self, source: &'a str) -> Tokens<'a> {
        Tokens::new(self, source, None)
    }

    /// Returns a lazy iterator over the tokens of `source` that shares `context` with all
    /// matchers and the `on_match` hook.
    ///
    /// The context is left as the matchers left it, so state can be inspected after the scan or
    /// carried into the next one.
    pub fn iter_tokens_with<'a>(&'a self, source: &'a str, context: &'a mut Context) -> Tokens<'a> {
        Tokens::new(self, source, Some(context))
    }

    /// Calls the `on_match` hook if there is one.
    #[inline]
    pub(crate) fn notify(&self, token: &Token<'_>, context: &mut Context) {
        if let Some(on_match) = &self.on_match {
            on_match(token, context);
        }
    }
}

impl Debug for Scanner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scanner")
            .field("token_types", &self.token_types().collect::<Vec<_>>())
            .field("on_match", &self.on_match.is_some())
            .field("mark_empty_matches", &self.mark_empty_matches)
            .finish()
    }
}
