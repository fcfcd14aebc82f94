//! Module with the matcher capability and its two standard implementations.
//!
//! A matcher is asked whether a token starts at a given offset of the source. It answers with
//! the span of the lexeme or with `None`. The regex implementation covers the common case,
//! the closure implementation allows strategies a regular expression can't express, e.g.
//! matching balanced delimiters or looking at the tokens seen so far through the [Context].
use log::trace;
use regex_automata::{
    meta::Regex,
    util::{captures::Captures, syntax},
    Anchored, Input,
};

use crate::{Context, LexmapError, LexmapErrorKind, Result, Span};

/// The capability of recognizing a lexeme at a given offset.
///
/// Implementations must report spans that start at or after `offset`. A span starting before
/// `offset` makes the scan fail with an ordering violation.
pub trait Matcher: Send + Sync {
    /// Attempts a match at `offset` of `source`.
    ///
    /// Returns `Ok(None)` if there is no match. Errors are propagated to the consumer of the
    /// token stream unchanged and end the scan.
    fn find_at(&self, source: &str, offset: usize, context: &mut Context) -> Result<Option<Span>>;
}

impl<M: Matcher + ?Sized> Matcher for Box<M> {
    fn find_at(&self, source: &str, offset: usize, context: &mut Context) -> Result<Option<Span>> {
        (**self).find_at(source, offset, context)
    }
}

/// A matcher backed by a regular expression.
///
/// The regular expression is anchored at the offset: a match that starts later in the source
/// is never reported. Assertions like `^`, `$` or `\b` still see the whole source, so
/// `(?m)^#` only matches at the start of a line.
#[derive(Clone, Debug)]
pub struct RegexMatcher {
    rx: Regex,
    pattern: String,
    group: usize,
}

impl RegexMatcher {
    /// Creates a matcher that reports the whole match.
    pub fn new(pattern: &str) -> Result<Self> {
        Self::build(pattern, 0, syntax::Config::new())
    }

    /// Creates a matcher that reports capture group `group` as lexeme.
    ///
    /// This is useful for lookahead-like patterns, e.g. `(if|else)[^a-z]` with group 1 yields
    /// the keyword without the following character.
    pub fn with_group(pattern: &str, group: usize) -> Result<Self> {
        Self::build(pattern, group, syntax::Config::new())
    }

    /// Creates a matcher with explicit syntax options, e.g. case insensitivity.
    pub fn with_syntax(pattern: &str, group: usize, config: syntax::Config) -> Result<Self> {
        Self::build(pattern, group, config)
    }

    /// Creates a matcher for a list of literal words, e.g. the keywords or operators of a
    /// language. The words are escaped. A word ending in a word character must be followed by a
    /// word boundary, so `if` doesn't match the start of `iffy`. Symbolic words like `+=` match
    /// regardless of what follows.
    pub fn words<S: AsRef<str>>(words: &[S]) -> Result<Self> {
        let alternatives = words
            .iter()
            .map(|w| {
                let w = w.as_ref();
                let escaped = regex_syntax::escape(w);
                if w.ends_with(|c: char| c.is_alphanumeric() || c == '_') {
                    format!(r"{}\b", escaped)
                } else {
                    escaped
                }
            })
            .collect::<Vec<_>>()
            .join("|");
        Self::new(&format!("(?:{})", alternatives))
    }

    fn build(pattern: &str, group: usize, config: syntax::Config) -> Result<Self> {
        let rx = Regex::builder()
            .syntax(config)
            .build(pattern)
            .map_err(|e| {
                LexmapError::new(LexmapErrorKind::RegexBuildError(e, pattern.to_string()))
            })?;
        // Group 0 is the implicit group of the whole match.
        let groups = rx.group_info().group_len(regex_automata::PatternID::ZERO);
        if group >= groups {
            return Err(LexmapErrorKind::InvalidCaptureGroup {
                pattern: pattern.to_string(),
                group,
                groups,
            }
            .into());
        }
        Ok(Self {
            rx,
            pattern: pattern.to_string(),
            group,
        })
    }

    /// Get the regular expression.
    #[inline]
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Get the capture group that is reported as lexeme.
    #[inline]
    pub fn group(&self) -> usize {
        self.group
    }
}

impl Matcher for RegexMatcher {
    fn find_at(&self, source: &str, offset: usize, _context: &mut Context) -> Result<Option<Span>> {
        let input = Input::new(source)
            .range(offset..)
            .anchored(Anchored::Yes);
        if self.group == 0 {
            let found = self.rx.search(&input).map(|m| Span::from(m.span()));
            if let Some(span) = found {
                trace!("'{}' matched {}", self.pattern.escape_default(), span);
            }
            return Ok(found);
        }
        let mut caps: Captures = self.rx.create_captures();
        self.rx.search_captures(&input, &mut caps);
        if !caps.is_match() {
            return Ok(None);
        }
        // A group that did not take part in the match yields an empty lexeme.
        let span = caps
            .get_group(self.group)
            .map(Span::from)
            .unwrap_or(Span::empty(offset));
        trace!(
            "'{}' matched group {} at {}",
            self.pattern.escape_default(),
            self.group,
            span
        );
        Ok(Some(span))
    }
}

/// A procedural matcher backed by a closure.
pub struct FnMatcher<F> {
    f: F,
}

impl<F> FnMatcher<F>
where
    F: Fn(&str, usize, &mut Context) -> Result<Option<Span>> + Send + Sync,
{
    /// Wraps the closure.
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<F> Matcher for FnMatcher<F>
where
    F: Fn(&str, usize, &mut Context) -> Result<Option<Span>> + Send + Sync,
{
    #[inline]
    fn find_at(&self, source: &str, offset: usize, context: &mut Context) -> Result<Option<Span>> {
        (self.f)(source, offset, context)
    }
}

impl<F> std::fmt::Debug for FnMatcher<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnMatcher").finish()
    }
}

/// A procedural matcher that matches any single character, often registered last to swallow
/// everything the other patterns don't recognize.
#[derive(Clone, Copy, Debug, Default)]
pub struct AnyChar;

impl Matcher for AnyChar {
    fn find_at(&self, source: &str, offset: usize, _context: &mut Context) -> Result<Option<Span>> {
        Ok(source[offset..]
            .chars()
            .next()
            .map(|c| Span::new(offset, offset + c.len_utf8())))
    }
}
