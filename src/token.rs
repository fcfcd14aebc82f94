//! Module with the token types.
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::Span;

/// The token type of the first token of every token stream.
pub const START: &str = "(start)";
/// The token type of the last token of every token stream.
pub const END: &str = "(end)";
/// The token type of a single character no pattern could match.
pub const UNMATCHED: &str = "(unmatched)";
/// The token type used for zero-length matches when empty match marking is enabled.
pub const EMPTY: &str = "(empty)";
/// The key of the fallback rule of a [crate::Transformer].
pub const UNKNOWN: &str = "(unknown)";

/// The token types the scanner emits on its own. Patterns can't be registered under these.
pub const RESERVED: &[&str] = &[START, END, UNMATCHED, EMPTY];

/// Returns true if `token_type` is one of the types the scanner emits on its own.
#[inline]
pub fn is_reserved(token_type: &str) -> bool {
    RESERVED.contains(&token_type)
}

/// A token produced by the scanner.
///
/// The token borrows its type name from the scanner's pattern registry and its text from the
/// scanned source, hence it is cheap to copy.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Token<'a> {
    token_type: &'a str,
    text: &'a str,
    position: usize,
}

impl<'a> Token<'a> {
    /// Create a new token.
    #[inline]
    pub fn new(token_type: &'a str, text: &'a str, position: usize) -> Self {
        Self {
            token_type,
            text,
            position,
        }
    }

    /// The `(start)` token.
    #[inline]
    pub(crate) fn start() -> Self {
        Self::new(START, "", 0)
    }

    /// The `(end)` token at the given offset.
    #[inline]
    pub(crate) fn end(position: usize) -> Self {
        Self::new(END, "", position)
    }

    /// Get the token type.
    #[inline]
    pub fn token_type(&self) -> &'a str {
        self.token_type
    }

    /// Get the lexeme.
    #[inline]
    pub fn text(&self) -> &'a str {
        self.text
    }

    /// Get the byte offset of the lexeme start.
    #[inline]
    pub fn position(&self) -> usize {
        self.position
    }

    /// Get the byte offset right after the lexeme.
    #[inline]
    pub fn end_position(&self) -> usize {
        self.position + self.text.len()
    }

    /// Get the span of the lexeme.
    #[inline]
    pub fn span(&self) -> Span {
        Span::new(self.position, self.end_position())
    }

    /// Check if the lexeme is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Check if the token has the given type.
    #[inline]
    pub fn is(&self, token_type: &str) -> bool {
        self.token_type == token_type
    }

    /// Check if the token is one the scanner emitted on its own.
    #[inline]
    pub fn is_reserved(&self) -> bool {
        is_reserved(self.token_type)
    }

    /// Create an owned copy of the token.
    pub fn to_owned_token(&self) -> OwnedToken {
        OwnedToken::new(self.token_type, self.text, self.position)
    }
}

impl std::fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}@{}: '{}'",
            self.token_type,
            self.position,
            self.text.escape_default()
        )
    }
}

/// An owned token, e.g. for storing tokens beyond the lifetime of the source or for
/// (de)serialization.
#[derive(Clone, Debug, Default, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct OwnedToken {
    /// The token type.
    pub token_type: String,
    /// The lexeme.
    pub text: String,
    /// The byte offset of the lexeme start.
    pub position: usize,
}

impl OwnedToken {
    /// Create a new owned token.
    pub fn new(token_type: &str, text: &str, position: usize) -> Self {
        Self {
            token_type: token_type.to_string(),
            text: text.to_string(),
            position,
        }
    }

    /// Borrow the owned token as [Token].
    pub fn as_token(&self) -> Token<'_> {
        Token::new(&self.token_type, &self.text, self.position)
    }
}

impl From<Token<'_>> for OwnedToken {
    fn from(token: Token<'_>) -> Self {
        token.to_owned_token()
    }
}

impl From<(&str, &str, usize)> for OwnedToken {
    fn from((token_type, text, position): (&str, &str, usize)) -> Self {
        OwnedToken::new(token_type, text, position)
    }
}

/// Conversion of a token into the default output of a rule table.
///
/// The fallback rule of a `Transformer<O>` created with `Default` is `O::from_token`.
pub trait FromToken {
    /// Converts the token.
    fn from_token(token: &Token<'_>) -> Self;
}

/// The lexeme as plain text.
impl FromToken for String {
    fn from_token(token: &Token<'_>) -> Self {
        token.text().to_string()
    }
}

/// The token itself.
impl FromToken for OwnedToken {
    fn from_token(token: &Token<'_>) -> Self {
        token.to_owned_token()
    }
}
