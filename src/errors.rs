use thiserror::Error;

/// The result type for the `lexmap` crate.
pub type Result<T> = std::result::Result<T, LexmapError>;

/// The error type for the `lexmap` crate.
#[derive(Error, Debug)]
pub struct LexmapError {
    /// The source of the error.
    pub source: Box<LexmapErrorKind>,
}

impl LexmapError {
    /// Create a new `LexmapError`.
    pub fn new(kind: LexmapErrorKind) -> Self {
        LexmapError {
            source: Box::new(kind),
        }
    }

    /// Wraps an arbitrary error raised inside a user supplied matcher.
    pub fn matcher_fault<E>(error: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        LexmapError::new(LexmapErrorKind::MatcherFault(error.into()))
    }

    /// Returns the error kind.
    #[inline]
    pub fn kind(&self) -> &LexmapErrorKind {
        &self.source
    }

    /// Returns true if the error was detected while registering patterns, i.e. before any
    /// scanning took place.
    pub fn is_configuration_error(&self) -> bool {
        match *self.source {
            LexmapErrorKind::RegexBuildError(..)
            | LexmapErrorKind::InvalidCaptureGroup { .. }
            | LexmapErrorKind::InvalidTokenType(_) => true,
            #[cfg(feature = "serde")]
            LexmapErrorKind::JsonError(_) => true,
            _ => false,
        }
    }
}

impl std::fmt::Display for LexmapError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.source)
    }
}

/// The error kind type.
#[derive(Error, Debug)]
pub enum LexmapErrorKind {
    /// The regular expression of a pattern could not be compiled.
    #[error("'{1}' {0}")]
    RegexBuildError(regex_automata::meta::BuildError, String),

    /// The capture group selected as lexeme does not exist in the regular expression.
    #[error("Capture group {group} does not exist in '{pattern}' which has {groups} groups")]
    InvalidCaptureGroup {
        /// The regular expression.
        pattern: String,
        /// The requested group index.
        group: usize,
        /// The number of groups of the regular expression, including the implicit group 0.
        groups: usize,
    },

    /// A pattern was registered with an empty or a reserved token type.
    #[error("Invalid token type for a pattern: '{0}'")]
    InvalidTokenType(String),

    /// A pattern set could not be read from JSON.
    #[cfg(feature = "serde")]
    #[error(transparent)]
    JsonError(serde_json::Error),

    /// A user supplied matcher failed. The error is passed through unchanged.
    #[error("Matcher failed: {0}")]
    MatcherFault(Box<dyn std::error::Error + Send + Sync>),

    /// A matcher reported a match that starts before the end of the previous token.
    #[error(
        "Scanner went backwards: '{token_type}' matched at {offset} but the previous token ends at {cursor}"
    )]
    OrderingViolation {
        /// The token type of the offending pattern.
        token_type: String,
        /// The start offset the matcher reported.
        offset: usize,
        /// The end of the previous token.
        cursor: usize,
    },

    /// A matcher reported a span that is not a valid range of the source.
    #[error("Invalid span {start}..{end} reported for '{token_type}' on a source of length {len}")]
    InvalidSpan {
        /// The token type of the offending pattern.
        token_type: String,
        /// The reported start offset.
        start: usize,
        /// The reported end offset.
        end: usize,
        /// The byte length of the source.
        len: usize,
    },
}

impl From<LexmapErrorKind> for LexmapError {
    fn from(kind: LexmapErrorKind) -> Self {
        LexmapError::new(kind)
    }
}

#[cfg(feature = "serde")]
impl From<serde_json::Error> for LexmapError {
    fn from(error: serde_json::Error) -> Self {
        LexmapError::new(LexmapErrorKind::JsonError(error))
    }
}
