//! Module with the serializable pattern registration record.
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A regex pattern bundled with the token type it produces.
///
/// Pattern specs are the data form of [crate::Scanner::add_regex_group]. They can be kept in
/// JSON files and loaded with [crate::ScannerBuilder::add_patterns_from_json].
/// The order of a list of specs is the match priority.
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PatternSpec {
    token_type: String,
    pattern: String,
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    group: Option<usize>,
}

impl PatternSpec {
    /// Create a new pattern spec that reports the whole match.
    pub fn new(token_type: &str, pattern: &str) -> Self {
        Self {
            token_type: token_type.to_string(),
            pattern: pattern.to_string(),
            group: None,
        }
    }

    /// Reports capture group `group` as lexeme instead of the whole match.
    pub fn with_group(self, group: usize) -> Self {
        Self {
            group: Some(group),
            ..self
        }
    }

    /// Get the token type.
    #[inline]
    pub fn token_type(&self) -> &str {
        &self.token_type
    }

    /// Get the regular expression.
    #[inline]
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Get the capture group reported as lexeme, 0 being the whole match.
    #[inline]
    pub fn group(&self) -> usize {
        self.group.unwrap_or(0)
    }
}

impl std::fmt::Display for PatternSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.token_type, self.pattern.escape_default())?;
        if let Some(group) = self.group {
            write!(f, " [{}]", group)?
        }
        Ok(())
    }
}
