use log::debug;

use crate::{PatternSpec, Result, Scanner};

/// A builder for creating a scanner from pattern specs.
///
/// The builder collects [PatternSpec]s, e.g. loaded from JSON, and compiles them in [Self::build].
/// Procedural matchers can be added to the built scanner with [Scanner::add_fn].
#[derive(Debug, Clone, Default)]
pub struct ScannerBuilder {
    patterns: Vec<PatternSpec>,
    mark_empty_matches: bool,
}

impl ScannerBuilder {
    /// Creates a new scanner builder.
    pub fn new() -> Self {
        Self {
            patterns: Vec::new(),
            mark_empty_matches: false,
        }
    }

    /// Adds a pattern to the scanner builder.
    pub fn add_pattern(mut self, pattern: PatternSpec) -> Self {
        self.patterns.push(pattern);
        self
    }

    /// Adds multiple patterns to the scanner builder.
    pub fn add_patterns(mut self, patterns: &[PatternSpec]) -> Self {
        self.patterns.extend_from_slice(patterns);
        self
    }

    /// Adds the patterns of a JSON array of pattern specs, e.g.
    /// `[{"token_type": "num", "pattern": "\\d+"}]`.
    #[cfg(feature = "serde")]
    pub fn add_patterns_from_json(mut self, json: &str) -> Result<Self> {
        let patterns: Vec<PatternSpec> = serde_json::from_str(json)?;
        self.patterns.extend(patterns);
        Ok(self)
    }

    /// Emit zero-length matches with token type `(empty)`.
    pub fn mark_empty_matches(mut self, mark: bool) -> Self {
        self.mark_empty_matches = mark;
        self
    }

    /// Builds the scanner from the scanner builder.
    /// Fails on the first pattern that can't be compiled.
    pub fn build(self) -> Result<Scanner> {
        debug!("Building scanner from {} patterns", self.patterns.len());
        let mut scanner = Scanner::new();
        for pattern in &self.patterns {
            scanner.add_regex_group(pattern.token_type(), pattern.pattern(), pattern.group())?;
        }
        scanner.set_mark_empty_matches(self.mark_empty_matches);
        Ok(scanner)
    }
}
