#![forbid(missing_docs)]
//! # `lexmap`
//! The `lexmap` crate is a scan-and-transform engine, e.g. for syntax highlighting.
//! A [Scanner] splits a source text into typed tokens. Each token type is recognized by a
//! [Matcher], which is either an anchored regular expression or an arbitrary function.
//! Text that no matcher recognizes is not an error. It is emitted character by character as
//! `(unmatched)` tokens, so the token stream always covers the whole input.
//!
//! A [Transformer] maps tokens to output units by their type, and a [Translator] combines both
//! into a complete translation. Output units are strings ([TextTranslator]) or nodes of a document
//! tree ([TreeTranslator]). A tree translation can replace the content of a [Host] element in
//! place, see [TreeTranslator::highlight].
//!
//! To compile the regular expressions, the crate uses the `regex-automata` crate.
//!
//! # Example
//! ```rust
//! use lexmap::{rules, TextTranslator};
//!
//! let mut translator = TextTranslator::default();
//! translator
//!     .token_regex("num", r"\d+")
//!     .and_then(|t| t.token_regex("op", r"[-+*/]"))
//!     .expect("Invalid pattern");
//! translator
//!     .convert("num", rules::wrap("i", false))
//!     .convert("op", rules::wrap("b", true));
//!
//! let html = translator.translate("1 + 22").expect("Translation failed");
//! assert_eq!(html, r#"<i>1</i> <b class="op">+</b> <i>22</i>"#);
//! ```
//!
//! The token stream itself can be consumed lazily:
//! ```rust
//! use lexmap::Scanner;
//!
//! let mut scanner = Scanner::new();
//! scanner.add_regex("num", r"\d+").expect("Invalid pattern");
//! for token in scanner.iter_tokens("1+2") {
//!     println!("{}", token.expect("Scanner error"));
//! }
//! ```
//! The output of the example is:
//! ```text
//! (start)@0: ''
//! num@0: '1'
//! (unmatched)@1: '+'
//! num@2: '2'
//! (end)@3: ''
//! ```
//!
//! # Crate features
//! - `serde`: Enabled by default. Derives `Serialize` and `Deserialize` for the data types and
//!   allows loading pattern tables from JSON with
//!   [ScannerBuilder::add_patterns_from_json].

/// Module with the shared scanning context
mod context;
pub use context::Context;

/// Module with error definitions
mod errors;
pub use errors::{LexmapError, LexmapErrorKind, Result};

/// Module that provides the Matcher trait and its implementations
mod matcher;
pub use matcher::{AnyChar, FnMatcher, Matcher, RegexMatcher};

/// Module that provides a serializable pattern description
mod pattern;
pub use pattern::PatternSpec;

/// Ready made transformation rules
pub mod rules;

/// The module with the scanner.
mod scanner;
pub use scanner::{OnMatch, Scanner};

/// The module with the scanner builder.
mod scanner_builder;
pub use scanner_builder::ScannerBuilder;

/// Module with the interface to hosting documents
mod sink;
pub use sink::{HighlightOptions, Host, InputMode, NodeSink, SinkConfig, TreeSink};

/// Module that provides a Span type
mod span;
pub use span::Span;

/// Module that provides the Token type and the reserved token types
pub mod token;
pub use token::{FromToken, OwnedToken, Token};

/// Module that provides the token iterator
mod tokens;
pub use tokens::Tokens;

/// Module with the rule table
mod transformer;
pub use transformer::{Rule, RuleKeys, Transformer};

/// Module that combines scanner and transformer
mod translator;
pub use translator::{Outputs, TextTranslator, Translator, TreeTranslator};

/// Module with a minimal document tree
pub mod tree;
pub use tree::{Element, Node};
