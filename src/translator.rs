use log::{debug, trace};

use crate::{
    Context, FromToken, Host, HighlightOptions, InputMode, Matcher, Node, Result, RuleKeys,
    Scanner, SinkConfig, Span, Token, Tokens, Transformer, TreeSink,
};

/// A translator composes one [Scanner] and one [Transformer].
///
/// The scanner splits the source into tokens, the transformer maps every token to an output
/// unit of type `O`, and the translator folds the outputs into the final artifact:
/// - [TextTranslator] concatenates string outputs,
/// - [TreeTranslator] appends node outputs to a container of a [TreeSink].
///
/// `token*` and `convert` are shortcuts for registering patterns and rules.
#[derive(Debug)]
pub struct Translator<O> {
    scanner: Scanner,
    transformer: Transformer<O>,
}

/// A translator producing a string.
pub type TextTranslator = Translator<String>;

/// A translator producing a document tree.
pub type TreeTranslator = Translator<Node>;

impl<O: FromToken + 'static> Default for Translator<O> {
    fn default() -> Self {
        Self::new(Scanner::new(), Transformer::default())
    }
}

impl<O> Translator<O> {
    /// Creates a translator from an existing scanner and transformer.
    pub fn new(scanner: Scanner, transformer: Transformer<O>) -> Self {
        Self {
            scanner,
            transformer,
        }
    }

    /// Get the scanner.
    #[inline]
    pub fn scanner(&self) -> &Scanner {
        &self.scanner
    }

    /// Get the scanner for registering patterns or a hook.
    #[inline]
    pub fn scanner_mut(&mut self) -> &mut Scanner {
        &mut self.scanner
    }

    /// Get the transformer.
    #[inline]
    pub fn transformer(&self) -> &Transformer<O> {
        &self.transformer
    }

    /// Get the transformer for registering rules.
    #[inline]
    pub fn transformer_mut(&mut self) -> &mut Transformer<O> {
        &mut self.transformer
    }

    /// Splits the translator into its scanner and transformer.
    pub fn into_parts(self) -> (Scanner, Transformer<O>) {
        (self.scanner, self.transformer)
    }

    /// Shortcut for [Scanner::add].
    pub fn token<M: Matcher + 'static>(
        &mut self,
        token_type: &str,
        matcher: M,
    ) -> Result<&mut Self> {
        self.scanner.add(token_type, matcher)?;
        Ok(self)
    }

    /// Shortcut for [Scanner::add_regex].
    pub fn token_regex(&mut self, token_type: &str, pattern: &str) -> Result<&mut Self> {
        self.scanner.add_regex(token_type, pattern)?;
        Ok(self)
    }

    /// Shortcut for [Scanner::add_regex_group].
    pub fn token_regex_group(
        &mut self,
        token_type: &str,
        pattern: &str,
        group: usize,
    ) -> Result<&mut Self> {
        self.scanner.add_regex_group(token_type, pattern, group)?;
        Ok(self)
    }

    /// Shortcut for [Scanner::add_fn].
    pub fn token_fn<F>(&mut self, token_type: &str, f: F) -> Result<&mut Self>
    where
        F: Fn(&str, usize, &mut Context) -> Result<Option<Span>> + Send + Sync + 'static,
    {
        self.scanner.add_fn(token_type, f)?;
        Ok(self)
    }

    /// Shortcut for [Transformer::add].
    pub fn convert<K, F>(&mut self, keys: K, rule: F) -> &mut Self
    where
        K: RuleKeys,
        F: Fn(&Token<'_>) -> O + Send + Sync + 'static,
    {
        self.transformer.add(keys, rule);
        self
    }

    /// Returns a lazy iterator over the transformed tokens of `source`.
    pub fn outputs<'a>(&'a self, source: &'a str) -> Outputs<'a, O> {
        Outputs {
            tokens: self.scanner.iter_tokens(source),
            transformer: &self.transformer,
        }
    }
}

impl Translator<String> {
    /// Translates `source` into the concatenation of the outputs of all tokens.
    pub fn translate(&self, source: &str) -> Result<String> {
        debug!("Translating {} bytes to text", source.len());
        let mut out = String::with_capacity(source.len());
        for output in self.outputs(source) {
            out.push_str(&output?);
        }
        Ok(out)
    }
}

impl Translator<Node> {
    /// Translates `source` into a fragment of the crate's own document tree.
    pub fn translate(&self, source: &str, config: SinkConfig) -> Result<Node> {
        self.translate_into(source, &mut crate::NodeSink, config)
    }

    /// Translates `source` into a container created by `sink`.
    ///
    /// The outputs are materialized by the sink and appended to the container in token order.
    /// Finally the container is normalized, so consecutive text outputs form a single text node.
    pub fn translate_into<S: TreeSink>(
        &self,
        source: &str,
        sink: &mut S,
        config: SinkConfig,
    ) -> Result<S::Node> {
        debug!(
            "Translating {} bytes to a tree, input mode {:?}",
            source.len(),
            config.input
        );
        let mut container = sink.create_container();
        for output in self.outputs(source) {
            let node = materialize(sink, output?, config.input);
            sink.append_child(&mut container, node);
        }
        sink.normalize(&mut container);
        Ok(container)
    }

    /// Replaces the content of `host` with its translation.
    ///
    /// The host's content is read as text or as markup depending on `options`. The host is only
    /// modified after the translation succeeded, and then in a single step.
    pub fn highlight<H: Host>(&self, host: &mut H, options: HighlightOptions) -> Result<()> {
        let input = match options.input {
            InputMode::Text => host.text_content(),
            InputMode::Markup => host.inner_markup(),
        };
        let mut sink = host.sink();
        let content = self.translate_into(&input, &mut sink, options.into())?;
        trace!("Replacing the children of the host");
        host.replace_children(content);
        Ok(())
    }
}

/// Builds the sink's counterpart of `node`.
fn materialize<S: TreeSink>(sink: &mut S, node: Node, input: InputMode) -> S::Node {
    match node {
        Node::Text(text) => match input {
            InputMode::Text => sink.create_text(&text),
            InputMode::Markup => sink.create_markup(&text),
        },
        Node::Markup(markup) => sink.create_markup(&markup),
        Node::Element(element) => {
            let mut target = sink.create_element(element.tag());
            for (name, value) in element.attributes() {
                sink.set_attribute(&mut target, name, value);
            }
            for child in element.into_children() {
                let child = materialize(sink, child, input);
                sink.append_child(&mut target, child);
            }
            target
        }
        Node::Fragment(children) => {
            let mut target = sink.create_container();
            for child in children {
                let child = materialize(sink, child, input);
                sink.append_child(&mut target, child);
            }
            target
        }
    }
}

/// A lazy iterator over the transformed tokens of a source.
///
/// This iterator is created with [Translator::outputs].
pub struct Outputs<'a, O> {
    tokens: Tokens<'a>,
    transformer: &'a Transformer<O>,
}

impl<O> Iterator for Outputs<'_, O> {
    type Item = Result<O>;

    fn next(&mut self) -> Option<Self::Item> {
        self.tokens
            .next()
            .map(|token| token.map(|t| self.transformer.transform(&t)))
    }
}

impl<O> std::fmt::Debug for Outputs<'_, O> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Outputs")
            .field("tokens", &self.tokens)
            .finish()
    }
}
