//! Module with the contract between the tree translator and the hosting document.
//!
//! The translator never creates document nodes itself. It asks a [TreeSink] for them, so any
//! document model can be targeted. [NodeSink] targets the crate's own [Node] tree.
use crate::{Element, Node};

/// How the input of a translation has to be interpreted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum InputMode {
    /// The input is plain text. Text nodes are escaped when the document is serialized.
    #[default]
    Text,
    /// The input is already escaped markup, e.g. the inner HTML of an element. Lexemes are
    /// materialized as markup so entities are not escaped a second time.
    Markup,
}

/// Options of a tree translation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SinkConfig {
    /// How lexemes are materialized.
    pub input: InputMode,
}

impl SinkConfig {
    /// A config for the given input mode.
    pub fn new(input: InputMode) -> Self {
        Self { input }
    }
}

/// Options of [crate::TreeTranslator::highlight].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HighlightOptions {
    /// Which content of the host is read: its text or its markup.
    pub input: InputMode,
}

impl HighlightOptions {
    /// Read the host's text content.
    pub fn text() -> Self {
        Self {
            input: InputMode::Text,
        }
    }

    /// Read the host's markup content.
    pub fn markup() -> Self {
        Self {
            input: InputMode::Markup,
        }
    }
}

impl From<HighlightOptions> for SinkConfig {
    fn from(options: HighlightOptions) -> Self {
        SinkConfig::new(options.input)
    }
}

/// The node factory of a hosting document.
pub trait TreeSink {
    /// The node type of the document.
    type Node;

    /// Creates the container the translated nodes are appended to.
    fn create_container(&mut self) -> Self::Node;

    /// Creates an element with the given tag.
    fn create_element(&mut self, tag: &str) -> Self::Node;

    /// Sets an attribute of an element created by [Self::create_element].
    fn set_attribute(&mut self, element: &mut Self::Node, name: &str, value: &str);

    /// Creates a text node.
    fn create_text(&mut self, text: &str) -> Self::Node;

    /// Creates a node from already escaped markup.
    fn create_markup(&mut self, markup: &str) -> Self::Node;

    /// Appends `child` to `parent`.
    fn append_child(&mut self, parent: &mut Self::Node, child: Self::Node);

    /// Merges adjacent text nodes below `node`.
    fn normalize(&mut self, node: &mut Self::Node);
}

/// A document element whose content can be highlighted in place.
pub trait Host {
    /// The node factory of the host's document.
    type Sink: TreeSink;

    /// Returns the node factory of the host's document.
    fn sink(&self) -> Self::Sink;

    /// The host's content as plain text.
    fn text_content(&self) -> String;

    /// The host's content as markup.
    fn inner_markup(&self) -> String;

    /// Replaces all children of the host with `content` in a single step.
    fn replace_children(&mut self, content: <Self::Sink as TreeSink>::Node);
}

/// A [TreeSink] building the crate's own [Node] tree.
#[derive(Clone, Copy, Debug, Default)]
pub struct NodeSink;

impl TreeSink for NodeSink {
    type Node = Node;

    fn create_container(&mut self) -> Node {
        Node::fragment()
    }

    fn create_element(&mut self, tag: &str) -> Node {
        Node::Element(Element::new(tag))
    }

    fn set_attribute(&mut self, element: &mut Node, name: &str, value: &str) {
        if let Node::Element(e) = element {
            e.set_attribute(name, value);
        }
    }

    fn create_text(&mut self, text: &str) -> Node {
        Node::text(text)
    }

    fn create_markup(&mut self, markup: &str) -> Node {
        Node::markup(markup)
    }

    fn append_child(&mut self, parent: &mut Node, child: Node) {
        parent.append(child);
    }

    fn normalize(&mut self, node: &mut Node) {
        node.normalize();
    }
}

impl Host for Element {
    type Sink = NodeSink;

    fn sink(&self) -> NodeSink {
        NodeSink
    }

    fn text_content(&self) -> String {
        Element::text_content(self)
    }

    fn inner_markup(&self) -> String {
        self.inner_html()
    }

    fn replace_children(&mut self, content: Node) {
        let children = match content {
            Node::Fragment(children) => children,
            node => vec![node],
        };
        self.set_children(children);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_sink() {
        let mut sink = NodeSink;
        let mut root = sink.create_container();
        let mut b = sink.create_element("b");
        sink.set_attribute(&mut b, "class", "op");
        let star = sink.create_text("*");
        sink.append_child(&mut b, star);
        sink.append_child(&mut root, b);
        let text = sink.create_text("x");
        sink.append_child(&mut root, text);
        let markup = sink.create_markup("&lt;");
        sink.append_child(&mut root, markup);
        sink.normalize(&mut root);
        assert_eq!(root.to_html(), r#"<b class="op">*</b>x&lt;"#);
    }

    #[test]
    fn test_element_host() {
        let mut pre = Element::new("pre").with_child(Node::markup("a &lt; b"));
        assert_eq!(Host::text_content(&pre), "a < b");
        assert_eq!(pre.inner_markup(), "a &lt; b");
        let mut pre_text = Element::new("pre").with_child(Node::text("a < b"));
        assert_eq!(Host::text_content(&pre_text), "a < b");
        assert_eq!(pre_text.inner_markup(), "a &lt; b");

        pre.replace_children(Node::Fragment(vec![Node::text("1"), Node::text("2")]));
        assert_eq!(pre.children().len(), 2);
        pre_text.replace_children(Node::text("z"));
        assert_eq!(pre_text.inner_html(), "z");
    }

    #[test]
    fn test_options() {
        assert_eq!(HighlightOptions::default().input, InputMode::Text);
        let config: SinkConfig = HighlightOptions::markup().into();
        assert_eq!(config.input, InputMode::Markup);
    }
}
