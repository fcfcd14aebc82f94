//! Module with a minimal document tree.
//!
//! [Node] is the output unit of tree rules and at the same time the node type of the built in
//! [crate::NodeSink]. It is not meant as a full DOM, only as much as highlighting needs:
//! elements with attributes, text, and markup that is already escaped.
use std::fmt;

use crate::{FromToken, Token};

/// A node of the document tree.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Node {
    /// An element with a tag, attributes and children.
    Element(Element),
    /// Plain text. Special characters are escaped on serialization.
    Text(String),
    /// Markup that is already escaped and is serialized as is.
    Markup(String),
    /// A list of nodes without an enclosing element.
    Fragment(Vec<Node>),
}

impl Node {
    /// Create a text node.
    pub fn text(text: &str) -> Self {
        Node::Text(text.to_string())
    }

    /// Create a markup node.
    pub fn markup(markup: &str) -> Self {
        Node::Markup(markup.to_string())
    }

    /// Create an empty fragment.
    pub fn fragment() -> Self {
        Node::Fragment(Vec::new())
    }

    /// Create an element node.
    pub fn element(element: Element) -> Self {
        Node::Element(element)
    }

    /// Check if the node is a text or markup node.
    pub fn is_text_like(&self) -> bool {
        matches!(self, Node::Text(_) | Node::Markup(_))
    }

    /// The children of an element or fragment, empty for text.
    pub fn children(&self) -> &[Node] {
        match self {
            Node::Element(e) => &e.children,
            Node::Fragment(children) => children,
            Node::Text(_) | Node::Markup(_) => &[],
        }
    }

    /// Appends a child to an element or fragment.
    /// Fragments are spliced, i.e. their children are appended.
    /// Text nodes can't have children, appending to them replaces them with a fragment.
    pub fn append(&mut self, child: Node) {
        match self {
            Node::Element(e) => push_child(&mut e.children, child),
            Node::Fragment(children) => push_child(children, child),
            Node::Text(_) | Node::Markup(_) => {
                let this = std::mem::replace(self, Node::fragment());
                self.append(this);
                self.append(child);
            }
        }
    }

    /// Merges adjacent text-like nodes and removes empty ones, recursively.
    /// A text node next to a markup node is escaped and joined into the markup.
    pub fn normalize(&mut self) {
        match self {
            Node::Element(e) => normalize_children(&mut e.children),
            Node::Fragment(children) => normalize_children(children),
            Node::Text(_) | Node::Markup(_) => {}
        }
    }

    /// The concatenated text of the node. Entities in markup nodes are resolved.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            Node::Text(t) => out.push_str(t),
            Node::Markup(m) => out.push_str(&unescape(m)),
            Node::Element(e) => e.children.iter().for_each(|c| c.collect_text(out)),
            Node::Fragment(children) => children.iter().for_each(|c| c.collect_text(out)),
        }
    }

    /// Serializes the node as HTML.
    pub fn to_html(&self) -> String {
        self.to_string()
    }
}

fn push_child(children: &mut Vec<Node>, child: Node) {
    match child {
        Node::Fragment(nodes) => children.extend(nodes),
        child => children.push(child),
    }
}

fn normalize_children(children: &mut Vec<Node>) {
    let mut merged: Vec<Node> = Vec::with_capacity(children.len());
    for mut child in std::mem::take(children) {
        child.normalize();
        match child {
            Node::Fragment(nodes) => nodes.into_iter().for_each(|n| merge_into(&mut merged, n)),
            child => merge_into(&mut merged, child),
        }
    }
    *children = merged;
}

// Text next to markup is escaped and becomes part of the markup.
fn merge_into(merged: &mut Vec<Node>, node: Node) {
    match node {
        Node::Text(t) | Node::Markup(t) if t.is_empty() => {}
        Node::Text(t) => match merged.last_mut() {
            Some(Node::Text(prev)) => prev.push_str(&t),
            Some(Node::Markup(prev)) => prev.push_str(&escape(&t)),
            _ => merged.push(Node::Text(t)),
        },
        Node::Markup(m) => match merged.last_mut() {
            Some(Node::Markup(prev)) => prev.push_str(&m),
            Some(last @ Node::Text(_)) => {
                if let Node::Text(prev) = last {
                    let markup = escape(prev) + &m;
                    *last = Node::Markup(markup);
                }
            }
            _ => merged.push(Node::Markup(m)),
        },
        node => merged.push(node),
    }
}

impl FromToken for Node {
    /// A text node with the lexeme.
    fn from_token(token: &Token<'_>) -> Self {
        Node::text(token.text())
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Node::Element(element)
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Element(e) => write!(f, "{}", e),
            Node::Text(t) => f.write_str(&escape(t)),
            Node::Markup(m) => f.write_str(m),
            Node::Fragment(children) => children.iter().try_for_each(|c| write!(f, "{}", c)),
        }
    }
}

/// An element of the document tree.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Element {
    tag: String,
    attributes: Vec<(String, String)>,
    children: Vec<Node>,
}

impl Element {
    /// Create an element without attributes and children.
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Sets an attribute, replacing a previous value.
    pub fn set_attribute(&mut self, name: &str, value: &str) {
        match self.attributes.iter_mut().find(|(n, _)| n == name) {
            Some((_, v)) => *v = value.to_string(),
            None => self
                .attributes
                .push((name.to_string(), value.to_string())),
        }
    }

    /// Adds a class to the `class` attribute.
    pub fn add_class(&mut self, class: &str) {
        match self.attribute("class") {
            Some(classes) if classes.split_whitespace().any(|c| c == class) => {}
            Some(classes) => {
                let classes = format!("{} {}", classes, class);
                self.set_attribute("class", &classes);
            }
            None => self.set_attribute("class", class),
        }
    }

    /// Builder style variant of [Self::add_class].
    pub fn with_class(mut self, class: &str) -> Self {
        self.add_class(class);
        self
    }

    /// Builder style variant of appending a child.
    pub fn with_child(mut self, child: Node) -> Self {
        push_child(&mut self.children, child);
        self
    }

    /// Get the tag.
    #[inline]
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Get an attribute value.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Get the attributes in insertion order.
    pub fn attributes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attributes.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    /// Get the children.
    #[inline]
    pub fn children(&self) -> &[Node] {
        &self.children
    }

    /// Consumes the element and returns its children.
    pub fn into_children(self) -> Vec<Node> {
        self.children
    }

    /// Appends a child, splicing fragments.
    pub fn append(&mut self, child: Node) {
        push_child(&mut self.children, child);
    }

    /// Replaces all children at once.
    pub fn set_children(&mut self, children: Vec<Node>) {
        self.children = children;
    }

    /// Serializes the children as HTML.
    pub fn inner_html(&self) -> String {
        self.children.iter().map(Node::to_html).collect()
    }

    /// The concatenated text of all children.
    pub fn text_content(&self) -> String {
        self.children.iter().map(Node::text_content).collect()
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}", self.tag)?;
        for (name, value) in &self.attributes {
            write!(f, " {}=\"{}\"", name, escape_attribute(value))?;
        }
        write!(f, ">")?;
        for child in &self.children {
            write!(f, "{}", child)?;
        }
        write!(f, "</{}>", self.tag)
    }
}

/// Escapes the characters that are special in HTML text.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            c => out.push(c),
        }
    }
    out
}

/// Resolves the entities [escape] produces, plus `&quot;` and `&#39;`.
/// Other entities are kept as they are.
pub fn unescape(markup: &str) -> String {
    const ENTITIES: &[(&str, char)] = &[
        ("&amp;", '&'),
        ("&lt;", '<'),
        ("&gt;", '>'),
        ("&quot;", '"'),
        ("&#39;", '\''),
    ];
    let mut out = String::with_capacity(markup.len());
    let mut rest = markup;
    while let Some(i) = rest.find('&') {
        out.push_str(&rest[..i]);
        rest = &rest[i..];
        match ENTITIES.iter().find(|(e, _)| rest.starts_with(e)) {
            Some((entity, c)) => {
                out.push(*c);
                rest = &rest[entity.len()..];
            }
            None => {
                out.push('&');
                rest = &rest[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

fn escape_attribute(value: &str) -> String {
    escape(value).replace('"', "&quot;")
}
