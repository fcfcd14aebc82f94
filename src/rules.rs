//! Ready made rules for the string and the tree discipline.
//!
//! ```rust
//! use lexmap::{rules, TreeTranslator, SinkConfig};
//!
//! let mut calc = TreeTranslator::default();
//! calc.token_regex("num", r"\d+").unwrap();
//! calc.token_regex("op", r"[-+*/]").unwrap();
//! calc.convert("num", rules::element("i", false));
//! calc.convert("op", rules::element("b", false));
//!
//! let html = calc.translate("5 * 3", SinkConfig::default()).unwrap().to_html();
//! assert_eq!(html, "<i>5</i> <b>*</b> <i>3</i>");
//! ```
use crate::{tree, Element, Node, Token};

// Pins the closure signature to the one of a rule.
#[inline]
fn constrain<O, F: Fn(&Token<'_>) -> O>(f: F) -> F {
    f
}

/// The lexeme as string.
pub fn lexeme() -> impl Fn(&Token<'_>) -> String + Clone + Send + Sync + 'static {
    constrain(|token| token.text().to_string())
}

/// The lexeme as string with HTML special characters escaped.
pub fn escaped() -> impl Fn(&Token<'_>) -> String + Clone + Send + Sync + 'static {
    constrain(|token| tree::escape(token.text()))
}

/// Drops the token from a string translation.
pub fn skip() -> impl Fn(&Token<'_>) -> String + Clone + Send + Sync + 'static {
    constrain(|_| String::new())
}

/// Wraps the escaped lexeme in an HTML element with the given tag.
/// If `add_class` is true, the element gets the token type as class.
pub fn wrap(
    tag: &str,
    add_class: bool,
) -> impl Fn(&Token<'_>) -> String + Clone + Send + Sync + 'static {
    let tag = tag.to_string();
    constrain(move |token| {
        if add_class {
            format!(
                "<{tag} class=\"{}\">{}</{tag}>",
                tree::escape(token.token_type()),
                tree::escape(token.text())
            )
        } else {
            format!("<{tag}>{}</{tag}>", tree::escape(token.text()))
        }
    })
}

/// A text node with the lexeme.
pub fn text() -> impl Fn(&Token<'_>) -> Node + Clone + Send + Sync + 'static {
    constrain(|token| Node::text(token.text()))
}

/// Drops the token from a tree translation.
pub fn skip_node() -> impl Fn(&Token<'_>) -> Node + Clone + Send + Sync + 'static {
    constrain(|_| Node::fragment())
}

/// An element with the given tag around a text node with the lexeme.
/// If `add_class` is true, the element gets the token type as class.
pub fn element(
    tag: &str,
    add_class: bool,
) -> impl Fn(&Token<'_>) -> Node + Clone + Send + Sync + 'static {
    let tag = tag.to_string();
    constrain(move |token| {
        let mut element = Element::new(&tag).with_child(Node::text(token.text()));
        if add_class {
            element.add_class(token.token_type());
        }
        Node::Element(element)
    })
}
