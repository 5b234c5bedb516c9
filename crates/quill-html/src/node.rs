//! Ordered node container.

use std::fmt;

use crate::attrs::Attributes;
use crate::element::Element;
use crate::render::Renderer;
use crate::safe::SafeString;

/// One item of document content.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// Text, escaped on output unless marked safe.
    Text(SafeString),
    /// A nested element.
    Element(Element),
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Self::Element(element)
    }
}

impl From<SafeString> for Node {
    fn from(text: SafeString) -> Self {
        Self::Text(text)
    }
}

impl From<&str> for Node {
    fn from(text: &str) -> Self {
        Self::Text(text.into())
    }
}

impl From<String> for Node {
    fn from(text: String) -> Self {
        Self::Text(text.into())
    }
}

/// An ordered sequence of nodes: one level of document content.
///
/// Insertion order is render order.
///
/// # Example
///
/// ```
/// use quill_html::{Element, NodeTree};
///
/// let mut tree = NodeTree::new();
/// tree.push_comment("header").push(Element::with_content("h1", "Title", ())?);
///
/// assert_eq!(tree.len(), 2);
/// assert_eq!(tree.to_string(), "<!-- header -->\n\n<h1>\n  Title\n</h1>\n");
/// # Ok::<(), quill_html::HtmlError>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NodeTree {
    items: Vec<Node>,
}

impl NodeTree {
    /// Create an empty tree.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a node.
    pub fn push(&mut self, node: impl Into<Node>) -> &mut Self {
        self.items.push(node.into());
        self
    }

    /// Append a text node. Plain strings are escaped when rendered.
    pub fn push_text(&mut self, text: impl Into<SafeString>) -> &mut Self {
        self.push(Node::Text(text.into()))
    }

    /// Append an HTML comment followed by a newline.
    ///
    /// Single-line text renders as `<!-- text -->`, multi-line text as a
    /// block with the markers on their own lines.
    pub fn push_comment(&mut self, text: &str) -> &mut Self {
        self.push_text(comment_markup(text))
    }

    /// Number of top-level items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether there are no top-level items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Top-level items in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Node> {
        self.items.iter()
    }

    /// Render with the default options.
    ///
    /// `depth` is the indentation level; `in_block` says the output starts on
    /// its own line, so the first text item is indented.
    #[must_use]
    pub fn render(&self, depth: usize, in_block: bool) -> SafeString {
        Renderer::default().render_tree(self, depth, in_block)
    }
}

/// Markup for an HTML comment holding `text`.
pub(crate) fn comment_markup(text: &str) -> SafeString {
    if text.contains('\n') {
        SafeString::trusted(format!("<!--\n{text}\n-->\n"))
    } else {
        SafeString::trusted(format!("<!-- {text} -->\n"))
    }
}

impl fmt::Display for NodeTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.render(0, true).as_str())
    }
}

impl<'a> IntoIterator for &'a NodeTree {
    type Item = &'a Node;
    type IntoIter = std::slice::Iter<'a, Node>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl IntoIterator for NodeTree {
    type Item = Node;
    type IntoIter = std::vec::IntoIter<Node>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<N: Into<Node>> FromIterator<N> for NodeTree {
    fn from_iter<I: IntoIterator<Item = N>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl<N: Into<Node>> Extend<N> for NodeTree {
    fn extend<I: IntoIterator<Item = N>>(&mut self, iter: I) {
        self.items.extend(iter.into_iter().map(Into::into));
    }
}

/// Content given to an element at construction.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Content {
    /// No content.
    #[default]
    Empty,
    /// Text, escaped once into the child tree unless already safe.
    Text(SafeString),
    /// An element attached as the only child.
    Element(Element),
    /// A tree attached as the children, unescaped.
    Tree(NodeTree),
    /// An attribute mapping given in place of content.
    Attrs(Attributes),
}

impl From<()> for Content {
    fn from((): ()) -> Self {
        Self::Empty
    }
}

impl From<&str> for Content {
    fn from(text: &str) -> Self {
        Self::Text(text.into())
    }
}

impl From<String> for Content {
    fn from(text: String) -> Self {
        Self::Text(text.into())
    }
}

impl From<&String> for Content {
    fn from(text: &String) -> Self {
        Self::Text(text.into())
    }
}

impl From<SafeString> for Content {
    fn from(text: SafeString) -> Self {
        Self::Text(text)
    }
}

impl From<Element> for Content {
    fn from(element: Element) -> Self {
        Self::Element(element)
    }
}

impl From<NodeTree> for Content {
    fn from(tree: NodeTree) -> Self {
        Self::Tree(tree)
    }
}

impl From<Attributes> for Content {
    fn from(attrs: Attributes) -> Self {
        Self::Attrs(attrs)
    }
}

/// Value assigned as an element's children.
#[derive(Debug, Clone, PartialEq)]
pub enum Children {
    /// Becomes a single escaped text child.
    Text(SafeString),
    /// Attached directly.
    Tree(NodeTree),
    /// Appended one by one.
    Nodes(Vec<Node>),
}

impl From<&str> for Children {
    fn from(text: &str) -> Self {
        Self::Text(text.into())
    }
}

impl From<String> for Children {
    fn from(text: String) -> Self {
        Self::Text(text.into())
    }
}

impl From<SafeString> for Children {
    fn from(text: SafeString) -> Self {
        Self::Text(text)
    }
}

impl From<NodeTree> for Children {
    fn from(tree: NodeTree) -> Self {
        Self::Tree(tree)
    }
}

impl From<Vec<Node>> for Children {
    fn from(nodes: Vec<Node>) -> Self {
        Self::Nodes(nodes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_single_line_comment() {
        let mut tree = NodeTree::new();
        tree.push_comment("ok");
        assert_eq!(tree.to_string(), "<!-- ok -->\n");
    }

    #[test]
    fn test_multi_line_comment() {
        let mut tree = NodeTree::new();
        tree.push_comment("a\nb");
        assert_eq!(tree.to_string(), "<!--\na\nb\n-->\n");
    }

    #[test]
    fn test_comment_is_not_escaped() {
        let mut tree = NodeTree::new();
        tree.push_comment("x < y");
        assert_eq!(tree.to_string(), "<!-- x < y -->\n");
    }

    #[test]
    fn test_untrusted_text_escaped_on_render() {
        let mut tree = NodeTree::new();
        tree.push_text("<script>");
        assert_eq!(tree.to_string(), "&lt;script&gt;");
    }

    #[test]
    fn test_trusted_text_verbatim() {
        let mut tree = NodeTree::new();
        tree.push_text(SafeString::trusted("<hr>"));
        assert_eq!(tree.to_string(), "<hr>");
    }

    #[test]
    fn test_only_first_text_is_indented() {
        let mut tree = NodeTree::new();
        tree.push_text("one").push_text(" two").push_text(" three");
        assert_eq!(tree.render(2, true), "    one two three");
    }

    #[test]
    fn test_text_not_indented_outside_block() {
        let mut tree = NodeTree::new();
        tree.push_text("one");
        assert_eq!(tree.render(2, false), "one");
    }

    #[test]
    fn test_len_counts_top_level_only() {
        let mut inner = Element::new("ul").unwrap();
        inner
            .children_mut()
            .push(Element::new("li").unwrap())
            .push(Element::new("li").unwrap());
        let mut tree = NodeTree::new();
        tree.push(inner).push_text("after");

        assert_eq!(tree.len(), 2);
        assert!(!tree.is_empty());
        assert!(NodeTree::new().is_empty());
    }

    #[test]
    fn test_iteration_order() {
        let tree: NodeTree = ["a", "b", "c"].into_iter().collect();
        let texts: Vec<&str> = tree
            .iter()
            .filter_map(|node| match node {
                Node::Text(text) => Some(text.as_str()),
                Node::Element(_) => None,
            })
            .collect();
        assert_eq!(texts, ["a", "b", "c"]);
    }

    #[test]
    fn test_render_is_repeatable() {
        let mut tree = NodeTree::new();
        tree.push(Element::with_content("p", "a & b", ()).unwrap());
        assert_eq!(tree.to_string(), tree.to_string());
    }
}
