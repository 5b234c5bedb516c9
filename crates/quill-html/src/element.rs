//! A single tag with attributes and owned children.

use std::fmt;

use crate::attrs::{AttrValue, Attributes};
use crate::error::HtmlError;
use crate::escape::escape_once;
use crate::node::{Children, Content, NodeTree};
use crate::render::Renderer;
use crate::safe::SafeString;
use crate::tags::{is_attr_name, is_inline, is_markup_attr, is_markup_tag, is_void};

/// One HTML element.
///
/// The void and inline categories are derived from the tag when the element
/// is created. A void element gets no closing tag unless closing is forced or
/// it has children.
///
/// Tag names and attribute keys are checked when they enter the element, so
/// only names that are safe to write into markup are ever rendered.
///
/// # Example
///
/// ```
/// use quill_html::Element;
///
/// let mut span = Element::new("span")?;
/// span.set_attr("id", "title-text")?;
/// span.set_attr("style", "color: #f00;")?;
/// span.set_children("some text");
///
/// assert_eq!(
///     span.to_string(),
///     r#"<span id="title-text" style="color: #f00;">some text</span>"#
/// );
/// # Ok::<(), quill_html::HtmlError>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    tag: String,
    attrs: Attributes,
    children: NodeTree,
    is_void: bool,
    is_inline: bool,
    force_close: bool,
}

impl Element {
    /// Create an element with no attributes or children.
    ///
    /// # Errors
    ///
    /// Returns [`HtmlError::UnknownMember`] if `tag` is not a valid element
    /// name. Custom element names such as `my-widget` are accepted.
    pub fn new(tag: &str) -> Result<Self, HtmlError> {
        if !is_markup_tag(tag) {
            return Err(HtmlError::unknown_member(tag));
        }
        let tag = tag.to_lowercase();
        let is_void = is_void(&tag);
        Ok(Self {
            is_inline: is_inline(&tag),
            is_void,
            force_close: !is_void,
            tag,
            attrs: Attributes::new(),
            children: NodeTree::new(),
        })
    }

    /// Create an element with content and attributes.
    ///
    /// Text content is escaped once into the children unless already safe.
    /// Element or tree content is attached as is. An attribute mapping given
    /// as content is merged ahead of `attrs`.
    ///
    /// # Errors
    ///
    /// Returns [`HtmlError::UnknownMember`] if `tag` is not a valid element
    /// name or an attribute key cannot be written into markup.
    pub fn with_content(
        tag: &str,
        content: impl Into<Content>,
        attrs: impl Into<Attributes>,
    ) -> Result<Self, HtmlError> {
        let mut element = Self::new(tag)?;
        match content.into() {
            Content::Empty => {}
            Content::Text(text) => {
                element.children.push_text(escape_once(text));
            }
            Content::Element(child) => {
                element.children.push(child);
            }
            Content::Tree(tree) => element.children = tree,
            Content::Attrs(content_attrs) => element.insert_attrs(content_attrs)?,
        }
        element.insert_attrs(attrs.into())?;
        Ok(element)
    }

    /// Construct an element, let `customize` adjust it, and render it.
    ///
    /// # Example
    ///
    /// ```
    /// use quill_html::Element;
    ///
    /// let html = Element::build("a", "Home", [("href", "/")], |a| {
    ///     a.set_attr("class", "nav")?;
    ///     Ok(())
    /// })?;
    /// assert_eq!(html, r#"<a href="/" class="nav">Home</a>"#);
    /// # Ok::<(), quill_html::HtmlError>(())
    /// ```
    pub fn build<F>(
        tag: &str,
        content: impl Into<Content>,
        attrs: impl Into<Attributes>,
        customize: F,
    ) -> Result<SafeString, HtmlError>
    where
        F: FnOnce(&mut Self) -> Result<(), HtmlError>,
    {
        let mut element = Self::with_content(tag, content, attrs)?;
        customize(&mut element)?;
        Ok(element.render(0, false).mark_safe())
    }

    /// Lowercased tag name.
    #[must_use]
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Whether the tag is a void element.
    #[must_use]
    pub fn is_void(&self) -> bool {
        self.is_void
    }

    /// Whether the element renders inline.
    #[must_use]
    pub fn is_inline(&self) -> bool {
        self.is_inline
    }

    /// Whether a closing tag is emitted even without children.
    #[must_use]
    pub fn force_close(&self) -> bool {
        self.force_close
    }

    /// Always emit a closing tag.
    pub fn set_force_close(&mut self) -> &mut Self {
        self.force_close = true;
        self
    }

    /// Render inline regardless of the tag category.
    pub fn set_inline(&mut self) -> &mut Self {
        self.is_inline = true;
        self
    }

    /// Attributes in insertion order.
    #[must_use]
    pub fn attrs(&self) -> &Attributes {
        &self.attrs
    }

    /// Value of an attribute.
    ///
    /// # Errors
    ///
    /// Returns [`HtmlError::UnknownMember`] if `key` is not a valid
    /// attribute name.
    pub fn attr(&self, key: &str) -> Result<Option<&AttrValue>, HtmlError> {
        let key = attr_key(key)?;
        Ok(self.attrs.get(&key))
    }

    /// Set an attribute, returning the previous value.
    ///
    /// # Errors
    ///
    /// Returns [`HtmlError::UnknownMember`] if `key` is not a valid
    /// attribute name.
    pub fn set_attr(
        &mut self,
        key: &str,
        value: impl Into<AttrValue>,
    ) -> Result<Option<AttrValue>, HtmlError> {
        let key = attr_key(key)?;
        Ok(self.attrs.insert(key, value))
    }

    /// Set an attribute under any key valid in markup, such as `data-id` or
    /// `aria-label`, returning the previous value. The key is kept as given.
    ///
    /// # Errors
    ///
    /// Returns [`HtmlError::UnknownMember`] if `key` cannot be written into
    /// markup.
    pub fn insert_attr(
        &mut self,
        key: &str,
        value: impl Into<AttrValue>,
    ) -> Result<Option<AttrValue>, HtmlError> {
        if !is_markup_attr(key) {
            return Err(HtmlError::unknown_member(key));
        }
        Ok(self.attrs.insert(key, value))
    }

    /// Remove an attribute, returning its value.
    pub fn remove_attr(&mut self, key: &str) -> Option<AttrValue> {
        self.attrs.remove(key)
    }

    fn insert_attrs(&mut self, attrs: Attributes) -> Result<(), HtmlError> {
        for (key, value) in attrs {
            self.insert_attr(&key, value)?;
        }
        Ok(())
    }

    /// Child tree.
    #[must_use]
    pub fn children(&self) -> &NodeTree {
        &self.children
    }

    /// Mutable child tree.
    pub fn children_mut(&mut self) -> &mut NodeTree {
        &mut self.children
    }

    /// Replace the children.
    ///
    /// Text becomes a single escaped text child, a tree is attached as is, and
    /// a node list is appended in order to a fresh tree.
    pub fn set_children(&mut self, children: impl Into<Children>) -> &mut Self {
        self.children = match children.into() {
            Children::Text(text) => {
                let mut tree = NodeTree::new();
                tree.push_text(escape_once(text));
                tree
            }
            Children::Tree(tree) => tree,
            Children::Nodes(nodes) => nodes.into_iter().collect(),
        };
        self
    }

    /// Rendered children, as they appear inside this element at the top level.
    #[must_use]
    pub fn inner_html(&self) -> SafeString {
        self.children.render(0, true).mark_safe()
    }

    /// Render with the default options.
    ///
    /// `depth` is the indentation level; without `in_block` a block element is
    /// preceded by a newline.
    #[must_use]
    pub fn render(&self, depth: usize, in_block: bool) -> SafeString {
        Renderer::default().render_element(self, depth, in_block)
    }
}

/// Validated, lowercased attribute key.
fn attr_key(key: &str) -> Result<String, HtmlError> {
    if !is_attr_name(key) {
        return Err(HtmlError::unknown_member(key));
    }
    Ok(key.to_lowercase())
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.render(0, false).as_str())
    }
}

impl From<&Element> for AttrValue {
    fn from(element: &Element) -> Self {
        Self::Text(SafeString::untrusted(element.to_string()))
    }
}

impl From<Element> for AttrValue {
    fn from(element: Element) -> Self {
        Self::from(&element)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::Node;
    use pretty_assertions::assert_eq;

    fn element(tag: &str, content: impl Into<Content>) -> Element {
        Element::with_content(tag, content, ()).unwrap()
    }

    #[test]
    fn test_empty_element() {
        assert_eq!(Element::new("b").unwrap().to_string(), "<b></b>");
    }

    #[test]
    fn test_void_element() {
        let img = Element::new("img").unwrap();
        assert!(img.is_void());
        assert!(!img.force_close());
        assert_eq!(img.to_string(), "<img>");
    }

    #[test]
    fn test_tag_lowercased() {
        let el = Element::new("SPAN").unwrap();
        assert_eq!(el.tag(), "span");
        assert!(el.is_inline());
    }

    #[test]
    fn test_custom_element_tag() {
        let el = Element::new("my-widget").unwrap();
        assert_eq!(el.render(0, true), "<my-widget></my-widget>\n");
    }

    #[test]
    fn test_invalid_tag_rejected() {
        for tag in ["", "div><script", "a b", "1div", "-x"] {
            let err = Element::new(tag).unwrap_err();
            assert!(matches!(err, HtmlError::UnknownMember { ref member } if member == tag));
        }
        assert!(Element::with_content("p/", "x", ()).is_err());
    }

    #[test]
    fn test_attributes() {
        let el = Element::with_content("span", (), [("id", "bob")]).unwrap();
        assert_eq!(el.to_string(), r#"<span id="bob"></span>"#);
    }

    #[test]
    fn test_markup_breaking_attr_key_rejected() {
        let key = "x\"><script>alert(1)</script><i a";
        let err = Element::with_content("div", (), [(key, "1")]).unwrap_err();
        assert!(matches!(err, HtmlError::UnknownMember { ref member } if member == key));

        let content = Attributes::from([("on load", "x")]);
        assert!(Element::with_content("div", content, ()).is_err());

        let mut el = Element::new("div").unwrap();
        assert!(el.insert_attr("a=b", "1").is_err());
        assert!(el.insert_attr("", "1").is_err());
        assert!(el.attrs().is_empty());
    }

    #[test]
    fn test_content_escaped() {
        let el = element("span", "<b> & friends");
        assert_eq!(el.to_string(), "<span>&lt;b&gt; &amp; friends</span>");
    }

    #[test]
    fn test_safe_content_not_escaped() {
        let el = element("span", SafeString::trusted("<b>bold</b>"));
        assert_eq!(el.to_string(), "<span><b>bold</b></span>");
    }

    #[test]
    fn test_existing_entities_kept() {
        let el = element("span", "fish &amp; chips");
        assert_eq!(el.to_string(), "<span>fish &amp; chips</span>");
    }

    #[test]
    fn test_indenting() {
        let el = element("div", "indent!");
        assert_eq!(el.to_string(), "\n<div>\n  indent!\n</div>\n");
    }

    #[test]
    fn test_block_mode() {
        let el = element("div", "indent!");
        assert_eq!(el.render(0, true), "<div>\n  indent!\n</div>\n");
    }

    #[test]
    fn test_setters() {
        let mut el = Element::new("span").unwrap();
        el.set_attr("class", "dynamic frenetic").unwrap();
        assert_eq!(el.to_string(), r#"<span class="dynamic frenetic"></span>"#);
        assert_eq!(
            el.attr("class").unwrap(),
            Some(&AttrValue::from("dynamic frenetic"))
        );
    }

    #[test]
    fn test_attr_key_case_insensitive() {
        let mut el = Element::new("div").unwrap();
        el.set_attr("ID", "main").unwrap();
        assert_eq!(el.attr("id").unwrap(), Some(&AttrValue::from("main")));
        assert_eq!(el.attr("Id").unwrap(), Some(&AttrValue::from("main")));
    }

    #[test]
    fn test_invalid_attr_key() {
        let mut el = Element::new("div").unwrap();
        let err = el.set_attr("data-id", "1").unwrap_err();
        assert!(matches!(err, HtmlError::UnknownMember { ref member } if member == "data-id"));

        el.insert_attr("data-id", "1").unwrap();
        assert_eq!(el.to_string(), "\n<div data-id=\"1\"></div>\n");
    }

    #[test]
    fn test_insert_and_remove_attr() {
        let mut el = Element::new("button").unwrap();
        assert_eq!(el.insert_attr("aria-label", "Close").unwrap(), None);
        assert_eq!(
            el.insert_attr("aria-label", "Dismiss").unwrap(),
            Some(AttrValue::from("Close"))
        );
        assert_eq!(el.to_string(), r#"<button aria-label="Dismiss"></button>"#);

        assert_eq!(el.remove_attr("aria-label"), Some(AttrValue::from("Dismiss")));
        assert_eq!(el.remove_attr("aria-label"), None);
        assert_eq!(el.to_string(), "<button></button>");
    }

    #[test]
    fn test_inner_html_assignment() {
        let mut el = Element::new("span").unwrap();
        el.set_children("<i>text</i>");
        assert_eq!(el.to_string(), "<span>&lt;i&gt;text&lt;/i&gt;</span>");
    }

    #[test]
    fn test_children_from_nodes() {
        let mut el = Element::new("p").unwrap();
        el.set_children(vec![Node::from("a"), Node::from(element("em", "b"))]);
        assert_eq!(el.to_string(), "\n<p>\n  a<em>b</em>\n</p>\n");
    }

    #[test]
    fn test_children_from_tree() {
        let mut tree = NodeTree::new();
        tree.push(Element::new("br").unwrap());
        let mut el = Element::new("div").unwrap();
        el.set_children(tree);
        assert_eq!(el.render(0, true), "<div>\n  <br>\n</div>\n");
    }

    #[test]
    fn test_void_in_both_modes() {
        let br = Element::new("br").unwrap();
        assert_eq!(br.render(0, false), "\n<br>\n");
        assert_eq!(br.render(0, true), "<br>\n");
    }

    #[test]
    fn test_empty_block_not_in_block() {
        assert_eq!(Element::new("div").unwrap().render(0, false), "\n<div></div>\n");
    }

    #[test]
    fn test_inline_void_in_block() {
        assert_eq!(Element::new("img").unwrap().render(0, true), "<img>");
    }

    #[test]
    fn test_void_with_children_is_closed() {
        let mut el = Element::new("img").unwrap();
        el.children_mut().push_text("x");
        assert_eq!(el.to_string(), "<img>x</img>");
    }

    #[test]
    fn test_force_close() {
        let mut el = Element::new("br").unwrap();
        el.set_force_close();
        assert_eq!(el.render(0, true), "<br></br>\n");
    }

    #[test]
    fn test_set_inline() {
        let mut el = element("div", "x");
        el.set_inline();
        assert_eq!(el.to_string(), "<div>x</div>");
    }

    #[test]
    fn test_blank_attr_rules() {
        let mut input = Element::new("input").unwrap();
        input.set_attr("value", "").unwrap();
        input.set_attr("disabled", "").unwrap();
        assert_eq!(input.to_string(), r#"<input value="" disabled>"#);
    }

    #[test]
    fn test_attrs_as_content() {
        let content = Attributes::from([("href", "/x")]);
        let el = Element::with_content("a", content, [("class", "y")]).unwrap();
        assert_eq!(el.to_string(), r#"<a href="/x" class="y"></a>"#);
        assert!(el.children().is_empty());
    }

    #[test]
    fn test_element_as_content() {
        let el = element("span", element("em", "hi"));
        assert_eq!(el.to_string(), "<span><em>hi</em></span>");
    }

    #[test]
    fn test_element_as_attribute_value() {
        let mut el = Element::new("div").unwrap();
        el.set_attr("title", &element("b", "x")).unwrap();
        assert_eq!(el.render(0, true), "<div title=\"&lt;b&gt;x&lt;/b&gt;\"></div>\n");
    }

    #[test]
    fn test_inner_html() {
        let inner = element("p", "a & b").inner_html();
        assert_eq!(inner, "a &amp; b");
        assert!(inner.is_safe());
    }

    #[test]
    fn test_build() {
        let html = Element::build("span", "some text", [("id", "title-text")], |span| {
            span.set_attr("style", "color: #f00;")?;
            Ok(())
        })
        .unwrap();
        assert_eq!(html, r#"<span id="title-text" style="color: #f00;">some text</span>"#);
        assert!(html.is_safe());
    }

    #[test]
    fn test_build_propagates_error() {
        let result = Element::build("span", (), (), |span| {
            span.set_attr("not valid", "x")?;
            Ok(())
        });
        assert!(matches!(result, Err(HtmlError::UnknownMember { .. })));

        let result = Element::build("span", (), [("a b", "x")], |_| Ok(()));
        assert!(matches!(result, Err(HtmlError::UnknownMember { .. })));
    }
}
