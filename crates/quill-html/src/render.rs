//! Indenting serializer for node trees and elements.
//!
//! Layout rules:
//! - Block elements start on a fresh line, indented one unit per depth level,
//!   and end with a newline.
//! - Inline elements are emitted in place with no surrounding newlines.
//! - Children of a block element render one level deeper, in block mode.
//! - Within a tree, only the first text item in block mode is indented.
//!
//! Untrusted text is escaped as it is appended to the output buffer; trusted
//! text and comments are written verbatim.

use quill_config::RenderConfig;

use crate::attrs::{AttrValue, Attributes};
use crate::element::Element;
use crate::node::{Node, NodeTree};
use crate::safe::SafeString;
use crate::tags::is_always_quoted;

/// Layout options for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// String emitted once per depth level.
    pub indent: String,
}

impl RenderOptions {
    /// Options with a custom indentation unit.
    #[must_use]
    pub fn with_indent(indent: impl Into<String>) -> Self {
        Self {
            indent: indent.into(),
        }
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self::with_indent("  ")
    }
}

impl From<&RenderConfig> for RenderOptions {
    fn from(config: &RenderConfig) -> Self {
        Self::with_indent(config.indent_unit())
    }
}

/// Serializes trees and elements to HTML.
///
/// # Example
///
/// ```
/// use quill_html::{Element, RenderOptions, Renderer};
///
/// let mut list = Element::new("ul")?;
/// list.children_mut().push(Element::with_content("li", "one", ())?);
///
/// let renderer = Renderer::new(RenderOptions::with_indent("\t"));
/// assert_eq!(renderer.render_element(&list, 0, true), "<ul>\n\t<li>one</li>\n</ul>\n");
/// # Ok::<(), quill_html::HtmlError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct Renderer {
    options: RenderOptions,
}

impl Renderer {
    /// Create a renderer with the given options.
    #[must_use]
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    /// Render a tree at `depth`. With `in_block` set, the first text item is
    /// indented.
    #[must_use]
    pub fn render_tree(&self, tree: &NodeTree, depth: usize, in_block: bool) -> SafeString {
        let mut out = SafeString::new();
        self.write_tree(&mut out, tree, depth, in_block);
        out
    }

    /// Render an element at `depth`. Without `in_block`, a block element is
    /// preceded by a newline.
    #[must_use]
    pub fn render_element(&self, element: &Element, depth: usize, in_block: bool) -> SafeString {
        let mut out = SafeString::new();
        self.write_element(&mut out, element, depth, in_block);
        out
    }

    fn write_tree(&self, out: &mut SafeString, tree: &NodeTree, depth: usize, mut in_block: bool) {
        for node in tree {
            match node {
                Node::Text(text) => {
                    if in_block {
                        in_block = false;
                        self.write_indent(out, depth);
                    }
                    out.push(text);
                }
                Node::Element(element) => self.write_element(out, element, depth, in_block),
            }
        }
    }

    fn write_element(&self, out: &mut SafeString, element: &Element, depth: usize, in_block: bool) {
        let inline = element.is_inline();
        let tag = element.tag();

        if !in_block && !inline {
            out.push_markup("\n");
        }
        if in_block || !inline {
            self.write_indent(out, depth);
        }

        out.push_markup("<");
        out.push_markup(tag);
        write_attrs(out, element.attrs());
        out.push_markup(">");

        let has_children = !element.children().is_empty();
        if has_children {
            if !inline {
                out.push_markup("\n");
            }
            self.write_tree(out, element.children(), depth + 1, !inline);
            if !inline {
                if !out.ends_with("\n") {
                    out.push_markup("\n");
                }
                self.write_indent(out, depth);
            }
        }

        if element.force_close() || has_children {
            out.push_markup("</");
            out.push_markup(tag);
            out.push_markup(">");
        }
        if !inline {
            out.push_markup("\n");
        }
    }

    fn write_indent(&self, out: &mut SafeString, depth: usize) {
        for _ in 0..depth {
            out.push_markup(&self.options.indent);
        }
    }
}

fn write_attrs(out: &mut SafeString, attrs: &Attributes) {
    for (key, value) in attrs.iter() {
        if value.is_omitted() {
            continue;
        }
        out.push_markup(" ");
        out.push_markup(key);
        if value.is_blank() && !is_always_quoted(key) {
            continue;
        }
        out.push_markup("=\"");
        if let AttrValue::Text(text) = value {
            out.push(text);
        }
        out.push_markup("\"");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use quill_config::{Config, IndentStyle};

    fn element(tag: &str, content: &str) -> Element {
        Element::with_content(tag, content, ()).unwrap()
    }

    fn list() -> Element {
        let mut ul = Element::new("ul").unwrap();
        ul.children_mut()
            .push(element("li", "one"))
            .push(element("li", "two"));
        ul
    }

    #[test]
    fn test_block_element_not_in_block_leads_with_newline() {
        let div = element("div", "indent!");
        assert_eq!(
            Renderer::default().render_element(&div, 0, false),
            "\n<div>\n  indent!\n</div>\n"
        );
    }

    #[test]
    fn test_block_element_in_block() {
        let div = element("div", "indent!");
        assert_eq!(
            Renderer::default().render_element(&div, 0, true),
            "<div>\n  indent!\n</div>\n"
        );
    }

    #[test]
    fn test_inline_children_of_block() {
        assert_eq!(
            Renderer::default().render_element(&list(), 0, true),
            "<ul>\n  <li>one</li>  <li>two</li>\n</ul>\n"
        );
    }

    #[test]
    fn test_nested_blocks_indent_per_level() {
        let mut outer = Element::new("section").unwrap();
        let mut inner = Element::new("div").unwrap();
        inner.children_mut().push(Element::new("p").unwrap());
        outer.children_mut().push(inner);

        assert_eq!(
            Renderer::default().render_element(&outer, 0, true),
            "<section>\n  <div>\n    <p></p>\n  </div>\n</section>\n"
        );
    }

    #[test]
    fn test_inline_not_in_block_is_not_indented() {
        let span = element("span", "x");
        assert_eq!(Renderer::default().render_element(&span, 3, false), "<span>x</span>");
        assert_eq!(Renderer::default().render_element(&span, 1, true), "  <span>x</span>");
    }

    #[test]
    fn test_custom_indent() {
        let renderer = Renderer::new(RenderOptions::with_indent("    "));
        let div = element("div", "x");
        assert_eq!(renderer.render_element(&div, 1, true), "    <div>\n        x\n    </div>\n");
    }

    #[test]
    fn test_zero_width_indent() {
        let renderer = Renderer::new(RenderOptions::with_indent(""));
        assert_eq!(
            renderer.render_element(&list(), 0, true),
            "<ul>\n<li>one</li><li>two</li>\n</ul>\n"
        );
    }

    #[test]
    fn test_options_from_config() {
        let config =
            Config::from_toml("[render]\nindent_width = 1\nindent_style = \"tabs\"\n").unwrap();
        assert_eq!(config.render.indent_style, IndentStyle::Tabs);

        let options = RenderOptions::from(&config.render);
        assert_eq!(options.indent, "\t");
    }

    #[test]
    fn test_attribute_rules() {
        let attrs = Attributes::new()
            .with("type", "checkbox")
            .with("name", None::<&str>)
            .with("disabled", "")
            .with("value", "")
            .with("checked", true)
            .with("readonly", false)
            .with("title", "\"quoted\"");
        let input = Element::with_content("input", (), attrs).unwrap();

        assert_eq!(
            Renderer::default().render_element(&input, 0, false),
            r#"<input type="checkbox" disabled value="" checked title="&quot;quoted&quot;">"#
        );
    }

    #[test]
    fn test_whitespace_value_on_always_quoted_key() {
        let attrs = [("alt", "  "), ("class", "  ")];
        let img = Element::with_content("img", (), attrs).unwrap();
        assert_eq!(Renderer::default().render_element(&img, 0, false), r#"<img alt="  " class>"#);
    }

    #[test]
    fn test_trusted_attribute_verbatim() {
        let mut a = Element::new("a").unwrap();
        a.set_attr("href", SafeString::trusted("/?a=1&b=2")).unwrap();
        assert_eq!(
            Renderer::default().render_element(&a, 0, false),
            r#"<a href="/?a=1&b=2"></a>"#
        );
    }

    #[test]
    fn test_flag_on_always_quoted_key() {
        let mut img = Element::new("img").unwrap();
        img.set_attr("alt", true).unwrap();
        assert_eq!(Renderer::default().render_element(&img, 0, false), r#"<img alt="">"#);
    }

    #[test]
    fn test_render_is_pure() {
        let renderer = Renderer::default();
        let ul = list();
        assert_eq!(renderer.render_element(&ul, 0, true), renderer.render_element(&ul, 0, true));
    }
}
