//! Fluent document builder with scoped nesting.
//!
//! A [`Builder`] keeps the top-level tree plus a stack of open elements.
//! While an element is open, every node pushed goes into it instead of the
//! top level. Elements are opened for the duration of a callback through a
//! [`Scope`], which closes the element when dropped, so the stack is
//! balanced on every exit path: normal return, error return, or unwinding.

use std::fmt;
use std::ops::{Deref, DerefMut};

use crate::attrs::Attributes;
use crate::element::Element;
use crate::error::HtmlError;
use crate::node::{Content, Node, NodeTree, comment_markup};
use crate::render::{RenderOptions, Renderer};
use crate::safe::SafeString;
use crate::tags::is_tag_name;

/// Builds a [`NodeTree`] through chained calls.
///
/// # Example
///
/// ```
/// use quill_html::Builder;
///
/// let mut html = Builder::new();
/// html.div_with((), [("id", "some-div")], |div| {
///     div.em("HTML is neat!", ())?;
///     Ok(())
/// })?;
///
/// assert_eq!(
///     html.render(),
///     "<div id=\"some-div\">\n  <em>HTML is neat!</em>\n</div>\n"
/// );
/// # Ok::<(), quill_html::HtmlError>(())
/// ```
#[derive(Debug, Default)]
pub struct Builder {
    root: NodeTree,
    open: Vec<Element>,
    renderer: Renderer,
}

impl Builder {
    /// Create an empty builder with the default render options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty builder with custom render options.
    #[must_use]
    pub fn with_options(options: RenderOptions) -> Self {
        Self {
            renderer: Renderer::new(options),
            ..Self::default()
        }
    }

    /// Create a builder and fill it with `f`.
    ///
    /// # Errors
    ///
    /// Returns the first error raised by `f`.
    pub fn with<F>(f: F) -> Result<Self, HtmlError>
    where
        F: FnOnce(&mut Self) -> Result<(), HtmlError>,
    {
        let mut builder = Self::new();
        f(&mut builder)?;
        Ok(builder)
    }

    /// Append a node to the innermost open element, or the top level.
    pub fn push(&mut self, node: impl Into<Node>) -> &mut Self {
        match self.open.last_mut() {
            Some(parent) => {
                parent.children_mut().push(node);
            }
            None => {
                self.root.push(node);
            }
        }
        self
    }

    /// Append text. Plain strings are escaped when rendered.
    pub fn push_text(&mut self, text: impl Into<SafeString>) -> &mut Self {
        self.push(Node::Text(text.into()))
    }

    /// Append an HTML comment.
    pub fn push_comment(&mut self, text: &str) -> &mut Self {
        self.push(Node::Text(comment_markup(text)))
    }

    /// Append a `<name>` element.
    ///
    /// # Errors
    ///
    /// Returns [`HtmlError::UnknownMember`] if `name` is not a valid tag name.
    pub fn tag(
        &mut self,
        name: &str,
        content: impl Into<Content>,
        attrs: impl Into<Attributes>,
    ) -> Result<&mut Self, HtmlError> {
        let element = new_element(name, content, attrs)?;
        Ok(self.push(element))
    }

    /// Append a `<name>` element and fill it with `f`.
    ///
    /// Nodes pushed inside `f` go into the new element. The element is closed
    /// and attached when `f` returns, whether or not it succeeded.
    ///
    /// # Errors
    ///
    /// Returns [`HtmlError::UnknownMember`] if `name` is not a valid tag name,
    /// or the error returned by `f`.
    pub fn tag_with<F>(
        &mut self,
        name: &str,
        content: impl Into<Content>,
        attrs: impl Into<Attributes>,
        f: F,
    ) -> Result<&mut Self, HtmlError>
    where
        F: FnOnce(&mut Scope<'_>) -> Result<(), HtmlError>,
    {
        let element = new_element(name, content, attrs)?;
        self.open_scope(element, f)
    }

    pub(crate) fn open_scope<F>(
        &mut self,
        element: Element,
        f: F,
    ) -> Result<&mut Self, HtmlError>
    where
        F: FnOnce(&mut Scope<'_>) -> Result<(), HtmlError>,
    {
        self.open.push(element);
        let depth = self.open.len();
        let result = {
            let mut scope = Scope {
                builder: &mut *self,
                depth,
            };
            f(&mut scope)
        };
        if let Err(err) = &result {
            tracing::debug!(depth, error = %err, "Closed element after failed callback");
        }
        result?;
        Ok(self)
    }

    /// Pop the innermost open element and attach it to its parent.
    fn close(&mut self) {
        if let Some(element) = self.open.pop() {
            self.push(element);
        }
    }

    /// Number of top-level items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.root.len()
    }

    /// Whether nothing has been added at the top level.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.root.is_empty()
    }

    /// Top-level items in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Node> {
        self.root.iter()
    }

    /// Number of currently open elements.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.open.len()
    }

    /// Take the built tree.
    #[must_use]
    pub fn into_tree(self) -> NodeTree {
        self.root
    }

    /// Render the top-level tree.
    #[must_use]
    pub fn render(&self) -> SafeString {
        self.renderer.render_tree(&self.root, 0, true).mark_safe()
    }
}

fn new_element(
    name: &str,
    content: impl Into<Content>,
    attrs: impl Into<Attributes>,
) -> Result<Element, HtmlError> {
    if !is_tag_name(name) {
        return Err(HtmlError::unknown_member(name));
    }
    Element::with_content(name, content, attrs)
}

impl fmt::Display for Builder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.render().as_str())
    }
}

impl<'a> IntoIterator for &'a Builder {
    type Item = &'a Node;
    type IntoIter = std::slice::Iter<'a, Node>;

    fn into_iter(self) -> Self::IntoIter {
        self.root.iter()
    }
}

/// Access to the builder while an element is open.
///
/// Dereferences to the [`Builder`]; nodes pushed through it go into the open
/// element. Dropping the scope closes the element.
#[derive(Debug)]
pub struct Scope<'a> {
    builder: &'a mut Builder,
    depth: usize,
}

impl Scope<'_> {
    /// The element this scope keeps open.
    #[must_use]
    pub fn element(&self) -> &Element {
        &self.builder.open[self.depth - 1]
    }

    /// The element this scope keeps open, for setting attributes.
    pub fn element_mut(&mut self) -> &mut Element {
        &mut self.builder.open[self.depth - 1]
    }
}

impl Deref for Scope<'_> {
    type Target = Builder;

    fn deref(&self) -> &Builder {
        &*self.builder
    }
}

impl DerefMut for Scope<'_> {
    fn deref_mut(&mut self) -> &mut Builder {
        &mut *self.builder
    }
}

impl Drop for Scope<'_> {
    fn drop(&mut self) {
        while self.builder.open.len() >= self.depth {
            self.builder.close();
        }
    }
}

macro_rules! container_tags {
    ($($name:ident, $name_with:ident;)*) => {
        impl Builder {
            $(
                #[doc = concat!("Append a `<", stringify!($name), ">` element.")]
                ///
                /// # Errors
                ///
                /// Returns [`HtmlError::UnknownMember`] if an attribute key
                /// cannot be written into markup.
                pub fn $name(
                    &mut self,
                    content: impl Into<Content>,
                    attrs: impl Into<Attributes>,
                ) -> Result<&mut Self, HtmlError> {
                    let element = Element::with_content(stringify!($name), content, attrs)?;
                    Ok(self.push(element))
                }

                #[doc = concat!(
                    "Append a `<", stringify!($name), ">` element and fill it with `f`."
                )]
                ///
                /// # Errors
                ///
                /// Returns [`HtmlError::UnknownMember`] if an attribute key
                /// cannot be written into markup, or the error returned by `f`.
                pub fn $name_with<F>(
                    &mut self,
                    content: impl Into<Content>,
                    attrs: impl Into<Attributes>,
                    f: F,
                ) -> Result<&mut Self, HtmlError>
                where
                    F: FnOnce(&mut Scope<'_>) -> Result<(), HtmlError>,
                {
                    let element = Element::with_content(stringify!($name), content, attrs)?;
                    self.open_scope(element, f)
                }
            )*
        }
    };
}

container_tags! {
    a, a_with;
    b, b_with;
    button, button_with;
    code, code_with;
    div, div_with;
    em, em_with;
    footer, footer_with;
    form, form_with;
    h1, h1_with;
    h2, h2_with;
    h3, h3_with;
    header, header_with;
    i, i_with;
    label, label_with;
    li, li_with;
    nav, nav_with;
    ol, ol_with;
    p, p_with;
    pre, pre_with;
    section, section_with;
    span, span_with;
    strong, strong_with;
    table, table_with;
    td, td_with;
    th, th_with;
    tr, tr_with;
    ul, ul_with;
}

macro_rules! void_tags {
    ($($name:ident),*) => {
        impl Builder {
            $(
                #[doc = concat!("Append a `<", stringify!($name), ">` element.")]
                ///
                /// # Errors
                ///
                /// Returns [`HtmlError::UnknownMember`] if an attribute key
                /// cannot be written into markup.
                pub fn $name(
                    &mut self,
                    attrs: impl Into<Attributes>,
                ) -> Result<&mut Self, HtmlError> {
                    let element = Element::with_content(stringify!($name), (), attrs)?;
                    Ok(self.push(element))
                }
            )*
        }
    };
}

void_tags!(br, hr, img, input, link, meta);

/// Build a document with the default render options.
///
/// Runs `f` on a fresh builder and renders the result, marked safe.
///
/// # Errors
///
/// Returns the first error raised while building. No output is produced for
/// a failed build.
///
/// # Example
///
/// ```
/// let html = quill_html::build(|html| {
///     html.push_comment("Important stuff");
///     html.h1("Da header", ())?;
///     Ok(())
/// })?;
///
/// assert_eq!(html, "<!-- Important stuff -->\n\n<h1>\n  Da header\n</h1>\n");
/// # Ok::<(), quill_html::HtmlError>(())
/// ```
pub fn build<F>(f: F) -> Result<SafeString, HtmlError>
where
    F: FnOnce(&mut Builder) -> Result<(), HtmlError>,
{
    build_with(RenderOptions::default(), f)
}

/// Build a document with custom render options.
///
/// # Errors
///
/// Returns the first error raised while building.
pub fn build_with<F>(options: RenderOptions, f: F) -> Result<SafeString, HtmlError>
where
    F: FnOnce(&mut Builder) -> Result<(), HtmlError>,
{
    let mut builder = Builder::with_options(options);
    f(&mut builder)?;
    let html = builder.render();
    tracing::debug!(nodes = builder.len(), bytes = html.len(), "Rendered document");
    Ok(html)
}
