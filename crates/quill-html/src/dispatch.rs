//! Calls by member name with loosely typed arguments.
//!
//! [`Builder::invoke`] treats any name matching the tag pattern as a tag:
//! the first argument is the content (or an attribute map), the second an
//! attribute map. [`Element::invoke`] treats `name` as an attribute getter,
//! `name=` as a setter, and `html` / `html=` as the children accessor.

use crate::attrs::{AttrValue, Attributes};
use crate::builder::{Builder, Scope};
use crate::element::Element;
use crate::error::HtmlError;
use crate::node::{Content, Node, NodeTree};
use crate::safe::SafeString;
use crate::tags::{is_attr_name, is_tag_name};

/// Most positional arguments a tag call takes: content, then attributes.
const MAX_TAG_ARGS: usize = 2;

/// Member name of the children accessor.
const CHILDREN_MEMBER: &str = "html";

/// A loosely typed argument to a dynamic call.
#[derive(Debug, Clone, PartialEq)]
pub enum Arg {
    /// Scalar value: text, number, boolean or nil.
    Value(AttrValue),
    /// An element.
    Element(Element),
    /// A node tree.
    Tree(NodeTree),
    /// A list of nodes.
    Nodes(Vec<Node>),
    /// An attribute map.
    Attrs(Attributes),
}

impl Arg {
    /// Short description of the argument kind, for error messages.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Value(AttrValue::Nil) => "nil",
            Self::Value(AttrValue::Flag(_)) => "boolean",
            Self::Value(AttrValue::Text(_)) => "text",
            Self::Element(_) => "element",
            Self::Tree(_) => "node tree",
            Self::Nodes(_) => "node list",
            Self::Attrs(_) => "attribute map",
        }
    }
}

impl From<AttrValue> for Arg {
    fn from(value: AttrValue) -> Self {
        Self::Value(value)
    }
}

impl From<&str> for Arg {
    fn from(text: &str) -> Self {
        Self::Value(text.into())
    }
}

impl From<String> for Arg {
    fn from(text: String) -> Self {
        Self::Value(text.into())
    }
}

impl From<SafeString> for Arg {
    fn from(text: SafeString) -> Self {
        Self::Value(text.into())
    }
}

impl From<bool> for Arg {
    fn from(flag: bool) -> Self {
        Self::Value(flag.into())
    }
}

impl From<Element> for Arg {
    fn from(element: Element) -> Self {
        Self::Element(element)
    }
}

impl From<NodeTree> for Arg {
    fn from(tree: NodeTree) -> Self {
        Self::Tree(tree)
    }
}

impl From<Vec<Node>> for Arg {
    fn from(nodes: Vec<Node>) -> Self {
        Self::Nodes(nodes)
    }
}

impl From<Attributes> for Arg {
    fn from(attrs: Attributes) -> Self {
        Self::Attrs(attrs)
    }
}

macro_rules! arg_from_number {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Arg {
                fn from(value: $ty) -> Self {
                    Self::Value(value.into())
                }
            }
        )*
    };
}

arg_from_number!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64);

/// Nested-content callback passed to a dynamic call.
pub type Block<'b> = Box<dyn FnOnce(&mut Scope<'_>) -> Result<(), HtmlError> + 'b>;

/// Box a callback as a [`Block`].
pub fn block<'b, F>(f: F) -> Block<'b>
where
    F: FnOnce(&mut Scope<'_>) -> Result<(), HtmlError> + 'b,
{
    Box::new(f)
}

impl Builder {
    /// Append an element by tag name with loosely typed arguments.
    ///
    /// With a block, the element is opened for the block like
    /// [`tag_with`](Self::tag_with).
    ///
    /// # Errors
    ///
    /// - [`HtmlError::UnknownMember`] if `name` is not a valid tag name, or an
    ///   attribute key cannot be written into markup.
    /// - [`HtmlError::TooManyArguments`] for more than two arguments.
    /// - [`HtmlError::InvalidArgument`] if the second argument is not an
    ///   attribute map.
    /// - Any error returned by the block.
    ///
    /// # Example
    ///
    /// ```
    /// use quill_html::{Arg, Attributes, Builder, block};
    ///
    /// let mut html = Builder::new();
    /// html.invoke(
    ///     "div",
    ///     vec![Arg::from(Attributes::from([("id", "some-div")]))],
    ///     Some(block(|div| {
    ///         div.invoke("em", vec![Arg::from("HTML is neat!")], None)?;
    ///         Ok(())
    ///     })),
    /// )?;
    ///
    /// assert_eq!(html.render(), "<div id=\"some-div\">\n  <em>HTML is neat!</em>\n</div>\n");
    /// # Ok::<(), quill_html::HtmlError>(())
    /// ```
    pub fn invoke(
        &mut self,
        name: &str,
        args: Vec<Arg>,
        block: Option<Block<'_>>,
    ) -> Result<&mut Self, HtmlError> {
        if !is_tag_name(name) {
            return Err(HtmlError::unknown_member(name));
        }
        if args.len() > MAX_TAG_ARGS {
            return Err(HtmlError::TooManyArguments {
                member: name.to_owned(),
                given: args.len(),
                max: MAX_TAG_ARGS,
            });
        }

        let mut args = args.into_iter();
        let content = args.next().map_or(Content::Empty, content_from_arg);
        let attrs = match args.next() {
            None | Some(Arg::Value(AttrValue::Nil)) => Attributes::new(),
            Some(Arg::Attrs(attrs)) => attrs,
            Some(other) => {
                return Err(HtmlError::InvalidArgument {
                    member: name.to_owned(),
                    expected: "attribute map",
                    found: other.kind(),
                });
            }
        };

        let element = Element::with_content(name, content, attrs)?;
        match block {
            Some(block) => self.open_scope(element, block),
            None => Ok(self.push(element)),
        }
    }
}

/// Element content for the first argument of a tag call.
fn content_from_arg(arg: Arg) -> Content {
    match arg {
        Arg::Value(AttrValue::Text(text)) => Content::Text(text),
        Arg::Value(AttrValue::Nil | AttrValue::Flag(_)) => Content::Empty,
        Arg::Element(element) => Content::Element(element),
        Arg::Tree(tree) => Content::Tree(tree),
        Arg::Nodes(nodes) => Content::Tree(nodes.into_iter().collect()),
        Arg::Attrs(attrs) => Content::Attrs(attrs),
    }
}

impl Element {
    /// Access an attribute or the children by member name.
    ///
    /// - `key` returns the attribute value.
    /// - `key=` with one argument sets it and returns the previous value.
    /// - `html` returns the rendered children as trusted text. The value is a
    ///   snapshot: changing it does not change the element. Use
    ///   [`children_mut`](Self::children_mut) to edit the children in place.
    /// - `html=` with one argument replaces the children.
    ///
    /// # Errors
    ///
    /// - [`HtmlError::UnknownMember`] if the name is not a valid attribute name.
    /// - [`HtmlError::InvalidAccessorUsage`] if a getter is given a block.
    /// - [`HtmlError::TooManyArguments`] if a getter is given arguments, or a
    ///   setter more than one.
    /// - [`HtmlError::InvalidArgument`] if a setter is given no argument or a
    ///   value that cannot be an attribute.
    /// - [`HtmlError::InvalidChildAssignment`] if `html=` is given something
    ///   other than text, a node tree or a node list.
    ///
    /// # Example
    ///
    /// ```
    /// use quill_html::{Arg, AttrValue, Element};
    ///
    /// let mut span = Element::new("span")?;
    /// span.invoke("id=", vec![Arg::from("title-text")], None)?;
    /// span.invoke("html=", vec![Arg::from("some text")], None)?;
    ///
    /// assert_eq!(span.invoke("id", vec![], None)?, Some(AttrValue::from("title-text")));
    /// assert_eq!(span.to_string(), r#"<span id="title-text">some text</span>"#);
    /// # Ok::<(), quill_html::HtmlError>(())
    /// ```
    pub fn invoke(
        &mut self,
        member: &str,
        args: Vec<Arg>,
        block: Option<Block<'_>>,
    ) -> Result<Option<AttrValue>, HtmlError> {
        let (name, is_setter) = match member.strip_suffix('=') {
            Some(name) => (name, true),
            None => (member, false),
        };
        if name != CHILDREN_MEMBER && !is_attr_name(name) {
            return Err(HtmlError::unknown_member(member));
        }

        if !is_setter {
            if block.is_some() {
                return Err(HtmlError::InvalidAccessorUsage {
                    tag: self.tag().to_owned(),
                    member: member.to_owned(),
                });
            }
            if !args.is_empty() {
                return Err(HtmlError::TooManyArguments {
                    member: member.to_owned(),
                    given: args.len(),
                    max: 0,
                });
            }
            if name == CHILDREN_MEMBER {
                return Ok(Some(AttrValue::Text(self.inner_html())));
            }
            return Ok(self.attr(name)?.cloned());
        }

        let arg = single_arg(member, args)?;
        if name == CHILDREN_MEMBER {
            self.set_children_from(arg)?;
            return Ok(None);
        }
        let value = match arg {
            Arg::Value(value) => value,
            Arg::Element(element) => AttrValue::from(&element),
            other => {
                return Err(HtmlError::InvalidArgument {
                    member: member.to_owned(),
                    expected: "attribute value",
                    found: other.kind(),
                });
            }
        };
        self.set_attr(name, value)
    }

    fn set_children_from(&mut self, arg: Arg) -> Result<(), HtmlError> {
        match arg {
            Arg::Value(AttrValue::Text(text)) => self.set_children(text),
            Arg::Tree(tree) => self.set_children(tree),
            Arg::Nodes(nodes) => self.set_children(nodes),
            other => {
                return Err(HtmlError::InvalidChildAssignment {
                    tag: self.tag().to_owned(),
                    found: other.kind(),
                });
            }
        };
        Ok(())
    }
}

/// The only argument of a setter call.
fn single_arg(member: &str, args: Vec<Arg>) -> Result<Arg, HtmlError> {
    let given = args.len();
    let mut args = args.into_iter();
    match (args.next(), args.next()) {
        (Some(arg), None) => Ok(arg),
        (None, _) => Err(HtmlError::InvalidArgument {
            member: member.to_owned(),
            expected: "one value",
            found: "nothing",
        }),
        (Some(_), Some(_)) => Err(HtmlError::TooManyArguments {
            member: member.to_owned(),
            given,
            max: 1,
        }),
    }
}
