//! HTML document construction and rendering.
//!
//! This crate builds a tree of elements and text through a fluent
//! [`Builder`] and serializes it to indented HTML.
//!
//! # Architecture
//!
//! - [`SafeString`]: text tagged as trusted markup or untrusted input.
//!   Untrusted text is escaped exactly once on its way into trusted output.
//! - [`NodeTree`]: ordered text and element nodes.
//! - [`Element`]: a tag with attributes and children. Void and inline tags
//!   are recognized from fixed tables.
//! - [`Builder`]: appends nodes, nesting them inside elements opened for the
//!   duration of a callback.
//! - [`Renderer`]: block elements go on their own indented lines, inline
//!   elements stay in the text flow.
//!
//! Tags and attributes can also be reached by name through
//! [`Builder::invoke`] and [`Element::invoke`].
//!
//! # Example
//!
//! ```
//! let html = quill_html::build(|html| {
//!     html.div_with((), [("id", "some-div")], |div| {
//!         div.em("HTML is neat!", ())?;
//!         Ok(())
//!     })?;
//!     Ok(())
//! })?;
//!
//! assert_eq!(html, "<div id=\"some-div\">\n  <em>HTML is neat!</em>\n</div>\n");
//! # Ok::<(), quill_html::HtmlError>(())
//! ```

mod attrs;
mod builder;
mod dispatch;
mod element;
mod error;
mod escape;
mod node;
mod render;
mod safe;
mod tags;

pub use attrs::{AttrValue, Attributes};
pub use builder::{Builder, Scope, build, build_with};
pub use dispatch::{Arg, Block, block};
pub use element::Element;
pub use error::HtmlError;
pub use escape::{escape_once, escape_script};
pub use node::{Children, Content, Node, NodeTree};
pub use render::{RenderOptions, Renderer};
pub use safe::{SafeString, mark_safe};
pub use tags::is_tag_name;
