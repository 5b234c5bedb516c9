//! Error types for tree construction.

use std::error::Error;

/// Error raised while building a document tree.
///
/// Errors are raised at the call that triggers them. A document whose build
/// failed should be discarded: no partial output is produced.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum HtmlError {
    /// Unsupported value assigned as an element's children.
    #[error("cannot assign {found} as the children of <{tag}>")]
    InvalidChildAssignment {
        /// Tag of the element being assigned to.
        tag: String,
        /// Kind of the rejected value.
        found: &'static str,
    },

    /// Attribute accessor called with a nested-content block.
    #[error("<{tag}>.{member} is an attribute accessor and takes no block, add content to the children of <{tag}> instead")]
    InvalidAccessorUsage {
        /// Tag of the element.
        tag: String,
        /// Accessor name.
        member: String,
    },

    /// Member name that is neither a tag nor an attribute name.
    #[error("no such member: {member}")]
    UnknownMember {
        /// Name as called.
        member: String,
    },

    /// Dynamic call with more positional arguments than the member takes.
    #[error("{member} takes at most {max} arguments, {given} given")]
    TooManyArguments {
        /// Name as called.
        member: String,
        /// Number of arguments passed.
        given: usize,
        /// Number of arguments accepted.
        max: usize,
    },

    /// Dynamic call argument of the wrong kind.
    #[error("invalid argument for {member}: expected {expected}, found {found}")]
    InvalidArgument {
        /// Name as called.
        member: String,
        /// Kind of value accepted.
        expected: &'static str,
        /// Kind of value passed.
        found: &'static str,
    },

    /// Error raised by caller code inside a nested content callback.
    #[error("callback failed: {0}")]
    Callback(#[source] Box<dyn Error + Send + Sync>),
}

impl HtmlError {
    /// Wrap an error raised inside a content callback.
    ///
    /// # Example
    ///
    /// ```
    /// use quill_html::HtmlError;
    ///
    /// let err = "42x".parse::<u32>().map_err(HtmlError::callback).unwrap_err();
    /// assert!(err.to_string().starts_with("callback failed"));
    /// ```
    pub fn callback(err: impl Into<Box<dyn Error + Send + Sync>>) -> Self {
        Self::Callback(err.into())
    }

    pub(crate) fn unknown_member(member: &str) -> Self {
        Self::UnknownMember {
            member: member.to_owned(),
        }
    }
}
