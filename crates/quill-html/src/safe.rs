//! Taint-tracking string wrapper.
//!
//! A [`SafeString`] carries a flag saying whether its text is already safe to
//! emit as HTML. Appending untrusted text to a safe string escapes it first,
//! so trusted markup is never escaped twice and untrusted text is never
//! emitted raw.

use std::fmt;
use std::ops::{Add, AddAssign};

use crate::escape::{escape_html_once, escape_script};

/// Text annotated with an "already safe for HTML output" flag.
///
/// Equality compares text only: a trusted and an untrusted string with the
/// same characters are equal.
///
/// # Example
///
/// ```
/// use quill_html::SafeString;
///
/// let mut html = SafeString::trusted("<p>");
/// html += "fish & chips";
/// html += SafeString::trusted("</p>");
///
/// assert_eq!(html, "<p>fish &amp; chips</p>");
/// assert!(html.is_safe());
/// ```
#[derive(Debug, Clone, Eq)]
pub struct SafeString {
    value: String,
    safe: bool,
}

/// Mark text as safe for HTML output.
///
/// Shorthand for [`SafeString::trusted`].
#[must_use]
pub fn mark_safe(text: impl Into<String>) -> SafeString {
    SafeString::trusted(text)
}

impl SafeString {
    /// Create an empty safe string, ready to have content appended.
    #[must_use]
    pub fn new() -> Self {
        Self::trusted(String::new())
    }

    /// Wrap text that is already safe to emit as HTML.
    #[must_use]
    pub fn trusted(text: impl Into<String>) -> Self {
        Self {
            value: text.into(),
            safe: true,
        }
    }

    /// Wrap text that must be escaped before it is emitted.
    #[must_use]
    pub fn untrusted(text: impl Into<String>) -> Self {
        Self {
            value: text.into(),
            safe: false,
        }
    }

    /// Wrap the display form of a value as untrusted text.
    ///
    /// Used for values such as colors and URLs that only contribute their
    /// string form.
    #[must_use]
    pub fn display(value: &impl fmt::Display) -> Self {
        Self::untrusted(value.to_string())
    }

    /// Whether the text is safe to emit without escaping.
    #[must_use]
    pub fn is_safe(&self) -> bool {
        self.safe
    }

    /// Mark this text as safe. Wrapping an already safe string is a no-op.
    #[must_use]
    pub fn mark_safe(mut self) -> Self {
        self.safe = true;
        self
    }

    /// The underlying text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.value
    }

    /// Length of the text in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.value.len()
    }

    /// Whether the text is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    /// Whether the text is empty or whitespace only.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.value.trim().is_empty()
    }

    /// Append text, escaping it first when this string is safe and the
    /// appended text is not.
    pub fn push(&mut self, other: impl Into<Self>) {
        let other = other.into();
        if !self.safe || other.safe {
            self.value.push_str(&other.value);
        } else {
            self.value.push_str(&escape_html_once(&other.value));
        }
    }

    /// Append a string slice that is known to be safe markup, verbatim.
    pub(crate) fn push_markup(&mut self, markup: &str) {
        self.value.push_str(markup);
    }

    /// Builder-style [`push`](Self::push).
    #[must_use]
    pub fn concat(mut self, other: impl Into<Self>) -> Self {
        self.push(other);
        self
    }

    /// Whether the text ends with the given suffix.
    pub(crate) fn ends_with(&self, suffix: &str) -> bool {
        self.value.ends_with(suffix)
    }

    /// Escape for embedding in a script string literal, keeping the safety
    /// flag of this string.
    #[must_use]
    pub fn escape_script(&self) -> Self {
        Self {
            value: escape_script(Some(&self.value)),
            safe: self.safe,
        }
    }
}

impl Default for SafeString {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SafeString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

impl AsRef<str> for SafeString {
    fn as_ref(&self) -> &str {
        &self.value
    }
}

impl From<&str> for SafeString {
    fn from(text: &str) -> Self {
        Self::untrusted(text)
    }
}

impl From<String> for SafeString {
    fn from(text: String) -> Self {
        Self::untrusted(text)
    }
}

impl From<&String> for SafeString {
    fn from(text: &String) -> Self {
        Self::untrusted(text.as_str())
    }
}

impl From<&SafeString> for SafeString {
    fn from(text: &SafeString) -> Self {
        text.clone()
    }
}

impl PartialEq for SafeString {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl PartialEq<str> for SafeString {
    fn eq(&self, other: &str) -> bool {
        self.value == other
    }
}

impl PartialEq<&str> for SafeString {
    fn eq(&self, other: &&str) -> bool {
        self.value == *other
    }
}

impl PartialEq<String> for SafeString {
    fn eq(&self, other: &String) -> bool {
        &self.value == other
    }
}

impl<T: Into<SafeString>> Add<T> for SafeString {
    type Output = SafeString;

    fn add(self, other: T) -> SafeString {
        self.concat(other)
    }
}

impl<T: Into<SafeString>> AddAssign<T> for SafeString {
    fn add_assign(&mut self, other: T) {
        self.push(other);
    }
}
