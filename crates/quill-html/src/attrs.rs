//! Attribute values and the ordered attribute mapping.

use std::fmt;

use crate::safe::SafeString;

/// Value of an element attribute.
#[derive(Debug, Clone, PartialEq)]
pub enum AttrValue {
    /// No value: the attribute is omitted from output.
    Nil,
    /// Text value, escaped on output unless marked safe.
    Text(SafeString),
    /// Boolean attribute: `true` renders the bare key, `false` omits it.
    Flag(bool),
}

impl AttrValue {
    /// Attribute value from the display form of a value (colors, URLs).
    #[must_use]
    pub fn display(value: &impl fmt::Display) -> Self {
        Self::Text(SafeString::display(value))
    }

    /// Whether the attribute is left out of the rendered tag.
    #[must_use]
    pub fn is_omitted(&self) -> bool {
        matches!(self, Self::Nil | Self::Flag(false))
    }

    /// Whether a rendered value is blank: empty or whitespace-only text, or a
    /// set flag. Blank values render as the bare key. Omitted values are
    /// never blank.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Nil | Self::Flag(false) => false,
            Self::Flag(true) => true,
            Self::Text(text) => text.is_blank(),
        }
    }
}

impl From<SafeString> for AttrValue {
    fn from(text: SafeString) -> Self {
        Self::Text(text)
    }
}

impl From<&str> for AttrValue {
    fn from(text: &str) -> Self {
        Self::Text(text.into())
    }
}

impl From<String> for AttrValue {
    fn from(text: String) -> Self {
        Self::Text(text.into())
    }
}

impl From<&String> for AttrValue {
    fn from(text: &String) -> Self {
        Self::Text(text.into())
    }
}

impl From<bool> for AttrValue {
    fn from(flag: bool) -> Self {
        Self::Flag(flag)
    }
}

impl<T: Into<AttrValue>> From<Option<T>> for AttrValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Nil, Into::into)
    }
}

macro_rules! attr_value_from_number {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for AttrValue {
                fn from(value: $ty) -> Self {
                    Self::Text(SafeString::untrusted(value.to_string()))
                }
            }
        )*
    };
}

attr_value_from_number!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64);

/// Insertion-ordered attribute mapping.
///
/// Setting an existing key replaces its value in place, keeping its position.
///
/// # Example
///
/// ```
/// use quill_html::Attributes;
///
/// let attrs = Attributes::new().with("id", "main").with("class", "wide");
/// let keys: Vec<&str> = attrs.keys().collect();
/// assert_eq!(keys, ["id", "class"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Attributes {
    entries: Vec<(String, AttrValue)>,
}

impl Attributes {
    /// Create an empty mapping.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style [`insert`](Self::insert).
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<AttrValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Set a value, returning the previous one.
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        value: impl Into<AttrValue>,
    ) -> Option<AttrValue> {
        let key = key.into();
        let value = value.into();
        if let Some((_, existing)) = self.entries.iter_mut().find(|(k, _)| *k == key) {
            return Some(std::mem::replace(existing, value));
        }
        self.entries.push((key, value));
        None
    }

    /// Value for `key`, if set.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&AttrValue> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Remove `key`, returning its value.
    pub fn remove(&mut self, key: &str) -> Option<AttrValue> {
        let index = self.entries.iter().position(|(k, _)| k == key)?;
        Some(self.entries.remove(index).1)
    }

    /// Whether `key` is set (even to [`AttrValue::Nil`]).
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether there are no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &AttrValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl IntoIterator for Attributes {
    type Item = (String, AttrValue);
    type IntoIter = std::vec::IntoIter<(String, AttrValue)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl From<()> for Attributes {
    fn from((): ()) -> Self {
        Self::new()
    }
}

impl<K: Into<String>, V: Into<AttrValue>, const N: usize> From<[(K, V); N]> for Attributes {
    fn from(entries: [(K, V); N]) -> Self {
        entries.into_iter().collect()
    }
}

impl<K: Into<String>, V: Into<AttrValue>> From<Vec<(K, V)>> for Attributes {
    fn from(entries: Vec<(K, V)>) -> Self {
        entries.into_iter().collect()
    }
}

impl<K: Into<String>, V: Into<AttrValue>> FromIterator<(K, V)> for Attributes {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut attrs = Self::new();
        for (key, value) in iter {
            attrs.insert(key, value);
        }
        attrs
    }
}
