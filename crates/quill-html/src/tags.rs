//! Tag-category tables and member-name validation.

use std::sync::LazyLock;

use regex::Regex;

/// Tags that take no closing tag unless one is forced.
const VOID_TAGS: &[&str] = &[
    "area", "base", "br", "col", "command", "embed", "hr", "img", "input", "link", "meta", "param",
    "source",
];

/// Tags rendered inline: no surrounding newlines or indentation.
const INLINE_TAGS: &[&str] = &[
    "a", "abbr", "b", "button", "em", "i", "input", "img", "label", "li", "option", "span",
    "strong", "title", "textarea", "u",
];

/// Attributes that render `key=""` even when blank.
const ALWAYS_QUOTED_ATTRS: &[&str] = &["value", "alt"];

/// Tag names callable through dynamic dispatch: `div`, `h1`, `ul`.
static TAG_NAME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z]+[0-9]?$").expect("invalid tag name regex"));

/// Attribute member names, matched case-insensitively.
static ATTR_NAME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^[a-z]+[0-9]?$").expect("invalid attribute name regex"));

/// Any element name that is safe to write into markup, custom elements included.
static MARKUP_TAG_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z][a-zA-Z0-9]*(?:-[a-zA-Z0-9]+)*$").expect("invalid markup tag regex")
});

/// Any attribute key that is safe to write into markup: `data-id`, `aria-label`, `xml:lang`.
static MARKUP_ATTR_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z_:][-a-zA-Z0-9_:.]*$").expect("invalid markup attribute regex")
});

/// Whether `tag` is a void element.
pub(crate) fn is_void(tag: &str) -> bool {
    VOID_TAGS.contains(&tag)
}

/// Whether `tag` renders inline.
pub(crate) fn is_inline(tag: &str) -> bool {
    INLINE_TAGS.contains(&tag)
}

/// Whether a blank value for `key` still renders as `key=""`.
pub(crate) fn is_always_quoted(key: &str) -> bool {
    ALWAYS_QUOTED_ATTRS.contains(&key)
}

/// Whether `name` can be used as a dynamically dispatched tag name.
///
/// # Example
///
/// ```
/// use quill_html::is_tag_name;
///
/// assert!(is_tag_name("div"));
/// assert!(is_tag_name("h1"));
/// assert!(!is_tag_name("Div"));
/// assert!(!is_tag_name("h12"));
/// assert!(!is_tag_name("my-widget"));
/// ```
pub fn is_tag_name(name: &str) -> bool {
    TAG_NAME_PATTERN.is_match(name)
}

/// Whether `name` can be used as an attribute accessor name.
pub(crate) fn is_attr_name(name: &str) -> bool {
    ATTR_NAME_PATTERN.is_match(name)
}

/// Whether `tag` can be written as an element name.
pub(crate) fn is_markup_tag(tag: &str) -> bool {
    MARKUP_TAG_PATTERN.is_match(tag)
}

/// Whether `key` can be written as an attribute name.
pub(crate) fn is_markup_attr(key: &str) -> bool {
    MARKUP_ATTR_PATTERN.is_match(key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_void_tags() {
        for tag in ["img", "br", "hr", "input", "meta", "source"] {
            assert!(is_void(tag), "{tag} should be void");
        }
        for tag in ["div", "span", "script", "p"] {
            assert!(!is_void(tag), "{tag} should not be void");
        }
    }

    #[test]
    fn test_inline_tags() {
        for tag in ["span", "a", "b", "em", "li", "img", "input"] {
            assert!(is_inline(tag), "{tag} should be inline");
        }
        for tag in ["div", "p", "ul", "h1", "br"] {
            assert!(!is_inline(tag), "{tag} should not be inline");
        }
    }

    #[test]
    fn test_lookup_is_exact() {
        assert!(!is_void("IMG"));
        assert!(!is_inline("Span"));
        assert!(!is_void("img "));
    }

    #[test]
    fn test_always_quoted() {
        assert!(is_always_quoted("value"));
        assert!(is_always_quoted("alt"));
        assert!(!is_always_quoted("disabled"));
    }

    #[test]
    fn test_tag_names() {
        for name in ["div", "h1", "ul", "textarea", "h6"] {
            assert!(is_tag_name(name), "{name} should be accepted");
        }
        for name in ["", "1", "h12", "Div", "my_tag", "my-tag", "div!", "2h"] {
            assert!(!is_tag_name(name), "{name} should be rejected");
        }
    }

    #[test]
    fn test_attr_names_case_insensitive() {
        assert!(is_attr_name("id"));
        assert!(is_attr_name("Class"));
        assert!(is_attr_name("DATA1"));
        assert!(!is_attr_name("data-id"));
        assert!(!is_attr_name("on_click"));
        assert!(!is_attr_name(""));
    }

    #[test]
    fn test_markup_tags() {
        for tag in ["div", "H1", "my-widget", "x-a1-b2"] {
            assert!(is_markup_tag(tag), "{tag} should be accepted");
        }
        for tag in ["", "1a", "-x", "x-", "a b", "div>", "x\"", "a--b", "ns:tag"] {
            assert!(!is_markup_tag(tag), "{tag} should be rejected");
        }
    }

    #[test]
    fn test_markup_attrs() {
        for key in ["id", "data-user-id", "aria-label", "xml:lang", "_x", "v.model"] {
            assert!(is_markup_attr(key), "{key} should be accepted");
        }
        for key in ["", "-x", "1x", "a b", "a=b", "x\"", "a>", "a/b", "on'x"] {
            assert!(!is_markup_attr(key), "{key} should be rejected");
        }
    }
}
