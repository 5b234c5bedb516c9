//! HTML and script-literal escaping.

use std::sync::LazyLock;

use regex::Regex;

use crate::safe::SafeString;

/// Matches what may follow `&` for it to already start an entity:
/// a named entity (`amp;`) or a decimal reference (`#39;`).
static ENTITY_TAIL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:[a-zA-Z]+|#[0-9]+);").expect("invalid entity regex"));

/// Escape HTML special characters without re-escaping existing entities.
///
/// Text already marked safe is returned unchanged. The result is always
/// marked safe.
///
/// # Example
///
/// ```
/// use quill_html::{SafeString, escape_once};
///
/// assert_eq!(escape_once(r#""hi&<guy>""#), "&quot;hi&amp;&lt;guy&gt;&quot;");
/// assert_eq!(escape_once("fish &amp; chips"), "fish &amp; chips");
///
/// let markup = SafeString::trusted("<b>bold</b>");
/// assert_eq!(escape_once(markup), "<b>bold</b>");
/// ```
pub fn escape_once(text: impl Into<SafeString>) -> SafeString {
    let text = text.into();
    if text.is_safe() {
        return text;
    }
    SafeString::trusted(escape_html_once(text.as_str()))
}

/// Entity-escape `&`, `<`, `>` and `"`, leaving valid entities intact.
pub(crate) fn escape_html_once(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    for (i, ch) in text.char_indices() {
        match ch {
            '&' if ENTITY_TAIL_PATTERN.is_match(&text[i + 1..]) => result.push('&'),
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            _ => result.push(ch),
        }
    }
    result
}

/// Escape text for embedding inside a quoted JavaScript string literal.
///
/// Backslashes and both quote characters are backslash-escaped, `</` becomes
/// `<\/` so the literal cannot close a surrounding `<script>` element, and
/// every line break (`\r\n`, `\n`, `\r`, U+2028, U+2029) becomes an escape
/// sequence. Absent input yields an empty string.
///
/// # Example
///
/// ```
/// use quill_html::escape_script;
///
/// assert_eq!(escape_script(Some(r#"a "quote""#)), r#"a \"quote\""#);
/// assert_eq!(escape_script(Some("abc\r\n123")), r"abc\n123");
/// assert_eq!(escape_script(None), "");
/// ```
pub fn escape_script(text: Option<&str>) -> String {
    let Some(text) = text else {
        return String::new();
    };

    let mut result = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(ch) = chars.next() {
        match ch {
            '\\' => result.push_str(r"\\"),
            '<' if chars.peek() == Some(&'/') => {
                chars.next();
                result.push_str(r"<\/");
            }
            '\r' => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
                result.push_str(r"\n");
            }
            '\n' => result.push_str(r"\n"),
            '\u{2028}' => result.push_str(r"\u2028"),
            '\u{2029}' => result.push_str(r"\u2029"),
            '"' => result.push_str(r#"\""#),
            '\'' => result.push_str(r"\'"),
            _ => result.push(ch),
        }
    }
    result
}
