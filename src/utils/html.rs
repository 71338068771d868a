//! HTML utility functions.
//!
//! - `escape_attr()` - attribute value escaping
//!
//! Script and style bodies are raw text and are never passed through here.

use std::borrow::Cow;

/// Characters that require escaping inside a quoted attribute value.
const ESCAPE_CHARS: [char; 5] = ['<', '>', '&', '"', '\''];

#[inline]
fn escape_char(c: char) -> Option<&'static str> {
    match c {
        '<' => Some("&lt;"),
        '>' => Some("&gt;"),
        '&' => Some("&amp;"),
        '"' => Some("&quot;"),
        '\'' => Some("&#39;"),
        _ => None,
    }
}

/// Escape an HTML attribute value.
///
/// Uses `Cow` to avoid allocation when no escaping is needed.
///
/// # Example
/// ```ignore
/// assert_eq!(escape_attr("a.css?x=1&y=2"), "a.css?x=1&amp;y=2");
/// assert_eq!(escape_attr("a.css"), "a.css"); // No allocation
/// ```
#[inline]
pub fn escape_attr(s: &str) -> Cow<'_, str> {
    if !s.contains(ESCAPE_CHARS) {
        return Cow::Borrowed(s);
    }

    let mut result = String::with_capacity(s.len() + 8);
    for c in s.chars() {
        match escape_char(c) {
            Some(entity) => result.push_str(entity),
            None => result.push(c),
        }
    }
    Cow::Owned(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_attr_borrowed() {
        assert!(matches!(escape_attr("/css/site.css"), Cow::Borrowed(_)));
    }

    #[test]
    fn test_escape_attr_entities() {
        assert_eq!(escape_attr("a.css?x=1&y=2"), "a.css?x=1&amp;y=2");
        assert_eq!(escape_attr(r#""><script>"#), "&quot;&gt;&lt;script&gt;");
        assert_eq!(escape_attr("it's"), "it&#39;s");
    }
}
