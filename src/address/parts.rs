//! Split a URL reference into its components.
//!
//! Absolute (`scheme:...`) and scheme-relative (`//host/...`) references go
//! through the `url` crate. Relative references are split literally on the
//! first `#` and `?` so `..` segments and relative paths survive untouched.
//!
//! Non-ASCII, spaces and `%` are percent-encoded before parsing and every
//! component is decoded afterwards, so each component is the same text that
//! appeared in the input.

use std::sync::LazyLock;

use percent_encoding::{AsciiSet, CONTROLS, percent_decode_str, utf8_percent_encode};
use url::{ParseError, Url};

/// Bytes escaped before handing the reference to the parser.
const PRE_ENCODE: &AsciiSet = &CONTROLS.add(b' ').add(b'%');

/// Base used to parse scheme-relative references.
static SCHEME_RELATIVE_BASE: LazyLock<Option<Url>> =
    LazyLock::new(|| Url::parse("http://scheme-relative.invalid/").ok());

/// Components of a parsed URL reference (all decoded).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UrlParts {
    pub scheme: Option<String>,
    pub host: Option<String>,
    pub port: Option<u16>,
    pub path: String,
    pub query: Option<String>,
    pub fragment: Option<String>,
}

impl UrlParts {
    /// Parse a URL reference. Returns `None` if it cannot be parsed.
    pub fn parse(input: &str) -> Option<Self> {
        let encoded = utf8_percent_encode(input, PRE_ENCODE).to_string();

        match Url::parse(&encoded) {
            Ok(url) => Some(Self::from_url(&url, true)),
            Err(ParseError::RelativeUrlWithoutBase) if encoded.starts_with("//") => {
                let base = SCHEME_RELATIVE_BASE.as_ref()?;
                let url = base.join(&encoded).ok()?;
                Some(Self::from_url(&url, false))
            }
            Err(ParseError::RelativeUrlWithoutBase) => Some(Self::split_relative(&encoded)),
            Err(_) => None,
        }
    }

    fn from_url(url: &Url, keep_scheme: bool) -> Self {
        Self {
            scheme: keep_scheme.then(|| url.scheme().to_string()),
            host: url.host_str().filter(|h| !h.is_empty()).map(decode),
            port: url.port(),
            path: decode(url.path()),
            query: url.query().map(decode),
            fragment: url.fragment().map(decode),
        }
    }

    /// `path?query#fragment` without any normalization.
    fn split_relative(encoded: &str) -> Self {
        let (rest, fragment) = match encoded.split_once('#') {
            Some((rest, fragment)) => (rest, Some(decode(fragment))),
            None => (encoded, None),
        };
        let (path, query) = match rest.split_once('?') {
            Some((path, query)) => (path, Some(decode(query))),
            None => (rest, None),
        };

        Self {
            path: decode(path),
            query,
            fragment,
            ..Self::default()
        }
    }

    /// Whether the reference names a host or port (i.e. points off-site).
    pub fn has_authority(&self) -> bool {
        self.host.is_some() || self.port.is_some()
    }
}

fn decode(s: &str) -> String {
    percent_decode_str(s).decode_utf8_lossy().into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_relative() {
        let parts = UrlParts::parse("css/site.css?v=1#top").unwrap();
        assert_eq!(parts.scheme, None);
        assert_eq!(parts.host, None);
        assert_eq!(parts.path, "css/site.css");
        assert_eq!(parts.query.as_deref(), Some("v=1"));
        assert_eq!(parts.fragment.as_deref(), Some("top"));
    }

    #[test]
    fn test_parse_relative_keeps_dot_segments() {
        let parts = UrlParts::parse("../images/logo.png").unwrap();
        assert_eq!(parts.path, "../images/logo.png");
    }

    #[test]
    fn test_parse_absolute_path() {
        let parts = UrlParts::parse("/media/a.js").unwrap();
        assert_eq!(parts.path, "/media/a.js");
        assert!(!parts.has_authority());
    }

    #[test]
    fn test_parse_absolute_url() {
        let parts = UrlParts::parse("https://example.com:8443/a.js?x=1").unwrap();
        assert_eq!(parts.scheme.as_deref(), Some("https"));
        assert_eq!(parts.host.as_deref(), Some("example.com"));
        assert_eq!(parts.port, Some(8443));
        assert_eq!(parts.path, "/a.js");
        assert_eq!(parts.query.as_deref(), Some("x=1"));
    }

    #[test]
    fn test_parse_stream_scheme() {
        let parts = UrlParts::parse("theme://images/logo.png").unwrap();
        assert_eq!(parts.scheme.as_deref(), Some("theme"));
        assert_eq!(parts.host.as_deref(), Some("images"));
        assert_eq!(parts.path, "/logo.png");
        assert_eq!(parts.port, None);
    }

    #[test]
    fn test_parse_scheme_relative() {
        let parts = UrlParts::parse("//cdn.example.com/lib.js").unwrap();
        assert_eq!(parts.scheme, None);
        assert_eq!(parts.host.as_deref(), Some("cdn.example.com"));
        assert_eq!(parts.path, "/lib.js");
        assert!(parts.has_authority());
    }

    #[test]
    fn test_parse_non_ascii_path() {
        let parts = UrlParts::parse("theme://images/日本語 logo.png").unwrap();
        assert_eq!(parts.path, "/日本語 logo.png");

        let parts = UrlParts::parse("fichiers/été.css").unwrap();
        assert_eq!(parts.path, "fichiers/été.css");
    }

    #[test]
    fn test_parse_keeps_existing_escapes() {
        let parts = UrlParts::parse("theme://images/a%20b.png").unwrap();
        assert_eq!(parts.path, "/a%20b.png");
    }

    #[test]
    fn test_parse_invalid() {
        assert!(UrlParts::parse("http://exa mple.com:99999/").is_none());
        assert!(UrlParts::parse("http://exa mple.com/a.js").is_none());
    }
}
