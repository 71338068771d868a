//! Site-level URL hooks supplied by the embedding host.

/// Root URI and domain of the site being rendered.
///
/// Both default to empty, which yields root-relative URLs.
pub trait SiteContext {
    /// URI prefix for site-relative paths (e.g. `/blog`).
    fn root_uri(&self) -> &str {
        ""
    }

    /// Scheme and host to prepend when `include` is set
    /// (e.g. `https://example.com`).
    fn domain(&self, include: bool) -> &str {
        let _ = include;
        ""
    }

    /// Public URL of the site root.
    fn site_url(&self) -> &str {
        self.root_uri()
    }
}

/// Fixed root URI and domain.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SiteUrls {
    pub root_uri: String,
    pub domain: String,
}

impl SiteUrls {
    pub fn new(root_uri: impl Into<String>, domain: impl Into<String>) -> Self {
        Self {
            root_uri: root_uri.into(),
            domain: domain.into(),
        }
    }
}

impl SiteContext for SiteUrls {
    fn root_uri(&self) -> &str {
        &self.root_uri
    }

    fn domain(&self, include: bool) -> &str {
        if include { &self.domain } else { "" }
    }
}
