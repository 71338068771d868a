//! Resource locators for virtual stream schemes.
//!
//! A stream URL like `theme://images/logo.png` names a file by scheme
//! instead of by location. The locator knows which schemes exist and
//! where their files live.

use std::path::{Path, PathBuf};

use rustc_hash::FxHashMap;

/// Maps stream URLs to site-relative paths.
pub trait ResourceLocator {
    /// Whether `scheme` is a registered stream.
    fn scheme_exists(&self, scheme: &str) -> bool;

    /// Find the file behind `scheme://host/path`.
    ///
    /// Returns the path relative to the site root, or `None` if no
    /// candidate exists.
    fn find_resource(&self, uri: &str) -> Option<String>;
}

/// Locator that knows no schemes; every scheme URL is treated as external.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoStreams;

impl ResourceLocator for NoStreams {
    fn scheme_exists(&self, _scheme: &str) -> bool {
        false
    }

    fn find_resource(&self, _uri: &str) -> Option<String> {
        None
    }
}

/// Filesystem-backed locator.
///
/// Each scheme maps to an ordered list of directories (relative to `root`).
/// The first directory that contains the requested file wins, which lets a
/// theme override files shipped by a shared base.
///
/// ```text
/// theme = ["themes/custom", "themes/base"]
///
/// theme://css/site.css  →  themes/custom/css/site.css   (if present)
///                       →  themes/base/css/site.css     (otherwise)
/// ```
#[derive(Debug, Clone, Default)]
pub struct StreamLocator {
    root: PathBuf,
    schemes: FxHashMap<String, Vec<String>>,
}

impl StreamLocator {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            schemes: FxHashMap::default(),
        }
    }

    /// Register (or extend) a scheme with a search prefix.
    ///
    /// Schemes are case-insensitive and stored lowercase, matching what
    /// URL parsing yields.
    pub fn add_path(&mut self, scheme: impl Into<String>, prefix: impl Into<String>) {
        let mut scheme = scheme.into();
        scheme.make_ascii_lowercase();
        let prefix = prefix.into().trim_matches('/').to_string();
        self.schemes.entry(scheme).or_default().push(prefix);
    }

    fn prefixes(&self, scheme: &str) -> Option<&Vec<String>> {
        match self.schemes.get(scheme) {
            Some(prefixes) => Some(prefixes),
            None => self.schemes.get(&scheme.to_ascii_lowercase()),
        }
    }

    pub fn with_path(mut self, scheme: impl Into<String>, prefix: impl Into<String>) -> Self {
        self.add_path(scheme, prefix);
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl ResourceLocator for StreamLocator {
    fn scheme_exists(&self, scheme: &str) -> bool {
        self.prefixes(scheme).is_some()
    }

    fn find_resource(&self, uri: &str) -> Option<String> {
        let (scheme, rest) = uri.split_once("://")?;
        let prefixes = self.prefixes(scheme)?;
        let rest = rest.trim_start_matches('/');

        // Reject traversal out of the stream's directories.
        if rest.split('/').any(|segment| segment == "..") {
            return None;
        }

        prefixes.iter().find_map(|prefix| {
            let relative = match (prefix.is_empty(), rest.is_empty()) {
                (true, _) => rest.to_string(),
                (false, true) => prefix.clone(),
                (false, false) => format!("{prefix}/{rest}"),
            };
            self.root.join(&relative).exists().then_some(relative)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn site() -> TempDir {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("themes/custom/css")).unwrap();
        fs::create_dir_all(dir.path().join("themes/base/css")).unwrap();
        fs::write(dir.path().join("themes/custom/css/site.css"), "a{}").unwrap();
        fs::write(dir.path().join("themes/base/css/site.css"), "b{}").unwrap();
        fs::write(dir.path().join("themes/base/css/base.css"), "c{}").unwrap();
        dir
    }

    fn locator(root: &Path) -> StreamLocator {
        StreamLocator::new(root)
            .with_path("theme", "themes/custom")
            .with_path("theme", "/themes/base/")
    }

    #[test]
    fn test_scheme_exists() {
        let dir = site();
        let locator = locator(dir.path());
        assert!(locator.scheme_exists("theme"));
        assert!(!locator.scheme_exists("https"));
    }

    #[test]
    fn test_scheme_case_insensitive() {
        let dir = site();
        let locator = StreamLocator::new(dir.path()).with_path("Theme", "themes/base");
        assert!(locator.scheme_exists("theme"));
        assert!(locator.scheme_exists("THEME"));
        assert_eq!(
            locator.find_resource("theme://css/base.css").as_deref(),
            Some("themes/base/css/base.css")
        );
        assert_eq!(
            locator.find_resource("Theme://css/base.css").as_deref(),
            Some("themes/base/css/base.css")
        );
    }

    #[test]
    fn test_find_first_match() {
        let dir = site();
        let locator = locator(dir.path());
        assert_eq!(
            locator.find_resource("theme://css/site.css").as_deref(),
            Some("themes/custom/css/site.css")
        );
        assert_eq!(
            locator.find_resource("theme://css/base.css").as_deref(),
            Some("themes/base/css/base.css")
        );
    }

    #[test]
    fn test_find_miss() {
        let dir = site();
        let locator = locator(dir.path());
        assert!(locator.find_resource("theme://css/missing.css").is_none());
        assert!(locator.find_resource("other://css/site.css").is_none());
        assert!(locator.find_resource("not a stream").is_none());
    }

    #[test]
    fn test_find_rejects_traversal() {
        let dir = site();
        let locator = locator(dir.path());
        assert!(locator.find_resource("theme://../base/css/base.css").is_none());
    }

    #[test]
    fn test_no_streams() {
        assert!(!NoStreams.scheme_exists("theme"));
        assert!(NoStreams.find_resource("theme://a.css").is_none());
    }
}
