//! Configuration for `headkit.toml`.
//!
//! # Sections
//!
//! | Section     | Purpose                                           |
//! |-------------|---------------------------------------------------|
//! | `[site]`    | Site root, root URI, domain, timestamp window     |
//! | `[streams]` | Virtual schemes and the directories they search   |
//!
//! ```toml
//! [site]
//! root = "."
//! root_uri = "/"
//! domain = "https://example.com"
//! timestamp_age = 604800
//!
//! [streams]
//! theme = ["themes/custom", "themes/base"]
//! ```

mod error;

pub use error::ConfigError;

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::address::{
    DEFAULT_TIMESTAMP_AGE, ResourceLocator, SiteContext, StreamLocator, UrlResolver,
};
use crate::log;

// ============================================================================
// root configuration
// ============================================================================

/// Root configuration structure representing headkit.toml
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Absolute path to the config file (internal use only)
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Directory containing the config file (internal use only)
    #[serde(skip)]
    pub base_dir: PathBuf,

    /// Site settings
    pub site: SiteSection,

    /// Stream scheme → search directories (relative to `site.root`)
    pub streams: BTreeMap<String, Vec<String>>,
}

/// `[site]` section
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SiteSection {
    /// Filesystem root for timestamp lookups and stream directories.
    /// Relative paths are resolved against the config file's directory.
    pub root: PathBuf,
    /// URI prefix for site-relative paths.
    pub root_uri: String,
    /// Scheme and host prepended to URLs that ask for a domain.
    pub domain: String,
    /// Seconds a file counts as recently changed. `<= 0` disables timestamps.
    pub timestamp_age: i64,
}

impl Default for SiteSection {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            root_uri: String::new(),
            domain: String::new(),
            timestamp_age: DEFAULT_TIMESTAMP_AGE,
        }
    }
}

impl SiteConfig {
    /// Load configuration from `path`.
    ///
    /// A missing file yields defaults unless `required` is set.
    pub fn load(path: &Path, required: bool) -> Result<Self, ConfigError> {
        let mut config = if path.exists() {
            Self::from_path(path)?
        } else if required {
            return Err(ConfigError::Io(
                path.to_path_buf(),
                std::io::Error::from(std::io::ErrorKind::NotFound),
            ));
        } else {
            Self::default()
        };

        config.config_path = path.to_path_buf();
        config.base_dir = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();
        config.validate()?;
        Ok(config)
    }

    /// Parse configuration from TOML string
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let (config, ignored) = Self::parse_with_ignored(content)?;
        if !ignored.is_empty() {
            Self::print_unknown_fields_warning(&ignored);
        }
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from file path with unknown field detection.
    fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (config, ignored) = Self::parse_with_ignored(&content)?;
        if !ignored.is_empty() {
            Self::print_unknown_fields_warning(&ignored);
        }
        Ok(config)
    }

    /// Parse TOML content, collecting any unknown fields.
    fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>), ConfigError> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })?;
        Ok((config, ignored))
    }

    fn print_unknown_fields_warning(fields: &[String]) {
        log!("warning"; "ignoring unknown config fields: {}", fields.join(", "));
    }

    /// Stream scheme names must be valid URL schemes.
    fn validate(&self) -> Result<(), ConfigError> {
        for scheme in self.streams.keys() {
            if !is_valid_scheme(scheme) {
                return Err(ConfigError::Validation(format!(
                    "[streams] `{scheme}` is not a valid url scheme"
                )));
            }
        }
        Ok(())
    }

    /// Absolute (or config-relative) site root.
    pub fn site_root(&self) -> PathBuf {
        self.base_dir.join(&self.site.root)
    }

    /// Build the filesystem locator for the configured streams.
    pub fn locator(&self) -> StreamLocator {
        let mut locator = StreamLocator::new(self.site_root());
        for (scheme, prefixes) in &self.streams {
            for prefix in prefixes {
                locator.add_path(scheme.as_str(), prefix.as_str());
            }
        }
        locator
    }

    /// Build a resolver that uses this config for root URI, domain and
    /// the default timestamp window.
    pub fn resolver<'a>(&'a self, locator: &'a dyn ResourceLocator) -> UrlResolver<'a> {
        UrlResolver::new(locator, self, self.site_root())
            .with_timestamp_age(self.site.timestamp_age)
    }
}

impl SiteContext for SiteConfig {
    fn root_uri(&self) -> &str {
        &self.site.root_uri
    }

    fn domain(&self, include: bool) -> &str {
        if include { &self.site.domain } else { "" }
    }
}

/// `ALPHA *( ALPHA / DIGIT / "+" / "-" / "." )`
fn is_valid_scheme(scheme: &str) -> bool {
    let mut chars = scheme.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}

/// Parse config for tests, asserting no unknown fields.
#[cfg(test)]
pub fn test_parse_config(content: &str) -> SiteConfig {
    let (parsed, ignored) = SiteConfig::parse_with_ignored(content).unwrap();
    assert!(
        ignored.is_empty(),
        "test config has unknown fields: {:?}",
        ignored
    );
    parsed
}

// ============================================================================
// tests
// ============================================================================
