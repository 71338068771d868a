//! Resolve resource references into page URLs.
//!
//! ```text
//! #top                     → #top                      (fragment only)
//! https://cdn.example/a.js → https://cdn.example/a.js  (external)
//! theme://css/site.css     → /themes/base/css/site.css (stream, via locator)
//! css/site.css             → /css/site.css?65f1c2a0    (relative, recent file)
//! /media/logo.png          → /media/logo.png           (root-relative)
//! ```

use std::path::{Path, PathBuf};
use std::time::SystemTime;

use thiserror::Error;

use super::locator::ResourceLocator;
use super::parts::UrlParts;
use super::site::SiteContext;
use crate::debug;
use crate::utils::mtime;

/// Files changed within this many seconds get a timestamp (one week).
pub const DEFAULT_TIMESTAMP_AGE: i64 = 604_800;

/// Reason a reference could not be resolved.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UrlError {
    #[error("empty url")]
    Empty,

    #[error("cannot parse url `{0}`")]
    Parse(String),

    #[error("resource `{0}` not found")]
    NotFound(String),
}

/// Turns resource references into URLs for rendered pages.
///
/// Holds no mutable state; one resolver can serve any number of renders.
pub struct UrlResolver<'a> {
    locator: &'a dyn ResourceLocator,
    site: &'a dyn SiteContext,
    /// Filesystem directory that relative paths are looked up in.
    root: PathBuf,
    timestamp_age: i64,
}

impl<'a> UrlResolver<'a> {
    pub fn new(
        locator: &'a dyn ResourceLocator,
        site: &'a dyn SiteContext,
        root: impl Into<PathBuf>,
    ) -> Self {
        Self {
            locator,
            site,
            root: root.into(),
            timestamp_age: DEFAULT_TIMESTAMP_AGE,
        }
    }

    /// Default cache-busting window in seconds. `<= 0` disables timestamps.
    pub fn with_timestamp_age(mut self, seconds: i64) -> Self {
        self.timestamp_age = seconds;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn site_url(&self) -> &str {
        self.site.site_url()
    }

    /// Resolve `url`, returning `None` if it is empty, unparseable or
    /// names a stream resource that does not exist.
    ///
    /// `timestamp_age` overrides the resolver's default window for this call.
    pub fn resolve(
        &self,
        url: &str,
        add_domain: bool,
        timestamp_age: Option<i64>,
    ) -> Option<String> {
        match self.try_resolve(url, add_domain, timestamp_age) {
            Ok(resolved) => Some(resolved),
            Err(e) => {
                debug!("url"; "{}", e);
                None
            }
        }
    }

    /// Like [`resolve`](Self::resolve), but reports why resolution failed.
    pub fn try_resolve(
        &self,
        url: &str,
        add_domain: bool,
        timestamp_age: Option<i64>,
    ) -> Result<String, UrlError> {
        if url.is_empty() {
            return Err(UrlError::Empty);
        }
        if url.starts_with('#') {
            return Ok(url.to_string());
        }

        let parts = UrlParts::parse(url).ok_or_else(|| UrlError::Parse(url.to_string()))?;
        let mut path = parts.path.clone();

        if let Some(scheme) = parts.scheme.as_deref()
            && parts.port.is_none()
        {
            if !self.locator.scheme_exists(scheme) {
                return Ok(url.to_string());
            }
            let host = parts.host.as_deref().unwrap_or("");
            let uri = format!("{scheme}://{host}{path}");
            path = self
                .locator
                .find_resource(&uri)
                .ok_or(UrlError::NotFound(uri))?;
        } else if parts.has_authority() {
            return Ok(url.to_string());
        }

        let mut query = parts.query.filter(|q| !q.is_empty());

        if !path.is_empty() && !path.starts_with(['/', '.']) {
            let age = timestamp_age.unwrap_or(self.timestamp_age);
            if let Some(stamp) = mtime::recent_mtime(&self.root.join(&path), age, SystemTime::now())
            {
                query = Some(match query {
                    Some(q) => format!("{q}&{stamp:x}"),
                    None => format!("{stamp:x}"),
                });
            }
            path = format!("{}/{}", self.site.root_uri().trim_end_matches('/'), path);
        }

        let mut uri = path;
        if let Some(query) = query {
            if uri.is_empty() {
                uri = self.site.root_uri().to_string();
            }
            uri.push('?');
            uri.push_str(&query);
        }
        if let Some(fragment) = parts.fragment.filter(|f| !f.is_empty()) {
            if uri.is_empty() {
                uri = self.site.root_uri().to_string();
            }
            uri.push('#');
            uri.push_str(&fragment);
        }

        Ok(format!("{}{}", self.site.domain(add_domain), uri))
    }
}
