//! Per-render asset registry.
//!
//! Styles and scripts are kept in separate tables:
//!
//! ```text
//! location ─► priority (BTreeMap) ─► dedupe key ─► Declaration (IndexMap)
//! ```
//!
//! The inner `IndexMap` keeps registration order inside a priority group.
//! A dedupe key lives in at most one group per location.

use std::collections::BTreeMap;

use indexmap::IndexMap;
use rustc_hash::FxHashMap;

use super::declaration::{Declaration, DeclarationError, HeaderTag};
use crate::debug;
use crate::utils::hash;

/// Location used when a template does not name one.
pub const DEFAULT_LOCATION: &str = "head";

/// Declarations for one location, grouped by priority.
#[derive(Debug, Default)]
struct Bucket {
    groups: BTreeMap<i32, IndexMap<String, Declaration>>,
}

impl Bucket {
    /// Insert under `key`, returning whether an earlier entry was replaced.
    ///
    /// Same priority: the entry keeps its slot. Different priority: the old
    /// entry is dropped and the new one goes to the end of its group.
    fn insert(&mut self, priority: i32, key: String, decl: Declaration) -> bool {
        let mut replaced = false;
        for (_, group) in self.groups.iter_mut().filter(|(p, _)| **p != priority) {
            replaced |= group.shift_remove(&key).is_some();
        }
        if replaced {
            self.groups.retain(|_, group| !group.is_empty());
        }

        let group = self.groups.entry(priority).or_default();
        group.insert(key, decl).is_some() || replaced
    }

    /// Highest priority first, registration order within a priority.
    fn iter(&self) -> impl Iterator<Item = &Declaration> {
        self.groups.values().rev().flat_map(IndexMap::values)
    }

    fn len(&self) -> usize {
        self.groups.values().map(IndexMap::len).sum()
    }
}

/// Collects style and script declarations during one render pass.
///
/// Create one per page render; nothing is shared between instances.
///
/// # Example
///
/// ```ignore
/// let mut assets = AssetRegistry::new();
/// assets.register(HeaderTag::stylesheet("/css/site.css"), "head", 10)?;
/// assets.register(HeaderTag::script("/js/app.js").with_defer(true), "footer", 0)?;
///
/// let head = assets.render_styles("head");
/// ```
#[derive(Debug, Default)]
pub struct AssetRegistry {
    styles: FxHashMap<String, Bucket>,
    scripts: FxHashMap<String, Bucket>,
}

impl AssetRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate a header tag and register it.
    ///
    /// Registering the same URL (or inline body) twice at one location keeps
    /// only the latest declaration.
    pub fn register(
        &mut self,
        tag: HeaderTag,
        location: &str,
        priority: i32,
    ) -> Result<(), DeclarationError> {
        let decl = Declaration::try_from(tag)?;
        self.insert(decl, location, priority)
    }

    /// Register a header tag, reporting only whether it was accepted.
    pub fn add_header_tag(&mut self, tag: HeaderTag, location: &str, priority: i32) -> bool {
        let name = tag.tag.clone();
        match self.register(tag, location, priority) {
            Ok(()) => true,
            Err(e) => {
                debug!("assets"; "skipped <{}> for `{}`: {}", name, location, e);
                false
            }
        }
    }

    /// Register an already-typed declaration.
    pub fn insert(
        &mut self,
        decl: Declaration,
        location: &str,
        priority: i32,
    ) -> Result<(), DeclarationError> {
        decl.validate()?;

        let key = hash::fingerprint(decl.identity());
        let table = if decl.is_style() {
            &mut self.styles
        } else {
            &mut self.scripts
        };

        let bucket = table.entry(location.to_string()).or_default();
        if bucket.insert(priority, key, decl) {
            debug!("assets"; "replaced duplicate declaration in `{}`", location);
        }
        Ok(())
    }

    /// Render stylesheet links and `<style>` blocks for a location.
    pub fn render_styles(&self, location: &str) -> Vec<String> {
        Self::render(&self.styles, location)
    }

    /// Render `<script>` tags for a location.
    pub fn render_scripts(&self, location: &str) -> Vec<String> {
        Self::render(&self.scripts, location)
    }

    fn render(table: &FxHashMap<String, Bucket>, location: &str) -> Vec<String> {
        table
            .get(location)
            .map(|bucket| bucket.iter().map(Declaration::to_markup).collect())
            .unwrap_or_default()
    }

    /// All locations with at least one declaration, sorted.
    pub fn locations(&self) -> Vec<&str> {
        let mut locations: Vec<&str> = self
            .styles
            .keys()
            .chain(self.scripts.keys())
            .map(String::as_str)
            .collect();
        locations.sort_unstable();
        locations.dedup();
        locations
    }

    /// Number of distinct declarations across all locations.
    pub fn len(&self) -> usize {
        self.styles
            .values()
            .chain(self.scripts.values())
            .map(Bucket::len)
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every declaration.
    pub fn clear(&mut self) {
        self.styles.clear();
        self.scripts.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn head(registry: &mut AssetRegistry, tag: HeaderTag, priority: i32) {
        registry.register(tag, DEFAULT_LOCATION, priority).unwrap();
    }

    #[test]
    fn test_empty_location() {
        let registry = AssetRegistry::new();
        assert!(registry.render_styles("head").is_empty());
        assert!(registry.render_scripts("footer").is_empty());
        assert!(registry.is_empty());
    }

    #[test]
    fn test_duplicate_href_last_wins() {
        let mut registry = AssetRegistry::new();
        head(&mut registry, HeaderTag::stylesheet("/css/site.css"), 0);
        head(
            &mut registry,
            HeaderTag::stylesheet("/css/site.css").with_media("screen"),
            0,
        );

        let styles = registry.render_styles("head");
        assert_eq!(
            styles,
            vec![r#"<link rel="stylesheet" href="/css/site.css" type="text/css" media="screen" />"#]
        );
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_duplicate_keeps_slot_within_priority() {
        let mut registry = AssetRegistry::new();
        head(&mut registry, HeaderTag::script("/a.js"), 0);
        head(&mut registry, HeaderTag::script("/b.js"), 0);
        head(&mut registry, HeaderTag::script("/a.js").with_async(true), 0);

        let scripts = registry.render_scripts("head");
        assert_eq!(scripts.len(), 2);
        assert!(scripts[0].contains(r#"async="async""#));
        assert!(scripts[0].contains("/a.js"));
        assert!(scripts[1].contains("/b.js"));
    }

    #[test]
    fn test_duplicate_across_priorities() {
        let mut registry = AssetRegistry::new();
        head(&mut registry, HeaderTag::stylesheet("/a.css"), 0);
        head(&mut registry, HeaderTag::stylesheet("/b.css"), 5);
        head(&mut registry, HeaderTag::stylesheet("/a.css"), 10);

        let styles = registry.render_styles("head");
        assert_eq!(styles.len(), 2);
        assert!(styles[0].contains("/a.css"));
        assert!(styles[1].contains("/b.css"));
    }

    #[test]
    fn test_priority_descending() {
        let mut registry = AssetRegistry::new();
        head(&mut registry, HeaderTag::stylesheet("/low.css"), 0);
        head(&mut registry, HeaderTag::stylesheet("/negative.css"), -5);
        head(&mut registry, HeaderTag::stylesheet("/high.css"), 10);

        let styles = registry.render_styles("head");
        assert!(styles[0].contains("/high.css"));
        assert!(styles[1].contains("/low.css"));
        assert!(styles[2].contains("/negative.css"));
    }

    #[test]
    fn test_registration_order_within_priority() {
        let mut registry = AssetRegistry::new();
        head(&mut registry, HeaderTag::inline_script("var c = 3;"), 1);
        head(&mut registry, HeaderTag::inline_script("var a = 1;"), 1);
        head(&mut registry, HeaderTag::inline_script("var b = 2;"), 1);

        let scripts = registry.render_scripts("head");
        assert_eq!(
            scripts,
            vec![
                r#"<script type="text/javascript">var c = 3;</script>"#,
                r#"<script type="text/javascript">var a = 1;</script>"#,
                r#"<script type="text/javascript">var b = 2;</script>"#,
            ]
        );
    }

    #[test]
    fn test_locations_are_separate() {
        let mut registry = AssetRegistry::new();
        registry
            .register(HeaderTag::script("/app.js"), "head", 0)
            .unwrap();
        registry
            .register(HeaderTag::script("/app.js"), "footer", 0)
            .unwrap();

        assert_eq!(registry.render_scripts("head").len(), 1);
        assert_eq!(registry.render_scripts("footer").len(), 1);
        assert_eq!(registry.locations(), vec!["footer", "head"]);
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_styles_and_scripts_are_separate() {
        let mut registry = AssetRegistry::new();
        head(&mut registry, HeaderTag::style("x"), 0);
        head(&mut registry, HeaderTag::inline_script("x"), 0);

        assert_eq!(registry.render_styles("head"), vec!["<style>x</style>"]);
        assert_eq!(registry.render_scripts("head").len(), 1);
    }

    #[test]
    fn test_rejected_tag_registers_nothing() {
        let mut registry = AssetRegistry::new();
        let mut icon = HeaderTag::stylesheet("/favicon.ico");
        icon.rel = Some("icon".to_string());

        assert!(!registry.add_header_tag(icon, "head", 0));
        assert!(!registry.add_header_tag(HeaderTag::new("meta"), "head", 0));
        assert!(registry.add_header_tag(HeaderTag::style("p{}"), "head", 0));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_insert_validates() {
        let mut registry = AssetRegistry::new();
        let decl = Declaration::InlineStyle {
            content: String::new(),
            mime: "text/css".to_string(),
        };
        assert_eq!(
            registry.insert(decl, "head", 0),
            Err(DeclarationError::MissingContent("style"))
        );
        assert!(registry.is_empty());
    }

    #[test]
    fn test_clear() {
        let mut registry = AssetRegistry::new();
        head(&mut registry, HeaderTag::stylesheet("/a.css"), 0);
        head(&mut registry, HeaderTag::script("/a.js"), 0);
        registry.clear();

        assert!(registry.is_empty());
        assert!(registry.locations().is_empty());
        assert!(registry.render_styles("head").is_empty());
    }
}
