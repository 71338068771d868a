//! `headkit render`: register a manifest of assets and print the markup.
//!
//! ```toml
//! [[assets]]
//! tag = "link"
//! rel = "stylesheet"
//! href = "theme://css/site.css"
//! priority = 10
//!
//! [[assets]]
//! tag = "script"
//! src = "js/app.js"
//! defer = true
//! location = "footer"
//! ```

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use headkit::document::DEFAULT_LOCATION;
use headkit::{AssetRegistry, HeaderTag, SiteConfig, UrlResolver, debug, log};
use serde::Deserialize;

use super::args::RenderArgs;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Manifest {
    assets: Vec<ManifestEntry>,
}

#[derive(Debug, Deserialize)]
struct ManifestEntry {
    #[serde(flatten)]
    tag: HeaderTag,
    #[serde(default = "default_location")]
    location: String,
    #[serde(default)]
    priority: i32,
}

fn default_location() -> String {
    DEFAULT_LOCATION.to_string()
}

pub fn run_render(args: &RenderArgs, config: &SiteConfig) -> Result<()> {
    for line in render_lines(args, config)? {
        println!("{line}");
    }
    Ok(())
}

/// Register the manifest and collect the location's markup, styles first.
fn render_lines(args: &RenderArgs, config: &SiteConfig) -> Result<Vec<String>> {
    let manifest = read_manifest(&args.manifest)?;
    let locator = config.locator();
    let resolver = config.resolver(&locator);

    let mut registry = AssetRegistry::new();
    for (index, entry) in manifest.assets.into_iter().enumerate() {
        let ManifestEntry {
            mut tag,
            location,
            priority,
        } = entry;

        if args.resolve && !resolve_tag(&mut tag, &resolver) {
            log!("warning"; "assets[{}]: skipped unresolved <{}>", index, tag.tag);
            continue;
        }
        if let Err(e) = registry.register(tag, &location, priority) {
            log!("warning"; "assets[{}]: {}", index, e);
        }
    }

    debug!("assets"; "{} declaration(s) in {:?}", registry.len(), registry.locations());

    let mut lines = registry.render_styles(&args.location);
    lines.extend(registry.render_scripts(&args.location));
    Ok(lines)
}

fn read_manifest(path: &Path) -> Result<Manifest> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read manifest `{}`", path.display()))?;
    toml::from_str(&content).with_context(|| format!("invalid manifest `{}`", path.display()))
}

/// Rewrite `href`/`src` to resolved URLs. Returns false if one failed.
fn resolve_tag(tag: &mut HeaderTag, resolver: &UrlResolver<'_>) -> bool {
    for field in [&mut tag.href, &mut tag.src] {
        if let Some(value) = field.as_deref()
            && !value.is_empty()
        {
            match resolver.resolve(value, false, None) {
                Some(resolved) => *field = Some(resolved),
                None => return false,
            }
        }
    }
    true
}
