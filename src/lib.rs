//! headkit - page asset registry and resource URL resolver.
//!
//! Two independent pieces for HTML templating:
//!
//! - [`document::AssetRegistry`] collects `<link>`, `<style>` and `<script>`
//!   declarations during a render and hands back deduplicated,
//!   priority-ordered markup per insertion point.
//! - [`address::UrlResolver`] turns resource references (relative paths,
//!   virtual stream URLs, external URLs) into page URLs, adding
//!   cache-busting timestamps to recently changed files.

pub mod logger;

pub mod address;
pub mod config;
pub mod document;
pub mod utils;

pub use address::{ResourceLocator, SiteContext, StreamLocator, UrlError, UrlResolver};
pub use config::{ConfigError, SiteConfig};
pub use document::{AssetRegistry, Declaration, DeclarationError, HeaderTag};
