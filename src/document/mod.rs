//! Style and script registry for page rendering.
//!
//! Templates register `<link>`, `<style>` and `<script>` tags while a page
//! renders; the registry deduplicates them and hands back ordered markup
//! for each insertion point (`head`, `footer`, ...).

mod declaration;
mod markup;
mod registry;

pub use declaration::{Declaration, DeclarationError, HeaderTag, MIME_CSS, MIME_JAVASCRIPT};
pub use registry::{AssetRegistry, DEFAULT_LOCATION};
