//! CLI module for headkit.
//!
//! - `args` - Command-line argument definitions
//! - `render` - Render a manifest of assets to markup
//! - `url` - Resolve resource references

pub mod args;
pub mod render;
pub mod url;

pub use args::{Cli, Commands};
