//! Utility modules shared by the registry and the resolver.

pub mod hash;
pub mod html;
pub mod mtime;
