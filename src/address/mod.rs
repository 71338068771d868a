//! Resource reference resolution.
//!
//! | Module    | Purpose                                        |
//! |-----------|------------------------------------------------|
//! | `parts`   | Split a reference into scheme/host/path/...    |
//! | `locator` | Map virtual stream schemes to site files       |
//! | `site`    | Root URI and domain hooks                      |
//! | `resolve` | Turn a reference into a page URL               |

mod locator;
mod parts;
mod resolve;
mod site;

pub use locator::{NoStreams, ResourceLocator, StreamLocator};
pub use parts::UrlParts;
pub use resolve::{DEFAULT_TIMESTAMP_AGE, UrlError, UrlResolver};
pub use site::{SiteContext, SiteUrls};
