//! Serialize declarations to HTML fragments.
//!
//! Attribute values are escaped; `<style>`/`<script>` bodies are emitted
//! verbatim since they are raw text.

use std::fmt::Write;

use super::declaration::{Declaration, MIME_CSS};
use crate::utils::html::escape_attr;

impl Declaration {
    /// Render this declaration as a single HTML fragment.
    pub fn to_markup(&self) -> String {
        let mut html = String::new();
        match self {
            Self::Stylesheet { href, mime, media } => {
                write!(
                    html,
                    r#"<link rel="stylesheet" href="{}" type="{}""#,
                    escape_attr(href),
                    escape_attr(mime)
                )
                .ok();
                if let Some(media) = media {
                    write!(html, r#" media="{}""#, escape_attr(media)).ok();
                }
                html.push_str(" />");
            }
            Self::InlineStyle { content, mime } => {
                html.push_str("<style");
                if mime != MIME_CSS {
                    write!(html, r#" type="{}""#, escape_attr(mime)).ok();
                }
                write!(html, ">{content}</style>").ok();
            }
            Self::Script {
                src,
                mime,
                defer,
                r#async,
            } => {
                write!(html, r#"<script type="{}""#, escape_attr(mime)).ok();
                if *r#async {
                    html.push_str(r#" async="async""#);
                }
                if *defer {
                    html.push_str(r#" defer="defer""#);
                }
                write!(html, r#" src="{}"></script>"#, escape_attr(src)).ok();
            }
            Self::InlineScript { content, mime } => {
                write!(
                    html,
                    r#"<script type="{}">{content}</script>"#,
                    escape_attr(mime)
                )
                .ok();
            }
        }
        html
    }
}
