//! Header tag input and the typed declarations it converts into.
//!
//! `HeaderTag` mirrors the loose attribute map a template emits
//! (`{ tag = "link", rel = "stylesheet", href = "..." }`).
//! `Declaration` is the validated form: only the four shapes the
//! registry can render are representable.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default mime type for stylesheets and `<style>` blocks.
pub const MIME_CSS: &str = "text/css";
/// Default mime type for scripts.
pub const MIME_JAVASCRIPT: &str = "text/javascript";

// ============================================================================
// HeaderTag (loose input)
// ============================================================================

/// Attribute map for a `<link>`, `<style>` or `<script>` tag.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeaderTag {
    /// Element name: `link`, `style` or `script`.
    pub tag: String,
    pub href: Option<String>,
    pub rel: Option<String>,
    /// Mime type (`type` attribute).
    #[serde(rename = "type")]
    pub mime: Option<String>,
    pub media: Option<String>,
    /// Inline body for `<style>` and `<script>`.
    pub content: Option<String>,
    pub src: Option<String>,
    pub defer: bool,
    #[serde(rename = "async")]
    pub r#async: bool,
}

impl HeaderTag {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Self::default()
        }
    }

    /// `<link rel="stylesheet" href="...">`
    pub fn stylesheet(href: impl Into<String>) -> Self {
        Self {
            href: Some(href.into()),
            rel: Some("stylesheet".to_string()),
            ..Self::new("link")
        }
    }

    /// `<style>...</style>`
    pub fn style(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            ..Self::new("style")
        }
    }

    /// `<script src="..."></script>`
    pub fn script(src: impl Into<String>) -> Self {
        Self {
            src: Some(src.into()),
            ..Self::new("script")
        }
    }

    /// `<script>...</script>`
    pub fn inline_script(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            ..Self::new("script")
        }
    }

    pub fn with_mime(mut self, mime: impl Into<String>) -> Self {
        self.mime = Some(mime.into());
        self
    }

    pub fn with_media(mut self, media: impl Into<String>) -> Self {
        self.media = Some(media.into());
        self
    }

    pub fn with_defer(mut self, defer: bool) -> Self {
        self.defer = defer;
        self
    }

    pub fn with_async(mut self, r#async: bool) -> Self {
        self.r#async = r#async;
        self
    }
}

// ============================================================================
// Declaration (validated)
// ============================================================================

/// A style or script the registry can render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Declaration {
    /// External stylesheet (`<link rel="stylesheet">`).
    Stylesheet {
        href: String,
        mime: String,
        media: Option<String>,
    },
    /// Inline `<style>` block.
    InlineStyle { content: String, mime: String },
    /// External script (`<script src>`).
    Script {
        src: String,
        mime: String,
        defer: bool,
        r#async: bool,
    },
    /// Inline `<script>` block.
    InlineScript { content: String, mime: String },
}

/// Reason a header tag was not registered.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeclarationError {
    #[error("unsupported tag `{0}` (expected link, style or script)")]
    UnsupportedTag(String),

    #[error("link tag has no href")]
    MissingHref,

    #[error("link tag is not a stylesheet (rel = {0:?})")]
    NotStylesheet(Option<String>),

    #[error("{0} tag has no content")]
    MissingContent(&'static str),

    #[error("script tag has neither src nor content")]
    MissingSource,
}

impl Declaration {
    /// Whether this declaration renders into the style list.
    pub const fn is_style(&self) -> bool {
        matches!(self, Self::Stylesheet { .. } | Self::InlineStyle { .. })
    }

    /// Payload that identifies the declaration: the URL for files,
    /// the body for inline blocks.
    pub fn identity(&self) -> &str {
        match self {
            Self::Stylesheet { href, .. } => href,
            Self::Script { src, .. } => src,
            Self::InlineStyle { content, .. } | Self::InlineScript { content, .. } => content,
        }
    }

    /// Check the required fields of a hand-built declaration.
    pub fn validate(&self) -> Result<(), DeclarationError> {
        match self {
            Self::Stylesheet { href, .. } if href.is_empty() => Err(DeclarationError::MissingHref),
            Self::InlineStyle { content, .. } if content.is_empty() => {
                Err(DeclarationError::MissingContent("style"))
            }
            Self::Script { src, .. } if src.is_empty() => Err(DeclarationError::MissingSource),
            Self::InlineScript { content, .. } if content.is_empty() => {
                Err(DeclarationError::MissingContent("script"))
            }
            _ => Ok(()),
        }
    }
}

/// Treat empty strings the same as absent attributes.
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

impl TryFrom<HeaderTag> for Declaration {
    type Error = DeclarationError;

    fn try_from(tag: HeaderTag) -> Result<Self, Self::Error> {
        let mime = non_empty(tag.mime);

        match tag.tag.as_str() {
            "link" => {
                let href = non_empty(tag.href).ok_or(DeclarationError::MissingHref)?;
                if tag.rel.as_deref() != Some("stylesheet") {
                    return Err(DeclarationError::NotStylesheet(tag.rel));
                }
                Ok(Self::Stylesheet {
                    href,
                    mime: mime.unwrap_or_else(|| MIME_CSS.to_string()),
                    media: non_empty(tag.media),
                })
            }
            "style" => {
                let content =
                    non_empty(tag.content).ok_or(DeclarationError::MissingContent("style"))?;
                Ok(Self::InlineStyle {
                    content,
                    mime: mime.unwrap_or_else(|| MIME_CSS.to_string()),
                })
            }
            "script" => {
                let mime = mime.unwrap_or_else(|| MIME_JAVASCRIPT.to_string());
                if let Some(src) = non_empty(tag.src) {
                    Ok(Self::Script {
                        src,
                        mime,
                        defer: tag.defer,
                        r#async: tag.r#async,
                    })
                } else if let Some(content) = non_empty(tag.content) {
                    Ok(Self::InlineScript { content, mime })
                } else {
                    Err(DeclarationError::MissingSource)
                }
            }
            other => Err(DeclarationError::UnsupportedTag(other.to_string())),
        }
    }
}
