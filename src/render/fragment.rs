//! Rendered HTML fragments.

use super::style::style_for;
use crate::classify::HeadingTier;
use serde::Serialize;

/// What a fragment was rendered from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "tier", rename_all = "snake_case")]
pub enum FragmentKind {
    /// A text line of the given tier
    Text(HeadingTier),
    /// An image reference
    Image,
}

/// One HTML snippet produced for one content event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedFragment {
    /// Fragment kind
    pub kind: FragmentKind,

    /// HTML markup
    pub markup: String,
}

impl RenderedFragment {
    /// Create a text fragment.
    pub fn text(tier: HeadingTier, markup: impl Into<String>) -> Self {
        Self {
            kind: FragmentKind::Text(tier),
            markup: markup.into(),
        }
    }

    /// Create an image fragment.
    pub fn image(markup: impl Into<String>) -> Self {
        Self {
            kind: FragmentKind::Image,
            markup: markup.into(),
        }
    }

    /// Tier of a text fragment.
    pub fn tier(&self) -> Option<HeadingTier> {
        match self.kind {
            FragmentKind::Text(tier) => Some(tier),
            FragmentKind::Image => None,
        }
    }

    /// Check if this is an image fragment.
    pub fn is_image(&self) -> bool {
        self.kind == FragmentKind::Image
    }
}

/// Wraps classified text lines in styled tags.
#[derive(Debug, Clone, Default)]
pub struct FragmentRenderer {
    raw_text: bool,
}

impl FragmentRenderer {
    /// Create a renderer that HTML-escapes text.
    pub fn new() -> Self {
        Self::default()
    }

    /// Embed text without escaping.
    pub fn with_raw_text(mut self, raw: bool) -> Self {
        self.raw_text = raw;
        self
    }

    /// Render one text line. Blank lines render nothing.
    pub fn render_text(&self, text: &str, tier: HeadingTier) -> Option<RenderedFragment> {
        let (tag, style) = tier.tag().zip(style_for(tier))?;
        let text = text.trim();
        let body = if self.raw_text {
            text.into()
        } else {
            html_escape::encode_text(text)
        };
        Some(RenderedFragment::text(
            tier,
            format!(r#"<{tag} style="{style}">{body}</{tag}>"#),
        ))
    }
}
