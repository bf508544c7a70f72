//! Rendering options and configuration.

use crate::classify::HeadingRules;
use std::str::FromStr;

/// Default value of the `lang` attribute on `<html>`.
pub const DEFAULT_LANG: &str = "zh-Hant";

/// Options for rendering an article.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// How embedded images are emitted
    pub image_mode: ImageMode,

    /// Heading classification rules
    pub heading_rules: HeadingRules,

    /// Embed text as-is instead of HTML-escaping it
    pub raw_text: bool,

    /// Wrap the body fragments in one centered container `<div>`
    pub wrap_container: bool,

    /// Value of the `lang` attribute on `<html>`
    pub lang: String,
}

impl RenderOptions {
    /// Create new render options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the image mode.
    pub fn with_image_mode(mut self, mode: ImageMode) -> Self {
        self.image_mode = mode;
        self
    }

    /// Embed images as data URIs.
    pub fn inline_images(mut self) -> Self {
        self.image_mode = ImageMode::Inline;
        self
    }

    /// Emit numbered placeholders and return the images separately.
    pub fn placeholder_images(mut self) -> Self {
        self.image_mode = ImageMode::Placeholder;
        self
    }

    /// Set the heading rules.
    pub fn with_heading_rules(mut self, rules: HeadingRules) -> Self {
        self.heading_rules = rules;
        self
    }

    /// Set the short-line threshold of the heading rules.
    pub fn with_heading_threshold(mut self, threshold: usize) -> Self {
        self.heading_rules.short_line_threshold = threshold;
        self
    }

    /// Enable or disable raw (unescaped) text.
    pub fn with_raw_text(mut self, raw: bool) -> Self {
        self.raw_text = raw;
        self
    }

    /// Enable or disable the container `<div>`.
    pub fn with_container(mut self, wrap: bool) -> Self {
        self.wrap_container = wrap;
        self
    }

    /// Set the document language.
    pub fn with_lang(mut self, lang: impl Into<String>) -> Self {
        self.lang = lang.into();
        self
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            image_mode: ImageMode::default(),
            heading_rules: HeadingRules::default(),
            raw_text: false,
            wrap_container: false,
            lang: DEFAULT_LANG.to_string(),
        }
    }
}

/// How embedded images appear in the HTML.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImageMode {
    /// Base64 data URI inside the page
    Inline,
    /// Numbered placeholder comments; image bytes returned separately
    #[default]
    Placeholder,
}

impl ImageMode {
    /// Name used on the command line and in manifests.
    pub fn as_str(&self) -> &'static str {
        match self {
            ImageMode::Inline => "inline",
            ImageMode::Placeholder => "placeholder",
        }
    }
}

impl FromStr for ImageMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "inline" | "embed" => Ok(ImageMode::Inline),
            "placeholder" | "external" => Ok(ImageMode::Placeholder),
            other => Err(format!(
                "invalid image mode '{}' (expected 'inline' or 'placeholder')",
                other
            )),
        }
    }
}

impl std::fmt::Display for ImageMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_options_builder() {
        let options = RenderOptions::new()
            .inline_images()
            .with_heading_threshold(20)
            .with_raw_text(true)
            .with_container(true)
            .with_lang("en");

        assert_eq!(options.image_mode, ImageMode::Inline);
        assert_eq!(options.heading_rules.short_line_threshold, 20);
        assert!(options.raw_text);
        assert!(options.wrap_container);
        assert_eq!(options.lang, "en");
    }

    #[test]
    fn test_defaults() {
        let options = RenderOptions::default();
        assert_eq!(options.image_mode, ImageMode::Placeholder);
        assert_eq!(options.heading_rules.short_line_threshold, 35);
        assert!(!options.raw_text);
        assert_eq!(options.lang, DEFAULT_LANG);
    }

    #[test]
    fn test_image_mode_parse() {
        assert_eq!("inline".parse::<ImageMode>().unwrap(), ImageMode::Inline);
        assert_eq!(" Placeholder ".parse::<ImageMode>().unwrap(), ImageMode::Placeholder);
        assert!("base64".parse::<ImageMode>().is_err());
        assert_eq!(ImageMode::Inline.to_string(), "inline");
    }
}
