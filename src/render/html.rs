//! HTML page assembly.

use super::fragment::{FragmentKind, RenderedFragment};
use super::options::RenderOptions;
use super::style::STYLE_CONTAINER;
use crate::classify::HeadingTier;
use regex::Regex;

/// Title used when there is no H1 and no caller-supplied title.
pub const DEFAULT_TITLE: &str = "您的文章標題";

/// Description used when the article has no body paragraph.
pub const DEFAULT_DESCRIPTION: &str = "一篇精彩的文章內容。";

/// Longest meta description, in characters, before `...` is appended.
pub const META_DESCRIPTION_LIMIT: usize = 150;

/// A complete page and the values derived for its head.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssembledPage {
    /// The HTML document
    pub html: String,
    /// Page title, unescaped
    pub title: String,
    /// Meta description, unescaped
    pub meta_description: String,
}

/// Builds the final page from body fragments.
#[derive(Debug, Clone)]
pub struct HtmlAssembler {
    tag_pattern: Regex,
}

impl Default for HtmlAssembler {
    fn default() -> Self {
        Self::new()
    }
}

impl HtmlAssembler {
    /// Create an assembler.
    pub fn new() -> Self {
        Self {
            tag_pattern: Regex::new(r"<[^>]*>").expect("tag pattern is valid"),
        }
    }

    /// Visible text of a fragment: tags removed, entities decoded, trimmed.
    pub fn inner_text(&self, markup: &str) -> String {
        let stripped = self.tag_pattern.replace_all(markup, "");
        html_escape::decode_html_entities(&stripped).trim().to_string()
    }

    /// Text of the first fragment of the given tier.
    fn first_text(&self, fragments: &[RenderedFragment], tier: HeadingTier) -> Option<String> {
        fragments
            .iter()
            .find(|f| f.kind == FragmentKind::Text(tier))
            .map(|f| self.inner_text(&f.markup))
    }

    /// The first H1's text, else `default_title`, else [`DEFAULT_TITLE`].
    pub fn title(&self, fragments: &[RenderedFragment], default_title: Option<&str>) -> String {
        self.first_text(fragments, HeadingTier::H1)
            .filter(|t| !t.is_empty())
            .or_else(|| {
                default_title
                    .map(str::trim)
                    .filter(|t| !t.is_empty())
                    .map(str::to_string)
            })
            .unwrap_or_else(|| DEFAULT_TITLE.to_string())
    }

    /// Description from the first body paragraph.
    ///
    /// Longer than [`META_DESCRIPTION_LIMIT`] characters is cut there and
    /// `...` appended. Double quotes become single quotes.
    pub fn meta_description(&self, fragments: &[RenderedFragment]) -> String {
        let Some(text) = self.first_text(fragments, HeadingTier::Paragraph) else {
            return DEFAULT_DESCRIPTION.to_string();
        };
        let description = if text.chars().count() > META_DESCRIPTION_LIMIT {
            let cut: String = text.chars().take(META_DESCRIPTION_LIMIT).collect();
            format!("{}...", cut)
        } else {
            text
        };
        description.replace('"', "'")
    }

    /// Join the fragments into a complete HTML document.
    pub fn assemble(
        &self,
        fragments: &[RenderedFragment],
        default_title: Option<&str>,
        options: &RenderOptions,
    ) -> AssembledPage {
        let title = self.title(fragments, default_title);
        let meta_description = self.meta_description(fragments);

        let (title_html, description_attr) = if options.raw_text {
            (title.clone(), meta_description.clone())
        } else {
            (
                html_escape::encode_text(&title).into_owned(),
                html_escape::encode_double_quoted_attribute(&meta_description).into_owned(),
            )
        };
        let lang = html_escape::encode_double_quoted_attribute(&options.lang);

        let mut body = fragments
            .iter()
            .map(|f| f.markup.as_str())
            .collect::<Vec<_>>()
            .join("\n");
        if options.wrap_container {
            body = format!("<div style=\"{}\">\n{}\n</div>", STYLE_CONTAINER, body);
        }

        let html = format!(
            r#"<!DOCTYPE html>
<html lang="{lang}">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <meta name="description" content="{description_attr}">
    <title>{title_html}</title>
</head>
<body>
{body}
</body>
</html>"#
        );

        AssembledPage {
            html,
            title,
            meta_description,
        }
    }
}

/// Assemble a page with a fresh [`HtmlAssembler`].
pub fn assemble(
    fragments: &[RenderedFragment],
    default_title: Option<&str>,
    options: &RenderOptions,
) -> AssembledPage {
    HtmlAssembler::new().assemble(fragments, default_title, options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::fragment::FragmentRenderer;

    fn text(tier: HeadingTier, s: &str) -> RenderedFragment {
        FragmentRenderer::new().render_text(s, tier).unwrap()
    }

    #[test]
    fn test_title_from_h1() {
        let fragments = vec![
            text(HeadingTier::H1, "春季 & 夏季"),
            text(HeadingTier::Paragraph, "內文。"),
        ];
        let page = assemble(&fragments, Some("file.docx"), &RenderOptions::default());
        assert_eq!(page.title, "春季 & 夏季");
        assert!(page.html.contains("<title>春季 &amp; 夏季</title>"));
    }

    #[test]
    fn test_title_fallbacks() {
        let fragments = vec![text(HeadingTier::Paragraph, "只有內文。")];
        let assembler = HtmlAssembler::new();
        assert_eq!(assembler.title(&fragments, Some("稿件.docx")), "稿件.docx");
        assert_eq!(assembler.title(&fragments, Some("  ")), DEFAULT_TITLE);
        assert_eq!(assembler.title(&fragments, None), DEFAULT_TITLE);
    }

    #[test]
    fn test_meta_description_short() {
        let body = "字".repeat(80);
        let fragments = vec![text(HeadingTier::Paragraph, &body)];
        assert_eq!(HtmlAssembler::new().meta_description(&fragments), body);
    }

    #[test]
    fn test_meta_description_truncated() {
        let body = "字".repeat(200);
        let fragments = vec![text(HeadingTier::Paragraph, &body)];
        let description = HtmlAssembler::new().meta_description(&fragments);
        assert_eq!(description, format!("{}...", "字".repeat(150)));
        assert_eq!(description.chars().count(), 153);
    }

    #[test]
    fn test_meta_description_exactly_limit() {
        let body = "a".repeat(META_DESCRIPTION_LIMIT);
        let fragments = vec![text(HeadingTier::Paragraph, &body)];
        assert_eq!(HtmlAssembler::new().meta_description(&fragments), body);
    }

    #[test]
    fn test_meta_description_quotes_and_default() {
        let fragments = vec![
            text(HeadingTier::H1, "標題"),
            text(HeadingTier::Paragraph, r#"他說"你好"。"#),
        ];
        let page = assemble(&fragments, None, &RenderOptions::default());
        assert_eq!(page.meta_description, "他說'你好'。");
        assert!(page
            .html
            .contains(r#"<meta name="description" content="他說'你好'。">"#));

        let no_paragraph = vec![text(HeadingTier::H1, "標題")];
        assert_eq!(
            HtmlAssembler::new().meta_description(&no_paragraph),
            DEFAULT_DESCRIPTION
        );
    }

    #[test]
    fn test_shell_structure() {
        let fragments = vec![
            text(HeadingTier::H1, "標題"),
            text(HeadingTier::Paragraph, "內文。"),
        ];
        let page = assemble(&fragments, None, &RenderOptions::default());
        assert!(page.html.starts_with("<!DOCTYPE html>\n<html lang=\"zh-Hant\">"));
        assert!(page.html.contains("<meta charset=\"UTF-8\">"));
        assert!(page.html.contains(&format!(
            "<body>\n{}\n{}\n</body>",
            fragments[0].markup, fragments[1].markup
        )));
        assert!(page.html.ends_with("</html>"));
    }

    #[test]
    fn test_container_and_lang() {
        let fragments = vec![text(HeadingTier::H1, "Title")];
        let options = RenderOptions::new().with_container(true).with_lang("en");
        let page = assemble(&fragments, None, &options);
        assert!(page.html.contains("<html lang=\"en\">"));
        assert!(page
            .html
            .contains(&format!("<body>\n<div style=\"{}\">\n", STYLE_CONTAINER)));
    }

    #[test]
    fn test_inner_text() {
        let assembler = HtmlAssembler::new();
        assert_eq!(
            assembler.inner_text(r#"<p style="x"> a &amp; <b>b</b> </p>"#),
            "a & b"
        );
    }
}
