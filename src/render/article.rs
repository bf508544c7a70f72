//! Event stream → article.

use super::fragment::{FragmentRenderer, RenderedFragment};
use super::html::HtmlAssembler;
use super::image::{resolver_for, ImageResolver};
use super::options::RenderOptions;
use super::result::{Article, Conversion, ConversionStats};
use crate::classify::{HeadingClassifier, HeadingTier};
use crate::extract::Extraction;
use crate::model::{ContentEvent, ResourceTable};

/// Mutable state of one conversion.
#[derive(Debug)]
pub struct RenderContext {
    awaiting_title: bool,
    stats: ConversionStats,
}

impl Default for RenderContext {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderContext {
    /// Fresh state: no title seen yet.
    pub fn new() -> Self {
        Self {
            awaiting_title: true,
            stats: ConversionStats::new(),
        }
    }

    /// Statistics so far.
    pub fn stats(&self) -> &ConversionStats {
        &self.stats
    }

    /// Take the collected statistics.
    pub fn into_stats(self) -> ConversionStats {
        self.stats
    }
}

/// Renders extracted content into a newsletter article.
#[derive(Debug, Clone)]
pub struct ArticleRenderer {
    options: RenderOptions,
    classifier: HeadingClassifier,
    text: FragmentRenderer,
    assembler: HtmlAssembler,
}

impl Default for ArticleRenderer {
    fn default() -> Self {
        Self::new(RenderOptions::default())
    }
}

impl ArticleRenderer {
    /// Create a renderer.
    pub fn new(options: RenderOptions) -> Self {
        Self {
            classifier: HeadingClassifier::new(options.heading_rules.clone()),
            text: FragmentRenderer::new().with_raw_text(options.raw_text),
            assembler: HtmlAssembler::new(),
            options,
        }
    }

    /// The options in use.
    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Render events into body fragments, in order.
    pub fn render_fragments(
        &self,
        events: &[ContentEvent],
        resources: &ResourceTable,
        resolver: &mut dyn ImageResolver,
        ctx: &mut RenderContext,
    ) -> Vec<RenderedFragment> {
        let mut fragments = Vec::with_capacity(events.len());
        for event in events {
            match event {
                ContentEvent::TextLine { raw } => {
                    if let Some(fragment) = self.render_line(raw, ctx) {
                        fragments.push(fragment);
                    }
                }
                ContentEvent::ImageRef { resource_id } => {
                    match resolver.resolve(resource_id, resources) {
                        Some(fragment) => {
                            ctx.stats.add_image_ref();
                            fragments.push(fragment);
                        }
                        None => ctx.stats.add_unresolved_image(),
                    }
                }
            }
        }
        fragments
    }

    fn render_line(&self, raw: &str, ctx: &mut RenderContext) -> Option<RenderedFragment> {
        let tier = self.classifier.classify(raw, ctx.awaiting_title);
        ctx.stats.add_text(tier, raw);
        if tier == HeadingTier::Blank {
            return None;
        }
        ctx.awaiting_title = false;
        self.text.render_text(raw, tier)
    }

    /// Render a whole extraction.
    ///
    /// Returns [`Conversion::Empty`] when the document has neither text nor
    /// images.
    pub fn render(&self, extraction: Extraction, default_title: Option<&str>) -> Conversion {
        let mut ctx = RenderContext::new();
        let mut resolver = resolver_for(self.options.image_mode);

        let fragments = self.render_fragments(
            &extraction.events,
            &extraction.resources,
            resolver.as_mut(),
            &mut ctx,
        );
        let images = resolver.finish(&extraction.resources);

        if fragments.is_empty() && extraction.resources.is_empty() {
            log::debug!("nothing to render");
            return Conversion::Empty;
        }

        let mut stats = ctx.into_stats();
        stats.image_count = extraction.resources.len() as u32;
        stats.table_count = extraction.table_count as u32;
        stats.blank_line_count += extraction.blank_paragraphs as u32;
        stats.unresolved_image_count += extraction.unresolved_images as u32;

        let page = self
            .assembler
            .assemble(&fragments, default_title, &self.options);

        log::debug!(
            "rendered {} fragments ({} headings, {} images returned separately)",
            fragments.len(),
            stats.heading_count(),
            images.len()
        );

        Conversion::Article(Article {
            html: page.html,
            title: page.title,
            meta_description: page.meta_description,
            fragments,
            images,
            metadata: extraction.metadata,
            stats,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ImageResource;
    use crate::render::image::PlaceholderImages;
    use crate::render::FragmentKind;

    fn extraction(events: Vec<ContentEvent>, resources: ResourceTable) -> Extraction {
        Extraction {
            events,
            resources,
            ..Default::default()
        }
    }

    #[test]
    fn test_first_nonblank_line_is_title() {
        let renderer = ArticleRenderer::default();
        let mut ctx = RenderContext::new();
        let events = vec![
            ContentEvent::text("   "),
            ContentEvent::text("這是一段很長的說明文字。"),
            ContentEvent::text("結語"),
        ];
        let fragments = renderer.render_fragments(
            &events,
            &ResourceTable::new(),
            &mut PlaceholderImages::new(),
            &mut ctx,
        );

        let kinds: Vec<FragmentKind> = fragments.iter().map(|f| f.kind).collect();
        assert_eq!(
            kinds,
            vec![
                FragmentKind::Text(HeadingTier::H1),
                FragmentKind::Text(HeadingTier::H3)
            ]
        );
        assert_eq!(ctx.stats().blank_line_count, 1);
    }

    #[test]
    fn test_image_before_title_keeps_title_pending() {
        let resources: ResourceTable = vec![ImageResource::png("rId1", vec![1])]
            .into_iter()
            .collect();
        let events = vec![ContentEvent::image("rId1"), ContentEvent::text("封面故事")];
        let conversion = ArticleRenderer::default().render(extraction(events, resources), None);

        let article = conversion.into_article().unwrap();
        assert!(article.fragments[0].is_image());
        assert_eq!(article.fragments[1].tier(), Some(HeadingTier::H1));
        assert_eq!(article.title, "封面故事");
        assert_eq!(article.images.len(), 1);
        assert_eq!(article.stats.image_ref_count, 1);
    }

    #[test]
    fn test_empty_extraction() {
        let conversion = ArticleRenderer::default().render(Extraction::default(), Some("x"));
        assert!(conversion.is_empty());
    }

    #[test]
    fn test_images_without_references_still_produce_article() {
        let resources: ResourceTable = vec![ImageResource::jpeg("rId4", vec![0xFF])]
            .into_iter()
            .collect();
        let conversion =
            ArticleRenderer::default().render(extraction(Vec::new(), resources), Some("a.docx"));

        let article = conversion.into_article().unwrap();
        assert!(article.fragments.is_empty());
        assert_eq!(article.title, "a.docx");
        assert_eq!(article.images[0].filename(), "image_1.jpg");
    }

    #[test]
    fn test_inline_mode_returns_no_records() {
        let resources: ResourceTable = vec![ImageResource::png("rId1", vec![1])]
            .into_iter()
            .collect();
        let events = vec![ContentEvent::text("標題"), ContentEvent::image("rId1")];
        let renderer = ArticleRenderer::new(RenderOptions::new().inline_images());
        let article = renderer
            .render(extraction(events, resources), None)
            .into_article()
            .unwrap();

        assert!(article.images.is_empty());
        assert!(article.html.contains("data:image/png;base64,AQ=="));
    }
}
