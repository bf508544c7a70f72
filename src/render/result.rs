//! Conversion results with metadata and statistics.

use super::fragment::RenderedFragment;
use super::image::ImageRecord;
use crate::classify::HeadingTier;
use crate::model::Metadata;
use serde::Serialize;

/// Outcome of converting one document.
#[derive(Debug, Clone)]
pub enum Conversion {
    /// The document produced an article.
    Article(Article),

    /// The document was readable but had no text and no images.
    Empty,
}

impl Conversion {
    /// Check if the conversion produced nothing.
    pub fn is_empty(&self) -> bool {
        matches!(self, Conversion::Empty)
    }

    /// Borrow the article, if any.
    pub fn article(&self) -> Option<&Article> {
        match self {
            Conversion::Article(article) => Some(article),
            Conversion::Empty => None,
        }
    }

    /// Take the article, if any.
    pub fn into_article(self) -> Option<Article> {
        match self {
            Conversion::Article(article) => Some(article),
            Conversion::Empty => None,
        }
    }
}

/// A rendered newsletter article.
#[derive(Debug, Clone, Serialize)]
pub struct Article {
    /// Complete HTML page
    pub html: String,

    /// Page title
    pub title: String,

    /// Meta description, before attribute escaping
    pub meta_description: String,

    /// Body fragments in document order
    pub fragments: Vec<RenderedFragment>,

    /// Images to upload separately (placeholder mode only)
    pub images: Vec<ImageRecord>,

    /// Source document metadata
    pub metadata: Metadata,

    /// Conversion statistics
    pub stats: ConversionStats,
}

impl Article {
    /// Check if there are images to upload.
    pub fn has_images(&self) -> bool {
        !self.images.is_empty()
    }
}

/// Statistics collected during conversion.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ConversionStats {
    /// Title fragments (at most one per article in practice)
    pub h1_count: u32,

    /// Section headings
    pub h2_count: u32,

    /// Subheadings
    pub h3_count: u32,

    /// Body paragraphs
    pub paragraph_count: u32,

    /// Image references rendered
    pub image_ref_count: u32,

    /// Image references skipped for lack of a resource
    pub unresolved_image_count: u32,

    /// Images embedded in the source document
    pub image_count: u32,

    /// Tables walked, nested ones included
    pub table_count: u32,

    /// Paragraphs without visible text
    pub blank_line_count: u32,

    /// Character count of rendered text (excluding whitespace)
    pub char_count: u32,
}

impl ConversionStats {
    /// Create new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Count a rendered text line of the given tier.
    pub fn add_text(&mut self, tier: HeadingTier, text: &str) {
        match tier {
            HeadingTier::H1 => self.h1_count += 1,
            HeadingTier::H2 => self.h2_count += 1,
            HeadingTier::H3 => self.h3_count += 1,
            HeadingTier::Paragraph => self.paragraph_count += 1,
            HeadingTier::Blank => {
                self.blank_line_count += 1;
                return;
            }
        }
        self.char_count += text.chars().filter(|c| !c.is_whitespace()).count() as u32;
    }

    /// Count a rendered image reference.
    pub fn add_image_ref(&mut self) {
        self.image_ref_count += 1;
    }

    /// Count a skipped image reference.
    pub fn add_unresolved_image(&mut self) {
        self.unresolved_image_count += 1;
    }

    /// Total heading fragments.
    pub fn heading_count(&self) -> u32 {
        self.h1_count + self.h2_count + self.h3_count
    }

}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_add_text() {
        let mut stats = ConversionStats::new();
        stats.add_text(HeadingTier::H1, "我的 文章");
        stats.add_text(HeadingTier::H2, "一、前言");
        stats.add_text(HeadingTier::Paragraph, "Hello, world!");
        stats.add_text(HeadingTier::Blank, "   ");

        assert_eq!(stats.heading_count(), 2);
        assert_eq!(stats.paragraph_count, 1);
        assert_eq!(stats.blank_line_count, 1);
        assert_eq!(stats.char_count, 4 + 4 + 12);
    }

    #[test]
    fn test_conversion_accessors() {
        assert!(Conversion::Empty.is_empty());
        assert!(Conversion::Empty.article().is_none());
        assert!(Conversion::Empty.into_article().is_none());
    }
}
