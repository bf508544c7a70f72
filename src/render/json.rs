//! JSON manifest of a converted article.

use super::image::ImageRecord;
use super::result::{Article, ConversionStats};
use crate::error::{Error, Result};
use crate::model::Metadata;
use serde::Serialize;

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Summary of an article, without the HTML and image bytes.
#[derive(Debug, Clone, Serialize)]
pub struct Manifest<'a> {
    /// Page title
    pub title: &'a str,
    /// Meta description
    pub meta_description: &'a str,
    /// Images to upload, in placeholder order
    pub images: Vec<ManifestImage>,
    /// Source metadata
    pub metadata: &'a Metadata,
    /// Conversion statistics
    pub stats: &'a ConversionStats,
}

/// One image entry of a [`Manifest`].
#[derive(Debug, Clone, Serialize)]
pub struct ManifestImage {
    /// Placeholder number
    pub sequence_number: u32,
    /// Suggested file name
    pub filename: String,
    /// MIME type
    pub mime_type: String,
    /// Size in bytes
    pub size: usize,
}

impl From<&ImageRecord> for ManifestImage {
    fn from(record: &ImageRecord) -> Self {
        Self {
            sequence_number: record.sequence_number,
            filename: record.filename(),
            mime_type: record.mime_type.clone(),
            size: record.size(),
        }
    }
}

impl<'a> From<&'a Article> for Manifest<'a> {
    fn from(article: &'a Article) -> Self {
        Self {
            title: &article.title,
            meta_description: &article.meta_description,
            images: article.images.iter().map(ManifestImage::from).collect(),
            metadata: &article.metadata,
            stats: &article.stats,
        }
    }
}

/// Convert an article's manifest to JSON.
pub fn to_json(article: &Article, format: JsonFormat) -> Result<String> {
    let manifest = Manifest::from(article);
    let result = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(&manifest),
        JsonFormat::Compact => serde_json::to_string(&manifest),
    };

    result.map_err(|e| Error::Render(format!("JSON serialization error: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn article() -> Article {
        Article {
            html: "<html></html>".to_string(),
            title: "季刊".to_string(),
            meta_description: "摘要".to_string(),
            fragments: Vec::new(),
            images: vec![ImageRecord {
                sequence_number: 1,
                data: vec![0xFF, 0xD8, 0xFF],
                mime_type: "image/jpeg".to_string(),
            }],
            metadata: Metadata::default(),
            stats: ConversionStats::default(),
        }
    }

    #[test]
    fn test_to_json_pretty() {
        let json = to_json(&article(), JsonFormat::Pretty).unwrap();
        assert!(json.contains("\"title\": \"季刊\""));
        assert!(json.contains("\"filename\": \"image_1.jpg\""));
        assert!(json.contains("\"size\": 3"));
        assert!(!json.contains("<html>"));
        assert!(json.contains('\n'));
    }

    #[test]
    fn test_to_json_compact() {
        let json = to_json(&article(), JsonFormat::Compact).unwrap();
        assert!(!json.contains('\n'));
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["images"][0]["sequence_number"], 1);
        assert_eq!(value["metadata"]["source_format"], "docx");
    }
}
