//! Document-level types.

use super::{Block, ResourceTable};
use crate::detect::SourceFormat;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A parsed source document: the body block tree plus its image resources.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SourceDocument {
    /// Document metadata (title, author, etc.)
    pub metadata: Metadata,

    /// Body blocks in document order
    pub blocks: Vec<Block>,

    /// Embedded images, in relationship order
    pub resources: ResourceTable,
}

impl SourceDocument {
    /// Create a new empty document.
    pub fn new(format: SourceFormat) -> Self {
        Self {
            metadata: Metadata::new(format),
            blocks: Vec::new(),
            resources: ResourceTable::new(),
        }
    }

    /// Add a block to the body.
    pub fn add_block(&mut self, block: impl Into<Block>) {
        self.blocks.push(block.into());
    }

    /// Check if the document has neither blocks nor resources.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty() && self.resources.is_empty()
    }

    /// Get plain text content of the entire document.
    pub fn plain_text(&self) -> String {
        self.blocks
            .iter()
            .map(|block| block.plain_text())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Document metadata, taken from the container's core properties when present.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Metadata {
    /// Format the document was read from
    pub source_format: SourceFormat,

    /// Document title
    pub title: Option<String>,

    /// Document author
    pub author: Option<String>,

    /// Creation date
    pub created: Option<DateTime<Utc>>,

    /// Last modification date
    pub modified: Option<DateTime<Utc>>,
}

impl Metadata {
    /// Create empty metadata for a source format.
    pub fn new(source_format: SourceFormat) -> Self {
        Self {
            source_format,
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ImageResource, Paragraph};

    #[test]
    fn test_document_new() {
        let doc = SourceDocument::new(SourceFormat::Docx);
        assert!(doc.is_empty());
        assert_eq!(doc.metadata.source_format, SourceFormat::Docx);
    }

    #[test]
    fn test_document_with_only_resources_is_not_empty() {
        let mut doc = SourceDocument::new(SourceFormat::Docx);
        doc.resources.insert(ImageResource::png("rId1", vec![0; 8]));
        assert!(!doc.is_empty());
    }

    #[test]
    fn test_plain_text() {
        let mut doc = SourceDocument::new(SourceFormat::PlainText);
        doc.add_block(Paragraph::with_text("標題"));
        doc.add_block(Paragraph::with_text("內文"));
        assert_eq!(doc.plain_text(), "標題\n內文");
    }
}
