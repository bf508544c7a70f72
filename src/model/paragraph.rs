//! Paragraph and inline-level types.

use serde::{Deserialize, Serialize};

/// A paragraph of inline content.
///
/// Word splits a visually continuous line into many runs whenever the
/// formatting changes, so the text of one paragraph usually arrives as
/// several [`InlineContent::Text`] pieces.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Paragraph {
    /// Inline content in document order
    pub content: Vec<InlineContent>,
}

impl Paragraph {
    /// Create a new empty paragraph.
    pub fn new() -> Self {
        Self {
            content: Vec::new(),
        }
    }

    /// Create a paragraph with plain text.
    pub fn with_text(text: impl Into<String>) -> Self {
        let mut p = Self::new();
        p.add_text(text);
        p
    }

    /// Add a text fragment to the paragraph.
    pub fn add_text(&mut self, text: impl Into<String>) {
        self.content.push(InlineContent::Text(text.into()));
    }

    /// Append text, extending the trailing text fragment when there is one.
    pub fn push_text(&mut self, text: &str) {
        if let Some(InlineContent::Text(last)) = self.content.last_mut() {
            last.push_str(text);
        } else {
            self.add_text(text);
        }
    }

    /// Add an embedded image reference.
    pub fn add_image(&mut self, resource_id: impl Into<String>) {
        self.content.push(InlineContent::Image {
            resource_id: resource_id.into(),
        });
    }

    /// Concatenation of every text fragment, with no separators added.
    pub fn plain_text(&self) -> String {
        self.content
            .iter()
            .filter_map(|c| match c {
                InlineContent::Text(text) => Some(text.as_str()),
                InlineContent::Image { .. } => None,
            })
            .collect()
    }

    /// Resource ids of the images referenced by this paragraph, in order.
    pub fn image_ids(&self) -> impl Iterator<Item = &str> {
        self.content.iter().filter_map(|c| match c {
            InlineContent::Image { resource_id } => Some(resource_id.as_str()),
            InlineContent::Text(_) => None,
        })
    }

    /// Check if the paragraph has neither text nor images.
    pub fn is_empty(&self) -> bool {
        self.image_ids().next().is_none() && self.plain_text().trim().is_empty()
    }
}

/// Inline content within a paragraph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum InlineContent {
    /// A text fragment
    Text(String),

    /// An embedded image
    Image {
        /// Relationship id of the image resource
        resource_id: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paragraph_plain_text_joins_fragments() {
        let mut p = Paragraph::new();
        p.add_text("第三");
        p.add_image("rId7");
        p.add_text("章 ");
        p.add_text("背景");

        assert_eq!(p.plain_text(), "第三章 背景");
    }

    #[test]
    fn test_push_text_extends_last_fragment() {
        let mut p = Paragraph::new();
        p.push_text("Hello ");
        p.push_text("world");
        assert_eq!(p.content.len(), 1);

        p.add_image("rId1");
        p.push_text("!");
        assert_eq!(p.content.len(), 3);
    }

    #[test]
    fn test_image_ids_in_order() {
        let mut p = Paragraph::new();
        p.add_image("rId2");
        p.add_text("caption");
        p.add_image("rId1");

        let ids: Vec<&str> = p.image_ids().collect();
        assert_eq!(ids, vec!["rId2", "rId1"]);
    }

    #[test]
    fn test_is_empty() {
        assert!(Paragraph::new().is_empty());
        assert!(Paragraph::with_text("   ").is_empty());
        assert!(!Paragraph::with_text("text").is_empty());

        let mut image_only = Paragraph::new();
        image_only.add_image("rId3");
        assert!(!image_only.is_empty());
    }
}
