//! Content events produced by the block extractor.

use serde::{Deserialize, Serialize};

/// One atomic unit of content, in document reading order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentEvent {
    /// A paragraph's concatenated text, before trimming.
    TextLine {
        /// The raw text
        raw: String,
    },

    /// A reference to an embedded image.
    ImageRef {
        /// Id of the image in the resource table
        resource_id: String,
    },
}

impl ContentEvent {
    /// Create a text event.
    pub fn text(raw: impl Into<String>) -> Self {
        ContentEvent::TextLine { raw: raw.into() }
    }

    /// Create an image reference event.
    pub fn image(resource_id: impl Into<String>) -> Self {
        ContentEvent::ImageRef {
            resource_id: resource_id.into(),
        }
    }

    /// Check if this is an image reference.
    pub fn is_image(&self) -> bool {
        matches!(self, ContentEvent::ImageRef { .. })
    }
}
