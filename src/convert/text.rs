//! Plain-text converter.

use super::DocumentConverter;
use crate::detect::SourceFormat;
use crate::error::Result;
use crate::model::SourceDocument;
use crate::parser::TextReader;

/// Converts UTF-8 `.txt` files, one paragraph per line.
#[derive(Debug, Clone, Default)]
pub struct TextConverter {
    _private: (),
}

impl TextConverter {
    /// Create a new plain-text converter.
    pub fn new() -> Self {
        Self { _private: () }
    }
}

impl DocumentConverter for TextConverter {
    fn supported_extensions(&self) -> &[&str] {
        SourceFormat::PlainText.extensions()
    }

    fn name(&self) -> &str {
        "text"
    }

    fn read(&self, bytes: &[u8]) -> Result<SourceDocument> {
        TextReader::from_bytes(bytes).parse()
    }
}
