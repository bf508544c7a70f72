//! Word document converter.

use super::DocumentConverter;
use crate::detect::SourceFormat;
use crate::error::Result;
use crate::model::SourceDocument;
use crate::parser::DocxReader;

/// Converts `.docx` files.
#[derive(Debug, Clone, Default)]
pub struct DocxConverter {
    _private: (),
}

impl DocxConverter {
    /// Create a new docx converter.
    pub fn new() -> Self {
        Self { _private: () }
    }
}

impl DocumentConverter for DocxConverter {
    fn supported_extensions(&self) -> &[&str] {
        SourceFormat::Docx.extensions()
    }

    fn name(&self) -> &str {
        "docx"
    }

    fn read(&self, bytes: &[u8]) -> Result<SourceDocument> {
        DocxReader::from_bytes(bytes)?.parse()
    }
}
