//! Plain-text reader: one paragraph per line.

use crate::detect::SourceFormat;
use crate::error::Result;
use crate::model::{Paragraph, SourceDocument};

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Reader for UTF-8 plain text.
///
/// Each line becomes a paragraph, blank lines included, so a text file goes
/// through the same pipeline as a docx body without images.
#[derive(Debug, Clone)]
pub struct TextReader<'a> {
    data: &'a [u8],
}

impl<'a> TextReader<'a> {
    /// Wrap text bytes. Validation happens in [`TextReader::parse`].
    pub fn from_bytes(data: &'a [u8]) -> Self {
        Self { data }
    }

    /// Decode and split into paragraphs.
    pub fn parse(&self) -> Result<SourceDocument> {
        let data = self.data.strip_prefix(UTF8_BOM).unwrap_or(self.data);
        let text = std::str::from_utf8(data)?;

        let mut document = SourceDocument::new(SourceFormat::PlainText);
        for line in text.lines() {
            document.add_block(Paragraph::with_text(line));
        }

        log::debug!("plain text parsed: {} lines", document.blocks.len());
        Ok(document)
    }
}
