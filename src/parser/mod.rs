//! Source document readers.

mod docx;
mod text;

pub use docx::DocxReader;
pub use text::TextReader;

use crate::detect::SourceFormat;
use crate::error::Result;
use crate::model::SourceDocument;

/// Read in-memory bytes of the given format into a [`SourceDocument`].
pub fn read_document(data: &[u8], format: SourceFormat) -> Result<SourceDocument> {
    match format {
        SourceFormat::Docx => DocxReader::from_bytes(data)?.parse(),
        SourceFormat::PlainText => TextReader::from_bytes(data).parse(),
    }
}
