//! Source format detection and validation.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Formats the converter accepts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceFormat {
    /// Office Open XML word-processing document
    #[default]
    Docx,
    /// UTF-8 plain text, one paragraph per line
    PlainText,
}

impl SourceFormat {
    /// Lowercase extensions (without the dot) for this format.
    pub fn extensions(&self) -> &'static [&'static str] {
        match self {
            SourceFormat::Docx => &["docx"],
            SourceFormat::PlainText => &["txt", "text"],
        }
    }

    /// Resolve a file extension to a format.
    ///
    /// Returns `Error::UnsupportedExtension` for anything else.
    pub fn from_extension(ext: &str) -> Result<Self> {
        let ext = ext.trim_start_matches('.').to_lowercase();
        [SourceFormat::Docx, SourceFormat::PlainText]
            .into_iter()
            .find(|format| format.extensions().contains(&ext.as_str()))
            .ok_or(Error::UnsupportedExtension(ext))
    }
}

impl std::fmt::Display for SourceFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SourceFormat::Docx => write!(f, "Word document (docx)"),
            SourceFormat::PlainText => write!(f, "plain text"),
        }
    }
}

/// ZIP local file header magic: PK\x03\x04
const ZIP_MAGIC: &[u8] = b"PK\x03\x04";

/// Detect the format of a file from its extension.
///
/// # Example
/// ```
/// use enews::detect::{detect_format_from_path, SourceFormat};
///
/// assert_eq!(detect_format_from_path("article.DOCX").unwrap(), SourceFormat::Docx);
/// assert!(detect_format_from_path("article.pdf").is_err());
/// ```
pub fn detect_format_from_path<P: AsRef<Path>>(path: P) -> Result<SourceFormat> {
    let path = path.as_ref();
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .ok_or_else(|| Error::UnsupportedExtension(path.display().to_string()))?;
    SourceFormat::from_extension(ext)
}

/// Check if bytes start like a docx (ZIP) container.
pub fn is_docx_bytes(data: &[u8]) -> bool {
    data.starts_with(ZIP_MAGIC)
}
