//! Error types for the enews library.

use std::io;
use thiserror::Error;

/// Result type alias for enews operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while converting a document.
///
/// A document that parses cleanly but yields no content is not an error;
/// see [`crate::Conversion::Empty`].
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The input bytes are not a readable document container.
    #[error("Unreadable document: {0}")]
    UnreadableDocument(String),

    /// The file extension is not handled by any registered converter.
    #[error("Unsupported file extension: {0}")]
    UnsupportedExtension(String),

    /// Plain-text input is not valid UTF-8.
    #[error("Encoding error: {0}")]
    Encoding(String),

    /// Error while serializing rendered output.
    #[error("Rendering error: {0}")]
    Render(String),
}

impl From<zip::result::ZipError> for Error {
    fn from(err: zip::result::ZipError) -> Self {
        match err {
            zip::result::ZipError::Io(e) => Error::Io(e),
            _ => Error::UnreadableDocument(err.to_string()),
        }
    }
}

impl From<quick_xml::Error> for Error {
    fn from(err: quick_xml::Error) -> Self {
        Error::UnreadableDocument(format!("malformed XML: {}", err))
    }
}

impl From<std::str::Utf8Error> for Error {
    fn from(err: std::str::Utf8Error) -> Self {
        Error::Encoding(format!("input is not valid UTF-8: {}", err))
    }
}
