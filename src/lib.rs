//! # enews
//!
//! Turns Word documents and plain-text files into styled, self-contained
//! HTML articles for e-newsletters.
//!
//! Documents handed in for a newsletter rarely use heading styles, so the
//! structure is inferred from the text: the first line is the title,
//! numbered lines (`一、`, `3.`, `(二)`, `第三章`) are section headings, and
//! short lines without closing punctuation are subheadings. Every element
//! gets an inline style, since newsletter platforms drop `<style>` blocks.
//!
//! ## Quick Start
//!
//! ```no_run
//! use enews::{convert_file, Conversion};
//!
//! fn main() -> enews::Result<()> {
//!     match convert_file("article.docx")? {
//!         Conversion::Article(article) => {
//!             println!("{}", article.html);
//!             for image in &article.images {
//!                 std::fs::write(image.filename(), &image.data)?;
//!             }
//!         }
//!         Conversion::Empty => eprintln!("no content found"),
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Images
//!
//! - **Placeholder** (default): each image position gets a numbered comment
//!   block and an `<img>` whose `src` is to be replaced after uploading;
//!   the images come back as [`ImageRecord`]s named `image_{n}.{ext}`.
//! - **Inline**: images are embedded as base64 data URIs.

pub mod classify;
pub mod convert;
pub mod detect;
pub mod error;
pub mod extract;
pub mod model;
pub mod parser;
pub mod render;

// Re-export commonly used types
pub use classify::{classify, HeadingClassifier, HeadingRules, HeadingTier};
pub use convert::{ConvertOptions, ConverterRegistry, DocumentConverter};
pub use detect::{detect_format_from_path, SourceFormat};
pub use error::{Error, Result};
pub use extract::{extract, Extraction};
pub use model::{
    Block, ContentEvent, ImageResource, InlineContent, Metadata, Paragraph, ResourceTable,
    SourceDocument, Table, TableCell, TableRow,
};
pub use parser::{DocxReader, TextReader};
pub use render::{
    Article, Conversion, ConversionStats, FragmentKind, ImageMode, ImageRecord, JsonFormat,
    RenderOptions, RenderedFragment,
};

use std::path::Path;

/// Parse a file into a source document without rendering it.
///
/// The format is chosen by extension.
///
/// # Example
///
/// ```no_run
/// use enews::parse_file;
///
/// let doc = parse_file("article.docx").unwrap();
/// println!("{} images", doc.resources.len());
/// ```
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<SourceDocument> {
    ConverterRegistry::with_defaults().read(path.as_ref())
}

/// Parse in-memory bytes of the given extension.
pub fn parse_bytes(data: &[u8], extension: &str) -> Result<SourceDocument> {
    let format = SourceFormat::from_extension(extension)?;
    parser::read_document(data, format)
}

/// Convert a file with default options.
///
/// The file name is used as the title when the document has none.
///
/// # Example
///
/// ```no_run
/// use enews::convert_file;
///
/// let conversion = convert_file("article.docx").unwrap();
/// if let Some(article) = conversion.article() {
///     std::fs::write("article.html", &article.html).unwrap();
/// }
/// ```
pub fn convert_file<P: AsRef<Path>>(path: P) -> Result<Conversion> {
    convert_file_with_options(path, &ConvertOptions::default())
}

/// Convert a file with custom options.
pub fn convert_file_with_options<P: AsRef<Path>>(
    path: P,
    options: &ConvertOptions,
) -> Result<Conversion> {
    ConverterRegistry::with_defaults().convert(path.as_ref(), options)
}

/// Convert in-memory bytes, choosing the format by extension.
///
/// # Example
///
/// ```
/// use enews::{convert_bytes, ConvertOptions};
///
/// let text = "春季號\n一、前言\n這是一段很長的說明文字。";
/// let conversion = convert_bytes(text.as_bytes(), "txt", &ConvertOptions::default()).unwrap();
/// let article = conversion.into_article().unwrap();
/// assert_eq!(article.title, "春季號");
/// ```
pub fn convert_bytes(data: &[u8], extension: &str, options: &ConvertOptions) -> Result<Conversion> {
    ConverterRegistry::with_defaults().convert_bytes(data, extension, options)
}

/// Builder for converting documents.
///
/// # Example
///
/// ```no_run
/// use enews::Enews;
///
/// let conversion = Enews::new()
///     .inline_images()
///     .with_heading_threshold(30)
///     .with_container(true)
///     .convert_file("article.docx")?;
/// # Ok::<(), enews::Error>(())
/// ```
pub struct Enews {
    options: ConvertOptions,
    registry: ConverterRegistry,
}

impl Enews {
    /// Create a new builder with default options.
    pub fn new() -> Self {
        Self {
            options: ConvertOptions::default(),
            registry: ConverterRegistry::with_defaults(),
        }
    }

    /// Embed images as data URIs.
    pub fn inline_images(mut self) -> Self {
        self.options.render = self.options.render.inline_images();
        self
    }

    /// Emit numbered placeholders and return images separately.
    pub fn placeholder_images(mut self) -> Self {
        self.options.render = self.options.render.placeholder_images();
        self
    }

    /// Set the image mode.
    pub fn with_image_mode(mut self, mode: ImageMode) -> Self {
        self.options.render = self.options.render.with_image_mode(mode);
        self
    }

    /// Set the short-line threshold for subheadings.
    pub fn with_heading_threshold(mut self, threshold: usize) -> Self {
        self.options.render = self.options.render.with_heading_threshold(threshold);
        self
    }

    /// Replace the heading rules.
    pub fn with_heading_rules(mut self, rules: HeadingRules) -> Self {
        self.options.render = self.options.render.with_heading_rules(rules);
        self
    }

    /// Embed text without HTML escaping.
    pub fn with_raw_text(mut self, raw: bool) -> Self {
        self.options.render = self.options.render.with_raw_text(raw);
        self
    }

    /// Wrap the body in a centered container.
    pub fn with_container(mut self, wrap: bool) -> Self {
        self.options.render = self.options.render.with_container(wrap);
        self
    }

    /// Set the `lang` attribute.
    pub fn with_lang(mut self, lang: impl Into<String>) -> Self {
        self.options.render = self.options.render.with_lang(lang);
        self
    }

    /// Set the title used when the document has no H1.
    pub fn with_default_title(mut self, title: impl Into<String>) -> Self {
        self.options = self.options.with_default_title(title);
        self
    }

    /// Register an additional converter.
    pub fn with_converter(mut self, converter: std::sync::Arc<dyn DocumentConverter>) -> Self {
        self.registry.register(converter);
        self
    }

    /// The options that will be used.
    pub fn options(&self) -> &ConvertOptions {
        &self.options
    }

    /// Convert a file.
    pub fn convert_file<P: AsRef<Path>>(&self, path: P) -> Result<Conversion> {
        self.registry.convert(path.as_ref(), &self.options)
    }

    /// Convert in-memory bytes of the given extension.
    pub fn convert_bytes(&self, data: &[u8], extension: &str) -> Result<Conversion> {
        self.registry.convert_bytes(data, extension, &self.options)
    }
}

impl Default for Enews {
    fn default() -> Self {
        Self::new()
    }
}
