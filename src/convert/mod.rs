//! Document converters with extension-based dispatch.
//!
//! Each supported source format has a [`DocumentConverter`]; the
//! [`ConverterRegistry`] picks one by file extension.
//!
//! # Example
//!
//! ```no_run
//! use enews::convert::{ConverterRegistry, ConvertOptions};
//! use std::path::Path;
//!
//! fn main() -> enews::Result<()> {
//!     let registry = ConverterRegistry::with_defaults();
//!     let conversion = registry.convert(Path::new("article.docx"), &ConvertOptions::default())?;
//!     if let Some(article) = conversion.article() {
//!         println!("{}", article.html);
//!     }
//!     Ok(())
//! }
//! ```

mod docx;
mod text;

pub use docx::DocxConverter;
pub use text::TextConverter;

use crate::error::{Error, Result};
use crate::extract::extract;
use crate::model::SourceDocument;
use crate::render::{ArticleRenderer, Conversion, RenderOptions};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

/// Options for document conversion.
#[derive(Debug, Clone, Default)]
pub struct ConvertOptions {
    /// Rendering options
    pub render: RenderOptions,

    /// Title to use when the article has no H1.
    ///
    /// When unset, converting a file uses its file name.
    pub default_title: Option<String>,
}

impl ConvertOptions {
    /// Create new conversion options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set rendering options.
    pub fn with_render_options(mut self, options: RenderOptions) -> Self {
        self.render = options;
        self
    }

    /// Set the fallback title.
    pub fn with_default_title(mut self, title: impl Into<String>) -> Self {
        self.default_title = Some(title.into());
        self
    }

    /// The fallback title for a file: the configured one, else the file name.
    fn title_for(&self, path: &Path) -> Option<String> {
        self.default_title.clone().or_else(|| {
            path.file_name()
                .and_then(|name| name.to_str())
                .map(str::to_string)
        })
    }
}

/// Render a parsed source document.
pub(crate) fn render_document(
    document: SourceDocument,
    default_title: Option<&str>,
    options: &ConvertOptions,
) -> Conversion {
    let extraction = extract(document);
    ArticleRenderer::new(options.render.clone()).render(extraction, default_title)
}

/// Trait for document converters.
///
/// Implement this trait to add support for a new source format.
pub trait DocumentConverter: Send + Sync {
    /// Get the supported file extensions for this converter.
    ///
    /// Extensions should be lowercase without the leading dot (e.g., `["docx"]`).
    fn supported_extensions(&self) -> &[&str];

    /// Get the name of this converter.
    fn name(&self) -> &str;

    /// Parse raw bytes into a source document.
    fn read(&self, bytes: &[u8]) -> Result<SourceDocument>;

    /// Convert a file at the given path.
    fn convert(&self, path: &Path, options: &ConvertOptions) -> Result<Conversion> {
        let bytes = std::fs::read(path)?;
        let document = self.read(&bytes)?;
        let title = options.title_for(path);
        Ok(render_document(document, title.as_deref(), options))
    }

    /// Convert from bytes.
    fn convert_bytes(&self, bytes: &[u8], options: &ConvertOptions) -> Result<Conversion> {
        let document = self.read(bytes)?;
        Ok(render_document(
            document,
            options.default_title.as_deref(),
            options,
        ))
    }

    /// Check if this converter supports the given extension.
    fn supports_extension(&self, ext: &str) -> bool {
        let ext_lower = ext.trim_start_matches('.').to_lowercase();
        self.supported_extensions().iter().any(|e| *e == ext_lower)
    }
}

/// Registry for document converters.
///
/// The registry maps file extensions to converters and provides
/// convenient methods for converting documents.
pub struct ConverterRegistry {
    converters: HashMap<String, Arc<dyn DocumentConverter>>,
    by_name: HashMap<String, Arc<dyn DocumentConverter>>,
}

impl ConverterRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            converters: HashMap::new(),
            by_name: HashMap::new(),
        }
    }

    /// Create a registry with the docx and plain-text converters.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(DocxConverter::new()));
        registry.register(Arc::new(TextConverter::new()));
        registry
    }

    /// Register a converter.
    ///
    /// The converter will be registered for all its supported extensions.
    pub fn register(&mut self, converter: Arc<dyn DocumentConverter>) {
        for ext in converter.supported_extensions() {
            self.converters
                .insert(ext.to_lowercase(), converter.clone());
        }
        self.by_name
            .insert(converter.name().to_lowercase(), converter);
    }

    /// Get a converter by file extension.
    pub fn get_by_extension(&self, ext: &str) -> Option<Arc<dyn DocumentConverter>> {
        let ext = ext.trim_start_matches('.').to_lowercase();
        self.converters.get(&ext).cloned()
    }

    /// Get a converter by name.
    pub fn get_by_name(&self, name: &str) -> Option<Arc<dyn DocumentConverter>> {
        self.by_name.get(&name.to_lowercase()).cloned()
    }

    /// Check if an extension is supported.
    pub fn supports(&self, ext: &str) -> bool {
        self.get_by_extension(ext).is_some()
    }

    /// Get all supported extensions, sorted.
    pub fn supported_extensions(&self) -> Vec<&str> {
        let mut extensions: Vec<&str> = self.converters.keys().map(|s| s.as_str()).collect();
        extensions.sort_unstable();
        extensions
    }

    fn converter_for(&self, ext: &str) -> Result<Arc<dyn DocumentConverter>> {
        self.get_by_extension(ext)
            .ok_or_else(|| Error::UnsupportedExtension(ext.to_string()))
    }

    /// Parse a file into a source document without rendering it.
    pub fn read(&self, path: &Path) -> Result<SourceDocument> {
        let converter = self.converter_for(extension_of(path)?)?;
        let bytes = std::fs::read(path)?;
        converter.read(&bytes)
    }

    /// Convert a file using the appropriate converter.
    ///
    /// The extension is checked before the file is opened.
    pub fn convert(&self, path: &Path, options: &ConvertOptions) -> Result<Conversion> {
        let converter = self.converter_for(extension_of(path)?)?;
        log::debug!("converting {} with {} converter", path.display(), converter.name());
        converter.convert(path, options)
    }

    /// Convert bytes using the specified extension to determine the converter.
    pub fn convert_bytes(
        &self,
        bytes: &[u8],
        ext: &str,
        options: &ConvertOptions,
    ) -> Result<Conversion> {
        self.converter_for(ext)?.convert_bytes(bytes, options)
    }
}

fn extension_of(path: &Path) -> Result<&str> {
    path.extension()
        .and_then(|e| e.to_str())
        .ok_or_else(|| Error::UnsupportedExtension(path.display().to_string()))
}

impl Default for ConverterRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
