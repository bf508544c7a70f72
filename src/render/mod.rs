//! Rendering content events into newsletter HTML.

mod article;
mod fragment;
mod html;
pub mod image;
mod json;
mod options;
mod result;
pub mod style;

pub use article::{ArticleRenderer, RenderContext};
pub use fragment::{FragmentKind, FragmentRenderer, RenderedFragment};
pub use html::{
    assemble, AssembledPage, HtmlAssembler, DEFAULT_DESCRIPTION, DEFAULT_TITLE,
    META_DESCRIPTION_LIMIT,
};
pub use image::{ImageRecord, ImageResolver, InlineImages, PlaceholderImages};
pub use json::{to_json, JsonFormat, Manifest, ManifestImage};
pub use options::{ImageMode, RenderOptions, DEFAULT_LANG};
pub use result::{Article, Conversion, ConversionStats};
