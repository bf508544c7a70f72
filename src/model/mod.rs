//! Document model types.
//!
//! This module defines the intermediate representation that bridges the
//! source readers and the HTML pipeline: a tree of blocks (paragraphs and
//! possibly nested tables), the table of embedded image resources, and the
//! flat content events the extractor derives from them.

mod block;
mod document;
mod event;
mod paragraph;
mod resource;
mod table;

pub use block::Block;
pub use document::{Metadata, SourceDocument};
pub use event::ContentEvent;
pub use paragraph::{InlineContent, Paragraph};
pub use resource::{extension_for_mime, ImageResource, ResourceTable};
pub use table::{Table, TableCell, TableRow};
