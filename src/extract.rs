//! Flattening the block tree into content events.
//!
//! The body is walked top to bottom. Tables are walked row by row and cell by
//! cell, recursing into each cell's blocks, so text inside (nested) tables
//! keeps its reading position. For every paragraph the image references come
//! first, then one text event carrying the paragraph's full text.
//!
//! # Example
//!
//! ```
//! use enews::extract::{walk_blocks, BlockVisitor};
//! use enews::model::{Block, Paragraph, Table, TableRow};
//!
//! #[derive(Default)]
//! struct WordCounter(usize);
//!
//! impl BlockVisitor for WordCounter {
//!     fn visit_paragraph(&mut self, para: &Paragraph) {
//!         self.0 += para.plain_text().split_whitespace().count();
//!     }
//! }
//!
//! let mut table = Table::new();
//! table.add_row(TableRow::from_strings(["one two", "three"]));
//! let blocks = vec![Block::from(Paragraph::with_text("hello world")), Block::from(table)];
//!
//! let mut counter = WordCounter::default();
//! walk_blocks(&mut counter, &blocks);
//! assert_eq!(counter.0, 5);
//! ```

use crate::model::{Block, ContentEvent, Metadata, Paragraph, ResourceTable, SourceDocument, Table};
use serde::Serialize;

/// Visits the blocks of a document in reading order.
///
/// Only `visit_paragraph` is required; the default `visit_table` descends
/// into every cell.
pub trait BlockVisitor {
    /// Called for every paragraph, including those inside table cells.
    fn visit_paragraph(&mut self, para: &Paragraph);

    /// Called for every table, including nested ones.
    fn visit_table(&mut self, table: &Table) {
        walk_table(self, table);
    }
}

/// Visit a sequence of blocks in order.
pub fn walk_blocks<V: BlockVisitor + ?Sized>(visitor: &mut V, blocks: &[Block]) {
    for block in blocks {
        match block {
            Block::Paragraph(para) => visitor.visit_paragraph(para),
            Block::Table(table) => visitor.visit_table(table),
        }
    }
}

/// Visit a table's cells in row-major order.
pub fn walk_table<V: BlockVisitor + ?Sized>(visitor: &mut V, table: &Table) {
    for row in &table.rows {
        for cell in &row.cells {
            walk_blocks(visitor, &cell.blocks);
        }
    }
}

/// Output of block extraction.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Extraction {
    /// Content events in reading order
    pub events: Vec<ContentEvent>,

    /// Image resources, handed through from the source document
    pub resources: ResourceTable,

    /// Source metadata
    pub metadata: Metadata,

    /// Number of tables walked, nested ones included
    pub table_count: usize,

    /// Paragraphs that produced no text event
    pub blank_paragraphs: usize,

    /// Image references dropped because no image resource matched
    pub unresolved_images: usize,
}

impl Extraction {
    /// Check if extraction produced nothing to render.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty() && self.resources.is_empty()
    }
}

/// Builds the event list for one document.
struct Extractor<'a> {
    resources: &'a ResourceTable,
    events: Vec<ContentEvent>,
    table_count: usize,
    blank_paragraphs: usize,
    unresolved_images: usize,
}

impl<'a> Extractor<'a> {
    fn new(resources: &'a ResourceTable) -> Self {
        Self {
            resources,
            events: Vec::new(),
            table_count: 0,
            blank_paragraphs: 0,
            unresolved_images: 0,
        }
    }
}

impl BlockVisitor for Extractor<'_> {
    fn visit_paragraph(&mut self, para: &Paragraph) {
        for id in para.image_ids() {
            if self.resources.contains(id) {
                self.events.push(ContentEvent::image(id));
            } else {
                log::warn!("skipping image reference {}: no embedded image with that id", id);
                self.unresolved_images += 1;
            }
        }

        let text = para.plain_text();
        if text.trim().is_empty() {
            self.blank_paragraphs += 1;
        } else {
            self.events.push(ContentEvent::text(text));
        }
    }

    fn visit_table(&mut self, table: &Table) {
        self.table_count += 1;
        walk_table(self, table);
    }
}

/// Flatten a source document into content events.
pub fn extract(document: SourceDocument) -> Extraction {
    let SourceDocument {
        metadata,
        blocks,
        resources,
    } = document;

    let mut extractor = Extractor::new(&resources);
    walk_blocks(&mut extractor, &blocks);

    let Extractor {
        events,
        table_count,
        blank_paragraphs,
        unresolved_images,
        ..
    } = extractor;

    log::debug!(
        "extracted {} events from {} blocks ({} tables)",
        events.len(),
        blocks.len(),
        table_count
    );

    Extraction {
        events,
        resources,
        metadata,
        table_count,
        blank_paragraphs,
        unresolved_images,
    }
}
