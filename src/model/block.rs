//! Block-level types.

use super::{Paragraph, Table};
use serde::{Deserialize, Serialize};

/// A block in a document body or a table cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    /// A paragraph of text and inline images
    Paragraph(Paragraph),

    /// A table, whose cells contain further blocks
    Table(Table),
}

impl Block {
    /// Check if this block is a paragraph.
    pub fn is_paragraph(&self) -> bool {
        matches!(self, Block::Paragraph(_))
    }

    /// Check if this block is a table.
    pub fn is_table(&self) -> bool {
        matches!(self, Block::Table(_))
    }

    /// Get plain text content of the block.
    pub fn plain_text(&self) -> String {
        match self {
            Block::Paragraph(p) => p.plain_text(),
            Block::Table(t) => t.plain_text(),
        }
    }
}

impl From<Paragraph> for Block {
    fn from(p: Paragraph) -> Self {
        Block::Paragraph(p)
    }
}

impl From<Table> for Block {
    fn from(t: Table) -> Self {
        Block::Table(t)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_variants() {
        let para: Block = Paragraph::with_text("hello").into();
        assert!(para.is_paragraph());
        assert!(!para.is_table());

        let table: Block = Table::new().into();
        assert!(table.is_table());
        assert_eq!(table.plain_text(), "");
    }
}
