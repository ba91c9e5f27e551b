//! Outline representation for tree-sitter parsed documents.
//!
//! An outline is the structural index of a single document: the ordered leaf blocks
//! (headings, paragraphs, list items, code blocks) that a block id can be attached to,
//! plus the ordered headings used to describe where a block sits. All coordinates are
//! zero-based, and line ranges are inclusive at both ends.

use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize)]
/// Line/column location in a document, with the column counted in characters.
pub struct Position {
    /// Zero-based line number.
    pub line: usize,
    /// Zero-based character offset within the line.
    pub column: usize,
}

impl Position {
    #[must_use]
    /// Creates a position from a zero-based line and column.
    pub const fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
/// Structural role of a block within the document.
pub enum BlockKind {
    /// ATX (`#`) or setext (underlined) heading.
    Heading,
    /// Plain paragraph, including paragraphs inside block quotes.
    Paragraph,
    /// Paragraph that forms the body of a list item.
    ListItem,
    /// Fenced or indented code block.
    Code,
    /// Raw HTML block.
    Html,
    /// GFM pipe table, header through last row.
    Table,
    /// Horizontal rule.
    ThematicBreak,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
/// Leaf block of a document that can carry a block id.
pub struct Section {
    /// What kind of markdown construct this block is.
    pub kind: BlockKind,
    /// First line of the block.
    pub line_start: usize,
    /// Last line of the block (inclusive), ignoring trailing blank lines.
    pub line_end: usize,
    /// Character offset just past the block's last non-whitespace character on `line_end`.
    pub column_end: usize,
    /// Byte offset where the block begins.
    pub byte_start: usize,
    /// Byte offset just past the block's last non-whitespace character.
    pub byte_end: usize,
    /// Block id already present at the end of the block, without the leading caret.
    pub id: Option<String>,
}

impl Section {
    #[must_use]
    /// Whether `line` falls inside this block's inclusive line range.
    pub const fn contains_line(&self, line: usize) -> bool {
        self.line_start <= line && line <= self.line_end
    }

    #[must_use]
    /// Position immediately after the block's last character.
    pub const fn end(&self) -> Position {
        Position::new(self.line_end, self.column_end)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
/// Heading record, kept separately from sections for context lookups.
pub struct Heading {
    /// Heading text without markup symbols.
    pub title: String,
    /// Heading depth (1 for `#`).
    pub level: usize,
    /// First line of the heading.
    pub line_start: usize,
    /// Last line of the heading (inclusive).
    pub line_end: usize,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
/// Ordered sections and headings of one document.
pub struct Outline {
    /// Leaf blocks in document order.
    pub sections: Vec<Section>,
    /// Headings in document order.
    pub headings: Vec<Heading>,
}

impl Outline {
    #[must_use]
    /// Whether the outline contains no blocks at all.
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}
