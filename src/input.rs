//! Turning document text into an outline.
//!
//! The format's block query is run over the tree-sitter parse tree, and every captured
//! node becomes a [`Section`]. Block ends are measured from the node's source text with
//! trailing whitespace removed, so the end boundary always sits on the block's last
//! visible character regardless of how the grammar attributes line endings.

use crate::error::SmartBlockError;
use crate::formats::Format;
use crate::section::{BlockKind, Heading, Outline, Position, Section};
use log::debug;
use std::fs;
use std::path::Path;
use streaming_iterator::StreamingIterator;
use tree_sitter::{Parser, Query, QueryCursor};

/// Byte offsets of line starts, for mapping byte offsets back to line/column.
struct LineIndex {
    starts: Vec<usize>,
}

impl LineIndex {
    fn new(text: &str) -> Self {
        let starts = std::iter::once(0)
            .chain(text.match_indices('\n').map(|(i, _)| i + 1))
            .collect();
        Self { starts }
    }

    fn line_of(&self, byte: usize) -> usize {
        self.starts.partition_point(|&start| start <= byte) - 1
    }

    fn line_start(&self, line: usize) -> usize {
        self.starts[line]
    }

    fn position(&self, text: &str, byte: usize) -> Position {
        let line = self.line_of(byte);
        let column = text[self.line_start(line)..byte].chars().count();
        Position::new(line, column)
    }
}

/// Splits a trailing `^id` token off a line.
///
/// Returns the line without the token and the id (without its caret). Ids are made of
/// ASCII letters, digits and `-`; anything else leaves the line untouched.
#[must_use]
pub fn split_block_id(line: &str) -> (&str, Option<&str>) {
    let trimmed = line.trim_end();
    let (head, token) = match trimmed.rfind(char::is_whitespace) {
        Some(split) => (trimmed[..split].trim_end(), trimmed[split..].trim_start()),
        None => ("", trimmed),
    };

    match token.strip_prefix('^') {
        Some(id)
            if !id.is_empty() && id.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') =>
        {
            (head, Some(id))
        }
        _ => (trimmed, None),
    }
}

/// Parse document text into its outline using the given format.
///
/// # Errors
///
/// Returns an error if the grammar cannot be loaded, the query is invalid, or the
/// parser produces no tree.
pub fn extract_outline<F: Format>(text: &str, format: &F) -> Result<Outline, SmartBlockError> {
    let language = format.language();
    let mut parser = Parser::new();
    parser
        .set_language(&language)
        .map_err(|e| SmartBlockError::Parse(e.to_string()))?;
    let tree = parser
        .parse(text, None)
        .ok_or_else(|| SmartBlockError::Parse("parser returned no tree".to_string()))?;
    let query = Query::new(&language, format.block_query())
        .map_err(|e| SmartBlockError::Parse(e.to_string()))?;

    let index = LineIndex::new(text);
    let mut outline = Outline::default();
    let mut cursor = QueryCursor::new();
    let mut matches = cursor.matches(&query, tree.root_node(), text.as_bytes());

    while let Some(query_match) = matches.next() {
        for capture in query_match.captures {
            let node = capture.node;
            let capture_name = query.capture_names()[capture.index as usize];
            let Some(kind) = format.block_kind(capture_name, &node) else {
                continue;
            };

            let byte_start = node.start_byte();
            let source = text[byte_start..node.end_byte()].trim_end();
            if source.is_empty() {
                continue;
            }
            let byte_end = byte_start + source.len();
            let line_start = index.line_of(byte_start);
            let end = index.position(text, byte_end);
            let last_line = &text[index.line_start(end.line).max(byte_start)..byte_end];

            if kind == BlockKind::Heading {
                outline.headings.push(Heading {
                    title: format.heading_title(&node, source),
                    level: format.heading_level(&node),
                    line_start,
                    line_end: end.line,
                });
            }

            outline.sections.push(Section {
                kind,
                line_start,
                line_end: end.line,
                column_end: end.column,
                byte_start,
                byte_end,
                id: split_block_id(last_line).1.map(str::to_string),
            });
        }
    }

    outline.sections.sort_by_key(|section| section.byte_start);
    outline.sections.dedup_by_key(|section| section.byte_start);
    outline.headings.sort_by_key(|heading| heading.line_start);

    debug!(
        "Extracted {} blocks and {} headings",
        outline.sections.len(),
        outline.headings.len()
    );
    Ok(outline)
}

/// Read a file from disk and extract its outline.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub fn read_outline<F: Format>(path: &Path, format: &F) -> Result<Outline, SmartBlockError> {
    let content = fs::read_to_string(path)?;
    extract_outline(&content, format)
}

#[cfg(test)]
#[path = "tests/input.rs"]
mod tests;
