//! Markdown format implementation using tree-sitter-md.
//!
//! This module provides tree-sitter queries for parsing markdown documents
//! and extracting their leaf blocks, including both ATX (`#`) and setext headings
//! and GFM pipe tables.

use crate::formats::Format;
use crate::input::split_block_id;
use crate::section::BlockKind;
use tree_sitter::Node;

/// Tree-sitter queries for markdown leaf blocks.
pub struct MarkdownFormat;

impl Format for MarkdownFormat {
    fn language(&self) -> tree_sitter::Language {
        tree_sitter_md::LANGUAGE.into()
    }

    fn block_query(&self) -> &'static str {
        "(atx_heading) @heading
         (setext_heading) @heading
         (paragraph) @paragraph
         (fenced_code_block) @code
         (indented_code_block) @code
         (html_block) @html
         (pipe_table) @table
         (thematic_break) @rule"
    }

    fn block_kind(&self, capture: &str, node: &Node) -> Option<BlockKind> {
        match capture {
            "heading" => Some(BlockKind::Heading),
            "paragraph" => match node.parent().map(|parent| parent.kind()) {
                // Setext heading text is a paragraph node owned by the heading
                Some("setext_heading") => None,
                Some("list_item") => Some(BlockKind::ListItem),
                _ => Some(BlockKind::Paragraph),
            },
            "code" => Some(BlockKind::Code),
            "html" => Some(BlockKind::Html),
            "table" => Some(BlockKind::Table),
            "rule" => Some(BlockKind::ThematicBreak),
            _ => None,
        }
    }

    fn heading_level(&self, node: &Node) -> usize {
        let mut cursor = node.walk();
        let level = node
            .children(&mut cursor)
            .find_map(|child| match child.kind() {
                "atx_h1_marker" | "setext_h1_underline" => Some(1),
                "atx_h2_marker" | "setext_h2_underline" => Some(2),
                "atx_h3_marker" => Some(3),
                "atx_h4_marker" => Some(4),
                "atx_h5_marker" => Some(5),
                "atx_h6_marker" => Some(6),
                _ => None,
            });
        level.unwrap_or(1)
    }

    fn heading_title(&self, node: &Node, text: &str) -> String {
        let first_line = text.lines().next().unwrap_or_default();
        let title = if node.kind() == "atx_heading" {
            let inner = first_line.trim().trim_start_matches('#').trim();
            // An optional closing sequence of `#` only counts after a space
            match inner.trim_end_matches('#') {
                stripped if stripped.is_empty() || stripped.ends_with(' ') => stripped.trim_end(),
                _ => inner,
            }
        } else {
            first_line.trim()
        };
        split_block_id(title).0.to_string()
    }
}
