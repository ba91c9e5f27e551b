//! Format trait and implementations for different document types.
//!
//! This module defines the `Format` trait which abstracts over different
//! document formats by providing the tree-sitter grammar, a query that captures
//! the leaf blocks a block id can be attached to, and the rules for reading
//! headings out of the captured nodes.

use crate::section::BlockKind;
use tree_sitter::Node;

pub mod markdown;

/// Describes how to pull an outline out of one document type.
pub trait Format {
    /// Grammar used to parse documents of this type.
    fn language(&self) -> tree_sitter::Language;

    /// Query whose captures are the leaf blocks of a document.
    fn block_query(&self) -> &str;

    /// Classifies a captured node, or `None` if the node is not a block in its own right.
    fn block_kind(&self, capture: &str, node: &Node) -> Option<BlockKind>;

    /// Heading depth of a node classified as [`BlockKind::Heading`].
    fn heading_level(&self, node: &Node) -> usize;

    /// Heading text without markup symbols, given the node's source text.
    fn heading_title(&self, node: &Node, text: &str) -> String;
}
