//! Error type shared across the library.

use std::io;
use thiserror::Error;

/// Failures that can surface from smartblock's library code.
///
/// The block id command itself never returns one of these; it converts everything into
/// a notice. They come from the surrounding plumbing: reading and writing files,
/// parsing documents, talking to the clipboard and persisting settings.
#[derive(Debug, Error)]
pub enum SmartBlockError {
    /// Reading or writing a file failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The document could not be parsed into an outline.
    #[error("Parse error: {0}")]
    Parse(String),

    /// The system clipboard rejected a write.
    #[error("Clipboard error: {0}")]
    Clipboard(String),

    /// Settings could not be serialised.
    #[error("Settings error: {0}")]
    Settings(String),
}
