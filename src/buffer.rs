//! In-memory document buffer.
//!
//! `TextBuffer` is the simplest possible [`Editor`]: a string and a cursor. It backs the
//! `set` subcommand and lets the terminal editor run the block id command on a snapshot
//! of its lines.

use crate::host::Editor;
use crate::section::Position;

#[derive(Clone, Debug, PartialEq, Eq)]
/// Document text with a cursor.
pub struct TextBuffer {
    text: String,
    cursor: Position,
}

impl TextBuffer {
    #[must_use]
    /// Wraps `text` with the cursor at `cursor`.
    pub const fn new(text: String, cursor: Position) -> Self {
        Self { text, cursor }
    }

    #[must_use]
    /// Current document text.
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    /// Consumes the buffer, returning its text.
    pub fn into_text(self) -> String {
        self.text
    }

    /// Byte offset of a position.
    ///
    /// Columns past the end of a line clamp to the line end, and lines past the end of
    /// the document clamp to the end of the text.
    #[must_use]
    pub fn offset_of(&self, at: Position) -> usize {
        let Some(line_start) = self.line_start(at.line) else {
            return self.text.len();
        };
        let line = &self.text[line_start..];
        let line_len = line.find('\n').unwrap_or(line.len());
        let column = line[..line_len]
            .char_indices()
            .nth(at.column)
            .map_or(line_len, |(offset, _)| offset);
        line_start + column
    }

    fn line_start(&self, line: usize) -> Option<usize> {
        if line == 0 {
            return Some(0);
        }
        self.text
            .match_indices('\n')
            .nth(line - 1)
            .map(|(offset, _)| offset + 1)
    }
}

impl Editor for TextBuffer {
    fn cursor(&self) -> Position {
        self.cursor
    }

    fn insert_text(&mut self, at: Position, text: &str) {
        let offset = self.offset_of(at);
        self.text.insert_str(offset, text);
    }
}

#[cfg(test)]
#[path = "tests/buffer.rs"]
mod tests;
