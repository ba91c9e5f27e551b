//! Capabilities the block id command needs from whatever is hosting it.
//!
//! The command never reaches for global state: the editor, clipboard and notice surface
//! are handed to it as trait objects, so the same handler runs inside the terminal
//! editor, on a file from the command line, and in tests.

use crate::error::SmartBlockError;
use crate::section::Position;
use log::{debug, info};

/// Text editor holding the active document.
pub trait Editor {
    /// Current cursor position (the end of the selection, if there is one).
    fn cursor(&self) -> Position;

    /// Insert literal text at `at`, shifting everything after it.
    fn insert_text(&mut self, at: Position, text: &str);
}

/// Destination for copied text.
pub trait Clipboard {
    /// Replace the clipboard contents with `text`.
    ///
    /// # Errors
    ///
    /// Returns an error if the platform clipboard is unavailable or rejects the write.
    fn write_text(&mut self, text: &str) -> Result<(), SmartBlockError>;
}

/// Surface for short user-facing messages.
pub trait Notifier {
    /// Show a notice to the user.
    fn notice(&mut self, message: &str);
}

#[derive(Default)]
/// Platform clipboard, connected on first use.
pub struct SystemClipboard {
    inner: Option<arboard::Clipboard>,
}

impl Clipboard for SystemClipboard {
    fn write_text(&mut self, text: &str) -> Result<(), SmartBlockError> {
        if self.inner.is_none() {
            let clipboard =
                arboard::Clipboard::new().map_err(|e| SmartBlockError::Clipboard(e.to_string()))?;
            self.inner = Some(clipboard);
        }
        if let Some(clipboard) = self.inner.as_mut() {
            clipboard
                .set_text(text)
                .map_err(|e| SmartBlockError::Clipboard(e.to_string()))?;
            debug!("Wrote {} bytes to the system clipboard", text.len());
        }
        Ok(())
    }
}

#[derive(Default, Debug)]
/// Clipboard that only remembers the last write.
pub struct MemoryClipboard {
    /// Most recently written text.
    pub contents: Option<String>,
}

impl Clipboard for MemoryClipboard {
    fn write_text(&mut self, text: &str) -> Result<(), SmartBlockError> {
        self.contents = Some(text.to_string());
        Ok(())
    }
}

/// Notifier that forwards notices to the log.
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notice(&mut self, message: &str) {
        info!("{message}");
    }
}
