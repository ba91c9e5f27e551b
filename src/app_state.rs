//! The core state machine bridging the document, the editor and the block id command.
//!
//! A TUI needs a single source of truth that can be interrogated and mutated as the user
//! edits. The edtui buffer is that source: commands snapshot its lines into a
//! [`TextBuffer`], run against the snapshot, and write the result back, so the editor's
//! undo-free line model is only ever replaced wholesale.

use crate::block_id::{format_timestamp, Clock};
use crate::buffer::TextBuffer;
use crate::command::{find_command, Assignment, SetBlockId};
use crate::config::{Settings, SettingsStore};
use crate::error::SmartBlockError;
use crate::formats::markdown::MarkdownFormat;
use crate::host::{Clipboard, Notifier};
use crate::input;
use crate::section::{Outline, Position};
use edtui::{EditorState, Lines};
use log::warn;
use std::fs;
use std::path::PathBuf;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Determines which UI screen renders and how input is interpreted.
pub enum View {
    /// Vim-like editor over the whole document.
    Editor,
    /// Captures vim-style command input after ':' keystroke.
    Command,
    /// Settings panel with the block id format field.
    Settings,
}

/// Writes notices into the status line.
struct StatusNotifier<'a>(&'a mut Option<String>);

impl Notifier for StatusNotifier<'_> {
    fn notice(&mut self, message: &str) {
        *self.0 = Some(message.to_string());
    }
}

/// Document, editor and settings for one editing session.
pub struct AppState {
    /// File being edited.
    pub file: PathBuf,
    /// Editor buffer holding the document.
    pub editor_state: EditorState,
    /// Active UI screen determining input handling.
    pub current_view: View,
    /// Accumulates vim-style command input after ':' is pressed.
    pub command_buffer: String,
    /// Status feedback displayed in the help bar.
    pub message: Option<String>,
    /// Settings in effect, saved on every change.
    pub settings: Settings,
    saved_text: String,
    trailing_newline: bool,
    store: Box<dyn SettingsStore>,
    clipboard: Box<dyn Clipboard>,
    clock: Box<dyn Clock>,
}

impl AppState {
    #[must_use]
    /// Starts a session over `text`, loading settings from `store`.
    pub fn new(
        file: PathBuf,
        text: &str,
        store: Box<dyn SettingsStore>,
        clipboard: Box<dyn Clipboard>,
        clock: Box<dyn Clock>,
    ) -> Self {
        let settings = store.load();
        Self {
            file,
            editor_state: EditorState::new(Lines::from(text)),
            current_view: View::Editor,
            command_buffer: String::new(),
            message: None,
            settings,
            saved_text: text.to_string(),
            trailing_newline: text.ends_with('\n'),
            store,
            clipboard,
            clock,
        }
    }

    /// Reads `file` from disk and starts a session over it.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read.
    pub fn open(
        file: PathBuf,
        store: Box<dyn SettingsStore>,
        clipboard: Box<dyn Clipboard>,
        clock: Box<dyn Clock>,
    ) -> Result<Self, SmartBlockError> {
        let text = fs::read_to_string(&file)?;
        Ok(Self::new(file, &text, store, clipboard, clock))
    }

    #[must_use]
    /// Current editor contents as a single string.
    pub fn text(&self) -> String {
        let mut text = self
            .editor_state
            .lines
            .iter_row()
            .map(|line| line.iter().collect::<String>())
            .collect::<Vec<_>>()
            .join("\n");
        if self.trailing_newline && !text.ends_with('\n') {
            text.push('\n');
        }
        text
    }

    #[must_use]
    /// Whether the editor holds changes not yet written to disk.
    pub fn is_modified(&self) -> bool {
        self.text() != self.saved_text
    }

    #[must_use]
    /// Editor cursor as a document position.
    pub fn cursor(&self) -> Position {
        Position::new(self.editor_state.cursor.row, self.editor_state.cursor.col)
    }

    /// Runs "Set block id" at the editor cursor.
    ///
    /// The outline is re-extracted from the current editor text; if that fails the outline
    /// is treated as empty and the command reports that no block was found.
    pub fn set_block_id(&mut self) -> Option<Assignment> {
        let text = self.text();
        let outline = input::extract_outline(&text, &MarkdownFormat).unwrap_or_else(|e| {
            warn!("Outline unavailable for {}: {e}", self.file.display());
            Outline::default()
        });

        let mut buffer = TextBuffer::new(text, self.cursor());
        let handler = SetBlockId {
            format: &self.settings.format,
            clock: self.clock.as_ref(),
        };
        let assignment = handler.run(
            &outline,
            &mut buffer,
            self.clipboard.as_mut(),
            &mut StatusNotifier(&mut self.message),
        )?;

        if assignment.generated {
            self.editor_state.lines = Lines::from(buffer.text());
        }
        Some(assignment)
    }

    /// Writes the editor contents back to the file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn save(&mut self) -> Result<(), SmartBlockError> {
        let text = self.text();
        fs::write(&self.file, &text)?;
        self.saved_text = text;
        self.message = Some(format!("Saved {}", self.file.display()));
        Ok(())
    }

    /// Dispatches a `:` command, returning `true` if the session should end.
    pub fn run_command(&mut self, command: &str) -> bool {
        match command.trim() {
            "w" => {
                if let Err(e) = self.save() {
                    self.message = Some(format!("Error saving: {e}"));
                }
                false
            }
            "x" | "wq" => match self.save() {
                Ok(()) => true,
                Err(e) => {
                    self.message = Some(format!("Error saving: {e}"));
                    false
                }
            },
            "q" => {
                if self.is_modified() {
                    self.message = Some("Unsaved changes (:w to save, :q! to discard)".into());
                    false
                } else {
                    true
                }
            }
            "q!" => true,
            "settings" => {
                self.open_settings();
                false
            }
            "id" => {
                self.set_block_id();
                false
            }
            other => {
                if find_command(other).is_some() {
                    self.set_block_id();
                } else {
                    self.message = Some(format!("Unknown command: {other}"));
                }
                false
            }
        }
    }

    // --- Settings Panel ---

    /// Shows the settings panel.
    pub fn open_settings(&mut self) {
        self.current_view = View::Settings;
        self.message = None;
    }

    /// Returns from the settings panel to the editor.
    pub fn close_settings(&mut self) {
        self.current_view = View::Editor;
    }

    /// Appends a character to the format field and saves.
    pub fn push_format_char(&mut self, c: char) {
        self.settings.format.push(c);
        self.persist_settings();
    }

    /// Deletes the last character of the format field and saves.
    pub fn pop_format_char(&mut self) {
        if self.settings.format.pop().is_some() {
            self.persist_settings();
        }
    }

    #[must_use]
    /// Id the current format would generate right now.
    pub fn preview_id(&self) -> String {
        format_timestamp(&self.clock.now(), &self.settings.format)
    }

    fn persist_settings(&mut self) {
        if let Err(e) = self.store.save(&self.settings) {
            self.message = Some(format!("Error saving settings: {e}"));
        }
    }

    // --- </Settings Panel> ---
}

#[cfg(test)]
#[path = "tests/app_state.rs"]
mod tests;
