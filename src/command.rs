//! The "Set block id" command.
//!
//! One invocation moves through a short, stateless pipeline:
//!
//! ```text
//! Idle -> Located -> HasId -> Copy
//!                 -> NoId  -> Generate -> Insert -> Copy
//! ```
//!
//! If no block contains the cursor the pipeline stops at `Idle` with a notice, before
//! touching the document or the clipboard. The clipboard write comes last and is best
//! effort: the id is already final by then, and a failed write is only logged.

use crate::block_id::{generate_id, Clock};
use crate::host::{Clipboard, Editor, Notifier};
use crate::locate::locate;
use crate::section::{Heading, Outline, Section};
use log::{debug, warn};

/// Notice shown when the cursor is not inside any block.
pub const NO_BLOCK_NOTICE: &str = "No block found at cursor";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// A user-invocable action the host can list and dispatch.
pub struct CommandSpec {
    /// Stable identifier used to invoke the command.
    pub id: &'static str,
    /// Human-readable name.
    pub name: &'static str,
}

/// Assign a block id to the block under the cursor and copy it.
pub const SET_BLOCK_ID: CommandSpec = CommandSpec {
    id: "set-block-id",
    name: "Set block id",
};

/// Every command this crate contributes.
pub const COMMANDS: [CommandSpec; 1] = [SET_BLOCK_ID];

#[must_use]
/// Looks a command up by its id or display name, ignoring case.
pub fn find_command(input: &str) -> Option<&'static CommandSpec> {
    let input = input.trim();
    COMMANDS.iter().find(|command| {
        command.id.eq_ignore_ascii_case(input) || command.name.eq_ignore_ascii_case(input)
    })
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// Outcome of a successful invocation.
pub struct Assignment {
    /// Block id now attached to the block, without the caret.
    pub id: String,
    /// Whether the id was generated and inserted by this invocation.
    pub generated: bool,
    /// Block the id belongs to, as it was before any insertion.
    pub block: Section,
    /// Nearest heading at or above the cursor.
    pub heading: Option<Heading>,
}

/// Return the block's id, generating and inserting one if it has none.
///
/// A new id is written as ` ^<id>` right after the block's last character.
pub fn assign(
    block: &Section,
    format: &str,
    clock: &dyn Clock,
    editor: &mut dyn Editor,
) -> (String, bool) {
    if let Some(id) = block.id.as_deref().filter(|id| !id.is_empty()) {
        return (id.to_string(), false);
    }
    let id = generate_id(format, clock);
    editor.insert_text(block.end(), &format!(" ^{id}"));
    (id, true)
}

/// Handler for [`SET_BLOCK_ID`].
pub struct SetBlockId<'a> {
    /// Pattern new ids are generated from.
    pub format: &'a str,
    /// Time source for generated ids.
    pub clock: &'a dyn Clock,
}

impl SetBlockId<'_> {
    /// Run the command against the editor's current cursor.
    ///
    /// Returns `None` after notifying the user when the cursor is outside every block;
    /// in that case neither the document nor the clipboard is touched.
    pub fn run(
        &self,
        outline: &Outline,
        editor: &mut dyn Editor,
        clipboard: &mut dyn Clipboard,
        notifier: &mut dyn Notifier,
    ) -> Option<Assignment> {
        let cursor = editor.cursor();
        let location = locate(outline, cursor.line);
        debug!(
            "Block at line {}: {}",
            cursor.line,
            serde_json::to_string(&location.block).unwrap_or_default()
        );
        debug!(
            "Heading above line {}: {}",
            cursor.line,
            serde_json::to_string(&location.heading).unwrap_or_default()
        );

        let Some(block) = location.block else {
            notifier.notice(NO_BLOCK_NOTICE);
            return None;
        };

        let (id, generated) = assign(block, self.format, self.clock, editor);

        if let Err(e) = clipboard.write_text(&id) {
            warn!("Could not copy block id to the clipboard: {e}");
        }

        let message = match location.heading {
            Some(heading) => format!("Copied block id ^{id} under \"{}\"", heading.title),
            None => format!("Copied block id ^{id}"),
        };
        notifier.notice(&message);

        Some(Assignment {
            id,
            generated,
            block: block.clone(),
            heading: location.heading.cloned(),
        })
    }
}

#[cfg(test)]
#[path = "tests/command.rs"]
mod tests;
