//! smartblock: stable block ids for markdown notes.
//!
//! Given a cursor position in a markdown document, smartblock finds the block (heading,
//! paragraph, list item, ...) that contains it, gives the block a `^id` if it has none,
//! and copies the id to the clipboard so the block can be referenced from elsewhere.

pub mod app_state;
pub mod block_id;
pub mod buffer;
pub mod command;
pub mod config;
pub mod error;
pub mod formats;
pub mod host;
pub mod input;
pub mod locate;
pub mod section;
pub mod ui;
