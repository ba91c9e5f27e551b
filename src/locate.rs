//! Mapping a cursor line to the block that encloses it.
//!
//! Sections arrive in document order and never overlap, so the first section whose range
//! contains the line is the enclosing block. The nearest preceding heading is looked up
//! separately and is only used to describe the result to the user.

use crate::section::{Heading, Outline, Section};

#[derive(Clone, Copy, Debug)]
/// Result of locating a cursor line within an outline.
pub struct Location<'a> {
    /// Block containing the cursor line, if any.
    pub block: Option<&'a Section>,
    /// Last heading starting at or before the cursor line, if any.
    pub heading: Option<&'a Heading>,
}

#[must_use]
/// Returns the first section whose inclusive line range contains `line`.
pub fn find_block(sections: &[Section], line: usize) -> Option<&Section> {
    sections.iter().find(|section| section.contains_line(line))
}

#[must_use]
/// Returns the last heading whose start line is at or before `line`.
pub fn nearest_heading(headings: &[Heading], line: usize) -> Option<&Heading> {
    headings
        .iter()
        .rev()
        .find(|heading| heading.line_start <= line)
}

#[must_use]
/// Locates the enclosing block and the nearest preceding heading for a cursor line.
pub fn locate(outline: &Outline, line: usize) -> Location<'_> {
    Location {
        block: find_block(&outline.sections, line),
        heading: nearest_heading(&outline.headings, line),
    }
}

#[cfg(test)]
#[path = "tests/locate.rs"]
mod tests;
