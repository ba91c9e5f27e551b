use super::{assign, find_command, SetBlockId, NO_BLOCK_NOTICE, SET_BLOCK_ID};
use crate::block_id::Clock;
use crate::buffer::TextBuffer;
use crate::error::SmartBlockError;
use crate::formats::markdown::MarkdownFormat;
use crate::host::{Clipboard, Editor, MemoryClipboard, Notifier};
use crate::input::extract_outline;
use crate::section::{Outline, Position};
use jiff::civil::date;
use jiff::tz::TimeZone;
use jiff::Zoned;

struct FixedClock;

impl Clock for FixedClock {
    fn now(&self) -> Zoned {
        date(2024, 1, 2)
            .at(3, 4, 5, 0)
            .to_zoned(TimeZone::UTC)
            .unwrap()
    }
}

#[derive(Default)]
struct RecordingNotifier {
    notices: Vec<String>,
}

impl Notifier for RecordingNotifier {
    fn notice(&mut self, message: &str) {
        self.notices.push(message.to_string());
    }
}

struct BrokenClipboard;

impl Clipboard for BrokenClipboard {
    fn write_text(&mut self, _text: &str) -> Result<(), SmartBlockError> {
        Err(SmartBlockError::Clipboard("no display".to_string()))
    }
}

fn handler(format: &str) -> SetBlockId<'_> {
    SetBlockId {
        format,
        clock: &FixedClock,
    }
}

fn outline_of(text: &str) -> Outline {
    extract_outline(text, &MarkdownFormat).unwrap()
}

#[test]
fn test_generates_and_inserts_missing_id() {
    let text = "# Title\n\nSome text here.\n";
    let outline = outline_of(text);
    let mut buffer = TextBuffer::new(text.to_string(), Position::new(2, 4));
    let mut clipboard = MemoryClipboard::default();
    let mut notifier = RecordingNotifier::default();

    let assignment = handler("YYYYMMDDHHmmss")
        .run(&outline, &mut buffer, &mut clipboard, &mut notifier)
        .unwrap();

    assert_eq!(assignment.id, "20240102030405");
    assert!(assignment.generated);
    assert_eq!(buffer.text(), "# Title\n\nSome text here. ^20240102030405\n");
    assert_eq!(buffer.text().matches(" ^20240102030405").count(), 1);
    assert_eq!(clipboard.contents.as_deref(), Some("20240102030405"));
    assert_eq!(
        notifier.notices,
        vec!["Copied block id ^20240102030405 under \"Title\"".to_string()]
    );
    assert_eq!(assignment.heading.map(|h| h.title), Some("Title".to_string()));
}

#[test]
fn test_existing_id_is_copied_without_mutation() {
    let text = "Para with id ^keep\n";
    let mut buffer = TextBuffer::new(text.to_string(), Position::new(0, 0));
    let mut clipboard = MemoryClipboard::default();
    let mut notifier = RecordingNotifier::default();

    for _ in 0..3 {
        let outline = outline_of(buffer.text());
        let assignment = handler("YYYYMMDDHHmmss")
            .run(&outline, &mut buffer, &mut clipboard, &mut notifier)
            .unwrap();
        assert_eq!(assignment.id, "keep");
        assert!(!assignment.generated);
    }

    assert_eq!(buffer.text(), text);
    assert_eq!(clipboard.contents.as_deref(), Some("keep"));
    assert_eq!(notifier.notices, vec!["Copied block id ^keep".to_string(); 3]);
}

#[test]
fn test_generated_id_is_found_on_next_run() {
    let mut buffer = TextBuffer::new("One paragraph.\n".to_string(), Position::new(0, 0));
    let mut clipboard = MemoryClipboard::default();
    let mut notifier = RecordingNotifier::default();

    let first = handler("[b]YYMMDD")
        .run(&outline_of(buffer.text()), &mut buffer, &mut clipboard, &mut notifier)
        .unwrap();
    let after_first = buffer.text().to_string();
    let second = handler("[b]YYMMDD")
        .run(&outline_of(buffer.text()), &mut buffer, &mut clipboard, &mut notifier)
        .unwrap();

    assert!(first.generated);
    assert!(!second.generated);
    assert_eq!(first.id, "b240102");
    assert_eq!(second.id, first.id);
    assert_eq!(buffer.text(), after_first);
}

#[test]
fn test_list_item_gets_id_on_its_own_line() {
    let text = "- alpha\n- beta\n- gamma\n";
    let mut buffer = TextBuffer::new(text.to_string(), Position::new(1, 0));
    let mut clipboard = MemoryClipboard::default();
    let mut notifier = RecordingNotifier::default();

    handler("HHmmss")
        .run(&outline_of(text), &mut buffer, &mut clipboard, &mut notifier)
        .unwrap();

    assert_eq!(buffer.text(), "- alpha\n- beta ^030405\n- gamma\n");
}

#[test]
fn test_cursor_outside_blocks_is_a_notice() {
    let text = "One\n\nTwo\n";
    let mut buffer = TextBuffer::new(text.to_string(), Position::new(1, 0));
    let mut clipboard = MemoryClipboard::default();
    let mut notifier = RecordingNotifier::default();

    let assignment =
        handler("YYYYMMDDHHmmss").run(&outline_of(text), &mut buffer, &mut clipboard, &mut notifier);

    assert!(assignment.is_none());
    assert_eq!(buffer.text(), text);
    assert!(clipboard.contents.is_none());
    assert_eq!(notifier.notices, vec![NO_BLOCK_NOTICE.to_string()]);
}

#[test]
fn test_empty_outline_is_a_notice() {
    let mut buffer = TextBuffer::new("text".to_string(), Position::new(0, 0));
    let mut clipboard = MemoryClipboard::default();
    let mut notifier = RecordingNotifier::default();

    let assignment = handler("YYYYMMDDHHmmss").run(
        &Outline::default(),
        &mut buffer,
        &mut clipboard,
        &mut notifier,
    );

    assert!(assignment.is_none());
    assert_eq!(buffer.text(), "text");
    assert_eq!(notifier.notices, vec![NO_BLOCK_NOTICE.to_string()]);
}

#[test]
fn test_clipboard_failure_does_not_abort() {
    let text = "Paragraph\n";
    let mut buffer = TextBuffer::new(text.to_string(), Position::new(0, 0));
    let mut notifier = RecordingNotifier::default();

    let assignment = handler("YYYY")
        .run(&outline_of(text), &mut buffer, &mut BrokenClipboard, &mut notifier)
        .unwrap();

    assert_eq!(assignment.id, "2024");
    assert_eq!(buffer.text(), "Paragraph ^2024\n");
    assert_eq!(notifier.notices.len(), 1);
}

#[test]
fn test_empty_format_falls_back_to_iso_time() {
    let text = "Paragraph\n";
    let outline = outline_of(text);
    let mut buffer = TextBuffer::new(text.to_string(), Position::new(0, 0));

    let (id, generated) = assign(&outline.sections[0], "", &FixedClock, &mut buffer);

    assert!(generated);
    assert_eq!(id, "2024-01-02T03:04:05+00:00");
    assert_eq!(buffer.text(), "Paragraph ^2024-01-02T03:04:05+00:00\n");
}

#[test]
fn test_unix_seconds_format() {
    let text = "Paragraph\n";
    let mut buffer = TextBuffer::new(text.to_string(), Position::new(0, 0));
    let mut clipboard = MemoryClipboard::default();
    let mut notifier = RecordingNotifier::default();

    let assignment = handler("X")
        .run(&outline_of(text), &mut buffer, &mut clipboard, &mut notifier)
        .unwrap();

    assert_eq!(assignment.id, "1704164645");
    assert_eq!(buffer.text(), "Paragraph ^1704164645\n");
}

#[test]
fn test_cursor_on_table_row() {
    let text = "| a | b |\n|---|---|\n| 1 | 2 |\n";
    let mut buffer = TextBuffer::new(text.to_string(), Position::new(2, 2));
    let mut clipboard = MemoryClipboard::default();
    let mut notifier = RecordingNotifier::default();

    let first = handler("YYYYMMDDHHmmss")
        .run(&outline_of(text), &mut buffer, &mut clipboard, &mut notifier)
        .unwrap();

    assert!(first.generated);
    assert_eq!(buffer.text(), "| a | b |\n|---|---|\n| 1 | 2 | ^20240102030405\n");
    assert_eq!(clipboard.contents.as_deref(), Some("20240102030405"));

    // The header row belongs to the same table block
    let mut header = TextBuffer::new(buffer.text().to_string(), Position::new(0, 0));
    let second = handler("YYYYMMDDHHmmss")
        .run(&outline_of(header.text()), &mut header, &mut clipboard, &mut notifier)
        .unwrap();

    assert!(!second.generated);
    assert_eq!(second.id, first.id);
    assert_eq!(header.text(), buffer.text());
}

#[test]
fn test_assign_keeps_existing_id() {
    let text = "Done ^xyz\n";
    let outline = outline_of(text);
    let mut buffer = TextBuffer::new(text.to_string(), Position::new(0, 0));

    let (id, generated) = assign(&outline.sections[0], "YYYY", &FixedClock, &mut buffer);

    assert_eq!((id.as_str(), generated), ("xyz", false));
    assert_eq!(buffer.cursor(), Position::new(0, 0));
    assert_eq!(buffer.text(), text);
}

#[test]
fn test_find_command_by_id_or_name() {
    assert_eq!(find_command("set-block-id"), Some(&SET_BLOCK_ID));
    assert_eq!(find_command("Set Block Id"), Some(&SET_BLOCK_ID));
    assert_eq!(find_command("delete-block"), None);
}
