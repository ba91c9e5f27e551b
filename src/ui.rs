//! The UI renders the application state into something visible and vim-able.
//!
//! The draw function dispatches based on the current view: the editor (with the command
//! line underneath it when `:` is active) or the settings panel.

use crate::app_state::{AppState, View};
use crate::block_id::ISO_FORMAT;
use crate::command::SET_BLOCK_ID;
use edtui::{EditorTheme, EditorView, SyntaxHighlighter};
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Renders the active view based on current application state.
pub fn draw(f: &mut Frame, app: &mut AppState) {
    match app.current_view {
        View::Editor | View::Command => draw_editor(f, app),
        View::Settings => draw_settings(f, app),
    }
}

fn draw_editor(f: &mut Frame, app: &mut AppState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(3)])
        .split(f.area());

    let cursor = app.cursor();
    let modified = if app.is_modified() { " [+]" } else { "" };
    let title = format!(
        "{}{modified} ({}:{})",
        app.file.display(),
        cursor.line + 1,
        cursor.column + 1
    );

    let block = Block::default().borders(Borders::ALL).title(title);
    let inner = block.inner(chunks[0]);
    f.render_widget(block, chunks[0]);

    let syntax_highlighter = SyntaxHighlighter::new("dracula", "md");
    let editor = EditorView::new(&mut app.editor_state)
        .theme(EditorTheme::default())
        .syntax_highlighter(Some(syntax_highlighter))
        .wrap(true);
    f.render_widget(editor, inner);

    // Help/command line
    let help_text = if app.current_view == View::Command {
        format!(":{}", app.command_buffer)
    } else if let Some(ref msg) = app.message {
        msg.clone()
    } else {
        format!(
            ":id {} | :settings | :w Save | :x Save & Exit | :q Quit | :q! Force Quit",
            SET_BLOCK_ID.name
        )
    };

    let help_title = if app.current_view == View::Command {
        "Command"
    } else {
        ""
    };
    let help =
        Paragraph::new(help_text).block(Block::default().borders(Borders::ALL).title(help_title));
    f.render_widget(help, chunks[1]);
}

fn draw_settings(f: &mut Frame, app: &AppState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(3)])
        .split(f.area());

    let field = if app.settings.format.is_empty() {
        Span::styled(ISO_FORMAT, Style::default().fg(Color::DarkGray))
    } else {
        Span::raw(app.settings.format.clone())
    };

    let lines = vec![
        Line::from(Span::styled(
            "Block Id Format",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "Moment.js-style date format string",
            Style::default().fg(Color::Gray),
        )),
        Line::from(""),
        Line::from(vec![
            Span::raw("> "),
            field,
            Span::styled("█", Style::default().fg(Color::Cyan)),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("Preview: ", Style::default().fg(Color::Gray)),
            Span::styled(
                format!("^{}", app.preview_id()),
                Style::default().fg(Color::Yellow),
            ),
        ]),
    ];

    let panel =
        Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title("Settings"));
    f.render_widget(panel, chunks[0]);

    let help_text = app
        .message
        .clone()
        .unwrap_or_else(|| "Type to edit (saved on every change) | Enter/Esc: Back".to_string());
    let help = Paragraph::new(help_text).block(Block::default().borders(Borders::ALL));
    f.render_widget(help, chunks[1]);
}
