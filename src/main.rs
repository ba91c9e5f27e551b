//! smartblock: stable block ids for markdown notes.
#![allow(clippy::multiple_crate_versions)]

use clap::{Parser, Subcommand};
use color_eyre::eyre::{Context, Result};
use edtui::EditorEventHandler;
use log::{info, warn, LevelFilter};
use ratatui::crossterm::{
    event::{self, Event, KeyCode},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use smartblock::app_state::{AppState, View};
use smartblock::block_id::SystemClock;
use smartblock::buffer::TextBuffer;
use smartblock::command::SetBlockId;
use smartblock::config::{FileSettingsStore, SettingsStore, DEFAULT_SETTINGS_FILE};
use smartblock::formats::markdown::MarkdownFormat;
use smartblock::host::{Clipboard, LogNotifier, MemoryClipboard, SystemClipboard};
use smartblock::section::{Outline, Position};
use smartblock::{input, ui};
use std::fs;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "smartblock")]
#[command(about = "Stable block ids for markdown notes", long_about = None)]
struct Args {
    /// Settings file to load and save
    #[arg(long, global = true, value_name = "PATH")]
    settings: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Set a block id on the block at a line and copy it
    Set {
        /// Markdown file to modify
        file: PathBuf,
        /// Line of the cursor (1-based)
        #[arg(long, short = 'l')]
        line: usize,
        /// Column of the cursor (1-based)
        #[arg(long, short = 'c', default_value_t = 1)]
        column: usize,
        /// Print the id without touching the system clipboard
        #[arg(long)]
        no_clipboard: bool,
    },
    /// Open a file in the terminal editor
    Edit {
        /// Markdown file to edit
        file: PathBuf,
    },
    /// Print the blocks and headings of a file as JSON
    Outline {
        /// Markdown file to index
        file: PathBuf,
    },
    /// Show or change the block id format
    Config {
        /// New moment.js-style format
        #[arg(long)]
        format: Option<String>,
    },
}

fn main() -> Result<ExitCode> {
    color_eyre::install()?;
    let args = Args::parse();

    // Anything written to stderr would land on top of the editor's alternate screen
    let level = match (&args.command, args.verbose) {
        (Commands::Edit { .. }, _) => LevelFilter::Error,
        (_, true) => LevelFilter::Debug,
        (_, false) => LevelFilter::Info,
    };
    env_logger::Builder::new().filter_level(level).init();

    let store = FileSettingsStore::new(
        args.settings
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SETTINGS_FILE)),
    );

    match args.command {
        Commands::Set {
            file,
            line,
            column,
            no_clipboard,
        } => set_block_id(&store, file, line, column, no_clipboard),
        Commands::Edit { file } => {
            let app = AppState::open(
                file.clone(),
                Box::new(store),
                Box::new(SystemClipboard::default()),
                Box::new(SystemClock),
            )
            .wrap_err_with(|| format!("Failed to open {}", file.display()))?;
            run_tui(app)?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Outline { file } => {
            let outline = input::read_outline(&file, &MarkdownFormat)
                .wrap_err_with(|| format!("Failed to index {}", file.display()))?;
            let json = serde_json::to_string_pretty(&outline)?;
            println!("{json}");
            Ok(ExitCode::SUCCESS)
        }
        Commands::Config { format } => {
            let mut settings = store.load();
            if let Some(format) = format {
                settings.format = format;
                store.save(&settings)?;
                info!("Saved settings to {}", store.path().display());
            }
            println!("{}", settings.format);
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn set_block_id(
    store: &FileSettingsStore,
    file: PathBuf,
    line: usize,
    column: usize,
    no_clipboard: bool,
) -> Result<ExitCode> {
    let settings = store.load();
    let text = fs::read_to_string(&file)
        .wrap_err_with(|| format!("Failed to read {}", file.display()))?;
    let outline = input::extract_outline(&text, &MarkdownFormat).unwrap_or_else(|e| {
        warn!("Outline unavailable for {}: {e}", file.display());
        Outline::default()
    });

    let cursor = Position::new(line.saturating_sub(1), column.saturating_sub(1));
    let mut buffer = TextBuffer::new(text, cursor);
    let mut clipboard: Box<dyn Clipboard> = if no_clipboard {
        Box::new(MemoryClipboard::default())
    } else {
        Box::new(SystemClipboard::default())
    };

    let handler = SetBlockId {
        format: &settings.format,
        clock: &SystemClock,
    };
    let Some(assignment) = handler.run(&outline, &mut buffer, clipboard.as_mut(), &mut LogNotifier)
    else {
        return Ok(ExitCode::FAILURE);
    };

    if assignment.generated {
        fs::write(&file, buffer.text())
            .wrap_err_with(|| format!("Failed to write {}", file.display()))?;
        info!("Wrote ^{} to {}", assignment.id, file.display());
    }
    println!("{}", assignment.id);
    Ok(ExitCode::SUCCESS)
}

fn run_tui(mut app: AppState) -> io::Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut editor_handler = EditorEventHandler::default();

    let result = run_app(&mut terminal, &mut app, &mut editor_handler);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut AppState,
    editor_handler: &mut EditorEventHandler,
) -> io::Result<()> {
    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        if let Event::Key(key) = event::read()? {
            match app.current_view {
                View::Editor => match key.code {
                    KeyCode::Char(':') if app.editor_state.mode == edtui::EditorMode::Normal => {
                        app.current_view = View::Command;
                        app.command_buffer.clear();
                        app.message = None;
                    }
                    _ => editor_handler.on_key_event(key, &mut app.editor_state),
                },
                View::Command => match key.code {
                    KeyCode::Char(c) => {
                        app.command_buffer.push(c);
                    }
                    KeyCode::Backspace => {
                        app.command_buffer.pop();
                    }
                    KeyCode::Enter => {
                        let cmd = std::mem::take(&mut app.command_buffer);
                        app.current_view = View::Editor;
                        if app.run_command(&cmd) {
                            return Ok(());
                        }
                    }
                    KeyCode::Esc => {
                        app.current_view = View::Editor;
                        app.command_buffer.clear();
                    }
                    _ => {}
                },
                View::Settings => match key.code {
                    KeyCode::Char(c) => app.push_format_char(c),
                    KeyCode::Backspace => app.pop_format_char(),
                    KeyCode::Enter | KeyCode::Esc => app.close_settings(),
                    _ => {}
                },
            }
        }
    }
}
