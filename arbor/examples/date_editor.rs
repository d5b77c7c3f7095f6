//! Interactive date editor on a single terminal line.
//!
//! Up/Down spin the field under the caret, digits type into the mask,
//! Ctrl+; inserts now, Tab toggles focus and Esc quits.

use std::fs::File;
use std::io::{self, Write};

use arbor::prelude::*;
use crossterm::event::{self, KeyCode};
use crossterm::{cursor, execute, terminal};
use simplelog::{Config, LevelFilter, WriteLogger};

fn main() -> io::Result<()> {
    // Set up file logging
    let log_file = File::create("date_editor.log")?;
    WriteLogger::init(LevelFilter::Debug, Config::default(), log_file)
        .expect("Failed to initialize logger");

    let config = DateTimeEditorConfig::new("dd/MM/yyyy HH:mm")
        .display_format("fullDate")
        .locale("en-GB");
    let mut editor = DateTimeEditor::new(config);
    editor.on_value_change(|args| log::info!("value {:?} -> {:?}", args.old_value, args.new_value));
    editor.on_validation_fail(|args| log::warn!("rejected '{}'", args.user_input));
    editor.handle_event(&Event::Focus);

    terminal::enable_raw_mode()?;
    let result = run(&mut editor);
    terminal::disable_raw_mode()?;
    println!();
    result
}

fn run(editor: &mut DateTimeEditor) -> io::Result<()> {
    let mut stdout = io::stdout();
    loop {
        execute!(
            stdout,
            cursor::MoveToColumn(0),
            terminal::Clear(terminal::ClearType::CurrentLine)
        )?;
        write!(stdout, "{}", editor.text())?;
        if editor.is_focused() {
            execute!(stdout, cursor::MoveToColumn(editor.cursor() as u16))?;
        }
        stdout.flush()?;

        let raw = event::read()?;
        if let event::Event::Key(key) = &raw {
            match key.code {
                KeyCode::Esc => return Ok(()),
                KeyCode::Tab => {
                    let toggle = if editor.is_focused() {
                        Event::Blur
                    } else {
                        Event::Focus
                    };
                    editor.handle_event(&toggle);
                    continue;
                }
                _ => {}
            }
        }
        if let Some(event) = Event::from_crossterm(&raw) {
            editor.handle_event(&event);
        }
    }
}
