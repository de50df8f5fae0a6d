//! Key-press console front end.
//!
//! Reads single key presses in raw mode and prints narration with colour.
//! Raw mode is held only for the duration of one read.

use crate::app::{Command, Narration, Tone};
use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::style::Stylize;
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use evolve_data::OrganismKind;
use std::io::{self, BufRead, Write};

pub const MENU: [(&str, &str); 6] = [
    ("1", "Advance turn"),
    ("2", "Show stats"),
    ("3", "Attempt to evolve"),
    ("S", "Save world"),
    ("L", "Load world"),
    ("Q", "Quit"),
];

/// Maps a key to its command; unknown keys map to nothing.
#[must_use]
pub fn command_for_key(key: KeyEvent) -> Option<Command> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Command::Quit);
    }
    match key.code {
        KeyCode::Char('1') => Some(Command::AdvanceTurn),
        KeyCode::Char('2') => Some(Command::ShowStats),
        KeyCode::Char('3') => Some(Command::Evolve),
        KeyCode::Char('s') | KeyCode::Char('S') => Some(Command::SaveWorld),
        KeyCode::Char('l') | KeyCode::Char('L') => Some(Command::LoadWorld),
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Some(Command::Quit),
        _ => None,
    }
}

/// Parses the creation prompt answer, e.g. `carnivore Bobby`.
#[must_use]
pub fn parse_creation(line: &str) -> Option<(OrganismKind, String)> {
    let line = line.trim();
    let (kind, name) = line.split_once(char::is_whitespace)?;
    let kind = OrganismKind::parse_base(kind)?;
    let name = name.trim();
    if name.is_empty() {
        return None;
    }
    Some((kind, name.to_string()))
}

pub struct Console<W: Write> {
    out: W,
}

impl Console<io::Stdout> {
    pub fn stdout() -> Self {
        Self { out: io::stdout() }
    }
}

impl<W: Write> Console<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn print_menu(&mut self) -> Result<()> {
        writeln!(self.out)?;
        for (key, label) in MENU {
            writeln!(self.out, "[{}] {label}", key.bold())?;
        }
        self.out.flush()?;
        Ok(())
    }

    pub fn render(&mut self, lines: &[Narration]) -> Result<()> {
        for line in lines {
            let styled = match line.tone {
                Tone::Info => line.text.as_str().stylize(),
                Tone::Success => line.text.as_str().green(),
                Tone::Warning => line.text.as_str().yellow(),
            };
            writeln!(self.out, "{styled}")?;
        }
        self.out.flush()?;
        Ok(())
    }

    /// Asks for `<kind> <name>` until the answer parses. `None` on end of input.
    pub fn prompt_player(&mut self, input: &mut impl BufRead) -> Result<Option<(OrganismKind, String)>> {
        loop {
            write!(
                self.out,
                "Create your cell as '<herbivore|carnivore|omnivore> <name>': "
            )?;
            self.out.flush()?;
            let mut line = String::new();
            if input.read_line(&mut line).context("Failed to read player name")? == 0 {
                return Ok(None);
            }
            match parse_creation(&line) {
                Some(answer) => return Ok(Some(answer)),
                None => writeln!(self.out, "{}", "Please give a kind and a name.".yellow())?,
            }
        }
    }
}

/// Blocks until a mapped key is pressed.
pub fn read_command() -> Result<Command> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    let result = loop {
        match event::read() {
            Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                if let Some(command) = command_for_key(key) {
                    break Ok(command);
                }
            }
            Ok(_) => {}
            Err(e) => break Err(e),
        }
    };
    disable_raw_mode().context("Failed to disable raw mode")?;
    Ok(result?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE)
    }

    #[test]
    fn test_key_map() {
        assert_eq!(command_for_key(key('1')), Some(Command::AdvanceTurn));
        assert_eq!(command_for_key(key('2')), Some(Command::ShowStats));
        assert_eq!(command_for_key(key('3')), Some(Command::Evolve));
        assert_eq!(command_for_key(key('S')), Some(Command::SaveWorld));
        assert_eq!(command_for_key(key('l')), Some(Command::LoadWorld));
        assert_eq!(command_for_key(key('q')), Some(Command::Quit));
        assert_eq!(command_for_key(key('x')), None);
        assert_eq!(
            command_for_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(Command::Quit)
        );
    }

    #[test]
    fn test_parse_creation() {
        assert_eq!(
            parse_creation("carnivore Bobby\n"),
            Some((OrganismKind::Carnivore, "Bobby".to_string()))
        );
        assert_eq!(
            parse_creation("o  Big Blob "),
            Some((OrganismKind::Omnivore, "Big Blob".to_string()))
        );
        assert_eq!(parse_creation("carnivore"), None);
        assert_eq!(parse_creation("fungus Bob"), None);
    }

    #[test]
    fn test_prompt_retries_until_valid() {
        let mut out = Vec::new();
        let mut input = io::Cursor::new("nonsense\nherbivore Leaf\n");
        let answer = Console::new(&mut out).prompt_player(&mut input).unwrap();
        assert_eq!(answer, Some((OrganismKind::Herbivore, "Leaf".to_string())));
        let printed = String::from_utf8(out).unwrap();
        assert!(printed.contains("Please give a kind and a name."));
    }

    #[test]
    fn test_render_writes_every_line() {
        let mut out = Vec::new();
        Console::new(&mut out)
            .render(&[
                Narration {
                    text: "World saved.".into(),
                    tone: Tone::Success,
                },
                Narration {
                    text: "Turn: 3".into(),
                    tone: Tone::Info,
                },
            ])
            .unwrap();
        let printed = String::from_utf8(out).unwrap();
        assert!(printed.contains("World saved."));
        assert!(printed.contains("Turn: 3"));
    }
}
