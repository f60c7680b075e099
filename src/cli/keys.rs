//! Single keystroke input
//!
//! The clear confirmation reads one key at a time without waiting for Enter.
//! On a terminal this uses crossterm raw mode; when stdin is redirected the
//! keys are read byte by byte so the prompt can be scripted.

use std::io::{self, IsTerminal, Read};

use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};

use crate::error::ExpenseResult;

/// Source of confirmation keystrokes
pub trait KeySource {
    /// Block until one key is pressed
    ///
    /// Returns `None` once no more input can arrive (end of input, Ctrl+C).
    fn read_key(&mut self) -> ExpenseResult<Option<char>>;
}

impl<K: KeySource + ?Sized> KeySource for &mut K {
    fn read_key(&mut self) -> ExpenseResult<Option<char>> {
        (**self).read_key()
    }
}

/// Keystrokes from the controlling terminal or redirected stdin
#[derive(Debug, Default)]
pub struct TerminalKeys;

impl TerminalKeys {
    pub fn new() -> Self {
        Self
    }
}

impl KeySource for TerminalKeys {
    fn read_key(&mut self) -> ExpenseResult<Option<char>> {
        if io::stdin().is_terminal() {
            read_raw_key()
        } else {
            read_stdin_byte()
        }
    }
}

/// Restores cooked mode even if reading the event fails
struct RawModeGuard;

impl RawModeGuard {
    fn enable() -> io::Result<Self> {
        enable_raw_mode()?;
        Ok(Self)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
    }
}

fn read_raw_key() -> ExpenseResult<Option<char>> {
    let _guard = RawModeGuard::enable()?;

    loop {
        let Event::Key(key) = event::read()? else {
            continue;
        };
        // Windows reports releases as well
        if key.kind != KeyEventKind::Press {
            continue;
        }

        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        return Ok(match key.code {
            KeyCode::Char('c') | KeyCode::Char('d') if ctrl => None,
            KeyCode::Char(c) => Some(c),
            KeyCode::Enter => Some('\n'),
            KeyCode::Tab => Some('\t'),
            KeyCode::Esc => Some('\u{1b}'),
            // Arrows, function keys and the like
            _ => Some('\0'),
        });
    }
}

fn read_stdin_byte() -> ExpenseResult<Option<char>> {
    let mut byte = [0u8; 1];
    match io::stdin().lock().read(&mut byte)? {
        0 => Ok(None),
        _ => Ok(Some(char::from(byte[0]))),
    }
}
