use std::io;
use std::time::Duration;

use crossterm::event::{
    DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, KeyModifiers,
};
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{execute, terminal};

use super::InputDriver;

/// Input from the controlling terminal via crossterm.
#[derive(Debug, Default)]
pub struct ConsoleDriver {
    mouse_captured: bool,
}

impl ConsoleDriver {
    pub fn new() -> Self {
        Self::default()
    }
}

impl InputDriver for ConsoleDriver {
    fn poll(&mut self, timeout: Duration) -> io::Result<bool> {
        crossterm::event::poll(timeout)
    }

    fn read(&mut self) -> io::Result<Event> {
        loop {
            if let Some(evt) = normalize(crossterm::event::read()?) {
                return Ok(evt);
            }
        }
    }

    fn set_mouse_capture(&mut self, enabled: bool) -> io::Result<()> {
        if enabled == self.mouse_captured {
            return Ok(());
        }
        if enabled {
            execute!(io::stdout(), EnableMouseCapture)?;
        } else {
            execute!(io::stdout(), DisableMouseCapture)?;
        }
        self.mouse_captured = enabled;
        Ok(())
    }

    /// Raw mode on the alternate screen, with the mouse captured.
    fn enter(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(io::stdout(), EnterAlternateScreen)?;
        self.set_mouse_capture(true)
    }

    fn exit(&mut self) -> io::Result<()> {
        self.set_mouse_capture(false)?;
        execute!(io::stdout(), LeaveAlternateScreen)?;
        terminal::disable_raw_mode()
    }
}

/// Drop key releases and fold terminal-specific modifier reporting into one
/// shape: Shift+Tab becomes BackTab, and Shift is removed from printable
/// characters since the character already carries it.
pub fn normalize(evt: Event) -> Option<Event> {
    match evt {
        Event::Key(mut key) => {
            if key.kind == KeyEventKind::Release {
                return None;
            }
            if key.code == KeyCode::Tab && key.modifiers.contains(KeyModifiers::SHIFT) {
                key.code = KeyCode::BackTab;
            }
            if matches!(key.code, KeyCode::BackTab | KeyCode::Char(_)) {
                key.modifiers.remove(KeyModifiers::SHIFT);
            }
            Some(Event::Key(key))
        }
        other => Some(other),
    }
}
