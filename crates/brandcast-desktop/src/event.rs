//! Keyboard handling.

use crate::app::{App, Command};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::time::Duration;

/// Applies a key press to the app and returns the engine work it triggers.
pub fn handle_key_event(app: &mut App, key: KeyEvent) -> Option<Command> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.should_quit = true;
        return None;
    }

    if app.error().is_some() {
        if matches!(key.code, KeyCode::Esc | KeyCode::Enter) {
            app.dismiss_error();
        }
        return None;
    }

    match key.code {
        KeyCode::Char('q') => {
            app.should_quit = true;
            None
        }
        KeyCode::Left => app.shift_selection(-1),
        KeyCode::Right => app.shift_selection(1),
        KeyCode::Tab | KeyCode::BackTab => {
            app.toggle_focus();
            None
        }
        KeyCode::Char('c') => Some(app.toggle_compare()),
        KeyCode::Enter | KeyCode::Char('p') => Some(Command::Predict),
        _ => None,
    }
}

/// Poll for events with a timeout.
pub fn poll_event(timeout: Duration) -> std::io::Result<Option<Event>> {
    if event::poll(timeout)? {
        Ok(Some(event::read()?))
    } else {
        Ok(None)
    }
}
