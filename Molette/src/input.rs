//! Keyboard stand-in for the rotary knob
//!
//! On the desk the knob is a keyboard: arrows rotate, Enter clicks, Tab
//! double-clicks, Space is the physical button (press and release). Not
//! every terminal reports key releases, so `h`/`r` force a press/release
//! pair by hand.

use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};

use molui::{InputEvent, RotateDirection};

/// An input event, or the request to quit the host loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostEvent {
    Input(InputEvent),
    Quit,
}

/// Wait up to `timeout` for a key and map it to a [`HostEvent`].
///
/// Returns `Ok(None)` on timeout and for keys without a mapping.
pub fn poll_input(timeout: Duration) -> Result<Option<HostEvent>> {
    if !event::poll(timeout)? {
        return Ok(None);
    }
    match event::read()? {
        Event::Key(key) => Ok(map_key(key)),
        _ => Ok(None),
    }
}

fn map_key(key: KeyEvent) -> Option<HostEvent> {
    // Space is the only key where release matters.
    if key.kind == KeyEventKind::Release {
        return match key.code {
            KeyCode::Char(' ') => Some(HostEvent::Input(InputEvent::ButtonRelease)),
            _ => None,
        };
    }
    if key.kind == KeyEventKind::Repeat && key.code == KeyCode::Char(' ') {
        return None;
    }

    let event = match key.code {
        KeyCode::Right | KeyCode::Up => InputEvent::Rotate(RotateDirection::Clockwise),
        KeyCode::Left | KeyCode::Down => InputEvent::Rotate(RotateDirection::CounterClockwise),
        KeyCode::Enter => InputEvent::Click,
        KeyCode::Tab => InputEvent::DoubleClick,
        KeyCode::Char(' ') | KeyCode::Char('h') => InputEvent::ButtonPress,
        KeyCode::Char('r') => InputEvent::ButtonRelease,
        KeyCode::Char('q') | KeyCode::Esc => return Some(HostEvent::Quit),
        _ => return None,
    };
    Some(HostEvent::Input(event))
}
