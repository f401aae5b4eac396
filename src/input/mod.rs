//! Terminal input: a thin layer over crossterm events so the runner never
//! matches on crossterm types directly.

pub mod keyboard;

pub use keyboard::{is_printable_key, KeyCode, KeyEvent, KeyModifiers};

use crossterm::event::{self, Event, KeyEventKind, MouseEvent, MouseEventKind};
use std::io;
use std::time::Duration;

/// The input events the list host reacts to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    Key(KeyEvent),
    /// Mouse wheel: negative scrolls up.
    Wheel(i64),
    Resize(u16, u16),
    Other,
}

impl From<Event> for InputEvent {
    fn from(ev: Event) -> Self {
        match ev {
            Event::Key(key) if key.kind != KeyEventKind::Release => InputEvent::Key(key),
            Event::Mouse(MouseEvent { kind, .. }) => match kind {
                MouseEventKind::ScrollUp => InputEvent::Wheel(-1),
                MouseEventKind::ScrollDown => InputEvent::Wheel(1),
                _ => InputEvent::Other,
            },
            Event::Resize(w, h) => InputEvent::Resize(w, h),
            _ => InputEvent::Other,
        }
    }
}

/// Wait up to `timeout` for an input event to become available.
pub fn poll(timeout: Duration) -> io::Result<bool> {
    event::poll(timeout)
}

/// Read the next event; call only after [`poll`] returned true.
pub fn read_event() -> io::Result<InputEvent> {
    event::read().map(InputEvent::from)
}
