// Key types the handlers match on, re-exported so nothing else imports crossterm.
pub use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Whether `ev` should be typed into a text prompt. Control chords are not.
pub fn is_printable_key(ev: &KeyEvent) -> bool {
    matches!(ev.code, KeyCode::Char(_)) && !ev.modifiers.contains(KeyModifiers::CONTROL)
}
