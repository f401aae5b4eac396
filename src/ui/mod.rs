use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::Frame;

use crate::runner::host::Host;

pub mod colors;
pub mod themes;
pub mod widgets;

pub use themes::Theme;

/// Header and footer take one row each; the list block has a border on
/// both sides.
const CHROME_ROWS: u16 = 4;

/// Rows available to list items in a terminal `height` rows tall.
pub fn list_body_height(height: u16) -> u16 {
    height.saturating_sub(CHROME_ROWS).max(1)
}

fn split(area: Rect) -> [Rect; 3] {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(area);
    [chunks[0], chunks[1], chunks[2]]
}

pub fn ui(f: &mut Frame, host: &Host) {
    let [header, body, footer] = split(f.area());
    widgets::header::render(f, header, host);
    widgets::list::render(f, body, host);
    widgets::footer::render(f, footer, host);
}
