use ratatui::{layout::Rect, widgets::Paragraph, Frame};

use crate::runner::host::Host;
use crate::ui::colors::current as current_colors;

/// One-line summary of the window bookkeeping.
pub fn header_text(host: &Host) -> String {
    let list = &host.list;
    let order = if list.query().descending() { "desc" } else { "asc" };
    let filter = host
        .filter_label()
        .map(|f| format!("  filter: {f}"))
        .unwrap_or_default();
    let pending = if list.is_fetch_pending() { "  loading" } else { "" };
    format!(
        "vlist  window {}  cached {}  gen {}  {order}{filter}{pending}",
        list.state(),
        list.cache().len(),
        list.generation(),
    )
}

pub fn render(f: &mut Frame, area: Rect, host: &Host) {
    let p = Paragraph::new(header_text(host)).style(current_colors().header_style);
    f.render_widget(p, area);
}
