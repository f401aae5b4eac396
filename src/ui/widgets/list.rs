use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState};
use ratatui::Frame;

use crate::data::ListRow;
use crate::runner::host::Host;
use crate::ui::colors::{self, Colors};

/// Text for one row. `marked` rows get a leading `*`.
pub fn format_row_line(index: usize, row: &ListRow, marked: bool) -> String {
    let mark = if marked { '*' } else { ' ' };
    match &row.detail {
        Some(detail) => format!("{mark} {index:>6}  {:<24} {detail}", row.label),
        None => format!("{mark} {index:>6}  {}", row.label),
    }
}

fn row_item(index: usize, row: Option<&ListRow>, marked: bool, colors: &Colors) -> ListItem<'static> {
    let line = match row {
        Some(row) if marked => Line::from(Span::styled(
            format_row_line(index, row, true),
            colors.marked_row_style,
        )),
        Some(row) => Line::from(format_row_line(index, row, false)),
        // not materialized yet: the fetch for this part of the window is in flight
        None => Line::from(Span::styled(
            format!("  {index:>6}  …"),
            colors.placeholder_style,
        )),
    };
    ListItem::new(line)
}

/// Render the rows currently on screen, drawn from the materialized window.
pub fn render(f: &mut Frame, area: Rect, host: &Host) {
    let colors = colors::current();
    let list = &host.list;
    let viewport = list.viewport_range();
    let rows = usize::from(area.height.saturating_sub(2));
    let shown = viewport.start..viewport.end.min(viewport.start + rows);

    let items: Vec<ListItem> = shown
        .clone()
        .map(|i| {
            let row = if list.state().contains(i) {
                list.cache().get(i)
            } else {
                None
            };
            row_item(i, row, list.selection().is_selected(i), &colors)
        })
        .collect();

    let title = format!(" {} of {} ", list.state().range().len(), list.total_count());
    let widget = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(title)
                .style(colors.list_block_style),
        )
        .highlight_style(colors.active_row_style);

    let mut state = ListState::default();
    state.select(
        list.selection()
            .active()
            .filter(|a| shown.contains(a))
            .map(|a| a - shown.start),
    );
    f.render_stateful_widget(widget, area, &mut state);
}
