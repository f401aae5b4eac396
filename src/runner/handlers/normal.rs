use std::time::Instant;

use super::Handled;
use crate::app::settings::keybinds;
use crate::input::KeyCode;
use crate::runner::host::{Host, Mode};
use crate::ui::colors;

pub fn handle_normal(host: &mut Host, code: KeyCode, now: Instant) -> anyhow::Result<Handled> {
    if keybinds::is_quit(&code) {
        return Ok(Handled::Quit);
    } else if keybinds::is_down(&code) {
        host.list.select_next(now);
    } else if keybinds::is_up(&code) {
        host.list.select_prev(now);
    } else if keybinds::is_page_down(&code) {
        host.list.page_down(now);
    } else if keybinds::is_page_up(&code) {
        host.list.page_up(now);
    } else if keybinds::is_first(&code) {
        host.list.select_first(now);
    } else if keybinds::is_last(&code) {
        host.list.select_last(now);
    } else if keybinds::is_toggle_selection(&code) {
        host.list.toggle_active();
    } else if keybinds::is_filter(&code) {
        let buffer = host.filter_label().unwrap_or_default();
        host.mode = Mode::Filter { buffer };
    } else if keybinds::is_reset(&code) {
        host.status = None;
        match host.list.reset() {
            Ok(request) => return Ok(Handled::Continue(request)),
            Err(e) => host.report(e),
        }
    } else if keybinds::is_sort(&code) {
        let descending = !host.list.query().descending();
        match host.list.set_descending(descending) {
            Ok(request) => return Ok(Handled::Continue(request)),
            Err(e) => host.report(e),
        }
    } else if keybinds::is_theme(&code) {
        host.theme = colors::next_theme_name(&host.theme).to_string();
        colors::set_theme(&host.theme);
    }
    Ok(Handled::Continue(None))
}
