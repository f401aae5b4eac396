use ratatui::{layout::Rect, widgets::Paragraph, Frame};

use crate::runner::host::{Host, Mode};
use crate::ui::colors::current as current_colors;

const HELP: &str =
    "↑/↓:move  PgUp/PgDn:page  Home/End:jump  space:mark  /:filter  s:sort  r:reset  t:theme  q:quit";

pub fn render(f: &mut Frame, area: Rect, host: &Host) {
    let colors = current_colors();
    let p = match (&host.mode, &host.status) {
        (Mode::Filter { buffer }, _) => {
            Paragraph::new(format!("filter (re: for regex): {buffer}_")).style(colors.prompt_style)
        }
        (Mode::Normal, Some(status)) => Paragraph::new(status.as_str()).style(colors.error_style),
        (Mode::Normal, None) => Paragraph::new(HELP).style(colors.footer_style),
    };
    f.render_widget(p, area);
}
