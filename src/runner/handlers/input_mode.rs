use super::Handled;
use crate::app::settings::keybinds;
use crate::input::{is_printable_key, KeyEvent};
use crate::runner::host::{parse_filter, Host, Mode};

/// Keys while the filter prompt is open. Enter applies, Esc cancels.
pub fn handle_input(host: &mut Host, key: KeyEvent) -> anyhow::Result<Handled> {
    let Mode::Filter { buffer } = &mut host.mode else {
        return Ok(Handled::Continue(None));
    };
    let code = key.code;
    if keybinds::is_enter(&code) {
        let filter = parse_filter(buffer);
        host.mode = Mode::Normal;
        host.status = None;
        match host.list.set_filter(filter) {
            Ok(request) => return Ok(Handled::Continue(request)),
            Err(e) => host.report(e),
        }
    } else if keybinds::is_esc(&code) {
        host.mode = Mode::Normal;
    } else if keybinds::is_backspace(&code) {
        buffer.pop();
    } else if is_printable_key(&key) {
        if let crate::input::KeyCode::Char(c) = code {
            buffer.push(c);
        }
    }
    Ok(Handled::Continue(None))
}
