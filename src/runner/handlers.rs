//! Key dispatch for the terminal host, split by mode.

pub mod input_mode;
pub mod normal;

pub use input_mode::handle_input;
pub use normal::handle_normal;

use std::time::Instant;

use crate::app::FetchRequest;
use crate::input::{KeyCode, KeyEvent, KeyModifiers};
use crate::runner::host::{Host, Mode};

/// Result of handling one key.
#[derive(Debug, Clone, PartialEq)]
pub enum Handled {
    /// Keep running; run the fetch if one was issued.
    Continue(Option<FetchRequest>),
    Quit,
}

/// Top-level key handler that dispatches on the current mode.
pub fn handle_key(host: &mut Host, key: KeyEvent, now: Instant) -> anyhow::Result<Handled> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Ok(Handled::Quit);
    }
    match host.mode {
        Mode::Normal => handle_normal(host, key.code, now),
        Mode::Filter { .. } => handle_input(host, key),
    }
}

/// Move the wheel by `notches` (negative is up).
pub fn handle_wheel(host: &mut Host, notches: i64, now: Instant) {
    let rows = notches.saturating_mul(host.wheel_rows as i64);
    host.list.scroll_rows(rows, now);
}

/// Follow a terminal resize: `rows` text rows are available to the list body.
pub fn handle_resize(host: &mut Host, rows: u16, now: Instant) {
    let height = f64::from(rows.max(1)) * host.list.config().item_height;
    if let Err(e) = host.list.set_viewport_height(height, now) {
        host.report(e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::settings::Settings;
    use crate::app::VirtualList;
    use crate::runner::demo_source::{generate_rows, DemoSource};
    use chrono::NaiveDate;

    pub(super) fn host(n: usize) -> Host {
        let newest = NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        let settings = Settings::default();
        let list = VirtualList::new(
            DemoSource::generated(generate_rows(n, newest)),
            settings.window_config().unwrap(),
            settings.scroll.profile,
        )
        .unwrap();
        Host::new(list, &settings)
    }

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn ctrl_c_quits_in_any_mode() {
        let mut h = host(10);
        h.mode = Mode::Filter {
            buffer: String::new(),
        };
        let key = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(handle_key(&mut h, key, Instant::now()).unwrap(), Handled::Quit);
    }

    #[test]
    fn q_types_into_filter_but_quits_in_normal_mode() {
        let mut h = host(10);
        let now = Instant::now();
        assert_eq!(
            handle_key(&mut h, press(KeyCode::Char('/')), now).unwrap(),
            Handled::Continue(None)
        );
        assert!(matches!(h.mode, Mode::Filter { .. }));
        handle_key(&mut h, press(KeyCode::Char('q')), now).unwrap();
        assert_eq!(
            h.mode,
            Mode::Filter {
                buffer: "q".into()
            }
        );
        handle_key(&mut h, press(KeyCode::Esc), now).unwrap();
        assert_eq!(
            handle_key(&mut h, press(KeyCode::Char('q')), now).unwrap(),
            Handled::Quit
        );
    }

    #[test]
    fn wheel_scrolls_by_configured_rows() {
        let mut h = host(100);
        handle_wheel(&mut h, 2, Instant::now());
        assert_eq!(h.list.scroll_top(), 6.0 * 36.0);
        handle_wheel(&mut h, -5, Instant::now());
        assert_eq!(h.list.scroll_top(), 0.0);
    }

    #[test]
    fn resize_sets_viewport_from_rows() {
        let mut h = host(100);
        handle_resize(&mut h, 20, Instant::now());
        assert_eq!(h.list.config().viewport_height, 720.0);
        assert_eq!(h.list.page_size(), 20);
    }
}
