use std::cell::Cell;
use std::rc::Rc;

use crate::app::settings::Settings;
use crate::app::VirtualList;
use crate::data::Filter;
use crate::runner::demo_source::DemoSource;

pub type HostList = VirtualList<DemoSource>;

/// What keystrokes currently mean.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    Normal,
    /// Editing the filter prompt. A leading `re:` makes it a regex.
    Filter { buffer: String },
}

/// State of the terminal host around the list widget.
pub struct Host {
    pub list: HostList,
    pub mode: Mode,
    /// One-line message shown in the footer (last error, mostly).
    pub status: Option<String>,
    pub theme: String,
    pub wheel_rows: usize,
    pub mouse_enabled: bool,
    renders: Rc<Cell<usize>>,
}

impl Host {
    pub fn new(mut list: HostList, settings: &Settings) -> Self {
        let renders = Rc::new(Cell::new(0));
        let counter = Rc::clone(&renders);
        list.on_window_changed(move |_| counter.set(counter.get() + 1));
        Host {
            list,
            mode: Mode::Normal,
            status: None,
            theme: settings.ui.theme.clone(),
            wheel_rows: settings.scroll.wheel_rows.max(1),
            mouse_enabled: settings.ui.mouse_enabled,
            renders,
        }
    }

    /// How many windows have been rendered so far.
    pub fn renders(&self) -> usize {
        self.renders.get()
    }

    pub fn report(&mut self, err: impl std::fmt::Display) {
        tracing::warn!("{}", err);
        self.status = Some(err.to_string());
    }

    /// Text of the active filter, as typed.
    pub fn filter_label(&self) -> Option<String> {
        match self.list.query().filter()? {
            Filter::Contains(s) => Some(s.clone()),
            Filter::Regex(p) => Some(format!("re:{p}")),
        }
    }
}

/// Parse the filter prompt. Empty input clears the filter.
pub fn parse_filter(input: &str) -> Option<Filter> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }
    match input.strip_prefix("re:") {
        Some(pattern) => Some(Filter::Regex(pattern.to_string())),
        None => Some(Filter::Contains(input.to_string())),
    }
}
