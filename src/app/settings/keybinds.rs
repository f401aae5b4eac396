// Centralised keybind predicates for the list host.
//
// Handlers ask `is_down(&code)` rather than matching raw `KeyCode`s, so the
// table below is the only place that knows which keys do what.

use std::collections::HashMap;

use once_cell::sync::Lazy;

use crate::input::KeyCode;

static BINDINGS: Lazy<HashMap<&'static str, Vec<KeyCode>>> = Lazy::new(|| {
	HashMap::from([
		("quit", vec![KeyCode::Char('q')]),
		("down", vec![KeyCode::Down, KeyCode::Char('j')]),
		("up", vec![KeyCode::Up, KeyCode::Char('k')]),
		("page_down", vec![KeyCode::PageDown]),
		("page_up", vec![KeyCode::PageUp]),
		("first", vec![KeyCode::Home, KeyCode::Char('g')]),
		("last", vec![KeyCode::End, KeyCode::Char('G')]),
		("toggle_selection", vec![KeyCode::Char(' ')]),
		("filter", vec![KeyCode::Char('/')]),
		("reset", vec![KeyCode::Char('r')]),
		("sort", vec![KeyCode::Char('s')]),
		("theme", vec![KeyCode::Char('t')]),
		("enter", vec![KeyCode::Enter]),
		("backspace", vec![KeyCode::Backspace]),
		("esc", vec![KeyCode::Esc]),
	])
});

fn is_bound(action: &str, code: &KeyCode) -> bool {
	BINDINGS
		.get(action)
		.is_some_and(|codes| codes.contains(code))
}

pub fn is_quit(code: &KeyCode) -> bool {
	is_bound("quit", code)
}

pub fn is_down(code: &KeyCode) -> bool {
	is_bound("down", code)
}

pub fn is_up(code: &KeyCode) -> bool {
	is_bound("up", code)
}

pub fn is_page_down(code: &KeyCode) -> bool {
	is_bound("page_down", code)
}

pub fn is_page_up(code: &KeyCode) -> bool {
	is_bound("page_up", code)
}

pub fn is_first(code: &KeyCode) -> bool {
	is_bound("first", code)
}

pub fn is_last(code: &KeyCode) -> bool {
	is_bound("last", code)
}

pub fn is_toggle_selection(code: &KeyCode) -> bool {
	is_bound("toggle_selection", code)
}

pub fn is_filter(code: &KeyCode) -> bool {
	is_bound("filter", code)
}

pub fn is_reset(code: &KeyCode) -> bool {
	is_bound("reset", code)
}

pub fn is_sort(code: &KeyCode) -> bool {
	is_bound("sort", code)
}

pub fn is_theme(code: &KeyCode) -> bool {
	is_bound("theme", code)
}

pub fn is_enter(code: &KeyCode) -> bool {
	is_bound("enter", code)
}

pub fn is_backspace(code: &KeyCode) -> bool {
	is_bound("backspace", code)
}

pub fn is_esc(code: &KeyCode) -> bool {
	is_bound("esc", code)
}

pub fn is_char(code: &KeyCode, want: char) -> bool {
	matches!(code, &KeyCode::Char(c) if c == want)
}
