use ratatui::style::{Modifier, Style};
use once_cell::sync::Lazy;
use std::sync::{Mutex, MutexGuard};

use crate::ui::themes::Theme;

const THEME_CYCLE: [&str; 2] = ["dark", "light"];

#[derive(Clone, Debug, PartialEq)]
pub struct Colors {
	pub list_block_style: Style,
	pub active_row_style: Style,
	pub marked_row_style: Style,
	pub placeholder_style: Style,
	pub detail_style: Style,
	pub header_style: Style,
	pub footer_style: Style,
	pub prompt_style: Style,
	pub error_style: Style,
}

impl From<&Theme> for Colors {
	fn from(theme: &Theme) -> Self {
		Colors {
			list_block_style: theme.style_fg(),
			active_row_style: Style::default().fg(theme.bg).bg(theme.accent),
			marked_row_style: Style::default().fg(theme.accent).add_modifier(Modifier::BOLD),
			placeholder_style: Style::default().fg(theme.muted).add_modifier(Modifier::ITALIC),
			detail_style: Style::default().fg(theme.muted),
			header_style: Style::default().fg(theme.bg).bg(theme.fg),
			footer_style: theme.style_fg(),
			prompt_style: Style::default().fg(theme.accent).bg(theme.bg),
			error_style: Style::default().fg(ratatui::style::Color::Red).bg(theme.bg),
		}
	}
}

static CURRENT: Lazy<Mutex<Colors>> = Lazy::new(|| Mutex::new(Colors::from(&Theme::dark())));

fn lock() -> MutexGuard<'static, Colors> {
	// a poisoned palette is still a palette
	CURRENT.lock().unwrap_or_else(|p| p.into_inner())
}

/// Switch to a built-in theme. Unknown names are ignored.
pub fn set_theme(name: &str) {
	if let Some(theme) = Theme::by_name(name) {
		set_from_theme(&theme);
	}
}

/// Derive concrete runtime Styles from the provided Theme and store them.
pub fn set_from_theme(theme: &Theme) {
	*lock() = Colors::from(theme);
}

pub fn current() -> Colors {
	lock().clone()
}

/// The built-in theme after `name`, wrapping around.
pub fn next_theme_name(name: &str) -> &'static str {
	let pos = THEME_CYCLE.iter().position(|t| *t == name).unwrap_or(0);
	THEME_CYCLE[(pos + 1) % THEME_CYCLE.len()]
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn cycle_wraps() {
		assert_eq!(next_theme_name("dark"), "light");
		assert_eq!(next_theme_name("light"), "dark");
		assert_eq!(next_theme_name("custom"), "light");
	}

	#[test]
	fn styles_follow_theme_accent() {
		let t = Theme::light();
		let c = Colors::from(&t);
		assert_eq!(c.active_row_style.bg, Some(t.accent));
		assert_eq!(c.placeholder_style.fg, Some(t.muted));
	}
}
