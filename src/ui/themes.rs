use ratatui::style::{Color, Style};
use serde::Deserialize;

/// Base palette the runtime [`Colors`](crate::ui::colors::Colors) are
/// derived from.
#[derive(Clone, Debug, PartialEq)]
pub struct Theme {
    pub bg: Color,
    pub fg: Color,
    pub accent: Color,
    /// Placeholder rows and secondary text.
    pub muted: Color,
}

#[derive(Deserialize)]
struct Palette {
    bg: String,
    fg: String,
    accent: String,
    muted: Option<String>,
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            bg: Color::Rgb(11, 12, 13),
            fg: Color::Gray,
            accent: Color::Cyan,
            muted: Color::DarkGray,
        }
    }

    pub fn light() -> Self {
        Self {
            bg: Color::White,
            fg: Color::Black,
            accent: Color::Blue,
            muted: Color::Gray,
        }
    }

    /// Built-in theme by name.
    pub fn by_name(name: &str) -> Option<Self> {
        match name {
            "dark" => Some(Self::dark()),
            "light" => Some(Self::light()),
            _ => None,
        }
    }

    pub fn style_fg(&self) -> Style {
        Style::default().fg(self.fg).bg(self.bg)
    }

    /// Parse a theme file with a `[palette]` table of `#rrggbb` colors.
    /// A file without a palette yields the dark theme.
    pub fn from_toml(s: &str) -> Result<Self, toml::de::Error> {
        #[derive(Deserialize)]
        struct File {
            palette: Option<Palette>,
        }
        let file: File = toml::from_str(s)?;
        let Some(p) = file.palette else {
            return Ok(Self::dark());
        };
        let fg = parse_hex(&p.fg);
        Ok(Self {
            bg: parse_hex(&p.bg),
            fg,
            accent: parse_hex(&p.accent),
            muted: p.muted.as_deref().map(parse_hex).unwrap_or(fg),
        })
    }
}

fn parse_hex(s: &str) -> Color {
    let s = s.trim_start_matches('#');
    if s.len() == 6 {
        if let (Ok(r), Ok(g), Ok(b)) = (
            u8::from_str_radix(&s[0..2], 16),
            u8::from_str_radix(&s[2..4], 16),
            u8::from_str_radix(&s[4..6], 16),
        ) {
            return Color::Rgb(r, g, b);
        }
    }
    Color::Reset
}
