//! Colors per theme.

use ratatui::style::{Color, Modifier, Style};

use crate::settings::Theme;

/// Styles used by the screens.
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    /// Base text on the background.
    pub base: Style,
    /// Titles and highlights.
    pub accent: Style,
    /// Secondary text.
    pub muted: Style,
    /// Correct letters, wins.
    pub good: Style,
    /// Misses, losses, errors.
    pub bad: Style,
}

impl Palette {
    /// Palette for a theme.
    pub fn for_theme(theme: Theme) -> Self {
        let (fg, bg, muted) = match theme {
            Theme::Dark => (Color::White, Color::Black, Color::DarkGray),
            Theme::Light => (Color::Black, Color::White, Color::Gray),
        };
        let base = Style::default().fg(fg).bg(bg);
        Self {
            base,
            accent: base.fg(Color::Cyan).add_modifier(Modifier::BOLD),
            muted: base.fg(muted),
            good: base.fg(Color::Green).add_modifier(Modifier::BOLD),
            bad: base.fg(Color::Red).add_modifier(Modifier::BOLD),
        }
    }
}
