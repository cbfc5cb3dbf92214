//! Color themes for the customer table, built on ratatui styles.

use crate::config::ThemeKind;
use crate::render::ui::format::{hex_rgb, ScoreBand};
use ratatui::style::{Color, Modifier, Style};

#[derive(Debug, Clone)]
pub struct ColorTheme {
    /// Title bar with the counts
    pub title: Style,
    /// Column header row
    pub header: Style,
    /// Active filter labels
    pub filter_pill: Style,
    /// Row under the keyboard cursor
    pub cursor_row: Style,
    /// Selected rows (cursor style wins where both apply)
    pub selected_row: Style,
    pub status_bg: Color,
    pub status_fg: Color,
    pub error_text: Color,
    /// Render avatar tokens as truecolor backgrounds
    pub avatar_colors: bool,
    /// Low, fair, good, high
    pub score_bands: [Color; 4],
}

impl Default for ColorTheme {
    fn default() -> Self {
        Self {
            title: Style::default().add_modifier(Modifier::BOLD),
            header: Style::default()
                .fg(Color::Gray)
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
            filter_pill: Style::default().fg(Color::Black).bg(Color::Cyan),
            cursor_row: Style::default().bg(Color::Blue).fg(Color::White),
            selected_row: Style::default().bg(Color::Rgb(30, 41, 59)),
            status_bg: Color::Blue,
            status_fg: Color::White,
            error_text: Color::Red,
            avatar_colors: true,
            score_bands: [Color::Red, Color::Yellow, Color::Green, Color::LightGreen],
        }
    }
}

impl ColorTheme {
    pub fn for_kind(kind: ThemeKind) -> Self {
        match kind {
            ThemeKind::Default => Self::default(),
            ThemeKind::Monochrome => Self::monochrome(),
            ThemeKind::HighContrast => Self::high_contrast(),
        }
    }

    /// For terminals without color support.
    pub fn monochrome() -> Self {
        Self {
            title: Style::default().add_modifier(Modifier::BOLD),
            header: Style::default().add_modifier(Modifier::REVERSED),
            filter_pill: Style::default().add_modifier(Modifier::UNDERLINED),
            cursor_row: Style::default().add_modifier(Modifier::REVERSED),
            selected_row: Style::default().add_modifier(Modifier::BOLD),
            status_bg: Color::Black,
            status_fg: Color::White,
            error_text: Color::White,
            avatar_colors: false,
            score_bands: [Color::Reset; 4],
        }
    }

    pub fn high_contrast() -> Self {
        Self {
            title: Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            header: Style::default().fg(Color::Black).bg(Color::White),
            filter_pill: Style::default().fg(Color::Black).bg(Color::LightYellow),
            cursor_row: Style::default().fg(Color::Black).bg(Color::LightYellow),
            selected_row: Style::default().fg(Color::White).bg(Color::LightBlue),
            status_bg: Color::White,
            status_fg: Color::Black,
            error_text: Color::LightRed,
            avatar_colors: false,
            score_bands: [
                Color::LightRed,
                Color::LightYellow,
                Color::LightGreen,
                Color::LightCyan,
            ],
        }
    }

    /// Style for a row's avatar initials.
    pub fn avatar_style(&self, token: &str) -> Style {
        match hex_rgb(token) {
            Some((r, g, b)) if self.avatar_colors => Style::default()
                .fg(Color::White)
                .bg(Color::Rgb(r, g, b))
                .add_modifier(Modifier::BOLD),
            _ => Style::default().add_modifier(Modifier::BOLD),
        }
    }

    pub fn score_color(&self, score: u8) -> Color {
        let index = match ScoreBand::of(score) {
            ScoreBand::Low => 0,
            ScoreBand::Fair => 1,
            ScoreBand::Good => 2,
            ScoreBand::High => 3,
        };
        self.score_bands[index]
    }

    pub fn status_style(&self) -> Style {
        Style::default().bg(self.status_bg).fg(self.status_fg)
    }

    /// Base style of a row given cursor and selection state.
    pub fn row_style(&self, is_cursor: bool, selected: bool) -> Style {
        match (is_cursor, selected) {
            (true, _) => self.cursor_row,
            (false, true) => self.selected_row,
            (false, false) => Style::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_theme() {
        let theme = ColorTheme::default();
        assert_eq!(theme.status_fg, Color::White);
        assert_eq!(theme.status_bg, Color::Blue);
        assert_eq!(theme.cursor_row.bg, Some(Color::Blue));
    }

    #[test]
    fn test_theme_for_kind() {
        assert!(!ColorTheme::for_kind(ThemeKind::Monochrome).avatar_colors);
        assert_eq!(
            ColorTheme::for_kind(ThemeKind::HighContrast).status_bg,
            Color::White
        );
        assert!(ColorTheme::for_kind(ThemeKind::Default).avatar_colors);
    }

    #[test]
    fn test_avatar_style() {
        let theme = ColorTheme::default();
        assert_eq!(
            theme.avatar_style("#06b6d4").bg,
            Some(Color::Rgb(0x06, 0xb6, 0xd4))
        );
        assert_eq!(theme.avatar_style("not-a-color").bg, None);
        assert_eq!(ColorTheme::monochrome().avatar_style("#06b6d4").bg, None);
    }

    #[test]
    fn test_score_color_follows_band() {
        let theme = ColorTheme::default();
        assert_eq!(theme.score_color(10), Color::Red);
        assert_eq!(theme.score_color(50), Color::Yellow);
        assert_eq!(theme.score_color(90), Color::LightGreen);
    }

    #[test]
    fn test_row_style_precedence() {
        let theme = ColorTheme::high_contrast();
        assert_eq!(theme.row_style(true, true), theme.cursor_row);
        assert_eq!(theme.row_style(false, true), theme.selected_row);
        assert_eq!(theme.row_style(false, false), Style::default());
    }
}
