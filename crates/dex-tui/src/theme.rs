//! Theme and styling for the TUI.
//!
//! [`Theme`] holds every color used by the components. Type badges use the
//! conventional per-type palette in both schemes; everything else switches
//! between [`Theme::dark`] and [`Theme::light`].
//!
//! # Example
//!
//! ```
//! use dex_core::PokemonType;
//! use dex_tui::Theme;
//!
//! let theme = Theme::dark();
//! let style = theme.type_style(PokemonType::Fire);
//! ```

use dex_core::{ColorScheme, PokemonType};
use ratatui::style::{Color, Modifier, Style};

/// Theme configuration for the TUI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    // =========================================================================
    // Entry Markers
    // =========================================================================
    /// Favorite star.
    pub favorite_fg: Color,

    /// Legendary marker.
    pub legendary_fg: Color,

    // =========================================================================
    // Stat Bars
    // =========================================================================
    /// Base stats below 60.
    pub stat_low_fg: Color,

    /// Base stats from 60 to 99.
    pub stat_mid_fg: Color,

    /// Base stats of 100 and above.
    pub stat_high_fg: Color,

    // =========================================================================
    // Base Colors
    // =========================================================================
    /// Primary foreground color.
    pub fg: Color,

    /// Dimmed/secondary text color.
    pub dimmed_fg: Color,

    /// Accent color for highlights.
    pub accent: Color,

    /// Error color.
    pub error_fg: Color,

    /// Background of overlays.
    pub overlay_bg: Color,

    // =========================================================================
    // Component Styles
    // =========================================================================
    /// Style for normal borders.
    pub border_style: Style,

    /// Style for focused borders.
    pub focused_border_style: Style,

    /// Style for the selected row.
    pub highlight_style: Style,

    /// Style for panel titles.
    pub header_style: Style,

    /// Style for the status bar.
    pub status_bar_style: Style,
}

impl Theme {
    /// Light text on a dark background. The default.
    #[must_use]
    pub fn dark() -> Self {
        Self {
            favorite_fg: Color::Rgb(255, 204, 0),
            legendary_fg: Color::Rgb(200, 140, 255),

            stat_low_fg: Color::Rgb(255, 110, 90),
            stat_mid_fg: Color::Rgb(255, 210, 90),
            stat_high_fg: Color::Rgb(110, 230, 120),

            fg: Color::Rgb(220, 220, 220),
            dimmed_fg: Color::Rgb(128, 128, 128),
            accent: Color::Rgb(240, 80, 80), // Pokédex red
            error_fg: Color::Rgb(255, 80, 80),
            overlay_bg: Color::Rgb(25, 25, 35),

            border_style: Style::default().fg(Color::Rgb(80, 80, 100)),
            focused_border_style: Style::default().fg(Color::Rgb(240, 80, 80)),
            highlight_style: Style::default()
                .fg(Color::White)
                .bg(Color::Rgb(60, 60, 80))
                .add_modifier(Modifier::BOLD),
            header_style: Style::default()
                .fg(Color::Rgb(240, 80, 80))
                .add_modifier(Modifier::BOLD),
            status_bar_style: Style::default()
                .fg(Color::Rgb(180, 180, 180))
                .bg(Color::Rgb(40, 40, 50)),
        }
    }

    /// Dark text on a light background.
    #[must_use]
    pub fn light() -> Self {
        Self {
            favorite_fg: Color::Rgb(190, 140, 0),
            legendary_fg: Color::Rgb(120, 60, 180),

            stat_low_fg: Color::Rgb(190, 60, 40),
            stat_mid_fg: Color::Rgb(170, 120, 0),
            stat_high_fg: Color::Rgb(40, 140, 60),

            fg: Color::Rgb(30, 30, 30),
            dimmed_fg: Color::Rgb(100, 100, 100),
            accent: Color::Rgb(190, 30, 30),
            error_fg: Color::Rgb(180, 50, 50),
            overlay_bg: Color::Rgb(235, 235, 240),

            border_style: Style::default().fg(Color::Rgb(150, 150, 170)),
            focused_border_style: Style::default().fg(Color::Rgb(190, 30, 30)),
            highlight_style: Style::default()
                .fg(Color::Black)
                .bg(Color::Rgb(200, 200, 220))
                .add_modifier(Modifier::BOLD),
            header_style: Style::default()
                .fg(Color::Rgb(190, 30, 30))
                .add_modifier(Modifier::BOLD),
            status_bar_style: Style::default()
                .fg(Color::Rgb(60, 60, 60))
                .bg(Color::Rgb(220, 220, 230)),
        }
    }

    /// Picks a theme for `scheme`. [`ColorScheme::Auto`] means dark.
    #[must_use]
    pub fn from_scheme(scheme: ColorScheme) -> Self {
        match scheme {
            ColorScheme::Light => Self::light(),
            ColorScheme::Dark | ColorScheme::Auto | _ => Self::dark(),
        }
    }

    /// Badge color for a type.
    #[must_use]
    pub const fn type_color(ty: PokemonType) -> Color {
        match ty {
            PokemonType::Normal => Color::Rgb(168, 167, 122),
            PokemonType::Fire => Color::Rgb(238, 129, 48),
            PokemonType::Water => Color::Rgb(99, 144, 240),
            PokemonType::Electric => Color::Rgb(247, 208, 44),
            PokemonType::Grass => Color::Rgb(122, 199, 76),
            PokemonType::Ice => Color::Rgb(150, 217, 214),
            PokemonType::Fighting => Color::Rgb(194, 46, 40),
            PokemonType::Poison => Color::Rgb(163, 62, 161),
            PokemonType::Ground => Color::Rgb(226, 191, 101),
            PokemonType::Flying => Color::Rgb(169, 143, 243),
            PokemonType::Psychic => Color::Rgb(249, 85, 135),
            PokemonType::Bug => Color::Rgb(166, 185, 26),
            PokemonType::Rock => Color::Rgb(182, 161, 54),
            PokemonType::Ghost => Color::Rgb(115, 87, 151),
            PokemonType::Dragon => Color::Rgb(111, 53, 252),
            PokemonType::Dark => Color::Rgb(112, 87, 70),
            PokemonType::Steel => Color::Rgb(183, 183, 206),
            PokemonType::Fairy => Color::Rgb(214, 133, 173),
        }
    }

    /// Bold text in the type's color.
    #[must_use]
    pub fn type_style(&self, ty: PokemonType) -> Style {
        Style::default()
            .fg(Self::type_color(ty))
            .add_modifier(Modifier::BOLD)
    }

    /// Bar color for a base stat value.
    #[must_use]
    pub const fn stat_color(&self, value: u8) -> Color {
        match value {
            0..60 => self.stat_low_fg,
            60..100 => self.stat_mid_fg,
            _ => self.stat_high_fg,
        }
    }

    /// Returns a style with the base foreground color.
    #[must_use]
    pub fn base_style(&self) -> Style {
        Style::default().fg(self.fg)
    }

    /// Returns a style for dimmed/secondary text.
    #[must_use]
    pub fn dimmed_style(&self) -> Style {
        Style::default().fg(self.dimmed_fg)
    }

    /// Returns a style for accent text.
    #[must_use]
    pub fn accent_style(&self) -> Style {
        Style::default().fg(self.accent)
    }

    /// Returns a style for error text.
    #[must_use]
    pub fn error_style(&self) -> Style {
        Style::default().fg(self.error_fg)
    }

    /// Returns a style for the favorite star.
    #[must_use]
    pub fn favorite_style(&self) -> Style {
        Style::default().fg(self.favorite_fg)
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_from_scheme() {
        assert_eq!(Theme::from_scheme(ColorScheme::Dark), Theme::dark());
        assert_eq!(Theme::from_scheme(ColorScheme::Light), Theme::light());
        assert_eq!(Theme::from_scheme(ColorScheme::Auto), Theme::dark());
    }

    #[test]
    fn test_type_colors_are_distinct() {
        let mut colors: Vec<_> = PokemonType::ALL.iter().map(|ty| Theme::type_color(*ty)).collect();
        let before = colors.len();
        colors.sort_by_key(|c| format!("{c:?}"));
        colors.dedup();
        assert_eq!(colors.len(), before);
    }

    #[test]
    fn test_stat_color_bands() {
        let theme = Theme::dark();
        assert_eq!(theme.stat_color(0), theme.stat_low_fg);
        assert_eq!(theme.stat_color(59), theme.stat_low_fg);
        assert_eq!(theme.stat_color(60), theme.stat_mid_fg);
        assert_eq!(theme.stat_color(99), theme.stat_mid_fg);
        assert_eq!(theme.stat_color(100), theme.stat_high_fg);
        assert_eq!(theme.stat_color(255), theme.stat_high_fg);
    }

    #[test]
    fn test_theme_default() {
        assert_eq!(Theme::default(), Theme::dark());
    }
}
