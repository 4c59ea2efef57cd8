//! Console colours for dark and light terminals.
//!
//! The launcher only needs a handful of colours: the highlighted menu option,
//! the attention colour for errors, a muted colour for hints and a success
//! colour for clean chapter exits.

use crate::config::ThemeMode;
use crossterm::style::Color;

/// Semantic colours used by the launcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    /// Currently selected menu option
    pub highlight: Color,
    /// Errors and failed chapter runs
    pub error: Color,
    /// Hint lines
    pub muted: Color,
    /// Chapter exited cleanly
    pub success: Color,
}

impl Theme {
    /// Detects the OS theme and returns the matching palette.
    #[must_use]
    pub fn detect() -> Self {
        match dark_light::detect() {
            Ok(dark_light::Mode::Light) => Self::light(),
            // Fall back to dark for dark mode, unspecified, or errors
            Ok(dark_light::Mode::Dark | dark_light::Mode::Unspecified) | Err(_) => Self::dark(),
        }
    }

    /// Resolves the theme for a configured mode.
    #[must_use]
    pub fn from_mode(mode: ThemeMode) -> Self {
        match mode {
            ThemeMode::Auto => Self::detect(),
            ThemeMode::Dark => Self::dark(),
            ThemeMode::Light => Self::light(),
        }
    }

    /// Palette for dark terminal backgrounds.
    #[must_use]
    pub const fn dark() -> Self {
        Self {
            highlight: Color::Green,
            error: Color::Red,
            muted: Color::DarkGrey,
            success: Color::Green,
        }
    }

    /// Palette for light terminal backgrounds.
    #[must_use]
    pub const fn light() -> Self {
        Self {
            highlight: Color::DarkGreen,
            error: Color::DarkRed,
            muted: Color::Grey,
            success: Color::DarkGreen,
        }
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
    fn test_explicit_modes() {
        assert_eq!(Theme::from_mode(ThemeMode::Dark), Theme::dark());
        assert_eq!(Theme::from_mode(ThemeMode::Light), Theme::light());
    }

    #[test]
    fn test_highlight_differs_from_error() {
        for theme in [Theme::dark(), Theme::light()] {
            assert_ne!(theme.highlight, theme.error);
        }
    }
}
