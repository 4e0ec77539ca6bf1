// Color themes for the UI chrome.

use ratatui::style::Color;

pub const THEME_DARK: &str = "dark";
pub const THEME_LIGHT: &str = "light";

/// Named color slots used by the panels, dialogs, and notice bar.
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    /// Headings, the focused panel, the selected dialog option.
    pub primary: Color,
    /// Poem and general body text.
    pub text: Color,
    /// Hints and inactive text.
    pub text_dim: Color,
    /// Key hints in prompts and help.
    pub accent: Color,
    /// Background of the selected dialog option.
    pub selection_bg: Color,
    pub border: Color,
    /// Destructive notices and inline errors.
    pub error: Color,
    /// Loading indicators.
    pub warning: Color,
    /// Confirmation notices.
    pub success: Color,
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            primary: Color::Cyan,
            text: Color::White,
            text_dim: Color::DarkGray,
            accent: Color::Yellow,
            selection_bg: Color::Rgb(30, 30, 40),
            border: Color::DarkGray,
            error: Color::Red,
            warning: Color::Yellow,
            success: Color::Green,
        }
    }

    pub fn light() -> Self {
        Self {
            primary: Color::Blue,
            text: Color::Black,
            text_dim: Color::DarkGray,
            accent: Color::Rgb(180, 120, 0),
            selection_bg: Color::Rgb(220, 225, 235),
            border: Color::Rgb(180, 180, 180),
            error: Color::Red,
            warning: Color::Rgb(180, 120, 0),
            success: Color::Rgb(0, 140, 60),
        }
    }

    pub fn from_name(name: &str) -> Self {
        match name {
            THEME_LIGHT => Self::light(),
            _ => Self::dark(),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}
