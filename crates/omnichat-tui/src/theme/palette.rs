//! Color palette for the simulator chrome.
//!
//! The simulated chat itself is painted with the active preset's RGB tokens
//! (see [`rgb`]); everything around it (panels, dialogs, status line) uses
//! the constants below.

use omnichat_core::{AccentColor, Rgb};
use ratatui::style::Color;

// --- Background layers ---
pub const DEEPEST_BG: Color = Color::Rgb(10, 12, 16);
pub const CARD_BG: Color = Color::Rgb(18, 21, 28);
pub const POPUP_BG: Color = Color::Rgb(28, 33, 43);

// --- Borders ---
pub const BORDER_DIM: Color = Color::Rgb(45, 51, 59);
pub const BORDER_ACTIVE: Color = Color::Rgb(88, 166, 255);

// --- Accent ---
pub const ACCENT: Color = Color::Rgb(88, 166, 255);

// --- Text ---
pub const TEXT_PRIMARY: Color = Color::Rgb(201, 209, 217);
pub const TEXT_SECONDARY: Color = Color::Rgb(125, 133, 144);
pub const TEXT_MUTED: Color = Color::Rgb(72, 79, 88);
pub const TEXT_BRIGHT: Color = Color::Rgb(240, 246, 252);
/// Foreground on accent-filled backgrounds
pub const CONTRAST_FG: Color = Color::Black;

// --- Status ---
pub const STATUS_GREEN: Color = Color::Rgb(16, 185, 129);
pub const STATUS_RED: Color = Color::Rgb(244, 63, 94);
pub const STATUS_YELLOW: Color = Color::Rgb(234, 179, 8);
pub const STATUS_BLUE: Color = Color::Rgb(56, 189, 248);

// --- Effects ---
pub const SHADOW: Color = Color::Rgb(5, 6, 8);

// --- Markup source view ---
pub const MARKUP_TAG: Color = Color::Rgb(129, 140, 248);
pub const MARKUP_COMMENT: Color = Color::Rgb(100, 116, 139);

// --- Injected widget accents ---
pub const WIDGET_RED_BG: Color = Color::Rgb(254, 226, 226);
pub const WIDGET_RED_FG: Color = Color::Rgb(153, 27, 27);
pub const WIDGET_ORANGE: Color = Color::Rgb(234, 88, 12);
pub const WIDGET_INDIGO: Color = Color::Rgb(79, 70, 229);
pub const WIDGET_BLUE: Color = Color::Rgb(37, 99, 235);

/// Convert a theme color token to a terminal color
pub fn rgb(color: Rgb) -> Color {
    Color::Rgb(color.0, color.1, color.2)
}

/// Primary color of an injected widget accent
pub fn accent_color(color: AccentColor) -> Color {
    match color {
        AccentColor::Red => STATUS_RED,
        AccentColor::Orange => WIDGET_ORANGE,
        AccentColor::Indigo => WIDGET_INDIGO,
        AccentColor::Blue => WIDGET_BLUE,
    }
}
