//! Glyphs for theme and widget icons.
//!
//! Plain Unicode symbols that render in any monospace font.

use omnichat_core::{ThemeIcon, WidgetIcon};

/// Icon shown next to model replies
pub fn theme_icon(icon: ThemeIcon) -> &'static str {
    match icon {
        ThemeIcon::Sparkles => "✦",
        ThemeIcon::Zap => "ϟ",
        ThemeIcon::MessageSquare => "❖",
    }
}

pub fn widget_icon(icon: WidgetIcon) -> &'static str {
    match icon {
        WidgetIcon::WifiOff => "⊘",
        WidgetIcon::ServerCrash => "▣",
        WidgetIcon::Sparkles => "✦",
        WidgetIcon::AlertTriangle => "⚠",
        WidgetIcon::Info => "ℹ",
    }
}

pub const CHECK: &str = "✓";
pub const SELECTOR: &str = "▶";
pub const USER: &str = "●";

/// Braille spinner frames
pub const SPINNER: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Spinner glyph for an animation frame counter
pub fn spinner(frame: usize) -> &'static str {
    SPINNER[frame % SPINNER.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spinner_wraps() {
        assert_eq!(spinner(0), spinner(SPINNER.len()));
        assert_ne!(spinner(0), spinner(1));
    }
}
