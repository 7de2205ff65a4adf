//! Theme registry: static display presets for the simulated chat assistants.
//!
//! Each preset maps an [`AppTheme`] to a [`ThemeConfig`] holding the colors,
//! font family, icon and greeting used by the chat view. The table is built at
//! compile time and never mutated.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Greeting used when a theme has no configured greeting
pub const FALLBACK_GREETING: &str = "Ready.";

/// The active visual preset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize, Serialize)]
pub enum AppTheme {
    #[default]
    Gemini,
    ChatGPT,
    Claude,
    /// AI-generated layout; chat rendering falls back to Gemini
    Custom,
}

impl AppTheme {
    /// Preset themes in display order (excludes `Custom`)
    pub const fn presets() -> [AppTheme; 3] {
        [AppTheme::Gemini, AppTheme::ChatGPT, AppTheme::Claude]
    }

    pub fn is_preset(self) -> bool {
        !matches!(self, AppTheme::Custom)
    }

    pub fn name(self) -> &'static str {
        match self {
            AppTheme::Gemini => "Gemini",
            AppTheme::ChatGPT => "ChatGPT",
            AppTheme::Claude => "Claude",
            AppTheme::Custom => "Custom",
        }
    }

    /// Greeting that seeds a fresh conversation for this theme
    pub fn greeting(self) -> &'static str {
        match self {
            AppTheme::Custom => FALLBACK_GREETING,
            preset => theme_config(preset).greeting,
        }
    }
}

impl fmt::Display for AppTheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for AppTheme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "gemini" => Ok(AppTheme::Gemini),
            "chatgpt" => Ok(AppTheme::ChatGPT),
            "claude" => Ok(AppTheme::Claude),
            "custom" => Ok(AppTheme::Custom),
            other => Err(format!("unknown theme '{other}'")),
        }
    }
}

/// An sRGB color token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// Parse `#rrggbb`
    pub fn from_hex(hex: &str) -> Option<Rgb> {
        let hex = hex.strip_prefix('#')?;
        if hex.len() != 6 {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        Some(Rgb(channel(0)?, channel(2)?, channel(4)?))
    }

    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }

    /// Perceived brightness below the midpoint (Rec. 601 weights)
    pub fn is_dark(self) -> bool {
        let luma = 299 * u32::from(self.0) + 587 * u32::from(self.1) + 114 * u32::from(self.2);
        luma < 128_000
    }
}

/// Near-black body text
const INK: Rgb = Rgb(0x1f, 0x29, 0x37);
/// Near-white text on dark surfaces
const PAPER: Rgb = Rgb(0xec, 0xec, 0xf1);

fn readable_on(background: Rgb) -> Rgb {
    if background.is_dark() {
        PAPER
    } else {
        INK
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontFamily {
    Sans,
    Serif,
}

/// Named icon shown next to model replies
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeIcon {
    Sparkles,
    Zap,
    MessageSquare,
}

/// Sidebar treatment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SidebarStyle {
    /// Dark sidebar with bordered "New chat" button
    Dark,
    /// Light sidebar with a menu button and pill-shaped entries
    Light,
}

/// Display configuration for a preset theme
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeConfig {
    pub name: &'static str,
    pub primary: Rgb,
    pub background: Rgb,
    pub sidebar: Rgb,
    pub user_bubble: Rgb,
    /// `None` renders model replies without a bubble
    pub ai_bubble: Option<Rgb>,
    pub font: FontFamily,
    pub icon: ThemeIcon,
    pub greeting: &'static str,
    pub input_placeholder: &'static str,
    pub sidebar_style: SidebarStyle,
}

impl ThemeConfig {
    /// Text color that reads on the chat background
    pub fn text_color(&self) -> Rgb {
        readable_on(self.background)
    }

    /// Text color that reads on the sidebar
    pub fn sidebar_text_color(&self) -> Rgb {
        readable_on(self.sidebar)
    }
}

static GEMINI: ThemeConfig = ThemeConfig {
    name: "Gemini",
    primary: Rgb(0x25, 0x63, 0xeb),
    background: Rgb(0xff, 0xff, 0xff),
    sidebar: Rgb(0xf0, 0xf4, 0xf9),
    user_bubble: Rgb(0xf0, 0xf4, 0xf9),
    ai_bubble: None,
    font: FontFamily::Sans,
    icon: ThemeIcon::Sparkles,
    greeting: "Hello, I'm Gemini. How can I help you today?",
    input_placeholder: "Enter a prompt here",
    sidebar_style: SidebarStyle::Light,
};

static CHATGPT: ThemeConfig = ThemeConfig {
    name: "ChatGPT",
    primary: Rgb(0x10, 0xb9, 0x81),
    background: Rgb(0xff, 0xff, 0xff),
    sidebar: Rgb(0x20, 0x21, 0x23),
    user_bubble: Rgb(0xf3, 0xf4, 0xf6),
    ai_bubble: None,
    font: FontFamily::Sans,
    icon: ThemeIcon::Zap,
    greeting: "How can I help you today?",
    input_placeholder: "Send a message...",
    sidebar_style: SidebarStyle::Dark,
};

static CLAUDE: ThemeConfig = ThemeConfig {
    name: "Claude",
    primary: Rgb(0xd9, 0x77, 0x57),
    background: Rgb(0xfc, 0xf7, 0xf1),
    sidebar: Rgb(0xf5, 0xea, 0xdd),
    user_bubble: Rgb(0xf0, 0xe4, 0xd4),
    ai_bubble: None,
    font: FontFamily::Serif,
    icon: ThemeIcon::MessageSquare,
    greeting: "Good morning. How can I help you with your tasks today?",
    input_placeholder: "Enter a prompt here",
    sidebar_style: SidebarStyle::Light,
};

/// Look up the display configuration for a theme.
///
/// `Custom` has no chat styling of its own and resolves to Gemini's.
pub fn theme_config(theme: AppTheme) -> &'static ThemeConfig {
    match theme {
        AppTheme::Gemini | AppTheme::Custom => &GEMINI,
        AppTheme::ChatGPT => &CHATGPT,
        AppTheme::Claude => &CLAUDE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dark_sidebar_gets_light_text() {
        let chatgpt = theme_config(AppTheme::ChatGPT);
        assert!(chatgpt.sidebar.is_dark());
        assert_eq!(chatgpt.sidebar_text_color(), PAPER);
        assert_eq!(chatgpt.text_color(), INK);
    }

    #[test]
    fn test_is_dark_extremes() {
        assert!(Rgb(0, 0, 0).is_dark());
        assert!(!Rgb(0xff, 0xff, 0xff).is_dark());
    }

    #[test]
    fn test_presets_exclude_custom() {
        let presets = AppTheme::presets();
        assert_eq!(presets.len(), 3);
        assert!(!presets.contains(&AppTheme::Custom));
        assert!(presets.iter().all(|t| t.is_preset()));
    }

    #[test]
    fn test_greetings_match_presets() {
        assert_eq!(
            AppTheme::Gemini.greeting(),
            "Hello, I'm Gemini. How can I help you today?"
        );
        assert_eq!(AppTheme::ChatGPT.greeting(), "How can I help you today?");
        assert!(AppTheme::Claude.greeting().starts_with("Good morning."));
        assert_eq!(AppTheme::Custom.greeting(), FALLBACK_GREETING);
    }

    #[test]
    fn test_custom_resolves_to_gemini_config() {
        assert_eq!(theme_config(AppTheme::Custom), theme_config(AppTheme::Gemini));
    }

    #[test]
    fn test_claude_uses_serif() {
        assert_eq!(theme_config(AppTheme::Claude).font, FontFamily::Serif);
        assert_eq!(theme_config(AppTheme::ChatGPT).sidebar_style, SidebarStyle::Dark);
    }

    #[test]
    fn test_theme_from_str_is_case_insensitive() {
        assert_eq!("chatgpt".parse::<AppTheme>(), Ok(AppTheme::ChatGPT));
        assert_eq!(" Claude ".parse::<AppTheme>(), Ok(AppTheme::Claude));
        assert!("bard".parse::<AppTheme>().is_err());
    }

    #[test]
    fn test_rgb_hex() {
        assert_eq!(Rgb::from_hex("#d97757"), Some(Rgb(0xd9, 0x77, 0x57)));
        assert_eq!(Rgb(0xd9, 0x77, 0x57).to_hex(), "#d97757");
        assert_eq!(Rgb::from_hex("d97757"), None);
        assert_eq!(Rgb::from_hex("#zzzzzz"), None);
    }
}
