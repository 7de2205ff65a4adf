//! Semantic style builders for the simulator chrome.

use omnichat_app::notice::NoticeLevel;
use omnichat_core::{FontFamily, ThemeConfig};
use ratatui::style::{Modifier, Style};
use ratatui::text::Span;
use ratatui::widgets::{Block, BorderType, Borders};

use super::palette;

// --- Text styles ---
pub fn text_primary() -> Style {
    Style::default().fg(palette::TEXT_PRIMARY)
}

pub fn text_secondary() -> Style {
    Style::default().fg(palette::TEXT_SECONDARY)
}

pub fn text_muted() -> Style {
    Style::default().fg(palette::TEXT_MUTED)
}

pub fn text_bright() -> Style {
    Style::default()
        .fg(palette::TEXT_BRIGHT)
        .add_modifier(Modifier::BOLD)
}

// --- Border styles ---
pub fn border_inactive() -> Style {
    Style::default().fg(palette::BORDER_DIM)
}

pub fn border_active() -> Style {
    Style::default().fg(palette::BORDER_ACTIVE)
}

// --- Accent styles ---
pub fn accent() -> Style {
    Style::default().fg(palette::ACCENT)
}

pub fn accent_bold() -> Style {
    Style::default()
        .fg(palette::ACCENT)
        .add_modifier(Modifier::BOLD)
}

pub fn error_text() -> Style {
    Style::default().fg(palette::STATUS_RED)
}

pub fn success_text() -> Style {
    Style::default().fg(palette::STATUS_GREEN)
}

// --- Keybinding hint style ---
pub fn keybinding() -> Style {
    Style::default().fg(palette::STATUS_YELLOW)
}

/// `key` in the keybinding style followed by a muted description
pub fn key_hint<'a>(key: &'a str, description: &'a str) -> [Span<'a>; 2] {
    [
        Span::styled(key, keybinding()),
        Span::styled(description, text_muted()),
    ]
}

// --- Selection styles ---

/// "Black on accent" - used for focused+selected rows across widgets
pub fn focused_selected() -> Style {
    Style::default()
        .fg(palette::CONTRAST_FG)
        .bg(palette::ACCENT)
        .add_modifier(Modifier::BOLD)
}

pub fn disabled() -> Style {
    Style::default()
        .fg(palette::TEXT_MUTED)
        .add_modifier(Modifier::DIM)
}

// --- Block builders ---
pub fn glass_block(focused: bool) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(if focused {
            border_active()
        } else {
            border_inactive()
        })
}

pub fn modal_block(title: &str) -> Block<'_> {
    Block::default()
        .title(format!(" {} ", title))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(border_active())
        .style(Style::default().bg(palette::POPUP_BG))
}

// --- Chat styles derived from the active theme ---

/// Body text for the simulated chat.
///
/// A terminal has one font, so the serif family is suggested with italics.
pub fn chat_text(config: &ThemeConfig) -> Style {
    let style = Style::default().fg(palette::rgb(config.text_color()));
    match config.font {
        FontFamily::Serif => style.add_modifier(Modifier::ITALIC),
        FontFamily::Sans => style,
    }
}

pub fn chat_background(config: &ThemeConfig) -> Style {
    Style::default().bg(palette::rgb(config.background))
}

pub fn sidebar(config: &ThemeConfig) -> Style {
    Style::default()
        .bg(palette::rgb(config.sidebar))
        .fg(palette::rgb(config.sidebar_text_color()))
}

pub fn user_bubble(config: &ThemeConfig) -> Style {
    chat_text(config).bg(palette::rgb(config.user_bubble))
}

pub fn model_reply(config: &ThemeConfig) -> Style {
    match config.ai_bubble {
        Some(bg) => chat_text(config).bg(palette::rgb(bg)),
        None => chat_text(config).bg(palette::rgb(config.background)),
    }
}

pub fn theme_primary(config: &ThemeConfig) -> Style {
    Style::default()
        .fg(palette::rgb(config.primary))
        .add_modifier(Modifier::BOLD)
}

// --- Notices ---

/// `(prefix, style)` for a status notice
pub fn notice(level: NoticeLevel) -> (&'static str, Style) {
    match level {
        NoticeLevel::Info => ("ℹ", Style::default().fg(palette::STATUS_BLUE)),
        NoticeLevel::Success => ("✓", Style::default().fg(palette::STATUS_GREEN)),
        NoticeLevel::Error => (
            "✗",
            Style::default()
                .fg(palette::STATUS_RED)
                .add_modifier(Modifier::BOLD),
        ),
    }
}
