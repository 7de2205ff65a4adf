//! Simulated chat view in the active preset's colors.
//!
//! The view is stateful over the scroll offset so the renderer can clamp it
//! to the conversation height.

use omnichat_app::chat::ChatState;
use omnichat_core::{theme_config, AppTheme, ChatMessage, SidebarStyle, ThemeConfig};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, StatefulWidget, Widget},
};
use unicode_width::UnicodeWidthStr;

use super::TextField;
use crate::layout;
use crate::theme::{icons, palette, styles};

/// User bubbles take at most this share of the message column
const BUBBLE_WIDTH_PERCENT: u16 = 70;

pub struct ChatView<'a> {
    chat: &'a ChatState,
    theme: AppTheme,
    focused: bool,
    spinner_frame: usize,
}

impl<'a> ChatView<'a> {
    pub fn new(chat: &'a ChatState, theme: AppTheme) -> Self {
        Self {
            chat,
            theme,
            focused: false,
            spinner_frame: 0,
        }
    }

    /// Chat input has keyboard focus
    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    pub fn spinner_frame(mut self, frame: usize) -> Self {
        self.spinner_frame = frame;
        self
    }

    fn message_lines(&self, config: &ThemeConfig, width: u16) -> Vec<Line<'static>> {
        let mut lines = Vec::new();
        for message in &self.chat.messages {
            if message.is_user() {
                user_lines(&mut lines, message, config, width);
            } else {
                model_lines(&mut lines, message, config, width);
            }
            lines.push(Line::default());
        }
        if self.chat.is_pending() {
            lines.push(Line::from(vec![
                Span::styled(
                    format!(" {} ", icons::theme_icon(config.icon)),
                    styles::theme_primary(config),
                ),
                Span::styled(
                    icons::spinner(self.spinner_frame),
                    styles::chat_text(config),
                ),
            ]));
        }
        lines
    }

    fn render_sidebar(&self, config: &ThemeConfig, area: Rect, buf: &mut Buffer) {
        let style = styles::sidebar(config);
        buf.set_style(area, style);

        let mut y = area.y;
        match config.sidebar_style {
            SidebarStyle::Dark => {
                let button = Rect::new(area.x + 1, y, area.width.saturating_sub(2), 3);
                let block = Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(style.add_modifier(Modifier::DIM));
                let inner = block.inner(button);
                block.render(button, buf);
                Paragraph::new("+ New chat").style(style).render(inner, buf);
                y += 4;
            }
            SidebarStyle::Light => {
                Paragraph::new(" ≡").style(style).render(Rect::new(area.x, y, area.width, 1), buf);
                y += 2;
                let pill = Rect::new(area.x + 1, y, area.width.saturating_sub(2).min(14), 1);
                Paragraph::new(" + New chat")
                    .style(style.bg(palette::rgb(config.user_bubble)))
                    .render(pill, buf);
                y += 2;
            }
        }

        if y + 2 > area.bottom() {
            return;
        }
        Paragraph::new(" Recent")
            .style(style.add_modifier(Modifier::BOLD))
            .render(Rect::new(area.x, y, area.width, 1), buf);

        let title = self
            .chat
            .messages
            .iter()
            .find(|m| m.is_user())
            .map(|m| truncate(&m.text, area.width.saturating_sub(3) as usize))
            .unwrap_or_else(|| "New conversation".to_string());
        Paragraph::new(format!("  {}", title))
            .style(style)
            .render(Rect::new(area.x, y + 1, area.width, 1), buf);
    }

    fn render_input(&self, config: &ThemeConfig, area: Rect, buf: &mut Buffer) {
        let border = if self.focused {
            Style::default().fg(palette::rgb(config.primary))
        } else {
            styles::chat_text(config).add_modifier(Modifier::DIM)
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(border)
            .style(styles::chat_background(config));
        let inner = block.inner(area);
        block.render(area, buf);

        TextField::new(&self.chat.input)
            .placeholder(config.input_placeholder)
            .focused(self.focused)
            .style(styles::chat_text(config))
            .render(inner, buf);
    }
}

impl StatefulWidget for ChatView<'_> {
    /// Scroll offset in lines from the top
    type State = u16;

    fn render(self, area: Rect, buf: &mut Buffer, scroll: &mut u16) {
        let config = theme_config(self.theme);
        buf.set_style(area, styles::chat_background(config));

        let areas = layout::split_chat(area);
        if let Some(sidebar) = areas.sidebar {
            self.render_sidebar(config, sidebar, buf);
        }

        let messages_area = Rect {
            x: areas.messages.x + 1,
            width: areas.messages.width.saturating_sub(2),
            ..areas.messages
        };
        let lines = self.message_lines(config, messages_area.width);
        let max_scroll = u16::try_from(lines.len())
            .unwrap_or(u16::MAX)
            .saturating_sub(messages_area.height);
        *scroll = (*scroll).min(max_scroll);

        Paragraph::new(lines)
            .style(styles::chat_background(config))
            .scroll((*scroll, 0))
            .render(messages_area, buf);

        self.render_input(config, areas.input, buf);
    }
}

fn user_lines(lines: &mut Vec<Line<'static>>, message: &ChatMessage, config: &ThemeConfig, width: u16) {
    let bubble_width = (width as usize * BUBBLE_WIDTH_PERCENT as usize / 100).max(8);
    let style = styles::user_bubble(config);
    for row in wrap_words(&message.text, bubble_width.saturating_sub(2)) {
        lines.push(Line::from(Span::styled(format!(" {} ", row), style)).alignment(Alignment::Right));
    }
}

fn model_lines(lines: &mut Vec<Line<'static>>, message: &ChatMessage, config: &ThemeConfig, width: u16) {
    lines.push(Line::from(vec![
        Span::styled(
            format!(" {} ", icons::theme_icon(config.icon)),
            styles::theme_primary(config),
        ),
        Span::styled(config.name, styles::theme_primary(config)),
        Span::styled(
            format!("  {}", message.timestamp.format("%H:%M")),
            styles::chat_text(config).add_modifier(Modifier::DIM),
        ),
    ]));
    let style = styles::model_reply(config);
    for row in wrap_words(&message.text, (width as usize).saturating_sub(3)) {
        lines.push(Line::from(Span::styled(format!("   {}", row), style)));
    }
}

/// Greedy word wrap by display width; words longer than `width` are split
pub fn wrap_words(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut rows = Vec::new();

    for paragraph in text.lines() {
        let mut row = String::new();
        for word in paragraph.split_whitespace() {
            let needed = if row.is_empty() {
                word.width()
            } else {
                row.width() + 1 + word.width()
            };
            if needed <= width {
                if !row.is_empty() {
                    row.push(' ');
                }
                row.push_str(word);
                continue;
            }
            if !row.is_empty() {
                rows.push(std::mem::take(&mut row));
            }
            for c in word.chars() {
                if row.width() + unicode_width::UnicodeWidthChar::width(c).unwrap_or(0) > width {
                    rows.push(std::mem::take(&mut row));
                }
                row.push(c);
            }
        }
        rows.push(row);
    }

    if rows.is_empty() {
        rows.push(String::new());
    }
    rows
}

fn truncate(text: &str, max: usize) -> String {
    if text.width() <= max {
        return text.to_string();
    }
    let mut out = String::new();
    for c in text.chars() {
        if out.width() + 2 > max {
            break;
        }
        out.push(c);
    }
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::TestTerminal;
    use omnichat_app::text_input::TextInput;

    fn render(chat: &ChatState, theme: AppTheme, term: &mut TestTerminal) -> u16 {
        let mut scroll = u16::MAX;
        let area = term.area();
        term.draw_with(|frame| {
            frame.render_stateful_widget(ChatView::new(chat, theme), area, &mut scroll)
        });
        scroll
    }

    #[test]
    fn test_greeting_shown_for_each_preset() {
        for theme in AppTheme::presets() {
            let chat = ChatState::new(theme);
            let mut term = TestTerminal::new();
            render(&chat, theme, &mut term);
            assert!(
                term.buffer_contains(theme_config(theme).greeting),
                "{} greeting",
                theme
            );
        }
    }

    #[test]
    fn test_placeholder_in_input() {
        let chat = ChatState::new(AppTheme::ChatGPT);
        let mut term = TestTerminal::new();
        render(&chat, AppTheme::ChatGPT, &mut term);
        assert!(term.buffer_contains("Send a message..."));
    }

    #[test]
    fn test_sidebar_shows_first_user_message() {
        let mut chat = ChatState::new(AppTheme::Gemini);
        chat.input = TextInput::with_value("plan a trip");
        chat.begin_send();
        let mut term = TestTerminal::new();
        render(&chat, AppTheme::Gemini, &mut term);
        assert!(term.buffer_contains("New chat"));
        assert!(term.buffer_contains("plan a trip"));
    }

    #[test]
    fn test_scroll_clamped_to_content() {
        let chat = ChatState::new(AppTheme::Gemini);
        let mut term = TestTerminal::new();
        // A short conversation fits: nothing to scroll
        assert_eq!(render(&chat, AppTheme::Gemini, &mut term), 0);
    }

    #[test]
    fn test_follow_latest_shows_newest_message() {
        let mut chat = ChatState::new(AppTheme::Gemini);
        for i in 0..12 {
            chat.input = TextInput::with_value(format!("question {i}"));
            chat.begin_send();
            chat.complete(chat.conversation(), format!("answer {i}"));
        }
        let mut term = TestTerminal::compact();
        let scroll = render(&chat, AppTheme::Gemini, &mut term);
        assert!(scroll > 0);
        assert!(term.buffer_contains("answer 11"));
        assert!(!term.buffer_contains("answer 0"));
    }

    #[test]
    fn test_wrap_words_respects_width() {
        let rows = wrap_words("the quick brown fox jumps", 10);
        assert_eq!(rows, vec!["the quick", "brown fox", "jumps"]);
        assert!(rows.iter().all(|r| r.width() <= 10));
    }

    #[test]
    fn test_wrap_words_splits_long_words() {
        let rows = wrap_words("abcdefghijkl", 5);
        assert_eq!(rows, vec!["abcde", "fghij", "kl"]);
    }

    #[test]
    fn test_wrap_words_keeps_blank_lines() {
        let rows = wrap_words("one\n\ntwo", 10);
        assert_eq!(rows, vec!["one", "", "two"]);
    }

    #[test]
    fn test_truncate_adds_ellipsis() {
        assert_eq!(truncate("short", 10), "short");
        let t = truncate("a very long conversation title", 10);
        assert!(t.ends_with('…'));
        assert!(t.width() <= 10);
    }
}
