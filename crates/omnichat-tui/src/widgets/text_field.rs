//! Single-line text field rendering with a visible cursor

use omnichat_app::text_input::TextInput;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};
use unicode_width::UnicodeWidthChar;

use crate::theme::styles;

/// Mask character for secret fields
pub const MASK: char = '•';

/// Renders a [`TextInput`] on one row, scrolled so the cursor stays visible
pub struct TextField<'a> {
    input: &'a TextInput,
    placeholder: &'a str,
    masked: bool,
    focused: bool,
    style: Style,
}

impl<'a> TextField<'a> {
    pub fn new(input: &'a TextInput) -> Self {
        Self {
            input,
            placeholder: "",
            masked: false,
            focused: false,
            style: styles::text_primary(),
        }
    }

    pub fn placeholder(mut self, placeholder: &'a str) -> Self {
        self.placeholder = placeholder;
        self
    }

    /// Show every character as [`MASK`]
    pub fn masked(mut self, masked: bool) -> Self {
        self.masked = masked;
        self
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    pub fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    fn display_chars(&self) -> Vec<char> {
        if self.masked {
            vec![MASK; self.input.value().chars().count()]
        } else {
            self.input.value().chars().collect()
        }
    }
}

/// First character index to draw so the cursor fits in `width` columns
fn scroll_start(chars: &[char], cursor: usize, width: usize) -> usize {
    // Reserve one column for the cursor cell
    let budget = width.saturating_sub(1);
    let mut used = 0;
    let mut start = cursor.min(chars.len());
    while start > 0 {
        let w = chars[start - 1].width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        start -= 1;
    }
    start
}

impl Widget for TextField<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        if self.input.is_empty() && !self.focused {
            Paragraph::new(Span::styled(self.placeholder, styles::text_muted())).render(area, buf);
            return;
        }

        let chars = self.display_chars();
        let cursor = self.input.cursor().min(chars.len());
        let start = scroll_start(&chars, cursor, area.width as usize);

        let before: String = chars[start..cursor].iter().collect();
        let mut spans = vec![Span::styled(before, self.style)];

        if self.focused {
            let under = chars.get(cursor).copied().unwrap_or(' ');
            spans.push(Span::styled(
                under.to_string(),
                self.style.add_modifier(Modifier::REVERSED),
            ));
            let after: String = chars.iter().skip(cursor + 1).collect();
            spans.push(Span::styled(after, self.style));
        } else {
            let after: String = chars[cursor..].iter().collect();
            spans.push(Span::styled(after, self.style));
        }

        Paragraph::new(Line::from(spans)).render(area, buf);
    }
}
