//! Custom layout view and its refinement bar.
//!
//! Generated markup is never interpreted here: it is shown as inert,
//! highlighted source. Tags, comments and text runs get distinct colors and
//! long lines are hard-wrapped at the view width.

use omnichat_app::text_input::TextInput;
use omnichat_core::{tokenize, CustomLayout, LayoutOrigin, MarkupToken};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, StatefulWidget, Widget},
};
use unicode_width::UnicodeWidthChar;

use super::TextField;
use crate::theme::{icons, palette, styles};

pub const REFINE_PLACEHOLDER: &str = "Describe a change, e.g. \"make the header dark\"";

pub struct LayoutView<'a> {
    layout: &'a CustomLayout,
    focused: bool,
}

impl<'a> LayoutView<'a> {
    pub fn new(layout: &'a CustomLayout) -> Self {
        Self {
            layout,
            focused: false,
        }
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    fn title(&self) -> String {
        let origin = match &self.layout.origin {
            LayoutOrigin::Generated => "generated".to_string(),
            LayoutOrigin::Refined => "refined".to_string(),
            LayoutOrigin::Loaded { record_id } => format!("saved {}", record_id),
        };
        format!(
            " Custom UI · {} · {} chars ",
            origin,
            self.layout.markup.chars().count()
        )
    }
}

impl StatefulWidget for LayoutView<'_> {
    type State = u16;

    fn render(self, area: Rect, buf: &mut Buffer, scroll: &mut u16) {
        let block = styles::glass_block(self.focused)
            .title(Span::styled(self.title(), styles::accent()))
            .style(Style::default().bg(palette::CARD_BG));
        let inner = block.inner(area);
        block.render(area, buf);
        if inner.width == 0 || inner.height == 0 {
            return;
        }

        let lines: Vec<Line<'static>> = highlighted_lines(&self.layout.markup)
            .into_iter()
            .flat_map(|line| hard_wrap(line, inner.width as usize))
            .collect();

        let max_scroll = u16::try_from(lines.len())
            .unwrap_or(u16::MAX)
            .saturating_sub(inner.height);
        *scroll = (*scroll).min(max_scroll);

        Paragraph::new(lines)
            .scroll((*scroll, 0))
            .render(inner, buf);
    }
}

type StyledRun = (String, Style);

fn token_style<'a>(token: &MarkupToken<'a>) -> (Style, &'a str) {
    match *token {
        MarkupToken::Tag(s) => (Style::default().fg(palette::MARKUP_TAG), s),
        MarkupToken::Comment(s) => (
            Style::default()
                .fg(palette::MARKUP_COMMENT)
                .add_modifier(Modifier::ITALIC),
            s,
        ),
        MarkupToken::Text(s) => (styles::text_bright(), s),
    }
}

/// Split highlighted markup into logical lines of styled runs
fn highlighted_lines(markup: &str) -> Vec<Vec<StyledRun>> {
    let mut lines: Vec<Vec<StyledRun>> = vec![Vec::new()];
    for token in tokenize(markup) {
        let (style, text) = token_style(&token);
        for (i, segment) in text.split('\n').enumerate() {
            if i > 0 {
                lines.push(Vec::new());
            }
            let segment = segment.trim_end_matches('\r').replace('\t', "  ");
            if !segment.is_empty() {
                if let Some(line) = lines.last_mut() {
                    line.push((segment, style));
                }
            }
        }
    }
    lines
}

/// Break a logical line into rows of at most `width` columns
fn hard_wrap(runs: Vec<StyledRun>, width: usize) -> Vec<Line<'static>> {
    let width = width.max(1);
    let mut rows = Vec::new();
    let mut row: Vec<Span<'static>> = Vec::new();
    let mut used = 0;

    for (text, style) in runs {
        let mut chunk = String::new();
        for c in text.chars() {
            let w = c.width().unwrap_or(0);
            if used + w > width {
                if !chunk.is_empty() {
                    row.push(Span::styled(std::mem::take(&mut chunk), style));
                }
                rows.push(Line::from(std::mem::take(&mut row)));
                used = 0;
            }
            chunk.push(c);
            used += w;
        }
        if !chunk.is_empty() {
            row.push(Span::styled(chunk, style));
        }
    }
    rows.push(Line::from(row));
    rows
}

/// Bottom bar for refinement instructions
pub struct RefineBar<'a> {
    input: &'a TextInput,
    focused: bool,
    refining: bool,
    spinner_frame: usize,
}

impl<'a> RefineBar<'a> {
    pub fn new(input: &'a TextInput) -> Self {
        Self {
            input,
            focused: false,
            refining: false,
            spinner_frame: 0,
        }
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    /// A refinement request is in flight
    pub fn refining(mut self, refining: bool, spinner_frame: usize) -> Self {
        self.refining = refining;
        self.spinner_frame = spinner_frame;
        self
    }
}

impl Widget for RefineBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = styles::glass_block(self.focused)
            .title(Span::styled(" Refine UI ", styles::accent_bold()))
            .style(Style::default().bg(palette::CARD_BG));
        let inner = block.inner(area);
        block.render(area, buf);

        if self.refining {
            let line = Line::from(vec![
                Span::styled(icons::spinner(self.spinner_frame), styles::accent()),
                Span::styled(" Refining layout...", styles::text_secondary()),
            ]);
            Paragraph::new(line).render(inner, buf);
            return;
        }

        TextField::new(self.input)
            .placeholder(REFINE_PLACEHOLDER)
            .focused(self.focused)
            .render(inner, buf);
    }
}
