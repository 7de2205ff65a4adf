//! Status line: the newest notice, or key hints for the current mode

use omnichat_app::state::{AppState, UiMode};
use omnichat_core::AppTheme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use crate::theme::{palette, styles};

pub struct StatusBar<'a> {
    state: &'a AppState,
}

impl<'a> StatusBar<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    fn modal_showing(&self) -> bool {
        self.state
            .overlays
            .topmost()
            .is_some_and(|e| e.kind.is_modal())
    }

    /// `(key, description)` pairs for the current mode
    fn hints(&self) -> &'static [(&'static str, &'static str)] {
        match self.state.ui_mode {
            UiMode::Onboarding => &[("Enter", " continue  "), ("Esc", " quit")],
            UiMode::Normal if self.modal_showing() => &[
                ("Enter/x", " dismiss  "),
                ("a", " inject  "),
                ("q", " quit"),
            ],
            UiMode::Normal if self.state.theme() == AppTheme::Custom => &[
                ("i", " refine  "),
                ("r", " refine bar  "),
                ("s", " settings  "),
                ("a", " inject  "),
                ("w", " save  "),
                ("e", " export  "),
                ("1-3", " preset  "),
                ("q", " quit"),
            ],
            UiMode::Normal => &[
                ("i", " type  "),
                ("s", " settings  "),
                ("a", " inject  "),
                ("n", " new chat  "),
                ("e", " export  "),
                ("1-3", " theme  "),
                ("x", " dismiss  "),
                ("q", " quit"),
            ],
            UiMode::ChatInput => &[("Enter", " send  "), ("Esc", " back")],
            UiMode::RefineInput => &[("Enter", " refine  "), ("Esc", " back")],
            UiMode::Settings => &[
                ("↑↓", " select  "),
                ("Enter", " activate  "),
                ("o", " image  "),
                ("g", " generate  "),
                ("d", " delete  "),
                ("Esc", " close"),
            ],
            UiMode::ImagePathInput => &[("Enter", " load  "), ("Esc", " cancel")],
            UiMode::InjectMenu => &[
                ("↑↓", " select  "),
                ("Enter", " inject/remove  "),
                ("p", " describe  "),
                ("d", " remove  "),
                ("Esc", " close"),
            ],
            UiMode::WidgetPromptInput => &[("Enter", " generate  "), ("Esc", " back")],
            UiMode::SaveName => &[("Enter", " save  "), ("Esc", " cancel")],
            UiMode::ConfirmSignIn => &[("y", " sign in  "), ("n", " cancel")],
            UiMode::SignIn => &[
                ("Tab", " next field  "),
                ("Enter", " sign in  "),
                ("Esc", " cancel"),
            ],
        }
    }
}

impl Widget for StatusBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        buf.set_style(area, Style::default().bg(palette::CARD_BG));

        if let Some(notice) = self.state.notices.latest() {
            let (prefix, style) = styles::notice(notice.level);
            let mut spans = vec![
                Span::raw(" "),
                Span::styled(format!("{} {}", prefix, notice.text), style),
            ];
            let more = self.state.notices.len().saturating_sub(1);
            if more > 0 {
                spans.push(Span::styled(format!("  (+{} more)", more), styles::text_muted()));
            }
            if self.state.ui_mode == UiMode::Normal {
                spans.push(Span::styled("  Esc", styles::keybinding()));
                spans.push(Span::styled(" dismiss", styles::text_muted()));
            }
            Paragraph::new(Line::from(spans)).render(area, buf);
            return;
        }

        let mut spans = vec![Span::raw(" ")];
        for (key, description) in self.hints() {
            spans.extend(styles::key_hint(key, description));
        }
        Paragraph::new(Line::from(spans)).render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{test_state, TestTerminal};
    use omnichat_core::{DynamicElement, PresetWidget};

    fn render(state: &AppState) -> TestTerminal {
        let mut term = TestTerminal::new();
        term.render_widget(StatusBar::new(state), Rect::new(0, 0, 100, 1));
        term
    }

    #[test]
    fn test_normal_mode_hints() {
        let state = test_state();
        let term = render(&state);
        assert!(term.line_contains(0, "settings"));
        assert!(term.line_contains(0, "quit"));
    }

    #[test]
    fn test_modal_hints_when_modal_topmost() {
        let mut state = test_state();
        state
            .overlays
            .push(DynamicElement::new(PresetWidget::ServerDown.build()));
        let term = render(&state);
        assert!(term.line_contains(0, "dismiss"));
        assert!(!term.line_contains(0, "settings"));
    }

    #[test]
    fn test_notice_replaces_hints() {
        let mut state = test_state();
        state.notices.error("Failed to save layout.");
        state.notices.info("Exported");
        let term = render(&state);
        assert!(term.line_contains(0, "Exported"));
        assert!(term.line_contains(0, "+1 more"));
        assert!(!term.line_contains(0, "settings"));
    }

    #[test]
    fn test_sign_in_hints() {
        let mut state = test_state();
        state.ui_mode = UiMode::SignIn;
        let term = render(&state);
        assert!(term.line_contains(0, "next field"));
    }
}
