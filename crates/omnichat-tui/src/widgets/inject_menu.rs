//! Inject menu: preset widgets, a custom widget prompt, and the list of
//! elements currently injected

use omnichat_app::settings_items::{inject_items, InjectItem};
use omnichat_app::state::{AppState, UiMode};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use super::modal_overlay;
use super::TextField;
use crate::theme::{icons, styles};

const MENU_WIDTH: u16 = 60;
const MIN_HEIGHT: u16 = 12;

pub const PROMPT_PLACEHOLDER: &str = "e.g. a cookie consent banner";

pub struct InjectMenu<'a> {
    state: &'a AppState,
}

impl<'a> InjectMenu<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    fn row(&self, label: String, selected: bool) -> Line<'static> {
        let style = if selected {
            styles::focused_selected()
        } else {
            styles::text_primary()
        };
        Line::from(vec![
            Span::styled(if selected { " ▶ " } else { "   " }, styles::accent()),
            Span::styled(label, style),
        ])
    }

    fn element_label(&self, item: InjectItem) -> String {
        match item {
            InjectItem::Preset(preset) => preset.menu_label().to_string(),
            InjectItem::CustomPrompt => "Describe a custom widget...".to_string(),
            InjectItem::Active(id) => self
                .state
                .overlays
                .iter()
                .find(|e| e.id == id)
                .map(|e| format!("✕ {} #{}", e.kind.label(), short_id(&e.id.to_string())))
                .unwrap_or_default(),
        }
    }

    /// Body lines, and the line holding the prompt editor when open
    fn lines(&self) -> (Vec<Line<'static>>, Option<usize>) {
        let state = self.state;
        let mut lines = vec![Line::styled(" PRESETS", styles::text_secondary())];
        let mut prompt_line = None;
        let mut active_header = false;

        for (index, item) in inject_items(state).into_iter().enumerate() {
            let selected = index == state.inject_menu.selected
                && state.ui_mode == UiMode::InjectMenu;

            match item {
                InjectItem::CustomPrompt => {
                    lines.push(Line::default());
                    lines.push(Line::styled(" AI WIDGET", styles::text_secondary()));
                    if state.busy.generating_widget {
                        lines.push(Line::from(vec![
                            Span::raw("   "),
                            Span::styled(icons::spinner(state.spinner_frame), styles::accent()),
                            Span::styled(" Generating widget...", styles::text_secondary()),
                        ]));
                    } else if state.ui_mode == UiMode::WidgetPromptInput {
                        prompt_line = Some(lines.len());
                        lines.push(Line::styled("   Describe:", styles::accent()));
                    } else {
                        lines.push(self.row(self.element_label(item), selected));
                    }
                }
                InjectItem::Active(_) => {
                    if !active_header {
                        lines.push(Line::default());
                        lines.push(Line::styled(" ACTIVE ELEMENTS", styles::text_secondary()));
                        active_header = true;
                    }
                    lines.push(self.row(self.element_label(item), selected));
                }
                InjectItem::Preset(_) => {
                    lines.push(self.row(self.element_label(item), selected));
                }
            }
        }

        if !active_header {
            lines.push(Line::default());
            lines.push(Line::styled(" No elements injected", styles::text_muted()));
        }
        (lines, prompt_line)
    }
}

fn short_id(id: &str) -> &str {
    let start = id.len().saturating_sub(4);
    id.get(start..).unwrap_or(id)
}

impl Widget for InjectMenu<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let (lines, prompt_line) = self.lines();
        let height = u16::try_from(lines.len())
            .unwrap_or(u16::MAX)
            .saturating_add(2)
            .max(MIN_HEIGHT);
        let modal = modal_overlay::prepare_modal(buf, area, MENU_WIDTH, height);

        let block = styles::modal_block("Inject UI element");
        let inner = block.inner(modal);
        block.render(modal, buf);
        Paragraph::new(lines).render(inner, buf);

        if let Some(row) = prompt_line {
            let row = row as u16;
            if row < inner.height {
                let label_width = "   Describe: ".len() as u16;
                let field = Rect::new(
                    inner.x + label_width,
                    inner.y + row,
                    inner.width.saturating_sub(label_width + 1),
                    1,
                );
                TextField::new(&self.state.inject_menu.prompt)
                    .placeholder(PROMPT_PLACEHOLDER)
                    .focused(true)
                    .render(field, buf);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{test_state, TestTerminal};
    use omnichat_core::{DynamicElement, PresetWidget};

    fn render(state: &AppState) -> TestTerminal {
        let mut term = TestTerminal::new();
        term.render_widget(InjectMenu::new(state), term.area());
        term
    }

    fn menu_state() -> AppState {
        let mut state = test_state();
        state.ui_mode = UiMode::InjectMenu;
        state
    }

    #[test]
    fn test_presets_listed() {
        let term = render(&menu_state());
        assert!(term.buffer_contains("Fake Error Toast"));
        assert!(term.buffer_contains("Fake Server Down"));
        assert!(term.buffer_contains("Fake Beta Banner"));
        assert!(term.buffer_contains("No elements injected"));
    }

    #[test]
    fn test_active_elements_listed() {
        let mut state = menu_state();
        state
            .overlays
            .push(DynamicElement::new(PresetWidget::BetaBanner.build()));
        state.overlays.push(DynamicElement::raw("<div>promo</div>"));
        let term = render(&state);
        assert!(term.buffer_contains("ACTIVE ELEMENTS"));
        assert!(term.buffer_contains("Beta banner"));
        assert!(term.buffer_contains("Generated widget"));
        assert!(!term.buffer_contains("No elements injected"));
    }

    #[test]
    fn test_prompt_editor_when_typing() {
        let mut state = menu_state();
        state.ui_mode = UiMode::WidgetPromptInput;
        state.inject_menu.prompt.set("a newsletter popup");
        let term = render(&state);
        assert!(term.buffer_contains("Describe:"));
        assert!(term.buffer_contains("a newsletter popup"));
    }

    #[test]
    fn test_generating_widget_spinner() {
        let mut state = menu_state();
        state.busy.generating_widget = true;
        let term = render(&state);
        assert!(term.buffer_contains("Generating widget..."));
    }

    #[test]
    fn test_short_id() {
        assert_eq!(short_id("0190abcd"), "abcd");
        assert_eq!(short_id("ab"), "ab");
    }
}
