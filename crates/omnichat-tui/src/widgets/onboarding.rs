//! First-run onboarding: API key entry, then the "System Ready" screen

use omnichat_app::state::{OnboardingState, OnboardingStep};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Margin, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Widget, Wrap},
};

use super::modal_overlay;
use super::TextField;
use crate::theme::{icons, palette, styles};

const MODAL_WIDTH: u16 = 64;
const MODAL_HEIGHT: u16 = 14;

pub struct OnboardingView<'a> {
    onboarding: &'a OnboardingState,
    spinner_frame: usize,
}

impl<'a> OnboardingView<'a> {
    pub fn new(onboarding: &'a OnboardingState, spinner_frame: usize) -> Self {
        Self {
            onboarding,
            spinner_frame,
        }
    }

    fn render_credential(&self, area: Rect, buf: &mut Buffer) {
        let rows = Layout::vertical([
            Constraint::Length(4),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(area);

        Paragraph::new(vec![
            Line::styled("Welcome to OmniChat", styles::accent_bold()),
            Line::default(),
            Line::styled(
                "Enter your Gemini API key to enable AI layout generation.",
                styles::text_primary(),
            ),
        ])
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .render(rows[0], buf);

        let block = styles::glass_block(!self.onboarding.verifying).title(" API key ");
        let inner = block.inner(rows[1]);
        block.render(rows[1], buf);
        TextField::new(&self.onboarding.key_input)
            .placeholder("Paste your key")
            .masked(true)
            .focused(!self.onboarding.verifying)
            .render(inner, buf);

        let status = if self.onboarding.verifying {
            Line::from(vec![
                Span::styled(icons::spinner(self.spinner_frame), styles::accent()),
                Span::styled(" Verifying...", styles::text_secondary()),
            ])
        } else if let Some(error) = &self.onboarding.error {
            Line::styled(error.clone(), styles::error_text())
        } else {
            Line::styled("The key is kept in memory only.", styles::text_muted())
        };
        Paragraph::new(status)
            .alignment(Alignment::Center)
            .render(rows[2], buf);
    }

    fn render_ready(&self, area: Rect, buf: &mut Buffer) {
        let lines = vec![
            Line::default(),
            Line::styled(format!("{}  System Ready", icons::CHECK), styles::success_text()),
            Line::default(),
            Line::styled(
                "Switch between Gemini, ChatGPT and Claude, clone any UI from a screenshot, \
                 and inject fake errors to test your users.",
                styles::text_primary(),
            ),
            Line::default(),
            Line::from(styles::key_hint("Enter", " to start").to_vec()),
        ];
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .render(area, buf);
    }
}

impl Widget for OnboardingView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        buf.set_style(area, Style::default().bg(palette::DEEPEST_BG));
        let modal = modal_overlay::prepare_modal(buf, area, MODAL_WIDTH, MODAL_HEIGHT);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(styles::border_active())
            .style(Style::default().bg(palette::POPUP_BG));
        let inner = block.inner(modal).inner(Margin::new(2, 1));
        block.render(modal, buf);

        match self.onboarding.step {
            OnboardingStep::Credential => self.render_credential(inner, buf),
            OnboardingStep::Ready => self.render_ready(inner, buf),
        }
    }
}
