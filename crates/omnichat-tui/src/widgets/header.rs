//! Header bar: app title, active theme, background work and account

use omnichat_app::state::AppState;
use omnichat_core::{AppTheme, CustomLayout, LayoutOrigin};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use crate::theme::{icons, palette, styles};

pub struct MainHeader<'a> {
    state: &'a AppState,
}

impl<'a> MainHeader<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    /// Label of the background job shown next to the spinner
    fn busy_label(&self) -> Option<&'static str> {
        let busy = &self.state.busy;
        if busy.generating_layout {
            Some("Generating UI")
        } else if busy.refining {
            Some("Refining")
        } else if busy.generating_widget {
            Some("Generating widget")
        } else if busy.signing_in {
            Some("Signing in")
        } else if busy.saving {
            Some("Saving")
        } else if self.state.layouts_loading {
            Some("Loading layouts")
        } else {
            None
        }
    }
}

impl Widget for MainHeader<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        buf.set_style(area, Style::default().bg(palette::CARD_BG));

        let theme = self.state.theme();
        let theme_label = match (theme, self.state.custom_layout()) {
            (AppTheme::Custom, Some(layout)) => format!("Custom ({})", origin_label(layout)),
            _ => theme.name().to_string(),
        };

        let mut left = vec![
            Span::styled(" OmniChat ", styles::accent_bold()),
            Span::styled("│ ", styles::text_muted()),
            Span::styled(theme_label, styles::text_primary()),
        ];
        if !self.state.overlays.is_empty() {
            left.push(Span::styled(
                format!("  +{} injected", self.state.overlays.len()),
                styles::keybinding(),
            ));
        }
        if let Some(label) = self.busy_label() {
            left.push(Span::raw("  "));
            left.push(Span::styled(
                format!("{} {}", icons::spinner(self.state.spinner_frame), label),
                styles::accent(),
            ));
        }
        Paragraph::new(Line::from(left)).render(area, buf);

        let account = match (&self.state.identity, self.state.cloud_enabled) {
            (Some(identity), _) => Some(Span::styled(
                format!("{} {} ", icons::USER, identity.label()),
                styles::success_text(),
            )),
            (None, true) => Some(Span::styled("Not signed in ", styles::text_muted())),
            (None, false) => None,
        };
        if let Some(span) = account {
            Paragraph::new(Line::from(span).right_aligned()).render(area, buf);
        }
    }
}

fn origin_label(layout: &CustomLayout) -> &'static str {
    match layout.origin {
        LayoutOrigin::Generated => "generated",
        LayoutOrigin::Refined => "refined",
        LayoutOrigin::Loaded { .. } => "saved",
    }
}
