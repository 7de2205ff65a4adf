//! Main render/view function (View in TEA pattern)


use omnichat_app::state::{AppState, UiMode};
use ratatui::style::Style;
use ratatui::widgets::Block;
use ratatui::Frame;

use super::{layout, widgets};
use crate::theme::palette;

/// Render the complete UI (View function in TEA)
///
/// This is a pure rendering function except for the scroll offset, which is
/// clamped to the rendered content.
pub fn view(frame: &mut Frame, state: &mut AppState) {
    let area = frame.area();

    let bg_block = Block::default().style(Style::default().bg(palette::DEEPEST_BG));
    frame.render_widget(bg_block, area);

    if state.ui_mode == UiMode::Onboarding {
        frame.render_widget(
            widgets::OnboardingView::new(&state.onboarding, state.spinner_frame),
            area,
        );
        return;
    }

    let areas = layout::create(area);
    frame.render_widget(widgets::MainHeader::new(state), areas.header);

    render_body(frame, state, areas.body);

    // Injected elements sit over the simulated UI, below panels and dialogs
    frame.render_widget(widgets::OverlayLayer::new(&state.overlays), areas.body);

    match state.ui_mode {
        UiMode::Settings | UiMode::ImagePathInput => {
            frame.render_widget(widgets::SettingsPanel::new(state), areas.body);
        }
        UiMode::InjectMenu | UiMode::WidgetPromptInput => {
            frame.render_widget(widgets::InjectMenu::new(state), areas.body);
        }
        UiMode::SaveName => {
            frame.render_widget(widgets::SaveDialog::new(&state.save_name), areas.body);
        }
        UiMode::ConfirmSignIn => {
            frame.render_widget(widgets::ConfirmSignInDialog, areas.body);
        }
        UiMode::SignIn => {
            let dialog = widgets::SignInDialog::new(&state.sign_in)
                .signing_in(state.busy.signing_in, state.spinner_frame);
            frame.render_widget(dialog, areas.body);
        }
        UiMode::Onboarding | UiMode::Normal | UiMode::ChatInput | UiMode::RefineInput => {}
    }

    frame.render_widget(widgets::StatusBar::new(state), areas.status);
}

/// The simulated UI: a preset chat or the custom layout
fn render_body(frame: &mut Frame, state: &mut AppState, area: ratatui::layout::Rect) {
    let spinner_frame = state.spinner_frame;
    let ui_mode = state.ui_mode;

    if let Some(custom) = state.custom_layout() {
        let custom = custom.clone();
        let areas = layout::split_custom(area, state.refine_open);
        frame.render_stateful_widget(
            widgets::LayoutView::new(&custom).focused(ui_mode == UiMode::RefineInput),
            areas.markup,
            &mut state.scroll,
        );
        if let Some(refine) = areas.refine {
            let bar = widgets::RefineBar::new(&state.refine_input)
                .focused(ui_mode == UiMode::RefineInput)
                .refining(state.busy.refining, spinner_frame);
            frame.render_widget(bar, refine);
        }
        return;
    }

    let chat = widgets::ChatView::new(&state.chat, state.theme())
        .focused(ui_mode == UiMode::ChatInput)
        .spinner_frame(spinner_frame);
    frame.render_stateful_widget(chat, area, &mut state.scroll);
}
