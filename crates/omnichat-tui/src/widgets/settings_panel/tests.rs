//! Tests for settings_panel widget module

use super::*;
use crate::test_utils::{test_state, TestTerminal};
use omnichat_app::state::LoadedImage;
use omnichat_core::{DataUri, Identity, SavedLayout};

fn render(state: &AppState) -> TestTerminal {
    let mut term = TestTerminal::new();
    term.render_widget(SettingsPanel::new(state), term.area());
    term
}

fn signed_in(mut state: AppState) -> AppState {
    state.cloud_enabled = true;
    state.identity = Some(Identity {
        uid: "u1".into(),
        display_name: None,
        email: Some("ada@example.com".into()),
        photo_url: None,
    });
    state
}

#[test]
fn test_settings_panel_renders_sections() {
    let mut state = test_state();
    state.ui_mode = UiMode::Settings;
    let term = render(&state);

    assert!(term.buffer_contains("Settings · Gemini"));
    assert!(term.buffer_contains("THEMES"));
    assert!(term.buffer_contains("AI UI CLONER"));
    assert!(term.buffer_contains("ChatGPT"));
    assert!(term.buffer_contains("Claude"));
}

#[test]
fn test_current_theme_checked() {
    let mut state = test_state();
    state.set_preset(AppTheme::Claude);
    let term = render(&state);
    assert!(term.buffer_contains("✓ Claude"));
    assert!(!term.buffer_contains("✓ Gemini"));
}

#[test]
fn test_cloud_disabled_note() {
    let mut state = test_state();
    state.cloud_enabled = false;
    let term = render(&state);
    assert!(term.buffer_contains("Cloud sync is not configured"));
}

#[test]
fn test_sign_in_row_when_signed_out() {
    let mut state = test_state();
    state.cloud_enabled = true;
    let term = render(&state);
    assert!(term.buffer_contains("Sign in"));
    assert!(term.buffer_contains("Sign in to save and load layouts"));
}

#[test]
fn test_saved_layouts_listed_when_signed_in() {
    let mut state = signed_in(test_state());
    state.saved_layouts = vec![SavedLayout {
        id: "doc1".into(),
        user_id: "u1".into(),
        name: "Landing page".into(),
        html: "<div></div>".into(),
        created_at: 1_700_000_000_000,
    }];
    let term = render(&state);
    assert!(term.buffer_contains("Signed in as ada@example.com"));
    assert!(term.buffer_contains("SAVED LAYOUTS"));
    assert!(term.buffer_contains("Landing page"));
    assert!(term.buffer_contains("Sign out"));
}

#[test]
fn test_empty_layout_list_note() {
    let state = signed_in(test_state());
    let term = render(&state);
    assert!(term.buffer_contains("No saved layouts yet"));
}

#[test]
fn test_generate_row_appears_with_image() {
    let mut state = test_state();
    state.settings_panel.image = Some(LoadedImage {
        path: "shot.png".into(),
        data: DataUri::from_bytes(&[0u8; 2048], "image/png"),
    });
    let term = render(&state);
    assert!(term.buffer_contains("shot.png (image/png, 2 KB)"));
    assert!(term.buffer_contains("Generate UI"));
    assert!(term.buffer_contains("Clear image"));
}

#[test]
fn test_generating_message_shown() {
    let mut state = test_state();
    state.busy.generating_layout = true;
    let term = render(&state);
    assert!(term.buffer_contains("AI is writing HTML"));
}

#[test]
fn test_path_editor_shown_while_typing() {
    let mut state = test_state();
    state.ui_mode = UiMode::ImagePathInput;
    state.settings_panel.selected = 3;
    state.settings_panel.image_path.set("/tmp/ui.png");
    let term = render(&state);
    assert!(term.buffer_contains("Image path:"));
    assert!(term.buffer_contains("/tmp/ui.png"));
}

#[test]
fn test_selected_row_marked() {
    let mut state = test_state();
    state.settings_panel.selected = 1;
    let term = render(&state);
    assert!(term.buffer_contains("▶   ChatGPT"));
}
