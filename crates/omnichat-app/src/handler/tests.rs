//! Tests for handler module

use super::*;
use crate::input_key::InputKey;
use crate::message::Message;
use crate::state::{AppState, OnboardingStep, UiMode};
use omnichat_core::{
    AppPhase, AppTheme, CustomLayout, DataUri, Identity, LayoutOrigin, PresetWidget, SavedLayout,
    LAYOUT_FALLBACK,
};

/// Run a message and all follow-ups, collecting the emitted actions
fn run(state: &mut AppState, msg: Message) -> Vec<UpdateAction> {
    let mut actions = Vec::new();
    let mut next = Some(msg);
    while let Some(m) = next {
        let result = update(state, m);
        actions.extend(result.action);
        next = result.message;
    }
    actions
}

fn press(state: &mut AppState, key: InputKey) -> Vec<UpdateAction> {
    run(state, Message::Key(key))
}

fn type_text(state: &mut AppState, text: &str) {
    for c in text.chars() {
        press(state, InputKey::Char(c));
    }
}

fn normal_state() -> AppState {
    let mut state = AppState::new();
    state.ui_mode = UiMode::Normal;
    state.generative_ready = true;
    state
}

fn cloud_state() -> AppState {
    let mut state = normal_state();
    state.cloud_enabled = true;
    state
}

fn identity(uid: &str) -> Identity {
    Identity {
        uid: uid.into(),
        display_name: None,
        email: Some(format!("{uid}@example.com")),
        photo_url: None,
    }
}

fn record(id: &str, uid: &str) -> SavedLayout {
    SavedLayout {
        id: id.into(),
        user_id: uid.into(),
        name: format!("Layout {id}"),
        html: format!("<div>{id}</div>"),
        created_at: 0,
    }
}

fn with_custom_layout(mut state: AppState) -> AppState {
    state.show_custom(CustomLayout::generated("<div>custom</div>"));
    state
}

// ─────────────────────────────────────────────────────────────────────────────
// Lifecycle & onboarding
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_quit_message_sets_quitting_phase() {
    let mut state = AppState::new();
    update(&mut state, Message::Quit);
    assert_eq!(state.phase, AppPhase::Quitting);
    assert!(state.should_quit());
}

#[test]
fn test_blank_key_shows_validation_error() {
    let mut state = AppState::new();
    type_text(&mut state, "   ");
    let actions = press(&mut state, InputKey::Enter);

    assert!(actions.is_empty());
    assert_eq!(
        state.onboarding.error.as_deref(),
        Some(onboarding::INVALID_KEY_MESSAGE)
    );
    assert_eq!(state.onboarding.step, OnboardingStep::Credential);
}

#[test]
fn test_onboarding_flow() {
    let mut state = AppState::new();
    type_text(&mut state, "AIza-key");
    let actions = press(&mut state, InputKey::Enter);
    assert!(matches!(actions.as_slice(), [UpdateAction::VerifyApiKey]));
    assert!(state.onboarding.verifying);

    run(&mut state, Message::ApiKeyVerified);
    assert_eq!(state.onboarding.step, OnboardingStep::Ready);

    let actions = press(&mut state, InputKey::Enter);
    match actions.as_slice() {
        [UpdateAction::ConfigureGenerative { api_key }] => {
            assert_eq!(api_key.expose(), "AIza-key")
        }
        other => panic!("unexpected {other:?}"),
    }
    assert_eq!(state.ui_mode, UiMode::Normal);
    assert!(state.generative_ready);
}

#[test]
fn test_typing_clears_onboarding_error() {
    let mut state = AppState::new();
    press(&mut state, InputKey::Enter);
    assert!(state.onboarding.error.is_some());
    type_text(&mut state, "k");
    assert!(state.onboarding.error.is_none());
}

// ─────────────────────────────────────────────────────────────────────────────
// Themes
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_set_theme_clears_custom_layout() {
    let mut state = with_custom_layout(normal_state());
    state.ui_mode = UiMode::RefineInput;

    run(&mut state, Message::SetTheme(AppTheme::Claude));

    assert_eq!(state.theme(), AppTheme::Claude);
    assert!(state.custom_layout().is_none());
    assert!(!state.refine_open);
    assert_eq!(state.ui_mode, UiMode::Normal);
    assert_eq!(state.chat.messages[0].text, AppTheme::Claude.greeting());
}

#[test]
fn test_set_theme_custom_is_ignored() {
    let mut state = normal_state();
    run(&mut state, Message::SetTheme(AppTheme::Custom));
    assert_eq!(state.theme(), AppTheme::Gemini);
}

#[test]
fn test_theme_switch_blocked_while_generating() {
    let mut state = normal_state();
    state.busy.generating_layout = true;
    run(&mut state, Message::SetTheme(AppTheme::ChatGPT));
    assert_eq!(state.theme(), AppTheme::Gemini);
}

#[test]
fn test_settings_panel_selects_preset() {
    let mut state = normal_state();
    press(&mut state, InputKey::Char('s'));
    assert_eq!(state.ui_mode, UiMode::Settings);

    press(&mut state, InputKey::Down);
    press(&mut state, InputKey::Enter);
    assert_eq!(state.theme(), AppTheme::ChatGPT);
    assert_eq!(state.ui_mode, UiMode::Settings);
}

// ─────────────────────────────────────────────────────────────────────────────
// Layout generation & refinement
// ─────────────────────────────────────────────────────────────────────────────

fn with_image(mut state: AppState) -> AppState {
    run(
        &mut state,
        Message::ImageLoaded {
            path: "shot.png".into(),
            data: DataUri::from_bytes(b"png", "image/png"),
        },
    );
    state
}

#[test]
fn test_generate_requires_image() {
    let mut state = normal_state();
    assert!(run(&mut state, Message::GenerateLayout).is_empty());
    assert!(!state.busy.generating_layout);
}

#[test]
fn test_generate_dispatches_task_once() {
    let mut state = with_image(normal_state());
    let actions = run(&mut state, Message::GenerateLayout);
    assert!(matches!(
        actions.as_slice(),
        [UpdateAction::SpawnTask(Task::GenerateLayout { image })] if image.mime == "image/png"
    ));
    assert!(state.busy.generating_layout);

    assert!(run(&mut state, Message::GenerateLayout).is_empty());
}

#[test]
fn test_layout_generated_switches_to_custom() {
    let mut state = with_image(normal_state());
    state.ui_mode = UiMode::Settings;
    run(&mut state, Message::GenerateLayout);

    run(
        &mut state,
        Message::LayoutGenerated {
            markup: "<main>clone</main>".into(),
        },
    );

    assert_eq!(state.theme(), AppTheme::Custom);
    assert_eq!(
        state.custom_layout().map(|l| l.markup.as_str()),
        Some("<main>clone</main>")
    );
    assert!(state.refine_open);
    assert!(!state.busy.generating_layout);
    assert_eq!(state.ui_mode, UiMode::Normal);
}

#[test]
fn test_generation_failure_shows_fallback() {
    let mut state = with_image(normal_state());
    run(&mut state, Message::GenerateLayout);
    run(
        &mut state,
        Message::LayoutGenerationFailed {
            error: "quota".into(),
        },
    );
    assert_eq!(state.theme(), AppTheme::Custom);
    assert_eq!(
        state.custom_layout().map(|l| l.markup.as_str()),
        Some(LAYOUT_FALLBACK)
    );
}

#[test]
fn test_image_load_failure_notifies() {
    let mut state = normal_state();
    state.ui_mode = UiMode::ImagePathInput;
    type_text(&mut state, "missing.png");
    let actions = press(&mut state, InputKey::Enter);
    assert!(matches!(actions.as_slice(), [UpdateAction::LoadImage { .. }]));
    assert!(state.settings_panel.loading_image);

    run(
        &mut state,
        Message::ImageLoadFailed {
            path: "missing.png".into(),
            error: "No such file".into(),
        },
    );
    assert!(!state.settings_panel.loading_image);
    assert!(state.settings_panel.image.is_none());
    assert!(state
        .notices
        .latest()
        .is_some_and(|n| n.text.contains("No such file")));
}

#[test]
fn test_refine_without_layout_is_noop() {
    let mut state = normal_state();
    state.refine_input.set("make it blue");
    assert!(run(&mut state, Message::SubmitRefine).is_empty());
}

#[test]
fn test_refine_with_empty_instruction_is_noop() {
    let mut state = with_custom_layout(normal_state());
    state.refine_input.set("   ");
    assert!(run(&mut state, Message::SubmitRefine).is_empty());
    assert!(!state.busy.refining);
}

#[test]
fn test_refine_round_trip() {
    let mut state = with_custom_layout(normal_state());
    press(&mut state, InputKey::Enter);
    assert_eq!(state.ui_mode, UiMode::RefineInput);
    type_text(&mut state, "make it blue");

    let actions = press(&mut state, InputKey::Enter);
    match actions.as_slice() {
        [UpdateAction::SpawnTask(Task::RefineLayout {
            markup,
            instruction,
            generation,
        })] => {
            assert_eq!(markup, "<div>custom</div>");
            assert_eq!(instruction, "make it blue");
            assert_eq!(*generation, state.layout_generation());
        }
        other => panic!("unexpected {other:?}"),
    }

    let generation = state.layout_generation();
    run(
        &mut state,
        Message::LayoutRefined {
            generation,
            markup: "<div class='blue'>custom</div>".into(),
        },
    );
    let layout = state.custom_layout().unwrap();
    assert_eq!(layout.markup, "<div class='blue'>custom</div>");
    assert_eq!(layout.origin, LayoutOrigin::Refined);
    assert!(state.refine_input.is_empty());
    assert!(!state.busy.refining);
}

#[test]
fn test_refinement_of_replaced_layout_is_dropped() {
    let mut state = with_custom_layout(normal_state());
    state.refine_input.set("make it blue");
    let generation = match run(&mut state, Message::SubmitRefine).as_slice() {
        [UpdateAction::SpawnTask(Task::RefineLayout { generation, .. })] => *generation,
        other => panic!("unexpected {other:?}"),
    };

    state.show_custom(CustomLayout::generated("<div>second</div>"));
    run(
        &mut state,
        Message::LayoutRefined {
            generation,
            markup: "<div class='blue'>custom</div>".into(),
        },
    );

    let layout = state.custom_layout().unwrap();
    assert_eq!(layout.markup, "<div>second</div>");
    assert_eq!(layout.origin, LayoutOrigin::Generated);
    assert!(!state.busy.refining);
}

#[test]
fn test_refine_failure_keeps_layout() {
    let mut state = with_custom_layout(normal_state());
    state.refine_input.set("oops");
    run(&mut state, Message::SubmitRefine);
    run(
        &mut state,
        Message::RefineFailed {
            error: "timeout".into(),
        },
    );
    assert_eq!(
        state.custom_layout().map(|l| l.markup.as_str()),
        Some("<div>custom</div>")
    );
    assert_eq!(state.refine_input.value(), "oops");
    assert!(!state.busy.refining);
}

#[test]
fn test_refine_bar_toggle() {
    let mut state = normal_state();
    run(&mut state, Message::ToggleRefineBar);
    assert!(!state.refine_open);

    let mut state = with_custom_layout(normal_state());
    run(&mut state, Message::ToggleRefineBar);
    assert!(!state.refine_open);
    run(&mut state, Message::ToggleRefineBar);
    assert!(state.refine_open);
    assert_eq!(state.ui_mode, UiMode::RefineInput);
}

// ─────────────────────────────────────────────────────────────────────────────
// Chat
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_send_chat_schedules_reply() {
    let mut state = normal_state();
    press(&mut state, InputKey::Char('i'));
    type_text(&mut state, "hello");
    let actions = press(&mut state, InputKey::Enter);

    assert!(matches!(
        actions.as_slice(),
        [UpdateAction::SimulateReply { conversation: 0, .. }]
    ));
    assert_eq!(state.chat.messages.len(), 2);
    assert!(state.chat.is_pending());
    assert_eq!(state.scroll, crate::state::FOLLOW_LATEST);

    run(
        &mut state,
        Message::ChatReplyReceived {
            conversation: 0,
            text: "System operating normally.".into(),
        },
    );
    assert_eq!(state.chat.messages.len(), 3);
    assert!(!state.chat.is_pending());
}

#[test]
fn test_send_while_pending_is_ignored() {
    let mut state = normal_state();
    state.ui_mode = UiMode::ChatInput;
    type_text(&mut state, "one");
    press(&mut state, InputKey::Enter);
    type_text(&mut state, "two");
    assert!(press(&mut state, InputKey::Enter).is_empty());
    assert_eq!(state.chat.input.value(), "two");
}

#[test]
fn test_blank_chat_input_is_ignored() {
    let mut state = normal_state();
    state.ui_mode = UiMode::ChatInput;
    type_text(&mut state, "  ");
    assert!(press(&mut state, InputKey::Enter).is_empty());
    assert_eq!(state.chat.messages.len(), 1);
}

#[test]
fn test_reply_after_new_chat_is_dropped() {
    let mut state = normal_state();
    state.chat.input.set("hello");
    run(&mut state, Message::SendChat);
    run(&mut state, Message::NewChat);
    run(
        &mut state,
        Message::ChatReplyReceived {
            conversation: 0,
            text: "late".into(),
        },
    );
    assert_eq!(state.chat.messages.len(), 1);
}

#[test]
fn test_chat_disabled_for_custom_theme() {
    let mut state = with_custom_layout(normal_state());
    state.chat.input.set("hello");
    assert!(run(&mut state, Message::SendChat).is_empty());
}

// ─────────────────────────────────────────────────────────────────────────────
// Overlays
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_inject_preset_from_menu() {
    let mut state = normal_state();
    press(&mut state, InputKey::Char('a'));
    assert_eq!(state.ui_mode, UiMode::InjectMenu);
    press(&mut state, InputKey::Down);
    press(&mut state, InputKey::Enter);

    assert_eq!(state.overlays.len(), 1);
    assert!(state.overlays.topmost().unwrap().kind.is_modal());
    assert_eq!(state.ui_mode, UiMode::Normal);
}

#[test]
fn test_dismiss_topmost_removes_only_that_element() {
    let mut state = normal_state();
    run(&mut state, Message::InjectPreset(PresetWidget::ErrorToast));
    run(&mut state, Message::InjectPreset(PresetWidget::BetaBanner));
    let first = state.overlays.get(0).unwrap().id;

    press(&mut state, InputKey::Char('x'));
    assert_eq!(state.overlays.len(), 1);
    assert_eq!(state.overlays.topmost().unwrap().id, first);
}

#[test]
fn test_remove_unknown_element_is_noop() {
    let mut state = normal_state();
    run(&mut state, Message::InjectPreset(PresetWidget::ErrorToast));
    run(&mut state, Message::RemoveElement(omnichat_core::ElementId::new()));
    assert_eq!(state.overlays.len(), 1);
}

#[test]
fn test_widget_prompt_flow() {
    let mut state = normal_state();
    run(&mut state, Message::OpenInjectMenu);
    run(&mut state, Message::OpenWidgetPrompt);
    type_text(&mut state, "cookie banner");
    let actions = press(&mut state, InputKey::Enter);
    assert!(matches!(
        actions.as_slice(),
        [UpdateAction::SpawnTask(Task::GenerateWidget { prompt })] if prompt == "cookie banner"
    ));
    assert!(state.busy.generating_widget);

    run(
        &mut state,
        Message::WidgetGenerated {
            markup: "<div>cookies</div>".into(),
        },
    );
    assert_eq!(state.overlays.len(), 1);
    assert!(state.inject_menu.prompt.is_empty());
    assert_eq!(state.ui_mode, UiMode::Normal);
}

#[test]
fn test_widget_failure_injects_fallback() {
    let mut state = normal_state();
    state.inject_menu.prompt.set("x");
    run(&mut state, Message::SubmitWidgetPrompt);
    run(
        &mut state,
        Message::WidgetGenerationFailed {
            error: "quota exceeded".into(),
        },
    );
    match &state.overlays.topmost().unwrap().kind {
        omnichat_core::ElementKind::RawMarkup(markup) => {
            assert!(markup.contains("quota exceeded"))
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn test_inject_menu_removes_active_element() {
    let mut state = normal_state();
    run(&mut state, Message::InjectPreset(PresetWidget::ErrorToast));
    run(&mut state, Message::OpenInjectMenu);
    for _ in 0..4 {
        press(&mut state, InputKey::Down);
    }
    press(&mut state, InputKey::Delete);
    assert!(state.overlays.is_empty());
    assert_eq!(state.inject_menu.selected, 3);
}

// ─────────────────────────────────────────────────────────────────────────────
// Save flow & cloud
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_save_requires_custom_layout() {
    let mut state = cloud_state();
    run(&mut state, Message::OpenSaveDialog);
    assert_eq!(state.ui_mode, UiMode::Normal);
}

#[test]
fn test_save_without_cloud_notifies() {
    let mut state = with_custom_layout(normal_state());
    run(&mut state, Message::OpenSaveDialog);
    assert_eq!(state.ui_mode, UiMode::Normal);
    assert!(state.notices.latest().is_some());
}

#[test]
fn test_save_signed_in_dispatches_save() {
    let mut state = with_custom_layout(cloud_state());
    state.identity = Some(identity("u1"));

    run(&mut state, Message::OpenSaveDialog);
    assert_eq!(state.ui_mode, UiMode::SaveName);
    assert_eq!(state.save_name.value(), crate::state::DEFAULT_LAYOUT_NAME);

    let actions = press(&mut state, InputKey::Enter);
    match actions.as_slice() {
        [UpdateAction::SaveLayout { name, html }] => {
            assert_eq!(name, "My Custom UI");
            assert_eq!(html, "<div>custom</div>");
        }
        other => panic!("unexpected {other:?}"),
    }
    assert!(state.busy.saving);
}

#[test]
fn test_empty_save_name_aborts_silently() {
    let mut state = with_custom_layout(cloud_state());
    state.identity = Some(identity("u1"));
    run(&mut state, Message::OpenSaveDialog);
    press(&mut state, InputKey::CharCtrl('u'));
    let actions = press(&mut state, InputKey::Enter);
    assert!(actions.is_empty());
    assert!(state.notices.is_empty());
    assert_eq!(state.ui_mode, UiMode::Normal);
}

#[test]
fn test_save_signed_out_asks_then_signs_in_and_saves() {
    let mut state = with_custom_layout(cloud_state());
    run(&mut state, Message::OpenSaveDialog);
    press(&mut state, InputKey::Enter);
    assert_eq!(state.ui_mode, UiMode::ConfirmSignIn);
    assert_eq!(state.pending_save.as_deref(), Some("My Custom UI"));

    press(&mut state, InputKey::Char('y'));
    assert_eq!(state.ui_mode, UiMode::SignIn);
    type_text(&mut state, "ada@example.com");
    press(&mut state, InputKey::Tab);
    type_text(&mut state, "pw");

    let actions = press(&mut state, InputKey::Enter);
    match actions.as_slice() {
        [UpdateAction::SignIn {
            credentials,
            then_save: Some(pending),
        }] => {
            assert_eq!(credentials.email, "ada@example.com");
            assert_eq!(credentials.password(), "pw");
            assert_eq!(pending.name, "My Custom UI");
            assert_eq!(pending.html, "<div>custom</div>");
        }
        other => panic!("unexpected {other:?}"),
    }
    assert!(state.busy.signing_in);
    assert!(state.pending_save.is_none());
    assert!(state.sign_in.password.is_empty());
}

#[test]
fn test_declining_sign_in_drops_save() {
    let mut state = with_custom_layout(cloud_state());
    run(&mut state, Message::OpenSaveDialog);
    press(&mut state, InputKey::Enter);
    let actions = press(&mut state, InputKey::Char('n'));
    assert!(actions.is_empty());
    assert!(state.pending_save.is_none());
    assert!(state.notices.is_empty());
}

#[test]
fn test_cancelled_sign_in_form_is_silent() {
    let mut state = with_custom_layout(cloud_state());
    run(&mut state, Message::OpenSaveDialog);
    press(&mut state, InputKey::Enter);
    press(&mut state, InputKey::Enter);
    press(&mut state, InputKey::Esc);
    assert!(state.pending_save.is_none());
    assert_eq!(state.ui_mode, UiMode::Normal);
    assert!(state.notices.is_empty());
}

#[test]
fn test_sign_in_requires_both_fields() {
    let mut state = cloud_state();
    run(&mut state, Message::OpenSignIn);
    type_text(&mut state, "ada@example.com");
    assert!(press(&mut state, InputKey::Enter).is_empty());
    assert!(state.sign_in.error.is_some());
}

#[test]
fn test_sign_in_failure_visibility() {
    let mut state = cloud_state();
    run(
        &mut state,
        Message::SignInFailed {
            error: "cancelled".into(),
            visible: false,
        },
    );
    assert!(state.notices.is_empty());

    run(
        &mut state,
        Message::SignInFailed {
            error: "Domain not authorized".into(),
            visible: true,
        },
    );
    assert!(state
        .notices
        .latest()
        .is_some_and(|n| n.text.contains("Domain")));
}

#[test]
fn test_sign_in_succeeded_lists_layouts_once() {
    let mut state = cloud_state();
    let actions = run(
        &mut state,
        Message::SignInSucceeded {
            identity: identity("u1"),
        },
    );
    assert!(matches!(actions.as_slice(), [UpdateAction::ListLayouts]));

    // The subscription reports the same identity afterwards
    let actions = run(
        &mut state,
        Message::AuthStateChanged {
            identity: Some(identity("u1")),
        },
    );
    assert!(actions.is_empty());
}

#[test]
fn test_saved_then_list_refreshed() {
    let mut state = cloud_state();
    state.busy.saving = true;
    let actions = run(&mut state, Message::LayoutSaved { id: "doc1".into() });
    assert!(matches!(actions.as_slice(), [UpdateAction::ListLayouts]));
    assert!(!state.busy.saving);
    assert_eq!(
        state.notices.latest().map(|n| n.text.as_str()),
        Some(cloud::SAVE_SUCCESS)
    );
}

#[test]
fn test_save_failure_notice() {
    let mut state = cloud_state();
    run(
        &mut state,
        Message::LayoutSaveFailed {
            error: "PERMISSION_DENIED".into(),
        },
    );
    assert_eq!(
        state.notices.latest().map(|n| n.text.as_str()),
        Some(cloud::SAVE_FAILURE)
    );
}

#[test]
fn test_layouts_for_other_principal_are_discarded() {
    let mut state = cloud_state();
    state.identity = Some(identity("u1"));
    run(
        &mut state,
        Message::LayoutsListed {
            layouts: vec![record("a", "u1"), record("b", "u2")],
        },
    );
    assert_eq!(state.saved_layouts.len(), 1);
    assert_eq!(state.saved_layouts[0].id, "a");
}

#[test]
fn test_sign_out_clears_layouts() {
    let mut state = cloud_state();
    state.identity = Some(identity("u1"));
    state.saved_layouts = vec![record("a", "u1")];

    let actions = run(&mut state, Message::SignOut);
    assert!(matches!(actions.as_slice(), [UpdateAction::SignOut]));
    assert!(state.identity.is_none());
    assert!(state.saved_layouts.is_empty());
}

#[test]
fn test_load_saved_layout_from_settings() {
    let mut state = cloud_state();
    state.identity = Some(identity("u1"));
    state.saved_layouts = vec![record("a", "u1")];
    run(&mut state, Message::OpenSettings);
    // Presets, image path, sign out, refresh, then the layout
    for _ in 0..6 {
        press(&mut state, InputKey::Down);
    }
    press(&mut state, InputKey::Enter);

    assert_eq!(state.theme(), AppTheme::Custom);
    assert_eq!(
        state.custom_layout().map(|l| l.origin.clone()),
        Some(LayoutOrigin::Loaded {
            record_id: "a".into()
        })
    );
    assert_eq!(state.ui_mode, UiMode::Normal);
}

#[test]
fn test_saved_layout_loads_back_identical_markup() {
    let markup = "<section class=\"hero\">\n  <h1>Olá «mundo»</h1>\r\n</section>\n";
    let mut state = cloud_state();
    state.identity = Some(identity("u1"));
    state.show_custom(CustomLayout::generated(markup));

    run(&mut state, Message::OpenSaveDialog);
    let actions = run(&mut state, Message::SubmitSaveName);
    let (name, html) = match actions.as_slice() {
        [UpdateAction::SaveLayout { name, html }] => (name.clone(), html.clone()),
        other => panic!("unexpected {other:?}"),
    };
    assert_eq!(html, markup);

    run(&mut state, Message::LayoutSaved { id: "doc1".into() });
    run(
        &mut state,
        Message::LayoutsListed {
            layouts: vec![SavedLayout {
                id: "doc1".into(),
                user_id: "u1".into(),
                name,
                html,
                created_at: 1_700_000_000_000,
            }],
        },
    );
    run(&mut state, Message::SetTheme(AppTheme::Claude));
    assert!(state.custom_layout().is_none());

    run(&mut state, Message::LoadLayout { id: "doc1".into() });
    assert_eq!(state.theme(), AppTheme::Custom);
    assert_eq!(state.custom_layout().map(|l| l.markup.as_str()), Some(markup));
}

#[test]
fn test_delete_unknown_id_still_dispatched() {
    let mut state = cloud_state();
    state.identity = Some(identity("u1"));
    let actions = run(&mut state, Message::DeleteLayout { id: "ghost".into() });
    assert!(matches!(
        actions.as_slice(),
        [UpdateAction::DeleteLayout { id }] if id == "ghost"
    ));
}

#[test]
fn test_layout_deleted_updates_list() {
    let mut state = cloud_state();
    state.identity = Some(identity("u1"));
    state.saved_layouts = vec![record("a", "u1"), record("b", "u1")];
    let actions = run(&mut state, Message::LayoutDeleted { id: "a".into() });
    assert!(matches!(actions.as_slice(), [UpdateAction::ListLayouts]));
    assert_eq!(state.saved_layouts.len(), 1);
}

// ─────────────────────────────────────────────────────────────────────────────
// Export & notices
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_export_uses_custom_markup() {
    let mut state = with_custom_layout(normal_state());
    let actions = press(&mut state, InputKey::Char('e'));
    match actions.as_slice() {
        [UpdateAction::Export {
            title, fragment, ..
        }] => {
            assert_eq!(title, "OmniChat - Custom");
            assert_eq!(fragment, "<div>custom</div>");
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn test_export_preset_renders_transcript() {
    let mut state = normal_state();
    let actions = run(&mut state, Message::ExportLayout);
    match actions.as_slice() {
        [UpdateAction::Export { fragment, .. }] => {
            assert!(fragment.contains(AppTheme::Gemini.greeting()))
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn test_escape_dismisses_notice() {
    let mut state = normal_state();
    state.notices.info("hello");
    press(&mut state, InputKey::Esc);
    assert!(state.notices.is_empty());
}
