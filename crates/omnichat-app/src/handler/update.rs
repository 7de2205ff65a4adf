//! Main update function - handles state transitions (TEA pattern)

use std::time::Instant;

use omnichat_core::AppPhase;

use crate::message::Message;
use crate::state::AppState;

use super::{
    chat, cloud, keys::handle_key, layout, navigation, onboarding, overlays, UpdateResult,
};

/// Process a message and update state
/// Returns optional follow-up message and/or action
pub fn update(state: &mut AppState, message: Message) -> UpdateResult {
    match message {
        Message::Quit => {
            state.phase = AppPhase::Quitting;
            UpdateResult::none()
        }

        Message::Key(key) => {
            if let Some(msg) = handle_key(state, key) {
                UpdateResult::message(msg)
            } else {
                UpdateResult::none()
            }
        }

        Message::EditInput(key) => navigation::handle_edit_input(state, key),

        Message::Tick => {
            state.tick_spinner();
            state.notices.expire(Instant::now());
            UpdateResult::none()
        }

        // ─────────────────────────────────────────────────────────
        // Onboarding
        // ─────────────────────────────────────────────────────────
        Message::SubmitApiKey => onboarding::handle_submit_api_key(state),
        Message::ApiKeyVerified => onboarding::handle_api_key_verified(state),
        Message::CompleteOnboarding => onboarding::handle_complete(state),

        // ─────────────────────────────────────────────────────────
        // Navigation
        // ─────────────────────────────────────────────────────────
        Message::FocusChat => navigation::handle_focus_chat(state),
        Message::FocusRefine => navigation::handle_focus_refine(state),
        Message::BlurInput => navigation::handle_blur(state),
        Message::ToggleRefineBar => navigation::handle_toggle_refine_bar(state),
        Message::ScrollUp => navigation::handle_scroll(state, -1),
        Message::ScrollDown => navigation::handle_scroll(state, 1),
        Message::PageUp => navigation::handle_scroll(state, -navigation::PAGE_LINES),
        Message::PageDown => navigation::handle_scroll(state, navigation::PAGE_LINES),

        Message::OpenSettings => navigation::handle_open_settings(state),
        Message::CloseSettings => navigation::handle_close_settings(state),
        Message::SettingsUp => navigation::handle_settings_move(state, -1),
        Message::SettingsDown => navigation::handle_settings_move(state, 1),
        Message::ActivateSettingsItem => navigation::handle_activate_settings_item(state),
        Message::DeleteSelectedLayout => navigation::handle_delete_selected_layout(state),
        Message::OpenImagePathInput => navigation::handle_open_image_path(state),

        Message::OpenInjectMenu => navigation::handle_open_inject_menu(state),
        Message::CloseInjectMenu => navigation::handle_close_inject_menu(state),
        Message::InjectUp => navigation::handle_inject_move(state, -1),
        Message::InjectDown => navigation::handle_inject_move(state, 1),
        Message::ActivateInjectItem => navigation::handle_activate_inject_item(state),
        Message::RemoveSelectedElement => navigation::handle_remove_selected_element(state),
        Message::OpenWidgetPrompt => navigation::handle_open_widget_prompt(state),

        // ─────────────────────────────────────────────────────────
        // Themes & Layouts
        // ─────────────────────────────────────────────────────────
        Message::SetTheme(theme) => layout::handle_set_theme(state, theme),
        Message::LoadImage { path } => layout::handle_load_image(state, path),
        Message::ImageLoaded { path, data } => layout::handle_image_loaded(state, path, data),
        Message::ImageLoadFailed { path, error } => {
            layout::handle_image_load_failed(state, path, error)
        }
        Message::ClearImage => layout::handle_clear_image(state),
        Message::GenerateLayout => layout::handle_generate(state),
        Message::LayoutGenerated { markup } => layout::handle_generated(state, markup),
        Message::LayoutGenerationFailed { error } => {
            layout::handle_generation_failed(state, error)
        }
        Message::SubmitRefine => layout::handle_submit_refine(state),
        Message::LayoutRefined { generation, markup } => {
            layout::handle_refined(state, generation, markup)
        }
        Message::RefineFailed { error } => layout::handle_refine_failed(state, error),
        Message::ExportLayout => layout::handle_export(state),
        Message::Exported { path } => layout::handle_exported(state, path),
        Message::ExportFailed { error } => layout::handle_export_failed(state, error),

        // ─────────────────────────────────────────────────────────
        // Chat
        // ─────────────────────────────────────────────────────────
        Message::SendChat => chat::handle_send(state),
        Message::ChatReplyReceived { conversation, text } => {
            chat::handle_reply(state, conversation, text)
        }
        Message::NewChat => chat::handle_new_chat(state),

        // ─────────────────────────────────────────────────────────
        // Overlays
        // ─────────────────────────────────────────────────────────
        Message::InjectPreset(kind) => overlays::handle_inject_preset(state, kind),
        Message::SubmitWidgetPrompt => overlays::handle_submit_prompt(state),
        Message::WidgetGenerated { markup } => overlays::handle_widget_generated(state, markup),
        Message::WidgetGenerationFailed { error } => {
            overlays::handle_widget_failed(state, error)
        }
        Message::RemoveElement(id) => overlays::handle_remove(state, id),
        Message::DismissTopmost => overlays::handle_dismiss_topmost(state),

        // ─────────────────────────────────────────────────────────
        // Cloud persistence
        // ─────────────────────────────────────────────────────────
        Message::OpenSaveDialog => cloud::handle_open_save_dialog(state),
        Message::SubmitSaveName => cloud::handle_submit_save_name(state),
        Message::CancelSave => cloud::handle_cancel_save(state),
        Message::ConfirmSignIn => cloud::handle_confirm_sign_in(state),
        Message::DeclineSignIn => cloud::handle_decline_sign_in(state),
        Message::OpenSignIn => cloud::handle_open_sign_in(state),
        Message::SignInNextField => {
            state.sign_in.toggle_focus();
            UpdateResult::none()
        }
        Message::SubmitSignIn => cloud::handle_submit_sign_in(state),
        Message::CancelSignIn => cloud::handle_cancel_sign_in(state),
        Message::SignInSucceeded { identity } => cloud::handle_sign_in_succeeded(state, identity),
        Message::SignInFailed { error, visible } => {
            cloud::handle_sign_in_failed(state, error, visible)
        }
        Message::AuthStateChanged { identity } => cloud::handle_auth_changed(state, identity),
        Message::SignOut => cloud::handle_sign_out(state),
        Message::LayoutSaved { id } => cloud::handle_layout_saved(state, id),
        Message::LayoutSaveFailed { error } => cloud::handle_layout_save_failed(state, error),
        Message::RefreshLayouts => cloud::handle_refresh_layouts(state),
        Message::LayoutsListed { layouts } => cloud::handle_layouts_listed(state, layouts),
        Message::LoadLayout { id } => cloud::handle_load_layout(state, id),
        Message::DeleteLayout { id } => cloud::handle_delete_layout(state, id),
        Message::LayoutDeleted { id } => cloud::handle_layout_deleted(state, id),
        Message::LayoutDeleteFailed { error } => cloud::handle_layout_delete_failed(state, error),

        Message::DismissNotice => {
            state.notices.dismiss();
            UpdateResult::none()
        }
    }
}
