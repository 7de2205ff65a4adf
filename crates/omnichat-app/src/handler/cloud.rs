//! Cloud persistence handlers: save flow, sign-in, layout list

use omnichat_core::{CustomLayout, Error, Identity, SavedLayout};
use tracing::{error, info};

use crate::credentials::Credentials;
use crate::settings_items::{clamp_selection, settings_items};
use crate::state::{AppState, SignInField, UiMode, DEFAULT_LAYOUT_NAME};

use super::{PendingSave, UpdateAction, UpdateResult};

pub const SIGN_IN_PROMPT: &str = "You need to sign in to save layouts. Sign in now?";
pub const SAVE_SUCCESS: &str = "Layout saved successfully!";
pub const SAVE_FAILURE: &str = "Failed to save layout.";
const MISSING_CREDENTIALS: &str = "Enter email and password.";

// ─────────────────────────────────────────────────────────────────────────────
// Save flow
// ─────────────────────────────────────────────────────────────────────────────

pub fn handle_open_save_dialog(state: &mut AppState) -> UpdateResult {
    if state.custom_layout().is_none() || state.busy.saving {
        return UpdateResult::none();
    }
    if !state.cloud_enabled {
        state.notices.error(Error::CloudDisabled.to_string());
        return UpdateResult::none();
    }
    state.save_name.set(DEFAULT_LAYOUT_NAME);
    state.ui_mode = UiMode::SaveName;
    UpdateResult::none()
}

/// An empty name aborts without feedback
pub fn handle_submit_save_name(state: &mut AppState) -> UpdateResult {
    let name = state.save_name.take().trim().to_string();
    state.close_to_normal();
    if name.is_empty() {
        return UpdateResult::none();
    }
    let Some(layout) = state.custom_layout() else {
        return UpdateResult::none();
    };

    if state.is_signed_in() {
        let html = layout.markup.clone();
        state.busy.saving = true;
        UpdateResult::action(UpdateAction::SaveLayout { name, html })
    } else {
        state.pending_save = Some(name);
        state.ui_mode = UiMode::ConfirmSignIn;
        UpdateResult::none()
    }
}

pub fn handle_cancel_save(state: &mut AppState) -> UpdateResult {
    state.save_name.clear();
    state.close_to_normal();
    UpdateResult::none()
}

pub fn handle_confirm_sign_in(state: &mut AppState) -> UpdateResult {
    open_form(state, UiMode::Normal);
    UpdateResult::none()
}

/// Declining silently drops the pending save
pub fn handle_decline_sign_in(state: &mut AppState) -> UpdateResult {
    state.pending_save = None;
    state.close_to_normal();
    UpdateResult::none()
}

// ─────────────────────────────────────────────────────────────────────────────
// Sign-in
// ─────────────────────────────────────────────────────────────────────────────

fn open_form(state: &mut AppState, return_mode: UiMode) {
    let form = &mut state.sign_in;
    form.password.clear();
    form.error = None;
    form.focus = if form.email.is_empty() {
        SignInField::Email
    } else {
        SignInField::Password
    };
    form.return_mode = return_mode;
    state.ui_mode = UiMode::SignIn;
}

pub fn handle_open_sign_in(state: &mut AppState) -> UpdateResult {
    if !state.cloud_enabled || state.busy.signing_in {
        return UpdateResult::none();
    }
    state.pending_save = None;
    let return_mode = if state.ui_mode == UiMode::Settings {
        UiMode::Settings
    } else {
        UiMode::Normal
    };
    open_form(state, return_mode);
    UpdateResult::none()
}

pub fn handle_submit_sign_in(state: &mut AppState) -> UpdateResult {
    if state.busy.signing_in {
        return UpdateResult::none();
    }
    let email = state.sign_in.email.value().trim().to_string();
    if email.is_empty() || state.sign_in.password.is_empty() {
        state.sign_in.error = Some(MISSING_CREDENTIALS.to_string());
        return UpdateResult::none();
    }
    let credentials = Credentials::new(email, state.sign_in.password.take());

    let then_save = state.pending_save.take().and_then(|name| {
        state.custom_layout().map(|layout| PendingSave {
            name,
            html: layout.markup.clone(),
        })
    });

    state.busy.signing_in = true;
    state.busy.saving = then_save.is_some();
    state.ui_mode = state.sign_in.return_mode;
    UpdateResult::action(UpdateAction::SignIn {
        credentials,
        then_save,
    })
}

/// Cancelling is silent and drops any pending save
pub fn handle_cancel_sign_in(state: &mut AppState) -> UpdateResult {
    state.pending_save = None;
    state.sign_in.password.clear();
    state.sign_in.error = None;
    state.ui_mode = state.sign_in.return_mode;
    UpdateResult::none()
}

pub fn handle_sign_in_succeeded(state: &mut AppState, identity: Identity) -> UpdateResult {
    state.busy.signing_in = false;
    state
        .notices
        .success(format!("Signed in as {}", identity.label()));
    handle_auth_changed(state, Some(identity))
}

pub fn handle_sign_in_failed(state: &mut AppState, error: String, visible: bool) -> UpdateResult {
    state.busy.signing_in = false;
    state.busy.saving = false;
    if visible {
        state.notices.error(error);
    }
    UpdateResult::none()
}

/// Identity pushed by the auth subscription (or set by a sign-in result).
/// The layout list is refreshed when the principal changes.
pub fn handle_auth_changed(state: &mut AppState, identity: Option<Identity>) -> UpdateResult {
    let previous = state.identity.as_ref().map(|i| i.uid.clone());
    let next = identity.as_ref().map(|i| i.uid.clone());
    state.identity = identity;

    if previous == next {
        return UpdateResult::none();
    }
    state.saved_layouts.clear();
    match next {
        Some(_) => {
            state.layouts_loading = true;
            UpdateResult::action(UpdateAction::ListLayouts)
        }
        None => {
            state.layouts_loading = false;
            clamp_settings(state);
            UpdateResult::none()
        }
    }
}

pub fn handle_sign_out(state: &mut AppState) -> UpdateResult {
    if state.identity.is_none() {
        return UpdateResult::none();
    }
    state.identity = None;
    state.saved_layouts.clear();
    state.layouts_loading = false;
    clamp_settings(state);
    info!("Signing out");
    UpdateResult::action(UpdateAction::SignOut)
}

// ─────────────────────────────────────────────────────────────────────────────
// Layout records
// ─────────────────────────────────────────────────────────────────────────────

pub fn handle_layout_saved(state: &mut AppState, id: String) -> UpdateResult {
    state.busy.saving = false;
    info!("Layout saved as {}", id);
    state.notices.success(SAVE_SUCCESS);
    state.layouts_loading = true;
    UpdateResult::action(UpdateAction::ListLayouts)
}

pub fn handle_layout_save_failed(state: &mut AppState, error: String) -> UpdateResult {
    state.busy.saving = false;
    error!("Saving layout failed: {}", error);
    state.notices.error(SAVE_FAILURE);
    UpdateResult::none()
}

pub fn handle_refresh_layouts(state: &mut AppState) -> UpdateResult {
    if !state.is_signed_in() {
        return UpdateResult::none();
    }
    state.layouts_loading = true;
    UpdateResult::action(UpdateAction::ListLayouts)
}

pub fn handle_layouts_listed(state: &mut AppState, layouts: Vec<SavedLayout>) -> UpdateResult {
    state.layouts_loading = false;
    // A list for a principal that is no longer signed in is discarded
    let owner = state.identity.as_ref().map(|i| i.uid.as_str());
    state.saved_layouts = layouts
        .into_iter()
        .filter(|l| Some(l.user_id.as_str()) == owner)
        .collect();
    clamp_settings(state);
    UpdateResult::none()
}

pub fn handle_load_layout(state: &mut AppState, id: String) -> UpdateResult {
    let Some(record) = state.saved_layouts.iter().find(|l| l.id == id) else {
        return UpdateResult::none();
    };
    let layout = CustomLayout::loaded(record);
    state.notices.info(format!("Loaded \"{}\"", record.name));
    state.show_custom(layout);
    state.close_to_normal();
    UpdateResult::none()
}

/// Always dispatched, even for ids not in the local list
pub fn handle_delete_layout(state: &mut AppState, id: String) -> UpdateResult {
    if !state.is_signed_in() {
        return UpdateResult::none();
    }
    UpdateResult::action(UpdateAction::DeleteLayout { id })
}

pub fn handle_layout_deleted(state: &mut AppState, id: String) -> UpdateResult {
    state.saved_layouts.retain(|l| l.id != id);
    clamp_settings(state);
    state.notices.info("Layout deleted");
    state.layouts_loading = true;
    UpdateResult::action(UpdateAction::ListLayouts)
}

pub fn handle_layout_delete_failed(state: &mut AppState, error: String) -> UpdateResult {
    error!("Deleting layout failed: {}", error);
    state.notices.error(format!("Could not delete layout: {error}"));
    UpdateResult::none()
}

fn clamp_settings(state: &mut AppState) {
    let len = settings_items(state).len();
    state.settings_panel.selected = clamp_selection(state.settings_panel.selected, len);
}
