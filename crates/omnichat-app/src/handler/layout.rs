//! Theme, reference image, layout generation/refinement and export handlers

use std::path::PathBuf;

use omnichat_core::{AppTheme, CustomLayout, DataUri, LayoutOrigin, LAYOUT_FALLBACK};
use tracing::{debug, error, warn};

use crate::export::transcript_fragment;
use crate::state::{AppState, LoadedImage, UiMode};

use super::{Task, UpdateAction, UpdateResult};

pub fn handle_set_theme(state: &mut AppState, theme: AppTheme) -> UpdateResult {
    if state.busy.generating_layout {
        return UpdateResult::none();
    }
    if state.set_preset(theme) && state.ui_mode == UiMode::RefineInput {
        state.close_to_normal();
    }
    UpdateResult::none()
}

// ─────────────────────────────────────────────────────────────────────────────
// Reference image
// ─────────────────────────────────────────────────────────────────────────────

pub fn handle_load_image(state: &mut AppState, path: PathBuf) -> UpdateResult {
    state.ui_mode = UiMode::Settings;
    if path.as_os_str().is_empty() || state.settings_panel.loading_image {
        return UpdateResult::none();
    }
    state.settings_panel.loading_image = true;
    UpdateResult::action(UpdateAction::LoadImage { path })
}

pub fn handle_image_loaded(state: &mut AppState, path: PathBuf, data: DataUri) -> UpdateResult {
    state.settings_panel.loading_image = false;
    state.settings_panel.image = Some(LoadedImage { path, data });
    UpdateResult::none()
}

pub fn handle_image_load_failed(state: &mut AppState, path: PathBuf, error: String) -> UpdateResult {
    state.settings_panel.loading_image = false;
    warn!("Could not read image {}: {}", path.display(), error);
    state.notices.error(format!("Could not read image: {error}"));
    UpdateResult::none()
}

pub fn handle_clear_image(state: &mut AppState) -> UpdateResult {
    if !state.busy.generating_layout {
        state.settings_panel.image = None;
        state.settings_panel.image_path.clear();
    }
    UpdateResult::none()
}

// ─────────────────────────────────────────────────────────────────────────────
// Generation
// ─────────────────────────────────────────────────────────────────────────────

pub fn handle_generate(state: &mut AppState) -> UpdateResult {
    if state.busy.generating_layout {
        return UpdateResult::none();
    }
    let Some(image) = state.settings_panel.image.as_ref() else {
        return UpdateResult::none();
    };
    state.busy.generating_layout = true;
    UpdateResult::action(UpdateAction::SpawnTask(Task::GenerateLayout {
        image: image.data.clone(),
    }))
}

fn finish_generation(state: &mut AppState, markup: String) {
    state.busy.generating_layout = false;
    state.show_custom(CustomLayout::generated(markup));
    if matches!(state.ui_mode, UiMode::Settings | UiMode::ImagePathInput) {
        state.close_to_normal();
    }
}

pub fn handle_generated(state: &mut AppState, markup: String) -> UpdateResult {
    finish_generation(state, markup);
    UpdateResult::none()
}

pub fn handle_generation_failed(state: &mut AppState, error: String) -> UpdateResult {
    error!("Layout generation failed: {}", error);
    finish_generation(state, LAYOUT_FALLBACK.to_string());
    UpdateResult::none()
}

// ─────────────────────────────────────────────────────────────────────────────
// Refinement
// ─────────────────────────────────────────────────────────────────────────────

pub fn handle_submit_refine(state: &mut AppState) -> UpdateResult {
    if state.busy.refining {
        return UpdateResult::none();
    }
    let instruction = state.refine_input.value().trim().to_string();
    if instruction.is_empty() {
        return UpdateResult::none();
    }
    let Some(layout) = state.custom_layout() else {
        return UpdateResult::none();
    };
    let markup = layout.markup.clone();
    state.busy.refining = true;
    UpdateResult::action(UpdateAction::SpawnTask(Task::RefineLayout {
        markup,
        instruction,
        generation: state.layout_generation(),
    }))
}

/// Applies only to the layout the refinement started from
pub fn handle_refined(state: &mut AppState, generation: u64, markup: String) -> UpdateResult {
    state.busy.refining = false;
    if generation != state.layout_generation() {
        debug!("Dropping refinement of a replaced layout");
        return UpdateResult::none();
    }
    if let Some(layout) = state.custom_layout_mut() {
        layout.markup = markup;
        layout.origin = LayoutOrigin::Refined;
        state.refine_input.clear();
        if state.ui_mode == UiMode::RefineInput {
            state.close_to_normal();
        }
    }
    UpdateResult::none()
}

/// The current layout stays as it was
pub fn handle_refine_failed(state: &mut AppState, error: String) -> UpdateResult {
    state.busy.refining = false;
    warn!("Refinement failed: {}", error);
    state.notices.error(format!("Refinement failed: {error}"));
    UpdateResult::none()
}

// ─────────────────────────────────────────────────────────────────────────────
// Export
// ─────────────────────────────────────────────────────────────────────────────

pub fn handle_export(state: &mut AppState) -> UpdateResult {
    let theme = state.theme();
    let fragment = match state.custom_layout() {
        Some(layout) => layout.markup.clone(),
        None => transcript_fragment(theme, &state.chat.messages),
    };
    UpdateResult::action(UpdateAction::Export {
        title: format!("OmniChat - {}", theme.name()),
        fragment,
        directory: state.export_dir.clone(),
    })
}

pub fn handle_exported(state: &mut AppState, path: PathBuf) -> UpdateResult {
    state
        .notices
        .success(format!("Exported to {}", path.display()));
    UpdateResult::none()
}

pub fn handle_export_failed(state: &mut AppState, error: String) -> UpdateResult {
    state.notices.error(format!("Could not export UI: {error}"));
    UpdateResult::none()
}
