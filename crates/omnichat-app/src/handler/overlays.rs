//! Overlay injection handlers

use omnichat_core::{widget_fallback, DynamicElement, ElementId, PresetWidget};
use tracing::warn;

use crate::settings_items::{clamp_selection, inject_items};
use crate::state::{AppState, UiMode};

use super::{Task, UpdateAction, UpdateResult};

pub fn handle_inject_preset(state: &mut AppState, kind: PresetWidget) -> UpdateResult {
    state.overlays.push(DynamicElement::new(kind.build()));
    state.close_to_normal();
    UpdateResult::none()
}

pub fn handle_submit_prompt(state: &mut AppState) -> UpdateResult {
    if state.busy.generating_widget {
        return UpdateResult::none();
    }
    let prompt = state.inject_menu.prompt.value().trim().to_string();
    if prompt.is_empty() {
        return UpdateResult::none();
    }
    state.busy.generating_widget = true;
    state.ui_mode = UiMode::InjectMenu;
    UpdateResult::action(UpdateAction::SpawnTask(Task::GenerateWidget { prompt }))
}

fn finish_widget(state: &mut AppState, markup: String) {
    state.busy.generating_widget = false;
    state.overlays.push(DynamicElement::raw(markup));
    state.inject_menu.prompt.clear();
    if matches!(state.ui_mode, UiMode::InjectMenu | UiMode::WidgetPromptInput) {
        state.close_to_normal();
    }
}

pub fn handle_widget_generated(state: &mut AppState, markup: String) -> UpdateResult {
    finish_widget(state, markup);
    UpdateResult::none()
}

/// Failures still inject an element carrying the error text
pub fn handle_widget_failed(state: &mut AppState, error: String) -> UpdateResult {
    warn!("Widget generation failed: {}", error);
    finish_widget(state, widget_fallback(&error));
    UpdateResult::none()
}

pub fn handle_remove(state: &mut AppState, id: ElementId) -> UpdateResult {
    if state.overlays.remove(id) {
        let len = inject_items(state).len();
        state.inject_menu.selected = clamp_selection(state.inject_menu.selected, len);
    }
    UpdateResult::none()
}

pub fn handle_dismiss_topmost(state: &mut AppState) -> UpdateResult {
    match state.overlays.topmost().map(|e| e.id) {
        Some(id) => handle_remove(state, id),
        None => UpdateResult::none(),
    }
}
