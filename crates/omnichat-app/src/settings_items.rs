//! Selectable rows of the settings panel and the inject menu.
//!
//! Built from state on demand and used by both the key handler (to resolve
//! the selected row) and the TUI widgets (to render the list).

use omnichat_core::{AppTheme, ElementId, PresetWidget};

use crate::state::AppState;

/// A row in the settings panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsItem {
    /// Switch to a preset theme
    Preset(AppTheme),
    /// Edit the reference image path
    ImagePath,
    /// Generate a layout from the loaded image
    GenerateUi,
    ClearImage,
    SignIn,
    SignOut,
    RefreshLayouts,
    /// Saved layout at this index of `AppState::saved_layouts`
    SavedLayout(usize),
}

/// Rows shown in the settings panel for the current state
pub fn settings_items(state: &AppState) -> Vec<SettingsItem> {
    let mut items: Vec<SettingsItem> = AppTheme::presets()
        .into_iter()
        .map(SettingsItem::Preset)
        .collect();

    items.push(SettingsItem::ImagePath);
    if state.settings_panel.image.is_some() {
        items.push(SettingsItem::GenerateUi);
        items.push(SettingsItem::ClearImage);
    }

    if state.cloud_enabled {
        if state.is_signed_in() {
            items.push(SettingsItem::SignOut);
            items.push(SettingsItem::RefreshLayouts);
            items.extend((0..state.saved_layouts.len()).map(SettingsItem::SavedLayout));
        } else {
            items.push(SettingsItem::SignIn);
        }
    }
    items
}

pub fn selected_settings_item(state: &AppState) -> Option<SettingsItem> {
    settings_items(state)
        .get(state.settings_panel.selected)
        .copied()
}

/// A row in the inject menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InjectItem {
    Preset(PresetWidget),
    /// Describe a widget for the model to generate
    CustomPrompt,
    /// An injected element that can be removed
    Active(ElementId),
}

pub fn inject_items(state: &AppState) -> Vec<InjectItem> {
    PresetWidget::ALL
        .into_iter()
        .map(InjectItem::Preset)
        .chain(std::iter::once(InjectItem::CustomPrompt))
        .chain(state.overlays.iter().map(|e| InjectItem::Active(e.id)))
        .collect()
}

pub fn selected_inject_item(state: &AppState) -> Option<InjectItem> {
    inject_items(state).get(state.inject_menu.selected).copied()
}

/// Keep a selection index inside a list of `len` rows
pub fn clamp_selection(selected: usize, len: usize) -> usize {
    selected.min(len.saturating_sub(1))
}
