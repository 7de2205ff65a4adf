//! Focus, panel and menu navigation handlers

use crate::input_key::InputKey;
use crate::message::Message;
use crate::settings_items::{
    clamp_selection, inject_items, selected_inject_item, selected_settings_item, settings_items,
    InjectItem, SettingsItem,
};
use crate::state::{AppState, UiMode};

use super::UpdateResult;

/// Lines moved by PageUp/PageDown
pub const PAGE_LINES: i32 = 10;

/// Route an editing key to the text field the current mode focuses
pub fn handle_edit_input(state: &mut AppState, key: InputKey) -> UpdateResult {
    match state.ui_mode {
        UiMode::Onboarding => {
            if state.onboarding.key_input.handle_key(key) {
                state.onboarding.error = None;
            }
        }
        UiMode::ChatInput => {
            state.chat.input.handle_key(key);
        }
        UiMode::RefineInput => {
            state.refine_input.handle_key(key);
        }
        UiMode::ImagePathInput => {
            state.settings_panel.image_path.handle_key(key);
        }
        UiMode::WidgetPromptInput => {
            state.inject_menu.prompt.handle_key(key);
        }
        UiMode::SaveName => {
            state.save_name.handle_key(key);
        }
        UiMode::SignIn => {
            if state.sign_in.focused_mut().handle_key(key) {
                state.sign_in.error = None;
            }
        }
        UiMode::Normal | UiMode::Settings | UiMode::InjectMenu | UiMode::ConfirmSignIn => {}
    }
    UpdateResult::none()
}

pub fn handle_focus_chat(state: &mut AppState) -> UpdateResult {
    if state.custom_layout().is_none() {
        state.ui_mode = UiMode::ChatInput;
    }
    UpdateResult::none()
}

pub fn handle_focus_refine(state: &mut AppState) -> UpdateResult {
    if state.custom_layout().is_some() {
        state.refine_open = true;
        state.ui_mode = UiMode::RefineInput;
    }
    UpdateResult::none()
}

pub fn handle_blur(state: &mut AppState) -> UpdateResult {
    state.close_to_normal();
    UpdateResult::none()
}

pub fn handle_toggle_refine_bar(state: &mut AppState) -> UpdateResult {
    if state.custom_layout().is_none() {
        return UpdateResult::none();
    }
    if state.refine_open {
        state.refine_open = false;
        if state.ui_mode == UiMode::RefineInput {
            state.close_to_normal();
        }
        UpdateResult::none()
    } else {
        handle_focus_refine(state)
    }
}

pub fn handle_scroll(state: &mut AppState, delta: i32) -> UpdateResult {
    let next = i32::from(state.scroll) + delta;
    state.scroll = next.clamp(0, i32::from(u16::MAX)) as u16;
    UpdateResult::none()
}

fn moved(selected: usize, delta: i32, len: usize) -> usize {
    let next = selected as i64 + i64::from(delta);
    clamp_selection(next.max(0) as usize, len)
}

// ─────────────────────────────────────────────────────────────────────────────
// Settings panel
// ─────────────────────────────────────────────────────────────────────────────

pub fn handle_open_settings(state: &mut AppState) -> UpdateResult {
    let len = settings_items(state).len();
    state.settings_panel.selected = clamp_selection(state.settings_panel.selected, len);
    state.ui_mode = UiMode::Settings;
    UpdateResult::none()
}

pub fn handle_close_settings(state: &mut AppState) -> UpdateResult {
    if !state.busy.generating_layout {
        state.close_to_normal();
    }
    UpdateResult::none()
}

pub fn handle_settings_move(state: &mut AppState, delta: i32) -> UpdateResult {
    let len = settings_items(state).len();
    state.settings_panel.selected = moved(state.settings_panel.selected, delta, len);
    UpdateResult::none()
}

pub fn handle_activate_settings_item(state: &mut AppState) -> UpdateResult {
    let Some(item) = selected_settings_item(state) else {
        return UpdateResult::none();
    };
    let msg = match item {
        SettingsItem::Preset(theme) => Message::SetTheme(theme),
        SettingsItem::ImagePath => Message::OpenImagePathInput,
        SettingsItem::GenerateUi => Message::GenerateLayout,
        SettingsItem::ClearImage => Message::ClearImage,
        SettingsItem::SignIn => Message::OpenSignIn,
        SettingsItem::SignOut => Message::SignOut,
        SettingsItem::RefreshLayouts => Message::RefreshLayouts,
        SettingsItem::SavedLayout(index) => match state.saved_layouts.get(index) {
            Some(record) => Message::LoadLayout {
                id: record.id.clone(),
            },
            None => return UpdateResult::none(),
        },
    };
    UpdateResult::message(msg)
}

pub fn handle_delete_selected_layout(state: &mut AppState) -> UpdateResult {
    match selected_settings_item(state) {
        Some(SettingsItem::SavedLayout(index)) => match state.saved_layouts.get(index) {
            Some(record) => UpdateResult::message(Message::DeleteLayout {
                id: record.id.clone(),
            }),
            None => UpdateResult::none(),
        },
        _ => UpdateResult::none(),
    }
}

pub fn handle_open_image_path(state: &mut AppState) -> UpdateResult {
    if !state.busy.generating_layout {
        state.ui_mode = UiMode::ImagePathInput;
    }
    UpdateResult::none()
}

// ─────────────────────────────────────────────────────────────────────────────
// Inject menu
// ─────────────────────────────────────────────────────────────────────────────

pub fn handle_open_inject_menu(state: &mut AppState) -> UpdateResult {
    let len = inject_items(state).len();
    state.inject_menu.selected = clamp_selection(state.inject_menu.selected, len);
    state.ui_mode = UiMode::InjectMenu;
    UpdateResult::none()
}

pub fn handle_close_inject_menu(state: &mut AppState) -> UpdateResult {
    state.close_to_normal();
    UpdateResult::none()
}

pub fn handle_inject_move(state: &mut AppState, delta: i32) -> UpdateResult {
    let len = inject_items(state).len();
    state.inject_menu.selected = moved(state.inject_menu.selected, delta, len);
    UpdateResult::none()
}

pub fn handle_activate_inject_item(state: &mut AppState) -> UpdateResult {
    match selected_inject_item(state) {
        Some(InjectItem::Preset(kind)) => UpdateResult::message(Message::InjectPreset(kind)),
        Some(InjectItem::CustomPrompt) => UpdateResult::message(Message::OpenWidgetPrompt),
        Some(InjectItem::Active(id)) => UpdateResult::message(Message::RemoveElement(id)),
        None => UpdateResult::none(),
    }
}

pub fn handle_remove_selected_element(state: &mut AppState) -> UpdateResult {
    match selected_inject_item(state) {
        Some(InjectItem::Active(id)) => UpdateResult::message(Message::RemoveElement(id)),
        _ => UpdateResult::none(),
    }
}

pub fn handle_open_widget_prompt(state: &mut AppState) -> UpdateResult {
    if !state.busy.generating_widget {
        state.ui_mode = UiMode::WidgetPromptInput;
    }
    UpdateResult::none()
}
