//! Key event handlers for different UI modes

use omnichat_core::AppTheme;

use crate::input_key::InputKey;
use crate::message::Message;
use crate::state::{AppState, OnboardingStep, UiMode};

/// Convert key events to messages based on current UI mode
pub fn handle_key(state: &AppState, key: InputKey) -> Option<Message> {
    if key.is_force_quit() {
        return Some(Message::Quit);
    }

    match state.ui_mode {
        UiMode::Onboarding => handle_key_onboarding(state, key),
        UiMode::Normal => handle_key_normal(state, key),
        UiMode::ChatInput => handle_key_text(key, Message::SendChat, Message::BlurInput),
        UiMode::RefineInput => handle_key_text(key, Message::SubmitRefine, Message::BlurInput),
        UiMode::Settings => handle_key_settings(state, key),
        UiMode::ImagePathInput => handle_key_image_path(state, key),
        UiMode::InjectMenu => handle_key_inject_menu(key),
        UiMode::WidgetPromptInput => {
            handle_key_text(key, Message::SubmitWidgetPrompt, Message::OpenInjectMenu)
        }
        UiMode::SaveName => handle_key_text(key, Message::SubmitSaveName, Message::CancelSave),
        UiMode::ConfirmSignIn => handle_key_confirm_sign_in(key),
        UiMode::SignIn => handle_key_sign_in(key),
    }
}

/// Shared handling for single-line inputs: Enter submits, Esc leaves
fn handle_key_text(key: InputKey, submit: Message, cancel: Message) -> Option<Message> {
    match key {
        InputKey::Enter => Some(submit),
        InputKey::Esc => Some(cancel),
        other => editing_key(other),
    }
}

fn editing_key(key: InputKey) -> Option<Message> {
    match key {
        InputKey::Backspace
        | InputKey::Delete
        | InputKey::Left
        | InputKey::Right
        | InputKey::Home
        | InputKey::End
        | InputKey::CharCtrl('a' | 'e' | 'u') => Some(Message::EditInput(key)),
        other => other.typed_char().map(|_| Message::EditInput(other)),
    }
}

fn handle_key_onboarding(state: &AppState, key: InputKey) -> Option<Message> {
    match state.onboarding.step {
        OnboardingStep::Credential => {
            if state.onboarding.verifying {
                return None;
            }
            match key {
                InputKey::Enter => Some(Message::SubmitApiKey),
                InputKey::Esc => Some(Message::Quit),
                other => editing_key(other),
            }
        }
        OnboardingStep::Ready => match key {
            InputKey::Enter => Some(Message::CompleteOnboarding),
            InputKey::Esc => Some(Message::Quit),
            _ => None,
        },
    }
}

fn handle_key_normal(state: &AppState, key: InputKey) -> Option<Message> {
    // A modal overlay swallows everything but dismissal, the inject menu and quit
    let modal_open = state
        .overlays
        .topmost()
        .is_some_and(|e| e.kind.is_modal());
    if modal_open {
        return match key {
            InputKey::Enter | InputKey::Esc | InputKey::Char('x') => Some(Message::DismissTopmost),
            InputKey::Char('a' | '+') => Some(Message::OpenInjectMenu),
            InputKey::Char('q') => Some(Message::Quit),
            _ => None,
        };
    }

    match key {
        InputKey::Char('q') => Some(Message::Quit),

        InputKey::Char('i') | InputKey::Enter => {
            if state.theme() == AppTheme::Custom {
                Some(Message::FocusRefine)
            } else {
                Some(Message::FocusChat)
            }
        }

        InputKey::Char('s') => Some(Message::OpenSettings),
        InputKey::Char('a' | '+') => Some(Message::OpenInjectMenu),
        InputKey::Char('n') => Some(Message::NewChat),
        InputKey::Char('r') => Some(Message::ToggleRefineBar),
        InputKey::Char('w') | InputKey::CharCtrl('s') => Some(Message::OpenSaveDialog),
        InputKey::Char('e') => Some(Message::ExportLayout),
        InputKey::Char('x') => Some(Message::DismissTopmost),

        InputKey::Char('1') => Some(Message::SetTheme(AppTheme::Gemini)),
        InputKey::Char('2') => Some(Message::SetTheme(AppTheme::ChatGPT)),
        InputKey::Char('3') => Some(Message::SetTheme(AppTheme::Claude)),

        InputKey::Up | InputKey::Char('k') => Some(Message::ScrollUp),
        InputKey::Down | InputKey::Char('j') => Some(Message::ScrollDown),
        InputKey::PageUp => Some(Message::PageUp),
        InputKey::PageDown => Some(Message::PageDown),

        InputKey::Esc => Some(Message::DismissNotice),
        _ => None,
    }
}

fn handle_key_settings(state: &AppState, key: InputKey) -> Option<Message> {
    match key {
        InputKey::Up | InputKey::Char('k') => Some(Message::SettingsUp),
        InputKey::Down | InputKey::Char('j') | InputKey::Tab => Some(Message::SettingsDown),
        InputKey::BackTab => Some(Message::SettingsUp),
        InputKey::Enter | InputKey::Char(' ') => Some(Message::ActivateSettingsItem),
        InputKey::Char('d') | InputKey::Delete => Some(Message::DeleteSelectedLayout),
        InputKey::Char('g') => Some(Message::GenerateLayout),
        InputKey::Char('o') => Some(Message::OpenImagePathInput),
        InputKey::Esc | InputKey::Char('q' | 's') => {
            // Generation keeps the panel open until it finishes
            if state.busy.generating_layout {
                None
            } else {
                Some(Message::CloseSettings)
            }
        }
        _ => None,
    }
}

fn handle_key_image_path(state: &AppState, key: InputKey) -> Option<Message> {
    match key {
        InputKey::Enter => Some(Message::LoadImage {
            path: state.settings_panel.image_path.value().trim().into(),
        }),
        InputKey::Esc => Some(Message::OpenSettings),
        other => editing_key(other),
    }
}

fn handle_key_inject_menu(key: InputKey) -> Option<Message> {
    match key {
        InputKey::Up | InputKey::Char('k') => Some(Message::InjectUp),
        InputKey::Down | InputKey::Char('j') | InputKey::Tab => Some(Message::InjectDown),
        InputKey::BackTab => Some(Message::InjectUp),
        InputKey::Enter | InputKey::Char(' ') => Some(Message::ActivateInjectItem),
        InputKey::Char('d') | InputKey::Delete | InputKey::Backspace => {
            Some(Message::RemoveSelectedElement)
        }
        InputKey::Char('p') => Some(Message::OpenWidgetPrompt),
        InputKey::Esc | InputKey::Char('q' | 'a') => Some(Message::CloseInjectMenu),
        _ => None,
    }
}

fn handle_key_confirm_sign_in(key: InputKey) -> Option<Message> {
    match key {
        InputKey::Char('y' | 'Y') | InputKey::Enter => Some(Message::ConfirmSignIn),
        InputKey::Char('n' | 'N') | InputKey::Esc => Some(Message::DeclineSignIn),
        _ => None,
    }
}

fn handle_key_sign_in(key: InputKey) -> Option<Message> {
    match key {
        InputKey::Tab | InputKey::BackTab | InputKey::Up | InputKey::Down => {
            Some(Message::SignInNextField)
        }
        InputKey::Enter => Some(Message::SubmitSignIn),
        InputKey::Esc => Some(Message::CancelSignIn),
        other => editing_key(other),
    }
}
