//! Onboarding handlers: API key entry and (simulated) verification

use crate::credentials::ApiKey;
use crate::state::{AppState, OnboardingStep, UiMode};

use super::{UpdateAction, UpdateResult};

pub const INVALID_KEY_MESSAGE: &str = "Please enter a valid API Key.";

pub fn handle_submit_api_key(state: &mut AppState) -> UpdateResult {
    let onboarding = &mut state.onboarding;
    if onboarding.verifying || onboarding.step != OnboardingStep::Credential {
        return UpdateResult::none();
    }
    if onboarding.key_input.value().trim().is_empty() {
        onboarding.error = Some(INVALID_KEY_MESSAGE.to_string());
        return UpdateResult::none();
    }
    onboarding.error = None;
    onboarding.verifying = true;
    UpdateResult::action(UpdateAction::VerifyApiKey)
}

pub fn handle_api_key_verified(state: &mut AppState) -> UpdateResult {
    if state.onboarding.verifying {
        state.onboarding.verifying = false;
        state.onboarding.step = OnboardingStep::Ready;
    }
    UpdateResult::none()
}

pub fn handle_complete(state: &mut AppState) -> UpdateResult {
    if state.onboarding.step != OnboardingStep::Ready {
        return UpdateResult::none();
    }
    let key = state.onboarding.key_input.value().trim().to_string();
    state.generative_ready = true;
    state.ui_mode = UiMode::Normal;
    tracing::info!("Onboarding complete");
    UpdateResult::action(UpdateAction::ConfigureGenerative {
        api_key: ApiKey::new(key),
    })
}
