//! Simulated chat handlers

use omnichat_core::AppTheme;

use crate::state::{AppState, FOLLOW_LATEST};

use super::{UpdateAction, UpdateResult};

pub fn handle_send(state: &mut AppState) -> UpdateResult {
    if state.theme() == AppTheme::Custom {
        return UpdateResult::none();
    }
    match state.chat.begin_send() {
        Some(_) => {
            state.scroll = FOLLOW_LATEST;
            UpdateResult::action(UpdateAction::SimulateReply {
                conversation: state.chat.conversation(),
                delay: state.reply_delay,
            })
        }
        None => UpdateResult::none(),
    }
}

pub fn handle_reply(state: &mut AppState, conversation: u64, text: String) -> UpdateResult {
    if state.chat.complete(conversation, text) {
        state.scroll = FOLLOW_LATEST;
    } else {
        tracing::debug!("Dropped stale reply for conversation {}", conversation);
    }
    UpdateResult::none()
}

pub fn handle_new_chat(state: &mut AppState) -> UpdateResult {
    let theme = state.theme();
    state.chat.reset(theme);
    state.scroll = 0;
    UpdateResult::none()
}
