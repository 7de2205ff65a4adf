//! Simulated conversation state

use omnichat_core::{AppTheme, ChatMessage};

use crate::text_input::TextInput;

/// Messages, the input field and the in-flight flag for one conversation.
///
/// Each reset starts a new conversation number so a reply that was in flight
/// when the user started a new chat is discarded instead of appended.
#[derive(Debug, Clone)]
pub struct ChatState {
    pub messages: Vec<ChatMessage>,
    pub input: TextInput,
    pending: bool,
    conversation: u64,
}

impl ChatState {
    /// A conversation seeded with the theme greeting
    pub fn new(theme: AppTheme) -> Self {
        Self {
            messages: vec![greeting(theme)],
            input: TextInput::new(),
            pending: false,
            conversation: 0,
        }
    }

    /// Start over with only the greeting
    pub fn reset(&mut self, theme: AppTheme) {
        self.messages = vec![greeting(theme)];
        self.input.clear();
        self.pending = false;
        self.conversation += 1;
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    pub fn conversation(&self) -> u64 {
        self.conversation
    }

    /// Append the typed message and mark a reply as pending.
    ///
    /// Returns `None`, leaving everything untouched, when the input is blank
    /// or a reply is already pending.
    pub fn begin_send(&mut self) -> Option<String> {
        if self.pending || self.input.value().trim().is_empty() {
            return None;
        }
        let text = self.input.take();
        self.messages.push(ChatMessage::user(text.clone()));
        self.pending = true;
        Some(text)
    }

    /// Append the reply for `conversation`. Stale replies are dropped.
    pub fn complete(&mut self, conversation: u64, reply: impl Into<String>) -> bool {
        if conversation != self.conversation || !self.pending {
            return false;
        }
        self.messages.push(ChatMessage::model(reply));
        self.pending = false;
        true
    }
}

fn greeting(theme: AppTheme) -> ChatMessage {
    ChatMessage::model(theme.greeting())
}

#[cfg(test)]
mod tests {
    use super::*;
    use omnichat_core::Role;

    fn typed(chat: &mut ChatState, text: &str) {
        chat.input.set(text);
    }

    #[test]
    fn test_new_chat_is_seeded_with_greeting() {
        let chat = ChatState::new(AppTheme::Claude);
        assert_eq!(chat.messages.len(), 1);
        assert_eq!(chat.messages[0].role, Role::Model);
        assert_eq!(chat.messages[0].text, AppTheme::Claude.greeting());
    }

    #[test]
    fn test_blank_input_is_not_sent() {
        let mut chat = ChatState::new(AppTheme::Gemini);
        typed(&mut chat, "   ");
        assert!(chat.begin_send().is_none());
        assert_eq!(chat.messages.len(), 1);
        assert!(!chat.is_pending());
    }

    #[test]
    fn test_second_send_while_pending_is_rejected() {
        let mut chat = ChatState::new(AppTheme::Gemini);
        typed(&mut chat, "first");
        assert_eq!(chat.begin_send().as_deref(), Some("first"));
        typed(&mut chat, "second");
        assert!(chat.begin_send().is_none());
        assert_eq!(chat.messages.len(), 2);
        assert_eq!(chat.input.value(), "second");

        assert!(chat.complete(chat.conversation(), "ok"));
        assert_eq!(chat.begin_send().as_deref(), Some("second"));
        assert_eq!(chat.messages.len(), 4);
    }

    #[test]
    fn test_reply_after_reset_is_dropped() {
        let mut chat = ChatState::new(AppTheme::Gemini);
        typed(&mut chat, "hello");
        chat.begin_send();
        let old = chat.conversation();
        chat.reset(AppTheme::ChatGPT);

        assert!(!chat.complete(old, "late"));
        assert_eq!(chat.messages.len(), 1);
        assert_eq!(chat.messages[0].text, AppTheme::ChatGPT.greeting());
        assert!(!chat.is_pending());
    }
}
