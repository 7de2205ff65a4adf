//! Core domain types

use chrono::{DateTime, Local, TimeZone};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Application lifecycle phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppPhase {
    #[default]
    Running,
    Quitting,
}

// ─────────────────────────────────────────────────────────────────
// Chat
// ─────────────────────────────────────────────────────────────────

/// Unique, time-ordered message identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MessageId(Uuid);

impl MessageId {
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }
}

impl Default for MessageId {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Model,
}

/// One turn in a simulated conversation
#[derive(Debug, Clone, PartialEq)]
pub struct ChatMessage {
    pub id: MessageId,
    pub role: Role,
    pub text: String,
    pub timestamp: DateTime<Local>,
}

impl ChatMessage {
    pub fn new(role: Role, text: impl Into<String>) -> Self {
        Self {
            id: MessageId::new(),
            role,
            text: text.into(),
            timestamp: Local::now(),
        }
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self::new(Role::User, text)
    }

    pub fn model(text: impl Into<String>) -> Self {
        Self::new(Role::Model, text)
    }

    pub fn is_user(&self) -> bool {
        self.role == Role::User
    }
}

// ─────────────────────────────────────────────────────────────────
// Identity & saved layouts
// ─────────────────────────────────────────────────────────────────

/// The signed-in principal
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub uid: String,
    pub display_name: Option<String>,
    pub email: Option<String>,
    pub photo_url: Option<String>,
}

impl Identity {
    /// Best human-readable label: display name, then email, then uid
    pub fn label(&self) -> &str {
        self.display_name
            .as_deref()
            .filter(|s| !s.is_empty())
            .or(self.email.as_deref().filter(|s| !s.is_empty()))
            .unwrap_or(&self.uid)
    }
}

/// A persisted custom layout
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedLayout {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub html: String,
    /// Unix epoch milliseconds
    pub created_at: i64,
}

impl SavedLayout {
    pub fn created_at_local(&self) -> Option<DateTime<Local>> {
        Local.timestamp_millis_opt(self.created_at).single()
    }
}

/// Where the currently displayed custom layout came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayoutOrigin {
    Generated,
    Refined,
    Loaded { record_id: String },
}

/// AI-generated full-page markup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomLayout {
    pub markup: String,
    pub origin: LayoutOrigin,
}

impl CustomLayout {
    pub fn generated(markup: impl Into<String>) -> Self {
        Self {
            markup: markup.into(),
            origin: LayoutOrigin::Generated,
        }
    }

    pub fn loaded(record: &SavedLayout) -> Self {
        Self {
            markup: record.html.clone(),
            origin: LayoutOrigin::Loaded {
                record_id: record.id.clone(),
            },
        }
    }
}
