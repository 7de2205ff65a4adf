//! In-process fakes for the service traits
//!
//! Used by this crate's tests and, via the `test-helpers` feature, by the
//! controller's workflow tests. Nothing here touches the network.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use omnichat_core::prelude::*;
use omnichat_core::{strip_code_fences, DataUri, Identity, SavedLayout};

use crate::auth::{IdentityProvider, Session};
use crate::firestore::LayoutStore;
use crate::gemini::GenerativeBackend;

/// Creates a test session for `uid`
pub fn test_session(uid: &str) -> Session {
    Session {
        identity: Identity {
            uid: uid.to_string(),
            display_name: Some(format!("User {uid}")),
            email: Some(format!("{uid}@example.com")),
            photo_url: None,
        },
        id_token: format!("token-{uid}"),
    }
}

/// Generative backend returning a canned response (or a canned failure)
#[derive(Debug, Clone, Default)]
pub struct FakeGenerative {
    /// Raw model text; fences are stripped like the real client does
    pub response: Option<String>,
    pub calls: Arc<AtomicUsize>,
}

impl FakeGenerative {
    pub fn replying(text: &str) -> Self {
        Self {
            response: Some(text.to_string()),
            calls: Arc::default(),
        }
    }

    pub fn failing() -> Self {
        Self::default()
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn respond(&self) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.response
            .as_deref()
            .map(strip_code_fences)
            .ok_or_else(|| Error::generative("model unavailable"))
    }
}

impl GenerativeBackend for FakeGenerative {
    async fn generate_layout_from_image(&self, _image: &DataUri) -> Result<String> {
        self.respond()
    }

    async fn refine_markup(&self, _current: &str, _instruction: &str) -> Result<String> {
        self.respond()
    }

    async fn generate_widget(&self, _request: &str) -> Result<String> {
        self.respond()
    }
}

/// Identity provider accepting a single password
#[derive(Debug, Clone)]
pub struct FakeIdentity {
    pub password: String,
    pub error: Option<fn() -> Error>,
}

impl FakeIdentity {
    pub fn accepting(password: &str) -> Self {
        Self {
            password: password.to_string(),
            error: None,
        }
    }

    pub fn rejecting_with(error: fn() -> Error) -> Self {
        Self {
            password: String::new(),
            error: Some(error),
        }
    }
}

impl IdentityProvider for FakeIdentity {
    async fn sign_in(&self, email: &str, password: &str) -> Result<Session> {
        if let Some(make) = self.error {
            return Err(make());
        }
        if password != self.password {
            return Err(Error::auth("INVALID_LOGIN_CREDENTIALS"));
        }
        let uid = email.split('@').next().unwrap_or(email);
        Ok(test_session(uid))
    }
}

/// In-memory layout store
#[derive(Debug, Clone, Default)]
pub struct FakeLayoutStore {
    pub records: Arc<Mutex<Vec<SavedLayout>>>,
    pub delete_calls: Arc<Mutex<Vec<String>>>,
    pub fail_writes: bool,
    next_id: Arc<AtomicUsize>,
}

impl FakeLayoutStore {
    pub fn failing_writes() -> Self {
        Self {
            fail_writes: true,
            ..Default::default()
        }
    }

    pub fn len(&self) -> usize {
        self.records.lock().map(|r| r.len()).unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl LayoutStore for FakeLayoutStore {
    async fn save_layout(&self, session: &Session, name: &str, html: &str) -> Result<String> {
        if self.fail_writes {
            return Err(Error::store("PERMISSION_DENIED"));
        }
        let n = self.next_id.fetch_add(1, Ordering::SeqCst);
        let id = format!("doc{n}");
        let mut records = self
            .records
            .lock()
            .map_err(|_| Error::store("poisoned"))?;
        records.push(SavedLayout {
            id: id.clone(),
            user_id: session.identity.uid.clone(),
            name: name.to_string(),
            html: html.to_string(),
            created_at: n as i64,
        });
        Ok(id)
    }

    async fn list_layouts(&self, session: &Session) -> Vec<SavedLayout> {
        let Ok(records) = self.records.lock() else {
            return Vec::new();
        };
        let mut owned: Vec<_> = records
            .iter()
            .filter(|r| r.user_id == session.identity.uid)
            .cloned()
            .collect();
        owned.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        owned
    }

    async fn delete_layout(&self, _session: &Session, id: &str) -> Result<()> {
        if let Ok(mut calls) = self.delete_calls.lock() {
            calls.push(id.to_string());
        }
        if self.fail_writes {
            return Err(Error::store("PERMISSION_DENIED"));
        }
        if let Ok(mut records) = self.records.lock() {
            records.retain(|r| r.id != id);
        }
        Ok(())
    }
}
