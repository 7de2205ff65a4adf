//! Identity: email/password sign-in and the auth-state session
//!
//! Sign-in goes through the Identity Toolkit REST API. The resulting
//! [`Session`] is published through an [`AuthSession`], which callers observe
//! with [`AuthSession::subscribe`] or read directly at the point of use.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tokio::task::JoinHandle;

use omnichat_core::prelude::*;
use omnichat_core::Identity;

use crate::http::{build_client, read_body, transport_error, ApiError};

pub const DEFAULT_AUTH_ENDPOINT: &str = "https://identitytoolkit.googleapis.com/v1";
pub const DEFAULT_ORIGIN: &str = "http://localhost";

/// A signed-in identity plus the bearer token for the document store
#[derive(Clone, PartialEq, Eq)]
pub struct Session {
    pub identity: Identity,
    pub id_token: String,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("identity", &self.identity)
            .field("id_token", &"<redacted>")
            .finish()
    }
}

/// Credential sign-in
#[trait_variant::make(IdentityProvider: Send)]
pub trait LocalIdentityProvider {
    async fn sign_in(&self, email: &str, password: &str) -> Result<Session>;
}

#[derive(Debug, Clone)]
pub struct AuthConfig {
    pub api_key: String,
    pub endpoint: String,
    /// Calling origin, sent as `Referer` and named in domain errors
    pub origin: String,
}

impl AuthConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            endpoint: DEFAULT_AUTH_ENDPOINT.to_string(),
            origin: DEFAULT_ORIGIN.to_string(),
        }
    }

    /// Host part of the origin, or the origin itself if it does not parse
    pub fn origin_host(&self) -> String {
        url::Url::parse(&self.origin)
            .ok()
            .and_then(|u| u.host_str().map(str::to_string))
            .unwrap_or_else(|| self.origin.clone())
    }
}

/// Identity Toolkit REST client
#[derive(Debug, Clone)]
pub struct IdentityClient {
    http: reqwest::Client,
    config: AuthConfig,
}

impl IdentityClient {
    pub fn new(config: AuthConfig) -> Result<Self> {
        Ok(Self {
            http: build_client()?,
            config,
        })
    }

    async fn call<B: Serialize, R: for<'de> Deserialize<'de>>(
        &self,
        method: &str,
        body: &B,
    ) -> Result<R> {
        let url = format!(
            "{}/accounts:{}",
            self.config.endpoint.trim_end_matches('/'),
            method
        );
        let response = self
            .http
            .post(&url)
            .query(&[("key", self.config.api_key.as_str())])
            .header(reqwest::header::REFERER, &self.config.origin)
            .json(body)
            .send()
            .await
            .map_err(transport_error)?;
        let body = read_body(response)
            .await
            .map_err(|e| map_auth_error(&e, &self.config.origin_host()))?;
        Ok(serde_json::from_str(&body)?)
    }
}

impl IdentityProvider for IdentityClient {
    async fn sign_in(&self, email: &str, password: &str) -> Result<Session> {
        let signed_in: SignInResponse = self
            .call(
                "signInWithPassword",
                &SignInRequest {
                    email,
                    password,
                    return_secure_token: true,
                },
            )
            .await?;

        // Display name and photo come from a follow-up lookup. Failure there
        // still leaves a usable session.
        let profile = match self
            .call::<_, LookupResponse>(
                "lookup",
                &LookupRequest {
                    id_token: &signed_in.id_token,
                },
            )
            .await
        {
            Ok(lookup) => lookup.users.into_iter().next(),
            Err(e) => {
                warn!("Account lookup failed: {}", e);
                None
            }
        };

        let identity = match profile {
            Some(user) => Identity {
                uid: user.local_id,
                display_name: user.display_name.or(signed_in.display_name),
                email: user.email.or(signed_in.email),
                photo_url: user.photo_url,
            },
            None => Identity {
                uid: signed_in.local_id,
                display_name: signed_in.display_name,
                email: signed_in.email,
                photo_url: None,
            },
        };
        info!("Signed in as {}", identity.uid);
        Ok(Session {
            identity,
            id_token: signed_in.id_token,
        })
    }
}

/// Map an Identity Toolkit error, recognising disallowed calling origins
pub fn map_auth_error(err: &ApiError, origin: &str) -> Error {
    let referrer_blocked = err.reasons().any(|r| r == "API_KEY_HTTP_REFERRER_BLOCKED")
        || err.message.contains("API_KEY_HTTP_REFERRER_BLOCKED")
        || (err.code == 403 && err.message.to_ascii_lowercase().contains("referer"));
    if err.message.starts_with("UNAUTHORIZED_DOMAIN") || referrer_blocked {
        Error::unauthorized_domain(origin)
    } else {
        Error::auth(err.message.clone())
    }
}

// ─────────────────────────────────────────────────────────────────
// Wire types
// ─────────────────────────────────────────────────────────────────

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SignInRequest<'a> {
    email: &'a str,
    password: &'a str,
    return_secure_token: bool,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SignInResponse {
    local_id: String,
    id_token: String,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    display_name: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct LookupRequest<'a> {
    id_token: &'a str,
}

#[derive(Deserialize, Default)]
struct LookupResponse {
    #[serde(default)]
    users: Vec<LookupUser>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct LookupUser {
    local_id: String,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    display_name: Option<String>,
    #[serde(default)]
    photo_url: Option<String>,
}

// ─────────────────────────────────────────────────────────────────
// Session + subscription
// ─────────────────────────────────────────────────────────────────

/// Current auth state, observable by any number of subscribers
#[derive(Debug, Clone)]
pub struct AuthSession {
    tx: Arc<watch::Sender<Option<Session>>>,
}

impl Default for AuthSession {
    fn default() -> Self {
        Self::new()
    }
}

impl AuthSession {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(None);
        Self { tx: Arc::new(tx) }
    }

    pub fn current(&self) -> Option<Session> {
        self.tx.borrow().clone()
    }

    pub fn identity(&self) -> Option<Identity> {
        self.tx.borrow().as_ref().map(|s| s.identity.clone())
    }

    pub fn set(&self, session: Session) {
        self.tx.send_replace(Some(session));
    }

    pub fn clear(&self) {
        if self.tx.send_replace(None).is_some() {
            info!("Signed out");
        }
    }

    /// Register a callback run with the current identity, then on every change.
    ///
    /// Requires a Tokio runtime. The callback runs on a background task until
    /// the returned subscription is unsubscribed or dropped.
    pub fn subscribe<F>(&self, callback: F) -> AuthSubscription
    where
        F: Fn(Option<Identity>) + Send + 'static,
    {
        let mut rx = self.tx.subscribe();
        let handle = tokio::spawn(async move {
            loop {
                let identity = rx.borrow_and_update().as_ref().map(|s| s.identity.clone());
                callback(identity);
                if rx.changed().await.is_err() {
                    break;
                }
            }
        });
        AuthSubscription {
            handle: Some(handle),
        }
    }
}

/// Handle for an auth-state callback registration
#[derive(Debug)]
pub struct AuthSubscription {
    handle: Option<JoinHandle<()>>,
}

impl AuthSubscription {
    /// Stop receiving updates. Safe to call more than once.
    pub fn unsubscribe(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }

    pub fn is_active(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }
}

impl Drop for AuthSubscription {
    fn drop(&mut self) {
        self.unsubscribe();
    }
}
