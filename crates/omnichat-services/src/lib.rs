//! # omnichat-services - External Service Adapters
//!
//! Thin adapters over the generative model and the identity/document-store
//! backends, plus the local simulated chat reply.
//!
//! Depends on [`omnichat_core`] for domain types and error handling.
//!
//! ## Public API
//!
//! ### Generative Client Adapter
//! - [`GenerativeClient`] - Gemini REST client, an explicit context object
//! - [`GenerativeBackend`] - Trait seam for the three generation operations
//! - [`simulated_reply()`] - Canned chat reply after a fixed delay
//!
//! ### Cloud Persistence Adapter
//! - [`IdentityClient`] / [`IdentityProvider`] - Email/password sign-in
//! - [`AuthSession`] / [`AuthSubscription`] - Observable auth state
//! - [`FirestoreClient`] / [`LayoutStore`] - Saved layout CRUD

pub mod auth;
pub mod firestore;
pub mod gemini;
pub mod http;
pub mod simulated;
#[cfg(any(test, feature = "test-helpers"))]
pub mod test_utils;

pub use auth::{
    map_auth_error, AuthConfig, AuthSession, AuthSubscription, IdentityClient, IdentityProvider,
    LocalIdentityProvider, Session,
};
pub use firestore::{FirestoreClient, LayoutStore, LocalLayoutStore, StoreConfig};
pub use gemini::{GeminiConfig, GenerativeBackend, GenerativeClient, LocalGenerativeBackend};
pub use simulated::{simulated_reply, SIMULATED_RESPONSES};
