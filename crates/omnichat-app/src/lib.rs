//! omnichat-app - Application state and orchestration for OmniChat
//!
//! This crate implements the TEA (The Elm Architecture) pattern for state
//! management: the application state controller, the overlay injection
//! registry, the Engine that wires background workflows to the service
//! adapters, and configuration loading.

pub mod actions;
pub mod chat;
pub mod config;
pub mod credentials;
pub mod engine;
pub mod export;
pub mod handler;
pub mod input_key;
pub mod message;
pub mod notice;
pub mod overlay;
pub mod process;
pub mod settings_items;
pub mod signals;
pub mod state;
pub mod text_input;

// Re-export primary types
pub use engine::Engine;
pub use handler::{Task, UpdateAction, UpdateResult};
pub use input_key::InputKey;
pub use message::Message;
pub use state::{AppState, UiMode};
