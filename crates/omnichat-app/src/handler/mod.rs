//! Handler module - TEA update function and event handlers
//!
//! Organized into submodules:
//! - `update`: Main update() function and message dispatch
//! - `keys`: Key event handlers for UI modes
//! - `onboarding`: API key entry
//! - `navigation`: Focus, panels, menus and scrolling
//! - `layout`: Themes, reference image, generation and refinement, export
//! - `chat`: Simulated conversation
//! - `overlays`: Widget injection and removal
//! - `cloud`: Sign-in, save/list/delete of layouts

pub(crate) mod chat;
pub(crate) mod cloud;
pub(crate) mod keys;
pub(crate) mod layout;
pub(crate) mod navigation;
pub(crate) mod onboarding;
pub(crate) mod overlays;
pub(crate) mod update;

#[cfg(test)]
mod tests;

use std::path::PathBuf;
use std::time::Duration;

use omnichat_core::DataUri;

use crate::credentials::{ApiKey, Credentials};
use crate::message::Message;

pub use cloud::{SAVE_FAILURE, SAVE_SUCCESS, SIGN_IN_PROMPT};
pub use keys::handle_key;
pub use update::update;

/// A layout to save once sign-in completes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingSave {
    pub name: String,
    pub html: String,
}

/// Actions that the event loop should perform after update
#[derive(Debug, Clone)]
pub enum UpdateAction {
    /// Spawn a generative model task
    SpawnTask(Task),

    /// Simulated API key check
    VerifyApiKey,

    /// Build the generative client with this key
    ConfigureGenerative { api_key: ApiKey },

    /// Read and encode a reference image from disk
    LoadImage { path: PathBuf },

    /// Canned assistant reply after `delay`
    SimulateReply { conversation: u64, delay: Duration },

    /// Sign in, then save `then_save` with the fresh session
    SignIn {
        credentials: Credentials,
        then_save: Option<PendingSave>,
    },

    SignOut,

    SaveLayout { name: String, html: String },

    ListLayouts,

    /// Dispatched even for ids missing from the local list
    DeleteLayout { id: String },

    /// Write a standalone HTML page
    Export {
        title: String,
        fragment: String,
        directory: PathBuf,
    },
}

/// Generative model work run off the event loop
#[derive(Debug, Clone)]
pub enum Task {
    GenerateLayout { image: DataUri },
    RefineLayout {
        markup: String,
        instruction: String,
        /// Layout generation the refinement applies to
        generation: u64,
    },
    GenerateWidget { prompt: String },
}

/// Result of processing a message
#[derive(Debug, Default)]
pub struct UpdateResult {
    /// Optional follow-up message to process
    pub message: Option<Message>,
    /// Optional action for the event loop to perform
    pub action: Option<UpdateAction>,
}

impl UpdateResult {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn message(msg: Message) -> Self {
        Self {
            message: Some(msg),
            action: None,
        }
    }

    pub fn action(action: UpdateAction) -> Self {
        Self {
            message: None,
            action: Some(action),
        }
    }
}
