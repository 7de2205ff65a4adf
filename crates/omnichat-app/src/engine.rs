//! Engine - orchestration state shared with the TUI runner
//!
//! Owns the message channel, the shutdown signal, the external service
//! clients and the auth subscription that feeds identity changes back into
//! the update loop.

use std::path::PathBuf;

use tokio::sync::{mpsc, watch};
use tracing::{info, warn};

use omnichat_core::Identity;
use omnichat_services::AuthSubscription;

use crate::actions::Services;
use crate::config::{self, Settings};
use crate::message::Message;
use crate::process;
use crate::signals;
use crate::state::AppState;

/// Capacity of the unified message channel
pub const MESSAGE_CHANNEL_CAPACITY: usize = 256;

/// Orchestration engine for OmniChat.
///
/// Must be created inside a Tokio runtime: construction spawns the signal
/// handler and the auth subscription task.
pub struct Engine {
    /// TEA application state (the Model)
    pub state: AppState,

    /// Sender half of the unified message channel.
    /// Clone this to give to input sources.
    pub msg_tx: mpsc::Sender<Message>,

    /// Receiver half of the unified message channel.
    pub msg_rx: mpsc::Receiver<Message>,

    /// Send `true` to stop background tasks
    pub shutdown_tx: watch::Sender<bool>,
    pub shutdown_rx: watch::Receiver<bool>,

    pub settings: Settings,

    /// Config file that remembers the last preset theme on shutdown
    config_path: Option<PathBuf>,

    services: Services,
    auth_subscription: AuthSubscription,
}

impl Engine {
    /// Create the engine from loaded settings and the resolved API key
    pub fn new(settings: Settings, api_key: Option<String>) -> Self {
        let state = AppState::with_settings(&settings, api_key.as_deref());

        let (msg_tx, msg_rx) = mpsc::channel::<Message>(MESSAGE_CHANNEL_CAPACITY);
        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        signals::spawn_signal_handler(msg_tx.clone());

        let mut services = Services::from_settings(&settings);
        if state.generative_ready {
            if let Some(key) = api_key.as_deref() {
                if let Err(e) = services.configure_generative(key) {
                    warn!("Could not create generative client: {}", e);
                }
            }
        }

        let auth_tx = msg_tx.clone();
        let auth_subscription = services.auth.subscribe(move |identity| {
            forward_identity(&auth_tx, identity);
        });

        info!(
            "Engine started (theme: {}, cloud: {})",
            state.theme(),
            state.cloud_enabled
        );

        Self {
            state,
            msg_tx,
            msg_rx,
            shutdown_tx,
            shutdown_rx,
            settings,
            config_path: None,
            services,
            auth_subscription,
        }
    }

    /// Remember the active preset in `path` when the engine shuts down
    pub fn with_config_path(mut self, path: PathBuf) -> Self {
        self.config_path = Some(path);
        self
    }

    /// Process a single message through the TEA update cycle
    pub fn process_message(&mut self, msg: Message) {
        process::process_message(
            &mut self.state,
            msg,
            &self.msg_tx,
            &mut self.services,
            &self.shutdown_rx,
        );
    }

    /// Drain and process all pending messages from the channel.
    ///
    /// Returns the number of messages processed.
    pub fn drain_pending_messages(&mut self) -> usize {
        let mut count = 0;
        while let Ok(msg) = self.msg_rx.try_recv() {
            self.process_message(msg);
            count += 1;
        }
        count
    }

    /// Get a clone of the message sender for spawning input sources.
    pub fn msg_sender(&self) -> mpsc::Sender<Message> {
        self.msg_tx.clone()
    }

    pub fn services(&self) -> &Services {
        &self.services
    }

    /// Check if the application should quit.
    pub fn should_quit(&self) -> bool {
        self.state.should_quit()
    }

    /// Stop the auth subscription and signal background tasks to stop
    pub fn shutdown(&mut self) {
        self.auth_subscription.unsubscribe();
        let _ = self.shutdown_tx.send(true);

        if let Some(path) = &self.config_path {
            match config::remember_theme(path, self.state.theme()) {
                Ok(true) => info!("Remembered {} as starting theme", self.state.theme()),
                Ok(false) => {}
                Err(e) => warn!("Could not remember theme: {}", e),
            }
        }
        info!("Engine shut down");
    }
}

/// Queue an auth-state change for the update loop
fn forward_identity(tx: &mpsc::Sender<Message>, identity: Option<Identity>) -> bool {
    match tx.try_send(Message::AuthStateChanged { identity }) {
        Ok(()) => true,
        Err(e) => {
            warn!("Dropped auth state change: {}", e);
            false
        }
    }
}
