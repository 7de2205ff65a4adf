//! Action handlers: UpdateAction dispatch and background task spawning

pub mod workflows;

use std::future::Future;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, watch};

use omnichat_core::prelude::*;
use omnichat_core::DataUri;
use omnichat_services::{
    simulated_reply, AuthSession, FirestoreClient, GenerativeClient, IdentityClient,
};

use crate::config::{GenerativeSettings, Settings};
use crate::export::write_export;
use crate::handler::UpdateAction;
use crate::message::Message;

/// Simulated delay of the onboarding key check
pub const KEY_CHECK_DELAY: Duration = Duration::from_secs(1);

/// External clients shared by background tasks.
///
/// Cloud clients exist only when the cloud section of the config is complete;
/// the generative client is built once an API key is known.
#[derive(Debug)]
pub struct Services {
    generative_settings: GenerativeSettings,
    pub generative: Option<Arc<GenerativeClient>>,
    pub identity: Option<Arc<IdentityClient>>,
    pub store: Option<Arc<FirestoreClient>>,
    pub auth: AuthSession,
}

impl Services {
    pub fn from_settings(settings: &Settings) -> Self {
        let identity = settings
            .cloud
            .auth_config()
            .and_then(|config| match IdentityClient::new(config) {
                Ok(client) => Some(Arc::new(client)),
                Err(e) => {
                    error!("Could not create identity client: {}", e);
                    None
                }
            });
        let store = settings
            .cloud
            .store_config()
            .and_then(|config| match FirestoreClient::new(config) {
                Ok(client) => Some(Arc::new(client)),
                Err(e) => {
                    error!("Could not create document store client: {}", e);
                    None
                }
            });
        if !settings.cloud.is_configured() {
            info!("Cloud persistence disabled");
        }

        Self {
            generative_settings: settings.generative.clone(),
            generative: None,
            identity,
            store,
            auth: AuthSession::new(),
        }
    }

    /// Build (or rebuild) the generative client for `api_key`
    pub fn configure_generative(&mut self, api_key: &str) -> Result<()> {
        let client = GenerativeClient::new(self.generative_settings.client_config(api_key))?;
        self.generative = Some(Arc::new(client));
        info!("Generative client configured");
        Ok(())
    }
}

/// Execute an action by spawning a background task
pub fn handle_action(
    action: UpdateAction,
    msg_tx: mpsc::Sender<Message>,
    services: &mut Services,
    shutdown_rx: watch::Receiver<bool>,
) {
    match action {
        UpdateAction::SpawnTask(task) => match services.generative.clone() {
            Some(client) => spawn_one(msg_tx, shutdown_rx, async move {
                workflows::execute_task(task, client.as_ref()).await
            }),
            None => {
                warn!("Generative task requested before a client was configured");
                send_now(&msg_tx, workflows::task_failed(&task, &Error::GenerativeNotReady));
            }
        },

        UpdateAction::VerifyApiKey => spawn_one(msg_tx, shutdown_rx, async {
            tokio::time::sleep(KEY_CHECK_DELAY).await;
            Message::ApiKeyVerified
        }),

        UpdateAction::ConfigureGenerative { api_key } => {
            if let Err(e) = services.configure_generative(api_key.expose()) {
                error!("Could not create generative client: {}", e);
            }
        }

        UpdateAction::LoadImage { path } => spawn_one(msg_tx, shutdown_rx, load_image(path)),

        UpdateAction::SimulateReply {
            conversation,
            delay,
        } => spawn_one(msg_tx, shutdown_rx, async move {
            let text = simulated_reply(delay).await;
            Message::ChatReplyReceived { conversation, text }
        }),

        UpdateAction::SignIn {
            credentials,
            then_save,
        } => {
            let identity = services.identity.clone();
            let store = services.store.clone();
            let auth = services.auth.clone();
            spawn_many(msg_tx, shutdown_rx, async move {
                workflows::sign_in_and_save(
                    identity.as_deref(),
                    store.as_deref(),
                    &auth,
                    credentials,
                    then_save,
                )
                .await
            });
        }

        UpdateAction::SignOut => services.auth.clear(),

        UpdateAction::SaveLayout { name, html } => {
            let store = services.store.clone();
            let session = services.auth.current();
            spawn_one(msg_tx, shutdown_rx, async move {
                workflows::save_layout(store.as_deref(), session, name, html).await
            });
        }

        UpdateAction::ListLayouts => {
            let store = services.store.clone();
            let session = services.auth.current();
            spawn_one(msg_tx, shutdown_rx, async move {
                workflows::list_layouts(store.as_deref(), session).await
            });
        }

        UpdateAction::DeleteLayout { id } => {
            let store = services.store.clone();
            let session = services.auth.current();
            spawn_one(msg_tx, shutdown_rx, async move {
                workflows::delete_layout(store.as_deref(), session, id).await
            });
        }

        UpdateAction::Export {
            title,
            fragment,
            directory,
        } => spawn_one(msg_tx, shutdown_rx, async move {
            let millis = chrono::Utc::now().timestamp_millis();
            let result = tokio::task::spawn_blocking(move || {
                write_export(&directory, millis, &title, &fragment)
            })
            .await;
            match result {
                Ok(Ok(path)) => Message::Exported { path },
                Ok(Err(e)) => Message::ExportFailed {
                    error: e.to_string(),
                },
                Err(e) => Message::ExportFailed {
                    error: e.to_string(),
                },
            }
        }),
    }
}

async fn load_image(path: PathBuf) -> Message {
    let read_path = path.clone();
    match tokio::task::spawn_blocking(move || DataUri::from_file(&read_path)).await {
        Ok(Ok(data)) => Message::ImageLoaded { path, data },
        Ok(Err(e)) => Message::ImageLoadFailed {
            path,
            error: e.to_string(),
        },
        Err(e) => Message::ImageLoadFailed {
            path,
            error: e.to_string(),
        },
    }
}

fn send_now(msg_tx: &mpsc::Sender<Message>, msg: Message) {
    if let Err(e) = msg_tx.try_send(msg) {
        warn!("Dropped message: {}", e);
    }
}

fn spawn_one<F>(msg_tx: mpsc::Sender<Message>, shutdown_rx: watch::Receiver<bool>, work: F)
where
    F: Future<Output = Message> + Send + 'static,
{
    spawn_many(msg_tx, shutdown_rx, async move { vec![work.await] });
}

/// Run `work` until it completes or shutdown is signalled, then forward its
/// messages in order
fn spawn_many<F>(msg_tx: mpsc::Sender<Message>, mut shutdown_rx: watch::Receiver<bool>, work: F)
where
    F: Future<Output = Vec<Message>> + Send + 'static,
{
    tokio::spawn(async move {
        let messages = tokio::select! {
            messages = work => messages,
            _ = wait_for_shutdown(&mut shutdown_rx) => {
                debug!("Background task abandoned on shutdown");
                return;
            }
        };
        for msg in messages {
            if msg_tx.send(msg).await.is_err() {
                break;
            }
        }
    });
}

async fn wait_for_shutdown(shutdown_rx: &mut watch::Receiver<bool>) {
    let _ = shutdown_rx.wait_for(|stop| *stop).await;
}
