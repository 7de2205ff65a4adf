//! Background workflows, generic over the service traits.
//!
//! Each workflow turns one unit of external work into the messages the
//! update loop expects. They never touch `AppState`.

use omnichat_core::prelude::*;
use omnichat_services::{AuthSession, GenerativeBackend, IdentityProvider, LayoutStore, Session};

use crate::credentials::Credentials;
use crate::handler::{PendingSave, Task};
use crate::message::Message;

/// Run a generative task against `backend`
pub async fn execute_task<G: GenerativeBackend>(task: Task, backend: &G) -> Message {
    let result = match &task {
        Task::GenerateLayout { image } => backend.generate_layout_from_image(image).await,
        Task::RefineLayout {
            markup,
            instruction,
            ..
        } => backend.refine_markup(markup, instruction).await,
        Task::GenerateWidget { prompt } => backend.generate_widget(prompt).await,
    };

    match result {
        Ok(markup) => match task {
            Task::GenerateLayout { .. } => Message::LayoutGenerated { markup },
            Task::RefineLayout { generation, .. } => {
                Message::LayoutRefined { generation, markup }
            }
            Task::GenerateWidget { .. } => Message::WidgetGenerated { markup },
        },
        Err(e) => task_failed(&task, &e),
    }
}

/// The failure message for `task`
pub fn task_failed(task: &Task, error: &Error) -> Message {
    let error = error.to_string();
    match task {
        Task::GenerateLayout { .. } => Message::LayoutGenerationFailed { error },
        Task::RefineLayout { .. } => Message::RefineFailed { error },
        Task::GenerateWidget { .. } => Message::WidgetGenerationFailed { error },
    }
}

/// Sign in and, when a save was waiting on it, save with the fresh session.
///
/// The save uses the session returned by the identity provider directly, so
/// it cannot race with the auth subscription delivering the new identity.
pub async fn sign_in_and_save<I, S>(
    identity: Option<&I>,
    store: Option<&S>,
    auth: &AuthSession,
    credentials: Credentials,
    then_save: Option<PendingSave>,
) -> Vec<Message>
where
    I: IdentityProvider,
    S: LayoutStore,
{
    let Some(identity) = identity else {
        return vec![sign_in_failed(&Error::CloudDisabled)];
    };

    let session = match identity
        .sign_in(&credentials.email, credentials.password())
        .await
    {
        Ok(session) => session,
        Err(e) => {
            warn!("Sign-in failed: {}", e);
            return vec![sign_in_failed(&e)];
        }
    };

    auth.set(session.clone());
    let mut messages = vec![Message::SignInSucceeded {
        identity: session.identity.clone(),
    }];

    if let Some(pending) = then_save {
        messages.push(save_layout(store, Some(session), pending.name, pending.html).await);
    }
    messages
}

fn sign_in_failed(error: &Error) -> Message {
    Message::SignInFailed {
        error: error.to_string(),
        visible: error.is_user_visible(),
    }
}

pub async fn save_layout<S: LayoutStore>(
    store: Option<&S>,
    session: Option<Session>,
    name: String,
    html: String,
) -> Message {
    let result = match (store, session) {
        (None, _) => Err(Error::CloudDisabled),
        (_, None) => Err(Error::NotSignedIn),
        (Some(store), Some(session)) => store.save_layout(&session, &name, &html).await,
    };
    match result {
        Ok(id) => Message::LayoutSaved { id },
        Err(e) => Message::LayoutSaveFailed {
            error: e.to_string(),
        },
    }
}

/// Listing never fails: without a store or session the list is empty
pub async fn list_layouts<S: LayoutStore>(store: Option<&S>, session: Option<Session>) -> Message {
    let layouts = match (store, session) {
        (Some(store), Some(session)) => store.list_layouts(&session).await,
        _ => Vec::new(),
    };
    Message::LayoutsListed { layouts }
}

pub async fn delete_layout<S: LayoutStore>(
    store: Option<&S>,
    session: Option<Session>,
    id: String,
) -> Message {
    let result = match (store, session) {
        (None, _) => Err(Error::CloudDisabled),
        (_, None) => Err(Error::NotSignedIn),
        (Some(store), Some(session)) => store.delete_layout(&session, &id).await,
    };
    match result {
        Ok(()) => Message::LayoutDeleted { id },
        Err(e) => Message::LayoutDeleteFailed {
            error: e.to_string(),
        },
    }
}
