//! OS signal handling: a terminating signal becomes `Message::Quit`

use tokio::sync::mpsc;

use omnichat_core::prelude::*;

use crate::message::Message;

/// Which signal asked us to stop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StopSignal {
    Interrupt,
    Terminate,
}

/// Listen for SIGINT/SIGTERM (Ctrl+C on Windows) in the background.
///
/// The quit request goes through the normal update loop so the runner can
/// restore the terminal and stop the auth subscription.
pub fn spawn_signal_handler(tx: mpsc::Sender<Message>) {
    tokio::spawn(async move {
        match next_stop_signal().await {
            Ok(signal) => {
                info!("Stopping on {:?}", signal);
                if tx.send(Message::Quit).await.is_err() {
                    debug!("Update loop already gone");
                }
            }
            Err(e) => error!("Signal handler unavailable: {}", e),
        }
    });
}

#[cfg(unix)]
async fn next_stop_signal() -> Result<StopSignal> {
    use tokio::signal::unix::{signal, SignalKind};

    let listen = |kind: SignalKind, name: &str| {
        signal(kind).map_err(|e| Error::terminal(format!("cannot listen for {}: {}", name, e)))
    };
    let mut interrupt = listen(SignalKind::interrupt(), "SIGINT")?;
    let mut terminate = listen(SignalKind::terminate(), "SIGTERM")?;

    let signal = tokio::select! {
        _ = interrupt.recv() => StopSignal::Interrupt,
        _ = terminate.recv() => StopSignal::Terminate,
    };
    Ok(signal)
}

#[cfg(not(unix))]
async fn next_stop_signal() -> Result<StopSignal> {
    tokio::signal::ctrl_c()
        .await
        .map_err(|e| Error::terminal(format!("cannot listen for Ctrl+C: {}", e)))?;
    Ok(StopSignal::Interrupt)
}
