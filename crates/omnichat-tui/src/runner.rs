//! Main TUI runner - entry point and event loop

use omnichat_app::Engine;
use omnichat_core::prelude::*;

use super::{event, render, terminal};

/// Run the TUI until the user quits.
///
/// Must be called inside a Tokio runtime: background work spawned by the
/// engine runs on it while this loop blocks on terminal polling.
pub async fn run(mut engine: Engine) -> Result<()> {
    let mut term = terminal::init()?;
    info!("OmniChat starting");

    let result = run_loop(&mut term, &mut engine);

    engine.shutdown();
    terminal::restore();

    result
}

/// Main event loop
fn run_loop(terminal: &mut ratatui::DefaultTerminal, engine: &mut Engine) -> Result<()> {
    while !engine.should_quit() {
        // Results of background work, auth changes and signals
        engine.drain_pending_messages();
        if engine.should_quit() {
            break;
        }

        terminal.draw(|frame| render::view(frame, &mut engine.state))?;

        if let Some(message) = event::poll()? {
            engine.process_message(message);
        }
    }
    Ok(())
}
