//! Terminal setup and restoration

use omnichat_core::prelude::*;
use ratatui::DefaultTerminal;

/// Install a panic hook that puts the terminal back in cooked mode before
/// the panic message is printed
pub fn install_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        ratatui::restore();
        original_hook(panic_info);
    }));
}

/// Enter the alternate screen with raw mode enabled
pub fn init() -> Result<DefaultTerminal> {
    install_panic_hook();
    ratatui::try_init().map_err(|e| Error::TerminalInit(e.to_string()))
}

/// Leave the alternate screen
pub fn restore() {
    ratatui::restore();
    debug!("Terminal restored");
}
