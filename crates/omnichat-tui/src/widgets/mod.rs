//! Custom widget components

mod chat_view;
mod dialogs;
mod header;
mod inject_menu;
mod layout_view;
pub mod modal_overlay;
mod onboarding;
mod overlays;
pub mod settings_panel;
mod status_bar;
mod text_field;

pub use chat_view::{wrap_words, ChatView};
pub use dialogs::{ConfirmSignInDialog, SaveDialog, SignInDialog};
pub use header::MainHeader;
pub use inject_menu::InjectMenu;
pub use layout_view::{LayoutView, RefineBar};
pub use onboarding::OnboardingView;
pub use overlays::OverlayLayer;
pub use settings_panel::SettingsPanel;
pub use status_bar::StatusBar;
pub use text_field::TextField;
