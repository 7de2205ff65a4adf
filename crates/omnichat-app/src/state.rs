//! Application state (Model in TEA pattern)

use std::path::PathBuf;
use std::time::Duration;

use omnichat_core::{AppPhase, AppTheme, CustomLayout, DataUri, Identity, SavedLayout};

use crate::chat::ChatState;
use crate::config::Settings;
use crate::notice::NoticeQueue;
use crate::overlay::OverlayRegistry;
use crate::text_input::TextInput;

/// Scroll value that keeps the newest chat line in view
pub const FOLLOW_LATEST: u16 = u16::MAX;

/// Default name offered by the save dialog
pub const DEFAULT_LAYOUT_NAME: &str = "My Custom UI";

/// Current UI mode/screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UiMode {
    /// First-run API key entry
    #[default]
    Onboarding,

    /// Simulated UI with shortcuts active
    Normal,

    /// Typing into the chat input
    ChatInput,

    /// Typing a refinement instruction for the custom layout
    RefineInput,

    /// Settings panel (themes, image upload, account, saved layouts)
    Settings,

    /// Typing a reference image path inside the settings panel
    ImagePathInput,

    /// Inject menu (preset widgets, custom prompt, active elements)
    InjectMenu,

    /// Typing a widget description inside the inject menu
    WidgetPromptInput,

    /// Naming a layout before saving it
    SaveName,

    /// "Sign in now?" confirmation before saving
    ConfirmSignIn,

    /// Email/password form
    SignIn,
}

impl UiMode {
    /// Modes that capture typed characters into a text field
    pub fn is_text_entry(self) -> bool {
        matches!(
            self,
            UiMode::Onboarding
                | UiMode::ChatInput
                | UiMode::RefineInput
                | UiMode::ImagePathInput
                | UiMode::WidgetPromptInput
                | UiMode::SaveName
                | UiMode::SignIn
        )
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Onboarding
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OnboardingStep {
    #[default]
    Credential,
    Ready,
}

#[derive(Debug, Clone, Default)]
pub struct OnboardingState {
    pub step: OnboardingStep,
    pub key_input: TextInput,
    pub error: Option<String>,
    /// Simulated key check in flight
    pub verifying: bool,
}

// ─────────────────────────────────────────────────────────────────────────────
// Settings panel
// ─────────────────────────────────────────────────────────────────────────────

/// A reference image read from disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedImage {
    pub path: PathBuf,
    pub data: DataUri,
}

#[derive(Debug, Clone, Default)]
pub struct SettingsPanelState {
    /// Index into [`crate::settings_items::settings_items`]
    pub selected: usize,
    pub image_path: TextInput,
    pub image: Option<LoadedImage>,
    pub loading_image: bool,
}

// ─────────────────────────────────────────────────────────────────────────────
// Inject menu
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default)]
pub struct InjectMenuState {
    /// Index into [`crate::settings_items::inject_items`]
    pub selected: usize,
    pub prompt: TextInput,
}

// ─────────────────────────────────────────────────────────────────────────────
// Sign-in form
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SignInField {
    #[default]
    Email,
    Password,
}

#[derive(Debug, Clone, Default)]
pub struct SignInForm {
    pub email: TextInput,
    pub password: TextInput,
    pub focus: SignInField,
    pub error: Option<String>,
    /// Mode to return to when the form closes
    pub return_mode: UiMode,
}

impl SignInForm {
    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            SignInField::Email => SignInField::Password,
            SignInField::Password => SignInField::Email,
        };
    }

    pub fn focused_mut(&mut self) -> &mut TextInput {
        match self.focus {
            SignInField::Email => &mut self.email,
            SignInField::Password => &mut self.password,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Busy flags
// ─────────────────────────────────────────────────────────────────────────────

/// Long-running operations currently in flight
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BusyFlags {
    pub generating_layout: bool,
    pub refining: bool,
    pub generating_widget: bool,
    pub saving: bool,
    pub signing_in: bool,
}

impl BusyFlags {
    pub fn any(&self) -> bool {
        self.generating_layout
            || self.refining
            || self.generating_widget
            || self.saving
            || self.signing_in
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// AppState
// ─────────────────────────────────────────────────────────────────────────────

/// Complete application state (the Model in TEA)
#[derive(Debug)]
pub struct AppState {
    pub phase: AppPhase,
    pub ui_mode: UiMode,

    /// Active theme. `Custom` only while `custom_layout` is `Some`.
    theme: AppTheme,
    custom_layout: Option<CustomLayout>,
    /// Bumped whenever the displayed layout is replaced or dropped
    layout_generation: u64,

    pub refine_open: bool,
    pub refine_input: TextInput,

    pub chat: ChatState,
    pub overlays: OverlayRegistry,

    pub onboarding: OnboardingState,
    pub settings_panel: SettingsPanelState,
    pub inject_menu: InjectMenuState,
    pub sign_in: SignInForm,
    pub save_name: TextInput,
    /// Layout name waiting for sign-in to complete
    pub pending_save: Option<String>,

    pub busy: BusyFlags,
    pub notices: NoticeQueue,
    pub spinner_frame: usize,
    /// Vertical scroll of the main view, in lines from the top.
    /// The renderer clamps it to the content, so [`FOLLOW_LATEST`] pins the
    /// view to the newest line.
    pub scroll: u16,

    pub identity: Option<Identity>,
    pub saved_layouts: Vec<SavedLayout>,
    pub layouts_loading: bool,
    pub cloud_enabled: bool,

    pub generative_ready: bool,
    pub reply_delay: Duration,
    pub export_dir: PathBuf,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::with_settings(&Settings::default(), None)
    }

    /// Initial state for the given settings and resolved API key.
    ///
    /// Onboarding is skipped only when configured to and a key is present.
    pub fn with_settings(settings: &Settings, api_key: Option<&str>) -> Self {
        let theme = settings.ui.theme();
        let skip = settings.ui.skip_onboarding && api_key.is_some();

        let mut onboarding = OnboardingState::default();
        if let Some(key) = api_key {
            onboarding.key_input.set(key);
        }

        Self {
            phase: AppPhase::Running,
            ui_mode: if skip { UiMode::Normal } else { UiMode::Onboarding },
            theme,
            custom_layout: None,
            layout_generation: 0,
            refine_open: false,
            refine_input: TextInput::new(),
            chat: ChatState::new(theme),
            overlays: OverlayRegistry::new(),
            onboarding,
            settings_panel: SettingsPanelState::default(),
            inject_menu: InjectMenuState::default(),
            sign_in: SignInForm::default(),
            save_name: TextInput::new(),
            pending_save: None,
            busy: BusyFlags::default(),
            notices: NoticeQueue::default(),
            spinner_frame: 0,
            scroll: 0,
            identity: None,
            saved_layouts: Vec::new(),
            layouts_loading: false,
            cloud_enabled: settings.cloud.is_configured(),
            generative_ready: skip,
            reply_delay: Duration::from_millis(settings.ui.simulated_reply_delay_ms),
            export_dir: settings.export.directory(),
        }
    }

    pub fn should_quit(&self) -> bool {
        self.phase == AppPhase::Quitting
    }

    pub fn theme(&self) -> AppTheme {
        self.theme
    }

    pub fn custom_layout(&self) -> Option<&CustomLayout> {
        self.custom_layout.as_ref()
    }

    pub fn custom_layout_mut(&mut self) -> Option<&mut CustomLayout> {
        self.custom_layout.as_mut()
    }

    /// Identifies the layout a refinement was started from
    pub fn layout_generation(&self) -> u64 {
        self.layout_generation
    }

    /// Switch to a preset, dropping any custom layout and restarting the chat.
    /// `Custom` is ignored: it is only reachable through [`Self::show_custom`].
    pub fn set_preset(&mut self, theme: AppTheme) -> bool {
        if !theme.is_preset() {
            return false;
        }
        self.theme = theme;
        if self.custom_layout.take().is_some() {
            self.layout_generation += 1;
        }
        self.refine_open = false;
        self.refine_input.clear();
        self.chat.reset(theme);
        self.scroll = 0;
        true
    }

    /// Display a custom layout and open the refine bar
    pub fn show_custom(&mut self, layout: CustomLayout) {
        self.theme = AppTheme::Custom;
        self.custom_layout = Some(layout);
        self.layout_generation += 1;
        self.refine_open = true;
        self.scroll = 0;
    }

    pub fn is_signed_in(&self) -> bool {
        self.identity.is_some()
    }

    /// Advance the spinner while anything is busy
    pub fn tick_spinner(&mut self) {
        if self.busy.any() || self.chat.is_pending() || self.onboarding.verifying {
            self.spinner_frame = self.spinner_frame.wrapping_add(1);
        }
    }

    /// Close panels and dialogs, returning to the simulated UI
    pub fn close_to_normal(&mut self) {
        self.ui_mode = UiMode::Normal;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings_with_key(skip: bool) -> Settings {
        let mut settings = Settings::default();
        settings.ui.skip_onboarding = skip;
        settings
    }

    #[test]
    fn test_starts_in_onboarding_without_key() {
        let state = AppState::with_settings(&settings_with_key(true), None);
        assert_eq!(state.ui_mode, UiMode::Onboarding);
        assert!(!state.generative_ready);
    }

    #[test]
    fn test_skip_onboarding_with_key() {
        let state = AppState::with_settings(&settings_with_key(true), Some("key"));
        assert_eq!(state.ui_mode, UiMode::Normal);
        assert!(state.generative_ready);
    }

    #[test]
    fn test_key_prefills_onboarding() {
        let state = AppState::with_settings(&settings_with_key(false), Some("key"));
        assert_eq!(state.ui_mode, UiMode::Onboarding);
        assert_eq!(state.onboarding.key_input.value(), "key");
    }

    #[test]
    fn test_custom_theme_implies_layout() {
        let mut state = AppState::new();
        state.show_custom(CustomLayout::generated("<div>x</div>"));
        assert_eq!(state.theme(), AppTheme::Custom);
        assert!(state.custom_layout().is_some());
        assert!(state.refine_open);

        assert!(!state.set_preset(AppTheme::Custom));
        assert_eq!(state.theme(), AppTheme::Custom);

        assert!(state.set_preset(AppTheme::Claude));
        assert_eq!(state.theme(), AppTheme::Claude);
        assert!(state.custom_layout().is_none());
        assert!(!state.refine_open);
    }

    #[test]
    fn test_layout_generation_moves_on_replace_and_drop() {
        let mut state = AppState::new();
        let start = state.layout_generation();
        state.set_preset(AppTheme::Claude);
        assert_eq!(state.layout_generation(), start);

        state.show_custom(CustomLayout::generated("<a/>"));
        let first = state.layout_generation();
        assert_ne!(first, start);

        state.show_custom(CustomLayout::generated("<b/>"));
        assert_ne!(state.layout_generation(), first);

        let second = state.layout_generation();
        state.set_preset(AppTheme::Gemini);
        assert_ne!(state.layout_generation(), second);
    }

    #[test]
    fn test_set_preset_restarts_chat() {
        let mut state = AppState::new();
        state.chat.input.set("hello");
        state.chat.begin_send();
        state.set_preset(AppTheme::ChatGPT);

        assert_eq!(state.chat.messages.len(), 1);
        assert_eq!(state.chat.messages[0].text, AppTheme::ChatGPT.greeting());
        assert!(!state.chat.is_pending());
    }

    #[test]
    fn test_spinner_only_moves_when_busy() {
        let mut state = AppState::new();
        state.tick_spinner();
        assert_eq!(state.spinner_frame, 0);
        state.busy.refining = true;
        state.tick_spinner();
        assert_eq!(state.spinner_frame, 1);
    }
}
