//! Message types for the application (TEA pattern)

use std::path::PathBuf;

use omnichat_core::{AppTheme, DataUri, ElementId, Identity, PresetWidget, SavedLayout};

use crate::input_key::InputKey;

/// All possible messages/actions in the application
#[derive(Debug, Clone)]
pub enum Message {
    /// Keyboard event from terminal
    Key(InputKey),

    /// Editing key for whichever text field the current mode focuses
    EditInput(InputKey),

    /// Tick event for periodic updates (spinner, notice expiry)
    Tick,

    /// Quit (q, Ctrl+C, signal handler)
    Quit,

    // ─────────────────────────────────────────────────────────
    // Onboarding
    // ─────────────────────────────────────────────────────────
    /// Submit the typed API key for (simulated) verification
    SubmitApiKey,
    ApiKeyVerified,
    /// Leave onboarding and configure the generative client
    CompleteOnboarding,

    // ─────────────────────────────────────────────────────────
    // Navigation
    // ─────────────────────────────────────────────────────────
    FocusChat,
    FocusRefine,
    /// Leave a text field without submitting
    BlurInput,
    ToggleRefineBar,
    ScrollUp,
    ScrollDown,
    PageUp,
    PageDown,

    OpenSettings,
    CloseSettings,
    SettingsUp,
    SettingsDown,
    ActivateSettingsItem,
    /// Delete the saved layout under the settings cursor
    DeleteSelectedLayout,
    OpenImagePathInput,

    OpenInjectMenu,
    CloseInjectMenu,
    InjectUp,
    InjectDown,
    ActivateInjectItem,
    /// Remove the active element under the inject menu cursor
    RemoveSelectedElement,
    OpenWidgetPrompt,

    // ─────────────────────────────────────────────────────────
    // Themes & Layouts
    // ─────────────────────────────────────────────────────────
    SetTheme(AppTheme),

    LoadImage { path: PathBuf },
    ImageLoaded { path: PathBuf, data: DataUri },
    ImageLoadFailed { path: PathBuf, error: String },
    ClearImage,

    GenerateLayout,
    LayoutGenerated { markup: String },
    LayoutGenerationFailed { error: String },

    SubmitRefine,
    LayoutRefined { generation: u64, markup: String },
    RefineFailed { error: String },

    // ─────────────────────────────────────────────────────────
    // Chat
    // ─────────────────────────────────────────────────────────
    SendChat,
    ChatReplyReceived { conversation: u64, text: String },
    NewChat,

    // ─────────────────────────────────────────────────────────
    // Overlays
    // ─────────────────────────────────────────────────────────
    InjectPreset(PresetWidget),
    SubmitWidgetPrompt,
    WidgetGenerated { markup: String },
    WidgetGenerationFailed { error: String },
    RemoveElement(ElementId),
    /// Remove the most recently injected element
    DismissTopmost,

    // ─────────────────────────────────────────────────────────
    // Cloud persistence
    // ─────────────────────────────────────────────────────────
    OpenSaveDialog,
    SubmitSaveName,
    CancelSave,
    ConfirmSignIn,
    DeclineSignIn,
    /// Open the sign-in form without a pending save
    OpenSignIn,
    SignInNextField,
    SubmitSignIn,
    CancelSignIn,
    SignInSucceeded { identity: Identity },
    SignInFailed { error: String, visible: bool },
    /// Pushed by the auth subscription whenever the signed-in identity changes
    AuthStateChanged { identity: Option<Identity> },
    SignOut,

    LayoutSaved { id: String },
    LayoutSaveFailed { error: String },
    RefreshLayouts,
    LayoutsListed { layouts: Vec<SavedLayout> },
    LoadLayout { id: String },
    DeleteLayout { id: String },
    LayoutDeleted { id: String },
    LayoutDeleteFailed { error: String },

    // ─────────────────────────────────────────────────────────
    // Export & Notices
    // ─────────────────────────────────────────────────────────
    ExportLayout,
    Exported { path: PathBuf },
    ExportFailed { error: String },
    DismissNotice,
}
