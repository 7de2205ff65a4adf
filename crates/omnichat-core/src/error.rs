//! Application error types with rich context

use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Application error types organized by layer/domain
#[derive(Debug, Error)]
pub enum Error {
    // ─────────────────────────────────────────────────────────────
    // Common/Infrastructure Errors
    // ─────────────────────────────────────────────────────────────
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP error: {message}")]
    Http { message: String },

    // ─────────────────────────────────────────────────────────────
    // Terminal/TUI Errors
    // ─────────────────────────────────────────────────────────────
    #[error("Terminal error: {message}")]
    Terminal { message: String },

    #[error("Failed to initialize terminal: {0}")]
    TerminalInit(String),

    // ─────────────────────────────────────────────────────────────
    // Generative Model Errors
    // ─────────────────────────────────────────────────────────────
    #[error("Gemini API not initialized. Please provide an API key.")]
    GenerativeNotReady,

    #[error("Generative model error: {message}")]
    Generative { message: String },

    #[error("Generative model returned no text")]
    EmptyResponse,

    #[error("Invalid image: {message}")]
    InvalidImage { message: String },

    // ─────────────────────────────────────────────────────────────
    // Identity / Document Store Errors
    // ─────────────────────────────────────────────────────────────
    #[error(
        "Auth error: Domain not authorized. Please add \"{origin}\" to the authorized domains \
         of your Firebase project (Authentication -> Settings -> Authorized Domains)."
    )]
    UnauthorizedDomain { origin: String },

    #[error("Auth error: {message}")]
    Auth { message: String },

    #[error("Sign-in was cancelled by user")]
    SignInCancelled,

    #[error("No signed-in identity")]
    NotSignedIn,

    #[error("Cloud storage is not configured")]
    CloudDisabled,

    #[error("Document store error: {message}")]
    Store { message: String },

    // ─────────────────────────────────────────────────────────────
    // Configuration Errors
    // ─────────────────────────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },
}

// ─────────────────────────────────────────────────────────────────
// Convenience Constructors
// ─────────────────────────────────────────────────────────────────

impl Error {
    pub fn http(message: impl Into<String>) -> Self {
        Self::Http {
            message: message.into(),
        }
    }

    pub fn terminal(message: impl Into<String>) -> Self {
        Self::Terminal {
            message: message.into(),
        }
    }

    pub fn generative(message: impl Into<String>) -> Self {
        Self::Generative {
            message: message.into(),
        }
    }

    pub fn invalid_image(message: impl Into<String>) -> Self {
        Self::InvalidImage {
            message: message.into(),
        }
    }

    pub fn unauthorized_domain(origin: impl Into<String>) -> Self {
        Self::UnauthorizedDomain {
            origin: origin.into(),
        }
    }

    pub fn auth(message: impl Into<String>) -> Self {
        Self::Auth {
            message: message.into(),
        }
    }

    pub fn store(message: impl Into<String>) -> Self {
        Self::Store {
            message: message.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Check if this is a recoverable error
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Error::Http { .. }
                | Error::GenerativeNotReady
                | Error::Generative { .. }
                | Error::EmptyResponse
                | Error::InvalidImage { .. }
                | Error::UnauthorizedDomain { .. }
                | Error::Auth { .. }
                | Error::SignInCancelled
                | Error::NotSignedIn
                | Error::CloudDisabled
                | Error::Store { .. }
        )
    }

    /// Check if this error should trigger application exit
    pub fn is_fatal(&self) -> bool {
        matches!(self, Error::TerminalInit(_))
    }

    /// Whether the user should be told about this error directly.
    ///
    /// Cancelled sign-ins abort the parent workflow silently.
    pub fn is_user_visible(&self) -> bool {
        !matches!(self, Error::SignInCancelled)
    }
}

// ─────────────────────────────────────────────────────────────────
// Error Context Extensions (for use with color-eyre)
// ─────────────────────────────────────────────────────────────────

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context with a closure (lazy evaluation)
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let err = e.into();
            tracing::error!("{}: {:?}", context.into(), err);
            err
        })
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| {
            let err = e.into();
            tracing::error!("{}: {:?}", f(), err);
            err
        })
    }
}
