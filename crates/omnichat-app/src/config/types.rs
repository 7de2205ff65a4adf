//! Configuration types for OmniChat
//!
//! Defines `Settings` and its sections, plus conversions into the service
//! adapters' connection settings.

use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::warn;

use omnichat_core::AppTheme;
use omnichat_services::{auth, firestore, gemini, AuthConfig, GeminiConfig, StoreConfig};

/// Global application settings from `config.toml`
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Settings {
    #[serde(default)]
    pub generative: GenerativeSettings,

    #[serde(default)]
    pub cloud: CloudSettings,

    #[serde(default)]
    pub ui: UiSettings,

    #[serde(default)]
    pub export: ExportSettings,
}

/// `[generative]` section
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GenerativeSettings {
    /// Gemini API key. Prefer `GEMINI_API_KEY` over storing it here.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    #[serde(default = "default_layout_model")]
    pub layout_model: String,

    #[serde(default = "default_text_model")]
    pub text_model: String,

    #[serde(default = "default_generative_endpoint")]
    pub endpoint: String,
}

impl Default for GenerativeSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            layout_model: default_layout_model(),
            text_model: default_text_model(),
            endpoint: default_generative_endpoint(),
        }
    }
}

impl GenerativeSettings {
    pub fn client_config(&self, api_key: impl Into<String>) -> GeminiConfig {
        GeminiConfig {
            api_key: api_key.into(),
            layout_model: self.layout_model.clone(),
            text_model: self.text_model.clone(),
            endpoint: self.endpoint.clone(),
        }
    }
}

fn default_layout_model() -> String {
    gemini::DEFAULT_LAYOUT_MODEL.to_string()
}

fn default_text_model() -> String {
    gemini::DEFAULT_TEXT_MODEL.to_string()
}

fn default_generative_endpoint() -> String {
    gemini::DEFAULT_ENDPOINT.to_string()
}

/// `[cloud]` section: identity + document store
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CloudSettings {
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Web API key of the backend project
    #[serde(default)]
    pub api_key: String,

    #[serde(default)]
    pub project_id: String,

    #[serde(default = "default_auth_endpoint")]
    pub auth_endpoint: String,

    #[serde(default = "default_firestore_endpoint")]
    pub firestore_endpoint: String,

    /// Calling origin sent as `Referer`; must be an authorized domain
    #[serde(default = "default_origin")]
    pub origin: String,

    #[serde(default = "default_collection")]
    pub collection: String,
}

impl Default for CloudSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            api_key: String::new(),
            project_id: String::new(),
            auth_endpoint: default_auth_endpoint(),
            firestore_endpoint: default_firestore_endpoint(),
            origin: default_origin(),
            collection: default_collection(),
        }
    }
}

impl CloudSettings {
    /// Cloud features need the switch on plus a key and a project
    pub fn is_configured(&self) -> bool {
        self.enabled && !self.api_key.trim().is_empty() && !self.project_id.trim().is_empty()
    }

    pub fn auth_config(&self) -> Option<AuthConfig> {
        self.is_configured().then(|| AuthConfig {
            api_key: self.api_key.clone(),
            endpoint: self.auth_endpoint.clone(),
            origin: self.origin.clone(),
        })
    }

    pub fn store_config(&self) -> Option<StoreConfig> {
        self.is_configured().then(|| StoreConfig {
            project_id: self.project_id.clone(),
            endpoint: self.firestore_endpoint.clone(),
            collection: self.collection.clone(),
            origin: self.origin.clone(),
        })
    }
}

fn default_true() -> bool {
    true
}

fn default_auth_endpoint() -> String {
    auth::DEFAULT_AUTH_ENDPOINT.to_string()
}

fn default_firestore_endpoint() -> String {
    firestore::DEFAULT_FIRESTORE_ENDPOINT.to_string()
}

fn default_origin() -> String {
    auth::DEFAULT_ORIGIN.to_string()
}

fn default_collection() -> String {
    firestore::DEFAULT_COLLECTION.to_string()
}

/// `[ui]` section
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UiSettings {
    /// Gemini, ChatGPT or Claude
    #[serde(default = "default_theme_name")]
    pub default_theme: String,

    /// Go straight to chat when an API key is already configured
    #[serde(default)]
    pub skip_onboarding: bool,

    #[serde(default = "default_reply_delay_ms")]
    pub simulated_reply_delay_ms: u64,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            default_theme: default_theme_name(),
            skip_onboarding: false,
            simulated_reply_delay_ms: default_reply_delay_ms(),
        }
    }
}

impl UiSettings {
    /// The configured preset, or Gemini if unknown or `Custom`
    pub fn theme(&self) -> AppTheme {
        match AppTheme::from_str(&self.default_theme) {
            Ok(theme) if theme.is_preset() => theme,
            Ok(_) | Err(_) => {
                warn!(
                    "default_theme '{}' is not a preset, using Gemini",
                    self.default_theme
                );
                AppTheme::Gemini
            }
        }
    }
}

fn default_theme_name() -> String {
    AppTheme::Gemini.name().to_string()
}

fn default_reply_delay_ms() -> u64 {
    600
}

/// `[export]` section
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ExportSettings {
    /// Directory for exported pages (default: current directory)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub directory: Option<PathBuf>,
}

impl ExportSettings {
    pub fn directory(&self) -> PathBuf {
        self.directory
            .clone()
            .unwrap_or_else(|| PathBuf::from("."))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.generative.layout_model, "gemini-3-pro-preview");
        assert_eq!(settings.generative.text_model, "gemini-3-flash-preview");
        assert!(settings.cloud.enabled);
        assert_eq!(settings.cloud.collection, "layouts");
        assert_eq!(settings.ui.simulated_reply_delay_ms, 600);
        assert_eq!(settings.ui.theme(), AppTheme::Gemini);
        assert_eq!(settings.export.directory(), PathBuf::from("."));
    }

    #[test]
    fn test_partial_sections_fill_defaults() {
        let settings: Settings = toml::from_str(
            r#"
[ui]
default_theme = "claude"

[cloud]
api_key = "k"
project_id = "p"
"#,
        )
        .unwrap();
        assert_eq!(settings.ui.theme(), AppTheme::Claude);
        assert!(settings.cloud.is_configured());
        assert_eq!(settings.cloud.origin, "http://localhost");
        assert!(settings.generative.endpoint.starts_with("https://"));
    }

    #[test]
    fn test_custom_or_unknown_theme_falls_back() {
        let mut ui = UiSettings::default();
        ui.default_theme = "Custom".into();
        assert_eq!(ui.theme(), AppTheme::Gemini);
        ui.default_theme = "bard".into();
        assert_eq!(ui.theme(), AppTheme::Gemini);
    }

    #[test]
    fn test_cloud_configs_require_key_and_project() {
        let mut cloud = CloudSettings::default();
        assert!(cloud.auth_config().is_none());
        cloud.api_key = "k".into();
        cloud.project_id = "p".into();
        assert_eq!(cloud.store_config().unwrap().project_id, "p");
        cloud.enabled = false;
        assert!(cloud.store_config().is_none());
    }

    #[test]
    fn test_client_config_carries_models() {
        let mut generative = GenerativeSettings::default();
        generative.text_model = "gemini-x".into();
        let config = generative.client_config("key");
        assert_eq!(config.api_key, "key");
        assert_eq!(config.text_model, "gemini-x");
    }
}
