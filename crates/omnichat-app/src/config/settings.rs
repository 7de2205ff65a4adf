//! Settings loading and persistence

use std::path::{Path, PathBuf};

use omnichat_core::prelude::*;
use omnichat_core::AppTheme;

use super::types::Settings;

pub const CONFIG_DIR_NAME: &str = "omnichat";
pub const CONFIG_FILENAME: &str = "config.toml";
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

/// `<config_dir>/omnichat/config.toml`, if the platform has a config dir
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join(CONFIG_DIR_NAME).join(CONFIG_FILENAME))
}

// ─────────────────────────────────────────────────────────────────────────────
// Settings Loading
// ─────────────────────────────────────────────────────────────────────────────

/// Load settings from a TOML file.
///
/// Returns default settings if the file doesn't exist or can't be parsed.
pub fn load_settings(config_path: &Path) -> Settings {
    if !config_path.exists() {
        debug!("No config file at {:?}, using defaults", config_path);
        return Settings::default();
    }

    match std::fs::read_to_string(config_path) {
        Ok(content) => match toml::from_str(&content) {
            Ok(settings) => {
                debug!("Loaded settings from {:?}", config_path);
                settings
            }
            Err(e) => {
                warn!("Failed to parse {:?}: {}", config_path, e);
                Settings::default()
            }
        },
        Err(e) => {
            warn!("Failed to read {:?}: {}", config_path, e);
            Settings::default()
        }
    }
}

/// Write a commented default config file if none exists
pub fn init_config_dir(config_path: &Path) -> Result<()> {
    if let Some(dir) = config_path.parent() {
        if !dir.as_os_str().is_empty() && !dir.exists() {
            std::fs::create_dir_all(dir)
                .map_err(|e| Error::config(format!("Failed to create config dir: {}", e)))?;
        }
    }

    if !config_path.exists() {
        std::fs::write(config_path, generate_default_config())
            .map_err(|e| Error::config(format!("Failed to write config.toml: {}", e)))?;
        info!("Created default config at {:?}", config_path);
    }

    Ok(())
}

/// Save settings, writing a temp file then renaming it over the target
pub fn save_settings(config_path: &Path, settings: &Settings) -> Result<()> {
    let dir = config_path
        .parent()
        .filter(|d| !d.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));

    if !dir.exists() {
        std::fs::create_dir_all(&dir)
            .map_err(|e| Error::config(format!("Failed to create config dir: {}", e)))?;
    }

    let temp_path = dir.join(".config.toml.tmp");
    let content = toml::to_string_pretty(settings)
        .map_err(|e| Error::config(format!("Failed to serialize settings: {}", e)))?;
    let full_content = format!("{}{}", generate_config_header(), content);

    std::fs::write(&temp_path, &full_content)
        .map_err(|e| Error::config(format!("Failed to write temp file: {}", e)))?;

    std::fs::rename(&temp_path, config_path)
        .map_err(|e| Error::config(format!("Failed to rename temp file: {}", e)))?;

    info!("Saved settings to {:?}", config_path);
    Ok(())
}

/// Make `theme` the starting theme stored in the config file.
///
/// The file is re-read so command-line overrides are not written back.
/// A file that cannot be read or parsed is left untouched.
/// Returns `false` when nothing was written.
pub fn remember_theme(config_path: &Path, theme: AppTheme) -> Result<bool> {
    if !theme.is_preset() {
        return Ok(false);
    }

    let mut settings = if config_path.exists() {
        let content = match std::fs::read_to_string(config_path) {
            Ok(content) => content,
            Err(e) => {
                warn!("Not remembering theme, cannot read {:?}: {}", config_path, e);
                return Ok(false);
            }
        };
        match toml::from_str::<Settings>(&content) {
            Ok(settings) => settings,
            Err(e) => {
                warn!("Not remembering theme, {:?} does not parse: {}", config_path, e);
                return Ok(false);
            }
        }
    } else {
        Settings::default()
    };

    if settings.ui.theme() == theme {
        return Ok(false);
    }

    settings.ui.default_theme = theme.name().to_string();
    save_settings(config_path, &settings)?;
    Ok(true)
}

/// Pick the API key: command line, then environment, then config file
pub fn resolve_api_key(
    cli: Option<&str>,
    env: Option<&str>,
    settings: &Settings,
) -> Option<String> {
    [cli, env, settings.generative.api_key.as_deref()]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|k| !k.is_empty())
        .map(str::to_string)
}

fn generate_config_header() -> String {
    "# OmniChat Configuration\n# Generated by omnichat\n\n".to_string()
}

fn generate_default_config() -> String {
    r#"# OmniChat Configuration

[generative]
# api_key = ""          # Prefer the GEMINI_API_KEY environment variable
layout_model = "gemini-3-pro-preview"
text_model = "gemini-3-flash-preview"
endpoint = "https://generativelanguage.googleapis.com/v1beta"

[cloud]
enabled = true
api_key = ""            # Web API key of your Firebase project
project_id = ""
auth_endpoint = "https://identitytoolkit.googleapis.com/v1"
firestore_endpoint = "https://firestore.googleapis.com/v1"
origin = "http://localhost"   # Must be listed under Authorized Domains
collection = "layouts"

[ui]
default_theme = "Gemini"      # Gemini, ChatGPT or Claude
skip_onboarding = false
simulated_reply_delay_ms = 600

[export]
# directory = "."
"#
    .to_string()
}
