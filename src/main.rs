//! OmniChat - terminal simulator for chat-assistant interfaces
//!
//! This is the binary entry point. All logic lives in the workspace crates.

use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::{eyre, Result};
use omnichat_app::config::{self, API_KEY_ENV};
use omnichat_app::Engine;
use omnichat_core::AppTheme;
use tracing::{info, warn};

/// OmniChat - simulate Gemini, ChatGPT and Claude, clone UIs from screenshots
#[derive(Parser, Debug)]
#[command(name = "omnichat")]
#[command(about = "A terminal simulator for chat-assistant interfaces", long_about = None)]
struct Args {
    /// Path to config.toml (defaults to the platform config directory)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Gemini API key (overrides GEMINI_API_KEY and the config file)
    #[arg(long, value_name = "KEY")]
    api_key: Option<String>,

    /// Starting theme: gemini, chatgpt or claude
    #[arg(long, value_name = "NAME", value_parser = parse_preset)]
    theme: Option<AppTheme>,

    /// Go straight to the chat when an API key is available
    #[arg(long)]
    skip_onboarding: bool,
}

fn parse_preset(s: &str) -> std::result::Result<AppTheme, String> {
    let theme: AppTheme = s.parse()?;
    if theme.is_preset() {
        Ok(theme)
    } else {
        Err(format!("'{s}' is not a preset theme"))
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let args = Args::parse();

    omnichat_core::logging::init()?;

    let config_path = args
        .config
        .or_else(config::default_config_path)
        .ok_or_else(|| eyre!("No config directory on this platform; pass --config"))?;

    if let Err(e) = config::init_config_dir(&config_path) {
        warn!("Could not create default config at {:?}: {}", config_path, e);
    }
    let mut settings = config::load_settings(&config_path);

    if let Some(theme) = args.theme {
        settings.ui.default_theme = theme.name().to_string();
    }
    if args.skip_onboarding {
        settings.ui.skip_onboarding = true;
    }

    let env_key = std::env::var(API_KEY_ENV).ok();
    let api_key = config::resolve_api_key(args.api_key.as_deref(), env_key.as_deref(), &settings);
    info!(
        "Config: {:?} (api key {})",
        config_path,
        if api_key.is_some() { "present" } else { "absent" }
    );

    let engine = Engine::new(settings, api_key).with_config_path(config_path);
    omnichat_tui::run(engine).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_parse() {
        let args = Args::parse_from([
            "omnichat",
            "--api-key",
            "k",
            "--theme",
            "Claude",
            "--skip-onboarding",
        ]);
        assert_eq!(args.api_key.as_deref(), Some("k"));
        assert_eq!(args.theme, Some(AppTheme::Claude));
        assert!(args.skip_onboarding);
    }

    #[test]
    fn test_custom_theme_rejected() {
        assert!(Args::try_parse_from(["omnichat", "--theme", "custom"]).is_err());
        assert!(Args::try_parse_from(["omnichat", "--theme", "bogus"]).is_err());
    }
}
