//! Configuration file parsing for OmniChat
//!
//! Settings live in `<config_dir>/omnichat/config.toml` unless a path is
//! given on the command line.

pub mod settings;
pub mod types;

pub use settings::{
    default_config_path, init_config_dir, load_settings, remember_theme, resolve_api_key,
    save_settings, API_KEY_ENV, CONFIG_FILENAME,
};
pub use types::*;
