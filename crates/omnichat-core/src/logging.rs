//! File logging for the TUI process
//!
//! The terminal belongs to the UI, so everything goes to a daily rolling file
//! under `<data_local_dir>/omnichat/logs/`. Set `OMNICHAT_LOG` to any
//! `EnvFilter` directive to change verbosity:
//!
//! ```bash
//! OMNICHAT_LOG=debug omnichat
//! OMNICHAT_LOG=omnichat_services=trace,info omnichat
//! ```

use std::path::PathBuf;

use chrono::Local;
use tracing_appender::rolling::{Builder, Rotation};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::error::{Error, Result};

/// Environment variable holding the filter directive
pub const LOG_ENV: &str = "OMNICHAT_LOG";

/// Filter used when `OMNICHAT_LOG` is unset or invalid
pub const DEFAULT_FILTER: &str = "omnichat=info,warn";

const LOG_PREFIX: &str = "omnichat";
const LOG_SUFFIX: &str = "log";
/// Days of logs kept on disk
const MAX_LOG_FILES: usize = 7;

/// Install the global subscriber writing to the rolling log file
pub fn init() -> Result<()> {
    let dir = log_directory();
    std::fs::create_dir_all(&dir)?;

    let appender = Builder::new()
        .rotation(Rotation::DAILY)
        .filename_prefix(LOG_PREFIX)
        .filename_suffix(LOG_SUFFIX)
        .max_log_files(MAX_LOG_FILES)
        .build(&dir)
        .map_err(|e| Error::Io(std::io::Error::other(e)))?;

    let file_layer = fmt::layer()
        .with_writer(appender)
        .with_ansi(false)
        .with_file(true)
        .with_line_number(true)
        .with_timer(fmt::time::ChronoLocal::new("%H:%M:%S%.3f".to_string()));

    tracing_subscriber::registry()
        .with(filter_from(std::env::var(LOG_ENV).ok().as_deref()))
        .with(file_layer)
        .try_init()
        .map_err(|e| Error::Io(std::io::Error::other(e)))?;

    tracing::info!(
        "omnichat {} logging to {}",
        env!("CARGO_PKG_VERSION"),
        dir.display()
    );
    Ok(())
}

/// `<data_local_dir>/omnichat/logs`, or `./omnichat/logs` without one
pub fn log_directory() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("omnichat")
        .join("logs")
}

/// Today's log file
pub fn current_log_file() -> PathBuf {
    let date = Local::now().format("%Y-%m-%d");
    log_directory().join(format!("{LOG_PREFIX}.{date}.{LOG_SUFFIX}"))
}

/// Parse a directive, falling back to [`DEFAULT_FILTER`]
fn filter_from(directive: Option<&str>) -> EnvFilter {
    directive
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_FILTER))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_file_is_dated_under_omnichat_dir() {
        let path = current_log_file();
        assert!(path.parent().unwrap().ends_with("omnichat/logs"));
        let name = path.file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with("omnichat.") && name.ends_with(".log"));
        assert_eq!(name.len(), "omnichat.2024-01-01.log".len());
    }

    #[test]
    fn test_filter_falls_back_to_default() {
        let default = EnvFilter::new(DEFAULT_FILTER).to_string();
        assert_eq!(filter_from(None).to_string(), default);
        assert_eq!(filter_from(Some("  ")).to_string(), default);
        assert_eq!(filter_from(Some("debug")).to_string(), "debug");
    }
}
