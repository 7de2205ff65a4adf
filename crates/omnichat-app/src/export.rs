//! Standalone HTML export of the current screen

use std::path::{Path, PathBuf};

use omnichat_core::markup::{escape_text, export_document};
use omnichat_core::prelude::*;
use omnichat_core::{theme_config, AppTheme, ChatMessage};

/// `omnichat-ui-<unix_millis>.html`
pub fn export_file_name(unix_millis: i64) -> String {
    format!("omnichat-ui-{unix_millis}.html")
}

/// Static Tailwind rendering of a preset chat transcript
pub fn transcript_fragment(theme: AppTheme, messages: &[ChatMessage]) -> String {
    let config = theme_config(theme);
    let font = match config.font {
        omnichat_core::FontFamily::Serif => "font-serif",
        omnichat_core::FontFamily::Sans => "font-sans",
    };
    let mut html = format!(
        "<div class=\"min-h-screen {font} p-8\" style=\"background:{}\">\n\
         <div class=\"max-w-3xl mx-auto space-y-4\">\n",
        config.background.to_hex()
    );
    for message in messages {
        if message.is_user() {
            html.push_str(&format!(
                "<div class=\"flex justify-end\"><div class=\"rounded-2xl px-4 py-2\" style=\"background:{}\">{}</div></div>\n",
                config.user_bubble.to_hex(),
                escape_text(&message.text)
            ));
        } else {
            html.push_str(&format!(
                "<div class=\"flex justify-start\"><div class=\"px-4 py-2\" style=\"color:{}\">{}</div></div>\n",
                config.primary.to_hex(),
                escape_text(&message.text)
            ));
        }
    }
    html.push_str("</div>\n</div>\n");
    html
}

/// Write an export page into `directory`, returning its path
pub fn write_export(
    directory: &Path,
    unix_millis: i64,
    title: &str,
    fragment: &str,
) -> Result<PathBuf> {
    if !directory.exists() {
        std::fs::create_dir_all(directory)?;
    }
    let path = directory.join(export_file_name(unix_millis));
    std::fs::write(&path, export_document(title, fragment))
        .with_context(|| format!("Failed to write export {}", path.display()))?;
    info!("Exported UI to {}", path.display());
    Ok(path)
}
