//! Styling helpers for settings panel rows

use ratatui::style::{Modifier, Style};

use crate::theme::{palette, styles};

/// Width of the selection indicator column
pub const INDICATOR_WIDTH: usize = 3;

pub fn section_header() -> Style {
    Style::default()
        .fg(palette::TEXT_SECONDARY)
        .add_modifier(Modifier::BOLD)
}

pub fn row_style(is_selected: bool, is_disabled: bool) -> Style {
    match (is_selected, is_disabled) {
        (true, _) => styles::focused_selected(),
        (false, true) => styles::disabled(),
        (false, false) => styles::text_primary(),
    }
}

pub fn indicator(is_selected: bool) -> &'static str {
    if is_selected {
        " ▶ "
    } else {
        "   "
    }
}
