//! Settings panel widget
//!
//! Theme presets, the AI UI cloner (reference image + generate), account
//! status and saved layouts, drawn as a centered modal over the simulated UI.

#[cfg(test)]
mod tests;

mod styles;

use omnichat_app::settings_items::{settings_items, SettingsItem};
use omnichat_app::state::{AppState, UiMode};
use omnichat_core::AppTheme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use super::modal_overlay;
use super::TextField;
use crate::theme::{icons, styles as theme_styles};

pub const GENERATING_MESSAGE: &str =
    "AI is writing HTML & Tailwind CSS... This can take up to 20 seconds.";

const PANEL_WIDTH: u16 = 78;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Themes,
    Cloner,
    Account,
    Layouts,
}

impl Section {
    fn of(item: SettingsItem) -> Section {
        match item {
            SettingsItem::Preset(_) => Section::Themes,
            SettingsItem::ImagePath | SettingsItem::GenerateUi | SettingsItem::ClearImage => {
                Section::Cloner
            }
            SettingsItem::SignIn | SettingsItem::SignOut | SettingsItem::RefreshLayouts => {
                Section::Account
            }
            SettingsItem::SavedLayout(_) => Section::Layouts,
        }
    }

    fn title(self) -> &'static str {
        match self {
            Section::Themes => "THEMES",
            Section::Cloner => "AI UI CLONER",
            Section::Account => "ACCOUNT",
            Section::Layouts => "SAVED LAYOUTS",
        }
    }
}

pub struct SettingsPanel<'a> {
    state: &'a AppState,
}

impl<'a> SettingsPanel<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    fn generating(&self) -> bool {
        self.state.busy.generating_layout
    }

    fn item_label(&self, item: SettingsItem) -> (String, bool) {
        let state = self.state;
        match item {
            SettingsItem::Preset(theme) => {
                let mark = if state.theme() == theme {
                    icons::CHECK
                } else {
                    " "
                };
                (format!("{} {}", mark, theme.name()), self.generating())
            }
            SettingsItem::ImagePath => {
                let label = match &state.settings_panel.image {
                    Some(image) => format!(
                        "Reference image: {} ({}, {} KB)",
                        image.path.display(),
                        image.data.mime,
                        image.data.decoded_len().div_ceil(1024)
                    ),
                    None if state.settings_panel.loading_image => {
                        format!("Loading image {}", icons::spinner(state.spinner_frame))
                    }
                    None => "Reference image: none  (Enter to choose a file)".to_string(),
                };
                (label, self.generating())
            }
            SettingsItem::GenerateUi => ("Generate UI".to_string(), self.generating()),
            SettingsItem::ClearImage => ("Clear image".to_string(), self.generating()),
            SettingsItem::SignIn => ("Sign in".to_string(), state.busy.signing_in),
            SettingsItem::SignOut => ("Sign out".to_string(), false),
            SettingsItem::RefreshLayouts => {
                let label = if state.layouts_loading {
                    format!("Refresh list {}", icons::spinner(state.spinner_frame))
                } else {
                    "Refresh list".to_string()
                };
                (label, state.layouts_loading)
            }
            SettingsItem::SavedLayout(index) => match state.saved_layouts.get(index) {
                Some(record) => {
                    let created = record
                        .created_at_local()
                        .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
                        .unwrap_or_default();
                    (format!("{:<36} {}", record.name, created), false)
                }
                None => (String::new(), true),
            },
        }
    }

    /// Lines after a section's rows, and the notes shown in them
    fn section_notes(&self, section: Section) -> Vec<Line<'static>> {
        let state = self.state;
        match section {
            Section::Cloner if self.generating() => vec![Line::from(vec![
                Span::raw("   "),
                Span::styled(icons::spinner(state.spinner_frame), theme_styles::accent()),
                Span::styled(format!(" {}", GENERATING_MESSAGE), theme_styles::accent()),
            ])],
            Section::Account => {
                let status = match &state.identity {
                    Some(identity) => format!("   Signed in as {}", identity.label()),
                    None => "   Sign in to save and load layouts".to_string(),
                };
                let mut notes = vec![Line::styled(status, theme_styles::text_secondary())];
                if state.is_signed_in() && state.saved_layouts.is_empty() {
                    let text = if state.layouts_loading {
                        "   Loading layouts..."
                    } else {
                        "   No saved layouts yet"
                    };
                    notes.push(Line::styled(text, theme_styles::text_muted()));
                }
                notes
            }
            _ => Vec::new(),
        }
    }

    /// Panel body lines and the line index of the selected row
    fn lines(&self) -> (Vec<Line<'static>>, usize) {
        let state = self.state;
        let items = settings_items(state);
        let editing_path = state.ui_mode == UiMode::ImagePathInput;

        let mut lines: Vec<Line<'static>> = Vec::new();
        let mut selected_line = 0;
        let mut current: Option<Section> = None;

        for (index, item) in items.iter().copied().enumerate() {
            let section = Section::of(item);
            if current != Some(section) {
                if let Some(previous) = current {
                    lines.extend(self.section_notes(previous));
                    lines.push(Line::default());
                }
                lines.push(Line::styled(format!(" {}", section.title()), styles::section_header()));
                current = Some(section);
            }

            let selected = index == state.settings_panel.selected;
            if selected {
                selected_line = lines.len();
            }

            // The path row is replaced by the editor while typing
            if item == SettingsItem::ImagePath && editing_path {
                lines.push(Line::styled("   Image path:", theme_styles::accent()));
                continue;
            }

            let (label, disabled) = self.item_label(item);
            lines.push(Line::from(vec![
                Span::styled(styles::indicator(selected), theme_styles::accent()),
                Span::styled(label, styles::row_style(selected, disabled)),
            ]));
        }
        if let Some(last) = current {
            lines.extend(self.section_notes(last));
        }
        if !state.cloud_enabled {
            lines.push(Line::default());
            lines.push(Line::styled(" ACCOUNT", styles::section_header()));
            lines.push(Line::styled(
                "   Cloud sync is not configured (see [cloud] in config.toml)",
                theme_styles::text_muted(),
            ));
        }

        (lines, selected_line)
    }

    /// Row of the image path editor within `lines`
    fn path_editor_row(&self, lines: &[Line<'_>]) -> Option<usize> {
        if self.state.ui_mode != UiMode::ImagePathInput {
            return None;
        }
        lines
            .iter()
            .position(|l| l.spans.first().is_some_and(|s| s.content == "   Image path:"))
    }
}

impl Widget for SettingsPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let height = area.height.saturating_sub(2);
        let modal = modal_overlay::prepare_modal(buf, area, PANEL_WIDTH, height);

        let title = match self.state.theme() {
            AppTheme::Custom => "Settings · Custom UI".to_string(),
            theme => format!("Settings · {}", theme.name()),
        };
        let block = theme_styles::modal_block(&title);
        let inner = block.inner(modal);
        block.render(modal, buf);
        if inner.height == 0 {
            return;
        }

        let (lines, selected_line) = self.lines();
        let editor_row = self.path_editor_row(&lines);

        // Keep the selection in view
        let visible = inner.height as usize;
        let offset = selected_line.saturating_sub(visible.saturating_sub(2));

        Paragraph::new(lines)
            .scroll((u16::try_from(offset).unwrap_or(u16::MAX), 0))
            .render(inner, buf);

        if let Some(row) = editor_row.and_then(|r| r.checked_sub(offset)) {
            if row < visible {
                let label_width = "   Image path: ".len() as u16;
                let field = Rect::new(
                    inner.x + label_width,
                    inner.y + row as u16,
                    inner.width.saturating_sub(label_width + 1),
                    1,
                );
                TextField::new(&self.state.settings_panel.image_path)
                    .placeholder("/path/to/screenshot.png")
                    .focused(true)
                    .render(field, buf);
            }
        }
    }
}
