//! Injected overlay elements drawn over the simulated UI.
//!
//! Elements are painted in insertion order, so the newest one ends up on
//! top. Banners stack along the top edge, toasts and generated widgets stack
//! in the top-right corner, and modals dim the whole body.

use omnichat_app::overlay::OverlayRegistry;
use omnichat_core::{visible_text, AccentColor, ElementKind, WidgetProps};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Widget, Wrap},
};

use super::chat_view::wrap_words;
use super::modal_overlay;
use crate::theme::{icons, palette, styles};

const TOAST_WIDTH: u16 = 44;
const TOAST_HEIGHT: u16 = 4;
const RAW_MAX_TEXT_ROWS: usize = 4;
const MODAL_WIDTH: u16 = 52;
const MODAL_HEIGHT: u16 = 9;

pub struct OverlayLayer<'a> {
    overlays: &'a OverlayRegistry,
}

impl<'a> OverlayLayer<'a> {
    pub fn new(overlays: &'a OverlayRegistry) -> Self {
        Self { overlays }
    }
}

impl Widget for OverlayLayer<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut banner_y = area.y;
        let mut corner_y = area.y;

        for element in self.overlays.iter() {
            match &element.kind {
                ElementKind::BetaBanner(props) => {
                    if banner_y >= area.bottom() {
                        continue;
                    }
                    let rect = Rect::new(area.x, banner_y, area.width, 1);
                    render_banner(props, rect, buf);
                    banner_y += 1;
                    corner_y = corner_y.max(banner_y);
                }
                ElementKind::ErrorToast(props) => {
                    let Some(rect) = corner_rect(area, corner_y, TOAST_HEIGHT) else {
                        continue;
                    };
                    render_toast(props, rect, buf);
                    corner_y = rect.bottom();
                }
                ElementKind::RawMarkup(markup) => {
                    let rows = wrap_words(&visible_text(markup), TOAST_WIDTH as usize - 4);
                    let shown = rows.len().min(RAW_MAX_TEXT_ROWS);
                    let Some(rect) = corner_rect(area, corner_y, shown as u16 + 2) else {
                        continue;
                    };
                    render_raw(&rows[..shown], rect, buf);
                    corner_y = rect.bottom();
                }
                ElementKind::ServerDownModal(props) => {
                    render_modal(props, area, buf);
                }
            }
        }
    }
}

/// Next free slot in the top-right stack, if it still fits
fn corner_rect(area: Rect, y: u16, height: u16) -> Option<Rect> {
    let width = TOAST_WIDTH.min(area.width);
    if y + height > area.bottom() {
        return None;
    }
    Some(Rect::new(area.right().saturating_sub(width + 1), y, width, height))
}

fn widget_line(props: &WidgetProps) -> Line<'static> {
    Line::from(vec![
        Span::raw(format!(" {} ", icons::widget_icon(props.icon))),
        Span::styled(props.title.clone(), Style::default().add_modifier(Modifier::BOLD)),
    ])
}

fn render_banner(props: &WidgetProps, area: Rect, buf: &mut Buffer) {
    let style = Style::default()
        .fg(palette::TEXT_BRIGHT)
        .bg(palette::accent_color(props.color));
    let mut line = widget_line(props);
    line.spans.push(Span::raw(format!("  {}", props.description)));
    Paragraph::new(line.centered()).style(style).render(area, buf);
}

fn render_toast(props: &WidgetProps, area: Rect, buf: &mut Buffer) {
    let (fg, bg) = match props.color {
        AccentColor::Red => (palette::WIDGET_RED_FG, palette::WIDGET_RED_BG),
        other => (palette::TEXT_BRIGHT, palette::accent_color(other)),
    };
    Clear.render(area, buf);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(fg))
        .style(Style::default().fg(fg).bg(bg));
    let inner = block.inner(area);
    block.render(area, buf);

    Paragraph::new(vec![
        widget_line(props),
        Line::from(format!("   {}", props.description)),
    ])
    .wrap(Wrap { trim: false })
    .render(inner, buf);
}

fn render_raw(rows: &[String], area: Rect, buf: &mut Buffer) {
    Clear.render(area, buf);
    let block = styles::modal_block("Generated widget");
    let inner = block.inner(area);
    block.render(area, buf);

    let lines: Vec<Line> = rows
        .iter()
        .map(|r| Line::styled(r.clone(), styles::text_primary()))
        .collect();
    Paragraph::new(lines).render(inner, buf);
}

fn render_modal(props: &WidgetProps, area: Rect, buf: &mut Buffer) {
    let modal = modal_overlay::prepare_modal(buf, area, MODAL_WIDTH, MODAL_HEIGHT);
    let accent = palette::accent_color(props.color);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(accent))
        .style(Style::default().bg(palette::POPUP_BG));
    let inner = block.inner(modal);
    block.render(modal, buf);

    let lines = vec![
        Line::default(),
        Line::styled(
            format!("{}  {}", icons::widget_icon(props.icon), props.title),
            Style::default().fg(accent).add_modifier(Modifier::BOLD),
        ),
        Line::default(),
        Line::styled(props.description.clone(), styles::text_primary()),
        Line::default(),
        Line::from(styles::key_hint("Enter", " Dismiss").to_vec()),
    ];
    Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .render(inner, buf);
}
