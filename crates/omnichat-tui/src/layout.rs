//! Screen layout definitions for the TUI
//!
//! The screen is a one-row header, the simulated UI body, and a one-row
//! status line. The body is split differently for preset chats and for a
//! custom layout.

use ratatui::layout::{Constraint, Layout, Rect};

/// Sidebar is hidden below this body width
pub const SIDEBAR_MIN_BODY_WIDTH: u16 = 60;
pub const SIDEBAR_WIDTH: u16 = 24;
/// Bordered single-line input
pub const INPUT_HEIGHT: u16 = 3;

/// Screen areas for the main layout
#[derive(Debug, Clone, Copy)]
pub struct ScreenAreas {
    /// Title, active theme and account
    pub header: Rect,

    /// The simulated UI
    pub body: Rect,

    /// Notices or key hints
    pub status: Rect,
}

/// Areas of a preset chat
#[derive(Debug, Clone, Copy)]
pub struct ChatAreas {
    pub sidebar: Option<Rect>,
    pub messages: Rect,
    pub input: Rect,
}

/// Areas of a custom layout
#[derive(Debug, Clone, Copy)]
pub struct CustomAreas {
    pub markup: Rect,
    /// Present while the refinement bar is open
    pub refine: Option<Rect>,
}

pub fn create(area: Rect) -> ScreenAreas {
    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(3),
        Constraint::Length(1),
    ])
    .split(area);

    ScreenAreas {
        header: chunks[0],
        body: chunks[1],
        status: chunks[2],
    }
}

pub fn split_chat(body: Rect) -> ChatAreas {
    let (sidebar, main) = if body.width >= SIDEBAR_MIN_BODY_WIDTH {
        let cols = Layout::horizontal([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(20)])
            .split(body);
        (Some(cols[0]), cols[1])
    } else {
        (None, body)
    };

    let rows = Layout::vertical([Constraint::Min(1), Constraint::Length(INPUT_HEIGHT)]).split(main);

    ChatAreas {
        sidebar,
        messages: rows[0],
        input: rows[1],
    }
}

pub fn split_custom(body: Rect, refine_open: bool) -> CustomAreas {
    if !refine_open {
        return CustomAreas {
            markup: body,
            refine: None,
        };
    }

    let rows = Layout::vertical([Constraint::Min(1), Constraint::Length(INPUT_HEIGHT)]).split(body);
    CustomAreas {
        markup: rows[0],
        refine: Some(rows[1]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_screen_areas_contiguous() {
        let area = Rect::new(0, 0, 80, 24);
        let layout = create(area);

        assert_eq!(layout.header.height, 1);
        assert_eq!(layout.status.height, 1);
        assert_eq!(layout.body.y, 1);
        assert_eq!(
            layout.header.height + layout.body.height + layout.status.height,
            area.height
        );
    }

    #[test]
    fn test_chat_has_sidebar_on_wide_body() {
        let chat = split_chat(Rect::new(0, 1, 80, 22));
        let sidebar = chat.sidebar.expect("sidebar on wide terminal");
        assert_eq!(sidebar.width, SIDEBAR_WIDTH);
        assert_eq!(chat.messages.x, SIDEBAR_WIDTH);
        assert_eq!(chat.input.height, INPUT_HEIGHT);
    }

    #[test]
    fn test_chat_drops_sidebar_on_narrow_body() {
        let chat = split_chat(Rect::new(0, 1, 40, 10));
        assert!(chat.sidebar.is_none());
        assert_eq!(chat.messages.width, 40);
        assert_eq!(chat.messages.height + chat.input.height, 10);
    }

    #[test]
    fn test_custom_refine_bar_only_when_open() {
        let body = Rect::new(0, 1, 80, 22);
        let closed = split_custom(body, false);
        assert!(closed.refine.is_none());
        assert_eq!(closed.markup, body);

        let open = split_custom(body, true);
        let refine = open.refine.expect("refine bar");
        assert_eq!(refine.height, INPUT_HEIGHT);
        assert_eq!(open.markup.height + refine.height, body.height);
    }
}
