//! Save-layout dialogs: layout name, sign-in confirmation, credentials

use omnichat_app::handler::SIGN_IN_PROMPT;
use omnichat_app::state::{SignInField, SignInForm};
use omnichat_app::text_input::TextInput;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{Paragraph, Widget, Wrap},
};

use super::modal_overlay;
use super::TextField;
use crate::theme::{icons, styles};

const DIALOG_WIDTH: u16 = 56;

/// Bordered single-line field with a label in its title
fn render_field(
    label: &str,
    input: &TextInput,
    focused: bool,
    masked: bool,
    area: Rect,
    buf: &mut Buffer,
) {
    let block = styles::glass_block(focused).title(format!(" {} ", label));
    let inner = block.inner(area);
    block.render(area, buf);
    TextField::new(input)
        .focused(focused)
        .masked(masked)
        .render(inner, buf);
}

/// Name prompt shown before a layout is saved
pub struct SaveDialog<'a> {
    name: &'a TextInput,
}

impl<'a> SaveDialog<'a> {
    pub fn new(name: &'a TextInput) -> Self {
        Self { name }
    }
}

impl Widget for SaveDialog<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let modal = modal_overlay::prepare_modal(buf, area, DIALOG_WIDTH, 8);
        let block = styles::modal_block("Save layout");
        let inner = block.inner(modal);
        block.render(modal, buf);

        let rows = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(inner);

        Paragraph::new("Enter a name for your layout:")
            .style(styles::text_primary())
            .render(rows[0], buf);
        render_field("Name", self.name, true, false, rows[1], buf);

        let mut hints = styles::key_hint("Enter", " save  ").to_vec();
        hints.extend(styles::key_hint("Esc", " cancel"));
        Paragraph::new(Line::from(hints))
            .alignment(Alignment::Center)
            .render(rows[2], buf);
    }
}

/// "Sign in now?" before saving while signed out
pub struct ConfirmSignInDialog;

impl Widget for ConfirmSignInDialog {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let modal = modal_overlay::prepare_modal(buf, area, DIALOG_WIDTH, 7);
        let block = styles::modal_block("Sign in required");
        let inner = block.inner(modal);
        block.render(modal, buf);

        let mut buttons = styles::key_hint("[y]", " Sign in   ").to_vec();
        buttons.extend(styles::key_hint("[n]", " Cancel"));

        Paragraph::new(vec![
            Line::default(),
            Line::styled(SIGN_IN_PROMPT, styles::text_primary()),
            Line::default(),
            Line::from(buttons),
        ])
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .render(inner, buf);
    }
}

/// Email and password form
pub struct SignInDialog<'a> {
    form: &'a SignInForm,
    signing_in: bool,
    spinner_frame: usize,
}

impl<'a> SignInDialog<'a> {
    pub fn new(form: &'a SignInForm) -> Self {
        Self {
            form,
            signing_in: false,
            spinner_frame: 0,
        }
    }

    pub fn signing_in(mut self, signing_in: bool, spinner_frame: usize) -> Self {
        self.signing_in = signing_in;
        self.spinner_frame = spinner_frame;
        self
    }
}

impl Widget for SignInDialog<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let modal = modal_overlay::prepare_modal(buf, area, DIALOG_WIDTH, 11);
        let block = styles::modal_block("Sign in");
        let inner = block.inner(modal);
        block.render(modal, buf);

        let rows = Layout::vertical([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(inner);

        let editing = !self.signing_in;
        render_field(
            "Email",
            &self.form.email,
            editing && self.form.focus == SignInField::Email,
            false,
            rows[0],
            buf,
        );
        render_field(
            "Password",
            &self.form.password,
            editing && self.form.focus == SignInField::Password,
            true,
            rows[1],
            buf,
        );

        let status = if self.signing_in {
            Line::from(vec![
                Span::styled(icons::spinner(self.spinner_frame), styles::accent()),
                Span::styled(" Signing in...", styles::text_secondary()),
            ])
        } else if let Some(error) = &self.form.error {
            Line::styled(error.clone(), styles::error_text())
        } else {
            Line::default()
        };
        Paragraph::new(status)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .render(rows[2].union(rows[3]), buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::TestTerminal;

    #[test]
    fn test_save_dialog_shows_name() {
        let name = TextInput::with_value("My Custom UI");
        let mut term = TestTerminal::new();
        term.render_widget(SaveDialog::new(&name), term.area());
        assert!(term.buffer_contains("Save layout"));
        assert!(term.buffer_contains("My Custom UI"));
    }

    #[test]
    fn test_confirm_dialog_shows_prompt() {
        let mut term = TestTerminal::new();
        term.render_widget(ConfirmSignInDialog, term.area());
        assert!(term.buffer_contains("Sign in now?"));
        assert!(term.buffer_contains("[y]"));
        assert!(term.buffer_contains("[n]"));
    }

    #[test]
    fn test_sign_in_masks_password() {
        let form = SignInForm {
            email: TextInput::with_value("ada@example.com"),
            password: TextInput::with_value("hunter2"),
            ..SignInForm::default()
        };
        let mut term = TestTerminal::new();
        term.render_widget(SignInDialog::new(&form), term.area());
        assert!(term.buffer_contains("ada@example.com"));
        assert!(!term.buffer_contains("hunter2"));
        assert!(term.buffer_contains("•••••••"));
    }

    #[test]
    fn test_sign_in_error_and_progress() {
        let form = SignInForm {
            error: Some("INVALID_PASSWORD".into()),
            ..SignInForm::default()
        };
        let mut term = TestTerminal::new();
        term.render_widget(SignInDialog::new(&form), term.area());
        assert!(term.buffer_contains("INVALID_PASSWORD"));

        term.render_widget(SignInDialog::new(&form).signing_in(true, 0), term.area());
        assert!(term.buffer_contains("Signing in..."));
    }
}
