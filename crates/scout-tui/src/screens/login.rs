//! Login gate screen -- the first thing shown on launch.
//!
//! Two text fields checked against [`LoginGate`]. A mismatch shows the
//! gate's message verbatim under the fields; a match emits
//! [`Action::LoginSucceeded`] and the app takes over.

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

use scout_core::LoginGate;

use crate::action::Action;
use crate::component::Component;
use crate::theme;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Username,
    Password,
}

pub struct LoginScreen {
    focused: bool,
    gate: LoginGate,
    username_input: String,
    password_input: String,
    field: Field,
    show_password: bool,
    error: Option<String>,
}

impl LoginScreen {
    pub fn new(gate: LoginGate) -> Self {
        Self {
            focused: false,
            gate,
            username_input: String::new(),
            password_input: String::new(),
            field: Field::Username,
            show_password: false,
            error: None,
        }
    }

    fn toggle_field(&mut self) {
        self.field = match self.field {
            Field::Username => Field::Password,
            Field::Password => Field::Username,
        };
    }

    fn active_input_mut(&mut self) -> &mut String {
        match self.field {
            Field::Username => &mut self.username_input,
            Field::Password => &mut self.password_input,
        }
    }

    /// Check the entered pair against the gate.
    fn submit(&mut self) -> Option<Action> {
        match self.gate.verify(&self.username_input, &self.password_input) {
            Ok(()) => Some(Action::LoginSucceeded),
            Err(e) => {
                self.error = Some(e.to_string());
                None
            }
        }
    }

    // ── Rendering helpers ───────────────────────────────────────────

    fn render_centered_panel(&self, frame: &mut Frame, area: Rect) -> Rect {
        let panel_w = 52u16.min(area.width.saturating_sub(4));
        let panel_h = 14u16.min(area.height.saturating_sub(2));
        let x = (area.width.saturating_sub(panel_w)) / 2;
        let y = (area.height.saturating_sub(panel_h)) / 2;
        let panel = Rect::new(area.x + x, area.y + y, panel_w, panel_h);

        frame.render_widget(
            Block::default().style(Style::default().bg(theme::BG_DARK)),
            panel,
        );

        let block = Block::default()
            .title(Line::from(vec![
                Span::raw(" "),
                Span::styled(
                    "Scout Login",
                    Style::default()
                        .fg(theme::NEON_CYAN)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw(" "),
            ]))
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(theme::ELECTRIC_PURPLE));

        let inner = block.inner(panel);
        frame.render_widget(block, panel);
        inner
    }

    fn render_input_field(
        &self,
        frame: &mut Frame,
        area: Rect,
        label: &str,
        value: &str,
        active: bool,
        masked: bool,
    ) {
        if area.height < 3 {
            return;
        }

        let label_area = Rect::new(area.x, area.y, area.width, 1);
        let label_style = if active {
            Style::default().fg(theme::NEON_CYAN)
        } else {
            Style::default().fg(theme::DIM_WHITE)
        };
        frame.render_widget(Paragraph::new(Span::styled(label, label_style)), label_area);

        let display = if masked && !value.is_empty() {
            "\u{25CF}".repeat(value.len())
        } else {
            value.to_string()
        };

        let border_color = if active {
            theme::ELECTRIC_PURPLE
        } else {
            theme::BORDER_GRAY
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(border_color));

        let block_area = Rect::new(area.x, area.y + 1, area.width, 3.min(area.height - 1));
        let inner = block.inner(block_area);
        frame.render_widget(block, block_area);

        // Cursor only in the active field, and only while this screen
        // owns the keyboard.
        let text = if active && self.focused {
            format!("{display}\u{2588}")
        } else {
            display
        };
        frame.render_widget(
            Paragraph::new(Span::styled(text, Style::default().fg(theme::NEON_CYAN))),
            inner,
        );
    }
}

impl Component for LoginScreen {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        // Clear the rejection on any edit, not on the submit itself
        if key.code != KeyCode::Enter {
            self.error = None;
        }

        match key.code {
            KeyCode::Enter => return Ok(self.submit()),
            KeyCode::Tab | KeyCode::Up | KeyCode::Down => self.toggle_field(),
            KeyCode::Backspace => {
                self.active_input_mut().pop();
            }
            KeyCode::Char(c) => {
                // Ctrl+U toggles password visibility
                if key.modifiers.contains(KeyModifiers::CONTROL) && c == 'u' {
                    self.show_password = !self.show_password;
                } else {
                    self.active_input_mut().push(c);
                }
            }
            _ => {}
        }

        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        frame.render_widget(
            Block::default().style(Style::default().bg(theme::BG_DARK)),
            area,
        );

        let inner = self.render_centered_panel(frame, area);

        let layout = Layout::vertical([
            Constraint::Length(4), // username
            Constraint::Length(4), // password
            Constraint::Length(1), // error
            Constraint::Min(0),
            Constraint::Length(1), // hints
        ])
        .split(inner);

        self.render_input_field(
            frame,
            layout[0],
            "  Username",
            &self.username_input,
            self.field == Field::Username,
            false,
        );
        self.render_input_field(
            frame,
            layout[1],
            "  Password",
            &self.password_input,
            self.field == Field::Password,
            !self.show_password,
        );

        if let Some(ref err) = self.error {
            frame.render_widget(
                Paragraph::new(Span::styled(err, Style::default().fg(theme::ERROR_RED)))
                    .alignment(Alignment::Center),
                layout[2],
            );
        }

        frame.render_widget(
            Paragraph::new(Span::styled(
                "Tab switch field  Enter sign in  Ctrl+C quit",
                theme::key_hint(),
            ))
            .alignment(Alignment::Center),
            layout[4],
        );
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    fn id(&self) -> &str {
        "login"
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use pretty_assertions::assert_eq;

    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_str(screen: &mut LoginScreen, text: &str) {
        for c in text.chars() {
            screen.handle_key_event(key(KeyCode::Char(c))).unwrap();
        }
    }

    fn screen() -> LoginScreen {
        LoginScreen::new(LoginGate::default())
    }

    #[test]
    fn shipped_credentials_unlock_the_control_screen() {
        let mut s = screen();
        type_str(&mut s, "adthi");
        s.handle_key_event(key(KeyCode::Tab)).unwrap();
        type_str(&mut s, "12345678");

        let action = s.handle_key_event(key(KeyCode::Enter)).unwrap();
        assert!(matches!(action, Some(Action::LoginSucceeded)));
        assert!(s.error.is_none());
    }

    #[test]
    fn a_mismatch_shows_the_exact_message_and_stays_put() {
        let mut s = screen();
        type_str(&mut s, "adthi");
        s.handle_key_event(key(KeyCode::Tab)).unwrap();
        type_str(&mut s, "nope");

        let action = s.handle_key_event(key(KeyCode::Enter)).unwrap();
        assert!(action.is_none());
        assert_eq!(
            s.error.as_deref(),
            Some("Wrong username or password ,pls correct it")
        );
    }

    #[test]
    fn editing_clears_the_rejection() {
        let mut s = screen();
        s.handle_key_event(key(KeyCode::Enter)).unwrap();
        assert!(s.error.is_some());

        s.handle_key_event(key(KeyCode::Char('a'))).unwrap();
        assert!(s.error.is_none());
    }

    #[test]
    fn tab_moves_typing_to_the_password_field() {
        let mut s = screen();
        type_str(&mut s, "ad");
        s.handle_key_event(key(KeyCode::Tab)).unwrap();
        type_str(&mut s, "pw");

        assert_eq!(s.username_input, "ad");
        assert_eq!(s.password_input, "pw");
    }

    #[test]
    fn backspace_edits_the_active_field() {
        let mut s = screen();
        type_str(&mut s, "adx");
        s.handle_key_event(key(KeyCode::Backspace)).unwrap();
        assert_eq!(s.username_input, "ad");
    }

    fn rendered_symbols(s: &LoginScreen) -> String {
        let backend = ratatui::backend::TestBackend::new(80, 24);
        let mut terminal = ratatui::Terminal::new(backend).unwrap();
        terminal.draw(|frame| s.render(frame, frame.area())).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(ratatui::buffer::Cell::symbol)
            .collect()
    }

    #[test]
    fn the_cursor_follows_screen_focus() {
        let mut s = screen();
        assert!(!rendered_symbols(&s).contains('\u{2588}'));

        s.set_focused(true);
        assert!(rendered_symbols(&s).contains('\u{2588}'));
    }
}
