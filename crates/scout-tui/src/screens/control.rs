//! Control screen -- drive/camera keys and the video feed panel.
//!
//! Key presses map straight to command tokens; the panel reflects the
//! connection state and shows "Connecting to bot..." until the channel
//! opens. The video feed is never decoded here, only its address and a
//! one-shot reachability result are shown.

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};
use url::Url;

use scout_core::{Command, LinkState};

use crate::action::Action;
use crate::component::Component;
use crate::theme;

/// Map a key press to a command token. Drive on WASD/arrows, camera on
/// HJKL, space for the all-stop.
pub fn command_for_key(key: KeyEvent) -> Option<Command> {
    match key.code {
        KeyCode::Up | KeyCode::Char('w') => Some(Command::Forward),
        KeyCode::Down | KeyCode::Char('s') => Some(Command::Backward),
        KeyCode::Left | KeyCode::Char('a') => Some(Command::Left),
        KeyCode::Right | KeyCode::Char('d') => Some(Command::Right),
        KeyCode::Char(' ') => Some(Command::Stop),
        KeyCode::Char('h') => Some(Command::PanLeft),
        KeyCode::Char('l') => Some(Command::PanRight),
        KeyCode::Char('k') => Some(Command::TiltUp),
        KeyCode::Char('j') => Some(Command::TiltDown),
        _ => None,
    }
}

pub struct ControlScreen {
    focused: bool,
    video_url: Url,
    link_state: Option<LinkState>,
    feed_status: Option<std::result::Result<(), String>>,
    last_command: Option<Command>,
    throbber_state: throbber_widgets_tui::ThrobberState,
}

impl ControlScreen {
    pub fn new(video_url: Url) -> Self {
        Self {
            focused: false,
            video_url,
            link_state: None,
            feed_status: None,
            last_command: None,
            throbber_state: throbber_widgets_tui::ThrobberState::default(),
        }
    }

    fn is_open(&self) -> bool {
        self.link_state == Some(LinkState::Open)
    }

    // ── Rendering helpers ───────────────────────────────────────────

    fn render_feed_panel(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .title(" Video Feed ")
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border_default());

        let inner = block.inner(area);
        frame.render_widget(block, area);

        let status = match &self.feed_status {
            None => Span::styled("probing...", Style::default().fg(theme::ELECTRIC_YELLOW)),
            Some(Ok(())) => Span::styled(
                "\u{2713} reachable",
                Style::default().fg(theme::SUCCESS_GREEN),
            ),
            Some(Err(reason)) => Span::styled(
                format!("\u{2717} {reason}"),
                Style::default().fg(theme::ERROR_RED),
            ),
        };

        let lines = vec![
            Line::from(vec![
                Span::styled(" Feed: ", Style::default().fg(theme::DIM_WHITE)),
                Span::styled(
                    self.video_url.to_string(),
                    Style::default().fg(theme::NEON_CYAN),
                ),
            ]),
            Line::from(vec![Span::raw(" "), status]),
            Line::from(Span::styled(
                " Open the URL in any player to watch the stream.",
                theme::key_hint(),
            )),
        ];

        frame.render_widget(Paragraph::new(lines), inner);
    }

    fn render_control_panel(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .title(" Controls ")
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(if self.focused {
                theme::border_focused()
            } else {
                theme::border_default()
            });

        let inner = block.inner(area);
        frame.render_widget(block, area);

        match self.link_state {
            Some(LinkState::Open) => self.render_key_grid(frame, inner),
            Some(LinkState::Connecting) | None => {
                let throbber = throbber_widgets_tui::Throbber::default()
                    .label("Connecting to bot...")
                    .style(Style::default().fg(theme::NEON_CYAN))
                    .throbber_style(Style::default().fg(theme::ELECTRIC_PURPLE));
                frame.render_stateful_widget(throbber, inner, &mut self.throbber_state.clone());
            }
            Some(LinkState::Closed) => {
                frame.render_widget(
                    Paragraph::new(Span::styled(
                        "Connection closed. Restart to reconnect.",
                        Style::default().fg(theme::DIM_WHITE),
                    ))
                    .alignment(Alignment::Center),
                    inner,
                );
            }
            Some(LinkState::Errored) => {
                frame.render_widget(
                    Paragraph::new(Span::styled(
                        "Could not reach the bot. Check its Wi-Fi and restart.",
                        Style::default().fg(theme::ERROR_RED),
                    ))
                    .alignment(Alignment::Center),
                    inner,
                );
            }
        }
    }

    fn key_cap(&self, keys: &str, command: Command) -> Vec<Span<'static>> {
        let style = if self.last_command == Some(command) {
            theme::key_active()
        } else {
            theme::key_idle()
        };
        vec![
            Span::styled(format!(" {keys:<7}"), theme::key_hint_key()),
            Span::styled(format!("{:<10}", command.label()), style),
        ]
    }

    fn render_key_grid(&self, frame: &mut Frame, area: Rect) {
        let mut lines = vec![
            Line::from(Span::styled(
                " Drive",
                Style::default()
                    .fg(theme::NEON_CYAN)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(
                [
                    self.key_cap("w/\u{2191}", Command::Forward),
                    self.key_cap("s/\u{2193}", Command::Backward),
                ]
                .concat(),
            ),
            Line::from(
                [
                    self.key_cap("a/\u{2190}", Command::Left),
                    self.key_cap("d/\u{2192}", Command::Right),
                ]
                .concat(),
            ),
            Line::from(self.key_cap("space", Command::Stop)),
            Line::from(""),
            Line::from(Span::styled(
                " Camera",
                Style::default()
                    .fg(theme::NEON_CYAN)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(
                [
                    self.key_cap("h", Command::PanLeft),
                    self.key_cap("l", Command::PanRight),
                ]
                .concat(),
            ),
            Line::from(
                [
                    self.key_cap("k", Command::TiltUp),
                    self.key_cap("j", Command::TiltDown),
                ]
                .concat(),
            ),
        ];

        if let Some(cmd) = self.last_command {
            lines.push(Line::from(""));
            lines.push(Line::from(vec![
                Span::styled(" sent: ", theme::key_hint()),
                Span::styled(cmd.token(), Style::default().fg(theme::SUCCESS_GREEN)),
            ]));
        }

        frame.render_widget(Paragraph::new(lines), area);
    }
}

impl Component for ControlScreen {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        Ok(command_for_key(key).map(Action::SendCommand))
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        match action {
            Action::LinkStateChanged(state) => {
                self.link_state = Some(*state);
            }
            Action::SendCommand(cmd) => {
                self.last_command = Some(*cmd);
            }
            Action::FeedProbed(result) => {
                self.feed_status = Some(result.clone());
            }
            Action::Tick => {
                if !self.is_open() {
                    self.throbber_state.calc_next();
                }
            }
            _ => {}
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let layout = Layout::vertical([
            Constraint::Length(5), // feed panel
            Constraint::Min(1),    // controls
        ])
        .split(area);

        self.render_feed_panel(frame, layout[0]);
        self.render_control_panel(frame, layout[1]);
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    fn id(&self) -> &str {
        "control"
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use crossterm::event::KeyModifiers;
    use scout_core::CommandKind;

    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn drive_keys_map_to_drive_commands() {
        let cases = [
            (KeyCode::Up, Command::Forward),
            (KeyCode::Char('w'), Command::Forward),
            (KeyCode::Down, Command::Backward),
            (KeyCode::Char('s'), Command::Backward),
            (KeyCode::Left, Command::Left),
            (KeyCode::Char('a'), Command::Left),
            (KeyCode::Right, Command::Right),
            (KeyCode::Char('d'), Command::Right),
            (KeyCode::Char(' '), Command::Stop),
        ];
        for (code, expected) in cases {
            assert_eq!(command_for_key(key(code)), Some(expected), "{code:?}");
            assert_eq!(expected.kind(), CommandKind::Drive);
        }
    }

    #[test]
    fn camera_keys_map_to_camera_commands() {
        let cases = [
            (KeyCode::Char('h'), Command::PanLeft),
            (KeyCode::Char('l'), Command::PanRight),
            (KeyCode::Char('k'), Command::TiltUp),
            (KeyCode::Char('j'), Command::TiltDown),
        ];
        for (code, expected) in cases {
            assert_eq!(command_for_key(key(code)), Some(expected), "{code:?}");
            assert_eq!(expected.kind(), CommandKind::Camera);
        }
    }

    #[test]
    fn unmapped_keys_send_nothing() {
        for code in [
            KeyCode::Char('x'),
            KeyCode::Enter,
            KeyCode::Esc,
            KeyCode::Tab,
        ] {
            assert_eq!(command_for_key(key(code)), None, "{code:?}");
        }
    }

    #[test]
    fn key_presses_become_send_command_actions() {
        let mut s = ControlScreen::new("http://192.168.147.242:4747/video".parse().unwrap());
        let action = s.handle_key_event(key(KeyCode::Char('w'))).unwrap();
        assert!(matches!(
            action,
            Some(Action::SendCommand(Command::Forward))
        ));
    }

    #[test]
    fn state_and_probe_updates_are_recorded() {
        let mut s = ControlScreen::new("http://192.168.147.242:4747/video".parse().unwrap());
        s.update(&Action::LinkStateChanged(LinkState::Open)).unwrap();
        assert!(s.is_open());

        s.update(&Action::FeedProbed(Err("connection refused".into())))
            .unwrap();
        assert!(matches!(s.feed_status, Some(Err(_))));

        s.update(&Action::SendCommand(Command::Stop)).unwrap();
        assert_eq!(s.last_command, Some(Command::Stop));
    }
}
