//! Application core -- event loop, screen management, action dispatch.

use std::collections::HashMap;
use std::time::Duration;

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use scout_core::{BotConfig, ConnectionManager, LinkState, LoginGate};

use crate::action::Action;
use crate::component::Component;
use crate::event::{Event, EventReader};
use crate::link_bridge;
use crate::screen::ScreenId;
use crate::screens::create_screens;
use crate::theme;
use crate::tui::Tui;
use crate::widgets::status_indicator;

const FEED_PROBE_TIMEOUT: Duration = Duration::from_secs(5);

/// Top-level application state and event loop.
pub struct App {
    /// Current active screen.
    active_screen: ScreenId,
    /// All screen components, keyed by ScreenId.
    screens: HashMap<ScreenId, Box<dyn Component>>,
    /// Whether the app should keep running.
    running: bool,
    /// Help overlay visibility.
    help_visible: bool,
    /// Last observed link state, None before login.
    link_state: Option<LinkState>,
    /// Rover addresses, fixed for the lifetime of the app.
    config: BotConfig,
    /// The single live connection, opened after login.
    manager: Option<ConnectionManager>,
    /// Stops the link bridge task on shutdown.
    bridge_cancel: CancellationToken,
    /// Action sender -- components can dispatch actions through this.
    action_tx: mpsc::UnboundedSender<Action>,
    /// Action receiver -- main loop drains this.
    action_rx: mpsc::UnboundedReceiver<Action>,
}

impl App {
    pub fn new(config: BotConfig, gate: LoginGate) -> Self {
        let (action_tx, action_rx) = mpsc::unbounded_channel();

        let screens: HashMap<ScreenId, Box<dyn Component>> =
            create_screens(gate, config.video_url.clone())
                .into_iter()
                .collect();

        Self {
            active_screen: ScreenId::Login,
            screens,
            running: true,
            help_visible: false,
            link_state: None,
            config,
            manager: None,
            bridge_cancel: CancellationToken::new(),
            action_tx,
            action_rx,
        }
    }

    /// Initialize all screen components with the action sender.
    fn init_screens(&mut self) -> Result<()> {
        for screen in self.screens.values_mut() {
            screen.init(self.action_tx.clone())?;
        }
        if let Some(screen) = self.screens.get_mut(&self.active_screen) {
            screen.set_focused(true);
        }
        Ok(())
    }

    /// Run the main event loop. This is the heart of the TUI.
    pub async fn run(&mut self) -> Result<()> {
        let mut tui = Tui::new()?;
        tui.enter()?;
        self.init_screens()?;

        let mut events = EventReader::new(
            Duration::from_millis(250), // 4 Hz tick
            Duration::from_millis(33),  // ~30 FPS render
        );

        info!("TUI event loop started");

        while self.running {
            let Some(event) = events.next().await else {
                break;
            };

            match event {
                Event::Key(key) => {
                    if let Some(action) = self.handle_key_event(key)? {
                        self.action_tx.send(action)?;
                    }
                }
                Event::Resize(w, h) => {
                    self.action_tx.send(Action::Resize(w, h))?;
                }
                Event::Tick => {
                    self.action_tx.send(Action::Tick)?;
                }
                Event::Render => {
                    self.action_tx.send(Action::Render)?;
                }
            }

            // Drain and process all queued actions
            while let Ok(action) = self.action_rx.try_recv() {
                self.process_action(&action)?;

                if let Action::Render = action {
                    tui.draw(|frame| self.render(frame))?;
                }
            }
        }

        events.stop();
        self.bridge_cancel.cancel();
        if let Some(manager) = &self.manager {
            manager.close();
        }
        info!("TUI event loop ended");
        Ok(())
    }

    /// Map a key event to an action. Global keys are handled here;
    /// screen-specific keys are delegated to the active screen component.
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if self.help_visible {
            return match key.code {
                KeyCode::Esc | KeyCode::Char('?') => Ok(Some(Action::ToggleHelp)),
                _ => Ok(None),
            };
        }

        if key.modifiers == KeyModifiers::CONTROL && key.code == KeyCode::Char('c') {
            return Ok(Some(Action::Quit));
        }

        // The login screen owns the keyboard for text entry
        if self.active_screen == ScreenId::Login {
            if let Some(screen) = self.screens.get_mut(&self.active_screen) {
                return screen.handle_key_event(key);
            }
            return Ok(None);
        }

        match (key.modifiers, key.code) {
            (KeyModifiers::NONE, KeyCode::Char('q')) => return Ok(Some(Action::Quit)),
            (KeyModifiers::NONE, KeyCode::Char('?')) => return Ok(Some(Action::ToggleHelp)),
            _ => {}
        }

        if let Some(screen) = self.screens.get_mut(&self.active_screen) {
            return screen.handle_key_event(key);
        }

        Ok(None)
    }

    /// Process a single action -- update app state and propagate to components.
    fn process_action(&mut self, action: &Action) -> Result<()> {
        match action {
            Action::Quit => {
                self.running = false;
            }

            Action::ToggleHelp => {
                self.help_visible = !self.help_visible;
            }

            Action::SwitchScreen(target) => {
                if *target != self.active_screen {
                    info!("switching screen: {} -> {}", self.active_screen, target);
                    if let Some(screen) = self.screens.get_mut(&self.active_screen) {
                        screen.set_focused(false);
                    }
                    self.active_screen = *target;
                    if let Some(screen) = self.screens.get_mut(&self.active_screen) {
                        screen.set_focused(true);
                    }
                }
            }

            Action::LoginSucceeded => {
                self.connect();
                self.action_tx.send(Action::SwitchScreen(ScreenId::Control))?;
            }

            Action::LinkStateChanged(state) => {
                self.link_state = Some(*state);
                self.forward_to_active(action)?;
            }

            Action::SendCommand(command) => {
                if let Some(manager) = &self.manager {
                    manager.send(*command);
                } else {
                    warn!(%command, "no connection; dropping command");
                }
                self.forward_to_active(action)?;
            }

            // Render is handled in the main loop; resizes reflow on draw
            Action::Render | Action::Resize(_, _) => {}

            // Everything else (Tick, FeedProbed, ...) goes to the active screen
            other => {
                self.forward_to_active(other)?;
            }
        }

        Ok(())
    }

    fn forward_to_active(&mut self, action: &Action) -> Result<()> {
        if let Some(screen) = self.screens.get_mut(&self.active_screen) {
            if let Some(follow_up) = screen.update(action)? {
                self.action_tx.send(follow_up)?;
            }
        }
        Ok(())
    }

    /// Open the control channel and spawn the bridge + feed probe tasks.
    fn connect(&mut self) {
        info!(control = %self.config.control_url, "login accepted; opening control channel");
        let manager = ConnectionManager::open(self.config.clone());

        self.bridge_cancel = CancellationToken::new();
        tokio::spawn(link_bridge::run(
            manager.state(),
            self.action_tx.clone(),
            self.bridge_cancel.clone(),
        ));

        let video_url = self.config.video_url.clone();
        let probe_tx = self.action_tx.clone();
        tokio::spawn(async move {
            let result = scout_core::probe_feed(&video_url, FEED_PROBE_TIMEOUT)
                .await
                .map_err(|e| e.to_string());
            let _ = probe_tx.send(Action::FeedProbed(result));
        });

        self.manager = Some(manager);
    }

    // ── Rendering ───────────────────────────────────────────────────

    /// Render the full application frame.
    fn render(&self, frame: &mut Frame) {
        let area = frame.area();

        let layout = Layout::vertical([
            Constraint::Min(1),    // Screen content
            Constraint::Length(1), // Status bar
        ])
        .split(area);

        if let Some(screen) = self.screens.get(&self.active_screen) {
            screen.render(frame, layout[0]);
        }

        self.render_status_bar(frame, layout[1]);

        if self.help_visible {
            self.render_help_overlay(frame, area);
        }
    }

    /// Render the bottom status bar with connection status and key hints.
    fn render_status_bar(&self, frame: &mut Frame, area: Rect) {
        let hints = match self.active_screen {
            ScreenId::Login => " │ Ctrl+C quit",
            ScreenId::Control => " │ ? help  q quit",
        };

        let line = Line::from(vec![
            Span::raw(" "),
            status_indicator::status_span(self.link_state),
            Span::styled(hints, theme::key_hint()),
        ]);

        frame.render_widget(Paragraph::new(line), area);
    }

    /// Render the help overlay centered on screen.
    fn render_help_overlay(&self, frame: &mut Frame, area: Rect) {
        let help_width = 46u16.min(area.width.saturating_sub(4));
        let help_height = 16u16.min(area.height.saturating_sub(4));

        let x = (area.width.saturating_sub(help_width)) / 2;
        let y = (area.height.saturating_sub(help_height)) / 2;
        let help_area = Rect::new(area.x + x, area.y + y, help_width, help_height);

        frame.render_widget(
            Block::default().style(Style::default().bg(theme::BG_DARK)),
            help_area,
        );

        let block = Block::default()
            .title(" Keyboard Shortcuts ")
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border_focused());

        let inner = block.inner(help_area);
        frame.render_widget(block, help_area);

        let hint = |keys: &'static str, what: &'static str| {
            Line::from(vec![
                Span::styled(format!("  {keys:<10}"), theme::key_hint_key()),
                Span::styled(what, theme::key_hint()),
            ])
        };

        let help_text = vec![
            Line::from(""),
            Line::from(Span::styled(
                "  Drive",
                Style::default().fg(theme::NEON_CYAN),
            )),
            hint("w/\u{2191}", "Forward"),
            hint("s/\u{2193}", "Backward"),
            hint("a/\u{2190} d/\u{2192}", "Left / right"),
            hint("space", "Stop"),
            Line::from(""),
            Line::from(Span::styled(
                "  Camera",
                Style::default().fg(theme::NEON_CYAN),
            )),
            hint("h / l", "Pan left / right"),
            hint("k / j", "Tilt up / down"),
            Line::from(""),
            hint("q", "Quit"),
            Line::from(""),
            Line::from(Span::styled(
                "              Esc or ? to close",
                theme::key_hint(),
            )),
        ];

        frame.render_widget(Paragraph::new(help_text), inner);
    }
}
