//! Connection status indicator -- ●/◐/○ with color mapping.

use ratatui::style::Style;
use ratatui::text::Span;
use scout_core::LinkState;

use crate::theme;

/// Returns a styled `Span` with the status dot and label for the status bar.
/// `None` means no connection has been opened yet.
pub fn status_span(state: Option<LinkState>) -> Span<'static> {
    let (text, color) = match state {
        None => ("○ offline", theme::BORDER_GRAY),
        Some(LinkState::Connecting) => ("◐ connecting", theme::ELECTRIC_YELLOW),
        Some(LinkState::Open) => ("● connected", theme::SUCCESS_GREEN),
        Some(LinkState::Closed) => ("○ closed", theme::DIM_WHITE),
        Some(LinkState::Errored) => ("○ error", theme::ERROR_RED),
    };
    Span::styled(text, Style::default().fg(color))
}

/// The status dot character without styling (for tests and raw output).
pub fn status_char(state: Option<LinkState>) -> &'static str {
    match state {
        Some(LinkState::Connecting) => "◐",
        Some(LinkState::Open) => "●",
        None | Some(LinkState::Closed | LinkState::Errored) => "○",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_an_open_link_gets_the_solid_dot() {
        assert_eq!(status_char(Some(LinkState::Open)), "●");
        for state in [
            None,
            Some(LinkState::Connecting),
            Some(LinkState::Closed),
            Some(LinkState::Errored),
        ] {
            assert_ne!(status_char(state), "●", "{state:?}");
        }
    }
}
