//! Screen identifier enum.

use std::fmt;

/// Identifies each TUI screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ScreenId {
    /// Login gate -- the first thing shown, not reachable again after.
    #[default]
    Login,
    /// Drive and camera controls plus the video feed panel.
    Control,
}

impl ScreenId {
    /// Short label for the status bar.
    pub fn label(self) -> &'static str {
        match self {
            Self::Login => "Login",
            Self::Control => "Control",
        }
    }
}

impl fmt::Display for ScreenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
