// ── Runtime connection configuration ──
//
// Describes *where* the rover lives on the network. Built by the CLI/TUI
// (usually via scout-config) and handed in; core never reads config files.

use std::time::Duration;

use url::Url;

/// Configuration for reaching a single rover.
#[derive(Debug, Clone)]
pub struct BotConfig {
    /// Control channel endpoint (e.g., `ws://192.168.4.1:81`).
    pub control_url: Url,
    /// Video feed endpoint, consumed passively by the rendering side.
    pub video_url: Url,
    /// How long one-shot callers wait for the channel to open.
    pub open_timeout: Duration,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            // The rover boots as a Wi-Fi AP with a fixed address; the feed
            // comes from a phone camera on the same network.
            control_url: "ws://192.168.4.1:81".parse().expect("static URL"),
            video_url: "http://192.168.147.242:4747/video".parse().expect("static URL"),
            open_timeout: Duration::from_secs(10),
        }
    }
}
