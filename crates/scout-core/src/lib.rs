// scout-core: domain layer between scout-link and consumers (CLI/TUI).

pub mod auth;
pub mod command;
pub mod config;
pub mod error;
pub mod manager;

// ── Primary re-exports ──────────────────────────────────────────────
pub use auth::LoginGate;
pub use command::{Command, CommandKind};
pub use config::BotConfig;
pub use error::CoreError;
pub use manager::ConnectionManager;

// Consumers render the link state directly; re-export it so they never
// need a scout-link dependency just to match on it.
pub use scout_link::{LinkState, probe_feed};
