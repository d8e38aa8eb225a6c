//! Shared configuration for the scout CLI and TUI.
//!
//! One TOML file (`[bot]`, `[auth]`, `[defaults]`) merged with
//! `SCOUT_*`-prefixed environment variables, and translation to
//! `scout_core::BotConfig`. Both binaries depend on this crate.

use std::path::PathBuf;
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use scout_core::{BotConfig, LoginGate, auth};

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration shared by CLI and TUI.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct Config {
    /// Rover endpoints.
    #[serde(default)]
    pub bot: BotSection,

    /// Login gate credentials.
    #[serde(default)]
    pub auth: AuthSection,

    /// Global tuning defaults.
    #[serde(default)]
    pub defaults: Defaults,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct BotSection {
    /// Control channel address (e.g., "ws://192.168.4.1:81").
    #[serde(default = "default_control")]
    pub control: String,

    /// Video feed address, rendered passively.
    #[serde(default = "default_video")]
    pub video: String,
}

impl Default for BotSection {
    fn default() -> Self {
        Self {
            control: default_control(),
            video: default_video(),
        }
    }
}

fn default_control() -> String {
    "ws://192.168.4.1:81".into()
}
fn default_video() -> String {
    "http://192.168.147.242:4747/video".into()
}

#[derive(Debug, Deserialize, Serialize)]
pub struct AuthSection {
    /// Username for the local login gate.
    #[serde(default = "default_username")]
    pub username: String,

    /// Password for the local login gate (plaintext by design -- the gate
    /// is a local comparison, not a server credential).
    #[serde(default = "default_password")]
    pub password: String,
}

impl Default for AuthSection {
    fn default() -> Self {
        Self {
            username: default_username(),
            password: default_password(),
        }
    }
}

fn default_username() -> String {
    auth::DEFAULT_USERNAME.into()
}
fn default_password() -> String {
    auth::DEFAULT_PASSWORD.into()
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Defaults {
    /// Seconds a one-shot caller waits for the control channel to open.
    /// Single-word key so `SCOUT_DEFAULTS_TIMEOUT` nests to it cleanly.
    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            timeout: default_timeout(),
        }
    }
}

fn default_timeout() -> u64 {
    10
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("dev", "scoutctl", "scout").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("scout");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    let config = figment().extract()?;
    Ok(config)
}

/// Load config, returning the defaults if the file doesn't exist.
pub fn load_config_or_default() -> Config {
    load_config().unwrap_or_default()
}

fn figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(config_path()))
        .merge(Env::prefixed("SCOUT_").split("_"))
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<(), ConfigError> {
    let path = config_path();
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(&path, toml_str)?;
    Ok(())
}

// ── Translation to runtime types ────────────────────────────────────

/// Build a `BotConfig` from the loaded configuration.
pub fn to_bot_config(cfg: &Config) -> Result<BotConfig, ConfigError> {
    let control_url = cfg.bot.control.parse().map_err(|_| ConfigError::Validation {
        field: "bot.control".into(),
        reason: format!("invalid URL: {}", cfg.bot.control),
    })?;
    let video_url = cfg.bot.video.parse().map_err(|_| ConfigError::Validation {
        field: "bot.video".into(),
        reason: format!("invalid URL: {}", cfg.bot.video),
    })?;

    Ok(BotConfig {
        control_url,
        video_url,
        open_timeout: Duration::from_secs(cfg.defaults.timeout),
    })
}

/// Build the login gate from the loaded configuration.
pub fn to_login_gate(cfg: &Config) -> LoginGate {
    LoginGate::new(
        cfg.auth.username.clone(),
        SecretString::from(cfg.auth.password.clone()),
    )
}

// ── Tests ───────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_the_rover() {
        let cfg = Config::default();
        assert_eq!(cfg.bot.control, "ws://192.168.4.1:81");
        assert_eq!(cfg.bot.video, "http://192.168.147.242:4747/video");
        assert_eq!(cfg.auth.username, "adthi");
        assert_eq!(cfg.auth.password, "12345678");
        assert_eq!(cfg.defaults.timeout, 10);
    }

    #[test]
    fn defaults_translate_to_bot_config() {
        let cfg = Config::default();
        let bot = to_bot_config(&cfg).expect("defaults must be valid");
        assert_eq!(bot.control_url.as_str(), "ws://192.168.4.1:81/");
        assert_eq!(bot.open_timeout, Duration::from_secs(10));
    }

    #[test]
    fn invalid_control_url_is_a_validation_error() {
        let cfg = Config {
            bot: BotSection {
                control: "not a url".into(),
                ..BotSection::default()
            },
            ..Config::default()
        };
        let err = to_bot_config(&cfg).expect_err("must fail");
        assert!(matches!(err, ConfigError::Validation { ref field, .. } if field == "bot.control"));
    }

    #[test]
    fn env_overrides_take_precedence() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("SCOUT_BOT_CONTROL", "ws://10.0.0.9:81");
            jail.set_env("SCOUT_AUTH_USERNAME", "operator");
            jail.set_env("SCOUT_DEFAULTS_TIMEOUT", "3");

            let config: Config = Figment::new()
                .merge(Serialized::defaults(Config::default()))
                .merge(Env::prefixed("SCOUT_").split("_"))
                .extract()?;

            assert_eq!(config.bot.control, "ws://10.0.0.9:81");
            assert_eq!(config.auth.username, "operator");
            assert_eq!(config.auth.password, "12345678");
            assert_eq!(config.defaults.timeout, 3);
            Ok(())
        });
    }

    #[test]
    fn toml_file_overrides_defaults() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(
                "config.toml",
                r#"
                [bot]
                control = "ws://192.168.1.50:81"

                [defaults]
                timeout = 3
                "#,
            )?;

            let config: Config = Figment::new()
                .merge(Serialized::defaults(Config::default()))
                .merge(Toml::file("config.toml"))
                .extract()?;

            assert_eq!(config.bot.control, "ws://192.168.1.50:81");
            assert_eq!(config.bot.video, "http://192.168.147.242:4747/video");
            assert_eq!(config.defaults.timeout, 3);
            Ok(())
        });
    }

    #[test]
    fn config_round_trips_through_toml() {
        let cfg = Config::default();
        let text = toml::to_string_pretty(&cfg).expect("serialize");
        let back: Config = toml::from_str(&text).expect("parse");
        assert_eq!(back.bot.control, cfg.bot.control);
        assert_eq!(back.auth.username, cfg.auth.username);
    }
}
