//! Configuration management for tgnotice
//!
//! This module defines the main `Config` struct and its sub-structs. It uses
//! the `figment` crate to layer built-in defaults, an optional TOML file,
//! `TGNOTICE_` environment variables and command-line arguments.

use crate::cli::Cli;
use crate::formatting::{FALLBACK_TITLE, TITLE_KEY};
use anyhow::{bail, Result};
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;

/// The main configuration struct for the application.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Config {
    /// The logging level for the application.
    pub log_level: String,
    /// Telegram Bot API settings.
    pub telegram: TelegramConfig,
    /// Localized strings, keyed by message key.
    #[serde(default)]
    pub i18n: HashMap<String, String>,
}

/// Configuration for the Telegram Bot API webhook.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct TelegramConfig {
    /// Endpoint template with a single `%s` slot for the bot token.
    pub webhook_url: String,
    /// Per-request HTTP timeout in milliseconds.
    pub timeout_ms: u64,
}

impl TelegramConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Substitutes the bot token into the endpoint template.
    pub fn webhook_url_for(&self, bot_token: &str) -> String {
        self.webhook_url.replacen("%s", bot_token, 1)
    }
}

impl Default for TelegramConfig {
    fn default() -> Self {
        Self {
            webhook_url: "https://api.telegram.org/bot%s/sendMessage".to_string(),
            timeout_ms: 10_000,
        }
    }
}

impl Config {
    /// Builds the provider chain without extracting it.
    fn figment(cli: &Cli) -> Figment {
        let mut figment = Figment::new().merge(Serialized::defaults(Config::default()));
        if let Some(path) = &cli.config {
            figment = figment.merge(Toml::file_exact(path));
        }
        figment
            // e.g. TGNOTICE_TELEGRAM__TIMEOUT_MS=5000
            .merge(Env::prefixed("TGNOTICE_").split("__"))
            .merge(cli)
    }

    /// Loads and validates the configuration.
    pub fn load(cli: &Cli) -> Result<Self> {
        let config: Config = Self::figment(cli).extract()?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let slots = self.telegram.webhook_url.matches("%s").count();
        if slots != 1 {
            bail!(
                "telegram.webhook_url must contain exactly one %s slot, found {}",
                slots
            );
        }
        if self.telegram.timeout_ms == 0 {
            bail!("telegram.timeout_ms must be greater than zero");
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            telegram: TelegramConfig::default(),
            i18n: HashMap::from([(TITLE_KEY.to_string(), FALLBACK_TITLE.to_string())]),
        }
    }
}
