//! Command-Line Interface (CLI) argument parsing.
//!
//! The arguments are merged on top of the configuration file and environment
//! variables, so `Cli` doubles as a `figment` provider.

use clap::Parser;
use figment::{
    value::{Dict, Map, Tag, Value},
    Error, Metadata, Profile, Provider,
};
use std::path::PathBuf;

/// Send one alert notification through a Telegram bot.
#[derive(Parser, Debug, Default)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to the TOML configuration file.
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Bot API token of the receiver.
    #[arg(long, value_name = "TOKEN", default_value = "")]
    pub bot_token: String,

    /// Target chat or user identifier.
    #[arg(long, value_name = "ID", default_value = "")]
    pub chat_id: String,

    /// Forum topic identifier.
    #[arg(long, value_name = "ID")]
    pub thread_id: Option<i64>,

    /// File holding the message template content.
    #[arg(short, long, value_name = "FILE")]
    pub template: Option<PathBuf>,

    /// JSON file holding the group alert.
    #[arg(short, long, value_name = "FILE")]
    pub alerts: Option<PathBuf>,

    /// Override the webhook URL template (one `%s` for the token).
    #[arg(long, value_name = "URL")]
    pub webhook_url: Option<String>,

    /// Override the HTTP timeout in milliseconds.
    #[arg(long, value_name = "MS")]
    pub timeout_ms: Option<u64>,

    /// Override the log level.
    #[arg(long, value_name = "LEVEL")]
    pub log_level: Option<String>,
}

impl Provider for Cli {
    fn metadata(&self) -> Metadata {
        Metadata::named("Command-Line Arguments")
    }

    fn data(&self) -> Result<Map<Profile, Dict>, Error> {
        let mut dict = Dict::new();

        if let Some(level) = &self.log_level {
            dict.insert("log_level".into(), Value::from(level.clone()));
        }

        let mut telegram = Dict::new();
        if let Some(url) = &self.webhook_url {
            telegram.insert("webhook_url".into(), Value::from(url.clone()));
        }
        if let Some(timeout) = self.timeout_ms {
            telegram.insert("timeout_ms".into(), Value::from(timeout));
        }
        if !telegram.is_empty() {
            dict.insert("telegram".into(), Value::Dict(Tag::Default, telegram));
        }

        let mut map = Map::new();
        map.insert(Profile::Default, dict);
        Ok(map)
    }
}
