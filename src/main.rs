//! tgnotice - send one alert notification through a Telegram bot.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::Path;
use tgnotice::{
    build_notifier, cli::Cli, config::Config, AlertNotifyHandler, GroupAlert, NoticeReceiver,
    NoticeTemplate,
};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = Config::load(&cli).context("Failed to load configuration")?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!(
        webhook_url = %config.telegram.webhook_url,
        timeout_ms = config.telegram.timeout_ms,
        "tgnotice starting up"
    );

    let receiver = NoticeReceiver {
        id: 0,
        name: "cli".to_string(),
        tg_bot_token: cli.bot_token.clone(),
        tg_user_id: cli.chat_id.clone(),
        tg_message_thread_id: cli.thread_id,
    };
    let template = NoticeTemplate {
        id: 0,
        name: "cli".to_string(),
        content: match &cli.template {
            Some(path) => read_file(path)?,
            None => String::new(),
        },
    };
    let group_alert: GroupAlert = match &cli.alerts {
        Some(path) => serde_json::from_str(&read_file(path)?)
            .with_context(|| format!("Invalid group alert in {}", path.display()))?,
        None => GroupAlert::default(),
    };

    let notifier = build_notifier(&config)?;
    if let Err(e) = notifier.send(&receiver, &template, &group_alert).await {
        error!(kind = e.kind(), "Notification was not delivered: {}", e);
        return Err(e.into());
    }

    info!(alerts = group_alert.alerts.len(), "Notification delivered");
    Ok(())
}

fn read_file(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}
