/// tgnotice - Telegram bot alert notifications
///
/// This library renders a group of alerts into a message, posts it to the
/// Telegram Bot API and classifies the outcome.
pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod formatting;
pub mod notification;

// Re-export core types for convenience
pub use self::core::*;
pub use error::{NoticeError, TransportError};

use config::Config;
use formatting::MessageComposer;
use notification::{ReqwestTransport, TelegramNotifier};
use std::sync::Arc;

/// Builds a notifier backed by a fresh `reqwest` connection pool.
pub fn build_notifier(config: &Config) -> Result<TelegramNotifier<ReqwestTransport>, NoticeError> {
    let transport = ReqwestTransport::new(config.telegram.timeout())?;
    Ok(TelegramNotifier::new(
        config.telegram.clone(),
        MessageComposer::new(config.i18n.clone()),
        Arc::new(transport),
    ))
}
