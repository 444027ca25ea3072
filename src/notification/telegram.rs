//! A notifier that delivers alerts through the Telegram Bot API.

use crate::config::TelegramConfig;
use crate::core::{AlertNotifyHandler, GroupAlert, NoticeReceiver, NoticeTemplate, WebhookResponse};
use crate::error::NoticeError;
use crate::formatting::MessageComposer;
use crate::notification::transport::WebhookTransport;
use async_trait::async_trait;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// Message used when the platform rejects a request without saying why.
pub const GENERIC_FAILURE: &str = "notification failed";

/// Composes, dispatches and evaluates Telegram notifications.
///
/// Holds no mutable state; clones share the same transport.
pub struct TelegramNotifier<T: WebhookTransport> {
    config: TelegramConfig,
    composer: MessageComposer,
    transport: Arc<T>,
}

impl<T: WebhookTransport> Clone for TelegramNotifier<T> {
    fn clone(&self) -> Self {
        Self {
            config: self.config.clone(),
            composer: self.composer.clone(),
            transport: self.transport.clone(),
        }
    }
}

impl<T: WebhookTransport> TelegramNotifier<T> {
    /// Creates a new `TelegramNotifier`.
    pub fn new(config: TelegramConfig, composer: MessageComposer, transport: Arc<T>) -> Self {
        Self {
            config,
            composer,
            transport,
        }
    }

    pub fn composer(&self) -> &MessageComposer {
        &self.composer
    }

    /// Posts `text` to the receiver's chat and decodes the platform's answer.
    ///
    /// Fails with [`NoticeError::Configuration`] before any network call when
    /// the receiver lacks a bot token or chat identifier.
    pub async fn dispatch(
        &self,
        receiver: &NoticeReceiver,
        text: &str,
    ) -> Result<WebhookResponse, NoticeError> {
        let token = receiver.tg_bot_token.trim();
        let chat_id = receiver.tg_user_id.trim();
        if token.is_empty() {
            return Err(NoticeError::Configuration(format!(
                "receiver '{}' has no Telegram bot token",
                receiver.name
            )));
        }
        if chat_id.is_empty() {
            return Err(NoticeError::Configuration(format!(
                "receiver '{}' has no Telegram chat id",
                receiver.name
            )));
        }

        let url = self.config.webhook_url_for(token);
        let payload = build_payload(chat_id, text, receiver.tg_message_thread_id);

        debug!(chat_id, "Posting message to Telegram");
        let body = self.transport.post_json(&url, &payload).await?;

        serde_json::from_str(&body).map_err(|source| NoticeError::Protocol { source, body })
    }
}

fn build_payload(chat_id: &str, text: &str, thread_id: Option<i64>) -> Value {
    let mut payload = json!({
        "chat_id": chat_id,
        "text": text,
        "disable_web_page_preview": true,
    });
    if let Some(thread_id) = thread_id {
        payload["message_thread_id"] = json!(thread_id);
    }
    payload
}

/// Translates the platform's answer into success or a rejection.
pub fn evaluate(response: &WebhookResponse) -> Result<(), NoticeError> {
    if response.ok {
        return Ok(());
    }
    let description = if response.description.is_empty() {
        GENERIC_FAILURE.to_string()
    } else {
        response.description.clone()
    };
    Err(NoticeError::Rejected(description))
}

#[async_trait]
impl<T: WebhookTransport> AlertNotifyHandler for TelegramNotifier<T> {
    fn channel(&self) -> &'static str {
        "telegram"
    }

    #[instrument(
        skip_all,
        fields(
            receiver = %receiver.name,
            token = %receiver.masked_token(),
            alerts = group_alert.alerts.len()
        )
    )]
    async fn send(
        &self,
        receiver: &NoticeReceiver,
        template: &NoticeTemplate,
        group_alert: &GroupAlert,
    ) -> Result<(), NoticeError> {
        let text = self.composer.compose(template, group_alert);
        let result = self
            .dispatch(receiver, &text)
            .await
            .and_then(|response| evaluate(&response));

        let channel = self.channel();
        match &result {
            Ok(()) => {
                info!(channel, "Sent notification");
                metrics::counter!("notifications_sent_total", "channel" => channel).increment(1);
            }
            Err(e) => {
                warn!(channel, kind = e.kind(), error = %e, "Notification failed");
                metrics::counter!(
                    "notifications_failed_total",
                    "channel" => channel,
                    "kind" => e.kind()
                )
                .increment(1);
            }
        }
        result
    }
}
