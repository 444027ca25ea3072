//! HTTP transports for webhook delivery.

use crate::error::TransportError;
use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, error};

/// Posts a JSON payload and hands back the raw body of a 2xx response.
#[async_trait]
pub trait WebhookTransport: Send + Sync {
    async fn post_json(&self, url: &str, payload: &Value) -> Result<String, TransportError>;
}

/// A transport backed by a shared `reqwest` connection pool.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
    timeout: Duration,
}

impl ReqwestTransport {
    /// Creates a new `ReqwestTransport` with its own connection pool.
    /// `timeout` is applied to every request.
    pub fn new(timeout: Duration) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder().build()?;
        Ok(Self { client, timeout })
    }
}

#[async_trait]
impl WebhookTransport for ReqwestTransport {
    async fn post_json(&self, url: &str, payload: &Value) -> Result<String, TransportError> {
        let response = self
            .client
            .post(url)
            .timeout(self.timeout)
            .json(payload)
            .send()
            .await
            .map_err(|e| {
                // The URL carries the bot token.
                let e = e.without_url();
                error!(error = %e, "HTTP request to webhook failed");
                TransportError::Request(e)
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(status = %status, body = %body, "Webhook answered with an error status");
            return Err(TransportError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| TransportError::Request(e.without_url()))?;
        debug!(status = %status, bytes = body.len(), "Webhook answered");
        Ok(body)
    }
}
