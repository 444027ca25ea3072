//! Core domain types and service traits for tgnotice
//!
//! This module defines the transient records a caller hands to the notifier
//! and the trait contract every notification channel implements.

use crate::error::NoticeError;
use async_trait::async_trait;
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// The destination and credentials for a Telegram bot notification.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct NoticeReceiver {
    pub id: u64,
    pub name: String,
    /// Bot API token, e.g. `123456:ABC-DEF...`
    pub tg_bot_token: String,
    /// Target chat or user identifier.
    pub tg_user_id: String,
    /// Forum topic to post into, if the chat is a forum supergroup.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tg_message_thread_id: Option<i64>,
}

impl NoticeReceiver {
    /// Returns the bot token with its secret part masked, safe for logs.
    pub fn masked_token(&self) -> String {
        match self.tg_bot_token.split_once(':') {
            Some((bot_id, _)) => format!("{}:***", bot_id),
            None if self.tg_bot_token.is_empty() => String::new(),
            None => "***".to_string(),
        }
    }
}

/// A reusable message skeleton combined with alert data.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct NoticeTemplate {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub content: String,
}

/// A batch of correlated alerts delivered as one notification.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GroupAlert {
    /// Either `firing` or `resolved`.
    #[serde(default = "default_status")]
    pub status: String,
    #[serde(default)]
    pub alerts: Vec<SingleAlert>,
}

fn default_status() -> String {
    "firing".to_string()
}

impl Default for GroupAlert {
    fn default() -> Self {
        Self {
            status: default_status(),
            alerts: Vec::new(),
        }
    }
}

impl GroupAlert {
    pub fn new(alerts: Vec<SingleAlert>) -> Self {
        Self {
            alerts,
            ..Default::default()
        }
    }
}

/// One firing or resolved condition, described by its labels.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct SingleAlert {
    #[serde(default)]
    pub labels: Labels,
}

impl SingleAlert {
    /// Builds an alert from `(name, value)` pairs, keeping their order.
    pub fn with_labels<K, V, I>(labels: I) -> Self
    where
        K: Into<String>,
        V: Into<String>,
        I: IntoIterator<Item = (K, V)>,
    {
        let mut map = Labels::default();
        for (key, value) in labels {
            map.insert(key, value);
        }
        Self { labels: map }
    }
}

/// Label mapping that iterates in insertion order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Labels(Vec<(String, String)>);

impl Labels {
    /// Inserts a label. An existing key keeps its position and takes the new value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.0.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.0.push((key, value)),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Serialize for Labels {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (key, value) in &self.0 {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Labels {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct LabelsVisitor;

        impl<'de> Visitor<'de> for LabelsVisitor {
            type Value = Labels;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of label names to string values")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Labels, A::Error> {
                let mut labels = Labels::default();
                while let Some((key, value)) = access.next_entry::<String, String>()? {
                    labels.insert(key, value);
                }
                Ok(labels)
            }
        }

        deserializer.deserialize_map(LabelsVisitor)
    }
}

/// The body the Bot API answers with.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct WebhookResponse {
    pub ok: bool,
    /// Telegram omits this on success.
    #[serde(default)]
    pub description: String,
}

// =============================================================================
// Service Traits
// =============================================================================

/// Delivers a group alert to one notification channel.
#[async_trait]
pub trait AlertNotifyHandler: Send + Sync {
    /// A short, stable name for the channel (e.g., "telegram").
    fn channel(&self) -> &'static str;

    /// Renders and delivers a notification.
    ///
    /// # Returns
    /// * `Ok(())` if the platform accepted the message
    /// * `Err` with exactly one classified [`NoticeError`] otherwise
    async fn send(
        &self,
        receiver: &NoticeReceiver,
        template: &NoticeTemplate,
        group_alert: &GroupAlert,
    ) -> Result<(), NoticeError>;
}
