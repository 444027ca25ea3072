// src/formatting.rs

use crate::core::{GroupAlert, NoticeTemplate, SingleAlert};
use std::collections::HashMap;
use tracing::debug;

/// Localization key for the message title.
pub const TITLE_KEY: &str = "alerter.notify.title";
/// Title used when the localization map has no entry for [`TITLE_KEY`].
pub const FALLBACK_TITLE: &str = "Alert Notification";

/// Turns a template and a group of alerts into the final message text.
#[derive(Debug, Clone, Default)]
pub struct MessageComposer {
    i18n: HashMap<String, String>,
}

impl MessageComposer {
    pub fn new(i18n: HashMap<String, String>) -> Self {
        Self { i18n }
    }

    /// The localized title, or [`FALLBACK_TITLE`].
    pub fn title(&self) -> &str {
        match self.i18n.get(TITLE_KEY) {
            Some(title) => title.as_str(),
            None => {
                debug!(key = TITLE_KEY, "No localized title, using fallback");
                FALLBACK_TITLE
            }
        }
    }

    /// Renders the message. The alert blocks go wherever the template puts
    /// `${alerts}`, or after the content when it has no such placeholder.
    pub fn compose(&self, template: &NoticeTemplate, group_alert: &GroupAlert) -> String {
        let title = self.title();
        let alerts = render_alerts(&group_alert.alerts);
        let count = group_alert.alerts.len().to_string();

        let mut inline = false;
        let content = resolve_placeholders(&template.content, |name| match name {
            "title" => Some(title),
            "status" => Some(group_alert.status.as_str()),
            "count" => Some(count.as_str()),
            "alerts" => {
                inline = true;
                Some(alerts.as_str())
            }
            _ => None,
        });

        let mut message = String::from(title);
        if !content.is_empty() {
            message.push('\n');
            message.push_str(&content);
        }
        if !inline && !alerts.is_empty() {
            message.push_str("\n\n");
            message.push_str(&alerts);
        }
        message
    }
}

/// Replaces each `${name}` in one left-to-right pass. Substituted values are
/// copied as-is and never rescanned; unknown names stay verbatim.
fn resolve_placeholders<'a, F>(content: &str, mut lookup: F) -> String
where
    F: FnMut(&str) -> Option<&'a str>,
{
    let mut out = String::with_capacity(content.len());
    let mut rest = content;
    while let Some(start) = rest.find("${") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let value = after
            .find('}')
            .and_then(|end| lookup(&after[..end]).map(|value| (value, end)));
        match value {
            Some((value, end)) => {
                out.push_str(value);
                rest = &after[end + 1..];
            }
            None => {
                out.push_str("${");
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

/// One `key: value` line per label, alerts separated by a blank line.
fn render_alerts(alerts: &[SingleAlert]) -> String {
    alerts
        .iter()
        .map(format_alert)
        .filter(|block| !block.is_empty())
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn format_alert(alert: &SingleAlert) -> String {
    alert
        .labels
        .iter()
        .map(|(key, value)| format!("{}: {}", key, value))
        .collect::<Vec<_>>()
        .join("\n")
}
