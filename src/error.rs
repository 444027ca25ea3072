//! Error types for notification delivery.

use thiserror::Error;

/// Failures raised by a webhook transport before any body is parsed.
#[derive(Error, Debug)]
pub enum TransportError {
    /// Connection refused, DNS failure, timeout and friends.
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("HTTP status {status}, body: {body}")]
    Status { status: u16, body: String },
}

impl TransportError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, TransportError::Request(e) if e.is_timeout())
    }
}

/// The single classified error a failed notification attempt produces.
#[derive(Error, Debug)]
pub enum NoticeError {
    /// The receiver or process configuration cannot produce a request.
    #[error("invalid notification configuration: {0}")]
    Configuration(String),

    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The platform answered with a body of an unexpected shape.
    #[error("unexpected webhook response: {source}")]
    Protocol {
        #[source]
        source: serde_json::Error,
        body: String,
    },

    /// The platform processed the request and reported failure.
    #[error("{0}")]
    Rejected(String),
}

impl NoticeError {
    /// A stable label for logs and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            NoticeError::Configuration(_) => "configuration",
            NoticeError::Transport(_) => "transport",
            NoticeError::Protocol { .. } => "protocol",
            NoticeError::Rejected(_) => "rejected",
        }
    }
}
