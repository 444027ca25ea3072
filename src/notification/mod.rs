//! Delivers rendered alert messages to notification channels.
//!
//! The channel implementations talk to the outside world only through the
//! [`transport::WebhookTransport`] trait, so tests can substitute a fake.
pub mod telegram;
pub mod transport;

pub use telegram::{evaluate, TelegramNotifier};
pub use transport::{ReqwestTransport, WebhookTransport};
