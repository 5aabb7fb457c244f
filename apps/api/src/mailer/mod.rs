//! Mail transport seam.
//!
//! Handlers only see [`MailTransport`]; production uses [`SmtpRelay`], tests
//! swap in a stub. Credentials travel with each call because every request
//! opens its own relay session.

pub mod smtp;

use async_trait::async_trait;
use thiserror::Error;

pub use smtp::SmtpRelay;

#[derive(Debug, Error)]
pub enum MailError {
    #[error("invalid email address: {0}")]
    InvalidAddress(String),

    #[error("failed to build message: {0}")]
    Build(String),

    #[error("SMTP error: {0}")]
    Smtp(String),
}

/// Relay account and destination, resolved from server configuration.
#[derive(Clone)]
pub struct MailCredentials {
    pub sender: String,
    pub secret: String,
    pub recipient: String,
}

impl std::fmt::Debug for MailCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MailCredentials")
            .field("sender", &self.sender)
            .field("secret", &"<redacted>")
            .field("recipient", &self.recipient)
            .finish()
    }
}

/// A fully composed message. Sender and recipient come from the credentials.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingMail {
    pub subject: String,
    pub html_body: String,
}

#[async_trait]
pub trait MailTransport: Send + Sync {
    async fn send(&self, credentials: &MailCredentials, mail: &OutgoingMail) -> Result<(), MailError>;
}
