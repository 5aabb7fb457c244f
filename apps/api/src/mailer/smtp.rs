use async_trait::async_trait;
use lettre::message::{header::ContentType, Mailbox};
use lettre::transport::smtp::authentication::Credentials;
use lettre::transport::smtp::client::{Tls, TlsParameters};
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tracing::{debug, info};

use super::{MailCredentials, MailError, MailTransport, OutgoingMail};

/// SMTP relay with opportunistic STARTTLS and credential auth.
///
/// Stateless apart from the relay address: a fresh transport is built for
/// every send and dropped afterwards.
#[derive(Debug, Clone)]
pub struct SmtpRelay {
    host: String,
    port: u16,
}

impl SmtpRelay {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    fn transport(
        &self,
        credentials: &MailCredentials,
    ) -> Result<AsyncSmtpTransport<Tokio1Executor>, MailError> {
        // STARTTLS when offered; the relay certificate is not verified.
        let tls = TlsParameters::builder(self.host.clone())
            .dangerous_accept_invalid_certs(true)
            .build()
            .map_err(|e| MailError::Smtp(e.to_string()))?;

        Ok(
            AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(self.host.as_str())
                .port(self.port)
                .tls(Tls::Opportunistic(tls))
                .credentials(Credentials::new(
                    credentials.sender.clone(),
                    credentials.secret.clone(),
                ))
                .build(),
        )
    }
}

fn parse_mailbox(raw: &str) -> Result<Mailbox, MailError> {
    raw.parse::<Mailbox>()
        .map_err(|e| MailError::InvalidAddress(format!("{raw}: {e}")))
}

/// Builds the wire message: from the relay account to the recipient.
pub fn build_message(credentials: &MailCredentials, mail: &OutgoingMail) -> Result<Message, MailError> {
    Message::builder()
        .from(parse_mailbox(&credentials.sender)?)
        .to(parse_mailbox(&credentials.recipient)?)
        .subject(mail.subject.as_str())
        .header(ContentType::TEXT_HTML)
        .body(mail.html_body.clone())
        .map_err(|e| MailError::Build(e.to_string()))
}

#[async_trait]
impl MailTransport for SmtpRelay {
    async fn send(&self, credentials: &MailCredentials, mail: &OutgoingMail) -> Result<(), MailError> {
        let message = build_message(credentials, mail)?;
        let transport = self.transport(credentials)?;

        debug!("Opening SMTP session to {}:{}", self.host, self.port);
        let response = transport
            .send(message)
            .await
            .map_err(|e| MailError::Smtp(e.to_string()))?;

        info!(
            "Relay accepted contact message (code {})",
            response.code()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn creds(sender: &str) -> MailCredentials {
        MailCredentials {
            sender: sender.to_string(),
            secret: "pw".to_string(),
            recipient: "inbox@example.com".to_string(),
        }
    }

    fn mail() -> OutgoingMail {
        OutgoingMail {
            subject: "New Contact Form Submission: Hi".to_string(),
            html_body: "<p>hello</p>".to_string(),
        }
    }

    #[test]
    fn test_build_message_sets_headers() {
        let message = build_message(&creds("me@example.com"), &mail()).unwrap();
        let raw = String::from_utf8(message.formatted()).unwrap();
        assert!(raw.contains("From: me@example.com"));
        assert!(raw.contains("To: inbox@example.com"));
        assert!(raw.contains("Subject: New Contact Form Submission: Hi"));
        assert!(raw.contains("text/html"));
    }

    #[test]
    fn test_build_message_rejects_bad_sender() {
        let err = build_message(&creds("not an address"), &mail()).unwrap_err();
        assert!(matches!(err, MailError::InvalidAddress(_)));
    }

    #[tokio::test]
    async fn test_send_to_unreachable_relay_is_smtp_error() {
        // Port 1 on loopback refuses connections.
        let relay = SmtpRelay::new("127.0.0.1", 1);
        let err = relay.send(&creds("me@example.com"), &mail()).await.unwrap_err();
        assert!(matches!(err, MailError::Smtp(_)));
    }
}
