use std::sync::Arc;

use crate::config::MailSettings;
use crate::mailer::MailTransport;
use crate::projects::store::ProjectStore;

/// Shared application state injected into all route handlers via Axum extractors.
/// Immutable for the life of the server; nothing here is mutated per request.
#[derive(Clone)]
pub struct AppState {
    pub projects: Arc<dyn ProjectStore>,
    /// Relay used by the contact endpoint. `SmtpRelay` in production.
    pub mailer: Arc<dyn MailTransport>,
    /// Mail account settings, injected rather than read from the process
    /// environment inside handlers.
    pub mail: MailSettings,
}
