use axum::{extract::rejection::JsonRejection, extract::State, Json};
use tracing::{info, warn};

use crate::contact::compose::compose_mail;
use crate::contact::models::{ContactInput, ContactResponse};
use crate::contact::validation::validate;
use crate::errors::AppError;
use crate::state::AppState;

pub const SENT_MESSAGE: &str = "Your message has been sent successfully!";

/// POST /api/contact
///
/// Validates the submission, checks that the relay account is configured and
/// hands the composed message to the transport. Every outcome is decided
/// within this one request; failures are never retried.
pub async fn handle_contact(
    State(state): State<AppState>,
    payload: Result<Json<ContactInput>, JsonRejection>,
) -> Result<Json<ContactResponse>, AppError> {
    let Json(input) = payload?;

    let submission = validate(&input).map_err(|errors| {
        warn!("Contact submission failed validation: {}", errors.summary());
        AppError::InvalidSubmission(errors)
    })?;

    let credentials = state
        .mail
        .credentials()
        .ok_or_else(|| AppError::MailNotConfigured(state.mail.missing()))?;

    let mail = compose_mail(&submission);
    state.mailer.send(&credentials, &mail).await?;

    info!("Relayed contact message from {}", submission.email());
    Ok(Json(ContactResponse {
        message: SENT_MESSAGE.to_string(),
    }))
}
