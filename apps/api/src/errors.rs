use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::contact::validation::ValidationErrors;
use crate::mailer::MailError;

pub const MAIL_NOT_CONFIGURED_MESSAGE: &str = "Server is not configured for sending emails.";
pub const MAIL_FAILED_MESSAGE: &str = "Failed to send your message. Please try again later.";

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
/// Server-side detail is logged here and never written to the response body.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Malformed request body: {0}")]
    MalformedBody(#[from] JsonRejection),

    #[error("Invalid submission: {}", .0.summary())]
    InvalidSubmission(ValidationErrors),

    #[error("Mail relay not configured (missing {})", .0.join(", "))]
    MailNotConfigured(Vec<&'static str>),

    #[error("Mail delivery failed: {0}")]
    MailDelivery(#[from] MailError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::MalformedBody(rejection) => {
                tracing::warn!("Rejected request body: {rejection}");
                (
                    StatusCode::BAD_REQUEST,
                    "MALFORMED_BODY",
                    "Request body must be a JSON contact submission".to_string(),
                )
            }
            AppError::InvalidSubmission(errors) => {
                let body = Json(json!({
                    "code": "VALIDATION_ERROR",
                    "message": errors.summary(),
                    "fields": errors,
                }));
                return (StatusCode::BAD_REQUEST, body).into_response();
            }
            AppError::MailNotConfigured(missing) => {
                tracing::error!(
                    "Missing email credentials in environment: {}",
                    missing.join(", ")
                );
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "MAIL_NOT_CONFIGURED",
                    MAIL_NOT_CONFIGURED_MESSAGE.to_string(),
                )
            }
            AppError::MailDelivery(e) => {
                tracing::error!("Failed to send email: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "MAIL_DELIVERY_FAILED",
                    MAIL_FAILED_MESSAGE.to_string(),
                )
            }
            AppError::Database(e) => {
                tracing::error!("Database error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "DATABASE_ERROR",
                    "A database error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "code": code,
            "message": message
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use serde_json::Value;

    async fn body_of(err: AppError) -> (StatusCode, Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_delivery_error_detail_not_leaked() {
        let err = AppError::MailDelivery(MailError::Smtp("535 bad credentials for me@x".into()));
        let (status, body) = body_of(err).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["message"], MAIL_FAILED_MESSAGE);
        assert!(!body.to_string().contains("535"));
    }

    #[tokio::test]
    async fn test_not_configured_hides_variable_names() {
        let (status, body) = body_of(AppError::MailNotConfigured(vec!["EMAIL_PASS"])).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["message"], MAIL_NOT_CONFIGURED_MESSAGE);
        assert!(!body.to_string().contains("EMAIL_PASS"));
    }

    #[tokio::test]
    async fn test_not_found_keeps_message() {
        let (status, body) = body_of(AppError::NotFound("Project not found".into())).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["code"], "NOT_FOUND");
        assert_eq!(body["message"], "Project not found");
    }
}
