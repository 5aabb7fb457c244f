use reqwest::StatusCode;
use serde_json::Value;

pub const FALLBACK_MESSAGE: &str = "Failed to send your message. Please try again.";

/// Every way a request can fail, decided once when the response (or lack of
/// one) arrives. Call sites only ever ask for [`Failure::message`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Failure {
    /// No response: connection refused, DNS, TLS, body read error.
    Network(String),
    /// JSON object carrying `detail` or `message`.
    Body { status: u16, message: String },
    /// Bare JSON string.
    Text(String),
    /// Nothing usable in the body.
    Status(u16),
}

impl Failure {
    pub fn from_reqwest(err: &reqwest::Error) -> Self {
        Failure::Network(err.to_string())
    }

    /// Classifies a non-success response body.
    ///
    /// `detail` wins over `message` so FastAPI-style bodies read naturally.
    pub fn from_response(status: StatusCode, body: &[u8]) -> Self {
        let status = status.as_u16();
        match serde_json::from_slice::<Value>(body) {
            Ok(Value::Object(map)) => ["detail", "message"]
                .iter()
                .find_map(|key| {
                    map.get(*key)
                        .and_then(Value::as_str)
                        .filter(|m| !m.trim().is_empty())
                })
                .map(|m| Failure::Body {
                    status,
                    message: m.to_string(),
                })
                .unwrap_or(Failure::Status(status)),
            Ok(Value::String(text)) => Failure::Text(text),
            _ => Failure::Status(status),
        }
    }

    pub fn message(&self) -> String {
        let message = match self {
            Failure::Network(text) | Failure::Text(text) => text.clone(),
            Failure::Body { message, .. } => message.clone(),
            Failure::Status(code) => format!("HTTP error! status: {code}"),
        };
        if message.trim().is_empty() {
            FALLBACK_MESSAGE.to_string()
        } else {
            message
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_field_extracted() {
        let f = Failure::from_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            br#"{"code":"MAIL_NOT_CONFIGURED","message":"Server is not configured for sending emails."}"#,
        );
        assert_eq!(f.message(), "Server is not configured for sending emails.");
    }

    #[test]
    fn test_detail_preferred_over_message() {
        let f = Failure::from_response(
            StatusCode::NOT_FOUND,
            br#"{"detail":"Project not found","message":"ignored"}"#,
        );
        assert_eq!(
            f,
            Failure::Body {
                status: 404,
                message: "Project not found".into()
            }
        );
    }

    #[test]
    fn test_non_string_detail_falls_through_to_message() {
        let f = Failure::from_response(
            StatusCode::UNPROCESSABLE_ENTITY,
            br#"{"detail":[{"loc":["body","email"]}],"message":"bad email"}"#,
        );
        assert_eq!(f.message(), "bad email");
    }

    #[test]
    fn test_bare_string_body() {
        let f = Failure::from_response(StatusCode::BAD_GATEWAY, br#""upstream down""#);
        assert_eq!(f, Failure::Text("upstream down".into()));
        assert_eq!(f.message(), "upstream down");
    }

    #[test]
    fn test_unparseable_body_falls_back_to_status() {
        let f = Failure::from_response(StatusCode::SERVICE_UNAVAILABLE, b"<html>oops</html>");
        assert_eq!(f.message(), "HTTP error! status: 503");
    }

    #[test]
    fn test_object_without_message_falls_back_to_status() {
        let f = Failure::from_response(StatusCode::INTERNAL_SERVER_ERROR, br#"{"error":true}"#);
        assert_eq!(f, Failure::Status(500));
    }

    #[test]
    fn test_empty_text_uses_generic_fallback() {
        assert_eq!(Failure::Text("  ".into()).message(), FALLBACK_MESSAGE);
        assert_eq!(Failure::Network(String::new()).message(), FALLBACK_MESSAGE);
    }
}
