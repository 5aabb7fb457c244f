use std::fmt;

use serde::{Deserialize, Serialize};

/// Raw contact-form values, as typed into the form or received over the wire.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContactInput {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default)]
    pub message: String,
}

/// A contact-form attempt that has passed validation.
///
/// Fields are private: the only way to obtain one is
/// [`crate::contact::validation::validate`], so an unchecked submission can
/// never be sent.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContactSubmission {
    pub(crate) name: String,
    pub(crate) email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) subject: Option<String>,
    pub(crate) message: String,
}

impl ContactSubmission {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn subject(&self) -> Option<&str> {
        self.subject.as_deref()
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Terminal outcome of one submission attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SubmissionResult {
    Success { message: String },
    Error { message: String },
}

impl SubmissionResult {
    pub fn success(message: impl Into<String>) -> Self {
        SubmissionResult::Success {
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        SubmissionResult::Error {
            message: message.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, SubmissionResult::Success { .. })
    }

    pub fn message(&self) -> &str {
        match self {
            SubmissionResult::Success { message } | SubmissionResult::Error { message } => message,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Name,
    Email,
    Subject,
    Message,
}

impl Field {
    pub const ALL: [Field; 4] = [Field::Name, Field::Email, Field::Subject, Field::Message];

    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Email => "email",
            Field::Subject => "subject",
            Field::Message => "message",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Body of a successful contact response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactResponse {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_submission_result_is_tagged_by_kind() {
        let json = serde_json::to_value(SubmissionResult::error("nope")).unwrap();
        assert_eq!(json["kind"], "error");
        assert_eq!(json["message"], "nope");
    }

    #[test]
    fn test_input_subject_is_optional_on_the_wire() {
        let input: ContactInput = serde_json::from_str(
            r#"{"name":"Jo","email":"jo@example.com","message":"Hello there, testing."}"#,
        )
        .unwrap();
        assert_eq!(input.subject, None);
    }
}
