//! Contact-form schema. Pure and synchronous; the form re-runs it on every
//! keystroke and the server runs it again on receipt.

use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;

use crate::contact::models::{ContactInput, ContactSubmission, Field};

pub const NAME_MIN_CHARS: usize = 2;
pub const MESSAGE_MIN_CHARS: usize = 10;

const NAME_TOO_SHORT: &str = "Name must be at least 2 characters.";
const EMAIL_INVALID: &str = "Please enter a valid email address.";
const MESSAGE_TOO_SHORT: &str = "Message must be at least 10 characters.";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: Field,
    pub message: String,
}

/// At most one error per field, in form order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    fn add(&mut self, field: Field, message: &str) {
        self.0.push(FieldError {
            field,
            message: message.to_string(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        self.0
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }

    pub fn fields(&self) -> impl Iterator<Item = Field> + '_ {
        self.0.iter().map(|e| e.field)
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.0.iter()
    }

    /// Single-line summary, e.g. for a 400 response message.
    pub fn summary(&self) -> String {
        self.0
            .iter()
            .map(|e| e.message.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

fn email_regex() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| {
        Regex::new(
            r"^[A-Za-z0-9_'+-]+(\.[A-Za-z0-9_'+-]+)*@([A-Za-z0-9]([A-Za-z0-9-]*[A-Za-z0-9])?\.)+[A-Za-z]{2,}$",
        )
        .expect("email pattern is valid")
    })
}

pub fn is_valid_email(email: &str) -> bool {
    email_regex().is_match(email)
}

/// Checks every field and returns either a normalized submission or all
/// failing fields.
///
/// Normalization: the email is trimmed and a blank subject becomes `None`.
pub fn validate(input: &ContactInput) -> Result<ContactSubmission, ValidationErrors> {
    let mut errors = ValidationErrors::default();

    if input.name.chars().count() < NAME_MIN_CHARS {
        errors.add(Field::Name, NAME_TOO_SHORT);
    }

    let email = input.email.trim();
    if !is_valid_email(email) {
        errors.add(Field::Email, EMAIL_INVALID);
    }

    if input.message.chars().count() < MESSAGE_MIN_CHARS {
        errors.add(Field::Message, MESSAGE_TOO_SHORT);
    }

    if !errors.is_empty() {
        return Err(errors);
    }

    Ok(ContactSubmission {
        name: input.name.clone(),
        email: email.to_string(),
        subject: input
            .subject
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .map(str::to_string),
        message: input.message.clone(),
    })
}
