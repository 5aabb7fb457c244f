//! Contact form presentation state.
//!
//! [`ContactForm`] holds what the form shows; [`ContactForm::view`] turns it
//! into a [`FormView`] with no side effects. The only I/O is the single
//! submitter call made by [`ContactForm::submit`].

use std::collections::BTreeSet;

use serde::Serialize;

use crate::client::ContactSubmitter;
use crate::contact::models::{ContactInput, ContactSubmission, Field, SubmissionResult};
use crate::contact::validation::{validate, ValidationErrors};

pub const SUBMIT_LABEL: &str = "SEND MESSAGE";
pub const SUBMITTING_LABEL: &str = "SENDING...";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormValues {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

impl FormValues {
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Email => &self.email,
            Field::Subject => &self.subject,
            Field::Message => &self.message,
        }
    }

    fn slot(&mut self, field: Field) -> &mut String {
        match field {
            Field::Name => &mut self.name,
            Field::Email => &mut self.email,
            Field::Subject => &mut self.subject,
            Field::Message => &mut self.message,
        }
    }

    pub fn to_input(&self) -> ContactInput {
        ContactInput {
            name: self.name.clone(),
            email: self.email.clone(),
            subject: Some(self.subject.clone()),
            message: self.message.clone(),
        }
    }
}

/// Why a submit did not go out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitBlocked {
    InFlight,
    Invalid(ValidationErrors),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BannerKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Banner {
    pub kind: BannerKind,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldView {
    pub field: Field,
    pub value: String,
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormView {
    pub fields: Vec<FieldView>,
    pub submit_enabled: bool,
    pub submit_label: &'static str,
    pub banner: Option<Banner>,
}

#[derive(Debug, Default)]
pub struct ContactForm {
    values: FormValues,
    errors: ValidationErrors,
    edited: BTreeSet<Field>,
    attempted: bool,
    in_flight: bool,
    result: Option<SubmissionResult>,
}

impl ContactForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn values(&self) -> &FormValues {
        &self.values
    }

    pub fn in_flight(&self) -> bool {
        self.in_flight
    }

    pub fn result(&self) -> Option<&SubmissionResult> {
        self.result.as_ref()
    }

    /// Updates one field and re-runs validation for live feedback.
    pub fn set_field(&mut self, field: Field, value: impl Into<String>) {
        *self.values.slot(field) = value.into();
        self.edited.insert(field);
        self.revalidate().ok();
    }

    fn revalidate(&mut self) -> Result<ContactSubmission, ValidationErrors> {
        let outcome = validate(&self.values.to_input());
        self.errors = outcome.clone().err().unwrap_or_default();
        outcome
    }

    /// Errors shown to the user: edited fields, or all of them once a submit
    /// has been attempted.
    pub fn visible_error(&self, field: Field) -> Option<&str> {
        if self.attempted || self.edited.contains(&field) {
            self.errors.get(field)
        } else {
            None
        }
    }

    /// Validates and marks the form in flight. The returned submission is
    /// what must be handed to exactly one submitter call.
    pub fn begin_submit(&mut self) -> Result<ContactSubmission, SubmitBlocked> {
        if self.in_flight {
            return Err(SubmitBlocked::InFlight);
        }
        self.attempted = true;
        let submission = self.revalidate().map_err(SubmitBlocked::Invalid)?;
        self.result = None;
        self.in_flight = true;
        Ok(submission)
    }

    /// Records the outcome. A success clears the form back to empty strings.
    pub fn finish_submit(&mut self, result: SubmissionResult) -> &SubmissionResult {
        self.in_flight = false;
        if result.is_success() {
            self.values = FormValues::default();
            self.errors = ValidationErrors::default();
            self.edited.clear();
            self.attempted = false;
        }
        self.result.insert(result)
    }

    pub async fn submit<S>(&mut self, submitter: &S) -> Result<&SubmissionResult, SubmitBlocked>
    where
        S: ContactSubmitter + ?Sized,
    {
        let submission = self.begin_submit()?;
        let result = submitter.submit(&submission).await;
        Ok(self.finish_submit(result))
    }

    /// Hides the banner.
    pub fn dismiss(&mut self) {
        self.result = None;
    }

    pub fn view(&self) -> FormView {
        FormView {
            fields: Field::ALL
                .iter()
                .map(|&field| FieldView {
                    field,
                    value: self.values.get(field).to_string(),
                    error: self.visible_error(field).map(str::to_string),
                })
                .collect(),
            submit_enabled: !self.in_flight,
            submit_label: if self.in_flight {
                SUBMITTING_LABEL
            } else {
                SUBMIT_LABEL
            },
            banner: self.result.as_ref().map(|r| Banner {
                kind: if r.is_success() {
                    BannerKind::Success
                } else {
                    BannerKind::Error
                },
                message: r.message().to_string(),
            }),
        }
    }
}
