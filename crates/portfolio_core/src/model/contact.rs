//! Contact intake model and validation gate.
//!
//! # Responsibility
//! - Describe the raw submission received from the contact form.
//! - Check field constraints before anything reaches storage.
//! - Describe the stored contact message.
//!
//! # Invariants
//! - `name` has 1..=100 characters.
//! - `email` is a bare `local@domain.tld` address: no display name, no
//!   domain literal, and the domain has at least two labels.
//! - `message` has 1..=1000 characters.
//! - Lengths count Unicode scalar values, not bytes.
//! - `ValidatedContact` can only be obtained through `ContactSubmission::validate`.

use email_address::{EmailAddress, Options};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub const NAME_MAX_CHARS: usize = 100;
pub const MESSAGE_MAX_CHARS: usize = 1000;

fn email_options() -> Options {
    Options::default()
        .with_required_tld()
        .without_display_text()
        .without_domain_literal()
}

/// Store-assigned surrogate key of a contact message.
pub type ContactMessageId = i64;

/// Raw contact form input as received from the wire.
///
/// Missing fields deserialize as empty strings so that they are reported
/// by the validation gate like any other empty value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ContactSubmission {
    pub name: String,
    pub email: String,
    pub message: String,
}

/// Contact form field names used in validation reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ContactField {
    Name,
    Email,
    Message,
}

impl ContactField {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Message => "message",
        }
    }
}

/// One failed constraint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldViolation {
    pub field: ContactField,
    pub message: String,
}

/// Validation failure listing every field that broke its constraint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactValidationError {
    violations: Vec<FieldViolation>,
}

impl ContactValidationError {
    pub fn violations(&self) -> &[FieldViolation] {
        &self.violations
    }

    /// Returns whether `field` is among the failing fields.
    pub fn has_field(&self, field: ContactField) -> bool {
        self.violations
            .iter()
            .any(|violation| violation.field == field)
    }
}

impl Display for ContactValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str("invalid contact submission: ")?;
        for (index, violation) in self.violations.iter().enumerate() {
            if index > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{}: {}", violation.field.as_str(), violation.message)?;
        }
        Ok(())
    }
}

impl Error for ContactValidationError {}

/// Submission that passed the validation gate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedContact {
    name: String,
    email: String,
    message: String,
}

impl ValidatedContact {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl ContactSubmission {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            message: message.into(),
        }
    }

    /// Runs the validation gate.
    ///
    /// All fields are checked; the error lists every violation in field order.
    pub fn validate(self) -> Result<ValidatedContact, ContactValidationError> {
        let mut violations = Vec::new();

        if let Some(message) = check_length(&self.name, NAME_MAX_CHARS) {
            violations.push(FieldViolation {
                field: ContactField::Name,
                message,
            });
        }

        let email = match EmailAddress::parse_with_options(&self.email, email_options()) {
            Ok(address) => Some(address.email()),
            Err(_) => {
                violations.push(FieldViolation {
                    field: ContactField::Email,
                    message: "value is not a valid email address".to_string(),
                });
                None
            }
        };

        if let Some(message) = check_length(&self.message, MESSAGE_MAX_CHARS) {
            violations.push(FieldViolation {
                field: ContactField::Message,
                message,
            });
        }

        match email {
            Some(email) if violations.is_empty() => Ok(ValidatedContact {
                name: self.name,
                email,
                message: self.message,
            }),
            _ => Err(ContactValidationError { violations }),
        }
    }
}

fn check_length(value: &str, max_chars: usize) -> Option<String> {
    let chars = value.chars().count();
    if chars == 0 {
        return Some("must have at least 1 character".to_string());
    }
    if chars > max_chars {
        return Some(format!("must have at most {max_chars} characters"));
    }
    None
}

/// Contact message as persisted by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactMessage {
    pub id: ContactMessageId,
    pub name: String,
    pub email: String,
    pub message: String,
    /// Unix epoch milliseconds, assigned by the store.
    pub created_at: i64,
}

impl ContactMessage {
    /// Returns whether this stored row carries exactly the submitted fields.
    pub fn matches(&self, contact: &ValidatedContact) -> bool {
        self.name == contact.name && self.email == contact.email && self.message == contact.message
    }
}
