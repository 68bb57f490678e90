// SPDX-License-Identifier: Apache-2.0

use std::collections::BTreeMap;
use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

const EMAIL_PATTERN: &str = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";
const MIN_NAME_LEN: usize = 2;
const MIN_MESSAGE_LEN: usize = 10;

fn email_regex() -> Option<&'static Regex> {
    static EMAIL: OnceLock<Option<Regex>> = OnceLock::new();
    EMAIL.get_or_init(|| Regex::new(EMAIL_PATTERN).ok()).as_ref()
}

/// `local@domain.tld` with no whitespace and a single `@`.
#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    email_regex().is_some_and(|re| re.is_match(email))
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ContactForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
    pub subject: String,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ContactFormField {
    FirstName,
    LastName,
    Email,
    Subject,
    Message,
}

impl fmt::Display for ContactFormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::FirstName => "first_name",
            Self::LastName => "last_name",
            Self::Email => "email",
            Self::Subject => "subject",
            Self::Message => "message",
        })
    }
}

pub type FieldErrors = BTreeMap<ContactFormField, String>;

/// One message per failing field, checked on trimmed values. An empty map
/// means the form can be submitted.
#[must_use]
pub fn validate_contact_form(form: &ContactForm) -> FieldErrors {
    let mut errors = FieldErrors::new();

    for (field, value) in [
        (ContactFormField::FirstName, form.first_name.trim()),
        (ContactFormField::LastName, form.last_name.trim()),
    ] {
        if value.is_empty() {
            errors.insert(field, "This field is required.".to_string());
        } else if value.chars().count() < MIN_NAME_LEN {
            errors.insert(field, "Name must be at least 2 characters long.".to_string());
        }
    }

    let email = form.email.trim();
    if email.is_empty() {
        errors.insert(ContactFormField::Email, "This field is required.".to_string());
    } else if !is_valid_email(email) {
        errors.insert(
            ContactFormField::Email,
            "Please enter a valid email address.".to_string(),
        );
    }

    if form.subject.trim().is_empty() {
        errors.insert(ContactFormField::Subject, "Please select a subject.".to_string());
    }

    let message = form.message.trim();
    if message.is_empty() {
        errors.insert(ContactFormField::Message, "This field is required.".to_string());
    } else if message.chars().count() < MIN_MESSAGE_LEN {
        errors.insert(
            ContactFormField::Message,
            "Message must be at least 10 characters long.".to_string(),
        );
    }

    errors
}
