//! Shared validation for inbound lead submissions.
//!
//! These rules are the single source of truth for both the HTTP boundary and
//! any interactive form layer: full-form validation collects every field
//! error in one pass, while the per-field checks are exported individually
//! for on-blur revalidation. Everything here is a pure function over its
//! input.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One `@` with something on both sides and a `.` somewhere after it,
/// no whitespace anywhere.
static EMAIL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());

/// Digits, spaces, parentheses, and hyphens only.
static PHONE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[\d\s()\-]+$").unwrap());

/// Minimum number of digits a phone value must contain once formatting
/// characters are stripped.
const MIN_PHONE_DIGITS: usize = 10;

/// A full-form validation failure: every offending field mapped to a
/// human-readable message. The map is ordered so error listings are stable.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[error("invalid submission: {}", field_summary(.fields))]
pub struct ValidationFailure {
    pub fields: BTreeMap<&'static str, String>,
}

fn field_summary(fields: &BTreeMap<&'static str, String>) -> String {
    fields.keys().copied().collect::<Vec<_>>().join(", ")
}

/// Raw consultation payload as received from the client. All fields optional
/// so that missing keys are reported as validation errors, not decode errors.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConsultationPayload {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    #[serde(rename = "practiceArea")]
    pub practice_area: Option<String>,
    pub date: Option<String>,
    pub time: Option<String>,
    pub message: Option<String>,
}

/// Raw contact payload as received from the client.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContactPayload {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub service: Option<String>,
    pub message: Option<String>,
}

/// Normalized consultation request, ready for storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewConsultation {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub practice_area: String,
    pub preferred_date: String,
    pub preferred_time: String,
    pub message: Option<String>,
}

/// Normalized contact message, ready for storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewContact {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub service: String,
    pub message: String,
}

// ---------------------------------------------------------------------------
// Per-field checks (also used individually for interactive revalidation)
// ---------------------------------------------------------------------------

/// Check a required free-text field: non-empty after trimming.
pub fn check_required(value: Option<&str>) -> Result<String, String> {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v.to_string()),
        _ => Err("This field is required".to_string()),
    }
}

/// Check an email address against the shared pattern.
pub fn check_email(value: Option<&str>) -> Result<String, String> {
    let value = check_required(value).map_err(|_| "Email is required".to_string())?;
    if !EMAIL_RE.is_match(&value) {
        return Err("Please enter a valid email address".to_string());
    }
    Ok(value)
}

/// Check a phone number: allowed characters only, and at least ten digits
/// once formatting is stripped.
pub fn check_phone(value: Option<&str>) -> Result<String, String> {
    let value = check_required(value).map_err(|_| "Phone number is required".to_string())?;
    let digit_count = value.chars().filter(char::is_ascii_digit).count();
    if !PHONE_RE.is_match(&value) || digit_count < MIN_PHONE_DIGITS {
        return Err("Please enter a valid phone number".to_string());
    }
    Ok(value)
}

/// Check a preferred consultation date: `%Y-%m-%d`, not earlier than `today`.
pub fn check_date(value: Option<&str>, today: NaiveDate) -> Result<String, String> {
    let value = check_required(value).map_err(|_| "Please select a preferred date".to_string())?;
    let parsed = NaiveDate::parse_from_str(&value, "%Y-%m-%d")
        .map_err(|_| "Please enter a valid date".to_string())?;
    if parsed < today {
        return Err("Please select a future date".to_string());
    }
    Ok(value)
}

// ---------------------------------------------------------------------------
// Full-form validation
// ---------------------------------------------------------------------------

/// Validate a consultation payload, collecting every field error in one pass.
/// `today` is the reference date (local midnight) for the date check.
pub fn validate_consultation(
    payload: &ConsultationPayload,
    today: NaiveDate,
) -> Result<NewConsultation, ValidationFailure> {
    let mut fields = BTreeMap::new();

    let name = collect(&mut fields, "name", check_required(payload.name.as_deref()));
    let email = collect(&mut fields, "email", check_email(payload.email.as_deref()));
    let phone = collect(&mut fields, "phone", check_phone(payload.phone.as_deref()));
    let practice_area = collect(
        &mut fields,
        "practiceArea",
        check_required(payload.practice_area.as_deref()),
    );
    let preferred_date = collect(
        &mut fields,
        "date",
        check_date(payload.date.as_deref(), today),
    );
    let preferred_time = collect(&mut fields, "time", check_required(payload.time.as_deref()));

    // Message stays optional; blank input normalizes to None.
    let message = payload
        .message
        .as_deref()
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .map(str::to_string);

    match (
        name,
        email,
        phone,
        practice_area,
        preferred_date,
        preferred_time,
    ) {
        (
            Some(name),
            Some(email),
            Some(phone),
            Some(practice_area),
            Some(preferred_date),
            Some(preferred_time),
        ) => Ok(NewConsultation {
            name,
            email,
            phone,
            practice_area,
            preferred_date,
            preferred_time,
            message,
        }),
        _ => Err(ValidationFailure { fields }),
    }
}

/// Validate a contact payload, collecting every field error in one pass.
pub fn validate_contact(payload: &ContactPayload) -> Result<NewContact, ValidationFailure> {
    let mut fields = BTreeMap::new();

    let name = collect(&mut fields, "name", check_required(payload.name.as_deref()));
    let email = collect(&mut fields, "email", check_email(payload.email.as_deref()));
    let phone = collect(&mut fields, "phone", check_phone(payload.phone.as_deref()));
    let service = collect(
        &mut fields,
        "service",
        check_required(payload.service.as_deref()),
    );
    let message = collect(
        &mut fields,
        "message",
        check_required(payload.message.as_deref()),
    );

    match (name, email, phone, service, message) {
        (Some(name), Some(email), Some(phone), Some(service), Some(message)) => Ok(NewContact {
            name,
            email,
            phone,
            service,
            message,
        }),
        _ => Err(ValidationFailure { fields }),
    }
}

fn collect(
    fields: &mut BTreeMap<&'static str, String>,
    field: &'static str,
    result: Result<String, String>,
) -> Option<String> {
    match result {
        Ok(value) => Some(value),
        Err(message) => {
            fields.insert(field, message);
            None
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
