//! Field checks shared by the record validators. Each helper appends a
//! human-readable message to `errors` instead of failing fast, so a single
//! response can report every invalid field.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};

pub const MAX_NAME_LENGTH: usize = 100;
pub const MAX_TEXT_LENGTH: usize = 2000;

pub fn require(errors: &mut Vec<String>, value: &str, label: &str) {
    if value.trim().is_empty() {
        errors.push(format!("{} is required", label));
    }
}

/// Like [`require`] but for patch fields: only a present value is checked
pub fn require_if_present(errors: &mut Vec<String>, value: &Option<String>, label: &str) {
    if let Some(value) = value {
        require(errors, value, label);
    }
}

pub fn max_length(errors: &mut Vec<String>, value: &str, max: usize, label: &str) {
    if value.chars().count() > max {
        errors.push(format!("{} cannot exceed {} characters", label, max));
    }
}

pub fn date(errors: &mut Vec<String>, value: &str, label: &str) {
    if NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").is_err() {
        errors.push(format!("{} must be a valid date (YYYY-MM-DD)", label));
    }
}

pub fn optional_date(errors: &mut Vec<String>, value: &Option<String>, label: &str) {
    if let Some(value) = value {
        date(errors, value, label);
    }
}

/// Stored form of a validated date: surrounding whitespace removed so
/// lexical comparisons and month prefixes line up
pub fn normalized_date(value: String) -> String {
    value.trim().to_string()
}

pub fn normalized_optional_date(value: Option<String>) -> Option<String> {
    value.map(normalized_date)
}

/// Accepts RFC 3339, `YYYY-MM-DDTHH:MM` and plain dates
pub fn date_time(errors: &mut Vec<String>, value: &str, label: &str) {
    if parse_date_time(value).is_none() {
        errors.push(format!("{} must be a valid date or date-time", label));
    }
}

pub fn optional_date_time(errors: &mut Vec<String>, value: &Option<String>, label: &str) {
    if let Some(value) = value {
        date_time(errors, value, label);
    }
}

pub fn time_of_day(errors: &mut Vec<String>, value: &Option<String>, label: &str) {
    if let Some(value) = value {
        if NaiveTime::parse_from_str(value.trim(), "%H:%M").is_err() {
            errors.push(format!("{} must be a valid time (HH:MM)", label));
        }
    }
}

pub fn email(errors: &mut Vec<String>, value: &str, label: &str) {
    let value = value.trim();
    let valid = match value.split_once('@') {
        Some((local, domain)) => !local.is_empty() && domain.contains('.') && !domain.starts_with('.'),
        None => false,
    };
    if !valid {
        errors.push(format!("{} must be a valid email address", label));
    }
}

pub fn positive_amount(errors: &mut Vec<String>, amount: f64, label: &str) {
    if !amount.is_finite() || amount <= 0.0 {
        errors.push(format!("{} must be a positive number", label));
    }
}

pub fn optional_positive_amount(errors: &mut Vec<String>, amount: Option<f64>, label: &str) {
    if let Some(amount) = amount {
        positive_amount(errors, amount, label);
    }
}

/// Parse the date formats accepted for event start and end times.
/// Plain dates are taken as midnight UTC.
pub fn parse_date_time(value: &str) -> Option<DateTime<chrono::Utc>> {
    let value = value.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Some(parsed.with_timezone(&chrono::Utc));
    }
    if let Ok(parsed) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M") {
        return Some(parsed.and_utc());
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|day| day.and_hms_opt(0, 0, 0))
        .map(|midnight| midnight.and_utc())
}
