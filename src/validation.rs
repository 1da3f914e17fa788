//! Field rules for form submissions
//!
//! A [`Rules`] value is an ordered list of `(field, check, message)` entries.
//! Evaluating it against a submitted form never mutates the form: each value
//! is trimmed for the check only, and the caller builds the sanitized record
//! once the failure list comes back empty.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use validator::ValidateLength;

static ALPHANUMERIC: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9]+$").expect("Valid regex pattern"));

/// One failed rule, reported against the offending field
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: &'static str,
}

/// Read access to the raw values of a submitted form
pub trait Fields {
    /// Raw value of `name`, empty when the field was not submitted
    fn field(&self, name: &str) -> &str;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Check {
    /// Non-empty after trimming
    Required,
    /// Character count within `min..=max`
    Length { min: u64, max: u64 },
    /// ASCII letters and digits only
    Alphanumeric,
    /// Empty, or an ISO-8601 date
    OptionalIsoDate,
}

impl Check {
    fn passes(self, value: &str) -> bool {
        match self {
            Check::Required => !value.is_empty(),
            Check::Length { min, max } => {
                value.to_string().validate_length(Some(min), Some(max), None)
            }
            Check::Alphanumeric => ALPHANUMERIC.is_match(value),
            Check::OptionalIsoDate => value.is_empty() || parse_iso_date(value).is_some(),
        }
    }
}

#[derive(Debug, Clone)]
struct Rule {
    field: &'static str,
    check: Check,
    message: &'static str,
}

/// Ordered rule list for one form
#[derive(Debug, Clone, Default)]
pub struct Rules {
    rules: Vec<Rule>,
}

impl Rules {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rule(mut self, field: &'static str, check: Check, message: &'static str) -> Self {
        self.rules.push(Rule {
            field,
            check,
            message,
        });
        self
    }

    /// Run every rule in order. A field stops being checked after its first
    /// failure, so each field reports at most one message.
    pub fn evaluate(&self, input: &impl Fields) -> Vec<FieldError> {
        let mut errors: Vec<FieldError> = Vec::new();
        for rule in &self.rules {
            if errors.iter().any(|e| e.field == rule.field) {
                continue;
            }
            if !rule.check.passes(input.field(rule.field).trim()) {
                errors.push(FieldError {
                    field: rule.field,
                    message: rule.message,
                });
            }
        }
        errors
    }
}

/// Parse `YYYY-MM-DD`, a local `YYYY-MM-DDTHH:MM:SS[.fff]` or an RFC 3339
/// timestamp into a calendar date
pub fn parse_iso_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(value).ok().map(|dt| dt.date_naive()))
        .or_else(|| {
            NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
                .ok()
                .map(|dt| dt.date())
        })
}

/// Sanitize an optional date field: blank means absent
pub fn optional_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if value.is_empty() {
        None
    } else {
        parse_iso_date(value)
    }
}
