//! Field descriptors and their validators

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;
use serde::Serialize;

use crate::identity::DATE_FORMAT;

// local@domain.tld with no whitespace and a single '@'
static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("EMAIL_REGEX: invalid regex pattern")
});

// chrono's %Y-%m-%d also takes signed, short and unpadded parts
static DATE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("DATE_REGEX: invalid regex pattern")
});

/// How a field's input should be captured
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum InputKind {
    Text,
    Email,
    Password,
    Date,
    NumericId,
}

impl InputKind {
    /// Whether the value should be masked when echoed back
    pub fn is_secret(&self) -> bool {
        matches!(self, Self::Password | Self::NumericId)
    }
}

/// A single validation rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "rule", content = "param")]
pub enum Validator {
    Required,
    EmailShape,
    MinLength(usize),
    CalendarDate,
    Digits(usize),
}

impl Validator {
    pub fn check(&self, value: &str) -> bool {
        match self {
            Self::Required => !value.trim().is_empty(),
            Self::EmailShape => EMAIL_REGEX.is_match(value.trim()),
            Self::MinLength(min) => value.chars().count() >= *min,
            Self::CalendarDate => {
                let value = value.trim();
                DATE_REGEX.is_match(value) && NaiveDate::parse_from_str(value, DATE_FORMAT).is_ok()
            }
            Self::Digits(len) => {
                let value = value.trim();
                value.len() == *len && value.bytes().all(|b| b.is_ascii_digit())
            }
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Self::Required => "required",
            Self::EmailShape => "invalid email",
            Self::MinLength(_) => "minimum length",
            Self::CalendarDate => "invalid date",
            Self::Digits(_) => "invalid identifier",
        }
    }
}

/// Metadata and rules for one input of the auth form
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDescriptor {
    pub name: &'static str,
    pub label: &'static str,
    pub placeholder: &'static str,
    pub input_kind: InputKind,
    pub required: bool,
    pub validators: Vec<Validator>,
}

impl FieldDescriptor {
    fn new(
        name: &'static str,
        label: &'static str,
        placeholder: &'static str,
        input_kind: InputKind,
    ) -> Self {
        Self {
            name,
            label,
            placeholder,
            input_kind,
            required: true,
            validators: vec![Validator::Required],
        }
    }

    /// Create a required free-text field
    pub fn text(name: &'static str, label: &'static str, placeholder: &'static str) -> Self {
        Self::new(name, label, placeholder, InputKind::Text)
    }

    /// Create a required email field
    pub fn email(name: &'static str, label: &'static str, placeholder: &'static str) -> Self {
        Self::new(name, label, placeholder, InputKind::Email).with_validator(Validator::EmailShape)
    }

    /// Create a required password field
    pub fn password(name: &'static str, label: &'static str, placeholder: &'static str) -> Self {
        Self::new(name, label, placeholder, InputKind::Password)
    }

    /// Create a required `YYYY-MM-DD` date field
    pub fn date(name: &'static str, label: &'static str, placeholder: &'static str) -> Self {
        Self::new(name, label, placeholder, InputKind::Date).with_validator(Validator::CalendarDate)
    }

    /// Create a required fixed-length numeric identifier field
    pub fn numeric_id(
        name: &'static str,
        label: &'static str,
        placeholder: &'static str,
        digits: usize,
    ) -> Self {
        Self::new(name, label, placeholder, InputKind::NumericId)
            .with_validator(Validator::Digits(digits))
    }

    /// Append a validator; validators run in insertion order
    pub fn with_validator(mut self, validator: Validator) -> Self {
        self.validators.push(validator);
        self
    }

    /// Message of the first failing validator, `None` when the value passes
    pub fn validate(&self, value: &str) -> Option<&'static str> {
        self.validators
            .iter()
            .find(|validator| !validator.check(value))
            .map(Validator::message)
    }
}
