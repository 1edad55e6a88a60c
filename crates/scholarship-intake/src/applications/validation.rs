use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::domain::{
    FieldValue, FormField, AGREEMENT_FIELD, GPA_FIELD, PHONE_FIELD, STUDENT_ID_FIELD,
};
use super::numeric::leading_float;

static EMAIL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern"));
static PHONE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^0[0-9]{9,10}$").expect("phone pattern"));
static STUDENT_ID: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z]{2}[0-9]{4,8}$").expect("student id pattern"));

pub const GPA_MIN: f64 = 0.0;
pub const GPA_MAX: f64 = 4.0;

/// The rule that rejected a field. Each carries a fixed applicant-facing message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationRule {
    Required,
    ChoiceRequired,
    Agreement,
    Email,
    Phone,
    StudentId,
    GpaRange,
    Url,
}

impl ValidationRule {
    pub const fn message(self) -> &'static str {
        match self {
            ValidationRule::Required => "Trường này là bắt buộc",
            ValidationRule::ChoiceRequired => "Vui lòng chọn một tùy chọn",
            ValidationRule::Agreement => "Bạn phải đồng ý với cam kết",
            ValidationRule::Email => "Email không hợp lệ",
            ValidationRule::Phone => "Số điện thoại phải có 10-11 số và bắt đầu bằng 0",
            ValidationRule::StudentId => "Mã SV phải có dạng XX1234 (2 chữ + số)",
            ValidationRule::GpaRange => "GPA phải từ 0.00 đến 4.00",
            ValidationRule::Url => "URL không hợp lệ",
        }
    }
}

/// Outcome of validating one field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldVerdict {
    pub valid: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rule: Option<ValidationRule>,
}

impl FieldVerdict {
    pub fn pass() -> Self {
        Self {
            valid: true,
            message: String::new(),
            rule: None,
        }
    }

    pub fn fail(rule: ValidationRule) -> Self {
        Self {
            valid: false,
            message: rule.message().to_string(),
            rule: Some(rule),
        }
    }
}

/// A field that failed validation during submission.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{field}: {message}")]
pub struct FieldError {
    pub field: String,
    pub rule: ValidationRule,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, rule: ValidationRule) -> Self {
        Self {
            field: field.into(),
            rule,
            message: rule.message().to_string(),
        }
    }
}

/// Validate a single field. The first failing rule wins: the required check, then the
/// format checks in email, phone, student id, gpa, url order.
pub fn validate(field: &FormField) -> FieldVerdict {
    match failing_rule(field) {
        Some(rule) => FieldVerdict::fail(rule),
        None => FieldVerdict::pass(),
    }
}

/// Validate every field in order, collecting each failure.
pub fn validate_all<'a, I>(fields: I) -> Vec<FieldError>
where
    I: IntoIterator<Item = &'a FormField>,
{
    fields
        .into_iter()
        .filter_map(|field| failing_rule(field).map(|rule| FieldError::new(&field.name, rule)))
        .collect()
}

fn failing_rule(field: &FormField) -> Option<ValidationRule> {
    if field.required {
        if let Some(rule) = required_rule(field) {
            return Some(rule);
        }
    }
    format_rule(field)
}

fn required_rule(field: &FormField) -> Option<ValidationRule> {
    if field.name == AGREEMENT_FIELD {
        return (!matches!(field.value, FieldValue::Boolean(true)))
            .then_some(ValidationRule::Agreement);
    }
    match &field.value {
        FieldValue::SingleChoice(selected) => {
            let chosen = selected
                .as_deref()
                .is_some_and(|value| !value.trim().is_empty());
            (!chosen).then_some(ValidationRule::ChoiceRequired)
        }
        FieldValue::Boolean(_) => None,
        FieldValue::MultiChoice(selected) => {
            selected.is_empty().then_some(ValidationRule::Required)
        }
        other => other
            .as_text()
            .is_some_and(|value| value.trim().is_empty())
            .then_some(ValidationRule::Required),
    }
}

fn format_rule(field: &FormField) -> Option<ValidationRule> {
    if matches!(
        field.value,
        FieldValue::SingleChoice(_) | FieldValue::MultiChoice(_) | FieldValue::Boolean(_)
    ) {
        return None;
    }
    let value = field.value.as_text().filter(|value| !value.is_empty())?;

    if matches!(field.value, FieldValue::Email(_)) && !is_valid_email(value) {
        return Some(ValidationRule::Email);
    }
    let is_phone = matches!(field.value, FieldValue::Phone(_)) || field.name == PHONE_FIELD;
    if is_phone && !is_valid_phone(value) {
        return Some(ValidationRule::Phone);
    }
    if field.name == STUDENT_ID_FIELD && !is_valid_student_id(value) {
        return Some(ValidationRule::StudentId);
    }
    if field.name == GPA_FIELD && !is_gpa_in_range(value) {
        return Some(ValidationRule::GpaRange);
    }
    if matches!(field.value, FieldValue::Url(_)) && !is_valid_url(value) {
        return Some(ValidationRule::Url);
    }
    None
}

pub fn is_valid_email(value: &str) -> bool {
    EMAIL.is_match(value)
}

/// A leading `0` followed by 9 or 10 digits.
pub fn is_valid_phone(value: &str) -> bool {
    PHONE.is_match(value)
}

/// Two letters followed by 4 to 8 digits, either case.
pub fn is_valid_student_id(value: &str) -> bool {
    STUDENT_ID.is_match(value)
}

/// Unparseable input is accepted; only a parsed value outside [0, 4] is rejected.
pub fn is_gpa_in_range(value: &str) -> bool {
    match leading_float(value) {
        Some(gpa) => (GPA_MIN..=GPA_MAX).contains(&gpa),
        None => true,
    }
}

pub fn is_valid_url(value: &str) -> bool {
    url::Url::parse(value).is_ok()
}
