use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const GPA_FIELD: &str = "gpa";
pub const RANK_FIELD: &str = "rank";
pub const INCOME_FIELD: &str = "income";
pub const PHONE_FIELD: &str = "phone";
pub const STUDENT_ID_FIELD: &str = "studentId";
pub const AGREEMENT_FIELD: &str = "agreement";
pub const SITUATION_FIELD: &str = "situation";

/// Keys the record owns itself; answers may not shadow them.
pub(crate) const RESERVED_KEYS: &[&str] = &[
    "situations",
    "achievements",
    "evidences",
    "agreement",
    "imageCount",
    "imageNames",
    "score",
    "submittedAt",
    "createdAt",
];

/// Identifier the document store assigns to a persisted application.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SubmissionId(pub String);

/// Raw value captured by a single form control.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum FieldValue {
    Text(String),
    Number(String),
    Email(String),
    Phone(String),
    Url(String),
    SingleChoice(Option<String>),
    MultiChoice(BTreeSet<String>),
    Boolean(bool),
}

impl FieldValue {
    /// The string payload for text-like controls.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(value)
            | FieldValue::Number(value)
            | FieldValue::Email(value)
            | FieldValue::Phone(value)
            | FieldValue::Url(value) => Some(value),
            FieldValue::SingleChoice(selected) => selected.as_deref(),
            FieldValue::MultiChoice(_) | FieldValue::Boolean(_) => None,
        }
    }

    pub const fn kind(&self) -> FieldKind {
        match self {
            FieldValue::Text(_) => FieldKind::Text,
            FieldValue::Number(_) => FieldKind::Number,
            FieldValue::Email(_) => FieldKind::Email,
            FieldValue::Phone(_) => FieldKind::Phone,
            FieldValue::Url(_) => FieldKind::Url,
            FieldValue::SingleChoice(_) => FieldKind::SingleChoice,
            FieldValue::MultiChoice(_) => FieldKind::MultiChoice,
            FieldValue::Boolean(_) => FieldKind::Boolean,
        }
    }

    /// Same control kind with nothing entered.
    pub fn cleared(&self) -> Self {
        self.kind().empty_value()
    }
}

/// The kind of control a form field is rendered as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Text,
    Number,
    Email,
    Phone,
    Url,
    SingleChoice,
    MultiChoice,
    Boolean,
}

impl FieldKind {
    pub fn empty_value(self) -> FieldValue {
        match self {
            FieldKind::Text => FieldValue::Text(String::new()),
            FieldKind::Number => FieldValue::Number(String::new()),
            FieldKind::Email => FieldValue::Email(String::new()),
            FieldKind::Phone => FieldValue::Phone(String::new()),
            FieldKind::Url => FieldValue::Url(String::new()),
            FieldKind::SingleChoice => FieldValue::SingleChoice(None),
            FieldKind::MultiChoice => FieldValue::MultiChoice(BTreeSet::new()),
            FieldKind::Boolean => FieldValue::Boolean(false),
        }
    }

    /// Read a posted JSON answer as this kind of control.
    ///
    /// Anything missing or of the wrong JSON type reads as the empty value, so a required field
    /// sent with the wrong shape fails the required check instead of slipping through.
    pub fn value_from_json(self, answer: Option<&Value>) -> FieldValue {
        let text = || match answer {
            Some(Value::String(value)) => Some(value.clone()),
            _ => None,
        };
        match self {
            FieldKind::Text => FieldValue::Text(text().unwrap_or_default()),
            FieldKind::Email => FieldValue::Email(text().unwrap_or_default()),
            FieldKind::Phone => FieldValue::Phone(text().unwrap_or_default()),
            FieldKind::Url => FieldValue::Url(text().unwrap_or_default()),
            FieldKind::Number => FieldValue::Number(match answer {
                Some(Value::Number(number)) => number.to_string(),
                _ => text().unwrap_or_default(),
            }),
            FieldKind::SingleChoice => {
                FieldValue::SingleChoice(text().filter(|value| !value.is_empty()))
            }
            FieldKind::MultiChoice => FieldValue::MultiChoice(match answer {
                Some(Value::Array(items)) => items
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect(),
                _ => BTreeSet::new(),
            }),
            FieldKind::Boolean => FieldValue::Boolean(matches!(answer, Some(Value::Bool(true)))),
        }
    }
}

/// A named form control and the value the applicant entered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormField {
    pub name: String,
    pub value: FieldValue,
    #[serde(default)]
    pub required: bool,
}

impl FormField {
    pub fn required(name: impl Into<String>, value: FieldValue) -> Self {
        Self {
            name: name.into(),
            value,
            required: true,
        }
    }

    pub fn optional(name: impl Into<String>, value: FieldValue) -> Self {
        Self {
            name: name.into(),
            value,
            required: false,
        }
    }
}

/// Self-reported academic standing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AcademicRank {
    Excellent,
    Good,
    Fair,
    Average,
}

impl AcademicRank {
    /// Exact, case-sensitive match against the option values the form offers.
    pub fn from_answer(value: &str) -> Option<Self> {
        match value {
            "excellent" => Some(Self::Excellent),
            "good" => Some(Self::Good),
            "fair" => Some(Self::Fair),
            "average" => Some(Self::Average),
            _ => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            AcademicRank::Excellent => "excellent",
            AcademicRank::Good => "good",
            AcademicRank::Fair => "fair",
            AcademicRank::Average => "average",
        }
    }
}

/// Flat key/value snapshot of one application, collected at submission time.
///
/// Answers are kept as JSON scalars so records posted by clients may carry numbers and
/// booleans. A stored document also reads back as a record; its `score`, `submittedAt` and
/// `createdAt` land in `answers` and are ignored by the scorer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationRecord {
    #[serde(flatten)]
    pub answers: BTreeMap<String, Value>,
    #[serde(default)]
    pub situations: BTreeSet<String>,
    #[serde(default)]
    pub achievements: Vec<String>,
    #[serde(default)]
    pub evidences: Vec<String>,
    #[serde(default)]
    pub agreement: bool,
    #[serde(default)]
    pub image_count: usize,
    #[serde(default)]
    pub image_names: Vec<String>,
}

impl ApplicationRecord {
    pub fn answer(&self, name: &str) -> Option<&Value> {
        self.answers.get(name)
    }

    /// The answer when it is a JSON string.
    pub fn answer_text(&self, name: &str) -> Option<&str> {
        self.answers.get(name).and_then(Value::as_str)
    }
}

/// Creation time the store fills in when it persists a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "at", rename_all = "snake_case")]
pub enum ServerTimestamp {
    Pending,
    Assigned(DateTime<Utc>),
}

/// A validated, scored application ready for the store.
///
/// Only the submission service builds these, after every field has passed validation, so a
/// score never exists on an unvalidated record.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionDocument {
    #[serde(flatten)]
    record: ApplicationRecord,
    score: u8,
    submitted_at: String,
    created_at: ServerTimestamp,
}

impl SubmissionDocument {
    pub(crate) fn new(record: ApplicationRecord, score: u8, submitted_at: String) -> Self {
        Self {
            record,
            score,
            submitted_at,
            created_at: ServerTimestamp::Pending,
        }
    }

    pub fn record(&self) -> &ApplicationRecord {
        &self.record
    }

    pub fn score(&self) -> u8 {
        self.score
    }

    pub fn submitted_at(&self) -> &str {
        &self.submitted_at
    }

    pub fn created_at(&self) -> ServerTimestamp {
        self.created_at
    }

    /// Resolve the creation-time placeholder. Stores call this when persisting.
    pub fn with_server_timestamp(mut self, at: DateTime<Utc>) -> Self {
        self.created_at = ServerTimestamp::Assigned(at);
        self
    }
}

/// An image the applicant attached, held in memory for the current session only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageAttachment {
    pub name: String,
    pub size: u64,
    pub data: String,
}
