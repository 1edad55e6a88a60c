use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use super::attachments::ImageGallery;
use super::domain::{
    ApplicationRecord, FieldValue, FormField, ImageAttachment, AGREEMENT_FIELD, RESERVED_KEYS,
    SITUATION_FIELD,
};
use super::entries::EntryList;
use super::validation::{validate_all, FieldError};

/// Everything the applicant has entered in the current form session.
///
/// The session is owned by whoever drives the form and handed to the validator, scorer and
/// submission service explicitly; nothing here is shared.
#[derive(Debug, Clone, Default)]
pub struct FormSession {
    pub fields: Vec<FormField>,
    pub achievements: EntryList,
    pub evidences: EntryList,
    pub images: ImageGallery,
}

impl FormSession {
    pub fn new(fields: Vec<FormField>) -> Self {
        Self {
            fields,
            ..Self::default()
        }
    }

    pub fn field(&self, name: &str) -> Option<&FormField> {
        self.fields.iter().find(|field| field.name == name)
    }

    /// Replace the value of the named field. Returns `false` if no such field exists or the
    /// value is for a different kind of control.
    pub fn set_value(&mut self, name: &str, value: FieldValue) -> bool {
        match self.fields.iter_mut().find(|field| field.name == name) {
            Some(field) if field.value.kind() == value.kind() => {
                field.value = value;
                true
            }
            _ => false,
        }
    }

    /// Validate every field, then every evidence link, in form order.
    pub fn validate(&self) -> Vec<FieldError> {
        let evidence_fields: Vec<FormField> = self
            .evidences
            .iter()
            .enumerate()
            .map(|(index, entry)| {
                FormField::optional(
                    format!("evidences[{index}]"),
                    FieldValue::Url(entry.trim().to_string()),
                )
            })
            .collect();

        let mut errors = validate_all(&self.fields);
        errors.extend(validate_all(&evidence_fields));
        errors
    }

    pub fn first_error(&self) -> Option<FieldError> {
        self.validate().into_iter().next()
    }

    /// Snapshot the session into a flat record. Image bytes are left out; only the count and
    /// names are kept.
    pub fn collect_record(&self) -> ApplicationRecord {
        let mut record = ApplicationRecord::default();

        for field in &self.fields {
            if field.name.is_empty() {
                continue;
            }
            match &field.value {
                FieldValue::MultiChoice(selected) if field.name == SITUATION_FIELD => {
                    record.situations.extend(selected.iter().cloned());
                }
                FieldValue::Boolean(checked) if field.name == AGREEMENT_FIELD => {
                    record.agreement = *checked;
                }
                FieldValue::MultiChoice(_) | FieldValue::Boolean(_) => {
                    debug!(field = %field.name, "checkbox field not collected");
                }
                value => {
                    let Some(answer) = value.as_text() else {
                        continue;
                    };
                    if RESERVED_KEYS.contains(&field.name.as_str()) {
                        debug!(field = %field.name, "answer shadows a reserved record key");
                        continue;
                    }
                    record
                        .answers
                        .insert(field.name.clone(), Value::String(answer.to_string()));
                }
            }
        }

        record.achievements = self.achievements.filled();
        record.evidences = self.evidences.filled();
        record.image_count = self.images.len();
        record.image_names = self.images.names();
        record
    }

    /// Clear all entered values, dynamic entries and images.
    pub fn reset(&mut self) {
        for field in &mut self.fields {
            field.value = field.value.cleared();
        }
        self.achievements.reset();
        self.evidences.reset();
        self.images.clear();
    }
}

/// Values a client posts for one application, keyed by field name.
///
/// Only values travel over the wire; which fields exist and which are required comes from the
/// server's `FormSchema`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApplicationForm {
    #[serde(default)]
    pub answers: BTreeMap<String, Value>,
    #[serde(default)]
    pub achievements: Vec<String>,
    #[serde(default)]
    pub evidences: Vec<String>,
    #[serde(default)]
    pub images: Vec<ImageAttachment>,
}
