use serde::{Deserialize, Serialize};
use tracing::debug;

use super::domain::{
    FieldKind, FormField, AGREEMENT_FIELD, GPA_FIELD, INCOME_FIELD, PHONE_FIELD, RANK_FIELD,
    SITUATION_FIELD, STUDENT_ID_FIELD,
};
use super::entries::EntryList;
use super::session::{ApplicationForm, FormSession};

/// One control on the application form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSpec {
    pub name: String,
    pub kind: FieldKind,
    pub required: bool,
}

impl FieldSpec {
    pub fn required(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            kind,
            required: true,
        }
    }

    pub fn optional(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            kind,
            required: false,
        }
    }
}

/// The server's definition of the form: which controls exist, their kinds, and which are
/// required. Posted values are read through it, so clients cannot drop or relax a field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormSchema {
    fields: Vec<FieldSpec>,
}

impl FormSchema {
    pub fn new(fields: Vec<FieldSpec>) -> Self {
        Self { fields }
    }

    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|spec| spec.name == name)
    }

    /// A session with every control present and empty.
    pub fn blank_session(&self) -> FormSession {
        FormSession::new(
            self.fields
                .iter()
                .map(|spec| FormField {
                    name: spec.name.clone(),
                    value: spec.kind.empty_value(),
                    required: spec.required,
                })
                .collect(),
        )
    }

    /// Fill a session from posted values. Answers for unknown names are dropped.
    pub fn session_from(&self, form: ApplicationForm) -> FormSession {
        for name in form.answers.keys() {
            if self.field(name).is_none() {
                debug!(field = %name, "ignoring answer for a field the form does not define");
            }
        }

        let fields = self
            .fields
            .iter()
            .map(|spec| FormField {
                name: spec.name.clone(),
                value: spec.kind.value_from_json(form.answers.get(&spec.name)),
                required: spec.required,
            })
            .collect();

        FormSession {
            fields,
            achievements: entry_list(form.achievements),
            evidences: entry_list(form.evidences),
            images: form.images.into_iter().collect(),
        }
    }

    /// Take the `required` flag from the form when it defines the field.
    pub fn resolve(&self, mut field: FormField) -> FormField {
        if let Some(spec) = self.field(&field.name) {
            field.required = spec.required;
        }
        field
    }
}

impl Default for FormSchema {
    /// The scholarship application form.
    fn default() -> Self {
        Self::new(vec![
            FieldSpec::required("fullName", FieldKind::Text),
            FieldSpec::required(STUDENT_ID_FIELD, FieldKind::Text),
            FieldSpec::required("email", FieldKind::Email),
            FieldSpec::required(PHONE_FIELD, FieldKind::Phone),
            FieldSpec::required("faculty", FieldKind::Text),
            FieldSpec::required(GPA_FIELD, FieldKind::Number),
            FieldSpec::required(RANK_FIELD, FieldKind::SingleChoice),
            FieldSpec::required(INCOME_FIELD, FieldKind::Number),
            FieldSpec::optional(SITUATION_FIELD, FieldKind::MultiChoice),
            FieldSpec::optional("motivation", FieldKind::Text),
            FieldSpec::required(AGREEMENT_FIELD, FieldKind::Boolean),
        ])
    }
}

fn entry_list(entries: Vec<String>) -> EntryList {
    if entries.is_empty() {
        EntryList::new()
    } else {
        EntryList::from_entries(entries)
    }
}
