use std::collections::{BTreeSet, HashMap};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::response::Response;
use chrono::{TimeZone, Utc};
use serde_json::{json, Value};

use crate::applications::attachments::{ImageReader, PendingImage, ReadError};
use crate::applications::domain::{
    ApplicationRecord, FieldValue, FormField, ImageAttachment, SubmissionDocument, SubmissionId,
};
use crate::applications::store::{ApplicationStore, StoreError};
use crate::applications::{
    application_router, FormSession, ScholarshipApplicationService, ScoringConfig,
};

pub(super) fn text(value: &str) -> FieldValue {
    FieldValue::Text(value.to_string())
}

pub(super) fn number(value: &str) -> FieldValue {
    FieldValue::Number(value.to_string())
}

pub(super) fn choice(value: &str) -> FieldValue {
    FieldValue::SingleChoice(Some(value.to_string()))
}

pub(super) fn situations(values: &[&str]) -> FieldValue {
    FieldValue::MultiChoice(values.iter().map(|value| value.to_string()).collect::<BTreeSet<_>>())
}

pub(super) fn fields() -> Vec<FormField> {
    vec![
        FormField::required("fullName", text("Nguyễn Văn An")),
        FormField::required("studentId", text("SE123456")),
        FormField::required(
            "email",
            FieldValue::Email("an.nguyen@example.edu.vn".to_string()),
        ),
        FormField::required("phone", FieldValue::Phone("0912345678".to_string())),
        FormField::required("gpa", number("3.6")),
        FormField::required("rank", choice("excellent")),
        FormField::required("income", number("2500000")),
        FormField::optional("situation", situations(&["rural_area", "single_parent"])),
        FormField::optional("essay", text("")),
        FormField::required("agreement", FieldValue::Boolean(true)),
    ]
}

/// The worked example: 36 + 10 + 15 + 4 + 9 + 4 = 78.
pub(super) fn session() -> FormSession {
    let mut session = FormSession::new(fields());
    session.achievements.set(0, "Giải nhất Olympic Tin học sinh viên 2024");
    session.achievements.add("ICPC regional finalist");
    session.achievements.add("Dean's list 2023");
    session
        .evidences
        .set(0, "https://drive.google.com/file/d/olympiad");
    session.evidences.add("https://example.edu.vn/icpc/2024");
    session
}

pub(super) fn record() -> ApplicationRecord {
    session().collect_record()
}

pub(super) fn image(name: &str) -> ImageAttachment {
    ImageAttachment {
        name: name.to_string(),
        size: 1024,
        data: "data:image/png;base64,iVBORw0KGgo=".to_string(),
    }
}

pub(super) fn fixed_now() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 1, 8, 30, 0)
        .single()
        .expect("valid timestamp")
}

pub(super) fn build_service() -> (ScholarshipApplicationService<MemoryStore>, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::default());
    let service = ScholarshipApplicationService::new(store.clone(), ScoringConfig::default());
    (service, store)
}

#[derive(Default, Clone)]
pub(super) struct MemoryStore {
    documents: Arc<Mutex<Vec<(String, SubmissionId, SubmissionDocument)>>>,
}

impl MemoryStore {
    pub(super) fn documents(&self) -> Vec<(String, SubmissionId, SubmissionDocument)> {
        self.documents.lock().expect("store mutex poisoned").clone()
    }
}

#[async_trait]
impl ApplicationStore for MemoryStore {
    async fn create(
        &self,
        collection: &str,
        document: SubmissionDocument,
    ) -> Result<SubmissionId, StoreError> {
        let mut guard = self.documents.lock().expect("store mutex poisoned");
        let id = SubmissionId(format!("doc-{:04}", guard.len() + 1));
        guard.push((
            collection.to_string(),
            id.clone(),
            document.with_server_timestamp(fixed_now()),
        ));
        Ok(id)
    }
}

pub(super) struct UnavailableStore;

#[async_trait]
impl ApplicationStore for UnavailableStore {
    async fn create(
        &self,
        _collection: &str,
        _document: SubmissionDocument,
    ) -> Result<SubmissionId, StoreError> {
        Err(StoreError::Unavailable(
            "Failed to get document because the client is offline.".to_string(),
        ))
    }
}

#[derive(Default)]
pub(super) struct MemoryImageReader {
    pub(super) files: HashMap<String, String>,
}

impl MemoryImageReader {
    pub(super) fn with_file(mut self, location: &str, data: &str) -> Self {
        self.files.insert(location.to_string(), data.to_string());
        self
    }
}

#[async_trait]
impl ImageReader for MemoryImageReader {
    async fn read_as_base64(&self, image: &PendingImage) -> Result<String, ReadError> {
        self.files
            .get(&image.location)
            .cloned()
            .ok_or_else(|| ReadError::NotFound(image.location.clone()))
    }
}

pub(super) fn pending(name: &str, content_type: &str) -> PendingImage {
    PendingImage {
        name: name.to_string(),
        size: 2048,
        content_type: content_type.to_string(),
        location: format!("uploads/{name}"),
    }
}

pub(super) fn form_payload() -> Value {
    json!({
        "answers": {
            "fullName": "Nguyễn Văn An",
            "studentId": "SE123456",
            "email": "an.nguyen@example.edu.vn",
            "phone": "0912345678",
            "faculty": "Software Engineering",
            "gpa": 3.6,
            "rank": "excellent",
            "income": "2500000",
            "situation": ["rural_area", "single_parent"],
            "agreement": true
        },
        "achievements": ["Olympiad gold", "ICPC regional finalist", "Dean's list 2023"],
        "evidences": ["https://drive.google.com/file/d/olympiad", "https://example.edu.vn/icpc/2024"],
        "images": [
            { "name": "certificate.png", "size": 1024, "data": "data:image/png;base64,iVBORw0KGgo=" }
        ]
    })
}

pub(super) fn application_router_with_store<S>(store: Arc<S>) -> axum::Router
where
    S: ApplicationStore + 'static,
{
    application_router(Arc::new(ScholarshipApplicationService::new(
        store,
        ScoringConfig::default(),
    )))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 16 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
