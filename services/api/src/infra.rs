use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use chrono::Utc;
use metrics_exporter_prometheus::PrometheusHandle;
use scholarship_intake::applications::{
    ApplicationStore, ImageReader, PendingImage, ReadError, StoreError, SubmissionDocument,
    SubmissionId,
};
use std::collections::HashMap;
use std::io;
use std::path::Path;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Process-local stand-in for the remote document store.
#[derive(Default, Clone)]
pub(crate) struct InMemoryApplicationStore {
    sequence: Arc<AtomicU64>,
    documents: Arc<Mutex<HashMap<SubmissionId, (String, SubmissionDocument)>>>,
}

impl InMemoryApplicationStore {
    pub(crate) fn get(&self, id: &SubmissionId) -> Option<(String, SubmissionDocument)> {
        self.documents
            .lock()
            .expect("store mutex poisoned")
            .get(id)
            .cloned()
    }
}

#[async_trait]
impl ApplicationStore for InMemoryApplicationStore {
    async fn create(
        &self,
        collection: &str,
        document: SubmissionDocument,
    ) -> Result<SubmissionId, StoreError> {
        let next = self.sequence.fetch_add(1, Ordering::Relaxed) + 1;
        let id = SubmissionId(format!("{collection}-{next:06}"));
        let document = document.with_server_timestamp(Utc::now());

        let mut guard = self
            .documents
            .lock()
            .map_err(|_| StoreError::Unavailable("document store lock poisoned".to_string()))?;
        if guard.contains_key(&id) {
            return Err(StoreError::Rejected(format!("document {} already exists", id.0)));
        }
        guard.insert(id.clone(), (collection.to_string(), document));
        Ok(id)
    }
}

/// Reads uploads from the local filesystem and returns them as base64 data URLs.
#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct FsImageReader;

#[async_trait]
impl ImageReader for FsImageReader {
    async fn read_as_base64(&self, image: &PendingImage) -> Result<String, ReadError> {
        let bytes = tokio::fs::read(&image.location)
            .await
            .map_err(|err| match err.kind() {
                io::ErrorKind::NotFound => ReadError::NotFound(image.location.clone()),
                _ => ReadError::Io(format!("{}: {err}", image.location)),
            })?;
        Ok(format!(
            "data:{};base64,{}",
            image.content_type,
            STANDARD.encode(bytes)
        ))
    }
}

/// Describe a file on disk as a pending upload, guessing its content type from the extension.
pub(crate) async fn pending_image_from_path(path: &Path) -> io::Result<PendingImage> {
    let metadata = tokio::fs::metadata(path).await?;
    let content_type = mime_guess::from_path(path)
        .first_or_octet_stream()
        .essence_str()
        .to_string();
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    Ok(PendingImage {
        name,
        size: metadata.len(),
        content_type,
        location: path.display().to_string(),
    })
}
