use async_trait::async_trait;

use super::domain::{SubmissionDocument, SubmissionId};

/// Remote document store that persists finished applications.
///
/// Implementations resolve the document's creation-time placeholder and assign its identity.
#[async_trait]
pub trait ApplicationStore: Send + Sync {
    async fn create(
        &self,
        collection: &str,
        document: SubmissionDocument,
    ) -> Result<SubmissionId, StoreError>;
}

/// Store failure. The message is shown to the applicant as-is.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("{0}")]
    Rejected(String),
    #[error("{0}")]
    Unavailable(String),
}

impl StoreError {
    pub fn message(&self) -> &str {
        match self {
            StoreError::Rejected(message) | StoreError::Unavailable(message) => message,
        }
    }
}
