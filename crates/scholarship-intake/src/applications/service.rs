use std::sync::Arc;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use tracing::{debug, info, warn};

use super::domain::{ApplicationRecord, SubmissionDocument, SubmissionId};
use super::schema::FormSchema;
use super::scoring::{EligibilityTier, ScoreOutcome, ScoringConfig, ScoringEngine};
use super::session::{ApplicationForm, FormSession};
use super::store::{ApplicationStore, StoreError};
use super::validation::FieldError;
use crate::config::DEFAULT_COLLECTION;

/// Service composing the form definition, validation, the scoring rubric, and the document
/// store.
pub struct ScholarshipApplicationService<S> {
    store: Arc<S>,
    engine: Arc<ScoringEngine>,
    schema: Arc<FormSchema>,
    collection: String,
}

impl<S> ScholarshipApplicationService<S>
where
    S: ApplicationStore + 'static,
{
    pub fn new(store: Arc<S>, config: ScoringConfig) -> Self {
        Self {
            store,
            engine: Arc::new(ScoringEngine::new(config)),
            schema: Arc::new(FormSchema::default()),
            collection: DEFAULT_COLLECTION.to_string(),
        }
    }

    pub fn with_schema(mut self, schema: FormSchema) -> Self {
        self.schema = Arc::new(schema);
        self
    }

    pub fn schema(&self) -> &FormSchema {
        &self.schema
    }

    /// Build a session from posted values using the service's form definition.
    pub fn open_session(&self, form: ApplicationForm) -> FormSession {
        self.schema.session_from(form)
    }

    pub fn with_collection(mut self, collection: impl Into<String>) -> Self {
        self.collection = collection.into();
        self
    }

    pub fn collection(&self) -> &str {
        &self.collection
    }

    /// Score a record without submitting it.
    pub fn preview(&self, record: &ApplicationRecord) -> ScoreOutcome {
        self.engine.score(record)
    }

    /// Validate, score and store the session's application.
    ///
    /// On success the session is reset. On any failure it is left untouched so the applicant
    /// can correct it and retry.
    pub async fn submit(
        &self,
        session: &mut FormSession,
    ) -> Result<SubmissionReceipt, SubmissionError> {
        self.submit_at(session, Utc::now()).await
    }

    pub async fn submit_at(
        &self,
        session: &mut FormSession,
        now: DateTime<Utc>,
    ) -> Result<SubmissionReceipt, SubmissionError> {
        let errors = session.validate();
        if let Some(first) = errors.first() {
            debug!(
                failing = errors.len(),
                field = %first.field,
                "submission rejected by validation"
            );
            return Err(SubmissionError::Validation(first.clone()));
        }

        let record = session.collect_record();
        let outcome = self.engine.score(&record);
        let submitted_at = now.to_rfc3339_opts(SecondsFormat::Millis, true);
        let document = SubmissionDocument::new(record, outcome.total, submitted_at.clone());

        let id = match self.store.create(&self.collection, document).await {
            Ok(id) => id,
            Err(err) => {
                warn!(collection = %self.collection, error = %err, "store rejected submission");
                return Err(err.into());
            }
        };

        info!(
            collection = %self.collection,
            id = %id.0,
            score = outcome.total,
            tier = outcome.tier.label(),
            "scholarship application stored"
        );
        session.reset();

        Ok(SubmissionReceipt {
            id,
            score: outcome.total,
            tier: outcome.tier,
            message: outcome.tier.message(),
            submitted_at,
        })
    }
}

/// What the applicant sees after a successful submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmissionReceipt {
    pub id: SubmissionId,
    pub score: u8,
    pub tier: EligibilityTier,
    pub message: &'static str,
    pub submitted_at: String,
}

/// Error raised by the submission service.
#[derive(Debug, thiserror::Error)]
pub enum SubmissionError {
    #[error(transparent)]
    Validation(#[from] FieldError),
    #[error(transparent)]
    Store(#[from] StoreError),
}
