use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use serde_json::json;

use super::domain::{ApplicationRecord, FormField};
use super::service::{ScholarshipApplicationService, SubmissionError};
use super::session::ApplicationForm;
use super::store::ApplicationStore;
use super::validation::validate;

/// Router builder exposing HTTP endpoints for validation, scoring and submission.
pub fn application_router<S>(service: Arc<ScholarshipApplicationService<S>>) -> Router
where
    S: ApplicationStore + 'static,
{
    Router::new()
        .route("/api/v1/scholarships", post(submit_handler::<S>))
        .route("/api/v1/scholarships/validate", post(validate_handler::<S>))
        .route("/api/v1/scholarships/score", post(score_handler::<S>))
        .with_state(service)
}

pub(crate) async fn submit_handler<S>(
    State(service): State<Arc<ScholarshipApplicationService<S>>>,
    axum::Json(form): axum::Json<ApplicationForm>,
) -> Response
where
    S: ApplicationStore + 'static,
{
    let mut session = service.open_session(form);
    match service.submit(&mut session).await {
        Ok(receipt) => (StatusCode::CREATED, axum::Json(receipt)).into_response(),
        Err(SubmissionError::Validation(error)) => {
            let payload = json!({
                "field": error.field,
                "rule": error.rule,
                "error": error.message,
            });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
        Err(SubmissionError::Store(error)) => {
            let payload = json!({
                "error": error.message(),
            });
            (StatusCode::BAD_GATEWAY, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn validate_handler<S>(
    State(service): State<Arc<ScholarshipApplicationService<S>>>,
    axum::Json(field): axum::Json<FormField>,
) -> Response
where
    S: ApplicationStore + 'static,
{
    let verdict = validate(&service.schema().resolve(field));
    (StatusCode::OK, axum::Json(verdict)).into_response()
}

pub(crate) async fn score_handler<S>(
    State(service): State<Arc<ScholarshipApplicationService<S>>>,
    axum::Json(record): axum::Json<ApplicationRecord>,
) -> Response
where
    S: ApplicationStore + 'static,
{
    let outcome = service.preview(&record);
    let payload = json!({
        "score": outcome.total,
        "tier": outcome.tier,
        "message": outcome.tier.message(),
        "components": outcome.components,
    });
    (StatusCode::OK, axum::Json(payload)).into_response()
}
