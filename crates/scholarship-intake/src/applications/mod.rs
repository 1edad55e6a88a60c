//! Scholarship application intake: field validation, eligibility scoring, and submission.
//!
//! A [`FormSession`] owns everything the applicant has entered so far, laid out by a
//! [`FormSchema`]. The validator and scorer are pure functions over that state;
//! [`ScholarshipApplicationService`] wires them to an [`ApplicationStore`].

pub mod attachments;
pub mod domain;
pub mod entries;
mod numeric;
pub mod router;
pub mod schema;
pub mod scoring;
pub mod service;
pub mod session;
pub mod store;
pub mod validation;

#[cfg(test)]
mod tests;

pub use attachments::{ImageGallery, ImageReader, PendingImage, ReadError};
pub use domain::{
    AcademicRank, ApplicationRecord, FieldKind, FieldValue, FormField, ImageAttachment,
    ServerTimestamp, SubmissionDocument, SubmissionId,
};
pub use entries::EntryList;
pub use router::application_router;
pub use schema::{FieldSpec, FormSchema};
pub use scoring::{
    score, EligibilityTier, ScoreComponent, ScoreFactor, ScoreOutcome, ScoringConfig,
    ScoringEngine,
};
pub use service::{ScholarshipApplicationService, SubmissionError, SubmissionReceipt};
pub use session::{ApplicationForm, FormSession};
pub use store::{ApplicationStore, StoreError};
pub use validation::{validate, FieldError, FieldVerdict, ValidationRule};
