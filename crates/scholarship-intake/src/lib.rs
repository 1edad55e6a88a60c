//! Scholarship application intake.
//!
//! Field validation, eligibility scoring, and submission of finished applications to an
//! external document store.

pub mod applications;
pub mod config;
pub mod error;
pub mod telemetry;
