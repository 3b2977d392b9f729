#![forbid(unsafe_code)]

pub mod app_services;
pub mod assessments;
pub mod catalogue;
pub mod error;

pub use quiz_core::Clock;

pub use app_services::AppServices;
pub use assessments::{
    AssessmentService, AssessmentSession, AttemptReview, ResultsSummary, ReviewEntry,
    SubmissionGate, SubmissionPermit, SubmissionTicket, SubmittedAttempt,
};
pub use catalogue::AssignmentCatalogue;
pub use error::{AppServicesError, AssessmentError};
