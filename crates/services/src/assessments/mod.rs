mod review;
mod session;
mod submission;
mod workflow;

pub use crate::error::AssessmentError;
pub use review::{AttemptReview, ResultsSummary, ReviewEntry};
pub use session::AssessmentSession;
pub use submission::{SubmissionGate, SubmissionPermit, SubmissionTicket, SubmittedAttempt};
pub use workflow::AssessmentService;
