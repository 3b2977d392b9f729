//! Shared error types for the services crate.

use thiserror::Error;

use gateway::{ConfigError, GatewayError};
use quiz_core::{ResolutionError, SessionInitError};

/// Errors emitted while running an assessment.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AssessmentError {
    #[error(transparent)]
    SessionInit(#[from] SessionInitError),
    #[error(transparent)]
    Resolution(#[from] ResolutionError),
    #[error("assignment is not ready to submit")]
    NotReady,
    #[error("a submission is already in flight")]
    SubmissionInFlight,
    #[error("assignment already submitted")]
    AlreadySubmitted,
    #[error("submission failed: {0}")]
    SubmissionNetwork(#[source] GatewayError),
    #[error("submission rejected: {0}")]
    SubmissionRejected(#[source] GatewayError),
    #[error(transparent)]
    Gateway(#[from] GatewayError),
    #[error("scored {received} responses for {expected} submitted answers")]
    MismatchedResults { expected: usize, received: usize },
}

impl AssessmentError {
    /// Whether retrying the same action can succeed.
    ///
    /// A failed submission keeps the session ready to submit either way,
    /// but only a timeout or network failure is worth retrying.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        match self {
            Self::SubmissionNetwork(e) | Self::Gateway(e) => e.is_transient(),
            _ => false,
        }
    }

    /// Copy shown to the learner.
    #[must_use]
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::SessionInit(_) => "Cannot start assignment: it has no questions.",
            Self::Resolution(_) => {
                "This assignment changed while you were answering. Please reload the assignment."
            }
            Self::NotReady => "Answer every question and choose your confidence before submitting.",
            Self::SubmissionInFlight => "Your answers are being submitted.",
            Self::AlreadySubmitted => "This assignment has already been submitted.",
            Self::SubmissionNetwork(_) => {
                "Could not submit your answers. Check your connection and try again."
            }
            Self::SubmissionRejected(GatewayError::HttpStatus { status: 409, .. }) => {
                "This assignment was already completed elsewhere. Open it from your completed list."
            }
            Self::SubmissionRejected(_) => {
                "The assignment service did not accept your answers. Please reload the assignment."
            }
            Self::Gateway(GatewayError::NotFound) => "This assignment could not be found.",
            Self::Gateway(_) => "Could not reach the assignment service. Please try again.",
            Self::MismatchedResults { .. } => {
                "Your answers were submitted, but some results are missing. Open the assignment from your completed list later."
            }
        }
    }
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Gateway(#[from] GatewayError),
}
