use async_trait::async_trait;
use thiserror::Error;

use quiz_core::SubmissionPayload;
use quiz_core::model::{AssignmentId, AssignmentResults, AssignmentSummary, CategoryGroup, UserId};

/// Errors surfaced by gateway adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum GatewayError {
    #[error("not found")]
    NotFound,

    #[error("request failed with status {status}{}", message_suffix(.message))]
    HttpStatus { status: u16, message: Option<String> },

    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error("invalid endpoint: {0}")]
    Endpoint(#[from] url::ParseError),

    #[error("could not decode response: {0}")]
    Decode(String),

    #[error("service unavailable: {0}")]
    Unavailable(String),
}

impl GatewayError {
    /// Whether retrying the same call may succeed.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Http(err) => err.is_timeout() || err.is_connect() || err.is_request(),
            Self::HttpStatus { status, .. } => *status >= 500 || matches!(status, 408 | 429),
            Self::Unavailable(_) => true,
            Self::NotFound | Self::Endpoint(_) | Self::Decode(_) => false,
        }
    }
}

fn message_suffix(message: &Option<String>) -> String {
    message
        .as_deref()
        .map(|m| format!(": {m}"))
        .unwrap_or_default()
}

/// Contract of the remote assignment service.
///
/// Question authoring, scoring and mastery statistics live behind this
/// boundary; the client only consumes their results.
#[async_trait]
pub trait AssignmentGateway: Send + Sync {
    /// Assignments visible to the learner, completed or not.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError` if the catalogue cannot be fetched.
    async fn list_assignments(&self, user: UserId)
    -> Result<Vec<AssignmentSummary>, GatewayError>;

    /// Questions of an assignment grouped by category, in display order.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError::NotFound` for an unknown assignment, or other
    /// gateway errors.
    async fn fetch_assignment_questions(
        &self,
        user: UserId,
        assignment: AssignmentId,
    ) -> Result<Vec<CategoryGroup>, GatewayError>;

    /// Submit every response of an attempt and receive the scored results.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError` if the submission is not accepted.
    async fn submit_assignment(
        &self,
        user: UserId,
        assignment: AssignmentId,
        payload: &SubmissionPayload,
    ) -> Result<AssignmentResults, GatewayError>;

    /// Results of a previously submitted attempt.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError::NotFound` if nothing was submitted yet.
    async fn fetch_assignment_results(
        &self,
        user: UserId,
        assignment: AssignmentId,
    ) -> Result<AssignmentResults, GatewayError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_errors_are_transient() {
        let err = GatewayError::HttpStatus {
            status: 503,
            message: None,
        };
        assert!(err.is_transient());
        assert!(GatewayError::Unavailable("down".into()).is_transient());
    }

    #[test]
    fn client_errors_are_not_transient() {
        let err = GatewayError::HttpStatus {
            status: 400,
            message: Some("bad payload".into()),
        };
        assert!(!err.is_transient());
        assert_eq!(err.to_string(), "request failed with status 400: bad payload");
        assert!(!GatewayError::NotFound.is_transient());
        assert!(!GatewayError::Decode("x".into()).is_transient());
    }
}
