use dioxus::prelude::*;

use services::AssessmentError;

/// A failure as the learner sees it. The copy comes from the service error.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ViewError {
    message: &'static str,
    retryable: bool,
}

impl ViewError {
    pub const UNKNOWN: Self = Self {
        message: "Something went wrong. Please try again.",
        retryable: true,
    };

    #[must_use]
    pub fn message(self) -> &'static str {
        self.message
    }

    #[must_use]
    pub fn is_retryable(self) -> bool {
        self.retryable
    }
}

impl From<&AssessmentError> for ViewError {
    fn from(err: &AssessmentError) -> Self {
        Self {
            message: err.user_message(),
            retryable: err.is_transient(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ViewState<T> {
    Idle,
    Loading,
    Ready(T),
    Error(ViewError),
}

#[must_use]
pub fn view_state_from_resource<T: Clone>(
    resource: &Resource<Result<T, ViewError>>,
) -> ViewState<T> {
    match resource.state().cloned() {
        UseResourceState::Pending => ViewState::Loading,
        UseResourceState::Ready => match resource.value().read().as_ref() {
            Some(Ok(data)) => ViewState::Ready(data.clone()),
            Some(Err(err)) => ViewState::Error(*err),
            None => ViewState::Error(ViewError::UNKNOWN),
        },
        UseResourceState::Paused | UseResourceState::Stopped => ViewState::Idle,
    }
}
