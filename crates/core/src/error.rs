use thiserror::Error;

use crate::model::{CategoryError, OutcomeParseError, QuestionError};
use crate::session::SessionInitError;
use crate::submission::ResolutionError;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error(transparent)]
    SessionInit(#[from] SessionInitError),
    #[error(transparent)]
    Resolution(#[from] ResolutionError),
    #[error(transparent)]
    Question(#[from] QuestionError),
    #[error(transparent)]
    Category(#[from] CategoryError),
    #[error(transparent)]
    Outcome(#[from] OutcomeParseError),
}
