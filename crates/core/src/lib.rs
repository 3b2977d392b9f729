#![forbid(unsafe_code)]

pub mod error;
pub mod flatten;
pub mod gate;
pub mod model;
pub mod navigation;
pub mod outcome;
pub mod session;
pub mod submission;
pub mod time;

pub use error::Error;
pub use flatten::{CategoryInfo, FlatQuestionSequence, flatten};
pub use gate::{ConfidenceGate, ConfidencePrompt, DismissOutcome, DismissPolicy};
pub use navigation::Navigation;
pub use outcome::{Emphasis, OutcomeFeedback, OutcomeIcon, classify};
pub use session::{
    Phase, Progress, Rejection, SessionInitError, SessionState, SnapshotEntry,
    SubmissionSnapshot, Transition,
};
pub use submission::{ResolutionError, SubmissionEntry, SubmissionPayload, build_payload};
pub use time::Clock;
