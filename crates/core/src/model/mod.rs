mod assignment;
mod category;
mod ids;
mod media;
mod outcome;
mod question;
mod result;

pub use assignment::{AssignmentSummary, MasteryStats};
pub use category::{CategoryError, CategoryGroup};
pub use ids::{AssignmentId, AttemptId, CategoryId, ParseIdError, QuestionId, UserId};
pub use media::{MediaKind, MediaRef};
pub use outcome::{Outcome, OutcomeParseError, OutcomeStatus};
pub use question::{OptionIndex, OptionText, Question, QuestionError};
pub use result::{AssignmentResults, OutcomeTally, ResponseFeedback, ScoredResponse};
