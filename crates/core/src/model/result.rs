use chrono::{DateTime, Utc};

use crate::model::ids::QuestionId;
use crate::model::outcome::{Outcome, OutcomeStatus};

/// Feedback content attached to a scored response by the scorer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResponseFeedback {
    pub short: Option<String>,
    pub long_text: Option<String>,
    pub long_file_path: Option<String>,
}

impl ResponseFeedback {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.short.is_none() && self.long_text.is_none() && self.long_file_path.is_none()
    }
}

/// One scored response, consumed verbatim from the scoring service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoredResponse {
    pub question_id: QuestionId,
    pub question_text: Option<String>,
    pub user_answer: String,
    pub correct_answer: String,
    pub status: OutcomeStatus,
    pub feedback: ResponseFeedback,
}

/// Per-outcome counts over a result set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OutcomeTally {
    pub sure_correct: u32,
    pub not_sure_correct: u32,
    pub not_sure_incorrect: u32,
    pub sure_incorrect: u32,
    pub unknown: u32,
}

impl OutcomeTally {
    #[must_use]
    pub fn correct(&self) -> u32 {
        self.sure_correct + self.not_sure_correct
    }
}

/// Scored attempt at an assignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssignmentResults {
    pub responses: Vec<ScoredResponse>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl AssignmentResults {
    #[must_use]
    pub fn total(&self) -> usize {
        self.responses.len()
    }

    #[must_use]
    pub fn tally(&self) -> OutcomeTally {
        let mut tally = OutcomeTally::default();
        for response in &self.responses {
            let slot = match response.status.outcome() {
                Some(Outcome::SureCorrect) => &mut tally.sure_correct,
                Some(Outcome::NotSureCorrect) => &mut tally.not_sure_correct,
                Some(Outcome::NotSureIncorrect) => &mut tally.not_sure_incorrect,
                Some(Outcome::SureIncorrect) => &mut tally.sure_incorrect,
                None => &mut tally.unknown,
            };
            *slot = slot.saturating_add(1);
        }
        tally
    }

    #[must_use]
    pub fn correct_count(&self) -> u32 {
        self.tally().correct()
    }
}
