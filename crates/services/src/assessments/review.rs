use chrono::{DateTime, Utc};

use quiz_core::FlatQuestionSequence;
use quiz_core::model::{AssignmentResults, OutcomeStatus, OutcomeTally, ScoredResponse};

const UNKNOWN_QUESTION: &str = "Unknown question";

/// Totals shown above a results list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResultsSummary {
    pub total: usize,
    pub correct: u32,
    pub tally: OutcomeTally,
    pub completed_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewEntry {
    pub question_text: String,
    pub response: ScoredResponse,
}

/// A scored attempt ready for display, in the order the scorer returned it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttemptReview {
    pub summary: ResultsSummary,
    pub entries: Vec<ReviewEntry>,
}

impl AttemptReview {
    /// Pair each response with its question text.
    ///
    /// Text sent by the scorer wins; otherwise it is looked up in `sequence`
    /// when the questions are available.
    #[must_use]
    pub fn build(results: &AssignmentResults, sequence: Option<&FlatQuestionSequence>) -> Self {
        let entries = results
            .responses
            .iter()
            .map(|response| {
                if let OutcomeStatus::Unknown(raw) = &response.status {
                    tracing::warn!(question_id = %response.question_id, status = %raw, "unknown outcome status");
                }
                let question_text = response
                    .question_text
                    .clone()
                    .or_else(|| {
                        sequence
                            .and_then(|s| s.question(response.question_id))
                            .map(|q| q.text().to_string())
                    })
                    .unwrap_or_else(|| UNKNOWN_QUESTION.to_string());
                ReviewEntry {
                    question_text,
                    response: response.clone(),
                }
            })
            .collect();
        Self {
            summary: ResultsSummary {
                total: results.total(),
                correct: results.correct_count(),
                tally: results.tally(),
                completed_at: results.completed_at,
            },
            entries,
        }
    }
}
