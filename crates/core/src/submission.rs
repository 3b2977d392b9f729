//! Resolves a finished session into the payload the scorer receives.

use thiserror::Error;

use crate::flatten::FlatQuestionSequence;
use crate::model::{OptionIndex, OptionText, QuestionId};
use crate::session::SubmissionSnapshot;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ResolutionError {
    #[error("question {0} is not part of this assignment")]
    UnknownQuestion(QuestionId),

    #[error("option {index} is out of range for question {question_id} ({options} options)")]
    OptionOutOfRange {
        question_id: QuestionId,
        index: OptionIndex,
        options: usize,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionEntry {
    pub question_id: QuestionId,
    pub answer_text: OptionText,
    pub is_sure: bool,
}

/// Immutable list of responses sent for scoring.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionPayload {
    entries: Vec<SubmissionEntry>,
}

impl SubmissionPayload {
    #[must_use]
    pub fn entries(&self) -> &[SubmissionEntry] {
        &self.entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SubmissionEntry> {
        self.entries.iter()
    }
}

/// Build the payload, turning each selected position into its option text.
///
/// # Errors
///
/// Returns `ResolutionError` if a question is missing from `sequence` or a
/// recorded index no longer fits its options.
pub fn build_payload(
    snapshot: &SubmissionSnapshot,
    sequence: &FlatQuestionSequence,
) -> Result<SubmissionPayload, ResolutionError> {
    let entries = snapshot
        .entries()
        .iter()
        .map(|entry| {
            let question = sequence
                .question(entry.question_id)
                .ok_or(ResolutionError::UnknownQuestion(entry.question_id))?;
            let answer_text =
                question
                    .resolve(entry.option)
                    .ok_or(ResolutionError::OptionOutOfRange {
                        question_id: entry.question_id,
                        index: entry.option,
                        options: question.option_count(),
                    })?;
            Ok(SubmissionEntry {
                question_id: entry.question_id,
                answer_text,
                is_sure: entry.is_sure,
            })
        })
        .collect::<Result<Vec<_>, ResolutionError>>()?;

    Ok(SubmissionPayload { entries })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flatten::fixtures::{group, question, two_categories};
    use crate::flatten::flatten;
    use crate::session::SessionState;
    use crate::time::fixed_now;

    fn settle_all(session: &mut SessionState, picks: &[(usize, bool)]) {
        for (option, sure) in picks {
            let id = session.current_question().unwrap().id();
            session.select_answer(id, OptionIndex::new(*option));
            session.confirm_confidence(id, *sure);
            session.advance();
        }
    }

    #[test]
    fn first_entry_matches_first_question_of_first_category() {
        let groups = two_categories();
        let sequence = flatten(&groups);
        let mut session = SessionState::started(sequence.clone(), fixed_now()).unwrap();
        settle_all(&mut session, &[(0, true), (1, false), (1, true)]);

        let payload = build_payload(&session.snapshot_for_submission().unwrap(), &sequence).unwrap();

        let first = &payload.entries()[0];
        let a_q1 = &groups[0].questions()[0];
        assert_eq!(first.question_id, a_q1.id());
        assert_eq!(first.answer_text.as_str(), a_q1.options()[0]);
        assert!(first.is_sure);
        assert_eq!(payload.len(), 3);
    }

    #[test]
    fn answer_text_equals_option_at_recorded_index() {
        let sequence = flatten(&two_categories());
        let mut session = SessionState::started(sequence.clone(), fixed_now()).unwrap();
        settle_all(&mut session, &[(2, true), (1, false), (0, false)]);

        let payload = build_payload(&session.snapshot_for_submission().unwrap(), &sequence).unwrap();
        for entry in payload.iter() {
            let question = sequence.question(entry.question_id).unwrap();
            let index = session.answer_for(entry.question_id).unwrap();
            assert_eq!(entry.answer_text.as_str(), question.options()[index.value()]);
        }
    }

    #[test]
    fn drifted_options_fail_resolution() {
        let loaded = flatten(&two_categories());
        let mut session = SessionState::started(loaded, fixed_now()).unwrap();
        settle_all(&mut session, &[(2, true), (0, true), (0, true)]);
        let snapshot = session.snapshot_for_submission().unwrap();

        // Question 1 lost its third option after loading.
        let drifted = flatten(&[
            group(10, "A", vec![question(1, &["a1", "a2"]), question(2, &["b1", "b2"])]),
            group(20, "B", vec![question(3, &["c1", "c2"])]),
        ]);
        let err = build_payload(&snapshot, &drifted).unwrap_err();
        assert_eq!(
            err,
            ResolutionError::OptionOutOfRange {
                question_id: QuestionId::new(1),
                index: OptionIndex::new(2),
                options: 2,
            }
        );
    }

    #[test]
    fn missing_question_fails_resolution() {
        let loaded = flatten(&two_categories());
        let mut session = SessionState::started(loaded, fixed_now()).unwrap();
        settle_all(&mut session, &[(0, true), (0, true), (0, true)]);
        let snapshot = session.snapshot_for_submission().unwrap();

        let shrunk = flatten(&[group(10, "A", vec![question(1, &["a1", "a2"])])]);
        assert_eq!(
            build_payload(&snapshot, &shrunk).unwrap_err(),
            ResolutionError::UnknownQuestion(QuestionId::new(2))
        );
    }
}
