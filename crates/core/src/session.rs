//! In-memory state of one learner working through an assignment.
//!
//! Every transition is a plain method on [`SessionState`]. Calls that are not
//! legal in the current state leave it untouched and report why through
//! [`Transition::Ignored`]; only starting with no questions is an error.

use std::collections::HashMap;
use std::fmt;

use chrono::{DateTime, Duration, Utc};
use thiserror::Error;

use crate::flatten::{CategoryInfo, FlatQuestionSequence};
use crate::model::{OptionIndex, Question, QuestionId};

//
// ─── ERRORS & TRANSITIONS ─────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SessionInitError {
    #[error("cannot start assignment: it has no questions")]
    NoQuestions,
}

/// Coarse lifecycle stage of a session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Phase {
    #[default]
    NotStarted,
    InProgress,
    AwaitingConfidence,
    ReadyToSubmit,
    Submitted,
}

/// Why a transition was not applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    WrongPhase(Phase),
    NotCurrentQuestion,
    OptionOutOfRange,
    /// Confirmation for a question that is not waiting for one.
    StaleConfirmation,
    Unanswered,
    AtBoundary,
    /// Navigation while the confidence gate is open.
    AwaitingConfidence,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Applied,
    Ignored(Rejection),
}

impl Transition {
    #[must_use]
    pub fn is_applied(self) -> bool {
        matches!(self, Self::Applied)
    }

    #[must_use]
    pub fn rejection(self) -> Option<Rejection> {
        match self {
            Self::Applied => None,
            Self::Ignored(reason) => Some(reason),
        }
    }
}

//
// ─── SNAPSHOT & PROGRESS ──────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SnapshotEntry {
    pub question_id: QuestionId,
    pub option: OptionIndex,
    pub is_sure: bool,
}

/// Answers of a completed session in question order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionSnapshot {
    entries: Vec<SnapshotEntry>,
}

impl SubmissionSnapshot {
    #[must_use]
    pub fn entries(&self) -> &[SnapshotEntry] {
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
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    /// 1-based position of the current question.
    pub position: usize,
    pub total: usize,
    /// Questions with both an answer and a confidence.
    pub answered: usize,
}

impl fmt::Display for Progress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Question {} of {}", self.position, self.total)
    }
}

//
// ─── SESSION STATE ────────────────────────────────────────────────────────────
//

/// Selection waiting for a confidence, plus what it replaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Pending {
    question_id: QuestionId,
    previous: Option<(OptionIndex, bool)>,
}

#[derive(Debug, Clone, Default)]
pub struct SessionState {
    sequence: FlatQuestionSequence,
    phase: Phase,
    current: usize,
    answers: HashMap<QuestionId, OptionIndex>,
    confidences: HashMap<QuestionId, bool>,
    pending: Option<Pending>,
    started_at: Option<DateTime<Utc>>,
}

impl SessionState {
    /// A session that has not been started yet.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create and start a session in one step.
    ///
    /// # Errors
    ///
    /// Returns `SessionInitError::NoQuestions` for an empty sequence.
    pub fn started(
        sequence: FlatQuestionSequence,
        started_at: DateTime<Utc>,
    ) -> Result<Self, SessionInitError> {
        let mut state = Self::new();
        state.start(sequence, started_at)?;
        Ok(state)
    }

    /// Reset the session onto `sequence` and put it in progress at the first question.
    ///
    /// # Errors
    ///
    /// Returns `SessionInitError::NoQuestions` for an empty sequence; the
    /// session is left unchanged in that case.
    pub fn start(
        &mut self,
        sequence: FlatQuestionSequence,
        started_at: DateTime<Utc>,
    ) -> Result<(), SessionInitError> {
        if sequence.is_empty() {
            return Err(SessionInitError::NoQuestions);
        }
        *self = Self {
            sequence,
            phase: Phase::InProgress,
            current: 0,
            answers: HashMap::new(),
            confidences: HashMap::new(),
            pending: None,
            started_at: Some(started_at),
        };
        Ok(())
    }

    /// Record `option` for the current question and wait for a confidence.
    ///
    /// Picking again before confirming just replaces the pending selection.
    /// Picking a different option on an already confirmed question drops
    /// its confidence so it is captured again.
    pub fn select_answer(&mut self, question_id: QuestionId, option: OptionIndex) -> Transition {
        if !matches!(
            self.phase,
            Phase::InProgress | Phase::AwaitingConfidence | Phase::ReadyToSubmit
        ) {
            return Transition::Ignored(Rejection::WrongPhase(self.phase));
        }
        let Some(question) = self.current_question() else {
            return Transition::Ignored(Rejection::WrongPhase(self.phase));
        };
        if question.id() != question_id {
            return Transition::Ignored(Rejection::NotCurrentQuestion);
        }
        if !question.has_option(option) {
            return Transition::Ignored(Rejection::OptionOutOfRange);
        }

        match self.pending {
            Some(pending) if pending.question_id == question_id => {}
            Some(_) => return Transition::Ignored(Rejection::NotCurrentQuestion),
            None => {
                let previous = self
                    .answers
                    .get(&question_id)
                    .copied()
                    .zip(self.confidences.get(&question_id).copied());
                self.confidences.remove(&question_id);
                self.pending = Some(Pending {
                    question_id,
                    previous,
                });
            }
        }

        self.answers.insert(question_id, option);
        self.phase = Phase::AwaitingConfidence;
        Transition::Applied
    }

    /// Record the learner's confidence for the pending selection.
    pub fn confirm_confidence(&mut self, question_id: QuestionId, is_sure: bool) -> Transition {
        if self.phase != Phase::AwaitingConfidence
            || self.pending_question_id() != Some(question_id)
        {
            return Transition::Ignored(Rejection::StaleConfirmation);
        }

        self.confidences.insert(question_id, is_sure);
        self.pending = None;
        self.phase = self.settled_phase();
        Transition::Applied
    }

    /// Undo the pending selection, restoring any confirmed answer it replaced.
    pub fn revert_pending(&mut self, question_id: QuestionId) -> Transition {
        if self.phase != Phase::AwaitingConfidence {
            return Transition::Ignored(Rejection::WrongPhase(self.phase));
        }
        let Some(pending) = self.pending.filter(|p| p.question_id == question_id) else {
            return Transition::Ignored(Rejection::StaleConfirmation);
        };

        match pending.previous {
            Some((option, is_sure)) => {
                self.answers.insert(question_id, option);
                self.confidences.insert(question_id, is_sure);
            }
            None => {
                self.answers.remove(&question_id);
            }
        }
        self.pending = None;
        self.phase = self.settled_phase();
        Transition::Applied
    }

    /// Move to the next question; requires the current one to be answered.
    pub fn advance(&mut self) -> Transition {
        if let Some(rejection) = self.navigation_blocker() {
            return Transition::Ignored(rejection);
        }
        let Some(question) = self.current_question() else {
            return Transition::Ignored(Rejection::AtBoundary);
        };
        if !self.answers.contains_key(&question.id()) {
            return Transition::Ignored(Rejection::Unanswered);
        }
        if self.current + 1 >= self.sequence.len() {
            return Transition::Ignored(Rejection::AtBoundary);
        }
        self.current += 1;
        Transition::Applied
    }

    /// Move to the previous question.
    pub fn retreat(&mut self) -> Transition {
        if let Some(rejection) = self.navigation_blocker() {
            return Transition::Ignored(rejection);
        }
        if self.current == 0 {
            return Transition::Ignored(Rejection::AtBoundary);
        }
        self.current -= 1;
        Transition::Applied
    }

    /// Answers in question order, only once every question is settled.
    #[must_use]
    pub fn snapshot_for_submission(&self) -> Option<SubmissionSnapshot> {
        if self.phase != Phase::ReadyToSubmit {
            return None;
        }
        let entries = self
            .sequence
            .iter()
            .map(|question| {
                let id = question.id();
                Some(SnapshotEntry {
                    question_id: id,
                    option: *self.answers.get(&id)?,
                    is_sure: *self.confidences.get(&id)?,
                })
            })
            .collect::<Option<Vec<_>>>()?;
        Some(SubmissionSnapshot { entries })
    }

    /// Close the session after the scorer accepted it.
    pub fn mark_submitted(&mut self) -> Transition {
        if self.phase != Phase::ReadyToSubmit {
            return Transition::Ignored(Rejection::WrongPhase(self.phase));
        }
        self.phase = Phase::Submitted;
        Transition::Applied
    }

    fn navigation_blocker(&self) -> Option<Rejection> {
        match self.phase {
            Phase::InProgress | Phase::ReadyToSubmit => None,
            Phase::AwaitingConfidence => Some(Rejection::AwaitingConfidence),
            phase @ (Phase::NotStarted | Phase::Submitted) => Some(Rejection::WrongPhase(phase)),
        }
    }

    fn settled_phase(&self) -> Phase {
        let complete = self.sequence.iter().all(|q| {
            self.answers.contains_key(&q.id()) && self.confidences.contains_key(&q.id())
        });
        if complete {
            Phase::ReadyToSubmit
        } else {
            Phase::InProgress
        }
    }

    // ─── Selectors ────────────────────────────────────────────────────────────

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }

    #[must_use]
    pub fn sequence(&self) -> &FlatQuestionSequence {
        &self.sequence
    }

    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        if self.phase == Phase::NotStarted {
            return None;
        }
        self.sequence.get(self.current)
    }

    #[must_use]
    pub fn current_category(&self) -> Option<&CategoryInfo> {
        if self.phase == Phase::NotStarted {
            return None;
        }
        self.sequence.category_at(self.current)
    }

    #[must_use]
    pub fn answer_for(&self, id: QuestionId) -> Option<OptionIndex> {
        self.answers.get(&id).copied()
    }

    #[must_use]
    pub fn confidence_for(&self, id: QuestionId) -> Option<bool> {
        self.confidences.get(&id).copied()
    }

    #[must_use]
    pub fn pending_question_id(&self) -> Option<QuestionId> {
        self.pending.map(|p| p.question_id)
    }

    #[must_use]
    pub fn is_current_answered(&self) -> bool {
        self.current_question()
            .is_some_and(|q| self.answers.contains_key(&q.id()))
    }

    #[must_use]
    pub fn progress(&self) -> Progress {
        Progress {
            position: self.current + 1,
            total: self.sequence.len(),
            answered: self.confidences.len(),
        }
    }

    #[must_use]
    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.started_at
    }

    /// Time spent since the session started, never negative.
    #[must_use]
    pub fn elapsed(&self, now: DateTime<Utc>) -> Duration {
        self.started_at
            .map_or_else(Duration::zero, |start| (now - start).max(Duration::zero()))
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
