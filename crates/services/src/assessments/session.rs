use chrono::{DateTime, Duration, Utc};

use quiz_core::model::{
    AssignmentId, AssignmentResults, AttemptId, OptionIndex, Question, QuestionId, UserId,
};
use quiz_core::{
    CategoryInfo, ConfidenceGate, ConfidencePrompt, DismissOutcome, DismissPolicy, Navigation,
    Phase, Progress, Rejection, SessionState, Transition, build_payload,
};

use super::submission::{SubmissionGate, SubmissionTicket, SubmittedAttempt};
use crate::error::AssessmentError;

/// One learner's attempt at one assignment.
///
/// Wraps the session store, the confidence gate and the submission latch so
/// callers cannot bypass the gate or submit twice.
#[derive(Debug, Clone)]
pub struct AssessmentSession {
    user: UserId,
    assignment: AssignmentId,
    attempt: AttemptId,
    state: SessionState,
    gate: ConfidenceGate,
    submission: SubmissionGate,
    results: Option<AssignmentResults>,
}

impl AssessmentSession {
    pub(crate) fn new(
        user: UserId,
        assignment: AssignmentId,
        state: SessionState,
        policy: DismissPolicy,
    ) -> Self {
        Self {
            user,
            assignment,
            attempt: AttemptId::generate(),
            state,
            gate: ConfidenceGate::new(policy),
            submission: SubmissionGate::new(),
            results: None,
        }
    }

    #[must_use]
    pub fn user(&self) -> UserId {
        self.user
    }

    #[must_use]
    pub fn assignment(&self) -> AssignmentId {
        self.assignment
    }

    #[must_use]
    pub fn attempt(&self) -> AttemptId {
        self.attempt
    }

    #[must_use]
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.state.phase()
    }

    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        self.state.current_question()
    }

    #[must_use]
    pub fn current_category(&self) -> Option<&CategoryInfo> {
        self.state.current_category()
    }

    #[must_use]
    pub fn progress(&self) -> Progress {
        self.state.progress()
    }

    /// Navigation availability; everything is off while a submission runs.
    #[must_use]
    pub fn navigation(&self) -> Navigation {
        if self.submission.is_in_flight() {
            return Navigation::default();
        }
        Navigation::from_session(&self.state)
    }

    #[must_use]
    pub fn prompt(&self) -> Option<&ConfidencePrompt> {
        self.gate.prompt()
    }

    #[must_use]
    pub fn elapsed(&self, now: DateTime<Utc>) -> Duration {
        self.state.elapsed(now)
    }

    #[must_use]
    pub fn is_submitting(&self) -> bool {
        self.submission.is_in_flight()
    }

    #[must_use]
    pub fn is_submitted(&self) -> bool {
        self.state.phase() == Phase::Submitted
    }

    /// Results recorded after a successful submission.
    #[must_use]
    pub fn results(&self) -> Option<&AssignmentResults> {
        self.results.as_ref()
    }

    fn frozen(&self) -> Option<Transition> {
        if self.submission.is_in_flight() || self.submission.is_submitted() {
            Some(Transition::Ignored(Rejection::WrongPhase(self.state.phase())))
        } else {
            None
        }
    }

    fn log_ignored(&self, action: &'static str, transition: Transition) -> Transition {
        if let Some(reason) = transition.rejection() {
            tracing::debug!(
                attempt_id = %self.attempt,
                action,
                ?reason,
                "transition ignored"
            );
        }
        transition
    }

    /// Pick an option on the current question; opens the confidence prompt.
    pub fn select(&mut self, question_id: QuestionId, option: OptionIndex) -> Transition {
        let transition = match self.frozen() {
            Some(ignored) => ignored,
            None => self.gate.select(&mut self.state, question_id, option),
        };
        self.log_ignored("select", transition)
    }

    /// Answer the open confidence prompt.
    pub fn choose(&mut self, is_sure: bool) -> Transition {
        let transition = self.gate.choose(&mut self.state, is_sure);
        self.log_ignored("choose", transition)
    }

    /// Answer the prompt on behalf of a specific question.
    pub fn confirm(&mut self, question_id: QuestionId, is_sure: bool) -> Transition {
        let transition = self.gate.confirm(&mut self.state, question_id, is_sure);
        self.log_ignored("confirm", transition)
    }

    pub fn dismiss_prompt(&mut self) -> DismissOutcome {
        self.gate.dismiss(&mut self.state)
    }

    pub fn advance(&mut self) -> Transition {
        let transition = match self.frozen() {
            Some(ignored) => ignored,
            None => self.state.advance(),
        };
        self.log_ignored("advance", transition)
    }

    pub fn retreat(&mut self) -> Transition {
        let transition = match self.frozen() {
            Some(ignored) => ignored,
            None => self.state.retreat(),
        };
        self.log_ignored("retreat", transition)
    }

    /// Resolve the answers and take the submission permit.
    ///
    /// # Errors
    ///
    /// Returns `AlreadySubmitted` or `SubmissionInFlight` from the latch,
    /// `NotReady` unless every question is settled, and `Resolution` if an
    /// answer no longer maps onto its question's options.
    pub fn begin_submission(&self) -> Result<SubmissionTicket, AssessmentError> {
        let permit = match self.submission.try_acquire() {
            Ok(permit) => permit,
            Err(err) => {
                tracing::warn!(attempt_id = %self.attempt, error = %err, "submission refused");
                return Err(err);
            }
        };
        let snapshot = self
            .state
            .snapshot_for_submission()
            .ok_or(AssessmentError::NotReady)?;
        let payload = build_payload(&snapshot, self.state.sequence())?;
        Ok(SubmissionTicket {
            user: self.user,
            assignment: self.assignment,
            attempt: self.attempt,
            payload,
            permit,
        })
    }

    /// Close the session with the scorer's results.
    ///
    /// # Errors
    ///
    /// Returns `MismatchedResults` if the scorer returned a different number
    /// of responses than were submitted. The session is closed either way.
    pub fn record_submission(
        &mut self,
        submitted: SubmittedAttempt,
    ) -> Result<&AssignmentResults, AssessmentError> {
        self.state.mark_submitted();
        let expected = submitted.submitted_answers;
        let received = submitted.results.total();
        let results = self.results.insert(submitted.results);
        if expected != received {
            tracing::warn!(attempt_id = %self.attempt, expected, received, "scored results do not match submission");
            return Err(AssessmentError::MismatchedResults { expected, received });
        }
        Ok(results)
    }
}
