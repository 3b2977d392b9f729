use std::sync::Arc;

use tracing::instrument;

use gateway::AssignmentGateway;
use quiz_core::model::{AssignmentId, AssignmentResults, UserId};
use quiz_core::{DismissPolicy, SessionState, flatten};

use super::review::AttemptReview;
use super::session::AssessmentSession;
use super::submission::{SubmissionTicket, SubmittedAttempt};
use crate::Clock;
use crate::catalogue::AssignmentCatalogue;
use crate::error::AssessmentError;

/// Orchestrates starting, submitting and reviewing assessments.
#[derive(Clone)]
pub struct AssessmentService {
    clock: Clock,
    gateway: Arc<dyn AssignmentGateway>,
    dismiss_policy: DismissPolicy,
}

impl AssessmentService {
    #[must_use]
    pub fn new(clock: Clock, gateway: Arc<dyn AssignmentGateway>) -> Self {
        Self {
            clock,
            gateway,
            dismiss_policy: DismissPolicy::default(),
        }
    }

    #[must_use]
    pub fn with_dismiss_policy(mut self, policy: DismissPolicy) -> Self {
        self.dismiss_policy = policy;
        self
    }

    #[must_use]
    pub fn clock(&self) -> Clock {
        self.clock
    }

    /// Active and completed assignments for `user`.
    ///
    /// # Errors
    ///
    /// Returns `AssessmentError::Gateway` if the catalogue cannot be fetched.
    #[instrument(name = "assessment::catalogue", skip(self), fields(user_id = %user))]
    pub async fn catalogue(&self, user: UserId) -> Result<AssignmentCatalogue, AssessmentError> {
        let assignments = self.gateway.list_assignments(user).await?;
        Ok(AssignmentCatalogue::split(assignments))
    }

    /// Fetch an assignment's questions and start a session on them.
    ///
    /// # Errors
    ///
    /// Returns `AssessmentError::Gateway` if the questions cannot be fetched and
    /// `AssessmentError::SessionInit` if the assignment has no questions.
    #[instrument(
        name = "assessment::start",
        skip(self),
        fields(user_id = %user, assignment_id = %assignment)
    )]
    pub async fn start(
        &self,
        user: UserId,
        assignment: AssignmentId,
    ) -> Result<AssessmentSession, AssessmentError> {
        let groups = self.gateway.fetch_assignment_questions(user, assignment).await?;
        let sequence = flatten(&groups);
        let state = SessionState::started(sequence, self.clock.now())?;
        let session = AssessmentSession::new(user, assignment, state, self.dismiss_policy);
        tracing::info!(
            attempt_id = %session.attempt(),
            questions = session.progress().total,
            categories = session.state().sequence().categories().len(),
            "assessment started"
        );
        Ok(session)
    }

    /// Send a ticket's payload: the only network call an attempt makes.
    ///
    /// On failure the ticket's permit is released and the session stays ready
    /// to submit.
    ///
    /// # Errors
    ///
    /// Returns `AssessmentError::SubmissionNetwork` if the scorer cannot be
    /// reached and `AssessmentError::SubmissionRejected` if it refuses the
    /// answers.
    #[instrument(
        name = "assessment::submit",
        skip(self, ticket),
        fields(
            user_id = %ticket.user,
            assignment_id = %ticket.assignment,
            attempt_id = %ticket.attempt
        )
    )]
    pub async fn deliver(
        &self,
        ticket: SubmissionTicket,
    ) -> Result<SubmittedAttempt, AssessmentError> {
        let SubmissionTicket {
            user,
            assignment,
            attempt,
            payload,
            permit,
        } = ticket;
        match self
            .gateway
            .submit_assignment(user, assignment, &payload)
            .await
        {
            Ok(mut results) => {
                permit.complete();
                let submitted_at = self.clock.now();
                results.completed_at.get_or_insert(submitted_at);
                tracing::info!(
                    answers = payload.len(),
                    correct = results.correct_count(),
                    "assessment submitted"
                );
                Ok(SubmittedAttempt {
                    attempt,
                    submitted_answers: payload.len(),
                    results,
                    submitted_at,
                })
            }
            Err(err) => {
                let transient = err.is_transient();
                tracing::error!(error = %err, transient, "submission failed");
                if transient {
                    Err(AssessmentError::SubmissionNetwork(err))
                } else {
                    Err(AssessmentError::SubmissionRejected(err))
                }
            }
        }
    }

    /// Submit a settled session and record its results.
    ///
    /// # Errors
    ///
    /// Propagates the errors of [`AssessmentSession::begin_submission`],
    /// [`AssessmentService::deliver`] and
    /// [`AssessmentSession::record_submission`].
    pub async fn submit(
        &self,
        session: &mut AssessmentSession,
    ) -> Result<AssignmentResults, AssessmentError> {
        let ticket = session.begin_submission()?;
        let submitted = self.deliver(ticket).await?;
        session.record_submission(submitted).cloned()
    }

    /// Load a previously submitted attempt for review.
    ///
    /// Question texts missing from the results are filled in from the
    /// assignment's questions when those can still be fetched.
    ///
    /// # Errors
    ///
    /// Returns `AssessmentError::Gateway` if the results cannot be fetched.
    #[instrument(
        name = "assessment::results",
        skip(self),
        fields(user_id = %user, assignment_id = %assignment)
    )]
    pub async fn results(
        &self,
        user: UserId,
        assignment: AssignmentId,
    ) -> Result<AttemptReview, AssessmentError> {
        let results = self.gateway.fetch_assignment_results(user, assignment).await?;
        let sequence = if results.responses.iter().any(|r| r.question_text.is_none()) {
            match self.gateway.fetch_assignment_questions(user, assignment).await {
                Ok(groups) => Some(flatten(&groups)),
                Err(err) => {
                    tracing::debug!(error = %err, "questions unavailable for review");
                    None
                }
            }
        } else {
            None
        };
        Ok(AttemptReview::build(&results, sequence.as_ref()))
    }

    /// Review of the results a session recorded on submission.
    #[must_use]
    pub fn review_session(&self, session: &AssessmentSession) -> Option<AttemptReview> {
        session
            .results()
            .map(|results| AttemptReview::build(results, Some(session.state().sequence())))
    }
}
