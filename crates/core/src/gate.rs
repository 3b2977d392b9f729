//! Blocking confidence prompt shown after every answer selection.

use crate::model::{OptionIndex, OptionText, QuestionId};
use crate::session::{Rejection, SessionState, Transition};

/// What closing the prompt without a choice does.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DismissPolicy {
    /// Keep the prompt open; the learner has to choose.
    #[default]
    Reopen,
    /// Drop the selection that opened the prompt.
    RevertSelection,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DismissOutcome {
    Reopened,
    Reverted,
    NotOpen,
}

/// Content of an open prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfidencePrompt {
    pub question_id: QuestionId,
    pub answer_text: OptionText,
}

impl ConfidencePrompt {
    pub const QUESTION: &'static str = "How confident are you in your answer?";
    pub const SURE_LABEL: &'static str = "Sure";
    pub const NOT_SURE_LABEL: &'static str = "Not Sure";

    #[must_use]
    pub fn selection_line(&self) -> String {
        format!("You selected: {}", self.answer_text)
    }
}

/// Modal gate bound to at most one pending question.
///
/// All answer selections go through [`ConfidenceGate::select`] so the prompt
/// and the session's pending question never drift apart.
#[derive(Debug, Clone, Default)]
pub struct ConfidenceGate {
    prompt: Option<ConfidencePrompt>,
    policy: DismissPolicy,
}

impl ConfidenceGate {
    #[must_use]
    pub fn new(policy: DismissPolicy) -> Self {
        Self {
            prompt: None,
            policy,
        }
    }

    #[must_use]
    pub fn policy(&self) -> DismissPolicy {
        self.policy
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.prompt.is_some()
    }

    #[must_use]
    pub fn prompt(&self) -> Option<&ConfidencePrompt> {
        self.prompt.as_ref()
    }

    /// Select an option on the current question and open the prompt for it.
    pub fn select(
        &mut self,
        session: &mut SessionState,
        question_id: QuestionId,
        option: OptionIndex,
    ) -> Transition {
        let transition = session.select_answer(question_id, option);
        if transition.is_applied() {
            self.prompt = session
                .current_question()
                .and_then(|q| q.resolve(option))
                .map(|answer_text| ConfidencePrompt {
                    question_id,
                    answer_text,
                });
        }
        transition
    }

    /// Answer the open prompt.
    pub fn choose(&mut self, session: &mut SessionState, is_sure: bool) -> Transition {
        let Some(question_id) = self.prompt.as_ref().map(|p| p.question_id) else {
            return Transition::Ignored(Rejection::StaleConfirmation);
        };
        self.confirm(session, question_id, is_sure)
    }

    /// Answer the prompt for a specific question, as delivered by a UI callback.
    ///
    /// A callback for any question other than the one the prompt is bound to
    /// is stale and ignored.
    pub fn confirm(
        &mut self,
        session: &mut SessionState,
        question_id: QuestionId,
        is_sure: bool,
    ) -> Transition {
        if self.prompt.as_ref().map(|p| p.question_id) != Some(question_id) {
            return Transition::Ignored(Rejection::StaleConfirmation);
        }
        let transition = session.confirm_confidence(question_id, is_sure);
        if transition.is_applied() {
            self.prompt = None;
        }
        transition
    }

    /// Close the prompt without a choice, according to the gate's policy.
    pub fn dismiss(&mut self, session: &mut SessionState) -> DismissOutcome {
        let Some(prompt) = self.prompt.as_ref() else {
            return DismissOutcome::NotOpen;
        };
        match self.policy {
            DismissPolicy::Reopen => DismissOutcome::Reopened,
            DismissPolicy::RevertSelection => {
                let question_id = prompt.question_id;
                session.revert_pending(question_id);
                self.prompt = None;
                DismissOutcome::Reverted
            }
        }
    }
}
