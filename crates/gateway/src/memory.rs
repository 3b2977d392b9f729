use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use quiz_core::SubmissionPayload;
use quiz_core::model::{
    AssignmentId, AssignmentResults, AssignmentSummary, CategoryGroup, MasteryStats, Outcome,
    QuestionId, ResponseFeedback, ScoredResponse, UserId,
};

use crate::repository::{AssignmentGateway, GatewayError};

/// An assignment as the fake service stores it, answer key included.
#[derive(Debug, Clone)]
pub struct StoredAssignment {
    pub id: AssignmentId,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub groups: Vec<CategoryGroup>,
    pub answer_key: HashMap<QuestionId, String>,
    pub feedback: HashMap<QuestionId, ResponseFeedback>,
    /// Questions the scorer leaves out of its results.
    pub unscored: HashSet<QuestionId>,
}

impl StoredAssignment {
    #[must_use]
    pub fn new(
        id: AssignmentId,
        name: impl Into<String>,
        created_at: DateTime<Utc>,
        groups: Vec<CategoryGroup>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            created_at,
            groups,
            answer_key: HashMap::new(),
            feedback: HashMap::new(),
            unscored: HashSet::new(),
        }
    }

    #[must_use]
    pub fn with_answer(mut self, question: QuestionId, correct: impl Into<String>) -> Self {
        self.answer_key.insert(question, correct.into());
        self
    }

    #[must_use]
    pub fn with_feedback(mut self, question: QuestionId, feedback: ResponseFeedback) -> Self {
        self.feedback.insert(question, feedback);
        self
    }

    #[must_use]
    pub fn without_score_for(mut self, question: QuestionId) -> Self {
        self.unscored.insert(question);
        self
    }

    fn question_text(&self, id: QuestionId) -> Option<String> {
        self.groups
            .iter()
            .flat_map(CategoryGroup::questions)
            .find(|q| q.id() == id)
            .map(|q| q.text().to_string())
    }

    fn score(&self, payload: &SubmissionPayload, completed_at: DateTime<Utc>) -> AssignmentResults {
        let responses = payload
            .iter()
            .filter(|entry| !self.unscored.contains(&entry.question_id))
            .map(|entry| {
                let correct_answer = self
                    .answer_key
                    .get(&entry.question_id)
                    .cloned()
                    .unwrap_or_default();
                let correct = correct_answer == entry.answer_text.as_str();
                ScoredResponse {
                    question_id: entry.question_id,
                    question_text: self.question_text(entry.question_id),
                    user_answer: entry.answer_text.to_string(),
                    correct_answer,
                    status: Outcome::from_parts(correct, entry.is_sure).into(),
                    feedback: self
                        .feedback
                        .get(&entry.question_id)
                        .cloned()
                        .unwrap_or_default(),
                }
            })
            .collect();
        AssignmentResults {
            responses,
            completed_at: Some(completed_at),
        }
    }
}

#[derive(Default)]
struct State {
    assignments: Vec<StoredAssignment>,
    results: HashMap<(UserId, AssignmentId), AssignmentResults>,
    submissions: usize,
    failures_to_inject: usize,
}

/// In-memory stand-in for the assignment service, for tests and demos.
///
/// Scores submissions by exact answer-text match against the stored key.
#[derive(Clone)]
pub struct InMemoryGateway {
    state: Arc<Mutex<State>>,
    now: DateTime<Utc>,
}

impl InMemoryGateway {
    /// `now` stamps every scored attempt.
    #[must_use]
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            state: Arc::new(Mutex::new(State::default())),
            now,
        }
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, State>, GatewayError> {
        self.state
            .lock()
            .map_err(|e| GatewayError::Unavailable(e.to_string()))
    }

    /// # Errors
    ///
    /// Returns `GatewayError::Unavailable` if the state lock is poisoned.
    pub fn insert_assignment(&self, assignment: StoredAssignment) -> Result<(), GatewayError> {
        let mut guard = self.lock()?;
        guard.assignments.retain(|a| a.id != assignment.id);
        guard.assignments.push(assignment);
        Ok(())
    }

    /// Make the next `count` submissions fail with a transient error.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError::Unavailable` if the state lock is poisoned.
    pub fn fail_next_submissions(&self, count: usize) -> Result<(), GatewayError> {
        self.lock()?.failures_to_inject = count;
        Ok(())
    }

    /// Number of submit calls received, failed ones included.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError::Unavailable` if the state lock is poisoned.
    pub fn submission_count(&self) -> Result<usize, GatewayError> {
        Ok(self.lock()?.submissions)
    }
}

fn mastery(results: &AssignmentResults) -> MasteryStats {
    let tally = results.tally();
    let total_questions = u32::try_from(results.total()).unwrap_or(u32::MAX);
    let mastered_questions = tally.sure_correct;
    let mastery_percentage = if total_questions == 0 {
        0.0
    } else {
        (f64::from(mastered_questions) / f64::from(total_questions) * 100.0).round()
    };
    MasteryStats {
        mastery_percentage,
        mastered_questions,
        total_questions,
    }
}

#[async_trait]
impl AssignmentGateway for InMemoryGateway {
    async fn list_assignments(
        &self,
        user: UserId,
    ) -> Result<Vec<AssignmentSummary>, GatewayError> {
        let guard = self.lock()?;
        Ok(guard
            .assignments
            .iter()
            .map(|assignment| {
                let results = guard.results.get(&(user, assignment.id));
                AssignmentSummary {
                    id: assignment.id,
                    name: assignment.name.clone(),
                    created_at: assignment.created_at,
                    is_completed: results.is_some(),
                    completed_at: results.and_then(|r| r.completed_at),
                    stats: results.map(mastery),
                }
            })
            .collect())
    }

    async fn fetch_assignment_questions(
        &self,
        _user: UserId,
        assignment: AssignmentId,
    ) -> Result<Vec<CategoryGroup>, GatewayError> {
        let guard = self.lock()?;
        guard
            .assignments
            .iter()
            .find(|a| a.id == assignment)
            .map(|a| a.groups.clone())
            .ok_or(GatewayError::NotFound)
    }

    async fn submit_assignment(
        &self,
        user: UserId,
        assignment: AssignmentId,
        payload: &SubmissionPayload,
    ) -> Result<AssignmentResults, GatewayError> {
        let mut guard = self.lock()?;
        guard.submissions += 1;
        if guard.failures_to_inject > 0 {
            guard.failures_to_inject -= 1;
            return Err(GatewayError::Unavailable("injected failure".into()));
        }
        if guard.results.contains_key(&(user, assignment)) {
            return Err(GatewayError::HttpStatus {
                status: 409,
                message: Some("assignment already completed".into()),
            });
        }
        let stored = guard
            .assignments
            .iter()
            .find(|a| a.id == assignment)
            .ok_or(GatewayError::NotFound)?;
        let results = stored.score(payload, self.now);
        guard.results.insert((user, assignment), results.clone());
        Ok(results)
    }

    async fn fetch_assignment_results(
        &self,
        user: UserId,
        assignment: AssignmentId,
    ) -> Result<AssignmentResults, GatewayError> {
        let guard = self.lock()?;
        guard
            .results
            .get(&(user, assignment))
            .cloned()
            .ok_or(GatewayError::NotFound)
    }
}
