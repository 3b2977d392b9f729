use quiz_core::model::AssignmentSummary;

/// A learner's assignments split by completion, each list in service order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AssignmentCatalogue {
    pub active: Vec<AssignmentSummary>,
    pub completed: Vec<AssignmentSummary>,
}

impl AssignmentCatalogue {
    #[must_use]
    pub fn split(assignments: Vec<AssignmentSummary>) -> Self {
        let (completed, active) = assignments.into_iter().partition(|a| a.is_completed);
        Self { active, completed }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.active.is_empty() && self.completed.is_empty()
    }
}
