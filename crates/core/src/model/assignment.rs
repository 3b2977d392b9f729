use chrono::{DateTime, Utc};

use crate::model::ids::AssignmentId;

/// Mastery figures computed by the remote service; displayed as-is.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MasteryStats {
    pub mastery_percentage: f64,
    pub mastered_questions: u32,
    pub total_questions: u32,
}

/// Catalogue entry for an assignment visible to a learner.
#[derive(Debug, Clone, PartialEq)]
pub struct AssignmentSummary {
    pub id: AssignmentId,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub is_completed: bool,
    pub completed_at: Option<DateTime<Utc>>,
    pub stats: Option<MasteryStats>,
}
