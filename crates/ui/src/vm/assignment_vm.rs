use quiz_core::model::AssignmentSummary;
use services::AssignmentCatalogue;

use super::time_fmt::format_date;

#[derive(Clone, Debug, PartialEq)]
pub struct AssignmentCardVm {
    pub id: u64,
    pub name: String,
    pub created_label: String,
    pub completed_label: Option<String>,
    pub mastery_label: Option<String>,
    pub mastered_label: Option<String>,
}

impl From<&AssignmentSummary> for AssignmentCardVm {
    fn from(summary: &AssignmentSummary) -> Self {
        Self {
            id: summary.id.value(),
            name: summary.name.clone(),
            created_label: format!("Created: {}", format_date(summary.created_at)),
            completed_label: summary
                .completed_at
                .map(|at| format!("Completed: {}", format_date(at))),
            mastery_label: summary
                .stats
                .map(|s| format!("Mastery: {}%", s.mastery_percentage)),
            mastered_label: summary.stats.map(|s| {
                format!(
                    "{}/{} questions mastered",
                    s.mastered_questions, s.total_questions
                )
            }),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct CatalogueVm {
    pub active: Vec<AssignmentCardVm>,
    pub completed: Vec<AssignmentCardVm>,
}

#[must_use]
pub fn map_catalogue(catalogue: &AssignmentCatalogue) -> CatalogueVm {
    CatalogueVm {
        active: catalogue.active.iter().map(AssignmentCardVm::from).collect(),
        completed: catalogue.completed.iter().map(AssignmentCardVm::from).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::model::{AssignmentId, MasteryStats};
    use quiz_core::time::fixed_now;

    #[test]
    fn completed_card_shows_stats_as_given() {
        let summary = AssignmentSummary {
            id: AssignmentId::new(3),
            name: "Week 3".into(),
            created_at: fixed_now(),
            is_completed: true,
            completed_at: Some(fixed_now()),
            stats: Some(MasteryStats {
                mastery_percentage: 66.7,
                mastered_questions: 2,
                total_questions: 3,
            }),
        };
        let card = AssignmentCardVm::from(&summary);
        assert_eq!(card.created_label, "Created: 2023-11-14");
        assert_eq!(card.completed_label.as_deref(), Some("Completed: 2023-11-14"));
        assert_eq!(card.mastery_label.as_deref(), Some("Mastery: 66.7%"));
        assert_eq!(card.mastered_label.as_deref(), Some("2/3 questions mastered"));
    }
}
