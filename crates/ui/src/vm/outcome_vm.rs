use url::Url;

use quiz_core::{OutcomeIcon, classify};
use services::{AttemptReview, ReviewEntry};

use super::assessment_vm::resolve_file_url;
use super::time_fmt::format_datetime;

/// One scored response as rendered on the results page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutcomeCardVm {
    pub number: usize,
    pub question_text: String,
    pub user_answer: String,
    pub correct_answer: String,
    pub label: String,
    pub headline: String,
    pub body: &'static str,
    pub tone: &'static str,
    pub icon: OutcomeIcon,
    pub short_feedback: Option<String>,
    pub long_feedback: Option<String>,
    pub document_url: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResultsVm {
    pub total: usize,
    pub correct: u32,
    pub completed_label: Option<String>,
    pub cards: Vec<OutcomeCardVm>,
}

fn map_entry(number: usize, entry: &ReviewEntry, file_base: Option<&Url>) -> OutcomeCardVm {
    let response = &entry.response;
    let feedback = classify(&response.status);
    OutcomeCardVm {
        number,
        question_text: entry.question_text.clone(),
        user_answer: response.user_answer.clone(),
        correct_answer: response.correct_answer.clone(),
        label: feedback.label.into_owned(),
        headline: feedback.headline.into_owned(),
        body: feedback.body,
        tone: feedback.emphasis.as_str(),
        icon: feedback.icon,
        short_feedback: response.feedback.short.clone(),
        long_feedback: response.feedback.long_text.clone(),
        document_url: response
            .feedback
            .long_file_path
            .as_deref()
            .map(|path| resolve_file_url(path, file_base)),
    }
}

#[must_use]
pub fn map_results(review: &AttemptReview, file_base: Option<&Url>) -> ResultsVm {
    ResultsVm {
        total: review.summary.total,
        correct: review.summary.correct,
        completed_label: review
            .summary
            .completed_at
            .map(|at| format!("Completed on: {}", format_datetime(at))),
        cards: review
            .entries
            .iter()
            .enumerate()
            .map(|(i, entry)| map_entry(i + 1, entry, file_base))
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::model::{
        AssignmentResults, OutcomeStatus, QuestionId, ResponseFeedback, ScoredResponse,
    };
    use quiz_core::time::fixed_now;

    fn response(id: u64, status: &str, feedback: ResponseFeedback) -> ScoredResponse {
        ScoredResponse {
            question_id: QuestionId::new(id),
            question_text: Some(format!("Question {id}")),
            user_answer: "mine".into(),
            correct_answer: "theirs".into(),
            status: OutcomeStatus::parse(status),
            feedback,
        }
    }

    #[test]
    fn cards_carry_fixed_copy_and_fallback() {
        let results = AssignmentResults {
            responses: vec![
                response(
                    1,
                    "not_sure_incorrect",
                    ResponseFeedback {
                        short: None,
                        long_text: Some("Longer notes".into()),
                        long_file_path: Some("/docs/q1.pdf".into()),
                    },
                ),
                response(2, "needs-review", ResponseFeedback::default()),
            ],
            completed_at: Some(fixed_now()),
        };
        let review = AttemptReview::build(&results, None);
        let base = Url::parse("http://files.test/").unwrap();
        let vm = map_results(&review, Some(&base));

        assert_eq!(vm.total, 2);
        assert_eq!(vm.correct, 0);
        assert_eq!(vm.completed_label.as_deref(), Some("Completed on: 2023-11-14 22:13 UTC"));

        let first = &vm.cards[0];
        assert_eq!(first.number, 1);
        assert_eq!(first.label, "Not Sure & Incorrect");
        assert_eq!(first.headline, "Incorrect answer — and unsure about it.");
        assert_eq!(first.tone, "warning");
        assert_eq!(first.icon, OutcomeIcon::Cross);
        assert_eq!(first.document_url.as_deref(), Some("http://files.test/docs/q1.pdf"));

        let second = &vm.cards[1];
        assert_eq!(second.headline, "Needs review");
        assert_eq!(second.tone, "neutral");
        assert_eq!(second.icon, OutcomeIcon::None);
        assert!(second.body.is_empty());
    }
}
