use chrono::{DateTime, Utc};
use url::Url;

use quiz_core::model::{MediaKind, OptionIndex, QuestionId};
use quiz_core::time::format_elapsed;
use quiz_core::{ConfidencePrompt, Navigation};
use services::AssessmentSession;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionIntent {
    Select {
        question_id: QuestionId,
        option: OptionIndex,
    },
    Confidence(bool),
    DismissPrompt,
    Next,
    Previous,
    Submit,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OptionVm {
    pub index: OptionIndex,
    pub label: String,
    pub selected: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MediaVm {
    Image { src: String },
    Video { src: String, mime: String },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuestionVm {
    pub id: QuestionId,
    pub category_label: String,
    pub text: String,
    pub options: Vec<OptionVm>,
    pub media: Option<MediaVm>,
    pub document_url: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PromptVm {
    pub question_id: QuestionId,
    pub selection_line: String,
    pub question: &'static str,
    pub sure_label: &'static str,
    pub not_sure_label: &'static str,
}

impl From<&ConfidencePrompt> for PromptVm {
    fn from(prompt: &ConfidencePrompt) -> Self {
        Self {
            question_id: prompt.question_id,
            selection_line: prompt.selection_line(),
            question: ConfidencePrompt::QUESTION,
            sure_label: ConfidencePrompt::SURE_LABEL,
            not_sure_label: ConfidencePrompt::NOT_SURE_LABEL,
        }
    }
}

/// Footer controls. On the last question submit takes the place of next.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NavVm {
    pub can_go_previous: bool,
    pub can_go_next: bool,
    pub can_submit: bool,
    pub show_submit: bool,
    pub submitting: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionScreenVm {
    pub progress_label: String,
    pub answered_label: String,
    pub elapsed_label: String,
    pub question: Option<QuestionVm>,
    pub prompt: Option<PromptVm>,
    pub nav: NavVm,
}

/// Join a server-relative path onto the file base, or pass it through.
#[must_use]
pub fn resolve_file_url(path: &str, file_base: Option<&Url>) -> String {
    file_base
        .and_then(|base| base.join(path).ok())
        .map_or_else(|| path.to_string(), |url| url.to_string())
}

fn map_media(
    media: &quiz_core::model::MediaRef,
    file_base: Option<&Url>,
) -> Option<MediaVm> {
    let src = resolve_file_url(media.path(), file_base);
    match media.kind() {
        MediaKind::Image => Some(MediaVm::Image { src }),
        MediaKind::Video => Some(MediaVm::Video {
            src,
            mime: format!("video/{}", media.extension().unwrap_or_default()),
        }),
        MediaKind::Unsupported => None,
    }
}

#[must_use]
pub fn map_session_screen(
    session: &AssessmentSession,
    now: DateTime<Utc>,
    file_base: Option<&Url>,
) -> SessionScreenVm {
    let state = session.state();
    let progress = session.progress();
    let question = session.current_question().map(|question| {
        let selected = state.answer_for(question.id());
        QuestionVm {
            id: question.id(),
            category_label: session
                .current_category()
                .map(|c| format!("Category: {}", c.name))
                .unwrap_or_default(),
            text: question.text().to_string(),
            options: question
                .options()
                .iter()
                .enumerate()
                .map(|(i, label)| OptionVm {
                    index: OptionIndex::new(i),
                    label: label.clone(),
                    selected: selected == Some(OptionIndex::new(i)),
                })
                .collect(),
            media: question.media().and_then(|m| map_media(m, file_base)),
            document_url: question
                .reference_document()
                .map(|path| resolve_file_url(path, file_base)),
        }
    });
    let nav = session.navigation();
    SessionScreenVm {
        progress_label: progress.to_string(),
        answered_label: format!("{} of {} answered", progress.answered, progress.total),
        elapsed_label: format!("Time: {}", format_elapsed(session.elapsed(now))),
        question,
        prompt: session.prompt().map(PromptVm::from),
        nav: NavVm {
            can_go_previous: nav.can_go_previous && !nav.locked,
            can_go_next: nav.can_go_next && !nav.locked,
            can_submit: nav.can_submit && !nav.locked,
            show_submit: Navigation::on_last_question(state),
            submitting: session.is_submitting(),
        },
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use chrono::Duration;
    use gateway::{InMemoryGateway, StoredAssignment};
    use quiz_core::model::{
        AssignmentId, CategoryGroup, CategoryId, MediaRef, Question, UserId,
    };
    use quiz_core::time::{fixed_clock, fixed_now};
    use services::AssessmentService;

    async fn started() -> AssessmentSession {
        let first = Question::new(QuestionId::new(1), "Pick one", vec!["a".into(), "b".into()])
            .unwrap()
            .with_media(MediaRef::new("/uploads/clip.mp4"))
            .with_reference_document(Some("/docs/one.pdf".into()));
        let second =
            Question::new(QuestionId::new(2), "Pick again", vec!["c".into(), "d".into()]).unwrap();
        let group = CategoryGroup::new(CategoryId::new(1), "Basics", vec![first, second]).unwrap();
        let gateway = InMemoryGateway::new(fixed_now());
        gateway
            .insert_assignment(StoredAssignment::new(
                AssignmentId::new(1),
                "Quiz",
                fixed_now(),
                vec![group],
            ))
            .unwrap();
        AssessmentService::new(fixed_clock(), Arc::new(gateway))
            .start(UserId::new(1), AssignmentId::new(1))
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn screen_shows_question_media_and_footer() {
        let session = started().await;
        let base = Url::parse("http://files.test/").unwrap();
        let vm = map_session_screen(&session, fixed_now() + Duration::seconds(75), Some(&base));

        assert_eq!(vm.progress_label, "Question 1 of 2");
        assert_eq!(vm.elapsed_label, "Time: 1:15");
        let question = vm.question.unwrap();
        assert_eq!(question.category_label, "Category: Basics");
        assert_eq!(
            question.media,
            Some(MediaVm::Video {
                src: "http://files.test/uploads/clip.mp4".into(),
                mime: "video/mp4".into()
            })
        );
        assert_eq!(question.document_url.as_deref(), Some("http://files.test/docs/one.pdf"));
        assert!(!vm.nav.can_go_next);
        assert!(!vm.nav.show_submit);
    }

    #[tokio::test]
    async fn open_prompt_locks_navigation() {
        let mut session = started().await;
        session.select(QuestionId::new(1), OptionIndex::new(1));
        let vm = map_session_screen(&session, fixed_now(), None);

        let prompt = vm.prompt.unwrap();
        assert_eq!(prompt.selection_line, "You selected: b");
        assert!(vm.question.unwrap().options[1].selected);
        assert!(!vm.nav.can_go_next);

        session.choose(true);
        let vm = map_session_screen(&session, fixed_now(), None);
        assert!(vm.prompt.is_none());
        assert!(vm.nav.can_go_next);
        assert_eq!(vm.answered_label, "1 of 2 answered");
    }
}
