use dioxus::prelude::ReadableExt;
use gateway::{InMemoryGateway, StoredAssignment};
use quiz_core::model::{
    AssignmentId, CategoryGroup, CategoryId, OptionIndex, Question, QuestionId, ResponseFeedback,
};
use quiz_core::time::fixed_now;

use super::test_harness::{ViewHarness, ViewKind, setup_view_harness, test_user};
use crate::vm::SessionIntent;

fn question(id: u64, text: &str, options: &[&str]) -> Question {
    Question::new(
        QuestionId::new(id),
        text,
        options.iter().map(|o| (*o).to_string()).collect(),
    )
    .expect("question")
}

fn basics(questions: Vec<Question>) -> Vec<CategoryGroup> {
    vec![CategoryGroup::new(CategoryId::new(1), "Basics", questions).expect("group")]
}

fn single_question(id: u64, name: &str) -> StoredAssignment {
    StoredAssignment::new(
        AssignmentId::new(id),
        name,
        fixed_now(),
        basics(vec![question(1, "Capital of France?", &["Berlin", "Paris"])]),
    )
    .with_answer(QuestionId::new(1), "Paris")
    .with_feedback(
        QuestionId::new(1),
        ResponseFeedback {
            short: Some("Paris has been the capital since 987.".into()),
            long_text: None,
            long_file_path: Some("/docs/france.pdf".into()),
        },
    )
}

fn gateway_with(assignments: Vec<StoredAssignment>) -> InMemoryGateway {
    let gateway = InMemoryGateway::new(fixed_now());
    for assignment in assignments {
        gateway.insert_assignment(assignment).expect("insert");
    }
    gateway
}

async fn complete(harness: &ViewHarness, id: u64) {
    let mut session = harness
        .assessments
        .start(test_user(), AssignmentId::new(id))
        .await
        .expect("start");
    session.select(QuestionId::new(1), OptionIndex::new(1));
    session.choose(true);
    harness
        .assessments
        .submit(&mut session)
        .await
        .expect("submit");
}

#[tokio::test(flavor = "current_thread")]
async fn assignments_view_smoke_lists_active_and_completed() {
    let gateway = gateway_with(vec![
        single_question(1, "Geography warm-up"),
        single_question(2, "Geography review"),
    ]);
    let mut harness = setup_view_harness(ViewKind::Assignments, gateway);
    complete(&harness, 2).await;

    harness.rebuild();
    let html = harness.settle_until("Geography review").await;
    assert!(html.contains("Geography warm-up"), "missing active in {html}");
    assert!(html.contains("Start"), "missing start link in {html}");
    assert!(html.contains("Completed"), "missing completed section in {html}");
    assert!(html.contains("View results"), "missing results link in {html}");
    assert!(html.contains("Mastery: 100%"), "missing mastery in {html}");
    assert!(html.contains("1/1 questions mastered"), "missing mastered count in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn assignments_view_smoke_renders_empty_state() {
    let mut harness = setup_view_harness(ViewKind::Assignments, gateway_with(Vec::new()));
    harness.rebuild();
    let html = harness.settle_until("No assignments yet.").await;
    assert!(html.contains("No assignments yet."), "missing empty state in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn session_view_smoke_renders_first_question() {
    let gateway = gateway_with(vec![StoredAssignment::new(
        AssignmentId::new(1),
        "Two questions",
        fixed_now(),
        basics(vec![
            question(1, "Pick a colour", &["red", "green"]),
            question(2, "Pick a shape", &["circle", "square"]),
        ]),
    )]);
    let mut harness = setup_view_harness(ViewKind::Session(1), gateway);
    harness.rebuild();
    let html = harness.settle_until("Question 1 of 2").await;

    assert!(html.contains("Question 1 of 2"), "missing progress in {html}");
    assert!(html.contains("Category: Basics"), "missing category in {html}");
    assert!(html.contains("Pick a colour"), "missing question in {html}");
    assert!(html.contains("0 of 2 answered"), "missing answered count in {html}");
    assert!(html.contains("Time: 0:00"), "missing timer in {html}");
    assert!(html.contains("Next"), "missing next button in {html}");
    assert!(!html.contains("How confident"), "prompt should be closed in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn session_view_smoke_answers_and_submits_once() {
    let gateway = gateway_with(vec![single_question(1, "Capitals")]);
    let mut harness = setup_view_harness(ViewKind::Session(1), gateway);
    harness.rebuild();
    harness.settle_until("Question 1 of 1").await;

    harness.dispatch(SessionIntent::Select {
        question_id: QuestionId::new(1),
        option: OptionIndex::new(1),
    });
    let html = harness.render();
    assert!(html.contains("How confident are you in your answer?"), "missing prompt in {html}");
    assert!(html.contains("You selected: Paris"), "missing selection in {html}");

    harness.dispatch(SessionIntent::Confidence(true));
    let html = harness.render();
    assert!(!html.contains("How confident"), "prompt should close in {html}");
    assert!(html.contains("1 of 1 answered"), "missing answered count in {html}");
    assert!(html.contains("Submit"), "missing submit in {html}");

    harness.dispatch(SessionIntent::Submit);
    harness.dispatch(SessionIntent::Submit);
    let html = harness.settle_until("Results").await;
    assert!(html.contains("Results"), "missing results in {html}");
    assert!(html.contains("Correct: 1 of 1"), "missing score in {html}");
    assert!(html.contains("The answer is correct!"), "missing headline in {html}");
    assert!(
        html.contains("http://files.test/docs/france.pdf"),
        "missing document link in {html}"
    );

    harness.dispatch(SessionIntent::Submit);
    harness.drive_async().await;
    assert_eq!(harness.gateway.submission_count().expect("count"), 1);
    let handles = harness.session_handles.clone().expect("handles");
    let submitted = harness
        .dom
        .in_runtime(|| handles.session().peek().as_ref().map(|s| s.is_submitted()));
    assert_eq!(submitted, Some(true));
}

#[tokio::test(flavor = "current_thread")]
async fn session_view_smoke_offers_retry_after_network_failure() {
    let gateway = gateway_with(vec![single_question(1, "Capitals")]);
    gateway.fail_next_submissions(1).expect("inject failure");
    let mut harness = setup_view_harness(ViewKind::Session(1), gateway);
    harness.rebuild();
    harness.settle_until("Question 1 of 1").await;

    harness.dispatch(SessionIntent::Select {
        question_id: QuestionId::new(1),
        option: OptionIndex::new(0),
    });
    harness.dispatch(SessionIntent::Confidence(false));
    harness.dispatch(SessionIntent::Submit);
    let html = harness.settle_until("Could not submit").await;
    assert!(html.contains("Check your connection and try again."), "missing error in {html}");
    assert!(html.contains("Retry"), "missing retry in {html}");
    assert!(html.contains("Capital of France?"), "question should stay in {html}");

    harness.dispatch(SessionIntent::Submit);
    let html = harness.settle_until("Results").await;
    assert!(html.contains("Correct: 0 of 1"), "missing score in {html}");
    assert_eq!(harness.gateway.submission_count().expect("count"), 2);
}

#[tokio::test(flavor = "current_thread")]
async fn session_view_smoke_reports_empty_assignment() {
    let gateway = gateway_with(vec![StoredAssignment::new(
        AssignmentId::new(1),
        "Empty",
        fixed_now(),
        basics(Vec::new()),
    )]);
    let mut harness = setup_view_harness(ViewKind::Session(1), gateway);
    harness.rebuild();
    let html = harness.settle_until("Cannot start").await;
    assert!(
        html.contains("Cannot start assignment: it has no questions."),
        "missing empty message in {html}"
    );
    assert!(!html.contains("Retry"), "empty assignment is not retryable in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn results_view_smoke_renders_completed_attempt() {
    let gateway = gateway_with(vec![single_question(4, "Capitals")]);
    let mut harness = setup_view_harness(ViewKind::Results(4), gateway);
    complete(&harness, 4).await;

    harness.rebuild();
    let html = harness.settle_until("Correct: 1 of 1").await;
    assert!(html.contains("Correct: 1 of 1"), "missing score in {html}");
    assert!(html.contains("Capital of France?"), "missing question text in {html}");
    assert!(
        html.contains("Completed on: 2023-11-14 22:13 UTC"),
        "missing completion date in {html}"
    );
    assert!(
        html.contains("Paris has been the capital since 987."),
        "missing short feedback in {html}"
    );
}

#[tokio::test(flavor = "current_thread")]
async fn results_view_smoke_reports_missing_assignment() {
    let mut harness = setup_view_harness(ViewKind::Results(9), gateway_with(Vec::new()));
    harness.rebuild();
    let html = harness.settle_until("could not be found").await;
    assert!(
        html.contains("This assignment could not be found."),
        "missing error in {html}"
    );
    assert!(!html.contains("Retry"), "a missing assignment is not retryable in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn session_view_smoke_rejects_submit_after_completion_elsewhere() {
    let gateway = gateway_with(vec![single_question(1, "Capitals")]);
    let mut harness = setup_view_harness(ViewKind::Session(1), gateway);
    harness.rebuild();
    harness.settle_until("Question 1 of 1").await;
    complete(&harness, 1).await;

    harness.dispatch(SessionIntent::Select {
        question_id: QuestionId::new(1),
        option: OptionIndex::new(1),
    });
    harness.dispatch(SessionIntent::Confidence(true));
    harness.dispatch(SessionIntent::Submit);
    let html = harness.settle_until("already completed").await;
    assert!(
        html.contains("This assignment was already completed elsewhere."),
        "missing rejection in {html}"
    );
    assert!(!html.contains("Check your connection"), "rejection is not a network error in {html}");
    assert!(!html.contains("Retry"), "rejection is not retryable in {html}");
    assert_eq!(harness.gateway.submission_count().expect("count"), 2);
}

#[tokio::test(flavor = "current_thread")]
async fn session_view_smoke_notes_partial_results() {
    let gateway = gateway_with(vec![
        single_question(1, "Capitals").without_score_for(QuestionId::new(1)),
    ]);
    let mut harness = setup_view_harness(ViewKind::Session(1), gateway);
    harness.rebuild();
    harness.settle_until("Question 1 of 1").await;

    harness.dispatch(SessionIntent::Select {
        question_id: QuestionId::new(1),
        option: OptionIndex::new(1),
    });
    harness.dispatch(SessionIntent::Confidence(true));
    harness.dispatch(SessionIntent::Submit);
    let html = harness.settle_until("some results are missing").await;
    assert!(html.contains("Results"), "results should still show in {html}");
    assert!(!html.contains("Retry"), "partial results are not retryable in {html}");

    let handles = harness.session_handles.clone().expect("handles");
    let submitted = harness
        .dom
        .in_runtime(|| handles.session().peek().as_ref().map(|s| s.is_submitted()));
    assert_eq!(submitted, Some(true));
}
