use dioxus::prelude::*;
use dioxus_router::Link;

use quiz_core::OutcomeIcon;
use quiz_core::model::AssignmentId;

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{OutcomeCardVm, ResultsVm, map_results};

#[component]
pub fn ResultsView(assignment_id: u64) -> Element {
    let ctx = use_context::<AppContext>();
    let assessments = ctx.assessments();
    let user = ctx.user_id();
    let file_base = ctx.file_base_url().cloned();
    let assignment = AssignmentId::new(assignment_id);

    let resource = use_resource(move || {
        let assessments = assessments.clone();
        let file_base = file_base.clone();
        async move {
            let review = assessments
                .results(user, assignment)
                .await
                .map_err(|err| ViewError::from(&err))?;
            Ok::<_, ViewError>(map_results(&review, file_base.as_ref()))
        }
    });
    let state = view_state_from_resource(&resource);

    rsx! {
        div { class: "page results-page",
            Link { class: "page-back", to: Route::Assignments {}, "Back to assignments" }
            match state {
                ViewState::Idle => rsx! {
                    p { "Idle" }
                },
                ViewState::Loading => rsx! {
                    p { "Loading..." }
                },
                ViewState::Ready(results) => rsx! {
                    ResultsList { results }
                },
                ViewState::Error(err) => rsx! {
                    p { class: "page-error", "{err.message()}" }
                    button {
                        class: "btn btn-secondary",
                        r#type: "button",
                        onclick: move |_| {
                            let mut resource = resource;
                            resource.restart();
                        },
                        "Retry"
                    }
                },
            }
        }
    }
}

/// Scored responses in the order the scorer returned them.
#[component]
pub fn ResultsList(results: ResultsVm) -> Element {
    rsx! {
        div { class: "results",
            h2 { class: "results__title", "Results" }
            p { class: "results__score", "Correct: {results.correct} of {results.total}" }
            if let Some(label) = results.completed_label {
                p { class: "results__date", "{label}" }
            }
            ol { class: "results__list",
                for card in results.cards {
                    OutcomeCard { key: "{card.number}", card }
                }
            }
        }
    }
}

#[component]
fn OutcomeCard(card: OutcomeCardVm) -> Element {
    let glyph = match card.icon {
        OutcomeIcon::Check => "✓",
        OutcomeIcon::Cross => "✗",
        OutcomeIcon::None => "",
    };
    rsx! {
        li { class: "outcome outcome--{card.tone}",
            div { class: "outcome__heading",
                span { class: "outcome__number", "{card.number}." }
                span { class: "outcome__question", "{card.question_text}" }
                span { class: "outcome__badge",
                    if !glyph.is_empty() {
                        span { class: "outcome__icon", "{glyph}" }
                    }
                    "{card.label}"
                }
            }
            dl { class: "outcome__answers",
                dt { "Your answer" }
                dd { "{card.user_answer}" }
                dt { "Correct answer" }
                dd { "{card.correct_answer}" }
            }
            p { class: "outcome__headline", "{card.headline}" }
            p { class: "outcome__body", "{card.body}" }
            if let Some(short) = card.short_feedback {
                p { class: "outcome__feedback", "{short}" }
            }
            if let Some(long) = card.long_feedback {
                p { class: "outcome__feedback outcome__feedback--long", "{long}" }
            }
            if let Some(url) = card.document_url {
                a {
                    class: "outcome__document",
                    href: "{url}",
                    target: "_blank",
                    "View document"
                }
            }
        }
    }
}
