use dioxus::prelude::*;
use dioxus_router::{Link, use_navigator};

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{AssignmentCardVm, CatalogueVm, map_catalogue};

#[component]
pub fn AssignmentsView() -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let assessments = ctx.assessments();
    let user = ctx.user_id();

    // A launch-time assignment opens once; coming back here shows the list.
    let launch_ctx = ctx.clone();
    use_effect(move || {
        if let Some(assignment) = launch_ctx.take_initial_assignment() {
            tracing::debug!(assignment_id = %assignment, "opening launch assignment");
            let _ = navigator.push(Route::Session {
                assignment_id: assignment.value(),
            });
        }
    });

    let resource = use_resource(move || {
        let assessments = assessments.clone();
        async move {
            let catalogue = assessments
                .catalogue(user)
                .await
                .map_err(|err| ViewError::from(&err))?;
            Ok::<_, ViewError>(map_catalogue(&catalogue))
        }
    });
    let state = view_state_from_resource(&resource);

    rsx! {
        div { class: "page assignments-page",
            h2 { "Assignments" }
            match state {
                ViewState::Idle => rsx! {
                    p { "Idle" }
                },
                ViewState::Loading => rsx! {
                    p { "Loading..." }
                },
                ViewState::Ready(catalogue) => rsx! {
                    CatalogueSections { catalogue }
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

#[component]
fn CatalogueSections(catalogue: CatalogueVm) -> Element {
    if catalogue.active.is_empty() && catalogue.completed.is_empty() {
        return rsx! {
            p { class: "assignments-empty", "No assignments yet." }
        };
    }

    rsx! {
        section { class: "assignments-section",
            h3 { "Active" }
            if catalogue.active.is_empty() {
                p { class: "assignments-empty", "Nothing left to do. Nice work." }
            } else {
                ul { class: "assignment-list",
                    for card in catalogue.active {
                        AssignmentCard { key: "{card.id}", card, completed: false }
                    }
                }
            }
        }
        if !catalogue.completed.is_empty() {
            section { class: "assignments-section",
                h3 { "Completed" }
                ul { class: "assignment-list",
                    for card in catalogue.completed {
                        AssignmentCard { key: "{card.id}", card, completed: true }
                    }
                }
            }
        }
    }
}

#[component]
fn AssignmentCard(card: AssignmentCardVm, completed: bool) -> Element {
    let assignment_id = card.id;
    rsx! {
        li { class: "assignment-card",
            div { class: "assignment-card__heading",
                span { class: "assignment-card__name", "{card.name}" }
                span { class: "assignment-card__date", "{card.created_label}" }
            }
            if let Some(label) = card.completed_label {
                p { class: "assignment-card__meta", "{label}" }
            }
            if let Some(label) = card.mastery_label {
                p { class: "assignment-card__mastery", "{label}" }
            }
            if let Some(label) = card.mastered_label {
                p { class: "assignment-card__meta", "{label}" }
            }
            if completed {
                Link { class: "assignment-card__cta", to: Route::Results { assignment_id }, "View results" }
            } else {
                Link { class: "assignment-card__cta", to: Route::Session { assignment_id }, "Start" }
            }
        }
    }
}
