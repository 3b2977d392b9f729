use std::time::Duration;

use dioxus::prelude::*;
use dioxus_router::Link;

use quiz_core::model::AssignmentId;
use services::{AssessmentError, AssessmentSession};

use super::prompt::ConfidenceModal;
use crate::context::AppContext;
use crate::routes::Route;
use crate::views::{ResultsList, ViewError, ViewState, view_state_from_resource};
use crate::vm::{
    MediaVm, NavVm, QuestionVm, ResultsVm, SessionIntent, SessionScreenVm, map_results,
    map_session_screen,
};

#[cfg(test)]
use std::cell::RefCell;
#[cfg(test)]
use std::rc::Rc;

const TICK: Duration = Duration::from_secs(1);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum LastAction {
    Start,
    Submit,
}

#[derive(Clone, Debug, PartialEq)]
enum SessionBody {
    Question(SessionScreenVm),
    Results(ResultsVm),
    Empty,
}

#[component]
pub fn SessionView(assignment_id: u64) -> Element {
    let ctx = use_context::<AppContext>();
    let assessments = ctx.assessments();
    let clock = assessments.clock();
    let user = ctx.user_id();
    let file_base = ctx.file_base_url().cloned();
    let assignment = AssignmentId::new(assignment_id);

    let session = use_signal(|| None::<AssessmentSession>);
    let error = use_signal(|| None::<ViewError>);
    let submitting = use_signal(|| false);
    let last_action = use_signal(|| None::<LastAction>);
    let now = use_signal(|| clock.now());

    let resource = {
        let assessments = assessments.clone();
        use_resource(move || {
            let assessments = assessments.clone();
            let mut session = session;
            let mut error = error;
            let mut last_action = last_action;
            async move {
                last_action.set(Some(LastAction::Start));
                let started = assessments
                    .start(user, assignment)
                    .await
                    .map_err(|err| ViewError::from(&err))?;
                session.set(Some(started));
                error.set(None);
                Ok::<_, ViewError>(())
            }
        })
    };
    let state = view_state_from_resource(&resource);

    // Elapsed time only moves while the attempt is open.
    use_future(move || async move {
        let mut now = now;
        loop {
            tokio::time::sleep(TICK).await;
            let closed = session
                .peek()
                .as_ref()
                .is_some_and(AssessmentSession::is_submitted);
            if !closed {
                now.set(clock.now());
            }
        }
    });

    let dispatch_intent = {
        let assessments = assessments.clone();
        use_callback(move |intent: SessionIntent| {
            let mut session = session;
            let mut error = error;
            let mut submitting = submitting;
            let mut last_action = last_action;

            match intent {
                SessionIntent::Select {
                    question_id,
                    option,
                } => {
                    if let Some(session) = session.write().as_mut() {
                        session.select(question_id, option);
                    }
                }
                SessionIntent::Confidence(is_sure) => {
                    if let Some(session) = session.write().as_mut() {
                        session.choose(is_sure);
                    }
                }
                SessionIntent::DismissPrompt => {
                    if let Some(session) = session.write().as_mut() {
                        session.dismiss_prompt();
                    }
                }
                SessionIntent::Next => {
                    if let Some(session) = session.write().as_mut() {
                        session.advance();
                    }
                }
                SessionIntent::Previous => {
                    if let Some(session) = session.write().as_mut() {
                        session.retreat();
                    }
                }
                SessionIntent::Submit => {
                    last_action.set(Some(LastAction::Submit));
                    let ticket = session
                        .read()
                        .as_ref()
                        .map(AssessmentSession::begin_submission);
                    let ticket = match ticket {
                        Some(Ok(ticket)) => ticket,
                        // A second click while the first is pending, or after it landed.
                        Some(Err(
                            AssessmentError::SubmissionInFlight | AssessmentError::AlreadySubmitted,
                        )) => return,
                        Some(Err(err)) => {
                            error.set(Some(ViewError::from(&err)));
                            return;
                        }
                        None => {
                            error.set(Some(ViewError::UNKNOWN));
                            return;
                        }
                    };
                    submitting.set(true);
                    error.set(None);

                    let assessments = assessments.clone();
                    spawn(async move {
                        match assessments.deliver(ticket).await {
                            Ok(submitted) => {
                                let recorded = session
                                    .write()
                                    .as_mut()
                                    .map(|session| session.record_submission(submitted).map(|_| ()));
                                match recorded {
                                    Some(Ok(())) => error.set(None),
                                    // The scorer's partial results stay on screen under the note.
                                    Some(Err(err)) => {
                                        tracing::warn!(error = %err, "showing partial results");
                                        error.set(Some(ViewError::from(&err)));
                                    }
                                    None => error.set(Some(ViewError::UNKNOWN)),
                                }
                            }
                            Err(err) => error.set(Some(ViewError::from(&err))),
                        }
                        submitting.set(false);
                    });
                }
            }
        })
    };

    #[cfg(test)]
    {
        let mut registered = use_signal(|| false);
        if !registered() {
            registered.set(true);
            if let Some(handles) = try_consume_context::<SessionTestHandles>() {
                handles.register(dispatch_intent, session);
            }
        }
    }

    let retry_action = use_callback(move |()| match last_action() {
        Some(LastAction::Start) | None => {
            let mut resource = resource;
            resource.restart();
        }
        Some(LastAction::Submit) => dispatch_intent.call(SessionIntent::Submit),
    });

    // Subscribe to the in-flight flag; the gate itself is not reactive.
    let _ = submitting();
    let body = {
        let guard = session.read();
        match guard.as_ref() {
            Some(session) if session.is_submitted() => assessments
                .review_session(session)
                .map_or(SessionBody::Empty, |review| {
                    SessionBody::Results(map_results(&review, file_base.as_ref()))
                }),
            Some(session) => {
                SessionBody::Question(map_session_screen(session, now(), file_base.as_ref()))
            }
            None => SessionBody::Empty,
        }
    };

    rsx! {
        div { class: "page session-page", id: "session-root",
            header { class: "session-header",
                Link { class: "page-back", to: Route::Assignments {}, "Back to assignments" }
            }
            match state {
                ViewState::Idle => rsx! {
                    p { "Idle" }
                },
                ViewState::Loading => rsx! {
                    p { "Loading..." }
                },
                ViewState::Error(err) => rsx! {
                    p { class: "page-error", "{err.message()}" }
                    if err.is_retryable() {
                        button {
                            class: "btn btn-secondary",
                            r#type: "button",
                            onclick: move |_| retry_action.call(()),
                            "Retry"
                        }
                    }
                },
                ViewState::Ready(()) => rsx! {
                    if let Some(err) = *error.read() {
                        div { class: "session-error",
                            p { "{err.message()}" }
                            if err.is_retryable() {
                                button {
                                    class: "btn btn-secondary",
                                    r#type: "button",
                                    onclick: move |_| retry_action.call(()),
                                    "Retry"
                                }
                            }
                        }
                    }
                    match body {
                        SessionBody::Question(screen) => rsx! {
                            SessionScreen { screen, on_intent: dispatch_intent }
                        },
                        SessionBody::Results(results) => rsx! {
                            ResultsList { results }
                        },
                        SessionBody::Empty => rsx! {},
                    }
                },
            }
        }
    }
}

#[component]
fn SessionScreen(screen: SessionScreenVm, on_intent: EventHandler<SessionIntent>) -> Element {
    rsx! {
        if let Some(question) = screen.question {
            QuestionCard { question, locked: screen.nav.submitting, on_intent }
        }
        footer { class: "session-footer",
            span { class: "session-footer__item", "{screen.progress_label}" }
            span { class: "session-footer__item", "{screen.answered_label}" }
            span { class: "session-footer__item session-footer__timer", "{screen.elapsed_label}" }
            NavButtons { nav: screen.nav, on_intent }
        }
        if let Some(prompt) = screen.prompt {
            ConfidenceModal { prompt, on_intent }
        }
    }
}

#[component]
fn QuestionCard(
    question: QuestionVm,
    locked: bool,
    on_intent: EventHandler<SessionIntent>,
) -> Element {
    let question_id = question.id;
    rsx! {
        div { class: "session-question",
            p { class: "session-category", "{question.category_label}" }
            h3 { class: "session-text", "{question.text}" }
            if let Some(media) = question.media {
                QuestionMedia { media }
            }
            if let Some(url) = question.document_url {
                a {
                    class: "session-document",
                    href: "{url}",
                    target: "_blank",
                    "View document"
                }
            }
            div { class: "session-options", role: "radiogroup",
                for option in question.options {
                    button {
                        key: "{option.index}",
                        class: if option.selected { "session-option session-option--selected" } else { "session-option" },
                        r#type: "button",
                        role: "radio",
                        aria_checked: "{option.selected}",
                        disabled: locked,
                        onclick: move |_| on_intent.call(SessionIntent::Select {
                            question_id,
                            option: option.index,
                        }),
                        "{option.label}"
                    }
                }
            }
        }
    }
}

#[component]
fn QuestionMedia(media: MediaVm) -> Element {
    match media {
        MediaVm::Image { src } => rsx! {
            img { class: "session-media", src: "{src}", alt: "Question image" }
        },
        MediaVm::Video { src, mime } => rsx! {
            video { class: "session-media", controls: true,
                source { src: "{src}", r#type: "{mime}" }
                "Your browser does not support the video tag."
            }
        },
    }
}

#[component]
fn NavButtons(nav: NavVm, on_intent: EventHandler<SessionIntent>) -> Element {
    rsx! {
        div { class: "session-nav",
            button {
                class: "btn btn-secondary",
                id: "session-previous",
                r#type: "button",
                disabled: !nav.can_go_previous,
                onclick: move |_| on_intent.call(SessionIntent::Previous),
                "Previous"
            }
            if nav.show_submit {
                button {
                    class: "btn session-submit",
                    id: "session-submit",
                    r#type: "button",
                    disabled: !nav.can_submit,
                    onclick: move |_| on_intent.call(SessionIntent::Submit),
                    if nav.submitting { "Submitting..." } else { "Submit" }
                }
            } else {
                button {
                    class: "btn",
                    id: "session-next",
                    r#type: "button",
                    disabled: !nav.can_go_next,
                    onclick: move |_| on_intent.call(SessionIntent::Next),
                    "Next"
                }
            }
        }
    }
}

#[cfg(test)]
#[derive(Clone, Default)]
pub(crate) struct SessionTestHandles {
    dispatch: Rc<RefCell<Option<Callback<SessionIntent>>>>,
    session: Rc<RefCell<Option<Signal<Option<AssessmentSession>>>>>,
}

#[cfg(test)]
impl SessionTestHandles {
    pub(crate) fn register(
        &self,
        dispatch: Callback<SessionIntent>,
        session: Signal<Option<AssessmentSession>>,
    ) {
        *self.dispatch.borrow_mut() = Some(dispatch);
        *self.session.borrow_mut() = Some(session);
    }

    pub(crate) fn dispatch(&self) -> Callback<SessionIntent> {
        (*self.dispatch.borrow()).expect("session dispatch registered")
    }

    pub(crate) fn session(&self) -> Signal<Option<AssessmentSession>> {
        (*self.session.borrow()).expect("session signal registered")
    }
}
