use std::sync::Arc;

use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use dioxus_router::{Routable, Router};
use gateway::InMemoryGateway;
use quiz_core::model::{AssignmentId, UserId};
use quiz_core::time::fixed_clock;
use services::AssessmentService;
use url::Url;

use crate::context::{UiApp, build_app_context};
use crate::views::session::SessionTestHandles;
use crate::views::{AssignmentsView, ResultsView, SessionView};

pub fn test_user() -> UserId {
    UserId::new(7)
}

#[derive(Clone)]
struct TestApp {
    initial_assignment: Option<AssignmentId>,
    assessments: Arc<AssessmentService>,
}

impl UiApp for TestApp {
    fn user_id(&self) -> UserId {
        test_user()
    }

    fn initial_assignment(&self) -> Option<AssignmentId> {
        self.initial_assignment
    }

    fn file_base_url(&self) -> Option<Url> {
        Url::parse("http://files.test/").ok()
    }

    fn assessments(&self) -> Arc<AssessmentService> {
        Arc::clone(&self.assessments)
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    Assignments,
    Session(u64),
    Results(u64),
}

#[derive(Props, Clone)]
struct ViewHarnessProps {
    app: Arc<TestApp>,
    view: ViewKind,
    session_handles: Option<SessionTestHandles>,
}

impl PartialEq for ViewHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

impl Eq for ViewHarnessProps {}

#[component]
fn ViewRouterHarness(props: ViewHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(&app));
    use_context_provider(|| props.view);
    if let Some(handles) = props.session_handles.clone() {
        use_context_provider(|| handles);
    }
    rsx! { Router::<TestRoute> {} }
}

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum TestRoute {
    #[route("/")]
    Root {},
}

#[component]
fn Root() -> Element {
    let view = use_context::<ViewKind>();
    match view {
        ViewKind::Assignments => rsx! { AssignmentsView {} },
        ViewKind::Session(assignment_id) => rsx! { SessionView { assignment_id } },
        ViewKind::Results(assignment_id) => rsx! { ResultsView { assignment_id } },
    }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
    pub gateway: InMemoryGateway,
    pub assessments: Arc<AssessmentService>,
    pub session_handles: Option<SessionTestHandles>,
}

impl ViewHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    pub async fn drive_async(&mut self) {
        let _ = tokio::time::timeout(
            std::time::Duration::from_millis(50),
            self.dom.wait_for_work(),
        )
        .await;
        self.dom.render_immediate(&mut NoOpMutations);
        self.dom.process_events();
    }

    /// Drive pending work until `needle` shows up or the attempts run out.
    pub async fn settle_until(&mut self, needle: &str) -> String {
        let mut html = self.render();
        for _ in 0..20 {
            if html.contains(needle) {
                break;
            }
            self.drive_async().await;
            html = self.render();
        }
        html
    }

    pub fn dispatch(&mut self, intent: crate::vm::SessionIntent) {
        let handles = self
            .session_handles
            .clone()
            .expect("session view harness");
        self.dom.in_runtime(|| handles.dispatch().call(intent));
        drive_dom(&mut self.dom);
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

pub fn setup_view_harness(view: ViewKind, gateway: InMemoryGateway) -> ViewHarness {
    let assessments = Arc::new(AssessmentService::new(
        fixed_clock(),
        Arc::new(gateway.clone()),
    ));
    let session_handles = match view {
        ViewKind::Session(_) => Some(SessionTestHandles::default()),
        _ => None,
    };
    let app = Arc::new(TestApp {
        initial_assignment: None,
        assessments: Arc::clone(&assessments),
    });

    let dom = VirtualDom::new_with_props(
        ViewRouterHarness,
        ViewHarnessProps {
            app,
            view,
            session_handles: session_handles.clone(),
        },
    );

    ViewHarness {
        dom,
        gateway,
        assessments,
        session_handles,
    }
}
