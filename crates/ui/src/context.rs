use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use url::Url;

use quiz_core::model::{AssignmentId, UserId};
use services::AssessmentService;

pub trait UiApp: Send + Sync {
    fn user_id(&self) -> UserId;
    /// Assignment to open straight away, if the launcher named one.
    fn initial_assignment(&self) -> Option<AssignmentId>;
    /// Origin serving question media and feedback documents.
    fn file_base_url(&self) -> Option<Url>;

    fn assessments(&self) -> Arc<AssessmentService>;
}

#[derive(Clone)]
pub struct AppContext {
    user_id: UserId,
    initial_assignment: Option<AssignmentId>,
    initial_assignment_once: Arc<AtomicBool>,
    file_base_url: Option<Url>,

    assessments: Arc<AssessmentService>,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        let initial_assignment = app.initial_assignment();
        Self {
            user_id: app.user_id(),
            initial_assignment,
            initial_assignment_once: Arc::new(AtomicBool::new(initial_assignment.is_some())),
            file_base_url: app.file_base_url(),
            assessments: app.assessments(),
        }
    }

    #[must_use]
    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    /// The launch assignment, handed out once.
    #[must_use]
    pub fn take_initial_assignment(&self) -> Option<AssignmentId> {
        if self.initial_assignment_once.swap(false, Ordering::AcqRel) {
            self.initial_assignment
        } else {
            None
        }
    }

    #[must_use]
    pub fn file_base_url(&self) -> Option<&Url> {
        self.file_base_url.as_ref()
    }

    #[must_use]
    pub fn assessments(&self) -> Arc<AssessmentService> {
        Arc::clone(&self.assessments)
    }
}

// This context is provided by the application composition root (e.g. `crates/app`).

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
