use std::sync::Arc;

use gateway::{AssignmentGateway, GatewayConfig, HttpGateway};
use quiz_core::model::UserId;

use crate::Clock;
use crate::assessments::AssessmentService;
use crate::error::AppServicesError;

/// Assembles app-facing services for one signed-in learner.
#[derive(Clone)]
pub struct AppServices {
    user: UserId,
    config: Option<GatewayConfig>,
    assessments: Arc<AssessmentService>,
}

impl AppServices {
    /// Build services that talk to the assignment service over HTTP.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError::Gateway` if the HTTP client cannot be built.
    pub fn new_http(
        config: GatewayConfig,
        clock: Clock,
        user: UserId,
    ) -> Result<Self, AppServicesError> {
        let gateway = HttpGateway::new(config.clone())?;
        Ok(Self {
            user,
            config: Some(config),
            assessments: Arc::new(AssessmentService::new(clock, Arc::new(gateway))),
        })
    }

    /// Build services on any gateway, e.g. an in-memory one for demos.
    #[must_use]
    pub fn with_gateway(gateway: Arc<dyn AssignmentGateway>, clock: Clock, user: UserId) -> Self {
        Self {
            user,
            config: None,
            assessments: Arc::new(AssessmentService::new(clock, gateway)),
        }
    }

    #[must_use]
    pub fn user(&self) -> UserId {
        self.user
    }

    /// Gateway configuration, when backed by the HTTP gateway.
    #[must_use]
    pub fn config(&self) -> Option<&GatewayConfig> {
        self.config.as_ref()
    }

    #[must_use]
    pub fn assessments(&self) -> Arc<AssessmentService> {
        Arc::clone(&self.assessments)
    }
}
