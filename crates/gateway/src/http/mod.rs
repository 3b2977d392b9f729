mod wire;

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use url::Url;

use quiz_core::SubmissionPayload;
use quiz_core::model::{
    AssignmentId, AssignmentResults, AssignmentSummary, CategoryGroup, UserId,
};

use crate::config::GatewayConfig;
use crate::repository::{AssignmentGateway, GatewayError};

use wire::{
    CompletionDetails, ErrorBody, QuestionsBody, ResultsBody, SubmitBody, SubmitResult,
    map_assignment, map_attempt, map_category, map_scored,
};

/// Assignment service reached over its JSON API.
#[derive(Clone)]
pub struct HttpGateway {
    client: Client,
    config: GatewayConfig,
}

impl HttpGateway {
    /// # Errors
    ///
    /// Returns `GatewayError::Http` if the HTTP client cannot be built.
    pub fn new(config: GatewayConfig) -> Result<Self, GatewayError> {
        let client = Client::builder().timeout(config.timeout()).build()?;
        Ok(Self { client, config })
    }

    #[must_use]
    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    fn endpoint(&self, user: UserId, tail: &str) -> Result<Url, GatewayError> {
        Ok(self
            .config
            .base_url()
            .join(&format!("user/{user}/assignments/{tail}"))?)
    }

    async fn read<T: DeserializeOwned>(response: Response) -> Result<T, GatewayError> {
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            let message = serde_json::from_str::<ErrorBody>(&body)
                .ok()
                .and_then(|b| b.error);
            tracing::warn!(status = status.as_u16(), ?message, "assignment service refused request");
            if status == reqwest::StatusCode::NOT_FOUND {
                return Err(GatewayError::NotFound);
            }
            return Err(GatewayError::HttpStatus {
                status: status.as_u16(),
                message,
            });
        }
        serde_json::from_str(&body).map_err(|e| GatewayError::Decode(e.to_string()))
    }
}

#[async_trait]
impl AssignmentGateway for HttpGateway {
    async fn list_assignments(
        &self,
        user: UserId,
    ) -> Result<Vec<AssignmentSummary>, GatewayError> {
        let url = self.endpoint(user, "completion-details")?;
        tracing::debug!(%url, "fetching assignment catalogue");
        let body: CompletionDetails = Self::read(self.client.get(url).send().await?).await?;
        Ok(body.assignments.into_iter().map(map_assignment).collect())
    }

    async fn fetch_assignment_questions(
        &self,
        user: UserId,
        assignment: AssignmentId,
    ) -> Result<Vec<CategoryGroup>, GatewayError> {
        let url = self.endpoint(user, &format!("{assignment}/questions"))?;
        tracing::debug!(%url, "fetching assignment questions");
        let body: QuestionsBody = Self::read(self.client.get(url).send().await?).await?;
        body.questions.into_iter().map(map_category).collect()
    }

    async fn submit_assignment(
        &self,
        user: UserId,
        assignment: AssignmentId,
        payload: &SubmissionPayload,
    ) -> Result<AssignmentResults, GatewayError> {
        let url = self.endpoint(user, &format!("{assignment}/submit"))?;
        tracing::debug!(%url, responses = payload.len(), "submitting assignment");
        let response = self
            .client
            .post(url)
            .json(&SubmitBody::from_payload(payload))
            .send()
            .await?;
        let body: SubmitResult = Self::read(response).await?;
        Ok(AssignmentResults {
            responses: body.results.into_iter().map(map_scored).collect(),
            completed_at: None,
        })
    }

    async fn fetch_assignment_results(
        &self,
        user: UserId,
        assignment: AssignmentId,
    ) -> Result<AssignmentResults, GatewayError> {
        let url = self.endpoint(user, &format!("{assignment}/results"))?;
        tracing::debug!(%url, "fetching assignment results");
        let body: ResultsBody = Self::read(self.client.get(url).send().await?).await?;
        Ok(map_attempt(body.assignment))
    }
}
