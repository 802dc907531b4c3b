//! The review-service seam.

use serde::Serialize;
use thiserror::Error;

/// Whether the review service is reachable at all, probed once per run and
/// injected; absence is a configuration fact, not a caught exception.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "status")]
pub enum ReviewServiceAvailability {
    Available,
    Unavailable { reason: String },
}

/// One open review request as reported by the service.
#[derive(Debug, Clone, Serialize)]
pub struct ReviewRequest {
    pub number: i64,
    /// Raw state string; any non-empty state counts as an existing request.
    pub state: String,
    pub url: String,
}

/// Payload for creating a review request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewReviewRequest {
    pub title: String,
    pub body: String,
    pub base: String,
    pub head: String,
}

/// Acknowledgement of a freshly created review request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreatedReviewRequest {
    pub url: String,
}

#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct ReviewServiceError {
    pub message: String,
}

impl ReviewServiceError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Client surface of the review service. Every failure behind this seam is
/// downgraded by the mediator; nothing here can fail the run.
#[allow(async_fn_in_trait)]
pub trait ReviewService {
    async fn availability(&self) -> ReviewServiceAvailability;

    /// List open review requests whose source (head) is `head_branch`.
    async fn list_open_requests(
        &self,
        head_branch: &str,
    ) -> Result<Vec<ReviewRequest>, ReviewServiceError>;

    async fn create_request(
        &self,
        request: NewReviewRequest,
    ) -> Result<CreatedReviewRequest, ReviewServiceError>;
}
