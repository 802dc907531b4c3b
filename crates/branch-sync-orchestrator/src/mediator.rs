//! Review-request mediation.
//!
//! Idempotently ensures exactly one open review request proposes the target
//! branch into the shared integration branch. The whole path is
//! best-effort: an absent service is a normal environment variation, and
//! any query or creation failure is downgraded to a logged skip. Nothing in
//! this module can fail the surrounding run.

use crate::review_service::{
    NewReviewRequest, ReviewService, ReviewServiceAvailability,
};
use crate::INTEGRATION_BRANCH;
use serde::Serialize;
use tracing::{debug, info, warn};

/// What the mediation step ended up doing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "outcome")]
pub enum ReviewOutcome {
    Created { url: String },
    AlreadyExists { number: i64, state: String },
    ServiceUnavailable { reason: String },
}

/// Ensure an open review request exists for `target_branch` into the
/// integration branch, creating one only if none is open.
pub async fn ensure_review_request<R: ReviewService>(
    service: &R,
    target_branch: &str,
    source_branch: &str,
) -> ReviewOutcome {
    match service.availability().await {
        ReviewServiceAvailability::Unavailable { reason } => {
            info!(
                reason = %reason,
                "review service unavailable; create the review request manually if needed"
            );
            ReviewOutcome::ServiceUnavailable { reason }
        }
        ReviewServiceAvailability::Available => {
            debug!(head = target_branch, "checking for an open review request");
            match service.list_open_requests(target_branch).await {
                Err(err) => {
                    warn!(
                        error = %err,
                        "review request lookup failed; branch was synchronized, skipping review request"
                    );
                    ReviewOutcome::ServiceUnavailable {
                        reason: err.to_string(),
                    }
                }
                Ok(requests) => match requests.into_iter().find(|r| !r.state.trim().is_empty()) {
                    Some(existing) => {
                        info!(
                            number = existing.number,
                            state = %existing.state,
                            "review request already exists, not creating a duplicate"
                        );
                        ReviewOutcome::AlreadyExists {
                            number: existing.number,
                            state: existing.state,
                        }
                    }
                    None => create(service, target_branch, source_branch).await,
                },
            }
        }
    }
}

async fn create<R: ReviewService>(
    service: &R,
    target_branch: &str,
    source_branch: &str,
) -> ReviewOutcome {
    let request = NewReviewRequest {
        title: format!("Merge {target_branch} to {INTEGRATION_BRANCH}"),
        body: format!(
            "Automated review request from {source_branch} via branch sync\n\n\
             - Source branch: {source_branch}\n\
             - Target branch: {INTEGRATION_BRANCH}"
        ),
        base: INTEGRATION_BRANCH.to_string(),
        head: target_branch.to_string(),
    };

    match service.create_request(request).await {
        Ok(created) => {
            info!(url = %created.url, "review request created");
            ReviewOutcome::Created { url: created.url }
        }
        Err(err) => {
            warn!(
                error = %err,
                "review request creation failed; branch was synchronized, skipping review request"
            );
            ReviewOutcome::ServiceUnavailable {
                reason: err.to_string(),
            }
        }
    }
}
