//! Bridges the orchestrator seams to the `git` and `gh` CLIs.

use branch_sync_orchestrator::{
    BranchExistence, CreatedReviewRequest, NewReviewRequest, ReviewRequest, ReviewService,
    ReviewServiceAvailability, ReviewServiceError, WorkingCopy, WorkingCopyError,
};
use git_cli_ops::GitCliOpsError;
use std::path::PathBuf;
use tracing::debug;

/// The real working copy, backed by the git CLI.
pub struct GitWorkingCopy {
    repo: PathBuf,
}

impl GitWorkingCopy {
    pub fn new(repo: PathBuf) -> Self {
        Self { repo }
    }
}

impl WorkingCopy for GitWorkingCopy {
    async fn fetch(&mut self, remote: &str) -> Result<(), WorkingCopyError> {
        git_cli_ops::fetch(&self.repo, remote)
            .await
            .map_err(map_git_error)
    }

    async fn branch_exists(
        &mut self,
        remote: &str,
        branch: &str,
    ) -> Result<BranchExistence, WorkingCopyError> {
        let existence = git_cli_ops::branch_exists(&self.repo, remote, branch)
            .await
            .map_err(map_git_error)?;
        Ok(match existence {
            git_cli_ops::BranchExistence::Exists => BranchExistence::Exists,
            git_cli_ops::BranchExistence::Absent => BranchExistence::Absent,
        })
    }

    async fn checkout(&mut self, branch: &str) -> Result<(), WorkingCopyError> {
        git_cli_ops::checkout(&self.repo, branch)
            .await
            .map_err(map_git_error)
    }

    async fn checkout_new(&mut self, branch: &str) -> Result<(), WorkingCopyError> {
        git_cli_ops::checkout_new(&self.repo, branch)
            .await
            .map_err(map_git_error)
    }

    async fn pull(&mut self, remote: &str, branch: &str) -> Result<(), WorkingCopyError> {
        git_cli_ops::pull(&self.repo, remote, branch)
            .await
            .map_err(map_git_error)
    }

    async fn merge(&mut self, branch: &str) -> Result<(), WorkingCopyError> {
        git_cli_ops::merge(&self.repo, branch)
            .await
            .map_err(map_git_error)
    }

    async fn push(&mut self, remote: &str, branch: &str) -> Result<(), WorkingCopyError> {
        git_cli_ops::push(&self.repo, remote, branch)
            .await
            .map_err(map_git_error)
    }
}

fn map_git_error(err: GitCliOpsError) -> WorkingCopyError {
    match &err {
        GitCliOpsError::MergeConflict { .. } => WorkingCopyError::conflict(err.to_string()),
        GitCliOpsError::PushRejected { .. } => WorkingCopyError::rejected(err.to_string()),
        _ => WorkingCopyError::other(err.to_string()),
    }
}

/// The real review service, backed by the GitHub CLI.
pub struct GhReviewService {
    repo: PathBuf,
}

impl GhReviewService {
    pub fn new(repo: PathBuf) -> Self {
        Self { repo }
    }
}

impl ReviewService for GhReviewService {
    async fn availability(&self) -> ReviewServiceAvailability {
        match gh_cli_ops::probe_availability().await {
            gh_cli_ops::ReviewServiceAvailability::Available { version } => {
                debug!(version = %version, "GitHub CLI available");
                ReviewServiceAvailability::Available
            }
            gh_cli_ops::ReviewServiceAvailability::Unavailable { reason } => {
                ReviewServiceAvailability::Unavailable { reason }
            }
        }
    }

    async fn list_open_requests(
        &self,
        head_branch: &str,
    ) -> Result<Vec<ReviewRequest>, ReviewServiceError> {
        let requests = gh_cli_ops::list_open_requests(&self.repo, head_branch)
            .await
            .map_err(|err| ReviewServiceError::new(err.to_string()))?;

        Ok(requests
            .into_iter()
            .map(|pr| ReviewRequest {
                number: pr.number,
                state: pr.state,
                url: pr.url,
            })
            .collect())
    }

    async fn create_request(
        &self,
        request: NewReviewRequest,
    ) -> Result<CreatedReviewRequest, ReviewServiceError> {
        let created = gh_cli_ops::create_request(
            &self.repo,
            gh_cli_ops::CreateRequestInput {
                title: request.title,
                body: Some(request.body),
                base: request.base,
                head: request.head,
            },
        )
        .await
        .map_err(|err| ReviewServiceError::new(err.to_string()))?;

        Ok(CreatedReviewRequest { url: created.url })
    }
}
