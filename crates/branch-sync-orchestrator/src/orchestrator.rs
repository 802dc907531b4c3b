//! The sync state machine.
//!
//! Stage order: fetch → existence check → merge-or-create → push → review
//! mediation → restoration. Every stage is a distinct failure class; only
//! the review step is best-effort. Restoration back to the original branch
//! runs unconditionally after a successful push, and best-effort as a
//! cleanup once HEAD may have moved; a cleanup failure is logged as
//! secondary information and never masks the primary stage error.

use crate::mediator::{ensure_review_request, ReviewOutcome};
use crate::resolver::{InvalidSourceBranch, SyncPlan};
use crate::review_service::ReviewService;
use crate::working_copy::{BranchExistence, WorkingCopy, WorkingCopyError};
use serde::Serialize;
use thiserror::Error;
use tracing::{info, warn};

/// The sole remote all operations address.
pub const DEFAULT_REMOTE: &str = "origin";
/// The shared integration branch review requests target.
pub const INTEGRATION_BRANCH: &str = "test";

/// Which path the orchestrator took after the existence check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncAction {
    Create,
    Merge,
}

/// Named step of the run; each fatal error is classified by the stage that
/// raised it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Resolve,
    Fetch,
    ExistenceCheck,
    Checkout,
    Pull,
    Merge,
    CreateBranch,
    Push,
    Restore,
}

/// Result of a successful run.
#[derive(Debug, Clone, Serialize)]
pub struct SyncReport {
    pub current_branch: String,
    pub target_branch: String,
    pub action: SyncAction,
    pub review: ReviewOutcome,
}

/// Fatal failure of a run, classified by stage. The review path never
/// appears here; it cannot fail the run.
#[derive(Debug, Error)]
pub enum SyncError {
    #[error("invalid source branch: {0}")]
    InvalidSourceBranch(#[from] InvalidSourceBranch),

    #[error("fetch from '{remote}' failed: {source}")]
    FetchFailed {
        remote: String,
        source: WorkingCopyError,
    },

    #[error("existence check for '{branch}' failed: {source}")]
    ExistenceCheckFailed {
        branch: String,
        source: WorkingCopyError,
    },

    #[error("checkout of '{branch}' failed: {source}")]
    CheckoutFailed {
        branch: String,
        source: WorkingCopyError,
    },

    #[error("pull of '{branch}' from '{remote}' failed: {source}")]
    PullFailed {
        branch: String,
        remote: String,
        source: WorkingCopyError,
    },

    #[error(
        "merging '{branch}' hit conflicts; the working copy is left on the target branch for manual resolution: {source}"
    )]
    MergeConflict {
        branch: String,
        source: WorkingCopyError,
    },

    #[error("merge of '{branch}' failed: {source}")]
    MergeFailed {
        branch: String,
        source: WorkingCopyError,
    },

    #[error("creation of branch '{branch}' failed: {source}")]
    BranchCreateFailed {
        branch: String,
        source: WorkingCopyError,
    },

    #[error("push of '{branch}' to '{remote}' failed: {source}")]
    PushFailed {
        branch: String,
        remote: String,
        source: WorkingCopyError,
    },

    #[error("restoration checkout of '{branch}' failed; the working copy needs a manual checkout: {source}")]
    RestorationFailed {
        branch: String,
        source: WorkingCopyError,
    },
}

impl SyncError {
    /// The stage this error was raised in.
    pub fn stage(&self) -> Stage {
        match self {
            Self::InvalidSourceBranch(_) => Stage::Resolve,
            Self::FetchFailed { .. } => Stage::Fetch,
            Self::ExistenceCheckFailed { .. } => Stage::ExistenceCheck,
            Self::CheckoutFailed { .. } => Stage::Checkout,
            Self::PullFailed { .. } => Stage::Pull,
            Self::MergeConflict { .. } | Self::MergeFailed { .. } => Stage::Merge,
            Self::BranchCreateFailed { .. } => Stage::CreateBranch,
            Self::PushFailed { .. } => Stage::Push,
            Self::RestorationFailed { .. } => Stage::Restore,
        }
    }
}

/// Run the synchronization for an already-resolved plan.
///
/// Strictly sequential; the exclusive borrow of the working copy is the
/// process-wide lock on it for the duration of the run.
pub async fn run<W: WorkingCopy, R: ReviewService>(
    working_copy: &mut W,
    review_service: &R,
    plan: &SyncPlan,
) -> Result<SyncReport, SyncError> {
    info!(
        current = %plan.current_branch,
        target = %plan.target_branch,
        "starting branch sync"
    );

    // Any fatal stage failure triggers a best-effort restoration before
    // propagating; the primary error is reported either way.
    let action = match sync_branches(working_copy, plan).await {
        Ok(action) => action,
        Err(err) => {
            restore_best_effort(working_copy, &plan.current_branch, &err).await;
            return Err(err);
        }
    };

    let review = ensure_review_request(review_service, &plan.target_branch, &plan.current_branch)
        .await;

    info!(branch = %plan.current_branch, "restoring original branch");
    working_copy
        .checkout(&plan.current_branch)
        .await
        .map_err(|source| SyncError::RestorationFailed {
            branch: plan.current_branch.clone(),
            source,
        })?;

    info!(
        target = %plan.target_branch,
        action = ?action,
        "branch sync complete"
    );

    Ok(SyncReport {
        current_branch: plan.current_branch.clone(),
        target_branch: plan.target_branch.clone(),
        action,
        review,
    })
}

/// Fetch, existence check, the mutually exclusive branch action, and the
/// push.
async fn sync_branches<W: WorkingCopy>(
    working_copy: &mut W,
    plan: &SyncPlan,
) -> Result<SyncAction, SyncError> {
    info!(remote = DEFAULT_REMOTE, "fetching remote refs");
    working_copy
        .fetch(DEFAULT_REMOTE)
        .await
        .map_err(|source| SyncError::FetchFailed {
            remote: DEFAULT_REMOTE.to_string(),
            source,
        })?;

    let existence = working_copy
        .branch_exists(DEFAULT_REMOTE, &plan.target_branch)
        .await
        .map_err(|source| SyncError::ExistenceCheckFailed {
            branch: plan.target_branch.clone(),
            source,
        })?;

    let action = match existence {
        BranchExistence::Exists => SyncAction::Merge,
        BranchExistence::Absent => SyncAction::Create,
    };

    match action {
        SyncAction::Merge => {
            info!(target = %plan.target_branch, "target exists, merging into it");

            working_copy
                .checkout(&plan.target_branch)
                .await
                .map_err(|source| SyncError::CheckoutFailed {
                    branch: plan.target_branch.clone(),
                    source,
                })?;

            working_copy
                .pull(DEFAULT_REMOTE, &plan.target_branch)
                .await
                .map_err(|source| SyncError::PullFailed {
                    branch: plan.target_branch.clone(),
                    remote: DEFAULT_REMOTE.to_string(),
                    source,
                })?;

            working_copy
                .merge(&plan.current_branch)
                .await
                .map_err(|source| {
                    if source.is_conflict() {
                        SyncError::MergeConflict {
                            branch: plan.current_branch.clone(),
                            source,
                        }
                    } else {
                        SyncError::MergeFailed {
                            branch: plan.current_branch.clone(),
                            source,
                        }
                    }
                })?;
        }
        SyncAction::Create => {
            info!(target = %plan.target_branch, "target absent, creating it from current HEAD");

            working_copy
                .checkout_new(&plan.target_branch)
                .await
                .map_err(|source| SyncError::BranchCreateFailed {
                    branch: plan.target_branch.clone(),
                    source,
                })?;
        }
    }

    info!(branch = %plan.target_branch, remote = DEFAULT_REMOTE, "pushing target branch");
    working_copy
        .push(DEFAULT_REMOTE, &plan.target_branch)
        .await
        .map_err(|source| SyncError::PushFailed {
            branch: plan.target_branch.clone(),
            remote: DEFAULT_REMOTE.to_string(),
            source,
        })?;

    Ok(action)
}

/// Compensating action after a fatal stage failure: try to put the working
/// copy back on the original branch. The primary error is reported either
/// way; a failed restoration is secondary information only.
async fn restore_best_effort<W: WorkingCopy>(
    working_copy: &mut W,
    original_branch: &str,
    primary: &SyncError,
) {
    if let Err(restore_err) = working_copy.checkout(original_branch).await {
        warn!(
            branch = original_branch,
            error = %restore_err,
            primary = %primary,
            "restoration to the original branch also failed; a manual checkout is needed"
        );
    }
}
