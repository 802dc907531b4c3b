//! Target-branch resolution.
//!
//! Pure, deterministic, no I/O: derives the test branch name from the
//! current feature branch and validates the precondition that the run
//! starts on a feature branch that is not itself a test branch. Branch
//! names are used verbatim; no trimming or case folding, mirroring how git
//! reports the current branch.

use serde::Serialize;
use thiserror::Error;

/// Prefix every source branch must carry.
pub const FEATURE_PREFIX: &str = "feature/";
/// Prefix of the derived test branches; a source branch must not already
/// carry it.
pub const TEST_PREFIX: &str = "feature/test/";

/// Validated (current, target) branch pair for one sync run.
///
/// Created once per run and never mutated. The create-vs-merge decision is
/// taken later by the orchestrator, after it has observed whether the
/// target exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SyncPlan {
    pub current_branch: String,
    pub target_branch: String,
}

/// Precondition violations of the source branch. Non-retryable; the whole
/// run terminates before any mutation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidSourceBranch {
    #[error("'{0}' is not a feature branch (expected feature/<name>)")]
    NotAFeatureBranch(String),

    #[error("'{0}' is already a test branch")]
    AlreadyTestBranch(String),

    #[error("'{0}' has no name after the feature/ prefix")]
    MissingName(String),
}

/// Derive the target test branch for `current_branch`.
///
/// The target is `feature/test/` followed by every segment of the current
/// branch after the leading `feature` segment, joined by `/`:
/// `feature/payments/v2` resolves to `feature/test/payments/v2`.
pub fn resolve(current_branch: &str) -> Result<SyncPlan, InvalidSourceBranch> {
    if current_branch.starts_with(TEST_PREFIX) {
        return Err(InvalidSourceBranch::AlreadyTestBranch(
            current_branch.to_string(),
        ));
    }
    if !current_branch.starts_with(FEATURE_PREFIX) {
        return Err(InvalidSourceBranch::NotAFeatureBranch(
            current_branch.to_string(),
        ));
    }

    let segments: Vec<&str> = current_branch.split('/').collect();
    let rest = segments[1..].join("/");
    if rest.is_empty() {
        return Err(InvalidSourceBranch::MissingName(current_branch.to_string()));
    }

    Ok(SyncPlan {
        current_branch: current_branch.to_string(),
        target_branch: format!("{TEST_PREFIX}{rest}"),
    })
}
