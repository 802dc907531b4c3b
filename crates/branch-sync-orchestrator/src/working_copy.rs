//! The working-copy seam.
//!
//! The VCS working copy's "current branch" is shared mutable state read and
//! mutated throughout a run, so it is modeled as an explicit handle passed
//! to every step: checkout is a state-transition method, not a hidden side
//! effect, and tests substitute a fake handle.

use serde::Serialize;
use thiserror::Error;

/// Answer of a branch-existence query.
///
/// `Absent` is a valid, successful answer; a query that could not be
/// executed fails with [`WorkingCopyError`] instead. "Not found" never
/// travels as an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BranchExistence {
    Exists,
    Absent,
}

/// Failure of a single working-copy operation, classified just enough for
/// the orchestrator to tell conflicts and rejected pushes apart from
/// everything else.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkingCopyErrorKind {
    MergeConflict,
    PushRejected,
    Other,
}

#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct WorkingCopyError {
    pub kind: WorkingCopyErrorKind,
    pub message: String,
}

impl WorkingCopyError {
    pub fn conflict(message: impl Into<String>) -> Self {
        Self {
            kind: WorkingCopyErrorKind::MergeConflict,
            message: message.into(),
        }
    }

    pub fn rejected(message: impl Into<String>) -> Self {
        Self {
            kind: WorkingCopyErrorKind::PushRejected,
            message: message.into(),
        }
    }

    pub fn other(message: impl Into<String>) -> Self {
        Self {
            kind: WorkingCopyErrorKind::Other,
            message: message.into(),
        }
    }

    pub fn is_conflict(&self) -> bool {
        self.kind == WorkingCopyErrorKind::MergeConflict
    }
}

/// Handle to the single working copy a run operates on.
///
/// All operations are strictly sequential; the handle is exclusively
/// borrowed for the duration of the run, so no two orchestrations can share
/// a working copy.
#[allow(async_fn_in_trait)]
pub trait WorkingCopy {
    /// Fetch refs from the named remote.
    async fn fetch(&mut self, remote: &str) -> Result<(), WorkingCopyError>;

    /// Does `branch` exist locally or as a remote-tracking ref?
    async fn branch_exists(
        &mut self,
        remote: &str,
        branch: &str,
    ) -> Result<BranchExistence, WorkingCopyError>;

    /// Check out an existing branch.
    async fn checkout(&mut self, branch: &str) -> Result<(), WorkingCopyError>;

    /// Create `branch` from the current HEAD and check it out.
    async fn checkout_new(&mut self, branch: &str) -> Result<(), WorkingCopyError>;

    /// Pull `branch` from the named remote into the checked-out branch.
    async fn pull(&mut self, remote: &str, branch: &str) -> Result<(), WorkingCopyError>;

    /// Merge `branch` into the checked-out branch. A conflicted merge fails
    /// with a [`WorkingCopyErrorKind::MergeConflict`] error and leaves the
    /// working copy conflicted; the orchestrator never aborts the merge.
    async fn merge(&mut self, branch: &str) -> Result<(), WorkingCopyError>;

    /// Push `branch` to the named remote.
    async fn push(&mut self, remote: &str, branch: &str) -> Result<(), WorkingCopyError>;
}
