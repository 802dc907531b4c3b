//! # Branch Sync Orchestrator
//!
//! The branch-synchronization decision procedure: resolve the target test
//! branch from the current feature branch, decide create-vs-merge from an
//! explicit existence check, execute the ordered remote steps, idempotently
//! ensure a review request, and restore the original working state.
//!
//! The crate is pure orchestration. All side effects go through two seams —
//! [`WorkingCopy`] for the VCS working copy and [`ReviewService`] for the
//! review-request service — so the whole state machine is testable against
//! fakes. The binary crate binds the seams to the `git` and `gh` CLIs.

mod mediator;
mod orchestrator;
mod resolver;
mod review_service;
mod working_copy;

pub use mediator::{ensure_review_request, ReviewOutcome};
pub use orchestrator::{
    run, Stage, SyncAction, SyncError, SyncReport, DEFAULT_REMOTE, INTEGRATION_BRANCH,
};
pub use resolver::{resolve, InvalidSourceBranch, SyncPlan, FEATURE_PREFIX, TEST_PREFIX};
pub use review_service::{
    CreatedReviewRequest, NewReviewRequest, ReviewRequest, ReviewService,
    ReviewServiceAvailability, ReviewServiceError,
};
pub use working_copy::{BranchExistence, WorkingCopy, WorkingCopyError, WorkingCopyErrorKind};
