//! # Git CLI Ops
//!
//! Typed git CLI orchestration for branch synchronization.
//!
//! Git CLI Ops owns process execution, timeout control, output capture, and
//! error normalization for the `git` operations the branch-sync workflow
//! needs: branch queries, fetch, checkout, pull, merge, and push.
//!
//! The existence query is deliberately tri-state: "branch does not exist" is
//! a successful [`BranchExistence::Absent`] answer, never an error. Only a
//! genuine query failure surfaces as [`GitCliOpsError`].

mod command_runner;
mod error;
mod operations;
mod types;

pub use error::GitCliOpsError;
pub use operations::{
    branch_exists, checkout, checkout_new, current_branch, fetch, merge, pull, push,
};
pub use types::BranchExistence;
