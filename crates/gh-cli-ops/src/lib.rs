//! # GH CLI Ops
//!
//! Typed GitHub CLI orchestration for branch synchronization.
//!
//! GH CLI Ops owns process execution, timeout control, output parsing, and
//! error normalization for the `gh` pull-request surface the sync workflow
//! consumes: an availability probe, open-PR listing by head branch, and PR
//! creation.
//!
//! Availability is a first-class fact: [`probe_availability`] reports
//! whether the `gh` binary is present and runnable, so callers never have to
//! infer absence from a failed invocation.

mod command_runner;
mod error;
mod operations;
mod types;

pub use error::GhCliOpsError;
pub use operations::{create_request, list_open_requests, probe_availability};
pub use types::{
    CreateRequestInput, CreatedRequest, PullRequestSummary, ReviewServiceAvailability,
};
