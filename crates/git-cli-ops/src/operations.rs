use crate::command_runner::GitCommandRunner;
use crate::types::BranchExistence;
use crate::GitCliOpsError;
use std::path::Path;
use tracing::debug;

const TIMEOUT_LOCAL_SECS: u64 = 30;
const TIMEOUT_REMOTE_SECS: u64 = 120;

/// Name of the branch the working copy currently has checked out.
pub async fn current_branch(repo: &Path) -> Result<String, GitCliOpsError> {
    let runner = GitCommandRunner::new();

    let output = runner
        .run(
            &args(&["rev-parse", "--abbrev-ref", "HEAD"]),
            repo,
            TIMEOUT_LOCAL_SECS,
        )
        .await?;

    let branch = output.stdout.trim().to_string();
    if branch.is_empty() {
        return Err(GitCliOpsError::ParseError {
            message: "git rev-parse returned an empty branch name".to_string(),
        });
    }

    Ok(branch)
}

/// Fetch refs from the named remote.
pub async fn fetch(repo: &Path, remote: &str) -> Result<(), GitCliOpsError> {
    let runner = GitCommandRunner::new();
    runner
        .run(&args(&["fetch", remote]), repo, TIMEOUT_REMOTE_SECS)
        .await?;
    Ok(())
}

/// Tri-state existence query: does `branch` exist as a local ref or as a
/// remote-tracking ref under `remote`?
///
/// `git show-ref --verify` exits 1 when the ref is missing; that is the
/// `Absent` answer, not a failure. Any other non-zero exit is a genuine
/// query error.
pub async fn branch_exists(
    repo: &Path,
    remote: &str,
    branch: &str,
) -> Result<BranchExistence, GitCliOpsError> {
    let local_ref = format!("refs/heads/{branch}");
    match probe_ref(repo, &local_ref).await? {
        BranchExistence::Exists => return Ok(BranchExistence::Exists),
        BranchExistence::Absent => {}
    }

    let remote_ref = format!("refs/remotes/{remote}/{branch}");
    probe_ref(repo, &remote_ref).await
}

async fn probe_ref(repo: &Path, full_ref: &str) -> Result<BranchExistence, GitCliOpsError> {
    let runner = GitCommandRunner::new();
    let probe = runner
        .run_unchecked(
            &args(&["show-ref", "--verify", "--quiet", full_ref]),
            repo,
            TIMEOUT_LOCAL_SECS,
        )
        .await?;

    match probe.exit_code {
        Some(0) => Ok(BranchExistence::Exists),
        Some(1) => {
            debug!(r#ref = full_ref, "ref not found");
            Ok(BranchExistence::Absent)
        }
        other => Err(crate::command_runner::classify_failed_command(
            other,
            &probe.stdout,
            &probe.stderr,
        )),
    }
}

/// Check out an existing branch.
pub async fn checkout(repo: &Path, branch: &str) -> Result<(), GitCliOpsError> {
    let runner = GitCommandRunner::new();
    runner
        .run(&args(&["checkout", branch]), repo, TIMEOUT_LOCAL_SECS)
        .await?;
    Ok(())
}

/// Create and check out a new branch from the current HEAD.
pub async fn checkout_new(repo: &Path, branch: &str) -> Result<(), GitCliOpsError> {
    let runner = GitCommandRunner::new();
    runner
        .run(&args(&["checkout", "-b", branch]), repo, TIMEOUT_LOCAL_SECS)
        .await?;
    Ok(())
}

/// Pull `branch` from the named remote into the checked-out branch.
pub async fn pull(repo: &Path, remote: &str, branch: &str) -> Result<(), GitCliOpsError> {
    let runner = GitCommandRunner::new();
    runner
        .run(&args(&["pull", remote, branch]), repo, TIMEOUT_REMOTE_SECS)
        .await?;
    Ok(())
}

/// Merge `branch` into the checked-out branch.
///
/// A conflicted merge surfaces as [`GitCliOpsError::MergeConflict`] and
/// leaves the working copy in the conflicted state; this crate never aborts
/// a partial merge on the caller's behalf.
pub async fn merge(repo: &Path, branch: &str) -> Result<(), GitCliOpsError> {
    let runner = GitCommandRunner::new();
    runner
        .run(&args(&["merge", branch]), repo, TIMEOUT_LOCAL_SECS)
        .await?;
    Ok(())
}

/// Push `branch` to the named remote.
pub async fn push(repo: &Path, remote: &str, branch: &str) -> Result<(), GitCliOpsError> {
    let runner = GitCommandRunner::new();
    runner
        .run(&args(&["push", remote, branch]), repo, TIMEOUT_REMOTE_SECS)
        .await?;
    Ok(())
}

fn args(parts: &[&str]) -> Vec<String> {
    parts.iter().map(|p| p.to_string()).collect()
}
