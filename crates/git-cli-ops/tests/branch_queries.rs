mod common;

use common::TestRepo;
use git_cli_ops::{branch_exists, current_branch, BranchExistence, GitCliOpsError};
use std::path::Path;

#[tokio::test]
async fn current_branch_reports_checked_out_branch() {
    let repo = TestRepo::new();

    repo.create_branch("feature/login");
    repo.checkout("feature/login");

    let branch = current_branch(&repo.path).await.expect("current_branch");
    assert_eq!(branch, "feature/login");
}

#[tokio::test]
async fn missing_branch_is_absent_not_an_error() {
    let repo = TestRepo::new();

    let existence = branch_exists(&repo.path, "origin", "feature/test/login")
        .await
        .expect("branch_exists");
    assert_eq!(existence, BranchExistence::Absent);
}

#[tokio::test]
async fn local_branch_is_found() {
    let repo = TestRepo::new();
    repo.create_branch("feature/test/login");

    let existence = branch_exists(&repo.path, "origin", "feature/test/login")
        .await
        .expect("branch_exists");
    assert_eq!(existence, BranchExistence::Exists);
}

#[tokio::test]
async fn remote_tracking_branch_is_found() {
    let repo = TestRepo::new();
    let _remote = repo.add_bare_origin();

    repo.create_branch("feature/test/payments");
    repo.push_to_origin("feature/test/payments");
    repo.fetch_origin();
    repo.delete_branch("feature/test/payments");

    let existence = branch_exists(&repo.path, "origin", "feature/test/payments")
        .await
        .expect("branch_exists");
    assert_eq!(
        existence,
        BranchExistence::Exists,
        "remote-tracking ref alone should count as existing"
    );
}

#[tokio::test]
async fn non_repo_path_is_a_query_error() {
    let dir = tempfile::TempDir::new().expect("temp dir");

    let result = branch_exists(dir.path(), "origin", "feature/test/login").await;
    assert!(
        matches!(result, Err(GitCliOpsError::NotARepository { .. })),
        "expected NotARepository, got {result:?}"
    );
}

#[tokio::test]
async fn nonexistent_working_dir_fails_to_spawn() {
    let result = current_branch(Path::new("/nonexistent/path")).await;
    assert!(result.is_err());
}
