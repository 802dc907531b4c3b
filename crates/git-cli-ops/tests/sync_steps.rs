mod common;

use common::TestRepo;
use git_cli_ops::{
    checkout, checkout_new, current_branch, fetch, merge, pull, push, GitCliOpsError,
};

#[tokio::test]
async fn checkout_new_branches_from_current_head() {
    let repo = TestRepo::new();

    checkout_new(&repo.path, "feature/test/login")
        .await
        .expect("checkout -b");

    let branch = current_branch(&repo.path).await.expect("current_branch");
    assert_eq!(branch, "feature/test/login");
}

#[tokio::test]
async fn checkout_switches_between_existing_branches() {
    let repo = TestRepo::new();
    let original = current_branch(&repo.path).await.expect("current_branch");

    checkout_new(&repo.path, "feature/login")
        .await
        .expect("checkout -b");
    checkout(&repo.path, &original).await.expect("checkout");

    let branch = current_branch(&repo.path).await.expect("current_branch");
    assert_eq!(branch, original);
}

#[tokio::test]
async fn fast_forward_merge_succeeds() {
    let repo = TestRepo::new();

    checkout_new(&repo.path, "feature/login")
        .await
        .expect("checkout -b feature");
    checkout_new(&repo.path, "feature/test/login")
        .await
        .expect("checkout -b target");

    // Advance the source branch past the target.
    checkout(&repo.path, "feature/login")
        .await
        .expect("checkout source");
    repo.write_file("login.rs", "fn login() {}\n");
    repo.commit_all("Add login");

    checkout(&repo.path, "feature/test/login")
        .await
        .expect("checkout target");
    merge(&repo.path, "feature/login").await.expect("merge");

    let branch = current_branch(&repo.path).await.expect("current_branch");
    assert_eq!(branch, "feature/test/login");
}

#[tokio::test]
async fn conflicting_merge_reports_merge_conflict() {
    let repo = TestRepo::new();
    let base = current_branch(&repo.path).await.expect("current_branch");

    checkout_new(&repo.path, "feature/login")
        .await
        .expect("checkout -b feature");
    repo.write_file("config.txt", "from feature\n");
    repo.commit_all("Feature change");

    checkout(&repo.path, &base).await.expect("checkout base");
    checkout_new(&repo.path, "feature/test/login")
        .await
        .expect("checkout -b target");
    repo.write_file("config.txt", "from target\n");
    repo.commit_all("Target change");

    let result = merge(&repo.path, "feature/login").await;
    assert!(
        matches!(result, Err(GitCliOpsError::MergeConflict { .. })),
        "expected MergeConflict, got {result:?}"
    );

    // The conflicted working copy stays on the target branch.
    let branch = current_branch(&repo.path).await.expect("current_branch");
    assert_eq!(branch, "feature/test/login");
}

#[tokio::test]
async fn push_publishes_branch_to_origin() {
    let repo = TestRepo::new();
    let remote_dir = repo.add_bare_origin();

    checkout_new(&repo.path, "feature/test/login")
        .await
        .expect("checkout -b");
    push(&repo.path, "origin", "feature/test/login")
        .await
        .expect("push");

    let bare = git2::Repository::open(remote_dir.path()).expect("open bare repo");
    assert!(
        bare.find_reference("refs/heads/feature/test/login").is_ok(),
        "pushed branch should exist on origin"
    );
}

#[tokio::test]
async fn fetch_and_pull_from_origin_succeed() {
    let repo = TestRepo::new();
    let _remote_dir = repo.add_bare_origin();
    let branch = current_branch(&repo.path).await.expect("current_branch");

    repo.push_to_origin(&branch);

    fetch(&repo.path, "origin").await.expect("fetch");
    pull(&repo.path, "origin", &branch).await.expect("pull");
}

#[tokio::test]
async fn fetch_without_remote_fails() {
    let repo = TestRepo::new();

    let result = fetch(&repo.path, "origin").await;
    assert!(result.is_err(), "fetch with no origin should fail");
}
