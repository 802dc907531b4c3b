#![allow(dead_code)]

use git2::{BranchType, IndexAddOption, Repository, Signature};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

const IDENTITY: (&str, &str) = ("Sync Tester", "sync-tester@example.com");

/// A throwaway git repository for exercising the CLI operations.
///
/// Holds its temp directory alive for the duration of the test. Every
/// fixture starts from one committed `README.md` on git's default init
/// branch, with a repo-local identity so merge commits work without any
/// global config.
pub struct TestRepo {
    _dir: TempDir,
    pub path: PathBuf,
}

impl TestRepo {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().to_path_buf();

        let repo = Repository::init(&path).expect("init repo");
        let mut config = repo.config().expect("open config");
        config.set_str("user.name", IDENTITY.0).expect("user.name");
        config.set_str("user.email", IDENTITY.1).expect("user.email");
        drop(repo);

        let this = Self { _dir: dir, path };
        this.write_file("README.md", "# fixture\n");
        this.commit_all("Initial commit");
        this
    }

    pub fn write_file(&self, name: &str, content: &str) {
        let file_path = self.path.join(name);
        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent).expect("create parent dirs");
        }
        fs::write(&file_path, content).expect("write file");
    }

    /// Stage everything and commit. Handles the root commit too, so the
    /// initial fixture commit and test commits share one code path.
    pub fn commit_all(&self, message: &str) {
        let repo = self.open();
        let mut index = repo.index().expect("index");
        index
            .add_all(["*"].iter(), IndexAddOption::DEFAULT, None)
            .expect("stage all");
        index.write().expect("write index");

        let tree_id = index.write_tree().expect("write tree");
        let tree = repo.find_tree(tree_id).expect("find tree");
        let sig = Signature::now(IDENTITY.0, IDENTITY.1).expect("signature");

        let parent = repo
            .head()
            .ok()
            .and_then(|head| head.peel_to_commit().ok());
        let parents: Vec<&git2::Commit> = parent.iter().collect();

        repo.commit(Some("HEAD"), &sig, &sig, message, &tree, &parents)
            .expect("commit");
    }

    /// Create a local branch at the current HEAD without checking it out.
    pub fn create_branch(&self, name: &str) {
        let repo = self.open();
        let commit = repo
            .head()
            .and_then(|head| head.peel_to_commit())
            .expect("head commit");
        repo.branch(name, &commit, false).expect("create branch");
    }

    /// Check out an existing local branch.
    pub fn checkout(&self, name: &str) {
        let repo = self.open();
        repo.set_head(&format!("refs/heads/{name}")).expect("set head");
        repo.checkout_head(Some(git2::build::CheckoutBuilder::default().force()))
            .expect("checkout head");
    }

    /// Create a bare repository and register it as `origin`.
    /// Returns the TempDir holding the bare repo.
    pub fn add_bare_origin(&self) -> TempDir {
        let remote_dir = TempDir::new().expect("temp dir");
        Repository::init_bare(remote_dir.path()).expect("init bare repo");

        let url = remote_dir.path().to_str().expect("bare path").to_string();
        self.open().remote("origin", &url).expect("add remote");

        remote_dir
    }

    /// Push a local branch to `origin`.
    pub fn push_to_origin(&self, branch: &str) {
        let repo = self.open();
        let mut remote = repo.find_remote("origin").expect("find origin");
        let refspec = format!("refs/heads/{branch}:refs/heads/{branch}");
        remote.push(&[refspec.as_str()], None).expect("push branch");
    }

    /// Fetch all branch refs from `origin` into remote-tracking refs.
    pub fn fetch_origin(&self) {
        let repo = self.open();
        let mut remote = repo.find_remote("origin").expect("find origin");
        remote
            .fetch(&["+refs/heads/*:refs/remotes/origin/*"], None, None)
            .expect("fetch origin");
    }

    /// Delete a local branch ref, keeping any remote-tracking counterpart.
    pub fn delete_branch(&self, name: &str) {
        let repo = self.open();
        let mut branch = repo
            .find_branch(name, BranchType::Local)
            .expect("find branch");
        branch.delete().expect("delete branch");
    }

    fn open(&self) -> Repository {
        Repository::open(&self.path).expect("open repo")
    }
}
