use thiserror::Error;

/// Error taxonomy for git CLI orchestration.
#[derive(Debug, Error)]
pub enum GitCliOpsError {
    #[error("git is not installed")]
    GitNotInstalled,

    #[error("Not a git repository: {message}")]
    NotARepository { message: String },

    #[error("Merge conflict: {message}")]
    MergeConflict { message: String },

    #[error("Push rejected by remote: {message}")]
    PushRejected { message: String },

    #[error("git command failed: {message}")]
    CommandFailed {
        message: String,
        exit_code: Option<i32>,
        stderr: String,
        stdout: String,
    },

    #[error("git command timed out after {timeout_secs}s: {command}")]
    Timeout { command: String, timeout_secs: u64 },

    #[error("Failed to parse git output: {message}")]
    ParseError { message: String },
}

impl GitCliOpsError {
    /// Stable machine-readable error code for logs and callers.
    pub fn code(&self) -> &'static str {
        match self {
            Self::GitNotInstalled => "git_not_installed",
            Self::NotARepository { .. } => "not_a_repository",
            Self::MergeConflict { .. } => "merge_conflict",
            Self::PushRejected { .. } => "push_rejected",
            Self::CommandFailed { .. } => "command_failed",
            Self::Timeout { .. } => "timeout",
            Self::ParseError { .. } => "parse_error",
        }
    }
}
