use std::process::Output;
use thiserror::Error;

/// Error taxonomy for GitHub CLI orchestration.
#[derive(Debug, Error)]
pub enum GhCliOpsError {
    #[error("GitHub CLI is not installed")]
    GhNotInstalled,

    #[error("GitHub CLI is not authenticated: {message}")]
    GhNotAuthenticated { message: String },

    #[error("Invalid repository context: {message}")]
    InvalidRepository { message: String },

    #[error("GitHub CLI command failed: {message}")]
    CommandFailed {
        message: String,
        exit_code: Option<i32>,
        stderr: String,
        stdout: String,
    },

    #[error("GitHub CLI command timed out after {timeout_secs}s: {command}")]
    Timeout { command: String, timeout_secs: u64 },

    #[error("Failed to parse GitHub CLI output: {message}")]
    ParseError { message: String },
}

// The gh CLI reports every failure mode through free-text stderr, so the
// taxonomy is recovered by pattern sets rather than exit codes.
const AUTH_PATTERNS: &[&str] = &["not logged into", "authentication", "gh auth login"];
const REPO_PATTERNS: &[&str] = &[
    "not a git repository",
    "no git remotes",
    "unable to find git repository",
    "could not determine base repository",
];

impl GhCliOpsError {
    /// Classify a finished gh invocation that exited non-zero.
    pub(crate) fn from_failed_invocation(output: &Output) -> Self {
        let stdout = String::from_utf8_lossy(&output.stdout).trim().to_string();
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        let exit_code = output.status.code();
        let haystack = format!("{stderr}\n{stdout}").to_ascii_lowercase();

        if matches_any(&haystack, AUTH_PATTERNS) {
            return Self::GhNotAuthenticated {
                message: first_line_or(&stderr, &stdout, "GitHub CLI is not authenticated"),
            };
        }

        if matches_any(&haystack, REPO_PATTERNS) {
            return Self::InvalidRepository {
                message: first_line_or(&stderr, &stdout, "invalid repository"),
            };
        }

        Self::CommandFailed {
            message: first_line_or(
                &stderr,
                &stdout,
                &format!("gh exited with code {exit_code:?}"),
            ),
            exit_code,
            stderr,
            stdout,
        }
    }

    /// Stable machine-readable error code for logs and callers.
    pub fn code(&self) -> &'static str {
        match self {
            Self::GhNotInstalled => "gh_not_installed",
            Self::GhNotAuthenticated { .. } => "gh_not_authenticated",
            Self::InvalidRepository { .. } => "invalid_repository",
            Self::CommandFailed { .. } => "command_failed",
            Self::Timeout { .. } => "timeout",
            Self::ParseError { .. } => "parse_error",
        }
    }
}

fn matches_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|needle| haystack.contains(needle))
}

/// First non-empty line of the preferred stream, falling back to the other
/// stream and then to a fixed description.
fn first_line_or(preferred: &str, fallback: &str, fixed: &str) -> String {
    [preferred, fallback]
        .iter()
        .flat_map(|stream| stream.lines())
        .map(str::trim)
        .find(|line| !line.is_empty())
        .unwrap_or(fixed)
        .to_string()
}
