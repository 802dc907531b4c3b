use crate::GitCliOpsError;
use std::path::Path;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tokio::time::timeout;

/// Raw command output from a git subprocess.
#[derive(Debug, Clone)]
pub struct CommandRunOutput {
    pub stdout: String,
}

/// Raw command output retaining the exit status, for probes where a
/// non-zero exit is a valid answer rather than a failure.
#[derive(Debug, Clone)]
pub struct CommandProbeOutput {
    pub stdout: String,
    pub stderr: String,
    pub exit_code: Option<i32>,
}

/// Responsible for locating and executing the git binary.
#[derive(Debug, Clone)]
pub struct GitCommandRunner {
    executable: String,
}

impl Default for GitCommandRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl GitCommandRunner {
    pub fn new() -> Self {
        Self {
            executable: resolve_git_executable(),
        }
    }

    /// Run a git command, treating any non-zero exit as a classified error.
    pub async fn run(
        &self,
        args: &[String],
        working_dir: &Path,
        timeout_secs: u64,
    ) -> Result<CommandRunOutput, GitCliOpsError> {
        let probe = self.run_unchecked(args, working_dir, timeout_secs).await?;

        if probe.exit_code == Some(0) {
            return Ok(CommandRunOutput {
                stdout: probe.stdout,
            });
        }

        Err(classify_failed_command(
            probe.exit_code,
            &probe.stdout,
            &probe.stderr,
        ))
    }

    /// Run a git command and return its exit status verbatim.
    ///
    /// Spawn failures and timeouts are still errors; a non-zero exit is not.
    pub async fn run_unchecked(
        &self,
        args: &[String],
        working_dir: &Path,
        timeout_secs: u64,
    ) -> Result<CommandProbeOutput, GitCliOpsError> {
        let command_repr = format!("{} {}", self.executable, args.join(" "));

        let mut cmd = Command::new(&self.executable);
        cmd.args(args);
        cmd.current_dir(working_dir);
        cmd.stdin(Stdio::null());
        cmd.stdout(Stdio::piped());
        cmd.stderr(Stdio::piped());
        apply_non_interactive_env(&mut cmd);

        let output = match timeout(Duration::from_secs(timeout_secs), cmd.output()).await {
            Err(_) => {
                return Err(GitCliOpsError::Timeout {
                    command: command_repr,
                    timeout_secs,
                });
            }
            Ok(Err(err)) => {
                return if err.kind() == std::io::ErrorKind::NotFound {
                    Err(GitCliOpsError::GitNotInstalled)
                } else {
                    Err(GitCliOpsError::CommandFailed {
                        message: format!("failed to execute git command: {err}"),
                        exit_code: None,
                        stderr: String::new(),
                        stdout: String::new(),
                    })
                };
            }
            Ok(Ok(output)) => output,
        };

        Ok(CommandProbeOutput {
            stdout: String::from_utf8_lossy(&output.stdout).trim().to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            exit_code: output.status.code(),
        })
    }
}

fn apply_non_interactive_env(cmd: &mut Command) {
    cmd.env("GIT_TERMINAL_PROMPT", "0");
    cmd.env("GIT_PAGER", "cat");
    cmd.env("PAGER", "cat");
    cmd.env("NO_COLOR", "1");
    cmd.env("CLICOLOR", "0");
}

fn resolve_git_executable() -> String {
    if let Ok(path) = std::env::var("GIT_PATH") {
        let trimmed = path.trim();
        if !trimmed.is_empty() {
            return trimmed.to_string();
        }
    }

    for candidate in ["/opt/homebrew/bin/git", "/usr/local/bin/git", "/usr/bin/git"] {
        if Path::new(candidate).exists() {
            return candidate.to_string();
        }
    }

    "git".to_string()
}

pub(crate) fn classify_failed_command(
    exit_code: Option<i32>,
    stdout: &str,
    stderr: &str,
) -> GitCliOpsError {
    let combined = format!("{stderr}\n{stdout}").to_ascii_lowercase();

    if combined.contains("not a git repository") {
        return GitCliOpsError::NotARepository {
            message: non_empty(stderr, stdout, "not a git repository"),
        };
    }

    if combined.contains("automatic merge failed")
        || combined.contains("fix conflicts")
        || combined.contains("merge conflict")
    {
        return GitCliOpsError::MergeConflict {
            message: non_empty(stdout, stderr, "merge conflict"),
        };
    }

    if combined.contains("non-fast-forward")
        || combined.contains("[rejected]")
        || combined.contains("fetch first")
    {
        return GitCliOpsError::PushRejected {
            message: non_empty(stderr, stdout, "push rejected"),
        };
    }

    GitCliOpsError::CommandFailed {
        message: non_empty(
            stderr,
            stdout,
            &format!("git command failed with exit code {:?}", exit_code),
        ),
        exit_code,
        stderr: stderr.to_string(),
        stdout: stdout.to_string(),
    }
}

fn non_empty(primary: &str, secondary: &str, fallback: &str) -> String {
    if !primary.trim().is_empty() {
        primary.to_string()
    } else if !secondary.trim().is_empty() {
        secondary.to_string()
    } else {
        fallback.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_not_a_repository() {
        let err = classify_failed_command(
            Some(128),
            "",
            "fatal: not a git repository (or any of the parent directories): .git",
        );
        assert!(matches!(err, GitCliOpsError::NotARepository { .. }));
    }

    #[test]
    fn classify_merge_conflict() {
        let err = classify_failed_command(
            Some(1),
            "CONFLICT (content): Merge conflict in src/main.rs\nAutomatic merge failed; fix conflicts and then commit the result.",
            "",
        );
        assert!(matches!(err, GitCliOpsError::MergeConflict { .. }));
    }

    #[test]
    fn classify_rejected_push() {
        let err = classify_failed_command(
            Some(1),
            "",
            "! [rejected] feature/test/login -> feature/test/login (non-fast-forward)",
        );
        assert!(matches!(err, GitCliOpsError::PushRejected { .. }));
    }

    #[test]
    fn classify_fallback_command_error() {
        let err = classify_failed_command(Some(1), "", "some other failure");
        assert!(matches!(err, GitCliOpsError::CommandFailed { .. }));
    }

    #[test]
    fn fallback_message_prefers_stderr() {
        let err = classify_failed_command(Some(1), "stdout text", "stderr text");
        match err {
            GitCliOpsError::CommandFailed { message, .. } => assert_eq!(message, "stderr text"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn picks_git_path_env_when_set() {
        std::env::set_var("GIT_PATH", "/custom/git");
        let resolved = resolve_git_executable();
        std::env::remove_var("GIT_PATH");
        assert_eq!(resolved, "/custom/git");
    }
}
