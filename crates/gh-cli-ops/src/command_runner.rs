use crate::GhCliOpsError;
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tracing::debug;

// gh must never fall back to interactive prompts or a pager when driven
// from automation.
const NON_INTERACTIVE_ENV: &[(&str, &str)] = &[
    ("GH_PROMPT_DISABLED", "1"),
    ("GH_NO_UPDATE_NOTIFIER", "1"),
    ("GH_PAGER", "cat"),
    ("PAGER", "cat"),
    ("NO_COLOR", "1"),
];

const KNOWN_INSTALL_LOCATIONS: &[&str] = &["/opt/homebrew/bin/gh", "/usr/local/bin/gh", "/usr/bin/gh"];

/// Executes `gh` subcommands scoped to one repository working directory.
///
/// Pull-request operations run inside the repository so gh can resolve the
/// base repo from the git remotes. [`GhCommandRunner::detached`] builds a
/// runner with no working directory for repo-independent invocations such
/// as the availability probe.
#[derive(Debug, Clone)]
pub struct GhCommandRunner {
    executable: PathBuf,
    repo: Option<PathBuf>,
}

impl GhCommandRunner {
    pub fn for_repo(repo: &Path) -> Self {
        Self {
            executable: resolve_executable(),
            repo: Some(repo.to_path_buf()),
        }
    }

    pub fn detached() -> Self {
        Self {
            executable: resolve_executable(),
            repo: None,
        }
    }

    /// Run a gh subcommand and return its trimmed stdout.
    ///
    /// A non-zero exit is classified into the crate's error taxonomy from
    /// the captured output streams.
    pub async fn run(&self, args: &[&str], timeout: Duration) -> Result<String, GhCliOpsError> {
        debug!(command = %self.render(args), "running gh command");

        let mut command = Command::new(&self.executable);
        command
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .envs(NON_INTERACTIVE_ENV.iter().copied());
        if let Some(repo) = &self.repo {
            command.current_dir(repo);
        }

        let output = match tokio::time::timeout(timeout, command.output()).await {
            Ok(Ok(output)) => output,
            Ok(Err(err)) if err.kind() == std::io::ErrorKind::NotFound => {
                return Err(GhCliOpsError::GhNotInstalled);
            }
            Ok(Err(err)) => {
                return Err(GhCliOpsError::CommandFailed {
                    message: format!("failed to spawn gh: {err}"),
                    exit_code: None,
                    stderr: String::new(),
                    stdout: String::new(),
                });
            }
            Err(_) => {
                return Err(GhCliOpsError::Timeout {
                    command: self.render(args),
                    timeout_secs: timeout.as_secs(),
                });
            }
        };

        if !output.status.success() {
            return Err(GhCliOpsError::from_failed_invocation(&output));
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }

    /// Run a gh subcommand whose stdout is a JSON document.
    pub async fn run_json<T: DeserializeOwned>(
        &self,
        args: &[&str],
        timeout: Duration,
    ) -> Result<T, GhCliOpsError> {
        let stdout = self.run(args, timeout).await?;
        serde_json::from_str(&stdout).map_err(|err| GhCliOpsError::ParseError {
            message: format!("failed to parse `{}` output: {err}", self.render(args)),
        })
    }

    fn render(&self, args: &[&str]) -> String {
        format!("gh {}", args.join(" "))
    }
}

/// GH_PATH overrides discovery; otherwise prefer well-known install
/// locations before trusting PATH lookup.
fn resolve_executable() -> PathBuf {
    if let Ok(overridden) = std::env::var("GH_PATH") {
        let trimmed = overridden.trim();
        if !trimmed.is_empty() {
            return PathBuf::from(trimmed);
        }
    }

    KNOWN_INSTALL_LOCATIONS
        .iter()
        .map(PathBuf::from)
        .find(|candidate| candidate.exists())
        .unwrap_or_else(|| PathBuf::from("gh"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_executable_maps_to_not_installed() {
        let runner = GhCommandRunner {
            executable: PathBuf::from("/nonexistent/path/to/gh"),
            repo: None,
        };
        let err = runner
            .run(&["--version"], Duration::from_secs(5))
            .await
            .expect_err("spawn should fail");
        assert!(matches!(err, GhCliOpsError::GhNotInstalled));
    }

    #[test]
    fn render_joins_subcommand_for_logs() {
        let runner = GhCommandRunner::detached();
        assert_eq!(
            runner.render(&["pr", "list", "--state", "open"]),
            "gh pr list --state open"
        );
    }

    #[test]
    fn gh_path_override_wins_over_discovery() {
        std::env::set_var("GH_PATH", "/custom/bin/gh");
        let resolved = resolve_executable();
        std::env::remove_var("GH_PATH");
        assert_eq!(resolved, PathBuf::from("/custom/bin/gh"));
    }

    #[test]
    fn non_interactive_env_disables_prompts_and_pager() {
        let keys: Vec<&str> = NON_INTERACTIVE_ENV.iter().map(|(key, _)| *key).collect();
        assert!(keys.contains(&"GH_PROMPT_DISABLED"));
        assert!(keys.contains(&"GH_PAGER"));
        assert!(keys.contains(&"NO_COLOR"));
    }
}
