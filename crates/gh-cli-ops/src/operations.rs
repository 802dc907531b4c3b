use crate::command_runner::GhCommandRunner;
use crate::types::{
    CreateRequestInput, CreatedRequest, PullRequestSummary, ReviewServiceAvailability,
};
use crate::GhCliOpsError;
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use tracing::debug;

const TIMEOUT_SHORT: Duration = Duration::from_secs(30);
const TIMEOUT_LONG: Duration = Duration::from_secs(60);
const PR_JSON_FIELDS: &str = "number,title,url,state,headRefName";

/// Probe whether the GitHub CLI is present and runnable.
///
/// This never fails: any problem invoking `gh --version` is folded into
/// [`ReviewServiceAvailability::Unavailable`] with the reason preserved.
pub async fn probe_availability() -> ReviewServiceAvailability {
    let runner = GhCommandRunner::detached();

    match runner.run(&["--version"], TIMEOUT_SHORT).await {
        Ok(stdout) => {
            let version = stdout
                .lines()
                .next()
                .unwrap_or("gh (unknown version)")
                .trim()
                .to_string();
            debug!(version = %version, "GitHub CLI detected");
            ReviewServiceAvailability::Available { version }
        }
        Err(err) => ReviewServiceAvailability::Unavailable {
            reason: err.to_string(),
        },
    }
}

/// List open pull requests whose head is `head_branch`.
pub async fn list_open_requests(
    working_dir: &Path,
    head_branch: &str,
) -> Result<Vec<PullRequestSummary>, GhCliOpsError> {
    let runner = GhCommandRunner::for_repo(working_dir);

    let parsed: Vec<GhPullRequest> = runner
        .run_json(
            &[
                "pr",
                "list",
                "--state",
                "open",
                "--head",
                head_branch,
                "--json",
                PR_JSON_FIELDS,
            ],
            TIMEOUT_SHORT,
        )
        .await?;

    Ok(parsed
        .into_iter()
        .map(|pr| PullRequestSummary {
            number: pr.number,
            title: pr.title,
            url: pr.url,
            state: pr.state,
            head_ref_name: pr.head_ref_name,
        })
        .collect())
}

/// Create a pull request and return its URL.
pub async fn create_request(
    working_dir: &Path,
    input: CreateRequestInput,
) -> Result<CreatedRequest, GhCliOpsError> {
    let runner = GhCommandRunner::for_repo(working_dir);
    let body = input.body.unwrap_or_default();

    let stdout = runner
        .run(
            &[
                "pr",
                "create",
                "--title",
                &input.title,
                "--body",
                &body,
                "--base",
                &input.base,
                "--head",
                &input.head,
            ],
            TIMEOUT_LONG,
        )
        .await?;

    let url = extract_url(&stdout).ok_or_else(|| GhCliOpsError::ParseError {
        message: "could not extract pull request URL from gh pr create output".to_string(),
    })?;

    Ok(CreatedRequest { url })
}

fn extract_url(output: &str) -> Option<String> {
    output
        .lines()
        .map(str::trim)
        .find(|line| line.starts_with("http://") || line.starts_with("https://"))
        .map(str::to_string)
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GhPullRequest {
    number: i64,
    title: String,
    url: String,
    state: String,
    head_ref_name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extract_url_picks_https_line() {
        let output = "Creating pull request...\nhttps://github.com/owner/repo/pull/42\n";
        let url = extract_url(output).expect("url");
        assert_eq!(url, "https://github.com/owner/repo/pull/42");
    }

    #[test]
    fn extract_url_missing_returns_none() {
        assert!(extract_url("no url here\n").is_none());
    }

    #[test]
    fn parse_pr_list_payload() {
        let json = r#"[{
            "number": 7,
            "title": "Merge feature/test/login to test",
            "url": "https://github.com/owner/repo/pull/7",
            "state": "OPEN",
            "headRefName": "feature/test/login"
        }]"#;

        let parsed: Vec<GhPullRequest> = serde_json::from_str(json).expect("parse");
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].number, 7);
        assert_eq!(parsed[0].state, "OPEN");
        assert_eq!(
            parsed[0].head_ref_name.as_deref(),
            Some("feature/test/login")
        );
    }

    #[test]
    fn parse_empty_pr_list() {
        let parsed: Vec<GhPullRequest> = serde_json::from_str("[]").expect("parse");
        assert!(parsed.is_empty());
    }
}
