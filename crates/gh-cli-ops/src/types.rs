use serde::{Deserialize, Serialize};

/// Whether the GitHub CLI is present and runnable.
///
/// Probed once per run; an unavailable service is an expected environment
/// variation, not an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "status")]
pub enum ReviewServiceAvailability {
    Available { version: String },
    Unavailable { reason: String },
}

impl ReviewServiceAvailability {
    pub fn is_available(&self) -> bool {
        matches!(self, Self::Available { .. })
    }
}

/// One open pull request as reported by `gh pr list`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PullRequestSummary {
    pub number: i64,
    pub title: String,
    pub url: String,
    /// PR state as reported by gh (`OPEN`, `CLOSED`, `MERGED`).
    pub state: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub head_ref_name: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateRequestInput {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    pub base: String,
    pub head: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatedRequest {
    pub url: String,
}
