use serde::{Deserialize, Serialize};

/// Answer of a branch-existence query.
///
/// `Absent` is a successful answer, not an error; a query that could not be
/// executed at all fails with [`crate::GitCliOpsError`] instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BranchExistence {
    /// The branch exists locally or as a remote-tracking ref.
    Exists,
    /// No local or remote-tracking ref with that name.
    Absent,
}

impl BranchExistence {
    pub fn exists(&self) -> bool {
        matches!(self, Self::Exists)
    }
}
