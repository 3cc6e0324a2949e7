use serde::Serialize;

/// A prior release discovered from a version tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Release {
    /// Commit the release points at (annotated tags already dereferenced).
    pub sha: String,
    /// Canonical semantic version, without the `v` prefix.
    pub version: String,
}

/// Request to publish a new release tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateReleaseConfig {
    pub new_version: String,
    /// Either a full commit hash or a branch name.
    pub sha: String,
    pub changelog: String,
}

/// Hosting metadata. Plain git has no owner or visibility, so only the
/// default branch carries information.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RepositoryInfo {
    pub owner: String,
    pub repo: String,
    pub default_branch: String,
    pub private: bool,
}

impl RepositoryInfo {
    pub fn for_branch(default_branch: impl Into<String>) -> Self {
        RepositoryInfo {
            owner: String::new(),
            repo: String::new(),
            default_branch: default_branch.into(),
            private: false,
        }
    }
}
