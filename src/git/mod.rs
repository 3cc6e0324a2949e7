//! Git operations behind the release provider interface
//!
//! The release engine talks to a repository through the [Provider] trait.
//! [GitProvider] implements it on top of a local repository opened with
//! the `git2` crate.
//!
//! # Overview
//!
//! - [resolve]: turn hashes, branch names and revision expressions into commits
//! - [history]: walk commit ancestry in a configurable order
//! - [tags]: discover prior releases from semantic-version tags
//! - [release]: create an annotated release tag and push it
//! - [repository]: the [GitProvider] handle tying the above together
//!
//! ```no_run
//! # use std::collections::HashMap;
//! # use provider_git::git::{GitProvider, Provider};
//! # fn example() -> provider_git::Result<()> {
//! let mut config = HashMap::new();
//! config.insert("git_path".to_string(), "/path/to/repo".to_string());
//! let provider = GitProvider::init(&config)?;
//! let releases = provider.get_releases("")?;
//! let commits = provider.get_commits("", "master")?;
//! # Ok(())
//! # }
//! ```

pub mod history;
pub mod release;
pub mod repository;
pub mod resolve;
pub mod tags;

#[cfg(test)]
mod test_support;

pub use history::LogOrder;
pub use repository::GitProvider;

use crate::domain::{CreateReleaseConfig, RawCommit, Release, RepositoryInfo};
use crate::error::Result;

/// Operations a release engine needs from a version-control provider.
///
/// Calls are synchronous and must not overlap on one instance; use one
/// provider per repository and caller.
pub trait Provider {
    /// Short provider identifier.
    fn name(&self) -> &'static str;

    /// Version of the provider implementation.
    fn version(&self) -> &'static str;

    /// Repository metadata; only the default branch is meaningful for plain git.
    fn get_info(&self) -> Result<RepositoryInfo>;

    /// Commits reachable from `to_sha`, stopping before `from_sha`.
    ///
    /// `to_sha` may be a full hash or any revision expression. An empty or
    /// unreachable `from_sha` yields the full ancestry.
    fn get_commits(&self, from_sha: &str, to_sha: &str) -> Result<Vec<RawCommit>>;

    /// Releases parsed from version tags, optionally filtered by a regex
    /// on the tag name.
    fn get_releases(&self, pattern: &str) -> Result<Vec<Release>>;

    /// Tags `v<new_version>` at the target and pushes it to the remote.
    fn create_release(&self, release: &CreateReleaseConfig) -> Result<()>;
}
