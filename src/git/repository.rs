use std::collections::HashMap;

use git2::{Repository, Signature};

use crate::auth::Credential;
use crate::config::ProviderConfig;
use crate::domain::tag::release_tag_name;
use crate::domain::{CreateReleaseConfig, RawCommit, Release, RepositoryInfo};
use crate::error::{ProviderError, Result};
use crate::git::{history, release, resolve, tags, Provider};
use crate::version::PROVIDER_VERSION;

/// Release provider backed by a local git repository.
///
/// Holds the open repository together with the resolved configuration and
/// credential. Nothing else is kept between calls.
pub struct GitProvider {
    config: ProviderConfig,
    credential: Credential,
    repo: Repository,
}

impl GitProvider {
    /// Sets up a provider from a flat configuration map.
    ///
    /// Unset keys fall back to defaults. Fails only when SSH key material
    /// cannot be loaded or no repository exists at `git_path`.
    pub fn init(config: &HashMap<String, String>) -> Result<Self> {
        Self::from_config(ProviderConfig::from_map(config))
    }

    pub fn from_config(config: ProviderConfig) -> Result<Self> {
        let credential = Credential::from_config(&config.auth)?;

        // Open exactly the given path: a repository in a parent directory
        // must not be picked up.
        let repo = Repository::open(&config.git_path).map_err(|source| {
            ProviderError::RepositoryNotFound {
                path: config.git_path.clone(),
                source,
            }
        })?;

        log::debug!(
            "Opened repository at {} (remote '{}', auth {}, order {})",
            config.git_path.display(),
            config.remote_name,
            credential.kind(),
            config.log_order
        );

        Ok(GitProvider {
            config,
            credential,
            repo,
        })
    }

    pub fn config(&self) -> &ProviderConfig {
        &self.config
    }

    pub fn repository(&self) -> &Repository {
        &self.repo
    }
}

impl Provider for GitProvider {
    fn name(&self) -> &'static str {
        "git"
    }

    fn version(&self) -> &'static str {
        PROVIDER_VERSION
    }

    fn get_info(&self) -> Result<RepositoryInfo> {
        Ok(RepositoryInfo::for_branch(self.config.default_branch.clone()))
    }

    fn get_commits(&self, from_sha: &str, to_sha: &str) -> Result<Vec<RawCommit>> {
        let start = resolve::resolve_revision(&self.repo, to_sha)?;
        history::collect_commits(&self.repo, start, from_sha, self.config.log_order)
    }

    fn get_releases(&self, pattern: &str) -> Result<Vec<Release>> {
        tags::scan_releases(&self.repo, pattern)
    }

    fn create_release(&self, request: &CreateReleaseConfig) -> Result<()> {
        let target = resolve::resolve_release_target(&self.repo, &request.sha)?;
        let tag_name = release_tag_name(&request.new_version);

        let tagger = Signature::now(&self.config.tagger_name, &self.config.tagger_email)
            .map_err(|source| ProviderError::TagCreation {
                tag: tag_name.clone(),
                source,
            })?;
        release::create_annotated_tag(
            &self.repo,
            &tag_name,
            target,
            &request.changelog,
            &tagger,
        )?;

        release::push_tag(
            &self.repo,
            &self.config.remote_name,
            &tag_name,
            &self.credential,
        )
    }
}
