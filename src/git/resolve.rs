use git2::{Oid, Repository};

use crate::error::{ProviderError, Result};

/// True for a full 40 character hexadecimal object id.
pub fn is_full_hash(id: &str) -> bool {
    id.len() == 40 && id.bytes().all(|b| b.is_ascii_hexdigit())
}

/// Resolves a full hash or revision expression (`HEAD~2`, `main`, `v1.0.0`)
/// to a commit id.
///
/// Full hashes are taken as-is without checking that the object exists.
pub fn resolve_revision(repo: &Repository, revision: &str) -> Result<Oid> {
    if is_full_hash(revision) {
        return Oid::from_str(revision).map_err(|e| ProviderError::resolution(revision, e));
    }

    let commit = repo
        .revparse_single(revision)
        .and_then(|object| object.peel_to_commit())
        .map_err(|e| ProviderError::resolution(revision, e))?;

    log::debug!("Resolved revision '{}' to {}", revision, commit.id());
    Ok(commit.id())
}

/// Resolves a release target: a full hash, or else the name of a local branch.
///
/// Unlike [`resolve_revision`], tags and relative expressions are not
/// accepted here.
pub fn resolve_release_target(repo: &Repository, target: &str) -> Result<Oid> {
    if is_full_hash(target) {
        return Oid::from_str(target).map_err(|e| ProviderError::resolution(target, e));
    }

    let commit = repo
        .find_reference(&format!("refs/heads/{}", target))
        .and_then(|reference| reference.peel_to_commit())
        .map_err(|e| ProviderError::resolution(target, e))?;

    log::debug!("Resolved branch '{}' to {}", target, commit.id());
    Ok(commit.id())
}
