use git2::{ObjectType, Oid, Reference, Repository};

use crate::domain::tag::tag_name_from_ref;
use crate::domain::{Release, TagFilter};
use crate::error::{ProviderError, Result};
use crate::version::parse_version_from_tag;

/// Lists releases from every tag whose name parses as a semantic version.
///
/// Tags are returned in the order the reference store yields them. Tags
/// that do not match `pattern` or are not versions are skipped; only a
/// failure to enumerate references aborts the scan.
pub fn scan_releases(repo: &Repository, pattern: &str) -> Result<Vec<Release>> {
    let filter = TagFilter::new(pattern)?;
    let references = repo
        .references()
        .map_err(ProviderError::ReferenceEnumeration)?;

    let mut releases = Vec::new();
    for reference in references {
        let reference = reference.map_err(ProviderError::ReferenceEnumeration)?;

        let Some(tag) = reference.name().and_then(tag_name_from_ref) else {
            continue;
        };
        if !filter.matches(tag) {
            continue;
        }
        let Some(version) = parse_version_from_tag(tag) else {
            log::debug!("Skipping tag '{}': not a semantic version", tag);
            continue;
        };
        let Some(target) = reference_target(&reference) else {
            log::debug!("Skipping tag '{}': reference has no target", tag);
            continue;
        };

        releases.push(Release {
            sha: peel_tag_once(repo, target).to_string(),
            version: version.to_string(),
        });
    }

    log::debug!("Found {} releases", releases.len());
    Ok(releases)
}

fn reference_target(reference: &Reference<'_>) -> Option<Oid> {
    reference
        .target()
        .or_else(|| reference.resolve().ok().and_then(|r| r.target()))
}

/// Follows an annotated tag object one hop to the commit it points at.
///
/// Anything else (a commit, a tag of a tree or of another tag, an unreadable
/// object) comes back unchanged.
pub fn peel_tag_once(repo: &Repository, oid: Oid) -> Oid {
    match repo.find_tag(oid) {
        Ok(tag) if tag.target_type() == Some(ObjectType::Commit) => tag.target_id(),
        _ => oid,
    }
}
