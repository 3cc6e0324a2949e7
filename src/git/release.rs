use git2::{ErrorClass, ObjectType, Oid, PushOptions, RemoteCallbacks, Repository, Signature};

use crate::auth::Credential;
use crate::domain::tag::tag_push_refspec;
use crate::error::{ProviderError, Result};

/// Remote used when none is configured.
pub const DEFAULT_REMOTE: &str = "origin";

/// Appends the trailing newline git expects when the message lacks one.
pub fn normalize_tag_message(message: &str) -> String {
    if message.ends_with('\n') {
        message.to_string()
    } else {
        format!("{}\n", message)
    }
}

/// Creates an annotated tag `tag_name` at the commit `target`.
///
/// Fails if the tag already exists or `message` is empty; an existing tag
/// is never moved.
pub fn create_annotated_tag(
    repo: &Repository,
    tag_name: &str,
    target: Oid,
    message: &str,
    tagger: &Signature<'_>,
) -> Result<Oid> {
    if message.is_empty() {
        return Err(ProviderError::TagCreation {
            tag: tag_name.to_string(),
            source: git2::Error::from_str("tag message must not be empty"),
        });
    }

    let object = repo
        .find_object(target, Some(ObjectType::Commit))
        .map_err(|e| ProviderError::resolution(target.to_string(), e))?;

    let tag_oid = repo
        .tag(
            tag_name,
            &object,
            tagger,
            &normalize_tag_message(message),
            false,
        )
        .map_err(|source| ProviderError::TagCreation {
            tag: tag_name.to_string(),
            source,
        })?;

    log::info!("Created tag {} at {}", tag_name, target);
    Ok(tag_oid)
}

/// Pushes `refs/tags/<tag_name>` to the same ref on `remote_name`.
///
/// An empty remote name means [`DEFAULT_REMOTE`]. The push is not forced,
/// so a tag that already exists remotely with another target is rejected.
pub fn push_tag(
    repo: &Repository,
    remote_name: &str,
    tag_name: &str,
    credential: &Credential,
) -> Result<()> {
    let remote_name = if remote_name.is_empty() {
        DEFAULT_REMOTE
    } else {
        remote_name
    };

    let mut remote = repo
        .find_remote(remote_name)
        .map_err(|e| ProviderError::remote(format!("Cannot find remote '{}': {}", remote_name, e)))?;

    let mut callbacks = RemoteCallbacks::new();
    credential.apply(&mut callbacks);
    callbacks.push_update_reference(|refname, status| match status {
        Some(status) => {
            log::warn!("Remote rejected {}: {}", refname, status);
            Err(git2::Error::from_str(&format!(
                "remote rejected {}: {}",
                refname, status
            )))
        }
        None => Ok(()),
    });

    let mut push_options = PushOptions::new();
    push_options.remote_callbacks(callbacks);

    let refspec = tag_push_refspec(tag_name);
    log::debug!(
        "Pushing {} to '{}' with {} credential",
        refspec,
        remote_name,
        credential.kind()
    );

    remote
        .push(&[refspec.as_str()], Some(&mut push_options))
        .map_err(|e| {
            let message = match e.class() {
                ErrorClass::Net => format!("Network error during push: {}", e),
                ErrorClass::Reference => format!("Reference error during push: {}", e),
                _ => format!("Failed to push tag '{}': {}", tag_name, e),
            };
            ProviderError::remote(message)
        })?;

    log::info!("Pushed tag {} to {}", tag_name, remote_name);
    Ok(())
}
