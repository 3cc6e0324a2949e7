use std::path::PathBuf;

use thiserror::Error;

/// Unified error type for provider-git operations
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("repository does not exist at '{}': {source}", path.display())]
    RepositoryNotFound {
        path: PathBuf,
        #[source]
        source: git2::Error,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Credential error: {0}")]
    Credential(String),

    #[error("Cannot resolve revision '{revision}': {source}")]
    Resolution {
        revision: String,
        #[source]
        source: git2::Error,
    },

    #[error("Commit history traversal failed: {0}")]
    GraphTraversal(#[source] git2::Error),

    #[error("Cannot enumerate references: {0}")]
    ReferenceEnumeration(#[source] git2::Error),

    #[error("Invalid tag pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    #[error("Cannot create tag '{tag}': {source}")]
    TagCreation {
        tag: String,
        #[source]
        source: git2::Error,
    },

    #[error("Remote operation failed: {0}")]
    RemoteWrite(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in provider-git
pub type Result<T> = std::result::Result<T, ProviderError>;

impl ProviderError {
    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        ProviderError::Config(msg.into())
    }

    /// Create a credential error with context
    pub fn credential(msg: impl Into<String>) -> Self {
        ProviderError::Credential(msg.into())
    }

    /// Create a remote error with context
    pub fn remote(msg: impl Into<String>) -> Self {
        ProviderError::RemoteWrite(msg.into())
    }

    pub fn resolution(revision: impl Into<String>, source: git2::Error) -> Self {
        ProviderError::Resolution {
            revision: revision.into(),
            source,
        }
    }

    /// True when the error came from a tag name that already exists locally.
    pub fn is_tag_exists(&self) -> bool {
        matches!(
            self,
            ProviderError::TagCreation { source, .. } if source.code() == git2::ErrorCode::Exists
        )
    }
}
