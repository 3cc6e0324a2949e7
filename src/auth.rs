//! Credentials for pushing to a remote.
//!
//! A [`Credential`] is resolved once at setup and then only ever used through
//! [`Credential::apply`], which installs the matching callback on an outgoing
//! connection.

use std::fs;
use std::path::Path;

use git2::{Cred, CredentialType, RemoteCallbacks};

use crate::config::AuthConfig;
use crate::error::{ProviderError, Result};

/// Authentication used for remote operations.
#[derive(Clone, PartialEq, Eq)]
pub enum Credential {
    /// No explicit credential; the SSH agent or platform defaults are tried.
    None,
    Basic { username: String, password: String },
    /// Key material is held in memory so an unreadable key fails setup, not push.
    Ssh {
        username: String,
        private_key: String,
        passphrase: Option<String>,
    },
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Credential::None => write!(f, "Credential::None"),
            Credential::Basic { username, .. } => {
                write!(f, "Credential::Basic {{ username: {:?} }}", username)
            }
            Credential::Ssh { username, .. } => {
                write!(f, "Credential::Ssh {{ username: {:?} }}", username)
            }
        }
    }
}

impl Credential {
    /// Resolves the configured authentication into a usable credential.
    ///
    /// For SSH the private key file is read immediately; a missing or
    /// malformed key is a [`ProviderError::Credential`].
    pub fn from_config(config: &AuthConfig) -> Result<Self> {
        match config {
            AuthConfig::None => Ok(Credential::None),
            AuthConfig::Basic { username, password } => Ok(Credential::Basic {
                username: username.clone(),
                password: password.clone(),
            }),
            AuthConfig::Ssh {
                username,
                private_key,
                passphrase,
            } => Ok(Credential::Ssh {
                username: username.clone(),
                private_key: load_private_key(private_key)?,
                passphrase: if passphrase.is_empty() {
                    None
                } else {
                    Some(passphrase.clone())
                },
            }),
        }
    }

    /// Short name of the authentication method, for log output.
    pub fn kind(&self) -> &'static str {
        match self {
            Credential::None => "none",
            Credential::Basic { .. } => "basic",
            Credential::Ssh { .. } => "ssh",
        }
    }

    /// Installs a credentials callback for this credential.
    ///
    /// The callback answers once; a second request on the same connection
    /// means the remote rejected the credential, which is reported as an
    /// error instead of retrying forever.
    pub fn apply<'a>(&'a self, callbacks: &mut RemoteCallbacks<'a>) {
        let mut attempted = false;
        callbacks.credentials(move |_url, username_from_url, allowed_types| {
            if attempted {
                return Err(git2::Error::from_str("authentication rejected by remote"));
            }
            attempted = true;

            match self {
                Credential::None => {
                    if allowed_types.contains(CredentialType::SSH_KEY) {
                        Cred::ssh_key_from_agent(username_from_url.unwrap_or("git"))
                    } else {
                        Cred::default()
                    }
                }
                Credential::Basic { username, password } => {
                    Cred::userpass_plaintext(username, password)
                }
                Credential::Ssh {
                    username,
                    private_key,
                    passphrase,
                } => Cred::ssh_key_from_memory(username, None, private_key, passphrase.as_deref()),
            }
        });
    }
}

fn load_private_key(path: &Path) -> Result<String> {
    if path.as_os_str().is_empty() {
        return Err(ProviderError::credential(
            "auth is 'ssh' but auth_private_key is not set",
        ));
    }

    let key = fs::read_to_string(path).map_err(|e| {
        ProviderError::credential(format!(
            "cannot read private key '{}': {}",
            path.display(),
            e
        ))
    })?;

    if !key.contains("PRIVATE KEY-----") {
        return Err(ProviderError::credential(format!(
            "'{}' does not contain a PEM or OpenSSH private key",
            path.display()
        )));
    }

    Ok(key)
}
