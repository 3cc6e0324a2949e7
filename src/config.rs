use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{ProviderError, Result};
use crate::git::history::LogOrder;

pub const DEFAULT_BRANCH: &str = "master";
pub const DEFAULT_TAGGER_NAME: &str = "semantic-release";
pub const DEFAULT_TAGGER_EMAIL: &str = "git@go-semantic-release.xyz";
pub const DEFAULT_AUTH_USERNAME: &str = "git";
pub const DEFAULT_GIT_PATH: &str = ".";

/// File name searched for in the working directory and the user config directory.
pub const CONFIG_FILE_NAME: &str = "provider-git.toml";

/// Authentication settings as written in the configuration map.
///
/// Key material is not touched here; see [`crate::auth::Credential`] for loading.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AuthConfig {
    #[default]
    None,
    Basic {
        username: String,
        password: String,
    },
    Ssh {
        username: String,
        private_key: PathBuf,
        passphrase: String,
    },
}

/// Resolved provider configuration.
///
/// Every field has a usable value: unset or empty keys fall back to the
/// built-in defaults instead of failing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderConfig {
    pub default_branch: String,
    pub tagger_name: String,
    pub tagger_email: String,
    /// Remote pushed to; empty means the conventional `origin`.
    pub remote_name: String,
    pub auth: AuthConfig,
    pub git_path: PathBuf,
    pub log_order: LogOrder,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        ProviderConfig::from_map(&HashMap::new())
    }
}

/// Returns the value for `key`, treating a missing or empty entry as unset.
fn value_or(map: &HashMap<String, String>, key: &str, default: &str) -> String {
    match map.get(key) {
        Some(value) if !value.is_empty() => value.clone(),
        _ => default.to_string(),
    }
}

impl ProviderConfig {
    /// Builds the configuration from a flat string map.
    ///
    /// Recognized keys: `default_branch`, `tagger_name`, `tagger_email`,
    /// `remote_name`, `auth`, `auth_username`, `auth_password`,
    /// `auth_private_key`, `git_path`, `log_order`. Unknown keys are ignored.
    pub fn from_map(map: &HashMap<String, String>) -> Self {
        let username = value_or(map, "auth_username", DEFAULT_AUTH_USERNAME);
        let password = value_or(map, "auth_password", "");

        let auth = match map.get("auth").map(String::as_str) {
            Some("basic") => AuthConfig::Basic { username, password },
            Some("ssh") => AuthConfig::Ssh {
                username,
                private_key: PathBuf::from(value_or(map, "auth_private_key", "")),
                passphrase: password,
            },
            _ => AuthConfig::None,
        };

        let log_order = match map.get("log_order") {
            Some(raw) => raw.parse().unwrap_or_else(|_| {
                log::warn!("Unknown log_order '{}', using default order", raw);
                LogOrder::default()
            }),
            None => LogOrder::default(),
        };

        ProviderConfig {
            default_branch: value_or(map, "default_branch", DEFAULT_BRANCH),
            tagger_name: value_or(map, "tagger_name", DEFAULT_TAGGER_NAME),
            tagger_email: value_or(map, "tagger_email", DEFAULT_TAGGER_EMAIL),
            remote_name: value_or(map, "remote_name", ""),
            auth,
            git_path: PathBuf::from(value_or(map, "git_path", DEFAULT_GIT_PATH)),
            log_order,
        }
    }
}

/// Loads a flat configuration map from a TOML file.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `provider-git.toml` in current directory
/// 3. `provider-git.toml` in user config directory
/// 4. Empty map if no file found
///
/// The file must be a single table of scalar values; booleans and numbers
/// are converted to their string form.
pub fn load_config_file(config_path: Option<&Path>) -> Result<HashMap<String, String>> {
    let path = if let Some(path) = config_path {
        path.to_path_buf()
    } else if Path::new(CONFIG_FILE_NAME).exists() {
        PathBuf::from(CONFIG_FILE_NAME)
    } else if let Some(config_dir) = dirs::config_dir() {
        let candidate = config_dir.join(CONFIG_FILE_NAME);
        if candidate.exists() {
            candidate
        } else {
            return Ok(HashMap::new());
        }
    } else {
        return Ok(HashMap::new());
    };

    log::debug!("Loading configuration from {}", path.display());
    let content = fs::read_to_string(&path)?;
    parse_config_str(&content)
}

/// Parses a TOML document into a flat string map.
pub fn parse_config_str(content: &str) -> Result<HashMap<String, String>> {
    let table: toml::Table = toml::from_str(content)
        .map_err(|e| ProviderError::config(format!("invalid TOML: {}", e)))?;

    table
        .into_iter()
        .map(|(key, value)| {
            let value = match value {
                toml::Value::String(s) => s,
                toml::Value::Boolean(b) => b.to_string(),
                toml::Value::Integer(i) => i.to_string(),
                toml::Value::Float(f) => f.to_string(),
                other => {
                    return Err(ProviderError::config(format!(
                        "key '{}' must be a scalar value, found {}",
                        key,
                        other.type_str()
                    )))
                }
            };
            Ok((key, value))
        })
        .collect()
}

/// Applies `key=value` overrides on top of an existing map.
pub fn apply_overrides(map: &mut HashMap<String, String>, overrides: &[String]) -> Result<()> {
    for entry in overrides {
        let (key, value) = entry
            .split_once('=')
            .ok_or_else(|| ProviderError::config(format!("expected key=value, got '{}'", entry)))?;
        let key = key.trim();
        if key.is_empty() {
            return Err(ProviderError::config(format!("empty key in '{}'", entry)));
        }
        map.insert(key.to_string(), value.to_string());
    }
    Ok(())
}
